use crate::{
    file::io::read_le_at_dyn,
    metadata::{
        tables::{
            CodedIndex, CodedIndexType, CustomAttributeRaw, RowReadable, TableId, TableInfoRef,
        },
        token::Token,
    },
    Result,
};

impl RowReadable for CustomAttributeRaw {
    const TABLE_ID: TableId = TableId::CustomAttribute;

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* parent */        sizes.coded_index_bytes(CodedIndexType::HasCustomAttribute) +
            /* constructor */   sizes.coded_index_bytes(CodedIndexType::CustomAttributeType) +
            /* value */         sizes.blob_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(CustomAttributeRaw {
            rid,
            token: Token::new(0x0C00_0000 + rid),
            offset: *offset,
            parent: CodedIndex::read(data, offset, sizes, CodedIndexType::HasCustomAttribute)?,
            constructor: CodedIndex::read(
                data,
                offset,
                sizes,
                CodedIndexType::CustomAttributeType,
            )?,
            value: read_le_at_dyn(data, offset, sizes.is_large_blob())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x43, 0x00, // parent, TypeDef 2
            0x0B, 0x00, // constructor, MemberRef 1
            0x2C, 0x00, // value
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::CustomAttribute, 1),
                (TableId::TypeDef, 2),
                (TableId::MemberRef, 1),
            ],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<CustomAttributeRaw>::new(&data, 1, sizes);
        assert_eq!(table.row_size(), 6);

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0C00_0001);
        assert_eq!(row.parent.tag, TableId::TypeDef);
        assert_eq!(row.parent.row, 2);
        assert_eq!(row.constructor.tag, TableId::MemberRef);
        assert_eq!(row.constructor.row, 1);
        assert_eq!(row.value, 0x2C);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x43, 0x00, // parent
            0x0A, 0x00, // constructor, MethodDef 1
            0x2C, 0x00, 0x01, 0x00, // value
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::CustomAttribute, 1), (TableId::TypeDef, 2)],
            false,
            true,
            false,
        ));
        let table = MetadataTable::<CustomAttributeRaw>::new(&data, 1, sizes);

        let row = table.get(1).unwrap();
        assert_eq!(row.constructor.tag, TableId::MethodDef);
        assert_eq!(row.value, 0x0001_002C);
    }
}
