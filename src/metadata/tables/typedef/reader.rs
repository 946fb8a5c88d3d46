use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{CodedIndex, CodedIndexType, RowReadable, TableId, TableInfoRef, TypeDefRaw},
        token::Token,
    },
    Result,
};

impl RowReadable for TypeDefRaw {
    const TABLE_ID: TableId = TableId::TypeDef;

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* flags */             4 +
            /* type_name */         sizes.str_bytes() +
            /* type_namespace */    sizes.str_bytes() +
            /* extends */           sizes.coded_index_bytes(CodedIndexType::TypeDefOrRef) +
            /* field_list */        sizes.table_index_bytes(TableId::Field) +
            /* method_list */       sizes.table_index_bytes(TableId::MethodDef)
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(TypeDefRaw {
            rid,
            token: Token::new(0x0200_0000 + rid),
            offset: *offset,
            flags: read_le_at::<u32>(data, offset)?,
            type_name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            type_namespace: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            extends: CodedIndex::read(data, offset, sizes, CodedIndexType::TypeDefOrRef)?,
            field_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::Field))?,
            method_list: read_le_at_dyn(data, offset, sizes.is_large(TableId::MethodDef))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::metadata::tables::{MetadataTable, TableInfo, TypeAttributes};

    use super::*;

    #[test]
    fn crafted_short() {
        let data = vec![
            0x21, 0x40, 0x00, 0x00, // flags
            0x42, 0x00, // type_name
            0x43, 0x00, // type_namespace
            0x00, 0x02, // extends
            0x00, 0x03, // field_list
            0x00, 0x04, // method_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[(TableId::Field, 1), (TableId::MethodDef, 1)],
            false,
            false,
            false,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 1, sizes);

        for row in &table {
            let row = row.unwrap();
            assert_eq!(row.rid, 1);
            assert_eq!(row.token.value(), 0x0200_0001);
            assert_eq!(row.flags, TypeAttributes::WINDOWS_RUNTIME | 0x21);
            assert!(row.is_windows_runtime());
            assert!(row.is_interface());
            assert_eq!(row.type_name, 0x42);
            assert_eq!(row.type_namespace, 0x43);
            assert_eq!(
                row.extends,
                CodedIndex {
                    tag: TableId::TypeDef,
                    row: 0x80,
                    token: Token::new(0x80 | 0x0200_0000),
                }
            );
            assert_eq!(row.field_list, 0x0300);
            assert_eq!(row.method_list, 0x0400);
        }
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, 0x00, 0x01, // flags
            0x42, 0x00, 0x00, 0x00, // type_name
            0x43, 0x00, 0x00, 0x00, // type_namespace
            0x00, 0x00, 0x00, 0x02, // extends
            0x00, 0x00, 0x00, 0x03, // field_list
            0x00, 0x00, 0x00, 0x04, // method_list
        ];

        let sizes = Arc::new(TableInfo::new_test(
            &[
                (TableId::TypeDef, u32::from(u16::MAX) + 3),
                (TableId::Field, u32::from(u16::MAX) + 3),
                (TableId::MethodDef, u32::from(u16::MAX) + 3),
            ],
            true,
            true,
            true,
        ));
        let table = MetadataTable::<TypeDefRaw>::new(&data, 1, sizes);
        assert_eq!(table.row_size(), 24);

        let row = table.get(1).unwrap();
        assert_eq!(row.flags, 0x0100_0000);
        assert!(!row.is_windows_runtime());
        assert_eq!(row.type_name, 0x42);
        assert_eq!(row.extends.tag, TableId::TypeDef);
        assert_eq!(row.extends.row, 0x0080_0000);
        assert_eq!(row.field_list, 0x0300_0000);
        assert_eq!(row.method_list, 0x0400_0000);
    }
}
