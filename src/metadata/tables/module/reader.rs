use crate::{
    file::io::{read_le_at, read_le_at_dyn},
    metadata::{
        tables::{ModuleRaw, RowReadable, TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

impl RowReadable for ModuleRaw {
    const TABLE_ID: TableId = TableId::Module;

    #[rustfmt::skip]
    fn row_size(sizes: &TableInfoRef) -> u32 {
        u32::from(
            /* generation */    2 +
            /* name */          sizes.str_bytes() +
            /* mvid */          sizes.guid_bytes() +
            /* encid */         sizes.guid_bytes() +
            /* encbaseid */     sizes.guid_bytes()
        )
    }

    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self> {
        Ok(ModuleRaw {
            rid,
            token: Token::new(rid),
            offset: *offset,
            generation: u32::from(read_le_at::<u16>(data, offset)?),
            name: read_le_at_dyn(data, offset, sizes.is_large_str())?,
            mvid: read_le_at_dyn(data, offset, sizes.is_large_guid())?,
            encid: read_le_at_dyn(data, offset, sizes.is_large_guid())?,
            encbaseid: read_le_at_dyn(data, offset, sizes.is_large_guid())?,
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
            0x00, 0x00, // generation
            0x02, 0x00, // name
            0x01, 0x00, // mvid
            0x00, 0x00, // encid
            0x00, 0x00, // encbaseid
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Module, 1)], false, false, false));
        let table = MetadataTable::<ModuleRaw>::new(&data, 1, sizes);
        assert_eq!(table.row_size(), 10);

        let row = table.get(1).unwrap();
        assert_eq!(row.token.value(), 0x0000_0001);
        assert_eq!(row.name, 2);
        assert_eq!(row.mvid, 1);
        assert_eq!(row.encid, 0);
    }

    #[test]
    fn crafted_long() {
        let data = vec![
            0x00, 0x00, // generation
            0x02, 0x00, 0x01, 0x00, // name
            0x01, 0x00, 0x00, 0x00, // mvid
            0x00, 0x00, 0x00, 0x00, // encid
            0x00, 0x00, 0x00, 0x00, // encbaseid
        ];

        let sizes = Arc::new(TableInfo::new_test(&[(TableId::Module, 1)], true, true, true));
        let table = MetadataTable::<ModuleRaw>::new(&data, 1, sizes);
        assert_eq!(table.row_size(), 18);

        let row = table.get(1).unwrap();
        assert_eq!(row.name, 0x0001_0002);
        assert_eq!(row.mvid, 1);
    }
}
