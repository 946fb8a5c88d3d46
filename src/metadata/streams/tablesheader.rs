use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::{
    file::io::read_le,
    metadata::tables::{
        CodedIndexType, CustomAttributeRaw, MemberRefRaw, MetadataTable, MethodDefRaw, ModuleRaw,
        ParamRaw, RowReadable, TableId, TableInfo, TableInfoRef, TypeDefRaw, TypeRefRaw,
    },
    Error::{NotSupported, OutOfBounds},
    Result,
};

/// The header of the `#~` stream, with the location of every table a WinMD resolver reads.
///
/// Tables are laid out back to back in `TableId` order, so locating `CustomAttribute`
/// requires the size of every table before it. Tables past `CustomAttribute` are never
/// read and are not located.
///
/// ## Reference
/// * '<https://ecma-international.org/wp-content/uploads/ECMA-335_6th_edition_june_2012.pdf>' - II.24.2.6 && II.22
pub struct TablesHeader<'a> {
    /// Major version of table schemata, shall be 2
    pub major_version: u8,
    /// Minor version of table schemata, shall be 0
    pub minor_version: u8,
    /// Bit vector of present tables
    pub valid: u64,
    /// Bit vector of sorted tables
    pub sorted: u64,
    /// Row counts and index widths
    pub info: TableInfoRef,
    data: &'a [u8],
    offsets: Vec<Option<usize>>,
}

impl<'a> TablesHeader<'a> {
    /// Create a `TablesHeader` object from a sequence of bytes
    ///
    /// # Arguments
    /// * 'data' - The `#~` stream
    ///
    /// # Errors
    /// Returns an error if the data is too short, no table is present, a table extends past
    /// the stream, or the metadata uses uncompressed pointer tables.
    pub fn from(data: &'a [u8]) -> Result<TablesHeader<'a>> {
        if data.len() < 24 {
            return Err(OutOfBounds);
        }

        let valid_bitvec = read_le::<u64>(&data[8..])?;
        if valid_bitvec == 0 {
            return Err(malformed_error!("No valid rows in any of the tables"));
        }

        let info = Arc::new(TableInfo::new(data, valid_bitvec)?);
        for pointer_table in [TableId::FieldPtr, TableId::MethodPtr, TableId::ParamPtr] {
            if info.get(pointer_table).rows > 0 {
                return Err(NotSupported);
            }
        }

        let mut offsets = vec![None; TableId::CustomAttribute as usize + 1];
        let mut current_offset = 24 + valid_bitvec.count_ones() as usize * 4;
        for table_id in TableId::iter().take_while(|id| *id <= TableId::CustomAttribute) {
            let rows = info.get(table_id).rows;
            if rows == 0 {
                continue;
            }

            let size = rows as usize * row_size(table_id, &info) as usize;
            if current_offset + size > data.len() {
                return Err(OutOfBounds);
            }

            offsets[table_id as usize] = Some(current_offset);
            current_offset += size;
        }

        Ok(TablesHeader {
            major_version: read_le::<u8>(&data[4..])?,
            minor_version: read_le::<u8>(&data[5..])?,
            valid: valid_bitvec,
            sorted: read_le::<u64>(&data[16..])?,
            info,
            data,
            offsets,
        })
    }

    /// Get the table count
    #[must_use]
    pub fn table_count(&self) -> u32 {
        self.valid.count_ones()
    }

    /// Typed view of the table holding rows of type `T`.
    ///
    /// A table that is not present yields an empty view.
    #[must_use]
    pub fn table<T: RowReadable>(&self) -> MetadataTable<'a, T> {
        match self.offsets.get(T::TABLE_ID as usize).copied().flatten() {
            Some(offset) => MetadataTable::new(
                &self.data[offset..],
                self.info.get(T::TABLE_ID).rows,
                self.info.clone(),
            ),
            None => MetadataTable::new(&[], 0, self.info.clone()),
        }
    }

    /// Check if a table is present
    #[must_use]
    pub fn has_table(&self, table_id: TableId) -> bool {
        (self.valid & (1u64 << (table_id as u8))) != 0
    }

    /// Get the row count for a specific table, 0 if the table is not present
    #[must_use]
    pub fn table_row_count(&self, table_id: TableId) -> u32 {
        self.info.get(table_id).rows
    }
}

#[rustfmt::skip]
fn row_size(table_id: TableId, sizes: &TableInfoRef) -> u32 {
    match table_id {
        TableId::Module => ModuleRaw::row_size(sizes),
        TableId::TypeRef => TypeRefRaw::row_size(sizes),
        TableId::TypeDef => TypeDefRaw::row_size(sizes),
        TableId::MethodDef => MethodDefRaw::row_size(sizes),
        TableId::Param => ParamRaw::row_size(sizes),
        TableId::MemberRef => MemberRefRaw::row_size(sizes),
        TableId::CustomAttribute => CustomAttributeRaw::row_size(sizes),
        TableId::Field => u32::from(
            /* flags */         2 +
            /* name */          sizes.str_bytes() +
            /* signature */     sizes.blob_bytes()
        ),
        TableId::InterfaceImpl => u32::from(
            /* class */         sizes.table_index_bytes(TableId::TypeDef) +
            /* interface */     sizes.coded_index_bytes(CodedIndexType::TypeDefOrRef)
        ),
        TableId::Constant => u32::from(
            /* type + pad */    2 +
            /* parent */        sizes.coded_index_bytes(CodedIndexType::HasConstant) +
            /* value */         sizes.blob_bytes()
        ),
        TableId::FieldPtr => u32::from(sizes.table_index_bytes(TableId::Field)),
        TableId::MethodPtr => u32::from(sizes.table_index_bytes(TableId::MethodDef)),
        TableId::ParamPtr => u32::from(sizes.table_index_bytes(TableId::Param)),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(valid: u64, rows: &[u32]) -> Vec<u8> {
        let mut data = vec![0, 0, 0, 0, 2, 0, 0, 1];
        data.extend_from_slice(&valid.to_le_bytes());
        data.extend_from_slice(&0_u64.to_le_bytes());
        for row in rows {
            data.extend_from_slice(&row.to_le_bytes());
        }
        data
    }

    #[test]
    fn locate_tables() {
        // Module (1 row, 10 bytes) and TypeDef (2 rows, 14 bytes each)
        let mut data = header(0b101, &[1, 2]);
        data.extend(std::iter::repeat(0xAA).take(10));
        for rid in 1..=2_u8 {
            data.extend_from_slice(&[0, 0, 0, 0, rid, 0, 0, 0, 0, 0, 1, 0, 1, 0]);
        }

        let tables = TablesHeader::from(&data).unwrap();
        assert_eq!(tables.major_version, 2);
        assert_eq!(tables.table_count(), 2);
        assert!(tables.has_table(TableId::TypeDef));
        assert!(!tables.has_table(TableId::TypeRef));
        assert_eq!(tables.table_row_count(TableId::TypeDef), 2);

        let typedefs = tables.table::<TypeDefRaw>();
        assert_eq!(typedefs.row_count(), 2);
        assert_eq!(typedefs.get(2).unwrap().type_name, 2);

        assert_eq!(tables.table::<TypeRefRaw>().row_count(), 0);
        assert!(tables.table::<TypeRefRaw>().get(1).is_err());
    }

    #[test]
    fn truncated_table() {
        let mut data = header(0b101, &[1, 2]);
        data.extend(std::iter::repeat(0).take(20));

        assert!(matches!(TablesHeader::from(&data), Err(OutOfBounds)));
    }

    #[test]
    fn pointer_tables_rejected() {
        let mut data = header(0b1100_0101, &[1, 1, 1, 1]);
        data.extend(std::iter::repeat(0).take(64));

        assert!(matches!(TablesHeader::from(&data), Err(NotSupported)));
    }

    #[test]
    fn empty_tables_rejected() {
        let data = header(0, &[]);
        assert!(TablesHeader::from(&data).is_err());
    }
}
