use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

use crate::{
    file::io::{read_le, read_le_at},
    metadata::tables::types::{CodedIndexType, TableId},
    Error::OutOfBounds,
    Result,
};

/// Row count of one table, with the derived index width
#[derive(Clone, Copy, Default, PartialEq, Debug)]
pub struct TableRowInfo {
    /// Number of rows
    pub rows: u32,
    /// Bits needed to address every row
    pub bits: u8,
    /// True if a simple index into this table takes 4 bytes
    pub is_large: bool,
}

impl TableRowInfo {
    /// Derive the index width for a table with `rows` rows
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(rows: u32) -> Self {
        let bits = if rows == 0 {
            1
        } else {
            (32 - rows.leading_zeros()) as u8
        };

        Self {
            rows,
            bits,
            is_large: rows > u32::from(u16::MAX),
        }
    }
}

/// Row counts and index widths of every table, heap and coded index of one tables stream.
///
/// Column widths in ECMA-335 depend on the sizes of the tables and heaps they point into,
/// so every row reader needs this information.
#[derive(Clone, Default, Debug)]
pub struct TableInfo {
    rows: Vec<TableRowInfo>,
    coded_indexes: Vec<u8>,
    is_large_index_str: bool,
    is_large_index_guid: bool,
    is_large_index_blob: bool,
}

/// Shared reference to a [`TableInfo`]
pub type TableInfoRef = Arc<TableInfo>;

impl TableInfo {
    /// Read the row counts that follow the fixed part of the tables header.
    ///
    /// # Errors
    /// Returns an error if the row count array is truncated or names a table beyond
    /// `GenericParamConstraint`.
    pub fn new(data: &[u8], valid_bitvec: u64) -> Result<Self> {
        let mut table_info = vec![TableRowInfo::default(); TableId::COUNT];
        let mut next_row_offset = 24;

        for bit in 0..64_usize {
            if (valid_bitvec & (1 << bit)) == 0 {
                continue;
            }

            if bit >= TableId::COUNT {
                return Err(malformed_error!("Unknown metadata table - 0x{:02x}", bit));
            }

            let row_count = read_le_at::<u32>(data, &mut next_row_offset)?;
            table_info[bit] = TableRowInfo::new(row_count);
        }

        if data.len() < 7 {
            return Err(OutOfBounds);
        }

        let heap_size_flags = read_le::<u8>(&data[6..])?;
        let mut table_info = TableInfo {
            rows: table_info,
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: heap_size_flags & 1 == 1,
            is_large_index_guid: heap_size_flags & 2 == 2,
            is_large_index_blob: heap_size_flags & 4 == 4,
        };

        table_info.calculate_coded_index_bits();

        Ok(table_info)
    }

    /// Build table information from explicit row counts
    #[cfg(test)]
    pub fn new_test(
        valid_tables: &[(TableId, u32)],
        large_str: bool,
        large_blob: bool,
        large_guid: bool,
    ) -> Self {
        let mut table_info = TableInfo {
            rows: vec![TableRowInfo::default(); TableId::COUNT],
            coded_indexes: vec![0; CodedIndexType::COUNT],
            is_large_index_str: large_str,
            is_large_index_guid: large_guid,
            is_large_index_blob: large_blob,
        };

        for valid_table in valid_tables {
            table_info.rows[valid_table.0 as usize] = TableRowInfo::new(valid_table.1);
        }

        table_info.calculate_coded_index_bits();
        table_info
    }

    /// Split a raw coded index into its target table and row.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the tag does not name a table of the coded
    /// index kind.
    pub fn decode_coded_index(
        &self,
        value: u32,
        coded_index_type: CodedIndexType,
    ) -> Result<(TableId, u32)> {
        let tables = coded_index_type.tables();
        let tag_bits = coded_index_type.tag_bits();
        let tag_mask = (1 << tag_bits) - 1;

        let tag = value & tag_mask;
        let index = value >> tag_bits;

        if tag as usize >= tables.len() {
            return Err(OutOfBounds);
        }

        Ok((tables[tag as usize], index))
    }

    /// True if a simple index into `id` takes 4 bytes
    #[must_use]
    pub fn is_large(&self, id: TableId) -> bool {
        self.rows[id as usize].is_large
    }

    /// True if `#Strings` indices take 4 bytes
    #[must_use]
    pub fn is_large_str(&self) -> bool {
        self.is_large_index_str
    }

    /// True if `#GUID` indices take 4 bytes
    #[must_use]
    pub fn is_large_guid(&self) -> bool {
        self.is_large_index_guid
    }

    /// True if `#Blob` indices take 4 bytes
    #[must_use]
    pub fn is_large_blob(&self) -> bool {
        self.is_large_index_blob
    }

    /// Width of a `#Strings` index
    #[must_use]
    pub fn str_bytes(&self) -> u8 {
        if self.is_large_index_str {
            4
        } else {
            2
        }
    }

    /// Width of a `#GUID` index
    #[must_use]
    pub fn guid_bytes(&self) -> u8 {
        if self.is_large_index_guid {
            4
        } else {
            2
        }
    }

    /// Width of a `#Blob` index
    #[must_use]
    pub fn blob_bytes(&self) -> u8 {
        if self.is_large_index_blob {
            4
        } else {
            2
        }
    }

    /// Row information of `table`
    #[must_use]
    pub fn get(&self, table: TableId) -> &TableRowInfo {
        &self.rows[table as usize]
    }

    /// Width of a simple index into `table_id`
    #[must_use]
    pub fn table_index_bytes(&self, table_id: TableId) -> u8 {
        if self.rows[table_id as usize].is_large {
            4
        } else {
            2
        }
    }

    /// Width of a coded index of kind `coded_index_type`
    #[must_use]
    pub fn coded_index_bytes(&self, coded_index_type: CodedIndexType) -> u8 {
        if self.coded_indexes[coded_index_type as usize] > 16 {
            4
        } else {
            2
        }
    }

    /// Bits needed by a coded index of kind `coded_index_type`
    #[must_use]
    pub fn coded_index_bits(&self, coded_index_type: CodedIndexType) -> u8 {
        self.coded_indexes[coded_index_type as usize]
    }

    fn calculate_coded_index_bits(&mut self) {
        for coded_index in CodedIndexType::iter() {
            let max_bits = coded_index
                .tables()
                .iter()
                .map(|table| self.rows[*table as usize].bits)
                .max()
                .unwrap_or(1);

            self.coded_indexes[coded_index as usize] = max_bits + coded_index.tag_bits();
        }
    }
}
