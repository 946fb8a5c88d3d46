//! Generic table infrastructure: row decoding trait, typed table views and iteration.

mod codedindex;
mod tableid;
mod tableinfo;

use std::marker::PhantomData;

use crate::{Error::OutOfBounds, Result};

pub use codedindex::{CodedIndex, CodedIndexType};
pub use tableid::TableId;
pub use tableinfo::{TableInfo, TableInfoRef, TableRowInfo};

/// A row type that can be decoded from the `#~` stream.
pub trait RowReadable: Sized {
    /// The table holding rows of this type
    const TABLE_ID: TableId;

    /// Size of one row in bytes, given the index widths of the current metadata
    fn row_size(sizes: &TableInfoRef) -> u32;

    /// Decode the row `rid` starting at `offset`, advancing `offset` past it.
    ///
    /// # Errors
    /// Returns an error if the data is truncated or a coded index is invalid.
    fn row_read(data: &[u8], offset: &mut usize, rid: u32, sizes: &TableInfoRef) -> Result<Self>;
}

/// Typed view of the rows of one metadata table.
pub struct MetadataTable<'a, T> {
    data: &'a [u8],
    row_count: u32,
    row_size: u32,
    sizes: TableInfoRef,
    _phantom: PhantomData<T>,
}

impl<'a, T: RowReadable> MetadataTable<'a, T> {
    /// Create a view over `row_count` rows stored at the start of `data`
    #[must_use]
    pub fn new(data: &'a [u8], row_count: u32, sizes: TableInfoRef) -> Self {
        MetadataTable {
            data,
            row_count,
            row_size: T::row_size(&sizes),
            sizes,
            _phantom: PhantomData,
        }
    }

    /// Total size of the table in bytes
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.row_count) * u64::from(self.row_size)
    }

    /// Size of one row in bytes
    #[must_use]
    pub fn row_size(&self) -> u32 {
        self.row_size
    }

    /// Number of rows
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Decode the row with the 1-based id `rid`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for rid 0 or a rid past the end of the table,
    /// and any decode error of the row itself.
    pub fn get(&self, rid: u32) -> Result<T> {
        if rid == 0 || self.row_count < rid {
            return Err(OutOfBounds);
        }

        T::row_read(
            self.data,
            &mut ((rid as usize - 1) * self.row_size as usize),
            rid,
            &self.sizes,
        )
    }

    /// Iterate over all rows in ascending rid order
    #[must_use]
    pub fn iter(&self) -> TableIterator<'_, 'a, T> {
        TableIterator {
            table: self,
            current_row: 0,
            current_offset: 0,
        }
    }
}

impl<'t, 'a, T: RowReadable> IntoIterator for &'t MetadataTable<'a, T> {
    type Item = Result<T>;
    type IntoIter = TableIterator<'t, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the rows of a [`MetadataTable`].
///
/// Yields one `Result` per row; a row that fails to decode is reported and iteration
/// continues with the next row.
pub struct TableIterator<'t, 'a, T> {
    table: &'t MetadataTable<'a, T>,
    current_row: u32,
    current_offset: usize,
}

impl<T: RowReadable> Iterator for TableIterator<'_, '_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= self.table.row_count {
            return None;
        }

        self.current_row += 1;
        let mut offset = self.current_offset;
        self.current_offset += self.table.row_size as usize;

        Some(T::row_read(
            self.table.data,
            &mut offset,
            self.current_row,
            &self.table.sizes,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.table.row_count - self.current_row) as usize;
        (remaining, Some(remaining))
    }
}
