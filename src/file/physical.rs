//! Memory-mapped backend for `.winmd` files on disk.
//!
//! System metadata directories routinely hold dozens of containers of several megabytes each.
//! Mapping them keeps the cost of a failed class lookup (the common case while the driver
//! walks the container list) down to the pages the `TypeDef` scan actually touches.

use super::Backend;
use crate::{Error::OutOfBounds, Result};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A read-only memory map of a file.
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Open and map the file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or mapped.
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path)?;

        // The mapping is read-only and the file handle lives as long as the map.
        let mmap = unsafe { Mmap::map(&file) }?;

        Ok(Physical { data: mmap })
    }
}

impl Backend for Physical {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if offset_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
