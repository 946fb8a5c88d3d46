//! In-memory backend for metadata containers that never touched the disk.
//!
//! Used for containers handed to the generator as named byte buffers, and throughout the test
//! suite where fixtures are assembled with [`crate::metadata::builder::MetadataBuilder`].

use super::Backend;
use crate::{Error::OutOfBounds, Result};

/// Owns the raw bytes of a container.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Take ownership of `data`
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
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
        self.data.as_slice()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory() {
        let mut data = vec![0xCC_u8; 1048];
        data[10..15].copy_from_slice(&[0xBB; 5]);

        let memory = Memory::new(data);

        assert_eq!(memory.len(), 1048);
        assert_eq!(memory.data()[0], 0xCC);
        assert_eq!(
            memory.data_slice(10, 5).unwrap(),
            &[0xBB, 0xBB, 0xBB, 0xBB, 0xBB]
        );

        assert!(memory
            .data_slice(u32::MAX as usize, u32::MAX as usize)
            .is_err());
        assert!(memory.data_slice(usize::MAX, 1).is_err());
        assert!(memory.data_slice(0, 2048).is_err());
    }

    #[test]
    fn empty_buffer() {
        let memory = Memory::new(vec![]);

        assert_eq!(memory.len(), 0);
        assert!(memory.data_slice(0, 1).is_err());
        assert_eq!(memory.data_slice(0, 0).unwrap(), &[] as &[u8]);
    }
}
