use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The `#Blob` heap: length-prefixed binary values, addressed by byte offset.
///
/// Method signatures and custom attribute values (including the GUID attributes of
/// interfaces) are stored here.
pub struct Blob<'a> {
    data: &'a [u8],
}

impl<'a> Blob<'a> {
    /// Wrap the heap data.
    ///
    /// # Errors
    /// Returns an error if the heap does not start with the empty blob.
    pub fn from(data: &'a [u8]) -> Result<Blob<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Invalid memory for #Blob heap"));
        }

        Ok(Blob { data })
    }

    /// Get the blob starting at `index`, without its compressed length prefix.
    ///
    /// # Errors
    /// Returns an error if the prefix is invalid or the blob exceeds the heap.
    pub fn get(&self, index: usize) -> Result<&'a [u8]> {
        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(&self.data[index..]);
        let len = parser.read_compressed_uint()? as usize;
        let skip = parser.pos();

        let Some(data_start) = index.checked_add(skip) else {
            return Err(OutOfBounds);
        };

        let Some(data_end) = data_start.checked_add(len) else {
            return Err(OutOfBounds);
        };

        if data_end > self.data.len() {
            return Err(OutOfBounds);
        }

        Ok(&self.data[data_start..data_end])
    }
}
