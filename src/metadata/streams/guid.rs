use crate::{Error::OutOfBounds, Result};

/// The `#GUID` heap: a sequence of 16-byte GUIDs, addressed by 1-based index.
pub struct Guid<'a> {
    data: &'a [u8],
}

impl<'a> Guid<'a> {
    /// Wrap the heap data.
    ///
    /// # Errors
    /// Returns an error if the heap is smaller than one GUID.
    pub fn from(data: &'a [u8]) -> Result<Guid<'a>> {
        if data.len() < 16 {
            return Err(malformed_error!("Data for #Guid heap is too small"));
        }

        Ok(Guid { data })
    }

    /// Get the GUID at the 1-based `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for index 0 or an index beyond the heap.
    pub fn get(&self, index: usize) -> Result<uguid::Guid> {
        if index < 1 || index * 16 > self.data.len() {
            return Err(OutOfBounds);
        }

        let offset_start = (index - 1) * 16;
        let mut buffer = [0_u8; 16];
        buffer.copy_from_slice(&self.data[offset_start..offset_start + 16]);

        Ok(uguid::Guid::from_bytes(buffer))
    }
}
