use crate::{file::io::read_le, Error::OutOfBounds, Result};

/// A stream header of the metadata root (II.24.2.2)
pub struct StreamHeader {
    /// Offset of the stream, relative to the metadata root
    pub offset: u32,
    /// Size of the stream in bytes
    pub size: u32,
    /// Name of the stream
    pub name: String,
}

impl StreamHeader {
    /// Parse a stream header from the start of `data`.
    ///
    /// # Errors
    /// Returns an error if `data` is truncated or the name is not a known stream name.
    pub fn from(data: &[u8]) -> Result<StreamHeader> {
        if data.len() < 9 {
            return Err(OutOfBounds);
        }

        let name_bytes = &data[8..std::cmp::min(data.len(), 8 + 32)];
        let Some(name_len) = name_bytes.iter().position(|byte| *byte == 0) else {
            return Err(malformed_error!("Stream header name is not terminated"));
        };

        let name = String::from_utf8_lossy(&name_bytes[..name_len]).to_string();
        if !["#Strings", "#US", "#Blob", "#GUID", "#~", "#-"]
            .iter()
            .any(|valid_name| name == *valid_name)
        {
            return Err(malformed_error!("Invalid stream header name - {}", name));
        }

        Ok(StreamHeader {
            offset: read_le::<u32>(data)?,
            size: read_le::<u32>(&data[4..])?,
            name,
        })
    }
}
