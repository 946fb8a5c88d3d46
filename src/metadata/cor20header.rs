//! The CLI header (II.25.3.3), located by the CLR runtime header data directory of a PE image.
//!
//! Only the location of the metadata root matters for `.winmd` containers; the remaining fields
//! are parsed for validation.

use crate::{file::parser::Parser, Error::OutOfBounds, Result};

/// The parsed CLI header
pub struct Cor20Header {
    /// Size of the header, always 72
    pub cb: u32,
    /// Major runtime version
    pub major_runtime_version: u16,
    /// Minor runtime version
    pub minor_runtime_version: u16,
    /// RVA of the metadata root
    pub meta_data_rva: u32,
    /// Size of the metadata
    pub meta_data_size: u32,
    /// Runtime flags
    pub flags: u32,
}

impl Cor20Header {
    /// Parse the CLI header from `data`.
    ///
    /// # Errors
    /// Returns an error if the header is truncated, has the wrong size or has no metadata.
    pub fn read(data: &[u8]) -> Result<Cor20Header> {
        if data.len() < 72 {
            return Err(OutOfBounds);
        }

        let mut parser = Parser::new(data);

        let cb = parser.read_le::<u32>()?;
        if cb != 72 {
            return Err(malformed_error!(
                "Invalid CLR header size: expected 72, got {}",
                cb
            ));
        }

        let major_runtime_version = parser.read_le::<u16>()?;
        let minor_runtime_version = parser.read_le::<u16>()?;
        if major_runtime_version == 0 || major_runtime_version > 10 {
            return Err(malformed_error!(
                "Invalid major runtime version: {}",
                major_runtime_version
            ));
        }

        let meta_data_rva = parser.read_le::<u32>()?;
        if meta_data_rva == 0 {
            return Err(malformed_error!("Metadata RVA cannot be zero"));
        }

        let meta_data_size = parser.read_le::<u32>()?;
        if meta_data_size == 0 {
            return Err(malformed_error!("Metadata size cannot be zero"));
        } else if meta_data_size > 0x1000_0000 {
            return Err(malformed_error!(
                "Metadata size {} exceeds reasonable limit (256MB)",
                meta_data_size
            ));
        }

        let flags = parser.read_le::<u32>()?;

        Ok(Cor20Header {
            cb,
            major_runtime_version,
            minor_runtime_version,
            meta_data_rva,
            meta_data_size,
            flags,
        })
    }
}
