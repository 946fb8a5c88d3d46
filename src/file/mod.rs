//! Container file abstraction.
//!
//! A `.winmd` container is normally a PE image whose CLR runtime header points at an ECMA-335
//! metadata root. Tooling that strips the PE wrapper leaves a bare metadata root (starting with
//! the `BSJB` signature) instead, so [`File`] accepts both:
//!
//! - **PE images** (`MZ`) are parsed with `goblin`; the CLR runtime header directory must exist
//! - **Bare metadata roots** (`BSJB`) are passed through untouched
//!
//! Data is provided by a [`Backend`], either a memory mapped file on disk or an owned buffer.
//!
//! # Examples
//!
//! ```rust,no_run
//! use winmdgen::file::File;
//! use std::path::Path;
//!
//! let file = File::from_file(Path::new("Windows.Foundation.winmd"))?;
//! if let Some((rva, size)) = file.clr() {
//!     println!("CLR header at RVA 0x{rva:x} ({size} bytes)");
//! }
//! # Ok::<(), winmdgen::Error>(())
//! ```

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{
    metadata::root::CIL_HEADER_MAGIC,
    Error::{Empty, GoblinErr, NotSupported},
    Result,
};
use goblin::pe::PE;
use memory::Memory;
use ouroboros::self_referencing;
use physical::Physical;

/// Source of the raw bytes behind a [`File`].
pub trait Backend: Send + Sync {
    /// Get a bounds-checked slice of the data
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// The complete data
    fn data(&self) -> &[u8];

    /// Length of the data in bytes
    fn len(&self) -> usize;
}

/// A loaded metadata container, either a PE image or a bare metadata root.
#[self_referencing]
pub struct File {
    data: Box<dyn Backend>,
    #[borrows(data)]
    #[not_covariant]
    pe: Option<PE<'this>>,
}

impl File {
    /// Load a container from disk, memory mapping it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is empty or is neither a PE image with a
    /// CLR header nor a metadata root.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;

        Self::load(input)
    }

    /// Load a container from an owned buffer.
    ///
    /// # Errors
    /// Returns an error if the buffer is empty or is neither a PE image with a CLR header nor
    /// a metadata root.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);

        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        let data = Box::new(data);

        File::try_new(data, |data| {
            let data = data.as_ref().data();
            if data.starts_with(b"MZ") {
                let pe = PE::parse(data).map_err(GoblinErr)?;
                match pe.header.optional_header {
                    Some(optional_header) => {
                        if optional_header
                            .data_directories
                            .get_clr_runtime_header()
                            .is_none()
                        {
                            Err(malformed_error!(
                                "File does not have a CLR runtime header directory"
                            ))
                        } else {
                            Ok(Some(pe))
                        }
                    }
                    None => Err(malformed_error!("File does not have an OptionalHeader")),
                }
            } else if data.len() >= 4 && io::read_le::<u32>(data)? == CIL_HEADER_MAGIC {
                Ok(None)
            } else {
                Err(NotSupported)
            }
        })
    }

    /// Length of the container in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns true if the container holds no data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the container is a PE image rather than a bare metadata root
    #[must_use]
    pub fn is_pe(&self) -> bool {
        self.with_pe(|pe| pe.is_some())
    }

    /// RVA and size of the CLR runtime header, `None` for a bare metadata root
    #[must_use]
    pub fn clr(&self) -> Option<(usize, usize)> {
        self.with_pe(|pe| {
            let optional_header = pe.as_ref()?.header.optional_header?;
            let clr_dir = optional_header.data_directories.get_clr_runtime_header()?;

            Some((clr_dir.virtual_address as usize, clr_dir.size as usize))
        })
    }

    /// The complete container data
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.with_data(|data| data.data())
    }

    /// Get a bounds-checked slice of the container
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the range exceeds the data.
    pub fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.with_data(|data| data.data_slice(offset, len))
    }

    /// Translate a relative virtual address into a file offset.
    ///
    /// A bare metadata root has no sections, so addresses map onto themselves.
    ///
    /// # Errors
    /// Returns an error if no section contains `rva`.
    pub fn rva_to_offset(&self, rva: usize) -> Result<usize> {
        self.with_pe(|pe| {
            let Some(pe) = pe else {
                return Ok(rva);
            };

            let rva_u32 = u32::try_from(rva)
                .map_err(|_| malformed_error!("RVA too large to fit in u32: {}", rva))?;

            for section in &pe.sections {
                let Some(section_max) = section.virtual_address.checked_add(section.virtual_size)
                else {
                    return Err(malformed_error!(
                        "Section malformed, causing integer overflow - {} + {}",
                        section.virtual_address,
                        section.virtual_size
                    ));
                };

                if section.virtual_address <= rva_u32 && section_max > rva_u32 {
                    return Ok((rva - section.virtual_address as usize)
                        + section.pointer_to_raw_data as usize);
                }
            }

            Err(malformed_error!(
                "RVA could not be converted to offset - {}",
                rva
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::minimal_metadata;

    #[test]
    fn load_metadata_root() {
        let file = File::from_mem(minimal_metadata()).unwrap();

        assert!(!file.is_pe());
        assert!(file.clr().is_none());
        assert_eq!(file.rva_to_offset(0x40).unwrap(), 0x40);
        assert_eq!(file.data_slice(0, 4).unwrap(), b"BSJB");
    }

    #[test]
    fn load_pe() {
        let image = crate::metadata::builder::MetadataBuilder::new("Test")
            .build_pe()
            .unwrap();
        let file = File::from_mem(image).unwrap();

        assert!(file.is_pe());
        let (clr_rva, clr_size) = file.clr().unwrap();
        assert_eq!(clr_size, 72);
        let offset = file.rva_to_offset(clr_rva).unwrap();
        assert_eq!(file.data_slice(offset, 4).unwrap(), &[72, 0, 0, 0]);
    }

    #[test]
    fn rejects_unknown_formats() {
        assert!(matches!(File::from_mem(vec![]), Err(Empty)));
        assert!(matches!(
            File::from_mem(b"\x7fELF\x02\x01\x01".to_vec()),
            Err(NotSupported)
        ));
        assert!(File::from_mem(b"MZ".to_vec()).is_err());
    }
}
