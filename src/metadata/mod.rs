//! Windows Runtime metadata: reading and writing `.winmd` files.
//!
//! A `.winmd` file is an ECMA-335 metadata container, either a PE image with a CLR runtime
//! header or a bare `BSJB` metadata root. This module parses the container down to the
//! table rows the binding generator consumes.
//!
//! # Key Components
//!
//! - [`winmd::WinMd`] - A loaded metadata file with its streams and tables
//! - [`tables`] - Typed row readers for `TypeDef`, `MethodDef`, `Param` and friends
//! - [`signatures`] - Method and type signature decoding
//! - [`streams`] - The `#~`, `#Strings`, `#Blob` and `#GUID` streams
//! - [`builder::MetadataBuilder`] - Writer producing well-formed metadata, used for fixtures
//!
//! # Examples
//!
//! ```rust,no_run
//! use winmdgen::metadata::{tables::TypeDefRaw, winmd::WinMd};
//! use std::path::Path;
//!
//! let winmd = WinMd::from_file(Path::new("Windows.Foundation.winmd"))?;
//! for typedef in winmd.table::<TypeDefRaw>().iter() {
//!     let typedef = typedef?;
//!     println!("{}", typedef.full_name(&winmd)?);
//! }
//! # Ok::<(), winmdgen::Error>(())
//! ```

/// Writer for well-formed Windows Runtime metadata
pub mod builder;
/// Implementation of the Header of CIL
pub mod cor20header;
/// Implementation of the root metadata structure
pub mod root;
/// Implementation of method and type signatures
pub mod signatures;
/// Implementation of the metadata streams
pub mod streams;
/// Implementation of the metadata tables
pub mod tables;
/// Commonly used metadata token type
pub mod token;
/// A loaded `.winmd` file
pub mod winmd;
