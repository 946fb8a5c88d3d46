// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]

//! # winmdgen
//!
//! Resolves Windows Runtime classes from `.winmd` metadata files into an intermediate
//! representation for language binding generators.
//!
//! A `.winmd` file is an ECMA-335 metadata image. For a runtime class such as
//! `Windows.Storage.Streams.Buffer`, `winmdgen` locates the class, its primary interface
//! (`IBuffer`), its optional activation factory (`IBufferFactory`) and statics
//! (`IBufferStatics`), reads the interface GUIDs from their `GuidAttribute`s and projects
//! every method signature into target type names and zero values.
//!
//! # Architecture
//!
//! - [`file`] - Backing storage (memory mapped files or owned buffers) and bounds checked
//!   readers
//! - [`metadata`] - The metadata root, heaps, tables and signatures, plus
//!   [`metadata::builder::MetadataBuilder`] to write metadata images
//! - [`generator`] - Class lookup, GUID resolution, type projection and the multi-container
//!   driver producing [`GenData`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use winmdgen::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer")
//!     .with_container_path("Windows.Storage.winmd")
//!     .with_container_path("Windows.Foundation.winmd");
//!
//! let data = generate(&config)?;
//! println!("package {}", data.package);
//! for gen_type in &data.types {
//!     println!("  {} {:?}", gen_type.name, gen_type.guid);
//!     for func in &gen_type.funcs {
//!         println!("    {}", func.name);
//!     }
//! }
//!
//! for diagnostic in &data.diagnostics {
//!     eprintln!("warning: {diagnostic}");
//! }
//! # Ok::<(), winmdgen::Error>(())
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns [`Result`]. Problems that only degrade the output, like
//! an interface without a GUID or an element type the projection does not cover, are not
//! errors; they are collected in [`GenData::diagnostics`].

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Backing storage and low level readers for metadata files
///
/// Files are memory mapped, in-memory buffers are owned. Portable executable images are
/// detected and their CLR header located; bare metadata roots are used as they are.
pub mod file;

/// Definitions, parsing and writing of ECMA-335 metadata
///
/// # Key Components
///
/// - [`metadata::winmd::WinMd`] - An opened metadata container
/// - [`metadata::root`] - Metadata root and stream directory
/// - [`metadata::streams`] - The `#~`, `#Strings`, `#Blob` and `#GUID` streams
/// - [`metadata::tables`] - Rows of the tables used to resolve runtime classes
/// - [`metadata::signatures`] - Method and type signatures
/// - [`metadata::builder`] - Writing metadata images
pub mod metadata;

/// Runtime class resolution and IR construction
pub mod generator;

/// `winmdgen` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `winmdgen` Error type
///
/// # Examples
///
/// ```rust,no_run
/// use winmdgen::{generate, Error, GeneratorConfig};
///
/// let config = GeneratorConfig::new("Windows.Foundation.Uri")
///     .with_container_path("Windows.Foundation.winmd");
///
/// match generate(&config) {
///     Ok(data) => println!("{} types", data.types.len()),
///     Err(Error::ClassNotFound(name)) => println!("{name} is not defined"),
///     Err(Error::NotARuntimeClass(name)) => println!("{name} is not a runtime class"),
///     Err(e) => println!("Error: {e}"),
/// }
/// ```
pub use error::Error;

pub use file::{parser::Parser, File};
pub use generator::{generate, GenData, GenTypeKind, GeneratorConfig};
pub use metadata::{
    builder::MetadataBuilder,
    streams::{Blob, Guid, StreamHeader, Strings, TablesHeader},
    winmd::{Container, WinMd},
};
