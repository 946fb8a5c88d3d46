//! Runtime class resolution and IR construction.
//!
//! Given the name of a Windows Runtime class, the generator finds it in a set of metadata
//! containers and builds a [`GenData`] describing what a language binding needs:
//!
//! 1. [`driver`] searches the containers in order; the first one defining the class wins
//! 2. [`locator`] finds the `TypeDef` row of a namespace-qualified name
//! 3. [`assembler`] checks the runtime class flag and collects the primary, factory and
//!    statics interfaces named after the class (see [`naming`])
//! 4. [`method`] projects each interface method; element types go through
//!    [`projection::TypeProjector`] and interface GUIDs through [`guid`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use winmdgen::{generator::GenTypeKind, generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::new("Windows.Storage.Streams.Buffer")
//!     .with_container_path("Windows.Storage.winmd")
//!     .with_skip_statics(true);
//!
//! let data = generate(&config)?;
//! if let Some(factory) = data.type_of_kind(GenTypeKind::Factory) {
//!     println!("{} activates through {}", data.package, factory.name);
//! }
//! # Ok::<(), winmdgen::Error>(())
//! ```

/// Assembly of the IR of a runtime class
pub mod assembler;
/// Generation request configuration
pub mod config;
/// Multi-container search
pub mod driver;
/// Interface GUIDs
pub mod guid;
/// The generated IR
pub mod ir;
/// Type lookup by name
pub mod locator;
/// Method projection
pub mod method;
/// Interface naming conventions
pub mod naming;
/// Element type projection
pub mod projection;

pub use assembler::assemble;
pub use config::{GeneratorConfig, MethodFilter, DEFAULT_IMPORT_PREFIX};
pub use driver::{expand_containers, first_match, generate};
pub use guid::{guid_from_blob, type_guid, GuidLookup};
pub use ir::{
    Diagnostic, GenData, GenFunc, GenParam, GenType, GenTypeKind, ParamName, Projection,
    TypeIdentity,
};
pub use locator::{find_class, find_type};
pub use projection::TypeProjector;
