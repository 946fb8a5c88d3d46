//! The `TypeRef` table (II.22.38): references to types defined in other metadata files.

mod raw;
mod reader;

pub use raw::*;
