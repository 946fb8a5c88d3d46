//! The `CustomAttribute` table (II.22.10).
//!
//! Interface GUIDs of Windows Runtime types are stored here: a `GuidAttribute` row whose
//! parent is the interface's `TypeDef` and whose value blob holds the 16 GUID bytes between
//! a 2-byte prolog and a 2-byte trailer.

mod raw;
mod reader;

pub use raw::*;
