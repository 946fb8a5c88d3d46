//! The `Module` table (II.22.30): a single row naming the module and its version id.

mod raw;
mod reader;

pub use raw::*;
