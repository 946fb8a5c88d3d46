//! The `MethodDef` table (II.22.26).
//!
//! Interface methods in Windows Runtime metadata have no body; what the resolver reads is
//! the name, the signature blob and the run of `Param` rows naming the parameters.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// Method attribute flag constants for `MethodDef` entries.
pub mod MethodAttributes {
    /// Method is static
    pub const STATIC: u32 = 0x0010;
    /// Method is virtual
    pub const VIRTUAL: u32 = 0x0040;
    /// Method has no implementation
    pub const ABSTRACT: u32 = 0x0400;
    /// Method name is special, e.g. a property accessor
    pub const SPECIAL_NAME: u32 = 0x0800;
    /// Method name is special to the runtime, e.g. `.ctor`
    pub const RT_SPECIAL_NAME: u32 = 0x1000;
}
