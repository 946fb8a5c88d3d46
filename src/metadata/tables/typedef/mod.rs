//! The `TypeDef` table (II.22.37): every class, interface, struct, enum and delegate defined
//! in the metadata file.
//!
//! Windows Runtime classes and interfaces carry the [`TypeAttributes::WINDOWS_RUNTIME`] flag;
//! the methods of a type are the contiguous `MethodDef` run starting at `method_list` and
//! ending where the next type's run begins.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// Type attribute flag constants for `TypeDef` entries.
pub mod TypeAttributes {
    /// Mask for the visibility bits
    pub const VISIBILITY_MASK: u32 = 0x0000_0007;
    /// Not visible outside the module
    pub const NOT_PUBLIC: u32 = 0x0000_0000;
    /// Visible outside the module
    pub const PUBLIC: u32 = 0x0000_0001;
    /// Mask for the class semantics bit
    pub const CLASS_SEMANTICS_MASK: u32 = 0x0000_0020;
    /// Type is a class
    pub const CLASS: u32 = 0x0000_0000;
    /// Type is an interface
    pub const INTERFACE: u32 = 0x0000_0020;
    /// Type is abstract
    pub const ABSTRACT: u32 = 0x0000_0080;
    /// Type cannot be derived from
    pub const SEALED: u32 = 0x0000_0100;
    /// Type is imported
    pub const IMPORT: u32 = 0x0000_1000;
    /// Type is a Windows Runtime type
    pub const WINDOWS_RUNTIME: u32 = 0x0000_4000;
}
