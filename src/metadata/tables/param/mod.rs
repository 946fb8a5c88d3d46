//! The `Param` table (II.22.33): names and direction flags of method parameters.
//!
//! Sequence 0 describes the return value; parameter `i` of the signature is the row with
//! sequence `i + 1`.

mod raw;
mod reader;

pub use raw::*;

#[allow(non_snake_case)]
/// Parameter attribute flag constants for `Param` entries.
pub mod ParamAttributes {
    /// Input parameter
    pub const IN: u32 = 0x0001;
    /// Output parameter
    pub const OUT: u32 = 0x0002;
    /// Optional parameter
    pub const OPTIONAL: u32 = 0x0010;
    /// Parameter has a default value
    pub const HAS_DEFAULT: u32 = 0x1000;
    /// Parameter has marshalling information
    pub const HAS_FIELD_MARSHAL: u32 = 0x2000;
}
