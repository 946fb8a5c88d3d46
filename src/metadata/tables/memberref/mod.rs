//! The `MemberRef` table (II.22.25): references to methods and fields of other types.
//!
//! In Windows Runtime metadata these are mostly the constructors of attribute types such as
//! `Windows.Foundation.Metadata.GuidAttribute`.

mod raw;
mod reader;

pub use raw::*;
