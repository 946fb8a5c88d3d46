//! Metadata streams of a WinMD file.
//!
//! The metadata root lists up to five streams, each a contiguous region of the metadata:
//!
//! - **`#~`** - Compressed metadata tables, see [`TablesHeader`]
//! - **`#Strings`** - UTF-8 identifier heap: type names, namespaces and member names
//! - **`#Blob`** - Binary heap of method signatures and custom attribute values
//! - **`#GUID`** - 128-bit GUIDs, addressed by 1-based index
//! - **`#US`** - User strings; WinMD files carry no IL, so this heap is never read
//!
//! The uncompressed `#-` tables stream is recognised but not supported.
//!
//! # References
//!
//! - ECMA-335 6th Edition, Partition II, Section 24.2.2 - Stream Headers

mod blob;
mod guid;
mod streamheader;
mod strings;
mod tablesheader;

pub use blob::Blob;
pub use guid::Guid;
pub use streamheader::StreamHeader;
pub use strings::Strings;
pub use tablesheader::TablesHeader;
