//! Metadata tables of the `#~` stream (ECMA-335 II.22).
//!
//! Every table the resolver reads has a `*Raw` row type implementing [`RowReadable`].
//! Rows keep heap indices and coded indices exactly as stored; accessor methods on the row
//! types resolve them against a [`crate::metadata::winmd::WinMd`].
//!
//! | Table | Row type | Used for |
//! |-------|----------|----------|
//! | `Module` | [`ModuleRaw`] | module name and version id |
//! | `TypeRef` | [`TypeRefRaw`] | names of types defined elsewhere |
//! | `TypeDef` | [`TypeDefRaw`] | class and interface lookup, method runs |
//! | `MethodDef` | [`MethodDefRaw`] | interface methods and signatures |
//! | `Param` | [`ParamRaw`] | parameter names and directions |
//! | `MemberRef` | [`MemberRefRaw`] | attribute constructors |
//! | `CustomAttribute` | [`CustomAttributeRaw`] | interface GUIDs |

mod customattribute;
mod memberref;
mod methoddef;
mod module;
mod param;
mod typedef;
mod typeref;
mod types;

pub use customattribute::*;
pub use memberref::*;
pub use methoddef::*;
pub use module::*;
pub use param::*;
pub use typedef::*;
pub use typeref::*;
pub use types::*;
