//! Method signature decoding and encoding (ECMA-335 II.23.2).
//!
//! Windows Runtime metadata describes every interface method through a `MethodDefSig` blob:
//! a calling convention byte, the parameter count, the return type and one element per
//! parameter. [`SignatureParser`] turns such a blob into a [`SignatureMethod`], and
//! [`encode_method_signature`] performs the inverse for the metadata builder.
//!
//! # Examples
//!
//! ```rust
//! use winmdgen::metadata::signatures::{SignatureParser, TypeSignature};
//!
//! // instance void (bool)
//! let method = SignatureParser::new(&[0x20, 0x01, 0x01, 0x02]).parse_method_signature()?;
//! assert!(method.has_this);
//! assert_eq!(method.params[0].base, TypeSignature::Boolean);
//! # Ok::<(), winmdgen::Error>(())
//! ```

mod encoders;
mod parser;
mod types;

pub use encoders::{encode_method_signature, encode_type_signature, write_compressed_uint};
pub use parser::SignatureParser;
pub use types::*;
