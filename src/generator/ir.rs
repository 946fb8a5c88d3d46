//! The binding-generation IR.
//!
//! A [`GenData`] describes one runtime class: the package it is generated into, one
//! [`GenType`] per projected interface, the packages it imports and the diagnostics collected
//! on the way. The IR is built once per request and not modified afterwards.
//!
//! Projections that can fail without aborting the request are tagged values rather than
//! sentinel strings: [`Projection::Unsupported`] for element kinds without a target type and
//! [`ParamName::Unresolved`] for parameters without a matching `Param` row. Each of them
//! is also recorded as a [`Diagnostic`].

use std::fmt;

use crate::metadata::token::Token;

/// A target type name or zero literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// The projected text, e.g. `uint32`, `*IBuffer` or `nil`
    Resolved(String),
    /// The element kind has no projection, e.g. `ELEMENT_TYPE_OBJECT`
    Unsupported(&'static str),
}

impl Projection {
    /// The projected text, if resolved
    #[must_use]
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            Projection::Resolved(text) => Some(text),
            Projection::Unsupported(_) => None,
        }
    }

    /// True if the element kind could not be projected
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Projection::Unsupported(_))
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Resolved(text) => f.write_str(text),
            Projection::Unsupported(kind) => write!(f, "<unsupported {kind}>"),
        }
    }
}

/// The name of a generated parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamName {
    /// Name of the matching `Param` row; empty for return values
    Resolved(String),
    /// No `IN` parameter row with the expected sequence number
    Unresolved,
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamName::Resolved(name) => f.write_str(name),
            ParamName::Unresolved => f.write_str("<unresolved>"),
        }
    }
}

/// Namespace, name and token of a metadata type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeIdentity {
    /// e.g. `Windows.Storage.Streams`
    pub namespace: String,
    /// e.g. `IBuffer`
    pub name: String,
    /// The `TypeDef` token
    pub token: Token,
}

impl TypeIdentity {
    /// `Namespace.Name`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// One parameter or return value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenParam {
    /// Parameter name
    pub name: ParamName,
    /// Target type name
    pub type_name: Projection,
    /// Zero literal of the type, set for return values
    pub default_value: Option<Projection>,
}

/// One generated function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenFunc {
    /// Method name, or `Activate<Class>` for constructors
    pub name: String,
    /// The synthesized activation function of a factory
    pub is_constructor: bool,
    /// One entry per signature parameter
    pub in_params: Vec<GenParam>,
    /// Absent for `void` methods
    pub return_param: Option<GenParam>,
    /// The interface this function is called through
    pub parent_type: TypeIdentity,
    /// GUID of `parent_type`, if it carries one
    pub parent_guid: Option<String>,
    /// The runtime class being generated
    pub runtime_class: TypeIdentity,
    /// Name of the interface declaring the method, `None` for constructors
    pub declaring_type: Option<String>,
}

/// Role of a generated type within its runtime class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenTypeKind {
    /// The primary interface `I<Class>`
    Interface,
    /// The activation factory `I<Class>Factory`
    Factory,
    /// The static members `I<Class>Statics`
    Statics,
}

impl fmt::Display for GenTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenTypeKind::Interface => f.write_str("interface"),
            GenTypeKind::Factory => f.write_str("factory"),
            GenTypeKind::Statics => f.write_str("statics"),
        }
    }
}

/// One generated interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenType {
    /// Interface name, e.g. `IBufferFactory`
    pub name: String,
    /// Role within the runtime class
    pub kind: GenTypeKind,
    /// Interface GUID, if the interface carries one
    pub guid: Option<String>,
    /// Functions in declaration order, after the constructor of a factory
    pub funcs: Vec<GenFunc>,
}

/// A recoverable problem met while building the IR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// No decodable GUID attribute on the type
    GuidNotFound {
        /// `Namespace.Name` of the type
        type_name: String,
    },
    /// An element kind without projection
    UnsupportedElement {
        /// Where the element was met, e.g. `IBuffer.get_Length return`
        context: String,
        /// e.g. `ELEMENT_TYPE_OBJECT`
        kind: &'static str,
    },
    /// A signature parameter without a matching `IN` parameter row
    UnresolvedParamName {
        /// `Interface.Method`
        method: String,
        /// 0-based position in the signature
        position: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::GuidNotFound { type_name } => {
                write!(f, "GUID not found for type {type_name}")
            }
            Diagnostic::UnsupportedElement { context, kind } => {
                write!(f, "unsupported element {kind} in {context}")
            }
            Diagnostic::UnresolvedParamName { method, position } => {
                write!(f, "unresolved name of parameter {position} of {method}")
            }
        }
    }
}

/// The IR of one runtime class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenData {
    /// Lowercase simple class name
    pub package: String,
    /// Primary interface first, then factory and statics when present
    pub types: Vec<GenType>,
    /// Import paths of foreign packages, each listed once in first-use order
    pub imports: Vec<String>,
    /// Recoverable problems, in the order they were met
    pub diagnostics: Vec<Diagnostic>,
}

impl GenData {
    /// The generated type of the given role, if projected
    #[must_use]
    pub fn type_of_kind(&self, kind: GenTypeKind) -> Option<&GenType> {
        self.types.iter().find(|gen_type| gen_type.kind == kind)
    }
}
