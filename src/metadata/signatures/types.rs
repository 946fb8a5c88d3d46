use crate::metadata::token::Token;

/// Element type constants of signature blobs (II.23.1.16)
#[allow(non_snake_case, missing_docs)]
pub mod ELEMENT_TYPE {
    pub const VOID: u8 = 0x01;
    pub const BOOLEAN: u8 = 0x02;
    pub const CHAR: u8 = 0x03;
    pub const I1: u8 = 0x04;
    pub const U1: u8 = 0x05;
    pub const I2: u8 = 0x06;
    pub const U2: u8 = 0x07;
    pub const I4: u8 = 0x08;
    pub const U4: u8 = 0x09;
    pub const I8: u8 = 0x0a;
    pub const U8: u8 = 0x0b;
    pub const R4: u8 = 0x0c;
    pub const R8: u8 = 0x0d;
    pub const STRING: u8 = 0x0e;
    // Followed by type
    pub const PTR: u8 = 0x0f;
    // Followed by type
    pub const BYREF: u8 = 0x10;
    // Followed by TypeDef or TypeRef token
    pub const VALUETYPE: u8 = 0x11;
    // Followed by TypeDef or TypeRef token
    pub const CLASS: u8 = 0x12;
    // Generic parameter in a generic type definition, represented as number
    pub const VAR: u8 = 0x13;
    // type rank boundsCount bound1 … loCount lo1 …
    pub const ARRAY: u8 = 0x14;
    // Generic type instantiation. Followed by type type-arg-count type-1 ... type-n
    pub const GENERICINST: u8 = 0x15;
    pub const TYPEDBYREF: u8 = 0x16;
    // System.IntPtr
    pub const I: u8 = 0x18;
    // System.UIntPtr
    pub const U: u8 = 0x19;
    // Followed by full method signature
    pub const FNPTR: u8 = 0x1b;
    // System.Object
    pub const OBJECT: u8 = 0x1c;
    // Single-dim array with 0 lower bound
    pub const SZARRAY: u8 = 0x1d;
    // Generic parameter in a generic method definition, represented as number
    pub const MVAR: u8 = 0x1e;
    // Required modifier : followed by a TypeDef or TypeRef token
    pub const CMOD_REQD: u8 = 0x1f;
    // Optional modifier : followed by a TypeDef or TypeRef token
    pub const CMOD_OPT: u8 = 0x20;
    // Sentinel for vararg method signature
    pub const SENTINEL: u8 = 0x41;
    // Denotes a local variable that points at a pinned object
    pub const PINNED: u8 = 0x45;
}

/// Calling convention flags of a method signature (II.23.2.1)
#[allow(non_snake_case, missing_docs)]
pub mod CALLING_CONVENTION {
    pub const DEFAULT: u8 = 0x00;
    pub const VARARG: u8 = 0x05;
    pub const GENERIC: u8 = 0x10;
    pub const HASTHIS: u8 = 0x20;
    pub const EXPLICITTHIS: u8 = 0x40;
}

/// A decoded signature element
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TypeSignature {
    /// Placeholder for an element that has not been decoded
    #[default]
    Unknown,
    /// `void`, only valid as a return type
    Void,
    /// `bool`
    Boolean,
    /// 16-bit UTF-16 code unit
    Char,
    /// `i8`
    I1,
    /// `u8`
    U1,
    /// `i16`
    I2,
    /// `u16`
    U2,
    /// `i32`
    I4,
    /// `u32`
    U4,
    /// `i64`
    I8,
    /// `u64`
    U8,
    /// `f32`
    R4,
    /// `f64`
    R8,
    /// `HSTRING` in Windows Runtime metadata
    String,
    /// Unmanaged pointer
    Ptr(Box<TypeSignature>),
    /// Managed reference
    ByRef(Box<TypeSignature>),
    /// Value type, by TypeDefOrRefOrSpec token
    ValueType(Token),
    /// Reference type, by TypeDefOrRefOrSpec token
    Class(Token),
    /// Generic parameter of the enclosing type
    GenericParamType(u32),
    /// Multi-dimensional array
    Array(SignatureArray),
    /// Generic instantiation: base type and arguments
    GenericInst(Box<TypeSignature>, Vec<TypeSignature>),
    /// Typed reference
    TypedByRef,
    /// Native integer
    I,
    /// Native unsigned integer
    U,
    /// Function pointer
    FnPtr(Box<SignatureMethod>),
    /// `System.Object`, `IInspectable` in Windows Runtime metadata
    Object,
    /// Single-dimensional, zero-based array
    SzArray(Box<TypeSignature>),
    /// Generic parameter of the enclosing method
    GenericParamMethod(u32),
    /// Pinned local
    Pinned(Box<TypeSignature>),
}

impl TypeSignature {
    /// Name of the element kind, as used in diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeSignature::Unknown => "ELEMENT_TYPE_END",
            TypeSignature::Void => "ELEMENT_TYPE_VOID",
            TypeSignature::Boolean => "ELEMENT_TYPE_BOOLEAN",
            TypeSignature::Char => "ELEMENT_TYPE_CHAR",
            TypeSignature::I1 => "ELEMENT_TYPE_I1",
            TypeSignature::U1 => "ELEMENT_TYPE_U1",
            TypeSignature::I2 => "ELEMENT_TYPE_I2",
            TypeSignature::U2 => "ELEMENT_TYPE_U2",
            TypeSignature::I4 => "ELEMENT_TYPE_I4",
            TypeSignature::U4 => "ELEMENT_TYPE_U4",
            TypeSignature::I8 => "ELEMENT_TYPE_I8",
            TypeSignature::U8 => "ELEMENT_TYPE_U8",
            TypeSignature::R4 => "ELEMENT_TYPE_R4",
            TypeSignature::R8 => "ELEMENT_TYPE_R8",
            TypeSignature::String => "ELEMENT_TYPE_STRING",
            TypeSignature::Ptr(_) => "ELEMENT_TYPE_PTR",
            TypeSignature::ByRef(_) => "ELEMENT_TYPE_BYREF",
            TypeSignature::ValueType(_) => "ELEMENT_TYPE_VALUETYPE",
            TypeSignature::Class(_) => "ELEMENT_TYPE_CLASS",
            TypeSignature::GenericParamType(_) => "ELEMENT_TYPE_VAR",
            TypeSignature::Array(_) => "ELEMENT_TYPE_ARRAY",
            TypeSignature::GenericInst(_, _) => "ELEMENT_TYPE_GENERICINST",
            TypeSignature::TypedByRef => "ELEMENT_TYPE_TYPEDBYREF",
            TypeSignature::I => "ELEMENT_TYPE_I",
            TypeSignature::U => "ELEMENT_TYPE_U",
            TypeSignature::FnPtr(_) => "ELEMENT_TYPE_FNPTR",
            TypeSignature::Object => "ELEMENT_TYPE_OBJECT",
            TypeSignature::SzArray(_) => "ELEMENT_TYPE_SZARRAY",
            TypeSignature::GenericParamMethod(_) => "ELEMENT_TYPE_MVAR",
            TypeSignature::Pinned(_) => "ELEMENT_TYPE_PINNED",
        }
    }
}

/// Size and lower bound of one array dimension
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayDimensions {
    /// Declared size, if any
    pub size: Option<u32>,
    /// Declared lower bound, if any
    pub lower_bound: Option<u32>,
}

/// A multi-dimensional array signature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureArray {
    /// Element type
    pub base: Box<TypeSignature>,
    /// Number of dimensions
    pub rank: u32,
    /// Dimensions with explicit size or bound
    pub dimensions: Vec<ArrayDimensions>,
}

/// One parameter or the return value of a method signature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureParameter {
    /// Custom modifiers, as TypeDefOrRef tokens
    pub modifiers: Vec<Token>,
    /// Passed by reference (Windows Runtime `out` parameters and receive arrays)
    pub by_ref: bool,
    /// The parameter type
    pub base: TypeSignature,
}

impl SignatureParameter {
    /// A by-value parameter without modifiers
    #[must_use]
    pub fn new(base: TypeSignature) -> Self {
        SignatureParameter {
            modifiers: Vec::new(),
            by_ref: false,
            base,
        }
    }
}

/// A decoded `MethodDefSig` / `MethodRefSig`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignatureMethod {
    /// Instance method
    pub has_this: bool,
    /// `this` is passed explicitly
    pub explicit_this: bool,
    /// Variable argument list
    pub vararg: bool,
    /// Number of generic parameters
    pub param_count_generic: u32,
    /// Declared parameter count
    pub param_count: u32,
    /// Return value
    pub return_type: SignatureParameter,
    /// Parameters, in signature order
    pub params: Vec<SignatureParameter>,
    /// Parameters after the vararg sentinel
    pub varargs: Vec<SignatureParameter>,
}
