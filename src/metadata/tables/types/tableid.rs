use strum::{EnumCount, EnumIter};

/// Identifiers of the ECMA-335 metadata tables (II.22).
///
/// The discriminant is the table number used in the valid bit-vector of the tables header and
/// in the high byte of a metadata token. Every table is listed so that the row counts of a
/// tables header can be read completely, even though only a handful are decoded.
#[derive(Clone, Copy, PartialEq, Debug, EnumIter, EnumCount, Eq, Hash, PartialOrd, Ord)]
pub enum TableId {
    /// The current module
    Module = 0x00,
    /// References to types in other modules or assemblies
    TypeRef = 0x01,
    /// Types defined in this module
    TypeDef = 0x02,
    /// Field indirection (uncompressed metadata only)
    FieldPtr = 0x03,
    /// Fields
    Field = 0x04,
    /// Method indirection (uncompressed metadata only)
    MethodPtr = 0x05,
    /// Methods
    MethodDef = 0x06,
    /// Parameter indirection (uncompressed metadata only)
    ParamPtr = 0x07,
    /// Parameters
    Param = 0x08,
    /// Interfaces implemented by a type
    InterfaceImpl = 0x09,
    /// Member references
    MemberRef = 0x0A,
    /// Constant values of fields and parameters
    Constant = 0x0B,
    /// Custom attributes
    CustomAttribute = 0x0C,
    /// Field marshalling
    FieldMarshal = 0x0D,
    /// Declarative security
    DeclSecurity = 0x0E,
    /// Class layout
    ClassLayout = 0x0F,
    /// Field layout
    FieldLayout = 0x10,
    /// Standalone signatures
    StandAloneSig = 0x11,
    /// Event map
    EventMap = 0x12,
    /// Event indirection
    EventPtr = 0x13,
    /// Events
    Event = 0x14,
    /// Property map
    PropertyMap = 0x15,
    /// Property indirection
    PropertyPtr = 0x16,
    /// Properties
    Property = 0x17,
    /// Method semantics
    MethodSemantics = 0x18,
    /// Method implementations
    MethodImpl = 0x19,
    /// Module references
    ModuleRef = 0x1A,
    /// Type specifications
    TypeSpec = 0x1B,
    /// P/Invoke mappings
    ImplMap = 0x1C,
    /// Field RVAs
    FieldRVA = 0x1D,
    /// Edit and continue log
    EncLog = 0x1E,
    /// Edit and continue map
    EncMap = 0x1F,
    /// The current assembly
    Assembly = 0x20,
    /// Assembly processor (unused)
    AssemblyProcessor = 0x21,
    /// Assembly OS (unused)
    AssemblyOS = 0x22,
    /// Assembly references
    AssemblyRef = 0x23,
    /// Assembly reference processor (unused)
    AssemblyRefProcessor = 0x24,
    /// Assembly reference OS (unused)
    AssemblyRefOS = 0x25,
    /// Files of the assembly
    File = 0x26,
    /// Exported types
    ExportedType = 0x27,
    /// Manifest resources
    ManifestResource = 0x28,
    /// Nested classes
    NestedClass = 0x29,
    /// Generic parameters
    GenericParam = 0x2A,
    /// Generic method instantiations
    MethodSpec = 0x2B,
    /// Generic parameter constraints
    GenericParamConstraint = 0x2C,
}

impl TableId {
    /// The table number, as used in tokens and the valid bit-vector
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn number(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn ids_are_dense_and_ordered() {
        assert_eq!(TableId::COUNT, 0x2D);
        for (expected, id) in TableId::iter().enumerate() {
            assert_eq!(id as usize, expected);
        }
    }
}
