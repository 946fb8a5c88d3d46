use strum::{EnumCount, EnumIter};

use crate::{
    file::io::read_le_at,
    metadata::{
        tables::{TableId, TableInfoRef},
        token::Token,
    },
    Result,
};

/// The coded index kinds (II.24.2.6) used by the decoded tables.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, EnumIter, EnumCount)]
#[repr(usize)]
pub enum CodedIndexType {
    /// `TypeDef`, `TypeRef` or `TypeSpec`
    TypeDefOrRef,
    /// `Field`, `Param` or `Property`
    HasConstant,
    /// Anything that can carry a custom attribute
    HasCustomAttribute,
    /// Parent of a `MemberRef`
    MemberRefParent,
    /// Constructor of a custom attribute
    CustomAttributeType,
    /// Scope of a `TypeRef`
    ResolutionScope,
}

impl CodedIndexType {
    /// The tables addressed by this kind, indexed by tag
    #[must_use]
    pub fn tables(&self) -> &'static [TableId] {
        match self {
            CodedIndexType::TypeDefOrRef => {
                &[TableId::TypeDef, TableId::TypeRef, TableId::TypeSpec]
            }
            CodedIndexType::HasConstant => &[TableId::Field, TableId::Param, TableId::Property],
            CodedIndexType::HasCustomAttribute => &[
                TableId::MethodDef,
                TableId::Field,
                TableId::TypeRef,
                TableId::TypeDef,
                TableId::Param,
                TableId::InterfaceImpl,
                TableId::MemberRef,
                TableId::Module,
                TableId::DeclSecurity,
                TableId::Property,
                TableId::Event,
                TableId::StandAloneSig,
                TableId::ModuleRef,
                TableId::TypeSpec,
                TableId::Assembly,
                TableId::AssemblyRef,
                TableId::File,
                TableId::ExportedType,
                TableId::ManifestResource,
                TableId::GenericParam,
                TableId::GenericParamConstraint,
                TableId::MethodSpec,
            ],
            CodedIndexType::MemberRefParent => &[
                TableId::TypeDef,
                TableId::TypeRef,
                TableId::ModuleRef,
                TableId::MethodDef,
                TableId::TypeSpec,
            ],
            // Tags 0, 1 and 4 are unused; only MethodDef (2) and MemberRef (3) are valid
            CodedIndexType::CustomAttributeType => &[
                TableId::MethodDef,
                TableId::MethodDef,
                TableId::MethodDef,
                TableId::MemberRef,
                TableId::MemberRef,
            ],
            CodedIndexType::ResolutionScope => &[
                TableId::Module,
                TableId::ModuleRef,
                TableId::AssemblyRef,
                TableId::TypeRef,
            ],
        }
    }

    /// Number of tag bits, `ceil(log2(tables))`
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn tag_bits(&self) -> u8 {
        let count = self.tables().len();
        (usize::BITS - (count - 1).leading_zeros()) as u8
    }
}

/// A decoded coded index
#[derive(Clone, Debug, PartialEq)]
pub struct CodedIndex {
    /// The table the index points into
    pub tag: TableId,
    /// The 1-based row, 0 for a null reference
    pub row: u32,
    /// The token of the referenced row
    pub token: Token,
}

impl CodedIndex {
    /// Read a coded index of kind `ci_type` at `offset`.
    ///
    /// # Errors
    /// Returns an error if the data is truncated or the tag is invalid.
    pub fn read(
        data: &[u8],
        offset: &mut usize,
        info: &TableInfoRef,
        ci_type: CodedIndexType,
    ) -> Result<Self> {
        let coded_index = if info.coded_index_bytes(ci_type) == 4 {
            read_le_at::<u32>(data, offset)?
        } else {
            u32::from(read_le_at::<u16>(data, offset)?)
        };

        let (tag, row) = info.decode_coded_index(coded_index, ci_type)?;
        Ok(CodedIndex::new(tag, row))
    }

    /// Create a coded index pointing at `row` of `tag`
    #[must_use]
    pub fn new(tag: TableId, row: u32) -> CodedIndex {
        CodedIndex {
            tag,
            row,
            token: Token::from_parts(tag.number(), row),
        }
    }

    /// Encode `tag`/`row` for a coded index of kind `ci_type`.
    ///
    /// Returns `None` if `tag` is not addressed by `ci_type`.
    #[must_use]
    pub fn encode(ci_type: CodedIndexType, tag: TableId, row: u32) -> Option<u32> {
        let position = match (ci_type, tag) {
            (CodedIndexType::CustomAttributeType, TableId::MethodDef) => 2,
            (CodedIndexType::CustomAttributeType, TableId::MemberRef) => 3,
            (CodedIndexType::CustomAttributeType, _) => return None,
            _ => {
                let position = ci_type.tables().iter().position(|table| *table == tag)?;
                u32::try_from(position).ok()?
            }
        };

        Some((row << ci_type.tag_bits()) | position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::tables::TableInfo;
    use std::sync::Arc;

    #[test]
    fn tag_bits() {
        assert_eq!(CodedIndexType::TypeDefOrRef.tag_bits(), 2);
        assert_eq!(CodedIndexType::HasConstant.tag_bits(), 2);
        assert_eq!(CodedIndexType::HasCustomAttribute.tag_bits(), 5);
        assert_eq!(CodedIndexType::MemberRefParent.tag_bits(), 3);
        assert_eq!(CodedIndexType::CustomAttributeType.tag_bits(), 3);
        assert_eq!(CodedIndexType::ResolutionScope.tag_bits(), 2);
    }

    #[test]
    fn read_small() {
        let info = Arc::new(TableInfo::new_test(
            &[(TableId::TypeRef, 10)],
            false,
            false,
            false,
        ));

        // TypeRef row 3: (3 << 2) | 1
        let data = [0x0D, 0x00];
        let mut offset = 0;
        let index = CodedIndex::read(&data, &mut offset, &info, CodedIndexType::TypeDefOrRef)
            .unwrap();

        assert_eq!(offset, 2);
        assert_eq!(index.tag, TableId::TypeRef);
        assert_eq!(index.row, 3);
        assert_eq!(index.token, Token::new(0x0100_0003));
    }

    #[test]
    fn read_large() {
        let info = Arc::new(TableInfo::new_test(
            &[(TableId::TypeDef, 0x10000)],
            false,
            false,
            false,
        ));

        let raw = 0x8001_u32 << 2;
        let data = raw.to_le_bytes();
        let mut offset = 0;
        let index = CodedIndex::read(&data, &mut offset, &info, CodedIndexType::TypeDefOrRef)
            .unwrap();

        assert_eq!(offset, 4);
        assert_eq!(index.tag, TableId::TypeDef);
        assert_eq!(index.row, 0x8001);
    }

    #[test]
    fn encode() {
        assert_eq!(
            CodedIndex::encode(CodedIndexType::HasCustomAttribute, TableId::TypeDef, 2),
            Some((2 << 5) | 3)
        );
        assert_eq!(
            CodedIndex::encode(CodedIndexType::CustomAttributeType, TableId::MemberRef, 1),
            Some((1 << 3) | 3)
        );
        assert_eq!(
            CodedIndex::encode(CodedIndexType::CustomAttributeType, TableId::MethodDef, 1),
            Some((1 << 3) | 2)
        );
        assert_eq!(
            CodedIndex::encode(CodedIndexType::TypeDefOrRef, TableId::Param, 1),
            None
        );
    }
}
