use crate::{
    metadata::{tables::CodedIndex, token::Token, winmd::WinMd},
    Result,
};

/// The raw row of the `TypeRef` table
#[derive(Clone, Debug)]
pub struct TypeRefRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `ResolutionScope` coded index of the defining scope
    pub resolution_scope: CodedIndex,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
}

impl TypeRefRaw {
    /// The simple type name
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Strings` heap.
    pub fn name<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.type_name)
    }

    /// The namespace, empty for nested types
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Strings` heap.
    pub fn namespace<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.type_namespace)
    }
}
