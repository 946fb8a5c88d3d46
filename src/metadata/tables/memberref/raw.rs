use crate::{
    metadata::{tables::CodedIndex, token::Token, winmd::WinMd},
    Result,
};

/// The raw row of the `MemberRef` table
#[derive(Clone, Debug)]
pub struct MemberRefRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `MemberRefParent` coded index of the declaring type
    pub class: CodedIndex,
    /// `#Strings` index of the member name
    pub name: u32,
    /// `#Blob` index of the member signature
    pub signature: u32,
}

impl MemberRefRaw {
    /// The member name, `.ctor` for constructors
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Strings` heap.
    pub fn name<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.name)
    }
}
