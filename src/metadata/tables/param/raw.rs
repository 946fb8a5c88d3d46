use crate::{
    metadata::{token::Token, winmd::WinMd},
    Result,
};

use super::ParamAttributes;

/// The raw row of the `Param` table
#[derive(Clone, Debug)]
pub struct ParamRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `ParamAttributes` flags
    pub flags: u32,
    /// Position in the signature, 0 for the return value
    pub sequence: u32,
    /// `#Strings` index of the parameter name
    pub name: u32,
}

impl ParamRaw {
    /// The parameter name
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Strings` heap.
    pub fn name<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.name)
    }

    /// True for parameters flagged `[in]`
    #[must_use]
    pub fn is_in(&self) -> bool {
        self.flags & ParamAttributes::IN != 0
    }

    /// True for parameters flagged `[out]`
    #[must_use]
    pub fn is_out(&self) -> bool {
        self.flags & ParamAttributes::OUT != 0
    }
}
