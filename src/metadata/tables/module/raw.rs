use crate::{
    metadata::{token::Token, winmd::WinMd},
    Result,
};

/// The raw row of the `Module` table
#[derive(Clone, Debug)]
pub struct ModuleRaw {
    /// Row id, always 1
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// Reserved, shall be zero
    pub generation: u32,
    /// `#Strings` index of the module name
    pub name: u32,
    /// `#GUID` index of the module version id
    pub mvid: u32,
    /// `#GUID` index, reserved for edit and continue
    pub encid: u32,
    /// `#GUID` index, reserved for edit and continue
    pub encbaseid: u32,
}

impl ModuleRaw {
    /// The module name, e.g. `Windows.Foundation.winmd`
    ///
    /// # Errors
    /// Returns an error if the name index is outside the `#Strings` heap.
    pub fn name<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.name)
    }

    /// The module version id, `None` if the module has none.
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#GUID` heap.
    pub fn mvid(&self, winmd: &WinMd) -> Result<Option<uguid::Guid>> {
        if self.mvid == 0 {
            return Ok(None);
        }

        match winmd.guids() {
            Some(guids) => Ok(Some(guids.get(self.mvid as usize)?)),
            None => Err(malformed_error!(
                "Module references GUID {} without a #GUID heap",
                self.mvid
            )),
        }
    }
}
