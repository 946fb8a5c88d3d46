use crate::{
    metadata::{
        signatures::{SignatureMethod, SignatureParser},
        tables::{ParamRaw, TableId},
        token::Token,
        winmd::WinMd,
    },
    Result,
};

/// The raw row of the `MethodDef` table
#[derive(Clone, Debug)]
pub struct MethodDefRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// RVA of the method body, 0 for interface methods
    pub rva: u32,
    /// `MethodImplAttributes` flags
    pub impl_flags: u32,
    /// `MethodAttributes` flags
    pub flags: u32,
    /// `#Strings` index of the method name
    pub name: u32,
    /// `#Blob` index of the `MethodDefSig`
    pub signature: u32,
    /// First row of this method's parameters in the `Param` table
    pub param_list: u32,
}

impl MethodDefRaw {
    /// The method name
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Strings` heap.
    pub fn name<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.name)
    }

    /// Decode the signature blob of this method.
    ///
    /// # Errors
    /// Returns an error if the blob index is invalid or the signature is malformed.
    pub fn signature(&self, winmd: &WinMd) -> Result<SignatureMethod> {
        SignatureParser::new(winmd.blob(self.signature)?).parse_method_signature()
    }

    /// The `Param` rows of this method, in table order.
    ///
    /// The run may include the return value row (sequence 0).
    ///
    /// # Errors
    /// Returns an error if the run is inconsistent with the next method's run or the size of
    /// the `Param` table, or a row fails to decode.
    pub fn params(&self, winmd: &WinMd) -> Result<Vec<ParamRaw>> {
        let tables = winmd.tables();
        let params = tables.table::<ParamRaw>();
        let param_count = params.row_count();

        let end = if self.rid < tables.table_row_count(TableId::MethodDef) {
            tables.table::<MethodDefRaw>().get(self.rid + 1)?.param_list
        } else {
            param_count + 1
        };

        let start = self.param_list;
        if start == 0 || start > param_count + 1 || end < start || end > param_count + 1 {
            return Err(malformed_error!(
                "Invalid param run {}..{} for MethodDef {} - {} params",
                start,
                end,
                self.rid,
                param_count
            ));
        }

        (start..end).map(|rid| params.get(rid)).collect()
    }
}
