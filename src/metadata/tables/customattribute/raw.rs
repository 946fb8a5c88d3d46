use crate::{
    metadata::{
        tables::{CodedIndex, MemberRefRaw, MethodDefRaw, TableId, TypeDefRaw},
        token::Token,
        winmd::WinMd,
    },
    Result,
};

/// The raw row of the `CustomAttribute` table
#[derive(Clone, Debug)]
pub struct CustomAttributeRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `HasCustomAttribute` coded index of the decorated entity
    pub parent: CodedIndex,
    /// `CustomAttributeType` coded index of the attribute constructor
    pub constructor: CodedIndex,
    /// `#Blob` index of the attribute value
    pub value: u32,
}

impl CustomAttributeRaw {
    /// The raw value blob
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Blob` heap.
    pub fn value<'w>(&self, winmd: &'w WinMd) -> Result<&'w [u8]> {
        winmd.blob(self.value)
    }

    /// `Namespace.Name` of the attribute type, e.g. `Windows.Foundation.Metadata.GuidAttribute`
    ///
    /// # Errors
    /// Returns an error if the constructor or its declaring type cannot be resolved.
    pub fn attribute_type(&self, winmd: &WinMd) -> Result<String> {
        let declaring_type = match self.constructor.tag {
            TableId::MemberRef => {
                winmd
                    .table::<MemberRefRaw>()
                    .get(self.constructor.row)?
                    .class
                    .token
            }
            TableId::MethodDef => {
                let method = winmd.table::<MethodDefRaw>().get(self.constructor.row)?;
                let mut owner = None;
                for type_def in &winmd.table::<TypeDefRaw>() {
                    let type_def = type_def?;
                    if type_def.method_list > method.rid {
                        break;
                    }
                    owner = Some(type_def.token);
                }

                owner.ok_or_else(|| {
                    malformed_error!("MethodDef {} has no declaring type", method.rid)
                })?
            }
            _ => {
                return Err(malformed_error!(
                    "Invalid custom attribute constructor - {:?}",
                    self.constructor.tag
                ))
            }
        };

        let (namespace, name) = winmd.type_name(declaring_type)?;
        Ok(format!("{namespace}.{name}"))
    }
}
