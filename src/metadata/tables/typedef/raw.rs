use crate::{
    metadata::{
        tables::{CodedIndex, MethodDefRaw, TableId},
        token::Token,
        winmd::WinMd,
    },
    Result,
};

use super::TypeAttributes;

/// The raw row of the `TypeDef` table
#[derive(Clone, Debug)]
pub struct TypeDefRaw {
    /// Row id, 1-based
    pub rid: u32,
    /// Token of this row
    pub token: Token,
    /// Byte offset of the row within the table
    pub offset: usize,
    /// `TypeAttributes` flags
    pub flags: u32,
    /// `#Strings` index of the type name
    pub type_name: u32,
    /// `#Strings` index of the namespace
    pub type_namespace: u32,
    /// `TypeDefOrRef` coded index of the base type
    pub extends: CodedIndex,
    /// First row of this type's fields in the `Field` table
    pub field_list: u32,
    /// First row of this type's methods in the `MethodDef` table
    pub method_list: u32,
}

impl TypeDefRaw {
    /// The simple type name, e.g. `IBuffer`
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Strings` heap.
    pub fn name<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.type_name)
    }

    /// The namespace, e.g. `Windows.Storage.Streams`
    ///
    /// # Errors
    /// Returns an error if the index is outside the `#Strings` heap.
    pub fn namespace<'w>(&self, winmd: &'w WinMd) -> Result<&'w str> {
        winmd.string(self.type_namespace)
    }

    /// `Namespace.Name`, or just the name for types outside any namespace
    ///
    /// # Errors
    /// Returns an error if either index is outside the `#Strings` heap.
    pub fn full_name(&self, winmd: &WinMd) -> Result<String> {
        let namespace = self.namespace(winmd)?;
        let name = self.name(winmd)?;

        if namespace.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{namespace}.{name}"))
        }
    }

    /// True if the type carries the Windows Runtime flag
    #[must_use]
    pub fn is_windows_runtime(&self) -> bool {
        self.flags & TypeAttributes::WINDOWS_RUNTIME != 0
    }

    /// True if the type is an interface
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags & TypeAttributes::CLASS_SEMANTICS_MASK == TypeAttributes::INTERFACE
    }

    /// The methods owned by this type, in declaration order.
    ///
    /// # Errors
    /// Returns an error if the method run of this type is inconsistent with the next type's
    /// run or the size of the `MethodDef` table, or a method row fails to decode.
    pub fn methods(&self, winmd: &WinMd) -> Result<Vec<MethodDefRaw>> {
        let tables = winmd.tables();
        let methods = tables.table::<MethodDefRaw>();
        let method_count = methods.row_count();

        let end = if self.rid < tables.table_row_count(TableId::TypeDef) {
            tables.table::<TypeDefRaw>().get(self.rid + 1)?.method_list
        } else {
            method_count + 1
        };

        let start = self.method_list;
        if start == 0 || start > method_count + 1 || end < start || end > method_count + 1 {
            return Err(malformed_error!(
                "Invalid method run {}..{} for TypeDef {} - {} methods",
                start,
                end,
                self.rid,
                method_count
            ));
        }

        (start..end).map(|rid| methods.get(rid)).collect()
    }
}
