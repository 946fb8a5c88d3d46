//! Lookup of types by namespace-qualified name.

use log::debug;

use crate::{
    metadata::{tables::TypeDefRaw, winmd::WinMd},
    Error, Result,
};

fn is_named(namespace: &str, name: &str, class: &str) -> bool {
    class.len() == namespace.len() + 1 + name.len()
        && class.starts_with(namespace)
        && class.ends_with(name)
        && class.as_bytes()[namespace.len()] == b'.'
}

/// Find the `TypeDef` row named `class` (`Namespace.Name`).
///
/// The table is scanned in row order and the first match wins.
///
/// # Errors
/// Returns [`Error::ClassNotFound`] if no row matches, or the decode error of the first row
/// that cannot be read.
///
/// # Examples
///
/// ```rust,no_run
/// use winmdgen::{generator::find_class, metadata::winmd::WinMd};
/// use std::path::Path;
///
/// let winmd = WinMd::from_file(Path::new("Windows.Storage.winmd"))?;
/// let rid = find_class(&winmd, "Windows.Storage.Streams.Buffer")?;
/// # Ok::<(), winmdgen::Error>(())
/// ```
pub fn find_class(winmd: &WinMd, class: &str) -> Result<u32> {
    for type_def in &winmd.table::<TypeDefRaw>() {
        let type_def = type_def?;
        if is_named(type_def.namespace(winmd)?, type_def.name(winmd)?, class) {
            debug!("Found {} in {} at TypeDef row {}", class, winmd.name(), type_def.rid);
            return Ok(type_def.rid);
        }
    }

    Err(Error::ClassNotFound(class.to_string()))
}

/// Like [`find_class`], returning the row itself and `None` if no row matches.
///
/// # Errors
/// Returns the decode error of the first row that cannot be read.
pub fn find_type(winmd: &WinMd, namespace: &str, name: &str) -> Result<Option<TypeDefRaw>> {
    match find_class(winmd, &format!("{namespace}.{name}")) {
        Ok(rid) => winmd.table::<TypeDefRaw>().get(rid).map(Some),
        Err(Error::ClassNotFound(_)) => Ok(None),
        Err(error) => Err(error),
    }
}
