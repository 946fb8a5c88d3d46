//! Interface GUIDs from custom attribute blobs.
//!
//! Windows Runtime interfaces carry their IID in a
//! `Windows.Foundation.Metadata.GuidAttribute`. Its value blob is the 2 byte prolog
//! `01 00`, the 16 GUID bytes and a 2 byte count of named arguments (`00 00`).

use log::debug;

use crate::{
    metadata::{
        tables::{CustomAttributeRaw, TableId, TypeDefRaw},
        winmd::WinMd,
    },
    Result,
};

const PROLOG_SIZE: usize = 2;
const TRAILER_SIZE: usize = 2;

/// Outcome of a GUID lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuidLookup {
    /// The GUID in canonical lowercase form
    Found(String),
    /// No attribute of the type decoded to a GUID
    NotFound,
}

impl GuidLookup {
    /// The GUID, if found
    #[must_use]
    pub fn into_option(self) -> Option<String> {
        match self {
            GuidLookup::Found(guid) => Some(guid),
            GuidLookup::NotFound => None,
        }
    }
}

/// Decode the value blob of a GUID attribute into `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
///
/// The first three groups are little endian, the last two big endian.
///
/// # Errors
/// Returns an error unless exactly 16 bytes remain after removing prolog and trailer.
///
/// # Examples
///
/// ```rust
/// use winmdgen::generator::guid_from_blob;
///
/// let blob = [
///     0x01, 0x00, 0x6f, 0x33, 0xac, 0xa6, 0xd3, 0xf3, 0x97, 0x42, 0x8d, 0x6c, 0xc8, 0x1e,
///     0xa6, 0x62, 0x3f, 0x40, 0x00, 0x00,
/// ];
/// assert_eq!(guid_from_blob(&blob)?, "a6ac336f-f3d3-4297-8d6c-c81ea6623f40");
/// # Ok::<(), winmdgen::Error>(())
/// ```
pub fn guid_from_blob(blob: &[u8]) -> Result<String> {
    let bytes: [u8; 16] = blob
        .len()
        .checked_sub(TRAILER_SIZE)
        .and_then(|end| blob.get(PROLOG_SIZE..end))
        .and_then(|guid| guid.try_into().ok())
        .ok_or_else(|| malformed_error!("Invalid GUID blob length - {}", blob.len()))?;

    Ok(uguid::Guid::from_bytes(bytes).to_string())
}

/// Find the GUID of the type `namespace.name`.
///
/// Custom attributes are scanned in row order. Rows that cannot be decoded, are not attached
/// to a `TypeDef`, are attached to another type, or whose value is not a GUID blob are
/// skipped. The first GUID found wins.
#[must_use]
pub fn type_guid(winmd: &WinMd, namespace: &str, name: &str) -> GuidLookup {
    let type_defs = winmd.table::<TypeDefRaw>();

    for attribute in &winmd.table::<CustomAttributeRaw>() {
        let Ok(attribute) = attribute else {
            continue;
        };

        if attribute.parent.tag != TableId::TypeDef {
            continue;
        }

        let Ok(parent) = type_defs.get(attribute.parent.row) else {
            continue;
        };

        let is_target = matches!(
            (parent.namespace(winmd), parent.name(winmd)),
            (Ok(ns), Ok(n)) if ns == namespace && n == name
        );
        if !is_target {
            continue;
        }

        match attribute.value(winmd).and_then(guid_from_blob) {
            Ok(guid) => return GuidLookup::Found(guid),
            Err(error) => debug!(
                "Skipping attribute {} of {}.{} ({}) - {}",
                attribute.rid,
                namespace,
                name,
                attribute
                    .attribute_type(winmd)
                    .unwrap_or_else(|_| "unknown type".to_string()),
                error
            ),
        }
    }

    GuidLookup::NotFound
}
