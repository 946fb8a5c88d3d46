use std::{ffi::CStr, str};

use crate::{Error::OutOfBounds, Result};

/// The `#Strings` heap: null-terminated UTF-8 identifiers, addressed by byte offset.
///
/// Namespaces, type names, method names and parameter names all live here.
pub struct Strings<'a> {
    data: &'a [u8],
}

impl<'a> Strings<'a> {
    /// Wrap the heap data.
    ///
    /// # Errors
    /// Returns an error if the heap does not start with the empty string.
    pub fn from(data: &'a [u8]) -> Result<Strings<'a>> {
        if data.is_empty() || data[0] != 0 {
            return Err(malformed_error!("Provided #String heap is empty"));
        }

        Ok(Strings { data })
    }

    /// Get the string starting at `index`.
    ///
    /// # Errors
    /// Returns an error if `index` lies outside the heap or the string is not valid UTF-8.
    pub fn get(&self, index: usize) -> Result<&'a str> {
        if index >= self.data.len() {
            return Err(OutOfBounds);
        }

        match CStr::from_bytes_until_nul(&self.data[index..]) {
            Ok(result) => match result.to_str() {
                Ok(result) => Ok(result),
                Err(_) => Err(malformed_error!("Invalid string at index - {}", index)),
            },
            Err(_) => Err(malformed_error!("Invalid string at index - {}", index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crafted() {
        let data = b"\0Windows.Foundation\0Uri\0IUriRuntimeClass\0";
        let strings = Strings::from(data).unwrap();

        assert_eq!(strings.get(0).unwrap(), "");
        assert_eq!(strings.get(1).unwrap(), "Windows.Foundation");
        assert_eq!(strings.get(20).unwrap(), "Uri");
        assert_eq!(strings.get(24).unwrap(), "IUriRuntimeClass");
        // Offsets may point into the middle of an entry
        assert_eq!(strings.get(9).unwrap(), "Foundation");
    }

    #[test]
    fn invalid() {
        assert!(Strings::from(b"").is_err());
        assert!(Strings::from(b"abc\0").is_err());

        let strings = Strings::from(b"\0abc").unwrap();
        assert!(strings.get(1).is_err());
        assert!(strings.get(4).is_err());

        let strings = Strings::from(b"\0\xFF\xFE\0").unwrap();
        assert!(strings.get(1).is_err());
    }
}
