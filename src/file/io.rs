//! Low-level byte order and safe reading utilities for PE and metadata parsing.
//!
//! Every read is bounds-checked and advances a caller-owned offset, which keeps the table
//! and heap readers free of manual slice arithmetic.

use crate::{Error::OutOfBounds, Result};

/// Trait for primitive types that can be decoded from a fixed-size byte array.
pub trait CilIO: Sized {
    /// The byte array type holding an encoded value
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Decode a value from little-endian bytes
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_cil_io {
    ($($ty:ty),*) => {
        $(
            impl CilIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_cil_io!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Read a little-endian value from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is too short.
pub fn read_le<T: CilIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Read a little-endian value at `offset`, advancing it by the size of `T`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the read would cross the end of `data`.
pub fn read_le_at<T: CilIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Read a 2 or 4 byte little-endian index, depending on `is_large`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the read would cross the end of `data`.
pub fn read_le_at_dyn(data: &[u8], offset: &mut usize, is_large: bool) -> Result<u32> {
    let res = if is_large {
        read_le_at::<u32>(data, offset)?
    } else {
        u32::from(read_le_at::<u16>(data, offset)?)
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn read_le_u16() {
        let result = read_le::<u16>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0201);
    }

    #[test]
    fn read_le_u32() {
        let result = read_le::<u32>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0403_0201);
    }

    #[test]
    fn read_le_u64() {
        let result = read_le::<u64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 0x0807_0605_0403_0201);
    }

    #[test]
    fn read_dyn() {
        let mut offset = 0;
        assert_eq!(read_le_at_dyn(&TEST_BUFFER, &mut offset, false).unwrap(), 0x0201);
        assert_eq!(read_le_at_dyn(&TEST_BUFFER, &mut offset, true).unwrap(), 0x0605_0403);
        assert_eq!(offset, 6);
    }

    #[test]
    fn out_of_bounds() {
        let mut offset = 6;
        assert!(matches!(
            read_le_at::<u32>(&TEST_BUFFER, &mut offset),
            Err(OutOfBounds)
        ));
        assert_eq!(offset, 6);

        let mut offset = usize::MAX;
        assert!(read_le_at::<u8>(&TEST_BUFFER, &mut offset).is_err());
    }
}
