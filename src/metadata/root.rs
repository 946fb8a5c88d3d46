//! The ECMA-335 metadata root (II.24.2.1).
//!
//! The root starts with the `BSJB` signature, carries a version string (`WindowsRuntime 1.4`
//! for system `.winmd` files) and is followed by the stream headers that locate the table
//! stream and the heaps.

use crate::{
    file::io::{read_le, read_le_at},
    metadata::streams::StreamHeader,
    Error::OutOfBounds,
    Result,
};

/// Signature of the metadata root (`BSJB`)
pub const CIL_HEADER_MAGIC: u32 = 0x424A_5342;

/// The parsed metadata root header
pub struct Root {
    /// Magic signature, always [`CIL_HEADER_MAGIC`]
    pub signature: u32,
    /// Major version
    pub major_version: u16,
    /// Minor version
    pub minor_version: u16,
    /// Length of the padded version string
    pub length: u32,
    /// Version string, without trailing padding
    pub version: String,
    /// Number of streams
    pub stream_number: u16,
    /// The stream headers, in file order
    pub stream_headers: Vec<StreamHeader>,
}

impl Root {
    /// Parse the metadata root at the start of `data`.
    ///
    /// Every stream header is checked to lie within `data`.
    ///
    /// # Errors
    /// Returns an error if the signature does not match or the header is truncated.
    pub fn read(data: &[u8]) -> Result<Root> {
        if data.len() < 20 {
            return Err(OutOfBounds);
        }

        let signature = read_le::<u32>(data)?;
        if signature != CIL_HEADER_MAGIC {
            return Err(malformed_error!(
                "CIL_HEADER_MAGIC does not match - {}",
                signature
            ));
        }

        let version_string_length = read_le_at::<u32>(data, &mut 12)? as usize;
        let Some(version_end) = version_string_length.checked_add(16) else {
            return Err(malformed_error!(
                "Version string length causing integer overflow - {}",
                version_string_length
            ));
        };
        if version_end + 4 > data.len() {
            return Err(OutOfBounds);
        }

        let version = String::from_utf8_lossy(&data[16..version_end])
            .trim_end_matches('\0')
            .to_string();

        let stream_count = read_le_at::<u16>(data, &mut (version_end + 2))?;
        if stream_count == 0 || stream_count > 6 || (stream_count as usize * 9) > data.len() {
            // 9 is the minimum size of a stream header
            return Err(malformed_error!("Invalid stream count - {}", stream_count));
        }

        let mut streams = Vec::with_capacity(stream_count as usize);
        let mut stream_offset = version_end + 4;
        for _ in 0..stream_count {
            if stream_offset > data.len() {
                return Err(OutOfBounds);
            }

            let new_stream = StreamHeader::from(&data[stream_offset..])?;
            match u32::checked_add(new_stream.offset, new_stream.size) {
                Some(range) => {
                    if range as usize > data.len() {
                        return Err(OutOfBounds);
                    }
                }
                None => {
                    return Err(malformed_error!(
                        "Stream offset and size cause integer overflow - {} + {}",
                        new_stream.offset,
                        new_stream.size
                    ))
                }
            }

            let name_aligned = ((new_stream.name.len() + 1) + 3) & !3;
            stream_offset += 8 + name_aligned;

            streams.push(new_stream);
        }

        Ok(Root {
            signature,
            major_version: read_le::<u16>(&data[4..])?,
            minor_version: read_le::<u16>(&data[6..])?,
            length: u32::try_from(version_string_length)
                .map_err(|_| malformed_error!("Version string length too large"))?,
            version,
            stream_number: stream_count,
            stream_headers: streams,
        })
    }
}
