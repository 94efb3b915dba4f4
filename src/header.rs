//! The fixed stream header: format tag plus declared decompressed size.
//!
//! The size is stored as a 24-bit little-endian field. A 24-bit zero is the
//! escape for an extended 32-bit field immediately after it, which the format
//! uses for payloads too large for three bytes. The in-game encoder never
//! produced the extended form, so we only emit it where the 3-byte form would
//! be ambiguous: a size of exactly zero.

use std::io::{Read, Write};
use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use fehler::{throw, throws};

use crate::{eof_is_truncation, Error};

/// Every LZ-0x10 stream starts with this byte.
pub const FORMAT_TAG: u8 = 0x10;
/// Largest size the 3-byte length field can carry.
pub const MAX_SIZE_24: u64 = 0xFF_FFFF;

#[derive(Debug)]
pub struct Header {
    pub decompressed_size: u64,
}

impl Header {
    /// Parse a header, returning it along with the number of bytes consumed
    /// (4 for the short form, 8 for the extended form).
    #[throws]
    pub fn read<R: Read>(reader: &mut R) -> (Self, u64) {
        let tag = reader.read_u8().map_err(eof_is_truncation)?;
        if tag != FORMAT_TAG {
            throw!(Error::InvalidFormatTag(tag));
        }

        let size = reader.read_u24::<LE>().map_err(eof_is_truncation)? as u64;
        if size != 0 {
            (Header { decompressed_size: size }, 4)
        } else {
            let size = reader.read_u32::<LE>().map_err(eof_is_truncation)? as u64;
            (Header { decompressed_size: size }, 8)
        }
    }

    /// Write the header, returning the number of bytes written.
    /// Sizes beyond the 24-bit field are rejected before anything is written.
    #[throws]
    pub fn write<W: Write>(&self, writer: &mut W) -> u64 {
        if self.decompressed_size > MAX_SIZE_24 {
            throw!(Error::InputTooLarge(self.decompressed_size));
        }

        writer.write_u8(FORMAT_TAG)?;
        if self.decompressed_size == 0 {
            // a 24-bit zero means "size follows in four more bytes", so the
            // empty stream has to take the extended form to stay decodable
            writer.write_u24::<LE>(0)?;
            writer.write_u32::<LE>(0)?;
            8
        } else {
            writer.write_u24::<LE>(self.decompressed_size as u32)?;
            4
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(bytes: &[u8]) -> Result<(Header, u64), Error> {
        Header::read(&mut &bytes[..])
    }

    #[test]
    fn short_form() {
        let (header, consumed) = parse(&[0x10, 0x04, 0x00, 0x00]).unwrap();
        assert_eq!(header.decompressed_size, 4);
        assert_eq!(consumed, 4);
    }

    #[test]
    fn extended_form() {
        let (header, consumed) = parse(&[0x10, 0, 0, 0, 0x04, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(header.decompressed_size, 4);
        assert_eq!(consumed, 8);
    }

    #[test]
    fn wrong_tag() {
        let err = parse(&[0x11, 0x04, 0x00, 0x00]).unwrap_err();
        assert!(matches!(err, Error::InvalidFormatTag(0x11)));
    }

    #[test]
    fn missing_extended_field() {
        let err = parse(&[0x10, 0, 0, 0]).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream));
    }

    #[test]
    fn write_short_form() {
        let mut buf = Vec::new();
        let written = Header { decompressed_size: 0x123456 }.write(&mut buf).unwrap();
        assert_eq!(written, 4);
        assert_eq!(buf, [0x10, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn write_zero_takes_extended_form() {
        let mut buf = Vec::new();
        let written = Header { decompressed_size: 0 }.write(&mut buf).unwrap();
        assert_eq!(written, 8);
        assert_eq!(buf, [0x10, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn write_rejects_oversize() {
        let mut buf = Vec::new();
        let err = Header { decompressed_size: MAX_SIZE_24 + 1 }.write(&mut buf).unwrap_err();
        assert!(matches!(err, Error::InputTooLarge(0x100_0000)));
        assert!(buf.is_empty());
    }
}
