//! LZ-0x10 decompression.
//!
//! A linear scan over flag-byte-prefixed token blocks. Back-references are
//! replayed byte by byte through the history window, so a copy may overlap
//! its own destination and cheaply expand runs.

use std::io::{Read, Write};
use byteorder::{ReadBytesExt, WriteBytesExt};
use fehler::{throw, throws};

use crate::header::Header;
use crate::window::HistoryWindow;
use crate::{eof_is_truncation, Error, MIN_MATCH};

/// How many unconsumed bytes may legally follow the token stream.
/// Packed assets are often padded out to a 4-byte boundary.
const MAX_PADDING: u64 = 3;

/// Decompress `input_length` bytes of LZ-0x10 data from `reader` into
/// `writer`, returning the decompressed size the header declared.
///
/// The reader is consumed token by token; any format violation aborts the
/// call with the output stream left wherever it was.
#[throws]
pub fn decompress<R: Read, W: Write>(mut reader: R, input_length: u64, mut writer: W) -> u64 {
    let (header, mut read_bytes) = Header::read(&mut reader)?;
    let declared = header.decompressed_size;

    let mut window = HistoryWindow::new();
    let mut written: u64 = 0;

    // the mask starts spent so the first iteration always fetches a flag byte
    let mut flags = 0u8;
    let mut mask = 0u8;

    while written < declared {
        if mask == 0 {
            flags = next_byte(&mut reader, input_length, &mut read_bytes)?;
            mask = 0x80;
        }

        if flags & mask != 0 {
            let byte1 = next_byte(&mut reader, input_length, &mut read_bytes)?;
            let byte2 = next_byte(&mut reader, input_length, &mut read_bytes)?;

            let length = (byte1 >> 4) as usize + MIN_MATCH;
            let displacement = ((byte1 & 0x0F) as usize) << 8 | byte2 as usize;
            let displacement = displacement + 1;

            if displacement as u64 > written {
                throw!(Error::InvalidDisplacement { displacement, written: written as usize });
            }

            for _ in 0..length {
                let byte = window.peek_back(displacement);
                writer.write_u8(byte)?;
                window.push(byte);
                written += 1;
            }
        } else {
            let byte = next_byte(&mut reader, input_length, &mut read_bytes)?;
            writer.write_u8(byte)?;
            window.push(byte);
            written += 1;
        }

        mask >>= 1;
    }

    let leftover = input_length.saturating_sub(read_bytes);
    if leftover > MAX_PADDING {
        throw!(Error::TrailingData(leftover));
    }

    declared
}

/// Decompress all bytes of `input` into a fresh buffer.
#[throws]
pub fn decompress_to_vec(input: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    decompress(input, input.len() as u64, &mut buf)?;
    buf
}

/// One token-stream byte, counted against the declared input length.
#[throws]
fn next_byte<R: Read>(reader: &mut R, input_length: u64, read_bytes: &mut u64) -> u8 {
    if *read_bytes >= input_length {
        throw!(Error::TruncatedStream);
    }
    let byte = reader.read_u8().map_err(eof_is_truncation)?;
    *read_bytes += 1;
    byte
}
