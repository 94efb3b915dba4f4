#![forbid(unsafe_code)]

//! LZ-0x10 sliding-window compression.
//!
//! This is the "type 0x10" codec used to pack binary assets on the Nintendo DS:
//! a one-byte format tag, a little-endian decompressed size, and then a stream
//! of flag-byte-prefixed token blocks where each token is either a literal byte
//! or a two-byte back-reference into the last 4KiB of output.
//!
//! Both directions operate on arbitrary [`std::io::Read`]/[`std::io::Write`]
//! streams and own all of their state, so independent calls never interfere.

pub mod header;
pub mod window;
pub mod compress;
pub mod decompress;

use std::io;
use thiserror::Error;

pub use compress::{compress, compress_to_vec};
pub use decompress::{decompress, decompress_to_vec};

/// Back-references reach at most this many bytes behind the write cursor.
pub const WINDOW_SIZE: usize = 0x1000;
/// Shortest run a back-reference can encode; anything shorter stays literal.
pub(crate) const MIN_MATCH: usize = 3;
/// Longest run a single back-reference can encode.
pub(crate) const MAX_MATCH: usize = 0x12;

#[derive(Error, Debug)]
pub enum Error {
    #[error("error reading from or writing to the streams you gave me")]
    Io(#[from] io::Error),
    #[error("not an LZ-0x10 stream: it starts with {0:#04x} instead of 0x10")]
    InvalidFormatTag(u8),
    #[error("the input ended before the declared decompressed size was reached")]
    TruncatedStream,
    #[error("back-reference reaches {displacement} bytes back but only {written} were written")]
    InvalidDisplacement { displacement: usize, written: usize },
    #[error("{0} unconsumed bytes after the declared decompressed size (alignment padding is at most 3)")]
    TrailingData(u64),
    #[error("input of {0} bytes does not fit the 24-bit size field")]
    InputTooLarge(u64),
}

/// A stream that runs dry mid-token is a format violation, not an I/O accident.
pub(crate) fn eof_is_truncation(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::TruncatedStream
    } else {
        Error::Io(e)
    }
}
