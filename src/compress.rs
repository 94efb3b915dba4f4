//! The compression algorithm.
//!
//! For every input position we brute-force the 4KiB window for the longest
//! run we could copy instead of storing literals. That is O(n·w) where the
//! decoder is O(n), but it is what the original tooling did and it keeps the
//! output deterministic: the scan walks from the oldest window byte toward
//! the newest and only a strictly longer run displaces the incumbent, so
//! equal-length matches keep the largest displacement.

use std::cmp;
use std::io::{Read, Write};
use fehler::{throw, throws};

use crate::header::Header;
use crate::{Error, MAX_MATCH, MIN_MATCH, WINDOW_SIZE};

/// One flag byte plus up to eight two-byte tokens.
const MAX_BLOCK_LEN: usize = 1 + 8 * 2;

#[derive(Copy, Clone, Debug)]
struct Match {
    /// The number of bytes the back-reference will copy.
    length: usize,

    /// How far behind the cursor the copy source starts.
    displacement: usize,
}

/// Compress `input_length` bytes from `reader` into `writer`, returning the
/// compressed size including the header.
///
/// The whole input is buffered up front: the match finder needs random
/// access to every already-consumed byte. Inputs beyond the 24-bit size
/// field fail with [`Error::InputTooLarge`] before anything is read or
/// written.
#[throws]
pub fn compress<R: Read, W: Write>(mut reader: R, input_length: u64, mut writer: W) -> u64 {
    let mut compressed_len = Header { decompressed_size: input_length }.write(&mut writer)?;

    let mut input = Vec::with_capacity(input_length as usize);
    reader.by_ref().take(input_length).read_to_end(&mut input)?;
    if (input.len() as u64) < input_length {
        throw!(Error::TruncatedStream);
    }

    // the flag byte forces us to buffer up to eight tokens before writing
    let mut block = [0u8; MAX_BLOCK_LEN];
    let mut block_len = 1;
    let mut tokens_in_block = 0;

    let mut cursor = 0;
    while cursor < input.len() {
        if tokens_in_block == 8 {
            writer.write_all(&block[..block_len])?;
            compressed_len += block_len as u64;
            block[0] = 0;
            block_len = 1;
            tokens_in_block = 0;
        }

        match longest_match(&input, cursor) {
            Some(found) => {
                block[0] |= 1 << (7 - tokens_in_block);
                block[block_len] =
                    (((found.length - MIN_MATCH) << 4) | ((found.displacement - 1) >> 8)) as u8;
                block[block_len + 1] = ((found.displacement - 1) & 0xFF) as u8;
                block_len += 2;
                cursor += found.length;
            }
            None => {
                block[block_len] = input[cursor];
                block_len += 1;
                cursor += 1;
            }
        }
        tokens_in_block += 1;
    }

    if tokens_in_block > 0 {
        writer.write_all(&block[..block_len])?;
        compressed_len += block_len as u64;
    }

    compressed_len
}

/// Compress all of `input` into a fresh buffer.
#[throws]
pub fn compress_to_vec(input: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    compress(input, input.len() as u64, &mut buf)?;
    buf
}

/// The longest back-reference usable at `cursor`, if any is at least
/// [`MIN_MATCH`] long.
fn longest_match(input: &[u8], cursor: usize) -> Option<Match> {
    let window_len = cmp::min(cursor, WINDOW_SIZE);
    let lookahead = cmp::min(input.len() - cursor, MAX_MATCH);

    let mut best: Option<Match> = None;
    let mut max_length = 0;

    for displacement in (1..=window_len).rev() {
        let source = cursor - displacement;

        // always compare against the full lookahead, not just the window:
        // the source may run into the bytes we are currently encoding,
        // because the decoder replays such copies byte by byte
        let length = (0..lookahead)
            .take_while(|&i| input[source + i] == input[cursor + i])
            .count();

        if length > max_length {
            max_length = length;
            best = Some(Match { length, displacement });

            if max_length == lookahead {
                break;
            }
        }
    }

    best.filter(|found| found.length >= MIN_MATCH)
}
