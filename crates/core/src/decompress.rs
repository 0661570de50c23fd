//! Decoder for compressed streams.
//!
//! Decoding is a small state machine: parse the header into a tree, then
//! walk the payload bit by bit from the root, emitting a byte at every leaf
//! and restarting, until the end-of-stream leaf terminates the walk. The
//! tree is never mutated; the walk state is an explicit [`TreeCursor`]
//! value, so decoding independent streams against one tree would be safe.
//!
//! Running out of input before the end-of-stream code is the one corruption
//! this format can always detect. Bytes already emitted when truncation is
//! discovered stay written.

use std::io::{Read, Write};

use crate::bitio::BitReader;
use crate::error::{DecodeError, Result};
use crate::tree::{HuffTree, Step, TreeCursor, ALPHABET_SIZE, END_OF_STREAM, SYMBOL_BITS};
use crate::{HeaderFormat, BITS_PER_INT, MAGIC};

/// Decode a compressed stream from `input`, writing the original bytes to
/// `output`. Returns the number of bits written.
///
/// # Errors
/// - `DecodeError::NotCompressed` if the stream does not start with the
///   magic value; nothing is written
/// - `DecodeError::UnknownHeaderFormat` for an unrecognized format code
/// - `DecodeError::Truncated` if the input ends before the end-of-stream
///   code; bytes decoded so far have already been written
/// - Tree errors for a malformed tree header
pub fn decompress<R: Read, W: Write>(input: R, mut output: W) -> Result<u64> {
    let mut reader = BitReader::new(input);

    match reader.read_bits(BITS_PER_INT)? {
        Some(MAGIC) => {}
        _ => return Err(DecodeError::NotCompressed.into()),
    }

    let format_code = read_field(&mut reader)?;
    let format = HeaderFormat::from_code(format_code)
        .ok_or(DecodeError::UnknownHeaderFormat(format_code))?;

    let tree = match format {
        HeaderFormat::Counts => read_counts_header(&mut reader)?,
        HeaderFormat::Tree => read_tree_header(&mut reader)?,
    };

    let Some(root) = tree.cursor() else {
        // A single-leaf tree can only be the sentinel alone: the encoded
        // input was empty and the payload holds nothing to read.
        return match tree.root_symbol() {
            Some(END_OF_STREAM) => Ok(0),
            _ => Err(DecodeError::MalformedTree.into()),
        };
    };

    let mut cursor: TreeCursor<'_> = root;
    let mut bits_written = 0u64;
    loop {
        let bit = reader.read_bit()?.ok_or(DecodeError::Truncated)?;
        match cursor.step(bit) {
            Step::Descend(next) => cursor = next,
            Step::Symbol(END_OF_STREAM) => break,
            Step::Symbol(symbol) => {
                output.write_all(&[symbol as u8])?;
                bits_written += SYMBOL_BITS as u64;
                cursor = root;
            }
        }
    }
    output.flush()?;
    Ok(bits_written)
}

/// Read a 32-bit header field that must be present.
fn read_field<R: Read>(reader: &mut BitReader<R>) -> Result<u32> {
    reader
        .read_bits(BITS_PER_INT)?
        .ok_or_else(|| DecodeError::Truncated.into())
}

/// Count format: 256 frequencies in symbol order, then the same tree
/// construction the encoder ran.
fn read_counts_header<R: Read>(reader: &mut BitReader<R>) -> Result<HuffTree> {
    let mut frequencies = [0u32; ALPHABET_SIZE];
    for count in frequencies.iter_mut() {
        *count = read_field(reader)?;
    }
    HuffTree::from_frequencies(&frequencies)
}

/// Tree format: a bit-length, then exactly that many shape bits.
fn read_tree_header<R: Read>(reader: &mut BitReader<R>) -> Result<HuffTree> {
    let bit_len = read_field(reader)?;
    let mut bits = Vec::with_capacity(bit_len as usize);
    for _ in 0..bit_len {
        bits.push(reader.read_bit()?.ok_or(DecodeError::Truncated)?);
    }
    HuffTree::from_shape_bits(&bits)
}
