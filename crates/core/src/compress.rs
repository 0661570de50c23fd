//! Two-pass Huffman encoder.
//!
//! Pass 1 ([`Compressor::analyze`]) tallies symbol frequencies, builds the
//! tree and code table, and computes the exact size of the stream that would
//! be written. Pass 2 ([`Compressor::write_stream`]) re-scans the input and
//! emits it. Keeping the passes separate lets callers decide, from exact
//! numbers and before any output exists, whether writing is worth it.
//!
//! # Stream Layout
//!
//! ```text
//! +----------------------+
//! | magic (32 bits)      |  "HUFF"
//! +----------------------+
//! | format code (32)     |  1 = counts, 2 = tree
//! +----------------------+
//! | header               |  counts: 256 x 32-bit frequencies
//! | (format-dependent)   |  tree:   32-bit bit-length + shape bits
//! +----------------------+
//! | payload              |  each input symbol's code, in input order
//! +----------------------+
//! | end-of-stream code   |
//! | zero pad to byte     |
//! +----------------------+
//! ```
//!
//! All sizes below are in bits; the writer pads the final byte on close.

use std::io::Write;

use crate::bitio::BitWriter;
use crate::error::{Result, TreeError};
use crate::tree::{CodeTable, HuffTree, ALPHABET_SIZE, END_OF_STREAM, SYMBOL_BITS};
use crate::{HeaderFormat, BITS_PER_INT, MAGIC};

/// What a [`compress`] call did.
///
/// "Not beneficial" is an informational status, not an error: the input was
/// analyzed successfully, the numbers just do not favor writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressOutcome {
    /// The stream was written; exact payload bits, padding excluded.
    Written { bits: u64 },
    /// Nothing was written: the stream would not be smaller than the input
    /// and the caller did not force it.
    NotBeneficial {
        original_bits: u64,
        compressed_bits: u64,
    },
}

/// Frequency analysis and size accounting for one input.
///
/// Borrows the input for its lifetime so the encode pass is guaranteed to
/// re-scan the same bytes the analysis saw.
#[derive(Debug)]
pub struct Compressor<'a> {
    input: &'a [u8],
    frequencies: [u32; ALPHABET_SIZE],
    tree: HuffTree,
    codes: CodeTable,
    format: HeaderFormat,
    original_bits: u64,
    compressed_bits: u64,
}

impl<'a> Compressor<'a> {
    /// Scan `input` once: tally frequencies, build the tree and code table,
    /// and compute the exact compressed size under `format`.
    pub fn analyze(input: &'a [u8], format: HeaderFormat) -> Result<Self> {
        let mut frequencies = [0u32; ALPHABET_SIZE];
        for &byte in input {
            frequencies[byte as usize] += 1;
        }
        let original_bits = input.len() as u64 * SYMBOL_BITS as u64;

        let tree = HuffTree::from_frequencies(&frequencies)?;
        let codes = tree.code_table();

        let header_bits = match format {
            HeaderFormat::Counts => (ALPHABET_SIZE * BITS_PER_INT) as u64,
            HeaderFormat::Tree => BITS_PER_INT as u64 + tree.shape_bit_len(),
        };
        let mut payload_bits = 0u64;
        for (symbol, &count) in frequencies.iter().enumerate() {
            if count != 0 {
                let len = codes
                    .code_len(symbol as u16)
                    .ok_or(TreeError::MissingCode(symbol as u16))?;
                payload_bits += count as u64 * len as u64;
            }
        }
        let sentinel_bits = codes
            .code_len(END_OF_STREAM)
            .ok_or(TreeError::MissingCode(END_OF_STREAM))? as u64;

        let compressed_bits =
            2 * BITS_PER_INT as u64 + header_bits + payload_bits + sentinel_bits;

        Ok(Self {
            input,
            frequencies,
            tree,
            codes,
            format,
            original_bits,
            compressed_bits,
        })
    }

    /// Size of the input in bits (symbol count x symbol width).
    pub fn original_bits(&self) -> u64 {
        self.original_bits
    }

    /// Exact size of the stream `write_stream` emits, padding excluded.
    pub fn compressed_bits(&self) -> u64 {
        self.compressed_bits
    }

    /// Bits saved by compressing; negative when the stream would grow.
    pub fn bits_saved(&self) -> i64 {
        self.original_bits as i64 - self.compressed_bits as i64
    }

    /// The code table derived for this input.
    pub fn code_table(&self) -> &CodeTable {
        &self.codes
    }

    /// Emit the full stream unconditionally: magic, format code, header,
    /// then every input symbol's code followed by the end-of-stream code.
    ///
    /// Returns the bits written (padding excluded), which always equals
    /// [`Self::compressed_bits`].
    pub fn write_stream<W: Write>(&self, out: W) -> Result<u64> {
        let mut writer = BitWriter::new(out);
        writer.write_bits(BITS_PER_INT, MAGIC)?;
        writer.write_bits(BITS_PER_INT, self.format.code())?;

        match self.format {
            HeaderFormat::Counts => {
                for &count in &self.frequencies {
                    writer.write_bits(BITS_PER_INT, count)?;
                }
            }
            HeaderFormat::Tree => {
                writer.write_bits(BITS_PER_INT, self.tree.shape_bit_len() as u32)?;
                self.tree.write_shape(&mut writer)?;
            }
        }

        for &byte in self.input {
            self.write_code(byte as u16, &mut writer)?;
        }
        self.write_code(END_OF_STREAM, &mut writer)?;

        let bits = writer.bits_written();
        writer.finish()?;
        Ok(bits)
    }

    fn write_code<W: Write>(&self, symbol: u16, writer: &mut BitWriter<W>) -> Result<()> {
        let code = self
            .codes
            .code(symbol)
            .ok_or(TreeError::MissingCode(symbol))?;
        for &bit in code {
            writer.write_bit(bit == 1)?;
        }
        Ok(())
    }
}

/// Compress `input` into `out` under the chosen header format.
///
/// Unless `force` is set, the stream is only written when it is strictly
/// smaller than the input; otherwise the call reports
/// [`CompressOutcome::NotBeneficial`] and `out` is never touched.
pub fn compress<W: Write>(
    input: &[u8],
    out: W,
    format: HeaderFormat,
    force: bool,
) -> Result<CompressOutcome> {
    let compressor = Compressor::analyze(input, format)?;
    if !force && compressor.bits_saved() <= 0 {
        return Ok(CompressOutcome::NotBeneficial {
            original_bits: compressor.original_bits(),
            compressed_bits: compressor.compressed_bits(),
        });
    }
    let bits = compressor.write_stream(out)?;
    Ok(CompressOutcome::Written { bits })
}

/// Bits saved by compressing `input` under `format`, without writing
/// anything. Negative when compression would grow the stream.
pub fn estimate_savings(input: &[u8], format: HeaderFormat) -> Result<i64> {
    Ok(Compressor::analyze(input, format)?.bits_saved())
}
