//! Bit-level I/O over byte streams.
//!
//! `BitWriter` and `BitReader` move individual bits and fixed-width integer
//! fields across any `std::io` stream, MSB-first. Every multi-bit field in
//! the compressed layout (magic value, header format code, frequency counts,
//! tree bit-length, serialized leaf values) goes through `write_bits` /
//! `read_bits`; variable-length codes are emitted one bit at a time.
//!
//! # Padding Rules
//! - `BitWriter::finish` pads the final partial byte with trailing zeros
//! - `BitReader` cannot tell padding from data; the stream's own framing
//!   (the end-of-stream code) marks where the payload ends
//!
//! # End of Input
//! Readers report a clean end of input as `Ok(None)` rather than an error.
//! Whether running out of bits is acceptable depends on where the caller is
//! in the stream, so the decision is theirs.

use std::io::{Read, Write};

use crate::error::{BitIoError, Result};

/// Widest field `write_bits`/`read_bits` accept.
const MAX_FIELD_BITS: usize = 32;

/// Writes bits MSB-first into an underlying byte sink.
///
/// Bits accumulate in a one-byte buffer; each complete byte is flushed to
/// the inner writer immediately.
///
/// # Invariants
/// - `pending_count` is always < 8
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    /// Bits not yet forming a whole byte, right-aligned
    pending: u8,
    /// Number of valid bits in `pending` (0-7)
    pending_count: u8,
    /// Total bits accepted so far, padding excluded
    written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a writer over `inner`. Wrap files in `BufWriter` first; every
    /// completed byte is written through individually.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            pending: 0,
            pending_count: 0,
            written: 0,
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.pending = (self.pending << 1) | bit as u8;
        self.pending_count += 1;
        self.written += 1;
        if self.pending_count == 8 {
            self.inner.write_all(&[self.pending])?;
            self.pending = 0;
            self.pending_count = 0;
        }
        Ok(())
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// Writing `value = 0b101, count = 3` emits bits 1, 0, 1 in that order.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `count` > 32.
    pub fn write_bits(&mut self, count: usize, value: u32) -> Result<()> {
        if count > MAX_FIELD_BITS {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    /// Total bits written so far, not counting final padding.
    pub fn bits_written(&self) -> u64 {
        self.written
    }

    /// Pad the final partial byte with zeros, flush, and return the inner
    /// writer.
    pub fn finish(mut self) -> Result<W> {
        if self.pending_count > 0 {
            let padded = self.pending << (8 - self.pending_count);
            self.inner.write_all(&[padded])?;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Reads bits MSB-first from an underlying byte source.
///
/// # Invariants
/// - `remaining` is always <= 8; bits are consumed from the high end of
///   `current`
#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    /// Byte currently being consumed
    current: u8,
    /// Unread bits left in `current` (0-8)
    remaining: u8,
    /// Total bits handed out so far
    consumed: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a reader over `inner`. Wrap files in `BufReader` first; bytes
    /// are pulled from the inner reader one at a time.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            current: 0,
            remaining: 0,
            consumed: 0,
        }
    }

    /// Read a single bit, or `None` at end of input.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        if self.remaining == 0 {
            let mut buf = [0u8; 1];
            loop {
                match self.inner.read(&mut buf) {
                    Ok(0) => return Ok(None),
                    Ok(_) => break,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
            self.current = buf[0];
            self.remaining = 8;
        }
        self.remaining -= 1;
        self.consumed += 1;
        Ok(Some((self.current >> self.remaining) & 1 == 1))
    }

    /// Read a `count`-bit unsigned field, most significant bit first.
    ///
    /// Returns `None` if the input ends before the full field is read,
    /// including when it ends partway through.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if `count` > 32.
    pub fn read_bits(&mut self, count: usize) -> Result<Option<u32>> {
        if count > MAX_FIELD_BITS {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        let mut value = 0u32;
        for _ in 0..count {
            match self.read_bit()? {
                Some(bit) => value = (value << 1) | bit as u32,
                None => return Ok(None),
            }
        }
        Ok(Some(value))
    }

    /// Total bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.consumed
    }
}
