//! Error types for the compression pipeline.
//!
//! All operations return structured errors rather than panicking.
//! Recoverable stream conditions (a file that was never compressed, a
//! truncated payload) are distinguishable variants so callers can report
//! them without giving up; invariant violations surface as their own
//! variants instead of panics.
//!
//! A "not beneficial" compression outcome is deliberately NOT an error:
//! see [`crate::compress::CompressOutcome`].

use thiserror::Error;

/// Top-level error type for all operations in the library.
///
/// Each variant corresponds to a failure domain:
/// - Bit I/O: reading/writing bits over a byte stream
/// - Queue: tree-construction queue misuse
/// - Tree: code-table or serialized-shape failures
/// - Decode: malformed or truncated compressed streams
/// - I/O: underlying stream operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., an invalid field width)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Queue operation violated its contract
    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    /// Huffman tree construction or serialization failed
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Compressed stream could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Underlying stream I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
///
/// End of input is not an error at this layer: the readers report it as a
/// distinct `None` sentinel, and each caller decides whether running out of
/// bits is expected there.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Requested a field wider than the 32-bit maximum
    #[error("invalid bit count: {0} (maximum 32)")]
    InvalidBitCount(usize),
}

/// Ordered queue errors.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Removed or peeked from an empty queue
    #[error("operation on empty queue")]
    Empty,
}

/// Huffman tree errors.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A symbol seen during encoding has no entry in the code table.
    /// Cannot happen when the table was derived from the same input.
    #[error("no code assigned to symbol {0}")]
    MissingCode(u16),

    /// A serialized leaf carried a value past the end-of-stream sentinel
    #[error("serialized leaf value {0} out of range")]
    SymbolOutOfRange(u32),

    /// The serialized tree ended before its pre-order traversal completed
    #[error("serialized tree ends mid-traversal")]
    ShapeTruncated,
}

/// Decoding errors for compressed streams.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream does not begin with the compressed-stream magic value
    #[error("input is not a compressed stream")]
    NotCompressed,

    /// The header-format code is not one this library writes
    #[error("unknown header format code: {0}")]
    UnknownHeaderFormat(u32),

    /// Input ran out before the end-of-stream code was reached.
    /// Any symbols already emitted stay written.
    #[error("stream truncated before end-of-stream code")]
    Truncated,

    /// The header describes a tree that cannot decode anything
    #[error("header describes an unusable tree")]
    MalformedTree,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
