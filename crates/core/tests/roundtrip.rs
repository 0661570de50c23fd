//! End-to-end tests for the compression pipeline.
//!
//! These exercise the public surface the way a driver would: compress a
//! byte buffer under each header format, decompress the result, and verify
//! the output matches the input along with the size accounting.

use huffpack_core::{
    compress, decompress, estimate_savings,
    error::{DecodeError, Error},
    CompressOutcome, Compressor, HeaderFormat,
};

const FORMATS: [HeaderFormat; 2] = [HeaderFormat::Counts, HeaderFormat::Tree];

/// Compress forced, decompress, and require the exact input back.
fn assert_round_trip(input: &[u8], format: HeaderFormat) {
    let mut stream = Vec::new();
    let outcome = compress(input, &mut stream, format, true).expect("compression failed");
    let CompressOutcome::Written { bits } = outcome else {
        panic!("forced compression must write");
    };
    assert_eq!(stream.len() as u64, (bits + 7) / 8, "padding accounting");

    let mut output = Vec::new();
    let bits_out = decompress(&stream[..], &mut output).expect("decompression failed");
    assert_eq!(output, input, "round trip mismatch");
    assert_eq!(bits_out, input.len() as u64 * 8);
}

#[test]
fn test_round_trip_text() {
    let input = b"the quick brown fox jumps over the lazy dog";
    for format in FORMATS {
        assert_round_trip(input, format);
    }
}

#[test]
fn test_round_trip_empty() {
    for format in FORMATS {
        assert_round_trip(b"", format);
    }
}

#[test]
fn test_round_trip_single_distinct_symbol() {
    // tree is exactly two leaves: the symbol and the end-of-stream marker
    for format in FORMATS {
        assert_round_trip(b"X", format);
        assert_round_trip(&[b'X'; 10_000], format);
    }
}

#[test]
fn test_round_trip_all_byte_values() {
    // every frequency equal: maximal tie-breaking pressure on both sides
    let input: Vec<u8> = (0..=255u8).collect();
    for format in FORMATS {
        assert_round_trip(&input, format);
    }
}

#[test]
fn test_round_trip_binary_mix() {
    // skewed distribution over part of the alphabet, plus every value once
    let mut input = Vec::new();
    for i in 0..4096usize {
        input.push((i % 7 * i % 31) as u8);
    }
    input.extend(0..=255u8);
    for format in FORMATS {
        assert_round_trip(&input, format);
    }
}

#[test]
fn test_round_trip_highly_repetitive() {
    let input = b"abababababab".repeat(500);
    for format in FORMATS {
        assert_round_trip(&input, format);
    }
}

#[test]
fn test_deterministic_output() {
    let input = b"same input, same stream, every time".repeat(3);
    for format in FORMATS {
        let mut first = Vec::new();
        let mut second = Vec::new();
        compress(&input, &mut first, format, true).unwrap();
        compress(&input, &mut second, format, true).unwrap();
        assert_eq!(first, second, "byte-identical reruns");
    }
}

#[test]
fn test_header_formats_agree_on_content() {
    // both formats round-trip; their streams differ in size, not meaning
    let input = b"header equivalence: different framing, same payload semantics";
    let mut counts_stream = Vec::new();
    let mut tree_stream = Vec::new();
    compress(input, &mut counts_stream, HeaderFormat::Counts, true).unwrap();
    compress(input, &mut tree_stream, HeaderFormat::Tree, true).unwrap();
    assert_ne!(counts_stream.len(), tree_stream.len());

    for stream in [&counts_stream, &tree_stream] {
        let mut output = Vec::new();
        decompress(&stream[..], &mut output).unwrap();
        assert_eq!(output, input);
    }
}

#[test]
fn test_count_header_reproduces_code_lengths() {
    // the count header stores frequencies only; the decoder must rebuild a
    // tree assigning every symbol a code of the same length the encoder used
    let input = b"aaabbc";
    let encoder = Compressor::analyze(input, HeaderFormat::Counts).unwrap();
    let encoder_codes = encoder.code_table();

    let mut stream = Vec::new();
    compress(input, &mut stream, HeaderFormat::Counts, true).unwrap();
    let mut output = Vec::new();
    decompress(&stream[..], &mut output).unwrap();
    assert_eq!(output, input);

    assert_eq!(encoder_codes.code_len(b'a' as u16), Some(1));
    assert_eq!(encoder_codes.code_len(b'b' as u16), Some(2));
    assert_eq!(encoder_codes.code_len(b'c' as u16), Some(3));
    assert_eq!(
        encoder_codes.code_len(huffpack_core::tree::END_OF_STREAM),
        Some(3)
    );
}

#[test]
fn test_estimate_matches_actual_stream_size() {
    let input = b"estimation must be exact, not approximate".repeat(7);
    for format in FORMATS {
        let saved = estimate_savings(&input, format).unwrap();

        let mut stream = Vec::new();
        let CompressOutcome::Written { bits } =
            compress(&input, &mut stream, format, true).unwrap()
        else {
            panic!("forced compression must write");
        };
        assert_eq!(saved, input.len() as i64 * 8 - bits as i64);
    }
}

#[test]
fn test_incompressible_input_not_beneficial() {
    let input: Vec<u8> = (0..=255u8).collect();
    for format in FORMATS {
        assert!(estimate_savings(&input, format).unwrap() < 0);

        let mut stream = Vec::new();
        let outcome = compress(&input, &mut stream, format, false).unwrap();
        assert!(matches!(outcome, CompressOutcome::NotBeneficial { .. }));
        assert!(stream.is_empty());
    }
}

#[test]
fn test_truncation_is_detected_not_misdecoded() {
    let input = b"corruption must never decode silently".repeat(20);
    for format in FORMATS {
        let mut stream = Vec::new();
        compress(input.as_slice(), &mut stream, format, true).unwrap();

        // cut well inside the payload, before the end-of-stream code
        let cut = stream.len() - 8;
        let mut output = Vec::new();
        let result = decompress(&stream[..cut], &mut output);
        assert!(
            matches!(result, Err(Error::Decode(DecodeError::Truncated))),
            "expected Truncated, got {result:?}"
        );
        // whatever was emitted before the cut is a prefix of the input
        assert!(input.starts_with(&output));
    }
}

#[test]
fn test_uncompressed_file_rejected_cleanly() {
    let not_a_stream = b"GIF89a pretend image data";
    let mut output = Vec::new();
    let result = decompress(&not_a_stream[..], &mut output);
    assert!(matches!(
        result,
        Err(Error::Decode(DecodeError::NotCompressed))
    ));
    assert!(output.is_empty());
}
