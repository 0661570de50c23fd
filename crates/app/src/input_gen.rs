//! Sample input generation.
//!
//! `generate` produces a file whose sections compress very differently, so
//! the estimate and compress commands have something interesting to report:
//! long single-byte runs shrink dramatically, skewed text moderately, and
//! uniformly random sections not at all.
//!
//! All randomness comes from a seeded ChaCha stream, so the same seed
//! always yields the same file.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::Path;

/// Letters drawn for the text-like sections, roughly frequency-ordered so
/// the resulting distribution is skewed the way prose is.
const TEXT_ALPHABET: &[u8] = b" eetaoinshrdlcumwfgypbvkjxqz.,";

/// Produce `size_bytes` of sample data for `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = rng.gen_range(0..8);
        let section_len = (size_bytes - data.len()).min(rng.gen_range(512..=4096));

        match section {
            // 3 in 8: a run of one byte value
            0..=2 => {
                let value: u8 = rng.gen();
                data.resize(data.len() + section_len, value);
            }
            // 3 in 8: skewed text-like content
            3..=5 => {
                for _ in 0..section_len {
                    // squaring the draw biases toward the common letters at
                    // the front of the alphabet
                    let draw: f64 = rng.gen();
                    let index = (draw * draw * TEXT_ALPHABET.len() as f64) as usize;
                    data.push(TEXT_ALPHABET[index.min(TEXT_ALPHABET.len() - 1)]);
                }
            }
            // 2 in 8: incompressible noise
            _ => {
                for _ in 0..section_len {
                    data.push(rng.gen());
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}

/// Generate sample data and write it to `path`.
pub fn write_sample_file(path: &Path, seed: u64, size_bytes: usize) -> std::io::Result<()> {
    let data = generate_sample_data(seed, size_bytes);
    let mut file = std::fs::File::create(path)?;
    file.write_all(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size() {
        for size in [0, 1, 511, 4096, 70_000] {
            assert_eq!(generate_sample_data(3, size).len(), size);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        assert_eq!(generate_sample_data(42, 10_000), generate_sample_data(42, 10_000));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate_sample_data(1, 10_000), generate_sample_data(2, 10_000));
    }

    #[test]
    fn test_sample_is_compressible() {
        // runs and skewed text dominate, so the mix should shrink overall
        let data = generate_sample_data(7, 64 * 1024);
        let saved =
            huffpack_core::estimate_savings(&data, huffpack_core::HeaderFormat::Tree).unwrap();
        assert!(saved > 0, "sample data should compress, saved {saved} bits");
    }
}
