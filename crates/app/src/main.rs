//! huffpack: command-line driver for the Huffman compression library.
//!
//! The driver owns everything user-facing: reading and writing files,
//! deciding whether a compressed file is worth keeping (the core reports
//! exact numbers, the `--force` flag overrides), and turning recoverable
//! stream conditions into messages and exit codes.
//!
//! Output files only come into existence once there is something worth
//! writing: compression and decompression both run against in-memory
//! buffers first, so a not-beneficial or corrupt input leaves no file
//! behind.

mod config;
mod input_gen;

use std::fs;
use std::process::ExitCode;

use huffpack_core::error::{DecodeError, Error};
use huffpack_core::{compress, decompress, CompressOutcome, Compressor};

use config::{Config, Mode};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    match run(config.mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(mode: Mode) -> Result<(), Error> {
    match mode {
        Mode::Compress {
            input,
            output,
            format,
            force,
        } => {
            let data = fs::read(&input)?;
            let mut stream = Vec::new();
            match compress(&data, &mut stream, format, force)? {
                CompressOutcome::Written { bits } => {
                    fs::write(&output, &stream)?;
                    println!("bits written: {bits}");
                    println!(
                        "bits saved: {}",
                        data.len() as i64 * 8 - bits as i64
                    );
                    println!("wrote {}", output.display());
                }
                CompressOutcome::NotBeneficial {
                    original_bits,
                    compressed_bits,
                } => {
                    println!(
                        "not beneficial: compressed stream would be {compressed_bits} bits \
                         against {original_bits} original; pass --force to write it anyway"
                    );
                }
            }
            Ok(())
        }

        Mode::Decompress { input, output } => {
            let data = fs::read(&input)?;
            let mut restored = Vec::new();
            match decompress(&data[..], &mut restored) {
                Ok(bits) => {
                    fs::write(&output, &restored)?;
                    println!("bits written: {bits}");
                    println!("wrote {}", output.display());
                    Ok(())
                }
                Err(Error::Decode(DecodeError::NotCompressed)) => {
                    eprintln!("{} is not a compressed file", input.display());
                    Err(DecodeError::NotCompressed.into())
                }
                Err(Error::Decode(DecodeError::Truncated)) => {
                    eprintln!(
                        "{} ends before its end-of-stream code; refusing to write partial output",
                        input.display()
                    );
                    Err(DecodeError::Truncated.into())
                }
                Err(error) => Err(error),
            }
        }

        Mode::Estimate { input, format } => {
            let data = fs::read(&input)?;
            let compressor = Compressor::analyze(&data, format)?;
            println!("original bits:   {}", compressor.original_bits());
            println!("compressed bits: {}", compressor.compressed_bits());
            println!("bits saved:      {}", compressor.bits_saved());
            Ok(())
        }

        Mode::Generate {
            output,
            seed,
            size_bytes,
        } => {
            input_gen::write_sample_file(&output, seed, size_bytes)?;
            println!("wrote {size_bytes} bytes to {} (seed {seed})", output.display());
            Ok(())
        }
    }
}
