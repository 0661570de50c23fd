//! Command-line configuration for the huffpack tool.
//!
//! Hand-parsed arguments: a subcommand selecting the operation, then flags.
//! Defaults are chosen so the common case needs nothing beyond `--in`.

use huffpack_core::HeaderFormat;
use std::path::PathBuf;

/// Default size of a generated sample file.
const DEFAULT_SAMPLE_BYTES: usize = 64 * 1024;

/// Which operation the tool runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Compress a file, skipping the write when it would not shrink
    /// (unless forced).
    Compress {
        input: PathBuf,
        output: PathBuf,
        format: HeaderFormat,
        force: bool,
    },
    /// Restore the original file from a compressed one.
    Decompress { input: PathBuf, output: PathBuf },
    /// Report how many bits compression would save, writing nothing.
    Estimate {
        input: PathBuf,
        format: HeaderFormat,
    },
    /// Generate a sample input file with mixed compressibility.
    Generate {
        output: PathBuf,
        seed: u64,
        size_bytes: usize,
    },
}

/// Parsed configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
}

impl Config {
    /// Parse configuration from command-line arguments (program name
    /// excluded).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let Some(command) = args.first() else {
            return Err("missing command (try --help)".to_string());
        };

        let mut input: Option<PathBuf> = None;
        let mut output: Option<PathBuf> = None;
        let mut format = HeaderFormat::Counts;
        let mut force = false;
        let mut seed: Option<u64> = None;
        let mut size_bytes: Option<usize> = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input = Some(PathBuf::from(&args[i]));
                }
                "--out" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--out requires a path".to_string());
                    }
                    output = Some(PathBuf::from(&args[i]));
                }
                "--header" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--header requires 'counts' or 'tree'".to_string());
                    }
                    format = args[i].parse()?;
                }
                "--force" => {
                    force = true;
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--size" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--size requires a byte count".to_string());
                    }
                    size_bytes = Some(args[i].parse().map_err(|_| "invalid size")?);
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => {
                    return Err(format!("unknown argument: {other}"));
                }
            }
            i += 1;
        }

        let mode = match command.as_str() {
            "compress" => {
                let input = input.ok_or("compress requires --in")?;
                let output = output.unwrap_or_else(|| default_compressed_path(&input));
                Mode::Compress {
                    input,
                    output,
                    format,
                    force,
                }
            }
            "decompress" => {
                let input = input.ok_or("decompress requires --in")?;
                let output = output.unwrap_or_else(|| default_decompressed_path(&input));
                Mode::Decompress { input, output }
            }
            "estimate" => {
                let input = input.ok_or("estimate requires --in")?;
                Mode::Estimate { input, format }
            }
            "generate" => Mode::Generate {
                output: output.unwrap_or_else(|| PathBuf::from("./sample.bin")),
                seed: seed.unwrap_or_else(time_seed),
                size_bytes: size_bytes.unwrap_or(DEFAULT_SAMPLE_BYTES),
            },
            other => {
                return Err(format!("unknown command: {other} (try --help)"));
            }
        };

        Ok(Config { mode })
    }
}

/// `<input>.huf` next to the input.
fn default_compressed_path(input: &std::path::Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".huf");
    PathBuf::from(name)
}

/// Strip a `.huf` suffix when present, otherwise append `.out`.
fn default_decompressed_path(input: &std::path::Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == "huf") {
        return input.with_extension("");
    }
    let mut name = input.as_os_str().to_owned();
    name.push(".out");
    PathBuf::from(name)
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|t| t.as_millis() as u64)
        .unwrap_or(0)
}

fn print_help() {
    println!("huffpack: Huffman file compressor");
    println!();
    println!("USAGE:");
    println!("    huffpack <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    compress      Compress --in into --out");
    println!("    decompress    Restore --in into --out");
    println!("    estimate      Report bits saved without writing");
    println!("    generate      Write a sample input file");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>        Input file");
    println!("    --out <PATH>       Output file (default: derived from --in)");
    println!("    --header <FMT>     Header format: counts or tree (default: counts)");
    println!("    --force            Write even when the stream would grow");
    println!("    --seed <N>         Seed for generate (default: time-based)");
    println!("    --size <N>         Sample size in bytes for generate (default: 65536)");
    println!("    --help, -h         Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffpack compress --in notes.txt");
    println!("    huffpack compress --in notes.txt --header tree --force");
    println!("    huffpack decompress --in notes.txt.huf --out notes.txt");
    println!("    huffpack estimate --in notes.txt --header tree");
    println!("    huffpack generate --out sample.bin --seed 42 --size 131072");
    println!();
}
