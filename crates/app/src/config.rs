//! Configuration for the huffc command-line tool.
//!
//! Parses command-line arguments and fills in defaults. `roundtrip` works with
//! zero arguments: it generates sample data from a seed, and the seed is
//! printed so runs are reproducible.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};

/// Default size of generated sample data.
pub const DEFAULT_SAMPLE_BYTES: usize = 256 * 1024;

#[derive(Debug, Parser)]
#[command(
    name = "huffc",
    version,
    about = "Huffman compression for arbitrary files",
    after_help = "EXAMPLES:\n    \
        huffc compress --in notes.txt --out notes.txt.huf\n    \
        huffc decompress --in notes.txt.huf --out notes.txt\n    \
        huffc roundtrip --seed 42                 # Deterministic sample run"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress a file into a Huffman block
    Compress(FileArgs),

    /// Decompress a Huffman block back into the original file
    Decompress(FileArgs),

    /// Compress and decompress in memory, then verify the result
    Roundtrip(RoundtripArgs),
}

#[derive(Debug, Clone, Args)]
pub struct FileArgs {
    /// Input file path
    #[arg(long = "in", value_name = "PATH")]
    pub input: PathBuf,

    /// Output file path
    #[arg(long = "out", value_name = "PATH")]
    pub output: PathBuf,

    /// Write the original bytes when compression does not shrink them
    #[arg(long)]
    pub fallback_raw: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RoundtripArgs {
    /// Input file (default: generate sample data)
    #[arg(long = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Random seed for sample data (default: time-based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size of generated sample data in bytes
    #[arg(long, default_value_t = DEFAULT_SAMPLE_BYTES)]
    pub sample_bytes: usize,
}

#[derive(Debug, Clone, Args)]
pub struct OutputOptions {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Don't print the compression summary
    #[arg(long, global = true)]
    pub no_stats: bool,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub verbose: bool,
    pub print_stats: bool,
}

/// What the run does, with every default resolved.
#[derive(Debug, Clone)]
pub enum Mode {
    Compress(FileArgs),
    Decompress(FileArgs),
    Roundtrip {
        source: Source,
    },
}

/// Where roundtrip input comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Sample { seed: u64, size: usize },
}

impl Config {
    /// Parse configuration from the process arguments.
    ///
    /// Prints usage and exits on invalid arguments, `--help` or `--version`.
    pub fn from_env() -> Self {
        Self::try_from_args(std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    /// Parse configuration from an explicit argument list.
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Ok(Self::from_cli(Cli::try_parse_from(args)?))
    }

    fn from_cli(cli: Cli) -> Self {
        let mode = match cli.command {
            Command::Compress(args) => Mode::Compress(args),
            Command::Decompress(args) => Mode::Decompress(args),
            Command::Roundtrip(args) => {
                let source = match args.input {
                    Some(path) => Source::File(path),
                    None => Source::Sample {
                        seed: args.seed.unwrap_or_else(time_seed),
                        size: args.sample_bytes,
                    },
                };
                Mode::Roundtrip { source }
            }
        };

        Self {
            mode,
            verbose: cli.output.verbose,
            print_stats: !cli.output.no_stats,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.mode {
            Mode::Compress(args) | Mode::Decompress(args) => {
                println!("Input file:  {}", args.input.display());
                println!("Output file: {}", args.output.display());
                println!("Fallback to raw: {}", args.fallback_raw);
            }
            Mode::Roundtrip { source } => match source {
                Source::File(path) => println!("Input file:  {}", path.display()),
                Source::Sample { seed, size } => {
                    println!("Input file:  (generate sample)");
                    println!("Seed: {}", seed);
                    println!("Sample size: {} bytes ({} KiB)", size, size / 1024);
                }
            },
        }
        println!();
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_args() {
        let config =
            Config::try_from_args(["huffc", "compress", "--in", "a.txt", "--out", "a.huf"])
                .unwrap();

        match config.mode {
            Mode::Compress(args) => {
                assert_eq!(args.input, PathBuf::from("a.txt"));
                assert_eq!(args.output, PathBuf::from("a.huf"));
                assert!(!args.fallback_raw);
            }
            other => panic!("unexpected mode {:?}", other),
        }
        assert!(config.print_stats);
        assert!(!config.verbose);
    }

    #[test]
    fn test_roundtrip_defaults_to_sample() {
        let config = Config::try_from_args(["huffc", "roundtrip", "--seed", "42"]).unwrap();
        match config.mode {
            Mode::Roundtrip { source } => assert_eq!(
                source,
                Source::Sample {
                    seed: 42,
                    size: DEFAULT_SAMPLE_BYTES
                }
            ),
            other => panic!("unexpected mode {:?}", other),
        }
    }

    #[test]
    fn test_global_flags() {
        let config = Config::try_from_args([
            "huffc",
            "decompress",
            "--in",
            "x.huf",
            "--out",
            "x",
            "--no-stats",
            "-v",
        ])
        .unwrap();
        assert!(!config.print_stats);
        assert!(config.verbose);
    }

    #[test]
    fn test_fallback_raw_is_a_file_flag() {
        let config = Config::try_from_args([
            "huffc",
            "decompress",
            "--in",
            "x.huf",
            "--out",
            "x",
            "--fallback-raw",
        ])
        .unwrap();
        match config.mode {
            Mode::Decompress(args) => assert!(args.fallback_raw),
            other => panic!("unexpected mode {:?}", other),
        }

        assert!(Config::try_from_args(["huffc", "roundtrip", "--fallback-raw"]).is_err());
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Config::try_from_args(["huffc", "compress", "--in", "a.txt"]).is_err());
    }
}
