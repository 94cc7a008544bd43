//! huffc: command-line front end for huffcoder-core.

mod commands;
mod config;
mod input_gen;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::commands::Written;
use crate::config::{Config, Mode};

fn main() -> Result<()> {
    let config = Config::from_env();
    init_logging(config.verbose);

    if config.verbose {
        config.print();
    }

    match &config.mode {
        Mode::Compress(args) => {
            let (written, stats) = commands::compress_file(args)?;
            if config.print_stats {
                stats.print_summary();
                if written == Written::Raw {
                    println!("Output holds the original bytes (no compression achieved)");
                }
            }
        }
        Mode::Decompress(args) => {
            let len = commands::decompress_file(args)?;
            if config.print_stats {
                println!("Restored {} bytes to {}", len, args.output.display());
            }
        }
        Mode::Roundtrip { source } => {
            let report = commands::roundtrip(source)?;
            if config.print_stats {
                report.stats.print_summary();
                println!("✓ Roundtrip verified");
                println!(
                    "  {} bytes restored, crc32 {:#010x}",
                    report.output_len, report.output_crc
                );
            }
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
