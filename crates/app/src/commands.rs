//! The three huffc commands.
//!
//! This is the caller side of the codec: it owns file I/O, the choice to fall
//! back to raw bytes, and verification. The codec itself never touches the
//! file system.
//!
//! Every file `compress` writes starts with one tag byte recording whether the
//! rest is a Huffman block or the original bytes, so `decompress` never has to
//! guess.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use huffcoder_core::{compress_with_stats, decompress, CompressionStats};
use tracing::{debug, info, warn};

use crate::config::{FileArgs, Source};
use crate::input_gen::generate_sample_data;

const TAG_BLOCK: u8 = b'H';
const TAG_RAW: u8 = b'R';

/// What a `compress` run wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Written {
    /// The Huffman block
    Block,
    /// The original bytes, because the block was not smaller
    Raw,
}

impl Written {
    fn tag(self) -> u8 {
        match self {
            Written::Block => TAG_BLOCK,
            Written::Raw => TAG_RAW,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            TAG_BLOCK => Some(Written::Block),
            TAG_RAW => Some(Written::Raw),
            _ => None,
        }
    }
}

/// Compress `args.input` into `args.output`.
pub fn compress_file(args: &FileArgs) -> Result<(Written, CompressionStats)> {
    let data = read(&args.input)?;
    let (block, stats) = compress_with_stats(&data);
    debug!(
        input = %args.input.display(),
        original = stats.original_len,
        compressed = stats.compressed_len,
        "compressed"
    );

    if stats.distinct_symbols == 1 {
        warn!(
            "input holds a single distinct byte value; the block cannot record its length and will decompress to nothing"
        );
    }

    let written = if args.fallback_raw && !stats.was_compressed() {
        warn!(
            original = stats.original_len,
            compressed = stats.compressed_len,
            "no compression achieved, writing original bytes"
        );
        Written::Raw
    } else {
        Written::Block
    };

    let body: &[u8] = match written {
        Written::Block => &block,
        Written::Raw => &data,
    };
    let mut file = Vec::with_capacity(body.len() + 1);
    file.push(written.tag());
    file.extend_from_slice(body);
    write(&args.output, &file)?;

    info!(
        output = %args.output.display(),
        bytes = file.len(),
        stored = ?written,
        ratio = %format!("{:.1}%", stats.ratio() * 100.0),
        "compress finished"
    );
    Ok((written, stats))
}

/// Decompress `args.input` into `args.output`, returning the output size.
///
/// With `fallback_raw`, input that does not unpack (an unknown tag, or a
/// block that fails to decode) is passed through unchanged instead of failing.
pub fn decompress_file(args: &FileArgs) -> Result<usize> {
    let input = read(&args.input)?;
    let data = match unpack(&input) {
        Ok(data) => data,
        Err(err) if args.fallback_raw => {
            warn!(
                error = %format!("{:#}", err),
                "input is not a huffc file, passing it through unchanged"
            );
            input
        }
        Err(err) => {
            return Err(err.context(format!("failed to decompress {}", args.input.display())));
        }
    };

    write(&args.output, &data)?;
    info!(output = %args.output.display(), bytes = data.len(), "decompress finished");
    Ok(data.len())
}

/// Outcome of an in-memory roundtrip.
#[derive(Debug, Clone, Copy)]
pub struct RoundtripReport {
    pub stats: CompressionStats,
    pub input_crc: u32,
    pub output_crc: u32,
    pub output_len: usize,
}

/// Compress and decompress `source` in memory and verify the result.
///
/// Single-distinct-byte input is expected to come back empty.
pub fn roundtrip(source: &Source) -> Result<RoundtripReport> {
    let data = match source {
        Source::File(path) => read(path)?,
        Source::Sample { seed, size } => {
            info!(seed, size, "generating sample data");
            generate_sample_data(*seed, *size)
        }
    };

    let (block, stats) = compress_with_stats(&data);
    let output = decompress(&block).context("roundtrip decompression failed")?;

    let expected: &[u8] = if stats.distinct_symbols == 1 { &[] } else { &data };
    let report = RoundtripReport {
        stats,
        input_crc: crc32fast::hash(expected),
        output_crc: crc32fast::hash(&output),
        output_len: output.len(),
    };

    if report.input_crc != report.output_crc || output.len() != expected.len() {
        bail!(
            "roundtrip mismatch: expected {} bytes (crc {:#010x}), got {} bytes (crc {:#010x})",
            expected.len(),
            report.input_crc,
            output.len(),
            report.output_crc
        );
    }

    if stats.distinct_symbols == 1 {
        warn!("single distinct byte value: decompressed to empty output as documented");
    }
    info!(crc = %format!("{:#010x}", report.output_crc), "roundtrip verified");
    Ok(report)
}

/// Strip the tag byte and restore what follows it.
fn unpack(file: &[u8]) -> Result<Vec<u8>> {
    let Some((&tag, body)) = file.split_first() else {
        bail!("file is empty");
    };

    match Written::from_tag(tag) {
        Some(Written::Block) => Ok(decompress(body)?),
        Some(Written::Raw) => {
            debug!(bytes = body.len(), "file holds raw bytes");
            Ok(body.to_vec())
        }
        None => bail!("unknown storage tag {:#04x}", tag),
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))
}
