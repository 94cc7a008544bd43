//! Per-call compression measurements.
//!
//! Callers that pick between keeping the compressed block and keeping the
//! original bytes need the sizes side by side; `CompressionStats` carries
//! them along with the shape of the code that produced the block.

use crate::block::CompressedBlock;

/// Measurements for a single `compress` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Length of the input in bytes
    pub original_len: u64,

    /// Length of the serialized block in bytes
    pub compressed_len: u64,

    /// Size of the frequency table section in bytes
    pub header_len: u64,

    /// Number of distinct input bytes
    pub distinct_symbols: usize,

    /// Meaningful payload bits (excluding padding)
    pub payload_bits: u64,

    /// Zero bits appended to the final payload byte
    pub padding: u8,
}

impl CompressionStats {
    /// Measure `block`, produced from an input of `original_len` bytes.
    pub fn measure(original_len: usize, block: &CompressedBlock) -> Self {
        let payload_bits = (block.payload.len() as u64 * 8).saturating_sub(block.padding as u64);
        Self {
            original_len: original_len as u64,
            compressed_len: block.serialized_len() as u64,
            header_len: block.table.serialized_len() as u64,
            distinct_symbols: block.table.len(),
            payload_bits,
            padding: block.padding,
        }
    }

    /// Compute compression ratio (compressed / original).
    ///
    /// Returns 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            0.0
        } else {
            self.compressed_len as f64 / self.original_len as f64
        }
    }

    /// Bytes saved; negative when the block is larger than the input.
    pub fn space_saved(&self) -> i64 {
        self.original_len as i64 - self.compressed_len as i64
    }

    /// Share of the input saved, in percent.
    pub fn percent_saved(&self) -> f64 {
        if self.original_len == 0 {
            0.0
        } else {
            self.space_saved() as f64 / self.original_len as f64 * 100.0
        }
    }

    /// True if the block is strictly smaller than the input.
    pub fn was_compressed(&self) -> bool {
        self.compressed_len < self.original_len
    }

    /// Average payload bits spent per input byte.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.original_len == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.original_len as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Original:   {} bytes", self.original_len);
        println!(
            "Compressed: {} bytes (header {} bytes)",
            self.compressed_len, self.header_len
        );
        println!("Symbols:    {} distinct", self.distinct_symbols);
        println!(
            "Payload:    {} bits + {} padding ({:.3} bits/byte)",
            self.payload_bits,
            self.padding,
            self.bits_per_symbol()
        );
        println!("Ratio:      {:.1}%", self.ratio() * 100.0);

        if self.was_compressed() {
            println!(
                "Saved:      {} bytes ({:.2}%)",
                self.space_saved(),
                self.percent_saved()
            );
        } else {
            println!("Saved:      none (block is not smaller than input)");
        }
        println!();
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "original_len={}\n\
             compressed_len={}\n\
             header_len={}\n\
             distinct_symbols={}\n\
             payload_bits={}\n\
             padding={}\n\
             compression_ratio={:.4}\n\
             space_saved={}\n\
             was_compressed={}\n",
            self.original_len,
            self.compressed_len,
            self.header_len,
            self.distinct_symbols,
            self.payload_bits,
            self.padding,
            self.ratio(),
            self.space_saved(),
            self.was_compressed(),
        )
    }
}
