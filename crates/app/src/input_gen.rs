//! Sample input generation for roundtrip runs.
//!
//! When no input file is given, `roundtrip` compresses generated data whose
//! segments differ in how well Huffman coding handles them:
//! - Runs of one byte value (about 1 bit per byte)
//! - Text drawn from a skewed alphabet (a few bits per byte)
//! - Short repeating patterns (depends on the pattern's alphabet)
//! - Uniform random bytes (no gain; the header makes it slightly worse)

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest segment of one kind.
const SEGMENT_BYTES: usize = 8192;

/// Letters weighted roughly like English text.
const TEXT_ALPHABET: &[u8] = b"eeeeeeeeeeeetttttttttaaaaaaaaoooooooiiiiiiinnnnnnnsssssshhhhhhrrrrrrddddllluuccmmwwffggyyppbbvk .....,,\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Run,
    Text,
    Pattern,
    Random,
}

impl Segment {
    fn pick(rng: &mut ChaCha8Rng) -> Self {
        match rng.gen_range(0..10) {
            0..=1 => Segment::Run,
            2..=5 => Segment::Text,
            6..=7 => Segment::Pattern,
            _ => Segment::Random,
        }
    }
}

/// Generate `size_bytes` of sample data, fully determined by `seed`.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let len = (size_bytes - data.len()).min(SEGMENT_BYTES);

        match Segment::pick(&mut rng) {
            Segment::Run => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(len));
            }
            Segment::Text => {
                data.extend((0..len).map(|_| TEXT_ALPHABET[rng.gen_range(0..TEXT_ALPHABET.len())]));
            }
            Segment::Pattern => {
                let pattern_len = rng.gen_range(4..=32);
                let pattern: Vec<u8> = (0..pattern_len).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(len));
            }
            Segment::Random => {
                data.extend((0..len).map(|_| rng.gen::<u8>()));
            }
        }
    }

    data
}
