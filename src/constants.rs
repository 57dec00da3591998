#![allow(clippy::unreadable_literal)]

// Global constants used throughout the product code.

// `ASCII_SIZE` – Number of possible ASCII values (0..255).
pub const ASCII_SIZE: usize = 256;

/// Largest k-mer (or s-mer) length the ntHash front-end accepts.
pub const MAX_KMER_LENGTH: usize = 64;

/// Seed applied to fingerprints when none is given. XOR with zero is the identity.
pub const DEFAULT_SEED: u64 = 0;

/// 2-bit encoding table for nucleotide sequences. Maps ASCII characters to:
/// A=0, C=1, G=2, T=3, any other character=4 (invalid).
///
/// `U` maps to 4: ntHash skips k-mers it cannot encode, and a skipped
/// position would misalign the s-mer and k-mer streams of a syncmer sketch.
pub const SEQ_NT4_TABLE: [u8; ASCII_SIZE] = {
    const INVALID: u8 = 4;
    // Initialize all entries to 4 (invalid).
    let mut t = [INVALID; ASCII_SIZE];

    // Assign valid encodings (uppercase and lowercase).
    t[b'A' as usize] = 0; // A → 00b
    t[b'a' as usize] = 0;

    t[b'C' as usize] = 1; // C → 01b
    t[b'c' as usize] = 1;

    t[b'G' as usize] = 2; // G → 10b
    t[b'g' as usize] = 2;

    t[b'T' as usize] = 3; // T → 11b
    t[b't' as usize] = 3;

    t
};
