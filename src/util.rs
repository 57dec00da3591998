use crate::constants::SEQ_NT4_TABLE;

/// Encodes a nucleotide ASCII byte into its 2-bit code (0‒3), or 4 for invalid.
///
/// Uses the `SEQ_NT4_TABLE`, which assigns:
/// - A/a → 0
/// - C/c → 1
/// - G/g → 2
/// - T/t → 3
/// - Any other ASCII byte → 4
///
/// # Arguments
///
/// * `b` – An ASCII byte representing a nucleotide.
///
/// # Returns
///
/// * A 2-bit encoding (0..=3) for valid nucleotides, or 4 for any other byte.
#[inline(always)]
pub const fn nt4(b: u8) -> u8 {
    SEQ_NT4_TABLE[b as usize]
}

/// Returns `true` when `seq` is non-empty and every byte is one of `ACGTacgt`.
pub fn is_nucleotide_seq(seq: &[u8]) -> bool {
    !seq.is_empty() && seq.iter().all(|&b| nt4(b) < 4)
}

/// Validates minstrobe window offsets and returns early on error.
///
/// Requires `w_min < w_max`. Equal bounds are rejected along with inverted ones.
///
/// Returns `SketchError::InvalidConfiguration` on failure.
///
/// # Example
///
/// ```ignore
/// validate_window_offsets!(w_min, w_max);
/// ```
macro_rules! validate_window_offsets {
    ($w_min:expr, $w_max:expr) => {{
        if $w_max <= $w_min {
            return Err($crate::SketchError::InvalidConfiguration(
                "window_max must be greater than window_min",
            ));
        }
    }};
}

/// Validates open-syncmer lengths and returns early on error.
///
/// Requires:
/// - `k ≥ 1`
/// - `s < k` (the s-mer must fit strictly inside the k-mer)
///
/// `s` is unsigned, so the "non-negative" condition holds by construction.
///
/// Returns `SketchError::InvalidConfiguration` on failure.
///
/// # Example
///
/// ```ignore
/// validate_syncmer_lengths!(k, s);
/// ```
macro_rules! validate_syncmer_lengths {
    ($k:expr, $s:expr) => {{
        if $k < 1 {
            return Err($crate::SketchError::InvalidConfiguration(
                "k-mer length must be ≥ 1",
            ));
        }
        if $s >= $k {
            return Err($crate::SketchError::InvalidConfiguration(
                "s-mer length must be smaller than the k-mer length",
            ));
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nucleotide_validation() {
        assert!(is_nucleotide_seq(b"ACGTacgt"));
        assert!(!is_nucleotide_seq(b""));
        assert!(!is_nucleotide_seq(b"ACGN"));
        assert!(!is_nucleotide_seq(b"ACGU"));
        assert_eq!(nt4(b'g'), 2);
    }
}
