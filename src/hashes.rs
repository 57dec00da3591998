use nthash_rs::kmer::NtHashBuilder;

use crate::{
    Result, SketchError,
    constants::{DEFAULT_SEED, MAX_KMER_LENGTH},
    minstrobes::{MinStrobeParams, MinStrobes},
    opensyncmers::{OpenSyncmers, SyncmerParams},
    util::is_nucleotide_seq,
};

/// Turns a nucleotide sequence into one fingerprint per k-mer position.
///
/// Implementations must return exactly `seq.len() - k + 1` values so that
/// streams hashed with different `k` stay position-aligned.
pub trait KmerHasher: Send + Sync + 'static {
    fn hash_all(&self, seq: &[u8], k: usize) -> Result<Vec<u64>>;
}

/// ntHash fingerprints, XOR-masked with a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NtHash64 {
    seed: u64,
}

impl NtHash64 {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for NtHash64 {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl KmerHasher for NtHash64 {
    fn hash_all(&self, seq: &[u8], k: usize) -> Result<Vec<u64>> {
        let mut hashes = compute_hashes(seq, k)?;
        if self.seed != 0 {
            for h in &mut hashes {
                *h ^= self.seed;
            }
        }
        Ok(hashes)
    }
}

/// Generates k-mer hash values from the given sequence `seq`, using exactly one hash per k-mer.
///
/// # Parameters
/// - `seq`: byte slice representing the DNA sequence (`ACGT`, either case)
/// - `k`: length of each k-mer (must be between 1 and 64, inclusive)
///
/// # Returns
/// - `Ok(Vec<u64>)`: a vector of hash values, one per k-mer, in sequential order
/// - `Err(SketchError::KmerLengthOutOfRange)`: if `k` is outside the valid range (1..=64)
/// - `Err(SketchError::InvalidSequence)`: if `seq` is empty or contains other bytes
/// - `Err(SketchError::InputTooShort)`: if `seq.len() < k`
/// - `Err(SketchError::IncompleteHashValues)`: if the number of hashes computed does not match `seq.len() - k + 1`
///
pub fn compute_hashes(seq: &[u8], k: usize) -> Result<Vec<u64>> {
    // Validate k is within [1, 64]
    if !(1..=MAX_KMER_LENGTH).contains(&k) {
        return Err(SketchError::KmerLengthOutOfRange);
    }
    if !is_nucleotide_seq(seq) {
        return Err(SketchError::InvalidSequence);
    }
    // Ensure the sequence length is sufficient for at least one k-mer
    if seq.len() < k {
        return Err(SketchError::InputTooShort {
            required:  k,
            available: seq.len(),
        });
    }

    // `num_hashes(1)` means we only care about the first hash for each k-mer
    let iter = NtHashBuilder::new(seq)
        .k(k as u16)
        .num_hashes(1)
        .finish()
        .map_err(SketchError::from)?;

    let len = seq.len() - k + 1;
    let mut hashes = Vec::with_capacity(len);
    for (_, h) in iter {
        hashes.push(h[0]);
    }

    // Sanity check: we should have exactly one hash per k-mer position
    if hashes.len() != len {
        return Err(SketchError::IncompleteHashValues);
    }
    Ok(hashes)
}

/// Minstrobes over the ntHash values of the `l`-mers of `seq`.
///
/// Equivalent to [`minstrobe_hashes_with`] using [`NtHash64::default`].
pub fn minstrobe_hashes(
    seq: &[u8],
    l: usize,
    w_min: usize,
    w_max: usize,
) -> Result<MinStrobes<std::vec::IntoIter<u64>>> {
    minstrobe_hashes_with(seq, l, w_min, w_max, &NtHash64::default())
}

/// Minstrobes over the `l`-mer fingerprints produced by `hasher`.
///
/// The window offsets are validated before anything is hashed.
pub fn minstrobe_hashes_with<H: KmerHasher + ?Sized>(
    seq: &[u8],
    l: usize,
    w_min: usize,
    w_max: usize,
    hasher: &H,
) -> Result<MinStrobes<std::vec::IntoIter<u64>>> {
    let params = MinStrobeParams::new(w_min, w_max)?;
    let hashes = hash_checked(hasher, seq, l)?;
    MinStrobes::with_params(hashes, params)
}

/// Open syncmers over the ntHash values of `seq`.
///
/// Equivalent to [`opensyncmer_hashes_with`] using [`NtHash64::default`].
pub fn opensyncmer_hashes(
    seq: &[u8],
    k: usize,
    s: usize,
) -> Result<OpenSyncmers<std::vec::IntoIter<u64>, std::vec::IntoIter<u64>>> {
    opensyncmer_hashes_with(seq, k, s, &NtHash64::default())
}

/// Open syncmers over the `s`-mer and `k`-mer fingerprints produced by `hasher`.
///
/// `s` must be at least 1 here since a zero-length s-mer has no fingerprint.
pub fn opensyncmer_hashes_with<H: KmerHasher + ?Sized>(
    seq: &[u8],
    k: usize,
    s: usize,
    hasher: &H,
) -> Result<OpenSyncmers<std::vec::IntoIter<u64>, std::vec::IntoIter<u64>>> {
    let params = SyncmerParams::new(k, s)?;
    if s == 0 {
        return Err(SketchError::KmerLengthOutOfRange);
    }
    let smers = hash_checked(hasher, seq, s)?;
    let kmers = hash_checked(hasher, seq, k)?;
    OpenSyncmers::with_params(smers, kmers, params)
}

/// Runs `hasher` and enforces one fingerprint per k-mer position.
///
/// A custom hasher that drops or adds positions would otherwise pair k-mers
/// with the wrong s-mer window.
fn hash_checked<H: KmerHasher + ?Sized>(hasher: &H, seq: &[u8], k: usize) -> Result<Vec<u64>> {
    let hashes = hasher.hash_all(seq, k)?;
    if hashes.len() != (seq.len() + 1).saturating_sub(k) {
        return Err(SketchError::IncompleteHashValues);
    }
    Ok(hashes)
}
