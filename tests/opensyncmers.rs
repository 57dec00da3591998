//! Cross-checks the streaming OpenSyncmers filter against a brute-force
//! per-k-mer test, including inputs dominated by tied s-mer values.

use rand::{Rng, SeedableRng};
use sketchmers_rs::{
    KmerHasher, OpenSyncmers, Result, SketchError, compute_hashes, opensyncmer_hashes,
    opensyncmer_hashes_with,
};

/// Brute-force open syncmer positions: k-mer `i` is open when no s-mer in
/// `smers[i + 1 .. i + w]` is strictly smaller than `smers[i]`.
fn naive_positions(smers: &[u64], w: usize) -> Vec<usize> {
    (0..=smers.len() - w)
        .filter(|&i| smers[i + 1..i + w].iter().all(|&v| v >= smers[i]))
        .collect()
}

#[test]
fn matches_brute_force_on_random_input() -> Result<()> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    for round in 0..200 {
        let k = rng.random_range(1..10);
        let s = rng.random_range(0..k);
        let w = k - s + 1;
        let n = w + rng.random_range(0..50);
        let alphabet = [2u64, 3, 4, 1 << 20][round % 4];
        let smers: Vec<u64> = (0..n).map(|_| rng.random_range(0..alphabet)).collect();
        // k-mer fingerprints are their own positions, so the output is the position list.
        let kmers = 0..(n - w + 1);

        let got: Vec<usize> = OpenSyncmers::new(smers.clone(), kmers, k, s)?.collect();
        assert_eq!(got, naive_positions(&smers, w), "smers={smers:?} k={k} s={s}");
    }
    Ok(())
}

#[test]
fn index_reports_emitted_position() -> Result<()> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(5);
    let smers: Vec<u64> = (0..300).map(|_| rng.random_range(0..8)).collect();
    let kmers: Vec<u64> = (0..297).map(|i| 1000 + i).collect();

    let mut it = OpenSyncmers::new(smers, kmers, 6, 3)?;
    let mut prev = None;
    while let Some(v) = it.next() {
        let pos = it.index().expect("emission has a position");
        assert_eq!(v, 1000 + pos as u64);
        if let Some(p) = prev {
            assert!(pos > p, "position {pos} emitted after {p}");
        }
        prev = Some(pos);
    }
    Ok(())
}

#[test]
fn hashed_sequence_k5_s2() -> Result<()> {
    const SEQ: &[u8] = b"ACGGCGACGTTTAG";
    const K: usize = 5;
    const S: usize = 2;
    let w = K - S + 1;

    let smers = compute_hashes(SEQ, S)?;
    let kmers = compute_hashes(SEQ, K)?;
    assert_eq!(kmers.len(), smers.len() - w + 1);

    let mut it = opensyncmer_hashes(SEQ, K, S)?;
    let mut positions = Vec::new();
    while let Some(v) = it.next() {
        let pos = it.index().expect("emission has a position");
        // The emitted fingerprint is the k-mer at that position...
        assert_eq!(v, kmers[pos]);
        // ...and its leading s-mer is a minimum of the k-mer.
        assert!(smers[pos..pos + w].iter().all(|&x| x >= smers[pos]));
        positions.push(pos);
    }

    assert!(positions.windows(2).all(|p| p[0] < p[1]));
    assert_eq!(positions, naive_positions(&smers, w));
    Ok(())
}

#[test]
fn deterministic_across_passes() -> Result<()> {
    const SEQ: &[u8] = b"ACGGCGACGTTTAGACGGCGACGTTTAGCCAT";
    let a: Vec<u64> = opensyncmer_hashes(SEQ, 7, 3)?.collect();
    let b: Vec<u64> = opensyncmer_hashes(SEQ, 7, 3)?.collect();
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn cloned_engine_is_an_independent_pass() -> Result<()> {
    let smers = [3u64, 1, 4, 1, 5, 9, 2, 6];
    let mut a = OpenSyncmers::new(smers, 10u64..15, 5, 2)?;
    let b = a.clone();
    assert_eq!(a.next(), Some(11));
    assert_eq!(b.collect::<Vec<_>>(), vec![11, 13]);
    assert_eq!(a.collect::<Vec<_>>(), vec![13]);
    Ok(())
}

#[test]
fn invalid_configuration_is_eager() {
    for (k, s) in [(0, 0), (4, 4), (4, 9)] {
        assert!(matches!(
            OpenSyncmers::new(0u64..100, 0u64..100, k, s),
            Err(SketchError::InvalidConfiguration(_))
        ));
    }
}

/// XOR of the bases in each k-mer; one value per position.
struct XorHasher;

impl KmerHasher for XorHasher {
    fn hash_all(&self, seq: &[u8], k: usize) -> Result<Vec<u64>> {
        Ok(seq
            .windows(k)
            .map(|w| w.iter().fold(0u64, |acc, &b| acc ^ b as u64))
            .collect())
    }
}

/// Drops the first k-mer, breaking the one-value-per-position contract.
struct SkipFirstHasher;

impl KmerHasher for SkipFirstHasher {
    fn hash_all(&self, seq: &[u8], k: usize) -> Result<Vec<u64>> {
        let mut hashes = compute_hashes(seq, k)?;
        hashes.remove(0);
        Ok(hashes)
    }
}

#[test]
fn custom_hasher_front_end() -> Result<()> {
    const SEQ: &[u8] = b"ACGGCGACGTTTAGACGGCGACGTTTAG";
    let smers = XorHasher.hash_all(SEQ, 2)?;
    let kmers = XorHasher.hash_all(SEQ, 5)?;

    let got: Vec<u64> = opensyncmer_hashes_with(SEQ, 5, 2, &XorHasher)?.collect();
    let want: Vec<u64> = OpenSyncmers::new(smers, kmers, 5, 2)?.collect();
    assert_eq!(got, want);
    Ok(())
}

#[test]
fn misaligned_hasher_is_rejected() {
    let err = opensyncmer_hashes_with(b"ACGGCGACGTTTAGACGGCGACGTTTAG", 5, 2, &SkipFirstHasher)
        .unwrap_err();
    assert_eq!(err, SketchError::IncompleteHashValues);
}
