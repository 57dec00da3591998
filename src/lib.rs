//! Streaming sketches over fingerprint sequences.
//!
//! Two selection engines are built on a shared [`WindowMinTracker`]:
//!
//! * [`MinStrobes`] pairs every anchor fingerprint with the minimum of a second
//!   window `w_min..=w_max` positions ahead.
//! * [`OpenSyncmers`] keeps only the k-mers whose smallest s-mer is the leading one.
//!
//! Both consume any `Iterator` of totally ordered values in a single pass and
//! produce their output lazily. The [`hashes`] front-end derives the fingerprint
//! streams from a DNA sequence with ntHash.

mod constants;
#[macro_use]
mod util;
pub mod hashes;
mod minstrobes;
mod opensyncmers;
mod window;

pub use constants::*;
pub use hashes::{
    KmerHasher, NtHash64, compute_hashes, minstrobe_hashes, minstrobe_hashes_with,
    opensyncmer_hashes, opensyncmer_hashes_with,
};
pub use minstrobes::{MinStrobeParams, MinStrobes, StrobeValue, minstrobes};
pub use opensyncmers::{OpenSyncmers, SyncmerParams, opensyncmers};
pub use util::*;
pub use window::{TieBreak, TrackedMinimum, WindowMinTracker};

use nthash_rs::NtHashError;

/// Common `Result` type for all library operations, using `SketchError` for errors.
pub type Result<T, E = SketchError> = core::result::Result<T, E>;

/// Error variants for sketch construction and related operations.
///
/// All of them are raised eagerly when an engine is built; stepping an engine
/// never fails, it only runs out of input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SketchError {
    /// Window or length parameters are out of order
    /// (`w_max <= w_min`, `k < 1`, `s >= k`, zero-width window).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// The input ran out before the first window could be filled.
    #[error("input too short: {required} values required, {available} available")]
    InputTooShort { required: usize, available: usize },

    /// Thrown when the input sequence is empty or contains bytes other than `ACGTacgt`.
    #[error("invalid DNA sequence (empty or contains non-ACGT bytes)")]
    InvalidSequence,

    /// Thrown when a k-mer or s-mer length to hash is less than 1 or greater than 64.
    #[error("k-mer length must be ≥ 1 and ≤ 64")]
    KmerLengthOutOfRange,

    /// Indicates that the precomputed k-mer hash values (via `nthash-rs`) were incomplete.
    /// This should not happen for validated sequences.
    #[error("incomplete pre-computed hash values (nthash)")]
    IncompleteHashValues,

    /// Wraps errors originating from the `nthash-rs` crate.
    #[error(transparent)]
    NtHashError(#[from] NtHashError),
}
