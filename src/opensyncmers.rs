use std::iter::FusedIterator;

use crate::{
    Result, SketchError,
    window::{TieBreak, WindowMinTracker},
};

/// Validated k-mer / s-mer lengths for an [`OpenSyncmers`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncmerParams {
    k: usize,
    s: usize,
}

impl SyncmerParams {
    /// Validates `k ≥ 1` and `s < k`.
    pub fn new(k: usize, s: usize) -> Result<Self> {
        validate_syncmer_lengths!(k, s);
        Ok(Self { k, s })
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn s(&self) -> usize {
        self.s
    }

    /// Number of s-mers per k-mer, `k - s + 1`.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.k - self.s + 1
    }
}

/// Iterator producing open syncmers from two aligned fingerprint streams.
///
/// * `smers` – s-mer fingerprints, the values compared inside each k-mer.
/// * `kmers` – k-mer fingerprints; `kmers[i]` is the k-mer covering
///   `smers[i .. i + k - s + 1]`.
///
/// A k-mer is emitted when the smallest of its s-mers (first one on ties, see
/// [`TieBreak::Leftmost`]) is the leading one. The engine is a filter: each pull
/// consumes input until the next open syncmer or the end of either stream.
/// Every k-mer position is emitted at most once.
#[derive(Debug, Clone)]
pub struct OpenSyncmers<I: Iterator, J: Iterator> {
    params: SyncmerParams,

    smers: I,
    kmers: J,

    tracker: WindowMinTracker<I::Item>,

    // Iteration state
    pending:   Option<J::Item>, // first k-mer, if the primed window is already open
    position:  usize,           // k-mer position under the cursor
    last:      Option<usize>,   // position of the last emission
    exhausted: bool,
}

impl<I, J> OpenSyncmers<I, J>
where
    I: Iterator,
    J: Iterator,
    I::Item: Ord + Clone,
{
    /// Constructs a new `OpenSyncmers` iterator.
    ///
    /// Primes the s-mer window eagerly so configuration and length errors surface
    /// here.
    ///
    /// # Arguments
    ///
    /// * `smers` – s-mer fingerprint stream (tracked).
    /// * `kmers` – k-mer fingerprint stream (emitted), advanced in lockstep.
    /// * `k` – k-mer length (≥ 1).
    /// * `s` – s-mer length (< `k`).
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` – Engine positioned on the first k-mer.
    /// * `Err(SketchError::InvalidConfiguration)` – If `k < 1` or `s >= k`.
    /// * `Err(SketchError::InputTooShort)` – If `smers` holds fewer than `k - s + 1`
    ///   values or `kmers` is empty.
    pub fn new<S, T>(smers: S, kmers: T, k: usize, s: usize) -> Result<Self>
    where
        S: IntoIterator<IntoIter = I>,
        T: IntoIterator<IntoIter = J>,
    {
        Self::with_params(smers, kmers, SyncmerParams::new(k, s)?)
    }

    /// Same as [`new`](Self::new) with pre-validated parameters.
    pub fn with_params<S, T>(smers: S, kmers: T, params: SyncmerParams) -> Result<Self>
    where
        S: IntoIterator<IntoIter = I>,
        T: IntoIterator<IntoIter = J>,
    {
        let mut smers = smers.into_iter();
        let mut kmers = kmers.into_iter();

        let tracker =
            WindowMinTracker::prime(smers.by_ref(), params.window_size(), TieBreak::Leftmost)?;

        let first = kmers.next().ok_or(SketchError::InputTooShort {
            required:  1,
            available: 0,
        })?;
        let open = tracker.offset() == 0;

        log::debug!(
            "open syncmers primed: k={} s={} window_size={} first_open={}",
            params.k,
            params.s,
            params.window_size(),
            open
        );

        Ok(Self {
            params,
            smers,
            kmers,
            tracker,
            pending: open.then_some(first),
            position: 0,
            last: None,
            exhausted: false,
        })
    }
}

impl<I: Iterator, J: Iterator> OpenSyncmers<I, J> {
    #[inline]
    pub fn params(&self) -> SyncmerParams {
        self.params
    }

    /// Returns the k-mer position of the last emitted open syncmer.
    ///
    /// If nothing has been emitted yet, returns `None`.
    pub fn index(&self) -> Option<usize> {
        self.last
    }
}

impl<I, J> Iterator for OpenSyncmers<I, J>
where
    I: Iterator,
    J: Iterator,
    I::Item: Ord + Clone,
{
    type Item = J::Item;

    /// Slides the window until its minimum sits at offset 0 and returns that k-mer.
    ///
    /// The minimum reaches offset 0 in one of two ways: a surviving minimum
    /// shifts down from offset 1, or the previous minimum is evicted and the
    /// rescan finds the new one at the front. A value entering at the far edge
    /// lands at offset `k - s`, which is never 0, so it cannot emit on arrival.
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if let Some(kmer) = self.pending.take() {
            self.last = Some(self.position);
            return Some(kmer);
        }

        loop {
            let Some(incoming) = self.smers.next() else {
                self.exhausted = true;
                return None;
            };
            let Some(kmer) = self.kmers.next() else {
                self.exhausted = true;
                return None;
            };
            self.position += 1;

            if self.tracker.advance(incoming).offset == 0 {
                self.last = Some(self.position);
                return Some(kmer);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let pending = usize::from(self.pending.is_some());
        let (_, hi) = self.kmers.size_hint();
        (pending, hi.and_then(|h| h.checked_add(pending)))
    }
}

impl<I, J> FusedIterator for OpenSyncmers<I, J>
where
    I: Iterator,
    J: Iterator,
    I::Item: Ord + Clone,
{
}

/// Builds an [`OpenSyncmers`] engine over aligned s-mer and k-mer fingerprint streams.
///
/// ```
/// let smers = [3u64, 1, 4, 1, 5, 9, 2, 6];
/// let kmers = [10u64, 11, 12, 13, 14];
/// let out: Vec<_> = sketchmers_rs::opensyncmers(smers, kmers, 5, 2).unwrap().collect();
/// assert_eq!(out, vec![11, 13]);
/// ```
pub fn opensyncmers<S, T>(
    smers: S,
    kmers: T,
    k: usize,
    s: usize,
) -> Result<OpenSyncmers<S::IntoIter, T::IntoIter>>
where
    S: IntoIterator,
    T: IntoIterator,
    S::Item: Ord + Clone,
{
    OpenSyncmers::new(smers, kmers, k, s)
}
