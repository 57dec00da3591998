use std::iter::FusedIterator;

use crate::{
    Result, SketchError,
    window::{TieBreak, WindowMinTracker},
};

/// A minstrobe: `[anchor, minimum of the second window]`.
pub type StrobeValue<T> = [T; 2];

/// Validated window offsets for a [`MinStrobes`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MinStrobeParams {
    window_min: usize,
    window_max: usize,
}

impl MinStrobeParams {
    /// Validates `w_min < w_max`.
    pub fn new(w_min: usize, w_max: usize) -> Result<Self> {
        validate_window_offsets!(w_min, w_max);
        Ok(Self {
            window_min: w_min,
            window_max: w_max,
        })
    }

    #[inline]
    pub fn window_min(&self) -> usize {
        self.window_min
    }

    #[inline]
    pub fn window_max(&self) -> usize {
        self.window_max
    }

    /// Width of the second window, `w_max - w_min + 1`.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_max - self.window_min + 1
    }

    /// Minimum number of fingerprints needed to produce one minstrobe.
    #[inline]
    pub fn required_len(&self) -> usize {
        self.window_max + 1
    }
}

/// Iterator producing order-2 minstrobes from a fingerprint stream.
///
/// For every anchor position `i` the engine yields
/// `[seq[i], min(seq[i + w_min ..= i + w_max])]`. The minimum is maintained by a
/// [`WindowMinTracker`] with [`TieBreak::Rightmost`], so among equal minima the
/// most recent position is reported by [`indexes`](Self::indexes).
///
/// The engine holds two cursors into the same stream (the anchor and the far edge
/// of the second window) and never materializes the input. It yields exactly
/// `len - w_max` items.
#[derive(Debug, Clone)]
pub struct MinStrobes<I: Iterator> {
    params: MinStrobeParams,

    // Cursors: `anchor` yields the next anchor, `second` the next value entering the window
    anchor: I,
    second: I,

    tracker: WindowMinTracker<I::Item>,

    // Iteration state
    current_anchor: Option<I::Item>, // anchor of the primed window, yielded on the first pull
    idx:            usize,           // anchor position of the next item
    exhausted:      bool,
}

impl<I> MinStrobes<I>
where
    I: Iterator + Clone,
    I::Item: Ord + Clone,
{
    /// Constructs a new `MinStrobes` iterator over `seq`.
    ///
    /// Primes the second window eagerly, so configuration and length errors
    /// surface here rather than on the first pull.
    ///
    /// # Arguments
    ///
    /// * `seq` – Fingerprint stream; its iterator must be `Clone` (a forward cursor).
    /// * `w_min` – Offset of the second window's first position from the anchor.
    /// * `w_max` – Offset of the second window's last position (must be > `w_min`).
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` – Engine positioned on the first minstrobe.
    /// * `Err(SketchError::InvalidConfiguration)` – If `w_max <= w_min`.
    /// * `Err(SketchError::InputTooShort)` – If `seq` has fewer than `w_max + 1` values.
    pub fn new<S>(seq: S, w_min: usize, w_max: usize) -> Result<Self>
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self::with_params(seq, MinStrobeParams::new(w_min, w_max)?)
    }

    /// Same as [`new`](Self::new) with pre-validated parameters.
    pub fn with_params<S>(seq: S, params: MinStrobeParams) -> Result<Self>
    where
        S: IntoIterator<IntoIter = I>,
    {
        let too_short = |available| SketchError::InputTooShort {
            required: params.required_len(),
            available,
        };

        let mut anchor = seq.into_iter();
        let mut second = anchor.clone();

        // Move the window cursor to the first position of the second window.
        for skipped in 0..params.window_min {
            if second.next().is_none() {
                return Err(too_short(skipped));
            }
        }

        let tracker = WindowMinTracker::prime(
            second.by_ref(),
            params.window_size(),
            TieBreak::Rightmost,
        )
        .map_err(|e| match e {
            SketchError::InputTooShort { available, .. } => {
                too_short(params.window_min + available)
            }
            other => other,
        })?;

        let current_anchor = Some(anchor.next().ok_or_else(|| too_short(0))?);

        log::debug!(
            "minstrobes primed: w_min={} w_max={} window_size={}",
            params.window_min,
            params.window_max,
            params.window_size()
        );

        Ok(Self {
            params,
            anchor,
            second,
            tracker,
            current_anchor,
            idx: 0,
            exhausted: false,
        })
    }
}

impl<I: Iterator> MinStrobes<I> {
    #[inline]
    pub fn params(&self) -> MinStrobeParams {
        self.params
    }

    /// Returns the position of the last returned anchor.
    ///
    /// If no minstrobe has been generated yet, returns `None`.
    pub fn index(&self) -> Option<usize> {
        self.idx.checked_sub(1)
    }

    /// Returns the positions of the most recently generated minstrobe: `[anchor, selected]`.
    ///
    /// If no minstrobe has been generated yet, returns `[0, 0]`.
    pub fn indexes(&self) -> [usize; 2] {
        match self.index() {
            Some(i) => [i, i + self.params.window_min + self.tracker.offset()],
            None => [0, 0],
        }
    }
}

impl<I> Iterator for MinStrobes<I>
where
    I: Iterator,
    I::Item: Ord + Clone,
{
    type Item = StrobeValue<I::Item>;

    /// Advances both cursors by one and returns the next minstrobe.
    ///
    /// The first call returns the minstrobe of the primed window without
    /// touching the input.
    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if let Some(anchor) = self.current_anchor.take() {
            self.idx += 1;
            return Some([anchor, self.tracker.value().clone()]);
        }

        let Some(incoming) = self.second.next() else {
            self.exhausted = true;
            return None;
        };
        // The anchor trails the window cursor, so it cannot run out first.
        let Some(anchor) = self.anchor.next() else {
            self.exhausted = true;
            return None;
        };

        let min = self.tracker.advance(incoming);
        self.idx += 1;
        Some([anchor, min.value.clone()])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.exhausted {
            return (0, Some(0));
        }
        let pending = usize::from(self.current_anchor.is_some());
        let (lo, hi) = self.second.size_hint();
        (
            lo.saturating_add(pending),
            hi.and_then(|h| h.checked_add(pending)),
        )
    }
}

impl<I> FusedIterator for MinStrobes<I>
where
    I: Iterator,
    I::Item: Ord + Clone,
{
}

/// Builds a [`MinStrobes`] engine over `seq`.
///
/// ```
/// let out: Vec<_> = sketchmers_rs::minstrobes([6u64, 26, 41, 38, 24, 33, 6, 27, 47], 3, 5)
///     .unwrap()
///     .collect();
/// assert_eq!(out, vec![[6, 24], [26, 6], [41, 6], [38, 6]]);
/// ```
pub fn minstrobes<S>(seq: S, w_min: usize, w_max: usize) -> Result<MinStrobes<S::IntoIter>>
where
    S: IntoIterator,
    S::IntoIter: Clone,
    S::Item: Ord + Clone,
{
    MinStrobes::new(seq, w_min, w_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order2_basic() -> Result<()> {
        let ms = MinStrobes::new([6u64, 26, 41, 38, 24, 33, 6, 27, 47], 3, 5)?;
        let v: Vec<_> = ms.collect();
        assert_eq!(v, vec![[6, 24], [26, 6], [41, 6], [38, 6]]);
        Ok(())
    }

    #[test]
    fn indexes_follow_selected_position() -> Result<()> {
        let mut ms = MinStrobes::new([6u64, 26, 41, 38, 24, 33, 6, 27, 47], 3, 5)?;
        assert_eq!(ms.index(), None);
        let mut seen = Vec::new();
        while ms.next().is_some() {
            seen.push(ms.indexes());
        }
        assert_eq!(seen, vec![[0, 4], [1, 6], [2, 6], [3, 6]]);
        Ok(())
    }

    #[test]
    fn exact_length_yields_one() -> Result<()> {
        let v: Vec<_> = MinStrobes::new(0u64..6, 3, 5)?.collect();
        assert_eq!(v, vec![[0, 3]]);
        Ok(())
    }

    #[test]
    fn too_short_input() {
        let err = MinStrobes::new(0u64..5, 3, 5).unwrap_err();
        assert_eq!(err, SketchError::InputTooShort { required: 6, available: 5 });

        let err = MinStrobes::new(0u64..2, 3, 5).unwrap_err();
        assert_eq!(err, SketchError::InputTooShort { required: 6, available: 2 });
    }

    #[test]
    fn rejects_bad_offsets() {
        for (w_min, w_max) in [(4, 4), (5, 3)] {
            let err = MinStrobes::new(0u64..100, w_min, w_max).unwrap_err();
            assert!(matches!(err, SketchError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn size_hint_is_exact_for_ranges() -> Result<()> {
        let mut ms = MinStrobes::new(0u64..20, 2, 7)?;
        assert_eq!(ms.size_hint(), (13, Some(13)));
        ms.next();
        assert_eq!(ms.size_hint(), (12, Some(12)));
        assert_eq!(ms.count(), 12);
        Ok(())
    }

    #[test]
    fn fused_after_exhaustion() -> Result<()> {
        let mut ms = MinStrobes::new(0u64..4, 1, 3)?;
        assert!(ms.next().is_some());
        assert!(ms.next().is_none());
        assert!(ms.next().is_none());
        Ok(())
    }
}
