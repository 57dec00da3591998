use std::collections::VecDeque;

use crate::{Result, SketchError};

/// Which of several equal minimal values a [`WindowMinTracker`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TieBreak {
    /// Report the lowest offset (the oldest of the tied values).
    Leftmost,
    /// Report the highest offset (the most recently inserted of the tied values).
    Rightmost,
}

impl TieBreak {
    /// Returns `true` if `candidate` takes over from `current` as the tracked minimum.
    ///
    /// `Leftmost` requires `candidate < current`, `Rightmost` accepts `candidate <= current`.
    /// The same predicate drives both the incremental update and the full rescan,
    /// so the two paths always agree on tied values.
    #[inline(always)]
    pub fn replaces<T: Ord>(self, candidate: &T, current: &T) -> bool {
        match self {
            TieBreak::Leftmost => candidate < current,
            TieBreak::Rightmost => candidate <= current,
        }
    }
}

/// The current minimum of a window together with its window-relative offset.
///
/// `offset` counts from the oldest resident element (0) to the newest (`width - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackedMinimum<T> {
    pub value: T,
    pub offset: usize,
}

/// Fixed-width sliding window that keeps track of its minimum.
///
/// Every [`advance`](Self::advance) drops the oldest value and appends a new one.
/// The minimum is updated in O(1) unless the evicted value *was* the minimum, in
/// which case the window is rescanned. Over a long stream this is amortized O(1)
/// per step.
#[derive(Debug, Clone)]
pub struct WindowMinTracker<T> {
    window:    VecDeque<T>,
    width:     usize,
    tie_break: TieBreak,
    min:       TrackedMinimum<T>,
    rescans:   usize,
}

impl<T: Ord + Clone> WindowMinTracker<T> {
    /// Fills a window of `width` values from `values` and locates its minimum.
    ///
    /// Exactly `width` items are pulled from the iterator; anything after that is
    /// left untouched, so a `by_ref()` cursor can keep feeding [`advance`](Self::advance).
    ///
    /// # Errors
    ///
    /// * `InvalidConfiguration` – if `width` is zero.
    /// * `InputTooShort` – if `values` runs out before `width` items were read.
    pub fn prime<I>(values: I, width: usize, tie_break: TieBreak) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        if width == 0 {
            return Err(SketchError::InvalidConfiguration("window width must be ≥ 1"));
        }

        let mut window = VecDeque::with_capacity(width);
        window.extend(values.into_iter().take(width));
        if window.len() < width {
            return Err(SketchError::InputTooShort {
                required:  width,
                available: window.len(),
            });
        }

        let min = scan(&window, tie_break);
        Ok(Self {
            window,
            width,
            tie_break,
            min,
            rescans: 0,
        })
    }

    /// Shifts the window by one: evicts the oldest value and appends `new_value`.
    ///
    /// Returns the minimum of the shifted window.
    pub fn advance(&mut self, new_value: T) -> &TrackedMinimum<T> {
        self.window.pop_front();

        if self.tie_break.replaces(&new_value, &self.min.value) {
            // New value enters at the far edge and wins outright.
            self.min = TrackedMinimum {
                value:  new_value.clone(),
                offset: self.width - 1,
            };
            self.window.push_back(new_value);
        } else if self.min.offset == 0 {
            // The minimum was just evicted.
            self.window.push_back(new_value);
            self.min = scan(&self.window, self.tie_break);
            self.rescans += 1;
            log::trace!(
                "window minimum evicted, rescanned {} values (new offset {})",
                self.width,
                self.min.offset
            );
        } else {
            self.window.push_back(new_value);
            self.min.offset -= 1;
        }

        &self.min
    }
}

impl<T> WindowMinTracker<T> {
    /// The current minimum and its offset.
    #[inline]
    pub fn minimum(&self) -> &TrackedMinimum<T> {
        &self.min
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.min.value
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.min.offset
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Number of full rescans performed since priming.
    #[inline]
    pub fn rescans(&self) -> usize {
        self.rescans
    }
}

/// Full scan of `window` under `tie_break`. `window` must be non-empty.
fn scan<T: Ord + Clone>(window: &VecDeque<T>, tie_break: TieBreak) -> TrackedMinimum<T> {
    let mut best = 0;
    for (i, v) in window.iter().enumerate().skip(1) {
        if tie_break.replaces(v, &window[best]) {
            best = i;
        }
    }
    TrackedMinimum {
        value:  window[best].clone(),
        offset: best,
    }
}
