// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running `(current, min, max)` state for one named scalar series.

/// A point-in-time reading of a [`Measure`].
///
/// Before the first sample every field reads as `0.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasureReading {
    /// The most recently recorded value.
    pub current: f64,
    /// The smallest value recorded so far.
    pub min: f64,
    /// The largest value recorded so far.
    pub max: f64,
}

/// The observed range of a measure, present once a comparable sample has been recorded.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Range {
    min: f64,
    max: f64,
}

/// A scalar series tracked as its latest value plus the extremes seen so far.
///
/// `Measure` is plain data. Sharing it between threads goes through the single lock owned by
/// the display state, which is what keeps a frame's readings consistent with each other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Measure {
    current: f64,
    range: Option<Range>,
    samples: u64,
}

impl Measure {
    /// Creates a measure with no samples.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a measure whose first sample is `value`.
    #[must_use]
    pub fn seeded(value: f64) -> Self {
        let mut m = Self::new();
        m.update(value);
        m
    }

    /// Records `value` as the current value, widening the observed range if needed.
    ///
    /// `NaN` becomes the current value but never takes part in the range.
    pub fn update(&mut self, value: f64) {
        self.current = value;
        self.samples = self.samples.saturating_add(1);
        if value.is_nan() {
            return;
        }
        self.range = Some(match self.range {
            None => Range {
                min: value,
                max: value,
            },
            Some(r) => Range {
                min: r.min.min(value),
                max: r.max.max(value),
            },
        });
    }

    /// Returns the current value and observed range.
    #[must_use]
    pub fn reading(&self) -> MeasureReading {
        let (min, max) = self.range.map_or((0.0, 0.0), |r| (r.min, r.max));
        MeasureReading {
            current: if self.samples == 0 { 0.0 } else { self.current },
            min,
            max,
        }
    }

    /// Number of samples recorded, including `NaN`s.
    #[must_use]
    pub fn sample_count(&self) -> u64 {
        self.samples
    }

    /// Returns `true` if no sample has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn fresh_measure_reads_zero() {
        let m = Measure::new();
        assert!(m.is_empty());
        assert_eq!(
            m.reading(),
            MeasureReading {
                current: 0.0,
                min: 0.0,
                max: 0.0
            },
            "no sentinel should leak out of an empty measure"
        );
    }

    #[test]
    fn tracks_last_value_and_extremes() {
        let values = [3.0, -1.5, 7.25, 2.0, 7.0, -1.0];
        let mut m = Measure::new();
        for v in values {
            m.update(v);
        }
        let r = m.reading();
        assert_eq!(r.current, -1.0, "current should be the last sample");
        assert_eq!(r.min, -1.5, "min should be the smallest sample");
        assert_eq!(r.max, 7.25, "max should be the largest sample");
        assert_eq!(m.sample_count(), values.len() as u64);
    }

    #[test]
    fn invariant_holds_over_pseudo_random_sequences() {
        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        for len in 1..64 {
            let mut m = Measure::new();
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            let mut last = 0.0;
            for _ in 0..len {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                let v = (state % 20_000) as f64 / 10.0 - 1000.0;
                m.update(v);
                lo = lo.min(v);
                hi = hi.max(v);
                last = v;
            }
            let r = m.reading();
            assert_eq!(r.current, last, "len={len}");
            assert_eq!(r.min, lo, "len={len}");
            assert_eq!(r.max, hi, "len={len}");
            assert!(r.min <= r.current && r.current <= r.max, "len={len}: {r:?}");
        }
    }

    #[test]
    fn seeded_measure_uses_value_for_all_fields() {
        let r = Measure::seeded(-4.0).reading();
        assert_eq!(
            r,
            MeasureReading {
                current: -4.0,
                min: -4.0,
                max: -4.0
            },
            "a seeded measure starts with a degenerate range"
        );
    }

    #[test]
    fn nan_does_not_widen_range() {
        let mut m = Measure::seeded(1.0);
        m.update(f64::NAN);
        let r = m.reading();
        assert!(r.current.is_nan(), "NaN is still reported as current");
        assert_eq!((r.min, r.max), (1.0, 1.0), "range ignores NaN");

        let mut only_nan = Measure::new();
        only_nan.update(f64::NAN);
        let r = only_nan.reading();
        assert_eq!((r.min, r.max), (0.0, 0.0), "no comparable sample yet");
    }
}
