// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for card layout.
//!
//! Shaping and glyph layout live in the renderer; layout only needs line metrics, so it
//! depends on this small trait. A shaping engine can implement it for exact sizes, and
//! [`HeuristicTextMeasurer`] serves headless output and tests.

/// A minimal single-line text measurement interface.
pub trait TextMeasurer {
    /// Measures `text` as one line at `font_size`, in the same units as the marks.
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics;
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A tiny heuristic text measurer suitable for headless output and tests.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics {
        let font_size = font_size.max(0.0);
        TextMetrics {
            advance_width: 0.6 * font_size * text.chars().count() as f64,
            ascent: 0.8 * font_size,
            descent: 0.2 * font_size,
            leading: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_counts_chars_not_bytes() {
        let m = HeuristicTextMeasurer;
        let ascii = m.measure("ab", 10.0);
        assert_eq!(ascii.advance_width, 12.0);
        assert_eq!(ascii.line_height(), 10.0);

        let dash = m.measure("—", 10.0);
        assert_eq!(dash.advance_width, 6.0, "one glyph regardless of UTF-8 length");
    }
}
