// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measure cards.
//!
//! A card shows one named measure as three centered lines over a shaded rounded rectangle:
//! the name in the secondary color, the current value in a large font, and the observed
//! `(min  —  max)` range.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use simscope_core::{
    Mark, MeasureReading, NamedReading, RectMark, TextAnchor, TextBaseline, TextMark,
    format_range, format_si,
};

use crate::layout::{Insets, Size};
use crate::measure::{TextMeasurer, TextMetrics};
use crate::theme::Theme;

/// Card metrics that are not part of the [`Theme`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStyle {
    /// Horizontal padding inside the card.
    pub padding_x: f64,
    /// Vertical padding inside the card.
    pub padding_y: f64,
    /// Minimum outer width, so cards with short text still line up.
    pub min_width: f64,
    /// Value font size as a multiple of the theme text size.
    pub value_scale: f64,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            padding_x: 14.0,
            padding_y: 10.0,
            min_width: 220.0,
            value_scale: 3.5,
        }
    }
}

impl CardStyle {
    /// Sets the value font scale.
    pub fn with_value_scale(mut self, value_scale: f64) -> Self {
        self.value_scale = value_scale;
        self
    }

    fn insets(&self) -> Insets {
        Insets::symmetric(self.padding_x.max(0.0), self.padding_y.max(0.0))
    }
}

/// One measure card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardSpec {
    /// Measure name shown as the title.
    pub title: String,
    /// Values to show.
    pub reading: MeasureReading,
    /// Card metrics.
    pub style: CardStyle,
}

/// A laid-out text line: content, font size and metrics.
struct Line {
    text: String,
    font_size: f64,
    metrics: TextMetrics,
}

impl CardSpec {
    /// Creates a card with the default style.
    pub fn new(title: impl Into<String>, reading: MeasureReading) -> Self {
        Self {
            title: title.into(),
            reading,
            style: CardStyle::default(),
        }
    }

    /// Creates a card for a registry entry.
    pub fn from_named(named: &NamedReading) -> Self {
        Self::new(&*named.name, named.reading)
    }

    /// Sets the card style.
    pub fn with_style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }

    /// The formatted value line.
    pub fn value_text(&self) -> String {
        format_si(self.reading.current)
    }

    /// The formatted range line.
    pub fn range_text(&self) -> String {
        format_range(self.reading.min, self.reading.max)
    }

    /// Returns the outer size the card wants.
    pub fn measure(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> Size {
        let lines = self.lines(theme, measurer);
        let insets = self.style.insets();
        let text_width = lines
            .iter()
            .map(|l| l.metrics.advance_width)
            .fold(0.0_f64, f64::max);
        let text_height: f64 = lines.iter().map(|l| l.metrics.line_height()).sum();
        Size {
            width: (text_width + insets.horizontal()).max(self.style.min_width),
            height: text_height + insets.vertical(),
        }
    }

    /// Emits the card marks placed within `rect`.
    ///
    /// Spare vertical space is spread around the three lines evenly.
    pub fn marks(&self, theme: &Theme, measurer: &dyn TextMeasurer, rect: Rect) -> Vec<Mark> {
        let lines = self.lines(theme, measurer);
        let inner = self.style.insets().apply(rect);
        let x = inner.center().x;

        let used: f64 = lines.iter().map(|l| l.metrics.line_height()).sum();
        let around = (inner.height() - used).max(0.0) / lines.len() as f64;

        let mut out = Vec::with_capacity(lines.len() + 1);
        out.push(Mark::rect(
            RectMark::new(rect)
                .with_radius(theme.radius)
                .with_fill(theme.shaded_background),
        ));

        let mut y = inner.y0;
        for (i, line) in lines.into_iter().enumerate() {
            let h = line.metrics.line_height();
            let center = y + 0.5 * around + 0.5 * h;
            y += around + h;
            let fill = if i == 0 { theme.secondary } else { theme.primary };
            out.push(Mark::text(
                TextMark::new(Point::new(x, center), line.text)
                    .with_font_size(line.font_size)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .with_fill(fill),
            ));
        }
        out
    }

    fn lines(&self, theme: &Theme, measurer: &dyn TextMeasurer) -> [Line; 3] {
        let value_size = theme.text_size * self.style.value_scale;
        [
            (self.title.clone(), theme.text_size),
            (self.value_text(), value_size),
            (self.range_text(), theme.text_size),
        ]
        .map(|(text, font_size)| Line {
            metrics: measurer.measure(&text, font_size),
            text,
            font_size,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use peniko::Brush;
    use simscope_core::MarkPayload;

    use super::*;
    use crate::HeuristicTextMeasurer;

    fn reading(current: f64, min: f64, max: f64) -> MeasureReading {
        MeasureReading { current, min, max }
    }

    fn texts(marks: &[Mark]) -> Vec<(&str, f64, Point)> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some((t.text.as_str(), t.font_size, t.pos)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn measure_sums_lines_and_respects_min_width() {
        let theme = Theme::default();
        let card = CardSpec::new("Mean x", reading(1234.0, -1500.0, 2.0));
        let size = card.measure(&theme, &HeuristicTextMeasurer);
        // 16 + 56 + 16 line heights plus 2 * 10 padding.
        assert!((size.height - 108.0).abs() < 1e-9, "{size:?}");
        // The range line "(-1.5k  —  2.0)" is 15 chars at 9.6 px, narrower than the minimum.
        assert_eq!(size.width, 220.0);

        let wide = card
            .clone()
            .with_style(CardStyle {
                min_width: 0.0,
                ..CardStyle::default()
            })
            .measure(&theme, &HeuristicTextMeasurer);
        assert!((wide.width - (144.0 + 28.0)).abs() < 1e-9, "{wide:?}");
    }

    #[test]
    fn marks_are_background_then_centered_lines() {
        let theme = Theme::default();
        let card = CardSpec::new("Step distance", reading(0.5, 0.25, 3_400_000.0));
        let rect = Rect::new(20.0, 20.0, 260.0, 148.0);
        let marks = card.marks(&theme, &HeuristicTextMeasurer, rect);
        assert_eq!(marks.len(), 4);

        match &marks[0].payload {
            MarkPayload::Rect(r) => {
                assert_eq!(r.rect, rect);
                assert_eq!(r.radius, theme.radius);
            }
            other => panic!("expected background rect, got {other:?}"),
        }

        let lines = texts(&marks);
        let contents: Vec<&str> = lines.iter().map(|l| l.0).collect();
        assert_eq!(contents, vec!["Step distance", "500.0m", "(250.0m  —  3.4M)"]);
        assert_eq!(lines[1].1, 56.0, "value uses 3.5x the text size");
        for (_, _, pos) in &lines {
            assert_eq!(pos.x, 140.0, "centered horizontally");
        }
        assert!(lines[0].2.y < lines[1].2.y && lines[1].2.y < lines[2].2.y);

        // 128 px tall card, 108 px used: 20 px spread as 20/3 around each line.
        let around = 20.0 / 3.0;
        assert!((lines[0].2.y - (30.0 + 0.5 * around + 8.0)).abs() < 1e-9);
    }

    #[test]
    fn title_uses_secondary_color() {
        let theme = Theme::default();
        let marks = CardSpec::new("No reset", reading(3.0, 0.0, 3.0)).marks(
            &theme,
            &HeuristicTextMeasurer,
            Rect::new(0.0, 0.0, 220.0, 108.0),
        );
        let fills: Vec<_> = marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.fill.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(fills[0], Brush::from(theme.secondary));
        assert_eq!(fills[1], Brush::from(theme.primary));
        assert_eq!(fills[2], Brush::from(theme.primary));
    }
}
