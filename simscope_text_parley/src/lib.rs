// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement.
//!
//! This crate implements [`simscope_layout::TextMeasurer`] using Parley, so measure cards are
//! sized from shaped text rather than a per-glyph estimate.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::String;
use core::cell::RefCell;

use parley::style::{FontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, Layout, LayoutContext};
use simscope_layout::{TextMeasurer, TextMetrics};

/// A [`TextMeasurer`] backed by Parley.
///
/// Measures a single line; anything after the first `\n` is ignored.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<()>>,
    family: Option<String>,
    display_scale: f32,
    quantize: bool,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("family", &self.family)
            .field("display_scale", &self.display_scale)
            .field("quantize", &self.quantize)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a measurer using the system sans-serif family.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
            family: None,
            display_scale: 1.0,
            quantize: true,
        }
    }

    /// Prefers a named font family, falling back to sans-serif when it is missing.
    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    /// Sets the display scale passed to Parley.
    ///
    /// This is typically a device pixel ratio. Measurements are scaled back into logical
    /// coordinates.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    /// Sets whether Parley should quantize layout coordinates to pixel boundaries.
    #[must_use]
    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    /// The named family set with [`Self::with_family`], if any.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    /// The display scale layouts are built at, clamped away from zero.
    pub fn display_scale(&self) -> f32 {
        self.display_scale.max(1.0e-6)
    }

    /// Shapes the first line of `text` into a Parley layout.
    ///
    /// Coordinates are in display-scale units; divide by [`Self::display_scale`] for logical
    /// ones. Returns `None` when there is nothing to shape.
    pub fn layout_line(&self, text: &str, font_size: f64) -> Option<Layout<()>> {
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return None;
        }

        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder =
            layout_cx.ranged_builder(&mut font_cx, text, self.display_scale(), self.quantize);
        builder.push_default(StyleProperty::FontSize(font_size_f32(font_size)));
        builder.push_default(StyleProperty::FontStack(self.font_stack()));

        let mut layout: Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());
        Some(layout)
    }

    fn font_stack(&self) -> FontStack<'_> {
        match &self.family {
            Some(name) => FontStack::List(Cow::Owned(alloc::vec![
                FontFamily::Named(Cow::Borrowed(name.as_str())),
                FontFamily::Generic(GenericFamily::SansSerif),
            ])),
            None => FontStack::from(FontFamily::Generic(GenericFamily::SansSerif)),
        }
    }
}

/// Font sizes arrive as `f64`; Parley wants a finite, non-negative `f32`.
fn font_size_f32(font_size: f64) -> f32 {
    if !font_size.is_finite() {
        return 0.0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "clamped into f32 range first"
    )]
    {
        font_size.clamp(0.0, f64::from(f32::MAX)) as f32
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> TextMetrics {
        let Some(layout) = self.layout_line(text, font_size) else {
            return TextMetrics::default();
        };
        let Some(line) = layout.lines().next() else {
            return TextMetrics::default();
        };

        let m = line.metrics();
        let scale = f64::from(self.display_scale());
        TextMetrics {
            advance_width: f64::from(m.advance) / scale,
            ascent: f64::from(m.ascent) / scale,
            descent: f64::from(m.descent) / scale,
            leading: f64::from(m.leading) / scale,
        }
    }
}
