// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay colors and metrics.

use peniko::Color;

/// Palette and spacing shared by every overlay element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    /// Foreground for values and scene-independent text.
    pub primary: Color,
    /// Muted foreground: card titles and scene shapes.
    pub secondary: Color,
    /// Window background.
    pub background: Color,
    /// Fill behind cards and the scene panel.
    pub shaded_background: Color,
    /// Corner radius of cards and the scene panel.
    pub radius: f64,
    /// Gap between cards, the column and the scene panel.
    pub spacing: f64,
    /// Base font size.
    pub text_size: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::from_rgb8(0xD4, 0xD4, 0xD4),
            secondary: Color::from_rgb8(0x59, 0x59, 0x59),
            background: Color::from_rgb8(0x00, 0x00, 0x00),
            shaded_background: Color::from_rgb8(0x0F, 0x0F, 0x0F),
            radius: 8.0,
            spacing: 20.0,
            text_size: 16.0,
        }
    }
}

impl Theme {
    /// Sets the primary color.
    pub fn with_primary(mut self, color: Color) -> Self {
        self.primary = color;
        self
    }

    /// Sets the secondary color.
    pub fn with_secondary(mut self, color: Color) -> Self {
        self.secondary = color;
        self
    }

    /// Sets the window background.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Sets the card and panel fill.
    pub fn with_shaded_background(mut self, color: Color) -> Self {
        self.shaded_background = color;
        self
    }

    /// Sets the corner radius. Negative values clamp to zero.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    /// Sets the spacing. Negative values clamp to zero.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing.max(0.0);
        self
    }

    /// Sets the base font size.
    pub fn with_text_size(mut self, text_size: f64) -> Self {
        self.text_size = text_size;
        self
    }
}
