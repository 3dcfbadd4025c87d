// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny measure/arrange helper: insets and a one-axis flex.
//!
//! Rigid children take their measured extent along the main axis; flexed children share what
//! is left in proportion to their weights. Every child spans the full cross axis. Children
//! are placed from the start of the main axis; rigid children that overflow are not
//! shrunk, so they may extend past the container.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

/// A width/height pair used by overlay layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in logical pixels.
    pub width: f64,
    /// Height in logical pixels.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The rectangle of this size anchored at the origin.
    pub fn to_rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0))
    }
}

/// Per-side insets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    /// Inset from the top edge.
    pub top: f64,
    /// Inset from the right edge.
    pub right: f64,
    /// Inset from the bottom edge.
    pub bottom: f64,
    /// Inset from the left edge.
    pub left: f64,
}

impl Insets {
    /// The same inset on every side.
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// `horizontal` on the left and right, `vertical` on the top and bottom.
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Shrinks `rect` by these insets.
    ///
    /// When the insets exceed an extent the result collapses to zero size at the midpoint of
    /// the remaining edges, never an inverted rectangle.
    pub fn apply(&self, rect: Rect) -> Rect {
        let rect = rect.abs();
        let (x0, x1) = shrink(rect.x0 + self.left, rect.x1 - self.right);
        let (y0, y1) = shrink(rect.y0 + self.top, rect.y1 - self.bottom);
        Rect::new(x0, y0, x1, y1)
    }

    /// Left plus right.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Top plus bottom.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

fn shrink(lo: f64, hi: f64) -> (f64, f64) {
    if lo <= hi {
        (lo, hi)
    } else {
        let mid = 0.5 * (lo + hi);
        (mid, mid)
    }
}

/// The main axis of a [`flex`] layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlexAxis {
    /// Children are laid out left to right.
    Horizontal,
    /// Children are laid out top to bottom.
    Vertical,
}

/// A child of a [`flex`] layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FlexChild {
    /// A fixed main-axis extent.
    Rigid(f64),
    /// A weight for sharing the space left after rigid children.
    Flexed(f64),
}

/// Splits `rect` along `axis` into one rectangle per child, in order.
pub fn flex(axis: FlexAxis, rect: Rect, children: &[FlexChild]) -> Vec<Rect> {
    let rect = rect.abs();
    let extent = match axis {
        FlexAxis::Horizontal => rect.width(),
        FlexAxis::Vertical => rect.height(),
    };

    let mut rigid = 0.0;
    let mut weights = 0.0;
    for child in children {
        match *child {
            FlexChild::Rigid(e) => rigid += e.max(0.0),
            FlexChild::Flexed(w) => weights += w.max(0.0),
        }
    }
    let spare = (extent - rigid).max(0.0);

    let mut cursor = match axis {
        FlexAxis::Horizontal => rect.x0,
        FlexAxis::Vertical => rect.y0,
    };
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        let e = match *child {
            FlexChild::Rigid(e) => e.max(0.0),
            FlexChild::Flexed(w) if weights > 0.0 => spare * w.max(0.0) / weights,
            FlexChild::Flexed(_) => 0.0,
        };
        out.push(match axis {
            FlexAxis::Horizontal => Rect::new(cursor, rect.y0, cursor + e, rect.y1),
            FlexAxis::Vertical => Rect::new(rect.x0, cursor, rect.x1, cursor + e),
        });
        cursor += e;
    }
    out
}
