// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting simulation-space geometry into a viewport.
//!
//! The projection is a uniform scale about the bounds' center followed by a translation onto
//! the viewport's center, so the whole bounds rectangle fits without distortion and the
//! spare axis is letterboxed. The y axis is not flipped: simulation `+y` maps to screen `+y`.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Affine, BezPath, Point, Rect};

use crate::shapes::{ShapeSet, Triangle};

/// A bounds-to-viewport mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    scale: f64,
    source_center: Point,
    target_center: Point,
}

impl Projection {
    /// Fits `bounds` into `viewport`.
    ///
    /// Returns `None` when either rectangle has a zero, negative or non-finite extent, since
    /// no finite scale exists for it. Callers skip drawing geometry in that case.
    pub fn fit(bounds: Rect, viewport: Rect) -> Option<Self> {
        let extents = [
            bounds.width(),
            bounds.height(),
            viewport.width(),
            viewport.height(),
        ];
        if !extents.iter().all(|&e| is_positive_finite(e)) {
            return None;
        }
        let scale = (viewport.height() / bounds.height()).min(viewport.width() / bounds.width());
        if !is_positive_finite(scale) {
            return None;
        }
        let source_center = bounds.center();
        let target_center = viewport.center();
        if !source_center.is_finite() || !target_center.is_finite() {
            return None;
        }
        Some(Self {
            scale,
            source_center,
            target_center,
        })
    }

    /// The uniform scale factor (viewport units per simulation unit).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps a simulation-space point into the viewport.
    pub fn apply(&self, p: Point) -> Point {
        self.target_center + (p - self.source_center) * self.scale
    }

    /// The projection as an affine transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.target_center.to_vec2())
            * Affine::scale(self.scale)
            * Affine::translate(-self.source_center.to_vec2())
    }

    /// A closed path for one projected triangle.
    ///
    /// Returns `None` if any projected vertex is not finite.
    pub fn triangle_path(&self, tri: &Triangle) -> Option<BezPath> {
        let [a, b, c] = tri.map(|p| self.apply(p));
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return None;
        }
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.close_path();
        Some(path)
    }

    /// One closed path per drawable triangle, in shape-set order.
    pub fn project(&self, shapes: &ShapeSet) -> Vec<BezPath> {
        shapes
            .iter_triangles()
            .filter_map(|tri| self.triangle_path(tri))
            .collect()
    }
}

/// Projects every triangle of `shapes` from `bounds` into `viewport`.
///
/// Degenerate bounds or viewports produce no paths.
pub fn project(shapes: &ShapeSet, bounds: Rect, viewport: Rect) -> Vec<BezPath> {
    Projection::fit(bounds, viewport).map_or_else(Vec::new, |p| p.project(shapes))
}

fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
