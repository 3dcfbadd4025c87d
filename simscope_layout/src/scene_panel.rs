// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene panel: a shaded rounded rectangle with the projected shapes clipped inside it.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Rect, RoundedRect};
use peniko::Brush;
use simscope_core::{GroupMark, Mark, PathMark, Projection, RectMark, ShapeSet};

use crate::theme::Theme;

/// Placement and paint for the scene panel.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePanelSpec {
    /// Panel rectangle in overlay coordinates.
    pub rect: Rect,
    /// Simulation-space region mapped onto the panel.
    pub bounds: Rect,
    /// Corner radius of the panel and its clip.
    pub radius: f64,
    /// Panel fill.
    pub background: Brush,
    /// Triangle fill.
    pub fill: Brush,
}

impl ScenePanelSpec {
    /// Creates a panel styled from `theme`.
    pub fn new(theme: &Theme, rect: Rect, bounds: Rect) -> Self {
        Self {
            rect,
            bounds,
            radius: theme.radius,
            background: theme.shaded_background.into(),
            fill: theme.secondary.into(),
        }
    }

    /// Sets the triangle fill.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// The bounds-to-panel projection, if both are non-degenerate.
    pub fn projection(&self) -> Option<Projection> {
        Projection::fit(self.bounds, self.rect)
    }

    /// Emits the panel background and, when the projection exists, one clipped group holding
    /// a path per drawable triangle.
    pub fn marks(&self, shapes: &ShapeSet) -> Vec<Mark> {
        let mut out = Vec::with_capacity(2);
        out.push(Mark::rect(
            RectMark::new(self.rect)
                .with_radius(self.radius)
                .with_fill(self.background.clone()),
        ));

        let Some(projection) = self.projection() else {
            return out;
        };
        let children: Vec<Mark> = projection
            .project(shapes)
            .into_iter()
            .map(|path| Mark::path(PathMark::new(path).with_fill(self.fill.clone())))
            .collect();
        if !children.is_empty() {
            out.push(Mark::group(GroupMark {
                clip: Some(RoundedRect::from_rect(self.rect, self.radius)),
                children,
            }));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use kurbo::Point;
    use simscope_core::MarkPayload;

    use super::*;

    fn unit_shapes() -> ShapeSet {
        let tri = [Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        ShapeSet::from_polygons(&[vec![tri, tri], vec![tri]])
    }

    #[test]
    fn emits_background_and_clipped_group() {
        let theme = Theme::default();
        let rect = Rect::new(300.0, 20.0, 500.0, 220.0);
        let panel = ScenePanelSpec::new(&theme, rect, Rect::new(-20.0, -20.0, 20.0, 20.0));
        let marks = panel.marks(&unit_shapes());
        assert_eq!(marks.len(), 2);
        assert!(matches!(marks[0].payload, MarkPayload::Rect(_)));
        match &marks[1].payload {
            MarkPayload::Group(g) => {
                assert_eq!(g.clip.map(|c| c.rect()), Some(rect));
                assert_eq!(g.children.len(), 3, "one path per triangle");
                let accent = Brush::from(theme.secondary);
                for child in &g.children {
                    match &child.payload {
                        MarkPayload::Path(p) => assert_eq!(p.fill, accent),
                        other => panic!("expected path, got {other:?}"),
                    }
                }
            }
            other => panic!("expected group, got {other:?}"),
        }
        assert!(marks[0].z_index < marks[1].z_index, "shapes over the panel");
    }

    #[test]
    fn degenerate_bounds_draw_background_only() {
        let theme = Theme::default();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        for bounds in [Rect::ZERO, Rect::new(0.0, 0.0, 10.0, 0.0)] {
            let marks = ScenePanelSpec::new(&theme, rect, bounds).marks(&unit_shapes());
            assert_eq!(marks.len(), 1, "{bounds:?}");
        }
        let empty = ScenePanelSpec::new(&theme, rect, Rect::new(0.0, 0.0, 1.0, 1.0))
            .marks(&ShapeSet::default());
        assert_eq!(empty.len(), 1, "no group without shapes");
    }
}
