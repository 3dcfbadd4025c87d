// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer-agnostic drawing vocabulary.
//!
//! Layout code turns a frame snapshot into a flat list of [`Mark`]s; a renderer sorts them by
//! `z_index` (stable, so emission order breaks ties) and paints each payload. Text is carried
//! unshaped: measuring and glyph layout belong to the renderer's text stack.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{BezPath, Point, Rect, RoundedRect, Shape};
use peniko::Brush;

use crate::z_order;

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start of the text.
    #[default]
    Start,
    /// Anchor at the horizontal center.
    Middle,
    /// Anchor at the end of the text.
    End,
}

/// Vertical text reference line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The alphabetic baseline.
    Alphabetic,
    /// The top of the line box.
    Top,
    /// The vertical middle of the line box.
    #[default]
    Middle,
}

/// A filled, optionally rounded, axis-aligned rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle geometry.
    pub rect: Rect,
    /// Corner radius; `0.0` for square corners.
    pub radius: f64,
    /// Fill paint.
    pub fill: Brush,
}

impl RectMark {
    /// Creates a square-cornered rectangle with the default brush.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            radius: 0.0,
            fill: Brush::default(),
        }
    }

    /// Sets the corner radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// The rectangle as a rounded-rect shape.
    pub fn shape(&self) -> RoundedRect {
        RoundedRect::from_rect(self.rect, self.radius)
    }
}

/// A filled path. Paths are expected to be closed.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Path geometry.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
}

impl PathMark {
    /// Creates a path mark with the default brush.
    pub fn new(path: BezPath) -> Self {
        Self {
            path,
            fill: Brush::default(),
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

impl TextMark {
    /// Creates a text mark with default styling.
    pub fn new(pos: Point, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
            font_size: 12.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
        }
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the vertical baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }
}

/// Marks painted together, optionally clipped to a rounded rectangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroupMark {
    /// Clip shape applied to every child.
    pub clip: Option<RoundedRect>,
    /// Children, painted in order.
    pub children: Vec<Mark>,
}

/// What a mark draws.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A filled (rounded) rectangle.
    Rect(RectMark),
    /// A filled path.
    Path(PathMark),
    /// A text label.
    Text(TextMark),
    /// A clipped group of marks.
    Group(GroupMark),
}

impl MarkPayload {
    /// Geometric bounds, when they can be known without shaping text.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
            Self::Group(g) => {
                if let Some(clip) = g.clip {
                    return Some(clip.rect());
                }
                g.children
                    .iter()
                    .filter_map(|m| m.payload.bounds())
                    .reduce(|a, b| a.union(b))
            }
        }
    }
}

/// A payload plus its paint order.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Paint order; lower values are painted first.
    pub z_index: i32,
    /// What to draw.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark with an explicit z-index.
    pub fn new(z_index: i32, payload: impl Into<MarkPayload>) -> Self {
        Self {
            z_index,
            payload: payload.into(),
        }
    }

    /// A rectangle mark at [`z_order::PANELS`].
    pub fn rect(rect: RectMark) -> Self {
        Self::new(z_order::PANELS, rect)
    }

    /// A path mark at [`z_order::SHAPES`].
    pub fn path(path: PathMark) -> Self {
        Self::new(z_order::SHAPES, path)
    }

    /// A text mark at [`z_order::TEXT`].
    pub fn text(text: TextMark) -> Self {
        Self::new(z_order::TEXT, text)
    }

    /// A group mark at [`z_order::SHAPES`].
    pub fn group(group: GroupMark) -> Self {
        Self::new(z_order::SHAPES, group)
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

impl From<RectMark> for MarkPayload {
    fn from(value: RectMark) -> Self {
        Self::Rect(value)
    }
}

impl From<PathMark> for MarkPayload {
    fn from(value: PathMark) -> Self {
        Self::Path(value)
    }
}

impl From<TextMark> for MarkPayload {
    fn from(value: TextMark) -> Self {
        Self::Text(value)
    }
}

impl From<GroupMark> for MarkPayload {
    fn from(value: GroupMark) -> Self {
        Self::Group(value)
    }
}

/// Sorts marks into paint order, keeping emission order among equal z-indexes.
pub fn sort_for_paint(marks: &mut [Mark]) {
    marks.sort_by_key(|m| m.z_index);
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn group_bounds_prefer_clip() {
        let clip = RoundedRect::new(0.0, 0.0, 10.0, 10.0, 2.0);
        let child = Mark::rect(RectMark::new(Rect::new(-5.0, -5.0, 50.0, 50.0)));
        let group = MarkPayload::Group(GroupMark {
            clip: Some(clip),
            children: vec![child.clone()],
        });
        assert_eq!(group.bounds(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));

        let unclipped = MarkPayload::Group(GroupMark {
            clip: None,
            children: vec![child, Mark::text(TextMark::new(Point::ZERO, "t"))],
        });
        assert_eq!(unclipped.bounds(), Some(Rect::new(-5.0, -5.0, 50.0, 50.0)));
    }

    #[test]
    fn paint_sort_is_stable() {
        let mut marks = vec![
            Mark::text(TextMark::new(Point::ZERO, "a")),
            Mark::rect(RectMark::new(Rect::ZERO)),
            Mark::text(TextMark::new(Point::ZERO, "b")),
        ];
        sort_for_paint(&mut marks);
        assert!(matches!(marks[0].payload, MarkPayload::Rect(_)));
        let texts: Vec<&str> = marks[1..]
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["a", "b"], "equal z keeps emission order");
    }
}
