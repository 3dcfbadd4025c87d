// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting marks into a Vello scene.

use kurbo::{Affine, Vec2};
use parley::PositionedLayoutItem;
use peniko::Brush;
use simscope_core::{Mark, MarkPayload, TextAnchor, TextBaseline, TextMark};
use simscope_layout::TextMetrics;
use simscope_text_parley::ParleyTextMeasurer;
use vello::peniko::{Fill, Mix};
use vello::{Glyph, Scene};

/// Paints `marks` in slice order; callers sort them for paint first.
///
/// Text is shaped with `text`, the same measurer the layout was sized with.
pub(crate) fn paint_marks(
    scene: &mut Scene,
    text: &ParleyTextMeasurer,
    marks: &[Mark],
    transform: Affine,
) {
    for mark in marks {
        match &mark.payload {
            MarkPayload::Rect(r) if !is_invisible(&r.fill) => {
                scene.fill(Fill::NonZero, transform, &r.fill, None, &r.shape());
            }
            MarkPayload::Path(p) if !is_invisible(&p.fill) => {
                scene.fill(Fill::NonZero, transform, &p.fill, None, &p.path);
            }
            MarkPayload::Text(t) if !is_invisible(&t.fill) => {
                paint_text(scene, text, t, transform);
            }
            MarkPayload::Group(g) if !g.children.is_empty() => {
                // A normal-blend layer clips its content to the layer shape.
                if let Some(clip) = &g.clip {
                    scene.push_layer(Mix::Normal, 1.0, transform, clip);
                }
                paint_marks(scene, text, &g.children, transform);
                if g.clip.is_some() {
                    scene.pop_layer();
                }
            }
            _ => {}
        }
    }
}

fn paint_text(scene: &mut Scene, text: &ParleyTextMeasurer, mark: &TextMark, transform: Affine) {
    let Some(layout) = text.layout_line(&mark.text, mark.font_size) else {
        return;
    };
    let Some(line) = layout.lines().next() else {
        return;
    };

    let scale = f64::from(text.display_scale());
    let m = line.metrics();
    let metrics = TextMetrics {
        advance_width: f64::from(m.advance) / scale,
        ascent: f64::from(m.ascent) / scale,
        descent: f64::from(m.descent) / scale,
        leading: f64::from(m.leading) / scale,
    };
    let origin = text_origin(mark, &metrics, f64::from(m.baseline) / scale);
    let transform = transform * Affine::translate(origin) * Affine::scale(1.0 / scale);

    for item in line.items() {
        let PositionedLayoutItem::GlyphRun(run) = item else {
            continue;
        };
        let glyphs = run.positioned_glyphs().map(|g| Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        scene
            .draw_glyphs(run.run().font())
            .transform(transform)
            .font_size(run.run().font_size())
            .brush(&mark.fill)
            .draw(Fill::NonZero, glyphs);
    }
}

/// Where the layout's top-left goes so that `mark.pos` lands on the requested anchor.
///
/// `baseline` is the distance from the layout top to the first baseline.
fn text_origin(mark: &TextMark, metrics: &TextMetrics, baseline: f64) -> Vec2 {
    let dx = match mark.anchor {
        TextAnchor::Start => 0.0,
        TextAnchor::Middle => 0.5 * metrics.advance_width,
        TextAnchor::End => metrics.advance_width,
    };
    let top = baseline - metrics.ascent;
    let dy = match mark.baseline {
        TextBaseline::Alphabetic => baseline,
        TextBaseline::Top => top,
        TextBaseline::Middle => top + 0.5 * metrics.line_height(),
    };
    Vec2::new(mark.pos.x - dx, mark.pos.y - dy)
}

fn is_invisible(brush: &Brush) -> bool {
    matches!(brush, Brush::Solid(c) if c.components[3] <= 0.0)
}
