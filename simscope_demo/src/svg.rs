// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG dump of a composed frame.

use kurbo::{Rect, RoundedRect};
use peniko::Brush;
use simscope_core::{Mark, MarkPayload, TextAnchor, TextBaseline};
use simscope_layout::Frame;

/// Renders `frame` as a standalone SVG document sized to the frame's view.
pub(crate) fn frame_to_svg(frame: &Frame) -> String {
    let view_box = frame.layout.view;
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    out.push_str(&format!(
        r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    ));
    out.push('\n');

    let mut clips = 0_usize;
    write_marks(&mut out, &frame.marks, &mut clips);

    out.push_str("</svg>\n");
    out
}

fn write_marks(out: &mut String, marks: &[Mark], clips: &mut usize) {
    for mark in marks {
        match &mark.payload {
            MarkPayload::Rect(r) => {
                write_rect(out, r.rect, r.radius);
                write_paint_attr(out, "fill", &r.fill);
                out.push_str("/>\n");
            }
            MarkPayload::Path(p) => {
                let d = p.path.to_svg();
                out.push_str(&format!(r#"<path d="{d}""#));
                write_paint_attr(out, "fill", &p.fill);
                out.push_str("/>\n");
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Top => "text-before-edge",
                };
                out.push_str(&format!(
                    r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                ));
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
            }
            MarkPayload::Group(g) => match g.clip {
                Some(clip) => {
                    *clips += 1;
                    let id = format!("clip{clips}");
                    write_clip_path(out, &id, clip);
                    out.push_str(&format!("<g clip-path=\"url(#{id})\">\n"));
                    write_marks(out, &g.children, clips);
                    out.push_str("</g>\n");
                }
                None => {
                    out.push_str("<g>\n");
                    write_marks(out, &g.children, clips);
                    out.push_str("</g>\n");
                }
            },
        }
    }
}

fn write_rect(out: &mut String, rect: Rect, radius: f64) {
    out.push_str(&format!(
        r#"<rect x="{}" y="{}" width="{}" height="{}""#,
        rect.x0,
        rect.y0,
        rect.width(),
        rect.height(),
    ));
    if radius > 0.0 {
        out.push_str(&format!(r#" rx="{radius}""#));
    }
}

fn write_clip_path(out: &mut String, id: &str, clip: RoundedRect) {
    out.push_str(&format!("<clipPath id=\"{id}\">"));
    // Cards and panels use one radius for every corner.
    write_rect(out, clip.rect(), clip.radii().top_left);
    out.push_str("/></clipPath>\n");
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
