// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-frame composition.
//!
//! The frame is a horizontal flex: a rigid card column on the left, then the scene panel
//! taking the rest. The column keeps one spacing on each side of the cards and one spacing
//! above every card; the scene panel is inset by one spacing on every side.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;
use simscope_core::{FrameSnapshot, Mark, RectMark, sort_for_paint, z_order};

use crate::card::{CardSpec, CardStyle};
use crate::layout::{FlexAxis, FlexChild, Insets, Size, flex};
use crate::measure::TextMeasurer;
use crate::scene_panel::ScenePanelSpec;
use crate::theme::Theme;

/// Output of the arrange pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameLayout {
    /// The whole overlay.
    pub view: Rect,
    /// The card column, including its side spacing.
    pub column: Rect,
    /// One rectangle per measure card, in registration order.
    pub cards: Vec<Rect>,
    /// The scene panel.
    pub scene: Rect,
}

/// A composed frame: its layout plus marks in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// Where everything went.
    pub layout: FrameLayout,
    /// Marks sorted for painting.
    pub marks: Vec<Mark>,
}

/// Composes overlay frames from snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameComposer {
    /// Colors and spacing.
    pub theme: Theme,
    /// Card metrics.
    pub card_style: CardStyle,
}

impl FrameComposer {
    /// Creates a composer with the default card style.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            card_style: CardStyle::default(),
        }
    }

    /// Sets the card style.
    pub fn with_card_style(mut self, card_style: CardStyle) -> Self {
        self.card_style = card_style;
        self
    }

    /// One card per measure, in registration order.
    pub fn cards(&self, snapshot: &FrameSnapshot) -> Vec<CardSpec> {
        snapshot
            .measures
            .iter()
            .map(|m| CardSpec::from_named(m).with_style(self.card_style))
            .collect()
    }

    /// Places the card column, every card and the scene panel within `size`.
    pub fn arrange(
        &self,
        cards: &[CardSpec],
        size: Size,
        measurer: &dyn TextMeasurer,
    ) -> FrameLayout {
        let spacing = self.theme.spacing.max(0.0);
        let view = size.to_rect();

        let sizes: Vec<Size> = cards
            .iter()
            .map(|c| c.measure(&self.theme, measurer))
            .collect();
        let card_width = sizes.iter().map(|s| s.width).fold(0.0_f64, f64::max);

        let row = flex(
            FlexAxis::Horizontal,
            view,
            &[
                FlexChild::Rigid(card_width + 2.0 * spacing),
                FlexChild::Flexed(1.0),
            ],
        );
        let (column, rest) = (row[0], row[1]);

        let stack: Vec<FlexChild> = sizes
            .iter()
            .map(|s| FlexChild::Rigid(spacing + s.height))
            .collect();
        let column_inner = Insets::symmetric(spacing, 0.0).apply(column);
        let card_rects = flex(FlexAxis::Vertical, column_inner, &stack)
            .into_iter()
            .map(|slot| {
                Insets {
                    top: spacing,
                    ..Insets::default()
                }
                .apply(slot)
            })
            .collect();

        FrameLayout {
            view,
            column,
            cards: card_rects,
            scene: Insets::uniform(spacing).apply(rest),
        }
    }

    /// Composes one frame of the overlay.
    pub fn compose(
        &self,
        snapshot: &FrameSnapshot,
        size: Size,
        measurer: &dyn TextMeasurer,
    ) -> Frame {
        let cards = self.cards(snapshot);
        let layout = self.arrange(&cards, size, measurer);

        let mut marks = Vec::new();
        marks.push(
            Mark::rect(RectMark::new(layout.view).with_fill(self.theme.background))
                .with_z_index(z_order::BACKGROUND),
        );
        for (card, rect) in cards.iter().zip(&layout.cards) {
            marks.extend(card.marks(&self.theme, measurer, *rect));
        }
        if layout.scene.width() > 0.0 && layout.scene.height() > 0.0 {
            let panel = ScenePanelSpec::new(&self.theme, layout.scene, snapshot.bounds);
            marks.extend(panel.marks(&snapshot.shapes));
        }
        sort_for_paint(&mut marks);

        Frame { layout, marks }
    }
}
