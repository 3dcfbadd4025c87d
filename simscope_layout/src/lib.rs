// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation layer of the Simscope overlay, expressed as [`simscope_core::Mark`]s.
//!
//! - [`Theme`] holds the grayscale palette and spacing.
//! - [`CardSpec`] lays out one measure card: title, SI-formatted value and observed range.
//! - [`ScenePanelSpec`] draws the shaded scene panel and the projected triangles.
//! - [`FrameComposer`] arranges a whole frame: card column on the left, scene filling the rest.
//!
//! Text shaping is out of scope; layout only needs line metrics, supplied through
//! [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod card;
mod frame;
mod layout;
mod measure;
mod scene_panel;
mod theme;

pub use card::{CardSpec, CardStyle};
pub use frame::{Frame, FrameComposer, FrameLayout};
pub use layout::{FlexAxis, FlexChild, Insets, Size, flex};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics};
pub use scene_panel::ScenePanelSpec;
pub use theme::Theme;
