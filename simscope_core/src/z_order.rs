// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for overlay marks.
//!
//! Renderers sort marks by `z_index` with a stable sort, so marks sharing a layer keep the
//! order they were emitted in.

/// Whole-window background fill.
pub const BACKGROUND: i32 = -100;
/// Shaded card and scene panels.
pub const PANELS: i32 = 0;
/// Projected simulation geometry.
pub const SHAPES: i32 = 10;
/// Card labels.
pub const TEXT: i32 = 20;
