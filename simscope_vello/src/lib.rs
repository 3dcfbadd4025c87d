// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native Vello viewer for the Simscope overlay.
//!
//! [`Viewer`] owns the window and GPU resources and drives one frame per redraw:
//! snapshot the shared [`DisplayState`], compose marks with [`simscope_layout`], paint them
//! into a Vello scene and present it. Simulation threads only ever touch the
//! [`DisplayState`] handle returned by [`Viewer::state`].

mod error;
mod painter;
mod viewer;

pub use error::ViewerError;
pub use simscope_display::DisplayState;
pub use viewer::{RedrawPolicy, Viewer, ViewerOptions};
