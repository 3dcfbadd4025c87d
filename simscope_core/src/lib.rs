// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data model for a live 2D simulation debug overlay.
//!
//! This crate holds everything about the overlay that is pure data or pure math:
//! - **Measures** track a named scalar series as `(current, min, max)`.
//! - **Shape sets** are triangulated polygons in simulation coordinates.
//! - **Projection** fits a simulation-space bounds rectangle into a viewport.
//! - **Marks** are a tiny renderer-agnostic drawing vocabulary (rounded rects, filled paths,
//!   unshaped text, clipped groups) that layout code emits and renderers consume.
//!
//! Synchronization lives in `simscope_display`; windowing and rendering live downstream.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
mod float;
mod format;
mod mark;
mod measure;
mod project;
mod registry;
mod shapes;
mod snapshot;
pub mod z_order;

pub use format::{format_range, format_si};
pub use mark::{
    GroupMark, Mark, MarkPayload, PathMark, RectMark, TextAnchor, TextBaseline, TextMark,
    sort_for_paint,
};
pub use measure::{Measure, MeasureReading};
pub use project::{Projection, project};
pub use registry::{MeasureRegistry, NamedReading, Recorded};
pub use shapes::{ShapeCopy, ShapeSet, Triangle};
pub use snapshot::FrameSnapshot;
