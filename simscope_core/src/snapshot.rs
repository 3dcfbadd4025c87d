// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The state one rendered frame is drawn from.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Rect;

use crate::registry::NamedReading;
use crate::shapes::ShapeSet;

/// A self-consistent copy of everything a frame needs.
///
/// Every field was read in the same critical section, so shapes are never paired with bounds
/// (or measures) from a different update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    /// Measure readings in registration order.
    pub measures: Vec<NamedReading>,
    /// The shape set in simulation coordinates.
    pub shapes: ShapeSet,
    /// The simulation-space region to show.
    pub bounds: Rect,
    /// Change counter of the state this snapshot was taken from.
    pub generation: u64,
}

impl FrameSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
