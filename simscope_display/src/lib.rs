// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared display state for the Simscope overlay.
//!
//! [`DisplayState`] is the meeting point between producers (one or more simulation threads)
//! and the single frame loop that renders the overlay:
//! - producers call [`DisplayState::set_shapes`], [`DisplayState::set_bounds`] and
//!   [`DisplayState::set_measure`] at their own pace, or publish several updates at once with
//!   [`DisplayState::batch`];
//! - the frame loop calls [`DisplayState::snapshot_into`] once per frame.
//!
//! One mutex guards the whole aggregate (measures, shapes and bounds together), and a snapshot
//! is read in one critical section, so a frame never draws shapes against bounds from a
//! different update. Critical sections only copy memory; logging happens after
//! the lock is released.

use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use kurbo::Rect;
use simscope_core::{
    FrameSnapshot, MeasureReading, MeasureRegistry, Recorded, ShapeCopy, ShapeSet, Triangle,
};
use tracing::{debug, trace};

#[cfg(test)]
mod concurrency_tests;

#[derive(Debug, Default)]
struct Shared {
    measures: MeasureRegistry,
    shapes: ShapeSet,
    bounds: Rect,
    generation: u64,
    staging: Staging,
}

impl Shared {
    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Publishes what a finished transaction staged.
    fn commit(&mut self, staged: Staged) -> Committed {
        if staged.shapes.is_some() {
            mem::swap(&mut self.shapes, &mut self.staging.shapes);
        }
        if let Some(bounds) = staged.bounds {
            self.bounds = bounds;
        }
        let mut registered = 0;
        for (name, value) in &self.staging.measures[..staged.measures] {
            if let Recorded::Registered(_) = self.measures.record(name, *value) {
                registered += 1;
            }
        }
        self.generation = self.generation.wrapping_add(staged.mutations);
        Committed {
            registered,
            reallocated: staged.shapes == Some(ShapeCopy::Reallocated),
        }
    }
}

/// Scratch buffers a transaction writes into before commit.
///
/// After a commit `shapes` holds the previously published set, so steady-state batches
/// copy in place. Measure names reuse their string buffers.
#[derive(Debug, Default)]
struct Staging {
    shapes: ShapeSet,
    measures: Vec<(String, f64)>,
}

/// What a transaction staged, counted against [`Staging`].
#[derive(Debug, Default)]
struct Staged {
    shapes: Option<ShapeCopy>,
    bounds: Option<Rect>,
    measures: usize,
    mutations: u64,
}

#[derive(Debug)]
struct Committed {
    registered: usize,
    reallocated: bool,
}

/// The overlay's shared state: measures, shapes and bounds behind one lock.
///
/// Wrap it in an `Arc` to hand it to producer threads; every method takes `&self`.
#[derive(Debug, Default)]
pub struct DisplayState {
    shared: Mutex<Shared>,
}

impl DisplayState {
    /// Creates empty state: no measures, no shapes, zero bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the shape set with a copy of `shapes`.
    ///
    /// The caller's buffer is not retained, so it can be mutated and passed again next frame.
    /// When the polygon count is unchanged the stored buffers are reused.
    pub fn set_shapes<P: AsRef<[Triangle]>>(&self, shapes: &[P]) {
        let copy = {
            let mut shared = self.lock();
            let copy = shared.shapes.copy_from(shapes);
            shared.bump();
            copy
        };
        if copy == ShapeCopy::Reallocated {
            trace!(polygons = shapes.len(), "reallocated shape set");
        }
    }

    /// Replaces the simulation-space region shown in the scene.
    pub fn set_bounds(&self, bounds: Rect) {
        let mut shared = self.lock();
        shared.bounds = bounds;
        shared.bump();
    }

    /// Records `value` for the measure `name`, registering it on first use.
    ///
    /// New measures are appended to the end of the display order and keep that position.
    pub fn set_measure(&self, name: &str, value: f64) {
        let recorded = {
            let mut shared = self.lock();
            let recorded = shared.measures.record(name, value);
            shared.bump();
            recorded
        };
        if let Recorded::Registered(position) = recorded {
            debug!(name, position, "registered measure");
        }
    }

    /// Applies several updates in a single critical section.
    ///
    /// Updates are staged and published when `f` returns, so readers see either none or all
    /// of them. If `f` panics nothing is published.
    pub fn batch<R>(&self, f: impl FnOnce(&mut DisplayTransaction<'_>) -> R) -> R {
        let (out, committed) = {
            let mut guard = self.lock();
            let shared = &mut *guard;
            let mut tx = DisplayTransaction {
                staging: &mut shared.staging,
                staged: Staged::default(),
            };
            let out = f(&mut tx);
            let staged = tx.staged;
            (out, shared.commit(staged))
        };
        if committed.registered > 0 {
            debug!(registered = committed.registered, "registered measures in batch");
        }
        if committed.reallocated {
            trace!("reallocated shape set in batch");
        }
        out
    }

    /// Takes a consistent copy of the state for one frame.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut out = FrameSnapshot::new();
        self.snapshot_into(&mut out);
        out
    }

    /// Copies the state into `out`, reusing its allocations.
    ///
    /// This is what a frame loop should call every frame: in steady state (same polygon and
    /// measure counts) it does not allocate.
    pub fn snapshot_into(&self, out: &mut FrameSnapshot) {
        let shared = self.lock();
        shared.measures.readings_into(&mut out.measures);
        out.shapes.copy_from_set(&shared.shapes);
        out.bounds = shared.bounds;
        out.generation = shared.generation;
    }

    /// The change counter; it moves on every mutation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// The current reading of one measure.
    #[must_use]
    pub fn measure(&self, name: &str) -> Option<MeasureReading> {
        self.lock().measures.get(name).map(|m| m.reading())
    }

    /// The current bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.lock().bounds
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        // Poisoning is ignored: a panic inside `batch` happens before commit and only leaves
        // `Staging` dirty, which the next transaction overwrites.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Updates staged inside [`DisplayState::batch`].
#[derive(Debug)]
pub struct DisplayTransaction<'a> {
    staging: &'a mut Staging,
    staged: Staged,
}

impl DisplayTransaction<'_> {
    /// See [`DisplayState::set_shapes`]. A later call in the same batch replaces an earlier one.
    pub fn set_shapes<P: AsRef<[Triangle]>>(&mut self, shapes: &[P]) {
        let copy = self.staging.shapes.copy_from(shapes);
        if self.staged.shapes.is_none() || copy == ShapeCopy::Reallocated {
            self.staged.shapes = Some(copy);
        }
        self.staged.mutations += 1;
    }

    /// See [`DisplayState::set_bounds`].
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.staged.bounds = Some(bounds);
        self.staged.mutations += 1;
    }

    /// See [`DisplayState::set_measure`]. Measures are recorded in call order.
    pub fn set_measure(&mut self, name: &str, value: f64) {
        let slot = self.staged.measures;
        match self.staging.measures.get_mut(slot) {
            Some((staged_name, staged_value)) => {
                staged_name.clear();
                staged_name.push_str(name);
                *staged_value = value;
            }
            None => self.staging.measures.push((String::from(name), value)),
        }
        self.staged.measures += 1;
        self.staged.mutations += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{self, AssertUnwindSafe};

    use kurbo::Point;

    use super::*;

    fn tri(x: f64) -> Triangle {
        [Point::new(x, 0.0), Point::new(x + 1.0, 0.0), Point::new(x, 1.0)]
    }

    #[test]
    fn empty_state_snapshots_to_defaults() {
        let state = DisplayState::new();
        let snap = state.snapshot();
        assert!(snap.measures.is_empty());
        assert!(snap.shapes.is_empty());
        assert_eq!(snap.bounds, Rect::ZERO);
        assert_eq!(snap.generation, 0);
    }

    #[test]
    fn setters_are_visible_in_the_next_snapshot() {
        let state = DisplayState::new();
        state.set_bounds(Rect::new(-20.0, -20.0, 20.0, 20.0));
        state.set_measure("Mean x", 1.0);
        state.set_measure("Mean y", 2.0);
        state.set_measure("Mean x", -3.0);
        state.set_shapes(&[vec![tri(0.0), tri(1.0)]]);

        let snap = state.snapshot();
        assert_eq!(snap.bounds, Rect::new(-20.0, -20.0, 20.0, 20.0));
        let names: Vec<&str> = snap.measures.iter().map(|m| &*m.name).collect();
        assert_eq!(names, ["Mean x", "Mean y"], "registration order");
        assert_eq!(
            snap.measures[0].reading,
            MeasureReading {
                current: -3.0,
                min: -3.0,
                max: 1.0
            }
        );
        assert_eq!(snap.shapes.triangle_count(), 2);
        assert_eq!(snap.generation, 5, "one bump per mutation");
        assert_eq!(state.measure("Mean y").map(|r| r.current), Some(2.0));
        assert!(state.measure("missing").is_none());
    }

    #[test]
    fn caller_buffer_is_not_retained() {
        let state = DisplayState::new();
        let mut buffer = vec![vec![tri(0.0)], vec![tri(5.0)]];
        state.set_shapes(&buffer);
        buffer[0][0] = tri(99.0);
        buffer[1].clear();

        let snap = state.snapshot();
        assert_eq!(snap.shapes.polygons()[0][0], tri(0.0), "stored copy is independent");
        assert_eq!(snap.shapes.polygons()[1].len(), 1);

        state.set_shapes(&buffer);
        let snap = state.snapshot();
        assert_eq!(snap.shapes.polygons()[0][0], tri(99.0), "buffer reuse is picked up");
        assert!(snap.shapes.polygons()[1].is_empty());
    }

    #[test]
    fn snapshot_into_replaces_previous_contents() {
        let state = DisplayState::new();
        state.set_measure("a", 1.0);
        state.set_shapes(&[vec![tri(0.0)]]);

        let mut reused = state.snapshot();
        state.set_shapes(&[vec![tri(1.0)], vec![tri(2.0)]]);
        state.set_measure("b", 2.0);
        state.snapshot_into(&mut reused);
        assert_eq!(reused, state.snapshot(), "reused buffer matches a fresh snapshot");
    }

    #[test]
    fn batch_applies_all_updates_and_returns_value() {
        let state = DisplayState::new();
        let n = state.batch(|tx| {
            tx.set_bounds(Rect::new(0.0, 0.0, 3.0, 3.0));
            tx.set_shapes(&vec![vec![tri(0.0)]; 3]);
            tx.set_measure("count", 3.0);
            tx.set_measure("count", 4.0);
            7
        });
        assert_eq!(n, 7);
        let snap = state.snapshot();
        assert_eq!(snap.shapes.len(), 3);
        assert_eq!(snap.bounds.width(), 3.0);
        assert_eq!(snap.measures.len(), 1);
        assert_eq!(snap.measures[0].reading.current, 4.0);
        assert_eq!(state.generation(), 4);
    }

    #[test]
    fn panicking_batch_publishes_nothing() {
        let state = DisplayState::new();
        state.batch(|tx| {
            tx.set_shapes(&[vec![tri(0.0)]]);
            tx.set_bounds(Rect::new(0.0, 0.0, 1.0, 1.0));
            tx.set_measure("k", 1.0);
        });
        let before = state.snapshot();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            state.batch(|tx| {
                tx.set_shapes(&vec![vec![tri(1.0)]; 3]);
                tx.set_measure("k", 3.0);
                tx.set_measure("late", 1.0);
                panic!("simulation step failed");
            });
        }));
        assert!(outcome.is_err(), "the panic reaches the caller");
        assert_eq!(state.snapshot(), before, "no part of the aborted batch is visible");

        // Leftover staging from the aborted batch does not leak into the next one.
        state.batch(|tx| {
            tx.set_bounds(Rect::new(0.0, 0.0, 2.0, 2.0));
            tx.set_measure("k", 2.0);
        });
        let snap = state.snapshot();
        assert_eq!(snap.shapes, before.shapes, "shapes were not part of this batch");
        assert_eq!(snap.bounds.width(), 2.0);
        let names: Vec<&str> = snap.measures.iter().map(|m| &*m.name).collect();
        assert_eq!(names, ["k"], "the aborted registration never happened");
        assert_eq!(snap.measures[0].reading.max, 2.0, "3.0 was never recorded");
        assert_eq!(snap.generation, before.generation + 2);
    }

    #[test]
    fn batches_reuse_staging_and_keep_call_order() {
        let state = DisplayState::new();
        for round in 0..3 {
            let x = f64::from(round);
            state.batch(|tx| {
                tx.set_shapes(&[vec![tri(x)], vec![tri(x + 1.0)]]);
                tx.set_measure("b", x);
                tx.set_measure("a", x);
                tx.set_shapes(&[vec![tri(-x)]]);
            });
            let snap = state.snapshot();
            assert_eq!(snap.shapes.len(), 1, "the last set_shapes wins");
            assert_eq!(snap.shapes.polygons()[0][0], tri(-x));
            let names: Vec<&str> = snap.measures.iter().map(|m| &*m.name).collect();
            assert_eq!(names, ["b", "a"], "registration follows call order");
        }
        assert_eq!(state.generation(), 12);
    }
}
