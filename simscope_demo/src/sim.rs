// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dummy simulation: unit circles random-walking inside fixed bounds.

use std::f64::consts::TAU;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use kurbo::{Point, Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simscope_core::Triangle;
use simscope_display::DisplayState;

/// The region circles walk in; leaving it resets a circle to the center.
pub(crate) const BOUNDS: Rect = Rect::new(-20.0, -20.0, 20.0, 20.0);

const MAX_STEP: f64 = 0.02;
const MAX_TURN: f64 = 0.1;

pub(crate) const MEAN_X: &str = "Mean x";
pub(crate) const MEAN_Y: &str = "Mean y";
pub(crate) const RESETS: &str = "No reset";
pub(crate) const STEP_DISTANCE: &str = "Step distance";

/// Aggregates of one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct StepStats {
    pub(crate) mean_x: f64,
    pub(crate) mean_y: f64,
    pub(crate) resets: u32,
    pub(crate) distance: f64,
}

/// `count` unit circles at the origin, each a fan of `res` triangles whose first vertex is
/// the center.
pub(crate) fn make_circles(count: usize, res: usize) -> Vec<Vec<Triangle>> {
    let outline: Vec<Triangle> = (0..res)
        .map(|i| {
            let a1 = TAU * i as f64 / res as f64;
            let a2 = TAU * (i + 1) as f64 / res as f64;
            [
                Point::ZERO,
                Point::new(a1.cos(), a1.sin()),
                Point::new(a2.cos(), a2.sin()),
            ]
        })
        .collect();
    vec![outline; count]
}

fn out_of_bounds(p: Point) -> bool {
    p.x < BOUNDS.x0 || p.x > BOUNDS.x1 || p.y < BOUNDS.y0 || p.y > BOUNDS.y1
}

/// Random-walk state; deterministic for a given seed.
#[derive(Debug)]
pub(crate) struct RandomWalk {
    rng: StdRng,
    shapes: Vec<Vec<Triangle>>,
    headings: Vec<f64>,
}

impl RandomWalk {
    pub(crate) fn new(count: usize, res: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let headings = (0..count).map(|_| rng.gen_range(0.0..TAU)).collect();
        Self {
            rng,
            shapes: make_circles(count, res),
            headings,
        }
    }

    pub(crate) fn shapes(&self) -> &[Vec<Triangle>] {
        &self.shapes
    }

    /// Moves every circle one step and returns the tick's aggregates.
    ///
    /// A circle whose center is outside [`BOUNDS`] before the step is moved back so that its
    /// center lands on the origin plus the step.
    pub(crate) fn step(&mut self) -> StepStats {
        let mut sum = Vec2::ZERO;
        let mut stats = StepStats::default();

        for (polygon, heading) in self.shapes.iter_mut().zip(&mut self.headings) {
            let step = self.rng.gen_range(0.0..MAX_STEP);
            *heading += self.rng.gen_range(-0.5..0.5) * MAX_TURN;
            stats.distance += step;

            let Some(center) = polygon.first().map(|tri| tri[0]) else {
                continue;
            };
            let mut shift = Vec2::from_angle(*heading) * step;
            if out_of_bounds(center) {
                shift -= center.to_vec2();
                stats.resets += 1;
            }
            for tri in polygon.iter_mut() {
                for p in tri.iter_mut() {
                    *p += shift;
                }
            }
            sum += (center + shift).to_vec2();
        }

        if !self.shapes.is_empty() {
            let n = self.shapes.len() as f64;
            stats.mean_x = sum.x / n;
            stats.mean_y = sum.y / n;
        }
        stats
    }

    /// Publishes the current shapes and `stats` as one update.
    pub(crate) fn publish(&self, state: &DisplayState, stats: &StepStats) {
        state.batch(|tx| {
            tx.set_shapes(&self.shapes);
            tx.set_measure(MEAN_X, stats.mean_x);
            tx.set_measure(MEAN_Y, stats.mean_y);
            tx.set_measure(RESETS, f64::from(stats.resets));
            tx.set_measure(STEP_DISTANCE, stats.distance);
        });
    }

    #[cfg(test)]
    fn shapes_mut(&mut self) -> &mut [Vec<Triangle>] {
        &mut self.shapes
    }
}

/// Steps `walk` at `rate` ticks per second on a new thread until `stop` is set.
///
/// The thread returns the number of ticks it ran. Ticks that overrun their period are not
/// made up.
pub(crate) fn spawn_producer(
    state: Arc<DisplayState>,
    mut walk: RandomWalk,
    rate: u32,
    stop: Arc<AtomicBool>,
) -> io::Result<JoinHandle<u64>> {
    let period = Duration::from_secs(1) / rate.max(1);
    thread::Builder::new()
        .name(String::from("simulation"))
        .spawn(move || {
            let mut ticks = 0_u64;
            let mut next = Instant::now();
            while !stop.load(Ordering::Acquire) {
                let stats = walk.step();
                walk.publish(&state, &stats);
                ticks += 1;

                next += period;
                let now = Instant::now();
                if next > now {
                    thread::sleep(next - now);
                } else {
                    next = now;
                }
            }
            ticks
        })
}
