// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use kurbo::{Point, Rect};
use simscope_core::{FrameSnapshot, Triangle};

use crate::DisplayState;

const PRODUCERS: usize = 4;
const READERS: usize = 3;
const ITERATIONS: usize = 1000;

fn tri(x: f64) -> Triangle {
    [Point::new(x, 0.0), Point::new(x + 1.0, 0.0), Point::new(x, 1.0)]
}

/// Shapes, bounds and the "k" measure all encode the same `k`.
fn frame_for(k: usize) -> (Vec<Vec<Triangle>>, Rect) {
    let shapes = (0..k)
        .map(|p| (0..k).map(|t| tri((p * k + t) as f64)).collect())
        .collect();
    let side = k as f64;
    (shapes, Rect::new(0.0, 0.0, side, side))
}

fn assert_consistent(snap: &FrameSnapshot) {
    let k = snap.shapes.len();
    assert_eq!(
        snap.bounds.width(),
        k as f64,
        "bounds from a different update than the shapes (generation {})",
        snap.generation
    );
    for polygon in snap.shapes.polygons() {
        assert_eq!(polygon.len(), k, "polygon from a different update");
    }
    match snap.measures.iter().find(|m| &*m.name == "k") {
        Some(m) => {
            assert_eq!(m.reading.current, k as f64, "measure from a different update");
        }
        None => assert_eq!(k, 0, "shapes published without their measure"),
    }
}

#[test]
fn batched_updates_are_never_observed_torn() {
    let state = DisplayState::new();
    let done = AtomicUsize::new(0);

    thread::scope(|s| {
        for producer in 0..PRODUCERS {
            let state = &state;
            let done = &done;
            s.spawn(move || {
                for i in 0..ITERATIONS {
                    let k = (producer * 31 + i) % 7 + 1;
                    let (shapes, bounds) = frame_for(k);
                    state.batch(|tx| {
                        tx.set_shapes(&shapes);
                        tx.set_bounds(bounds);
                        tx.set_measure("k", k as f64);
                    });
                }
                done.fetch_add(1, Ordering::Release);
            });
        }

        for _ in 0..READERS {
            let state = &state;
            let done = &done;
            s.spawn(move || {
                let mut snap = FrameSnapshot::new();
                let mut last_generation = 0;
                let mut frames = 0_usize;
                while done.load(Ordering::Acquire) < PRODUCERS || frames == 0 {
                    state.snapshot_into(&mut snap);
                    assert_consistent(&snap);
                    assert!(
                        snap.generation >= last_generation,
                        "generation went backwards: {} < {last_generation}",
                        snap.generation
                    );
                    last_generation = snap.generation;
                    frames += 1;
                }
            });
        }
    });

    let snap = state.snapshot();
    assert_consistent(&snap);
    assert_eq!(
        snap.generation,
        (PRODUCERS * ITERATIONS * 3) as u64,
        "every mutation is counted once"
    );
}

#[test]
fn individual_setters_keep_measures_and_order_consistent() {
    let state = DisplayState::new();
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
        let producers: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let state = &state;
                s.spawn(move || {
                    let name = format!("p{producer}");
                    let mut shapes = vec![vec![tri(0.0)]; producer + 1];
                    for i in 0..ITERATIONS {
                        // Rising then falling, so both ends of the range move.
                        let value = (i as f64 - 500.0).abs();
                        state.set_measure(&name, value);
                        shapes[0][0] = tri(i as f64);
                        state.set_shapes(&shapes);
                        if i % 100 == 0 {
                            state.set_bounds(Rect::new(0.0, 0.0, i as f64 + 1.0, 1.0));
                        }
                    }
                })
            })
            .collect();

        let state = &state;
        let stop = &stop;
        let reader = s.spawn(move || {
            let mut snap = FrameSnapshot::new();
            let mut seen: Vec<String> = Vec::new();
            while !stop.load(Ordering::Acquire) {
                state.snapshot_into(&mut snap);
                for m in &snap.measures {
                    let r = m.reading;
                    assert!(
                        r.min <= r.current && r.current <= r.max,
                        "{}: torn reading {r:?}",
                        m.name
                    );
                }
                // Names only ever get appended: the earlier order is a prefix of the new one.
                let names: Vec<&str> = snap.measures.iter().map(|m| &*m.name).collect();
                assert!(names.len() >= seen.len(), "a measure disappeared");
                for (old, new) in seen.iter().zip(&names) {
                    assert_eq!(old, new, "display order changed");
                }
                seen = names.into_iter().map(String::from).collect();
            }
            seen
        });

        for p in producers {
            p.join().expect("producer panicked");
        }
        stop.store(true, Ordering::Release);
        let seen = reader.join().expect("reader panicked");
        assert!(seen.len() <= PRODUCERS);
    });

    let snap = state.snapshot();
    assert_eq!(snap.measures.len(), PRODUCERS, "each name registered exactly once");
    let mut names: Vec<&str> = snap.measures.iter().map(|m| &*m.name).collect();
    names.sort_unstable();
    assert_eq!(names, ["p0", "p1", "p2", "p3"]);
    for m in &snap.measures {
        assert_eq!(m.reading.min, 0.0, "{}", m.name);
        assert_eq!(m.reading.max, 500.0, "{}", m.name);
        assert_eq!(m.reading.current, 499.0, "{}", m.name);
    }
}
