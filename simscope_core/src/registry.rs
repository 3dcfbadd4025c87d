// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion-ordered collection of named measures.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::measure::{Measure, MeasureReading};

/// Outcome of [`MeasureRegistry::record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recorded {
    /// The name was unseen; a new measure was appended at the given display position.
    Registered(usize),
    /// An existing measure was updated in place.
    Updated,
}

/// A measure reading paired with its name, in display order.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedReading {
    /// The measure name.
    pub name: Arc<str>,
    /// The reading at snapshot time.
    pub reading: MeasureReading,
}

/// Named measures kept in first-seen order.
///
/// Entries are never removed, so a name keeps the position it was first registered at for the
/// lifetime of the registry.
#[derive(Clone, Debug, Default)]
pub struct MeasureRegistry {
    index: HashMap<Arc<str>, usize>,
    entries: Vec<(Arc<str>, Measure)>,
}

impl MeasureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `name`, registering the name on first use.
    ///
    /// A newly registered measure is seeded with `value` as current, min and max.
    pub fn record(&mut self, name: &str, value: f64) -> Recorded {
        if let Some(&slot) = self.index.get(name) {
            self.entries[slot].1.update(value);
            return Recorded::Updated;
        }
        let name: Arc<str> = Arc::from(name);
        let slot = self.entries.len();
        self.index.insert(name.clone(), slot);
        self.entries.push((name, Measure::seeded(value)));
        Recorded::Registered(slot)
    }

    /// Returns the measure registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Measure> {
        self.index.get(name).map(|&slot| &self.entries[slot].1)
    }

    /// Iterates measures in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Measure)> {
        self.entries.iter().map(|(name, m)| (name.as_ref(), m))
    }

    /// Iterates names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    /// Number of registered measures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the current readings into `out`, replacing its contents.
    ///
    /// Names are shared with the registry, so this allocates only when `out` has to grow.
    pub fn readings_into(&self, out: &mut Vec<NamedReading>) {
        out.clear();
        out.extend(self.entries.iter().map(|(name, m)| NamedReading {
            name: name.clone(),
            reading: m.reading(),
        }));
    }
}
