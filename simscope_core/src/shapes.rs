// Copyright 2025 the Simscope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangulated polygons in simulation coordinates.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

/// Three vertices in simulation coordinates.
pub type Triangle = [Point; 3];

/// How [`ShapeSet::copy_from`] stored the new geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeCopy {
    /// The polygon count matched, so existing buffers were overwritten.
    InPlace,
    /// The polygon count changed and the set was rebuilt.
    Reallocated,
}

/// A sequence of polygons, each a sequence of triangles.
///
/// A shape set is always replaced as a whole; there is no API for editing one polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeSet {
    polygons: Vec<Vec<Triangle>>,
}

impl ShapeSet {
    /// Creates an empty shape set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a shape set by copying `polygons`.
    #[must_use]
    pub fn from_polygons<P: AsRef<[Triangle]>>(polygons: &[P]) -> Self {
        let mut set = Self::new();
        set.copy_from(polygons);
        set
    }

    /// Replaces the contents with a deep copy of `src`.
    ///
    /// When `src` has as many polygons as `self`, each stored polygon is cleared and refilled,
    /// reusing its allocation; inner lengths always end up equal to the source's. Otherwise
    /// the set is rebuilt from scratch.
    pub fn copy_from<P: AsRef<[Triangle]>>(&mut self, src: &[P]) -> ShapeCopy {
        if src.len() == self.polygons.len() {
            for (dst, src) in self.polygons.iter_mut().zip(src) {
                dst.clear();
                dst.extend_from_slice(src.as_ref());
            }
            return ShapeCopy::InPlace;
        }
        self.polygons = src.iter().map(|p| p.as_ref().to_vec()).collect();
        ShapeCopy::Reallocated
    }

    /// Copies another shape set into this one, with the same reuse rules as
    /// [`ShapeSet::copy_from`].
    pub fn copy_from_set(&mut self, other: &Self) -> ShapeCopy {
        self.copy_from(&other.polygons)
    }

    /// The stored polygons.
    #[must_use]
    pub fn polygons(&self) -> &[Vec<Triangle>] {
        &self.polygons
    }

    /// Number of polygons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Returns `true` if there are no polygons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Total number of triangles across all polygons.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.polygons.iter().map(Vec::len).sum()
    }

    /// Iterates every triangle, polygon by polygon.
    pub fn iter_triangles(&self) -> impl Iterator<Item = &Triangle> {
        self.polygons.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn tri(x: f64, y: f64) -> Triangle {
        [
            Point::new(x, y),
            Point::new(x + 1.0, y),
            Point::new(x, y + 1.0),
        ]
    }

    #[test]
    fn copy_reads_back_equal_and_does_not_alias() {
        let mut input = vec![vec![tri(0.0, 0.0), tri(1.0, 1.0)], vec![tri(5.0, 5.0)]];
        let mut set = ShapeSet::new();
        assert_eq!(set.copy_from(&input), ShapeCopy::Reallocated);
        assert_eq!(set.polygons(), input.as_slice(), "read-back equals input");

        input[0][0][0] = Point::new(100.0, 100.0);
        input[1].push(tri(9.0, 9.0));
        assert_eq!(
            set.polygons()[0][0][0],
            Point::new(0.0, 0.0),
            "mutating the caller's buffer must not reach the stored copy"
        );
        assert_eq!(set.polygons()[1].len(), 1);
    }

    #[test]
    fn same_outer_length_copies_in_place_and_resizes_inner() {
        let mut set = ShapeSet::from_polygons(&[vec![tri(0.0, 0.0)], vec![tri(1.0, 0.0)]]);
        let grown = [
            vec![tri(2.0, 0.0), tri(3.0, 0.0), tri(4.0, 0.0)],
            Vec::new(),
        ];
        assert_eq!(set.copy_from(&grown), ShapeCopy::InPlace);
        assert_eq!(set.polygons(), grown.as_slice(), "inner lengths follow the source");
        assert_eq!(set.triangle_count(), 3);
    }

    #[test]
    fn different_outer_length_rebuilds() {
        let mut set = ShapeSet::from_polygons(&[vec![tri(0.0, 0.0)]]);
        let next: [&[Triangle]; 2] = [&[tri(1.0, 1.0)], &[tri(2.0, 2.0)]];
        assert_eq!(set.copy_from(&next), ShapeCopy::Reallocated);
        assert_eq!(set.len(), 2);

        assert_eq!(set.copy_from::<Vec<Triangle>>(&[]), ShapeCopy::Reallocated);
        assert!(set.is_empty(), "an empty input clears the set");
    }

    #[test]
    fn iterates_triangles_in_polygon_order() {
        let set = ShapeSet::from_polygons(&[vec![tri(0.0, 0.0), tri(1.0, 0.0)], vec![tri(2.0, 0.0)]]);
        let xs: Vec<f64> = set.iter_triangles().map(|t| t[0].x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }
}
