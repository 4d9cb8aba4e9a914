//! Grid data structures used to store map data: buildability/reservation
//! grids and the walkability grid consumed read-only from the map-analysis
//! service (§6).
#![allow(missing_docs)]

use crate::geometry::Point2;
use ndarray::Array2;
use std::ops::{Index, IndexMut};

/// 2D array of booleans, indexed `[x, y]` in tile coordinates.
pub type BoolMap = Array2<bool>;
/// 2D array of bytes (terrain height, walk-tile flags, ...).
pub type ByteMap = Array2<u8>;
/// 2D array tracking whether a tile has been explored/is currently visible.
pub type VisibilityMap = Array2<Visibility>;

impl<T> Index<Point2> for Array2<T> {
	type Output = T;

	#[inline]
	fn index(&self, pos: Point2) -> &Self::Output {
		&self[<(usize, usize)>::from(pos)]
	}
}
impl<T> IndexMut<Point2> for Array2<T> {
	#[inline]
	fn index_mut(&mut self, pos: Point2) -> &mut Self::Output {
		&mut self[<(usize, usize)>::from(pos)]
	}
}

/// Visibility state of a tile, as tracked from the per-tile `isVisible`/`isExplored` queries of §6.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Visibility {
	/// Never explored.
	Hidden,
	/// Explored before, not visible now (fog of war).
	Fogged,
	/// Visible this frame.
	Visible,
}
impl Visibility {
	pub fn is_explored(self) -> bool {
		!matches!(self, Visibility::Hidden)
	}
	pub fn is_visible(self) -> bool {
		matches!(self, Visibility::Visible)
	}
}
impl Default for Visibility {
	fn default() -> Self {
		Visibility::Hidden
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bool_map_indexes_by_point() {
		let mut grid = BoolMap::from_elem((4, 4), false);
		grid[Point2::new(1.5, 2.5)] = true;
		assert!(grid[(1, 2)]);
	}
}
