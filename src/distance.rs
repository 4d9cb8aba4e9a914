//! Traits for comparing distance between points and units.

use crate::{geometry::Point2, unit::Unit};
use std::{
	cmp::Ordering,
	iter::{Filter, FromIterator},
	vec::IntoIter,
};

/// Basic trait for comparing distance.
pub trait Distance: Sized {
	/// Calculates squared euclidean distance from `self` to `other`.
	fn distance_squared<P: Into<Point2>>(self, other: P) -> f32;

	/// Calculates euclidean distance from `self` to `other`.
	#[inline]
	fn distance<P: Into<Point2>>(self, other: P) -> f32 {
		self.distance_squared(other).sqrt()
	}
	/// Checks if distance between `self` and `other` is less than given `distance`.
	#[inline]
	fn is_closer<P: Into<Point2>>(self, distance: f32, other: P) -> bool {
		self.distance_squared(other) < distance * distance
	}
	/// Checks if distance between `self` and `other` is greater than given `distance`.
	#[inline]
	fn is_further<P: Into<Point2>>(self, distance: f32, other: P) -> bool {
		self.distance_squared(other) > distance * distance
	}
}

impl Distance for Point2 {
	#[inline]
	fn distance_squared<P: Into<Point2>>(self, other: P) -> f32 {
		let other = other.into();
		let dx = self.x - other.x;
		let dy = self.y - other.y;
		dx * dx + dy * dy
	}
}
impl Distance for &Point2 {
	#[inline]
	fn distance_squared<P: Into<Point2>>(self, other: P) -> f32 {
		(*self).distance_squared(other)
	}
}
impl Distance for &Unit {
	#[inline]
	fn distance_squared<P: Into<Point2>>(self, other: P) -> f32 {
		self.position.distance_squared(other)
	}
}

#[inline]
fn cmp<T: PartialOrd>(a: &T, b: &T) -> Ordering {
	a.partial_cmp(b).unwrap()
}

#[inline]
fn cmp_by<T, P>(target: P) -> impl Fn(&T, &T) -> Ordering
where
	T: Distance + Copy,
	P: Into<Point2> + Copy,
{
	let f = move |u: &T| u.distance_squared(target);
	move |a, b| f(a).partial_cmp(&f(b)).unwrap()
}

/// Helper trait for iterators of items implementing [`Distance`].
pub trait DistanceIterator<'a, T>
where
	Self: Iterator<Item = T> + Sized,
	T: Distance + Copy,
{
	/// Filters all items closer than given `distance` to `target`.
	fn closer<P>(self, distance: f32, target: P) -> Filter<Self, Box<dyn FnMut(&T) -> bool + 'a>>
	where
		P: Into<Point2> + Copy + 'a,
	{
		self.filter(Box::new(move |u| u.is_closer(distance, target)))
	}
	/// Filters all items further than given `distance` to `target`.
	fn further<P>(self, distance: f32, target: P) -> Filter<Self, Box<dyn FnMut(&T) -> bool + 'a>>
	where
		P: Into<Point2> + Copy + 'a,
	{
		self.filter(Box::new(move |u| u.is_further(distance, target)))
	}

	/// Returns closest to `target` item in iterator.
	fn closest<P: Into<Point2> + Copy>(self, target: P) -> Option<T> {
		self.min_by(cmp_by(target))
	}
	/// Returns furthest to `target` item in iterator.
	fn furthest<P: Into<Point2> + Copy>(self, target: P) -> Option<T> {
		self.max_by(cmp_by(target))
	}

	/// Returns distance to closest to `target` item in iterator.
	fn closest_distance<P: Into<Point2> + Copy>(self, target: P) -> Option<f32> {
		self.closest_distance_squared(target).map(|dist| dist.sqrt())
	}

	/// Returns squared distance to closest to `target` item in iterator.
	fn closest_distance_squared<P: Into<Point2> + Copy>(self, target: P) -> Option<f32> {
		self.map(|u| u.distance_squared(target)).min_by(cmp)
	}

	/// Returns iterator of items sorted by distance to `target`.
	///
	/// This sort is stable and `O(n * log(n))` worst-case.
	fn sort_by_distance<P: Into<Point2> + Copy>(self, target: P) -> IntoIter<T> {
		let mut v = Vec::from_iter(self);
		v.sort_by(cmp_by(target));
		v.into_iter()
	}
	/// Returns iterator of items sorted by distance to `target`.
	///
	/// This sort is unstable (may reorder equal elements) and allocation-free in-place.
	fn sort_unstable_by_distance<P: Into<Point2> + Copy>(self, target: P) -> IntoIter<T> {
		let mut v = Vec::from_iter(self);
		v.sort_unstable_by(cmp_by(target));
		v.into_iter()
	}
}

/// Helper trait for sorting `slice`/`Vec` of elements implementing [`Distance`] in place.
pub trait DistanceSlice<T: Distance> {
	fn sort_by_distance<P: Into<Point2> + Copy>(&mut self, target: P);
	fn sort_unstable_by_distance<P: Into<Point2> + Copy>(&mut self, target: P);
}

/// Helper trait for an iterator of points, used to find the center of those points.
pub trait Center<T>
where
	Self: Iterator<Item = T> + Sized,
	T: Into<Point2>,
{
	/// Returns center of all iterated points or `None` if iterator is empty.
	fn center(self) -> Option<Point2> {
		let (sum, len) = self.fold((Point2::default(), 0), |(sum, len), p| (sum + p.into(), len + 1));
		if len > 0 {
			Some(sum / len as f32)
		} else {
			None
		}
	}
}

impl<I, T> Center<T> for I
where
	I: Iterator<Item = T> + Sized,
	T: Into<Point2>,
{
}

impl<'a, I, T> DistanceIterator<'a, T> for I
where
	I: Iterator<Item = T> + Sized,
	T: Distance + Copy,
{
}

impl<T: Distance + Copy> DistanceSlice<T> for [T] {
	fn sort_by_distance<P: Into<Point2> + Copy>(&mut self, target: P) {
		self.sort_by(cmp_by(target))
	}
	fn sort_unstable_by_distance<P: Into<Point2> + Copy>(&mut self, target: P) {
		self.sort_unstable_by(cmp_by(target))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn closest_picks_the_nearer_point() {
		let pts = vec![Point2::new(10.0, 0.0), Point2::new(1.0, 0.0)];
		let closest = pts.into_iter().closest(Point2::new(0.0, 0.0));
		assert_eq!(closest, Some(Point2::new(1.0, 0.0)));
	}

	#[test]
	fn sort_by_distance_orders_ascending() {
		let pts = vec![Point2::new(5.0, 0.0), Point2::new(1.0, 0.0), Point2::new(3.0, 0.0)];
		let sorted: Vec<_> = pts.into_iter().sort_by_distance(Point2::new(0.0, 0.0)).collect();
		assert_eq!(
			sorted,
			vec![Point2::new(1.0, 0.0), Point2::new(3.0, 0.0), Point2::new(5.0, 0.0)]
		);
	}
}
