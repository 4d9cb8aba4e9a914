//! Data structures for storing units and fast filtering and finding ones that are needed.
#![allow(missing_docs)]

use crate::{distance::Distance, geometry::Point2, ids::UnitTypeId, unit::Unit};
use indexmap::{
	map::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut},
	IndexMap,
};
use rustc_hash::FxHasher;
use std::{
	cmp::Ordering,
	hash::BuildHasherDefault,
	iter::{FromIterator, Sum},
	ops::{Index, IndexMut},
};

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Per-player view of their units, refreshed each frame from the game API
/// bridge (§6) before any component runs.
#[derive(Default, Clone)]
pub struct PlayerUnits {
	pub all: Units,
	pub units: Units,
	pub structures: Units,
	pub resource_depots: Units,
	pub workers: Units,
	pub refineries: Units,
	/// Larvas, populated for zerg only.
	pub larvas: Units,
}
impl PlayerUnits {
	pub(crate) fn clear(&mut self) {
		self.all.clear();
		self.units.clear();
		self.structures.clear();
		self.resource_depots.clear();
		self.workers.clear();
		self.refineries.clear();
		self.larvas.clear();
	}
}

/// Everything the decision core knows about units this frame.
#[derive(Default, Clone)]
pub struct AllUnits {
	pub all: Units,
	pub my: PlayerUnits,
	pub enemy: PlayerUnits,
	pub mineral_fields: Units,
	pub vespene_geysers: Units,
}
impl AllUnits {
	pub(crate) fn clear(&mut self) {
		self.all.clear();
		self.my.clear();
		self.enemy.clear();
		self.mineral_fields.clear();
		self.vespene_geysers.clear();
	}
}

/// Convenient [`Unit`] collection, indexed by tag, iteration-ordered like an
/// `IndexMap` so repeated scans are deterministic frame to frame.
#[derive(Default, Clone)]
pub struct Units(FxIndexMap<u64, Unit>);

impl Units {
	#[inline]
	pub fn new() -> Self {
		Self(Default::default())
	}

	#[inline]
	pub fn with_capacity(n: usize) -> Self {
		Self(IndexMap::with_capacity_and_hasher(n, BuildHasherDefault::<FxHasher>::default()))
	}

	#[inline]
	pub fn first(&self) -> Option<&Unit> {
		self.0.values().next()
	}

	/// Inserts a unit, replacing and returning any previous unit with the
	/// same tag.
	#[inline]
	pub fn push(&mut self, u: Unit) -> Option<Unit> {
		self.0.insert(u.tag, u)
	}

	#[inline]
	pub fn remove(&mut self, tag: u64) -> Option<Unit> {
		self.0.remove(&tag)
	}

	#[inline]
	pub fn iter(&self) -> Values<u64, Unit> {
		self.0.values()
	}

	#[inline]
	pub fn iter_mut(&mut self) -> ValuesMut<u64, Unit> {
		self.0.values_mut()
	}

	#[inline]
	pub fn pairs(&self) -> Iter<u64, Unit> {
		self.0.iter()
	}

	#[inline]
	pub fn pairs_mut(&mut self) -> IterMut<u64, Unit> {
		self.0.iter_mut()
	}

	#[inline]
	pub fn tags(&self) -> Keys<u64, Unit> {
		self.0.keys()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[inline]
	pub fn clear(&mut self) {
		self.0.clear()
	}

	#[inline]
	pub fn contains_tag(&self, tag: u64) -> bool {
		self.0.contains_key(&tag)
	}

	#[inline]
	pub fn get(&self, tag: u64) -> Option<&Unit> {
		self.0.get(&tag)
	}

	#[inline]
	pub fn get_mut(&mut self, tag: u64) -> Option<&mut Unit> {
		self.0.get_mut(&tag)
	}

	/// Leaves only units that match the given predicate and makes a new
	/// collection of them.
	pub fn filter<F: Fn(&Unit) -> bool>(&self, f: F) -> Self {
		self.iter().filter(|u| f(u)).cloned().collect()
	}

	pub fn find_tags<'a, T: IntoIterator<Item = &'a u64>>(&self, tags: T) -> Self {
		tags.into_iter().filter_map(|tag| self.0.get(tag).cloned()).collect()
	}

	pub fn of_type(&self, unit_type: UnitTypeId) -> Self {
		self.filter(|u| u.type_id == unit_type)
	}

	pub fn exclude_type(&self, unit_type: UnitTypeId) -> Self {
		self.filter(|u| u.type_id != unit_type)
	}

	pub fn center(&self) -> Option<Point2> {
		if self.is_empty() {
			None
		} else {
			Some(self.iter().map(|u| u.position).sum::<Point2>() / self.len() as f32)
		}
	}

	pub fn ground(&self) -> Self {
		self.filter(|u| !u.is_flying)
	}

	pub fn flying(&self) -> Self {
		self.filter(|u| u.is_flying)
	}

	pub fn ready(&self) -> Self {
		self.filter(|u| u.is_completed())
	}

	pub fn not_ready(&self) -> Self {
		self.filter(|u| !u.is_completed())
	}

	pub fn idle(&self) -> Self {
		self.filter(|u| u.is_idle)
	}

	/// Sorts the collection by the given key function.
	pub fn sort<T: PartialOrd, F: Fn(&Unit) -> T>(&mut self, f: F) {
		self.0.sort_by(move |_, a, _, b| f(a).partial_cmp(&f(b)).unwrap_or(Ordering::Equal));
	}

	pub fn sorted<T: PartialOrd, F: Fn(&Unit) -> T>(&self, f: F) -> Self {
		let mut sorted = self.clone();
		sorted.sort(f);
		sorted
	}
}

impl FromIterator<Unit> for Units {
	#[inline]
	fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
		Self(iter.into_iter().map(|u| (u.tag, u)).collect())
	}
}
impl FromIterator<(u64, Unit)> for Units {
	#[inline]
	fn from_iter<I: IntoIterator<Item = (u64, Unit)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl IntoIterator for Units {
	type Item = (u64, Unit);
	type IntoIter = IntoIter<u64, Unit>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
impl<'a> IntoIterator for &'a Units {
	type Item = (&'a u64, &'a Unit);
	type IntoIter = Iter<'a, u64, Unit>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
impl<'a> IntoIterator for &'a mut Units {
	type Item = (&'a u64, &'a mut Unit);
	type IntoIter = IterMut<'a, u64, Unit>;

	#[inline]
	fn into_iter(self) -> Self::IntoIter {
		self.0.iter_mut()
	}
}

impl Extend<Unit> for Units {
	#[inline]
	fn extend<T: IntoIterator<Item = Unit>>(&mut self, iter: T) {
		self.0.extend(iter.into_iter().map(|u| (u.tag, u)));
	}
}
impl Extend<(u64, Unit)> for Units {
	#[inline]
	fn extend<T: IntoIterator<Item = (u64, Unit)>>(&mut self, iter: T) {
		self.0.extend(iter);
	}
}

impl Index<u64> for Units {
	type Output = Unit;

	#[inline]
	fn index(&self, tag: u64) -> &Self::Output {
		&self.0[&tag]
	}
}
impl IndexMut<u64> for Units {
	#[inline]
	fn index_mut(&mut self, tag: u64) -> &mut Self::Output {
		&mut self.0[&tag]
	}
}
impl Index<usize> for Units {
	type Output = Unit;

	#[inline]
	fn index(&self, i: usize) -> &Self::Output {
		&self.0[i]
	}
}
impl IndexMut<usize> for Units {
	#[inline]
	fn index_mut(&mut self, i: usize) -> &mut Self::Output {
		&mut self.0[i]
	}
}

/// Helper trait for ad-hoc iterators over `&Unit`, mirroring [`Units`]'s own
/// filter helpers so a chained iterator doesn't need to collect first.
pub trait UnitsIterator<'a>: Iterator<Item = &'a Unit> + Sized {
	fn find_tag(mut self, tag: u64) -> Option<&'a Unit> {
		self.find(|u| u.tag == tag)
	}
	fn of_type(self, unit_type: UnitTypeId) -> std::iter::Filter<Self, Box<dyn FnMut(&&'a Unit) -> bool>> {
		self.filter(Box::new(move |u| u.type_id == unit_type))
	}
	fn ground(self) -> std::iter::Filter<Self, Box<dyn FnMut(&&'a Unit) -> bool>> {
		self.filter(Box::new(|u: &&Unit| !u.is_flying))
	}
}
impl<'a, I> UnitsIterator<'a> for I where I: Iterator<Item = &'a Unit> + Sized {}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::player::Alliance;

	fn worker(tag: u64, x: f32) -> Unit {
		Unit {
			tag,
			type_id: UnitTypeId::Scv,
			alliance: Alliance::Own,
			position: Point2::new(x, 0.0),
			tile_position: Point2::new(x, 0.0),
			hit_points: 60.0,
			hit_points_max: 60.0,
			shields: 0.0,
			shields_max: 0.0,
			build_progress: 1.0,
			remaining_build_time: None,
			is_flying: false,
			is_burrowed: false,
			is_cloaked: false,
			is_detected: true,
			is_lifted: false,
			is_carrying_minerals: false,
			is_carrying_gas: false,
			is_training: false,
			is_upgrading: false,
			is_researching: false,
			is_idle: true,
			addon_tag: None,
			orders: Vec::new(),
			last_commanded_frame: None,
		}
	}

	#[test]
	fn push_replaces_same_tag() {
		let mut units = Units::new();
		units.push(worker(1, 0.0));
		let prev = units.push(worker(1, 5.0));
		assert!(prev.is_some());
		assert_eq!(units.len(), 1);
	}

	#[test]
	fn center_averages_positions() {
		let units: Units = vec![worker(1, 0.0), worker(2, 10.0)].into_iter().collect();
		assert_eq!(units.center(), Some(Point2::new(5.0, 0.0)));
	}

	#[test]
	fn of_type_filters_by_unit_type() {
		let units: Units = vec![worker(1, 0.0)].into_iter().collect();
		assert_eq!(units.of_type(UnitTypeId::Scv).len(), 1);
		assert_eq!(units.of_type(UnitTypeId::Marine).len(), 0);
	}
}
