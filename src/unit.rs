//! Stuff for convenient interaction with [`Unit`]s.
#![allow(missing_docs)]

use crate::{
	geometry::Point2,
	ids::{TechId, UnitTypeId, UpgradeId},
	player::Alliance,
};

/// An order a unit is currently carrying out. All current orders are stored
/// in [`orders`](Unit::orders).
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOrder {
	Move(Point2),
	AttackMove(Point2),
	AttackUnit(u64),
	Gather(u64),
	ReturnCargo,
	Build { type_id: UnitTypeId, tile: Point2 },
	Morph(UnitTypeId),
	Train(UnitTypeId),
	Research(TechId),
	Upgrade(UpgradeId),
	Repair(u64),
	Idle,
}

/// Raw unit snapshot as reported by the game API bridge (§6), refreshed once
/// per frame. Trimmed to the fields the decision core actually reads —
/// nothing here models rendering, pathing, or combat resolution.
#[derive(Debug, Clone)]
pub struct Unit {
	/// Unique and constant for each unit; used to find exactly the same unit
	/// in a later frame's [`Units`](crate::units::Units).
	pub tag: u64,
	pub type_id: UnitTypeId,
	pub alliance: Alliance,
	pub position: Point2,
	pub tile_position: Point2,

	pub hit_points: f32,
	pub hit_points_max: f32,
	pub shields: f32,
	pub shields_max: f32,

	/// Construction/morph/research progress, `0` to `1`.
	pub build_progress: f32,
	/// Estimated frames remaining until `build_progress` reaches `1`, if
	/// currently under construction, morphing, training, or researching.
	pub remaining_build_time: Option<u32>,

	pub is_flying: bool,
	pub is_burrowed: bool,
	pub is_cloaked: bool,
	pub is_detected: bool,
	pub is_lifted: bool,
	pub is_carrying_minerals: bool,
	pub is_carrying_gas: bool,
	pub is_training: bool,
	pub is_upgrading: bool,
	pub is_researching: bool,
	pub is_idle: bool,

	/// Tag of the addon attached to this building, if any.
	pub addon_tag: Option<u64>,
	pub orders: Vec<UnitOrder>,
	/// Ability/order issued to this unit this frame by this bot, so the
	/// scheduler doesn't reissue an identical command every frame.
	pub last_commanded_frame: Option<u32>,
}

impl Unit {
	pub fn is_worker(&self) -> bool {
		self.type_id.is_worker()
	}

	pub fn is_resource_depot(&self) -> bool {
		self.type_id.is_resource_depot()
	}

	pub fn is_building(&self) -> bool {
		self.type_id.is_building()
	}

	pub fn is_completed(&self) -> bool {
		self.build_progress >= 1.0
	}

	pub fn is_full_health(&self) -> bool {
		self.hit_points >= self.hit_points_max
	}

	pub fn health_fraction(&self) -> f32 {
		if self.hit_points_max <= 0.0 {
			1.0
		} else {
			self.hit_points / self.hit_points_max
		}
	}

	pub fn is_carrying_resource(&self) -> bool {
		self.is_carrying_minerals || self.is_carrying_gas
	}

	pub fn mineral_patch_amount_is_exhausted(&self, amount: u32) -> bool {
		self.type_id.is_mineral_field() && amount == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_unit() -> Unit {
		Unit {
			tag: 1,
			type_id: UnitTypeId::Scv,
			alliance: Alliance::Own,
			position: Point2::new(10.0, 10.0),
			tile_position: Point2::new(10.0, 10.0),
			hit_points: 45.0,
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
	fn health_fraction_matches_ratio() {
		let unit = sample_unit();
		assert!((unit.health_fraction() - 0.75).abs() < f32::EPSILON);
	}

	#[test]
	fn worker_predicate_delegates_to_type_id() {
		assert!(sample_unit().is_worker());
	}
}
