//! Enemy unit memory, capability latches, and opening-relevant timings (§4.6
//! "InformationTracker"). Grounded in Steamhammer's `InformationManager.cpp`:
//! a per-enemy-unit dictionary that survives the unit leaving sight, plus a
//! small set of booleans that latch permanently once evidence is seen.

use crate::{geometry::Point2, ids::UnitTypeId};
use rustc_hash::FxHashMap;

/// Per-enemy-unit memory (§3 `InformationRecord`), kept even while the unit
/// is out of sight so placement/threat decisions can use "last known" data.
#[derive(Debug, Clone, Copy)]
pub struct InformationRecord {
	pub type_id: UnitTypeId,
	pub last_known_position: Point2,
	pub last_known_hit_points: f32,
	pub last_known_shields: f32,
	pub completed: bool,
	/// `now + remaining_build_time` at the last visible update.
	pub predicted_completion_frame: Option<u32>,
	pub is_burrowed: bool,
	pub is_lifted: bool,
	/// Set when the tile the unit was last seen on becomes visible again
	/// without the unit present (§4.6). Burrowing units and lurkers are
	/// exempt from this rule by the caller (they're expected to vanish).
	pub gone_from_last_position: bool,
	pub last_seen_frame: u32,
}

/// How often the "gone from last position" sweep runs (§4.6, §5).
pub const GONE_SWEEP_PERIOD: u32 = 6;

/// Permanent capability latches inferred from observed enemy units/bullets
/// (§4.6 "Capability latches"). Every field only ever transitions
/// `false -> true`; nothing here clears within a game (§8 invariant).
#[derive(Debug, Clone, Copy, Default)]
pub struct CapabilityLatches {
	pub enemy_has_combat_units: bool,
	pub enemy_has_static_anti_air: bool,
	pub enemy_has_anti_air: bool,
	pub enemy_has_air_tech: bool,
	pub enemy_has_cloak_tech: bool,
	pub enemy_cloaked_units_seen: bool,
	pub enemy_has_mobile_cloak_tech: bool,
	pub enemy_has_air_cloak_tech: bool,
	pub enemy_has_overlord_hunters: bool,
	pub enemy_has_static_detection: bool,
	pub enemy_has_mobile_detection: bool,
	pub enemy_has_siege_mode: bool,
	pub enemy_has_storm: bool,
}

impl CapabilityLatches {
	/// `enemy_has_mobile_detection` starts `true` for a known-zerg enemy
	/// (overlords are mobile detectors, §4.6).
	pub fn new(enemy_is_zerg: bool) -> Self {
		Self {
			enemy_has_mobile_detection: enemy_is_zerg,
			..Default::default()
		}
	}
}

/// Tracks last-known enemy units, capability latches, and a couple of
/// opening-relevant timings (§4.6).
pub struct InformationTracker {
	records: FxHashMap<u64, InformationRecord>,
	pub latches: CapabilityLatches,
	/// First frame any enemy unit type with a nonzero gas cost was observed
	/// (excluding larva/egg; vulture/shuttle count via their gas-costed
	/// parent buildings). Latched once set.
	pub enemy_gas_timing: Option<u32>,
}

impl InformationTracker {
	pub fn new(enemy_is_zerg: bool) -> Self {
		Self {
			records: FxHashMap::default(),
			latches: CapabilityLatches::new(enemy_is_zerg),
			enemy_gas_timing: None,
		}
	}

	pub fn record(&mut self, tag: u64) -> Option<&InformationRecord> {
		self.records.get(&tag)
	}

	pub fn get(&self, tag: u64) -> Option<&InformationRecord> {
		self.records.get(&tag)
	}

	/// Refreshes one enemy unit's record on a visible sighting (§4.6).
	#[allow(clippy::too_many_arguments)]
	pub fn observe(
		&mut self,
		tag: u64,
		type_id: UnitTypeId,
		position: Point2,
		hit_points: f32,
		shields: f32,
		completed: bool,
		remaining_build_time: Option<u32>,
		is_burrowed: bool,
		is_lifted: bool,
		frame: u32,
	) {
		let predicted_completion_frame = remaining_build_time.map(|t| frame + t);
		self.records.insert(
			tag,
			InformationRecord {
				type_id,
				last_known_position: position,
				last_known_hit_points: hit_points,
				last_known_shields: shields,
				completed,
				predicted_completion_frame,
				is_burrowed,
				is_lifted,
				gone_from_last_position: false,
				last_seen_frame: frame,
			},
		);
	}

	/// The "gone from last position" sweep (§4.6), run every
	/// [`GONE_SWEEP_PERIOD`] frames. `tile_visible` reports whether the
	/// record's last-known tile is currently visible; `unit_present_now`
	/// reports whether a unit is actually there. Burrowing units and
	/// lurkers are exempt (`exempt`).
	pub fn sweep_gone(
		&mut self,
		frame: u32,
		tile_visible: impl Fn(Point2) -> bool,
		unit_present_now: impl Fn(Point2) -> bool,
		exempt: impl Fn(UnitTypeId) -> bool,
	) {
		if frame % GONE_SWEEP_PERIOD != 0 {
			return;
		}
		for record in self.records.values_mut() {
			if exempt(record.type_id) {
				continue;
			}
			if tile_visible(record.last_known_position) && !unit_present_now(record.last_known_position) {
				record.gone_from_last_position = true;
			}
		}
	}

	/// Drops a record entirely (unit confirmed destroyed, not just out of
	/// sight).
	pub fn forget(&mut self, tag: u64) {
		self.records.remove(&tag);
	}

	/// Applies an enumerated list of type-predicates against every known
	/// enemy record (§4.6): any match latches the corresponding capability.
	/// Called once per frame with the caller's own predicate table.
	pub fn apply_predicate(&mut self, predicate: impl Fn(UnitTypeId) -> bool, latch: impl Fn(&mut CapabilityLatches)) {
		if self.records.values().any(|r| predicate(r.type_id)) {
			latch(&mut self.latches);
		}
	}

	/// Latches `enemy_gas_timing` the first time a gas-costed enemy type is
	/// observed (§4.6 "Enemy gas timing").
	pub fn note_possible_gas_timing(&mut self, gas_cost: u32, frame: u32) {
		if gas_cost > 0 && self.enemy_gas_timing.is_none() {
			self.enemy_gas_timing = Some(frame);
		}
	}

	/// Bullet sweep (§4.6 "Bullet observation"): a psionic-storm bullet
	/// latches `enemy_has_storm`. `is_storm` lets the caller identify the
	/// storm bullet type without this crate needing its own bullet-type
	/// enum.
	pub fn observe_bullets(&mut self, bullets: &[crate::api::Bullet], is_storm: impl Fn(&crate::api::Bullet) -> bool) {
		if bullets.iter().any(is_storm) {
			self.latches.enemy_has_storm = true;
		}
	}

	pub fn known_enemy_units(&self) -> impl Iterator<Item = (&u64, &InformationRecord)> {
		self.records.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mobile_detection_latches_immediately_for_zerg() {
		let tracker = InformationTracker::new(true);
		assert!(tracker.latches.enemy_has_mobile_detection);
		let tracker = InformationTracker::new(false);
		assert!(!tracker.latches.enemy_has_mobile_detection);
	}

	#[test]
	fn gas_timing_latches_once() {
		let mut tracker = InformationTracker::new(false);
		tracker.note_possible_gas_timing(100, 500);
		tracker.note_possible_gas_timing(100, 900);
		assert_eq!(tracker.enemy_gas_timing, Some(500));
	}

	#[test]
	fn gone_from_last_position_requires_visible_empty_tile() {
		let mut tracker = InformationTracker::new(false);
		tracker.observe(1, UnitTypeId::Marine, Point2::new(5.0, 5.0), 40.0, 0.0, true, None, false, false, 0);
		tracker.sweep_gone(6, |_| true, |_| false, |_| false);
		assert!(tracker.get(1).unwrap().gone_from_last_position);
	}

	#[test]
	fn burrowed_units_are_exempt_from_gone_sweep() {
		let mut tracker = InformationTracker::new(false);
		tracker.observe(1, UnitTypeId::Lurker, Point2::new(5.0, 5.0), 40.0, 0.0, true, None, true, false, 0);
		tracker.sweep_gone(6, |_| true, |_| false, |t| t == UnitTypeId::Lurker);
		assert!(!tracker.get(1).unwrap().gone_from_last_position);
	}

	#[test]
	fn capability_latch_stays_set_once_applied() {
		let mut tracker = InformationTracker::new(false);
		tracker.observe(1, UnitTypeId::MissileTurret, Point2::new(0.0, 0.0), 1.0, 0.0, true, None, false, false, 0);
		tracker.apply_predicate(|t| t.is_air_static_defense(), |l| l.enemy_has_static_anti_air = true);
		assert!(tracker.latches.enemy_has_static_anti_air);
		tracker.forget(1);
		tracker.apply_predicate(|t| t.is_air_static_defense(), |_| {});
		assert!(tracker.latches.enemy_has_static_anti_air);
	}
}
