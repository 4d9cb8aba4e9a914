//! Per-frame producer selection, feasibility checks, and long-running
//! goals (§3 `ProductionGoal`, §4.5 "ProductionScheduler"). Grounded in
//! Steamhammer's `ProductionManager.cpp`: the queue itself
//! ([`crate::production_queue`]) only models ordering; this module models
//! the decisions made against one popped item each frame.

use crate::{
	ids::UnitTypeId,
	production_queue::{MacroAct, ProductionQueue},
};

/// Hard cap on simultaneous gateways queued (§4.5 step 6b).
pub const GATEWAY_HARD_CAP: u32 = 10;

/// A long-running production item that can take multiple attempts (§3
/// `ProductionGoal`): research, upgrades, and addons. Unlike a
/// `ProductionItem`, a goal persists across frames while it waits for a
/// producer to become free.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionGoal {
	pub act: MacroAct,
	pub parent_producer: Option<u64>,
	pub attempted: bool,
}

impl ProductionGoal {
	pub fn new(act: MacroAct) -> Self {
		Self { act, parent_producer: None, attempted: false }
	}
}

/// Why a goal or queue-prefix item was dropped (§4.5 step 3/4, §7
/// "Prerequisite destroyed while queue item waits").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
	Completed,
	NoPotentialProducerAndNoPrerequisiteBeingBuilt,
}

/// Whether a goal should be dropped this frame (§4.5 step 4: "drop
/// completed ones, drop failed ones").
pub fn goal_drop_reason(completed: bool, has_potential_producer: bool, prerequisite_being_built: bool) -> Option<DropReason> {
	if completed {
		Some(DropReason::Completed)
	} else if !has_potential_producer && !prerequisite_being_built {
		Some(DropReason::NoPotentialProducerAndNoPrerequisiteBeingBuilt)
	} else {
		None
	}
}

/// Non-zerg prefix-drop rule (§4.5 step 3): an item with no potential
/// producer and no prerequisite currently under construction can never
/// become producible, so it's dropped to avoid a permanent deadlock.
pub fn is_undeproducible(has_potential_producer: bool, prerequisite_being_built: bool) -> bool {
	!has_potential_producer && !prerequisite_being_built
}

/// Producer selection among larva-spawning hatcheries (§4.5 step 6c).
/// Workers go to the least-saturated base; combat units go to the hatchery
/// with the most larvas (capped effectively at 3 by the engine, so "most
/// larvas" avoids wasting a spawn above that cap).
pub fn choose_larva_hatchery(is_worker: bool, candidates: &[(u64, u32, u32)]) -> Option<u64> {
	// candidates: (hatchery_tag, worker_saturation, larva_count)
	if is_worker {
		candidates.iter().min_by_key(|(_, saturation, _)| *saturation).map(|(tag, ..)| *tag)
	} else {
		candidates.iter().max_by_key(|(_, _, larvas)| *larvas).map(|(tag, ..)| *tag)
	}
}

/// Producer selection for a new worker-producing depot (§4.5 step 6c): the
/// depot farthest from the main, so expansions populate first.
pub fn choose_worker_depot(candidates: &[(u64, f32)]) -> Option<u64> {
	candidates.iter().max_by(|a, b| a.1.partial_cmp(&b.1).unwrap()).map(|(tag, _)| *tag)
}

/// Producer selection for a lair morph (§4.5 step 6c): the hatchery
/// farthest from visible enemies, preferring the main zone.
pub fn choose_lair_hatchery(candidates: &[(u64, f32, bool)]) -> Option<u64> {
	// candidates: (hatchery_tag, distance_from_nearest_enemy, in_main_zone)
	candidates
		.iter()
		.max_by(|a, b| {
			(a.2, (a.1 * 1000.0) as i64)
				.cmp(&(b.2, (b.1 * 1000.0) as i64))
		})
		.map(|(tag, ..)| *tag)
}

/// Whether the next pop of the queue's back item should instead be skipped
/// this frame (§4.5 step 6b "hard-cap gateways at 10").
pub fn gateway_hard_cap_blocks(act: &MacroAct, current_gateway_count: u32) -> bool {
	matches!(act, MacroAct::Unit(UnitTypeId::Gateway)) && current_gateway_count >= GATEWAY_HARD_CAP
}

/// Production-jam detection (§4.5 step 6g, §5 "Timeouts", §7 "Production
/// jam"): cleared when nothing has been produced for
/// `config.production_jam_frame_limit` frames while resources are
/// available, we are not supply-maxed, and we are not intentionally saving
/// (e.g. a zerg mutalisk queued with a spire near completion).
pub fn production_jammed(frames_since_last_action: u32, jam_limit: u32, resources_available: bool, supply_maxed: bool, intentionally_saving: bool) -> bool {
	frames_since_last_action >= jam_limit && resources_available && !supply_maxed && !intentionally_saving
}

/// Gas-target maintenance (§4.5 step 1): once gathered gas reaches a
/// previously set target, gas collection switches off and the target
/// clears. Returns `true` if the target was reached this frame.
pub fn gas_target_reached(gathered_gas: u32, target: Option<u32>) -> bool {
	target.map(|t| gathered_gas >= t).unwrap_or(false)
}

/// Drives the "assigned builder released on queue mutation" rule (§5
/// "Ordering guarantees"): a scheduler mid-decision must restart producer
/// selection if the queue's `modified` latch is set.
pub fn should_restart_selection(queue: &ProductionQueue) -> bool {
	queue.modified
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn gateway_hard_cap_blocks_only_at_the_limit() {
		let act = MacroAct::Unit(UnitTypeId::Gateway);
		assert!(!gateway_hard_cap_blocks(&act, 9));
		assert!(gateway_hard_cap_blocks(&act, 10));
	}

	#[test]
	fn jam_requires_resources_and_no_intentional_save() {
		assert!(production_jammed(400, 360, true, false, false));
		assert!(!production_jammed(400, 360, true, false, true));
		assert!(!production_jammed(400, 360, false, false, false));
		assert!(!production_jammed(100, 360, true, false, false));
	}

	#[test]
	fn worker_depot_choice_prefers_farthest_from_main() {
		let candidates = [(1, 5.0), (2, 40.0), (3, 12.0)];
		assert_eq!(choose_worker_depot(&candidates), Some(2));
	}

	#[test]
	fn larva_hatchery_choice_differs_for_workers_versus_combat_units() {
		let candidates = [(1, 2, 3), (2, 0, 1)];
		assert_eq!(choose_larva_hatchery(true, &candidates), Some(2));
		assert_eq!(choose_larva_hatchery(false, &candidates), Some(1));
	}

	#[test]
	fn goal_drop_reason_prefers_completed_over_failed() {
		assert_eq!(goal_drop_reason(true, false, false), Some(DropReason::Completed));
		assert_eq!(
			goal_drop_reason(false, false, false),
			Some(DropReason::NoPotentialProducerAndNoPrerequisiteBeingBuilt)
		);
		assert_eq!(goal_drop_reason(false, true, false), None);
	}
}
