//! Opening-book choice, unit-mix targeting, and urgent queue intervention
//! (§4.9 "StrategyCoordinator"). Grounded in Steamhammer's
//! `StrategyManager.cpp`/`StrategyBossZerg.cpp`: per-frame urgent checks
//! that can cancel or inject production items, plus a gas on/off toggle.

use crate::{opponent_plan_recognizer::OpeningPlan, player::Race};

/// A named unit-mix target the coordinator steers toward (§4.9 "Opening
/// groups"). The protoss set named by the spec; other races use an
/// analogous small enumeration of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningGroup {
	Zealots,
	Dragoons,
	DarkTemplar,
	Drop,
	Vultures,
	Tanks,
	Mutalisks,
	HydraBust,
}

impl OpeningGroup {
	/// Serializes to the token stored in the opponent-history file (§6
	/// "Opponent model"), so a remembered unit-mix choice survives a
	/// restart the same way the recognized opening does.
	pub fn as_skill_str(self) -> &'static str {
		match self {
			OpeningGroup::Zealots => "Zealots",
			OpeningGroup::Dragoons => "Dragoons",
			OpeningGroup::DarkTemplar => "DarkTemplar",
			OpeningGroup::Drop => "Drop",
			OpeningGroup::Vultures => "Vultures",
			OpeningGroup::Tanks => "Tanks",
			OpeningGroup::Mutalisks => "Mutalisks",
			OpeningGroup::HydraBust => "HydraBust",
		}
	}

	pub fn from_skill_str(s: &str) -> Option<Self> {
		Some(match s {
			"Zealots" => OpeningGroup::Zealots,
			"Dragoons" => OpeningGroup::Dragoons,
			"DarkTemplar" => OpeningGroup::DarkTemplar,
			"Drop" => OpeningGroup::Drop,
			"Vultures" => OpeningGroup::Vultures,
			"Tanks" => OpeningGroup::Tanks,
			"Mutalisks" => OpeningGroup::Mutalisks,
			"HydraBust" => OpeningGroup::HydraBust,
			_ => return None,
		})
	}
}

/// Gas collection on/off thresholds (§4.9).
const GAS_OFF_MIN_SURPLUS: u32 = 400;
const GAS_OFF_RATIO: u32 = 4;

#[derive(Default)]
pub struct StrategyCoordinator {
	pub out_of_book: bool,
	pub opening_group: Option<OpeningGroup>,
	/// Latches once the "cancel static defense, enemy is passive" reaction
	/// has fired for this game (§4.9).
	cancelled_defense_for_passive_opening: bool,
	pub gas_collection_enabled: bool,
}

impl StrategyCoordinator {
	pub fn new() -> Self {
		Self {
			gas_collection_enabled: true,
			..Default::default()
		}
	}

	/// While still in the opening book, a passive enemy opening
	/// (Turtle/SafeExpand/NakedExpand) means queued/under-construction
	/// static defense is unnecessary (§4.9). Returns `true` exactly once,
	/// the frame this reaction should fire.
	pub fn should_cancel_defense_for_passive_opening(&mut self, enemy_plan: OpeningPlan) -> bool {
		if self.cancelled_defense_for_passive_opening {
			return false;
		}
		let passive = matches!(enemy_plan, OpeningPlan::Turtle | OpeningPlan::SafeExpand | OpeningPlan::NakedExpand);
		if !self.out_of_book && passive {
			self.cancelled_defense_for_passive_opening = true;
			true
		} else {
			false
		}
	}

	/// Gas-toggle hysteresis (§4.9): turn off when we're swimming in gas
	/// relative to minerals and the queue doesn't need more; turn on when
	/// upcoming items need more gas than we currently have.
	pub fn update_gas_collection(&mut self, current_gas: u32, current_minerals: u32, queued_gas_needed: u32) {
		if self.gas_collection_enabled
			&& current_gas > GAS_OFF_MIN_SURPLUS
			&& current_gas > GAS_OFF_RATIO * current_minerals
			&& queued_gas_needed <= current_gas
		{
			self.gas_collection_enabled = false;
		} else if !self.gas_collection_enabled && queued_gas_needed > current_gas {
			self.gas_collection_enabled = true;
		}
	}

	/// Transitions between opening groups as the game progresses (§4.9),
	/// e.g. "vultures" -> "tanks" after a unit-count threshold. `counts`
	/// reports how many of the trigger unit the player currently has.
	pub fn maybe_transition_group(&mut self, from: OpeningGroup, to: OpeningGroup, trigger_count: u32, threshold: u32) {
		if self.opening_group == Some(from) && trigger_count >= threshold {
			self.opening_group = Some(to);
		}
	}

	/// Has-drop-tech gate (§4.9), race-specific.
	pub fn has_drop_tech(race: Race, overlord_transport_researched: bool, overlord_count: u32, completed_shuttles: u32, completed_dropships: u32) -> bool {
		match race {
			Race::Zerg => overlord_transport_researched && overlord_count >= 1,
			Race::Protoss => completed_shuttles >= 1,
			Race::Terran => completed_dropships >= 1,
			Race::Random => false,
		}
	}

	/// Marks the coordinator as having left the opening book (§4.9, §4.5
	/// step 5: "If the queue is empty, mark 'out of book'").
	pub fn enter_out_of_book(&mut self) {
		self.out_of_book = true;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cancels_defense_exactly_once_for_a_passive_opening() {
		let mut coordinator = StrategyCoordinator::new();
		assert!(coordinator.should_cancel_defense_for_passive_opening(OpeningPlan::Turtle));
		assert!(!coordinator.should_cancel_defense_for_passive_opening(OpeningPlan::Turtle));
	}

	#[test]
	fn does_not_cancel_defense_for_an_aggressive_opening() {
		let mut coordinator = StrategyCoordinator::new();
		assert!(!coordinator.should_cancel_defense_for_passive_opening(OpeningPlan::FastRush));
	}

	#[test]
	fn gas_collection_turns_off_once_swimming_in_gas() {
		let mut coordinator = StrategyCoordinator::new();
		coordinator.update_gas_collection(500, 50, 100);
		assert!(!coordinator.gas_collection_enabled);
		coordinator.update_gas_collection(10, 50, 300);
		assert!(coordinator.gas_collection_enabled);
	}

	#[test]
	fn drop_tech_gate_is_race_specific() {
		assert!(StrategyCoordinator::has_drop_tech(Race::Protoss, false, 0, 1, 0));
		assert!(!StrategyCoordinator::has_drop_tech(Race::Protoss, false, 0, 0, 0));
		assert!(StrategyCoordinator::has_drop_tech(Race::Zerg, true, 1, 0, 0));
	}
}
