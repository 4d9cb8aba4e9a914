//! Enemy opening classification (§3 `OpeningPlan`, §4.7
//! "OpponentPlanRecognizer"). Grounded in Steamhammer's `OpponentPlan.cpp`:
//! a priority-ordered rule list evaluated periodically, latching once a
//! hard-committing classification is reached.

/// Enemy opening classification (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningPlan {
	Unknown,
	Contain,
	Proxy,
	WorkerRush,
	FastRush,
	HeavyRush,
	Factory,
	Wraith,
	SafeExpand,
	NakedExpand,
	Turtle,
}

impl Default for OpeningPlan {
	fn default() -> Self {
		OpeningPlan::Unknown
	}
}

impl OpeningPlan {
	/// Plans that, once reached, latch permanently (§4.7).
	pub fn is_hard_committing(self) -> bool {
		matches!(self, OpeningPlan::Proxy | OpeningPlan::WorkerRush | OpeningPlan::FastRush | OpeningPlan::Wraith)
	}

	/// Serializes to the token stored in the opponent-history file (§6
	/// "Opponent model"), independent of `Debug` so a future variant rename
	/// doesn't silently change what's on disk.
	pub fn as_skill_str(self) -> &'static str {
		match self {
			OpeningPlan::Unknown => "Unknown",
			OpeningPlan::Contain => "Contain",
			OpeningPlan::Proxy => "Proxy",
			OpeningPlan::WorkerRush => "WorkerRush",
			OpeningPlan::FastRush => "FastRush",
			OpeningPlan::HeavyRush => "HeavyRush",
			OpeningPlan::Factory => "Factory",
			OpeningPlan::Wraith => "Wraith",
			OpeningPlan::SafeExpand => "SafeExpand",
			OpeningPlan::NakedExpand => "NakedExpand",
			OpeningPlan::Turtle => "Turtle",
		}
	}

	pub fn from_skill_str(s: &str) -> Option<Self> {
		Some(match s {
			"Unknown" => OpeningPlan::Unknown,
			"Contain" => OpeningPlan::Contain,
			"Proxy" => OpeningPlan::Proxy,
			"WorkerRush" => OpeningPlan::WorkerRush,
			"FastRush" => OpeningPlan::FastRush,
			"HeavyRush" => OpeningPlan::HeavyRush,
			"Factory" => OpeningPlan::Factory,
			"Wraith" => OpeningPlan::Wraith,
			"SafeExpand" => OpeningPlan::SafeExpand,
			"NakedExpand" => OpeningPlan::NakedExpand,
			"Turtle" => OpeningPlan::Turtle,
			_ => return None,
		})
	}
}

/// Recognition window (§4.7): classification only runs inside this frame
/// range.
pub const RECOGNITION_WINDOW: (u32, u32) = (100, 7200);
/// How often classification re-runs inside the window (§4.7, §5).
pub const RECOGNITION_PERIOD: u32 = 12;

const FAST_RUSH_TRAVEL_SLACK_FRAMES: u32 = 3000;
const BARRACKS_RUSH_FRAME: u32 = 2375;
const GATEWAY_RUSH_FRAME: u32 = 2540;
const SPAWNING_POOL_RUSH_FRAME: u32 = 2675;
const TWO_PRODUCER_RUSH_FRAME: u32 = 3200;

/// Inputs the classifier needs each pass (§4.7), already boiled down by the
/// caller from raw observations so this module stays pure decision logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecognitionSignals {
	/// Any visible non-refinery, non-ebay/depot/pylon-equivalent enemy
	/// building within 24 tiles of our main (proxy) or, if we hold our
	/// natural, within 18 tiles of it.
	pub suspicious_building_near_our_base: bool,
	/// A defensive building (bunker/cannon/creep colony/sunken/forge)
	/// within 24 tiles of our natural.
	pub defensive_building_near_our_natural: bool,
	pub enemy_workers_closer_to_us_than_home: u32,
	/// Earliest sighted frame of a basic military unit, minus estimated
	/// travel time from the nearest enemy base, if any is within the
	/// fast-rush slack.
	pub military_unit_adjusted_frame: Option<u32>,
	/// Earliest predicted-completion frame of a rush-relevant producer
	/// (barracks/gateway/spawning pool), if any.
	pub earliest_rush_building_completion: Option<(RushBuildingKind, u32)>,
	pub producers_completing_before_3200: u32,
	pub is_terran_enemy: bool,
	pub starport_training_no_addon: bool,
	pub has_academy: bool,
	pub enemy_hatcheries_with_pool_no_extractor: u32,
	pub enemy_barracks: u32,
	pub enemy_refineries: u32,
	pub enemy_command_centers: u32,
	pub enemy_gateways: u32,
	pub enemy_assimilators: u32,
	pub enemy_nexuses: u32,
	pub enemy_base_count: u32,
	pub enemy_bunker_or_cannon_seen: bool,
	pub enemy_bunkers: u32,
	pub enemy_cannons: u32,
	pub enemy_sunkens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RushBuildingKind {
	Barracks,
	Gateway,
	SpawningPool,
}

impl RushBuildingKind {
	fn deadline(self) -> u32 {
		match self {
			RushBuildingKind::Barracks => BARRACKS_RUSH_FRAME,
			RushBuildingKind::Gateway => GATEWAY_RUSH_FRAME,
			RushBuildingKind::SpawningPool => SPAWNING_POOL_RUSH_FRAME,
		}
	}
}

#[derive(Default)]
pub struct OpponentPlanRecognizer {
	pub plan: OpeningPlan,
	latched: bool,
}

impl OpponentPlanRecognizer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Runs one classification pass (§4.7 "Classification priority"). A
	/// no-op once latched, and a no-op outside [`RECOGNITION_WINDOW`]/off
	/// the [`RECOGNITION_PERIOD`] cadence.
	pub fn classify(&mut self, frame: u32, signals: &RecognitionSignals) {
		if self.latched {
			return;
		}
		if frame < RECOGNITION_WINDOW.0 || frame > RECOGNITION_WINDOW.1 || frame % RECOGNITION_PERIOD != 0 {
			return;
		}
		if let Some(plan) = Self::evaluate(signals) {
			self.plan = plan;
			if plan.is_hard_committing() {
				self.latched = true;
			}
		}
	}

	fn evaluate(s: &RecognitionSignals) -> Option<OpeningPlan> {
		// 1. Proxy / Contain.
		if s.suspicious_building_near_our_base {
			return Some(OpeningPlan::Proxy);
		}
		if s.defensive_building_near_our_natural {
			return Some(OpeningPlan::Contain);
		}

		// 2. Rushes.
		if s.enemy_workers_closer_to_us_than_home >= 3 {
			return Some(OpeningPlan::WorkerRush);
		}
		if let Some(adjusted) = s.military_unit_adjusted_frame {
			if adjusted <= FAST_RUSH_TRAVEL_SLACK_FRAMES {
				return Some(OpeningPlan::FastRush);
			}
		}
		if let Some((kind, completion)) = s.earliest_rush_building_completion {
			if completion <= kind.deadline() {
				return Some(OpeningPlan::FastRush);
			}
		}
		if s.producers_completing_before_3200 >= 2 {
			let _ = TWO_PRODUCER_RUSH_FRAME;
			return Some(OpeningPlan::FastRush);
		}

		// 3. Wraith/Factory (terran only).
		if s.is_terran_enemy && !s.has_academy {
			if s.starport_training_no_addon {
				return Some(OpeningPlan::Wraith);
			}
		}

		// 4. HeavyRush.
		if s.enemy_hatcheries_with_pool_no_extractor >= 2
			|| (s.enemy_barracks >= 2 && s.enemy_refineries == 0 && s.enemy_command_centers <= 1)
			|| (s.enemy_gateways >= 2 && s.enemy_assimilators == 0 && s.enemy_nexuses <= 1)
		{
			return Some(OpeningPlan::HeavyRush);
		}

		// 5/6/7. Expansion / turtle classification by enemy base count.
		if s.enemy_base_count >= 2 {
			if s.enemy_bunker_or_cannon_seen {
				return Some(OpeningPlan::SafeExpand);
			}
			return Some(OpeningPlan::NakedExpand);
		}
		if s.enemy_bunkers >= 2 || s.enemy_cannons >= 2 || s.enemy_sunkens >= 2 {
			return Some(OpeningPlan::Turtle);
		}

		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn base_signals() -> RecognitionSignals {
		RecognitionSignals::default()
	}

	#[test]
	fn proxy_building_takes_priority_over_everything_else() {
		let mut signals = base_signals();
		signals.suspicious_building_near_our_base = true;
		signals.enemy_workers_closer_to_us_than_home = 5;
		assert_eq!(OpponentPlanRecognizer::evaluate(&signals), Some(OpeningPlan::Proxy));
	}

	#[test]
	fn proxy_classification_latches_against_later_contradicting_signals() {
		let mut recognizer = OpponentPlanRecognizer::new();
		let mut signals = base_signals();
		signals.suspicious_building_near_our_base = true;
		recognizer.classify(1800, &signals);
		assert_eq!(recognizer.plan, OpeningPlan::Proxy);

		let mut later = base_signals();
		later.enemy_base_count = 3;
		recognizer.classify(3600, &later);
		assert_eq!(recognizer.plan, OpeningPlan::Proxy);
	}

	#[test]
	fn naked_expand_requires_no_defensive_building_seen() {
		let mut signals = base_signals();
		signals.enemy_base_count = 2;
		assert_eq!(OpponentPlanRecognizer::evaluate(&signals), Some(OpeningPlan::NakedExpand));
		signals.enemy_bunker_or_cannon_seen = true;
		assert_eq!(OpponentPlanRecognizer::evaluate(&signals), Some(OpeningPlan::SafeExpand));
	}

	#[test]
	fn classification_is_a_noop_outside_the_recognition_window() {
		let mut recognizer = OpponentPlanRecognizer::new();
		let mut signals = base_signals();
		signals.suspicious_building_near_our_base = true;
		recognizer.classify(50, &signals);
		assert_eq!(recognizer.plan, OpeningPlan::Unknown);
	}
}
