//! Per-frame worker rebalancing (§4.4 "WorkerRegistry and
//! WorkerScheduler"). Grounded in Steamhammer's `WorkerManager.cpp`: a
//! fixed-order scheduling cycle run once per frame, plus the danger-response
//! and self-defense rules that keep workers alive around enemy fire.

use crate::{
	action::Command,
	config::CoreConfig,
	distance::Distance,
	geometry::Point2,
	ids::UnitTypeId,
	player::Alliance,
	unit::Unit,
	units::AllUnits,
	worker_registry::{Job, WorkerRegistry},
};
use rustc_hash::FxHashMap;

const MARGIN_TILES: f32 = 2.0;
const IDLE_HYSTERESIS_TILES: f32 = 2.0;
const SAFE_UNBURROW_FRAMES: u32 = 72;
const UNBURROW_CHECK_PERIOD: u32 = 29;
const SELF_DEFENSE_PATCH_RADIUS: f32 = 200.0 / 32.0;
const SELF_DEFENSE_TARGET_RADIUS: f32 = 64.0 / 32.0;
const POSTED_LEASH_TILES: f32 = 8.0;
/// Distance within which a cargo-carrying worker is routed to a depot by
/// the return-cargo step rather than left on its current job (§4.4 step 5).
pub const RETURN_CARGO_RADIUS: f32 = 600.0 / 32.0;

/// Tracks workers currently burrowed for safety, keyed by tag, so the
/// unburrow sweep (§4.4 "Danger response") can age them out.
#[derive(Default)]
pub struct WorkerScheduler {
	burrowed_for_safety: FxHashMap<u64, u32>,
	safe_since: FxHashMap<u64, u32>,
}

impl WorkerScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether `worker` is in danger: the nearest visible enemy whose weapon
	/// range plus a margin reaches it exists within sight (§4.4 "Danger
	/// response"). `enemy_threat_ranges` gives each candidate enemy's
	/// position and effective weapon range.
	fn in_danger(worker: &Unit, enemy_threat_ranges: &[(Point2, f32)], is_idle: bool) -> Option<Point2> {
		let margin = if is_idle { MARGIN_TILES + IDLE_HYSTERESIS_TILES } else { MARGIN_TILES };
		enemy_threat_ranges
			.iter()
			.find(|(pos, range)| worker.position.distance(*pos) <= range + margin)
			.map(|(pos, _)| *pos)
	}

	/// Danger response for one worker: burrow if possible and safe to do so,
	/// otherwise flee. Returns the command to issue, if any.
	pub fn respond_to_danger(
		&mut self,
		worker: &Unit,
		enemy_threat_ranges: &[(Point2, f32)],
		is_idle: bool,
		can_burrow: bool,
		enemy_detector_in_range: bool,
		frame: u32,
	) -> Option<Command> {
		let threat_pos = Self::in_danger(worker, enemy_threat_ranges, is_idle)?;
		if can_burrow && !enemy_detector_in_range {
			self.burrowed_for_safety.insert(worker.tag, frame);
			Some(Command::Burrow)
		} else {
			let away = worker.position + (worker.position - threat_pos).normalize() * 3.0;
			Some(Command::Move(away))
		}
	}

	/// Self-defense exception (§4.4): a mining worker near its patch with a
	/// stationary nearby enemy attacks rather than flees.
	pub fn should_self_defend(worker_position: Point2, patch_position: Point2, enemy_position: Point2, enemy_is_moving: bool) -> bool {
		!enemy_is_moving
			&& worker_position.distance(patch_position) <= SELF_DEFENSE_PATCH_RADIUS
			&& worker_position.distance(enemy_position) <= SELF_DEFENSE_TARGET_RADIUS
	}

	/// Runs the unburrow sweep (§4.4), called every ~29 frames. Workers that
	/// are dead/gone or force-unburrowed drop out; safe workers unburrow
	/// after `SAFE_UNBURROW_FRAMES`.
	pub fn sweep_unburrow(&mut self, frame: u32, alive_and_burrowed: impl Fn(u64) -> bool, still_in_danger: impl Fn(u64) -> bool) -> Vec<u64> {
		if frame % UNBURROW_CHECK_PERIOD != 0 {
			return Vec::new();
		}
		let mut to_unburrow = Vec::new();
		let safe_since = &mut self.safe_since;
		self.burrowed_for_safety.retain(|&tag, _since| {
			if !alive_and_burrowed(tag) {
				safe_since.remove(&tag);
				return false;
			}
			if still_in_danger(tag) {
				safe_since.remove(&tag);
				return true;
			}
			let safe_start = *safe_since.entry(tag).or_insert(frame);
			if frame.saturating_sub(safe_start) >= SAFE_UNBURROW_FRAMES {
				to_unburrow.push(tag);
				safe_since.remove(&tag);
				false
			} else {
				true
			}
		});
		to_unburrow
	}

	/// Posted-worker behavior (§4.4 "Posted workers"): cargo first, then
	/// return to post if far away, else idle.
	pub fn posted_worker_command(&self, worker: &Unit, post: Point2) -> Command {
		if worker.is_carrying_resource() {
			Command::ReturnCargo
		} else if worker.position.distance(post) > POSTED_LEASH_TILES {
			Command::Move(post)
		} else {
			Command::Move(worker.position)
		}
	}

	/// Gas-worker top-up (§4.4 step 3): for one refinery, how many more
	/// workers are needed to reach `config.workers_per_refinery`.
	pub fn gas_workers_needed(&self, registry: &WorkerRegistry, refinery: u64, config: &CoreConfig) -> u32 {
		config.workers_per_refinery.saturating_sub(registry.gas_workers_on(refinery))
	}

	/// Repair-worker count cap (§4.4 step 6, terran only):
	/// `floor(total_scvs / 6) + 1`.
	pub fn max_repairers(total_scvs: u32) -> u32 {
		total_scvs / 6 + 1
	}

	/// Idle-worker assignment (§4.4 step 4): carrying cargo goes to
	/// ReturnCargo, otherwise Minerals at a non-full depot.
	pub fn idle_worker_job(worker: &Unit, non_full_depot: Option<(u64, u64)>) -> Option<Job> {
		if worker.is_carrying_resource() {
			return None; // handled by the return-cargo step instead
		}
		non_full_depot.map(|(depot, patch)| Job::Minerals { depot, patch })
	}
}

/// Computes the current `MaxWorkers` ceiling (§4.4 "Configuration options"),
/// reused here so the scheduler and `ResourceTracker`/`BaseRegistry`-driven
/// callers agree on one formula.
pub fn max_workers(config: &CoreConfig, patches: u32, refineries: u32) -> u32 {
	config.max_workers(patches, refineries)
}

/// Counts workers currently assigned to mining or gas, used by callers that
/// need to know whether a base is already fully staffed.
pub fn working_worker_count(all_units: &AllUnits) -> u32 {
	all_units.my.workers.iter().filter(|u| u.alliance == Alliance::Own && !u.is_idle).count() as u32
}

pub fn is_worker_type(type_id: UnitTypeId) -> bool {
	type_id.is_worker()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::unit::Unit;

	fn worker_at(x: f32, y: f32) -> Unit {
		Unit {
			tag: 1,
			type_id: UnitTypeId::Scv,
			alliance: Alliance::Own,
			position: Point2::new(x, y),
			tile_position: Point2::new(x, y),
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
	fn idle_worker_margin_is_wider_than_working_margin() {
		let worker = worker_at(0.0, 0.0);
		let threats = vec![(Point2::new(4.0, 0.0), 0.5)];
		assert!(WorkerScheduler::in_danger(&worker, &threats, true).is_some());
		assert!(WorkerScheduler::in_danger(&worker, &threats, false).is_none());
	}

	#[test]
	fn max_repairers_matches_formula() {
		assert_eq!(WorkerScheduler::max_repairers(12), 3);
		assert_eq!(WorkerScheduler::max_repairers(5), 1);
	}

	#[test]
	fn self_defense_requires_both_proximities_and_stationary_enemy() {
		let worker = Point2::new(0.0, 0.0);
		let patch = Point2::new(1.0, 0.0);
		let enemy = Point2::new(1.5, 0.0);
		assert!(WorkerScheduler::should_self_defend(worker, patch, enemy, false));
		assert!(!WorkerScheduler::should_self_defend(worker, patch, enemy, true));
	}
}
