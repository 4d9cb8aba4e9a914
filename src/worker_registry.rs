//! Worker job assignment and the reverse indices the scheduler needs to
//! make O(1) decisions (§3 `Worker`, §4.4 data model). Grounded in
//! Steamhammer's `WorkerData.cpp`, including its incremental per-depot/
//! per-patch/per-refinery counters (§11) rather than a per-frame rescan.

use crate::geometry::Point2;
use rustc_hash::FxHashMap;

/// A worker's current job (§3). Each variant carries the job-specific
/// payload the scheduler needs to keep the worker doing that job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Job {
	Minerals { depot: u64, patch: u64 },
	Gas { refinery: u64 },
	Build { tile: Point2 },
	Combat,
	Idle,
	Repair { target: u64 },
	Scout,
	ReturnCargo { depot: u64 },
	Unblock { tile: Point2 },
	Posted { location: Point2 },
	PostedBuild { location: Point2 },
	Default,
}

#[derive(Debug, Clone, Copy)]
struct WorkerState {
	job: Job,
	busy_this_frame: bool,
}

/// Maintains every worker's job plus the reverse indices (§11): per-depot
/// mineral-worker count, per-refinery gas-worker count, per-patch miner
/// count. Every index is updated incrementally on job change, never
/// recomputed by scanning all workers.
#[derive(Default)]
pub struct WorkerRegistry {
	workers: FxHashMap<u64, WorkerState>,
	miners_per_depot: FxHashMap<u64, u32>,
	miners_per_patch: FxHashMap<u64, u32>,
	gas_workers_per_refinery: FxHashMap<u64, u32>,
}

impl WorkerRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn job(&self, worker: u64) -> Job {
		self.workers.get(&worker).map(|w| w.job).unwrap_or(Job::Default)
	}

	pub fn is_busy_this_frame(&self, worker: u64) -> bool {
		self.workers.get(&worker).map(|w| w.busy_this_frame).unwrap_or(false)
	}

	/// Clears the "busy this frame" flag for every worker. Called once at
	/// the start of `WorkerScheduler`'s cycle (§5 "Ordering guarantees").
	pub fn reset_frame(&mut self) {
		for state in self.workers.values_mut() {
			state.busy_this_frame = false;
		}
	}

	pub fn mark_busy(&mut self, worker: u64) {
		self.workers.entry(worker).or_insert(WorkerState { job: Job::Default, busy_this_frame: false }).busy_this_frame = true;
	}

	pub fn miners_on_patch(&self, patch: u64) -> u32 {
		self.miners_per_patch.get(&patch).copied().unwrap_or(0)
	}

	pub fn miners_on_depot(&self, depot: u64) -> u32 {
		self.miners_per_depot.get(&depot).copied().unwrap_or(0)
	}

	pub fn gas_workers_on(&self, refinery: u64) -> u32 {
		self.gas_workers_per_refinery.get(&refinery).copied().unwrap_or(0)
	}

	/// Finds the patch at `depot` with the fewest assigned miners, breaking
	/// ties by proximity (§4.4 "Patch assignment (mineral locking)").
	/// `patches` lists the candidate patches as `(tag, position)`.
	pub fn least_saturated_patch(&self, depot_position: Point2, patches: &[(u64, Point2)]) -> Option<u64> {
		use crate::distance::Distance;
		patches
			.iter()
			.min_by_key(|(tag, pos)| {
				let count = self.miners_on_patch(*tag);
				let dist = (pos.distance(depot_position) * 1000.0) as i64;
				(count, dist)
			})
			.map(|(tag, _)| *tag)
	}

	/// Sets `worker`'s job, updating all reverse indices for both the old
	/// and new assignment.
	pub fn set_job(&mut self, worker: u64, job: Job) {
		let previous = self.workers.get(&worker).map(|w| w.job);
		if let Some(prev) = previous {
			self.unindex(prev);
		}
		self.index(job);
		self.workers
			.entry(worker)
			.and_modify(|w| w.job = job)
			.or_insert(WorkerState { job, busy_this_frame: false });
	}

	fn index(&mut self, job: Job) {
		match job {
			Job::Minerals { depot, patch } => {
				*self.miners_per_depot.entry(depot).or_insert(0) += 1;
				*self.miners_per_patch.entry(patch).or_insert(0) += 1;
			}
			Job::Gas { refinery } => {
				*self.gas_workers_per_refinery.entry(refinery).or_insert(0) += 1;
			}
			_ => {}
		}
	}

	fn unindex(&mut self, job: Job) {
		match job {
			Job::Minerals { depot, patch } => {
				decrement(&mut self.miners_per_depot, depot);
				decrement(&mut self.miners_per_patch, patch);
			}
			Job::Gas { refinery } => {
				decrement(&mut self.gas_workers_per_refinery, refinery);
			}
			_ => {}
		}
	}

	pub fn remove(&mut self, worker: u64) {
		if let Some(state) = self.workers.remove(&worker) {
			self.unindex(state.job);
		}
	}
}

/// Outcome of builder selection (§4.4 "Builder selection for §4.3").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderSelection {
	Worker(u64),
	/// A candidate exists but is mid-delivery; retry next frame rather than
	/// pulling a worker from across the map.
	Wait,
	None,
}

/// Radius within which a worker counts as "at the same base" as the build
/// target (§4.4).
const SAME_BASE_RADIUS: f32 = 10.0;
/// How close a `PostedBuild` worker's post location must be to the target to
/// count as "posted for this build" (§4.4).
const POSTED_NEAR_TARGET_RADIUS: f32 = 4.0;

/// A worker considered for a build assignment (§4.4).
#[derive(Debug, Clone, Copy)]
pub struct BuilderCandidate {
	pub tag: u64,
	pub position: Point2,
	pub job: Job,
	/// Carrying cargo (minerals/gas) and not immediately redirectable.
	pub encumbered: bool,
}

/// Picks a builder for a pending building at `target` (§4.4 "Builder
/// selection for §4.3"):
/// 1. A gas-steal always uses the scout worker.
/// 2. A worker already posted (`Job::PostedBuild`) near `target` wins.
/// 3. ...unless it's mid-delivery, in which case the caller should wait.
/// 4. Otherwise the nearest unencumbered worker within [`SAME_BASE_RADIUS`]
///    of `target` wins; for protoss a carrying worker in that radius is
///    acceptable too.
/// 5. If every in-radius worker is encumbered, wait for one to finish.
/// 6. Otherwise the nearest unencumbered worker anywhere wins.
pub fn select_builder(is_gas_steal: bool, scout_worker: Option<u64>, target: Point2, candidates: &[BuilderCandidate], is_protoss: bool) -> BuilderSelection {
	use crate::distance::Distance;

	if is_gas_steal {
		return scout_worker.map(BuilderSelection::Worker).unwrap_or(BuilderSelection::None);
	}

	if let Some(posted) = candidates
		.iter()
		.find(|c| matches!(c.job, Job::PostedBuild { location } if location.distance(target) <= POSTED_NEAR_TARGET_RADIUS))
	{
		return if posted.encumbered { BuilderSelection::Wait } else { BuilderSelection::Worker(posted.tag) };
	}

	let in_base = || candidates.iter().filter(|c| c.position.distance(target) <= SAME_BASE_RADIUS);

	if let Some(nearest) = in_base()
		.filter(|c| !c.encumbered || is_protoss)
		.min_by(|a, b| a.position.distance_squared(target).partial_cmp(&b.position.distance_squared(target)).unwrap())
	{
		return BuilderSelection::Worker(nearest.tag);
	}
	if in_base().next().is_some() {
		return BuilderSelection::Wait;
	}

	candidates
		.iter()
		.filter(|c| !c.encumbered)
		.min_by(|a, b| a.position.distance_squared(target).partial_cmp(&b.position.distance_squared(target)).unwrap())
		.map(|c| BuilderSelection::Worker(c.tag))
		.unwrap_or(BuilderSelection::None)
}

fn decrement(map: &mut FxHashMap<u64, u32>, key: u64) {
	if let Some(count) = map.get_mut(&key) {
		*count = count.saturating_sub(1);
		if *count == 0 {
			map.remove(&key);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn least_saturated_patch_prefers_empty_then_closest() {
		let mut registry = WorkerRegistry::new();
		registry.set_job(1, Job::Minerals { depot: 100, patch: 10 });
		let patches = [(10, Point2::new(0.0, 0.0)), (11, Point2::new(1.0, 0.0))];
		let chosen = registry.least_saturated_patch(Point2::new(0.0, 0.0), &patches);
		assert_eq!(chosen, Some(11));
	}

	#[test]
	fn set_job_updates_counters_incrementally() {
		let mut registry = WorkerRegistry::new();
		registry.set_job(1, Job::Minerals { depot: 100, patch: 10 });
		assert_eq!(registry.miners_on_patch(10), 1);
		registry.set_job(1, Job::Gas { refinery: 200 });
		assert_eq!(registry.miners_on_patch(10), 0);
		assert_eq!(registry.gas_workers_on(200), 1);
	}

	#[test]
	fn gas_steal_always_uses_the_scout() {
		let target = Point2::new(50.0, 50.0);
		let candidates = [BuilderCandidate { tag: 9, position: target, job: Job::Default, encumbered: false }];
		assert_eq!(select_builder(true, Some(42), target, &candidates, false), BuilderSelection::Worker(42));
		assert_eq!(select_builder(true, None, target, &candidates, false), BuilderSelection::None);
	}

	#[test]
	fn posted_builder_near_target_is_preferred_over_a_closer_idle_worker() {
		let target = Point2::new(50.0, 50.0);
		let candidates = [
			BuilderCandidate { tag: 1, position: Point2::new(50.0, 49.0), job: Job::PostedBuild { location: Point2::new(50.0, 51.0) }, encumbered: false },
			BuilderCandidate { tag: 2, position: target, job: Job::Default, encumbered: false },
		];
		assert_eq!(select_builder(false, None, target, &candidates, false), BuilderSelection::Worker(1));
	}

	#[test]
	fn encumbered_posted_builder_means_wait() {
		let target = Point2::new(50.0, 50.0);
		let candidates = [BuilderCandidate { tag: 1, position: target, job: Job::PostedBuild { location: target }, encumbered: true }];
		assert_eq!(select_builder(false, None, target, &candidates, false), BuilderSelection::Wait);
	}

	#[test]
	fn nearest_unencumbered_worker_wins_when_nothing_is_posted() {
		let target = Point2::new(0.0, 0.0);
		let candidates = [
			BuilderCandidate { tag: 1, position: Point2::new(5.0, 0.0), job: Job::Minerals { depot: 1, patch: 1 }, encumbered: false },
			BuilderCandidate { tag: 2, position: Point2::new(2.0, 0.0), job: Job::Minerals { depot: 1, patch: 1 }, encumbered: false },
		];
		assert_eq!(select_builder(false, None, target, &candidates, false), BuilderSelection::Worker(2));
	}

	#[test]
	fn in_base_encumbered_workers_block_reaching_across_the_map_unless_protoss() {
		let target = Point2::new(0.0, 0.0);
		let candidates = [
			BuilderCandidate { tag: 1, position: Point2::new(3.0, 0.0), job: Job::ReturnCargo { depot: 1 }, encumbered: true },
			BuilderCandidate { tag: 2, position: Point2::new(40.0, 0.0), job: Job::Minerals { depot: 2, patch: 2 }, encumbered: false },
		];
		assert_eq!(select_builder(false, None, target, &candidates, false), BuilderSelection::Wait);
		assert_eq!(select_builder(false, None, target, &candidates, true), BuilderSelection::Worker(1));
	}
}
