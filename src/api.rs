//! The external game API bridge (§6): a read/write interface the decision
//! core consumes each frame. Modeled as a trait rather than a concrete
//! websocket/protobuf client — the engine connection is assumed to exist
//! outside this crate, same as the map-analysis and opponent-model services.

use crate::{
	action::Command,
	geometry::Point2,
	ids::UnitTypeId,
	player::Race,
	units::{AllUnits, Units},
};

/// A bullet/projectile observation (§6), used by `InformationTracker` to
/// latch `enemyHasStorm`.
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
	pub type_id: UnitTypeId,
	pub position: Point2,
	pub owner: u32,
	pub target: Option<Point2>,
	pub remove_timer: u32,
}

/// Resources reported for a single player each frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerResources {
	pub minerals: u32,
	pub gas: u32,
	/// Doubled supply, matching Brood War's own internal convention (§10.3).
	pub supply_used: u32,
	pub supply_total: u32,
}

/// The read/write surface the decision core needs from the running game
/// (§6). Every method is a per-frame query or a queued write; there is no
/// async boundary because the engine calls into the core once per frame and
/// blocks until it returns (§5 "Scheduling model").
pub trait GameClient {
	fn current_frame(&self) -> u32;
	fn my_race(&self) -> Race;
	fn enemy_race(&self) -> Race;

	fn my_resources(&self) -> PlayerResources;

	fn all_units(&self) -> &AllUnits;

	/// Starting-location tile candidates (§6), in placement order.
	fn start_locations(&self) -> &[Point2];
	fn map_size(&self) -> (u32, u32);

	fn is_buildable(&self, tile: Point2) -> bool;
	fn is_walkable(&self, walk_tile: Point2) -> bool;
	fn is_visible(&self, tile: Point2) -> bool;
	fn is_explored(&self, tile: Point2) -> bool;
	fn has_creep(&self, tile: Point2) -> bool;

	fn units_on_tile(&self, tile: Point2) -> Units;
	fn closest_unit(&self, from: Point2, filter: impl Fn(&crate::unit::Unit) -> bool) -> Option<u64>;

	fn bullets(&self) -> &[Bullet];

	/// Queues a command against a unit tag for this frame. Implementations
	/// are free to batch same-ability commands the way the teacher's
	/// `Commander` does; this trait only specifies the logical effect.
	fn command(&mut self, tag: u64, command: Command);
}

/// General-purpose lurker-deployment posture, set via
/// [`CombatController::set_general_lurker_tactic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LurkerTactic {
	Ambush,
	Defend,
	Aggressive,
}

/// The scout-management collaborator (§6, bi-directional).
pub trait ScoutController {
	fn set_gas_steal(&mut self, on: bool);
	fn set_scout_command(&mut self, command: Command);
	fn release_scout_worker(&mut self);
	fn worker_scout(&self) -> Option<u64>;
	fn gas_steal_over(&self) -> bool;
}

/// The combat-management collaborator (§6, bi-directional).
pub trait CombatController {
	fn set_aggression(&mut self, aggressive: bool);
	fn pull_workers(&mut self, n: u32);
	fn release_workers(&mut self);
	fn set_general_lurker_tactic(&mut self, tactic: LurkerTactic);
}
