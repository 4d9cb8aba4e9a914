//! Deterministic `GameClient`/`ScoutController`/`CombatController` fakes used
//! by the scenario tests in `tests/scenarios.rs`. Grounded in the style of
//! the teacher's own `bot.rs` test doubles: a plain struct that stores
//! exactly what the trait needs and nothing else, with commands recorded
//! rather than actually applied anywhere.

use bw_macro_core::{
	action::Command,
	api::{Bullet, CombatController, GameClient, LurkerTactic, PlayerResources, ScoutController},
	geometry::Point2,
	ids::UnitTypeId,
	player::{Alliance, Race},
	unit::Unit,
	units::{AllUnits, Units},
};
use std::collections::HashSet;

/// Builds a unit with sensible defaults for scenario tests; override fields
/// on the returned struct as needed.
pub fn unit(tag: u64, type_id: UnitTypeId, alliance: Alliance, position: Point2) -> Unit {
	Unit {
		tag,
		type_id,
		alliance,
		position,
		tile_position: position,
		hit_points: 100.0,
		hit_points_max: 100.0,
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
		is_idle: false,
		addon_tag: None,
		orders: Vec::new(),
		last_commanded_frame: None,
	}
}

/// Buckets a flat unit list into an [`AllUnits`] snapshot the way the real
/// game bridge would (§6): partitioned by alliance, then by
/// building/worker/larva within each side, plus the top-level resource
/// buckets. Tests build their world as one `Vec<Unit>` and hand it here
/// rather than filling out every `PlayerUnits` field by hand.
pub fn build_all_units(list: Vec<Unit>) -> AllUnits {
	let mut all = AllUnits::default();
	for u in list {
		all.all.push(u.clone());
		if u.type_id.is_mineral_field() {
			all.mineral_fields.push(u.clone());
		}
		if u.type_id.is_geyser() {
			all.vespene_geysers.push(u.clone());
		}
		let bucket = match u.alliance {
			Alliance::Own => &mut all.my,
			Alliance::Enemy => &mut all.enemy,
			Alliance::Neutral => continue,
		};
		bucket.all.push(u.clone());
		if u.type_id.is_building() {
			bucket.structures.push(u.clone());
			if u.type_id.is_resource_depot() {
				bucket.resource_depots.push(u.clone());
			}
			if u.type_id.is_refinery() {
				bucket.refineries.push(u.clone());
			}
		} else {
			bucket.units.push(u.clone());
			if u.type_id.is_worker() {
				bucket.workers.push(u.clone());
			}
			if u.type_id.is_larva() {
				bucket.larvas.push(u.clone());
			}
		}
	}
	all
}

/// Minimal `GameClient` double: every per-frame read is an explicit field the
/// test sets up, every write is appended to `commands` for the test to
/// inspect afterwards.
pub struct FakeGameClient {
	pub frame: u32,
	pub my_race: Race,
	pub enemy_race: Race,
	pub resources: PlayerResources,
	pub all_units: AllUnits,
	pub start_locations: Vec<Point2>,
	pub map_size: (u32, u32),
	pub visible_tiles: HashSet<(i32, i32)>,
	pub explored_tiles: HashSet<(i32, i32)>,
	pub creep_tiles: HashSet<(i32, i32)>,
	pub bullets: Vec<Bullet>,
	pub commands: Vec<(u64, Command)>,
}

impl FakeGameClient {
	pub fn new(my_race: Race, enemy_race: Race) -> Self {
		Self {
			frame: 0,
			my_race,
			enemy_race,
			resources: PlayerResources::default(),
			all_units: AllUnits::default(),
			start_locations: Vec::new(),
			map_size: (128, 128),
			visible_tiles: HashSet::new(),
			explored_tiles: HashSet::new(),
			creep_tiles: HashSet::new(),
			bullets: Vec::new(),
			commands: Vec::new(),
		}
	}

	/// Marks every tile out to `radius` of `center` visible and explored, the
	/// way a base with vision up keeps its own footprint lit.
	pub fn reveal_around(&mut self, center: Point2, radius: i32) {
		let (cx, cy) = (center.x as i32, center.y as i32);
		for dx in -radius..=radius {
			for dy in -radius..=radius {
				let tile = (cx + dx, cy + dy);
				self.visible_tiles.insert(tile);
				self.explored_tiles.insert(tile);
			}
		}
	}

	pub fn commands_for(&self, tag: u64) -> Vec<&Command> {
		self.commands.iter().filter(|(t, _)| *t == tag).map(|(_, c)| c).collect()
	}
}

impl GameClient for FakeGameClient {
	fn current_frame(&self) -> u32 {
		self.frame
	}

	fn my_race(&self) -> Race {
		self.my_race
	}

	fn enemy_race(&self) -> Race {
		self.enemy_race
	}

	fn my_resources(&self) -> PlayerResources {
		self.resources
	}

	fn all_units(&self) -> &AllUnits {
		&self.all_units
	}

	fn start_locations(&self) -> &[Point2] {
		&self.start_locations
	}

	fn map_size(&self) -> (u32, u32) {
		self.map_size
	}

	fn is_buildable(&self, _tile: Point2) -> bool {
		true
	}

	fn is_walkable(&self, _walk_tile: Point2) -> bool {
		true
	}

	fn is_visible(&self, tile: Point2) -> bool {
		self.visible_tiles.contains(&(tile.x as i32, tile.y as i32))
	}

	fn is_explored(&self, tile: Point2) -> bool {
		self.explored_tiles.contains(&(tile.x as i32, tile.y as i32))
	}

	fn has_creep(&self, tile: Point2) -> bool {
		self.creep_tiles.contains(&(tile.x as i32, tile.y as i32))
	}

	fn units_on_tile(&self, tile: Point2) -> Units {
		let (tx, ty) = tile.to_tile();
		self.all_units.all.filter(|u| u.tile_position.to_tile() == (tx, ty))
	}

	fn closest_unit(&self, from: Point2, filter: impl Fn(&Unit) -> bool) -> Option<u64> {
		use bw_macro_core::distance::Distance;
		self.all_units
			.all
			.iter()
			.filter(|u| filter(u))
			.min_by(|a, b| a.position.distance_squared(from).partial_cmp(&b.position.distance_squared(from)).unwrap())
			.map(|u| u.tag)
	}

	fn bullets(&self) -> &[Bullet] {
		&self.bullets
	}

	fn command(&mut self, tag: u64, command: Command) {
		self.commands.push((tag, command));
	}
}

/// Records every nudge from the decision core without driving an actual
/// scout/combat layer.
#[derive(Default)]
pub struct FakeCollaborators {
	pub gas_steal: bool,
	pub scout_worker: Option<u64>,
	pub scout_commands: Vec<Command>,
	pub scout_released: bool,
	pub gas_steal_over: bool,
	pub aggressive: bool,
	pub pulled_workers: u32,
	pub workers_released: bool,
	pub lurker_tactic: Option<LurkerTactic>,
}

impl FakeCollaborators {
	pub fn new(scout_worker: Option<u64>) -> Self {
		Self { scout_worker, ..Self::default() }
	}
}

impl ScoutController for FakeCollaborators {
	fn set_gas_steal(&mut self, on: bool) {
		self.gas_steal = on;
	}

	fn set_scout_command(&mut self, command: Command) {
		self.scout_commands.push(command);
	}

	fn release_scout_worker(&mut self) {
		self.scout_released = true;
		self.scout_worker = None;
	}

	fn worker_scout(&self) -> Option<u64> {
		self.scout_worker
	}

	fn gas_steal_over(&self) -> bool {
		self.gas_steal_over
	}
}

impl CombatController for FakeCollaborators {
	fn set_aggression(&mut self, aggressive: bool) {
		self.aggressive = aggressive;
	}

	fn pull_workers(&mut self, n: u32) {
		self.pulled_workers = n;
	}

	fn release_workers(&mut self) {
		self.workers_released = true;
	}

	fn set_general_lurker_tactic(&mut self, tactic: LurkerTactic) {
		self.lurker_tactic = Some(tactic);
	}
}
