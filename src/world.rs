//! Per-frame orchestration tying every component together in the documented
//! dataflow order (§2 "System Overview": observation -> InformationTracker
//! -> BaseRegistry ownership -> OpponentPlanRecognizer -> StrategyCoordinator
//! / StaticDefensePlanner adjust the queue -> ProductionScheduler dispatches
//! -> BuildingRegistry advances -> WorkerScheduler assigns -> outgoing
//! commands). Grounded in the teacher's `Bot` per-frame update cycle
//! (`bot.rs`): snapshot unit state once per frame, then run every subsystem
//! over that one snapshot in a fixed order.

use crate::{
	action::Command,
	api::{CombatController, GameClient, ScoutController},
	base_registry::{Base, BaseRegistry, ResourceSite},
	building_placer::{BuildingPlacer, MacroLocation},
	building_registry::{BuildingRegistry, BuildingStatus, PlannedBuilding},
	config::CoreConfig,
	constants::{can_host_addon, BUILDING_FOOTPRINTS, RACE_VALUES, REFINERY_IDS, RESOURCE_DEPOT_IDS},
	distance::Distance,
	geometry::Point2,
	ids::UnitTypeId,
	information_tracker::InformationTracker,
	opponent_plan_recognizer::{OpeningPlan, OpponentPlanRecognizer, RecognitionSignals, RushBuildingKind},
	persistence::OpponentModel,
	player::{Alliance, Race},
	production_queue::{self, MacroAct, ProductionItem, ProductionQueue},
	production_scheduler::{self, ProductionGoal},
	resource_tracker::ResourceTracker,
	static_defense_planner::{StaticDefensePlan, StaticDefensePlanner, ThreatSignals, ZergCombatSignals},
	strategy_coordinator::{OpeningGroup, StrategyCoordinator},
	units::AllUnits,
	worker_registry::{select_builder, BuilderCandidate, BuilderSelection, Job, WorkerRegistry},
	worker_scheduler::{self, WorkerScheduler, RETURN_CARGO_RADIUS},
};
use log::{debug, warn};
use rustc_hash::FxHashSet;

/// Ground-reachability radius used when deciding whether a static-defense
/// threat is "near our base" (§4.7 proxy detection), approximated the same
/// way [`crate::base_registry::BASE_RESOURCE_RADIUS`] approximates ground
/// distance with a straight line.
const PROXY_RADIUS: f32 = 24.0;
const NATURAL_DEFENSIVE_RADIUS: f32 = 24.0;

/// Worker count at or below which, with no combat unit built yet, a game is
/// in an opening-survival crisis (§7 "Opening survival replan").
const WORKER_CRISIS_THRESHOLD: u32 = 3;
/// Approximate weapon range (in tiles) used for worker danger checks, since
/// this crate doesn't model per-unit weapon data (§4.4 "Danger response");
/// combined with `WorkerScheduler`'s 2-tile margin this puts a mining worker
/// in danger at 3 tiles from a combat unit, matching an observed vulture
/// encounter (§7 "Worker self-defense vs burrow").
const ENEMY_THREAT_RANGE: f32 = 1.0;
/// Radius within which an enemy detector blocks a burrow-for-safety response
/// (§4.4 "Danger response").
const DETECTOR_CHECK_RADIUS: f32 = 8.0;
/// Radius within which a vulture sighting near an owned base counts as a
/// raid on that base (§4.8 `vulture_raids_seen`), rather than one just
/// passing through the middle of the map.
const VULTURE_RAID_RADIUS: f32 = 12.0;
/// Radius used to associate a larva with its parent hatchery (§4.5 step 6c
/// "producer selection among larva-spawning hatcheries"), since this crate's
/// unit model doesn't carry an explicit larva-to-hatchery backpointer.
const LARVA_HATCHERY_RADIUS: f32 = 3.0;
/// Radius within which a built structure counts as "at" a base, for static
/// defense's "enqueue at most one at a time" rule (§4.8 "Execution").
const BASE_STRUCTURE_RADIUS: f32 = 12.0;
/// Unit-count triggers for the opening-group transitions (§4.9 "Opening
/// groups") this crate wires: terran moves off its vulture count once tanks
/// arrive, protoss off zealots once dragoons arrive.
const VULTURES_TO_TANKS_THRESHOLD: u32 = 2;
const ZEALOTS_TO_DRAGOONS_THRESHOLD: u32 = 2;

/// Owns every piece of state that survives across frames. `GameClient` and
/// the two bi-directional collaborators are borrowed fresh each call rather
/// than stored, since the engine — not this crate — owns their lifetime
/// (§6).
pub struct Core {
	pub config: CoreConfig,
	pub bases: BaseRegistry,
	pub placer: BuildingPlacer,
	pub buildings: BuildingRegistry,
	pub workers: WorkerRegistry,
	pub worker_scheduler: WorkerScheduler,
	pub resources: ResourceTracker,
	pub queue: ProductionQueue,
	/// Long-running items waiting for a producer to free up (§3
	/// `ProductionGoal`): research, upgrades, and addons. Not yet driven by a
	/// retry loop; `run_production_scheduler` currently resolves tech/upgrade
	/// items directly against an idle producer the same frame they reach the
	/// front of the queue. A fuller implementation would move a failed
	/// attempt here instead of leaving it at the queue's front.
	pub goals: Vec<ProductionGoal>,
	pub info: InformationTracker,
	pub recognizer: OpponentPlanRecognizer,
	pub strategy: StrategyCoordinator,
	/// Cross-game opponent history (§6 "Opponent model"); loaded by the
	/// embedding bot and handed in at construction, updated as this game's
	/// classification latches, and saved back out by the embedding bot
	/// through [`Core::persist_opponent_model`].
	pub opponent_model: OpponentModel,
	/// Frames since the scheduler last successfully dispatched something,
	/// feeding jam detection (§4.5 step 6g).
	frames_since_last_production: u32,
	/// Edge-triggered latch for the opening-survival replan (§7 "Opening
	/// survival replan"): set once the worker count crashes through
	/// [`WORKER_CRISIS_THRESHOLD`] with no combat unit yet built, so the
	/// queue-clear only happens on the crossing frame rather than every
	/// frame the count stays low.
	worker_crisis_active: bool,
	/// Raids (a vulture seen within [`VULTURE_RAID_RADIUS`] of an owned
	/// base) credited so far this game, feeding `ThreatSignals::vulture_raids_seen`
	/// (§4.8). Counted once per vulture tag rather than once per frame it
	/// lingers.
	vulture_raids_seen: u32,
	vultures_credited: FxHashSet<u64>,
	map_size: (f32, f32),
	my_race: Race,
	enemy_race: Race,
}

impl Core {
	/// Builds the registries that need one-time startup discovery (§4.1
	/// "Initial discovery"). Called once, right after the game connects.
	pub fn new(game: &impl GameClient) -> Self {
		Self::new_with_opponent_model(game, OpponentModel::new())
	}

	/// Same as [`Core::new`], seeded with a previously-saved opponent model
	/// (§6 "Opponent model"): an `OpeningPlan` recorded from a past game
	/// against this opponent starts the recognizer with that read instead of
	/// `Unknown`, rather than re-discovering the same opening from scratch.
	pub fn new_with_opponent_model(game: &impl GameClient, opponent_model: OpponentModel) -> Self {
		let all_units = game.all_units();

		// Resource amounts aren't carried on `Unit` (§6 read surface), so
		// every site is registered with a plausible full-patch/full-geyser
		// amount rather than an observed one; `ResourceTracker::observe`
		// stays unwired until the game bridge exposes a per-resource amount.
		let resources: Vec<ResourceSite> = all_units
			.mineral_fields
			.iter()
			.map(|u| ResourceSite { tag: u.tag, position: u.position, initial_amount: 1500, is_geyser: false })
			.chain(
				all_units
					.vespene_geysers
					.iter()
					.map(|u| ResourceSite { tag: u.tag, position: u.position, initial_amount: 5000, is_geyser: true }),
			)
			.collect();

		let bases = BaseRegistry::discover(&resources, game.start_locations());
		let (map_w, map_h) = game.map_size();
		let my_race = game.my_race();
		let enemy_race = game.enemy_race();

		let mut tracker = ResourceTracker::new();
		for site in &resources {
			tracker.register(site.tag, site.is_geyser, site.initial_amount);
		}

		let mut recognizer = OpponentPlanRecognizer::new();
		if let Some(plan) = opponent_model.get("OpeningPlan").and_then(OpeningPlan::from_skill_str) {
			recognizer.plan = plan;
		}

		let mut strategy = StrategyCoordinator::new();
		strategy.opening_group = opponent_model.get("OpeningGroup").and_then(OpeningGroup::from_skill_str);

		Self {
			config: CoreConfig::default(),
			bases,
			placer: BuildingPlacer::new((map_w as usize, map_h as usize), my_race == Race::Zerg),
			buildings: BuildingRegistry::new(),
			workers: WorkerRegistry::new(),
			worker_scheduler: WorkerScheduler::new(),
			resources: tracker,
			queue: ProductionQueue::new(),
			goals: Vec::new(),
			info: InformationTracker::new(enemy_race == Race::Zerg),
			recognizer,
			strategy,
			opponent_model,
			frames_since_last_production: 0,
			worker_crisis_active: false,
			vulture_raids_seen: 0,
			vultures_credited: FxHashSet::default(),
			map_size: (map_w as f32, map_h as f32),
			my_race,
			enemy_race,
		}
	}

	/// Saves the current opponent model to `path` (§6 "Opponent model"), for
	/// the embedding bot to call once a game ends. The crate never writes
	/// this file on its own initiative mid-game.
	pub fn persist_opponent_model(&mut self, path: impl AsRef<std::path::Path>) -> crate::error::CoreResult<()> {
		self.opponent_model.set("OpeningPlan", self.recognizer.plan.as_skill_str());
		if let Some(group) = self.strategy.opening_group {
			self.opponent_model.set("OpeningGroup", group.as_skill_str());
		}
		self.opponent_model.save(path)
	}

	/// Runs one frame (§2, §5 "Ordering guarantees"). `scout`/`combat` are
	/// the bi-directional collaborators (§6); this crate only ever reads
	/// their state or nudges them, never owns their decisions.
	pub fn step(&mut self, game: &mut impl GameClient, scout: &mut impl ScoutController, combat: &mut impl CombatController) {
		let frame = game.current_frame();
		let all_units = game.all_units().clone();

		self.observe_enemies(game, &all_units, frame);
		self.update_base_ownership(game, &all_units, frame);
		self.track_vulture_raids(&all_units);
		self.reclassify_opponent(&all_units, frame);
		self.adjust_production_for_strategy(game, &all_units, combat);
		self.run_production_scheduler(game, &all_units);
		self.advance_buildings(game, &all_units, scout);
		self.schedule_workers(game, &all_units, frame);
	}

	/// InformationTracker updates (§4.6): refresh every visible enemy unit's
	/// record, sweep for units that vanished from a now-visible tile, and
	/// latch capabilities/timings that never un-latch within a game.
	fn observe_enemies(&mut self, game: &impl GameClient, all_units: &AllUnits, frame: u32) {
		use crate::constants::UNIT_TYPE_DATA;

		for u in all_units.enemy.all.iter() {
			self.info.observe(
				u.tag,
				u.type_id,
				u.position,
				u.hit_points,
				u.shields,
				u.is_completed(),
				u.remaining_build_time,
				u.is_burrowed,
				u.is_lifted,
				frame,
			);
			if let Some(data) = UNIT_TYPE_DATA.get(&u.type_id) {
				self.info.note_possible_gas_timing(data.gas_cost, frame);
			}
		}

		self.info.sweep_gone(
			frame,
			|tile| game.is_visible(tile),
			|tile| !game.units_on_tile(tile).is_empty(),
			|t| t == UnitTypeId::Lurker || t == UnitTypeId::LurkerEgg,
		);

		self.info.apply_predicate(|t| !t.is_worker() && !t.is_building(), |l| l.enemy_has_combat_units = true);
		self.info.apply_predicate(|t| t.is_air_static_defense(), |l| l.enemy_has_static_anti_air = true);
		self.info.apply_predicate(|t| t.is_air_static_defense(), |l| l.enemy_has_anti_air = true);
		self.info.apply_predicate(
			|t| matches!(t, UnitTypeId::Wraith | UnitTypeId::Mutalisk | UnitTypeId::Scout | UnitTypeId::Corsair | UnitTypeId::Carrier),
			|l| l.enemy_has_air_tech = true,
		);
		self.info.apply_predicate(
			|t| matches!(t, UnitTypeId::Ghost | UnitTypeId::Wraith | UnitTypeId::DarkTemplar | UnitTypeId::Arbiter),
			|l| l.enemy_has_cloak_tech = true,
		);
		self.info.apply_predicate(|t| t == UnitTypeId::SiegeTankSieged, |l| l.enemy_has_siege_mode = true);
		self.info.apply_predicate(|t| t.is_static_defense() && t.is_detector(), |l| l.enemy_has_static_detection = true);
		self.info.apply_predicate(
			|t| t.is_detector() && !t.is_static_defense(),
			|l| l.enemy_has_mobile_detection = true,
		);

		// Psionic storm bullets report their source as a high templar (§4.6
		// "Bullet observation"); a richer bridge would carry a real bullet
		// kind instead of overloading `type_id`.
		self.info.observe_bullets(game.bullets(), |b| b.type_id == UnitTypeId::HighTemplar);
	}

	/// BaseRegistry ownership update (§4.1), plus the two designations that
	/// only make sense once ownership for this frame is known: the
	/// furthest-forward owned base (`front_id`) and, while the enemy's main
	/// hasn't been scouted yet, an inferred guess at it (`enemy_start_id`).
	fn update_base_ownership(&mut self, game: &impl GameClient, all_units: &AllUnits, frame: u32) {
		let visible: Vec<u32> = self.bases.bases.iter().filter(|b| game.is_visible(b.tile)).map(|b| b.id).collect();
		self.bases.update_ownership(all_units, &visible);
		self.bases.recompute_front(self.my_race, all_units);
		self.bases.infer_enemy_start(frame, self.enemy_race, self.map_size, all_units, |tile| game.is_explored(tile));
	}

	/// Credits a vulture raid (§4.8 `vulture_raids_seen`) the first time a
	/// given vulture is seen within [`VULTURE_RAID_RADIUS`] of an owned base,
	/// so a single vulture lingering near a base for many frames counts once.
	fn track_vulture_raids(&mut self, all_units: &AllUnits) {
		for vulture in all_units.enemy.units.of_type(UnitTypeId::Vulture).iter() {
			if self.vultures_credited.contains(&vulture.tag) {
				continue;
			}
			let near_owned_base = self.bases.owned().any(|b| b.tile.distance(vulture.position) <= VULTURE_RAID_RADIUS);
			if near_owned_base {
				self.vultures_credited.insert(vulture.tag);
				self.vulture_raids_seen += 1;
			}
		}
	}

	/// OpponentPlanRecognizer reclassification (§4.7). Signals are boiled
	/// down from `InformationTracker`/`BaseRegistry`/the enemy unit view.
	fn reclassify_opponent(&mut self, all_units: &AllUnits, frame: u32) {
		let enemy = &all_units.enemy;
		let enemy_bases: u32 = self.bases.bases.iter().filter(|b| b.owner == Alliance::Enemy).count() as u32;

		let our_main = self.bases.main().map(|b| b.tile);
		let our_natural = self.bases.main().and_then(|b| b.natural).and_then(|id| self.bases.find(id)).map(|b| b.tile);

		let suspicious_building_near_our_base = enemy.structures.iter().any(|u| {
			!u.type_id.is_refinery()
				&& our_main.map(|main| u.position.distance(main) <= PROXY_RADIUS).unwrap_or(false)
				&& our_natural.map(|nat| u.position.distance(nat) <= PROXY_RADIUS).unwrap_or(true)
		});
		let defensive_building_near_our_natural = our_natural
			.map(|nat| enemy.structures.iter().any(|u| u.type_id.is_static_defense() && u.position.distance(nat) <= NATURAL_DEFENSIVE_RADIUS))
			.unwrap_or(false);

		let earliest_military_frame = enemy.units.iter().filter_map(|u| self.info.get(u.tag).map(|r| r.last_seen_frame)).min();

		let earliest_rush_building = [
			(UnitTypeId::Barracks, RushBuildingKind::Barracks),
			(UnitTypeId::Gateway, RushBuildingKind::Gateway),
			(UnitTypeId::SpawningPool, RushBuildingKind::SpawningPool),
		]
		.into_iter()
		.filter_map(|(type_id, kind)| {
			enemy
				.structures
				.of_type(type_id)
				.iter()
				.filter_map(|u| self.info.get(u.tag).and_then(|r| r.predicted_completion_frame))
				.min()
				.map(|f| (kind, f))
		})
		.min_by_key(|(_, f)| *f);

		// Count of enemy producer structures, not yet completed, whose
		// predicted completion lands before the two-producer rush deadline
		// (§4.7 "producers_completing_before_3200").
		const RUSH_PRODUCER_TYPES: [UnitTypeId; 5] =
			[UnitTypeId::Barracks, UnitTypeId::Gateway, UnitTypeId::SpawningPool, UnitTypeId::Factory, UnitTypeId::Starport];
		let producers_completing_before_3200 = enemy
			.structures
			.iter()
			.filter(|u| RUSH_PRODUCER_TYPES.contains(&u.type_id) && !u.is_completed())
			.filter_map(|u| self.info.get(u.tag).and_then(|r| r.predicted_completion_frame))
			.filter(|&f| f < 3200)
			.count() as u32;

		let signals = RecognitionSignals {
			suspicious_building_near_our_base,
			defensive_building_near_our_natural,
			enemy_workers_closer_to_us_than_home: our_main
				.map(|main| enemy.workers.iter().filter(|u| u.position.distance(main) < 30.0).count() as u32)
				.unwrap_or(0),
			military_unit_adjusted_frame: earliest_military_frame,
			earliest_rush_building_completion: earliest_rush_building,
			producers_completing_before_3200,
			is_terran_enemy: self.enemy_race == Race::Terran,
			starport_training_no_addon: enemy.structures.of_type(UnitTypeId::Starport).iter().any(|u| u.addon_tag.is_none() && u.is_training),
			has_academy: !enemy.structures.of_type(UnitTypeId::Academy).is_empty(),
			enemy_hatcheries_with_pool_no_extractor: if !enemy.structures.of_type(UnitTypeId::SpawningPool).is_empty() && enemy.refineries.is_empty() {
				enemy.structures.of_type(UnitTypeId::Hatchery).len() as u32
			} else {
				0
			},
			enemy_barracks: enemy.structures.of_type(UnitTypeId::Barracks).len() as u32,
			enemy_refineries: enemy.refineries.len() as u32,
			enemy_command_centers: enemy.structures.of_type(UnitTypeId::CommandCenter).len() as u32,
			enemy_gateways: enemy.structures.of_type(UnitTypeId::Gateway).len() as u32,
			enemy_assimilators: enemy.structures.of_type(UnitTypeId::Assimilator).len() as u32,
			enemy_nexuses: enemy.structures.of_type(UnitTypeId::Nexus).len() as u32,
			enemy_base_count: enemy_bases.max(1),
			enemy_bunker_or_cannon_seen: enemy.structures.iter().any(|u| matches!(u.type_id, UnitTypeId::Bunker | UnitTypeId::PhotonCannon)),
			enemy_bunkers: enemy.structures.of_type(UnitTypeId::Bunker).len() as u32,
			enemy_cannons: enemy.structures.of_type(UnitTypeId::PhotonCannon).len() as u32,
			enemy_sunkens: enemy.structures.of_type(UnitTypeId::SunkenColony).len() as u32,
		};

		let previous = self.recognizer.plan;
		self.recognizer.classify(frame, &signals);
		if self.recognizer.plan != previous {
			debug!("opponent plan reclassified: {:?} -> {:?} at frame {}", previous, self.recognizer.plan, frame);
		}
	}

	/// StrategyCoordinator + StaticDefensePlanner adjust the queue (§4.8,
	/// §4.9).
	fn adjust_production_for_strategy(&mut self, game: &mut impl GameClient, all_units: &AllUnits, combat: &mut impl CombatController) {
		self.maybe_replan_for_worker_crisis(all_units);

		if self.strategy.should_cancel_defense_for_passive_opening(self.recognizer.plan) {
			self.queue.remove_matching(|item| matches!(item.act, MacroAct::Unit(id) if id.is_static_defense()));
			self.cancel_planned_static_defense(game);
		}

		combat.set_aggression(!matches!(self.recognizer.plan, OpeningPlan::HeavyRush | OpeningPlan::FastRush));

		let resources = game.my_resources();
		let queued_gas_needed: u32 = self.queue.front_prefix(self.queue.len()).map(|(_, i)| i.act.gas_cost()).sum();
		self.strategy.update_gas_collection(resources.gas, resources.minerals, queued_gas_needed);

		if let Some(group) = self.strategy.opening_group {
			match (self.my_race, group) {
				(Race::Terran, OpeningGroup::Vultures) => {
					let tanks = all_units.my.units.of_type(UnitTypeId::SiegeTank).len() as u32 + all_units.my.units.of_type(UnitTypeId::SiegeTankSieged).len() as u32;
					self.strategy.maybe_transition_group(OpeningGroup::Vultures, OpeningGroup::Tanks, tanks, VULTURES_TO_TANKS_THRESHOLD);
				}
				(Race::Protoss, OpeningGroup::Zealots) => {
					let dragoons = all_units.my.units.of_type(UnitTypeId::Dragoon).len() as u32;
					self.strategy.maybe_transition_group(OpeningGroup::Zealots, OpeningGroup::Dragoons, dragoons, ZEALOTS_TO_DRAGOONS_THRESHOLD);
				}
				_ => {}
			}

			// Drop-tech gate (§4.9): once the race's drop prerequisite is
			// ready, steer toward the Drop group regardless of what else was
			// building. Own-upgrade completion isn't tracked anywhere in this
			// crate yet, so the zerg leg of the gate never opens; it's wired
			// for parity with terran/protoss, which read off unit counts.
			let overlord_transport_researched = false;
			let completed_shuttles = all_units.my.units.of_type(UnitTypeId::Shuttle).len() as u32;
			let completed_dropships = all_units.my.units.of_type(UnitTypeId::Dropship).len() as u32;
			let overlord_count = all_units.my.units.of_type(UnitTypeId::Overlord).len() as u32;
			if group != OpeningGroup::Drop && StrategyCoordinator::has_drop_tech(self.my_race, overlord_transport_researched, overlord_count, completed_shuttles, completed_dropships) {
				self.strategy.opening_group = Some(OpeningGroup::Drop);
			}
		}

		let threats = ThreatSignals {
			vulture_raids_seen: self.vulture_raids_seen,
			enemy_air_to_ground_power: if self.info.latches.enemy_has_air_tech { 1 } else { 0 },
			mass_air_units: all_units.enemy.units.iter().filter(|u| u.is_flying && !u.type_id.is_building()).count() as u32,
		};

		let plan = match self.my_race {
			Race::Zerg => {
				let combat_signals = ZergCombatSignals {
					my_lurkers: all_units.my.units.of_type(UnitTypeId::Lurker).len() as u32,
					my_other_supply: 0,
					enemy_tanks: all_units.enemy.units.of_type(UnitTypeId::SiegeTank).len() as u32 + all_units.enemy.units.of_type(UnitTypeId::SiegeTankSieged).len() as u32,
					enemy_goliaths: all_units.enemy.units.of_type(UnitTypeId::Goliath).len() as u32,
					enemy_marines: all_units.enemy.units.of_type(UnitTypeId::Marine).len() as u32,
					enemy_medics: all_units.enemy.units.of_type(UnitTypeId::Medic).len() as u32,
					enemy_other_supply: all_units.enemy.units.iter().filter(|u| !u.type_id.is_building()).count() as u32,
					my_drones: all_units.my.workers.len() as u32,
				};
				StaticDefensePlanner::plan_zerg(&combat_signals, &threats)
			}
			_ => StaticDefensePlanner::plan_terran_or_protoss(&threats, self.my_race == Race::Protoss, self.book_ground_orders()),
		};

		self.enqueue_static_defense(&plan, all_units);
	}

	/// Opening survival replan (§7 "Opening survival replan"): once the
	/// worker count crashes through [`WORKER_CRISIS_THRESHOLD`] before any
	/// combat unit exists, clear the queue to fundamentals and queue workers
	/// at highest priority, skipping a supply provider even under supply
	/// pressure — low worker count dominates. Edge-triggered so it only
	/// fires on the crossing frame, not every frame the count stays low.
	fn maybe_replan_for_worker_crisis(&mut self, all_units: &AllUnits) {
		let worker_count = all_units.my.workers.len() as u32;
		let has_combat_unit = all_units.my.units.iter().any(|u| !u.type_id.is_worker() && !u.type_id.is_building());
		let in_crisis = worker_count <= WORKER_CRISIS_THRESHOLD && !has_combat_unit;

		if in_crisis && !self.worker_crisis_active {
			if let Some(values) = RACE_VALUES.get(&self.my_race) {
				warn!("worker crisis: {} workers left with no combat unit, replanning to fundamentals", worker_count);
				self.queue.clear();
				for _ in 0..3 {
					self.queue.push_back(ProductionItem::new(MacroAct::Unit(values.worker)));
				}
			}
		}
		self.worker_crisis_active = in_crisis;
	}

	/// Cancels every still-planned static-defense building (§4.3
	/// "Cancellation", §4.9 "cancel static defense for a passive opening"):
	/// refunds the reservation, issues an in-game cancel for anything already
	/// under construction, and releases any worker still holding the job.
	fn cancel_planned_static_defense(&mut self, game: &mut impl GameClient) {
		let indices: Vec<usize> = self.buildings.entries.iter().enumerate().filter(|(_, e)| e.type_id.is_static_defense()).map(|(i, _)| i).collect();
		for index in indices.into_iter().rev() {
			if let Some((entry, needs_engine_cancel)) = self.buildings.cancel(index) {
				if needs_engine_cancel {
					if let Some(tag) = entry.building_tag {
						game.command(tag, Command::CancelConstruction);
					}
				}
				if let Some(worker) = entry.worker {
					self.workers.set_job(worker, Job::Idle);
				}
			}
		}
	}

	/// Opening-book-driven ground defense count (§4.8 `book_ground_orders`):
	/// an opponent history recording a hard-committing rush opening calls for
	/// defense queued by the book from the start of the game, rather than
	/// waiting for this game's own raid/contain signals to catch up.
	fn book_ground_orders(&self) -> u32 {
		match self.opponent_model.get("OpeningPlan").and_then(OpeningPlan::from_skill_str) {
			Some(OpeningPlan::FastRush) | Some(OpeningPlan::HeavyRush) | Some(OpeningPlan::WorkerRush) => 1,
			_ => 0,
		}
	}

	/// Converts a [`StaticDefensePlan`] into queue pushes, respecting the
	/// drone-below-safety-limit rule (§4.8 "Always respect the drone below
	/// safety limit rule").
	fn enqueue_static_defense(&mut self, plan: &StaticDefensePlan, all_units: &AllUnits) {
		let min_drones = StaticDefensePlanner::min_drone_limit(self.enemy_race);
		let current_drones = all_units.my.workers.len() as u32;
		let values = match RACE_VALUES.get(&self.my_race) {
			Some(v) => v,
			None => return,
		};
		let (ground_defense_type, air_defense_type) = match self.my_race {
			Race::Terran => (UnitTypeId::Bunker, UnitTypeId::MissileTurret),
			Race::Zerg => (UnitTypeId::SunkenColony, UnitTypeId::SporeColony),
			Race::Protoss => (UnitTypeId::PhotonCannon, UnitTypeId::PhotonCannon),
			Race::Random => return,
		};

		let front_queued = self.queue.front_prefix(self.queue.len()).filter(|(_, i)| i.act == MacroAct::Unit(ground_defense_type)).count() as u32;
		let missing_front = plan.at_front.saturating_sub(front_queued);
		for _ in 0..missing_front {
			if current_drones < min_drones && self.my_race == Race::Zerg {
				self.queue.push_back(ProductionItem::new(MacroAct::Unit(values.worker)));
				break;
			}
			self.queue.push_back(ProductionItem::new(MacroAct::Unit(ground_defense_type)));
		}

		let main_id = self.bases.main().map(|b| b.id);
		let natural_id = self.bases.main().and_then(|b| b.natural);
		let inner_ids: Vec<u32> = [main_id, natural_id].into_iter().flatten().collect();
		let outer_bases: Vec<&Base> = self.bases.owned().filter(|b| !inner_ids.contains(&b.id)).collect();
		let inner_bases: Vec<&Base> = self.bases.owned().filter(|b| inner_ids.contains(&b.id)).collect();
		self.enqueue_one_per_base_tier(&outer_bases, plan.at_outer_bases, ground_defense_type, MacroLocation::Front, all_units);
		self.enqueue_one_per_base_tier(&inner_bases, plan.at_inner_bases, ground_defense_type, MacroLocation::Natural, all_units);

		if plan.air_is_per_base {
			let air_queued = self.queue.front_prefix(self.queue.len()).filter(|(_, i)| i.act == MacroAct::Unit(air_defense_type)).count() as u32;
			let missing_air = plan.anti_air.saturating_sub(air_queued);
			for _ in 0..missing_air {
				self.queue.push_back(ProductionItem::new(MacroAct::Unit(air_defense_type)));
			}
		} else if plan.anti_air > 0 {
			let already_queued = self.queue.front_prefix(self.queue.len()).any(|(_, i)| i.act == MacroAct::Unit(air_defense_type));
			if !already_queued {
				let main_tile = main_id.and_then(|id| self.bases.find(id)).map(|b| b.tile);
				let natural_tile = natural_id.and_then(|id| self.bases.find(id)).map(|b| b.tile);
				let front_tile = self.bases.front_id.and_then(|id| self.bases.find(id)).map(|b| b.tile);
				let natural_is_closer = match (natural_tile, main_tile, front_tile) {
					(Some(n), Some(m), Some(f)) => n.distance(f) < m.distance(f),
					_ => false,
				};
				let remaining: Vec<u32> = self.bases.owned().map(|b| b.id).filter(|id| Some(*id) != main_id && Some(*id) != natural_id).collect();
				let order = StaticDefensePlanner::air_defense_base_priority(self.my_race == Race::Protoss, natural_id, main_id, natural_is_closer, &remaining);
				if let Some(&first) = order.first() {
					let location = if Some(first) == main_id { MacroLocation::Main } else if Some(first) == natural_id { MacroLocation::Natural } else { MacroLocation::Front };
					self.queue.push_back(ProductionItem { location: Some(location), ..ProductionItem::new(MacroAct::Unit(air_defense_type)) });
				}
			}
		}
	}

	/// "At outer and inner bases, enqueue at most one at a time and only if
	/// the base has as many workers as existing defenses" (§4.8 "Execution").
	fn enqueue_one_per_base_tier(&mut self, bases: &[&Base], desired: u32, defense_type: UnitTypeId, location: MacroLocation, all_units: &AllUnits) {
		if desired == 0 {
			return;
		}
		let already_queued = self.queue.front_prefix(self.queue.len()).any(|(_, i)| i.act == MacroAct::Unit(defense_type) && i.location == Some(location));
		if already_queued {
			return;
		}
		for base in bases {
			let existing_defenses = all_units.my.structures.iter().filter(|u| u.type_id == defense_type && u.position.distance(base.tile) <= BASE_STRUCTURE_RADIUS).count() as u32;
			let workers_at_base = base.depot_tag.map(|depot| self.workers.miners_on_depot(depot)).unwrap_or(0);
			if workers_at_base > existing_defenses {
				self.queue.push_back(ProductionItem { location: Some(location), ..ProductionItem::new(MacroAct::Unit(defense_type)) });
				return;
			}
		}
	}

	/// ProductionScheduler dispatch (§4.5): checks the back of the queue
	/// against actually-available resources and prerequisites, then either
	/// issues an immediate command (units trained/morphed, tech/upgrades
	/// researched from an existing producer) or hands a building off to
	/// `BuildingRegistry` (§4.3).
	fn run_production_scheduler(&mut self, game: &mut impl GameClient, all_units: &AllUnits) {
		self.queue.clear_modified_latch();
		self.frames_since_last_production += 1;

		let resources = game.my_resources();
		let free_minerals = self.buildings.available_minerals(resources.minerals);
		let free_gas = self.buildings.available_gas(resources.gas);

		self.attempt_goals(game, all_units, &resources);

		// Reorder-for-throughput (§4.5): if the queue's own judgment says a
		// later item would make better use of idle resources/producers this
		// frame, pull it to the front of the line before committing to it.
		let can_produce_now = |act: &MacroAct| match act.producer() {
			Some(producer) => !all_units.my.structures.of_type(producer).ready().idle().is_empty(),
			None => true,
		};
		if let Some(index) = self.queue.reorder_candidate(free_minerals, free_gas, can_produce_now) {
			self.queue.pull_to_top(index);
		}

		// Supply-block detection (§4.5, §10.3 doubled-supply convention): a
		// zerg hatchery/overlord mid-construction means supply is already
		// "building", so no block is declared while one is in flight. On a
		// real block, push a supply provider to the front exactly once —
		// `front_prefix` already holding one means it's on the way.
		let supply_available = resources.supply_total.saturating_sub(resources.supply_used);
		if let Some(next) = self.queue.peek_back() {
			let zerg_building_supply = self.my_race == Race::Zerg
				&& (!all_units.my.structures.of_type(UnitTypeId::Hatchery).not_ready().is_empty() || !all_units.my.units.of_type(UnitTypeId::Overlord).not_ready().is_empty());
			if production_queue::supply_block_detected(supply_available, next.act.supply_cost(), zerg_building_supply) {
				let already_queued = self.queue.front_prefix(self.queue.len()).any(|(_, i)| i.act.is_supply_provider());
				if !already_queued {
					if let Some(values) = RACE_VALUES.get(&self.my_race) {
						warn!("supply block: next item needs {} supply, {} available, queuing a supply provider", next.act.supply_cost(), supply_available);
						self.queue.push_back(ProductionItem::new(MacroAct::Unit(values.supply_provider)));
					}
				}
			}
		}

		let item = match self.queue.peek_back().cloned() {
			Some(item) => item,
			None => {
				self.strategy.enter_out_of_book();
				return;
			}
		};

		if item.act.mineral_cost() > free_minerals || item.act.gas_cost() > free_gas {
			self.check_production_jam(&item.act, &resources, all_units);
			return;
		}
		if let MacroAct::Unit(UnitTypeId::Gateway) = item.act {
			let current = all_units.my.structures.of_type(UnitTypeId::Gateway).len() as u32;
			if production_scheduler::gateway_hard_cap_blocks(&item.act, current) {
				return;
			}
		}
		if !item.act.prerequisite_met(|t| !all_units.my.structures.of_type(t).ready().is_empty()) {
			self.check_production_jam(&item.act, &resources, all_units);
			return;
		}

		let dispatched = match &item.act {
			MacroAct::Unit(id) if id.is_building() && !id.is_morphed_building() => {
				self.queue.pop_back();
				let mut planned = PlannedBuilding::new(*id, item.location.unwrap_or(MacroLocation::Main), item.act.mineral_cost(), item.act.gas_cost());
				planned.is_gas_steal = item.is_gas_steal;
				debug!("requesting building {:?} at {:?}", id, planned.location);
				self.buildings.request(planned);
				true
			}
			MacroAct::Unit(id) => match item.act.producer().and_then(|p| {
				if p == UnitTypeId::Larva {
					self.select_larva(all_units, id.is_worker())
				} else if id.is_worker() {
					self.select_depot_producer(all_units, p)
				} else if matches!(*id, UnitTypeId::Lair | UnitTypeId::Hive) {
					self.select_lair_hatchery(all_units, p)
				} else {
					all_units.my.structures.of_type(p).ready().idle().iter().map(|u| u.tag).next()
				}
			}) {
				Some(producer) => {
					self.queue.pop_back();
					game.command(producer, Command::Make(*id));
					true
				}
				None => false,
			},
			MacroAct::Tech(id) => match item.act.producer().and_then(|p| all_units.my.structures.of_type(p).ready().idle().iter().map(|u| u.tag).next()) {
				Some(producer) => {
					self.queue.pop_back();
					game.command(producer, Command::Research(*id));
					true
				}
				None => self.park_or_drop(&item.act, all_units),
			},
			MacroAct::Upgrade(id) => match item.act.producer().and_then(|p| all_units.my.structures.of_type(p).ready().idle().iter().map(|u| u.tag).next()) {
				Some(producer) => {
					self.queue.pop_back();
					game.command(producer, Command::Upgrade(*id));
					true
				}
				None => self.park_or_drop(&item.act, all_units),
			},
			MacroAct::Command(..) => {
				self.queue.pop_back();
				true
			}
		};

		if dispatched {
			self.frames_since_last_production = 0;
		} else {
			self.check_production_jam(&item.act, &resources, all_units);
		}
	}

	/// A Tech/Upgrade item with no producer free this frame (§3
	/// `ProductionGoal`, §4.5 step 3/4): parked into `self.goals` to retry
	/// later via [`Core::attempt_goals`] if it could still become
	/// producible, otherwise dropped outright. Either way the queue is
	/// relieved of it, so the caller treats this as handled rather than a
	/// jam.
	fn park_or_drop(&mut self, act: &MacroAct, all_units: &AllUnits) -> bool {
		self.queue.pop_back();
		let producer_type = act.producer();
		let has_potential_producer = producer_type.map(|p| !all_units.my.structures.of_type(p).is_empty()).unwrap_or(false);
		let prerequisite_being_built = producer_type.map(|p| !all_units.my.structures.of_type(p).not_ready().is_empty()).unwrap_or(false);
		if production_scheduler::is_undeproducible(has_potential_producer, prerequisite_being_built) {
			warn!("dropping {:?}: no potential producer and none under construction", act);
		} else {
			debug!("parking {:?} as a goal, no idle producer this frame", act);
			self.goals.push(ProductionGoal::new(act.clone()));
		}
		true
	}

	/// Retries parked goals (§3 `ProductionGoal`, §4.5 step 4): dispatches
	/// any goal whose producer has freed up and current resources cover its
	/// cost, and drops any goal whose producer is now permanently
	/// unreachable (§4.5 step 3/4).
	fn attempt_goals(&mut self, game: &mut impl GameClient, all_units: &AllUnits, resources: &crate::api::PlayerResources) {
		let mut index = 0;
		while index < self.goals.len() {
			let goal = self.goals[index].clone();
			let producer_type = goal.act.producer();
			let idle_producer = producer_type.and_then(|p| all_units.my.structures.of_type(p).ready().idle().iter().map(|u| u.tag).next());
			if let Some(producer) = idle_producer {
				if goal.act.mineral_cost() <= resources.minerals && goal.act.gas_cost() <= resources.gas {
					match &goal.act {
						MacroAct::Tech(id) => game.command(producer, Command::Research(*id)),
						MacroAct::Upgrade(id) => game.command(producer, Command::Upgrade(*id)),
						_ => {}
					}
					self.goals.remove(index);
					continue;
				}
			}
			let has_potential_producer = producer_type.map(|p| !all_units.my.structures.of_type(p).is_empty()).unwrap_or(false);
			let prerequisite_being_built = producer_type.map(|p| !all_units.my.structures.of_type(p).not_ready().is_empty()).unwrap_or(false);
			if production_scheduler::goal_drop_reason(false, has_potential_producer, prerequisite_being_built).is_some() {
				warn!("dropping parked goal {:?}: producer no longer reachable", goal.act);
				self.goals.remove(index);
				continue;
			}
			index += 1;
		}
	}

	/// Production-jam detection and recovery (§4.5 step 6g, §7 "Production
	/// jam"): past the configured timeout, with resources on hand and supply
	/// not maxed, clear the queue and go out of book rather than stalling
	/// forever on an item that will never become producible this game.
	fn check_production_jam(&mut self, stalled: &MacroAct, resources: &crate::api::PlayerResources, all_units: &AllUnits) {
		let resources_available = resources.minerals > 0 || resources.gas > 0;
		let supply_maxed = resources.supply_used >= resources.supply_total;
		// Exception (§7 "Open question: jam threshold"): saving gas for a
		// mutalisk while the spire that will produce it is almost done isn't
		// a jam, it's patience.
		let intentionally_saving = matches!(stalled, MacroAct::Unit(UnitTypeId::Mutalisk))
			&& all_units.my.structures.of_type(UnitTypeId::Spire).iter().any(|u| u.build_progress >= 0.8);

		if production_scheduler::production_jammed(self.frames_since_last_production, self.config.production_jam_frame_limit, resources_available, supply_maxed, intentionally_saving) {
			warn!("production jammed on {:?} for {} frames, clearing queue and going out of book", stalled, self.frames_since_last_production);
			self.queue.clear();
			self.strategy.enter_out_of_book();
			self.frames_since_last_production = 0;
		}
	}

	/// BuildingRegistry advancement (§4.3): assigns a builder/tile to
	/// Unassigned entries, promotes Assigned entries once the building
	/// physically appears, drops invalid entries, and completes finished
	/// ones.
	fn advance_buildings(&mut self, game: &mut impl GameClient, all_units: &AllUnits, scout: &mut impl ScoutController) {
		let candidates: Vec<BuilderCandidate> = all_units
			.my
			.workers
			.iter()
			.map(|w| BuilderCandidate {
				tag: w.tag,
				position: w.position,
				job: self.workers.job(w.tag),
				encumbered: w.is_carrying_resource(),
			})
			.collect();

		let enemy_main = all_units
			.enemy
			.structures
			.iter()
			.find(|u| u.is_resource_depot())
			.map(|u| u.position)
			.or_else(|| self.bases.enemy_start_id.and_then(|id| self.bases.find(id)).map(|b| b.tile));

		let threatened = |tile: Point2| {
			all_units
				.enemy
				.units
				.iter()
				.any(|u| !u.type_id.is_building() && !u.type_id.is_worker() && u.position.distance(tile) <= ENEMY_THREAT_RANGE + 2.0)
		};

		for index in 0..self.buildings.entries.len() {
			let entry = &self.buildings.entries[index];
			if entry.status != BuildingStatus::Unassigned {
				continue;
			}
			let footprint = BUILDING_FOOTPRINTS.get(&entry.type_id).copied().unwrap_or((4, 3));
			let target = match entry.desired_tile.or_else(|| {
				self.placer.resolve_location(
					entry.location,
					&self.bases,
					enemy_main,
					&self.resources,
					footprint,
					can_host_addon(entry.type_id),
					|tile| game.is_buildable(tile),
					threatened,
				)
			}) {
				Some(t) => t,
				None => continue,
			};
			let selection = select_builder(entry.is_gas_steal, scout.worker_scout(), target, &candidates, self.my_race == Race::Protoss);
			if let BuilderSelection::Worker(worker) = selection {
				let type_id = self.buildings.entries[index].type_id;
				self.buildings.try_assign(index, target, worker);
				self.workers.set_job(worker, Job::PostedBuild { location: target });
				game.command(worker, Command::Build { type_id, tile: target });
			}
		}

		for index in 0..self.buildings.entries.len() {
			let entry = &self.buildings.entries[index];
			if entry.status != BuildingStatus::Assigned {
				continue;
			}
			let final_tile = match entry.final_tile {
				Some(t) => t,
				None => continue,
			};
			let type_id = entry.type_id;
			let built_tag = all_units.my.structures.iter().find(|u| u.type_id == type_id && u.tile_position.distance(final_tile) < 2.0).map(|u| u.tag);
			if let Some(tag) = built_tag {
				if let Some(worker) = self.buildings.begin_construction(index, tag) {
					self.workers.remove(worker);
				}
			}
		}

		let dropped_before = self.buildings.entries.len();
		self.buildings.drop_invalid(|tag| all_units.my.all.get(tag).map(|u| u.type_id.is_building()).unwrap_or(false));
		if self.buildings.entries.len() < dropped_before {
			warn!("dropped {} building entries whose assigned unit is gone", dropped_before - self.buildings.entries.len());
		}

		let completed: Vec<usize> = self
			.buildings
			.entries
			.iter()
			.enumerate()
			.filter(|(_, e)| e.status == BuildingStatus::UnderConstruction && e.building_tag.and_then(|t| all_units.my.all.get(t)).map(|u| u.is_completed()).unwrap_or(false))
			.map(|(i, _)| i)
			.collect();
		for index in completed.into_iter().rev() {
			self.buildings.complete(index);
		}
	}

	/// WorkerScheduler assignment/reassignment (§4.4): the fixed per-frame
	/// cycle over every worker the player currently owns.
	fn schedule_workers(&mut self, game: &mut impl GameClient, all_units: &AllUnits, frame: u32) {
		self.workers.reset_frame();

		let enemy_threats: Vec<(Point2, f32)> = all_units
			.enemy
			.units
			.iter()
			.filter(|u| !u.type_id.is_building() && !u.type_id.is_worker())
			.map(|u| (u.position, ENEMY_THREAT_RANGE))
			.collect();
		let detector_near = |position: Point2| {
			all_units
				.enemy
				.units
				.iter()
				.any(|u| u.type_id.is_detector() && u.is_detected && position.distance(u.position) <= DETECTOR_CHECK_RADIUS)
		};
		let can_burrow = self.my_race == Race::Zerg;

		// Step: danger response, with the self-defense exception (§4.4) for a
		// stationary enemy caught next to a mining worker's own patch.
		let mut in_danger = Vec::new();
		for worker in all_units.my.workers.iter() {
			if worker.is_burrowed {
				continue;
			}
			if let Job::Minerals { patch, .. } = self.workers.job(worker.tag) {
				if let Some(patch_unit) = all_units.mineral_fields.get(patch) {
					let stationary_enemy = all_units
						.enemy
						.units
						.iter()
						.find(|e| !e.is_flying && WorkerScheduler::should_self_defend(worker.position, patch_unit.position, e.position, !e.is_idle));
					if let Some(enemy) = stationary_enemy {
						game.command(worker.tag, Command::AttackUnit(enemy.tag));
						continue;
					}
				}
			}
			if let Some(command) = self.worker_scheduler.respond_to_danger(worker, &enemy_threats, worker.is_idle, can_burrow, detector_near(worker.position), frame) {
				self.workers.set_job(worker.tag, Job::Idle);
				game.command(worker.tag, command);
				in_danger.push(worker.tag);
			}
		}

		// Step: gas top-up, ahead of idle-mineral assignment so freshly idle
		// workers can fill an undersupplied refinery first (§4.4 step 3).
		let refineries: Vec<u64> = all_units.my.structures.iter().filter(|u| REFINERY_IDS.contains(&u.type_id) && u.build_progress >= 1.0).map(|u| u.tag).collect();
		for refinery in &refineries {
			let mut needed = self.worker_scheduler.gas_workers_needed(&self.workers, *refinery, &self.config);
			if needed == 0 {
				continue;
			}
			for worker in all_units.my.workers.iter() {
				if needed == 0 {
					break;
				}
				if in_danger.contains(&worker.tag) || worker.is_burrowed {
					continue;
				}
				if !matches!(self.workers.job(worker.tag), Job::Minerals { .. } | Job::Idle | Job::Default) {
					continue;
				}
				self.workers.set_job(worker.tag, Job::Gas { refinery: *refinery });
				game.command(worker.tag, Command::Gather(*refinery));
				needed -= 1;
			}
		}

		// Step: idle-worker assignment (§4.4 step 4), gated on the `MaxWorkers`
		// ceiling so a saturated economy stops pulling fresh workers into jobs.
		let total_patches = self.bases.owned().map(|b| b.minerals.len() as u32).sum();
		let cap = worker_scheduler::max_workers(&self.config, total_patches, refineries.len() as u32);
		for worker in all_units.my.workers.idle().iter() {
			if in_danger.contains(&worker.tag) {
				continue;
			}
			if worker_scheduler::working_worker_count(all_units) >= cap {
				break;
			}
			let non_full_depot = self.choose_mineral_assignment(all_units);
			if let Some(job) = WorkerScheduler::idle_worker_job(worker, non_full_depot) {
				if let Job::Minerals { patch, .. } = job {
					self.workers.set_job(worker.tag, job);
					game.command(worker.tag, Command::Gather(patch));
				}
			}
		}

		// Step: return-cargo workers within range of a depot (§4.4 step 5).
		for worker in all_units.my.workers.iter() {
			if !worker.is_carrying_resource() || in_danger.contains(&worker.tag) {
				continue;
			}
			if let Some(depot) = self.bases.owned().filter_map(|b| b.depot_tag).find(|&depot| all_units.all.get(depot).map(|d| d.position.distance(worker.position) <= RETURN_CARGO_RADIUS).unwrap_or(false)) {
				self.workers.set_job(worker.tag, Job::ReturnCargo { depot });
				game.command(worker.tag, Command::ReturnCargo);
			}
		}

		// Step: repair workers (terran only, §4.4 step 6), capped by
		// `max_repairers` so a wounded base doesn't strip the mineral line.
		if self.my_race == Race::Terran {
			let damaged: Vec<u64> = all_units.my.structures.iter().filter(|u| u.hit_points < u.hit_points_max).map(|u| u.tag).collect();
			if !damaged.is_empty() {
				let total_scvs = all_units.my.workers.iter().count() as u32;
				let cap = WorkerScheduler::max_repairers(total_scvs);
				let already_repairing = all_units.my.workers.iter().filter(|w| matches!(self.workers.job(w.tag), Job::Repair { .. })).count() as u32;
				let mut slots = cap.saturating_sub(already_repairing);
				for worker in all_units.my.workers.idle().iter() {
					if slots == 0 {
						break;
					}
					if in_danger.contains(&worker.tag) {
						continue;
					}
					if let Some(&target) = damaged.first() {
						self.workers.set_job(worker.tag, Job::Repair { target });
						game.command(worker.tag, Command::Repair(target));
						slots -= 1;
					}
				}
			}
		}

		// Step: posted workers (§4.4 step 7) hold a leash around a requested
		// point instead of mining, e.g. a scout parked to watch an expansion.
		for worker in all_units.my.workers.iter() {
			if let Job::Posted { location } = self.workers.job(worker.tag) {
				if in_danger.contains(&worker.tag) {
					continue;
				}
				game.command(worker.tag, self.worker_scheduler.posted_worker_command(worker, location));
			}
		}

		let to_unburrow = self.worker_scheduler.sweep_unburrow(
			frame,
			|tag| all_units.my.workers.get(tag).map(|u| u.is_burrowed).unwrap_or(false),
			|tag| {
				all_units
					.my
					.workers
					.get(tag)
					.map(|u| Self::in_threat_range(u.position, &enemy_threats))
					.unwrap_or(false)
			},
		);
		for tag in to_unburrow {
			game.command(tag, Command::Unburrow);
		}
	}

	/// Whether `position` still falls within any threat's range plus the same
	/// margin `WorkerScheduler::respond_to_danger` uses for a working (not
	/// idle) worker, for the unburrow sweep's "still in danger" check.
	fn in_threat_range(position: Point2, threats: &[(Point2, f32)]) -> bool {
		const WORKING_MARGIN: f32 = 2.0;
		threats.iter().any(|(pos, range)| position.distance(*pos) <= range + WORKING_MARGIN)
	}

	/// Picks an idle larva to produce `is_worker`'s unit (§4.5 step 6c): the
	/// hatchery/lair/hive chosen by [`production_scheduler::choose_larva_hatchery`],
	/// then any larva sitting at it. Every zerg unit's producer is `Larva`
	/// (constants.rs), so this is the only path that ever actually dispatches
	/// a zerg production item.
	fn select_larva(&self, all_units: &AllUnits, is_worker: bool) -> Option<u64> {
		let grouped: Vec<(u64, Vec<u64>)> = all_units
			.my
			.structures
			.iter()
			.filter(|u| RESOURCE_DEPOT_IDS.contains(&u.type_id) && u.build_progress >= 1.0)
			.map(|hatch| {
				let larvas: Vec<u64> = all_units.my.larvas.iter().filter(|l| l.position.distance(hatch.position) <= LARVA_HATCHERY_RADIUS).map(|l| l.tag).collect();
				(hatch.tag, larvas)
			})
			.filter(|(_, larvas)| !larvas.is_empty())
			.collect();
		let candidates: Vec<(u64, u32, u32)> = grouped.iter().map(|(tag, larvas)| (*tag, self.workers.miners_on_depot(*tag), larvas.len() as u32)).collect();
		let chosen = production_scheduler::choose_larva_hatchery(is_worker, &candidates)?;
		grouped.into_iter().find(|(tag, _)| *tag == chosen).and_then(|(_, larvas)| larvas.into_iter().next())
	}

	/// Picks which ready, idle resource depot produces the next worker (§4.5
	/// step 6c), preferring the one farthest from the main so a fresh
	/// expansion's depot starts pulling its own weight immediately rather
	/// than every worker coming out of the main indefinitely.
	fn select_depot_producer(&self, all_units: &AllUnits, producer: UnitTypeId) -> Option<u64> {
		let main_tile = self.bases.main_id.and_then(|id| self.bases.find(id)).map(|b| b.tile);
		let candidates: Vec<(u64, f32)> = all_units
			.my
			.structures
			.of_type(producer)
			.ready()
			.idle()
			.iter()
			.map(|u| (u.tag, main_tile.map(|m| u.position.distance(m)).unwrap_or(0.0)))
			.collect();
		production_scheduler::choose_worker_depot(&candidates)
	}

	/// Picks which ready, idle hatchery morphs into the requested lair/hive
	/// (§4.5 step 6c), preferring one in the main zone and, among those,
	/// the one farthest from any currently known enemy unit.
	fn select_lair_hatchery(&self, all_units: &AllUnits, producer: UnitTypeId) -> Option<u64> {
		let main_tile = self.bases.main_id.and_then(|id| self.bases.find(id)).map(|b| b.tile);
		let candidates: Vec<(u64, f32, bool)> = all_units
			.my
			.structures
			.of_type(producer)
			.ready()
			.idle()
			.iter()
			.map(|u| {
				let nearest_enemy = all_units.enemy.units.iter().map(|e| u.position.distance(e.position)).fold(f32::MAX, f32::min);
				let in_main_zone = main_tile.map(|m| u.position.distance(m) <= BASE_STRUCTURE_RADIUS).unwrap_or(false);
				(u.tag, if nearest_enemy == f32::MAX { 0.0 } else { nearest_enemy }, in_main_zone)
			})
			.collect();
		production_scheduler::choose_lair_hatchery(&candidates)
	}

	/// Picks the least-saturated mineral patch at the least-saturated owned
	/// base (§4.4 "Patch assignment (mineral locking)").
	fn choose_mineral_assignment(&self, all_units: &AllUnits) -> Option<(u64, u64)> {
		self.bases
			.owned()
			.filter_map(|b| b.depot_tag.map(|depot| (depot, b)))
			.filter(|(_, b)| !b.minerals.is_empty())
			.filter_map(|(depot, b)| {
				let depot_position = all_units.all.get(depot)?.position;
				let patches: Vec<(u64, Point2)> = b.minerals.iter().filter_map(|&m| all_units.mineral_fields.get(m).map(|u| (m, u.position))).collect();
				let patch = self.workers.least_saturated_patch(depot_position, &patches)?;
				Some((depot, patch))
			})
			.min_by_key(|(depot, _)| self.workers.miners_on_depot(*depot))
	}
}
