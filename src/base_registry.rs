//! Base and resource-cluster discovery, ownership tracking, and the
//! main/natural/front designations (§4.1). Grounded in Steamhammer's
//! `Bases.cpp`: greedy resource clustering at startup, a stable
//! lexicographic (tile-y, tile-x) numbering pass, and a per-frame ownership
//! sweep driven by depot sightings.

use crate::{
	distance::{Distance, DistanceIterator},
	geometry::Point2,
	ids::UnitTypeId,
	player::{Alliance, Race},
	units::{AllUnits, Units},
};

/// Ground reachability radius used to cluster resources into a base (§4.1).
/// The real ground-distance query is a map-analysis service this crate
/// consumes read-only (§6); here it is approximated with straight-line
/// distance, which the caller may refine by filtering the resource pool
/// with a real ground-distance map before calling [`BaseRegistry::discover`].
pub const BASE_RESOURCE_RADIUS: f32 = 22.0;
const MIN_BASE_RESOURCE_VALUE: u32 = 500;

/// Overlord-sighting inference window (§4.1 "Enemy base inference"): only
/// active in the first 5 minutes at 24 frames/sec, same cutoff Steamhammer
/// uses before a sighting stops being informative.
const OVERLORD_INFERENCE_WINDOW_FRAMES: u32 = 5 * 60 * 24;
/// An overlord's ground speed, in tiles/frame (0.5625px/frame, this crate's
/// `Point2` being tile-fractional rather than raw pixels). No per-unit speed
/// table exists in this crate (§6 read surface), so this one value is
/// hardcoded rather than looked up.
const OVERLORD_SPEED_TILES_PER_FRAME: f32 = 0.5625 / 32.0;
/// Steamhammer predicts an unexplored base's start tile from an overlord
/// sighting by offsetting the base position towards the map center by this
/// many pixels (here, tiles) on each axis.
const OVERLORD_START_OFFSET_X_TILES: f32 = 99.0 / 32.0;
const OVERLORD_START_OFFSET_Y_TILES: f32 = 65.0 / 32.0;

/// A candidate resource-depot location (§3 `Base`).
#[derive(Debug, Clone)]
pub struct Base {
	/// Stable, reproducible across runs of the same map (sorted by tile-y
	/// then tile-x before numbering).
	pub id: u32,
	/// Top-left tile of the 4x3 depot footprint.
	pub tile: Point2,
	pub minerals: Vec<u64>,
	pub geysers: Vec<u64>,
	pub owner: Alliance,
	pub depot_tag: Option<u64>,
	pub natural: Option<u32>,
	pub main: Option<u32>,
	pub is_starting_location: bool,
	pub failed_placements: u32,
}

impl Base {
	fn new(id: u32, tile: Point2) -> Self {
		Self {
			id,
			tile,
			minerals: Vec::new(),
			geysers: Vec::new(),
			owner: Alliance::Neutral,
			depot_tag: None,
			natural: None,
			main: None,
			is_starting_location: false,
			failed_placements: 0,
		}
	}
}

/// A raw resource observation fed into discovery: tag, position, and
/// initial amount.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSite {
	pub tag: u64,
	pub position: Point2,
	pub initial_amount: u32,
	pub is_geyser: bool,
}

pub struct BaseRegistry {
	pub bases: Vec<Base>,
	pub main_id: Option<u32>,
	pub front_id: Option<u32>,
	/// Set once at [`BaseRegistry::discover`] and never reassigned, unlike
	/// `main_id` which can move to a new base if the original main is lost.
	pub starting_id: Option<u32>,
	/// Latched once by [`BaseRegistry::infer_enemy_start`] and never un-set,
	/// even if the enemy later loses that base.
	pub enemy_start_id: Option<u32>,
	pub island_start: bool,
}

impl BaseRegistry {
	/// Greedily clusters the resource pool into bases (§4.1 "Initial
	/// discovery"). `start_locations` seeds one base per starting tile so an
	/// empty observer slot can be discarded rather than left as a ghost base.
	pub fn discover(resources: &[ResourceSite], start_locations: &[Point2]) -> Self {
		let mut pool: Vec<ResourceSite> = resources.iter().filter(|r| r.initial_amount > 64 || r.is_geyser).cloned().collect();
		let mut clusters: Vec<(Point2, Vec<ResourceSite>)> = Vec::new();

		for &start in start_locations {
			let (group, rest) = take_cluster(&pool, start);
			if group.iter().any(|r| !r.is_geyser) {
				clusters.push((start, group));
			}
			pool = rest;
		}

		while let Some(seed) = pool.first().copied() {
			let (group, rest) = take_cluster(&pool, seed.position);
			pool = rest;
			let minerals: u32 = group.iter().filter(|r| !r.is_geyser).map(|r| r.initial_amount).sum();
			let gas: u32 = group.iter().filter(|r| r.is_geyser).map(|r| r.initial_amount).sum();
			if minerals >= MIN_BASE_RESOURCE_VALUE || gas >= MIN_BASE_RESOURCE_VALUE {
				let center = bounding_box_center(&group);
				clusters.push((center, group));
			}
		}

		let mut bases: Vec<Base> = clusters
			.into_iter()
			.enumerate()
			.map(|(i, (tile, group))| {
				let mut base = Base::new(i as u32, tile);
				base.is_starting_location = start_locations.iter().any(|s| s.distance(tile) < 1.0);
				for r in group {
					if r.is_geyser {
						base.geysers.push(r.tag);
					} else {
						base.minerals.push(r.tag);
					}
				}
				base
			})
			.collect();

		bases.sort_by(|a, b| {
			let (ay, ax) = a.tile.to_tile();
			let (by, bx) = b.tile.to_tile();
			(ay, ax).cmp(&(by, bx))
		});
		for (i, base) in bases.iter_mut().enumerate() {
			base.id = i as u32 + 1;
		}

		for i in 0..bases.len() {
			let tile = bases[i].tile;
			let natural = bases
				.iter()
				.filter(|b| b.id != bases[i].id)
				.min_by(|a, b| a.tile.distance_squared(tile).partial_cmp(&b.tile.distance_squared(tile)).unwrap());
			bases[i].natural = natural.map(|b| b.id);
		}

		let main_id = bases.iter().find(|b| b.is_starting_location).map(|b| b.id);

		if let Some(main) = main_id {
			let natural = bases.iter().find(|b| b.id == main).and_then(|b| b.natural);
			if let Some(natural_id) = natural {
				if let Some(natural_base) = bases.iter_mut().find(|b| b.id == natural_id) {
					natural_base.main = Some(main);
				}
			}
		}

		Self {
			bases,
			main_id,
			front_id: main_id,
			starting_id: main_id,
			enemy_start_id: None,
			island_start: false,
		}
	}

	pub fn main(&self) -> Option<&Base> {
		self.main_id.and_then(|id| self.find(id))
	}

	pub fn find(&self, id: u32) -> Option<&Base> {
		self.bases.iter().find(|b| b.id == id)
	}

	pub fn find_mut(&mut self, id: u32) -> Option<&mut Base> {
		self.bases.iter_mut().find(|b| b.id == id)
	}

	pub fn owned(&self) -> impl Iterator<Item = &Base> {
		self.bases.iter().filter(|b| b.owner == Alliance::Own)
	}

	/// Per-frame ownership sweep (§4.1 "Per-frame updates"). `visible_tags`
	/// gives the set of resource-depot tags currently visible this frame, so
	/// an out-of-sight base we used to own can fall back to neutral rather
	/// than being trusted indefinitely.
	pub fn update_ownership(&mut self, all_units: &AllUnits, visible_bases: &[u32]) {
		let depots: Units = all_units.all.filter(|u| u.is_resource_depot() && !u.is_lifted);
		for base in &mut self.bases {
			if !visible_bases.contains(&base.id) {
				if base.owner == Alliance::Own {
					base.owner = Alliance::Neutral;
				}
				continue;
			}
			let occupant = depots.iter().find(|d| d.tile_position.distance(base.tile) < 2.0);
			match occupant {
				Some(d) => {
					base.owner = d.alliance;
					base.depot_tag = Some(d.tag);
				}
				None => {
					base.owner = Alliance::Neutral;
					base.depot_tag = None;
				}
			}
		}
		self.reassign_main_if_lost();
	}

	fn reassign_main_if_lost(&mut self) {
		let still_owned = self.main_id.and_then(|id| self.find(id)).map(|b| b.owner == Alliance::Own).unwrap_or(false);
		if still_owned {
			return;
		}
		let old_main_tile = self.main_id.and_then(|id| self.find(id)).map(|b| b.tile);
		if let Some(old_tile) = old_main_tile {
			let replacement = self
				.owned()
				.filter(|b| Some(b.id) != self.main_id)
				.max_by(|a, b| a.tile.distance_squared(old_tile).partial_cmp(&b.tile.distance_squared(old_tile)).unwrap());
			if let Some(new_main) = replacement {
				self.main_id = Some(new_main.id);
			}
		}
	}

	/// Recomputes `front_id` for the current frame (§4.1 "Front base"),
	/// grounded in Steamhammer's `Bases::myFront()`: zerg prefers the
	/// furthest-forward *completed* base in a fixed priority chain (enemy's
	/// natural, our natural, our starting base, our main, any owned base by
	/// id); other races use the same chain without the completion
	/// requirement, since they can wall and hold a front with a building
	/// still mid-construction.
	pub fn recompute_front(&mut self, my_race: Race, all_units: &AllUnits) {
		let require_complete = my_race == Race::Zerg;
		let owned_and_ready = |id: u32, bases: &[Base]| -> bool {
			let base = match bases.iter().find(|b| b.id == id) {
				Some(b) => b,
				None => return false,
			};
			if base.owner != Alliance::Own {
				return false;
			}
			if !require_complete {
				return true;
			}
			base.depot_tag
				.and_then(|tag| all_units.all.iter().find(|u| u.tag == tag))
				.map(|u| u.is_completed())
				.unwrap_or(false)
		};

		let enemy_natural = self.enemy_start_id.and_then(|id| self.find(id)).and_then(|b| b.natural);
		let our_natural = self.starting_id.and_then(|id| self.find(id)).and_then(|b| b.natural);

		let mut candidates: Vec<u32> = Vec::new();
		if let Some(id) = enemy_natural {
			candidates.push(id);
		}
		if let Some(id) = our_natural {
			candidates.push(id);
		}
		if let Some(id) = self.starting_id {
			candidates.push(id);
		}
		if let Some(id) = self.main_id {
			candidates.push(id);
		}

		for id in candidates {
			if owned_and_ready(id, &self.bases) {
				self.front_id = Some(id);
				return;
			}
		}

		let mut owned_ids: Vec<u32> = self.bases.iter().filter(|b| owned_and_ready(b.id, &self.bases)).map(|b| b.id).collect();
		owned_ids.sort_unstable();
		self.front_id = owned_ids.into_iter().next().or(self.front_id);
	}

	/// Infers the enemy's starting base before it has been scouted directly
	/// (§4.1 "Enemy base inference"), grounded in Steamhammer's
	/// `Bases::updateEnemyStart()`. Tries, in order: (a) an overlord sighting
	/// (zerg enemies only, and only within the first few minutes, since an
	/// overlord's predictable drift from its hatchery stops being useful
	/// evidence later in the game); (b) any other enemy building seen within
	/// reach of an unexplored starting base; (c) elimination, when exactly
	/// one starting base is still unexplored. Once latched, `enemy_start_id`
	/// is never cleared.
	pub fn infer_enemy_start(
		&mut self,
		frame: u32,
		enemy_race: Race,
		map_size_tiles: (f32, f32),
		all_units: &AllUnits,
		is_explored: impl Fn(Point2) -> bool,
	) {
		if self.enemy_start_id.is_some() {
			return;
		}

		let unexplored: Vec<u32> = self
			.bases
			.iter()
			.filter(|b| b.is_starting_location && Some(b.id) != self.main_id && Some(b.id) != self.starting_id && !is_explored(b.tile))
			.map(|b| b.id)
			.collect();
		if unexplored.is_empty() {
			return;
		}

		if enemy_race == Race::Zerg && frame <= OVERLORD_INFERENCE_WINDOW_FRAMES {
			let overlords: Vec<&crate::unit::Unit> = all_units.enemy.all.iter().filter(|u| u.type_id == UnitTypeId::Overlord).collect();
			let (map_w, map_h) = map_size_tiles;
			let mut matches: Vec<u32> = Vec::new();
			for &id in &unexplored {
				let base = match self.find(id) {
					Some(b) => b,
					None => continue,
				};
				let x_sign = if base.tile.x < map_w / 2.0 { 1.0 } else { -1.0 };
				let y_sign = if base.tile.y < map_h / 2.0 { 1.0 } else { -1.0 };
				let predicted_start = Point2::new(base.tile.x + x_sign * OVERLORD_START_OFFSET_X_TILES, base.tile.y + y_sign * OVERLORD_START_OFFSET_Y_TILES);

				let seen = overlords.iter().any(|o| {
					let max_travel = frame as f32 * OVERLORD_SPEED_TILES_PER_FRAME;
					o.position.distance(predicted_start) <= max_travel
				});
				if seen {
					matches.push(id);
				}
			}
			if matches.len() == 1 {
				self.enemy_start_id = Some(matches[0]);
				return;
			}
		}

		let building_sighted: Vec<u32> = unexplored
			.iter()
			.copied()
			.filter(|&id| {
				let base = self.find(id).unwrap();
				all_units.enemy.structures.iter().any(|b| b.position.distance(base.tile) <= BASE_RESOURCE_RADIUS)
			})
			.collect();
		if building_sighted.len() == 1 {
			self.enemy_start_id = Some(building_sighted[0]);
			return;
		} else if let Some(&id) = building_sighted.first() {
			self.enemy_start_id = Some(id);
			return;
		}

		if unexplored.len() == 1 {
			self.enemy_start_id = Some(unexplored[0]);
		}
	}
}

fn take_cluster(pool: &[ResourceSite], around: Point2) -> (Vec<ResourceSite>, Vec<ResourceSite>) {
	pool.iter()
		.cloned()
		.partition(|r| r.position.distance(around) <= BASE_RESOURCE_RADIUS)
}

fn bounding_box_center(group: &[ResourceSite]) -> Point2 {
	let xs: Vec<f32> = group.iter().map(|r| r.position.x).collect();
	let ys: Vec<f32> = group.iter().map(|r| r.position.y).collect();
	let min_x = xs.iter().cloned().fold(f32::MAX, f32::min);
	let max_x = xs.iter().cloned().fold(f32::MIN, f32::max);
	let min_y = ys.iter().cloned().fold(f32::MAX, f32::min);
	let max_y = ys.iter().cloned().fold(f32::MIN, f32::max);
	Point2::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn site(tag: u64, x: f32, y: f32, amount: u32, geyser: bool) -> ResourceSite {
		ResourceSite {
			tag,
			position: Point2::new(x, y),
			initial_amount: amount,
			is_geyser: geyser,
		}
	}

	#[test]
	fn discovery_groups_nearby_resources_into_one_base() {
		let resources = vec![
			site(1, 10.0, 10.0, 150, false),
			site(2, 12.0, 10.0, 150, false),
			site(3, 11.0, 12.0, 200, false),
			site(4, 10.0, 8.0, 100, true),
		];
		let registry = BaseRegistry::discover(&resources, &[Point2::new(10.0, 10.0)]);
		assert_eq!(registry.bases.len(), 1);
		assert_eq!(registry.bases[0].minerals.len(), 3);
		assert_eq!(registry.bases[0].geysers.len(), 1);
	}

	#[test]
	fn far_apart_clusters_produce_two_bases_with_stable_ids() {
		let resources = vec![site(1, 0.0, 0.0, 500, false), site(2, 100.0, 100.0, 500, false)];
		let registry = BaseRegistry::discover(&resources, &[Point2::new(0.0, 0.0)]);
		assert_eq!(registry.bases.len(), 2);
		assert_eq!(registry.bases[0].id, 1);
		assert_eq!(registry.bases[1].id, 2);
	}
}
