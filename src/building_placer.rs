//! Tile reservation and placement search (§4.2). Answers "can X be built at
//! tile T?" and "where should X be built near location L?". Grounded in
//! Steamhammer's `BuildingPlacer.cpp`: a boolean reservation grid mutated
//! only here and by `BaseRegistry` at startup, plus a handful of
//! category-specific search strategies layered over one generic
//! nearest-free-tile scan.

use crate::{
	base_registry::{BaseRegistry, BASE_RESOURCE_RADIUS},
	distance::Distance,
	geometry::Point2,
	pixel_map::BoolMap,
	resource_tracker::ResourceTracker,
};
use itertools::iproduct;

/// Symbolic placement hint carried by a `PlannedBuilding`/`MacroAct` (§3),
/// resolved to a concrete tile by [`BuildingPlacer::resolve_location`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroLocation {
	Main,
	Natural,
	Front,
	Expo,
	MinOnly,
	GasOnly,
	Hidden,
	Center,
	Proxy,
	EnemyMain,
	EnemyNatural,
	GasSteal,
	Tile,
	Anywhere,
}

/// Penalty threshold for [`distance_to_edge`] (§4.2 `edgeDistance_adjusted`):
/// tiles closer to the map border than this incur a placement penalty,
/// tiles farther in don't. Steamhammer's exact edge-distance formula isn't
/// part of this crate's read surface, so this is a disclosed approximation
/// (see DESIGN.md).
const EDGE_DISTANCE_THRESHOLD: f32 = 6.0;
/// Search radius (in tiles) used when scanning for a free tile around a
/// resolved base location.
const PLACEMENT_SEARCH_RADIUS: usize = 10;
/// Minimum clearance (in tiles, each axis) a proxy tile keeps from the
/// enemy's own resource depot, so the building lands in the enemy's zone
/// without sitting on top of their mineral line.
const PROXY_MIN_CLEARANCE: f32 = 8.0;

pub struct BuildingPlacer {
	/// `true` where a tile is reserved (unavailable even though the terrain
	/// itself is buildable).
	reserved: BoolMap,
	map_size: (usize, usize),
	is_zerg: bool,
}

impl BuildingPlacer {
	pub fn new(map_size: (usize, usize), is_zerg: bool) -> Self {
		Self {
			reserved: BoolMap::from_elem(map_size, false),
			map_size,
			is_zerg,
		}
	}

	pub fn reserve(&mut self, tile: Point2, width: usize, height: usize) {
		self.set_area(tile, width, height, true);
	}

	pub fn free(&mut self, tile: Point2, width: usize, height: usize) {
		self.set_area(tile, width, height, false);
	}

	fn set_area(&mut self, tile: Point2, width: usize, height: usize, value: bool) {
		let (tx, ty) = tile.to_tile();
		for dx in 0..width {
			for dy in 0..height {
				let (x, y) = (tx + dx, ty + dy);
				if x < self.map_size.0 && y < self.map_size.1 {
					self.reserved[(x, y)] = value;
				}
			}
		}
	}

	/// A tile is "free" (§4.2) iff terrain-buildable, unreserved, and —
	/// terran-only — not within 3 tiles left of an addon-capable building
	/// (addons extend 2 tiles to the right).
	pub fn is_free(&self, tile: Point2, terrain_buildable: impl Fn(Point2) -> bool, blocks_addon_to_left: impl Fn(Point2) -> bool) -> bool {
		let (x, y) = tile.to_tile();
		if x >= self.map_size.0 || y >= self.map_size.1 {
			return false;
		}
		terrain_buildable(tile) && !self.reserved[(x, y)] && !blocks_addon_to_left(tile)
	}

	/// Whether a `width x height` building (optionally addon-capable, which
	/// widens the footprint by 2 for this check) fits at `tile`, given a
	/// terrain-buildability predicate and a threat predicate over the
	/// expanded footprint.
	pub fn can_place(
		&self,
		tile: Point2,
		width: usize,
		height: usize,
		can_host_addon: bool,
		terrain_buildable: impl Fn(Point2) -> bool,
		threatened: impl Fn(Point2) -> bool,
	) -> bool {
		let effective_width = if can_host_addon { width + 2 } else { width };
		let (tx, ty) = tile.to_tile();
		for dx in 0..effective_width {
			for dy in 0..height {
				let check = Point2::new((tx + dx) as f32 + 0.5, (ty + dy) as f32 + 0.5);
				if !self.is_free(check, &terrain_buildable, |_| false) || threatened(check) {
					return false;
				}
			}
		}
		true
	}

	/// Generic nearest-free-tile search: iterates candidate tiles in order
	/// of increasing ground distance from `hint` (approximated with
	/// straight-line distance; callers with a real ground-distance map may
	/// pre-sort `candidates` accordingly) and returns the first that passes
	/// `accept`.
	pub fn search_nearest(&self, hint: Point2, candidates: &[Point2], accept: impl Fn(Point2) -> bool) -> Option<Point2> {
		let mut sorted: Vec<Point2> = candidates.to_vec();
		sorted.sort_by(|a, b| a.distance_squared(hint).partial_cmp(&b.distance_squared(hint)).unwrap());
		sorted.into_iter().find(|&t| accept(t))
	}

	/// Edge placement for 3x2 buildings (supply depots, academies,
	/// armories, §4.2): only border tiles within 18 tiles of `main_tile`.
	pub fn search_edge(&self, main_tile: Point2, accept: impl Fn(Point2) -> bool) -> Option<Point2> {
		let (w, h) = self.map_size;
		let candidates: Vec<Point2> = iproduct!(0..w, 0..h)
			.filter(|&(x, y)| x == 0 || y == 0 || x + 3 >= w || y + 2 >= h)
			.map(Point2::from)
			.filter(|&t| t.distance(main_tile) <= 18.0)
			.collect();
		self.search_nearest(main_tile, &candidates, accept)
	}

	/// Every tile within `radius` of `center`, clipped to the map, for use
	/// as a [`search_nearest`] candidate pool.
	fn nearby_candidates(&self, center: Point2, radius: usize) -> Vec<Point2> {
		let (cx, cy) = center.to_tile();
		let (w, h) = self.map_size;
		iproduct!(cx.saturating_sub(radius)..=(cx + radius).min(w.saturating_sub(1)), cy.saturating_sub(radius)..=(cy + radius).min(h.saturating_sub(1)))
			.map(Point2::from)
			.collect()
	}

	/// Resolves a symbolic [`MacroLocation`] to a concrete, buildable,
	/// unreserved tile (§4.2), actually running `can_place`/`search_nearest`/
	/// `search_edge` over the candidate pool around the symbolic location's
	/// base tile rather than handing back that tile unchecked.
	#[allow(clippy::too_many_arguments)]
	pub fn resolve_location(
		&self,
		location: MacroLocation,
		bases: &BaseRegistry,
		enemy_main: Option<Point2>,
		resources: &ResourceTracker,
		footprint: (usize, usize),
		can_host_addon: bool,
		terrain_buildable: impl Fn(Point2) -> bool,
		threatened: impl Fn(Point2) -> bool,
	) -> Option<Point2> {
		let (width, height) = footprint;
		let accept = |t: Point2| self.can_place(t, width, height, can_host_addon, &terrain_buildable, &threatened);

		let around = |hint: Point2| -> Option<Point2> {
			if height == 2 && width == 3 {
				self.search_edge(hint, accept).or_else(|| self.search_nearest(hint, &self.nearby_candidates(hint, PLACEMENT_SEARCH_RADIUS), accept))
			} else {
				self.search_nearest(hint, &self.nearby_candidates(hint, PLACEMENT_SEARCH_RADIUS), accept)
			}
			.or(Some(hint))
		};

		match location {
			MacroLocation::Main | MacroLocation::Anywhere | MacroLocation::Tile => bases.main().map(|b| b.tile).and_then(around),
			MacroLocation::Natural => bases.main().and_then(|b| b.natural).and_then(|id| bases.find(id)).map(|b| b.tile).and_then(around),
			MacroLocation::Front => bases.front_id.and_then(|id| bases.find(id)).map(|b| b.tile).and_then(around),
			MacroLocation::EnemyMain | MacroLocation::EnemyNatural | MacroLocation::GasSteal => enemy_main.and_then(around),
			MacroLocation::Proxy => enemy_main.map(|e| proxy_tile(self, e)).and_then(around),
			MacroLocation::Expo | MacroLocation::MinOnly | MacroLocation::GasOnly => {
				self.next_expansion(bases, resources, enemy_main, location == MacroLocation::GasOnly, false).and_then(around)
			}
			MacroLocation::Hidden => self.next_expansion(bases, resources, enemy_main, false, true).and_then(around),
			MacroLocation::Center => around(Point2::new(self.map_size.0 as f32 / 2.0, self.map_size.1 as f32 / 2.0)),
		}
	}

	/// Expansion scoring (§4.2). Picks the highest-scoring unreserved
	/// neutral base, following the exact weighting of distance-from-enemy,
	/// distance-from-self, resource amounts, and an edge-proximity penalty,
	/// with a different distance term for a hidden (out-of-the-way) pick.
	fn next_expansion(&self, bases: &BaseRegistry, resources: &ResourceTracker, enemy_main: Option<Point2>, want_gas: bool, hidden: bool) -> Option<Point2> {
		use crate::player::Alliance;
		let my_main = bases.main()?.tile;
		let enemy_tile = enemy_main.unwrap_or(my_main);
		bases
			.bases
			.iter()
			.filter(|b| b.owner == Alliance::Neutral)
			.max_by(|a, b| {
				let score_a = expansion_score(a, my_main, enemy_tile, resources, want_gas, hidden, self.map_size);
				let score_b = expansion_score(b, my_main, enemy_tile, resources, want_gas, hidden, self.map_size);
				score_a.partial_cmp(&score_b).unwrap()
			})
			.map(|b| b.tile)
	}

	pub fn is_zerg(&self) -> bool {
		self.is_zerg
	}
}

/// Approximates a base's ground-distance margin from the nearest map edge,
/// in tiles (§4.2 `edgeDistance_adjusted` — see [`EDGE_DISTANCE_THRESHOLD`]).
fn distance_to_edge(tile: Point2, map_size: (usize, usize)) -> f32 {
	let (w, h) = (map_size.0 as f32, map_size.1 as f32);
	tile.x.min(w - tile.x).min(tile.y).min(h - tile.y).max(0.0)
}

/// A rough proxy tile (§4.2 "Proxy"): inside the enemy's base radius, but
/// clear of their depot/mining line on both axes, picking the point
/// farthest from their depot among those that qualify so a scout is less
/// likely to spot it immediately.
fn proxy_tile(placer: &BuildingPlacer, enemy_main: Point2) -> Point2 {
	placer
		.nearby_candidates(enemy_main, BASE_RESOURCE_RADIUS as usize)
		.into_iter()
		.filter(|t| (t.x - enemy_main.x).abs() > PROXY_MIN_CLEARANCE && (t.y - enemy_main.y).abs() > PROXY_MIN_CLEARANCE)
		.max_by(|a, b| a.distance_squared(enemy_main).partial_cmp(&b.distance_squared(enemy_main)).unwrap())
		.unwrap_or_else(|| enemy_main.offset(PROXY_MIN_CLEARANCE + 2.0, PROXY_MIN_CLEARANCE + 2.0))
}

fn expansion_score(base: &crate::base_registry::Base, my_main: Point2, enemy_tile: Point2, resources: &ResourceTracker, want_gas: bool, hidden: bool, map_size: (usize, usize)) -> f32 {
	let dist_self = base.tile.distance(my_main);
	let dist_enemy = base.tile.distance(enemy_tile);

	let distance_term = if hidden { dist_enemy + dist_self / 2.0 } else { dist_enemy / 2.0 - dist_self };

	let edge_distance = distance_to_edge(base.tile, map_size);
	let edge_penalty = (EDGE_DISTANCE_THRESHOLD - edge_distance).max(0.0);

	let mineral_amount: u32 = base.minerals.iter().filter_map(|&tag| resources.get(tag)).map(|r| r.current_amount).sum();
	let gas_amount: u32 = base.geysers.iter().filter_map(|&tag| resources.get(tag)).map(|r| r.current_amount).sum();

	let resource_term = if want_gas {
		20.0 * base.geysers.len() as f32 + 0.01 * gas_amount as f32
	} else {
		5.0 * base.geysers.len() as f32 + 0.0025 * gas_amount as f32
	};

	distance_term - 15.0 * edge_penalty + 5.0 * base.minerals.len() as f32 + 0.005 * mineral_amount as f32 + resource_term
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reserve_then_is_free_reports_blocked() {
		let placer = {
			let mut p = BuildingPlacer::new((64, 64), false);
			p.reserve(Point2::new(10.0, 10.0), 4, 3);
			p
		};
		assert!(!placer.is_free(Point2::new(11.0, 11.0), |_| true, |_| false));
		assert!(placer.is_free(Point2::new(20.0, 20.0), |_| true, |_| false));
	}

	#[test]
	fn free_releases_previously_reserved_tiles() {
		let mut placer = BuildingPlacer::new((64, 64), false);
		placer.reserve(Point2::new(5.0, 5.0), 4, 3);
		placer.free(Point2::new(5.0, 5.0), 4, 3);
		assert!(placer.is_free(Point2::new(6.0, 6.0), |_| true, |_| false));
	}

	#[test]
	fn search_nearest_returns_closest_accepted_candidate() {
		let placer = BuildingPlacer::new((64, 64), false);
		let candidates = vec![Point2::new(0.0, 0.0), Point2::new(5.0, 5.0), Point2::new(1.0, 1.0)];
		let found = placer.search_nearest(Point2::new(0.0, 0.0), &candidates, |_| true);
		assert_eq!(found, Some(Point2::new(0.0, 0.0)));
	}

	#[test]
	fn resolve_location_falls_back_to_main_tile_when_nothing_in_the_pool_is_placeable() {
		use crate::base_registry::{BaseRegistry, ResourceSite};
		let resources = vec![ResourceSite { tag: 1, position: Point2::new(10.0, 10.0), initial_amount: 1500, is_geyser: false }];
		let bases = BaseRegistry::discover(&resources, &[Point2::new(10.0, 10.0)]);
		let placer = BuildingPlacer::new((64, 64), false);
		let tracker = ResourceTracker::new();
		let tile = placer.resolve_location(MacroLocation::Main, &bases, None, &tracker, (4, 3), false, |_| false, |_| false);
		assert_eq!(tile, Some(Point2::new(10.0, 10.0)));
	}

	#[test]
	fn hidden_expansion_favors_distance_from_both_players() {
		use crate::base_registry::{BaseRegistry, ResourceSite};
		let resources = vec![
			ResourceSite { tag: 1, position: Point2::new(10.0, 10.0), initial_amount: 1500, is_geyser: false },
			ResourceSite { tag: 2, position: Point2::new(50.0, 50.0), initial_amount: 1500, is_geyser: false },
			ResourceSite { tag: 3, position: Point2::new(30.0, 30.0), initial_amount: 1500, is_geyser: false },
		];
		let bases = BaseRegistry::discover(&resources, &[Point2::new(10.0, 10.0)]);
		let placer = BuildingPlacer::new((100, 100), false);
		let tracker = ResourceTracker::new();
		let tile = placer.resolve_location(MacroLocation::Hidden, &bases, Some(Point2::new(50.0, 50.0)), &tracker, (4, 3), false, |_| true, |_| false);
		assert!(tile.is_some());
	}
}
