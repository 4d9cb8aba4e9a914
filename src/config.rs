//! Recognized configuration options (§6).
//!
//! Parsing the config file itself is out of scope (§1) — this struct is the
//! defined interface the core reads from, populated by whatever loader the
//! embedding bot uses. With the `serde` feature it derives `Deserialize` so
//! an external loader can fill it in from the line-structured format §6
//! describes without this crate owning file I/O.

#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreConfig {
	/// Target gas workers per refinery. Default `3`.
	pub workers_per_refinery: u32,
	/// Target mineral workers per patch. Default `3.0`; the hard ceiling of
	/// 2 workers per patch (§3 mineral locking) always applies regardless.
	pub workers_per_patch: f32,
	/// Global cap on total workers. Default `75`.
	pub absolute_max_workers: u32,
	/// Default spacing (in tiles) around non-defense buildings. Default `1`.
	pub building_spacing: i32,
	/// Spacing around early pylons. Default `3`.
	pub pylon_spacing: i32,
	/// Production-jam timeout, in frames. Default `360`.
	pub production_jam_frame_limit: u32,
	/// Combat-tuning passthroughs (consumed by the combat controller collaborator).
	pub regroup_radius: f32,
	pub unit_near_enemy_radius: f32,
	pub scout_defense_radius: f32,
	pub retreat_melee_unit_hp: f32,
	pub retreat_melee_unit_shields: f32,
	/// Behavior flags.
	pub kite_with_ranged_units: bool,
	pub workers_defend_rush: bool,
}

impl Default for CoreConfig {
	fn default() -> Self {
		Self {
			workers_per_refinery: 3,
			workers_per_patch: 3.0,
			absolute_max_workers: 75,
			building_spacing: 1,
			pylon_spacing: 3,
			production_jam_frame_limit: 360,
			regroup_radius: 11.0,
			unit_near_enemy_radius: 5.0,
			scout_defense_radius: 8.0,
			retreat_melee_unit_hp: 20.0,
			retreat_melee_unit_shields: 0.0,
			kite_with_ranged_units: true,
			workers_defend_rush: true,
		}
	}
}

impl CoreConfig {
	/// `MaxWorkers` at any instant (§4.4), floored at 1 so a map with a
	/// single depleted patch never evaluates to a zero cap.
	pub fn max_workers(&self, patches: u32, refineries: u32) -> u32 {
		let uncapped =
			(self.workers_per_patch * patches as f32 + self.workers_per_refinery as f32 * refineries as f32).round()
				as u32 + 1;
		uncapped.min(self.absolute_max_workers).max(1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn max_workers_floors_at_one() {
		let cfg = CoreConfig {
			absolute_max_workers: 75,
			..Default::default()
		};
		assert_eq!(cfg.max_workers(0, 0), 1);
	}

	#[test]
	fn max_workers_respects_absolute_cap() {
		let cfg = CoreConfig {
			absolute_max_workers: 20,
			..Default::default()
		};
		assert_eq!(cfg.max_workers(100, 10), 20);
	}
}
