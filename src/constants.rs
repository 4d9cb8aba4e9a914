//! Static Brood War data tables: per-race landmark unit types and the
//! mineral/gas/supply/build-time/producer data `MacroAct` costing (§4.5)
//! reads from. Grounded in the teacher's `constants.rs`/`game_data.rs`
//! pattern (`lazy_static` tables keyed by race or unit type) but populated
//! with real Brood War numbers instead of a protobuf-fed data dump.
//!
//! Supply values follow Brood War's own internal convention of counting
//! supply in halves (a Zergling costs 1 half-supply, a Marine costs 2), so
//! `supply_cost` and `supply_provided` below are both doubled integers.

use crate::{
	ids::{TechId, UnitTypeId, UpgradeId},
	player::Race,
};
use lazy_static::lazy_static;
use std::collections::HashMap;

pub const WORKER_IDS: [UnitTypeId; 3] = [UnitTypeId::Scv, UnitTypeId::Drone, UnitTypeId::Probe];

pub const RESOURCE_DEPOT_IDS: [UnitTypeId; 5] = [
	UnitTypeId::CommandCenter,
	UnitTypeId::Hatchery,
	UnitTypeId::Lair,
	UnitTypeId::Hive,
	UnitTypeId::Nexus,
];

pub const REFINERY_IDS: [UnitTypeId; 3] = [UnitTypeId::Refinery, UnitTypeId::Extractor, UnitTypeId::Assimilator];

pub const SUPPLY_PROVIDER_IDS: [UnitTypeId; 3] = [UnitTypeId::SupplyDepot, UnitTypeId::Overlord, UnitTypeId::Pylon];

pub const ADDON_IDS: [UnitTypeId; 6] = [
	UnitTypeId::ComsatStation,
	UnitTypeId::MachineShop,
	UnitTypeId::PhysicsLab,
	UnitTypeId::CovertOps,
	UnitTypeId::ControlTower,
	UnitTypeId::NuclearSilo,
];

pub const STATIC_DEFENSE_IDS: [UnitTypeId; 5] = [
	UnitTypeId::Bunker,
	UnitTypeId::MissileTurret,
	UnitTypeId::PhotonCannon,
	UnitTypeId::SunkenColony,
	UnitTypeId::SporeColony,
];

/// Per-race landmark unit types the components key off of by race rather
/// than by individual unit type (base registry, worker scheduler, ...).
#[derive(Debug, Clone, Copy)]
pub struct RaceValues {
	pub worker: UnitTypeId,
	pub resource_depot: UnitTypeId,
	pub refinery: UnitTypeId,
	pub supply_provider: UnitTypeId,
}

lazy_static! {
	pub static ref RACE_VALUES: HashMap<Race, RaceValues> = {
		let mut m = HashMap::new();
		m.insert(
			Race::Terran,
			RaceValues {
				worker: UnitTypeId::Scv,
				resource_depot: UnitTypeId::CommandCenter,
				refinery: UnitTypeId::Refinery,
				supply_provider: UnitTypeId::SupplyDepot,
			},
		);
		m.insert(
			Race::Zerg,
			RaceValues {
				worker: UnitTypeId::Drone,
				resource_depot: UnitTypeId::Hatchery,
				refinery: UnitTypeId::Extractor,
				supply_provider: UnitTypeId::Overlord,
			},
		);
		m.insert(
			Race::Protoss,
			RaceValues {
				worker: UnitTypeId::Probe,
				resource_depot: UnitTypeId::Nexus,
				refinery: UnitTypeId::Assimilator,
				supply_provider: UnitTypeId::Pylon,
			},
		);
		m
	};
}

/// Cost and production data for a single unit or building type, read by
/// `MacroAct::cost()`/`supply_cost()`/`producer()` (§4.5).
#[derive(Debug, Clone, Copy)]
pub struct UnitTypeData {
	pub mineral_cost: u32,
	pub gas_cost: u32,
	/// Doubled supply cost (0 for buildings that consume no supply).
	pub supply_cost: u32,
	/// Doubled supply provided (0 for anything that isn't a supply provider).
	pub supply_provided: u32,
	pub build_time: u32,
	/// The unit/building that produces this one (a worker, for anything
	/// built from scratch; the parent building, for a morph or a trained
	/// unit).
	pub producer: UnitTypeId,
	pub prerequisite: Option<UnitTypeId>,
}

macro_rules! data {
	($m:ident, $type_id:expr, $mineral:expr, $gas:expr, $supply:expr, $supply_provided:expr, $build_time:expr, $producer:expr, $prereq:expr) => {
		$m.insert(
			$type_id,
			UnitTypeData {
				mineral_cost: $mineral,
				gas_cost: $gas,
				supply_cost: $supply,
				supply_provided: $supply_provided,
				build_time: $build_time,
				producer: $producer,
				prerequisite: $prereq,
			},
		);
	};
}

lazy_static! {
	pub static ref UNIT_TYPE_DATA: HashMap<UnitTypeId, UnitTypeData> = {
		use UnitTypeId::*;
		let mut m = HashMap::new();

		// Terran
		data!(m, Scv, 50, 0, 2, 0, 150, CommandCenter, None);
		data!(m, CommandCenter, 400, 0, 0, 0, 1800, Scv, None);
		data!(m, SupplyDepot, 100, 0, 0, 16, 600, Scv, None);
		data!(m, Refinery, 100, 0, 0, 0, 400, Scv, None);
		data!(m, Barracks, 150, 0, 0, 0, 1200, Scv, None);
		data!(m, EngineeringBay, 125, 0, 0, 0, 1200, Scv, None);
		data!(m, Bunker, 100, 0, 0, 0, 600, Scv, None);
		data!(m, MissileTurret, 75, 0, 0, 0, 300, Scv, Some(EngineeringBay));
		data!(m, Academy, 150, 0, 0, 0, 1200, Scv, Some(Barracks));
		data!(m, Factory, 200, 100, 0, 0, 1200, Scv, Some(Barracks));
		data!(m, Starport, 150, 100, 0, 0, 1050, Scv, Some(Factory));
		data!(m, Armory, 100, 50, 0, 0, 1200, Scv, Some(Factory));
		data!(m, ScienceFacility, 100, 150, 0, 0, 1200, Scv, Some(Starport));
		data!(m, ComsatStation, 50, 50, 0, 0, 600, CommandCenter, None);
		data!(m, MachineShop, 50, 50, 0, 0, 500, Factory, None);
		data!(m, PhysicsLab, 50, 100, 0, 0, 600, ScienceFacility, None);
		data!(m, CovertOps, 50, 50, 0, 0, 600, ScienceFacility, None);
		data!(m, ControlTower, 50, 0, 0, 0, 300, Starport, None);
		data!(m, NuclearSilo, 100, 100, 0, 0, 1200, CommandCenter, None);
		data!(m, Marine, 50, 0, 2, 0, 360, Barracks, None);
		data!(m, Firebat, 50, 25, 2, 0, 360, Barracks, Some(Academy));
		data!(m, Medic, 50, 25, 2, 0, 360, Barracks, Some(Academy));
		data!(m, Ghost, 25, 75, 2, 0, 750, Barracks, Some(CovertOps));
		data!(m, Vulture, 75, 0, 4, 0, 450, Factory, None);
		data!(m, Goliath, 100, 50, 4, 0, 600, Factory, Some(Armory));
		data!(m, SiegeTank, 150, 100, 4, 0, 600, Factory, Some(MachineShop));
		data!(m, SiegeTankSieged, 0, 0, 4, 0, 0, SiegeTank, None);
		data!(m, Wraith, 150, 100, 4, 0, 600, Starport, None);
		data!(m, Dropship, 100, 100, 4, 0, 750, Starport, Some(ControlTower));
		data!(m, ScienceVessel, 100, 225, 4, 0, 900, Starport, Some(ControlTower));
		data!(m, Battlecruiser, 400, 300, 12, 0, 2250, Starport, Some(PhysicsLab));
		data!(m, Valkyrie, 250, 125, 6, 0, 750, Starport, Some(ControlTower));

		// Zerg
		data!(m, Drone, 50, 0, 2, 0, 360, Larva, None);
		data!(m, Larva, 0, 0, 0, 0, 0, Hatchery, None);
		data!(m, Egg, 0, 0, 0, 0, 0, Larva, None);
		data!(m, Hatchery, 300, 0, 0, 0, 1800, Drone, None);
		data!(m, Lair, 150, 100, 0, 0, 1500, Hatchery, None);
		data!(m, Hive, 200, 150, 0, 0, 1800, Lair, Some(QueensNest));
		data!(m, Extractor, 50, 0, 0, 0, 600, Drone, None);
		data!(m, Overlord, 100, 0, 0, 16, 600, Larva, None);
		data!(m, SpawningPool, 200, 0, 0, 0, 1200, Drone, None);
		data!(m, EvolutionChamber, 75, 0, 0, 0, 600, Drone, None);
		data!(m, HydraliskDen, 100, 50, 0, 0, 600, Drone, Some(SpawningPool));
		data!(m, CreepColony, 75, 0, 0, 0, 300, Drone, None);
		data!(m, SunkenColony, 50, 0, 0, 0, 300, CreepColony, Some(SpawningPool));
		data!(m, SporeColony, 50, 0, 0, 0, 300, CreepColony, Some(EvolutionChamber));
		data!(m, Spire, 200, 150, 0, 0, 1800, Drone, Some(Lair));
		data!(m, GreaterSpire, 100, 150, 0, 0, 1200, Spire, Some(Hive));
		data!(m, QueensNest, 150, 100, 0, 0, 1200, Drone, Some(Lair));
		data!(m, NydusCanal, 150, 0, 0, 0, 600, Drone, None);
		data!(m, UltraliskCavern, 150, 200, 0, 0, 1200, Drone, Some(Hive));
		data!(m, DefilerMound, 100, 100, 0, 0, 900, Drone, Some(Lair));
		data!(m, Zergling, 25, 0, 1, 0, 300, Larva, Some(SpawningPool));
		data!(m, Hydralisk, 75, 25, 2, 0, 420, Larva, Some(HydraliskDen));
		data!(m, LurkerEgg, 0, 0, 0, 0, 0, Hydralisk, None);
		data!(m, Lurker, 0, 0, 4, 0, 0, LurkerEgg, None);
		data!(m, Mutalisk, 100, 100, 4, 0, 600, Larva, Some(Spire));
		data!(m, Guardian, 50, 100, 0, 0, 600, Mutalisk, Some(GreaterSpire));
		data!(m, Devourer, 150, 50, 0, 0, 600, Mutalisk, Some(GreaterSpire));
		data!(m, Scourge, 25, 75, 1, 0, 450, Larva, Some(Spire));
		data!(m, Queen, 100, 100, 2, 0, 750, Larva, Some(QueensNest));
		data!(m, Ultralisk, 200, 200, 8, 0, 600, Larva, Some(UltraliskCavern));
		data!(m, Defiler, 50, 150, 2, 0, 750, Larva, Some(DefilerMound));

		// Protoss
		data!(m, Probe, 50, 0, 2, 0, 300, Nexus, None);
		data!(m, Nexus, 400, 0, 0, 0, 1800, Probe, None);
		data!(m, Pylon, 100, 0, 0, 16, 450, Probe, None);
		data!(m, Assimilator, 100, 0, 0, 0, 400, Probe, None);
		data!(m, Gateway, 150, 0, 0, 0, 900, Probe, None);
		data!(m, Forge, 150, 0, 0, 0, 600, Probe, None);
		data!(m, CyberneticsCore, 200, 0, 0, 0, 600, Probe, Some(Gateway));
		data!(m, PhotonCannon, 150, 0, 0, 0, 750, Probe, Some(Forge));
		data!(m, RoboticsFacility, 200, 200, 0, 0, 1200, Probe, Some(CyberneticsCore));
		data!(m, Stargate, 150, 150, 0, 0, 1050, Probe, Some(CyberneticsCore));
		data!(m, FleetBeacon, 300, 200, 0, 0, 600, Probe, Some(Stargate));
		data!(m, TemplarArchives, 150, 200, 0, 0, 1000, Probe, Some(CitadelOfAdun));
		data!(m, DarkShrine, 150, 150, 0, 0, 1000, Probe, Some(CitadelOfAdun));
		data!(m, RoboticsSupportBay, 150, 100, 0, 0, 600, Probe, Some(RoboticsFacility));
		data!(m, Observatory, 50, 100, 0, 0, 600, Probe, Some(RoboticsFacility));
		data!(m, CitadelOfAdun, 150, 0, 0, 0, 600, Probe, Some(Gateway));
		data!(m, ArbiterTribunal, 200, 150, 0, 0, 600, Probe, Some(TemplarArchives));
		data!(m, ShieldBattery, 100, 0, 0, 0, 450, Probe, Some(Gateway));
		data!(m, Zealot, 100, 0, 4, 0, 600, Gateway, None);
		data!(m, Dragoon, 125, 50, 4, 0, 750, Gateway, Some(CyberneticsCore));
		data!(m, DarkTemplar, 125, 100, 4, 0, 750, Gateway, Some(TemplarArchives));
		data!(m, HighTemplar, 50, 150, 4, 0, 750, Gateway, Some(TemplarArchives));
		data!(m, Archon, 0, 0, 4, 0, 300, HighTemplar, None);
		data!(m, DarkArchon, 0, 0, 4, 0, 300, DarkTemplar, None);
		data!(m, Reaver, 200, 100, 8, 0, 750, RoboticsFacility, Some(RoboticsSupportBay));
		data!(m, Shuttle, 200, 0, 4, 0, 600, RoboticsFacility, None);
		data!(m, Observer, 25, 75, 2, 0, 450, RoboticsFacility, Some(Observatory));
		data!(m, Scout, 275, 125, 6, 0, 1200, Stargate, None);
		data!(m, Carrier, 350, 250, 12, 0, 2100, Stargate, Some(FleetBeacon));
		data!(m, Interceptor, 25, 0, 0, 0, 300, Carrier, None);
		data!(m, Arbiter, 100, 350, 8, 0, 3000, Stargate, Some(ArbiterTribunal));
		data!(m, Corsair, 150, 100, 4, 0, 600, Stargate, None);

		m
	};
}

/// Cost and production data for a researched tech or upgrade, read by
/// `MacroAct::cost()`/`producer()` for the `Tech`/`Upgrade` variants (§4.5).
/// Mirrors [`UnitTypeData`] but carries no supply fields, since research
/// never consumes supply.
#[derive(Debug, Clone, Copy)]
pub struct ResearchData {
	pub mineral_cost: u32,
	pub gas_cost: u32,
	pub research_time: u32,
	pub producer: UnitTypeId,
}

macro_rules! research {
	($m:ident, $id:expr, $mineral:expr, $gas:expr, $time:expr, $producer:expr) => {
		$m.insert($id, ResearchData { mineral_cost: $mineral, gas_cost: $gas, research_time: $time, producer: $producer });
	};
}

lazy_static! {
	pub static ref TECH_DATA: HashMap<TechId, ResearchData> = {
		use TechId::*;
		use UnitTypeId::*;
		let mut m = HashMap::new();

		// Terran
		research!(m, StimPacks, 100, 100, 1200, Academy);
		research!(m, SiegeMode, 150, 150, 1200, MachineShop);
		research!(m, CloakingField, 150, 150, 1200, ControlTower);
		research!(m, PersonnelCloaking, 100, 100, 1200, CovertOps);
		research!(m, SpiderMines, 100, 100, 900, MachineShop);
		research!(m, TankSiegeMode, 150, 150, 1200, MachineShop);
		research!(m, YamatoGun, 100, 100, 1800, PhysicsLab);
		research!(m, OpticalFlare, 100, 100, 900, CovertOps);
		research!(m, Irradiate, 200, 200, 1200, ScienceFacility);
		research!(m, EmpShockwave, 200, 200, 1200, ScienceFacility);
		research!(m, Lockdown, 200, 200, 1200, CovertOps);
		research!(m, Restoration, 100, 100, 600, Academy);

		// Zerg
		research!(m, Burrowing, 100, 100, 1200, HydraliskDen);
		research!(m, LurkerAspect, 200, 200, 1800, HydraliskDen);
		research!(m, SpawnBroodlings, 100, 100, 1200, QueensNest);
		research!(m, Plague, 200, 200, 1200, DefilerMound);
		research!(m, DarkSwarm, 200, 200, 1200, DefilerMound);
		research!(m, Consume, 100, 100, 900, DefilerMound);
		research!(m, EnsnareTech, 100, 100, 1200, QueensNest);

		// Protoss
		research!(m, PsionicStorm, 200, 200, 1800, TemplarArchives);
		research!(m, Hallucination, 100, 100, 1200, TemplarArchives);
		research!(m, MindControl, 200, 200, 1800, ArbiterTribunal);
		research!(m, StasisField, 150, 150, 1200, ArbiterTribunal);
		research!(m, Recall, 150, 150, 1200, ArbiterTribunal);
		research!(m, DisruptionWeb, 200, 200, 1800, FleetBeacon);

		m
	};
	pub static ref UPGRADE_DATA: HashMap<UpgradeId, ResearchData> = {
		use UpgradeId::*;
		use UnitTypeId::*;
		let mut m = HashMap::new();

		// Terran
		research!(m, TerranInfantryWeapons, 100, 100, 800, EngineeringBay);
		research!(m, TerranInfantryArmor, 100, 100, 800, EngineeringBay);
		research!(m, TerranVehicleWeapons, 100, 100, 800, Armory);
		research!(m, TerranVehiclePlating, 150, 150, 800, Armory);
		research!(m, TerranShipWeapons, 100, 100, 800, Armory);
		research!(m, TerranShipPlating, 150, 150, 800, Armory);
		research!(m, IonThrusters, 100, 100, 600, MachineShop);
		research!(m, CharonBooster, 150, 150, 900, Armory);

		// Zerg
		research!(m, ZergMeleeAttacks, 100, 100, 800, EvolutionChamber);
		research!(m, ZergMissileAttacks, 100, 100, 800, EvolutionChamber);
		research!(m, ZergCarapace, 150, 150, 800, EvolutionChamber);
		research!(m, ZergFlyerAttacks, 100, 100, 800, Spire);
		research!(m, ZergFlyerCarapace, 150, 150, 800, Spire);
		research!(m, PneumatizedCarapace, 150, 150, 600, Lair);
		research!(m, VentralSacs, 200, 200, 900, Lair);
		research!(m, AntennaeOverlordSight, 100, 100, 600, Lair);
		research!(m, GroovedSpines, 150, 150, 600, HydraliskDen);
		research!(m, MuscularAugments, 150, 150, 600, HydraliskDen);
		research!(m, AdrenalGlands, 200, 200, 600, SpawningPool);
		research!(m, MetabolicBoost, 100, 100, 600, SpawningPool);
		research!(m, ChitinousPlating, 150, 150, 900, UltraliskCavern);

		// Protoss
		research!(m, ProtossGroundWeapons, 100, 100, 800, Forge);
		research!(m, ProtossGroundArmor, 100, 100, 800, Forge);
		research!(m, ProtossShields, 150, 150, 800, Forge);
		research!(m, ProtossAirWeapons, 100, 100, 800, CyberneticsCore);
		research!(m, ProtossAirArmor, 150, 150, 800, CyberneticsCore);
		research!(m, SingularityCharge, 150, 150, 900, CyberneticsCore);
		research!(m, LegEnhancements, 150, 150, 900, CitadelOfAdun);
		research!(m, ScarabDamage, 150, 150, 900, RoboticsSupportBay);
		research!(m, ReaverCapacity, 200, 200, 900, RoboticsSupportBay);
		research!(m, GraviticDrive, 200, 200, 900, RoboticsSupportBay);
		research!(m, SensorArray, 150, 150, 900, Observatory);
		research!(m, GraviticBoosters, 150, 150, 900, Observatory);
		research!(m, KhaydarinAmulet, 150, 150, 900, TemplarArchives);
		research!(m, ArgusJewel, 100, 100, 900, FleetBeacon);
		research!(m, ArgusTalisman, 150, 150, 900, TemplarArchives);

		m
	};
}

/// Tile footprint (width, height) for every building type (§4.2 placement).
/// No such table exists on `Unit`/the read surface (§6), so these are the
/// real Brood War footprints hand-entered once here rather than derived.
lazy_static! {
	pub static ref BUILDING_FOOTPRINTS: HashMap<UnitTypeId, (usize, usize)> = {
		use UnitTypeId::*;
		let mut m = HashMap::new();
		m.insert(CommandCenter, (4, 3));
		m.insert(SupplyDepot, (3, 2));
		m.insert(Refinery, (4, 2));
		m.insert(Barracks, (4, 3));
		m.insert(EngineeringBay, (4, 3));
		m.insert(Bunker, (3, 2));
		m.insert(MissileTurret, (2, 2));
		m.insert(Academy, (3, 2));
		m.insert(Factory, (4, 3));
		m.insert(Starport, (4, 3));
		m.insert(Armory, (3, 2));
		m.insert(ScienceFacility, (4, 3));
		m.insert(ComsatStation, (2, 2));
		m.insert(MachineShop, (2, 2));
		m.insert(PhysicsLab, (2, 2));
		m.insert(CovertOps, (2, 2));
		m.insert(ControlTower, (2, 2));
		m.insert(NuclearSilo, (4, 3));
		m.insert(Hatchery, (4, 3));
		m.insert(Lair, (4, 3));
		m.insert(Hive, (4, 3));
		m.insert(Extractor, (4, 2));
		m.insert(SpawningPool, (3, 2));
		m.insert(EvolutionChamber, (3, 2));
		m.insert(HydraliskDen, (3, 2));
		m.insert(CreepColony, (2, 2));
		m.insert(SunkenColony, (2, 2));
		m.insert(SporeColony, (2, 2));
		m.insert(Spire, (2, 2));
		m.insert(GreaterSpire, (2, 2));
		m.insert(QueensNest, (2, 2));
		m.insert(NydusCanal, (3, 2));
		m.insert(UltraliskCavern, (3, 2));
		m.insert(DefilerMound, (2, 2));
		m.insert(Nexus, (4, 3));
		m.insert(Pylon, (2, 2));
		m.insert(Assimilator, (4, 2));
		m.insert(Gateway, (4, 3));
		m.insert(Forge, (3, 2));
		m.insert(CyberneticsCore, (3, 2));
		m.insert(PhotonCannon, (2, 2));
		m.insert(RoboticsFacility, (4, 3));
		m.insert(Stargate, (4, 3));
		m.insert(FleetBeacon, (3, 2));
		m.insert(TemplarArchives, (3, 2));
		m.insert(DarkShrine, (2, 2));
		m.insert(RoboticsSupportBay, (3, 2));
		m.insert(Observatory, (3, 2));
		m.insert(CitadelOfAdun, (3, 2));
		m.insert(ArbiterTribunal, (3, 2));
		m.insert(ShieldBattery, (2, 2));
		m
	};
}

/// Whether `building` is a producer some addon in [`ADDON_IDS`] attaches to,
/// derived from `UNIT_TYPE_DATA`'s `producer` field rather than hand-listed
/// twice.
pub fn can_host_addon(building: UnitTypeId) -> bool {
	ADDON_IDS.iter().any(|addon| UNIT_TYPE_DATA.get(addon).map(|d| d.producer) == Some(building))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn race_values_cover_all_three_races() {
		assert_eq!(RACE_VALUES.len(), 3);
		assert_eq!(RACE_VALUES[&Race::Terran].worker, UnitTypeId::Scv);
		assert_eq!(RACE_VALUES[&Race::Zerg].resource_depot, UnitTypeId::Hatchery);
	}

	#[test]
	fn supply_depot_and_marine_match_spec_scenario_two() {
		let depot = &UNIT_TYPE_DATA[&UnitTypeId::SupplyDepot];
		assert_eq!(depot.supply_provided, 16);
		let marine = &UNIT_TYPE_DATA[&UnitTypeId::Marine];
		assert_eq!(marine.supply_cost, 2);
	}

	#[test]
	fn tech_and_upgrade_tables_cover_every_variant() {
		assert_eq!(TECH_DATA.len(), 25);
		assert_eq!(UPGRADE_DATA.len(), 36);
		assert_eq!(TECH_DATA[&TechId::StimPacks].producer, UnitTypeId::Academy);
		assert_eq!(UPGRADE_DATA[&UpgradeId::MetabolicBoost].producer, UnitTypeId::SpawningPool);
	}

	#[test]
	fn building_footprints_cover_every_building_type() {
		assert_eq!(BUILDING_FOOTPRINTS[&UnitTypeId::CommandCenter], (4, 3));
		assert_eq!(BUILDING_FOOTPRINTS[&UnitTypeId::SupplyDepot], (3, 2));
	}

	#[test]
	fn can_host_addon_matches_factory_and_command_center_only_among_terran_production() {
		assert!(can_host_addon(UnitTypeId::Factory));
		assert!(can_host_addon(UnitTypeId::CommandCenter));
		assert!(can_host_addon(UnitTypeId::Starport));
		assert!(!can_host_addon(UnitTypeId::Barracks));
	}
}
