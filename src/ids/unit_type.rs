use num_derive::{FromPrimitive, ToPrimitive};

/// A Brood War unit or building type.
#[derive(Debug, FromPrimitive, ToPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnitTypeId {
	// Resources (neutral)
	MineralField,
	VespeneGeyser,

	// Terran
	Scv,
	CommandCenter,
	SupplyDepot,
	Refinery,
	Barracks,
	EngineeringBay,
	Bunker,
	MissileTurret,
	Academy,
	Factory,
	Starport,
	Armory,
	ScienceFacility,
	ComsatStation,
	MachineShop,
	PhysicsLab,
	CovertOps,
	ControlTower,
	NuclearSilo,
	Marine,
	Firebat,
	Medic,
	Ghost,
	Vulture,
	Goliath,
	SiegeTank,
	SiegeTankSieged,
	Wraith,
	Dropship,
	ScienceVessel,
	Battlecruiser,
	Valkyrie,

	// Zerg
	Drone,
	Larva,
	Egg,
	Hatchery,
	Lair,
	Hive,
	Extractor,
	Overlord,
	SpawningPool,
	EvolutionChamber,
	HydraliskDen,
	CreepColony,
	SunkenColony,
	SporeColony,
	Spire,
	GreaterSpire,
	QueensNest,
	NydusCanal,
	UltraliskCavern,
	DefilerMound,
	Zergling,
	Hydralisk,
	LurkerEgg,
	Lurker,
	Mutalisk,
	Guardian,
	Devourer,
	Scourge,
	Queen,
	Ultralisk,
	Defiler,

	// Protoss
	Probe,
	Nexus,
	Pylon,
	Assimilator,
	Gateway,
	Forge,
	CyberneticsCore,
	PhotonCannon,
	RoboticsFacility,
	Stargate,
	FleetBeacon,
	TemplarArchives,
	DarkShrine,
	RoboticsSupportBay,
	Observatory,
	CitadelOfAdun,
	ArbiterTribunal,
	ShieldBattery,
	Zealot,
	Dragoon,
	DarkTemplar,
	HighTemplar,
	Archon,
	DarkArchon,
	Reaver,
	Shuttle,
	Observer,
	Scout,
	Carrier,
	Interceptor,
	Arbiter,
	Corsair,

	/// Sentinel used for "no unit"/unresolved producer slots.
	NotAUnit,
}
