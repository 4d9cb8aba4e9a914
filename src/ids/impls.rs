use super::UnitTypeId;

impl UnitTypeId {
	#[inline]
	pub fn is_worker(self) -> bool {
		matches!(self, UnitTypeId::Scv | UnitTypeId::Drone | UnitTypeId::Probe)
	}

	#[rustfmt::skip::macros(matches)]
	#[inline]
	pub fn is_resource_depot(self) -> bool {
		matches!(
			self,
			UnitTypeId::CommandCenter
			| UnitTypeId::Hatchery
			| UnitTypeId::Lair
			| UnitTypeId::Hive
			| UnitTypeId::Nexus
		)
	}

	#[inline]
	pub fn is_refinery(self) -> bool {
		matches!(
			self,
			UnitTypeId::Refinery | UnitTypeId::Extractor | UnitTypeId::Assimilator
		)
	}

	#[inline]
	pub fn is_supply_provider(self) -> bool {
		matches!(self, UnitTypeId::SupplyDepot | UnitTypeId::Overlord | UnitTypeId::Pylon)
	}

	#[inline]
	pub fn is_mineral_field(self) -> bool {
		matches!(self, UnitTypeId::MineralField)
	}

	#[inline]
	pub fn is_geyser(self) -> bool {
		matches!(self, UnitTypeId::VespeneGeyser)
	}

	#[inline]
	pub fn is_resource(self) -> bool {
		self.is_mineral_field() || self.is_geyser()
	}

	#[inline]
	pub fn is_larva(self) -> bool {
		matches!(self, UnitTypeId::Larva)
	}

	#[inline]
	pub fn is_egg(self) -> bool {
		matches!(self, UnitTypeId::Egg | UnitTypeId::LurkerEgg)
	}

	#[rustfmt::skip::macros(matches)]
	#[inline]
	pub fn is_addon(self) -> bool {
		matches!(
			self,
			UnitTypeId::ComsatStation
			| UnitTypeId::MachineShop
			| UnitTypeId::PhysicsLab
			| UnitTypeId::CovertOps
			| UnitTypeId::ControlTower
			| UnitTypeId::NuclearSilo
		)
	}

	/// Buildings that accept a Terran addon two tiles to their right (§4.2).
	#[inline]
	pub fn can_host_addon(self) -> bool {
		matches!(
			self,
			UnitTypeId::CommandCenter | UnitTypeId::Factory | UnitTypeId::Starport | UnitTypeId::ScienceFacility
		)
	}

	#[rustfmt::skip::macros(matches)]
	#[inline]
	pub fn is_static_defense(self) -> bool {
		matches!(
			self,
			UnitTypeId::Bunker
			| UnitTypeId::MissileTurret
			| UnitTypeId::PhotonCannon
			| UnitTypeId::SunkenColony
			| UnitTypeId::SporeColony
		)
	}

	#[inline]
	pub fn is_ground_static_defense(self) -> bool {
		matches!(self, UnitTypeId::Bunker | UnitTypeId::PhotonCannon | UnitTypeId::SunkenColony)
	}

	#[inline]
	pub fn is_air_static_defense(self) -> bool {
		matches!(
			self,
			UnitTypeId::MissileTurret | UnitTypeId::PhotonCannon | UnitTypeId::SporeColony
		)
	}

	#[rustfmt::skip::macros(matches)]
	#[inline]
	pub fn is_detector(self) -> bool {
		matches!(
			self,
			UnitTypeId::Observer
			| UnitTypeId::ScienceVessel
			| UnitTypeId::MissileTurret
			| UnitTypeId::PhotonCannon
			| UnitTypeId::SporeColony
			| UnitTypeId::Overlord
		)
	}

	/// True for buildings produced by morphing an existing building rather
	/// than constructed fresh by a worker (zerg lair/hive chain, colonies, ...).
	#[inline]
	pub fn is_morphed_building(self) -> bool {
		matches!(
			self,
			UnitTypeId::Lair | UnitTypeId::Hive | UnitTypeId::GreaterSpire | UnitTypeId::SunkenColony | UnitTypeId::SporeColony
		)
	}

	#[rustfmt::skip::macros(matches)]
	#[inline]
	pub fn is_building(self) -> bool {
		use UnitTypeId::*;
		matches!(
			self,
			CommandCenter
			| SupplyDepot | Refinery | Barracks | EngineeringBay | Bunker | MissileTurret | Academy
			| Factory | Starport | Armory | ScienceFacility | ComsatStation | MachineShop | PhysicsLab
			| CovertOps | ControlTower | NuclearSilo | Hatchery | Lair | Hive | Extractor | SpawningPool
			| EvolutionChamber | HydraliskDen | CreepColony | SunkenColony | SporeColony | Spire
			| GreaterSpire | QueensNest | NydusCanal | UltraliskCavern | DefilerMound | Nexus | Pylon
			| Assimilator | Gateway | Forge | CyberneticsCore | PhotonCannon | RoboticsFacility | Stargate
			| FleetBeacon | TemplarArchives | DarkShrine | RoboticsSupportBay | Observatory | CitadelOfAdun
			| ArbiterTribunal | ShieldBattery
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn worker_predicate_covers_all_three_races() {
		assert!(UnitTypeId::Scv.is_worker());
		assert!(UnitTypeId::Drone.is_worker());
		assert!(UnitTypeId::Probe.is_worker());
		assert!(!UnitTypeId::Zealot.is_worker());
	}

	#[test]
	fn zerg_overlord_is_always_a_detector() {
		assert!(UnitTypeId::Overlord.is_detector());
	}

	#[test]
	fn addon_hosts_do_not_count_as_addons_themselves() {
		assert!(UnitTypeId::Factory.can_host_addon());
		assert!(!UnitTypeId::Factory.is_addon());
		assert!(UnitTypeId::MachineShop.is_addon());
	}
}
