use num_derive::{FromPrimitive, ToPrimitive};

/// A leveled upgrade (§3 `MacroAct::Upgrade`).
#[derive(Debug, FromPrimitive, ToPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UpgradeId {
	// Terran
	TerranInfantryWeapons,
	TerranInfantryArmor,
	TerranVehicleWeapons,
	TerranVehiclePlating,
	TerranShipWeapons,
	TerranShipPlating,
	IonThrusters,
	CharonBooster,

	// Zerg
	ZergMeleeAttacks,
	ZergMissileAttacks,
	ZergCarapace,
	ZergFlyerAttacks,
	ZergFlyerCarapace,
	PneumatizedCarapace,
	VentralSacs,
	AntennaeOverlordSight,
	GroovedSpines,
	MuscularAugments,
	AdrenalGlands,
	MetabolicBoost,
	ChitinousPlating,

	// Protoss
	ProtossGroundWeapons,
	ProtossGroundArmor,
	ProtossShields,
	ProtossAirWeapons,
	ProtossAirArmor,
	SingularityCharge,
	LegEnhancements,
	ScarabDamage,
	ReaverCapacity,
	GraviticDrive,
	SensorArray,
	GraviticBoosters,
	KhaydarinAmulet,
	ArgusJewel,
	ArgusTalisman,
}
