use num_derive::{FromPrimitive, ToPrimitive};

/// A one-time researched technology (§3 `MacroAct::Tech`), or the
/// activated ability it unlocks.
#[derive(Debug, FromPrimitive, ToPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TechId {
	// Terran
	StimPacks,
	SiegeMode,
	CloakingField,
	PersonnelCloaking,
	SpiderMines,
	TankSiegeMode,
	YamatoGun,
	OpticalFlare,
	Irradiate,
	EmpShockwave,
	Lockdown,
	Restoration,

	// Zerg
	Burrowing,
	LurkerAspect,
	SpawnBroodlings,
	Plague,
	DarkSwarm,
	Consume,
	EnsnareTech,

	// Protoss
	PsionicStorm,
	Hallucination,
	MindControl,
	StasisField,
	Recall,
	DisruptionWeb,
}
