//! Player/race identity, as reported by the game API bridge (§6 `Player handles`).

/// A player's race. `Random` only appears before the actual race is revealed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Race {
	Terran,
	Zerg,
	Protoss,
	Random,
}
impl Default for Race {
	fn default() -> Self {
		Race::Random
	}
}

/// Which side a player is on, from our point of view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Alliance {
	/// Our own units.
	Own,
	/// The opponent's units.
	Enemy,
	/// Neutral (resources, critters, destructible rocks).
	Neutral,
}
