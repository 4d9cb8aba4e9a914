//! Raw unit commands issued each frame through the game API bridge (§6).

use crate::{
	geometry::Point2,
	ids::{TechId, UnitTypeId, UpgradeId},
};

/// Target of a command — a position for movement/building, a unit tag for
/// targeted orders, or none for orders that need no target (train, morph,
/// research).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Target {
	Pos(Point2),
	Tag(u64),
	None,
}

/// A single unit command, mirroring §6's "Game API (produced, write each
/// frame)" list. Issued against a unit tag through [`GameClient`](crate::api::GameClient).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	Move(Point2),
	AttackMove(Point2),
	AttackUnit(u64),
	RightClick(Target),
	Gather(u64),
	ReturnCargo,
	Build { type_id: UnitTypeId, tile: Point2 },
	/// `make(type)` for units morphed from larva, with no placement tile.
	Make(UnitTypeId),
	CancelConstruction,
	Lift,
	Land(Point2),
	Burrow,
	Unburrow,
	Repair(u64),
	Research(TechId),
	Upgrade(UpgradeId),
	UseTech { tech: TechId, target: Target },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn target_variants_are_distinct() {
		assert_ne!(Target::None, Target::Tag(1));
		assert_ne!(Target::Pos(Point2::new(0.0, 0.0)), Target::None);
	}
}
