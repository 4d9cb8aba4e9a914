use num_derive::{FromPrimitive, ToPrimitive};

/// The miscellaneous-command branch of a `MacroAct` (§3, §4.5): bot-level
/// directives that aren't a unit, a tech or an upgrade. Grounded in
/// Steamhammer's `MacroCommandType` enumeration.
#[derive(Debug, FromPrimitive, ToPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommandType {
	StartGas,
	StopGas,
	StealGas,
	Scout,
	PullWorkers,
	ReleaseWorkers,
	Aggressive,
	Defensive,
}
