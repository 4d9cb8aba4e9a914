//! `MacroAct`, the production deque, reorder-for-throughput, supply-block
//! detection, and the zerg extractor trick (§3 `ProductionItem`, §4.5
//! "ProductionQueue and ProductionScheduler"). Grounded in Steamhammer's
//! `MacroAct.h/cpp` and `BuildOrderQueue.cpp`.

use crate::{
	building_placer::MacroLocation,
	constants::{TECH_DATA, UNIT_TYPE_DATA, UPGRADE_DATA},
	ids::{CommandType, TechId, UnitTypeId, UpgradeId},
};
use std::collections::VecDeque;

/// A unified production item (§3, §6): a unit, a tech, an upgrade, or a
/// miscellaneous command.
#[derive(Debug, Clone, PartialEq)]
pub enum MacroAct {
	Unit(UnitTypeId),
	Tech(TechId),
	Upgrade(UpgradeId),
	Command(CommandType, Option<u32>),
}

impl MacroAct {
	pub fn mineral_cost(&self) -> u32 {
		match self {
			MacroAct::Unit(id) => UNIT_TYPE_DATA.get(id).map(|d| d.mineral_cost).unwrap_or(0),
			MacroAct::Tech(id) => TECH_DATA.get(id).map(|d| d.mineral_cost).unwrap_or(0),
			MacroAct::Upgrade(id) => UPGRADE_DATA.get(id).map(|d| d.mineral_cost).unwrap_or(0),
			MacroAct::Command(..) => 0,
		}
	}

	pub fn gas_cost(&self) -> u32 {
		match self {
			MacroAct::Unit(id) => UNIT_TYPE_DATA.get(id).map(|d| d.gas_cost).unwrap_or(0),
			MacroAct::Tech(id) => TECH_DATA.get(id).map(|d| d.gas_cost).unwrap_or(0),
			MacroAct::Upgrade(id) => UPGRADE_DATA.get(id).map(|d| d.gas_cost).unwrap_or(0),
			MacroAct::Command(..) => 0,
		}
	}

	/// Doubled supply requirement (§10.3); research never consumes supply.
	pub fn supply_cost(&self) -> u32 {
		match self {
			MacroAct::Unit(id) => UNIT_TYPE_DATA.get(id).map(|d| d.supply_cost).unwrap_or(0),
			_ => 0,
		}
	}

	pub fn producer(&self) -> Option<UnitTypeId> {
		match self {
			MacroAct::Unit(id) => UNIT_TYPE_DATA.get(id).map(|d| d.producer),
			MacroAct::Tech(id) => TECH_DATA.get(id).map(|d| d.producer),
			MacroAct::Upgrade(id) => UPGRADE_DATA.get(id).map(|d| d.producer),
			MacroAct::Command(..) => None,
		}
	}

	pub fn is_command(&self) -> bool {
		matches!(self, MacroAct::Command(..))
	}

	pub fn is_supply_provider(&self) -> bool {
		matches!(self, MacroAct::Unit(id) if id.is_supply_provider())
	}

	pub fn is_addon(&self) -> bool {
		matches!(self, MacroAct::Unit(id) if id.is_addon())
	}

	/// Whether the prerequisite building this item needs is known complete,
	/// given a predicate the caller supplies over `BuildingRegistry`/unit
	/// state.
	pub fn prerequisite_met(&self, has_completed: impl Fn(UnitTypeId) -> bool) -> bool {
		match self {
			MacroAct::Unit(id) => UNIT_TYPE_DATA.get(id).and_then(|d| d.prerequisite).map(&has_completed).unwrap_or(true),
			_ => true,
		}
	}
}

/// One entry in the queue: a `MacroAct` plus its gas-steal flag (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionItem {
	pub act: MacroAct,
	pub location: Option<MacroLocation>,
	pub is_gas_steal: bool,
}

impl ProductionItem {
	pub fn new(act: MacroAct) -> Self {
		Self { act, location: None, is_gas_steal: false }
	}
}

/// Priority deque where the back is highest priority (§3, §4.5 "Queue").
#[derive(Default)]
pub struct ProductionQueue {
	items: VecDeque<ProductionItem>,
	/// Latched when an operation mutates the queue mid-decision (§4.5
	/// "Queue"), so a scheduler mid-iteration knows to restart selection.
	pub modified: bool,
}

impl ProductionQueue {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Queue-highest: push to the back.
	pub fn push_back(&mut self, item: ProductionItem) {
		self.items.push_back(item);
		self.modified = true;
	}

	/// Queue-lowest: push to the front.
	pub fn push_front(&mut self, item: ProductionItem) {
		self.items.push_front(item);
		self.modified = true;
	}

	pub fn pop_back(&mut self) -> Option<ProductionItem> {
		let item = self.items.pop_back();
		if item.is_some() {
			self.modified = true;
		}
		item
	}

	pub fn peek_back(&self) -> Option<&ProductionItem> {
		self.items.back()
	}

	pub fn remove_matching(&mut self, pred: impl Fn(&ProductionItem) -> bool) -> usize {
		let before = self.items.len();
		self.items.retain(|item| !pred(item));
		let removed = before - self.items.len();
		if removed > 0 {
			self.modified = true;
		}
		removed
	}

	/// Moves the entry at `index` (front-relative) to the back.
	pub fn pull_to_top(&mut self, index: usize) {
		if let Some(item) = self.items.remove(index) {
			self.items.push_back(item);
			self.modified = true;
		}
	}

	pub fn clear(&mut self) {
		if !self.items.is_empty() {
			self.modified = true;
		}
		self.items.clear();
	}

	pub fn clear_modified_latch(&mut self) {
		self.modified = false;
	}

	pub fn front_prefix(&self, n: usize) -> impl Iterator<Item = (usize, &ProductionItem)> {
		self.items.iter().enumerate().take(n)
	}

	/// Reorder-for-throughput (§4.5), applied once per frame. Examines the
	/// item about to be dispatched (the back, §4.5 "ProductionScheduler
	/// dispatch") and, if it's stalled, returns the front-relative index of
	/// an earlier item to pull to the back instead. Requires at least 2
	/// items, no command at the back, and the back not being a supply
	/// provider.
	pub fn reorder_candidate(&self, free_minerals: u32, free_gas: u32, can_produce_now: impl Fn(&MacroAct) -> bool) -> Option<usize> {
		if self.items.len() < 2 {
			return None;
		}
		let next = self.items.back()?;
		if next.act.is_command() || next.act.is_supply_provider() {
			return None;
		}

		// Case 1: next is gas-starved but minerals are free.
		if next.act.gas_cost() > free_gas {
			for (i, item) in self.items.iter().enumerate().rev().skip(1).take(5) {
				if item.act.gas_cost() == 0
					&& item.act.mineral_cost() + next.act.mineral_cost() <= free_minerals
					&& item.act.supply_cost() <= next.act.supply_cost()
				{
					return Some(i);
				}
			}
		}

		// Case 2: next can't be produced now, but an earlier item combined with it fits.
		if !can_produce_now(&next.act) {
			for (i, item) in self.items.iter().enumerate().rev().skip(1).take(5) {
				let combined_minerals = item.act.mineral_cost() + next.act.mineral_cost();
				let combined_gas = item.act.gas_cost() + next.act.gas_cost();
				if combined_minerals <= free_minerals && combined_gas <= free_gas && can_produce_now(&item.act) {
					return Some(i);
				}
			}
		}

		None
	}
}

/// Supply-block detection (§4.5), checked once per second. `zerg_building`
/// is true while a hatchery is in progress or an overlord is morphing —
/// while true, supply is "building" and no block is declared.
pub fn supply_block_detected(available_supply: u32, next_item_supply_cost: u32, zerg_building: bool) -> bool {
	!zerg_building && next_item_supply_cost > available_supply
}

/// The zerg extractor-trick coroutine (§4.5 "Extractor trick"): a four-state
/// machine used to squeeze one extra unit out of larva at low supply totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorTrickState {
	None,
	Start,
	ExtractorOrdered,
	UnitOrdered,
}

impl Default for ExtractorTrickState {
	fn default() -> Self {
		ExtractorTrickState::None
	}
}

pub struct ExtractorTrick {
	pub state: ExtractorTrickState,
	pub extractor_tag: Option<u64>,
}

impl Default for ExtractorTrick {
	fn default() -> Self {
		Self { state: ExtractorTrickState::None, extractor_tag: None }
	}
}

impl ExtractorTrick {
	pub fn new() -> Self {
		Self::default()
	}

	/// Advances the coroutine by one frame. `minerals`/`has_free_drone` feed
	/// the Start transition; `supply_open` and `bypass` feed the later ones.
	pub fn tick(&mut self, minerals: u32, has_free_drone: bool, supply_open: bool, bypass: bool) {
		self.state = match self.state {
			ExtractorTrickState::None if minerals >= 100 && has_free_drone => ExtractorTrickState::Start,
			ExtractorTrickState::Start => ExtractorTrickState::ExtractorOrdered,
			ExtractorTrickState::ExtractorOrdered if supply_open || bypass => ExtractorTrickState::UnitOrdered,
			ExtractorTrickState::UnitOrdered => ExtractorTrickState::None,
			other => other,
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pop_back_is_highest_priority() {
		let mut queue = ProductionQueue::new();
		queue.push_back(ProductionItem::new(MacroAct::Unit(UnitTypeId::Marine)));
		queue.push_back(ProductionItem::new(MacroAct::Unit(UnitTypeId::Firebat)));
		let top = queue.pop_back().unwrap();
		assert_eq!(top.act, MacroAct::Unit(UnitTypeId::Firebat));
	}

	#[test]
	fn tech_and_upgrade_macro_acts_cost_like_research_not_units() {
		let stim = MacroAct::Tech(TechId::StimPacks);
		assert_eq!(stim.mineral_cost(), 100);
		assert_eq!(stim.gas_cost(), 100);
		assert_eq!(stim.supply_cost(), 0);
		assert_eq!(stim.producer(), Some(UnitTypeId::Academy));

		let boost = MacroAct::Upgrade(UpgradeId::MetabolicBoost);
		assert_eq!(boost.producer(), Some(UnitTypeId::SpawningPool));
	}

	#[test]
	fn supply_block_not_declared_while_zerg_is_building_supply() {
		assert!(!supply_block_detected(14, 16, true));
		assert!(supply_block_detected(14, 16, false));
	}

	#[test]
	fn reorder_pulls_gas_free_item_when_next_is_gas_starved() {
		// Vulture (gas 0) queued earlier; SiegeTank (gas-starved) is next to dispatch.
		let mut queue = ProductionQueue::new();
		queue.push_back(ProductionItem::new(MacroAct::Unit(UnitTypeId::Vulture)));
		queue.push_back(ProductionItem::new(MacroAct::Unit(UnitTypeId::SiegeTank)));
		let idx = queue.reorder_candidate(500, 0, |_| false);
		assert_eq!(idx, Some(0));
	}

	#[test]
	fn extractor_trick_progresses_through_states() {
		let mut trick = ExtractorTrick::new();
		trick.tick(100, true, false, false);
		assert_eq!(trick.state, ExtractorTrickState::Start);
		trick.tick(100, true, false, false);
		assert_eq!(trick.state, ExtractorTrickState::ExtractorOrdered);
		trick.tick(0, false, true, false);
		assert_eq!(trick.state, ExtractorTrickState::UnitOrdered);
		trick.tick(0, false, true, false);
		assert_eq!(trick.state, ExtractorTrickState::None);
	}
}
