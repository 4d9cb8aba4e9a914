//! The 4-state construction lifecycle (§3 `PlannedBuilding`, §4.3
//! "BuildingRegistry"). Grounded in Steamhammer's `BuildingManager.cpp`:
//! each entry advances Unassigned -> Assigned -> UnderConstruction ->
//! removed, driven by one `tick` per frame, with mineral/gas amounts
//! reserved on creation and released once construction physically starts.

use crate::{building_placer::MacroLocation, geometry::Point2, ids::UnitTypeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildingStatus {
	Unassigned,
	Assigned,
	UnderConstruction,
}

#[derive(Debug, Clone)]
pub struct PlannedBuilding {
	pub type_id: UnitTypeId,
	pub desired_tile: Option<Point2>,
	pub final_tile: Option<Point2>,
	pub worker: Option<u64>,
	pub building_tag: Option<u64>,
	pub location: MacroLocation,
	pub is_gas_steal: bool,
	pub status: BuildingStatus,
	pub mineral_cost: u32,
	pub gas_cost: u32,
	/// Set once the builder has been given the build command, so a
	/// transient obstruction can be distinguished from "never tried".
	pub command_given: bool,
}

impl PlannedBuilding {
	pub fn new(type_id: UnitTypeId, location: MacroLocation, mineral_cost: u32, gas_cost: u32) -> Self {
		Self {
			type_id,
			desired_tile: None,
			final_tile: None,
			worker: None,
			building_tag: None,
			location,
			is_gas_steal: false,
			status: BuildingStatus::Unassigned,
			mineral_cost,
			gas_cost,
			command_given: false,
		}
	}
}

#[derive(Default)]
pub struct BuildingRegistry {
	pub entries: Vec<PlannedBuilding>,
	reserved_minerals: u32,
	reserved_gas: u32,
}

impl BuildingRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn reserved_minerals(&self) -> u32 {
		self.reserved_minerals
	}

	pub fn reserved_gas(&self) -> u32 {
		self.reserved_gas
	}

	/// Adds a new request, reserving its resources immediately (§4.3
	/// "Resource reservation").
	pub fn request(&mut self, entry: PlannedBuilding) {
		self.reserved_minerals += entry.mineral_cost;
		self.reserved_gas += entry.gas_cost;
		self.entries.push(entry);
	}

	/// Unassigned -> Assigned (§4.3 step 1). `placement` and `builder` are
	/// supplied by the caller, which owns `BuildingPlacer`/`WorkerRegistry`.
	pub fn try_assign(&mut self, index: usize, tile: Point2, worker: u64) {
		if let Some(entry) = self.entries.get_mut(index) {
			if entry.status == BuildingStatus::Unassigned {
				entry.final_tile = Some(tile);
				entry.worker = Some(worker);
				entry.status = BuildingStatus::Assigned;
			}
		}
	}

	/// Assigned -> UnderConstruction, once the engine reports the building
	/// physically exists at the reserved tile (§4.3 step 2). Releases the
	/// reservation and, for terran/protoss, frees the worker back to
	/// `WorkerRegistry` (zerg's builder becomes the building, so the caller
	/// should not also release it there).
	pub fn begin_construction(&mut self, index: usize, building_tag: u64) -> Option<u64> {
		let entry = self.entries.get_mut(index)?;
		if entry.status != BuildingStatus::Assigned {
			return None;
		}
		self.reserved_minerals = self.reserved_minerals.saturating_sub(entry.mineral_cost);
		self.reserved_gas = self.reserved_gas.saturating_sub(entry.gas_cost);
		entry.building_tag = Some(building_tag);
		entry.status = BuildingStatus::UnderConstruction;
		entry.worker.take()
	}

	/// Drops an UnderConstruction entry whose building unit is gone, dead,
	/// or no longer a building (§4.3 "Validity checks").
	pub fn drop_invalid(&mut self, still_valid: impl Fn(u64) -> bool) {
		self.entries.retain(|e| e.status != BuildingStatus::UnderConstruction || e.building_tag.map(&still_valid).unwrap_or(false));
	}

	/// Removes a completed entry (§4.3 step 3), returning the worker tag if
	/// one is still held (terran only).
	pub fn complete(&mut self, index: usize) -> Option<PlannedBuilding> {
		if index >= self.entries.len() {
			return None;
		}
		Some(self.entries.remove(index))
	}

	/// Cancellation (§4.3 "Cancellation"): refunds and removes regardless of
	/// state, returning the worker to release (if any) and whether an
	/// in-game cancel command must still be issued (only when
	/// UnderConstruction).
	pub fn cancel(&mut self, index: usize) -> Option<(PlannedBuilding, bool)> {
		if index >= self.entries.len() {
			return None;
		}
		let entry = self.entries.remove(index);
		let needs_engine_cancel = entry.status == BuildingStatus::UnderConstruction;
		if entry.status != BuildingStatus::UnderConstruction {
			self.reserved_minerals = self.reserved_minerals.saturating_sub(entry.mineral_cost);
			self.reserved_gas = self.reserved_gas.saturating_sub(entry.gas_cost);
		}
		Some((entry, needs_engine_cancel))
	}

	pub fn available_minerals(&self, observed_minerals: u32) -> u32 {
		observed_minerals.saturating_sub(self.reserved_minerals)
	}

	pub fn available_gas(&self, observed_gas: u32) -> u32 {
		observed_gas.saturating_sub(self.reserved_gas)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_reserves_resources_immediately() {
		let mut registry = BuildingRegistry::new();
		registry.request(PlannedBuilding::new(UnitTypeId::SupplyDepot, MacroLocation::Main, 100, 0));
		assert_eq!(registry.reserved_minerals(), 100);
		assert_eq!(registry.available_minerals(150), 50);
	}

	#[test]
	fn begin_construction_releases_reservation_and_worker() {
		let mut registry = BuildingRegistry::new();
		registry.request(PlannedBuilding::new(UnitTypeId::Barracks, MacroLocation::Main, 150, 0));
		registry.try_assign(0, Point2::new(5.0, 5.0), 42);
		let released = registry.begin_construction(0, 999);
		assert_eq!(released, Some(42));
		assert_eq!(registry.reserved_minerals(), 0);
		assert_eq!(registry.entries[0].status, BuildingStatus::UnderConstruction);
	}

	#[test]
	fn cancel_unassigned_refunds_resources() {
		let mut registry = BuildingRegistry::new();
		registry.request(PlannedBuilding::new(UnitTypeId::SupplyDepot, MacroLocation::Main, 100, 0));
		let (_, needs_cancel) = registry.cancel(0).unwrap();
		assert!(!needs_cancel);
		assert_eq!(registry.reserved_minerals(), 0);
	}
}
