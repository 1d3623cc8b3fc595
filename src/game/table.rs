//! Region storage split into incomplete and completed partitions, plus the
//! per-turn minimum-slot tracking used by tiger placement.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::game::{Region, RegionId};

/// Every region on the board, keyed by id.
///
/// Incomplete regions are mutable and may merge. Completed regions are
/// frozen: an id that enters `completed` never returns to `incomplete`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegionTable {
    /// Regions that can still grow and merge.
    incomplete: BTreeMap<RegionId, Region>,
    /// Regions that have completed and been scored.
    completed: BTreeMap<RegionId, Region>,
}

impl RegionTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a freshly spawned region.
    pub(crate) fn insert(&mut self, region: Region) {
        debug_assert!(!self.completed.contains_key(&region.id));
        self.incomplete.insert(region.id, region);
    }

    /// Look up a region in either partition.
    #[must_use]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.incomplete.get(&id).or_else(|| self.completed.get(&id))
    }

    /// Look up an incomplete region.
    #[must_use]
    pub fn incomplete(&self, id: RegionId) -> Option<&Region> {
        self.incomplete.get(&id)
    }

    /// Mutable access to an incomplete region.
    pub(crate) fn incomplete_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.incomplete.get_mut(&id)
    }

    /// Look up a completed region.
    #[must_use]
    pub fn completed(&self, id: RegionId) -> Option<&Region> {
        self.completed.get(&id)
    }

    /// Whether the id is in the completed partition.
    #[must_use]
    pub fn is_completed(&self, id: RegionId) -> bool {
        self.completed.contains_key(&id)
    }

    /// Remove an incomplete region, typically to absorb it elsewhere.
    pub(crate) fn take_incomplete(&mut self, id: RegionId) -> Option<Region> {
        self.incomplete.remove(&id)
    }

    /// Move a region into the completed partition.
    pub(crate) fn archive(&mut self, region: Region) {
        self.completed.insert(region.id, region);
    }

    /// Iterate incomplete regions in id order.
    pub fn iter_incomplete(&self) -> impl Iterator<Item = &Region> {
        self.incomplete.values()
    }

    /// Iterate incomplete regions mutably in id order.
    pub(crate) fn iter_incomplete_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.incomplete.values_mut()
    }

    /// Iterate completed regions in id order.
    pub fn iter_completed(&self) -> impl Iterator<Item = &Region> {
        self.completed.values()
    }

    /// Ids of incomplete regions, in order.
    #[must_use]
    pub fn incomplete_ids(&self) -> Vec<RegionId> {
        self.incomplete.keys().copied().collect()
    }

    /// Number of incomplete regions.
    #[must_use]
    pub fn incomplete_len(&self) -> usize {
        self.incomplete.len()
    }

    /// Number of completed regions.
    #[must_use]
    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }
}

/// Lowest exposed keypad slot per region, for the tile placed this turn.
///
/// Filled when a tile is placed, carried along by merges, cleared when the
/// turn is confirmed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MinIndexTracker {
    /// Tracked minimum per region.
    minimums: BTreeMap<RegionId, u8>,
}

impl MinIndexTracker {
    /// Record `slot` as an entry point of `region`, keeping the lower value.
    pub fn record(&mut self, region: RegionId, slot: u8) {
        self.minimums
            .entry(region)
            .and_modify(|m| *m = (*m).min(slot))
            .or_insert(slot);
    }

    /// Hand the child's minimum to the survivor of a merge.
    pub fn merge(&mut self, survivor: RegionId, child: RegionId) {
        if let Some(slot) = self.minimums.remove(&child) {
            self.record(survivor, slot);
        }
    }

    /// Tracked minimum for a region.
    #[must_use]
    pub fn get(&self, region: RegionId) -> Option<u8> {
        self.minimums.get(&region).copied()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.minimums.clear();
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.minimums.is_empty()
    }
}
