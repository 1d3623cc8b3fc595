//! Region merging across tile boundaries.
//!
//! The region on the neighbour's side survives; the region on the new
//! tile's side is absorbed and its id retired.

use tracing::{debug, trace};

use crate::error::EngineFault;
use crate::game::{Board, Direction, Location, RegionId, RegionKind, SegmentId, Terrain};

impl Board {
    /// Fuse the regions the tile at `at` shares with its neighbour across
    /// `direction`.
    ///
    /// The midpoint pair always merges. When the midpoint is a trail the two
    /// shoulder pairs merge too, joining the jungle on either side of the road.
    pub(crate) fn merge_across(
        &mut self,
        at: Location,
        direction: Direction,
    ) -> Result<(), EngineFault> {
        let neighbor_at = at.step(direction);
        let ours = direction.side();
        let theirs = direction.opposite().side();

        let (pairs, shoulders) = {
            let placed = self.tile_at(at).ok_or(EngineFault::MissingTile(at))?;
            let neighbor = self
                .tile_at(neighbor_at)
                .ok_or(EngineFault::MissingTile(neighbor_at))?;
            let pairs: [(SegmentId, SegmentId); 3] = std::array::from_fn(|i| {
                (placed.segment_at(ours[i]), neighbor.segment_at(theirs[i]))
            });
            let shoulders = placed.tile.terrain(direction.midpoint()) == Terrain::Trail;
            (pairs, shoulders)
        };

        let (mid_child, mid_survivor) = pairs[1];
        self.merge_pair(mid_child, mid_survivor)?;
        if shoulders {
            for (child, survivor) in [pairs[0], pairs[2]] {
                self.merge_pair(child, survivor)?;
            }
        }
        Ok(())
    }

    /// Merge the region of `child_segment` into the region of
    /// `survivor_segment` if they differ and may be joined.
    fn merge_pair(
        &mut self,
        child_segment: SegmentId,
        survivor_segment: SegmentId,
    ) -> Result<(), EngineFault> {
        let child = self.region_id_of(child_segment)?;
        let survivor = self.region_id_of(survivor_segment)?;
        if child == survivor {
            trace!(region = %survivor, "already merged");
            return Ok(());
        }

        let survivor_kind = self
            .regions
            .get(survivor)
            .ok_or(EngineFault::DanglingRegion {
                segment: survivor_segment,
                region: survivor,
            })?
            .territory();
        let child_kind = self
            .regions
            .get(child)
            .ok_or(EngineFault::DanglingRegion {
                segment: child_segment,
                region: child,
            })?
            .territory();

        if survivor_kind != child_kind {
            trace!(%survivor, %child, "terrain differs, not merging");
            return Ok(());
        }
        if self.regions.is_completed(survivor) || self.regions.is_completed(child) {
            trace!(%survivor, %child, "completed regions never merge");
            return Ok(());
        }
        self.absorb(survivor, child, child_segment)
    }

    /// Move every member, token and adjacency entry of `child` into
    /// `survivor` and retire `child`.
    fn absorb(
        &mut self,
        survivor: RegionId,
        child: RegionId,
        child_segment: SegmentId,
    ) -> Result<(), EngineFault> {
        let absorbed = self
            .regions
            .take_incomplete(child)
            .ok_or(EngineFault::DanglingRegion {
                segment: child_segment,
                region: child,
            })?;

        for &member in &absorbed.members {
            let segment = self
                .segments
                .get_mut(member.index())
                .ok_or(EngineFault::MissingSegment(member))?;
            segment.region = survivor;
        }
        self.turn.minimums.merge(survivor, child);

        if matches!(absorbed.kind, RegionKind::Lake) {
            for region in self.regions.iter_incomplete_mut() {
                if let RegionKind::Jungle { lakes, .. } = &mut region.kind {
                    if lakes.remove(&child) {
                        lakes.insert(survivor);
                    }
                }
            }
        }

        let members = absorbed.members.len();
        let target = self
            .regions
            .incomplete_mut(survivor)
            .ok_or(EngineFault::DanglingRegion {
                segment: child_segment,
                region: survivor,
            })?;
        target.absorb(absorbed);
        debug!(
            %survivor,
            %child,
            moved = members,
            size = target.members.len(),
            "merged regions"
        );
        Ok(())
    }
}
