//! Den and lake adjacency upkeep, completion detection and scoring.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{EngineFault, EngineResult, MoveError};
use crate::game::{
    Board, Direction, Edge, Location, Player, PlayerId, Region, RegionId, RegionKind, Territory,
};

/// A region that was credited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredRegion {
    /// The region.
    pub region: RegionId,
    /// Its kind.
    pub territory: Territory,
    /// Points credited to each owner.
    pub points: u32,
    /// Credited players; empty if no tiger was resident.
    pub owners: Vec<PlayerId>,
}

/// Outcome of a confirmed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnSummary {
    /// Player whose turn was confirmed.
    pub player: PlayerId,
    /// Location of the tile placed this turn.
    pub placed: Location,
    /// Regions that completed and scored this turn, in id order.
    pub scored: Vec<ScoredRegion>,
}

/// Outcome of the terminal scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalScores {
    /// Open regions credited at their current potential, in id order.
    pub scored: Vec<ScoredRegion>,
    /// Final player state.
    pub players: [Player; 2],
}

impl FinalScores {
    /// The single highest scorer, or `None` on a tie.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        let [a, b] = &self.players;
        match a.score.cmp(&b.score) {
            std::cmp::Ordering::Greater => Some(a.id),
            std::cmp::Ordering::Less => Some(b.id),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Board {
    /// Refresh jungle adjacency after a placement at `recent`.
    ///
    /// Every den re-scans its Moore neighbourhood and registers itself with
    /// each jungle found there. Lakes and jungles sharing the new tile are
    /// linked.
    pub(crate) fn refresh_adjacency(&mut self, recent: Location) -> Result<(), EngineFault> {
        let mut den_links: Vec<(RegionId, RegionId)> = Vec::new();
        for &den in &self.dens {
            let Some(RegionKind::Den { location, .. }) = self.regions.get(den).map(|r| &r.kind)
            else {
                continue;
            };
            let location = *location;
            let mut moore = vec![location];
            moore.extend(
                location
                    .moore()
                    .into_iter()
                    .filter(|at| self.is_occupied(*at)),
            );
            for at in &moore {
                for jungle in self.regions_on(*at, Territory::Jungle)? {
                    den_links.push((jungle, den));
                }
            }
            if let Some(region) = self.regions.incomplete_mut(den) {
                if let RegionKind::Den { moore: cached, .. } = &mut region.kind {
                    *cached = moore;
                }
                region.potential = region.base_potential();
            }
        }

        let jungles = self.regions_on(recent, Territory::Jungle)?;
        let lakes = self.regions_on(recent, Territory::Lake)?;

        for region in self.regions.iter_incomplete_mut() {
            let id = region.id;
            if let RegionKind::Jungle { dens, lakes: linked } = &mut region.kind {
                dens.extend(
                    den_links
                        .iter()
                        .filter(|(jungle, _)| *jungle == id)
                        .map(|(_, den)| *den),
                );
                if jungles.contains(&id) {
                    linked.extend(lakes.iter().copied());
                }
            }
        }
        Ok(())
    }

    /// Distinct regions of one kind touching the tile at `at`.
    fn regions_on(
        &self,
        at: Location,
        territory: Territory,
    ) -> Result<BTreeSet<RegionId>, EngineFault> {
        let mut found = BTreeSet::new();
        let Some(placed) = self.tile_at(at) else {
            return Ok(found);
        };
        for id in placed.all_segments() {
            let segment = self.segment(id).ok_or(EngineFault::MissingSegment(id))?;
            if segment.territory == territory {
                found.insert(segment.region);
            }
        }
        Ok(found)
    }

    /// Whether a region's boundary is fully closed.
    ///
    /// Dens need all eight surrounding cells filled, so a den on the board
    /// edge never completes. For other kinds every sub-edge of every member
    /// must face the board edge or a segment of the same region; an empty
    /// cell or a foreign region across any side leaves it open.
    pub(crate) fn is_structurally_complete(&self, region: &Region) -> Result<bool, EngineFault> {
        if let RegionKind::Den { location, .. } = &region.kind {
            return Ok(location.moore().iter().all(|at| self.is_occupied(*at)));
        }
        for &member in &region.members {
            let segment = self
                .segment(member)
                .ok_or(EngineFault::MissingSegment(member))?;
            for &edge in &segment.edges {
                for &side in edge.sides() {
                    if !self.closed_across(segment.location, edge, side, region.id)? {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }

    /// Whether `edge` of the tile at `at`, seen across `side`, is sealed off
    /// the grid or by the same region.
    fn closed_across(
        &self,
        at: Location,
        edge: Edge,
        side: Direction,
        region: RegionId,
    ) -> Result<bool, EngineFault> {
        let across = at.step(side);
        if !self.in_bounds(across) {
            return Ok(true);
        }
        let Some(neighbor) = self.tile_at(across) else {
            return Ok(false);
        };
        let ours = side.side();
        let theirs = side.opposite().side();
        let Some(position) = ours.iter().position(|e| *e == edge) else {
            return Ok(false);
        };
        let facing = neighbor.segment_at(theirs[position]);
        Ok(self.region_id_of(facing)? == region)
    }

    /// Jungle potential from the completion state of its neighbours.
    fn jungle_value(&self, region: &Region) -> u32 {
        let RegionKind::Jungle { dens, lakes } = &region.kind else {
            return region.potential;
        };
        let count = |ids: &BTreeSet<RegionId>| {
            let n = ids
                .iter()
                .filter(|id| self.regions.is_completed(**id))
                .count();
            u32::try_from(n).unwrap_or(u32::MAX)
        };
        Region::jungle_potential(count(lakes), count(dens))
    }

    /// Recompute the cached potential of every open region.
    pub(crate) fn refresh_potentials(&mut self) {
        let jungle_values: Vec<(RegionId, u32)> = self
            .regions
            .iter_incomplete()
            .filter(|r| r.territory() == Territory::Jungle)
            .map(|r| (r.id, self.jungle_value(r)))
            .collect();
        for region in self.regions.iter_incomplete_mut() {
            region.potential = region.base_potential();
        }
        for (id, value) in jungle_values {
            if let Some(region) = self.regions.incomplete_mut(id) {
                region.potential = value;
            }
        }
    }

    /// Move every newly complete region to the completed partition, then
    /// score each one exactly once.
    pub(crate) fn score_completed(&mut self) -> Result<Vec<ScoredRegion>, EngineFault> {
        let mut newly = Vec::new();
        for region in self.regions.iter_incomplete() {
            if !region.scored && self.is_structurally_complete(region)? {
                newly.push(region.id);
            }
        }

        let mut archived = Vec::with_capacity(newly.len());
        for id in &newly {
            if let Some(mut region) = self.regions.take_incomplete(*id) {
                region.completed = true;
                region.potential = region.base_potential();
                archived.push(region);
            }
        }
        for region in &archived {
            self.regions.archive(region.clone());
        }

        let mut scored = Vec::with_capacity(archived.len());
        for mut region in archived {
            if region.territory() == Territory::Jungle {
                region.potential = self.jungle_value(&region);
            }
            let entry = self.credit(&mut region)?;
            region.scored = true;
            debug!(
                region = %region.id,
                kind = ?region.territory(),
                points = entry.points,
                owners = ?entry.owners,
                "region completed"
            );
            self.regions.archive(region);
            scored.push(entry);
        }
        Ok(scored)
    }

    /// Credit a region's potential to its owners and return its tokens.
    fn credit(&mut self, region: &mut Region) -> Result<ScoredRegion, EngineFault> {
        let owners = region.owners();
        for &owner in &owners {
            if let Some(player) = self.player_mut(owner) {
                player.add_score(region.potential);
            }
        }
        self.release_tokens(region)?;
        Ok(ScoredRegion {
            region: region.id,
            territory: region.territory(),
            points: region.potential,
            owners,
        })
    }

    /// Return every resident tiger and crocodile to its owner.
    fn release_tokens(&mut self, region: &mut Region) -> Result<(), EngineFault> {
        for tiger in std::mem::take(&mut region.tigers) {
            self.segment_mut(tiger.segment)?.tiger = None;
            if let Some(player) = self.player_mut(tiger.owner) {
                player.return_tiger();
            }
        }
        for crocodile in std::mem::take(&mut region.crocodiles) {
            self.segment_mut(crocodile.segment)?.crocodile = None;
            if let Some(player) = self.player_mut(crocodile.owner) {
                player.return_crocodile();
            }
        }
        Ok(())
    }

    /// Terminal scoring pass.
    ///
    /// Every open region, dens included, is credited at its current
    /// potential under the usual ownership rule. Completed regions were
    /// already scored and are skipped. Open regions stay in the incomplete
    /// partition, unmarked, and the board is closed afterwards.
    ///
    /// # Errors
    ///
    /// Fails with [`MoveError::GameOver`] if called twice, or
    /// [`MoveError::PendingMoveInProgress`] while a placement awaits
    /// confirmation.
    pub fn end(&mut self) -> EngineResult<FinalScores> {
        if self.ended {
            return Err(MoveError::GameOver.into());
        }
        if self.turn.pending {
            return Err(MoveError::PendingMoveInProgress.into());
        }
        self.refresh_potentials();

        let mut scored = Vec::new();
        for id in self.regions.incomplete_ids() {
            let Some(mut region) = self.regions.take_incomplete(id) else {
                continue;
            };
            let entry = self.credit(&mut region)?;
            self.regions.insert(region);
            scored.push(entry);
        }

        self.ended = true;
        self.turn.reset();
        debug!(
            p1 = self.players[0].score,
            p2 = self.players[1].score,
            "game ended"
        );
        Ok(FinalScores {
            scored,
            players: self.players,
        })
    }
}
