//! Tiger and crocodile placement on the tile just laid, and turn
//! confirmation.

use tracing::debug;

use crate::error::{EngineFault, EngineResult, MoveError};
use crate::game::{Board, CENTER_SLOT, RegionId, Resident, SegmentId, Territory, TurnSummary};

impl Board {
    /// Segment of the pending placement addressed by a keypad slot.
    fn pending_segment(&self, slot: u8) -> EngineResult<SegmentId> {
        let at = self.turn.recent.ok_or(MoveError::NoTilePlacedYet)?;
        let placed = self.tile_at(at).ok_or(EngineFault::MissingTile(at))?;
        if slot == CENTER_SLOT && !placed.tile.is_den() {
            return Err(MoveError::InvalidDenSlot.into());
        }
        Ok(placed
            .segment_at_slot(slot)
            .ok_or(MoveError::InvalidSlot(slot))?)
    }

    /// Put one of the active player's tigers on the just-placed tile.
    ///
    /// `slot` is a keypad position: 1 2 3 along the north side, 4 and 6 on
    /// the west and east midpoints, 7 8 9 along the south side, 5 for the
    /// den. Outside the den, only the lowest slot through which the new tile
    /// exposes a region may be used to enter it.
    ///
    /// # Errors
    ///
    /// Returns the first failed rule, in order: game over, slot outside
    /// 1..=9, no pending placement, tiger already placed this turn, no
    /// tigers left, centre slot on a non-den tile, region not open, region
    /// already holding a tiger, slot not the region's tracked minimum.
    pub fn place_tiger(&mut self, slot: u8) -> EngineResult<RegionId> {
        if self.ended {
            return Err(MoveError::GameOver.into());
        }
        if !(1..=9).contains(&slot) {
            return Err(MoveError::InvalidSlot(slot).into());
        }
        if !self.turn.pending {
            return Err(MoveError::NoTilePlacedYet.into());
        }
        if self.turn.tiger_placed {
            return Err(MoveError::AlreadyPlacedThisTurn.into());
        }
        if !self.active_player().has_tigers() {
            return Err(MoveError::OutOfTokens.into());
        }

        let segment = self.pending_segment(slot)?;
        let region_id = self.region_id_of(segment)?;
        let region = self
            .regions
            .incomplete(region_id)
            .ok_or(MoveError::RegionNotFound(slot))?;
        if region.has_tiger() {
            return Err(MoveError::RegionOccupied(region_id).into());
        }
        if slot != CENTER_SLOT {
            let minimum = self.turn.minimums.get(region_id).unwrap_or(slot);
            if slot != minimum {
                return Err(MoveError::NotMinimumIndex { slot, minimum }.into());
            }
        }

        let owner = self.active_player().id;
        self.players[self.active].take_tiger();
        self.segment_mut(segment)?.tiger = Some(owner);
        self.regions
            .incomplete_mut(region_id)
            .ok_or(EngineFault::DanglingRegion {
                segment,
                region: region_id,
            })?
            .tigers
            .push(Resident { owner, segment });
        self.turn.tiger_placed = true;
        debug!(player = owner, slot, region = %region_id, "tiger placed");
        Ok(region_id)
    }

    /// Put one of the active player's crocodiles on the just-placed tile.
    ///
    /// The first lake or trail segment, in tile order, whose region has no
    /// crocodile receives it. Returns that region.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, nothing is pending, a crocodile was already
    /// placed this turn, the player has none left, or no segment qualifies.
    /// A failed call spends nothing.
    pub fn place_crocodile(&mut self) -> EngineResult<RegionId> {
        if self.ended {
            return Err(MoveError::GameOver.into());
        }
        if !self.turn.pending {
            return Err(MoveError::NoTilePlacedYet.into());
        }
        if self.turn.crocodile_placed {
            return Err(MoveError::AlreadyPlacedThisTurn.into());
        }
        if !self.active_player().has_crocodiles() {
            return Err(MoveError::OutOfTokens.into());
        }

        let at = self.turn.recent.ok_or(MoveError::NoTilePlacedYet)?;
        let placed = self.tile_at(at).ok_or(EngineFault::MissingTile(at))?;
        let mut target = None;
        for &segment in &placed.segments {
            let seg = self
                .segment(segment)
                .ok_or(EngineFault::MissingSegment(segment))?;
            if !matches!(seg.territory, Territory::Lake | Territory::Trail) {
                continue;
            }
            match self.regions.incomplete(seg.region) {
                Some(region) if !region.has_crocodile() => {
                    target = Some((segment, seg.region));
                    break;
                }
                _ => {}
            }
        }
        let (segment, region_id) = target.ok_or(MoveError::NoCrocodileTarget)?;

        let owner = self.active_player().id;
        self.players[self.active].take_crocodile();
        self.segment_mut(segment)?.crocodile = Some(owner);
        let region = self
            .regions
            .incomplete_mut(region_id)
            .ok_or(EngineFault::DanglingRegion {
                segment,
                region: region_id,
            })?;
        region.crocodiles.push(Resident { owner, segment });
        region.potential = region.base_potential();
        self.turn.crocodile_placed = true;
        debug!(player = owner, region = %region_id, "crocodile placed");
        Ok(region_id)
    }

    /// Finish the turn: refresh adjacency, score completed regions, clear the
    /// per-turn state and hand the move to the other player.
    ///
    /// # Errors
    ///
    /// Fails with [`MoveError::NoTilePlacedYet`] if nothing is pending, or
    /// with an [`EngineFault`] if the sweep finds corrupted bookkeeping.
    pub fn confirm(&mut self) -> EngineResult<TurnSummary> {
        if self.ended {
            return Err(MoveError::GameOver.into());
        }
        if !self.turn.pending {
            return Err(MoveError::NoTilePlacedYet.into());
        }
        let placed = self.turn.recent.ok_or(MoveError::NoTilePlacedYet)?;

        self.refresh_adjacency(placed)?;
        self.refresh_potentials();
        let scored = self.score_completed()?;
        self.refresh_potentials();

        let player = self.active_player().id;
        self.turn.reset();
        self.active = 1 - self.active;
        self.turns_played += 1;
        debug!(
            player,
            location = %placed,
            scored = scored.len(),
            turn = self.turns_played,
            "turn confirmed"
        );
        Ok(TurnSummary {
            player,
            placed,
            scored,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{EngineError, MoveError};
    use crate::game::{
        Board, BoardConfig, Center, Edge, Location, Rotation, Segment, Terrain, Tile, catalog,
    };

    fn board() -> Board {
        Board::new(BoardConfig::default()).unwrap()
    }

    fn illegal(result: Result<impl std::fmt::Debug, EngineError>) -> MoveError {
        result.unwrap_err().as_illegal().unwrap()
    }

    fn all_jungle() -> Tile {
        Tile::new(vec![Segment::new(Terrain::Jungle, &Edge::ALL)], Center::Plain).unwrap()
    }

    #[test]
    fn test_tiger_requires_pending_tile() {
        let mut board = board();
        board.start(all_jungle()).unwrap();
        assert_eq!(illegal(board.place_tiger(1)), MoveError::NoTilePlacedYet);
        assert_eq!(illegal(board.place_tiger(0)), MoveError::InvalidSlot(0));
        assert_eq!(illegal(board.place_tiger(10)), MoveError::InvalidSlot(10));
        assert_eq!(illegal(board.confirm()), MoveError::NoTilePlacedYet);
    }

    #[test]
    fn test_one_tiger_per_turn() {
        let mut board = board();
        board.start(all_jungle()).unwrap();
        board.place(all_jungle(), Location::new(1, 0)).unwrap();
        board.place_tiger(1).unwrap();
        assert_eq!(
            illegal(board.place_tiger(1)),
            MoveError::AlreadyPlacedThisTurn
        );
        assert_eq!(board.active_player().tigers, 6);
    }

    #[test]
    fn test_tiger_on_occupied_region_rejected() {
        let mut board = board();
        board.start(all_jungle()).unwrap();
        board.place(all_jungle(), Location::new(1, 0)).unwrap();
        let region = board.place_tiger(1).unwrap();
        board.confirm().unwrap();

        board.place(all_jungle(), Location::new(2, 0)).unwrap();
        assert_eq!(
            illegal(board.place_tiger(1)),
            MoveError::RegionOccupied(region)
        );
        // The other player still has the full pool.
        assert_eq!(board.active_player().tigers, 7);
    }

    #[test]
    fn test_den_slot_requires_den_tile() {
        let mut board = board();
        board.start(all_jungle()).unwrap();
        board.place(all_jungle(), Location::new(1, 0)).unwrap();
        assert_eq!(illegal(board.place_tiger(5)), MoveError::InvalidDenSlot);

        let mut board = self::board();
        board.start(all_jungle()).unwrap();
        board
            .place(catalog::tile("den").unwrap(), Location::new(1, 0))
            .unwrap();
        let den = board.place_tiger(5).unwrap();
        assert_eq!(board.dens(), &[den]);
    }

    #[test]
    fn test_minimum_slot_rule() {
        let mut board = board();
        board.start(catalog::tile("trail-straight").unwrap()).unwrap();
        // trail-curve turned so the trail runs north to east (slots 2 and 6).
        let tile = catalog::tile("trail-curve").unwrap().rotated(Rotation::R180);
        assert_eq!(tile.terrain(Edge::North), Terrain::Trail);
        assert_eq!(tile.terrain(Edge::East), Terrain::Trail);
        board.place(tile, Location::new(0, -1)).unwrap();

        assert_eq!(
            illegal(board.place_tiger(6)),
            MoveError::NotMinimumIndex {
                slot: 6,
                minimum: 2
            }
        );
        let trail = board.place_tiger(2).unwrap();
        let start = board.tile_at(Location::new(0, 0)).unwrap();
        assert_eq!(
            board.segment(start.segment_at(Edge::North)).unwrap().region,
            trail
        );
    }

    #[test]
    fn test_out_of_tigers() {
        let config = BoardConfig {
            tigers_per_player: 0,
            ..BoardConfig::default()
        };
        let mut board = Board::new(config).unwrap();
        board.start(all_jungle()).unwrap();
        board.place(all_jungle(), Location::new(1, 0)).unwrap();
        assert_eq!(illegal(board.place_tiger(1)), MoveError::OutOfTokens);
    }

    #[test]
    fn test_crocodile_needs_lake_or_trail() {
        let mut board = board();
        board.start(all_jungle()).unwrap();
        board.place(all_jungle(), Location::new(1, 0)).unwrap();
        assert_eq!(
            illegal(board.place_crocodile()),
            MoveError::NoCrocodileTarget
        );
        assert_eq!(board.active_player().crocodiles, 2);
    }

    #[test]
    fn test_confirm_switches_player_and_clears_turn() {
        let mut board = board();
        board.start(all_jungle()).unwrap();
        board.place(all_jungle(), Location::new(1, 0)).unwrap();
        board.place_tiger(1).unwrap();
        let summary = board.confirm().unwrap();
        assert_eq!(summary.player, 1);
        assert_eq!(summary.placed, Location::new(1, 0));
        assert_eq!(board.active_player().id, 2);
        assert!(!board.is_pending());
        assert_eq!(board.turns_played(), 1);
        assert!(board.candidates().is_empty());
    }
}
