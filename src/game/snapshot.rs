//! Serialisable read-only view of a board.

use serde::Serialize;

use crate::game::{Board, Location, Player, PlayerId, Region};

/// A placed tile as seen from outside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView {
    /// Where the tile sits.
    pub location: Location,
    /// Edge codes in position order plus the centre marker.
    pub code: String,
}

/// Owned copy of everything a renderer or driver may inspect.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSnapshot {
    /// Grid rows.
    pub rows: u16,
    /// Grid columns.
    pub cols: u16,
    /// Player to move.
    pub active_player: PlayerId,
    /// Confirmed turns.
    pub turns_played: u32,
    /// Whether end-of-game scoring has run.
    pub ended: bool,
    /// Frontier in location order.
    pub frontier: Vec<Location>,
    /// Placed tiles in storage order.
    pub tiles: Vec<TileView>,
    /// Both players.
    pub players: [Player; 2],
    /// Open regions in id order.
    pub open_regions: Vec<Region>,
    /// Completed regions in id order.
    pub completed_regions: Vec<Region>,
}

impl Board {
    /// Take a serialisable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.config.rows,
            cols: self.config.cols,
            active_player: self.active_player().id,
            turns_played: self.turns_played,
            ended: self.ended,
            frontier: self.frontier.iter().copied().collect(),
            tiles: self
                .tiles()
                .map(|t| TileView {
                    location: t.location,
                    code: t.tile.code(),
                })
                .collect(),
            players: self.players,
            open_regions: self.regions.iter_incomplete().cloned().collect(),
            completed_regions: self.regions.iter_completed().cloned().collect(),
        }
    }
}
