//! Error types for the placement engine.
//!
//! Legality failures ([`MoveError`]) are locally recoverable: the caller
//! retries with another target. Structural corruption ([`EngineFault`]) means
//! a merge left the region bookkeeping inconsistent and is never the caller's
//! fault.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::{Edge, Location, RegionId, SegmentId};

/// A rejected placement or token move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The game has already been ended.
    #[error("the game is over")]
    GameOver,
    /// A placement is awaiting confirmation.
    #[error("a placement is still pending confirmation")]
    PendingMoveInProgress,
    /// The location is outside the grid.
    #[error("location {0} is outside the board")]
    OutOfBounds(Location),
    /// A tile already sits at the location.
    #[error("location {0} is already filled")]
    Occupied(Location),
    /// The location is not adjacent to any placed tile.
    #[error("location {0} is not in the frontier")]
    NotInFrontier(Location),
    /// A neighbour's facing edge has a different terrain.
    #[error("tile does not match its neighbour at {neighbor}")]
    EdgeMismatch {
        /// The neighbour whose facing edge disagrees.
        neighbor: Location,
    },
    /// No tile has been placed this turn.
    #[error("no tile has been placed this turn")]
    NoTilePlacedYet,
    /// A token of this kind was already placed this turn.
    #[error("a token of this kind was already placed this turn")]
    AlreadyPlacedThisTurn,
    /// The active player has no tokens of this kind left.
    #[error("the active player has no tokens of this kind left")]
    OutOfTokens,
    /// Slot index outside 1..=9.
    #[error("slot {0} is not between 1 and 9")]
    InvalidSlot(u8),
    /// The slot does not resolve to an open region.
    #[error("no open region at slot {0}")]
    RegionNotFound(u8),
    /// The region already hosts a tiger.
    #[error("region {0} already has a tiger")]
    RegionOccupied(RegionId),
    /// The slot is not the lowest exposed entry point of its region.
    #[error("slot {slot} is not the minimum slot {minimum} for its region")]
    NotMinimumIndex {
        /// Requested slot.
        slot: u8,
        /// Lowest slot exposing the same region.
        minimum: u8,
    },
    /// The centre slot was chosen on a tile without a den.
    #[error("the placed tile has no den")]
    InvalidDenSlot,
    /// No lake or trail on the placed tile can take a crocodile.
    #[error("no lake or trail on the placed tile can take a crocodile")]
    NoCrocodileTarget,
}

/// Internal inconsistency in the region bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineFault {
    /// A terrain segment points at a region missing from both partitions.
    #[error("segment {segment} points at missing region {region}")]
    DanglingRegion {
        /// The orphaned segment.
        segment: SegmentId,
        /// The region id it carries.
        region: RegionId,
    },
    /// A segment id outside the arena.
    #[error("segment {0} does not exist")]
    MissingSegment(SegmentId),
    /// A location expected to hold a tile is empty.
    #[error("no tile at {0}")]
    MissingTile(Location),
}

/// Any failure returned by a board operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The move was illegal; retry with a different target.
    #[error(transparent)]
    Illegal(#[from] MoveError),
    /// The engine state is corrupted.
    #[error("engine fault: {0}")]
    Fault(#[from] EngineFault),
}

impl EngineError {
    /// Whether this is a corruption fault rather than a legality failure.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        matches!(self, EngineError::Fault(_))
    }

    /// The legality failure, if this is one.
    #[must_use]
    pub const fn as_illegal(&self) -> Option<MoveError> {
        match self {
            EngineError::Illegal(e) => Some(*e),
            EngineError::Fault(_) => None,
        }
    }
}

/// Malformed tile definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TileError {
    /// A segment lists no edges.
    #[error("segment {0} has no edges")]
    EmptySegment(usize),
    /// An edge belongs to no segment.
    #[error("edge {0:?} is not covered by any segment")]
    UncoveredEdge(Edge),
    /// An edge belongs to more than one segment.
    #[error("edge {0:?} is covered by more than one segment")]
    DuplicateEdge(Edge),
    /// Prey was put on a tile with no lake or trail.
    #[error("tile has no lake or trail for prey to live in")]
    NoPreyHabitat,
}

/// Failure loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid configuration JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// The grid has no cells.
    #[error("board must have at least one row and one column")]
    EmptyGrid,
}

/// Failure running a simulated game.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The board configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The engine rejected a move the driver believed legal, or faulted.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// A simulation setting is out of range.
    #[error("{name} must be between 0 and 1, got {value}")]
    Rate {
        /// Setting name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Result type for board operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_classification() {
        let illegal: EngineError = MoveError::OutOfTokens.into();
        assert!(!illegal.is_fault());
        assert_eq!(illegal.as_illegal(), Some(MoveError::OutOfTokens));

        let fault: EngineError = EngineFault::MissingTile(Location::new(1, 2)).into();
        assert!(fault.is_fault());
        assert_eq!(fault.as_illegal(), None);
    }

    #[test]
    fn test_reason_strings() {
        let err = MoveError::NotMinimumIndex {
            slot: 6,
            minimum: 2,
        };
        assert_eq!(
            err.to_string(),
            "slot 6 is not the minimum slot 2 for its region"
        );
        assert!(
            MoveError::OutOfBounds(Location::new(9, 9))
                .to_string()
                .contains("(9, 9)")
        );
    }
}
