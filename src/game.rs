//! Game layer for TigerZone.
//!
//! Implements the placement rules:
//! - Geometry of tile edges, rotations and the keypad slot layout
//! - Tiles and the catalogue of standard shapes
//! - Terrain segments, regions and the region table
//! - The board with its frontier, validator and merge engine
//! - Completion, scoring and token placement

mod board;
pub mod catalog;
mod geometry;
mod invariants;
mod merge;
mod player;
mod region;
mod scoring;
mod snapshot;
mod table;
mod tile;
mod tokens;

pub use board::{Board, BoardConfig, Candidate, PlacedTile};
pub use geometry::{CENTER_SLOT, Direction, Edge, Location, Rotation};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use player::{Player, PlayerId};
pub use region::{
    JUNGLE_DEN_POINTS, JUNGLE_LAKE_POINTS, Region, RegionId, RegionKind, Resident, SegmentId,
    TerrainSegment, Territory,
};
pub use scoring::{FinalScores, ScoredRegion, TurnSummary};
pub use snapshot::{BoardSnapshot, TileView};
pub use table::{MinIndexTracker, RegionTable};
pub use tile::{Center, Prey, Segment, Terrain, Tile};
