// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! TigerZone: the placement and region-merging rules engine for a two-player
//! tile-laying game.
//!
//! This crate provides:
//! - A fixed-size board with a frontier of legal placement spots
//! - Incremental region merging as tiles join
//! - Completion detection, scoring and token placement rules
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Self-play driver (simulate)     │
//! ├─────────────────────────────────────┤
//! │  Tokens / Completion & Scoring      │
//! ├─────────────────────────────────────┤
//! │  Board / Merge Engine / Regions     │
//! ├─────────────────────────────────────┤
//! │      Geometry / Tiles / Catalog     │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod game;
pub mod simulate;

pub use error::{
    ConfigError, EngineError, EngineFault, EngineResult, MoveError, SimulationError, TileError,
};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, BoardConfig, Edge, FinalScores, Location, Player, PlayerId, Region, RegionId,
    Rotation, Terrain, Tile, TurnSummary,
};
