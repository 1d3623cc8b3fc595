//! The board: grid storage, the placement frontier and the validator.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, EngineFault, EngineResult, MoveError};
use crate::game::{
    CENTER_SLOT, Direction, Edge, Location, MinIndexTracker, Player, PlayerId, Prey, Region,
    RegionId, RegionTable, Rotation, SegmentId, TerrainSegment, Territory, Tile,
};

/// Board dimensions, start position and token pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Grid rows.
    pub rows: u16,
    /// Grid columns.
    pub cols: u16,
    /// Logical location of the start tile, mapped to the centre cell.
    pub start: Location,
    /// Tigers each player starts with.
    pub tigers_per_player: u8,
    /// Crocodiles each player starts with.
    pub crocodiles_per_player: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 11,
            cols: 11,
            start: Location::new(0, 0),
            tigers_per_player: 7,
            crocodiles_per_player: 2,
        }
    }
}

impl BoardConfig {
    /// Check the configuration describes a usable grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] if either dimension is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or describes an
    /// empty grid.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// A tile committed to the board.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedTile {
    /// The tile in its placed orientation.
    pub tile: Tile,
    /// Where it sits.
    pub location: Location,
    /// Arena ids, parallel to `tile.segments()`.
    pub segments: Vec<SegmentId>,
    /// Centre den segment, if the tile has a den.
    pub den: Option<SegmentId>,
}

impl PlacedTile {
    /// Segment covering `edge`.
    #[must_use]
    pub fn segment_at(&self, edge: Edge) -> SegmentId {
        self.segments[self.tile.segment_index(edge)]
    }

    /// Segment addressed by a keypad slot (the den for the centre slot).
    #[must_use]
    pub fn segment_at_slot(&self, slot: u8) -> Option<SegmentId> {
        if slot == CENTER_SLOT {
            return self.den;
        }
        Edge::from_slot(slot).map(|edge| self.segment_at(edge))
    }

    /// Every segment on the tile, den last.
    pub fn all_segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.segments.iter().copied().chain(self.den)
    }
}

/// A legal spot and orientation for a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Candidate {
    /// Frontier location.
    pub location: Location,
    /// Orientation that matches every neighbour.
    pub rotation: Rotation,
}

/// Transient state of the turn in progress.
#[derive(Debug, Clone, Default)]
pub(crate) struct TurnState {
    /// A tile has been placed and awaits confirmation.
    pub(crate) pending: bool,
    /// Location of the most recent placement.
    pub(crate) recent: Option<Location>,
    /// A tiger was placed this turn.
    pub(crate) tiger_placed: bool,
    /// A crocodile was placed this turn.
    pub(crate) crocodile_placed: bool,
    /// Candidates computed by the last `can_place`.
    pub(crate) candidates: Vec<Candidate>,
    /// Lowest exposed slot per region on the placed tile.
    pub(crate) minimums: MinIndexTracker,
}

impl TurnState {
    /// Forget everything except the most recent placement.
    pub(crate) fn reset(&mut self) {
        self.pending = false;
        self.tiger_placed = false;
        self.crocodile_placed = false;
        self.candidates.clear();
        self.minimums.clear();
    }
}

/// The game board.
///
/// Owns every tile, terrain segment and region. `Clone` is a deep copy, so
/// a cloned board can be explored speculatively without touching the
/// original.
#[derive(Debug, Clone)]
pub struct Board {
    /// Dimensions and pools.
    pub(crate) config: BoardConfig,
    /// Row-major cells.
    pub(crate) cells: Vec<Option<PlacedTile>>,
    /// Empty in-grid locations next to at least one tile.
    pub(crate) frontier: BTreeSet<Location>,
    /// Segment arena, indexed by `SegmentId`.
    pub(crate) segments: Vec<TerrainSegment>,
    /// All regions.
    pub(crate) regions: RegionTable,
    /// Den regions, in placement order.
    pub(crate) dens: Vec<RegionId>,
    /// Both players.
    pub(crate) players: [Player; 2],
    /// Index into `players` of the player to move.
    pub(crate) active: usize,
    /// Turn in progress.
    pub(crate) turn: TurnState,
    /// Confirmed turns.
    pub(crate) turns_played: u32,
    /// End-of-game scoring has run.
    pub(crate) ended: bool,
}

impl Board {
    /// Create an empty board. The frontier holds only the start location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyGrid`] if either dimension is zero.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = usize::from(config.rows) * usize::from(config.cols);
        let players = [
            Player::new(1, config.tigers_per_player, config.crocodiles_per_player),
            Player::new(2, config.tigers_per_player, config.crocodiles_per_player),
        ];
        Ok(Self {
            config,
            cells: vec![None; size],
            frontier: BTreeSet::from([config.start]),
            segments: Vec::new(),
            regions: RegionTable::new(),
            dens: Vec::new(),
            players,
            active: 0,
            turn: TurnState::default(),
            turns_played: 0,
            ended: false,
        })
    }

    /// Board configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Storage index of a logical location.
    fn cell_index(&self, location: Location) -> Option<usize> {
        let rows = i64::from(self.config.rows);
        let cols = i64::from(self.config.cols);
        let col = i64::from(location.x) - i64::from(self.config.start.x) + cols / 2;
        let row = rows / 2 - (i64::from(location.y) - i64::from(self.config.start.y));
        if (0..rows).contains(&row) && (0..cols).contains(&col) {
            usize::try_from(row * cols + col).ok()
        } else {
            None
        }
    }

    /// Whether the location is on the grid.
    #[must_use]
    pub fn in_bounds(&self, location: Location) -> bool {
        self.cell_index(location).is_some()
    }

    /// The tile at a location.
    #[must_use]
    pub fn tile_at(&self, location: Location) -> Option<&PlacedTile> {
        self.cell_index(location)
            .and_then(|idx| self.cells[idx].as_ref())
    }

    /// Whether a tile sits at the location.
    #[must_use]
    pub fn is_occupied(&self, location: Location) -> bool {
        self.tile_at(location).is_some()
    }

    /// Every placed tile, in row-major storage order.
    pub fn tiles(&self) -> impl Iterator<Item = &PlacedTile> {
        self.cells.iter().flatten()
    }

    /// Number of placed tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Locations eligible for the next placement.
    #[must_use]
    pub const fn frontier(&self) -> &BTreeSet<Location> {
        &self.frontier
    }

    /// A terrain segment by id.
    #[must_use]
    pub fn segment(&self, id: SegmentId) -> Option<&TerrainSegment> {
        self.segments.get(id.index())
    }

    /// Every terrain segment, in creation order.
    #[must_use]
    pub fn segments(&self) -> &[TerrainSegment] {
        &self.segments
    }

    /// The region table.
    #[must_use]
    pub const fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// A region in either partition.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Region id currently carried by a segment.
    pub(crate) fn region_id_of(&self, segment: SegmentId) -> Result<RegionId, EngineFault> {
        self.segment(segment)
            .map(|s| s.region)
            .ok_or(EngineFault::MissingSegment(segment))
    }

    /// Mutable segment by id.
    pub(crate) fn segment_mut(&mut self, id: SegmentId) -> Result<&mut TerrainSegment, EngineFault> {
        self.segments
            .get_mut(id.index())
            .ok_or(EngineFault::MissingSegment(id))
    }

    /// The region a segment belongs to.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineFault`] if the segment does not exist or its region
    /// id resolves nowhere.
    pub fn region_of(&self, segment: SegmentId) -> Result<&Region, EngineFault> {
        let region = self.region_id_of(segment)?;
        self.regions
            .get(region)
            .ok_or(EngineFault::DanglingRegion { segment, region })
    }

    /// Den regions in placement order.
    #[must_use]
    pub fn dens(&self) -> &[RegionId] {
        &self.dens
    }

    /// Both players.
    #[must_use]
    pub const fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// A player by id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable player by id.
    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The player to move.
    #[must_use]
    pub const fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    /// Whether a placement is awaiting confirmation.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.turn.pending
    }

    /// The most recently placed tile.
    #[must_use]
    pub fn recent_placement(&self) -> Option<&PlacedTile> {
        self.turn.recent.and_then(|at| self.tile_at(at))
    }

    /// Candidates stored by the last [`Board::can_place`] call this turn.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.turn.candidates
    }

    /// Lowest exposed slot tracked for a region during this turn.
    #[must_use]
    pub fn tracked_minimum(&self, region: RegionId) -> Option<u8> {
        self.turn.minimums.get(region)
    }

    /// Confirmed turns so far.
    #[must_use]
    pub const fn turns_played(&self) -> u32 {
        self.turns_played
    }

    /// Whether end-of-game scoring has run.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.ended
    }

    /// Check whether `tile` may be placed at `location`. Pure read.
    ///
    /// # Errors
    ///
    /// Returns the first failed rule, in order: game over, pending move,
    /// out of bounds, occupied, not in the frontier, edge mismatch.
    pub fn is_legal(&self, tile: &Tile, location: Location) -> Result<(), MoveError> {
        if self.ended {
            return Err(MoveError::GameOver);
        }
        if self.turn.pending {
            return Err(MoveError::PendingMoveInProgress);
        }
        if !self.in_bounds(location) {
            return Err(MoveError::OutOfBounds(location));
        }
        if self.is_occupied(location) {
            return Err(MoveError::Occupied(location));
        }
        if !self.frontier.contains(&location) {
            return Err(MoveError::NotInFrontier(location));
        }
        self.edges_match(tile, location)
    }

    /// Strict midpoint terrain equality against every placed neighbour.
    fn edges_match(&self, tile: &Tile, location: Location) -> Result<(), MoveError> {
        for (direction, neighbor_at) in location.orthogonal() {
            let Some(neighbor) = self.tile_at(neighbor_at) else {
                continue;
            };
            let ours = tile.terrain(direction.midpoint());
            let theirs = neighbor.tile.terrain(direction.opposite().midpoint());
            if ours != theirs {
                return Err(MoveError::EdgeMismatch {
                    neighbor: neighbor_at,
                });
            }
        }
        Ok(())
    }

    /// Every frontier location and rotation at which `tile` matches its
    /// neighbours.
    #[must_use]
    pub fn placements_for(&self, tile: &Tile) -> Vec<Candidate> {
        let rotations = Rotation::ALL.map(|r| (r, tile.rotated(r)));
        let mut candidates = Vec::new();
        for &location in &self.frontier {
            for (rotation, rotated) in &rotations {
                if self.edges_match(rotated, location).is_ok() {
                    candidates.push(Candidate {
                        location,
                        rotation: *rotation,
                    });
                }
            }
        }
        candidates
    }

    /// Whether `tile` fits anywhere; stores the candidates for
    /// [`Board::candidates`].
    pub fn can_place(&mut self, tile: &Tile) -> bool {
        self.turn.candidates = self.placements_for(tile);
        !self.turn.candidates.is_empty()
    }

    /// Place the opening tile at the configured start location.
    ///
    /// Does not open a turn: no confirmation follows and the active player
    /// does not change.
    ///
    /// # Errors
    ///
    /// Fails if the start location is no longer legal (a tile was already
    /// placed there) or on an engine fault.
    pub fn start(&mut self, tile: Tile) -> EngineResult<()> {
        let at = self.config.start;
        self.is_legal(&tile, at)?;
        self.commit(tile, at)?;
        self.refresh_adjacency(at)?;
        self.turn.reset();
        Ok(())
    }

    /// Validate and commit a placement; the turn stays pending until
    /// [`Board::confirm`].
    ///
    /// # Errors
    ///
    /// Fails with a [`MoveError`] if the placement is illegal, or with an
    /// [`EngineFault`] if the merge finds corrupted bookkeeping.
    pub fn place(&mut self, tile: Tile, location: Location) -> EngineResult<()> {
        self.is_legal(&tile, location)?;
        self.commit(tile, location)?;
        self.turn.pending = true;
        Ok(())
    }

    /// Spawn segments and regions, merge with neighbours, update the
    /// frontier and record the placement.
    fn commit(&mut self, tile: Tile, at: Location) -> Result<(), EngineFault> {
        let idx = self.cell_index(at).ok_or(EngineFault::MissingTile(at))?;

        let mut ids = Vec::with_capacity(tile.segments().len());
        let habitat = tile.prey_segment();
        for (i, segment) in tile.segments().iter().enumerate() {
            let id = self.spawn(
                Territory::from(segment.terrain),
                at,
                segment.edges.clone(),
                segment.zone_min(),
                tile.prey().filter(|_| habitat == Some(i)),
            );
            ids.push(id);
        }
        let den = if tile.is_den() {
            let id = self.spawn(Territory::Den, at, Vec::new(), CENTER_SLOT, None);
            self.dens.push(RegionId::from(id));
            Some(id)
        } else {
            None
        };

        debug!(location = %at, tile = %tile.code(), segments = ids.len(), "placing tile");
        self.cells[idx] = Some(PlacedTile {
            tile,
            location: at,
            segments: ids,
            den,
        });

        for direction in [
            Direction::West,
            Direction::East,
            Direction::North,
            Direction::South,
        ] {
            if self.is_occupied(at.step(direction)) {
                self.merge_across(at, direction)?;
            }
        }

        self.frontier.remove(&at);
        for (_, neighbor) in at.orthogonal() {
            if self.in_bounds(neighbor) && !self.is_occupied(neighbor) {
                self.frontier.insert(neighbor);
            }
        }

        self.turn.recent = Some(at);
        Ok(())
    }

    /// Create a segment and the region it seeds.
    fn spawn(
        &mut self,
        territory: Territory,
        location: Location,
        edges: Vec<Edge>,
        zone_min: u8,
        prey: Option<Prey>,
    ) -> SegmentId {
        let id = SegmentId(u32::try_from(self.segments.len()).unwrap_or(u32::MAX));
        let segment = TerrainSegment {
            id,
            territory,
            location,
            edges,
            region: RegionId::from(id),
            zone_min,
            tiger: None,
            crocodile: None,
            prey,
        };
        self.regions.insert(Region::new(&segment));
        if territory != Territory::Den {
            self.turn.minimums.record(segment.region, zone_min);
        }
        self.segments.push(segment);
        id
    }
}
