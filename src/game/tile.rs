//! Tile definitions: edge terrain, segments and the centre marker.

use serde::{Deserialize, Serialize};

use crate::error::TileError;
use crate::game::{Edge, Rotation};

/// Terrain carried by a tile edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Open water.
    Lake,
    /// Game trail.
    Trail,
    /// Jungle (the field analogue).
    Jungle,
}

impl Terrain {
    /// Single-letter code used in text output.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Terrain::Lake => 'L',
            Terrain::Trail => 'T',
            Terrain::Jungle => 'J',
        }
    }
}

/// Centre marker of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Center {
    /// Nothing special.
    #[default]
    Plain,
    /// A den, which forms its own single-tile region.
    Den,
}

/// Game animal printed on a tile, living in its first lake or trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prey {
    /// Wild boar.
    Boar,
    /// Water buffalo.
    Buffalo,
    /// Deer.
    Deer,
}

impl Prey {
    /// Every kind of prey.
    pub const ALL: [Prey; 3] = [Prey::Boar, Prey::Buffalo, Prey::Deer];

    /// Single-letter code used in text output.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Prey::Boar => 'b',
            Prey::Buffalo => 'u',
            Prey::Deer => 'd',
        }
    }
}

/// A contiguous piece of one terrain spanning one or more edges of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Terrain of every edge in the segment.
    pub terrain: Terrain,
    /// Edges covered, sorted by index.
    pub edges: Vec<Edge>,
}

impl Segment {
    /// Create a segment over the given edges.
    #[must_use]
    pub fn new(terrain: Terrain, edges: &[Edge]) -> Self {
        let mut edges = edges.to_vec();
        edges.sort_unstable();
        edges.dedup();
        Self { terrain, edges }
    }

    /// Lowest keypad slot among this segment's edges.
    #[must_use]
    pub fn zone_min(&self) -> u8 {
        self.edges.iter().map(|e| e.slot()).min().unwrap_or(u8::MAX)
    }
}

/// A tile with a concrete orientation.
///
/// Topology is fixed at construction: every edge belongs to exactly one
/// segment. Rotation produces a new tile rather than re-deriving edges later.
/// Deserialized tiles go through the same checks as [`Tile::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TileDef")]
pub struct Tile {
    /// Segments in definition order.
    segments: Vec<Segment>,
    /// Segment index for each edge position.
    #[serde(skip_serializing)]
    segment_of: [u8; 8],
    /// Centre marker.
    center: Center,
    /// Prey living in the first lake or trail segment.
    #[serde(skip_serializing_if = "Option::is_none")]
    prey: Option<Prey>,
}

/// Wire form of a [`Tile`], validated on the way in.
#[derive(Deserialize)]
struct TileDef {
    segments: Vec<Segment>,
    center: Center,
    #[serde(default)]
    prey: Option<Prey>,
}

impl TryFrom<TileDef> for Tile {
    type Error = TileError;

    fn try_from(def: TileDef) -> Result<Self, TileError> {
        let segments = def
            .segments
            .iter()
            .map(|s| Segment::new(s.terrain, &s.edges))
            .collect();
        let tile = Tile::new(segments, def.center)?;
        match def.prey {
            Some(prey) => tile.with_prey(prey),
            None => Ok(tile),
        }
    }
}

impl Tile {
    /// Build a tile from its segments.
    ///
    /// # Errors
    ///
    /// Returns a [`TileError`] if a segment is empty or the segments do not
    /// cover each of the eight edges exactly once.
    pub fn new(segments: Vec<Segment>, center: Center) -> Result<Self, TileError> {
        let mut segment_of: [Option<u8>; 8] = [None; 8];

        for (i, segment) in (0u8..).zip(segments.iter()) {
            if segment.edges.is_empty() {
                return Err(TileError::EmptySegment(usize::from(i)));
            }
            for edge in &segment.edges {
                let slot = &mut segment_of[edge.index()];
                if slot.is_some() {
                    return Err(TileError::DuplicateEdge(*edge));
                }
                *slot = Some(i);
            }
        }

        let mut resolved = [0u8; 8];
        for (edge, slot) in Edge::ALL.iter().zip(segment_of) {
            resolved[edge.index()] = slot.ok_or(TileError::UncoveredEdge(*edge))?;
        }

        Ok(Self {
            segments,
            segment_of: resolved,
            center,
            prey: None,
        })
    }

    /// This tile with `prey` living in its first lake or trail segment.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::NoPreyHabitat`] if the tile has only jungle.
    pub fn with_prey(mut self, prey: Prey) -> Result<Self, TileError> {
        if self.habitat().is_none() {
            return Err(TileError::NoPreyHabitat);
        }
        self.prey = Some(prey);
        Ok(self)
    }

    /// Prey printed on this tile.
    #[must_use]
    pub const fn prey(&self) -> Option<Prey> {
        self.prey
    }

    /// Index of the segment the prey lives in, if there is any prey.
    #[must_use]
    pub fn prey_segment(&self) -> Option<usize> {
        self.prey.and(self.habitat())
    }

    fn habitat(&self) -> Option<usize> {
        self.segments
            .iter()
            .position(|s| matches!(s.terrain, Terrain::Lake | Terrain::Trail))
    }

    /// Segments in definition order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Index into [`Tile::segments`] of the segment covering `edge`.
    #[must_use]
    pub const fn segment_index(&self, edge: Edge) -> usize {
        self.segment_of[edge.index()] as usize
    }

    /// Terrain at `edge`.
    #[must_use]
    pub fn terrain(&self, edge: Edge) -> Terrain {
        self.segments[self.segment_index(edge)].terrain
    }

    /// Terrain of all eight edges in index order.
    #[must_use]
    pub fn edge_terrains(&self) -> [Terrain; 8] {
        Edge::ALL.map(|e| self.terrain(e))
    }

    /// Centre marker.
    #[must_use]
    pub const fn center(&self) -> Center {
        self.center
    }

    /// Whether the centre is a den.
    #[must_use]
    pub const fn is_den(&self) -> bool {
        matches!(self.center, Center::Den)
    }

    /// This tile turned clockwise by `rotation`.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let segments: Vec<Segment> = self
            .segments
            .iter()
            .map(|s| {
                let edges: Vec<Edge> = s.edges.iter().map(|e| e.rotated(rotation)).collect();
                Segment::new(s.terrain, &edges)
            })
            .collect();

        let mut segment_of = [0u8; 8];
        for edge in Edge::ALL {
            segment_of[edge.rotated(rotation).index()] = self.segment_of[edge.index()];
        }

        Self {
            segments,
            segment_of,
            center: self.center,
            prey: self.prey,
        }
    }

    /// Compact description: eight edge codes, the centre, then any prey.
    #[must_use]
    pub fn code(&self) -> String {
        let mut code: String = self.edge_terrains().iter().map(|t| t.code()).collect();
        code.push(if self.is_den() { 'X' } else { '-' });
        code.extend(self.prey.map(Prey::code));
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Edge::{East, North, NorthEast, NorthWest, South, SouthEast, SouthWest, West};

    fn straight_trail() -> Tile {
        Tile::new(
            vec![
                Segment::new(Terrain::Trail, &[North, South]),
                Segment::new(Terrain::Jungle, &[NorthWest, West, SouthWest]),
                Segment::new(Terrain::Jungle, &[NorthEast, East, SouthEast]),
            ],
            Center::Plain,
        )
        .unwrap()
    }

    #[test]
    fn test_tile_lookup() {
        let tile = straight_trail();
        assert_eq!(tile.terrain(North), Terrain::Trail);
        assert_eq!(tile.terrain(South), Terrain::Trail);
        assert_eq!(tile.terrain(West), Terrain::Jungle);
        assert_eq!(tile.segment_index(North), tile.segment_index(South));
        assert_ne!(tile.segment_index(West), tile.segment_index(East));
        assert!(!tile.is_den());
    }

    #[test]
    fn test_zone_min_uses_keypad_order() {
        let tile = straight_trail();
        // North is slot 2, south is slot 8.
        assert_eq!(tile.segments()[0].zone_min(), 2);
        // North-west corner is slot 1.
        assert_eq!(tile.segments()[1].zone_min(), 1);
        // North-east corner is slot 3.
        assert_eq!(tile.segments()[2].zone_min(), 3);
    }

    #[test]
    fn test_rejects_uncovered_edge() {
        let result = Tile::new(
            vec![Segment::new(Terrain::Jungle, &[North, East, South, West])],
            Center::Plain,
        );
        assert_eq!(result, Err(TileError::UncoveredEdge(NorthWest)));
    }

    #[test]
    fn test_rejects_duplicate_edge() {
        let result = Tile::new(
            vec![
                Segment::new(Terrain::Jungle, &Edge::ALL),
                Segment::new(Terrain::Lake, &[North]),
            ],
            Center::Plain,
        );
        assert_eq!(result, Err(TileError::DuplicateEdge(North)));
    }

    #[test]
    fn test_rejects_empty_segment() {
        let result = Tile::new(vec![Segment::new(Terrain::Lake, &[])], Center::Den);
        assert_eq!(result, Err(TileError::EmptySegment(0)));
    }

    #[test]
    fn test_rotation_turns_trail_east_west() {
        let tile = straight_trail().rotated(Rotation::R90);
        assert_eq!(tile.terrain(East), Terrain::Trail);
        assert_eq!(tile.terrain(West), Terrain::Trail);
        assert_eq!(tile.terrain(North), Terrain::Jungle);
        assert_eq!(tile.segment_index(East), tile.segment_index(West));
        assert_eq!(tile.segments()[0].edges, vec![East, West]);
        assert_eq!(straight_trail().rotated(Rotation::R0), straight_trail());
    }

    #[test]
    fn test_code() {
        assert_eq!(straight_trail().code(), "JTJJJTJJ-");
        let stocked = straight_trail().with_prey(Prey::Deer).unwrap();
        assert_eq!(stocked.code(), "JTJJJTJJ-d");
    }

    #[test]
    fn test_prey_lives_in_first_lake_or_trail() {
        let tile = straight_trail().with_prey(Prey::Boar).unwrap();
        assert_eq!(tile.prey(), Some(Prey::Boar));
        assert_eq!(tile.prey_segment(), Some(0));
        assert_eq!(straight_trail().prey_segment(), None);

        let turned = tile.rotated(Rotation::R270);
        assert_eq!(turned.prey(), Some(Prey::Boar));
        assert_eq!(turned.prey_segment(), Some(0));
    }

    #[test]
    fn test_rejects_prey_without_habitat() {
        let jungle =
            Tile::new(vec![Segment::new(Terrain::Jungle, &Edge::ALL)], Center::Den).unwrap();
        assert_eq!(jungle.with_prey(Prey::Deer), Err(TileError::NoPreyHabitat));
    }

    #[test]
    fn test_deserialize_round_trips_valid_tile() {
        let tile = straight_trail().with_prey(Prey::Buffalo).unwrap();
        let json = serde_json::to_string(&tile).unwrap();
        assert!(!json.contains("segment_of"));
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);
    }

    #[test]
    fn test_deserialize_rejects_malformed_tiles() {
        // A single segment that leaves most edges uncovered.
        let uncovered = r#"{"segments":[{"terrain":"Jungle","edges":["North"]}],"center":"Plain"}"#;
        let err = serde_json::from_str::<Tile>(uncovered).unwrap_err();
        assert!(err.to_string().contains("not covered"), "{err}");

        // An edge table pointing past the segment list is ignored and rebuilt.
        let forged = r#"{"segments":[{"terrain":"Jungle","edges":["NorthWest","North","NorthEast","East","SouthEast","South","SouthWest","West"]}],"center":"Plain","segment_of":[7,7,7,7,7,7,7,7]}"#;
        let tile: Tile = serde_json::from_str(forged).unwrap();
        assert_eq!(tile.segment_index(North), 0);
        assert_eq!(tile.terrain(West), Terrain::Jungle);

        // Prey needs a lake or trail to live in.
        let barren = r#"{"segments":[{"terrain":"Jungle","edges":["NorthWest","North","NorthEast","East","SouthEast","South","SouthWest","West"]}],"center":"Den","prey":"Deer"}"#;
        assert!(serde_json::from_str::<Tile>(barren).is_err());
    }
}
