//! Grid geometry: logical locations, compass directions and tile sub-edges.

use serde::{Deserialize, Serialize};

/// A logical board location.
///
/// Coordinates are independent of storage indexing: north is `y + 1`,
/// east is `x + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// X coordinate (grows eastward).
    pub x: i32,
    /// Y coordinate (grows northward).
    pub y: i32,
}

impl Location {
    /// Create a new location.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The location one step away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours, in `Direction::ALL` order.
    #[must_use]
    pub fn orthogonal(self) -> [(Direction, Location); 4] {
        Direction::ALL.map(|d| (d, self.step(d)))
    }

    /// The eight surrounding locations (Moore neighbourhood, centre excluded).
    #[must_use]
    pub const fn moore(self) -> [Location; 8] {
        let Self { x, y } = self;
        [
            Self::new(x - 1, y + 1),
            Self::new(x, y + 1),
            Self::new(x + 1, y + 1),
            Self::new(x + 1, y),
            Self::new(x + 1, y - 1),
            Self::new(x, y - 1),
            Self::new(x - 1, y - 1),
            Self::new(x - 1, y),
        ]
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards `y + 1`.
    North,
    /// Towards `x + 1`.
    East,
    /// Towards `y - 1`.
    South,
    /// Towards `x - 1`.
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Logical `(dx, dy)` offset.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The midpoint sub-edge on this side of a tile.
    #[must_use]
    pub const fn midpoint(self) -> Edge {
        self.side()[1]
    }

    /// The `(shoulder, midpoint, shoulder)` sub-edges of this side.
    ///
    /// North and south sides run west to east, east and west sides run
    /// north to south, so a side and the opposite side of the neighbouring
    /// tile pair up position by position.
    #[must_use]
    pub const fn side(self) -> [Edge; 3] {
        match self {
            Direction::North => [Edge::NorthWest, Edge::North, Edge::NorthEast],
            Direction::East => [Edge::NorthEast, Edge::East, Edge::SouthEast],
            Direction::South => [Edge::SouthWest, Edge::South, Edge::SouthEast],
            Direction::West => [Edge::NorthWest, Edge::West, Edge::SouthWest],
        }
    }
}

/// One of the eight perimeter positions of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Edge {
    /// Corner shared by the north and west sides.
    NorthWest = 0,
    /// North midpoint.
    North = 1,
    /// Corner shared by the north and east sides.
    NorthEast = 2,
    /// East midpoint.
    East = 3,
    /// Corner shared by the south and east sides.
    SouthEast = 4,
    /// South midpoint.
    South = 5,
    /// Corner shared by the south and west sides.
    SouthWest = 6,
    /// West midpoint.
    West = 7,
}

/// Keypad slot for each edge index (slot 5 is the tile centre).
const SLOT_OF_EDGE: [u8; 8] = [1, 2, 3, 6, 9, 8, 7, 4];

/// Edge index for each keypad slot, `None` for the centre.
const EDGE_OF_SLOT: [Option<u8>; 9] = [
    Some(0),
    Some(1),
    Some(2),
    Some(7),
    None,
    Some(3),
    Some(6),
    Some(5),
    Some(4),
];

/// The keypad slot addressing the tile centre.
pub const CENTER_SLOT: u8 = 5;

impl Edge {
    /// All positions in index order.
    pub const ALL: [Edge; 8] = [
        Edge::NorthWest,
        Edge::North,
        Edge::NorthEast,
        Edge::East,
        Edge::SouthEast,
        Edge::South,
        Edge::SouthWest,
        Edge::West,
    ];

    /// Position index, 0..8.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Position for an index, wrapping modulo 8.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    /// Whether this is a side midpoint rather than a corner.
    #[must_use]
    pub const fn is_midpoint(self) -> bool {
        (self as u8) % 2 == 1
    }

    /// The sides of the tile this position lies on (one for midpoints,
    /// two for corners).
    #[must_use]
    pub fn sides(self) -> &'static [Direction] {
        match self {
            Edge::NorthWest => &[Direction::North, Direction::West],
            Edge::North => &[Direction::North],
            Edge::NorthEast => &[Direction::North, Direction::East],
            Edge::East => &[Direction::East],
            Edge::SouthEast => &[Direction::South, Direction::East],
            Edge::South => &[Direction::South],
            Edge::SouthWest => &[Direction::South, Direction::West],
            Edge::West => &[Direction::West],
        }
    }

    /// Keypad slot (1-9, laid out 1 2 3 / 4 5 6 / 7 8 9) for this position.
    #[must_use]
    pub const fn slot(self) -> u8 {
        SLOT_OF_EDGE[self as usize]
    }

    /// Position addressed by a keypad slot. `None` for the centre slot and
    /// for anything outside 1..=9.
    #[must_use]
    pub const fn from_slot(slot: u8) -> Option<Self> {
        if slot == 0 || slot > 9 {
            return None;
        }
        match EDGE_OF_SLOT[(slot - 1) as usize] {
            Some(index) => Some(Self::ALL[index as usize]),
            None => None,
        }
    }

    /// The position this one moves to under `rotation`.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        Self::from_index(self as usize + 2 * rotation.quarter_turns() as usize)
    }
}

/// Clockwise tile rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    R0,
    /// 90 degrees clockwise.
    R90,
    /// 180 degrees.
    R180,
    /// 270 degrees clockwise.
    R270,
}

impl Rotation {
    /// All rotations in increasing angle.
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270];

    /// Number of clockwise quarter turns.
    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 1,
            Rotation::R180 => 2,
            Rotation::R270 => 3,
        }
    }

    /// Angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }
}
