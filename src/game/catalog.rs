//! Catalogue of tile shapes used to build decks.
//!
//! Corners are always jungle: a lake or trail only ever occupies side
//! midpoints, and the corners flanking it are its banks or shoulders.

use std::sync::LazyLock;

use crate::game::{Center, Edge, Prey, Segment, Terrain, Tile};

use Edge::{East as E, North as N, NorthEast as NE, NorthWest as NW};
use Edge::{South as S, SouthEast as SE, SouthWest as SW, West as W};
use Terrain::{Jungle, Lake, Trail};

/// A named tile shape and how many copies a deck holds.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Short name.
    pub name: &'static str,
    /// Copies in a standard deck.
    pub count: u8,
    /// The tile in its reference orientation.
    pub tile: Tile,
}

/// Name of the shape every game starts with.
pub const START_TILE: &str = "lake-trail";

fn shape(
    name: &'static str,
    count: u8,
    center: Center,
    segments: &[(Terrain, &[Edge])],
) -> CatalogEntry {
    build(name, count, center, None, segments)
}

/// A plain shape with an animal in its first lake or trail.
fn stocked(
    name: &'static str,
    count: u8,
    prey: Prey,
    segments: &[(Terrain, &[Edge])],
) -> CatalogEntry {
    build(name, count, Center::Plain, Some(prey), segments)
}

fn build(
    name: &'static str,
    count: u8,
    center: Center,
    prey: Option<Prey>,
    segments: &[(Terrain, &[Edge])],
) -> CatalogEntry {
    let segments = segments
        .iter()
        .map(|(terrain, edges)| Segment::new(*terrain, edges))
        .collect();
    let tile = Tile::new(segments, center).and_then(|tile| match prey {
        Some(prey) => tile.with_prey(prey),
        None => Ok(tile),
    });
    CatalogEntry {
        name,
        count,
        // Shapes are fixed data; `test_every_shape_builds` covers them.
        tile: tile.expect("catalogue shape is well formed"),
    }
}

static CATALOG: LazyLock<Vec<CatalogEntry>> = LazyLock::new(|| {
    use Center::{Den, Plain};
    vec![
        shape("den", 2, Den, &[(Jungle, &Edge::ALL)]),
        shape(
            "den-trail",
            2,
            Den,
            &[(Trail, &[S]), (Jungle, &[NW, N, NE, E, SE, SW, W])],
        ),
        shape(
            "trail-straight",
            6,
            Plain,
            &[(Trail, &[N, S]), (Jungle, &[NW, W, SW]), (Jungle, &[NE, E, SE])],
        ),
        stocked(
            "trail-straight-deer",
            2,
            Prey::Deer,
            &[(Trail, &[N, S]), (Jungle, &[NW, W, SW]), (Jungle, &[NE, E, SE])],
        ),
        shape(
            "trail-curve",
            7,
            Plain,
            &[(Trail, &[S, W]), (Jungle, &[SW]), (Jungle, &[NW, N, NE, E, SE])],
        ),
        stocked(
            "trail-curve-boar",
            2,
            Prey::Boar,
            &[(Trail, &[S, W]), (Jungle, &[SW]), (Jungle, &[NW, N, NE, E, SE])],
        ),
        shape(
            "trail-three",
            4,
            Plain,
            &[
                (Trail, &[E]),
                (Trail, &[S]),
                (Trail, &[W]),
                (Jungle, &[NW, N, NE]),
                (Jungle, &[SE]),
                (Jungle, &[SW]),
            ],
        ),
        shape(
            "trail-four",
            2,
            Plain,
            &[
                (Trail, &[N]),
                (Trail, &[E]),
                (Trail, &[S]),
                (Trail, &[W]),
                (Jungle, &[NW]),
                (Jungle, &[NE]),
                (Jungle, &[SE]),
                (Jungle, &[SW]),
            ],
        ),
        shape(
            "lake-end",
            4,
            Plain,
            &[(Lake, &[N]), (Jungle, &[NW, NE, E, SE, S, SW, W])],
        ),
        stocked(
            "lake-end-buffalo",
            1,
            Prey::Buffalo,
            &[(Lake, &[N]), (Jungle, &[NW, NE, E, SE, S, SW, W])],
        ),
        shape(
            "lake-opposite",
            3,
            Plain,
            &[(Lake, &[N]), (Lake, &[S]), (Jungle, &[NW, NE, E, SE, SW, W])],
        ),
        shape(
            "lake-through",
            1,
            Plain,
            &[(Lake, &[N, S]), (Jungle, &[NW, W, SW]), (Jungle, &[NE, E, SE])],
        ),
        stocked(
            "lake-through-deer",
            1,
            Prey::Deer,
            &[(Lake, &[N, S]), (Jungle, &[NW, W, SW]), (Jungle, &[NE, E, SE])],
        ),
        shape(
            "lake-corner",
            2,
            Plain,
            &[(Lake, &[N, E]), (Jungle, &[NE]), (Jungle, &[NW, SE, S, SW, W])],
        ),
        stocked(
            "lake-corner-boar",
            1,
            Prey::Boar,
            &[(Lake, &[N, E]), (Jungle, &[NE]), (Jungle, &[NW, SE, S, SW, W])],
        ),
        shape(
            START_TILE,
            3,
            Plain,
            &[(Lake, &[N]), (Trail, &[E, W]), (Jungle, &[NW, NE]), (Jungle, &[SE, S, SW])],
        ),
        shape(
            "lake-trail-end",
            2,
            Plain,
            &[(Lake, &[N]), (Trail, &[S]), (Jungle, &[NW, NE, E, SE, SW, W])],
        ),
        shape(
            "lake-three",
            2,
            Plain,
            &[(Lake, &[N, E, W]), (Jungle, &[NW]), (Jungle, &[NE]), (Jungle, &[SE, S, SW])],
        ),
        shape(
            "lake-full",
            1,
            Plain,
            &[
                (Lake, &[N, E, S, W]),
                (Jungle, &[NW]),
                (Jungle, &[NE]),
                (Jungle, &[SE]),
                (Jungle, &[SW]),
            ],
        ),
    ]
});

/// Every shape in the catalogue.
#[must_use]
pub fn catalog() -> &'static [CatalogEntry] {
    &CATALOG
}

/// Look up a shape by name.
#[must_use]
pub fn tile(name: &str) -> Option<Tile> {
    CATALOG.iter().find(|e| e.name == name).map(|e| e.tile.clone())
}

/// The tile every game starts with.
#[must_use]
pub fn start_tile() -> Tile {
    CATALOG
        .iter()
        .find(|e| e.name == START_TILE)
        .map_or_else(|| CATALOG[0].tile.clone(), |e| e.tile.clone())
}

/// All copies of every shape, in catalogue order, minus the start tile.
#[must_use]
pub fn standard_deck() -> Vec<Tile> {
    let mut deck: Vec<Tile> = CATALOG
        .iter()
        .flat_map(|e| std::iter::repeat_n(e.tile.clone(), usize::from(e.count)))
        .collect();
    let start = start_tile();
    if let Some(pos) = deck.iter().position(|t| *t == start) {
        deck.remove(pos);
    }
    deck
}
