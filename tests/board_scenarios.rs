//! End-to-end board scenarios: merging, completion, scoring and tokens.
//!
//! Run with: cargo test board_scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use tigerzone::game::{
    Board, BoardConfig, Center, Edge, Location, Prey, Region, RegionId, Rotation, Segment,
    Terrain, Territory, Tile, assert_invariants, catalog,
};
use tigerzone::{EngineError, MoveError};

use Edge::{East, North, NorthEast, NorthWest, South, SouthEast, SouthWest, West};

fn shape(name: &str, rotation: Rotation) -> Tile {
    catalog::tile(name).unwrap().rotated(rotation)
}

fn all_jungle() -> Tile {
    Tile::new(vec![Segment::new(Terrain::Jungle, &Edge::ALL)], Center::Plain).unwrap()
}

fn region_at(board: &Board, at: Location, edge: Edge) -> RegionId {
    let placed = board.tile_at(at).unwrap();
    board.segment(placed.segment_at(edge)).unwrap().region
}

fn illegal<T: std::fmt::Debug>(result: Result<T, EngineError>) -> MoveError {
    result.unwrap_err().as_illegal().unwrap()
}

fn place_and_check(board: &mut Board, tile: Tile, x: i32, y: i32) {
    board.place(tile, Location::new(x, y)).unwrap();
    assert_invariants(board);
}

#[test]
fn test_trail_north_of_den_start_merges_into_start_region() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    // Den with the trail turned to face north.
    board.start(shape("den-trail", Rotation::R180)).unwrap();
    let start = Location::new(0, 0);
    let start_trail = region_at(&board, start, North);
    let before = board.region(start_trail).unwrap().members.len();

    let north = Location::new(0, 1);
    let tile = shape("trail-straight", Rotation::R0);
    board.place(tile, north).unwrap();
    assert_invariants(&board);

    assert_eq!(region_at(&board, north, South), start_trail);
    assert_eq!(region_at(&board, north, North), start_trail);
    let merged = board.region(start_trail).unwrap();
    assert_eq!(merged.members.len(), before + 1);
    assert_eq!(merged.territory(), Territory::Trail);

    // The road also joins the jungle on both shoulders.
    let jungle = region_at(&board, start, NorthWest);
    assert_eq!(region_at(&board, north, SouthWest), jungle);
    assert_eq!(region_at(&board, north, SouthEast), jungle);
}

/// Four trail curves closing a loop in a 2x2 block. The inner jungle corners
/// form one four-segment region enclosed by the trail.
#[test]
fn test_enclosed_jungle_completes_on_closing_placement() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.start(shape("trail-curve", Rotation::R180)).unwrap();

    // Player 1: bottom right, tiger on the trail.
    place_and_check(&mut board, shape("trail-curve", Rotation::R90), 1, 0);
    let trail = board.place_tiger(2).unwrap();
    assert!(board.confirm().unwrap().scored.is_empty());

    // Player 2: top right, tiger on the inner jungle corner.
    place_and_check(&mut board, shape("trail-curve", Rotation::R0), 1, 1);
    let jungle = board.place_tiger(7).unwrap();
    let inner = region_at(&board, Location::new(0, 0), NorthEast);
    assert_eq!(jungle, inner);
    let summary = board.confirm().unwrap();
    assert!(summary.scored.is_empty());
    assert!(!board.regions().is_completed(inner));

    // Player 1: top left closes the loop.
    place_and_check(&mut board, shape("trail-curve", Rotation::R270), 0, 1);
    assert_eq!(region_at(&board, Location::new(0, 1), SouthEast), inner);
    assert_eq!(board.region(inner).unwrap().members.len(), 4);
    let summary = board.confirm().unwrap();
    assert_invariants(&board);

    let jungle_score = summary.scored.iter().find(|s| s.region == inner).unwrap();
    assert_eq!(jungle_score.territory, Territory::Jungle);
    assert_eq!(jungle_score.points, Region::jungle_potential(0, 0));
    assert_eq!(jungle_score.owners, vec![2]);

    let trail_score = summary.scored.iter().find(|s| s.region == trail).unwrap();
    assert_eq!(trail_score.points, 4);
    assert_eq!(trail_score.owners, vec![1]);

    assert!(board.regions().is_completed(inner));
    assert_eq!(board.players()[0].score, 4);
    assert_eq!(board.players()[0].tigers, 7);
    assert_eq!(board.players()[1].tigers, 7);
}

/// Two lake ends meeting on a 1x2 board. The lake closes, but the jungles
/// on either side only touch each other corner to corner across the water,
/// so neither is closed.
#[test]
fn test_jungle_across_lake_seam_stays_open_until_end() {
    let config = BoardConfig {
        rows: 1,
        cols: 2,
        ..BoardConfig::default()
    };
    let mut board = Board::new(config).unwrap();
    board.start(shape("lake-end", Rotation::R270)).unwrap();
    place_and_check(&mut board, shape("lake-end", Rotation::R90), -1, 0);
    let jungle = board.place_tiger(1).unwrap();
    let summary = board.confirm().unwrap();
    assert_invariants(&board);

    let lake = region_at(&board, Location::new(0, 0), West);
    assert_eq!(summary.scored.len(), 1);
    let lake_score = &summary.scored[0];
    assert_eq!(lake_score.region, lake);
    assert_eq!(lake_score.points, 4);
    assert!(lake_score.owners.is_empty());

    let east_jungle = region_at(&board, Location::new(0, 0), NorthWest);
    assert_eq!(region_at(&board, Location::new(-1, 0), NorthEast), jungle);
    assert_ne!(east_jungle, jungle);
    assert!(!board.regions().is_completed(jungle));
    assert!(!board.regions().is_completed(east_jungle));
    assert_eq!(board.players()[0].score, 0);

    // Open jungles are still credited for the completed lake at the end.
    let scores = board.end().unwrap();
    let jungle_entry = scores.scored.iter().find(|s| s.region == jungle).unwrap();
    assert_eq!(jungle_entry.points, 3);
    assert_eq!(jungle_entry.owners, vec![1]);
    assert_eq!(scores.players[0].score, 3);
    assert_eq!(scores.players[1].score, 0);
}

/// A buffalo lake closed on a 1x2 board, with and without a crocodile.
#[test]
fn test_crocodile_eats_lake_prey_bonus() {
    let config = BoardConfig {
        rows: 1,
        cols: 2,
        ..BoardConfig::default()
    };
    let mut board = Board::new(config).unwrap();
    board.start(shape("lake-end-buffalo", Rotation::R270)).unwrap();
    place_and_check(&mut board, shape("lake-end", Rotation::R90), -1, 0);
    let lake = region_at(&board, Location::new(0, 0), West);
    assert_eq!(board.region(lake).unwrap().prey, vec![Prey::Buffalo]);
    // Two tiles, one kind of prey.
    assert_eq!(board.region(lake).unwrap().potential, 4);

    // The lake is the only water on the new tile, on its east side.
    let mut untouched = board.clone();
    untouched.place_tiger(6).unwrap();
    let summary = untouched.confirm().unwrap();
    let entry = summary.scored.iter().find(|s| s.region == lake).unwrap();
    assert_eq!(entry.points, 8);
    assert_eq!(untouched.players()[0].score, 8);

    board.place_tiger(6).unwrap();
    assert_eq!(board.place_crocodile().unwrap(), lake);
    assert_eq!(board.region(lake).unwrap().potential, 2);
    let summary = board.confirm().unwrap();
    assert_invariants(&board);
    let entry = summary.scored.iter().find(|s| s.region == lake).unwrap();
    assert_eq!(entry.points, 4);
    assert_eq!(entry.owners, vec![1]);
    assert_eq!(board.players()[0].score, 4);
    assert_eq!(board.players()[0].crocodiles, 2);
}

/// Two trails, one tiger each, joined by the closing tile of a 2x2 board.
#[test]
fn test_tied_region_credits_both_players() {
    let config = BoardConfig {
        rows: 2,
        cols: 2,
        ..BoardConfig::default()
    };
    let mut board = Board::new(config).unwrap();
    board.start(catalog::tile("trail-four").unwrap()).unwrap();
    let west_arm = region_at(&board, Location::new(0, 0), West);
    let north_arm = region_at(&board, Location::new(0, 0), North);
    assert_ne!(west_arm, north_arm);

    place_and_check(&mut board, shape("trail-curve", Rotation::R180), -1, 0);
    assert_eq!(board.place_tiger(2).unwrap(), west_arm);
    board.confirm().unwrap();

    place_and_check(&mut board, shape("trail-curve", Rotation::R0), 0, 1);
    assert_eq!(board.place_tiger(4).unwrap(), north_arm);
    board.confirm().unwrap();

    place_and_check(&mut board, shape("trail-curve", Rotation::R270), -1, 1);
    let summary = board.confirm().unwrap();
    assert_invariants(&board);

    let trail = summary
        .scored
        .iter()
        .find(|s| s.region == west_arm)
        .unwrap();
    assert_eq!(trail.points, 4);
    assert_eq!(trail.owners, vec![1, 2]);
    assert!(board.region(north_arm).is_none());
    assert_eq!(board.players()[0].score, 4);
    assert_eq!(board.players()[1].score, 4);
    assert!(board.players().iter().all(|p| p.tigers == 7));
}

#[test]
fn test_crocodile_takes_first_free_lake_only() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.start(catalog::tile("lake-opposite").unwrap()).unwrap();
    place_and_check(&mut board, shape("lake-opposite", Rotation::R0), 0, 1);

    let north_lake = region_at(&board, Location::new(0, 1), North);
    let south_lake = region_at(&board, Location::new(0, 1), South);
    assert_ne!(north_lake, south_lake);

    assert_eq!(board.place_crocodile().unwrap(), north_lake);
    assert_eq!(
        illegal(board.place_crocodile()),
        MoveError::AlreadyPlacedThisTurn
    );
    assert!(board.region(north_lake).unwrap().has_crocodile());
    assert!(!board.region(south_lake).unwrap().has_crocodile());
    assert_eq!(board.active_player().crocodiles, 1);
    board.confirm().unwrap();

    // Turned around, the first lake segment now faces south into the lake
    // that already holds a crocodile, so the second one receives it.
    place_and_check(&mut board, shape("lake-opposite", Rotation::R180), 0, 2);
    assert_eq!(region_at(&board, Location::new(0, 2), South), north_lake);
    let fresh = region_at(&board, Location::new(0, 2), North);
    assert_eq!(board.place_crocodile().unwrap(), fresh);
    assert_eq!(board.region(north_lake).unwrap().crocodiles.len(), 1);
    board.confirm().unwrap();
    assert_invariants(&board);
}

#[test]
fn test_minimum_slot_follows_merges() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.start(all_jungle()).unwrap();
    for (x, y) in [(-1, 0), (1, 0), (-1, 1), (1, 1)] {
        place_and_check(&mut board, all_jungle(), x, y);
        board.confirm().unwrap();
    }
    let jungle = region_at(&board, Location::new(0, 0), North);

    // Lake to the north, one jungle wrapping west and south, a second
    // jungle on the east side.
    let gap = Tile::new(
        vec![
            Segment::new(Terrain::Lake, &[North]),
            Segment::new(Terrain::Jungle, &[NorthWest, West, SouthWest, South]),
            Segment::new(Terrain::Jungle, &[NorthEast, East, SouthEast]),
        ],
        Center::Plain,
    )
    .unwrap();
    place_and_check(&mut board, gap, 0, 1);

    // Both jungle segments joined the surrounding jungle; the lowest slot
    // exposing it is the north-west corner.
    assert_eq!(region_at(&board, Location::new(0, 1), East), jungle);
    assert_eq!(region_at(&board, Location::new(0, 1), West), jungle);
    assert_eq!(board.tracked_minimum(jungle), Some(1));
    assert_eq!(
        illegal(board.place_tiger(3)),
        MoveError::NotMinimumIndex {
            slot: 3,
            minimum: 1
        }
    );
    assert_eq!(board.place_tiger(1).unwrap(), jungle);
    board.confirm().unwrap();
    assert_eq!(board.tracked_minimum(jungle), None);
}

#[test]
fn test_tiger_rules_checked_in_order() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.start(catalog::start_tile()).unwrap();
    assert_eq!(illegal(board.place_tiger(12)), MoveError::InvalidSlot(12));
    assert_eq!(illegal(board.place_tiger(2)), MoveError::NoTilePlacedYet);
    assert_eq!(illegal(board.place_crocodile()), MoveError::NoTilePlacedYet);

    place_and_check(&mut board, shape("trail-straight", Rotation::R90), 1, 0);
    assert_eq!(illegal(board.place_tiger(5)), MoveError::InvalidDenSlot);
    assert_eq!(
        illegal(board.place(all_jungle(), Location::new(0, 1))),
        MoveError::PendingMoveInProgress
    );
    board.place_tiger(4).unwrap();
    assert_eq!(
        illegal(board.place_tiger(1)),
        MoveError::AlreadyPlacedThisTurn
    );
    board.confirm().unwrap();

    board.end().unwrap();
    assert_eq!(illegal(board.place_tiger(1)), MoveError::GameOver);
    assert_eq!(illegal(board.place_crocodile()), MoveError::GameOver);
    assert_eq!(illegal(board.confirm()), MoveError::GameOver);
    assert_eq!(illegal(board.end()), MoveError::GameOver);
}

#[test]
fn test_end_scores_open_regions_and_dens_once() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.start(all_jungle()).unwrap();
    place_and_check(&mut board, catalog::tile("den").unwrap(), 1, 0);
    board.place_tiger(5).unwrap();
    board.confirm().unwrap();

    let den = board.dens()[0];
    assert_eq!(board.region(den).unwrap().potential, 2);

    let scores = board.end().unwrap();
    let den_entry = scores.scored.iter().find(|s| s.region == den).unwrap();
    assert_eq!(den_entry.points, 2);
    assert_eq!(den_entry.owners, vec![1]);
    assert_eq!(scores.players[0].score, 2);
    assert_eq!(scores.players[0].tigers, 7);
    assert_eq!(scores.winner(), Some(1));
    assert!(board.is_over());
    assert_invariants(&board);
}

#[test]
fn test_clone_explores_without_touching_original() {
    let mut board = Board::new(BoardConfig::default()).unwrap();
    board.start(catalog::start_tile()).unwrap();
    let original_regions = board.regions().incomplete_len();

    let mut branch = board.clone();
    branch
        .place(shape("trail-straight", Rotation::R90), Location::new(1, 0))
        .unwrap();
    branch.place_tiger(4).unwrap();
    branch.confirm().unwrap();

    assert_eq!(board.tile_count(), 1);
    assert_eq!(board.regions().incomplete_len(), original_regions);
    assert_eq!(board.active_player().tigers, 7);
    assert!(board.segments().iter().all(|s| s.tiger.is_none()));
    assert_eq!(branch.players()[0].tigers, 6);
}
