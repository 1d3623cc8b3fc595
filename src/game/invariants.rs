//! Board invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger on a board driven only through its public
//! operations. If they do, a merge or scoring step left the bookkeeping
//! inconsistent.

use std::collections::BTreeSet;

use crate::game::{Board, Location, PlayerId, TerrainSegment};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

fn violation(message: String) -> InvariantViolation {
    InvariantViolation { message }
}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    check_membership(board, &mut violations);
    check_partitions(board, &mut violations);
    check_tokens(board, &mut violations);
    check_prey(board, &mut violations);
    check_frontier(board, &mut violations);
    violations
}

/// Segments and regions point at each other.
fn check_membership(board: &Board, violations: &mut Vec<InvariantViolation>) {
    for segment in board.segments() {
        match board.region(segment.region) {
            None => violations.push(violation(format!(
                "segment {} points at missing region {}",
                segment.id, segment.region
            ))),
            Some(region) if !region.members.contains(&segment.id) => {
                violations.push(violation(format!(
                    "region {} does not list its member {}",
                    region.id, segment.id
                )));
            }
            Some(region) if region.territory() != segment.territory => {
                violations.push(violation(format!(
                    "segment {} ({:?}) sits in {:?} region {}",
                    segment.id,
                    segment.territory,
                    region.territory(),
                    region.id
                )));
            }
            Some(_) => {}
        }
    }

    let regions = board
        .regions()
        .iter_incomplete()
        .chain(board.regions().iter_completed());
    for region in regions {
        for &member in &region.members {
            match board.segment(member) {
                Some(segment) if segment.region == region.id => {}
                Some(segment) => violations.push(violation(format!(
                    "region {} lists {} which belongs to {}",
                    region.id, member, segment.region
                ))),
                None => violations.push(violation(format!(
                    "region {} lists missing segment {member}",
                    region.id
                ))),
            }
        }
        for &member in &region.members {
            if let Some(segment) = board.segment(member) {
                if !region.tiles.contains(&segment.location) {
                    violations.push(violation(format!(
                        "region {} misses tile {} of member {member}",
                        region.id, segment.location
                    )));
                }
            }
        }
    }
}

/// Completed and scored flags agree with the partition a region sits in.
fn check_partitions(board: &Board, violations: &mut Vec<InvariantViolation>) {
    for region in board.regions().iter_incomplete() {
        if region.completed {
            violations.push(violation(format!(
                "open region {} is flagged completed",
                region.id
            )));
        }
        if region.scored {
            violations.push(violation(format!(
                "open region {} is flagged scored",
                region.id
            )));
        }
        if board.regions().is_completed(region.id) {
            violations.push(violation(format!(
                "region {} is in both partitions",
                region.id
            )));
        }
    }
    for region in board.regions().iter_completed() {
        if !region.completed || !region.scored {
            violations.push(violation(format!(
                "completed region {} has completed={} scored={}",
                region.id, region.completed, region.scored
            )));
        }
    }
}

/// A region carries exactly the prey printed on its member segments.
fn check_prey(board: &Board, violations: &mut Vec<InvariantViolation>) {
    let regions = board
        .regions()
        .iter_incomplete()
        .chain(board.regions().iter_completed());
    for region in regions {
        let mut printed: Vec<_> = region
            .members
            .iter()
            .filter_map(|&m| board.segment(m).and_then(|s| s.prey))
            .collect();
        let mut carried = region.prey.clone();
        printed.sort_unstable();
        carried.sort_unstable();
        if printed != carried {
            violations.push(violation(format!(
                "region {} carries prey {carried:?} but its segments hold {printed:?}",
                region.id
            )));
        }
    }
}

/// Every token on the board is recorded once on its segment and once in its
/// region, and no token was created or lost.
fn check_tokens(board: &Board, violations: &mut Vec<InvariantViolation>) {
    let regions = board
        .regions()
        .iter_incomplete()
        .chain(board.regions().iter_completed());
    let mut tigers_listed = 0usize;
    let mut crocodiles_listed = 0usize;
    for region in regions {
        for tiger in &region.tigers {
            tigers_listed += 1;
            match board.segment(tiger.segment) {
                Some(s) if s.tiger == Some(tiger.owner) && s.region == region.id => {}
                _ => violations.push(violation(format!(
                    "tiger of player {} in {} is not on segment {}",
                    tiger.owner, region.id, tiger.segment
                ))),
            }
        }
        for crocodile in &region.crocodiles {
            crocodiles_listed += 1;
            match board.segment(crocodile.segment) {
                Some(s) if s.crocodile == Some(crocodile.owner) && s.region == region.id => {}
                _ => violations.push(violation(format!(
                    "crocodile of player {} in {} is not on segment {}",
                    crocodile.owner, region.id, crocodile.segment
                ))),
            }
        }
    }

    let on_segments = |pick: fn(&TerrainSegment) -> Option<PlayerId>| {
        board.segments().iter().filter_map(pick).count()
    };
    let tigers_placed = on_segments(|s| s.tiger);
    let crocodiles_placed = on_segments(|s| s.crocodile);
    if tigers_placed != tigers_listed {
        violations.push(violation(format!(
            "{tigers_placed} tigers on segments but {tigers_listed} resident in regions"
        )));
    }
    if crocodiles_placed != crocodiles_listed {
        violations.push(violation(format!(
            "{crocodiles_placed} crocodiles on segments but {crocodiles_listed} resident in regions"
        )));
    }

    let config = board.config();
    for player in board.players() {
        let held = |pick: fn(&TerrainSegment) -> Option<PlayerId>| {
            board
                .segments()
                .iter()
                .filter(|s| pick(s) == Some(player.id))
                .count()
        };
        let tigers = usize::from(player.tigers) + held(|s| s.tiger);
        if tigers != usize::from(config.tigers_per_player) {
            violations.push(violation(format!(
                "player {} accounts for {tigers} tigers, expected {}",
                player.id, config.tigers_per_player
            )));
        }
        let crocodiles = usize::from(player.crocodiles) + held(|s| s.crocodile);
        if crocodiles != usize::from(config.crocodiles_per_player) {
            violations.push(violation(format!(
                "player {} accounts for {crocodiles} crocodiles, expected {}",
                player.id, config.crocodiles_per_player
            )));
        }
    }
}

/// The frontier is exactly the empty in-grid cells next to a placed tile.
fn check_frontier(board: &Board, violations: &mut Vec<InvariantViolation>) {
    let filled: Vec<Location> = board.tiles().map(|t| t.location).collect();
    let expected: BTreeSet<Location> = if filled.is_empty() {
        BTreeSet::from([board.config().start])
    } else {
        filled
            .iter()
            .flat_map(|at| at.orthogonal())
            .map(|(_, at)| at)
            .filter(|at| board.in_bounds(*at) && !board.is_occupied(*at))
            .collect()
    };
    if board.frontier() != &expected {
        let extra: Vec<_> = board.frontier().difference(&expected).collect();
        let missing: Vec<_> = expected.difference(board.frontier()).collect();
        violations.push(violation(format!(
            "frontier has extra {extra:?} and misses {missing:?}"
        )));
    }
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board) {
    let violations = check_invariants(board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardConfig, RegionId, Rotation, catalog};

    fn played_board() -> Board {
        let mut board = Board::new(BoardConfig::default()).unwrap();
        board.start(catalog::start_tile()).unwrap();
        let trail = catalog::tile("trail-straight").unwrap().rotated(Rotation::R90);
        board.place(trail, Location::new(1, 0)).unwrap();
        board.place_tiger(4).unwrap();
        board.confirm().unwrap();
        board
    }

    #[test]
    fn test_valid_board_passes() {
        let board = played_board();
        let violations = check_invariants(&board);
        assert!(violations.is_empty(), "Unexpected violations: {violations:?}");
    }

    #[test]
    fn test_empty_board_passes() {
        let board = Board::new(BoardConfig::default()).unwrap();
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_dangling_region_detected() {
        let mut board = played_board();
        board.segments[0].region = RegionId(9_999);
        let violations = check_invariants(&board);
        assert!(violations.iter().any(|v| v.message.contains("missing region")));
    }

    #[test]
    fn test_lost_tiger_detected() {
        let mut board = played_board();
        board.players[0].tigers += 1;
        let violations = check_invariants(&board);
        assert!(violations.iter().any(|v| v.message.contains("tigers, expected")));
    }

    #[test]
    fn test_stale_frontier_detected() {
        let mut board = played_board();
        board.frontier.insert(Location::new(0, 0));
        let violations = check_invariants(&board);
        assert!(violations.iter().any(|v| v.message.contains("frontier")));
    }

    #[test]
    fn test_assert_invariants_passes() {
        assert_invariants(&played_board());
    }

    #[test]
    #[should_panic(expected = "Board invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let mut board = played_board();
        board.frontier.clear();
        assert_invariants(&board);
    }

    #[test]
    fn test_violation_display() {
        let v = InvariantViolation {
            message: "test".into(),
        };
        assert_eq!(v.to_string(), "Invariant violation: test");
    }
}
