#![no_main]

//! Board operation fuzzer.
//!
//! This fuzz target throws arbitrary operation sequences at a board, legal
//! or not:
//! 1. Place any catalogue shape, any rotation, anywhere
//! 2. Place tigers on any slot and crocodiles
//! 3. Confirm or end at any moment
//!
//! Illegal moves must be rejected without faults, and the structural
//! invariants must hold after every operation.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tigerzone::game::{
    Board, BoardConfig, Location, Rotation, catalog, check_invariants,
};

/// A fuzzer-generated board operation.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzOp {
    /// Lay a catalogue shape.
    Place { shape: u8, rotation: u8, x: i8, y: i8 },
    /// Lay the drawn shape on one of its legal candidates.
    PlaceLegal { shape: u8, pick: u8 },
    /// Put a tiger on a slot.
    Tiger { slot: u8 },
    /// Put a crocodile on the placed tile.
    Crocodile,
    /// Confirm the turn.
    Confirm,
    /// Run the terminal scoring pass.
    End,
}

/// Structured input for board fuzzing.
#[derive(Arbitrary, Debug)]
struct BoardInput {
    /// Grid size, capped to something small.
    rows: u8,
    cols: u8,
    /// Operations to apply.
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: BoardInput| {
    let config = BoardConfig {
        rows: u16::from(input.rows % 9).max(1),
        cols: u16::from(input.cols % 9).max(1),
        ..BoardConfig::default()
    };
    let Ok(mut board) = Board::new(config) else {
        return;
    };
    if board.start(catalog::start_tile()).is_err() {
        return;
    }

    let shapes = catalog::catalog();
    for op in input.ops.iter().take(200) {
        let result = match op {
            FuzzOp::Place {
                shape,
                rotation,
                x,
                y,
            } => {
                let tile = shapes[usize::from(*shape) % shapes.len()]
                    .tile
                    .rotated(Rotation::ALL[usize::from(*rotation) % 4]);
                board
                    .place(tile, Location::new(i32::from(*x), i32::from(*y)))
                    .map(|_| ())
            }
            FuzzOp::PlaceLegal { shape, pick } => {
                let tile = shapes[usize::from(*shape) % shapes.len()].tile.clone();
                if board.is_pending() || board.is_over() || !board.can_place(&tile) {
                    continue;
                }
                let candidates = board.candidates();
                let choice = candidates[usize::from(*pick) % candidates.len()];
                board
                    .place(tile.rotated(choice.rotation), choice.location)
                    .map(|_| ())
            }
            FuzzOp::Tiger { slot } => board.place_tiger(*slot).map(|_| ()),
            FuzzOp::Crocodile => board.place_crocodile().map(|_| ()),
            FuzzOp::Confirm => board.confirm().map(|_| ()),
            FuzzOp::End => board.end().map(|_| ()),
        };

        if let Err(e) = result {
            assert!(!e.is_fault(), "engine fault on {op:?}: {e}");
        }

        let violations = check_invariants(&board);
        assert!(
            violations.is_empty(),
            "Invariants violated after {op:?}: {violations:?}"
        );
    }
});
