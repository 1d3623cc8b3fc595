//! Deterministic self-play driver.
//!
//! Provides a pure function interface: `(seed, config) -> GameResult`
//!
//! The driver owns everything the board leaves to its caller:
//! - Deck construction and a seeded shuffle
//! - A random legal placement policy
//! - Optional tiger and crocodile placement
//! - Parallel batches with rayon

// Rates and averages are intentional float conversions
#![allow(clippy::cast_precision_loss)]

use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, EngineError, SimulationError};
use crate::game::{Board, BoardConfig, FinalScores, PlayerId, Tile, catalog};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random index in [0, len).
    fn below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let len = len as u64;
        usize::try_from(self.next_u64() % len).unwrap_or(0)
    }

    /// Generate random f64 in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Settings for simulated games.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Board dimensions and token pools.
    pub board: BoardConfig,
    /// Chance of attempting a tiger after each placement.
    pub tiger_rate: f64,
    /// Chance of attempting a crocodile after each placement.
    pub crocodile_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            tiger_rate: 0.5,
            crocodile_rate: 0.2,
        }
    }
}

impl SimulationConfig {
    /// Check every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty or a rate is outside `0..=1`.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.board.validate()?;
        for (name, value) in [
            ("tiger_rate", self.tiger_rate),
            ("crocodile_rate", self.crocodile_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimulationError::Rate { name, value });
            }
        }
        Ok(())
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a setting is
    /// out of range.
    pub fn from_json_file(path: &Path) -> Result<Self, SimulationError> {
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

/// Final result of a game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// The winning player (None on a draw).
    pub winner: Option<PlayerId>,
    /// Final score per player, player 1 first.
    pub scores: [u32; 2],
    /// Confirmed turns.
    pub turns_played: u32,
    /// Tiles drawn that fit nowhere.
    pub discarded: u32,
    /// Tigers placed over the game.
    pub tigers_placed: u32,
    /// Crocodiles placed over the game.
    pub crocodiles_placed: u32,
    /// Regions that completed during play.
    pub regions_completed: u32,
    /// The terminal scoring pass.
    pub final_scores: FinalScores,
}

/// Try slots 1..=9 in order until a tiger sticks.
fn try_tiger(board: &mut Board) -> Result<bool, EngineError> {
    for slot in 1..=9 {
        match board.place_tiger(slot) {
            Ok(_) => return Ok(true),
            Err(e) if e.is_fault() => return Err(e),
            Err(_) => {}
        }
    }
    Ok(false)
}

fn try_crocodile(board: &mut Board) -> Result<bool, EngineError> {
    match board.place_crocodile() {
        Ok(_) => Ok(true),
        Err(e) if e.is_fault() => Err(e),
        Err(_) => Ok(false),
    }
}

/// Play one full game from a seed.
///
/// The deck is shuffled with the seed, each drawn tile goes to a random
/// legal spot, tiles with no legal spot are discarded, and the game ends
/// when the deck runs out.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the engine faults.
pub fn run_game(seed: u64, config: &SimulationConfig) -> Result<GameResult, SimulationError> {
    config.validate()?;
    let mut rng = Rng::new(seed);
    let mut board = Board::new(config.board)?;
    board.start(catalog::start_tile())?;

    let mut deck: Vec<Tile> = catalog::standard_deck();
    rng.shuffle(&mut deck);

    let mut discarded = 0;
    let mut tigers_placed = 0;
    let mut crocodiles_placed = 0;
    let mut regions_completed = 0;

    for tile in deck {
        if !board.can_place(&tile) {
            warn!(seed, tile = %tile.code(), "no legal placement, discarding tile");
            discarded += 1;
            continue;
        }
        let candidates = board.candidates();
        let choice = candidates[rng.below(candidates.len())];
        board.place(tile.rotated(choice.rotation), choice.location)?;

        if rng.next_f64() < config.tiger_rate && try_tiger(&mut board)? {
            tigers_placed += 1;
        }
        if rng.next_f64() < config.crocodile_rate && try_crocodile(&mut board)? {
            crocodiles_placed += 1;
        }

        let summary = board.confirm()?;
        regions_completed += u32::try_from(summary.scored.len()).unwrap_or(u32::MAX);
    }

    let final_scores = board.end()?;
    debug!(
        seed,
        turns = board.turns_played(),
        discarded,
        "game finished"
    );
    Ok(GameResult {
        seed,
        winner: final_scores.winner(),
        scores: final_scores.players.map(|p| p.score),
        turns_played: board.turns_played(),
        discarded,
        tigers_placed,
        crocodiles_placed,
        regions_completed,
        final_scores,
    })
}

/// Aggregate statistics over many games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BatchStats {
    /// Games finished.
    pub games_played: u64,
    /// Games that failed.
    pub failures: u64,
    /// Wins per player, player 1 first.
    pub wins: [u64; 2],
    /// Drawn games.
    pub draws: u64,
    /// Summed score per player.
    pub total_scores: [u64; 2],
    /// Summed confirmed turns.
    pub total_turns: u64,
    /// Summed discarded tiles.
    pub total_discarded: u64,
    /// Summed completed regions.
    pub total_completed: u64,
}

impl BatchStats {
    /// Fold one game into the totals.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        match result.winner {
            Some(1) => self.wins[0] += 1,
            Some(_) => self.wins[1] += 1,
            None => self.draws += 1,
        }
        for (total, score) in self.total_scores.iter_mut().zip(result.scores) {
            *total += u64::from(score);
        }
        self.total_turns += u64::from(result.turns_played);
        self.total_discarded += u64::from(result.discarded);
        self.total_completed += u64::from(result.regions_completed);
    }

    /// Combine two partial aggregates.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failures += other.failures;
        self.draws += other.draws;
        for i in 0..2 {
            self.wins[i] += other.wins[i];
            self.total_scores[i] += other.total_scores[i];
        }
        self.total_turns += other.total_turns;
        self.total_discarded += other.total_discarded;
        self.total_completed += other.total_completed;
    }

    /// Mean score for a player index (0 or 1).
    #[must_use]
    pub fn mean_score(&self, index: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_scores.get(index).copied().unwrap_or(0) as f64 / self.games_played as f64
    }
}

/// Play `games` games with seeds `start_seed, start_seed + 1, ...` in
/// parallel. Each game owns its own board.
///
/// # Errors
///
/// Returns an error if the configuration is invalid. Individual game
/// failures are counted in [`BatchStats::failures`].
pub fn run_batch(
    start_seed: u64,
    games: u64,
    config: &SimulationConfig,
) -> Result<BatchStats, SimulationError> {
    config.validate()?;
    let stats = (0..games)
        .into_par_iter()
        .fold(BatchStats::default, |mut local, i| {
            let seed = start_seed.wrapping_add(i);
            match run_game(seed, config) {
                Ok(result) => local.add_result(&result),
                Err(e) => {
                    warn!(seed, error = %e, "game failed");
                    local.failures += 1;
                }
            }
            local
        })
        .reduce(BatchStats::default, |mut a, b| {
            a.merge(&b);
            a
        });
    Ok(stats)
}
