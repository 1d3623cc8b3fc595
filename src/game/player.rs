//! Player token pools and scores.

use serde::Serialize;

/// Unique identifier for a player.
pub type PlayerId = u8;

/// Token pools and running score for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Unique identifier for this player.
    pub id: PlayerId,
    /// Tigers still in hand.
    pub tigers: u8,
    /// Crocodiles still in hand.
    pub crocodiles: u8,
    /// Points scored so far.
    pub score: u32,
}

impl Player {
    /// Create a player with full token pools.
    #[must_use]
    pub const fn new(id: PlayerId, tigers: u8, crocodiles: u8) -> Self {
        Self {
            id,
            tigers,
            crocodiles,
            score: 0,
        }
    }

    /// Whether a tiger is left in hand.
    #[must_use]
    pub const fn has_tigers(&self) -> bool {
        self.tigers > 0
    }

    /// Whether a crocodile is left in hand.
    #[must_use]
    pub const fn has_crocodiles(&self) -> bool {
        self.crocodiles > 0
    }

    /// Take a tiger from the pool. Returns `false` if none are left.
    pub fn take_tiger(&mut self) -> bool {
        if self.tigers == 0 {
            return false;
        }
        self.tigers -= 1;
        true
    }

    /// Take a crocodile from the pool. Returns `false` if none are left.
    pub fn take_crocodile(&mut self) -> bool {
        if self.crocodiles == 0 {
            return false;
        }
        self.crocodiles -= 1;
        true
    }

    /// Return a tiger to the pool.
    pub fn return_tiger(&mut self) {
        self.tigers = self.tigers.saturating_add(1);
    }

    /// Return a crocodile to the pool.
    pub fn return_crocodile(&mut self) {
        self.crocodiles = self.crocodiles.saturating_add(1);
    }

    /// Credit points.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(1, 7, 2);
        assert_eq!(player.id, 1);
        assert!(player.has_tigers());
        assert!(player.has_crocodiles());
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_take_and_return_tokens() {
        let mut player = Player::new(2, 1, 0);
        assert!(player.take_tiger());
        assert!(!player.take_tiger());
        assert!(!player.has_tigers());
        player.return_tiger();
        assert_eq!(player.tigers, 1);

        assert!(!player.take_crocodile());
        player.return_crocodile();
        assert!(player.take_crocodile());
    }

    #[test]
    fn test_add_score() {
        let mut player = Player::new(1, 0, 0);
        player.add_score(4);
        player.add_score(5);
        assert_eq!(player.score, 9);
    }
}
