//! Player resources and UI selection, owned by the engine.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities.

use bastion_core::enums::TowerType;
use bastion_core::state::PlayerView;
use bastion_core::types::EntityId;

/// Currency, base health and wave counter for the current match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub money: u32,
    pub lives: u32,
    pub wave: u32,
}

impl PlayerState {
    pub fn new(money: u32, lives: u32, wave: u32) -> Self {
        Self { money, lives, wave }
    }

    /// Deduct `amount` if affordable. Returns false and changes nothing otherwise.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.money < amount {
            return false;
        }
        self.money -= amount;
        true
    }

    pub fn earn(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Remove `count` lives, clamped at zero. Returns true when none remain.
    pub fn lose_lives(&mut self, count: u32) -> bool {
        self.lives = self.lives.saturating_sub(count);
        self.lives == 0
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            money: self.money,
            lives: self.lives,
            wave: self.wave,
        }
    }
}

/// What the player currently has selected in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub build: Option<TowerType>,
    pub entity: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spend_rejects_overdraw() {
        let mut player = PlayerState::new(100, 20, 1);
        assert!(!player.spend(120));
        assert_eq!(player.money, 100);
        assert!(player.spend(100));
        assert_eq!(player.money, 0);
    }

    #[test]
    fn test_lose_lives_clamps_at_zero() {
        let mut player = PlayerState::new(0, 3, 1);
        assert!(!player.lose_lives(2));
        assert_eq!(player.lives, 1);
        assert!(player.lose_lives(5));
        assert_eq!(player.lives, 0);
    }
}
