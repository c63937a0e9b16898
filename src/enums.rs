use serde::{Deserialize, Serialize};

/// Facing direction - which way the player sprite is mirrored
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// Animation type - mutually exclusive sprite animations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationType {
    Idle,
    Walking,
    Jumping,
    Falling,
    Climbing,
}

/// Game phase - session state machine
///
/// `Intro` is the initial phase. `GameOver` and `Congratulations` are
/// terminal: they hold for a fixed delay and then the app exits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Intro,
    Running,
    GameOver,
    Congratulations,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Congratulations)
    }
}
