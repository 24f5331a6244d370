//! Game Events
//!
//! A serializable record of the notable things that happened in a
//! session. The session appends events as it resolves each frame; the
//! demo binary dumps them as JSON and tests assert on them.

use serde::{Deserialize, Serialize};

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventKind {
    /// An enemy was destroyed by a projectile.
    EnemyDestroyed {
        /// Score total after the kill.
        score: u32,
    },
    /// A pickup was collected and consumed.
    PickupCollected,
    /// The ship was destroyed.
    ShipDestroyed {
        /// Lives left after this death.
        lives_remaining: u32,
    },
    /// The ship came back after a death.
    ShipRespawned,
    /// The last life was spent.
    GameOver {
        /// Final score.
        score: u32,
    },
}

/// One notable occurrence, stamped with the frame it happened on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Frame counter value when the event fired.
    pub frame: u64,
    /// What happened.
    #[serde(flatten)]
    pub kind: GameEventKind,
}
