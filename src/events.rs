//! Notifications the session emits for its collaborators (renderer, audio,
//! score persistence).  Queued during `handle`/`tick`, drained by the driver.

use crate::entities::{EntityId, EntityKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioCue {
    Hit,
    Explode,
    Shotgun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicCue {
    Pause,
    Resume,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalCause {
    /// HP reached zero; a death effect belongs here.
    Killed,
    /// A bullet that struck its target.
    Impact,
    /// A bullet that left the arena.
    OutOfBounds,
    /// Swept away by a session reset or stage rebuild.
    Reset,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
        x: f32,
        y: f32,
    },
    Removed {
        id: EntityId,
        kind: EntityKind,
        x: f32,
        y: f32,
        cause: RemovalCause,
    },
    Audio(AudioCue),
    Music(MusicCue),
    StageStarted {
        stage: u32,
    },
    StageCleared {
        stage: u32,
        bonus: u32,
    },
    BossEnraged {
        id: EntityId,
    },
    GameOver {
        score: u32,
        high_score: u32,
    },
    /// The run beat the stored record; the driver should persist `score`.
    NewHighScore {
        score: u32,
    },
}
