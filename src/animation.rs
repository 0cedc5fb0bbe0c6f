//! Sprite frame selection as a pure function of elapsed time.  The renderer
//! asks each frame; nothing here owns a timer.

use crate::entities::EntityKind;

pub const PLAYER_FRAME_MS: u64 = 100;
pub const ENEMY_FRAME_MS: u64 = 120;
pub const BOSS_FRAME_MS: u64 = 160;
pub const ENEMY_DEATH_FRAME_MS: u64 = 80;
pub const PLAYER_DEATH_FRAME_MS: u64 = 90;
pub const TITLE_BLINK_MS: u64 = 450;
pub const STAGE_BANNER_MS: u64 = 800;

/// Looping frame index.
pub fn frame_index(elapsed_ms: u64, frame_ms: u64, frames: usize) -> usize {
    if frames == 0 || frame_ms == 0 {
        return 0;
    }
    ((elapsed_ms / frame_ms) % frames as u64) as usize
}

/// Non-looping frame index; `None` once the animation has played out.
pub fn oneshot_frame(elapsed_ms: u64, frame_ms: u64, frames: usize) -> Option<usize> {
    if frame_ms == 0 {
        return None;
    }
    let idx = (elapsed_ms / frame_ms) as usize;
    (idx < frames).then_some(idx)
}

/// Frame period of the idle animation for `kind`.
pub fn frame_ms_for(kind: EntityKind) -> u64 {
    match kind {
        EntityKind::Player => PLAYER_FRAME_MS,
        EntityKind::Boss(_) => BOSS_FRAME_MS,
        _ => ENEMY_FRAME_MS,
    }
}

/// Frame period of the death effect for `kind`.
pub fn death_frame_ms_for(kind: EntityKind) -> u64 {
    match kind {
        EntityKind::Player => PLAYER_DEATH_FRAME_MS,
        _ => ENEMY_DEATH_FRAME_MS,
    }
}

/// Blink state of the title prompt.
pub fn blink_on(elapsed_ms: u64) -> bool {
    (elapsed_ms / TITLE_BLINK_MS) % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_loops() {
        assert_eq!(frame_index(0, 100, 4), 0);
        assert_eq!(frame_index(99, 100, 4), 0);
        assert_eq!(frame_index(100, 100, 4), 1);
        assert_eq!(frame_index(400, 100, 4), 0);
    }

    #[test]
    fn frame_index_tolerates_empty_strip() {
        assert_eq!(frame_index(1234, 100, 0), 0);
    }

    #[test]
    fn oneshot_ends() {
        assert_eq!(oneshot_frame(0, 80, 3), Some(0));
        assert_eq!(oneshot_frame(239, 80, 3), Some(2));
        assert_eq!(oneshot_frame(240, 80, 3), None);
    }

    #[test]
    fn blink_alternates() {
        assert!(blink_on(0));
        assert!(!blink_on(450));
        assert!(blink_on(900));
    }
}
