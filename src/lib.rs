//! Real-time arcade shooter core: a fixed-tick simulation of a ship, its
//! guard resource, stage-based enemy waves with a two-phase boss, bullets,
//! and persistent high scores.  Rendering, audio and input live in the
//! binary and talk to the core through commands, events and snapshots.

pub mod animation;
pub mod collision;
pub mod config;
pub mod constants;
pub mod enemy_fire;
pub mod entities;
pub mod error;
pub mod events;
pub mod high_score;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod starfield;
pub mod wave;
