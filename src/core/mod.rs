//! Core infrastructure shared by the game engine and the search:
//! seat identifiers, per-seat storage, and deterministic RNG.

pub mod player;
pub mod rng;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
