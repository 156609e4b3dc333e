//! Simulation boundary types shared by the skirmish client crates.
//!
//! `game-core` describes what the client may ask of the rules engine: hex
//! geometry, identifiers, the world read model, the [`Event`] stream that
//! results from actions, and the [`Simulation`] trait itself. It holds no
//! rules; engines implement [`Simulation`] elsewhere.
pub mod action;
pub mod engine;
pub mod error;
pub mod event;
pub mod hex;
pub mod ids;
pub mod world;

pub use action::Action;
pub use engine::{Resolution, Simulation};
pub use error::{ErrorSeverity, Rejection};
pub use event::{Event, FloatStyle, Note, Subject};
pub use hex::{Cell, Edge, HexSide, boundary};
pub use ids::{CreatureId, PartId, PartTarget};
pub use world::{CreatureView, Faction, PartView, Stat, Terrain, Tile};
