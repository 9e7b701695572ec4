//! Persona Engine: trait-driven personality interpretation for characters.
//!
//! Turns a numeric trait vector into behavior guidance, picks speech that
//! fits the character, and lets prioritized triggers shift the traits as a
//! conversation unfolds. Everything is rule-based and deterministic.

pub mod catalog;
pub mod config;
pub mod core;
pub mod schema;

pub use crate::config::EngineConfig;
pub use crate::core::engine::{EngineError, PersonalityEngine};
pub use crate::core::session::{PersonaSession, TurnOutcome};
pub use crate::schema::behavior::{BehaviorSet, Mode};
pub use crate::schema::traits::TraitVector;
