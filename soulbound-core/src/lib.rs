//! # Soulbound Core Library
//!
//! Turn-based narrative RPG engine built around a corruption-driven agency
//! handoff: a character spends a "soul" resource on magic, and as it
//! depletes, control progressively transfers from the player to an
//! autonomous corruption controller.
//!
//! The moving parts, leaves first:
//!
//! - **Resource model** — soul/sanity percentages and the derived
//!   [`CorruptionStage`], always recomputed, never hand-set
//! - **Corruption policy** — per-stage behavior table and the probabilistic
//!   takeover check
//! - **Scenario catalog & selector** — data-only templates with a tagged
//!   condition language, filtered and instantiated per character
//! - **Choice pipeline** — the transactional core: costs, time,
//!   relationships, achievements, next scenario, audit record
//! - **Autonomous agent** — what the corruption does once the soul is gone
//! - **Ending evaluator** — terminal checks and the scored ending catalog
//!
//! Everything is synchronous and side-effect free; randomness is injected.
//! The external narrative generator lives in the companion `soulbound-llm`
//! crate and is strictly optional — this crate alone plays a full game.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod achievements;
pub mod agent;
pub mod catalog;
pub mod character;
pub mod config;
pub mod content;
pub mod corruption;
pub mod endings;
pub mod error;
pub mod inheritance;
pub mod magic;
pub mod pipeline;
pub mod scenario;
pub mod selector;
pub mod session;
pub mod state;
pub mod types;

pub use achievements::{Achievement, AchievementCatalog};
pub use agent::{generate_action, AgentAction};
pub use catalog::{Condition, ScenarioCatalog, ScenarioTemplate};
pub use character::{Attributes, Character, Dragonet, Relationship};
pub use config::GameConfig;
pub use corruption::{behavior_for, should_seize_control, soul_stage, StageBehavior};
pub use endings::{check_game_over, determine_ending, Ending, EndingCatalog, GameOverReason};
pub use error::{EngineError, Result};
pub use pipeline::{process_choice, TurnOutcome};
pub use scenario::{Choice, Scenario};
pub use selector::select_scenario;
pub use session::{SessionRecord, SessionStore};
pub use state::{GameData, GameEvent};
pub use types::*;
