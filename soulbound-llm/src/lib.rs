//! # soulbound-llm — Narrative Generator Adapter for Soulbound
//!
//! Wraps an unreliable external text generator and guarantees that only
//! well-formed scenarios ever reach the engine:
//!
//! - **Client** — Ollama and OpenAI-compatible backends, with retries,
//!   timeouts, and a `None` provider for offline play
//! - **Adapter** — validation and coercion of untrusted output: choice
//!   count bounds, cost clamping, fallback padding
//! - **Director** — turn orchestration that prefers generated scenes and
//!   silently falls back to `soulbound-core`'s selector on any failure
//!
//! Generator failures are never surfaced to the player; the worst case is
//! a catalog scene instead of a generated one.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod client;
pub mod director;
pub mod error;
pub mod prompt;
pub mod types;

pub use adapter::sanitize_scenario;
pub use client::{GenClient, GenProvider};
pub use director::Director;
pub use error::GenError;
pub use types::{GenRequest, GenResponse, RawChoice, RawScenario};
