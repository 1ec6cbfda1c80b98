//! Per-session game state and the append-only audit trail.

use serde::{Deserialize, Serialize};

use crate::scenario::Scenario;

/// The complete audit record of one resolved turn. Immutable once appended
/// to [`GameData::history`]; enables replay and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Turn the choice was processed on.
    pub turn: u64,
    /// Scenario the choice belonged to.
    pub scenario_id: String,
    /// The chosen option.
    pub choice_id: String,
    /// Consequence tags from the original choice.
    pub consequences: Vec<String>,
    /// Actual soul lost this turn (after jitter).
    pub soul_loss: f32,
    /// Actual sanity lost this turn (after jitter).
    pub sanity_loss: f32,
}

/// Everything about the run that is not the character: the clock, the
/// current scene, the audit trail, and ancillary world trackers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameData {
    /// Monotonic turn counter. Source of all "how long has this run
    /// lasted" logic.
    pub turn: u64,
    /// Where the character currently is.
    pub location: String,
    /// The only scenario the player may currently act on.
    pub current_scenario: Option<Scenario>,
    /// Append-only event log. Never shrinks; events are never edited.
    pub history: Vec<GameEvent>,
    /// Standing among the tribes.
    pub reputation: i32,
    /// Carried items.
    pub inventory: Vec<String>,
    /// Notable political developments.
    pub political_log: Vec<String>,
    /// Notable war developments.
    pub war_log: Vec<String>,
    /// Places visited.
    pub explored: Vec<String>,
}

impl GameData {
    /// Create game data for a fresh run starting at `location`.
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            turn: 0,
            explored: vec![location.clone()],
            location,
            current_scenario: None,
            history: Vec::new(),
            reputation: 0,
            inventory: Vec::new(),
            political_log: Vec::new(),
            war_log: Vec::new(),
        }
    }
}
