//! Runtime scenarios and choices.
//!
//! A [`Scenario`] is generated fresh each turn and never mutated after
//! creation; its content survives only in the [`crate::state::GameEvent`]
//! audit record once the turn resolves.

use serde::{Deserialize, Serialize};

use crate::types::{ScenarioCategory, TimeOfDay, Weather};

/// Consequence tag on a choice that marks it as accepting a romantic
/// advance. The pipeline interprets it only on `Romance` scenarios.
pub const TAG_ACCEPT: &str = "accept";
/// Consequence tag that may create a friend on social outcomes.
pub const TAG_MAKE_FRIEND: &str = "make_friend";
/// Consequence tag that may create a rival on war/political outcomes.
pub const TAG_MAKE_RIVAL: &str = "make_rival";
/// Placeholder consequence used when a generated choice carried none.
pub const TAG_STORY_CONTINUES: &str = "story_continues";
/// Prefix for consequence tags that add the named item to the inventory,
/// e.g. `item:fresh kill`.
pub const TAG_ITEM_PREFIX: &str = "item:";

/// One selectable action within a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Stable id within the scenario.
    pub id: String,
    /// The text shown on the choice itself.
    pub text: String,
    /// Longer description of what the choice entails.
    pub description: String,
    /// Soul cost ≥ 0. Only animus magic carries a nonzero cost.
    pub soul_cost: f32,
    /// Sanity cost. The built-in catalog only uses ≥ 0; negative values
    /// ("healing") are permitted by the engine.
    pub sanity_cost: f32,
    /// Opaque consequence tags interpreted by the pipeline.
    pub consequences: Vec<String>,
    /// Marks this choice as morally dark. Drives the agent's preference
    /// ordering and the selector's dark bias.
    pub corrupting: bool,
}

impl Choice {
    /// Create a plain, cost-free choice.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            description: text.clone(),
            text,
            soul_cost: 0.0,
            sanity_cost: 0.0,
            consequences: vec![TAG_STORY_CONTINUES.to_string()],
            corrupting: false,
        }
    }
}

/// One turn's narrative situation plus its menu of choices.
///
/// Invariant: `choices` always holds 2–4 entries; the selector and the
/// generator adapter both guarantee it before a scenario reaches the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique per invocation: template id plus a fresh suffix.
    pub id: String,
    /// Closed category tag consumed by the pipeline's relationship effects.
    pub category: ScenarioCategory,
    /// Short title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Ordered narrative paragraphs.
    pub narrative: Vec<String>,
    /// The menu of choices (2–4 after filtering/validation).
    pub choices: Vec<Choice>,
    /// Where this scene takes place.
    pub location: String,
    /// Time-of-day flavor.
    pub time_of_day: TimeOfDay,
    /// Weather flavor.
    pub weather: Weather,
}

/// The built-in fallback choice pair, substituted whenever filtering or
/// generator validation would otherwise leave a scenario under-populated.
#[must_use]
pub fn fallback_choices() -> Vec<Choice> {
    vec![
        Choice {
            id: "fallback_act".to_string(),
            text: "Take action".to_string(),
            description: "Trust your instincts and act.".to_string(),
            soul_cost: 0.0,
            sanity_cost: 0.0,
            consequences: vec![TAG_STORY_CONTINUES.to_string()],
            corrupting: false,
        },
        Choice {
            id: "fallback_wait".to_string(),
            text: "Wait and observe".to_string(),
            description: "Hold back and watch how events unfold.".to_string(),
            soul_cost: 0.0,
            sanity_cost: 0.0,
            consequences: vec![TAG_STORY_CONTINUES.to_string()],
            corrupting: false,
        },
    ]
}
