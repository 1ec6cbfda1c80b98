//! Request/response types for the narrative generator, including the raw
//! untrusted shapes the adapter validates.

use serde::{Deserialize, Serialize};

/// A request to the generator.
#[derive(Debug, Clone, Serialize)]
pub struct GenRequest {
    /// System prompt (narrator persona, rules, output contract).
    pub system: String,
    /// User prompt (character and game context).
    pub user: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl GenRequest {
    /// A scenario-generation request with the standard knobs.
    #[must_use]
    pub fn scenario(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            max_tokens: 600,
            temperature: 0.9,
            timeout_ms: 8_000,
        }
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// A raw response from the generator.
#[derive(Debug, Clone, Deserialize)]
pub struct GenResponse {
    /// The generated text, hopefully JSON matching [`RawScenario`].
    pub text: String,
    /// How many tokens were generated.
    pub tokens_generated: u32,
    /// Latency in milliseconds.
    pub latency_ms: u64,
    /// Which model was used.
    pub model: String,
}

// ---------------------------------------------------------------------------
// Untrusted generated shapes
// ---------------------------------------------------------------------------

/// The scenario shape the generator is asked to produce. Every field is
/// optional because the generator cannot be trusted to include any of them;
/// the adapter decides what survives.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScenario {
    /// Scenario title.
    #[serde(default)]
    pub title: Option<String>,
    /// One-line description.
    #[serde(default)]
    pub description: Option<String>,
    /// Narrative paragraphs.
    #[serde(default, alias = "narrative_text")]
    pub narrative: Vec<String>,
    /// Claimed category, mapped onto the engine's closed tag set by the
    /// adapter; unknown values fall back to mundane.
    #[serde(default, alias = "type")]
    pub category: Option<String>,
    /// The generated choices, in whatever state they arrive.
    #[serde(default)]
    pub choices: Vec<RawChoice>,
}

/// One untrusted generated choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChoice {
    /// Choice id, often missing.
    #[serde(default)]
    pub id: Option<String>,
    /// Choice text. Required; choices without it are dropped.
    #[serde(default)]
    pub text: Option<String>,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Claimed soul cost, clamped by the adapter.
    #[serde(default, alias = "soulCost")]
    pub soul_cost: Option<f32>,
    /// Claimed sanity cost, clamped by the adapter.
    #[serde(default, alias = "sanityCost")]
    pub sanity_cost: Option<f32>,
    /// Consequence tags.
    #[serde(default)]
    pub consequences: Vec<String>,
    /// Dark-choice flag.
    #[serde(default, alias = "corruption")]
    pub corrupting: bool,
}
