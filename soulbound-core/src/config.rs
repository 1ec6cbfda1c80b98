//! Configuration for the Soulbound engine.
//!
//! Maps directly to `soulbound.toml`. Every tunable the pipeline, selector,
//! and agent consult lives here; corruption stage thresholds are fixed game
//! rules and deliberately not configurable.

use serde::{Deserialize, Serialize};

/// Top-level game configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Turn/season/age progression.
    #[serde(default)]
    pub timeline: TimelineConfig,
    /// Corruption-driven behavior tuning.
    #[serde(default)]
    pub corruption: CorruptionConfig,
    /// Relationship bounds and mating gates.
    #[serde(default)]
    pub relationships: RelationshipConfig,
    /// Bounds enforced on externally generated content.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl GameConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::EngineError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Turn, season, and age progression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Turns per season; the season rolls over when `turn` is a multiple.
    #[serde(default = "default_10_u64")]
    pub season_length_turns: u64,
    /// Age at which the run ends regardless of soul or sanity.
    #[serde(default = "default_150")]
    pub max_age: u32,
    /// Chance per turn that the character wanders to a new location.
    #[serde(default = "default_0_15")]
    pub relocation_chance: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            season_length_turns: 10,
            max_age: 150,
            relocation_chance: 0.15,
        }
    }
}

/// Corruption-driven tuning. Stage probabilities live in the fixed
/// behavior table ([`crate::corruption::behavior_for`]); these values tune
/// how corruption colors scenario selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorruptionConfig {
    /// Below this soul percentage, scenario selection biases toward
    /// templates containing corrupting choices.
    #[serde(default = "default_40_0")]
    pub dark_bias_threshold: f32,
    /// Below this soul percentage, corrupting choices are presented as
    /// intrusive thoughts (cosmetic prefix only).
    #[serde(default = "default_30_0")]
    pub intrusive_thought_threshold: f32,
}

impl Default for CorruptionConfig {
    fn default() -> Self {
        Self {
            dark_bias_threshold: 40.0,
            intrusive_thought_threshold: 30.0,
        }
    }
}

/// Relationship strength band and mating gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationshipConfig {
    /// Lower clamp on relationship strength.
    #[serde(default = "default_neg_100")]
    pub strength_min: i32,
    /// Upper clamp on relationship strength.
    #[serde(default = "default_100")]
    pub strength_max: i32,
    /// Chance a newly accepted romance escalates straight to mate.
    #[serde(default = "default_0_4")]
    pub mate_escalation_chance: f64,
    /// Chance a fresh mate bond immediately produces a dragonet.
    #[serde(default = "default_0_4")]
    pub dragonet_on_mate_chance: f64,
    /// Minimum relationship strength to attempt mating explicitly.
    #[serde(default = "default_60")]
    pub mating_min_strength: i32,
    /// Minimum character age to attempt mating explicitly.
    #[serde(default = "default_8")]
    pub mating_min_age: u32,
    /// Success chance of an explicit mating attempt.
    #[serde(default = "default_0_7")]
    pub mating_success_chance: f64,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self {
            strength_min: -100,
            strength_max: 100,
            mate_escalation_chance: 0.4,
            dragonet_on_mate_chance: 0.4,
            mating_min_strength: 60,
            mating_min_age: 8,
            mating_success_chance: 0.7,
        }
    }
}

/// Hard bounds applied to content arriving from the external generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Maximum choices kept from a generated scenario.
    #[serde(default = "default_4")]
    pub max_choices: usize,
    /// Soul cost clamp ceiling for generated choices.
    #[serde(default = "default_10_0")]
    pub soul_cost_max: f32,
    /// Sanity cost clamp ceiling for generated choices.
    #[serde(default = "default_5_0")]
    pub sanity_cost_max: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_choices: 4,
            soul_cost_max: 10.0,
            sanity_cost_max: 5.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_10_u64() -> u64 { 10 }
fn default_150() -> u32 { 150 }
fn default_0_15() -> f64 { 0.15 }
fn default_40_0() -> f32 { 40.0 }
fn default_30_0() -> f32 { 30.0 }
fn default_neg_100() -> i32 { -100 }
fn default_100() -> i32 { 100 }
fn default_0_4() -> f64 { 0.4 }
fn default_60() -> i32 { 60 }
fn default_8() -> u32 { 8 }
fn default_0_7() -> f64 { 0.7 }
fn default_4() -> usize { 4 }
fn default_10_0() -> f32 { 10.0 }
fn default_5_0() -> f32 { 5.0 }
