//! Validation and coercion of untrusted generated scenarios.
//!
//! Generated content is the single largest source of invalid-state risk in
//! the whole system. Every other component may assume scenarios are
//! well-formed precisely because this module enforces it at the boundary:
//! nothing the generator says reaches a player unclamped.

use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use soulbound_core::config::GeneratorConfig;
use soulbound_core::scenario::{fallback_choices, Choice, Scenario, TAG_STORY_CONTINUES};
use soulbound_core::state::GameData;
use soulbound_core::types::{ScenarioCategory, TimeOfDay, Weather};

use crate::types::{RawChoice, RawScenario};

/// Fewest choices a scenario may reach the player with.
const MIN_CHOICES: usize = 2;

/// Parse and sanitize raw generator text into a valid [`Scenario`].
///
/// Returns `None` when the text is not well-formed structured data, in
/// which case the caller uses the built-in selector instead. A `Some`
/// result always satisfies the engine's scenario invariants: 2–4 choices,
/// every choice with non-empty text and in-band costs.
pub fn sanitize_scenario<R: Rng>(
    raw_text: &str,
    config: &GeneratorConfig,
    game: &GameData,
    rng: &mut R,
) -> Option<Scenario> {
    let raw: RawScenario = match serde_json::from_str(raw_text) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("generator output was not valid JSON: {e}");
            return None;
        }
    };

    let mut choices: Vec<Choice> = raw
        .choices
        .iter()
        .take(config.max_choices)
        .enumerate()
        .filter_map(|(i, raw)| sanitize_choice(raw, i, config))
        .collect();

    let dropped = raw.choices.len().min(config.max_choices) - choices.len();
    if dropped > 0 {
        debug!(dropped, "dropped generated choices without text");
    }

    // Pad with the built-in fallback pair until the floor holds.
    let mut fallbacks = fallback_choices().into_iter();
    while choices.len() < MIN_CHOICES {
        match fallbacks.next() {
            Some(fallback) => choices.push(fallback),
            None => break,
        }
    }
    if choices.len() < MIN_CHOICES {
        // Both fallbacks already consumed and still thin; unreachable with
        // the two-entry pair, but never hand out a thin scenario.
        return None;
    }

    Some(Scenario {
        id: format!("generated-{}", Uuid::new_v4().simple()),
        category: parse_category(raw.category.as_deref()),
        title: raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "A Strange Turn".to_string()),
        description: raw
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| "The story takes an unexpected direction.".to_string()),
        narrative: raw
            .narrative
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect(),
        choices,
        location: game.location.clone(),
        time_of_day: TimeOfDay::ALL[rng.gen_range(0..TimeOfDay::ALL.len())],
        weather: Weather::ALL[rng.gen_range(0..Weather::ALL.len())],
    })
}

/// Coerce one raw choice. Choices without text are dropped, not defaulted.
fn sanitize_choice(raw: &RawChoice, index: usize, config: &GeneratorConfig) -> Option<Choice> {
    let text = raw.text.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    let text = text.to_string();

    let description = raw
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map_or_else(|| text.clone(), ToString::to_string);

    let consequences = if raw.consequences.is_empty() {
        vec![TAG_STORY_CONTINUES.to_string()]
    } else {
        raw.consequences.clone()
    };

    Some(Choice {
        id: raw
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("gen_choice_{index}")),
        text,
        description,
        soul_cost: raw.soul_cost.unwrap_or(0.0).clamp(0.0, config.soul_cost_max),
        sanity_cost: raw
            .sanity_cost
            .unwrap_or(0.0)
            .clamp(0.0, config.sanity_cost_max),
        consequences,
        corrupting: raw.corrupting,
    })
}

/// Map the generator's claimed category onto the closed tag set.
fn parse_category(claimed: Option<&str>) -> ScenarioCategory {
    match claimed.map(str::to_ascii_lowercase).as_deref() {
        Some("social") => ScenarioCategory::Social,
        Some("romance") => ScenarioCategory::Romance,
        Some("tribal") => ScenarioCategory::Tribal,
        Some("war") => ScenarioCategory::War,
        Some("political") => ScenarioCategory::Political,
        Some("magical") => ScenarioCategory::Magical,
        Some("prophetic") => ScenarioCategory::Prophetic,
        Some("extraordinary") => ScenarioCategory::Extraordinary,
        _ => ScenarioCategory::Mundane,
    }
}
