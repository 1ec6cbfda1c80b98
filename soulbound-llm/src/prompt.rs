//! Prompt templates for scenario generation.
//!
//! Templates use `{key}` placeholders filled by [`fill`]. In production
//! these would be loaded from TOML files; this module provides the default
//! built-in templates.

use soulbound_core::character::Character;
use soulbound_core::state::GameData;

/// System prompt: the narrator persona and the output contract.
pub const SCENARIO_SYSTEM: &str = r#"You are the narrator of a dark dragon fantasy.
The player's character is {name}, a {tribe} dragon.
Their soul is at {soul}% and their mind at {sanity}% — weave that state into the tone.

RULES:
- Write one scene the character walks into, not a summary.
- Offer 2 to 4 distinct choices with real consequences.
- soul_cost applies only to animus magic; keep it within 0-10.
- sanity_cost reflects psychological weight; keep it within 0-5.
- Mark a choice "corrupting": true only if it is genuinely cruel.
- Your response must be a single valid JSON object."#;

/// User prompt: the concrete game context.
pub const SCENARIO_USER: &str = r#"Current location: {location}
Turn: {turn}
Season: {season}
Recent events:
{recent_events}

Write the next scene. Return JSON:
{{"title": "...", "description": "...", "narrative": ["paragraph", ...], "choices": [{{"id": "...", "text": "...", "description": "...", "soul_cost": <0-10>, "sanity_cost": <0-5>, "consequences": ["tag", ...], "corrupting": <bool>}}]}}"#;

/// Replace every `{key}` placeholder with its value. Unknown placeholders
/// are left in place so a malformed template is visible in logs.
#[must_use]
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

/// Build the (system, user) prompt pair for the next-scenario request.
#[must_use]
pub fn scenario_prompts(character: &Character, game: &GameData) -> (String, String) {
    let recent_events = if game.history.is_empty() {
        "The story has just begun.".to_string()
    } else {
        game.history
            .iter()
            .rev()
            .take(3)
            .map(|e| format!("- turn {}: chose '{}'", e.turn, e.choice_id))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let system = fill(
        SCENARIO_SYSTEM,
        &[
            ("name", character.name.clone()),
            ("tribe", character.tribe.to_string()),
            ("soul", format!("{:.0}", character.soul)),
            ("sanity", format!("{:.0}", character.sanity)),
        ],
    );
    let user = fill(
        SCENARIO_USER,
        &[
            ("location", game.location.clone()),
            ("turn", game.turn.to_string()),
            ("season", character.season.to_string()),
            ("recent_events", recent_events),
        ],
    );
    (system, user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soulbound_core::types::Tribe;

    #[test]
    fn fill_replaces_known_keys() {
        let out = fill("Hello {name}, turn {turn}", &[
            ("name", "Cinder".to_string()),
            ("turn", "7".to_string()),
        ]);
        assert_eq!(out, "Hello Cinder, turn 7");
    }

    #[test]
    fn fill_leaves_unknown_keys_visible() {
        let out = fill("Hello {mystery}", &[("name", "Cinder".to_string())]);
        assert_eq!(out, "Hello {mystery}");
    }

    #[test]
    fn scenario_prompts_carry_the_game_context() {
        let mut character = Character::new("Cinder", Tribe::Emberwing, true);
        character.set_soul(42.0);
        let game = GameData::new("The Glass Caldera");

        let (system, user) = scenario_prompts(&character, &game);
        assert!(system.contains("Cinder"));
        assert!(system.contains("42%"));
        assert!(user.contains("The Glass Caldera"));
        assert!(user.contains("The story has just begun."));
        // The JSON contract example must survive templating intact.
        assert!(user.contains(r#""soul_cost": <0-10>"#));
    }
}
