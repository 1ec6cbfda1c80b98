//! The autonomous agent: what the corruption does with a stolen body.
//!
//! Dormancy is a hard gate, stricter than the takeover latch itself: the
//! latch may set early (a warning period), but the agent only acts once
//! the soul is fully spent. Until then it always yields to the player.

use rand::Rng;
use tracing::debug;

use crate::character::Character;
use crate::scenario::Choice;
use crate::state::GameData;

/// One action the agent takes on the character's behalf.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentAction {
    /// Pick one of the current scenario's choices.
    SelectChoice(Choice),
    /// Cast a pre-authored dark spell.
    CastSpell {
        /// Spell name.
        name: String,
        /// What the spell visibly does.
        description: String,
    },
    /// A freeform dark act with no mechanical cost.
    Freeform(String),
    /// Turn one of the character's own powers to a cruel use.
    MisusePower {
        /// The power being twisted.
        power: String,
        /// How it is misused.
        description: String,
    },
}

/// Pre-authored dark spells, available to any animus body.
const DARK_SPELLS: &[(&str, &str)] = &[
    (
        "Withering Word",
        "Every plant within a wingbeat curls black and dies.",
    ),
    (
        "Borrowed Voice",
        "A nearby dragon speaks words they never chose.",
    ),
    (
        "Hollow Lullaby",
        "Sleepers nearby dream of drowning and cannot wake.",
    ),
    (
        "Rustfeast",
        "Iron tools and weapons in the settlement crumble to powder.",
    ),
];

/// Pre-authored freeform dark acts.
const DARK_ACTS: &[&str] = &[
    "Smiles at a stranger a moment too long, memorizing their scent.",
    "Leaves a carefully arranged circle of bones outside a neighbor's den.",
    "Whispers a true secret to exactly the wrong dragon.",
    "Stands motionless in the rain all night, watching a lit window.",
];

/// Generate the agent's action for this turn, if it acts at all.
///
/// Returns `None` while dormant (latch unset, or soul not yet spent), and
/// `None` when the weighted category lands on content this character does
/// not possess.
pub fn generate_action<R: Rng>(
    character: &Character,
    game: &GameData,
    rng: &mut R,
) -> Option<AgentAction> {
    if !character.is_ai_controlled || character.soul > 0.0 {
        return None;
    }

    // Weighted category roll: choice 40%, spell 25%, freeform 20%,
    // tribal power 10%, special power 5%.
    let roll = rng.gen_range(0.0..1.0);
    let action = if roll < 0.40 {
        select_choice(game, rng)
    } else if roll < 0.65 {
        cast_spell(character, rng)
    } else if roll < 0.85 {
        let act = DARK_ACTS[rng.gen_range(0..DARK_ACTS.len())];
        Some(AgentAction::Freeform(act.to_string()))
    } else if roll < 0.95 {
        misuse_power(&tribal_powers(character), rng)
    } else {
        misuse_power(&character.special_powers, rng)
    };

    if let Some(action) = &action {
        debug!(?action, "agent acting for the character");
    }
    action
}

/// The evil autopilot's choice preference, in strict order: a corrupting
/// choice, then a soul-costing choice, then anything.
fn select_choice<R: Rng>(game: &GameData, rng: &mut R) -> Option<AgentAction> {
    let scenario = game.current_scenario.as_ref()?;
    let choices = &scenario.choices;
    if choices.is_empty() {
        return None;
    }

    let corrupting: Vec<&Choice> = choices.iter().filter(|c| c.corrupting).collect();
    if !corrupting.is_empty() {
        return Some(AgentAction::SelectChoice(
            corrupting[rng.gen_range(0..corrupting.len())].clone(),
        ));
    }

    let costly: Vec<&Choice> = choices.iter().filter(|c| c.soul_cost > 0.0).collect();
    if !costly.is_empty() {
        return Some(AgentAction::SelectChoice(
            costly[rng.gen_range(0..costly.len())].clone(),
        ));
    }

    Some(AgentAction::SelectChoice(
        choices[rng.gen_range(0..choices.len())].clone(),
    ))
}

fn cast_spell<R: Rng>(character: &Character, rng: &mut R) -> Option<AgentAction> {
    if !character.is_animus {
        return None;
    }
    let (name, description) = DARK_SPELLS[rng.gen_range(0..DARK_SPELLS.len())];
    Some(AgentAction::CastSpell {
        name: name.to_string(),
        description: description.to_string(),
    })
}

fn tribal_powers(character: &Character) -> Vec<String> {
    character
        .tribe
        .powers()
        .iter()
        .map(|p| (*p).to_string())
        .collect()
}

fn misuse_power<R: Rng>(powers: &[String], rng: &mut R) -> Option<AgentAction> {
    if powers.is_empty() {
        return None;
    }
    let power = powers[rng.gen_range(0..powers.len())].clone();
    let description = format!("Turns {power} against a dragon who trusted them.");
    Some(AgentAction::MisusePower { power, description })
}
