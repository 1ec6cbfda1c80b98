//! The choice-processing pipeline.
//!
//! One call of [`process_choice`] resolves one turn: resource costs,
//! time progression, relationship effects, achievements, next-scenario
//! selection, the audit record, and the corruption takeover check. Inputs
//! are never mutated; callers keep the previous state for undo/compare.
//!
//! The pipeline does not fail on well-formed input. A choice submitted
//! against a stale scenario is a caller contract violation and trips a
//! debug assertion rather than a recoverable error.

use rand::Rng;
use tracing::{debug, error, warn};

use crate::achievements::{self, AchievementCatalog};
use crate::catalog::ScenarioCatalog;
use crate::character::{Character, CORRUPTED_TRAIT};
use crate::config::GameConfig;
use crate::content::{random_flavor, random_name, FlavorCategory};
use crate::corruption::{behavior_for, should_seize_control};
use crate::inheritance::make_dragonet;
use crate::scenario::{
    Choice, Scenario, TAG_ACCEPT, TAG_ITEM_PREFIX, TAG_MAKE_FRIEND, TAG_MAKE_RIVAL,
};
use crate::selector::select_scenario;
use crate::state::{GameData, GameEvent};
use crate::types::{CorruptionStage, RelationshipKind, ScenarioCategory, Season, Tribe};

/// The result of one resolved turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Post-turn character.
    pub character: Character,
    /// Post-turn game state, with the next scenario installed.
    pub game: GameData,
    /// The audit record appended to history this turn.
    pub event: GameEvent,
}

/// Process one choice and produce the next state.
///
/// Side-effect free beyond the returned value: no I/O, no globals. All
/// randomness comes from the injected `rng`.
#[allow(clippy::too_many_arguments)]
pub fn process_choice<R: Rng>(
    scenarios: &ScenarioCatalog,
    achievements_catalog: &AchievementCatalog,
    config: &GameConfig,
    character: &Character,
    game: &GameData,
    choice: &Choice,
    scenario: &Scenario,
    rng: &mut R,
) -> TurnOutcome {
    // Caller contract: the choice must belong to the current scenario.
    if let Some(current) = &game.current_scenario {
        if current.id != scenario.id {
            error!(
                submitted = %scenario.id,
                current = %current.id,
                "choice submitted against a stale scenario"
            );
            debug_assert!(false, "choice submitted against a stale scenario");
        }
    }

    let mut character = character.clone();
    let mut game = game.clone();

    // 1. Soul cost with ±1 jitter, floored at 1 so a nonzero cost never
    //    rounds away. Stage recomputes inside set_soul.
    let soul_loss = if choice.soul_cost > 0.0 {
        let jitter = rng.gen_range(-1..=1) as f32;
        let loss = (choice.soul_cost + jitter).max(1.0);
        character.spend_soul(loss);
        loss
    } else {
        0.0
    };

    // 2. Sanity cost with non-negative jitter.
    let sanity_loss = if choice.sanity_cost != 0.0 {
        let jitter = rng.gen_range(0..=1) as f32;
        let loss = choice.sanity_cost + jitter;
        character.adjust_sanity(-loss);
        loss
    } else {
        0.0
    };

    // 3. Time progression.
    let next_turn = game.turn + 1;
    if next_turn % config.timeline.season_length_turns == 0 {
        character.season = character.season.next();
        if character.season == Season::Spring {
            character.age += 1;
            character.years_survived += 1;
        }
    }

    // 4. Relationship effects, driven by the scenario category and the
    //    choice's consequence tags.
    apply_relationship_effects(&mut character, config, choice, scenario, rng);
    if choice.corrupting {
        decay_relationships(&mut character, config, rng);
        if character.stage == CorruptionStage::Broken {
            character.add_trait(CORRUPTED_TRAIT);
        }
    }

    apply_world_effects(&mut game, choice, scenario);

    // 5. Achievements — full re-evaluation, idempotent.
    let unlocked = achievements::evaluate(achievements_catalog, &mut character, &game);
    if !unlocked.is_empty() {
        debug!(?unlocked, "achievements unlocked");
    }

    // 6. Next scenario. The generator adapter, when present, replaces this
    //    selection; the selector's output is always valid on its own.
    if rng.gen_bool(config.timeline.relocation_chance) {
        let destination = random_flavor(FlavorCategory::Location, rng);
        if destination != game.location {
            game.location = destination.clone();
            if !game.explored.contains(&destination) {
                game.explored.push(destination);
            }
        }
    }
    game.current_scenario = Some(select_scenario(scenarios, config, &character, &game, rng));

    // 7. Audit record from the pre-mutation choice/scenario, then advance
    //    the clock.
    let event = GameEvent {
        turn: game.turn,
        scenario_id: scenario.id.clone(),
        choice_id: choice.id.clone(),
        consequences: choice.consequences.clone(),
        soul_loss,
        sanity_loss,
    };
    game.history.push(event.clone());
    game.turn = next_turn;

    // 8. Takeover check. Latches only; never unset here.
    if !character.is_ai_controlled && should_seize_control(&character, rng) {
        warn!(stage = %character.stage, "corruption has seized control");
        character.is_ai_controlled = true;
    }

    TurnOutcome {
        character,
        game,
        event,
    }
}

/// Category-driven relationship creation and escalation.
fn apply_relationship_effects<R: Rng>(
    character: &mut Character,
    config: &GameConfig,
    choice: &Choice,
    scenario: &Scenario,
    rng: &mut R,
) {
    let has_tag = |tag: &str| choice.consequences.iter().any(|c| c == tag);

    match scenario.category {
        ScenarioCategory::Romance if has_tag(TAG_ACCEPT) => {
            let partner_tribe = Tribe::ALL[rng.gen_range(0..Tribe::ALL.len())];
            let partner = random_name(partner_tribe, rng);
            let rel = character.relationship_entry(&partner);
            rel.kind = RelationshipKind::Romantic;
            rel.adjust_strength(
                50,
                config.relationships.strength_min,
                config.relationships.strength_max,
            );
            rel.note("A romance kindled");

            if rng.gen_bool(config.relationships.mate_escalation_chance) {
                let rel = character.relationship_entry(&partner);
                rel.kind = RelationshipKind::Mate;
                rel.note("Became mates");
                character.mate = Some(partner.clone());

                if rng.gen_bool(config.relationships.dragonet_on_mate_chance) {
                    let dragonet = make_dragonet(character, partner_tribe, false, rng);
                    character.dragonets.push(dragonet);
                }
            }
        }
        ScenarioCategory::Social if has_tag(TAG_MAKE_FRIEND) => {
            let tribe = Tribe::ALL[rng.gen_range(0..Tribe::ALL.len())];
            let name = random_name(tribe, rng);
            let rel = character.relationship_entry(&name);
            rel.kind = RelationshipKind::Friend;
            rel.adjust_strength(
                30,
                config.relationships.strength_min,
                config.relationships.strength_max,
            );
            rel.note("Met at a gathering");
        }
        ScenarioCategory::War | ScenarioCategory::Political if has_tag(TAG_MAKE_RIVAL) => {
            let tribe = Tribe::ALL[rng.gen_range(0..Tribe::ALL.len())];
            let name = random_name(tribe, rng);
            let rel = character.relationship_entry(&name);
            rel.kind = RelationshipKind::Rival;
            rel.adjust_strength(
                -30,
                config.relationships.strength_min,
                config.relationships.strength_max,
            );
            rel.note("Crossed on the battlefield");
        }
        ScenarioCategory::Mundane
        | ScenarioCategory::Social
        | ScenarioCategory::Romance
        | ScenarioCategory::Tribal
        | ScenarioCategory::War
        | ScenarioCategory::Political
        | ScenarioCategory::Magical
        | ScenarioCategory::Prophetic
        | ScenarioCategory::Extraordinary => {}
    }
}

/// World-state bookkeeping from consequence tags and the scenario category.
fn apply_world_effects(game: &mut GameData, choice: &Choice, scenario: &Scenario) {
    for tag in &choice.consequences {
        if let Some(item) = tag.strip_prefix(TAG_ITEM_PREFIX) {
            game.inventory.push(item.to_string());
        }
    }

    match scenario.category {
        ScenarioCategory::War => {
            game.war_log
                .push(format!("{}: {}", scenario.title, choice.text));
        }
        ScenarioCategory::Political => {
            game.political_log
                .push(format!("{}: {}", scenario.title, choice.text));
        }
        _ => {}
    }

    if choice.corrupting {
        game.reputation -= 1;
    } else if choice
        .consequences
        .iter()
        .any(|c| c == TAG_MAKE_FRIEND || c == TAG_ACCEPT)
    {
        game.reputation += 1;
    }
}

/// The corruption ratchet: a corrupting choice erodes every friendly and
/// romantic bond. Bonds that drop below zero demote, permanently.
fn decay_relationships<R: Rng>(character: &mut Character, config: &GameConfig, rng: &mut R) {
    let penalty = behavior_for(character.stage).relationship_penalty;
    let min = config.relationships.strength_min;
    let max = config.relationships.strength_max;

    for rel in character.relationships.values_mut() {
        if !matches!(
            rel.kind,
            RelationshipKind::Friend | RelationshipKind::Romantic
        ) {
            continue;
        }
        let decay = 1 + penalty + rng.gen_range(0..=2);
        rel.adjust_strength(-decay, min, max);
        if rel.strength < 0 {
            let demoted = match rel.kind {
                RelationshipKind::Romantic => RelationshipKind::ExMate,
                _ => RelationshipKind::Neutral,
            };
            rel.kind = demoted;
            rel.note("They no longer recognize the dragon you have become");
        }
    }
}
