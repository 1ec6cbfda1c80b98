//! Property-based tests for the Soulbound engine.
//!
//! Uses `proptest` to verify the engine's structural invariants under
//! random inputs: resource clamping, stage consistency, the append-only
//! audit log, and scenario validity for arbitrary characters.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use soulbound_core::catalog::ScenarioCatalog;
use soulbound_core::character::{Character, Relationship};
use soulbound_core::config::GameConfig;
use soulbound_core::corruption::soul_stage;
use soulbound_core::magic::{estimate_soul_cost, SpellType};
use soulbound_core::pipeline::process_choice;
use soulbound_core::scenario::Choice;
use soulbound_core::selector::select_scenario;
use soulbound_core::state::GameData;
use soulbound_core::types::{CorruptionStage, RelationshipKind, Tribe};
use soulbound_core::AchievementCatalog;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_tribe() -> impl Strategy<Value = Tribe> {
    prop::sample::select(Tribe::ALL.to_vec())
}

fn arb_character() -> impl Strategy<Value = Character> {
    (
        arb_tribe(),
        any::<bool>(),
        0.0..=100.0f32,
        0.0..=100.0f32,
        6..120u32,
    )
        .prop_map(|(tribe, is_animus, soul, sanity, age)| {
            let mut c = Character::new("Prop", tribe, is_animus);
            c.set_soul(soul);
            c.adjust_sanity(sanity - 100.0);
            c.age = age;
            c
        })
}

/// A random but well-formed cost pair for a choice.
fn arb_costs() -> impl Strategy<Value = (f32, f32)> {
    (0.0..=15.0f32, 0.0..=8.0f32)
}

fn costed_choice(soul_cost: f32, sanity_cost: f32) -> Choice {
    let mut c = Choice::new("prop_choice", "A property-generated choice");
    c.soul_cost = soul_cost;
    c.sanity_cost = sanity_cost;
    c
}

/// Run `steps` pipeline turns, returning the final state.
fn run_turns(
    character: Character,
    costs: &[(f32, f32)],
    seed: u64,
) -> (Character, GameData) {
    let scenarios = ScenarioCatalog::builtin();
    let achievements = AchievementCatalog::builtin();
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut character = character;
    let mut game = GameData::new("Ashfall Peaks");
    game.current_scenario = Some(select_scenario(
        &scenarios, &config, &character, &game, &mut rng,
    ));

    for &(soul_cost, sanity_cost) in costs {
        let scenario = game
            .current_scenario
            .clone()
            .expect("pipeline always installs a next scenario");
        let choice = costed_choice(soul_cost, sanity_cost);
        let out = process_choice(
            &scenarios,
            &achievements,
            &config,
            &character,
            &game,
            &choice,
            &scenario,
            &mut rng,
        );
        character = out.character;
        game = out.game;
    }
    (character, game)
}

// ---------------------------------------------------------------------------
// Property: soul and sanity are clamped after every pipeline step
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn resources_always_clamped(
        costs in prop::collection::vec(arb_costs(), 1..30),
        seed in any::<u64>(),
    ) {
        let scenarios = ScenarioCatalog::builtin();
        let achievements = AchievementCatalog::builtin();
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);

        let mut character = Character::new("Prop", Tribe::Emberwing, true);
        let mut game = GameData::new("Ashfall Peaks");
        game.current_scenario = Some(select_scenario(
            &scenarios, &config, &character, &game, &mut rng,
        ));

        for (soul_cost, sanity_cost) in costs {
            let scenario = game.current_scenario.clone().expect("next scenario");
            let choice = costed_choice(soul_cost, sanity_cost);
            let out = process_choice(
                &scenarios, &achievements, &config,
                &character, &game, &choice, &scenario, &mut rng,
            );
            character = out.character;
            game = out.game;

            prop_assert!((0.0..=100.0).contains(&character.soul));
            prop_assert!((0.0..=100.0).contains(&character.sanity));
        }
    }
}

// ---------------------------------------------------------------------------
// Property: the derived stage is never stale
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn stage_always_matches_soul(
        costs in prop::collection::vec(arb_costs(), 1..30),
        seed in any::<u64>(),
    ) {
        let character = Character::new("Prop", Tribe::Duskwing, true);
        let (character, _) = run_turns(character, &costs, seed);
        prop_assert_eq!(character.stage, soul_stage(character.soul));
    }

    #[test]
    fn stage_thresholds_are_total_and_monotonic(soul in 0.0..=100.0f32) {
        let stage = soul_stage(soul);
        let expected = if soul >= 75.0 {
            CorruptionStage::Normal
        } else if soul >= 50.0 {
            CorruptionStage::Frayed
        } else if soul >= 25.0 {
            CorruptionStage::Twisted
        } else {
            CorruptionStage::Broken
        };
        prop_assert_eq!(stage, expected);
        // Less soul never means less corruption.
        prop_assert!(soul_stage(soul * 0.5) >= stage);
    }
}

// ---------------------------------------------------------------------------
// Property: the audit log is append-only and exact
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn history_grows_by_exactly_one_per_turn(
        costs in prop::collection::vec(arb_costs(), 1..40),
        seed in any::<u64>(),
    ) {
        let n = costs.len();
        let character = Character::new("Prop", Tribe::Tidewing, true);
        let (_, game) = run_turns(character, &costs, seed);
        prop_assert_eq!(game.history.len(), n);
        prop_assert_eq!(game.turn, n as u64);
        for (i, event) in game.history.iter().enumerate() {
            prop_assert_eq!(event.turn, i as u64);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: the selector never hands the player an empty scenario
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn selected_scenarios_are_never_thin(
        character in arb_character(),
        seed in any::<u64>(),
    ) {
        let scenarios = ScenarioCatalog::builtin();
        let config = GameConfig::default();
        let game = GameData::new("Ashfall Peaks");
        let mut rng = StdRng::seed_from_u64(seed);

        let scenario = select_scenario(&scenarios, &config, &character, &game, &mut rng);
        prop_assert!((2..=4).contains(&scenario.choices.len()));
        for choice in &scenario.choices {
            prop_assert!(!choice.text.is_empty());
        }
    }
}

// ---------------------------------------------------------------------------
// Property: relationship strength stays inside the configured band
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn relationship_strength_stays_in_band(
        start in -100..=100i32,
        deltas in prop::collection::vec(-250..=250i32, 1..50),
    ) {
        let mut rel = Relationship::new("Prop", RelationshipKind::Friend, start);
        for delta in deltas {
            rel.adjust_strength(delta, -100, 100);
            prop_assert!((-100..=100).contains(&rel.strength));
        }
    }
}

// ---------------------------------------------------------------------------
// Property: spell cost estimation respects the soul-cost band
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn spell_costs_stay_in_band(
        words in 0..400usize,
        which in 0..4usize,
    ) {
        let description = "word ".repeat(words);
        let spell_type = [
            SpellType::Utility,
            SpellType::Protection,
            SpellType::Offensive,
            SpellType::Forbidden,
        ][which];
        let cost = estimate_soul_cost(&description, spell_type);
        prop_assert!((0.0..=10.0).contains(&cost));
    }
}
