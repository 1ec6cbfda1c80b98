//! Scenario selection.
//!
//! Turns the static catalog into one concrete [`Scenario`] for the current
//! character and game state: requirement filtering, the dark-content bias
//! under heavy corruption, per-choice filtering with the built-in fallback
//! pair, intrusive-thought marking, and unique id stamping.

use rand::Rng;
use tracing::warn;
use uuid::Uuid;

use crate::catalog::{all_hold, ChoiceTemplate, ScenarioCatalog, ScenarioTemplate};
use crate::character::Character;
use crate::content::{random_flavor, FlavorCategory};
use crate::config::GameConfig;
use crate::scenario::{fallback_choices, Choice, Scenario, TAG_STORY_CONTINUES};
use crate::state::GameData;
use crate::types::{ScenarioCategory, TimeOfDay, Weather};

/// Prefix applied to corrupting choices when the soul is nearly spent.
/// Cosmetic only; the choice's logic is unchanged.
const INTRUSIVE_PREFIX: &str = "(a corrupted thought) ";

/// Select one applicable scenario for this character and game state.
///
/// Never returns a scenario with fewer than two choices: an authored
/// template whose choices all filter out gets the built-in fallback pair
/// instead.
pub fn select_scenario<R: Rng>(
    catalog: &ScenarioCatalog,
    config: &GameConfig,
    character: &Character,
    game: &GameData,
    rng: &mut R,
) -> Scenario {
    let candidates = catalog.applicable(character, game);

    if candidates.is_empty() {
        // Catalog-authoring defect: nothing applies. Synthesize a quiet
        // turn rather than leave the session stuck.
        warn!("no applicable scenario templates; synthesizing a quiet turn");
        return quiet_turn(game, rng);
    }

    // The darker the soul, the darker the world: under the bias threshold,
    // restrict to templates that contain a corrupting choice. Skip the
    // restriction entirely if it would empty the candidate set.
    let candidates = if character.soul < config.corruption.dark_bias_threshold {
        let dark: Vec<&ScenarioTemplate> = candidates
            .iter()
            .copied()
            .filter(|t| t.has_corrupting_choice())
            .collect();
        if dark.is_empty() { candidates } else { dark }
    } else {
        candidates
    };

    let template = candidates[rng.gen_range(0..candidates.len())];
    instantiate(template, config, character, game, rng)
}

/// Render a template into a runtime scenario for this character.
pub(crate) fn instantiate<R: Rng>(
    template: &ScenarioTemplate,
    config: &GameConfig,
    character: &Character,
    game: &GameData,
    rng: &mut R,
) -> Scenario {
    let mut choices: Vec<Choice> = template
        .choices
        .iter()
        .filter(|c| all_hold(&c.requires, character, game))
        .map(render_choice)
        .collect();

    if choices.is_empty() {
        warn!(
            template = %template.id,
            "every choice filtered out; substituting fallback pair"
        );
        choices = fallback_choices();
    }

    if character.soul < config.corruption.intrusive_thought_threshold {
        for choice in choices.iter_mut().filter(|c| c.corrupting) {
            choice.text = format!("{INTRUSIVE_PREFIX}{}", choice.text);
        }
    }

    let mut narrative = template.narrative.clone();
    if template.category == ScenarioCategory::Prophetic {
        narrative.push(format!(
            "An omen hangs over the scene: {}.",
            random_flavor(FlavorCategory::Omen, rng)
        ));
    }

    Scenario {
        id: stamp_id(&template.id),
        category: template.category,
        title: template.title.clone(),
        description: template.description.clone(),
        narrative,
        choices,
        location: game.location.clone(),
        time_of_day: TimeOfDay::ALL[rng.gen_range(0..TimeOfDay::ALL.len())],
        weather: Weather::ALL[rng.gen_range(0..Weather::ALL.len())],
    }
}

/// Unique runtime id: template id plus a fresh suffix.
fn stamp_id(template_id: &str) -> String {
    format!("{template_id}-{}", Uuid::new_v4().simple())
}

fn render_choice(template: &ChoiceTemplate) -> Choice {
    let consequences = if template.consequences.is_empty() {
        vec![TAG_STORY_CONTINUES.to_string()]
    } else {
        template.consequences.clone()
    };
    Choice {
        id: template.id.clone(),
        text: template.text.clone(),
        description: template.description.clone(),
        soul_cost: template.soul_cost,
        sanity_cost: template.sanity_cost,
        consequences,
        corrupting: template.corrupting,
    }
}

/// Minimal synthesized scenario for an empty candidate set.
fn quiet_turn<R: Rng>(game: &GameData, rng: &mut R) -> Scenario {
    Scenario {
        id: stamp_id("quiet_turn"),
        category: ScenarioCategory::Mundane,
        title: "A Quiet Stretch".to_string(),
        description: "Nothing demands your attention, for once.".to_string(),
        narrative: vec![
            "The day passes without incident.".to_string(),
            format!(
                "Word on the wind: {}.",
                random_flavor(FlavorCategory::Rumor, rng)
            ),
        ],
        choices: fallback_choices(),
        location: game.location.clone(),
        time_of_day: TimeOfDay::ALL[rng.gen_range(0..TimeOfDay::ALL.len())],
        weather: Weather::ALL[rng.gen_range(0..Weather::ALL.len())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tribe;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup() -> (ScenarioCatalog, GameConfig, GameData) {
        (
            ScenarioCatalog::builtin(),
            GameConfig::default(),
            GameData::new("Ashfall Peaks"),
        )
    }

    #[test]
    fn always_yields_at_least_two_choices() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(1);

        // Plain, non-animus, full-soul character.
        let character = Character::new("Cinder", Tribe::Emberwing, false);
        for _ in 0..50 {
            let scenario = select_scenario(&catalog, &config, &character, &game, &mut rng);
            assert!(scenario.choices.len() >= 2, "scenario {} too thin", scenario.id);
        }

        // Heavily corrupted character.
        let mut corrupted = Character::new("Cinder", Tribe::Emberwing, true);
        corrupted.set_soul(10.0);
        for _ in 0..50 {
            let scenario = select_scenario(&catalog, &config, &corrupted, &game, &mut rng);
            assert!(scenario.choices.len() >= 2);
        }
    }

    #[test]
    fn dark_bias_restricts_to_corrupting_templates() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(2);
        let mut character = Character::new("Cinder", Tribe::Emberwing, true);
        character.set_soul(35.0);

        for _ in 0..50 {
            let scenario = select_scenario(&catalog, &config, &character, &game, &mut rng);
            assert!(
                scenario.choices.iter().any(|c| c.corrupting),
                "dark bias picked a template without corrupting choices: {}",
                scenario.id
            );
        }
    }

    #[test]
    fn intrusive_prefix_appears_below_threshold() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(3);
        let mut character = Character::new("Cinder", Tribe::Emberwing, true);
        character.set_soul(20.0);

        let mut saw_prefix = false;
        for _ in 0..50 {
            let scenario = select_scenario(&catalog, &config, &character, &game, &mut rng);
            for choice in scenario.choices.iter().filter(|c| c.corrupting) {
                assert!(choice.text.starts_with(INTRUSIVE_PREFIX));
                saw_prefix = true;
            }
        }
        assert!(saw_prefix, "never saw a corrupting choice at soul=20");
    }

    #[test]
    fn no_intrusive_prefix_above_threshold() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(4);
        let character = Character::new("Cinder", Tribe::Emberwing, false);

        for _ in 0..50 {
            let scenario = select_scenario(&catalog, &config, &character, &game, &mut rng);
            for choice in &scenario.choices {
                assert!(!choice.text.starts_with(INTRUSIVE_PREFIX));
            }
        }
    }

    #[test]
    fn scenario_ids_are_unique_per_invocation() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(5);
        let character = Character::new("Cinder", Tribe::Emberwing, false);

        let a = select_scenario(&catalog, &config, &character, &game, &mut rng);
        let b = select_scenario(&catalog, &config, &character, &game, &mut rng);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn empty_catalog_synthesizes_a_quiet_turn() {
        let (_, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(6);
        let character = Character::new("Cinder", Tribe::Emberwing, false);
        let catalog = ScenarioCatalog { templates: Vec::new() };

        let scenario = select_scenario(&catalog, &config, &character, &game, &mut rng);
        assert_eq!(scenario.choices.len(), 2);
        assert!(scenario.id.starts_with("quiet_turn"));
        // A quiet turn still carries something overheard.
        assert!(scenario
            .narrative
            .iter()
            .any(|p| p.starts_with("Word on the wind:")));
    }

    #[test]
    fn prophetic_scenes_carry_an_omen() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(8);
        let character = Character::new("Vesper", Tribe::Duskwing, false);
        let template = catalog
            .templates
            .iter()
            .find(|t| t.id == "dream_of_ash")
            .expect("prophetic template in the builtin catalog");

        let scenario = instantiate(template, &config, &character, &game, &mut rng);
        let last = scenario.narrative.last().expect("narrative present");
        assert!(last.starts_with("An omen hangs over the scene:"));
    }

    #[test]
    fn mundane_scenes_carry_no_omen() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(9);
        let character = Character::new("Cinder", Tribe::Emberwing, false);
        let template = catalog
            .templates
            .iter()
            .find(|t| t.id == "hunt_at_dawn")
            .expect("mundane template in the builtin catalog");

        let scenario = instantiate(template, &config, &character, &game, &mut rng);
        assert!(scenario
            .narrative
            .iter()
            .all(|p| !p.starts_with("An omen hangs over the scene:")));
    }

    #[test]
    fn scenario_carries_game_location() {
        let (catalog, config, game) = setup();
        let mut rng = StdRng::seed_from_u64(7);
        let character = Character::new("Cinder", Tribe::Emberwing, false);
        let scenario = select_scenario(&catalog, &config, &character, &game, &mut rng);
        assert_eq!(scenario.location, "Ashfall Peaks");
    }
}
