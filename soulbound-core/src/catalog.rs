//! The scenario catalog: data-only templates plus the tagged condition
//! language that gates them.
//!
//! Applicability is expressed as [`Condition`] values evaluated by a single
//! interpreter rather than embedded closures, so catalogs stay serializable
//! and testable. The built-in catalog is loaded once and shared read-only
//! across sessions.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::scenario::{TAG_ACCEPT, TAG_MAKE_FRIEND, TAG_MAKE_RIVAL};
use crate::state::GameData;
use crate::types::{ScenarioCategory, Tribe};

// ---------------------------------------------------------------------------
// Condition language
// ---------------------------------------------------------------------------

/// A requirement on character/game state. A template applies when all of
/// its conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Condition {
    /// Character can use soul magic.
    IsAnimus,
    /// Character's primary tribe matches.
    TribeIs(Tribe),
    /// Soul percentage is strictly below the value.
    SoulBelow(f32),
    /// Soul percentage is at least the value.
    SoulAtLeast(f32),
    /// Sanity percentage is strictly below the value.
    SanityBelow(f32),
    /// Character possesses the named power (tribal or special).
    HasPower(String),
    /// Character age is at least the value.
    MinAge(u32),
    /// Character has a mate.
    HasMate,
    /// Character has at least this many dragonets.
    MinDragonets(usize),
    /// Character carries the named trait.
    HasTrait(String),
    /// The agency handoff latch is set.
    IsAiControlled,
    /// At least this many turns have elapsed.
    MinTurns(u64),
}

impl Condition {
    /// Evaluate this condition against the current state.
    #[must_use]
    pub fn holds(&self, character: &Character, game: &GameData) -> bool {
        match self {
            Condition::IsAnimus => character.is_animus,
            Condition::TribeIs(tribe) => character.tribe == *tribe,
            Condition::SoulBelow(v) => character.soul < *v,
            Condition::SoulAtLeast(v) => character.soul >= *v,
            Condition::SanityBelow(v) => character.sanity < *v,
            Condition::HasPower(p) => character.has_power(p),
            Condition::MinAge(a) => character.age >= *a,
            Condition::HasMate => character.mate.is_some(),
            Condition::MinDragonets(n) => character.dragonets.len() >= *n,
            Condition::HasTrait(t) => character.traits.iter().any(|x| x == t),
            Condition::IsAiControlled => character.is_ai_controlled,
            Condition::MinTurns(n) => game.turn >= *n,
        }
    }
}

/// Check that every condition in `requires` holds.
#[must_use]
pub fn all_hold(requires: &[Condition], character: &Character, game: &GameData) -> bool {
    requires.iter().all(|c| c.holds(character, game))
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// An authored choice within a scenario template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceTemplate {
    /// Stable id within the template.
    pub id: String,
    /// The text shown on the choice.
    pub text: String,
    /// Longer description.
    pub description: String,
    /// Soul cost ≥ 0.
    pub soul_cost: f32,
    /// Sanity cost.
    pub sanity_cost: f32,
    /// Opaque consequence tags.
    pub consequences: Vec<String>,
    /// Marks this choice as morally dark.
    pub corrupting: bool,
    /// Conditions for this choice to be offered.
    pub requires: Vec<Condition>,
}

impl ChoiceTemplate {
    fn plain(id: &str, text: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            description: description.to_string(),
            soul_cost: 0.0,
            sanity_cost: 0.0,
            consequences: Vec::new(),
            corrupting: false,
            requires: Vec::new(),
        }
    }

    fn costing(mut self, soul: f32, sanity: f32) -> Self {
        self.soul_cost = soul;
        self.sanity_cost = sanity;
        self
    }

    fn dark(mut self) -> Self {
        self.corrupting = true;
        self
    }

    fn tagged(mut self, tag: &str) -> Self {
        self.consequences.push(tag.to_string());
        self
    }

    fn gated(mut self, condition: Condition) -> Self {
        self.requires.push(condition);
        self
    }
}

/// An authored scenario template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioTemplate {
    /// Stable catalog id; runtime scenarios get a unique suffix appended.
    pub id: String,
    /// Closed category tag.
    pub category: ScenarioCategory,
    /// Short title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Ordered narrative paragraphs.
    pub narrative: Vec<String>,
    /// The authored choice set (filtered per character at selection time).
    pub choices: Vec<ChoiceTemplate>,
    /// Conditions for this template to be eligible at all.
    pub requires: Vec<Condition>,
}

impl ScenarioTemplate {
    /// Whether any choice in this template is marked corrupting.
    #[must_use]
    pub fn has_corrupting_choice(&self) -> bool {
        self.choices.iter().any(|c| c.corrupting)
    }
}

/// The full scenario catalog. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    /// All authored templates.
    pub templates: Vec<ScenarioTemplate>,
}

impl ScenarioCatalog {
    /// Templates whose requirements hold for this character/game state.
    #[must_use]
    pub fn applicable(&self, character: &Character, game: &GameData) -> Vec<&ScenarioTemplate> {
        self.templates
            .iter()
            .filter(|t| all_hold(&t.requires, character, game))
            .collect()
    }

    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_lines)]
fn builtin_templates() -> Vec<ScenarioTemplate> {
    vec![
        ScenarioTemplate {
            id: "hunt_at_dawn".to_string(),
            category: ScenarioCategory::Mundane,
            title: "The Morning Hunt".to_string(),
            description: "Prey is scarce and your stomach is empty.".to_string(),
            narrative: vec![
                "Hunger wakes you before the sun does.".to_string(),
                "A herd of mountain goats grazes on the far ridge, \
                 upwind and unaware."
                    .to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "stalk",
                    "Stalk the herd patiently",
                    "Take the slow approach and strike when certain.",
                )
                .tagged("item:fresh kill"),
                ChoiceTemplate::plain(
                    "dive",
                    "Dive at them from above",
                    "A bold attack; it may scatter the herd.",
                ),
                ChoiceTemplate::plain(
                    "scavenge",
                    "Scavenge instead",
                    "Leave the herd be and pick over old kills.",
                ),
            ],
            requires: Vec::new(),
        },
        ScenarioTemplate {
            id: "market_gathering".to_string(),
            category: ScenarioCategory::Social,
            title: "The Scale Market".to_string(),
            description: "Traders from three tribes have set up stalls.".to_string(),
            narrative: vec![
                "The market square hums with haggling dragons.".to_string(),
                "A young Stonewing merchant waves you over, grinning.".to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "befriend",
                    "Strike up a conversation",
                    "The merchant seems genuinely friendly.",
                )
                .tagged(TAG_MAKE_FRIEND),
                ChoiceTemplate::plain(
                    "haggle",
                    "Haggle hard for supplies",
                    "Push for a better deal than is polite.",
                )
                .tagged("item:traveling supplies"),
                ChoiceTemplate::plain(
                    "steal",
                    "Palm a trinket while they talk",
                    "Nobody is watching the stall.",
                )
                .costing(0.0, 3.0)
                .dark(),
            ],
            requires: Vec::new(),
        },
        ScenarioTemplate {
            id: "moonlit_meeting".to_string(),
            category: ScenarioCategory::Romance,
            title: "Under the Twin Moons".to_string(),
            description: "A dragon you have grown close to asks to meet alone.".to_string(),
            narrative: vec![
                "The cliffside is silver with moonlight when you land.".to_string(),
                "They are already there, wings folded, eyes on the sea.".to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "accept",
                    "Accept their affection",
                    "Let the moment become something more.",
                )
                .tagged(TAG_ACCEPT),
                ChoiceTemplate::plain(
                    "deflect",
                    "Keep things as they are",
                    "Gently steer the conversation elsewhere.",
                ),
                ChoiceTemplate::plain(
                    "toy",
                    "Toy with their feelings",
                    "Their devotion could be useful later.",
                )
                .costing(0.0, 2.0)
                .dark(),
            ],
            requires: Vec::new(),
        },
        ScenarioTemplate {
            id: "hatchling_ceremony".to_string(),
            category: ScenarioCategory::Tribal,
            title: "The Naming Ceremony".to_string(),
            description: "Your tribe gathers to name the season's hatchlings.".to_string(),
            narrative: vec![
                "Drums echo through the caverns as the eggs are carried in.".to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "honor",
                    "Take your place in the rites",
                    "Stand with your tribe as tradition demands.",
                ),
                ChoiceTemplate::plain(
                    "bless",
                    "Offer an animus blessing",
                    "A small enchantment of luck upon the hatchlings.",
                )
                .costing(2.0, 0.0)
                .gated(Condition::IsAnimus),
                ChoiceTemplate::plain(
                    "slip_away",
                    "Slip away early",
                    "Ceremonies bore you; the night is young.",
                ),
            ],
            requires: Vec::new(),
        },
        ScenarioTemplate {
            id: "border_skirmish".to_string(),
            category: ScenarioCategory::War,
            title: "Smoke on the Border".to_string(),
            description: "A patrol clashes with raiders at the frontier.".to_string(),
            narrative: vec![
                "You hear the fighting before you see it: roars, and the \
                 wet crack of tail against scale."
                    .to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "defend",
                    "Join the defenders",
                    "Drive the raiders back alongside the patrol.",
                )
                .costing(0.0, 2.0)
                .tagged(TAG_MAKE_RIVAL),
                ChoiceTemplate::plain(
                    "flank",
                    "Burn their line from behind",
                    "End the fight quickly and brutally.",
                )
                .costing(0.0, 3.0)
                .dark()
                .gated(Condition::HasPower("Fire breath".to_string())),
                ChoiceTemplate::plain(
                    "withdraw",
                    "Stay out of it",
                    "This is not your fight.",
                ),
            ],
            requires: Vec::new(),
        },
        ScenarioTemplate {
            id: "council_summons".to_string(),
            category: ScenarioCategory::Political,
            title: "The Queen's Council".to_string(),
            description: "You are summoned to speak before the council.".to_string(),
            narrative: vec![
                "The council chamber smells of old stone and older grudges.".to_string(),
                "Every eye turns to you as the doors boom shut.".to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "counsel",
                    "Speak honestly",
                    "Give the council your true assessment.",
                ),
                ChoiceTemplate::plain(
                    "scheme",
                    "Tell them what serves you",
                    "A careful lie, placed where it will grow.",
                )
                .costing(0.0, 2.0)
                .dark()
                .tagged(TAG_MAKE_RIVAL),
                ChoiceTemplate::plain(
                    "defer",
                    "Defer to the elders",
                    "Say little and watch who reacts.",
                ),
            ],
            requires: vec![Condition::MinTurns(3)],
        },
        ScenarioTemplate {
            id: "desperate_petitioner".to_string(),
            category: ScenarioCategory::Magical,
            title: "A Desperate Request".to_string(),
            description: "A stranger begs you to enchant away their grief.".to_string(),
            narrative: vec![
                "Word of your gift has spread further than you hoped.".to_string(),
                "The stranger's claws tremble as they hold out a carved \
                 locket."
                    .to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "grant",
                    "Grant the enchantment",
                    "Soothe their grief at a cost to your own soul.",
                )
                .costing(5.0, 0.0),
                ChoiceTemplate::plain(
                    "refuse",
                    "Refuse them gently",
                    "Some prices should not be paid.",
                ),
                ChoiceTemplate::plain(
                    "bargain",
                    "Name a cruel price",
                    "They will pay anything. Make them.",
                )
                .costing(3.0, 2.0)
                .dark(),
            ],
            requires: vec![Condition::IsAnimus],
        },
        ScenarioTemplate {
            id: "dream_of_ash".to_string(),
            category: ScenarioCategory::Prophetic,
            title: "The Dream of Ash".to_string(),
            description: "A vision seizes you in your sleep.".to_string(),
            narrative: vec![
                "You dream of a sky the color of cooling iron, and a \
                 voice that knows your name."
                    .to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "heed",
                    "Heed the vision",
                    "Change your path to match what you saw.",
                )
                .costing(0.0, 2.0),
                ChoiceTemplate::plain(
                    "dismiss",
                    "Dismiss it as a dream",
                    "Dreams are only dreams.",
                ),
                ChoiceTemplate::plain(
                    "listen",
                    "Answer the voice",
                    "Whatever speaks in dreams wants something.",
                )
                .costing(0.0, 4.0)
                .dark(),
            ],
            requires: vec![Condition::TribeIs(Tribe::Duskwing)],
        },
        ScenarioTemplate {
            id: "buried_reliquary".to_string(),
            category: ScenarioCategory::Extraordinary,
            title: "The Buried Reliquary".to_string(),
            description: "A rockslide exposes a sealed animus vault.".to_string(),
            narrative: vec![
                "Whatever is sealed behind the door, the dragons who \
                 buried it meant it to stay buried."
                    .to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "report",
                    "Report it to the tribe",
                    "Let wiser heads decide what to do with it.",
                ),
                ChoiceTemplate::plain(
                    "open",
                    "Break the seal yourself",
                    "Knowledge buried is knowledge wasted.",
                )
                .costing(0.0, 3.0)
                .dark(),
                ChoiceTemplate::plain(
                    "rebury",
                    "Bury it deeper",
                    "Some doors are sealed for good reason.",
                ),
            ],
            requires: Vec::new(),
        },
        ScenarioTemplate {
            id: "whispers_in_the_walls".to_string(),
            category: ScenarioCategory::Magical,
            title: "Whispers in the Walls".to_string(),
            description: "The corruption in your soul has found a voice.".to_string(),
            narrative: vec![
                "It speaks in your own voice, which is the worst part.".to_string(),
                "It suggests things. Reasonable things, at first.".to_string(),
            ],
            choices: vec![
                ChoiceTemplate::plain(
                    "resist",
                    "Shut the voice out",
                    "Hold the line one more night.",
                )
                .costing(0.0, 3.0),
                ChoiceTemplate::plain(
                    "indulge",
                    "Do what it asks, just once",
                    "It would be so easy. It is always easy.",
                )
                .costing(4.0, 2.0)
                .dark(),
            ],
            requires: vec![Condition::SoulBelow(50.0)],
        },
    ]
}
