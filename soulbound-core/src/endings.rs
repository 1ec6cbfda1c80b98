//! Terminal conditions and the ending catalog.
//!
//! Two separate questions: *is the run over* (resource exhaustion or the
//! age ceiling, checked every turn) and *which ending fits* (a scored
//! catalog lookup the caller consults when it decides to close the run).

use serde::{Deserialize, Serialize};

use crate::catalog::{all_hold, Condition};
use crate::character::Character;
use crate::config::GameConfig;
use crate::state::GameData;

/// Why the run ended. Checked in a fixed priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Soul fully spent; the body keeps moving without them.
    SoulExhausted,
    /// Sanity fully spent.
    SanityExhausted,
    /// The age ceiling.
    OldAge,
}

impl GameOverReason {
    /// The narrative line shown to the player.
    #[must_use]
    pub fn narrative(self) -> &'static str {
        match self {
            Self::SoulExhausted => {
                "The last of the soul burns away. Something else opens the eyes."
            }
            Self::SanityExhausted => {
                "The mind finally folds in on itself, and the world stops making sense."
            }
            Self::OldAge => "A long life ends the way long lives should: quietly, asleep.",
        }
    }
}

/// Check terminal conditions. Soul before sanity before age; the first
/// match wins.
#[must_use]
pub fn check_game_over(character: &Character, config: &GameConfig) -> Option<GameOverReason> {
    if character.soul <= 0.0 {
        Some(GameOverReason::SoulExhausted)
    } else if character.sanity <= 0.0 {
        Some(GameOverReason::SanityExhausted)
    } else if character.age >= config.timeline.max_age {
        Some(GameOverReason::OldAge)
    } else {
        None
    }
}

/// How rare an ending is. Rarity dominates the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Almost nobody sees this one.
    Legendary,
    /// Takes a specific run shape.
    Rare,
    /// The usual outcomes.
    Common,
}

impl Rarity {
    fn weight(self) -> u32 {
        match self {
            Self::Legendary => 100,
            Self::Rare => 50,
            Self::Common => 10,
        }
    }
}

/// Tone category, the score's secondary component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingCategory {
    /// Myth-making.
    Legendary,
    /// The player won, by any fair reading.
    Victory,
    /// Neither triumph nor ruin.
    Neutral,
    /// Ruin.
    Tragic,
}

impl EndingCategory {
    fn weight(self) -> u32 {
        match self {
            Self::Legendary => 40,
            Self::Victory => 30,
            Self::Neutral => 20,
            Self::Tragic => 10,
        }
    }
}

/// One authored ending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ending {
    /// Stable id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Closing narrative.
    pub description: String,
    /// Rarity tier.
    pub rarity: Rarity,
    /// Tone tier.
    pub category: EndingCategory,
    /// Conditions that make this ending available.
    pub requires: Vec<Condition>,
}

impl Ending {
    fn score(&self) -> u32 {
        self.rarity.weight() + self.category.weight()
    }
}

/// The ending catalog. Read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndingCatalog {
    /// All endings, in authoring order. Order breaks score ties.
    pub endings: Vec<Ending>,
}

impl EndingCatalog {
    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let endings = vec![
            Ending {
                id: "hollow_crown".to_string(),
                title: "The Hollow Crown".to_string(),
                description: "What wears your face now rules, and rules well, \
                              and remembers nothing of you."
                    .to_string(),
                rarity: Rarity::Legendary,
                category: EndingCategory::Tragic,
                requires: vec![Condition::IsAiControlled, Condition::SoulBelow(1.0)],
            },
            Ending {
                id: "last_enchantment".to_string(),
                title: "The Last Enchantment".to_string(),
                description: "You spent everything you were on one final, \
                              beautiful working."
                    .to_string(),
                rarity: Rarity::Rare,
                category: EndingCategory::Victory,
                requires: vec![Condition::IsAnimus, Condition::SoulBelow(25.0)],
            },
            Ending {
                id: "matriarch".to_string(),
                title: "Matriarch of a Full Den".to_string(),
                description: "The den is loud, and warm, and yours.".to_string(),
                rarity: Rarity::Rare,
                category: EndingCategory::Victory,
                requires: vec![Condition::HasMate, Condition::MinDragonets(3)],
            },
            Ending {
                id: "grey_years".to_string(),
                title: "The Grey Years".to_string(),
                description: "Nothing remarkable ever happened to you, which is \
                              its own kind of mercy."
                    .to_string(),
                rarity: Rarity::Common,
                category: EndingCategory::Neutral,
                requires: vec![Condition::MinAge(100)],
            },
            Ending {
                id: "quiet_fade".to_string(),
                title: "A Quiet Fade".to_string(),
                description: "The story simply stops being told.".to_string(),
                rarity: Rarity::Common,
                category: EndingCategory::Tragic,
                requires: vec![Condition::SanityBelow(10.0)],
            },
            Ending {
                id: "unwritten".to_string(),
                title: "Unwritten".to_string(),
                description: "Whatever you were becoming, you never finished \
                              becoming it."
                    .to_string(),
                rarity: Rarity::Common,
                category: EndingCategory::Neutral,
                requires: vec![Condition::MinTurns(20)],
            },
        ];
        Self { endings }
    }
}

impl Default for EndingCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Pick the best-fitting ending, or `None` when nothing matches and the
/// caller may let the run continue.
///
/// Score is rarity weight plus category weight; among equal scores the
/// earliest catalog entry wins, so a strictly-greater comparison is used
/// rather than `max_by` (which keeps the last maximum).
#[must_use]
pub fn determine_ending<'a>(
    catalog: &'a EndingCatalog,
    character: &Character,
    game: &GameData,
) -> Option<&'a Ending> {
    let mut best: Option<&Ending> = None;
    for ending in &catalog.endings {
        if !all_hold(&ending.requires, character, game) {
            continue;
        }
        match best {
            Some(current) if ending.score() <= current.score() => {}
            _ => best = Some(ending),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tribe;

    fn setup() -> (EndingCatalog, Character, GameData, GameConfig) {
        (
            EndingCatalog::builtin(),
            Character::new("Cinder", Tribe::Emberwing, true),
            GameData::new("Ashfall Peaks"),
            GameConfig::default(),
        )
    }

    #[test]
    fn healthy_character_is_not_over() {
        let (_, character, _, config) = setup();
        assert_eq!(check_game_over(&character, &config), None);
    }

    #[test]
    fn soul_exhaustion_wins_the_priority_order() {
        let (_, mut character, _, config) = setup();
        character.set_soul(0.0);
        character.adjust_sanity(-200.0);
        character.age = 200;
        assert_eq!(
            check_game_over(&character, &config),
            Some(GameOverReason::SoulExhausted)
        );
    }

    #[test]
    fn sanity_beats_age() {
        let (_, mut character, _, config) = setup();
        character.adjust_sanity(-200.0);
        character.age = 200;
        assert_eq!(
            check_game_over(&character, &config),
            Some(GameOverReason::SanityExhausted)
        );
    }

    #[test]
    fn age_ceiling_is_terminal_on_its_own() {
        let (_, mut character, _, config) = setup();
        character.age = 150;
        assert_eq!(
            check_game_over(&character, &config),
            Some(GameOverReason::OldAge)
        );
    }

    #[test]
    fn no_ending_forced_when_nothing_matches() {
        let (catalog, character, game, _) = setup();
        assert!(determine_ending(&catalog, &character, &game).is_none());
    }

    #[test]
    fn highest_score_wins() {
        let (catalog, mut character, game, _) = setup();
        // Qualifies for both last_enchantment (50+30) and hollow_crown
        // (100+10); the legendary tragedy scores higher.
        character.set_soul(0.0);
        character.is_ai_controlled = true;
        let ending = determine_ending(&catalog, &character, &game).expect("an ending");
        assert_eq!(ending.id, "hollow_crown");
    }

    #[test]
    fn ties_break_toward_earlier_catalog_entries() {
        let mut catalog = EndingCatalog { endings: Vec::new() };
        for id in ["first", "second"] {
            catalog.endings.push(Ending {
                id: id.to_string(),
                title: id.to_string(),
                description: String::new(),
                rarity: Rarity::Common,
                category: EndingCategory::Neutral,
                requires: Vec::new(),
            });
        }
        let (_, character, game, _) = setup();
        let ending = determine_ending(&catalog, &character, &game).expect("an ending");
        assert_eq!(ending.id, "first");
    }

    #[test]
    fn narrative_lines_are_distinct() {
        let reasons = [
            GameOverReason::SoulExhausted,
            GameOverReason::SanityExhausted,
            GameOverReason::OldAge,
        ];
        for (i, a) in reasons.iter().enumerate() {
            for b in &reasons[i + 1..] {
                assert_ne!(a.narrative(), b.narrative());
            }
        }
    }
}
