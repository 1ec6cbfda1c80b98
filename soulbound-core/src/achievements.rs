//! Declarative achievements.
//!
//! Each achievement is a set of [`Condition`]s over the character; after
//! every pipeline run the full catalog is re-evaluated and any newly
//! satisfied ids are appended to the character's unlock list. Evaluation
//! is cheap and idempotent, so it is never cached.

use serde::{Deserialize, Serialize};

use crate::catalog::{all_hold, Condition};
use crate::character::{Character, CORRUPTED_TRAIT};
use crate::state::GameData;

/// One unlockable achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    /// Stable id recorded on the character.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Conditions that unlock it.
    pub requires: Vec<Condition>,
}

/// The achievement catalog. Immutable after construction; safe to share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementCatalog {
    /// All achievements, in display order.
    pub achievements: Vec<Achievement>,
}

impl AchievementCatalog {
    /// The built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let achievements = vec![
            Achievement {
                id: "first_crack".to_string(),
                name: "The First Crack".to_string(),
                description: "Spend half of your soul.".to_string(),
                requires: vec![Condition::SoulBelow(50.0)],
            },
            Achievement {
                id: "hollowed".to_string(),
                name: "Hollowed".to_string(),
                description: "Reach the Broken stage.".to_string(),
                requires: vec![Condition::SoulBelow(25.0)],
            },
            Achievement {
                id: "fraying_mind".to_string(),
                name: "Fraying Mind".to_string(),
                description: "Fall below half sanity.".to_string(),
                requires: vec![Condition::SanityBelow(50.0)],
            },
            Achievement {
                id: "brood_parent".to_string(),
                name: "Brood Parent".to_string(),
                description: "Raise three dragonets.".to_string(),
                requires: vec![Condition::MinDragonets(3)],
            },
            Achievement {
                id: "bonded".to_string(),
                name: "Bonded".to_string(),
                description: "Take a mate.".to_string(),
                requires: vec![Condition::HasMate],
            },
            Achievement {
                id: "centenarian".to_string(),
                name: "Centenarian".to_string(),
                description: "Live to one hundred years.".to_string(),
                requires: vec![Condition::MinAge(100)],
            },
            Achievement {
                id: "marked".to_string(),
                name: "Marked".to_string(),
                description: "Corruption leaves a permanent trait.".to_string(),
                requires: vec![Condition::HasTrait(CORRUPTED_TRAIT.to_string())],
            },
            Achievement {
                id: "long_haul".to_string(),
                name: "The Long Haul".to_string(),
                description: "Survive fifty turns.".to_string(),
                requires: vec![Condition::MinTurns(50)],
            },
            Achievement {
                id: "puppet".to_string(),
                name: "Puppet".to_string(),
                description: "Lose yourself to the corruption.".to_string(),
                requires: vec![Condition::IsAiControlled],
            },
        ];
        Self { achievements }
    }
}

impl Default for AchievementCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Append every newly satisfied achievement id to the character.
///
/// Idempotent: ids already present are never re-appended, and unlock order
/// is preserved. Returns the ids unlocked by this call.
pub fn evaluate(
    catalog: &AchievementCatalog,
    character: &mut Character,
    game: &GameData,
) -> Vec<String> {
    let mut unlocked = Vec::new();
    for achievement in &catalog.achievements {
        if character.achievements.contains(&achievement.id) {
            continue;
        }
        if all_hold(&achievement.requires, character, game) {
            character.achievements.push(achievement.id.clone());
            unlocked.push(achievement.id.clone());
        }
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tribe;

    fn setup() -> (AchievementCatalog, Character, GameData) {
        (
            AchievementCatalog::builtin(),
            Character::new("Cinder", Tribe::Emberwing, true),
            GameData::new("Ashfall Peaks"),
        )
    }

    #[test]
    fn fresh_character_unlocks_nothing() {
        let (catalog, mut character, game) = setup();
        let unlocked = evaluate(&catalog, &mut character, &game);
        assert!(unlocked.is_empty());
        assert!(character.achievements.is_empty());
    }

    #[test]
    fn multiple_achievements_can_unlock_in_one_pass() {
        let (catalog, mut character, game) = setup();
        character.set_soul(20.0); // below 50 and below 25
        let unlocked = evaluate(&catalog, &mut character, &game);
        assert!(unlocked.contains(&"first_crack".to_string()));
        assert!(unlocked.contains(&"hollowed".to_string()));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let (catalog, mut character, game) = setup();
        character.set_soul(40.0);
        evaluate(&catalog, &mut character, &game);
        let snapshot = character.achievements.clone();
        let second = evaluate(&catalog, &mut character, &game);
        assert!(second.is_empty());
        assert_eq!(character.achievements, snapshot);
    }

    #[test]
    fn unlock_order_is_preserved() {
        let (catalog, mut character, game) = setup();
        character.set_soul(40.0);
        evaluate(&catalog, &mut character, &game);
        character.adjust_sanity(-60.0);
        evaluate(&catalog, &mut character, &game);
        assert_eq!(
            character.achievements,
            vec!["first_crack".to_string(), "fraying_mind".to_string()]
        );
    }
}
