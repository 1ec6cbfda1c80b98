//! Resource model and corruption policy.
//!
//! The soul percentage maps onto a discrete corruption stage through fixed
//! thresholds, and each stage carries a fixed behavior profile: how likely
//! the corruption is to seize control this turn, how strongly dark choices
//! are favored, and how hard existing bonds decay.
//!
//! Corruption is probabilistic, not deterministic: even a Broken character
//! sometimes acts normally, which the narrative depends on.

use rand::Rng;

use crate::character::Character;
use crate::types::CorruptionStage;

/// Derive the corruption stage from a soul percentage.
///
/// Pure and total over [0, 100]: ≥75 Normal, ≥50 Frayed, ≥25 Twisted,
/// otherwise Broken.
#[must_use]
pub fn soul_stage(soul: f32) -> CorruptionStage {
    if soul >= 75.0 {
        CorruptionStage::Normal
    } else if soul >= 50.0 {
        CorruptionStage::Frayed
    } else if soul >= 25.0 {
        CorruptionStage::Twisted
    } else {
        CorruptionStage::Broken
    }
}

/// Behavioral parameters for a corruption stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBehavior {
    /// Probability the corruption seizes control this decision point.
    pub ai_control_chance: f64,
    /// Additive weighting bonus for corrupting choices.
    pub choice_bias_bonus: f32,
    /// Per-turn strength decay applied to bonds while corrupted choices
    /// are made.
    pub relationship_penalty: i32,
}

/// Fixed per-stage behavior table.
#[must_use]
pub fn behavior_for(stage: CorruptionStage) -> StageBehavior {
    match stage {
        CorruptionStage::Normal => StageBehavior {
            ai_control_chance: 0.0,
            choice_bias_bonus: 0.0,
            relationship_penalty: 0,
        },
        CorruptionStage::Frayed => StageBehavior {
            ai_control_chance: 0.05,
            choice_bias_bonus: 5.0,
            relationship_penalty: 1,
        },
        CorruptionStage::Twisted => StageBehavior {
            ai_control_chance: 0.25,
            choice_bias_bonus: 15.0,
            relationship_penalty: 3,
        },
        CorruptionStage::Broken => StageBehavior {
            ai_control_chance: 0.6,
            choice_bias_bonus: 30.0,
            relationship_penalty: 5,
        },
    }
}

/// Roll the takeover check for this decision point.
///
/// Draws exactly one uniform sample and compares it against the stage's
/// `ai_control_chance`. Callers must invoke this at most once per turn;
/// re-rolling would void the probability contract.
pub fn should_seize_control<R: Rng>(character: &Character, rng: &mut R) -> bool {
    let chance = behavior_for(character.stage).ai_control_chance;
    if chance <= 0.0 {
        return false;
    }
    rng.gen_range(0.0..1.0) < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tribe;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn stage_thresholds_are_exact() {
        assert_eq!(soul_stage(100.0), CorruptionStage::Normal);
        assert_eq!(soul_stage(75.0), CorruptionStage::Normal);
        assert_eq!(soul_stage(74.9), CorruptionStage::Frayed);
        assert_eq!(soul_stage(50.0), CorruptionStage::Frayed);
        assert_eq!(soul_stage(49.9), CorruptionStage::Twisted);
        assert_eq!(soul_stage(25.0), CorruptionStage::Twisted);
        assert_eq!(soul_stage(24.9), CorruptionStage::Broken);
        assert_eq!(soul_stage(0.0), CorruptionStage::Broken);
    }

    #[test]
    fn stage_is_monotonic_as_soul_drains() {
        let mut last = CorruptionStage::Normal;
        let mut soul = 100.0f32;
        while soul >= 0.0 {
            let stage = soul_stage(soul);
            assert!(stage >= last, "stage regressed at soul={soul}");
            last = stage;
            soul -= 0.5;
        }
    }

    #[test]
    fn normal_stage_never_takes_over() {
        let character = Character::new("Cinder", Tribe::Emberwing, true);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert!(!should_seize_control(&character, &mut rng));
        }
    }

    #[test]
    fn broken_stage_takes_over_at_least_half_the_time() {
        let mut character = Character::new("Cinder", Tribe::Emberwing, true);
        character.set_soul(0.0);
        assert_eq!(character.stage, CorruptionStage::Broken);

        let mut rng = StdRng::seed_from_u64(42);
        let seizures = (0..1_000)
            .filter(|_| should_seize_control(&character, &mut rng))
            .count();
        // Broken chance is 0.6; allow generous statistical slack.
        assert!(seizures > 500, "only {seizures}/1000 takeovers");
        assert!(seizures < 700, "{seizures}/1000 takeovers is too many");
    }

    #[test]
    fn behavior_table_escalates() {
        let normal = behavior_for(CorruptionStage::Normal);
        let frayed = behavior_for(CorruptionStage::Frayed);
        let twisted = behavior_for(CorruptionStage::Twisted);
        let broken = behavior_for(CorruptionStage::Broken);

        assert_eq!(normal.ai_control_chance, 0.0);
        assert_eq!(normal.relationship_penalty, 0);
        assert!(frayed.ai_control_chance > 0.0);
        assert!(twisted.ai_control_chance > frayed.ai_control_chance);
        assert!(broken.ai_control_chance >= 0.5);
        assert!(broken.choice_bias_bonus > twisted.choice_bias_bonus);
    }
}
