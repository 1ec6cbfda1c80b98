//! Custom animus spellcasting.
//!
//! The UI sends free-text enchantment requests; everything funnels into the
//! pipeline as an ordinary [`Choice`]. Soul cost is estimated from the
//! description's word count bucketed into a complexity tier, scaled by a
//! per-spell-type multiplier, then clamped to the same [0, 10] band the
//! generator adapter enforces.

use serde::{Deserialize, Serialize};

use crate::scenario::{Choice, TAG_STORY_CONTINUES};

/// Broad intent of a custom spell. Drives the cost multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellType {
    /// Mending, light, small conveniences.
    Utility,
    /// Wards and shields.
    Protection,
    /// Anything meant to hurt.
    Offensive,
    /// Soul-twisting workings: domination, resurrection, curses.
    Forbidden,
}

impl SpellType {
    fn multiplier(self) -> f32 {
        match self {
            Self::Utility => 1.0,
            Self::Protection => 1.2,
            Self::Offensive => 1.5,
            Self::Forbidden => 2.0,
        }
    }

    fn is_corrupting(self) -> bool {
        matches!(self, Self::Forbidden)
    }
}

/// Complexity tier from the enchantment description's word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Complexity {
    Simple,
    Moderate,
    Complex,
    Catastrophic,
}

impl Complexity {
    fn from_description(description: &str) -> Self {
        match description.split_whitespace().count() {
            0..=5 => Self::Simple,
            6..=15 => Self::Moderate,
            16..=30 => Self::Complex,
            _ => Self::Catastrophic,
        }
    }

    fn base_cost(self) -> f32 {
        match self {
            Self::Simple => 1.0,
            Self::Moderate => 3.0,
            Self::Complex => 6.0,
            Self::Catastrophic => 10.0,
        }
    }
}

/// Estimate the soul cost of a custom enchantment.
#[must_use]
pub fn estimate_soul_cost(description: &str, spell_type: SpellType) -> f32 {
    let base = Complexity::from_description(description).base_cost();
    (base * spell_type.multiplier()).clamp(0.0, 10.0)
}

/// Build the pipeline input for a custom spell cast on `target`.
#[must_use]
pub fn custom_spell_choice(target: &str, description: &str, spell_type: SpellType) -> Choice {
    Choice {
        id: "custom_spell".to_string(),
        text: format!("Enchant {target}"),
        description: description.to_string(),
        soul_cost: estimate_soul_cost(description, spell_type),
        sanity_cost: 0.0,
        consequences: vec![TAG_STORY_CONTINUES.to_string()],
        corrupting: spell_type.is_corrupting(),
    }
}

/// Build the pipeline input for a freeform player action. Costs nothing.
#[must_use]
pub fn freeform_choice(action: &str) -> Choice {
    Choice {
        id: "freeform_action".to_string(),
        text: action.to_string(),
        description: action.to_string(),
        soul_cost: 0.0,
        sanity_cost: 0.0,
        consequences: vec![TAG_STORY_CONTINUES.to_string()],
        corrupting: false,
    }
}

/// Build the pipeline input for using a named power. Tribal and special
/// powers cost no soul; only animus workings do.
#[must_use]
pub fn power_use_choice(power: &str) -> Choice {
    Choice {
        id: "power_use".to_string(),
        text: format!("Use {power}"),
        description: format!("Call on {power}."),
        soul_cost: 0.0,
        sanity_cost: 0.0,
        consequences: vec![TAG_STORY_CONTINUES.to_string()],
        corrupting: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_buckets_scale_cost() {
        let simple = estimate_soul_cost("glow softly", SpellType::Utility);
        let moderate = estimate_soul_cost(
            "make this ring warm the wearer on cold nights forever",
            SpellType::Utility,
        );
        let complex = estimate_soul_cost(
            "bind this doorway so that no dragon bearing ill intent toward \
             anyone sleeping inside may pass through it or see it",
            SpellType::Utility,
        );
        assert!(simple < moderate && moderate < complex);
    }

    #[test]
    fn spell_type_multiplies_cost() {
        let description = "strike the target with living flame now";
        let utility = estimate_soul_cost(description, SpellType::Utility);
        let offensive = estimate_soul_cost(description, SpellType::Offensive);
        let forbidden = estimate_soul_cost(description, SpellType::Forbidden);
        assert!(utility < offensive && offensive < forbidden);
    }

    #[test]
    fn cost_never_exceeds_the_band() {
        let epic = "word ".repeat(200);
        let cost = estimate_soul_cost(&epic, SpellType::Forbidden);
        assert!((0.0..=10.0).contains(&cost));
    }

    #[test]
    fn forbidden_spells_are_corrupting() {
        let dark = custom_spell_choice("a rival", "still their heart", SpellType::Forbidden);
        assert!(dark.corrupting);
        let ward = custom_spell_choice("the den", "keep it warm", SpellType::Protection);
        assert!(!ward.corrupting);
    }

    #[test]
    fn freeform_and_power_use_cost_nothing() {
        let act = freeform_choice("Visit the market");
        assert!((act.soul_cost - 0.0).abs() < f32::EPSILON);
        let power = power_use_choice("Fire breath");
        assert!((power.soul_cost - 0.0).abs() < f32::EPSILON);
        assert!(!power.consequences.is_empty());
    }
}
