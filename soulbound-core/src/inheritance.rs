//! Dragonet inheritance and mating.
//!
//! Inheritance rules: tribe (pure if parents share one, otherwise a hybrid
//! with a 50/50 primary), animus (30% if either parent carries it, 10%
//! baseline), traits (each parental trait copied independently at 50%,
//! one novel trait at 70%).

use rand::Rng;

use crate::character::{Character, Dragonet};
use crate::config::RelationshipConfig;
use crate::content::{random_flavor, random_name, FlavorCategory};
use crate::types::{RelationshipKind, Tribe};

/// Outcome of an explicit mating attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatingOutcome {
    /// The pairing took; `mate` is set and the relationship escalated.
    Bonded,
    /// The attempt failed this time.
    Rebuffed,
    /// Gates not met (strength, age, or no such relationship).
    Ineligible,
}

/// Produce a dragonet from the character and a partner.
///
/// `partner_is_animus` matters because animus inheritance considers either
/// parent; the partner is otherwise opaque to the engine.
pub fn make_dragonet<R: Rng>(
    character: &Character,
    partner_tribe: Tribe,
    partner_is_animus: bool,
    rng: &mut R,
) -> Dragonet {
    // Tribe inheritance.
    let (tribe, hybrid_tribes) = if character.tribe == partner_tribe {
        (character.tribe, Vec::new())
    } else {
        let primary = if rng.gen_bool(0.5) {
            character.tribe
        } else {
            partner_tribe
        };
        let secondary = if primary == character.tribe {
            partner_tribe
        } else {
            character.tribe
        };
        (primary, vec![primary, secondary])
    };

    // Animus inheritance: a single draw at whichever probability applies.
    let animus_chance = if character.is_animus || partner_is_animus {
        0.3
    } else {
        0.1
    };
    let is_animus = rng.gen_bool(animus_chance);

    // Trait inheritance.
    let mut inherited_traits: Vec<String> = character
        .traits
        .iter()
        .filter(|_| rng.gen_bool(0.5))
        .cloned()
        .collect();
    if rng.gen_bool(0.7) {
        let novel = random_flavor(FlavorCategory::Personality, rng);
        if !inherited_traits.contains(&novel) {
            inherited_traits.push(novel);
        }
    }

    let personality = random_flavor(FlavorCategory::Personality, rng);
    Dragonet {
        name: random_name(tribe, rng),
        age: 0,
        tribe,
        hybrid_tribes,
        inherited_traits,
        is_animus,
        personality,
    }
}

/// Explicitly attempt to form a mate bond with `partner`.
///
/// Gated on an existing relationship of strength ≥ the configured minimum
/// and character age ≥ the configured minimum; succeeds with the configured
/// probability (default 70%). On success the relationship escalates to
/// `Mate`, `character.mate` is set, and a dragonet is produced.
pub fn attempt_mating<R: Rng>(
    character: &mut Character,
    partner: &str,
    partner_tribe: Tribe,
    partner_is_animus: bool,
    config: &RelationshipConfig,
    rng: &mut R,
) -> MatingOutcome {
    let Some(relationship) = character.relationships.get(partner) else {
        return MatingOutcome::Ineligible;
    };
    if relationship.strength < config.mating_min_strength
        || character.age < config.mating_min_age
        || !relationship.is_alive
    {
        return MatingOutcome::Ineligible;
    }

    if !rng.gen_bool(config.mating_success_chance) {
        return MatingOutcome::Rebuffed;
    }

    let dragonet = make_dragonet(character, partner_tribe, partner_is_animus, rng);
    let relationship = character.relationship_entry(partner);
    relationship.kind = RelationshipKind::Mate;
    relationship.note("Became mates");
    character.mate = Some(partner.to_string());
    character.dragonets.push(dragonet);
    MatingOutcome::Bonded
}
