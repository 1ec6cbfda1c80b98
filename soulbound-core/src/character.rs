//! The player character and their social graph.
//!
//! Soul and sanity are only ever mutated through the methods here, which
//! clamp to [0, 100] and keep the derived corruption stage consistent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::corruption::soul_stage;
use crate::types::{CorruptionStage, RelationshipKind, Season, Tribe};

/// Trait sentinel appended once corruption leaves a permanent mark.
pub const CORRUPTED_TRAIT: &str = "Corrupted";

/// Bounded physical and mental attributes, fixed at creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attributes {
    /// Raw physical power (1–20).
    pub strength: u8,
    /// Problem solving and memory (1–20).
    pub intelligence: u8,
    /// Social presence (1–20).
    pub charisma: u8,
    /// Judgement and restraint (1–20).
    pub wisdom: u8,
}

impl Attributes {
    /// Create attributes, clamping each value into the valid 1–20 band.
    #[must_use]
    pub fn new(strength: u8, intelligence: u8, charisma: u8, wisdom: u8) -> Self {
        Self {
            strength: strength.clamp(1, 20),
            intelligence: intelligence.clamp(1, 20),
            charisma: charisma.clamp(1, 20),
            wisdom: wisdom.clamp(1, 20),
        }
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 10,
            intelligence: 10,
            charisma: 10,
            wisdom: 10,
        }
    }
}

/// A bond with another dragon, keyed by their name in
/// [`Character::relationships`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    /// The other dragon's name.
    pub name: String,
    /// Current kind of bond.
    pub kind: RelationshipKind,
    /// Bond strength, clamped to the configured band (default [-100, 100]).
    pub strength: i32,
    /// Ordered log of notable moments in this relationship.
    pub history: Vec<String>,
    /// Whether the other dragon is still alive.
    pub is_alive: bool,
}

impl Relationship {
    /// Create a new relationship.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: RelationshipKind, strength: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            strength,
            history: Vec::new(),
            is_alive: true,
        }
    }

    /// Adjust strength by `delta`, clamping into `[min, max]`.
    pub fn adjust_strength(&mut self, delta: i32, min: i32, max: i32) {
        self.strength = (self.strength + delta).clamp(min, max);
    }

    /// Append a note to this relationship's history.
    pub fn note(&mut self, entry: impl Into<String>) {
        self.history.push(entry.into());
    }
}

/// An offspring dragon produced by the inheritance rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dragonet {
    /// The dragonet's name.
    pub name: String,
    /// Age in years.
    pub age: u32,
    /// Primary tribe.
    pub tribe: Tribe,
    /// Hybrid ancestry, primary tribe first. Empty for purebloods.
    pub hybrid_tribes: Vec<Tribe>,
    /// Traits copied from the parent.
    pub inherited_traits: Vec<String>,
    /// Whether the dragonet inherited animus magic.
    pub is_animus: bool,
    /// A one-word disposition.
    pub personality: String,
}

/// The player character. Owned by exactly one session; mutated only through
/// the choice pipeline, the autonomous agent, and explicit game rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// The character's name.
    pub name: String,
    /// Primary tribe.
    pub tribe: Tribe,
    /// Hybrid ancestry (2–3 tribes, primary first). Empty for purebloods.
    pub hybrid_tribes: Vec<Tribe>,

    /// Soul integrity ∈ [0, 100]. 100 = untainted. Spent by animus magic.
    pub soul: f32,
    /// Sanity ∈ [0, 100]. Drained by psychologically taxing choices.
    pub sanity: f32,
    /// Corruption stage derived from `soul`. Kept consistent by
    /// [`Character::set_soul`].
    pub stage: CorruptionStage,

    /// Whether soul-spending magic is available to this character.
    pub is_animus: bool,
    /// Agency handoff latch. Set only by the corruption policy's takeover
    /// check; never silently cleared.
    pub is_ai_controlled: bool,

    /// Fixed attributes.
    pub attributes: Attributes,

    /// Powers beyond the tribal table (mind reading, prophecy, ...).
    pub special_powers: Vec<String>,
    /// Acquired traits. May contain [`CORRUPTED_TRAIT`].
    pub traits: Vec<String>,
    /// Unlocked achievement ids, in unlock order.
    pub achievements: Vec<String>,

    /// Social graph keyed by the other dragon's name.
    pub relationships: BTreeMap<String, Relationship>,
    /// Mother's name, if known.
    pub mother: Option<String>,
    /// Father's name, if known.
    pub father: Option<String>,
    /// Sibling names.
    pub siblings: Vec<String>,
    /// Current mate. Must reference a relationship of kind `Mate`.
    pub mate: Option<String>,
    /// Offspring, in hatch order.
    pub dragonets: Vec<Dragonet>,

    /// Age in years.
    pub age: u32,
    /// Years survived since the run began.
    pub years_survived: u32,
    /// Current season.
    pub season: Season,
}

impl Character {
    /// Create a fresh, untainted character.
    #[must_use]
    pub fn new(name: impl Into<String>, tribe: Tribe, is_animus: bool) -> Self {
        Self {
            name: name.into(),
            tribe,
            hybrid_tribes: Vec::new(),
            soul: 100.0,
            sanity: 100.0,
            stage: CorruptionStage::Normal,
            is_animus,
            is_ai_controlled: false,
            attributes: Attributes::default(),
            special_powers: Vec::new(),
            traits: Vec::new(),
            achievements: Vec::new(),
            relationships: BTreeMap::new(),
            mother: None,
            father: None,
            siblings: Vec::new(),
            mate: None,
            dragonets: Vec::new(),
            age: 6,
            years_survived: 0,
            season: Season::Spring,
        }
    }

    /// Set the soul percentage, clamping to [0, 100] and recomputing the
    /// corruption stage. The only sanctioned way to change `soul`.
    pub fn set_soul(&mut self, value: f32) {
        self.soul = value.clamp(0.0, 100.0);
        self.stage = soul_stage(self.soul);
    }

    /// Spend soul on magic. `amount` must be ≥ 0.
    pub fn spend_soul(&mut self, amount: f32) {
        self.set_soul(self.soul - amount.max(0.0));
    }

    /// Apply a sanity delta (negative drains), clamping to [0, 100].
    pub fn adjust_sanity(&mut self, delta: f32) {
        self.sanity = (self.sanity + delta).clamp(0.0, 100.0);
    }

    /// All powers this character can actually use: the tribal table for
    /// their primary tribe plus any special powers.
    #[must_use]
    pub fn all_powers(&self) -> Vec<String> {
        let mut powers: Vec<String> = self
            .tribe
            .powers()
            .iter()
            .map(|p| (*p).to_string())
            .collect();
        powers.extend(self.special_powers.iter().cloned());
        powers
    }

    /// Whether the character possesses the named power (tribal or special).
    #[must_use]
    pub fn has_power(&self, power: &str) -> bool {
        self.tribe.powers().contains(&power)
            || self.special_powers.iter().any(|p| p == power)
    }

    /// Add a trait if not already present.
    pub fn add_trait(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.traits.contains(&name) {
            self.traits.push(name);
        }
    }

    /// Get or create the relationship with `name`, defaulting to neutral.
    pub fn relationship_entry(&mut self, name: &str) -> &mut Relationship {
        self.relationships
            .entry(name.to_string())
            .or_insert_with(|| Relationship::new(name, RelationshipKind::Neutral, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_is_untainted() {
        let c = Character::new("Cinder", Tribe::Emberwing, true);
        assert!((c.soul - 100.0).abs() < f32::EPSILON);
        assert_eq!(c.stage, CorruptionStage::Normal);
        assert!(!c.is_ai_controlled);
    }

    #[test]
    fn set_soul_clamps_and_recomputes_stage() {
        let mut c = Character::new("Cinder", Tribe::Emberwing, true);
        c.set_soul(-20.0);
        assert!((c.soul - 0.0).abs() < f32::EPSILON);
        assert_eq!(c.stage, CorruptionStage::Broken);

        c.set_soul(500.0);
        assert!((c.soul - 100.0).abs() < f32::EPSILON);
        assert_eq!(c.stage, CorruptionStage::Normal);
    }

    #[test]
    fn spend_soul_ignores_negative_amounts() {
        let mut c = Character::new("Cinder", Tribe::Emberwing, true);
        c.spend_soul(-50.0);
        assert!((c.soul - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn sanity_clamps_both_ends() {
        let mut c = Character::new("Ripple", Tribe::Tidewing, false);
        c.adjust_sanity(-200.0);
        assert!((c.sanity - 0.0).abs() < f32::EPSILON);
        c.adjust_sanity(500.0);
        assert!((c.sanity - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn tribal_powers_are_innate() {
        let c = Character::new("Cinder", Tribe::Emberwing, false);
        assert!(c.has_power("Fire breath"));
        assert!(!c.has_power("Frost breath"));
    }

    #[test]
    fn special_powers_are_recognized() {
        let mut c = Character::new("Shade", Tribe::Duskwing, false);
        c.special_powers.push("Mind reading".to_string());
        assert!(c.has_power("Mind reading"));
    }

    #[test]
    fn relationship_strength_clamps_to_band() {
        let mut r = Relationship::new("Gale", RelationshipKind::Friend, 95);
        r.adjust_strength(50, -100, 100);
        assert_eq!(r.strength, 100);
        r.adjust_strength(-300, -100, 100);
        assert_eq!(r.strength, -100);
    }

    #[test]
    fn traits_do_not_duplicate() {
        let mut c = Character::new("Cinder", Tribe::Emberwing, true);
        c.add_trait(CORRUPTED_TRAIT);
        c.add_trait(CORRUPTED_TRAIT);
        assert_eq!(c.traits.iter().filter(|t| *t == CORRUPTED_TRAIT).count(), 1);
    }
}
