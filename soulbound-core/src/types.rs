//! Core type definitions for the Soulbound engine.
//!
//! All types are serializable; catalogs built from them are data-only and
//! safe to share read-only across sessions.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for a play session (one character + one game state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tribes
// ---------------------------------------------------------------------------

/// The seven dragon tribes. Fixed enumeration; hybrids carry 2–3 of these
/// with the primary tribe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tribe {
    /// Volcanic highlands; fire-breathers.
    Emberwing,
    /// Coastal and deep-sea dwellers.
    Tidewing,
    /// Mountain-peak fliers.
    Galewing,
    /// Cave and canyon burrowers.
    Stonewing,
    /// Polar dragons.
    Frostwing,
    /// Jungle dragons with venomous fangs.
    Venomwing,
    /// Nocturnal dragons; the tribe most prone to prophecy.
    Duskwing,
}

impl Tribe {
    /// All tribes, in canonical order.
    pub const ALL: [Tribe; 7] = [
        Tribe::Emberwing,
        Tribe::Tidewing,
        Tribe::Galewing,
        Tribe::Stonewing,
        Tribe::Frostwing,
        Tribe::Venomwing,
        Tribe::Duskwing,
    ];

    /// Innate tribal powers. Every member of the tribe possesses these;
    /// the agent's tribal-power category and `Condition::HasPower` both
    /// consult this table.
    #[must_use]
    pub fn powers(self) -> &'static [&'static str] {
        match self {
            Tribe::Emberwing => &["Fire breath", "Heat resistance"],
            Tribe::Tidewing => &["Water breathing", "Bioluminescent scales"],
            Tribe::Galewing => &["Storm flight", "Wind sense"],
            Tribe::Stonewing => &["Earth sense", "Armored hide"],
            Tribe::Frostwing => &["Frost breath", "Cold resistance"],
            Tribe::Venomwing => &["Venomous fangs", "Camouflage scales"],
            Tribe::Duskwing => &["Night vision", "Shadow melding"],
        }
    }
}

impl fmt::Display for Tribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tribe::Emberwing => "Emberwing",
            Tribe::Tidewing => "Tidewing",
            Tribe::Galewing => "Galewing",
            Tribe::Stonewing => "Stonewing",
            Tribe::Frostwing => "Frostwing",
            Tribe::Venomwing => "Venomwing",
            Tribe::Duskwing => "Duskwing",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// In-game season. Advances cyclically; age increments on each Spring
/// rollover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    /// Hatching season. Ages increment here.
    Spring,
    /// The long hunt.
    Summer,
    /// Storing season.
    Fall,
    /// The lean months.
    Winter,
}

impl Season {
    /// The season that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Fall,
            Season::Fall => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Corruption
// ---------------------------------------------------------------------------

/// Discrete corruption stage derived from soul percentage.
///
/// Always recomputed from the soul value via [`crate::corruption::soul_stage`];
/// never hand-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CorruptionStage {
    /// Soul ≥ 75 — untainted.
    Normal,
    /// Soul ≥ 50 — the edges are wearing thin.
    Frayed,
    /// Soul ≥ 25 — cruelty comes easily now.
    Twisted,
    /// Soul < 25 — very little of the original self remains.
    Broken,
}

impl fmt::Display for CorruptionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CorruptionStage::Normal => "Normal",
            CorruptionStage::Frayed => "Frayed",
            CorruptionStage::Twisted => "Twisted",
            CorruptionStage::Broken => "Broken",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// The kind of bond between the character and another dragon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// A positive bond.
    Friend,
    /// Competitive, not yet hostile.
    Rival,
    /// Openly hostile.
    Enemy,
    /// No particular standing.
    Neutral,
    /// A courting bond; may escalate to mate.
    Romantic,
    /// A mate bond. The character's `mate` field references one of these.
    Mate,
    /// A former mate. Romantic bonds demote here, never back to neutral.
    ExMate,
}

// ---------------------------------------------------------------------------
// Scenario classification
// ---------------------------------------------------------------------------

/// Closed scenario category. The pipeline's relationship effects match
/// exhaustively on this tag rather than sniffing scenario-id strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioCategory {
    /// Everyday survival: hunting, weather, territory.
    Mundane,
    /// Gatherings and encounters. May create friends.
    Social,
    /// Courtship scenes. May create romantic bonds.
    Romance,
    /// Tribe ceremonies and duties.
    Tribal,
    /// Battles and skirmishes. May create rivals.
    War,
    /// Court intrigue. May create rivals.
    Political,
    /// Animus magic and its temptations.
    Magical,
    /// Visions and omens.
    Prophetic,
    /// Rare, world-shaking events.
    Extraordinary,
}

/// Time-of-day flavor stamped onto a generated scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Midday,
    Dusk,
    Night,
}

impl TimeOfDay {
    /// All values, for uniform sampling.
    pub const ALL: [TimeOfDay; 5] = [
        TimeOfDay::Dawn,
        TimeOfDay::Morning,
        TimeOfDay::Midday,
        TimeOfDay::Dusk,
        TimeOfDay::Night,
    ];
}

/// Weather flavor stamped onto a generated scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Weather {
    Clear,
    Overcast,
    Rain,
    Storm,
    Fog,
}

impl Weather {
    /// All values, for uniform sampling.
    pub const ALL: [Weather; 5] = [
        Weather::Clear,
        Weather::Overcast,
        Weather::Rain,
        Weather::Storm,
        Weather::Fog,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasons_cycle() {
        assert_eq!(Season::Spring.next(), Season::Summer);
        assert_eq!(Season::Winter.next(), Season::Spring);
        let mut s = Season::Spring;
        for _ in 0..4 {
            s = s.next();
        }
        assert_eq!(s, Season::Spring);
    }

    #[test]
    fn every_tribe_has_powers() {
        for tribe in Tribe::ALL {
            assert!(!tribe.powers().is_empty(), "{tribe} has no powers");
        }
    }

    #[test]
    fn stages_order_by_severity() {
        assert!(CorruptionStage::Normal < CorruptionStage::Frayed);
        assert!(CorruptionStage::Frayed < CorruptionStage::Twisted);
        assert!(CorruptionStage::Twisted < CorruptionStage::Broken);
    }
}
