//! Faction Types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier for a faction
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactionId(pub String);

impl From<&str> for FactionId {
    fn from(s: &str) -> Self {
        FactionId(s.to_string())
    }
}

impl From<String> for FactionId {
    fn from(s: String) -> Self {
        FactionId(s)
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named group with a disposition towards other factions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    /// Unique identifier
    pub id: FactionId,
    /// Display name, e.g. "The Ashen Pact"
    pub name: String,
    /// Plural demonym for members, e.g. "pirates"
    pub pawns_plural: String,
    /// Hidden factions never appear to the player
    #[serde(default)]
    pub hidden: bool,
    /// Factions this one is currently hostile to
    #[serde(default)]
    pub hostile_to: BTreeSet<FactionId>,
}

impl Faction {
    pub fn new(
        id: impl Into<FactionId>,
        name: impl Into<String>,
        pawns_plural: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pawns_plural: pawns_plural.into(),
            hidden: false,
            hostile_to: BTreeSet::new(),
        }
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn hostile_towards(mut self, other: impl Into<FactionId>) -> Self {
        self.hostile_to.insert(other.into());
        self
    }

    /// A faction is never hostile to itself.
    pub fn is_hostile_to(&self, other: &FactionId) -> bool {
        *other != self.id && self.hostile_to.contains(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostility() {
        let pirates = Faction::new("pirates", "Ashen Pact", "pirates").hostile_towards("player");

        assert!(pirates.is_hostile_to(&FactionId::from("player")));
        assert!(!pirates.is_hostile_to(&FactionId::from("traders")));
    }

    #[test]
    fn test_never_hostile_to_self() {
        let odd = Faction::new("odd", "Odd Ones", "odd ones").hostile_towards("odd");
        assert!(!odd.is_hostile_to(&FactionId::from("odd")));
    }
}
