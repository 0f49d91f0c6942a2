//! Character Types
//!
//! Descriptors for generated non-player characters: identity, story,
//! disabled work, traits and skill passions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a character
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub String);

impl From<&str> for CharacterId {
    fn from(s: &str) -> Self {
        CharacterId(s.to_string())
    }
}

impl From<String> for CharacterId {
    fn from(s: String) -> Self {
        CharacterId(s)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates a character ID from a sequence number.
pub fn generate_character_id(sequence: u64) -> String {
    format!("chr_{:06}", sequence)
}

/// Kind tag handed to the character generator (e.g. "space_refugee").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterKind(pub String);

impl From<&str> for CharacterKind {
    fn from(s: &str) -> Self {
        CharacterKind(s.to_string())
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    None,
    Male,
    Female,
}

/// A character's name in its two rendered forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterName {
    /// e.g. "Mira 'Ash' Halvorsen"
    pub full: String,
    /// e.g. "Ash"
    pub short: String,
}

impl CharacterName {
    pub fn new(full: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            short: short.into(),
        }
    }
}

/// Categories of work a character may be incapable of.
///
/// Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkTag {
    ManualDumb,
    ManualSkilled,
    Violent,
    Caring,
    Social,
    Intellectual,
    Animals,
    Artistic,
    Crafting,
    Cooking,
    Firefighting,
    Cleaning,
    Hauling,
    PlantWork,
    Mining,
}

impl WorkTag {
    /// Returns all variants in display order.
    pub fn all() -> &'static [WorkTag] {
        &[
            WorkTag::ManualDumb,
            WorkTag::ManualSkilled,
            WorkTag::Violent,
            WorkTag::Caring,
            WorkTag::Social,
            WorkTag::Intellectual,
            WorkTag::Animals,
            WorkTag::Artistic,
            WorkTag::Crafting,
            WorkTag::Cooking,
            WorkTag::Firefighting,
            WorkTag::Cleaning,
            WorkTag::Hauling,
            WorkTag::PlantWork,
            WorkTag::Mining,
        ]
    }

    /// Localization key for the label.
    pub fn label_key(self) -> String {
        format!("WorkTag_{:?}", self)
    }

    /// English label, used when no translation is loaded.
    pub fn default_label(self) -> &'static str {
        match self {
            WorkTag::ManualDumb => "Dumb labor",
            WorkTag::ManualSkilled => "Skilled labor",
            WorkTag::Violent => "Violent",
            WorkTag::Caring => "Caring",
            WorkTag::Social => "Social",
            WorkTag::Intellectual => "Intellectual",
            WorkTag::Animals => "Animals",
            WorkTag::Artistic => "Artistic",
            WorkTag::Crafting => "Crafting",
            WorkTag::Cooking => "Cooking",
            WorkTag::Firefighting => "Firefighting",
            WorkTag::Cleaning => "Cleaning",
            WorkTag::Hauling => "Hauling",
            WorkTag::PlantWork => "Plant work",
            WorkTag::Mining => "Mining",
        }
    }
}

/// Skill enthusiasm tier. Only `Minor` and `Major` are ever displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Passion {
    #[default]
    None,
    Minor,
    Major,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub label: String,
    #[serde(default)]
    pub passion: Passion,
}

impl SkillRecord {
    pub fn new(label: impl Into<String>, passion: Passion) -> Self {
        Self {
            label: label.into(),
            passion,
        }
    }
}

/// Everything the incident needs to know about a generated character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDescriptor {
    pub id: CharacterId,
    pub kind: CharacterKind,
    pub name: CharacterName,
    /// Narrative title, e.g. "Bounty Hunter"
    pub title: String,
    pub age_biological_years: u32,
    #[serde(default)]
    pub gender: Gender,
    /// Disabled work categories
    #[serde(default)]
    pub disabled_work: Vec<WorkTag>,
    /// Trait labels, in the character's order
    #[serde(default)]
    pub traits: Vec<String>,
    /// Skills, in the character's order
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    /// Set once the player has been shown this character
    #[serde(default)]
    pub ever_seen_by_player: bool,
}

impl CharacterDescriptor {
    /// Creates a descriptor with empty story details.
    pub fn new(
        id: impl Into<CharacterId>,
        kind: impl Into<CharacterKind>,
        name: CharacterName,
        title: impl Into<String>,
        age_biological_years: u32,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name,
            title: title.into(),
            age_biological_years,
            gender: Gender::None,
            disabled_work: Vec::new(),
            traits: Vec::new(),
            skills: Vec::new(),
            ever_seen_by_player: false,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_disabled_work(mut self, tags: impl IntoIterator<Item = WorkTag>) -> Self {
        self.disabled_work.extend(tags);
        self
    }

    pub fn with_traits<S: Into<String>>(mut self, traits: impl IntoIterator<Item = S>) -> Self {
        self.traits.extend(traits.into_iter().map(Into::into));
        self
    }

    pub fn with_skill(mut self, label: impl Into<String>, passion: Passion) -> Self {
        self.skills.push(SkillRecord::new(label, passion));
        self
    }

    /// Skills with any passion, in the character's order.
    pub fn passionate_skills(&self) -> impl Iterator<Item = &SkillRecord> {
        self.skills.iter().filter(|s| s.passion > Passion::None)
    }
}
