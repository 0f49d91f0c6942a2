//! Narrative text for the refugee dialog.
//!
//! The text has four sections in fixed order:
//!
//! ```text
//! <intro sentence><relations with colonists>
//!
//!
//! <size=18>Incapable of</size>
//! Violent, social
//!
//! <size=18>Traits</size>
//! Tough
//! Night owl
//!
//! <size=18>Passionate for</size>
//! Shooting (Major), Mining
//! ```
//!
//! Composition is pure: all randomness has been resolved before this point.

use std::fmt;

use incident_events::{CharacterDescriptor, Faction, Passion, WorkTag};

use crate::host::Localizer;
use crate::keys;

/// Heading of the passions section. Not localized.
pub const PASSIONS_HEADING: &str = "Passionate for";

/// Suffix appended to skills with a major passion.
pub const MAJOR_PASSION_SUFFIX: &str = " (Major)";

/// Composed dialog text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeText(String);

impl NarrativeText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NarrativeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TextComposer {
    title_size: u32,
}

impl TextComposer {
    pub fn new(title_size: u32) -> Self {
        Self { title_size }
    }

    pub fn compose<L: Localizer + ?Sized>(
        &self,
        character: &CharacterDescriptor,
        faction: &Faction,
        localizer: &L,
    ) -> NarrativeText {
        let intro = localizer.translate(
            keys::INITIAL,
            &[
                character.name.full.clone(),
                character.title.to_lowercase(),
                faction.pawns_plural.clone(),
                faction.name.clone(),
                character.age_biological_years.to_string(),
            ],
        );
        let mut text = localizer.adjusted_for(&intro, character);
        text.push_str(&localizer.relations_with_colonists(character));

        text.push_str("\n\n\n");
        self.append_stats(&mut text, character, localizer);

        NarrativeText(text)
    }

    fn append_stats<L: Localizer + ?Sized>(
        &self,
        text: &mut String,
        character: &CharacterDescriptor,
        localizer: &L,
    ) {
        text.push_str(&self.heading(&localizer.translate(keys::INCAPABLE_OF, &[])));
        text.push('\n');
        text.push_str(&disabled_work_line(&character.disabled_work, localizer));

        text.push_str("\n\n");

        text.push_str(&self.heading(&localizer.translate(keys::TRAITS, &[])));
        // Newline goes before each trait so the section has no trailing break.
        for label in &character.traits {
            text.push('\n');
            text.push_str(&capitalize_first(label));
        }

        text.push_str("\n\n");

        text.push_str(&self.heading(PASSIONS_HEADING));
        text.push('\n');
        text.push_str(&passions_line(character, localizer));
    }

    /// Wraps a section heading in size markup.
    pub fn heading(&self, title: &str) -> String {
        format!("<size={}>{}</size>", self.title_size, title)
    }
}

/// "Violent, social": first label capitalized, the rest lower-cased.
pub fn disabled_work_line<L: Localizer + ?Sized>(tags: &[WorkTag], localizer: &L) -> String {
    let mut ordered = tags.to_vec();
    ordered.sort();
    ordered.dedup();

    if ordered.is_empty() {
        return none_placeholder(localizer);
    }

    ordered
        .iter()
        .enumerate()
        .map(|(i, tag)| {
            let label = localizer.translate(&tag.label_key(), &[]);
            if i == 0 {
                capitalize_first(&label)
            } else {
                label.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// "Shooting (Major), Mining": passionate skills in the character's order.
pub fn passions_line<L: Localizer + ?Sized>(
    character: &CharacterDescriptor,
    localizer: &L,
) -> String {
    let entries: Vec<String> = character
        .passionate_skills()
        .map(|skill| match skill.passion {
            Passion::Major => format!("{}{}", skill.label, MAJOR_PASSION_SUFFIX),
            _ => skill.label.clone(),
        })
        .collect();

    if entries.is_empty() {
        none_placeholder(localizer)
    } else {
        entries.join(", ")
    }
}

fn none_placeholder<L: Localizer + ?Sized>(localizer: &L) -> String {
    format!("({})", localizer.translate(keys::NONE_LOWER, &[]))
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::StringTable;
    use incident_events::fixtures;

    fn composer() -> TextComposer {
        TextComposer::new(18)
    }

    #[test]
    fn test_disabled_work_first_capitalized_rest_lower() {
        let strings = StringTable::english();
        assert_eq!(
            disabled_work_line(&[WorkTag::Violent, WorkTag::Social], &strings),
            "Violent, social"
        );
    }

    #[test]
    fn test_disabled_work_follows_declaration_order() {
        let strings = StringTable::english();
        assert_eq!(
            disabled_work_line(
                &[WorkTag::Mining, WorkTag::Social, WorkTag::Violent, WorkTag::Social],
                &strings
            ),
            "Violent, social, mining"
        );
    }

    #[test]
    fn test_disabled_work_capitalizes_lowercase_translation() {
        let mut strings = StringTable::english();
        strings.insert(WorkTag::Violent.label_key(), "violent");

        assert_eq!(
            disabled_work_line(&[WorkTag::Violent, WorkTag::Social], &strings),
            "Violent, social"
        );
    }

    #[test]
    fn test_no_disabled_work_placeholder() {
        let strings = StringTable::english();
        assert_eq!(disabled_work_line(&[], &strings), "(none)");
    }

    #[test]
    fn test_passions_skip_none_and_suffix_major() {
        let strings = StringTable::english();
        let character = fixtures::bounty_hunter();

        assert_eq!(passions_line(&character, &strings), "Shooting (Major), Mining");
    }

    #[test]
    fn test_no_passions_placeholder() {
        let strings = StringTable::english();
        // Has skills, none of them with passion
        let character = fixtures::medical_officer();
        assert!(!character.skills.is_empty());

        assert_eq!(passions_line(&character, &strings), "(none)");
    }

    #[test]
    fn test_passion_only_at_end_has_no_stray_separator() {
        let strings = StringTable::english();
        let mut character = fixtures::medical_officer();
        character.skills[1].passion = Passion::Minor;

        assert_eq!(passions_line(&character, &strings), "Social");
    }

    #[test]
    fn test_heading_markup() {
        assert_eq!(composer().heading("Traits"), "<size=18>Traits</size>");
    }

    #[test]
    fn test_full_layout() {
        let strings = StringTable::english();
        let character = fixtures::bounty_hunter();
        let faction = fixtures::get_faction("ashen_pact").unwrap();

        let text = composer().compose(&character, &faction, &strings);

        let intro = strings.adjusted_for(
            &strings.translate(
                keys::INITIAL,
                &[
                    "Mira 'Ash' Halvorsen".to_string(),
                    "bounty hunter".to_string(),
                    "pirates".to_string(),
                    "The Ashen Pact".to_string(),
                    "31".to_string(),
                ],
            ),
            &character,
        );
        let expected = format!(
            "{intro}\n\n\n\
             <size=18>Incapable of</size>\nViolent, social\n\n\
             <size=18>Traits</size>\nTough\nNight owl\n\n\
             <size=18>Passionate for</size>\nShooting (Major), Mining"
        );
        assert_eq!(text.as_str(), expected);
    }

    #[test]
    fn test_intro_uses_lowercased_title_and_faction() {
        let strings = StringTable::english();
        let character = fixtures::bounty_hunter();
        let faction = fixtures::get_faction("iron_tribe").unwrap();

        let text = composer().compose(&character, &faction, &strings).into_string();

        assert!(text.starts_with("Mira 'Ash' Halvorsen, a bounty hunter"));
        assert!(text.contains("tribespeople from Iron Tribe"));
        assert!(text.contains("31 years old"));
        assert!(text.contains("She"));
    }

    #[test]
    fn test_relations_appended_after_intro() {
        let mut strings = StringTable::english();
        let character = fixtures::bounty_hunter();
        strings.set_relations(&character.id, "\n\nAsh is the sister of your colonist Corin.");
        let faction = fixtures::get_faction("ashen_pact").unwrap();

        let text = composer().compose(&character, &faction, &strings).into_string();

        assert!(text.contains("Corin.\n\n\n<size=18>Incapable of</size>"));
    }

    #[test]
    fn test_empty_traits_leave_bare_heading() {
        let strings = StringTable::english();
        let mut character = fixtures::medical_officer();
        character.traits.clear();
        let faction = fixtures::get_faction("ashen_pact").unwrap();

        let text = composer().compose(&character, &faction, &strings).into_string();

        assert!(text.contains("<size=18>Traits</size>\n\n<size=18>Passionate for</size>"));
    }

    #[test]
    fn test_trait_labels_capitalized() {
        let strings = StringTable::english();
        let mut character = fixtures::medical_officer();
        character.traits = vec!["kind".to_string(), "ÿes".to_string()];
        let faction = fixtures::get_faction("ashen_pact").unwrap();

        let text = composer().compose(&character, &faction, &strings).into_string();

        assert!(text.contains("\nKind\nŸes\n"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let strings = StringTable::english();
        let character = fixtures::bounty_hunter();
        let faction = fixtures::get_faction("ashen_pact").unwrap();

        let first = composer().compose(&character, &faction, &strings);
        let second = composer().compose(&character, &faction, &strings);

        assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
    }

    #[test]
    fn test_custom_title_size() {
        let strings = StringTable::english();
        let character = fixtures::medical_officer();
        let faction = fixtures::get_faction("ashen_pact").unwrap();

        let text = TextComposer::new(24).compose(&character, &faction, &strings);

        assert_eq!(text.as_str().matches("<size=24>").count(), 3);
        assert!(!text.as_str().contains("<size=18>"));
    }
}
