//! Configuration loading for the refugee incident.
//!
//! Every setting has a default, so partial TOML files are accepted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::scheduler::{TickRange, DEFAULT_RAID_DELAY};

/// Complete incident configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncidentConfig {
    /// Refugee generation and placement
    #[serde(default)]
    pub refugee: RefugeeConfig,
    /// Narrative text layout
    #[serde(default)]
    pub text: TextConfig,
    /// The raid that follows an accepted refugee
    #[serde(default)]
    pub raid: RaidConfig,
}

impl IncidentConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects settings the incident cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.raid.delay.validate_delay()?;
        if self.raid.points_factor.is_nan() || self.raid.points_factor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "raid.points_factor must be positive, got {}",
                self.raid.points_factor
            )));
        }
        if !(0.0..=1.0).contains(&self.refugee.edge_road_chance) {
            return Err(ConfigError::Invalid(format!(
                "refugee.edge_road_chance must be within 0..=1, got {}",
                self.refugee.edge_road_chance
            )));
        }
        Ok(())
    }
}

/// Refugee generation and placement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefugeeConfig {
    /// Kind tag handed to the character generator
    pub kind: String,
    /// Generator weight for extra relations with existing colonists
    pub relation_with_colonist_weight: f32,
    /// Probability that edge sampling prefers road-adjacent cells
    pub edge_road_chance: f32,
}

impl Default for RefugeeConfig {
    fn default() -> Self {
        Self {
            kind: "space_refugee".to_string(),
            relation_with_colonist_weight: 20.0,
            edge_road_chance: 0.75,
        }
    }
}

/// Narrative text layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Markup size of the section headings
    pub title_size: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { title_size: 18 }
    }
}

/// Settings for the raid queued when the refugee is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaidConfig {
    /// Multiplier applied to the storyteller's point budget
    pub points_factor: f32,
    /// Ticks between acceptance and the raid, inclusive
    pub delay: TickRange,
}

impl Default for RaidConfig {
    fn default() -> Self {
        Self {
            points_factor: 1.35,
            delay: DEFAULT_RAID_DELAY,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Refugee Incident Configuration

[refugee]
kind = "space_refugee"
relation_with_colonist_weight = 20.0
edge_road_chance = 0.75

[text]
title_size = 18

[raid]
points_factor = 1.35

[raid.delay]
min = 1000
max = 2500
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = IncidentConfig::default();

        assert_eq!(config.raid.points_factor, 1.35);
        assert_eq!(config.raid.delay, TickRange::new(1000, 2500));
        assert_eq!(config.text.title_size, 18);
        assert_eq!(config.refugee.relation_with_colonist_weight, 20.0);
        assert_eq!(config.refugee.kind, "space_refugee");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = IncidentConfig::from_str(&default_config_toml()).unwrap();
        assert_eq!(config, IncidentConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            [raid]
            points_factor = 2.0
        "#;

        let config = IncidentConfig::from_str(toml).unwrap();

        // Specified value
        assert_eq!(config.raid.points_factor, 2.0);
        // Default values
        assert_eq!(config.raid.delay, TickRange::new(1000, 2500));
        assert_eq!(config.text.title_size, 18);
    }

    #[test]
    fn test_inverted_delay_rejected() {
        let toml = r#"
            [raid.delay]
            min = 3000
            max = 2000
        "#;

        let err = IncidentConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_delay_rejected() {
        let toml = r#"
            [raid.delay]
            min = 0
            max = 10
        "#;

        assert!(matches!(
            IncidentConfig::from_str(toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_non_positive_points_factor_rejected() {
        let toml = r#"
            [raid]
            points_factor = 0.0
        "#;

        assert!(IncidentConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = IncidentConfig::from_str("[raid\npoints_factor = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = IncidentConfig::default();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[raid]"));
        assert_eq!(IncidentConfig::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[text]\ntitle_size = 24").unwrap();

        let config = IncidentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.text.title_size, 24);
    }

    #[test]
    fn test_missing_file() {
        let err = IncidentConfig::from_file(Path::new("/nonexistent/refugee.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
