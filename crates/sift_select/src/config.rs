//! Searchable select configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! debounce_ms = 150
//! commit_on_tab = false
//! stop_key_propagation = true
//!
//! [classes]
//! root = "searchable-select"
//! option = "option"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Behavior switches and markup contract for searchable selects
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Delay between the last keystroke and the filter pass
    pub debounce_ms: u64,
    /// Whether Tab commits the focused option like Enter does
    pub commit_on_tab: bool,
    /// Whether handled navigation keys stop propagating to ancestors
    pub stop_key_propagation: bool,
    /// Marker classes read from and written to the markup
    pub classes: MarkerClasses,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            commit_on_tab: false,
            stop_key_propagation: true,
            classes: MarkerClasses::default(),
        }
    }
}

impl SelectConfig {
    /// Configuration matching the minimal widget: Tab commits too
    pub fn minimal() -> Self {
        Self {
            commit_on_tab: true,
            ..Self::default()
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded select config from {}", path.display());
        Ok(config)
    }
}

/// Class names that make up the markup contract
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerClasses {
    /// Widget root container
    pub root: String,
    /// Option list container
    pub options: String,
    /// A selectable option
    pub option: String,
    /// Footer holding the show-all affordance
    pub footer: String,
    /// The show-all affordance
    pub show_all: String,
    /// Written to the keyboard-highlighted option
    pub focused: String,
    /// Written to the committed option
    pub selected: String,
    /// Written to the option list while the dropdown is open
    pub open: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            root: "searchable-select".to_string(),
            options: "options".to_string(),
            option: "option".to_string(),
            footer: "options-footer".to_string(),
            show_all: "options-show-all".to_string(),
            focused: "active".to_string(),
            selected: "selected".to_string(),
            open: "active".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(150));
        assert!(!config.commit_on_tab);
        assert!(config.stop_key_propagation);
        assert_eq!(config.classes.root, "searchable-select");
        assert!(SelectConfig::minimal().commit_on_tab);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = SelectConfig::from_toml_str("").unwrap();
        assert_eq!(config, SelectConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = SelectConfig::from_toml_str(
            r#"
            debounce_ms = 300
            commit_on_tab = true

            [classes]
            option = "choice"
            "#,
        )
        .unwrap();

        assert_eq!(config.debounce_ms, 300);
        assert!(config.commit_on_tab);
        assert!(config.stop_key_propagation);
        assert_eq!(config.classes.option, "choice");
        assert_eq!(config.classes.options, "options");
    }

    #[test]
    fn test_invalid_toml() {
        let err = SelectConfig::from_toml_str("debounce_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, crate::SelectError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SelectConfig::load(Path::new("/nonexistent/sift.toml")).unwrap_err();
        assert!(matches!(err, crate::SelectError::Io(_)));
    }
}
