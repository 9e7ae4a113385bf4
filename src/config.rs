//! Configuration loading and parsing for `notes.toml` files.
//!
//! Controls which labels classify issues into release-note sections, how
//! those sections are titled, the optional footer, release exports and the
//! label set managed by the `labels` command.
use log::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    path::Path,
};

use crate::{
    Result, error::NotesError, forge::config::DEFAULT_LABEL_COLOR,
};

/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "notes.toml";
/// Default placeholder replaced by the milestone title in the footer.
pub const DEFAULT_MILESTONE_TOKEN: &str = "{milestone}";

/// Singular and plural section headings for a label.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LabelAlias {
    /// Label name this alias applies to (case-insensitive).
    pub name: String,
    /// Heading used when the section holds a single issue.
    pub header: String,
    /// Heading used when the section holds several issues.
    pub plural: String,
}

/// Release-note creation settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)] // Use default for missing fields
pub struct CreateConfig {
    /// Append a footer section to generated notes (default: false)
    pub include_footer: bool,
    /// Heading of the footer section.
    pub footer_heading: String,
    /// Markdown body of the footer section.
    pub footer_content: String,
    /// Token in `footer_content` replaced with the milestone title. An
    /// empty string disables substitution.
    pub milestone_replace_text: String,
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self {
            include_footer: false,
            footer_heading: "Where to get it".into(),
            footer_content: format!(
                "You can download this release from the releases page of tag {DEFAULT_MILESTONE_TOKEN}"
            ),
            milestone_replace_text: DEFAULT_MILESTONE_TOKEN.into(),
        }
    }
}

/// Release export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Append the release creation date to each exported title.
    pub include_created_date_in_title: bool,
    /// chrono format string used for the creation date.
    pub created_date_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_created_date_in_title: false,
            created_date_format: "%Y-%m-%d".into(),
        }
    }
}

/// Repository label managed by the `labels` command.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LabelConfig {
    pub name: String,
    /// Hex color without a leading `#`.
    #[serde(default = "default_label_color")]
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_label_color() -> String {
    DEFAULT_LABEL_COLOR.into()
}

impl LabelConfig {
    fn new(name: &str, color: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: Some(description.into()),
        }
    }
}

/// Root configuration structure for `notes.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Labels that place an issue in the notes, in section order.
    pub issue_labels_include: Vec<String>,
    /// Labels that keep an issue out of the notes.
    pub issue_labels_exclude: Vec<String>,
    /// Section headings for include labels.
    pub issue_labels_alias: Vec<LabelAlias>,
    /// Release-note creation settings.
    pub create: CreateConfig,
    /// Release export settings.
    pub export: ExportConfig,
    /// Label set created by the `labels` command.
    pub labels: Vec<LabelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            issue_labels_include: vec![
                "Bug".into(),
                "Feature".into(),
                "Improvement".into(),
            ],
            issue_labels_exclude: vec!["Internal Refactoring".into()],
            issue_labels_alias: vec![],
            create: CreateConfig::default(),
            export: ExportConfig::default(),
            labels: vec![
                LabelConfig::new(
                    "Breaking change",
                    "b60205",
                    "Functionality breaking changes",
                ),
                LabelConfig::new("Bug", "ee0701", "Something isn't working"),
                LabelConfig::new(
                    "Documentation",
                    "d4c5f9",
                    "Improvements or additions to documentation",
                ),
                LabelConfig::new(
                    "Feature",
                    "84b6eb",
                    "Request for a new feature",
                ),
                LabelConfig::new(
                    "Improvement",
                    "207de5",
                    "Improvement of an existing feature",
                ),
                LabelConfig::new(
                    "Internal Refactoring",
                    "ffd86e",
                    "Requires a change to the code but no visible effect",
                ),
            ],
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            info!(
                "no configuration found at {}: using default",
                path.display()
            );
            return Ok(Config::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config = Self::parse(&content)?;

        debug!("loaded configuration from {}", path.display());

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for alias in self.issue_labels_alias.iter() {
            let key = alias.name.to_lowercase();
            if !seen.insert(key) {
                return Err(NotesError::invalid_config(format!(
                    "label '{}' has more than one alias",
                    alias.name
                )));
            }
        }

        Ok(())
    }

    /// Case-insensitive alias lookup keyed by label name.
    pub fn alias_map(&self) -> HashMap<String, &LabelAlias> {
        self.issue_labels_alias
            .iter()
            .map(|alias| (alias.name.to_lowercase(), alias))
            .collect()
    }

    /// Every configured include and exclude label, include labels first.
    pub fn classified_labels(&self) -> Vec<String> {
        self.issue_labels_include
            .iter()
            .chain(self.issue_labels_exclude.iter())
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_defaults() {
        let config = Config::default();
        assert!(!config.issue_labels_include.is_empty());
        assert!(!config.create.include_footer);
        assert_eq!(config.create.milestone_replace_text, "{milestone}");
        assert_eq!(config.labels.len(), 6);
    }

    #[test]
    fn parses_partial_config_with_defaults() {
        let config = Config::parse(
            r#"
issue_labels_include = ["bug", "enhancement"]

[[issue_labels_alias]]
name = "bug"
header = "Bug Fix"
plural = "Bug Fixes"

[create]
include_footer = true
"#,
        )
        .unwrap();

        assert_eq!(config.issue_labels_include, vec!["bug", "enhancement"]);
        assert_eq!(config.labels.len(), 6);
        assert_eq!(config.issue_labels_exclude, vec!["Internal Refactoring"]);
        assert!(config.create.include_footer);
        assert_eq!(config.create.footer_heading, "Where to get it");
        assert_eq!(config.export.created_date_format, "%Y-%m-%d");
    }

    #[test]
    fn labels_without_color_use_default() {
        let config = Config::parse(
            r#"
[[labels]]
name = "Question"
"#,
        )
        .unwrap();

        assert_eq!(config.labels.len(), 1);
        assert_eq!(config.labels[0].color, DEFAULT_LABEL_COLOR);
        assert_eq!(config.labels[0].description, None);
    }

    #[test]
    fn alias_lookup_ignores_case() {
        let config = Config::parse(
            r#"
[[issue_labels_alias]]
name = "Bug"
header = "Bug Fix"
plural = "Bug Fixes"
"#,
        )
        .unwrap();

        let aliases = config.alias_map();
        assert_eq!(aliases.get("bug").unwrap().plural, "Bug Fixes");
    }

    #[test]
    fn rejects_duplicate_aliases() {
        let result = Config::parse(
            r#"
[[issue_labels_alias]]
name = "Bug"
header = "Bug Fix"
plural = "Bug Fixes"

[[issue_labels_alias]]
name = "bug"
header = "Defect"
plural = "Defects"
"#,
        );

        assert!(matches!(result, Err(NotesError::InvalidConfig(_))));
    }

    #[test]
    fn accepts_distinct_aliases_and_rejects_case_variants() {
        let config = Config::parse(
            r#"
[[issue_labels_alias]]
name = "Bug"
header = "Bug Fix"
plural = "Bug Fixes"

[[issue_labels_alias]]
name = "Feature"
header = "New Feature"
plural = "New Features"
"#,
        )
        .unwrap();
        assert_eq!(config.alias_map().len(), 2);

        let result = Config::parse(
            r#"
[[issue_labels_alias]]
name = "Feature"
header = "New Feature"
plural = "New Features"

[[issue_labels_alias]]
name = "FEATURE"
header = "Addition"
plural = "Additions"
"#,
        );
        assert!(matches!(
            result,
            Err(NotesError::InvalidConfig(m)) if m.contains("FEATURE")
        ));
    }

    #[tokio::test]
    async fn load_reads_file_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"issue_labels_exclude = [\"wontfix\"]\n")
            .unwrap();
        file.flush().unwrap();

        let config = Config::load(file.path()).await.unwrap();

        assert_eq!(config.issue_labels_exclude, vec!["wontfix"]);
    }

    #[tokio::test]
    async fn load_falls_back_to_defaults_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join(DEFAULT_CONFIG_FILE))
            .await
            .unwrap();

        assert_eq!(config.issue_labels_exclude, vec!["Internal Refactoring"]);
    }
}
