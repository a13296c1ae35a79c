use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for prerequisite parsing.
///
/// The built-in behaviour needs no configuration; this only tunes the
/// policies that vary between catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct ParserConfig {
    /// Additional qualitative requirement phrases, matched case-insensitively
    /// alongside the built-in vocabulary.
    ///
    /// For example, 'studio review' or 'instructor interview'.
    extra_keywords: Vec<String>,

    /// How to combine several course codes that appear with no connector
    /// word between them (e.g. `"CSE 1010, CSE 1729"`).
    pub juxtaposition: Juxtaposition,

    /// Refuse parenthesized text that the default rules read loosely:
    /// parentheses that do not pair up, and a group containing both `and`
    /// and `or`.
    ///
    /// Off by default, in which case an unmatched parenthesis is ignored and
    /// a group containing `or` is an `or` group.
    pub strict_grouping: bool,
}

/// Policy for course codes listed without a connector word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Juxtaposition {
    /// Every listed course is required.
    #[default]
    And,
    /// Any one listed course is sufficient.
    Or,
    /// Refuse to structure the list.
    Unparsed,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            extra_keywords: Vec::new(),
            juxtaposition: Juxtaposition::default(),
            strict_grouping: false,
        }
    }
}

impl ParserConfig {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the configured extra keywords, lowercased.
    #[must_use]
    pub fn extra_keywords(&self) -> &[String] {
        &self.extra_keywords
    }

    /// Adds a qualitative requirement phrase.
    ///
    /// Phrases are normalized to lowercase and trimmed. Returns `true` if the
    /// phrase was added, `false` if it was blank or already present.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() || self.extra_keywords.contains(&keyword) {
            false
        } else {
            self.extra_keywords.push(keyword);
            true
        }
    }
}

/// Errors that can occur when loading or saving a [`ParserConfig`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The config file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// The path that was read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        /// The path that was parsed.
        path: PathBuf,
        /// The underlying TOML error.
        source: toml::de::Error,
    },

    /// The config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config file could not be written.
    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        /// The path that was written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        extra_keywords: Vec<String>,

        #[serde(default)]
        juxtaposition: Juxtaposition,

        #[serde(default)]
        strict_grouping: bool,
    },
}

impl From<Versions> for ParserConfig {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                extra_keywords,
                juxtaposition,
                strict_grouping,
            } => {
                let mut config = Self {
                    extra_keywords: Vec::new(),
                    juxtaposition,
                    strict_grouping,
                };
                for keyword in &extra_keywords {
                    config.add_keyword(keyword);
                }
                config
            }
        }
    }
}

impl From<ParserConfig> for Versions {
    fn from(config: ParserConfig) -> Self {
        Self::V1 {
            extra_keywords: config.extra_keywords,
            juxtaposition: config.juxtaposition,
            strict_grouping: config.strict_grouping,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nextra_keywords = [\"Studio Review\"]\njuxtaposition = \"or\"\n",
        )
        .unwrap();

        let config = ParserConfig::load(file.path()).unwrap();

        assert_eq!(config.extra_keywords(), &["studio review".to_string()]);
        assert_eq!(config.juxtaposition, Juxtaposition::Or);
        assert!(!config.strict_grouping);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = ParserConfig::load(&missing).unwrap_err();
        assert!(matches!(error, Error::Read { .. }));
        assert!(error.to_string().starts_with("Failed to read config file"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\njuxtaposition = \"sometimes\"\n")
            .unwrap();

        let error = ParserConfig::load(file.path()).unwrap_err();
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = ParserConfig::default();
        let actual: ParserConfig = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("prereq.toml");

        let mut config = ParserConfig::default();
        config.add_keyword("Instructor Interview");
        config.juxtaposition = Juxtaposition::Unparsed;
        config.strict_grouping = true;
        config.save(&path).unwrap();

        assert_eq!(ParserConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn add_keyword_deduplicates() {
        let mut config = ParserConfig::default();
        assert!(config.add_keyword("Studio Review"));
        assert!(!config.add_keyword("  studio review "));
        assert!(!config.add_keyword("   "));
        assert_eq!(config.extra_keywords(), &["studio review".to_string()]);
    }
}
