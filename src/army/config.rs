//! Layered configuration for the classifier.
//!
//! `defaults/armylist.default.toml` is embedded into the binary so the documented
//! defaults and runtime behavior stay in sync. Callers layer user files and single key
//! overrides on top via [`Loader`] before deserializing into [`Settings`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::army::classifier::{ClassifierConfig, VoteMode};
use crate::army::distance::DistanceWeights;
use crate::army::error::ConfigError;

const DEFAULT_TOML: &str = include_str!("../../defaults/armylist.default.toml");

/// Top-level settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub classifier: ClassifierSettings,
}

/// Mirrors the knobs of [`ClassifierConfig`], flattened for TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierSettings {
    pub k: usize,
    pub vote: VoteMode,
    pub warscroll_weight: u64,
    pub enhancement_weight: u64,
}

impl Settings {
    /// Validate the classifier settings.
    pub fn classifier_config(&self) -> Result<ClassifierConfig, ConfigError> {
        let settings = &self.classifier;
        if settings.k == 0 {
            return Err(ConfigError::ZeroNeighbours);
        }
        Ok(ClassifierConfig {
            k: settings.k,
            vote: settings.vote,
            weights: DistanceWeights::new(settings.warscroll_weight, settings.enhancement_weight),
        })
    }
}

/// Builds [`Settings`] from the embedded defaults, an optional settings file and
/// command-line overrides, later layers winning.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Loader {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a TOML settings file. The file has to exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        let file = File::from(path.as_ref()).format(FileFormat::Toml);
        Loader {
            builder: self.builder.add_source(file),
        }
    }

    /// Number of voting neighbours, as given by `-k`.
    pub fn with_neighbours(self, k: usize) -> Result<Self, ConfigError> {
        let k = i64::try_from(k).unwrap_or(i64::MAX);
        self.set_override("classifier.k", k)
    }

    pub fn with_vote(self, vote: VoteMode) -> Result<Self, ConfigError> {
        let name = match vote {
            VoteMode::Plain => "plain",
            VoteMode::DistanceWeighted => "distance-weighted",
        };
        self.set_override("classifier.vote", name)
    }

    /// Override one dotted key, e.g. `classifier.warscroll_weight`.
    pub fn set_override<I>(self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        Ok(Loader {
            builder: self.builder.set_override(key, value)?,
        })
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        let settings = self.builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings from the embedded defaults alone.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}
