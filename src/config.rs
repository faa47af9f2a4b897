//! Configuration management for project-board.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the per-directory override file
pub const PROJECT_CONFIG_FILE: &str = ".project-board.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub form: FormConfig,
}

impl BoardConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_root: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.project-board.toml in the working directory)
        if let Some(root) = project_root {
            let project_config = root.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/project-board/config.toml)
        if let Some(dirs) = directories::ProjectDirs::from("com", "project-board", "project-board") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (PROJECT_BOARD__*)
        builder = builder.add_source(
            Environment::with_prefix("PROJECT_BOARD")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the form could never satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        let form = &self.form;
        if form.description_min_length > form.description_max_length {
            return Err(ConfigError::Invalid(format!(
                "form.description_min_length ({}) exceeds form.description_max_length ({})",
                form.description_min_length, form.description_max_length
            )));
        }
        if form.min_people == 0 {
            return Err(ConfigError::Invalid(
                "form.min_people must be at least 1".to_string(),
            ));
        }
        if form.min_people > form.max_people {
            return Err(ConfigError::Invalid(format!(
                "form.min_people ({}) exceeds form.max_people ({})",
                form.min_people, form.max_people
            )));
        }
        Ok(())
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// UI refresh rate in milliseconds
    #[serde(default = "default_refresh_rate_ms")]
    pub refresh_rate_ms: u64,
    /// Enable vim-style navigation (j/k/h/l)
    #[serde(default = "default_true")]
    pub vim_navigation: bool,
    /// Capture the mouse so cards can be dragged with it
    #[serde(default = "default_true")]
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: default_refresh_rate_ms(),
            vim_navigation: true,
            mouse: true,
        }
    }
}

fn default_refresh_rate_ms() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

/// Bounds applied by the new-project form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_description_min_length")]
    pub description_min_length: usize,
    #[serde(default = "default_description_max_length")]
    pub description_max_length: usize,
    #[serde(default = "default_min_people")]
    pub min_people: u32,
    #[serde(default = "default_max_people")]
    pub max_people: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            description_min_length: default_description_min_length(),
            description_max_length: default_description_max_length(),
            min_people: default_min_people(),
            max_people: default_max_people(),
        }
    }
}

fn default_description_min_length() -> usize {
    5
}

fn default_description_max_length() -> usize {
    250
}

fn default_min_people() -> u32 {
    1
}

fn default_max_people() -> u32 {
    30
}
