//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (production environment, no credentials)
//! 2. Home config: `~/.dwolla.{toml,yml,yaml,json}`
//! 3. Working directory config: `./.dwolla.{toml,yml,yaml,json}`
//!    (2 and 3 are replaced by the single file given with `--config`)
//! 4. Environment variables: `DWOLLA_*` prefix
//! 5. Command-line flags: `--key`, `--secret`, `--environment`

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment, File};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{describe_with, Describe, DomainError, Field, FieldSpec};

/// Base name (without extension) of the config file.
pub const CONFIG_BASENAME: &str = ".dwolla";

/// File formats probed for each config file base.
pub const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yml", "yaml", "json"];

/// Target API environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    #[default]
    Production,
    Sandbox,
}

impl ApiEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiEnvironment::Production => "production",
            ApiEnvironment::Sandbox => "sandbox",
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            ApiEnvironment::Production => "https://api.dwolla.com",
            ApiEnvironment::Sandbox => "https://api-sandbox.dwolla.com",
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiEnvironment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(ApiEnvironment::Production),
            "sandbox" => Ok(ApiEnvironment::Sandbox),
            other => Err(DomainError::InvalidEnvironment(other.to_string())),
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub environment: Option<String>,
}

/// Resolved credentials needed to construct the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

/// Unified configuration for the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API key (client id); `apiKey` in older files
    #[serde(alias = "apikey")]
    pub api_key: Option<String>,
    /// API secret; `apiSecret` in older files
    #[serde(alias = "apisecret")]
    pub api_secret: Option<String>,
    /// production or sandbox
    pub environment: ApiEnvironment,
    /// Override the API host (e.g. a local mock server)
    pub base_url: Option<String>,
}

/// Candidate config file bases (no extension), lowest precedence first.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dirs) = BaseDirs::new() {
        paths.push(dirs.home_dir().join(CONFIG_BASENAME));
    }
    paths.push(PathBuf::from(CONFIG_BASENAME));
    paths
}

/// The file a config base resolves to: the path itself when it names a file,
/// otherwise the first `<base>.<ext>` that exists.
pub fn existing_config_file(base: &Path) -> Option<PathBuf> {
    if base.is_file() {
        return Some(base.to_path_buf());
    }
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| PathBuf::from(format!("{}.{ext}", base.display())))
        .find(|path| path.is_file())
}

/// Default target for `config init`.
pub fn default_config_file() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(format!("{CONFIG_BASENAME}.toml")))
}

/// Expand `~` and `$VAR` in a user supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the default search locations are optional.
    pub fn load(config_file: Option<&Path>) -> ApplicationResult<Self> {
        match config_file {
            Some(path) => Self::load_from(&[expand_path(path)], true),
            None => Self::load_from(&search_paths(), false),
        }
    }

    /// Load defaults, then `files` in order, then `DWOLLA_*` environment variables.
    pub fn load_from(files: &[PathBuf], required: bool) -> ApplicationResult<Self> {
        let mut builder = Config::builder()
            .set_default("environment", ApiEnvironment::default().as_str())
            .map_err(config_err)?;

        for file in files {
            match existing_config_file(file) {
                Some(path) => info!("Using config file: {}", path.display()),
                None => debug!("no config file at {}", file.display()),
            }
            builder = builder.add_source(File::from(file.as_path()).required(required));
        }

        builder = builder.add_source(Environment::with_prefix("DWOLLA"));

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: &Overrides) -> ApplicationResult<Self> {
        if let Some(key) = non_empty(&overrides.api_key) {
            self.api_key = Some(key);
        }
        if let Some(secret) = non_empty(&overrides.api_secret) {
            self.api_secret = Some(secret);
        }
        if let Some(environment) = non_empty(&overrides.environment) {
            self.environment = environment.parse()?;
        }
        Ok(self)
    }

    /// API host for the selected environment, unless overridden.
    pub fn base_url(&self) -> String {
        non_empty(&self.base_url).unwrap_or_else(|| self.environment.base_url().to_string())
    }

    /// Credentials for the API client; missing values are configuration errors.
    pub fn credentials(&self) -> ApplicationResult<Credentials> {
        let api_key = non_empty(&self.api_key).ok_or(ApplicationError::MissingCredential {
            name: "key",
            env: "DWOLLA_API_KEY",
            flag: "key",
        })?;
        let api_secret =
            non_empty(&self.api_secret).ok_or(ApplicationError::MissingCredential {
                name: "secret",
                env: "DWOLLA_API_SECRET",
                flag: "secret",
            })?;
        Ok(Credentials {
            api_key,
            api_secret,
            base_url: self.base_url(),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dwolla configuration
#
# Locations (by precedence, lowest to highest):
#   ~/.dwolla.toml   (also .yml, .yaml, .json)
#   ./.dwolla.toml   (working directory)
#   DWOLLA_API_KEY, DWOLLA_API_SECRET, DWOLLA_ENVIRONMENT
#   --key, --secret, --environment
#
# A file given with --config replaces both file locations.

# api_key = ""
# api_secret = ""

# production or sandbox
environment = "sandbox"
"#
        .to_string()
    }
}

fn mask(value: &Option<String>, visible: usize) -> String {
    match non_empty(value) {
        Some(v) if v.chars().count() > visible * 2 => {
            let head: String = v.chars().take(visible).collect();
            format!("{head}********")
        }
        Some(_) => "********".to_string(),
        None => String::new(),
    }
}

#[rustfmt::skip]
const SETTINGS_FIELDS: &[FieldSpec<Settings>] = &[
    FieldSpec { label: "API Key", value: |s| mask(&s.api_key, 4) },
    FieldSpec { label: "API Secret", value: |s| mask(&s.api_secret, 0) },
    FieldSpec { label: "Environment", value: |s| s.environment.to_string() },
    FieldSpec { label: "Base URL", value: |s| s.base_url() },
];

/// Effective settings view with credentials masked.
impl Describe for Settings {
    fn fields(&self) -> Vec<Field> {
        describe_with(self, SETTINGS_FIELDS)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
