//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (modern UTS-46 processing)
//! 2. Global config: `$XDG_CONFIG_HOME/idnconv/idnconv.toml`
//! 3. Local config: `<dir>/.idnconv.toml` (current directory by default)
//! 4. Environment variables: `IDNCONV_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::ProcessingOptions;

/// Output preferences for the command line tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Print one JSON object per converted domain
    pub json: bool,
}

/// Raw processing options for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawIdnaConfig {
    pub use_std3_ascii_rules: Option<bool>,
    pub check_hyphens: Option<bool>,
    pub check_bidi: Option<bool>,
    pub check_joiners: Option<bool>,
    pub transitional: Option<bool>,
    pub verify_dns_length: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawOutputConfig {
    pub json: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub idna: RawIdnaConfig,
    pub output: RawOutputConfig,
}

/// Unified configuration for idnconv.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// UTS-46 processing flags
    pub idna: ProcessingOptions,
    /// Output preferences
    pub output: OutputConfig,
}

/// Get the XDG config directory for idnconv.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "idnconv").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("idnconv.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".idnconv.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay values win if Some, otherwise keep self.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let base = &self.idna;
        let raw = &overlay.idna;
        Self {
            idna: ProcessingOptions {
                use_std3_ascii_rules: raw
                    .use_std3_ascii_rules
                    .unwrap_or(base.use_std3_ascii_rules),
                check_hyphens: raw.check_hyphens.unwrap_or(base.check_hyphens),
                check_bidi: raw.check_bidi.unwrap_or(base.check_bidi),
                check_joiners: raw.check_joiners.unwrap_or(base.check_joiners),
                transitional: raw.transitional.unwrap_or(base.transitional),
                verify_dns_length: raw.verify_dns_length.unwrap_or(base.verify_dns_length),
            },
            output: OutputConfig {
                json: overlay.output.json.unwrap_or(self.output.json),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.idnconv.toml` (skipped when `None`)
    pub fn load(local_dir: Option<&Path>) -> ApplicationResult<Self> {
        Self::load_from(global_config_path().as_deref(), local_dir, Environment::default())
    }

    /// Load settings from explicit sources.
    ///
    /// `env` is normally `Environment::default()`; tests pass an environment
    /// with a fixed source map instead of the process environment.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
        env: Environment,
    ) -> ApplicationResult<Self> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables
        Self::apply_env_overrides(current, env)
    }

    /// Apply IDNCONV_* environment variables as explicit overrides,
    /// e.g. `IDNCONV_IDNA__TRANSITIONAL=true`.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(env.prefix("IDNCONV").prefix_separator("_").separator("__"))
            .build()
            .map_err(config_err)?;

        let idna = &mut settings.idna;
        for (key, flag) in [
            ("idna.use_std3_ascii_rules", &mut idna.use_std3_ascii_rules),
            ("idna.check_hyphens", &mut idna.check_hyphens),
            ("idna.check_bidi", &mut idna.check_bidi),
            ("idna.check_joiners", &mut idna.check_joiners),
            ("idna.transitional", &mut idna.transitional),
            ("idna.verify_dns_length", &mut idna.verify_dns_length),
        ] {
            if let Ok(val) = config.get_bool(key) {
                *flag = val;
            }
        }
        if let Ok(val) = config.get_bool("output.json") {
            settings.output.json = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# idnconv configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/idnconv/idnconv.toml
#   Local:  ./.idnconv.toml
#   Env:    IDNCONV_* environment variables, e.g. IDNCONV_IDNA__TRANSITIONAL=true
#   Flags:  command line options

[idna]
# Reject ASCII characters outside [a-z0-9-]
# use_std3_ascii_rules = true

# Reject leading/trailing hyphens and "--" in positions 3 and 4
# check_hyphens = true

# Apply the RFC 5893 bidi rule to domains containing right-to-left labels
# check_bidi = true

# Apply the RFC 5892 context rules to ZWJ/ZWNJ
# check_joiners = true

# Map deviation characters (ß, ς, ZWJ, ZWNJ) the IDNA2003 way
# transitional = false

# Reject ASCII domains longer than 253 octets
# verify_dns_length = true

[output]
# Print one JSON object per domain
# json = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
