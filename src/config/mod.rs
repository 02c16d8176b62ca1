// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the token generator
//!
//! This module provides functionality for loading, validating, and applying
//! configuration settings. The configuration is backed by a YAML file and
//! validated against an embedded JSON schema.
//!
//! ## Configuration Structure
//!
//! - `jwt`: issuer, audience, subject and signing secret of the tokens
//! - `meeting`: the Jitsi Meet domain used to build join URLs
//!
//! Every value must match the verification side of the Jitsi deployment.
//! A mismatch produces tokens that sign fine but are rejected when the
//! participant joins.
//!
//! ## Usage
//!
//! ```no_run
//! use jitsi_token::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(Some("a-secret-of-at-least-32-characters!".to_string()), None);
//!
//! println!("Meeting domain: {}", config.meeting.domain);
//! ```

pub mod jwt;
pub mod meeting;
pub mod utils;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};

pub use jwt::JwtConfig;
pub use meeting::MeetingConfig;
pub use utils::{output_config_schema, validate_specific_rules};

/// JSON schema the YAML configuration is validated against
pub const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Root configuration structure.
///
/// Both sections fall back to their defaults when omitted, so a file only
/// needs to carry the values that differ from them (typically the secret
/// and the domain).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Claims and signing key of the issued tokens.
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Jitsi Meet deployment the tokens are issued for.
    #[serde(default)]
    pub meeting: MeetingConfig,
}

impl Config {
    /// Helper method to create a sample config file when validation fails
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let sample_path = path.as_ref().with_extension("sample.yaml");
        debug!("Creating sample configuration file at {:?}", sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create parent directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file
    ///
    /// A missing file is replaced by the default configuration, which is
    /// written to `path` so it can be edited. An invalid file produces an
    /// error and a `<name>.sample.yaml` file next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        Self::from_yaml_str(&contents).inspect_err(|err| {
            error!("Configuration error in {}: {}", path.display(), err);
            if let Err(e) = Self::create_sample_config(path) {
                error!("Failed to create sample config: {}", e);
            }
        })
    }

    /// Parse and validate a YAML configuration document
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // An empty document is a valid, all-defaults configuration
        let json_value = if contents.trim().is_empty() {
            serde_json::json!({})
        } else {
            let yaml_value: serde_yml::Value =
                serde_yml::from_str(contents).context("Failed to parse YAML configuration")?;
            match yaml_value {
                serde_yml::Value::Null => serde_json::json!({}),
                value => serde_json::to_value(&value)
                    .context("Failed to convert YAML to JSON for validation")?,
            }
        };

        let schema: serde_json::Value =
            serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
        let validator = jsonschema::draft202012::options()
            .should_validate_formats(true)
            .build(&schema)?;

        debug!("Validating configuration against schema");
        if let Err(error) = validator.validate(&json_value) {
            anyhow::bail!("Configuration validation failed: {}", error);
        }

        let config: Config = serde_json::from_value(json_value)
            .context("Failed to deserialize configuration")?;

        validate_specific_rules(&config)?;

        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line arguments to override configuration values.
    ///
    /// Only values that are explicitly provided override the loaded ones.
    ///
    /// # Parameters
    ///
    /// * `secret` - HMAC signing secret (from `--secret` or `JITSI_APP_SECRET`)
    /// * `domain` - Jitsi Meet domain
    pub fn apply_args(&mut self, secret: Option<String>, domain: Option<String>) {
        if let Some(secret) = secret {
            debug!("Overriding JWT secret from command line");
            self.jwt.secret = secret;
        }

        if let Some(domain) = domain {
            debug!("Overriding meeting domain from command line: {}", domain);
            self.meeting.domain = domain;
        }
    }

    /// Value of the `sub` claim, falling back to the meeting domain
    pub fn subject(&self) -> &str {
        self.jwt
            .subject
            .as_deref()
            .unwrap_or(&self.meeting.domain)
    }
}
