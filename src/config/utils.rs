// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Config, CONFIG_SCHEMA};
use crate::meeting::meeting_base_url;

/// Marker left in the secret of the sample deployment files
const PLACEHOLDER_SECRET_MARKER: &str = "CHANGE_ME";

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./jitsi_token --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Validates the configuration against additional rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **Claims**: issuer and audience must not be blank
/// - **Domain**: must be a bare host name that forms a valid `https://` URL
/// - **Secret**: an empty secret is accepted here and rejected when signing, so that a
///   freshly generated default configuration still loads. A placeholder secret only
///   produces a warning, the length is reported when the signing key is built.
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    if config.jwt.issuer.trim().is_empty() {
        anyhow::bail!("JWT issuer must not be blank");
    }
    if config.jwt.audience.trim().is_empty() {
        anyhow::bail!("JWT audience must not be blank");
    }
    if let Some(subject) = &config.jwt.subject {
        if subject.trim().is_empty() {
            anyhow::bail!("JWT subject must not be blank when provided");
        }
    }

    let domain = &config.meeting.domain;
    if domain.contains("://") || domain.contains('/') {
        anyhow::bail!(
            "Meeting domain must be a host name without scheme or path: {}",
            domain
        );
    }
    meeting_base_url(domain)
        .with_context(|| format!("Invalid meeting domain: {}", domain))?;

    // Length is checked once, when the signing key is built
    let secret = &config.jwt.secret;
    if secret.is_empty() {
        debug!("No JWT secret configured, tokens cannot be issued until one is provided");
    } else if secret.contains(PLACEHOLDER_SECRET_MARKER) {
        warn!("JWT secret still contains the {} placeholder", PLACEHOLDER_SECRET_MARKER);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes() {
        assert!(validate_specific_rules(&Config::default()).is_ok());
    }

    #[test]
    fn test_domain_with_scheme_is_rejected() {
        let mut config = Config::default();
        config.meeting.domain = "https://meet.example.com".to_string();
        assert!(validate_specific_rules(&config).is_err());

        config.meeting.domain = "meet.example.com/rooms".to_string();
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_domain_with_invalid_host_is_rejected() {
        let mut config = Config::default();
        config.meeting.domain = "meet example com".to_string();
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_blank_claims_are_rejected() {
        let mut config = Config::default();
        config.jwt.issuer = "   ".to_string();
        assert!(validate_specific_rules(&config).is_err());

        let mut config = Config::default();
        config.jwt.subject = Some(String::new());
        assert!(validate_specific_rules(&config).is_err());
    }

    #[test]
    fn test_short_secret_is_only_a_warning() {
        let mut config = Config::default();
        config.jwt.secret = "short".to_string();
        assert!(validate_specific_rules(&config).is_ok());
    }
}
