// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT issuance configuration
//!
//! This module defines the deployment-level values embedded into every
//! token. They must match the `JWT_APP_SECRET`, `JWT_ACCEPTED_ISSUERS` and
//! `JWT_ACCEPTED_AUDIENCES` settings of the Jitsi Prosody token module,
//! otherwise the conferencing server rejects the tokens even though
//! signing succeeds.

use serde::{Deserialize, Serialize};

/// Token issuer settings for the Jitsi deployment.
///
/// ### Security
///
/// The `secret` is a shared HMAC key. Anyone holding it can mint tokens for
/// any room, so it should be at least 32 characters long and never be
/// committed alongside the configuration file.
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Value of the `iss` claim.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Value of the `aud` claim.
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Value of the `sub` claim.
    ///
    /// When absent, the meeting domain is used, which is what a single
    /// tenant Jitsi deployment expects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// HMAC-SHA-256 signing secret.
    ///
    /// Empty by default: a freshly generated configuration cannot issue tokens
    /// until a secret is provided here or with `--secret` / `JITSI_APP_SECRET`.
    #[serde(default)]
    pub secret: String,
}

fn default_issuer() -> String {
    "openemr".to_string()
}

fn default_audience() -> String {
    "openemr_telehealth".to_string()
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
            audience: default_audience(),
            subject: None,
            secret: String::new(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("subject", &self.subject)
            .field("secret", &"<redacted>")
            .finish()
    }
}
