// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Conferencing endpoint configuration

use serde::{Deserialize, Serialize};

/// Location of the Jitsi Meet deployment that consumes the tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingConfig {
    /// Host name of the Jitsi Meet web frontend, without scheme or path.
    ///
    /// Join URLs are built as `https://<domain>/<room>?jwt=<token>`.
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_domain() -> String {
    "meet.example.com".to_string()
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            domain: default_domain(),
        }
    }
}
