// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT claim structures for Jitsi meeting tokens
//!
//! This module defines the claim set understood by the Jitsi Prosody
//! `token` authentication module: the standard registered claims plus the
//! `room` claim and the `context.user` identity block.

use serde::{Deserialize, Serialize};

/// Jitsi meeting token claims
///
/// Field order matches the payload produced by the historical OpenEMR
/// generators, so that tokens stay byte-identical for identical inputs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MeetingClaims {
    /// Issuer
    ///
    /// Must be listed in the deployment's accepted issuers.
    pub iss: String,

    /// Audience
    ///
    /// Must be listed in the deployment's accepted audiences.
    pub aud: String,

    /// Subject
    ///
    /// The conferencing domain or tenant the token is valid for.
    pub sub: String,

    /// Room the token grants access to, exactly as supplied by the caller
    pub room: String,

    /// Identity context of the participant
    pub context: ClaimContext,

    /// Issued at timestamp (Unix seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix seconds)
    pub exp: i64,

    /// Not before timestamp (Unix seconds)
    ///
    /// Backdated from `iat` to absorb clock skew between issuer and verifier.
    pub nbf: i64,
}

/// The `context` claim
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClaimContext {
    pub user: UserContext,
}

/// The `context.user` claim
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserContext {
    /// Display name shown in the conference
    pub name: String,

    /// Email address, used by Jitsi for the avatar lookup. Not validated.
    pub email: String,

    /// Whether the participant gets the moderator role.
    ///
    /// Encoded as the JSON strings `"true"` / `"false"`, which is what the
    /// Prosody token module compares against.
    #[serde(with = "string_bool")]
    pub moderator: bool,
}

impl MeetingClaims {
    /// Whether the token grants the moderator role
    pub fn is_moderator(&self) -> bool {
        self.context.user.moderator
    }

    /// Length of the validity window, `nbf` to `exp`, in seconds
    pub fn validity_window(&self) -> i64 {
        self.exp - self.nbf
    }
}

/// Serialize a `bool` as the strings `"true"` / `"false"`
mod string_bool {
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        match value.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::invalid_value(
                de::Unexpected::Str(other),
                &"\"true\" or \"false\"",
            )),
        }
    }
}
