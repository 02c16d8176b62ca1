// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT issuer for Jitsi meeting tokens
//!
//! [`JwtIssuer`] turns a [`JoinRequest`] into a compact HS256 token. The
//! issuer is immutable once built and holds no interior state, so a single
//! instance can be shared between threads.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, Header, Validation};
use log::debug;

use super::claims::{ClaimContext, MeetingClaims, UserContext};
use super::clock::{Clock, SystemClock};
use super::keys::JwtKeyConfig;
use crate::error::TokenCreationError;

/// Validity of an issued token, counted from `iat`
pub const TOKEN_VALIDITY_SECS: i64 = 3600;

/// Backdating of `nbf` relative to `iat`
pub const CLOCK_SKEW_SECS: i64 = 10;

/// Deployment-level claim values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuerSettings {
    pub issuer: String,
    pub audience: String,
    pub subject: String,
}

/// Who joins which room, and in which role
///
/// None of the fields are validated: they are embedded verbatim, and an
/// empty room or name is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub room: String,
    pub user_name: String,
    pub user_email: String,
    pub moderator: bool,
}

impl JoinRequest {
    pub fn new(
        room: impl Into<String>,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
        moderator: bool,
    ) -> Self {
        Self {
            room: room.into(),
            user_name: user_name.into(),
            user_email: user_email.into(),
            moderator,
        }
    }
}

/// Signs Jitsi meeting tokens with a shared HMAC secret
#[derive(Clone)]
pub struct JwtIssuer {
    settings: IssuerSettings,
    keys: Arc<JwtKeyConfig>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtIssuer")
            .field("settings", &self.settings)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl JwtIssuer {
    /// Create a new issuer signing with HS256 and reading the system clock
    ///
    /// # Errors
    ///
    /// Returns [`TokenCreationError::SigningError`] if `secret` is empty.
    pub fn new(settings: IssuerSettings, secret: &[u8]) -> Result<Self, TokenCreationError> {
        let keys = JwtKeyConfig::new_symmetric(secret, Algorithm::HS256)?;
        Ok(Self {
            settings,
            keys: Arc::new(keys),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source used by [`issue`](Self::issue) and [`verify`](Self::verify)
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn settings(&self) -> &IssuerSettings {
        &self.settings
    }

    /// Current time according to the issuer's clock
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Build the claim set for `request` as issued at `now`
    ///
    /// Fails with [`TokenCreationError::SigningError`] when `now` is so close to
    /// the `i64` range limits that `nbf` or `exp` cannot be represented.
    pub fn build_claims(
        &self,
        request: &JoinRequest,
        now: i64,
    ) -> Result<MeetingClaims, TokenCreationError> {
        let (exp, nbf) = match (
            now.checked_add(TOKEN_VALIDITY_SECS),
            now.checked_sub(CLOCK_SKEW_SECS),
        ) {
            (Some(exp), Some(nbf)) => (exp, nbf),
            _ => {
                return Err(TokenCreationError::SigningError {
                    reason: format!("issue time {} is out of the representable range", now),
                })
            }
        };

        Ok(MeetingClaims {
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            sub: self.settings.subject.clone(),
            room: request.room.clone(),
            context: ClaimContext {
                user: UserContext {
                    name: request.user_name.clone(),
                    email: request.user_email.clone(),
                    moderator: request.moderator,
                },
            },
            iat: now,
            exp,
            nbf,
        })
    }

    /// Sign a token for `request` as issued at `now`
    ///
    /// Identical inputs and `now` always produce the same token.
    pub fn issue_at(&self, request: &JoinRequest, now: i64) -> Result<String, TokenCreationError> {
        let claims = self.build_claims(request, now)?;
        debug!(
            "Issuing token for room '{}' (moderator: {}), valid until {}",
            claims.room, claims.context.user.moderator, claims.exp
        );

        jsonwebtoken::encode(
            &Header::new(self.keys.algorithm),
            &claims,
            &self.keys.encoding_key,
        )
        .map_err(|e| TokenCreationError::SigningError {
            reason: e.to_string(),
        })
    }

    /// Sign a token for `request` at the clock's current time
    pub fn issue(&self, request: &JoinRequest) -> Result<String, TokenCreationError> {
        self.issue_at(request, self.clock.now())
    }

    /// Verify a token issued with the same secret and settings
    ///
    /// Checks the signature, `iss`, `aud` and `sub`, then the `nbf`/`exp`
    /// window against the issuer's clock without extra leeway.
    pub fn verify(&self, token: &str) -> Result<MeetingClaims, TokenCreationError> {
        let mut validation = Validation::new(self.keys.algorithm);
        validation.set_issuer(&[self.settings.issuer.as_str()]);
        validation.set_audience(&[self.settings.audience.as_str()]);
        validation.sub = Some(self.settings.subject.clone());
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        // Temporal checks use the injected clock below
        validation.validate_exp = false;
        validation.validate_nbf = false;

        let data = jsonwebtoken::decode::<MeetingClaims>(token, &self.keys.decoding_key, &validation)
            .map_err(|e| TokenCreationError::VerificationError {
                reason: e.to_string(),
            })?;
        let claims = data.claims;

        let now = self.clock.now();
        if now < claims.nbf {
            return Err(TokenCreationError::VerificationError {
                reason: format!("token not valid before {} (now {})", claims.nbf, now),
            });
        }
        if now >= claims.exp {
            return Err(TokenCreationError::VerificationError {
                reason: format!("token expired at {} (now {})", claims.exp, now),
            });
        }

        Ok(claims)
    }
}

/// Issue a single token without keeping an issuer around
pub fn issue_token(
    request: &JoinRequest,
    settings: &IssuerSettings,
    secret: &[u8],
    now: i64,
) -> Result<String, TokenCreationError> {
    JwtIssuer::new(settings.clone(), secret)?.issue_at(request, now)
}
