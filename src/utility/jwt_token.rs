// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT Token Creation Utility
//!
//! This module wires the configuration, the [`JwtIssuer`] and the join URL
//! builder together. It is what the `jitsi_token` binary calls, and what
//! other code should use to produce meeting links.

use chrono::{DateTime, Utc};
use log::debug;
use url::Url;

use crate::config::Config;
use crate::error::TokenCreationError;
use crate::jwt::{Clock, IssuerSettings, JoinRequest, JwtIssuer};
use crate::meeting::{build_join_url, meeting_base_url};

/// Parameters required for creating a meeting token
///
/// # Examples
///
/// ```
/// use jitsi_token::utility::jwt_token::TokenCreationParams;
///
/// let params = TokenCreationParams {
///     room: "patient-consultation-123".to_string(),
///     user_name: "Dr. Smith".to_string(),
///     user_email: "dr.smith@clinic.com".to_string(),
///     moderator: true,
/// };
///
/// assert!(params.moderator);
/// ```
#[derive(Debug, Clone)]
pub struct TokenCreationParams {
    /// Room the participant joins
    pub room: String,
    /// Display name of the participant
    pub user_name: String,
    /// Email of the participant
    pub user_email: String,
    /// Grant the moderator role
    pub moderator: bool,
}

impl From<&TokenCreationParams> for JoinRequest {
    fn from(params: &TokenCreationParams) -> Self {
        JoinRequest::new(
            params.room.clone(),
            params.user_name.clone(),
            params.user_email.clone(),
            params.moderator,
        )
    }
}

/// Result of a successful token creation
#[derive(Debug, Clone)]
pub struct TokenCreationResult {
    /// The signed JWT
    pub token: String,
    /// Link that opens the room with the token
    pub join_url: Url,
    pub room: String,
    pub user_name: String,
    pub user_email: String,
    pub moderator: bool,
    /// `iat` claim
    pub issued_at: i64,
    /// `exp` claim
    pub expires_at: i64,
    /// Seconds between `iat` and `exp`
    pub valid_for_seconds: i64,
}

impl TokenCreationResult {
    /// Expiry as a UTC date, if representable
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// Meeting token creator
///
/// # Examples
///
/// ```
/// use jitsi_token::config::Config;
/// use jitsi_token::utility::jwt_token::{TokenCreationParams, TokenCreator};
///
/// let mut config = Config::default();
/// config.jwt.secret = "a-shared-secret-of-32-characters".to_string();
/// config.meeting.domain = "telehealth.example.com".to_string();
///
/// let creator = TokenCreator::new(&config).unwrap();
/// let result = creator
///     .create_token(&TokenCreationParams {
///         room: "patient-consultation-123".to_string(),
///         user_name: "Dr. Smith".to_string(),
///         user_email: "dr.smith@clinic.com".to_string(),
///         moderator: false,
///     })
///     .unwrap();
///
/// assert!(result
///     .join_url
///     .as_str()
///     .starts_with("https://telehealth.example.com/patient-consultation-123?jwt="));
/// ```
#[derive(Debug, Clone)]
pub struct TokenCreator {
    issuer: JwtIssuer,
    base_url: Url,
}

impl TokenCreator {
    /// Creates a new token creator from a loaded configuration
    ///
    /// # Errors
    ///
    /// * [`TokenCreationError::SigningError`] if no secret is configured
    /// * [`TokenCreationError::InvalidMeetingUrl`] if the domain cannot form a URL
    pub fn new(config: &Config) -> Result<Self, TokenCreationError> {
        let settings = IssuerSettings {
            issuer: config.jwt.issuer.clone(),
            audience: config.jwt.audience.clone(),
            subject: config.subject().to_string(),
        };
        debug!("Creating token issuer with settings {:?}", settings);

        let issuer = JwtIssuer::new(settings, config.jwt.secret.as_bytes())?;
        let base_url = meeting_base_url(&config.meeting.domain)?;

        Ok(Self { issuer, base_url })
    }

    /// Replace the time source of the underlying issuer
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.issuer = self.issuer.with_clock(clock);
        self
    }

    pub fn issuer(&self) -> &JwtIssuer {
        &self.issuer
    }

    /// Creates a token and join URL at the clock's current time
    pub fn create_token(
        &self,
        params: &TokenCreationParams,
    ) -> Result<TokenCreationResult, TokenCreationError> {
        self.create_token_at(params, self.issuer.now())
    }

    /// Creates a token and join URL as issued at `now`
    pub fn create_token_at(
        &self,
        params: &TokenCreationParams,
        now: i64,
    ) -> Result<TokenCreationResult, TokenCreationError> {
        let request = JoinRequest::from(params);
        let claims = self.issuer.build_claims(&request, now)?;
        let token = self.issuer.issue_at(&request, now)?;
        let join_url = build_join_url(&self.base_url, &params.room, &token)?;

        Ok(TokenCreationResult {
            token,
            join_url,
            room: params.room.clone(),
            user_name: params.user_name.clone(),
            user_email: params.user_email.clone(),
            moderator: params.moderator,
            issued_at: claims.iat,
            expires_at: claims.exp,
            valid_for_seconds: claims.exp - claims.iat,
        })
    }
}
