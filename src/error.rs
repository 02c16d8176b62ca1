// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use thiserror::Error;

/// Specific errors for token creation
#[derive(Error, Debug)]
pub enum TokenCreationError {
    #[error("Configuration loading failed: {source}")]
    ConfigError {
        #[from]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid command line: {reason}")]
    UsageError { reason: String },

    #[error("Error generating JWT token: {reason}")]
    SigningError { reason: String },

    #[error("Invalid meeting URL: {reason}")]
    InvalidMeetingUrl { reason: String },

    #[error("JWT token verification failed: {reason}")]
    VerificationError { reason: String },
}

impl TokenCreationError {
    pub fn exit_code(&self) -> i32 {
        match self {
            TokenCreationError::ConfigError { .. } => 1,
            TokenCreationError::UsageError { .. } => 2,
            TokenCreationError::SigningError { .. } => 3,
            TokenCreationError::InvalidMeetingUrl { .. } => 4,
            TokenCreationError::VerificationError { .. } => 5,
        }
    }
}

impl From<anyhow::Error> for TokenCreationError {
    fn from(err: anyhow::Error) -> Self {
        TokenCreationError::ConfigError {
            source: err.into(),
        }
    }
}
