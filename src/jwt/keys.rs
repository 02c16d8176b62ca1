// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # JWT Key Management
//!
//! Jitsi's `token` authentication module verifies tokens with a shared
//! `app_secret`, so only symmetric HMAC keys are supported here.
//!
//! ```rust
//! use jitsi_token::jwt::JwtKeyConfig;
//! use jsonwebtoken::Algorithm;
//!
//! let secret = b"your-hmac-secret-key-of-32-bytes!";
//! let key_config = JwtKeyConfig::new_symmetric(secret, Algorithm::HS256).unwrap();
//! ```

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use log::warn;

use crate::error::TokenCreationError;

/// Shortest secret that does not trigger a warning
pub const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

/// JWT key configuration
///
/// Holds both halves of the symmetric key: the encoding key signs tokens,
/// the decoding key is used to self-check them.
pub struct JwtKeyConfig {
    /// Algorithm to use for signing
    pub algorithm: Algorithm,

    /// Encoding key for signing tokens
    pub encoding_key: EncodingKey,

    /// Decoding key for verifying tokens
    pub decoding_key: DecodingKey,
}

/// Custom debug implementation for JwtKeyConfig that hides sensitive key material
impl std::fmt::Debug for JwtKeyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeyConfig")
            .field("algorithm", &self.algorithm)
            .field("encoding_key", &"<EncodingKey>")
            .field("decoding_key", &"<DecodingKey>")
            .finish()
    }
}

impl JwtKeyConfig {
    /// Create a new JWT key configuration with a symmetric key (HMAC)
    ///
    /// # Arguments
    ///
    /// * `secret` - The secret bytes to use for HMAC signing/verification
    /// * `algorithm` - The HMAC algorithm to use (must be one of: HS256, HS384, HS512)
    ///
    /// # Errors
    ///
    /// Returns [`TokenCreationError::SigningError`] if the secret is empty or the
    /// algorithm is not an HMAC algorithm.
    pub fn new_symmetric(secret: &[u8], algorithm: Algorithm) -> Result<Self, TokenCreationError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => (),
            _ => {
                return Err(TokenCreationError::SigningError {
                    reason: format!("Algorithm {:?} is not valid for symmetric keys", algorithm),
                })
            }
        }

        if secret.is_empty() {
            return Err(TokenCreationError::SigningError {
                reason: "JWT secret is empty, set jwt.secret or JITSI_APP_SECRET".to_string(),
            });
        }

        if secret.len() < MIN_RECOMMENDED_SECRET_LEN {
            warn!(
                "Signing with a {} byte secret, at least {} bytes are recommended",
                secret.len(),
                MIN_RECOMMENDED_SECRET_LEN
            );
        }

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_secret_is_rejected() {
        let err = JwtKeyConfig::new_symmetric(b"", Algorithm::HS256).unwrap_err();
        assert!(matches!(err, TokenCreationError::SigningError { .. }));
    }

    #[test]
    fn test_asymmetric_algorithm_is_rejected() {
        let err =
            JwtKeyConfig::new_symmetric(b"0123456789abcdef0123456789abcdef", Algorithm::RS256)
                .unwrap_err();
        assert!(err.to_string().contains("RS256"));
    }

    #[test]
    fn test_debug_hides_key_material() {
        let keys =
            JwtKeyConfig::new_symmetric(b"0123456789abcdef0123456789abcdef", Algorithm::HS256)
                .unwrap();
        let debug = format!("{:?}", keys);
        assert!(debug.contains("<EncodingKey>"));
        assert!(!debug.contains("0123456789abcdef"));
    }
}
