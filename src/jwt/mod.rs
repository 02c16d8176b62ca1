// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! JWT token generation for Jitsi Meet authentication
//!
//! This module implements the signing side of the Jitsi `token`
//! authentication scheme:
//!
//! - `JwtIssuer`: builds the claim set and signs it with HS256
//! - `MeetingClaims`: the claims understood by the Prosody token module
//! - `JwtKeyConfig`: the shared HMAC secret
//! - `Clock`: the injected time source
//!
//! # Example Usage
//!
//! ```
//! use jitsi_token::jwt::{FixedClock, IssuerSettings, JoinRequest, JwtIssuer};
//!
//! let settings = IssuerSettings {
//!     issuer: "openemr".to_string(),
//!     audience: "openemr_telehealth".to_string(),
//!     subject: "meet.example.com".to_string(),
//! };
//! let issuer = JwtIssuer::new(settings, b"a-shared-secret-of-32-characters")
//!     .unwrap()
//!     .with_clock(FixedClock(1_700_000_000));
//!
//! let request = JoinRequest::new("patient-consultation-123", "Dr. Smith", "dr.smith@clinic.com", true);
//! let token = issuer.issue(&request).unwrap();
//! assert_eq!(token.split('.').count(), 3);
//! ```

pub mod claims;
pub mod clock;
pub mod issuer;
pub mod keys;

// Re-export the public API
pub use claims::{ClaimContext, MeetingClaims, UserContext};
pub use clock::{Clock, FixedClock, SystemClock};
pub use issuer::{
    issue_token, IssuerSettings, JoinRequest, JwtIssuer, CLOCK_SKEW_SECS, TOKEN_VALIDITY_SECS,
};
pub use keys::JwtKeyConfig;
