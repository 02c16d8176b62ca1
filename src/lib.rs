// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Jitsi token library
//!
//! Issues short-lived HS256 JWTs that let a named participant join a room
//! on a Jitsi Meet deployment secured with the Prosody `token` module,
//! together with a ready-to-use join URL.
//!
//! The signing key and claim values come from [`config::Config`]; the
//! current time comes from an injected [`jwt::Clock`].

pub mod config;
pub mod error;
pub mod jwt;
pub mod meeting;
pub mod utility;

pub use error::TokenCreationError;
