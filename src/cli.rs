// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use clap::Parser;
use jitsi_token::utility::jwt_token::TokenCreationParams;
use std::path::PathBuf;

/// Generate JWT tokens and join links for Jitsi Meet rooms
#[derive(Parser, Debug, Clone)]
#[command(name = "jitsi_token", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Room name, e.g. "patient-consultation-123"
    #[arg(required_unless_present = "show_config_schema")]
    pub room: Option<String>,

    /// Display name of the participant
    #[arg(required_unless_present = "show_config_schema")]
    pub name: Option<String>,

    /// Email of the participant
    #[arg(required_unless_present = "show_config_schema")]
    pub email: Option<String>,

    /// Grant the moderator role
    #[arg(short, long)]
    pub moderator: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    pub config: PathBuf,

    /// HMAC signing secret (overrides config)
    #[arg(long, env = "JITSI_APP_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Jitsi Meet domain (overrides config)
    #[arg(long)]
    pub domain: Option<String>,

    /// Only print the meeting URL
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    pub show_config_schema: bool,
}

impl CliArgs {
    /// Token parameters, `None` when the positional arguments are absent
    pub fn token_params(&self) -> Option<TokenCreationParams> {
        Some(TokenCreationParams {
            room: self.room.clone()?,
            user_name: self.name.clone()?,
            user_email: self.email.clone()?,
            moderator: self.moderator,
        })
    }
}
