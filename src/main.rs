// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Command line entry point of the Jitsi meeting token generator
mod cli;

use clap::Parser;
use cli::CliArgs;
use jitsi_token::config::{output_config_schema, validate_specific_rules, Config};
use jitsi_token::utility::jwt_token::{TokenCreationResult, TokenCreator};
use jitsi_token::TokenCreationError;
use log::debug;
use std::process;

fn main() {
    env_logger::init();

    // A failure is reported on a single line
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), TokenCreationError> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            return Err(TokenCreationError::UsageError {
                reason: summarize_clap_error(&e.to_string()),
            })
        }
    };

    if args.show_config_schema {
        output_config_schema()?;
        return Ok(());
    }

    let params = args
        .token_params()
        .ok_or_else(|| TokenCreationError::UsageError {
            reason: "room, name and email are required".to_string(),
        })?;

    // Load and validate configuration
    let mut config = Config::from_file(&args.config)?;
    config.apply_args(args.secret.clone(), args.domain.clone());
    validate_specific_rules(&config)?;

    // Create the token
    let token_creator = TokenCreator::new(&config)?;
    let result = token_creator.create_token(&params)?;

    let claims = token_creator.issuer().verify(&result.token)?;
    debug!("JWT Claims: {:?}", claims);

    if args.quiet {
        println!("{}", result.join_url);
    } else {
        print_full_results(&result);
    }

    Ok(())
}

fn print_full_results(result: &TokenCreationResult) {
    println!("JWT Token Generated Successfully!");
    println!("================================");
    println!();
    println!("Room: {}", result.room);
    println!("User: {} ({})", result.user_name, result.user_email);
    println!("Moderator: {}", if result.moderator { "Yes" } else { "No" });
    println!("Valid for: {}", format_validity(result.valid_for_seconds));
    if let Some(expiry) = result.expires_at_utc() {
        println!("Expires at: {}", expiry.to_rfc3339());
    }
    println!();
    println!("Meeting URL:");
    println!("{}", result.join_url);
    println!();
    println!("JWT Token (for API use):");
    println!("{}", result.token);
}

fn format_validity(seconds: i64) -> String {
    match seconds {
        3600 => "1 hour".to_string(),
        s if s % 3600 == 0 => format!("{} hours", s / 3600),
        s if s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{} seconds", s),
    }
}

/// First paragraph of a clap error on a single line, without the `error:` prefix
fn summarize_clap_error(message: &str) -> String {
    let summary = message
        .lines()
        .take_while(|line| !line.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ");
    summary
        .strip_prefix("error: ")
        .unwrap_or(&summary)
        .to_string()
}
