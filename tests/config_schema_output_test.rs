// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the jitsi-token project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use jitsi_token::config;
use std::process::Command;

#[test]
fn test_config_schema_output() -> Result<()> {
    config::output_config_schema()?;
    Ok(())
}

#[test]
fn test_schema_flag_prints_valid_json() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_jitsi_token"))
        .arg("--show-config-schema")
        .output()?;

    assert!(output.status.success());
    let schema: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(schema["properties"]["jwt"]["type"], "object");
    assert_eq!(schema["properties"]["meeting"]["type"], "object");

    Ok(())
}

#[test]
fn test_default_config_matches_schema() -> Result<()> {
    let schema: serde_json::Value = serde_json::from_str(config::CONFIG_SCHEMA)?;
    let validator = jsonschema::draft202012::new(&schema)?;

    let mut config = config::Config::default();
    config.jwt.subject = Some("tenant-a".to_string());
    let value = serde_json::to_value(&config)?;
    assert!(validator.is_valid(&value));

    Ok(())
}
