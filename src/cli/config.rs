//
//  smartling-files
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! `config set` writes to the file named by `--config`, or to the default
//! configuration file. `config show` reports the effective values, with
//! environment and command-line overrides applied and the secret masked.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde_json::{json, Map, Value};

use crate::config::{Config, KEYS};
use crate::output::write_json;

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    #[command(visible_alias = "list")]
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (or api_keys.<name>)
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Show => self.show(global),
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn show(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;

        if global.json {
            return write_json(&effective_values(&config));
        }

        for key in KEYS {
            match config.get(key) {
                Some(value) => println!("{} = {}", style(key).bold(), value),
                None => println!("{} = {}", style(key).bold(), style("(not set)").dim()),
            }
        }
        for name in config.api_keys.keys() {
            println!("{} = ****", style(format!("api_keys.{}", name)).bold());
        }
        Ok(())
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let value = config.get(&args.key);

        if global.json {
            write_json(&json!({ "key": args.key, "value": value }))?;
        } else if let Some(value) = value {
            println!("{}", value);
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let path = config_file(global)?;
        let mut config = Config::load_from(&path)?;
        config.set(&args.key, &args.value)?;
        config.save_to(&path)?;

        if global.json {
            write_json(&json!({ "success": true, "key": args.key }))?;
        } else {
            println!("{} Set {}", style("✓").green(), args.key);
        }
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = config_file(global)?;
        if global.json {
            write_json(&json!({ "path": path }))?;
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}

fn config_file(global: &GlobalOptions) -> Result<PathBuf> {
    match &global.config {
        Some(path) => Ok(path.clone()),
        None => Config::config_path(),
    }
}

fn effective_values(config: &Config) -> Value {
    let mut values: Map<String, Value> = KEYS
        .iter()
        .map(|key| (key.to_string(), config.get(key).map_or(Value::Null, Value::String)))
        .collect();
    values.insert(
        "api_keys".to_string(),
        Value::Array(config.api_keys.keys().cloned().map(Value::String).collect()),
    );
    Value::Object(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_values_mask_secret() {
        let mut config = Config::default();
        config.set("user_secret", "supersecret").unwrap();
        config.set("api_keys.apiKey", "hidden").unwrap();

        let values = effective_values(&config);
        assert_eq!(values["user_secret"], "supe*******");
        assert_eq!(values["host"], "https://api.smartling.com");
        assert!(values["project_id"].is_null());
        assert_eq!(values["api_keys"], json!(["apiKey"]));
    }
}
