use crate::output::print_json;
use clap::Subcommand;
use claimlens_core::config::{Config, WarnLevel};

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Validate the effective config for common mistakes
    Check,
}

pub fn run(config: &Config, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Check => check(config, json),
    }
}

fn check(config: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "config": config,
            "warnings": warnings,
        });
        print_json(&value)?;
    } else {
        println!(
            "Backend:  {} (timeout {}s)",
            config.backend.base_url, config.backend.timeout_secs
        );
        println!("Server:   {}", config.server.addr());
        if warnings.is_empty() {
            println!("Config is valid. No warnings.");
        }
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if config.has_errors() {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
