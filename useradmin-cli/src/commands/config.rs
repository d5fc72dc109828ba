use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use useradmin::config::{Config, ENV_PREFIX};
use useradmin::client::USERS_PATH;

use super::{AppContext, GlobalArgs};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show {
        /// Print JSON only
        #[arg(long)]
        json: bool,
    },
}

pub async fn execute(global: &GlobalArgs, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => show(global, json),
    }
}

fn show(global: &GlobalArgs, json: bool) -> Result<()> {
    let ctx = AppContext::load(global)?;
    let rendered =
        serde_json::to_string_pretty(&ctx.config).context("Failed to serialize configuration")?;

    if json {
        println!("{rendered}");
        return Ok(());
    }

    let base_url = ctx
        .config
        .api
        .base_url()
        .context("Configured backend address is invalid")?;

    println!("{}", "Effective configuration".bold());
    println!();
    println!("{rendered}");
    println!();
    println!("  {} {}", "Base URL:".cyan(), base_url);
    println!("  {} {}{}", "Users endpoint:".cyan(), base_url, USERS_PATH);
    println!();
    match &global.config {
        Some(path) => println!("  {} {}", "Config file:".cyan(), path.display()),
        None => {
            if let Some(path) = Config::recommended_path() {
                println!("  {} {}", "User config:".cyan(), path.display().to_string().dimmed());
            }
        }
    }
    println!(
        "  {} {}<SECTION>_<KEY>, {}API_URL",
        "Environment:".cyan(),
        ENV_PREFIX,
        ENV_PREFIX
    );

    Ok(())
}
