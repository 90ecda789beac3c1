//! Config command - show and change settings

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_data_dir;
use crate::output::{create_table, print_json, success};
use bigburger_core::config::{Config, StoreBackend};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Point the http backend at another json-server
    SetUrl {
        /// Base URL, e.g. http://localhost:3001
        url: String,
    },
    /// Choose where data lives (http, local, memory)
    SetBackend {
        backend: StoreBackend,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir();

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            if json {
                return print_json(&config);
            }

            println!("{}", "Settings".bold());
            let mut table = create_table();
            table.add_row(vec!["Data directory".to_string(), data_dir.display().to_string()]);
            table.add_row(vec!["Backend".to_string(), config.backend.to_string()]);
            table.add_row(vec!["Base URL".to_string(), config.base_url.clone()]);
            table.add_row(vec!["Timeout".to_string(), format!("{}s", config.timeout_secs)]);
            table.add_row(vec!["Session TTL".to_string(), format!("{}h", config.token_ttl_hours)]);
            table.add_row(vec![
                "Card decline rate".to_string(),
                format!("{:.0}%", config.card_decline_rate * 100.0),
            ]);
            table.add_row(vec![
                "PIX discount".to_string(),
                format!("{}%", config.pix_discount_percent),
            ]);
            println!("{}", table);
        }
        ConfigCommands::SetUrl { url } => {
            url::Url::parse(&url).map_err(|e| anyhow::anyhow!("Invalid URL {}: {}", url, e))?;
            let mut config = Config::load_file(&data_dir)?;
            config.base_url = url.trim_end_matches('/').to_string();
            config.save(&data_dir)?;
            success(&format!("Base URL set to {}", config.base_url));
        }
        ConfigCommands::SetBackend { backend } => {
            let mut config = Config::load_file(&data_dir)?;
            config.backend = backend;
            config.save(&data_dir)?;
            success(&format!("Backend set to {}", backend));
        }
    }

    Ok(())
}
