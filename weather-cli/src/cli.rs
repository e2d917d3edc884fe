use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{
    Config, SearchState, SearchStatus,
    config::DEFAULT_BASE_URL,
    provider::provider_from_config,
};

use crate::{session, view};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Look up the current weather for a city")]
pub struct Cli {
    /// OpenWeather API key; overrides the config file.
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Disable colored icons.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key (and optionally a custom API host) in the config file.
    Configure,

    /// Show the current weather for a city and exit.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Search repeatedly and rate the results (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let color = !self.no_color;

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                show(&config, &city, color).await
            }
            Command::Interactive => {
                let config = Config::load()?.with_api_key_override(self.api_key);
                let provider = provider_from_config(&config)?;
                session::run(provider.as_ref(), color).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(inquire::required!("An API key is required"))
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API host:")
        .with_default(config.base_url())
        .with_help_message("Press Enter to keep the current host")
        .prompt()
        .context("Failed to read API host")?;

    let base_url = base_url.trim();
    config.set_api_key(api_key.trim().to_string());
    config.set_base_url(if base_url.is_empty() || base_url == DEFAULT_BASE_URL {
        None
    } else {
        Some(base_url.to_string())
    });

    config.save()?;
    let path = Config::config_file_path()?;
    tracing::info!(path = %path.display(), "saved configuration");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(config: &Config, city: &str, color: bool) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;

    let mut state = SearchState::new();
    state.set_city_input(city);

    if !state.on_search_triggered(provider.as_ref()).await {
        bail!("{}", weather_core::error::INVALID_INPUT_MESSAGE);
    }

    println!("{}", view::render(&state, color));

    if state.status() == SearchStatus::Error {
        tracing::warn!(city = %city.trim(), error = ?state.error(), "one-shot lookup failed");
        bail!("Weather lookup for '{}' failed", city.trim());
    }

    Ok(())
}
