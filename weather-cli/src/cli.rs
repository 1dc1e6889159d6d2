use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing_subscriber::EnvFilter;
use weather_core::{Config, Update, WeatherWidget, WidgetState, provider_from_config};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "City weather lookup")]
pub struct Cli {
    /// Log request activity to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// List city suggestions for a partial name.
    Suggest {
        query: String,
    },

    /// Type to get suggestions, pick one or submit to see the weather.
    Interactive,
}

impl Cli {
    pub fn init_tracing(&self) {
        let default_level = if self.verbose { "debug" } else { "warn" };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
            )
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::Suggest { query } => suggest(&query).await,
            Command::Interactive => interactive::run(build_widget()?).await,
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    Ok(Config::load()?.with_env_overrides())
}

fn build_widget() -> anyhow::Result<WeatherWidget> {
    let config = load_config()?;
    let provider = provider_from_config(&config)?;
    Ok(WeatherWidget::new(provider))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Find it at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_owned());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    // Blank input never needs credentials.
    if let Err(notice) = WidgetState::prepare_search(city) {
        println!("{}", render::notice(&notice));
        return Ok(());
    }

    let mut widget = build_widget()?;
    if let Err(notice) = widget.search(city) {
        println!("{}", render::notice(&notice));
        return Ok(());
    }

    if let Some(update) = widget.next_update().await {
        print!("{}", render::update(&update, widget.state()));
    }
    Ok(())
}

async fn suggest(query: &str) -> anyhow::Result<()> {
    let mut widget = build_widget()?;

    if widget.set_search_text(query) {
        while let Some(update) = widget.next_update().await {
            if update == Update::Suggestions {
                break;
            }
        }
    }

    let suggestions = widget.state().suggestions();
    if suggestions.is_empty() {
        println!("No suggestions.");
    } else {
        print!("{}", render::suggestions(suggestions));
    }
    Ok(())
}
