use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use weather_core::{
    Config, Coordinate, IpPositionSource, PositionSource, WeatherClient, WeatherResponse,
};

use crate::nav::{ItemId, NavMenu};
use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the upstream API key in the local configuration.
    Configure,

    /// Show weather for the machine's current position.
    Show {
        /// Explicit "lat,lng" coordinate; skips the position lookup.
        #[arg(long)]
        location: Option<String>,
    },

    /// Show weather for the default (Beijing) coordinate.
    Default,

    /// Interactive dashboard with the side navigation menu.
    Dashboard,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location } => show(location).await,
            Command::Default => {
                let client = client_from_config()?;
                let weather = client
                    .get_default_weather()
                    .await
                    .context("Failed to fetch default weather")?;
                render::print_weather(&weather);
                Ok(())
            }
            Command::Dashboard => dashboard().await,
        }
    }
}

fn client_from_config() -> anyhow::Result<WeatherClient> {
    let config = Config::load().context("Failed to load configuration")?;
    WeatherClient::from_config(&config)
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    let api_key = Password::new("Upstream API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save().context("Failed to save configuration")?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Parse an explicit "lat,lng" pair.
pub fn parse_location(raw: &str) -> anyhow::Result<Coordinate> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("Expected \"lat,lng\", got '{raw}'"))?;

    let latitude = lat
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid latitude '{lat}'"))?;
    let longitude = lng
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid longitude '{lng}'"))?;

    Ok(Coordinate::new(latitude, longitude))
}

async fn show(location: Option<String>) -> anyhow::Result<()> {
    let client = client_from_config()?;

    let coordinate = match location {
        Some(raw) => parse_location(&raw)?,
        // Single-shot lookup; errors surface instead of silently falling
        // back (the `default` command is the explicit fallback).
        None => IpPositionSource::new()
            .current_position()
            .await
            .context("Failed to resolve current position (try --location or `weather default`)")?,
    };

    let weather = client
        .get_weather_by_location(coordinate.latitude, coordinate.longitude)
        .await
        .context("Failed to fetch weather")?;

    render::print_weather(&weather);
    Ok(())
}

async fn fetch_dashboard_weather(client: &WeatherClient) -> anyhow::Result<WeatherResponse> {
    client
        .get_default_weather()
        .await
        .context("Failed to fetch weather for the dashboard")
}

async fn dashboard() -> anyhow::Result<()> {
    let client = client_from_config()?;
    let mut menu = NavMenu::new();

    loop {
        render::print_nav(&menu);

        let choice = Select::new("Navigate:", menu.labels())
            .with_starting_cursor(
                menu.items()
                    .iter()
                    .position(|item| menu.is_active(item.id))
                    .unwrap_or(0),
            )
            .prompt()
            .context("Menu selection failed")?;

        // Unknown labels cannot come out of Select, so this always swaps.
        menu.activate_by_label(choice);

        match menu.active() {
            ItemId::Dashboard => {
                let weather = fetch_dashboard_weather(&client).await?;
                render::print_weather(&weather);
            }
            ItemId::Logout => {
                println!("Bye.");
                return Ok(());
            }
            ItemId::Help => {
                println!("Pick Dashboard for weather, Logout to quit.");
            }
            ItemId::Settings => {
                println!("Edit {} or run `weather configure`.", Config::config_file_path()?.display());
            }
            other => {
                println!("{other:?} has no terminal view yet.");
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_location_accepts_lat_lng_pair() {
        let coordinate = parse_location("39.9093,116.3964").expect("must parse");
        assert_eq!(coordinate, Coordinate::BEIJING);
    }

    #[test]
    fn parse_location_trims_whitespace() {
        let coordinate = parse_location(" 1.5 , -2.25 ").expect("must parse");
        assert_eq!(coordinate, Coordinate::new(1.5, -2.25));
    }

    #[test]
    fn parse_location_rejects_missing_comma() {
        let err = parse_location("39.9093").unwrap_err();
        assert!(err.to_string().contains("Expected"));
    }

    #[test]
    fn parse_location_rejects_non_numeric_parts() {
        assert!(parse_location("north,east").is_err());
        assert!(parse_location("1.0,east").is_err());
    }
}
