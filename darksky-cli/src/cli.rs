use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};

use darksky_core::{Config, DarkSky, PrecipitationQuery};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "darksky", version, about = "Dark Sky API CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the developer API key and error-suppression preference.
    Configure,

    /// Show the forecast for a coordinate.
    Forecast {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Request the brief variant of the forecast.
        #[arg(long)]
        brief: bool,
    },

    /// Query precipitation data for one or more points.
    Precipitation {
        /// Points formatted `lat,long` or `lat,long,time`, where time is
        /// unix seconds or an RFC 3339 date-time. Omitting time means "now".
        #[arg(required = true, allow_hyphen_values = true, value_parser = parse_point)]
        points: Vec<PrecipitationQuery>,
    },

    /// List currently interesting storms.
    Storms,
}

/// Parse a `lat,long[,time]` argument into a precipitation query.
pub fn parse_point(s: &str) -> Result<PrecipitationQuery, String> {
    let parts: Vec<&str> = s.split(',').collect();
    let (latitude, longitude, time) = match parts.as_slice() {
        [lat, long] => (*lat, *long, None),
        [lat, long, time] => (*lat, *long, Some(*time)),
        _ => return Err(format!("expected `lat,long` or `lat,long,time`, got '{s}'")),
    };

    let latitude: f64 =
        latitude.trim().parse().map_err(|_| format!("invalid latitude: '{latitude}'"))?;
    let longitude: f64 =
        longitude.trim().parse().map_err(|_| format!("invalid longitude: '{longitude}'"))?;

    match time {
        None => Ok(PrecipitationQuery::new(latitude, longitude)),
        Some(time) => {
            let time = parse_time(time.trim())
                .ok_or_else(|| format!("invalid time (unix seconds or RFC 3339): '{time}'"))?;
            Ok(PrecipitationQuery::at(latitude, longitude, time))
        }
    }
}

fn parse_time(s: &str) -> Option<i64> {
    if let Ok(unix) = s.parse::<i64>() {
        return Some(unix);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Forecast { latitude, longitude, brief } => {
                let client = client_from_config()?;
                let value = if brief {
                    client.get_brief_forecast(latitude, longitude).await?
                } else {
                    client.get_forecast(latitude, longitude).await?
                };
                print_value(&value)
            }
            Command::Precipitation { points } => {
                let client = client_from_config()?;
                let value = client.get_precipitation(&points).await?;
                print_value(&value)
            }
            Command::Storms => {
                let client = client_from_config()?;
                let value = client.get_interesting_storms().await?;
                print_value(&value)
            }
        }
    }
}

/// Prompt for credentials and preferences, then persist them.
fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Text::new("Developer API key:")
        .with_initial_value(cfg.api_key.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read API key")?;

    let suppress_errors = Confirm::new("Suppress network errors?")
        .with_default(cfg.suppress_errors)
        .prompt()
        .context("Failed to read suppression preference")?;

    cfg.set_api_key(api_key);
    cfg.suppress_errors = suppress_errors;
    cfg.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Build a client from the stored configuration.
fn client_from_config() -> anyhow::Result<DarkSky> {
    let cfg = Config::load()?;
    let api_key = cfg.require_api_key()?;
    Ok(DarkSky::new(api_key).suppress_errors(cfg.suppress_errors))
}

fn print_value(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
