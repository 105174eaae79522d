use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};

use bikeshare_core::{
    AcquisitionState, AcquisitionStateMachine, Config, Coordinate, NearbyStationResolver,
    StationFeedClient,
};

use crate::ui::{FixedLocator, TerminalPresenter};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "bikeshare", version, about = "Nearby bike-share station finder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a home coordinate (and optionally a feed URL override).
    Configure,

    /// List bike-share stations near a coordinate, closest first.
    Nearby {
        /// Latitude in degrees; falls back to the configured home.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in degrees; falls back to the configured home.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Maximum number of stations to show.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Nearby { lat, lon, limit } => nearby(lat, lon, limit).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let latitude = CustomType::<f64>::new("Home latitude:")
        .with_help_message("Degrees, -90 to 90")
        .prompt()
        .context("Failed to read latitude")?;
    let longitude = CustomType::<f64>::new("Home longitude:")
        .with_help_message("Degrees, -180 to 180")
        .prompt()
        .context("Failed to read longitude")?;

    if !(-90.0..=90.0).contains(&latitude) {
        bail!("Latitude must be between -90 and 90 degrees, got {latitude}");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        bail!("Longitude must be between -180 and 180 degrees, got {longitude}");
    }

    let feed_url = Text::new("Feed URL:")
        .with_help_message("Leave empty to use the public Citi Bike feed")
        .prompt()
        .context("Failed to read feed URL")?;

    config.set_home(Coordinate::new(latitude, longitude));
    config.feed_url = if feed_url.trim().is_empty() { None } else { Some(feed_url) };
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn nearby(lat: Option<f64>, lon: Option<f64>, limit: usize) -> anyhow::Result<()> {
    let config = Config::load()?;

    let coordinate = match (lat, lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon),
        _ => config.home_coordinate().ok_or_else(|| {
            anyhow::anyhow!(
                "No coordinate given and no home configured.\n\
                 Hint: pass `--lat .. --lon ..` or run `bikeshare configure` first."
            )
        })?,
    };

    tracing::debug!(
        latitude = coordinate.latitude,
        longitude = coordinate.longitude,
        feed_url = config.feed_url(),
        "resolving nearby stations"
    );

    let feed = StationFeedClient::with_url(config.feed_url());
    let mut machine = AcquisitionStateMachine::new(
        Box::new(FixedLocator::new(coordinate)),
        NearbyStationResolver::new(Box::new(feed)),
        Box::new(TerminalPresenter::new(limit)),
    );

    machine.locate().await;

    match machine.state() {
        AcquisitionState::Error(cause) => bail!("could not load nearby stations: {cause}"),
        _ => Ok(()),
    }
}
