use std::{ffi::OsStr, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use lotemp_core::{Coordinates, Fetcher, config};
use tracing::info;

/// Printed for `-v`.
pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "lotemp",
    about = "Print the current temperature at a location",
    disable_version_flag = true
)]
pub struct Cli {
    /// Print the version and exit.
    // Answered by `is_version_query` before parsing; declared here for `--help`.
    #[allow(dead_code)]
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Latitude in decimal degrees (at most 8 characters).
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    pub latitude: Option<String>,

    /// Longitude in decimal degrees (at most 8 characters).
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    pub longitude: Option<String>,

    /// Use the built-in coordinates (central Helsinki).
    #[arg(long, conflicts_with_all = ["latitude", "config"])]
    pub defaults: bool,

    /// Read coordinates from this file instead of `$HOME/.lotemp`.
    #[arg(long, value_name = "PATH", conflicts_with = "latitude")]
    pub config: Option<PathBuf>,

    /// Print the request URL instead of fetching it.
    #[arg(long)]
    pub print_url: bool,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,
}

/// Where the coordinates for this run come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinateSource {
    CommandLine { latitude: String, longitude: String },
    Defaults,
    ConfigFile(Option<PathBuf>),
}

impl CoordinateSource {
    pub fn resolve(self) -> anyhow::Result<Coordinates> {
        match self {
            CoordinateSource::CommandLine { latitude, longitude } => {
                Coordinates::new(latitude, longitude).context("Invalid command-line coordinates")
            }
            CoordinateSource::Defaults => Ok(Coordinates::helsinki()),
            CoordinateSource::ConfigFile(Some(path)) => config::load_from(&path)
                .with_context(|| format!("Failed to load coordinates from {}", path.display())),
            CoordinateSource::ConfigFile(None) => {
                config::load().context("Failed to load coordinates from config file")
            }
        }
    }
}

/// `-v` wins over everything else on the command line, including arguments
/// clap would reject.
pub fn is_version_query<I, S>(args: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    args.into_iter()
        .skip(1)
        .any(|arg| matches!(arg.as_ref().to_str(), Some("-v" | "--version")))
}

impl Cli {
    pub fn coordinate_source(&self) -> CoordinateSource {
        match (&self.latitude, &self.longitude) {
            (Some(latitude), Some(longitude)) => CoordinateSource::CommandLine {
                latitude: latitude.clone(),
                longitude: longitude.clone(),
            },
            _ if self.defaults => CoordinateSource::Defaults,
            _ => CoordinateSource::ConfigFile(self.config.clone()),
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let source = self.coordinate_source();
        info!(?source, "resolving coordinates");
        let coords = source.resolve()?;

        let fetcher = Fetcher::new(Duration::from_secs(self.timeout))?;

        if self.print_url {
            println!("{}", fetcher.forecast_url(&coords));
            return Ok(());
        }

        let reading = fetcher
            .current_reading(&coords)
            .await
            .context("Failed to get current temperature")?;
        println!("{reading}");

        Ok(())
    }
}
