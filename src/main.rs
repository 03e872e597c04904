//! CLI entry point for the board feed proxy.
//!
//! `serve` runs the HTTP API the e-ink board polls; `arrivals` and `weather`
//! run one pipeline once and print the JSON the board would receive.

use anyhow::Result;
use board_feed::api::{self, AppState};
use board_feed::arrivals::{arrivals_from_bytes, fetch_arrivals};
use board_feed::config::{Config, Line, TransitConfig, WeatherConfig};
use board_feed::fetch::{BasicClient, HttpClient, transit_client};
use board_feed::weather::fetch_weather;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "board_feed")]
#[command(about = "Transit arrivals and weather proxy for an e-ink board", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the board API over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:8787")]
        bind: String,

        #[command(flatten)]
        board: BoardArgs,
    },
    /// Print the ranked arrivals for a GTFS-RT feed file or URL
    Arrivals {
        /// Path to a .pb file or URL to fetch; defaults to the line's feed
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        #[command(flatten)]
        board: BoardArgs,
    },
    /// Print the aligned weather snapshot
    Weather {
        #[command(flatten)]
        board: BoardArgs,
    },
}

/// Overrides for the board's fixed configuration.
#[derive(Args)]
struct BoardArgs {
    /// Line group whose feed and platforms to use
    #[arg(long, value_enum, default_value_t = Line::N)]
    line: Line,

    /// Feed URL instead of the line's default
    #[arg(long)]
    feed_url: Option<String>,

    /// Northbound platform stop id instead of the line's default
    #[arg(long)]
    north_stop: Option<String>,

    /// Southbound platform stop id instead of the line's default
    #[arg(long)]
    south_stop: Option<String>,

    /// Forecast latitude
    #[arg(long, default_value_t = 40.7506, allow_negative_numbers = true)]
    latitude: f64,

    /// Forecast longitude
    #[arg(long, default_value_t = -73.9935, allow_negative_numbers = true)]
    longitude: f64,
}

impl BoardArgs {
    fn into_config(self) -> Result<Config> {
        let mut transit = TransitConfig::for_line(self.line)?;
        if let Some(url) = self.feed_url {
            transit.feed_url = url.parse()?;
        }
        if let Some(north) = self.north_stop {
            transit.stops.north = north;
        }
        if let Some(south) = self.south_stop {
            transit.stops.south = south;
        }
        transit.api_key = std::env::var("MTA_API_KEY").ok().filter(|k| !k.is_empty());

        let weather = WeatherConfig {
            latitude: self.latitude,
            longitude: self.longitude,
            ..WeatherConfig::default()
        };
        Config::new(transit, &weather)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/board_feed.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("board_feed.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, board } => {
            let config = board.into_config()?;
            serve(&bind, config).await?;
        }
        Commands::Arrivals { source, board } => {
            let config = board.into_config()?;
            let arrivals = match source {
                Some(path) if !path.starts_with("http") => {
                    let bytes = std::fs::read(&path)?;
                    arrivals_from_bytes(&bytes, &config.transit, Utc::now())?
                }
                Some(url) => {
                    let mut transit = config.transit.clone();
                    transit.feed_url = url.parse()?;
                    let client = transit_client(base_client(), &transit)?;
                    fetch_arrivals(client.as_ref(), &transit).await?
                }
                None => {
                    let client = transit_client(base_client(), &config.transit)?;
                    fetch_arrivals(client.as_ref(), &config.transit).await?
                }
            };
            println!("{}", serde_json::to_string_pretty(&arrivals)?);
        }
        Commands::Weather { board } => {
            let config = board.into_config()?;
            let snapshot = fetch_weather(&BasicClient::new(), &config.weather_url).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}

fn base_client() -> Arc<dyn HttpClient> {
    Arc::new(BasicClient::new())
}

#[tracing::instrument(skip(config))]
async fn serve(bind: &str, config: Config) -> Result<()> {
    info!(
        feed = %config.transit.feed_url,
        north = %config.transit.stops.north,
        south = %config.transit.stops.south,
        "Loaded configuration"
    );

    let state = AppState::new(config, base_client())?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(bind, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
