//! Immutable runtime configuration.
//!
//! Built once at startup (see `main.rs`) and shared read-only with every
//! request through an `Arc`.

use anyhow::Result;
use reqwest::Url;

/// Base URL for MTA subway GTFS-RT feeds; the line group is appended.
pub const MTA_FEED_BASE_URL: &str =
    "https://api-endpoint.mta.info/Dataservice/mtagtfsfeeds/nyct%2Fgtfs";

/// Open-Meteo forecast endpoint.
pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Number of arrivals kept per direction.
pub const DEFAULT_ARRIVAL_WINDOW: usize = 5;

/// Subway line groups the board has stop presets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Line {
    /// A/C/E at 34 St-Penn Station.
    A,
    /// N/Q/R/W at 34 St-Herald Sq.
    N,
}

impl Line {
    /// Feed URL suffix for the line group.
    fn feed_suffix(self) -> &'static str {
        match self {
            Line::A => "-ace",
            Line::N => "-nqrw",
        }
    }

    /// `(northbound, southbound)` platform stop ids.
    fn stops(self) -> (&'static str, &'static str) {
        match self {
            Line::A => ("A28N", "A28S"),
            Line::N => ("R17N", "R17S"),
        }
    }
}

/// The two platforms whose predictions are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopPair {
    pub north: String,
    pub south: String,
}

#[derive(Debug, Clone)]
pub struct TransitConfig {
    pub feed_url: Url,
    pub stops: StopPair,
    /// Arrivals kept per direction after ranking.
    pub window: usize,
    /// Sent as `x-api-key` when set.
    pub api_key: Option<String>,
}

impl TransitConfig {
    pub fn for_line(line: Line) -> Result<Self> {
        let (north, south) = line.stops();
        Ok(Self {
            feed_url: format!("{MTA_FEED_BASE_URL}{}", line.feed_suffix()).parse()?,
            stops: StopPair {
                north: north.to_string(),
                south: south.to_string(),
            },
            window: DEFAULT_ARRIVAL_WINDOW,
            api_key: None,
        })
    }
}

/// Shape of the Open-Meteo forecast request.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub forecast_days: u8,
    pub temperature_unit: String,
    pub wind_speed_unit: String,
    pub precipitation_unit: String,
    pub hourly: Vec<&'static str>,
    pub current: Vec<&'static str>,
    pub daily: Vec<&'static str>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            latitude: 40.7506,
            longitude: -73.9935,
            timezone: "America/New_York".to_string(),
            forecast_days: 3,
            temperature_unit: "fahrenheit".to_string(),
            wind_speed_unit: "mph".to_string(),
            precipitation_unit: "inch".to_string(),
            hourly: vec!["temperature_2m", "precipitation", "visibility", "is_day", "weather_code"],
            current: vec![
                "temperature_2m",
                "precipitation",
                "weather_code",
                "rain",
                "showers",
                "snowfall",
                "is_day",
            ],
            daily: vec!["temperature_2m_max", "temperature_2m_min", "weather_code"],
        }
    }
}

impl WeatherConfig {
    /// Builds the full forecast URL with every query parameter filled in.
    pub fn forecast_url(&self) -> Result<Url> {
        let url = Url::parse_with_params(
            OPEN_METEO_URL,
            &[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                ("daily", self.daily.join(",")),
                ("hourly", self.hourly.join(",")),
                ("current", self.current.join(",")),
                ("timezone", self.timezone.clone()),
                ("forecast_days", self.forecast_days.to_string()),
                ("wind_speed_unit", self.wind_speed_unit.clone()),
                ("temperature_unit", self.temperature_unit.clone()),
                ("precipitation_unit", self.precipitation_unit.clone()),
            ],
        )?;
        Ok(url)
    }
}

/// Everything the request pipelines read.
#[derive(Debug, Clone)]
pub struct Config {
    pub transit: TransitConfig,
    pub weather_url: Url,
}

impl Config {
    pub fn new(transit: TransitConfig, weather: &WeatherConfig) -> Result<Self> {
        Ok(Self {
            transit,
            weather_url: weather.forecast_url()?,
        })
    }
}
