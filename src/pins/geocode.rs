// pins/geocode.rs
use crate::pins::Coordinate;
use rand::Rng;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::time::Duration;
use url::Url;

const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

const USER_AGENT: &str = "housepins/0.1 (self-hosted listing map)";

/// A request that hasn't come back by then counts as failed.
const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

// Nominatim's usage policy asks for at most one request per second.
const PAUSE_BASE_MS: u64 = 1_000;
const PAUSE_JITTER_MS: u64 = 500;

#[derive(Debug)]
pub enum GeocodeError {
    NoMatch,
    Network(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::NoMatch => write!(f, "no match for address"),
            GeocodeError::Network(msg) => write!(f, "network error: {msg}"),
        }
    }
}

impl Error for GeocodeError {}

/// One address in, one coordinate out.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError>;
}

// Nominatim serializes lat/lon as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    client: Client,
}

impl NominatimGeocoder {
    pub fn new() -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(GEOCODE_TIMEOUT)
            .build()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinate, GeocodeError> {
        // Stay polite to the public endpoint.
        let pause = PAUSE_BASE_MS + rand::thread_rng().gen_range(0..=PAUSE_JITTER_MS);
        std::thread::sleep(Duration::from_millis(pause));

        let url = Url::parse_with_params(
            NOMINATIM_ENDPOINT,
            &[("q", address), ("format", "json"), ("limit", "1")],
        )
        .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let hits: Vec<SearchHit> = self
            .client
            .get(url)
            .send()
            .map_err(|e| GeocodeError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeocodeError::Network(e.to_string()))?
            .json()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let hit = hits.into_iter().next().ok_or(GeocodeError::NoMatch)?;

        let lat: f64 = hit
            .lat
            .parse()
            .map_err(|_| GeocodeError::Network(format!("bad latitude: {}", hit.lat)))?;
        let lon: f64 = hit
            .lon
            .parse()
            .map_err(|_| GeocodeError::Network(format!("bad longitude: {}", hit.lon)))?;

        Ok(Coordinate { lat, lon })
    }
}
