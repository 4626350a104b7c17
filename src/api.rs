//! 7Timer! civillight client

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::forecast::ForecastDay;

pub const DEFAULT_ENDPOINT: &str = "https://www.7timer.info/bin/api.pl";

/// Days kept from the head of the upstream series
pub const FORECAST_DAYS: usize = 7;

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CivilLightResponse {
    dataseries: Vec<SeriesEntry>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    date: CompactDate,
    weather: String,
    temp2m: Temp2m,
}

#[derive(Debug, Deserialize)]
struct Temp2m {
    max: f64,
    min: f64,
}

/// `20240115`, sent as a number (sometimes as a string)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompactDate {
    Number(u64),
    Text(String),
}

impl CompactDate {
    fn digits(&self) -> String {
        match self {
            CompactDate::Number(n) => n.to_string(),
            CompactDate::Text(s) => s.trim().to_string(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Network response was not ok: {0}")]
    Status(reqwest::StatusCode),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid compact date '{0}'")]
    Date(String),
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Client,
    endpoint: String,
}

impl ForecastClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch up to [`FORECAST_DAYS`] days for the given coordinates.
    ///
    /// Coordinates are passed through as text, exactly as the selector holds them.
    pub async fn fetch_forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Vec<ForecastDay>, FetchError> {
        tracing::debug!(latitude, longitude, endpoint = %self.endpoint, "requesting forecast");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("lon", longitude),
                ("lat", latitude),
                ("product", "civillight"),
                ("output", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        // The service does not always label its JSON as such, so decode the text.
        let body = response.text().await?;
        let days = parse_forecast(&body)?;
        tracing::debug!(days = days.len(), "forecast decoded");
        Ok(days)
    }
}

/// Decode a civillight body: first [`FORECAST_DAYS`] entries, upstream order.
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastDay>, FetchError> {
    let data: CivilLightResponse = serde_json::from_str(body)?;

    data.dataseries
        .into_iter()
        .take(FORECAST_DAYS)
        .map(|entry| {
            Ok(ForecastDay {
                date: parse_compact_date(&entry.date.digits())?,
                condition: entry.weather,
                max_temperature: entry.temp2m.max,
                min_temperature: entry.temp2m.min,
            })
        })
        .collect()
}

/// `YYYYMMDD` -> `YYYY-MM-DD` -> calendar date
pub fn parse_compact_date(digits: &str) -> Result<NaiveDate, FetchError> {
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FetchError::Date(digits.to_string()));
    }
    let iso = format!("{}-{}-{}", &digits[0..4], &digits[4..6], &digits[6..8]);
    NaiveDate::parse_from_str(&iso, "%Y-%m-%d").map_err(|_| FetchError::Date(digits.to_string()))
}
