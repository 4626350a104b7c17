//! City coordinate list - CSV loading and parsing

use std::fmt;
use std::path::PathBuf;

use csv::StringRecord;

/// One row of the city coordinate CSV.
///
/// Coordinates stay as text: nothing here checks that they are numeric.
/// A column missing from a row (or from the header) reads as an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CityRecord {
    pub city: String,
    pub country: String,
    pub latitude: String,
    pub longitude: String,
}

/// Where the city list comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CitySource {
    Path(PathBuf),
    Url(String),
}

impl CitySource {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            CitySource::Url(trimmed.to_string())
        } else {
            CitySource::Path(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for CitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CitySource::Path(path) => write!(f, "{}", path.display()),
            CitySource::Url(url) => f.write_str(url),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CitiesError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Fetch the resource and parse it into records
pub async fn load_cities(source: &CitySource) -> Result<Vec<CityRecord>, CitiesError> {
    tracing::debug!(%source, "loading city list");

    let text = match source {
        CitySource::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CitiesError::Io {
                    path: path.display().to_string(),
                    source,
                })?
        }
        CitySource::Url(url) => {
            let response = reqwest::get(url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CitiesError::Status(status));
            }
            response.text().await?
        }
    };

    let records = parse_cities(&text)?;
    tracing::info!(%source, count = records.len(), "city list loaded");
    Ok(records)
}

/// Header-aware parse; rows come back in file order.
pub fn parse_cities(text: &str) -> Result<Vec<CityRecord>, CitiesError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = Columns::from_headers(reader.headers()?);

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(columns.record(&row?));
    }
    Ok(records)
}

/// Positions of the named columns in the header row
struct Columns {
    city: Option<usize>,
    country: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|header| header == name);
        Self {
            city: find("City"),
            country: find("Country"),
            latitude: find("Latitude"),
            longitude: find("Longitude"),
        }
    }

    fn record(&self, row: &StringRecord) -> CityRecord {
        let field = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .unwrap_or_default()
                .to_string()
        };
        CityRecord {
            city: field(self.city),
            country: field(self.country),
            latitude: field(self.latitude),
            longitude: field(self.longitude),
        }
    }
}
