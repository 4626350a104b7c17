//! Selector options and the composite "lat,lon" value

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cities::CityRecord;

pub const SELECT_LOCATION_MESSAGE: &str = "Please select a location.";

/// One entry of the location selector
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LocationOption {
    /// Composite `"<Latitude>,<Longitude>"`
    pub value: String,
    /// `"<City>, <Country>"`
    pub label: String,
}

impl From<&CityRecord> for LocationOption {
    fn from(record: &CityRecord) -> Self {
        Self {
            value: format!("{},{}", record.latitude, record.longitude),
            label: format!("{}, {}", record.city, record.country),
        }
    }
}

/// One option per record, in record order. Duplicates are kept.
pub fn options_from_records(records: &[CityRecord]) -> Vec<LocationOption> {
    records.iter().map(LocationOption::from).collect()
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please select a location.")]
    Empty,
    #[error("Location value '{0}' is not a latitude,longitude pair.")]
    Malformed(String),
}

/// A selector value split back into its two coordinate strings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedLocation {
    pub latitude: String,
    pub longitude: String,
}

impl SelectedLocation {
    pub fn parse(value: &str) -> Result<Self, SelectionError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SelectionError::Empty);
        }
        // Anything after a second comma is dropped.
        let mut parts = value.split(',').map(str::trim);
        match (parts.next(), parts.next()) {
            (Some(latitude), Some(longitude)) if !latitude.is_empty() && !longitude.is_empty() => {
                Ok(Self {
                    latitude: latitude.to_string(),
                    longitude: longitude.to_string(),
                })
            }
            _ => Err(SelectionError::Malformed(value.to_string())),
        }
    }
}
