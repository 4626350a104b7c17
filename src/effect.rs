//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the city CSV from a path or URL
    LoadCities { source: String },
    /// Fetch the forecast for the given coordinate strings
    FetchForecast {
        request: u64,
        label: String,
        latitude: String,
        longitude: String,
    },
}
