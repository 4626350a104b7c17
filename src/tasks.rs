//! Async work behind each effect; every task resolves to exactly one action.

use crate::action::Action;
use crate::api::ForecastClient;
use crate::cities::{self, CitySource};
use crate::forecast::{Forecast, FETCH_FAILED_MESSAGE};
use crate::location::options_from_records;

pub async fn load_cities(source: String) -> Action {
    match cities::load_cities(&CitySource::parse(&source)).await {
        Ok(records) => Action::CitiesDidLoad(options_from_records(&records)),
        Err(e) => {
            tracing::error!(%source, error = %e, "city list unavailable");
            Action::CitiesDidError(e.to_string())
        }
    }
}

/// Any failure collapses into [`FETCH_FAILED_MESSAGE`]; the cause goes to the log.
pub async fn fetch_forecast(
    client: ForecastClient,
    request: u64,
    label: String,
    latitude: String,
    longitude: String,
) -> Action {
    match client.fetch_forecast(&latitude, &longitude).await {
        Ok(days) => Action::ForecastDidLoad {
            request,
            forecast: Forecast { label, days },
        },
        Err(e) => {
            tracing::warn!(request, %label, error = %e, "forecast lookup failed");
            Action::ForecastDidError {
                request,
                message: FETCH_FAILED_MESSAGE.to_string(),
            }
        }
    }
}
