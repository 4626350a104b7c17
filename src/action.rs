//! Actions - the port between the UI and the lookup flow

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::forecast::Forecast;
use crate::location::LocationOption;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Cities category =====
    /// Intent: load the city list (triggers async task)
    CitiesFetch,

    /// Result: options built from the CSV rows
    CitiesDidLoad(Vec<LocationOption>),

    /// Result: the CSV could not be fetched or parsed
    CitiesDidError(String),

    // ===== Forecast category =====
    /// Intent: look up the selected location (enters Loading)
    ForecastFetch,

    /// Result: forecast for request `request`
    ForecastDidLoad { request: u64, forecast: Forecast },

    /// Result: lookup `request` failed; `message` is what the user sees
    ForecastDidError { request: u64, message: String },

    /// Return a shown result or error to idle
    ForecastDismiss,

    // ===== Picker category =====
    /// Open the location picker
    PickerOpen,

    /// Close the picker without changing the selection
    PickerClose,

    /// Highlight a picker row (by index)
    PickerSelect(usize),

    /// Adopt the highlighted row and look it up
    PickerConfirm,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
