//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::forecast::Forecast;
use crate::location::LocationOption;

/// Spinner timing for the loading indicator.
pub const LOADING_ANIM_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

pub const DEFAULT_CITIES_SOURCE: &str = "citycoordinates.csv";

/// The selection control: options plus the chosen index
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LocationSelector {
    pub options: Vec<LocationOption>,
    pub selected: Option<usize>,
}

impl LocationSelector {
    /// Drop existing options and take the new ones; the first becomes selected.
    pub fn set_options(&mut self, options: Vec<LocationOption>) {
        self.options.clear();
        self.options.extend(options);
        self.selected = if self.options.is_empty() { None } else { Some(0) };
    }

    /// Returns false when the index is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.options.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn selection(&self) -> Option<&LocationOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    /// Exact label match first, then label prefix; both ignore case.
    pub fn position_by_label(&self, query: &str) -> Option<usize> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return None;
        }
        self.options
            .iter()
            .position(|o| o.label.to_lowercase() == query)
            .or_else(|| {
                self.options
                    .iter()
                    .position(|o| o.label.to_lowercase().starts_with(&query))
            })
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Cities ---
    /// Where the CSV is read from
    #[debug(section = "Cities", label = "Source")]
    pub cities_source: String,

    /// City list lifecycle; holds the option count once loaded
    #[debug(section = "Cities", label = "List", debug_fmt)]
    pub cities: DataResource<usize>,

    /// Label requested with `--city`, applied when the list arrives
    #[debug(section = "Cities", label = "Preferred", debug_fmt)]
    pub preferred_city: Option<String>,

    #[debug(section = "Cities", label = "Selector", debug_fmt)]
    pub selector: LocationSelector,

    // --- Forecast ---
    /// Empty (idle) → Loading → Loaded (result) / Failed (error)
    #[debug(section = "Forecast", label = "Data", debug_fmt)]
    pub forecast: DataResource<Forecast>,

    /// Id of the fetch whose reply is still wanted
    #[debug(section = "Forecast", label = "Request")]
    pub request_seq: u64,

    /// One-line message for input problems (e.g. nothing selected)
    #[debug(section = "Forecast", label = "Notice", debug_fmt)]
    pub notice: Option<String>,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub tick_count: u32,

    // --- Location picker (skipped) ---
    #[debug(skip)]
    pub picker_open: bool,

    #[debug(skip)]
    pub picker_selected: usize,
}

impl AppState {
    pub fn new(cities_source: impl Into<String>, preferred_city: Option<String>) -> Self {
        Self {
            cities_source: cities_source.into(),
            cities: DataResource::Empty,
            preferred_city,
            selector: LocationSelector::default(),
            forecast: DataResource::Empty,
            request_seq: 0,
            notice: None,
            tick_count: 0,
            picker_open: false,
            picker_selected: 0,
        }
    }

    pub fn selection(&self) -> Option<&LocationOption> {
        self.selector.selection()
    }

    pub fn is_loading(&self) -> bool {
        self.forecast.is_loading()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_CITIES_SOURCE, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str) -> LocationOption {
        LocationOption {
            value: "1,2".into(),
            label: label.into(),
        }
    }

    #[test]
    fn test_set_options_replaces() {
        let mut selector = LocationSelector::default();
        selector.set_options(vec![option("A, X"), option("B, Y")]);
        selector.select(1);

        selector.set_options(vec![option("C, Z")]);

        assert_eq!(selector.options, vec![option("C, Z")]);
        assert_eq!(selector.selected, Some(0));
    }

    #[test]
    fn test_set_options_empty_clears_selection() {
        let mut selector = LocationSelector::default();
        selector.set_options(vec![option("A, X")]);
        selector.set_options(Vec::new());

        assert!(selector.selection().is_none());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut selector = LocationSelector::default();
        selector.set_options(vec![option("A, X")]);

        assert!(!selector.select(3));
        assert_eq!(selector.selected, Some(0));
    }

    #[test]
    fn test_position_by_label() {
        let mut selector = LocationSelector::default();
        selector.set_options(vec![
            option("Paris, France"),
            option("Paris, United States"),
            option("Lima, Peru"),
        ]);

        assert_eq!(selector.position_by_label("paris, united states"), Some(1));
        assert_eq!(selector.position_by_label("Paris"), Some(0));
        assert_eq!(selector.position_by_label("lim"), Some(2));
        assert_eq!(selector.position_by_label("Oslo"), None);
        assert_eq!(selector.position_by_label(""), None);
    }

    #[test]
    fn test_spinner_cycles() {
        let mut state = AppState::default();
        let first = state.spinner();
        state.tick_count = SPINNER_FRAMES.len() as u32;
        assert_eq!(state.spinner(), first);
    }
}
