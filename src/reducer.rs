//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::location::{SelectedLocation, SELECT_LOCATION_MESSAGE};
use crate::state::AppState;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Cities actions =====
        Action::CitiesFetch => {
            state.cities = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadCities {
                source: state.cities_source.clone(),
            })
        }

        Action::CitiesDidLoad(options) => {
            let count = options.len();
            state.selector.set_options(options);
            if let Some(preferred) = state.preferred_city.as_deref() {
                match state.selector.position_by_label(preferred) {
                    Some(index) => {
                        state.selector.select(index);
                    }
                    None => {
                        state.notice = Some(format!(
                            "City '{}' is not in the list; showing the first location.",
                            preferred
                        ));
                    }
                }
            }
            state.cities = DataResource::Loaded(count);
            DispatchResult::changed()
        }

        Action::CitiesDidError(msg) => {
            state.cities = DataResource::Failed(msg);
            DispatchResult::changed()
        }

        // ===== Forecast actions =====
        Action::ForecastFetch => start_fetch(state),

        Action::ForecastDidLoad { request, forecast } => {
            if request != state.request_seq || !state.forecast.is_loading() {
                return DispatchResult::unchanged();
            }
            state.forecast = DataResource::Loaded(forecast);
            DispatchResult::changed()
        }

        Action::ForecastDidError { request, message } => {
            if request != state.request_seq || !state.forecast.is_loading() {
                return DispatchResult::unchanged();
            }
            state.forecast = DataResource::Failed(message);
            DispatchResult::changed()
        }

        Action::ForecastDismiss => {
            if state.forecast.is_loaded() || state.forecast.is_failed() {
                state.forecast = DataResource::Empty;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Picker actions =====
        Action::PickerOpen => {
            if state.selector.options.is_empty() {
                return DispatchResult::unchanged();
            }
            state.picker_open = true;
            state.picker_selected = state.selector.selected.unwrap_or(0);
            DispatchResult::changed()
        }

        Action::PickerClose => {
            state.picker_open = false;
            DispatchResult::changed()
        }

        Action::PickerSelect(index) => {
            if index < state.selector.options.len() && index != state.picker_selected {
                state.picker_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::PickerConfirm => {
            if !state.picker_open || !state.selector.select(state.picker_selected) {
                return DispatchResult::unchanged();
            }
            state.picker_open = false;
            start_fetch(state)
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Enter Loading for the current selection, or leave a notice if there is none.
fn start_fetch(state: &mut AppState) -> DispatchResult<Effect> {
    let Some(option) = state.selection() else {
        state.notice = Some(SELECT_LOCATION_MESSAGE.to_string());
        return DispatchResult::changed();
    };

    let label = option.label.clone();
    let location = match SelectedLocation::parse(&option.value) {
        Ok(location) => location,
        Err(e) => {
            state.notice = Some(e.to_string());
            return DispatchResult::changed();
        }
    };

    // Latest wins: any reply still in flight carries an older id.
    state.request_seq = state.request_seq.wrapping_add(1);
    state.forecast = DataResource::Loading;
    state.notice = None;
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::FetchForecast {
        request: state.request_seq,
        label,
        latitude: location.latitude,
        longitude: location.longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{Forecast, FETCH_FAILED_MESSAGE};
    use crate::location::LocationOption;

    fn options() -> Vec<LocationOption> {
        vec![
            LocationOption {
                value: "48.8566,2.3522".into(),
                label: "Paris, France".into(),
            },
            LocationOption {
                value: "35.6762,139.6503".into(),
                label: "Tokyo, Japan".into(),
            },
        ]
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::CitiesDidLoad(options()));
        state
    }

    #[test]
    fn test_cities_fetch_sets_loading() {
        let mut state = AppState::new("cities.csv", None);

        let result = reducer(&mut state, Action::CitiesFetch);

        assert!(result.changed);
        assert!(state.cities.is_loading());
        assert_eq!(
            result.effects,
            vec![Effect::LoadCities {
                source: "cities.csv".into()
            }]
        );
    }

    #[test]
    fn test_cities_did_load_selects_first() {
        let state = loaded_state();

        assert_eq!(state.cities.data(), Some(&2));
        assert_eq!(state.selection().map(|o| o.label.as_str()), Some("Paris, France"));
    }

    #[test]
    fn test_cities_did_load_honours_preferred_city() {
        let mut state = AppState::new("cities.csv", Some("tokyo".into()));

        reducer(&mut state, Action::CitiesDidLoad(options()));

        assert_eq!(state.selector.selected, Some(1));
    }

    #[test]
    fn test_cities_did_load_unknown_preferred_city() {
        let mut state = AppState::new("cities.csv", Some("Atlantis".into()));

        reducer(&mut state, Action::CitiesDidLoad(options()));

        assert_eq!(state.selector.selected, Some(0));
        assert_eq!(
            state.notice.as_deref(),
            Some("City 'Atlantis' is not in the list; showing the first location.")
        );
    }

    #[test]
    fn test_forecast_fetch_with_empty_coordinates() {
        let mut state = AppState::default();
        reducer(
            &mut state,
            Action::CitiesDidLoad(vec![LocationOption {
                value: ",".into(),
                label: "Lima, Peru".into(),
            }]),
        );

        let result = reducer(&mut state, Action::ForecastFetch);

        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(state.forecast.is_empty());
        assert_eq!(state.request_seq, 0);
        assert_eq!(
            state.notice.as_deref(),
            Some("Location value ',' is not a latitude,longitude pair.")
        );
    }

    #[test]
    fn test_forecast_fetch_sets_loading() {
        let mut state = loaded_state();
        state.tick_count = 5;

        let result = reducer(&mut state, Action::ForecastFetch);

        assert!(result.changed);
        assert!(state.forecast.is_loading());
        assert_eq!(state.tick_count, 0);
        assert_eq!(
            result.effects,
            vec![Effect::FetchForecast {
                request: 1,
                label: "Paris, France".into(),
                latitude: "48.8566".into(),
                longitude: "2.3522".into(),
            }]
        );
    }

    #[test]
    fn test_forecast_fetch_without_selection() {
        let mut state = AppState::default();

        let result = reducer(&mut state, Action::ForecastFetch);

        assert!(result.effects.is_empty());
        assert!(state.forecast.is_empty());
        assert_eq!(state.notice.as_deref(), Some(SELECT_LOCATION_MESSAGE));
    }

    #[test]
    fn test_forecast_did_load_leaves_loading() {
        let mut state = loaded_state();
        reducer(&mut state, Action::ForecastFetch);

        let forecast = Forecast {
            label: "Paris, France".into(),
            days: vec![],
        };
        let result = reducer(
            &mut state,
            Action::ForecastDidLoad {
                request: 1,
                forecast: forecast.clone(),
            },
        );

        assert!(result.changed);
        assert!(!state.is_loading());
        assert_eq!(state.forecast.data(), Some(&forecast));
    }

    #[test]
    fn test_forecast_did_error_leaves_loading() {
        let mut state = loaded_state();
        reducer(&mut state, Action::ForecastFetch);

        reducer(
            &mut state,
            Action::ForecastDidError {
                request: 1,
                message: FETCH_FAILED_MESSAGE.into(),
            },
        );

        assert!(!state.is_loading());
        assert_eq!(state.forecast.error(), Some(FETCH_FAILED_MESSAGE));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let mut state = loaded_state();
        reducer(&mut state, Action::ForecastFetch);
        reducer(&mut state, Action::ForecastFetch);
        assert_eq!(state.request_seq, 2);

        let result = reducer(
            &mut state,
            Action::ForecastDidError {
                request: 1,
                message: "late".into(),
            },
        );

        assert!(!result.changed);
        assert!(state.is_loading());
    }

    #[test]
    fn test_dismiss_returns_to_idle() {
        let mut state = loaded_state();
        reducer(&mut state, Action::ForecastFetch);
        reducer(
            &mut state,
            Action::ForecastDidError {
                request: 1,
                message: "boom".into(),
            },
        );

        let result = reducer(&mut state, Action::ForecastDismiss);
        assert!(result.changed);
        assert!(state.forecast.is_empty());

        let result = reducer(&mut state, Action::ForecastDismiss);
        assert!(!result.changed);
    }

    #[test]
    fn test_picker_confirm_selects_and_fetches() {
        let mut state = loaded_state();

        reducer(&mut state, Action::PickerOpen);
        assert!(state.picker_open);
        reducer(&mut state, Action::PickerSelect(1));
        let result = reducer(&mut state, Action::PickerConfirm);

        assert!(!state.picker_open);
        assert_eq!(state.selector.selected, Some(1));
        assert!(state.is_loading());
        assert!(matches!(
            &result.effects[0],
            Effect::FetchForecast { label, .. } if label == "Tokyo, Japan"
        ));
    }

    #[test]
    fn test_picker_select_out_of_range() {
        let mut state = loaded_state();
        reducer(&mut state, Action::PickerOpen);

        let result = reducer(&mut state, Action::PickerSelect(9));

        assert!(!result.changed);
        assert_eq!(state.picker_selected, 0);
    }

    #[test]
    fn test_tick_only_while_loading() {
        let mut state = loaded_state();

        let result = reducer(&mut state, Action::Tick);
        assert!(!result.changed);

        reducer(&mut state, Action::ForecastFetch);
        let result = reducer(&mut state, Action::Tick);
        assert!(result.changed);
        assert_eq!(state.tick_count, 1);
    }
}
