use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, ForecastBody, ForecastBodyProps, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
/// Props for ForecastDisplay - read-only view of state
pub struct ForecastDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main screen: selected location, forecast area, key hints
#[derive(Default)]
pub struct ForecastDisplay;

impl Component<Action> for ForecastDisplay {
    type Props<'a> = ForecastDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('f') | KeyCode::Char('r') | KeyCode::Enter | KeyCode::F(5) => {
                    Some(Action::ForecastFetch)
                }
                KeyCode::Char('l') | KeyCode::Char('/') => Some(Action::PickerOpen),
                KeyCode::Char('x') => Some(Action::ForecastDismiss),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ForecastDisplayProps<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(2), // Location + notice
            Constraint::Min(1),    // Forecast
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let state = props.state;
        let mut header = LocationHeader;
        header.render(
            frame,
            chunks[0],
            LocationHeaderProps {
                selection: state.selection(),
                option_count: state.selector.options.len(),
                notice: state.notice.as_deref(),
            },
        );

        let mut body = ForecastBody;
        body.render(frame, chunks[1], ForecastBodyProps { state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("f", "forecast"),
                    StatusBarHint::new("l", "location"),
                    StatusBarHint::new("x", "dismiss"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{Forecast, ForecastDay};
    use chrono::NaiveDate;
    use tui_dispatch::testing::*;
    use tui_dispatch::DataResource;

    #[test]
    fn test_handle_event_fetch() {
        let mut component = ForecastDisplay;
        let state = AppState::default();
        let props = ForecastDisplayProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("f")), props)
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::ForecastFetch);
    }

    #[test]
    fn test_handle_event_picker() {
        let mut component = ForecastDisplay;
        let state = AppState::default();
        let props = ForecastDisplayProps {
            state: &state,
            is_focused: true,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("l")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::PickerOpen);
    }

    #[test]
    fn test_handle_event_unfocused_ignores() {
        let mut component = ForecastDisplay;
        let state = AppState::default();
        let props = ForecastDisplayProps {
            state: &state,
            is_focused: false,
        };

        let actions: Vec<_> = component
            .handle_event(&EventKind::Key(key("f")), props)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_result() {
        let mut render = RenderHarness::new(120, 24);
        let mut component = ForecastDisplay;

        let state = AppState {
            forecast: DataResource::Loaded(Forecast {
                label: "Oslo, Norway".into(),
                days: vec![ForecastDay {
                    date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                    condition: "snow".into(),
                    max_temperature: -2.0,
                    min_temperature: -9.0,
                }],
            }),
            ..Default::default()
        };

        let output = render.render_to_string_plain(|frame| {
            let props = ForecastDisplayProps {
                state: &state,
                is_focused: true,
            };
            component.render(frame, frame.area(), props);
        });

        assert!(output.contains("Weather Forecast: Oslo, Norway"));
        assert!(output.contains("-2°C"));
        assert!(output.contains("-9°C"));
    }
}
