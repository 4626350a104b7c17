use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use tui_dispatch::DataResource;

use super::{Component, ERROR_ICON};
use crate::action::Action;
use crate::forecast::{DayCard, Forecast};
use crate::state::AppState;

pub struct ForecastBody;

pub struct ForecastBodyProps<'a> {
    pub state: &'a AppState,
}

/// Rows inside a card: date, glyph, condition, high, low.
const CARD_HEIGHT: u16 = 7;

// ============================================================================
// Component
// ============================================================================

impl Component<Action> for ForecastBody {
    type Props<'a> = ForecastBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match ForecastView::from_state(props.state) {
            ForecastView::CitiesFailed(error) => {
                render_error(frame, area, &format!("Failed to load city list: {}", error), None);
            }
            ForecastView::CitiesLoading => render_message(frame, area, "Loading locations..."),
            ForecastView::Error(error) => render_error(frame, area, error, Some("retry")),
            ForecastView::Result(forecast) => render_result(frame, area, forecast),
            ForecastView::Loading => {
                let label = props
                    .state
                    .selection()
                    .map(|o| o.label.as_str())
                    .unwrap_or_default();
                render_message(
                    frame,
                    area,
                    &format!("{} Loading forecast for {}...", props.state.spinner(), label),
                );
            }
            ForecastView::Idle { has_selection } => render_idle_hint(frame, area, has_selection),
        }
    }
}

fn render_result(frame: &mut Frame, area: Rect, forecast: &Forecast) {
    let chunks = Layout::vertical([
        Constraint::Length(1),           // Heading
        Constraint::Length(1),           // Spacer
        Constraint::Length(CARD_HEIGHT), // Cards
    ])
    .flex(Flex::Center)
    .split(area);

    let heading = Line::from(vec![Span::styled(
        forecast.heading(),
        Style::default().add_modifier(Modifier::BOLD),
    )])
    .centered();
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    let cards = forecast.cards();
    if cards.is_empty() {
        let empty = Line::from(Span::styled(
            "No forecast days returned",
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        frame.render_widget(Paragraph::new(empty), chunks[2]);
        return;
    }

    let columns = Layout::horizontal(
        cards
            .iter()
            .map(|_| Constraint::Ratio(1, cards.len() as u32)),
    )
    .split(chunks[2]);

    for (card, column) in cards.iter().zip(columns.iter()) {
        render_card(frame, *column, card);
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &DayCard) {
    let lines = vec![
        Line::from(Span::styled(
            card.date.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(card.glyph),
        Line::from(Span::styled(
            card.condition.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled("H: ", Style::default().fg(Color::DarkGray)),
            Span::styled(card.high.clone(), Style::default().fg(Color::LightRed)),
        ]),
        Line::from(vec![
            Span::styled("L: ", Style::default().fg(Color::DarkGray)),
            Span::styled(card.low.clone(), Style::default().fg(Color::LightBlue)),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray))),
        area,
    );
}

fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let msg = Line::from(vec![Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(msg), chunks[0]);
}

fn render_idle_hint(frame: &mut Frame, area: Rect, has_selection: bool) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let (key, rest) = if has_selection {
        ("f", " to fetch the 7-day forecast")
    } else {
        ("l", " to choose a location")
    };
    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled(key, Style::default().fg(Color::Cyan).bold()),
        Span::styled(rest, Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[0]);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str, retry_hint: Option<&str>) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(ERROR_ICON).centered()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                error.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    if let Some(hint) = retry_hint {
        frame.render_widget(
            Paragraph::new(
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                    Span::styled("f", Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" to {}", hint), Style::default().fg(Color::DarkGray)),
                ])
                .centered(),
            ),
            chunks[4],
        );
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Exactly one of these is on screen at a time.
enum ForecastView<'a> {
    CitiesFailed(&'a str),
    CitiesLoading,
    Error(&'a str),
    Result(&'a Forecast),
    Loading,
    Idle { has_selection: bool },
}

impl<'a> ForecastView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        if state.selector.options.is_empty() {
            match &state.cities {
                DataResource::Failed(error) => return ForecastView::CitiesFailed(error),
                DataResource::Loading => return ForecastView::CitiesLoading,
                _ => {}
            }
        }
        match &state.forecast {
            DataResource::Failed(error) => ForecastView::Error(error),
            DataResource::Loaded(forecast) => ForecastView::Result(forecast),
            DataResource::Loading => ForecastView::Loading,
            DataResource::Empty => ForecastView::Idle {
                has_selection: state.selection().is_some(),
            },
        }
    }
}
