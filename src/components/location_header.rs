use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::location::LocationOption;

pub const LOCATION_ICON: &str = "\u{1f4cd}";

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub selection: Option<&'a LocationOption>,
    pub option_count: usize,
    pub notice: Option<&'a str>,
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(1), // Selected location
            Constraint::Length(1), // Notice
        ])
        .split(area);

        let location_line = match props.selection {
            Some(option) => Line::from(vec![
                Span::raw(format!("{} ", LOCATION_ICON)),
                Span::styled(
                    option.label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({})", option.value),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("  {} locations", props.option_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            None => Line::from(Span::styled(
                "No location selected",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(location_line.centered()), chunks[0]);

        if let Some(notice) = props.notice {
            let notice_line = Line::from(Span::styled(
                notice.to_string(),
                Style::default().fg(Color::Yellow),
            ))
            .centered();
            frame.render_widget(Paragraph::new(notice_line), chunks[1]);
        }
    }
}
