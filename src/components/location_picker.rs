use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, ScrollbarStyle, SelectList,
    SelectListBehavior, SelectListProps, SelectListStyle, SelectionStyle, centered_rect,
};

use super::Component;
use crate::action::Action;
use crate::location::LocationOption;

pub const PICKER_WIDTH: u16 = 60;
pub const PICKER_HEIGHT: u16 = 16;

/// Modal list of every loaded location
pub struct LocationPicker {
    list: SelectList,
    modal: Modal,
    was_open: bool,
}

pub struct LocationPickerProps<'a> {
    pub options: &'a [LocationOption],
    pub selected: usize,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

impl Default for LocationPicker {
    fn default() -> Self {
        Self {
            list: SelectList::new(),
            modal: Modal::new(),
            was_open: false,
        }
    }
}

impl LocationPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, is_open: bool) {
        if is_open && !self.was_open {
            self.list = SelectList::new();
        }
        self.was_open = is_open;
    }

    fn option_items(options: &[LocationOption]) -> Vec<Line<'static>> {
        options
            .iter()
            .map(|option| {
                Line::from(vec![
                    Span::raw(option.label.clone()),
                    Span::styled(
                        format!("  {}", option.value),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    }

    fn list_style(padding: Padding) -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding,
                bg: None,
                fg: None,
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

impl Component<Action> for LocationPicker {
    type Props<'a> = LocationPickerProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => vec![Action::PickerClose],
            KeyCode::Enter => vec![Action::PickerConfirm],
            _ if props.options.is_empty() => Vec::new(),
            _ => {
                let items = Self::option_items(props.options);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected,
                    is_focused: true,
                    style: Self::list_style(Padding::xy(1, 1)),
                    behavior: SelectListBehavior::default(),
                    on_select: props.on_select,
                    render_item: &|item| item.clone(),
                };
                self.list
                    .handle_event(event, list_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < 20 || area.height < 8 {
            return;
        }

        let LocationPicker { list, modal, .. } = self;
        let modal_area = centered_rect(PICKER_WIDTH, PICKER_HEIGHT, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(2), // Title
                Constraint::Min(1),    // Options
            ])
            .split(content_area);

            let title = Line::from(Span::styled(
                "Choose a location",
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .centered();
            frame.render_widget(Paragraph::new(title), chunks[0]);

            let items = Self::option_items(props.options);
            let list_props = SelectListProps {
                items: &items,
                count: items.len(),
                selected: props.selected,
                is_focused: props.is_focused,
                style: Self::list_style(Padding::all(1)),
                behavior: SelectListBehavior::default(),
                on_select: props.on_select,
                render_item: &|item| item.clone(),
            };
            list.render(frame, chunks[1], list_props);
        };

        modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(Color::Rgb(35, 35, 45)),
                        padding: Padding::default(),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::PickerClose,
                render_content: &mut render_content,
            },
        );
    }
}
