use crossterm::event::KeyCode;
use ratatui::{
    prelude::{Frame, Rect},
    style::Style,
    widgets::Borders,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::theme::{ACCENT_TEAL, BG_INPUT, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::FocusArea;

pub const SEARCH_PLACEHOLDER: &str = "Search Pokémon";

/// Live search input. Every edit is dispatched as `SearchQueryChange`.
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_focused: bool,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_INPUT),
            fg: Some(TEXT_MAIN),
        },
        placeholder_style: Some(Style::default().fg(TEXT_DIM)),
        cursor_style: None,
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

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
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                return vec![Action::FocusSet(FocusArea::Grid)];
            }
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: Action::SearchQueryChange,
            on_submit: |_| Action::FocusSet(FocusArea::Grid),
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let input_props = TextInputProps {
            value: props.query,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: Action::SearchQueryChange,
            on_submit: |_| Action::FocusSet(FocusArea::Grid),
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, area, input_props);
    }
}
