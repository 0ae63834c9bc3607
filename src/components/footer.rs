use ratatui::{
    prelude::{Frame, Rect},
    style::{Modifier, Style},
    text::Span,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection,
    StatusBarStyle,
};

use super::theme::{ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::{AppState, FocusArea, LoadPhase, Route};

pub const FAILED_STATUS: &str = "Catalog unavailable, see log";

/// One-line key hints plus catalog status.
pub struct Footer {
    status_bar: StatusBar,
}

pub struct FooterProps<'a> {
    pub state: &'a AppState,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            status_bar: StatusBar::new(),
        }
    }
}

impl Footer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for Footer {
    type Props<'a> = FooterProps<'a>;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let hints = footer_hints(state);
        let (status, color) = status_text(state);
        let status_items = [StatusBarItem::span(Span::styled(
            status,
            Style::default().fg(color),
        ))];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(BG_PANEL),
                fg: Some(TEXT_MAIN),
            },
            text: Style::default().fg(TEXT_DIM),
            hint_key: Style::default()
                .fg(ACCENT_TEAL)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(TEXT_DIM),
            separator: Style::default().fg(TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items).with_separator("  "),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

pub fn footer_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if matches!(state.route, Route::Details(_)) {
        return vec![
            StatusBarHint::new("Esc", "Back"),
            StatusBarHint::new("q", "Quit"),
        ];
    }
    match state.focus {
        FocusArea::Search => vec![
            StatusBarHint::new("Enter/Esc", "Grid"),
            StatusBarHint::new("Tab", "Focus"),
        ],
        FocusArea::Grid => vec![
            StatusBarHint::new("hjkl", "Move"),
            StatusBarHint::new("Enter", "Details"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("q", "Quit"),
        ],
    }
}

/// Right-hand status: match count, or a pointer at the log after a failed load.
pub fn status_text(state: &AppState) -> (String, ratatui::style::Color) {
    match state.catalog.phase() {
        LoadPhase::Loading => ("Loading...".to_string(), ACCENT_GOLD),
        LoadPhase::Failed => (FAILED_STATUS.to_string(), ACCENT_RED),
        LoadPhase::Ready => (
            format!(
                "{}/{}",
                state.catalog.filtered_len(),
                state.catalog.items.len()
            ),
            ACCENT_GOLD,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EnrichedItem;
    use tui_dispatch::testing::*;

    fn item(name: &str) -> EnrichedItem {
        EnrichedItem {
            name: name.to_string(),
            image_url: None,
            types: "normal".to_string(),
            stats: Vec::new(),
            sprites: serde_json::Value::Null,
        }
    }

    fn render(state: &AppState) -> String {
        let mut render = RenderHarness::new(80, 1);
        let mut footer = Footer::new();
        render.render_to_string_plain(|frame| {
            footer.render(frame, frame.area(), FooterProps { state });
        })
    }

    #[test]
    fn test_status_counts_matches() {
        let mut state = AppState::default();
        state
            .catalog
            .apply_loaded(vec![item("bulbasaur"), item("ivysaur"), item("pidgey")]);
        state.catalog.on_query_change("saur");
        assert_eq!(status_text(&state).0, "2/3");
    }

    #[test]
    fn test_failed_status_points_at_log() {
        let mut state = AppState::default();
        state.catalog.apply_failed("status 500".into());
        assert_eq!(status_text(&state).0, FAILED_STATUS);
        let output = render(&state);
        assert!(output.contains("see log"), "{output}");
    }

    #[test]
    fn test_hints_follow_focus_and_route() {
        let mut state = AppState::default();
        state.catalog.apply_loaded(vec![item("bulbasaur")]);
        assert_eq!(footer_hints(&state).len(), 4);

        state.focus = FocusArea::Search;
        let output = render(&state);
        assert!(output.contains("Grid"), "{output}");
        assert!(!output.contains("Quit"), "{output}");

        state.route = Route::Details(item("bulbasaur"));
        assert_eq!(footer_hints(&state).len(), 2);
        let output = render(&state);
        assert!(output.contains("Back"), "{output}");
    }

    #[test]
    fn test_render_grid_hints() {
        let mut state = AppState::default();
        state.catalog.apply_loaded(vec![item("bulbasaur")]);
        let output = render(&state);
        assert!(output.contains("Details"), "{output}");
        assert!(output.contains("1/1"), "{output}");
    }
}
