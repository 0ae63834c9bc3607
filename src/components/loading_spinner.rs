use ratatui::{
    layout::Alignment,
    prelude::{Frame, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_TEAL, BG_BASE, TEXT_DIM};
use super::Component;
use crate::action::Action;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Full-screen spinner shown until the first fetch cycle settles.
#[derive(Default)]
pub struct LoadingSpinner;

pub struct LoadingSpinnerProps {
    pub tick: u64,
}

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

impl Component<Action> for LoadingSpinner {
    type Props<'a> = LoadingSpinnerProps;

    fn handle_event(
        &mut self,
        _event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        None::<Action>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        if area.height == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(spinner_frame(props.tick), Style::default().fg(ACCENT_TEAL)),
            Span::styled(" Loading creatures...", Style::default().fg(TEXT_DIM)),
        ]);
        let middle = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
    }
}
