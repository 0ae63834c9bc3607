use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    prelude::{Frame, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::{EnrichedItem, FocusArea, GRID_COLUMNS};

/// Rows per card, borders included.
pub const CARD_HEIGHT: u16 = 5;

/// Two-column grid of selectable creature cards.
#[derive(Default)]
pub struct CreatureGrid;

pub struct CreatureGridProps<'a> {
    pub items: &'a [&'a EnrichedItem],
    pub selected: usize,
    pub is_focused: bool,
    pub empty_message: &'a str,
}

impl Component<Action> for CreatureGrid {
    type Props<'a> = CreatureGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let row = GRID_COLUMNS as i16;

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::GridMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::GridMove(1)),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::GridMove(-row)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::GridMove(row)),
                KeyCode::Home | KeyCode::Char('g') => Some(Action::GridSelect(0)),
                KeyCode::End | KeyCode::Char('G') => Some(Action::GridSelect(
                    props.items.len().saturating_sub(1),
                )),
                KeyCode::Enter | KeyCode::Char(' ') => props
                    .items
                    .get(props.selected)
                    .map(|item| Action::NavigateDetails((*item).clone())),
                KeyCode::Char('/') => Some(Action::FocusSet(FocusArea::Search)),
                _ => None,
            },
            EventKind::Scroll { delta, .. } => {
                Some(Action::GridMove((*delta as i16).saturating_mul(row)))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .borders(Borders::NONE);
        frame.render_widget(block, area);

        if props.items.is_empty() {
            let message = Paragraph::new(props.empty_message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_DIM));
            let middle = Rect {
                y: area.y + area.height / 2,
                height: area.height.min(1),
                ..area
            };
            frame.render_widget(message, middle);
            return;
        }

        let (first_row, visible_rows) = visible_window(props.items.len(), props.selected, area.height);
        let columns = [Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS];

        for offset in 0..visible_rows {
            let row = first_row + offset;
            let y = area.y + offset as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let row_area = Rect {
                y,
                height,
                ..area
            };
            let cells = Layout::horizontal(columns).split(row_area);
            for (column, cell) in cells.iter().enumerate() {
                let index = row * GRID_COLUMNS + column;
                let Some(item) = props.items.get(index) else {
                    continue;
                };
                let selected = index == props.selected;
                render_card(frame, *cell, item, selected, props.is_focused);
            }
        }
    }
}

/// First visible row and how many rows fit, keeping the selected row on screen.
pub fn visible_window(len: usize, selected: usize, height: u16) -> (usize, usize) {
    let rows = len.div_ceil(GRID_COLUMNS);
    let fit = ((height / CARD_HEIGHT) as usize).max(1);
    let selected_row = selected.min(len.saturating_sub(1)) / GRID_COLUMNS;
    let first_row = if selected_row >= fit {
        selected_row + 1 - fit
    } else {
        0
    };
    (first_row, fit.min(rows - first_row))
}

fn render_card(frame: &mut Frame, area: Rect, item: &EnrichedItem, selected: bool, focused: bool) {
    let border = match (selected, focused) {
        (true, true) => Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(ACCENT_GOLD),
        _ => Style::default().fg(TEXT_DIM),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(Style::default().bg(BG_PANEL));

    let name_style = if selected {
        Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)
    };
    let text = Text::from(vec![
        Line::from(Span::styled(item.name.clone(), name_style)),
        Line::from(Span::styled(item.types.clone(), Style::default().fg(TEXT_DIM))),
        Line::from(Span::styled(
            image_label(item),
            Style::default().fg(ACCENT_GOLD),
        )),
    ]);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Short reference to the card image: the sprite file name.
pub fn image_label(item: &EnrichedItem) -> String {
    match item.image_url.as_deref() {
        Some(url) => {
            let file = url.rsplit('/').next().unwrap_or(url);
            format!("[{file}]")
        }
        None => "[no image]".to_string(),
    }
}
