use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    prelude::{Frame, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_GOLD, ACCENT_TEAL, BG_BASE, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::state::EnrichedItem;

/// Details screen for one record handed over by the grid.
#[derive(Default)]
pub struct DetailsView;

pub struct DetailsViewProps<'a> {
    pub item: &'a EnrichedItem,
    pub is_focused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatLine {
    pub name: String,
    pub value: u64,
}

impl Component<Action> for DetailsView {
    type Props<'a> = DetailsViewProps<'a>;

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
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                    Some(Action::NavigateBack)
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
        let item = props.item;
        let chunks = Layout::vertical([Constraint::Length(4), Constraint::Min(3)]).split(area);

        let header = Text::from(vec![
            Line::from(vec![
                Span::raw("Types: "),
                Span::styled(item.types.clone(), Style::default().fg(ACCENT_GOLD)),
            ]),
            Line::from(vec![
                Span::raw("Image: "),
                Span::styled(
                    item.image_url.clone().unwrap_or_else(|| "-".to_string()),
                    Style::default().fg(TEXT_DIM),
                ),
            ]),
        ]);
        let header_block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                item.name.to_ascii_uppercase(),
                Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        frame.render_widget(Paragraph::new(header).block(header_block), chunks[0]);

        let body = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let stats = stat_lines(&item.stats);
        let stats_text = if stats.is_empty() {
            Text::from("No stats.")
        } else {
            Text::from(
                stats
                    .iter()
                    .map(|stat| Line::from(render_stat(stat)))
                    .collect::<Vec<_>>(),
            )
        };
        let stats_block = Block::default()
            .borders(Borders::ALL)
            .title("STATS")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        frame.render_widget(Paragraph::new(stats_text).block(stats_block), body[0]);

        let sprites = sprite_urls(&item.sprites);
        let sprite_text = if sprites.is_empty() {
            Text::from("No sprites.")
        } else {
            Text::from(
                sprites
                    .into_iter()
                    .map(|(key, url)| {
                        Line::from(vec![
                            Span::styled(format!("{key}: "), Style::default().fg(ACCENT_GOLD)),
                            Span::styled(url, Style::default().fg(TEXT_DIM)),
                        ])
                    })
                    .collect::<Vec<_>>(),
            )
        };
        let sprite_block = Block::default()
            .borders(Borders::ALL)
            .title("SPRITES")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        frame.render_widget(
            Paragraph::new(sprite_text)
                .block(sprite_block)
                .wrap(Wrap { trim: true }),
            body[1],
        );
    }
}

/// Read `stat.name` and `base_stat` out of the opaque stat objects.
/// Entries missing either field are skipped.
pub fn stat_lines(stats: &[serde_json::Value]) -> Vec<StatLine> {
    stats
        .iter()
        .filter_map(|stat| {
            let name = stat.pointer("/stat/name")?.as_str()?.to_string();
            let value = stat.get("base_stat")?.as_u64()?;
            Some(StatLine { name, value })
        })
        .collect()
}

/// Top-level sprite entries that hold a URL, in key order.
pub fn sprite_urls(sprites: &serde_json::Value) -> Vec<(String, String)> {
    let Some(map) = sprites.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
        .collect()
}

fn render_stat(stat: &StatLine) -> String {
    let label = shorten_stat(&stat.name);
    let bar_len = (stat.value as usize / 10).clamp(1, 20);
    let bar = "#".repeat(bar_len);
    format!("{label:>4} {value:>3} {bar}", value = stat.value)
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tui_dispatch::testing::*;

    fn bulbasaur() -> EnrichedItem {
        EnrichedItem {
            name: "bulbasaur".into(),
            image_url: Some("https://img/1.png".into()),
            types: "grass, poison".into(),
            stats: vec![
                json!({ "base_stat": 45, "effort": 0, "stat": { "name": "hp" } }),
                json!({ "base_stat": 49, "effort": 0, "stat": { "name": "attack" } }),
                json!({ "effort": 1 }),
            ],
            sprites: json!({
                "front_default": "https://img/1.png",
                "back_default": "https://img/back/1.png",
                "front_female": null,
                "other": {}
            }),
        }
    }

    #[test]
    fn test_stat_lines_skip_malformed() {
        assert_eq!(
            stat_lines(&bulbasaur().stats),
            vec![
                StatLine {
                    name: "hp".into(),
                    value: 45
                },
                StatLine {
                    name: "attack".into(),
                    value: 49
                },
            ]
        );
    }

    #[test]
    fn test_sprite_urls_only_strings() {
        assert_eq!(
            sprite_urls(&bulbasaur().sprites),
            vec![
                ("back_default".to_string(), "https://img/back/1.png".to_string()),
                ("front_default".to_string(), "https://img/1.png".to_string()),
            ]
        );
        assert!(sprite_urls(&serde_json::Value::Null).is_empty());
    }

    #[test]
    fn test_render_stat_bar() {
        let line = render_stat(&StatLine {
            name: "speed".into(),
            value: 45,
        });
        assert_eq!(line, " SPD  45 ####");
    }

    #[test]
    fn test_back_keys() {
        let item = bulbasaur();
        let mut view = DetailsView;
        for code in [KeyCode::Esc, KeyCode::Backspace, KeyCode::Left] {
            let actions: Vec<_> = view
                .handle_event(
                    &EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                    DetailsViewProps {
                        item: &item,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
            actions.assert_first(Action::NavigateBack);
        }
    }

    #[test]
    fn test_render_stat_labels_stay_aligned() {
        let item = bulbasaur();
        let mut render = RenderHarness::new(100, 16);
        let mut view = DetailsView;
        let output = render.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                DetailsViewProps {
                    item: &item,
                    is_focused: true,
                },
            );
        });
        let column = |needle: &str| {
            output
                .lines()
                .find(|line| line.contains(needle))
                .and_then(|line| line.find(needle))
        };
        assert!(output.contains("  HP  45 ####"), "{output}");
        assert!(output.contains(" ATK  49 ####"), "{output}");
        assert_eq!(column(" 45 "), column(" 49 "), "{output}");
    }

    #[test]
    fn test_render_details() {
        let item = bulbasaur();
        let mut render = RenderHarness::new(100, 16);
        let mut view = DetailsView;
        let output = render.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                DetailsViewProps {
                    item: &item,
                    is_focused: true,
                },
            );
        });
        assert!(output.contains("BULBASAUR"), "{output}");
        assert!(output.contains("grass, poison"));
        assert!(output.contains(" HP  45"));
        assert!(output.contains("back_default"));
    }
}
