//! Stacked card rendering of the project overview (narrow terminals)

use super::project_table::{action_spans, status_span};
use crate::model::Project;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const HIGHLIGHT_SYMBOL: &str = "▶ ";

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn value(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::White))
}

/// Build one card; `width` is the usable inner width
fn card(project: &Project, width: usize) -> ListItem<'static> {
    let name = project.ngo_name.clone().unwrap_or_default();
    let badge = status_span(project);
    let gap = width
        .saturating_sub(name.width() + badge.content.width())
        .max(1);

    let type_text = project.project_type.clone().unwrap_or_default();
    let type_column = (width / 2).max(6 + type_text.width() + 1);

    let mut type_line = vec![label("Type: "), value(type_text.clone())];
    type_line.push(Span::raw(
        " ".repeat(type_column.saturating_sub(6 + type_text.width())),
    ));
    type_line.push(label("Area: "));
    type_line.push(value(project.formatted_area()));

    let lines = vec![
        Line::from(vec![
            Span::styled(
                name,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(gap)),
            badge,
        ]),
        Line::from(Span::styled(
            project.location.clone().unwrap_or_default(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(type_line),
        Line::from(vec![label("Submitted: "), value(project.formatted_date())]),
        Line::from(action_spans(project)),
        Line::from(Span::styled(
            "─".repeat(width),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    ListItem::new(lines)
}

pub fn render(frame: &mut Frame, area: Rect, rows: &[&Project], selected: Option<usize>) {
    let width = (area.width as usize).saturating_sub(2 + HIGHLIGHT_SYMBOL.width());
    let items: Vec<ListItem> = rows.iter().map(|p| card(p, width)).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Projects ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(HIGHLIGHT_SYMBOL);

    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}
