//! Column table rendering of the project overview (wide terminals)

use super::project_table::{action_spans, status_span};
use crate::model::{Project, SortField, ViewState};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

/// Header text for a sortable column, with its key and sort indicator
fn sort_header(field: SortField, key: char, view: &ViewState) -> Line<'static> {
    let (indicator, style) = if view.sort_field == field {
        (
            view.sort_direction.arrow(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("⇅", Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(Color::Yellow)),
        Span::styled(format!("{} {}", field.header(), indicator), style),
    ])
}

fn two_line_cell(primary: Option<&str>, secondary: String) -> Cell<'static> {
    Cell::from(Text::from(vec![
        Line::from(Span::styled(
            primary.unwrap_or_default().to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(secondary, Style::default().fg(Color::DarkGray))),
    ]))
}

fn project_row(project: &Project) -> Row<'static> {
    Row::new(vec![
        two_line_cell(
            project.ngo_name.as_deref(),
            project.location.clone().unwrap_or_default(),
        ),
        two_line_cell(project.project_type.as_deref(), project.formatted_area()),
        Cell::from(project.formatted_date()),
        Cell::from(Line::from(status_span(project))),
        Cell::from(Line::from(action_spans(project))),
    ])
    .height(2)
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[&Project],
    view: &ViewState,
    selected: Option<usize>,
) {
    let header = Row::new(vec![
        Cell::from(sort_header(SortField::NgoName, '1', view)),
        Cell::from(sort_header(SortField::ProjectType, '2', view)),
        Cell::from(sort_header(SortField::SubmissionDate, '3', view)),
        Cell::from("Status"),
        Cell::from("Actions"),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let widths = [
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(23),
    ];

    let table = Table::new(rows.iter().map(|p| project_row(p)), widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Projects ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}
