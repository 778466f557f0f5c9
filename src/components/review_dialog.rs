//! Review overlay for a single project

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::project_table::status_span;
use crate::model::Project;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct ReviewDialog {
    project: Option<Project>,
}

impl ReviewDialog {
    pub fn set_project(&mut self, project: Option<Project>) {
        self.project = project;
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }
}

fn field(name: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", name), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

impl Component for ReviewDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('r') => Some(Action::CloseModal),
            KeyCode::Char('a') => self
                .project
                .as_ref()
                .filter(|p| p.is_under_review())
                .map(|p| Action::ApproveProject(p.id.clone())),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 64, 16);
        frame.render_widget(Clear, popup_area);

        let content = match &self.project {
            Some(project) => {
                let text = |v: &Option<String>| v.clone().unwrap_or_default();
                let mut lines = vec![
                    Line::from(""),
                    field("Project ID", project.id.to_string()),
                    field("NGO Submitter", text(&project.ngo_name)),
                    field("Location", text(&project.location)),
                    field("Project Type", text(&project.project_type)),
                    field("Area", project.formatted_area()),
                    field("Submitted", project.formatted_date()),
                    Line::from(vec![
                        Span::styled(
                            format!("  {:<18}", "Status"),
                            Style::default().fg(Color::DarkGray),
                        ),
                        status_span(project),
                    ]),
                    Line::from(""),
                ];

                let mut keys = vec![];
                if project.is_under_review() {
                    keys.push(Span::styled(
                        " a ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ));
                    keys.push(Span::raw("Approve  "));
                }
                keys.push(Span::styled(" Esc ", Style::default().fg(Color::Yellow)));
                keys.push(Span::raw("Close"));
                lines.push(Line::from(keys).alignment(Alignment::Center));
                lines
            }
            None => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "This project is no longer in the list.",
                    Style::default().fg(Color::Yellow),
                ))
                .alignment(Alignment::Center),
            ],
        };

        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Review Project ")
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
