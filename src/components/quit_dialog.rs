//! Quit confirmation, with a reminder of reviews still outstanding

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::Project;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Default)]
pub struct QuitDialog {
    /// Projects still under review when the dialog was opened
    awaiting_review: usize,
}

impl QuitDialog {
    pub fn open(&mut self, projects: &[Project]) {
        self.awaiting_review = projects.iter().filter(|p| p.is_under_review()).count();
    }

    fn reminder(&self) -> Option<String> {
        match self.awaiting_review {
            0 => None,
            1 => Some("1 project is still under review".to_string()),
            n => Some(format!("{} projects are still under review", n)),
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Leave the review dashboard?",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(reminder) = self.reminder() {
            lines.push(Line::from(Span::styled(
                reminder,
                Style::default().fg(Color::Cyan),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" y ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Quit  "),
            Span::styled(" n/Esc ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("Keep reviewing"),
        ]));
        lines
    }
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') => Some(Action::ForceQuit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = self.lines();
        let popup_area = centered_popup(area, 44, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Quit ");
        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            popup_area,
        );
        Ok(())
    }
}
