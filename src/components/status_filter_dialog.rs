//! Status filter selector
//!
//! Offers "All Status" plus the four verification statuses.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::status;
use crate::model::StatusFilter;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct StatusFilterDialog {
    options: Vec<StatusFilter>,
    /// Filter active when the dialog was opened
    current: StatusFilter,
    list_state: ListState,
}

impl Default for StatusFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusFilterDialog {
    pub fn new() -> Self {
        Self {
            options: StatusFilter::options(),
            current: StatusFilter::All,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// Prepare the dialog with the highlight on the active filter
    pub fn open(&mut self, current: &StatusFilter) {
        self.current = current.clone();
        let index = self.options.iter().position(|o| o == current).unwrap_or(0);
        self.list_state.select(Some(index));
    }

    pub fn highlighted(&self) -> &StatusFilter {
        let index = self.list_state.selected().unwrap_or(0);
        &self.options[index.min(self.options.len() - 1)]
    }

    fn select_next(&mut self) {
        let index = self.list_state.selected().unwrap_or(0);
        if index + 1 < self.options.len() {
            self.list_state.select(Some(index + 1));
        }
    }

    fn select_prev(&mut self) {
        let index = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(index.saturating_sub(1)));
    }
}

impl Component for StatusFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('f') => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::SetStatusFilter(self.highlighted().clone())),
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 40, 14);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Options
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header = Paragraph::new(Line::from(Span::styled(
            format!("Current: {}", self.current.label()),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Filter by Status ")
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        let items: Vec<ListItem> = self
            .options
            .iter()
            .map(|option| {
                let is_current = *option == self.current;
                let color = match option {
                    StatusFilter::All => Color::White,
                    StatusFilter::Only(s) => status::badge(Some(s)).tone.color(),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        if is_current { "● " } else { "  " },
                        Style::default().fg(Color::Green),
                    ),
                    Span::styled(option.label(), Style::default().fg(color)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.list_state);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", Style::default().fg(Color::Yellow)),
            Span::raw("Apply  "),
            Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
            Span::raw("Move  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::VerificationStatus;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_open_highlights_current_filter() {
        let mut dialog = StatusFilterDialog::new();
        dialog.open(&StatusFilter::Only(VerificationStatus::Approved));
        assert_eq!(
            dialog.highlighted(),
            &StatusFilter::Only(VerificationStatus::Approved)
        );
    }

    #[test]
    fn test_navigate_and_apply() {
        let mut dialog = StatusFilterDialog::new();
        dialog.open(&StatusFilter::All);

        dialog.handle_key_event(key(KeyCode::Down)).unwrap();
        dialog.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(
            action,
            Some(Action::SetStatusFilter(StatusFilter::Only(
                VerificationStatus::UnderReview
            )))
        );
    }

    #[test]
    fn test_navigation_stops_at_ends() {
        let mut dialog = StatusFilterDialog::new();
        dialog.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(dialog.highlighted(), &StatusFilter::All);

        for _ in 0..10 {
            dialog.handle_key_event(key(KeyCode::Down)).unwrap();
        }
        assert_eq!(
            dialog.highlighted(),
            &StatusFilter::Only(VerificationStatus::Rejected)
        );
    }

    #[test]
    fn test_escape_closes() {
        let mut dialog = StatusFilterDialog::new();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }
}
