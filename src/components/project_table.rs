//! Project overview component
//!
//! Owns the sort/filter state and the highlighted row. Rows are re-derived
//! from the host's project list on every draw and handed to either the
//! table or the card renderer depending on the available width.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_overview_layout, LayoutMode};
use crate::components::{card_view, table_view};
use crate::config::DEFAULT_CARD_BREAKPOINT;
use crate::model::status;
use crate::model::{derive_rows, Project, SortField, StatusFilter, ViewState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Overview Component
// ═══════════════════════════════════════════════════════════════════════════════

pub struct ProjectOverviewTable {
    /// Sort field, direction and status filter
    pub view: ViewState,

    /// Highlighted row in the derived list
    selected: Option<usize>,

    /// Width below which rows render as cards
    pub card_breakpoint: u16,
}

impl Default for ProjectOverviewTable {
    fn default() -> Self {
        Self::new(DEFAULT_CARD_BREAKPOINT)
    }
}

impl ProjectOverviewTable {
    pub fn new(card_breakpoint: u16) -> Self {
        Self {
            view: ViewState::default(),
            selected: None,
            card_breakpoint,
        }
    }

    /// Filtered and sorted rows for the current state
    pub fn rows<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        derive_rows(projects, &self.view)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_project<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        let rows = self.rows(projects);
        self.selected.and_then(|i| rows.get(i).copied())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting & Filtering
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sort_by(&mut self, field: SortField, projects: &[Project]) {
        self.view.toggle_sort(field);
        self.select_first(projects);
    }

    pub fn set_filter(&mut self, filter: StatusFilter, projects: &[Project]) {
        self.view.filter = filter;
        self.select_first(projects);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, projects: &[Project]) {
        let len = self.rows(projects).len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub fn previous(&mut self, projects: &[Project]) {
        let len = self.rows(projects).len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(0) | None => len - 1,
            Some(i) => (i - 1).min(len - 1),
        });
    }

    pub fn select_first(&mut self, projects: &[Project]) {
        self.selected = if self.rows(projects).is_empty() {
            None
        } else {
            Some(0)
        };
    }

    pub fn select_last(&mut self, projects: &[Project]) {
        self.selected = self.rows(projects).len().checked_sub(1);
    }

    /// Keep the highlight inside the derived list after the data changed
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Review is offered on every row
    pub fn review_selected(&self, projects: &[Project]) -> Option<Action> {
        self.selected_project(projects)
            .map(|p| Action::ReviewProject(p.id.clone()))
    }

    /// Approve is offered only on rows under review
    pub fn approve_selected(&self, projects: &[Project]) -> Option<Action> {
        self.selected_project(projects)
            .filter(|p| p.is_under_review())
            .map(|p| Action::ApproveProject(p.id.clone()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for ProjectOverviewTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),

            // Sort headers
            KeyCode::Char('1') => Some(Action::SortBy(SortField::NgoName)),
            KeyCode::Char('2') => Some(Action::SortBy(SortField::ProjectType)),
            KeyCode::Char('3') => Some(Action::SortBy(SortField::SubmissionDate)),

            // Row actions
            KeyCode::Char('r') | KeyCode::Enter => Some(Action::ReviewSelected),
            KeyCode::Char('a') => Some(Action::ApproveSelected),

            KeyCode::Char('f') => Some(Action::OpenStatusFilter),
            KeyCode::Char('e') => Some(Action::ExportProjects),
            KeyCode::Char('R') => Some(Action::ReloadProjects),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the host's project list; see draw_overview
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Host data needed to draw the overview
pub struct OverviewRenderContext<'a> {
    pub projects: &'a [Project],
    pub status_message: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// Draw the overview screen
pub fn draw_overview(
    frame: &mut Frame,
    area: Rect,
    overview: &mut ProjectOverviewTable,
    ctx: &OverviewRenderContext,
) -> Result<()> {
    let layout = calculate_overview_layout(area);
    let rows = overview.rows(ctx.projects);
    overview.clamp_selection(rows.len());

    render_header(frame, layout.header, &overview.view);

    if rows.is_empty() {
        render_empty_state(frame, layout.body, &overview.view.filter);
    } else {
        match LayoutMode::for_width(layout.body.width, overview.card_breakpoint) {
            LayoutMode::Table => {
                table_view::render(frame, layout.body, &rows, &overview.view, overview.selected)
            }
            LayoutMode::Cards => card_view::render(frame, layout.body, &rows, overview.selected),
        }
    }

    render_status_bar(frame, layout.status, overview, rows.len(), ctx);
    render_help_bar(frame, layout.help);

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, view: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(38)])
        .split(inner);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Project Overview",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Manage and review submitted carbon credit projects",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(title, chunks[0]);

    let controls = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" f ", Style::default().fg(Color::Yellow)),
            Span::raw("Status: "),
            Span::styled(
                format!("{} ▾", view.filter.label()),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![
            Span::styled(" e ", Style::default().fg(Color::Yellow)),
            Span::styled("⤓ Export", Style::default().fg(Color::White)),
        ]),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(controls, chunks[1]);
}

fn render_empty_state(frame: &mut Frame, area: Rect, filter: &StatusFilter) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled("∅", Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            "No Projects Found",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            filter.empty_message(),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(content)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    overview: &ProjectOverviewTable,
    visible: usize,
    ctx: &OverviewRenderContext,
) {
    let line = if let Some(error) = ctx.error {
        Line::from(Span::styled(
            format!(" ✗ {}", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(message) = ctx.status_message {
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                format!(" {} of {} projects", visible, ctx.projects.len()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!(
                    "  sorted by {} {}",
                    overview.view.sort_field.header(),
                    overview.view.sort_direction.arrow()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let help = Paragraph::new(Line::from(vec![
        Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
        Span::raw("Navigate  "),
        Span::styled(" 1/2/3 ", key),
        Span::raw("Sort  "),
        Span::styled(" f ", key),
        Span::raw("Filter  "),
        Span::styled(" r ", key),
        Span::raw("Review  "),
        Span::styled(" a ", key),
        Span::raw("Approve  "),
        Span::styled(" ? ", key),
        Span::raw("Help  "),
        Span::styled(" q ", key),
        Span::raw("Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared row pieces (used by both layouts)
// ─────────────────────────────────────────────────────────────────────────────

/// Coloured status badge for a project
pub(crate) fn status_span(project: &Project) -> Span<'static> {
    let badge = status::badge(project.verification_status.as_ref());
    Span::styled(
        format!("● {}", badge.label),
        Style::default()
            .fg(badge.tone.color())
            .add_modifier(Modifier::BOLD),
    )
}

/// Row action controls; Approve only appears for projects under review
pub(crate) fn action_spans(project: &Project) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        "[r] Review",
        Style::default().fg(Color::White),
    )];
    if project.is_under_review() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "[a] Approve",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectId, SortDirection, VerificationStatus};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn project(id: i64, ngo: &str, date: &str, status: VerificationStatus) -> Project {
        Project {
            id: ProjectId::Number(id),
            ngo_name: Some(ngo.to_string()),
            location: Some("Coastal Region".to_string()),
            project_type: Some("Mangrove".to_string()),
            area: Some(20.0),
            submission_date: Some(date.to_string()),
            verification_status: Some(status),
            ..Default::default()
        }
    }

    fn scenario() -> Vec<Project> {
        vec![
            Project {
                project_type: Some("Reforestation".to_string()),
                area: Some(50.0),
                ..project(1, "Green Earth", "2024-01-10", VerificationStatus::UnderReview)
            },
            project(2, "Blue Ocean", "2024-03-01", VerificationStatus::Approved),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(overview: &mut ProjectOverviewTable, projects: &[Project], width: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, 30)).unwrap();
        let ctx = OverviewRenderContext {
            projects,
            status_message: None,
            error: None,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_overview(frame, area, overview, &ctx).unwrap();
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for row in buffer.content().chunks(buffer.area.width as usize) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_scenario_rows_and_actions() {
        let projects = scenario();
        let mut overview = ProjectOverviewTable::default();
        overview.select_first(&projects);

        let rows = overview.rows(&projects);
        assert_eq!(rows[0].id, ProjectId::Number(2));
        assert_eq!(rows[1].id, ProjectId::Number(1));

        // Blue Ocean is approved: review only
        assert_eq!(
            overview.review_selected(&projects),
            Some(Action::ReviewProject(ProjectId::Number(2)))
        );
        assert_eq!(overview.approve_selected(&projects), None);

        // Green Earth is under review: both actions
        overview.next(&projects);
        assert_eq!(
            overview.approve_selected(&projects),
            Some(Action::ApproveProject(ProjectId::Number(1)))
        );
    }

    #[test]
    fn test_approve_offered_only_under_review() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Approved,
            VerificationStatus::Rejected,
            VerificationStatus::Other("on_hold".to_string()),
        ] {
            let projects = vec![project(1, "Solo", "2024-01-01", status)];
            let mut overview = ProjectOverviewTable::default();
            overview.select_first(&projects);
            assert!(overview.approve_selected(&projects).is_none());
            assert!(action_spans(&projects[0]).len() == 1);
            assert!(overview.review_selected(&projects).is_some());
        }

        let projects = vec![project(1, "Solo", "2024-01-01", VerificationStatus::UnderReview)];
        assert_eq!(action_spans(&projects[0]).len(), 3);
    }

    #[test]
    fn test_sort_keys_map_to_headers() {
        let mut overview = ProjectOverviewTable::default();
        assert_eq!(
            overview.handle_key_event(key(KeyCode::Char('1'))).unwrap(),
            Some(Action::SortBy(SortField::NgoName))
        );
        assert_eq!(
            overview.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SortBy(SortField::SubmissionDate))
        );
        assert_eq!(
            overview.handle_key_event(key(KeyCode::Char('a'))).unwrap(),
            Some(Action::ApproveSelected)
        );
    }

    #[test]
    fn test_sort_by_resets_selection_to_first_row() {
        let projects = scenario();
        let mut overview = ProjectOverviewTable::default();
        overview.select_last(&projects);
        assert_eq!(overview.selected_index(), Some(1));

        overview.sort_by(SortField::SubmissionDate, &projects);
        assert_eq!(overview.view.sort_direction, SortDirection::Asc);
        assert_eq!(overview.selected_index(), Some(0));
        assert_eq!(
            overview.selected_project(&projects).map(|p| p.id.clone()),
            Some(ProjectId::Number(1))
        );
    }

    #[test]
    fn test_navigation_wraps() {
        let projects = scenario();
        let mut overview = ProjectOverviewTable::default();
        overview.select_first(&projects);
        overview.previous(&projects);
        assert_eq!(overview.selected_index(), Some(1));
        overview.next(&projects);
        assert_eq!(overview.selected_index(), Some(0));
    }

    #[test]
    fn test_filter_with_no_matches_clears_selection() {
        let projects = scenario();
        let mut overview = ProjectOverviewTable::default();
        overview.set_filter(StatusFilter::Only(VerificationStatus::Rejected), &projects);
        assert_eq!(overview.selected_index(), None);
        assert!(overview.review_selected(&projects).is_none());
    }

    #[test]
    fn test_wide_render_shows_table_with_actions() {
        let projects = scenario();
        let mut overview = ProjectOverviewTable::default();
        let text = render(&mut overview, &projects, 140);

        assert!(text.contains("NGO Submitter"));
        assert!(text.contains("Submission Date"));
        assert!(text.contains("Under Review"));
        assert!(text.contains("50 hectares"));
        assert!(text.contains("3/1/2024"));
        assert_eq!(text.matches("[r] Review").count(), 2);
        assert_eq!(text.matches("[a] Approve").count(), 1);

        // Newest first by default
        let blue = text.find("Blue Ocean").unwrap();
        let green = text.find("Green Earth").unwrap();
        assert!(blue < green);
    }

    #[test]
    fn test_narrow_render_shows_cards() {
        let projects = scenario();
        let mut overview = ProjectOverviewTable::default();
        let text = render(&mut overview, &projects, 60);

        assert!(!text.contains("NGO Submitter"));
        assert!(text.contains("Type:"));
        assert!(text.contains("Submitted:"));
        assert_eq!(text.matches("[a] Approve").count(), 1);
        let blue = text.find("Blue Ocean").unwrap();
        let green = text.find("Green Earth").unwrap();
        assert!(blue < green);
    }

    #[test]
    fn test_empty_input_renders_placeholder() {
        let mut overview = ProjectOverviewTable::default();
        let text = render(&mut overview, &[], 120);
        assert!(text.contains("No Projects Found"));
        assert!(text.contains("No projects have been submitted yet."));
    }

    #[test]
    fn test_filtered_empty_uses_lowercase_label() {
        let projects = vec![project(2, "Blue Ocean", "2024-03-01", VerificationStatus::Approved)];
        let mut overview = ProjectOverviewTable::default();
        overview.set_filter(StatusFilter::Only(VerificationStatus::UnderReview), &projects);
        let text = render(&mut overview, &projects, 120);
        assert!(text.contains("No projects with under review status found."));
    }
}
