//! Root application component
//!
//! The App owns the project list and receives the overview's row actions.
//! It stands in for the registry back-end: reviews open an overlay,
//! approvals are written back to the project file, exports go to CSV.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_overview, HelpDialog, OverviewRenderContext, ProjectOverviewTable, QuitDialog,
    ReviewDialog, StatusFilterDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{Project, ProjectId, VerificationStatus};
use crate::services::{self, FileShape};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;

pub struct App {
    /// Projects as last loaded from (or written to) the project file
    pub projects: Vec<Project>,
    /// Layout of the project file, reused when approvals are saved
    pub file_shape: FileShape,
    pub projects_path: PathBuf,
    pub export_dir: PathBuf,

    pub modals: ModalStack,
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,
    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub overview: ProjectOverviewTable,
    pub status_filter_dialog: StatusFilterDialog,
    pub review_dialog: ReviewDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: &Config) -> App {
        let mut app = App {
            projects: Vec::new(),
            file_shape: FileShape::default(),
            projects_path: PathBuf::from(&config.projects_path),
            export_dir: PathBuf::from(&config.export_dir),
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            overview: ProjectOverviewTable::new(config.card_breakpoint),
            status_filter_dialog: StatusFilterDialog::new(),
            review_dialog: ReviewDialog::default(),
            quit_dialog: QuitDialog::default(),
            help_dialog: HelpDialog::default(),
        };
        app.reload_projects();
        app
    }

    fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    fn reload_projects(&mut self) {
        match services::load_projects(&self.projects_path) {
            Ok(file) => {
                tracing::info!(
                    "Loaded {} projects from {}",
                    file.projects.len(),
                    self.projects_path.display()
                );
                self.projects = file.projects;
                self.file_shape = file.shape;
                self.error = None;
                self.overview.select_first(&self.projects);
            }
            Err(e) => {
                tracing::error!("Failed to load projects: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    fn open_review(&mut self, id: ProjectId) {
        tracing::info!("Reviewing project {}", id);
        let project = self.project(&id).cloned();
        self.review_dialog.set_project(project);
        self.modals.push(Modal::Review { project_id: id });
    }

    /// Mark a project approved and persist the change
    ///
    /// Only projects currently under review can be approved.
    fn approve(&mut self, id: &ProjectId) {
        let Some(index) = self.projects.iter().position(|p| &p.id == id) else {
            tracing::warn!("Approve requested for unknown project {}", id);
            self.status_message = Some(format!("Project {} not found", id));
            return;
        };

        if !self.projects[index].is_under_review() {
            tracing::warn!("Refusing to approve project {}: not under review", id);
            self.status_message = Some(format!("Project {} is not under review", id));
            return;
        }

        let previous = self.projects[index]
            .verification_status
            .replace(VerificationStatus::Approved);

        match services::save_projects(&self.projects_path, &self.projects, &self.file_shape) {
            Ok(()) => {
                tracing::info!("Approved project {}", id);
                let name = self.projects[index].ngo_name.clone().unwrap_or_default();
                self.status_message = Some(format!("✓ Approved project {} ({})", id, name));
            }
            Err(e) => {
                tracing::error!("Failed to save approval of project {}: {}", id, e);
                self.projects[index].verification_status = previous;
                self.error = Some(format!("Approval not saved: {}", e));
            }
        }

        if matches!(self.modals.top(), Some(Modal::Review { project_id }) if project_id == id) {
            let project = self.project(id).cloned();
            self.review_dialog.set_project(project);
        }
    }

    fn export(&mut self) {
        let rows = self.overview.rows(&self.projects);
        match services::export_csv(&self.export_dir, &rows) {
            Ok(path) => {
                self.status_message =
                    Some(format!("Exported {} projects to {}", rows.len(), path.display()));
            }
            Err(e) => {
                tracing::error!("Export failed: {}", e);
                self.error = Some(format!("Export failed: {}", e));
            }
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::StatusFilter => self.status_filter_dialog.handle_key_event(key),
            Modal::Review { .. } => self.review_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area),
            Modal::StatusFilter => self.status_filter_dialog.draw(frame, area),
            Modal::Review { .. } => self.review_dialog.draw(frame, area),
            Modal::Help => self.help_dialog.draw(frame, area),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        // Any key in the main view dismisses the last message
        let had_error = self.error.take().is_some();
        let had_status = self.status_message.take().is_some();
        if (had_error || had_status) && key.code == KeyCode::Esc {
            return Ok(None);
        }
        self.overview.handle_key_event(key)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to the overview)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.overview.next(&self.projects),
            Action::PrevItem => self.overview.previous(&self.projects),
            Action::FirstItem => self.overview.select_first(&self.projects),
            Action::LastItem => self.overview.select_last(&self.projects),

            // ─────────────────────────────────────────────────────────────────
            // Sorting & Filtering
            // ─────────────────────────────────────────────────────────────────
            Action::SortBy(field) => {
                self.overview.sort_by(field, &self.projects);
                tracing::debug!(
                    "Sorting by {:?} {:?}",
                    self.overview.view.sort_field,
                    self.overview.view.sort_direction
                );
            }
            Action::OpenStatusFilter => {
                self.status_filter_dialog.open(&self.overview.view.filter);
                self.modals.push(Modal::StatusFilter);
            }
            Action::SetStatusFilter(filter) => {
                tracing::debug!("Status filter set to {}", filter.label());
                self.overview.set_filter(filter, &self.projects);
                if matches!(self.modals.top(), Some(Modal::StatusFilter)) {
                    self.modals.pop();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Row Actions
            // ─────────────────────────────────────────────────────────────────
            Action::ReviewSelected => return Ok(self.overview.review_selected(&self.projects)),
            Action::ApproveSelected => return Ok(self.overview.approve_selected(&self.projects)),
            Action::ReviewProject(id) => self.open_review(id),
            Action::ApproveProject(id) => self.approve(&id),
            Action::ExportProjects => self.export(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.quit_dialog.open(&self.projects);
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }

            Action::ReloadProjects => self.reload_projects(),
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = OverviewRenderContext {
            projects: &self.projects,
            status_message: self.status_message.as_deref(),
            error: self.error.as_deref(),
        };
        draw_overview(frame, area, &mut self.overview, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}
