//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the App processes
//! them to update state. The row actions double as the overview's
//! callbacks: the App is the receiver.

use crate::model::{ProjectId, SortField, StatusFilter};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextItem,
    PrevItem,
    FirstItem,
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting & Filtering
    // ─────────────────────────────────────────────────────────────────────────
    /// Activate a sort header
    SortBy(SortField),
    /// Open the status filter selector
    OpenStatusFilter,
    /// Apply a status filter
    SetStatusFilter(StatusFilter),

    // ─────────────────────────────────────────────────────────────────────────
    // Row Actions
    // ─────────────────────────────────────────────────────────────────────────
    /// Review the highlighted row (resolved to `ReviewProject` by the App)
    ReviewSelected,
    /// Approve the highlighted row (resolved to `ApproveProject` by the App)
    ApproveSelected,
    /// Review the project with the given id
    ReviewProject(ProjectId),
    /// Approve the project with the given id
    ApproveProject(ProjectId),
    /// Export the visible rows
    ExportProjects,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Re-read the project file
    ReloadProjects,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::SortBy(field) => write!(f, "SortBy({:?})", field),
            Action::OpenStatusFilter => write!(f, "OpenStatusFilter"),
            Action::SetStatusFilter(filter) => write!(f, "SetStatusFilter({})", filter.label()),
            Action::ReviewSelected => write!(f, "ReviewSelected"),
            Action::ApproveSelected => write!(f, "ApproveSelected"),
            Action::ReviewProject(id) => write!(f, "ReviewProject({})", id),
            Action::ApproveProject(id) => write!(f, "ApproveProject({})", id),
            Action::ExportProjects => write!(f, "ExportProjects"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ReloadProjects => write!(f, "ReloadProjects"),
        }
    }
}
