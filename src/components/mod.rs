//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod card_view;
pub mod help_dialog;
pub mod layout;
pub mod project_table;
pub mod quit_dialog;
pub mod review_dialog;
pub mod status_filter_dialog;
pub mod table_view;

pub use help_dialog::HelpDialog;
pub use layout::{calculate_overview_layout, centered_popup, LayoutMode};
pub use project_table::{draw_overview, OverviewRenderContext, ProjectOverviewTable};
pub use quit_dialog::QuitDialog;
pub use review_dialog::ReviewDialog;
pub use status_filter_dialog::StatusFilterDialog;
