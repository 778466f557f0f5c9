//! Model layer
//!
//! - `project` - submitted project records as supplied by the host
//! - `status` - status badge labels and tones
//! - `view` - sort/filter state and row derivation
//! - `modal` - overlay stack

pub mod modal;
pub mod project;
pub mod status;
pub mod view;

pub use project::{Project, ProjectId, VerificationStatus};
pub use view::{derive_rows, SortDirection, SortField, StatusFilter, ViewState};
