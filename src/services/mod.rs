//! Host-side services
//!
//! The overview component never touches the filesystem; these are what the
//! App calls when it receives the component's actions:
//! - Project list loading and saving
//! - CSV export of the visible rows

pub mod export;
pub mod store;

pub use export::export_csv;
pub use store::{load_projects, save_projects, FileShape, StoreError};
