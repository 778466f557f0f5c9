//! View derivation - filter and sort state for the project overview
//!
//! `derive_rows` is the single source of rows for every layout, so the table
//! and card renderings can only differ in presentation.

use super::project::{Project, VerificationStatus};
use super::status;
use chrono::NaiveDateTime;
use std::cmp::Ordering;

/// Column the overview is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    NgoName,
    ProjectType,
    SubmissionDate,
}

impl SortField {
    pub fn header(&self) -> &'static str {
        match self {
            SortField::NgoName => "NGO Submitter",
            SortField::ProjectType => "Project Type",
            SortField::SubmissionDate => "Submission Date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Status restriction applied before sorting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(VerificationStatus),
}

impl StatusFilter {
    /// Selector options in display order
    pub fn options() -> Vec<StatusFilter> {
        let mut options = vec![StatusFilter::All];
        options.extend(VerificationStatus::known().into_iter().map(StatusFilter::Only));
        options
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(s) => status::badge(Some(s)).label,
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => project.verification_status.as_ref() == Some(s),
        }
    }

    /// Placeholder text when no rows survive the filter
    pub fn empty_message(&self) -> String {
        match self {
            StatusFilter::All => "No projects have been submitted yet.".to_string(),
            StatusFilter::Only(_) => format!(
                "No projects with {} status found.",
                self.label().to_lowercase()
            ),
        }
    }
}

/// Ephemeral UI state owned by the overview component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub filter: StatusFilter,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            sort_field: SortField::SubmissionDate,
            sort_direction: SortDirection::Desc,
            filter: StatusFilter::All,
        }
    }
}

impl ViewState {
    /// Activate a sort header
    ///
    /// The active header flips direction; any other header becomes active
    /// in ascending order.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = field;
            self.sort_direction = SortDirection::Asc;
        }
    }
}

/// Comparable key extracted from a project for the active sort field
enum SortKey<'a> {
    Text(Option<&'a str>),
    Date(Option<NaiveDateTime>),
}

impl<'a> SortKey<'a> {
    fn of(project: &'a Project, field: SortField) -> Self {
        match field {
            SortField::NgoName => SortKey::Text(project.ngo_name.as_deref()),
            SortField::ProjectType => SortKey::Text(project.project_type.as_deref()),
            SortField::SubmissionDate => SortKey::Date(project.submitted_at()),
        }
    }

    /// Strict `self > other`; false whenever either side is missing
    fn gt(&self, other: &Self) -> bool {
        match (self, other) {
            (SortKey::Text(Some(a)), SortKey::Text(Some(b))) => a > b,
            (SortKey::Date(Some(a)), SortKey::Date(Some(b))) => a > b,
            _ => false,
        }
    }

    fn lt(&self, other: &Self) -> bool {
        other.gt(self)
    }
}

/// Row comparator
///
/// Never returns `Equal`: ties (and missing keys) order `a` before `b`
/// in both directions.
pub fn compare(a: &Project, b: &Project, field: SortField, direction: SortDirection) -> Ordering {
    let (ka, kb) = (SortKey::of(a, field), SortKey::of(b, field));
    let a_after_b = match direction {
        SortDirection::Asc => ka.gt(&kb),
        SortDirection::Desc => ka.lt(&kb),
    };
    if a_after_b {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Binary insertion sort that tolerates a non-total comparator
///
/// Each element is placed by probing `cmp(element, placed)`, so with
/// `compare` equal keys end up in reverse input order.
fn insertion_sort_by<T, F>(items: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let (mut left, mut right) = (0, i);
        while left < right {
            let mid = left + (right - left) / 2;
            if cmp(&items[i], &items[mid]) == Ordering::Less {
                right = mid;
            } else {
                left = mid + 1;
            }
        }
        items[left..=i].rotate_right(1);
    }
}

/// Filter then sort the projects for display
pub fn derive_rows<'a>(projects: &'a [Project], view: &ViewState) -> Vec<&'a Project> {
    let mut rows: Vec<&Project> = projects.iter().filter(|p| view.filter.matches(p)).collect();
    insertion_sort_by(&mut rows, |a, b| {
        compare(a, b, view.sort_field, view.sort_direction)
    });
    rows
}
