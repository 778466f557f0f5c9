//! Status presentation - label and colour tone per verification status

use super::project::VerificationStatus;
use ratatui::style::Color;

/// Semantic colour category used to style a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Warning,
    Accent,
    Error,
    Neutral,
}

impl StatusTone {
    pub fn color(&self) -> Color {
        match self {
            StatusTone::Success => Color::Green,
            StatusTone::Warning => Color::Yellow,
            StatusTone::Accent => Color::Cyan,
            StatusTone::Error => Color::Red,
            StatusTone::Neutral => Color::DarkGray,
        }
    }
}

/// Display label and tone for a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: StatusTone,
}

/// Map a (possibly absent) status to its badge
pub fn badge(status: Option<&VerificationStatus>) -> StatusBadge {
    let (label, tone) = match status {
        Some(VerificationStatus::Approved) => ("Approved", StatusTone::Success),
        Some(VerificationStatus::Pending) => ("Pending", StatusTone::Warning),
        Some(VerificationStatus::UnderReview) => ("Under Review", StatusTone::Accent),
        Some(VerificationStatus::Rejected) => ("Rejected", StatusTone::Error),
        Some(VerificationStatus::Other(_)) | None => ("Unknown", StatusTone::Neutral),
    };
    StatusBadge { label, tone }
}
