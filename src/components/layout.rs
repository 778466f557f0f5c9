//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// How the overview renders its rows, chosen from the available width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Column table for wide terminals
    Table,
    /// Stacked cards for narrow terminals
    Cards,
}

impl LayoutMode {
    pub fn for_width(width: u16, card_breakpoint: u16) -> Self {
        if width >= card_breakpoint {
            LayoutMode::Table
        } else {
            LayoutMode::Cards
        }
    }
}

/// Overview screen layout areas
pub struct OverviewLayout {
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn calculate_overview_layout(area: Rect) -> OverviewLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    OverviewLayout {
        header: chunks[0],
        body: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}
