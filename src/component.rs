//! Component trait - Interface for UI components
//!
//! Every screen element (the overview, its dialogs, the root App) owns its
//! local state and talks to the rest of the program only through Actions.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - translate a key press into an Action
/// 2. `update` - apply an Action to local state, optionally chaining another
/// 3. `draw` - render into the given area
pub trait Component {
    /// Called once before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an Action; the returned Action is fed back into the App
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
