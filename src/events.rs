//! Event handling for user input.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::App;

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events with a timeout so the render loop keeps consuming
/// worker events while idle. The simulation has a single screen; the only binding is 'q', which
/// requests cooperative shutdown.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.code == KeyCode::Char('q') {
                app.exit = true;
            }
        }
    }

    Ok(())
}
