//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared formatting helpers
//! - `list`: Active list and description pane
//! - `player`: Player and statistics bars
//! - `overlays`: Modal overlays (notifications, source picker, help, search)

mod list;
mod overlays;
mod player;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::RenderState;

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &RenderState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Active list
                Constraint::Length(6), // Description pane
                Constraint::Length(3), // Player + statistics bars
            ])
            .split(frame.area());

        list::render_track_list(frame, chunks[0], state);
        list::render_description(frame, chunks[1], state);
        player::render_player_bar(frame, chunks[2], state);

        overlays::render_overlays(frame, state);
    }
}
