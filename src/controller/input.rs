//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::model::ChordOutcome;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Handle help overlay first (any key closes it)
        if self.model.is_help_open().await {
            self.model.hide_help().await;
            return Ok(());
        }

        // Handle the search prompt
        if self.model.is_search_open().await {
            match key.code {
                KeyCode::Enter => self.model.commit_search().await,
                KeyCode::Esc => self.model.cancel_search().await,
                KeyCode::Backspace => self.model.search_pop().await,
                KeyCode::Char(c) => self.model.search_push(c).await,
                _ => {}
            }
            return Ok(());
        }

        // Handle the source picker overlay
        if self.model.is_picking_source().await {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.model.picker_move_up().await,
                KeyCode::Down | KeyCode::Char('j') => self.model.picker_move_down().await,
                KeyCode::Enter => {
                    let choice = self.model.choose_picked_source().await;
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.load_source(choice).await;
                    });
                }
                KeyCode::Esc | KeyCode::Char('q') => self.model.cancel_source_picker().await,
                _ => {}
            }
            return Ok(());
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.model.set_should_quit().await;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.model.move_selection_up().await;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.model.move_selection_down().await;
            }
            // Activate the selected entry (queue a range or play a position)
            KeyCode::Enter => {
                self.activate_selected().await;
            }
            // Play/Pause toggle
            KeyCode::Char(' ') => {
                self.toggle_pause().await;
            }
            // Seek back / forward 10 seconds
            KeyCode::Char('h') => {
                self.seek_relative(-10).await;
            }
            KeyCode::Char('l') => {
                self.seek_relative(10).await;
            }
            // Next / previous queue entry
            KeyCode::Char('n') => {
                self.next_track().await;
            }
            KeyCode::Char('p') => {
                self.previous_track().await;
            }
            // Delete the selected live-queue entry
            KeyCode::Char('d') | KeyCode::Delete => {
                self.delete_selected().await;
            }
            // gg chord: jump to the top
            KeyCode::Char('g') => {
                match self.model.chord_keypress().await {
                    ChordOutcome::Completed => self.model.select_top().await,
                    ChordOutcome::Armed(epoch) => {
                        let model = self.model.clone();
                        let window = self.model.chord_window().await;
                        tokio::spawn(async move {
                            tokio::time::sleep(window).await;
                            model.expire_chord(epoch).await;
                        });
                    }
                }
            }
            KeyCode::Char('G') => {
                self.model.select_bottom().await;
            }
            // Source picker
            KeyCode::Char('f') => {
                self.model.open_source_picker().await;
            }
            // Search prompt
            KeyCode::Char('/') => {
                self.model.open_search().await;
            }
            // Help overlay
            KeyCode::Char('?') => {
                self.model.show_help().await;
            }
            _ => {}
        }
        Ok(())
    }
}
