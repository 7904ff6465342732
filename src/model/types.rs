//! Core type definitions: the source selector state machine, UI state, and
//! the race-free interaction timing primitives (chord detection and
//! token-gated notifications).

use std::time::{Duration, Instant};

/// Which list backs the display: one of the configured catalogs, or the
/// remote server's live queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListSource {
    Catalog(usize),
    LiveQueue,
}

/// The list-source switch state machine. Lives for the process lifetime;
/// there is no terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceSelector {
    /// Browsing a catalog; activation resolves a playable range.
    Browsing(usize),
    /// Browsing the live queue; activation plays at the selected position.
    LiveQueue,
    /// The source picker overlay is open over `behind`.
    PickingSource { behind: ListSource },
}

impl SourceSelector {
    /// The list the display shows. While picking, the previous list stays
    /// visible behind the overlay.
    pub fn active_list(&self) -> ListSource {
        match *self {
            SourceSelector::Browsing(catalog) => ListSource::Catalog(catalog),
            SourceSelector::LiveQueue => ListSource::LiveQueue,
            SourceSelector::PickingSource { behind } => behind,
        }
    }

    pub fn is_picking(&self) -> bool {
        matches!(self, SourceSelector::PickingSource { .. })
    }

    pub fn open_picker(self) -> Self {
        match self {
            SourceSelector::PickingSource { .. } => self,
            other => SourceSelector::PickingSource { behind: other.active_list() },
        }
    }

    pub fn cancel_picker(self) -> Self {
        match self {
            SourceSelector::PickingSource { behind: ListSource::Catalog(c) } => {
                SourceSelector::Browsing(c)
            }
            SourceSelector::PickingSource { behind: ListSource::LiveQueue } => {
                SourceSelector::LiveQueue
            }
            other => other,
        }
    }

    /// Committing a picker choice moves to `Browsing` or `LiveQueue`; the
    /// caller triggers the corresponding store's (re)load.
    pub fn choose(self, choice: ListSource) -> Self {
        match choice {
            ListSource::Catalog(c) => SourceSelector::Browsing(c),
            ListSource::LiveQueue => SourceSelector::LiveQueue,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub token: u64,
}

/// The currently displayed banner plus the monotonically increasing token
/// that gates hiding. A hide keyed to a superseded token is a no-op, so an
/// older, longer-lived timer can never hide a newer banner.
#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Notification>,
    next_token: u64,
}

impl NotificationState {
    /// Replaces the displayed banner and returns the fresh token the caller
    /// keys its expiry to.
    pub fn show(&mut self, message: String, kind: NotificationKind) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.current = Some(Notification { message, kind, token });
        token
    }

    /// Honored only when `token` still identifies the displayed banner.
    pub fn hide_if(&mut self, token: u64) -> bool {
        match &self.current {
            Some(shown) if shown.token == token => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

/// Outcome of a qualifying chord keypress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChordOutcome {
    /// First key: armed; the epoch keys the pending-clear timeout.
    Armed(u64),
    /// Second key inside the window: the chord action fires.
    Completed,
}

/// Two-keystroke chord detection. The second key completes the chord only if
/// it arrives strictly before `armed_at + window`; the timeout clears the
/// pending flag only while its epoch is still current, so a stale timeout
/// can never disarm a newer chord.
#[derive(Debug)]
pub struct ChordState {
    pending: bool,
    armed_at: Instant,
    epoch: u64,
    window: Duration,
}

impl ChordState {
    pub fn new(window: Duration) -> Self {
        Self {
            pending: false,
            armed_at: Instant::now(),
            epoch: 0,
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Processes one qualifying keypress. Completion and the pending-clear
    /// are a single step under the caller's lock, so no two keys can
    /// complete the same armed chord twice.
    pub fn keypress(&mut self, now: Instant) -> ChordOutcome {
        if self.pending && now < self.armed_at + self.window {
            self.pending = false;
            ChordOutcome::Completed
        } else {
            self.pending = true;
            self.armed_at = now;
            self.epoch += 1;
            ChordOutcome::Armed(self.epoch)
        }
    }

    /// Timeout callback: clears the pending flag if this epoch is still the
    /// armed one.
    pub fn expire(&mut self, epoch: u64) {
        if self.pending && self.epoch == epoch {
            self.pending = false;
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Transient UI state: the highlighted row, overlay visibility, search input.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    /// Index of the highlighted row in whichever list is active.
    pub selected: usize,
    /// Selection inside the source picker overlay.
    pub picker_selected: usize,
    /// `Some` while the search prompt is open.
    pub search_input: Option<String>,
    pub show_help: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_round_trip_restores_previous_list() {
        let selector = SourceSelector::Browsing(1).open_picker();
        assert!(selector.is_picking());
        assert_eq!(selector.active_list(), ListSource::Catalog(1));
        assert_eq!(selector.cancel_picker(), SourceSelector::Browsing(1));

        let selector = SourceSelector::LiveQueue.open_picker();
        assert_eq!(selector.cancel_picker(), SourceSelector::LiveQueue);
    }

    #[test]
    fn choosing_commits_the_new_source() {
        let selector = SourceSelector::Browsing(0).open_picker();
        assert_eq!(selector.choose(ListSource::LiveQueue), SourceSelector::LiveQueue);
        assert_eq!(
            selector.choose(ListSource::Catalog(1)),
            SourceSelector::Browsing(1)
        );
    }

    #[test]
    fn newer_notification_survives_older_timer() {
        let mut state = NotificationState::default();
        let t1 = state.show("first".to_string(), NotificationKind::Info);
        let t2 = state.show("second".to_string(), NotificationKind::Error);

        assert!(!state.hide_if(t1), "stale token must not hide the banner");
        assert_eq!(state.current().unwrap().message, "second");

        assert!(state.hide_if(t2));
        assert!(state.current().is_none());
        assert!(!state.hide_if(t2), "double hide is a no-op");
    }

    #[test]
    fn chord_completes_strictly_inside_the_window() {
        let window = Duration::from_millis(300);
        let mut chord = ChordState::new(window);
        let start = Instant::now();

        assert!(matches!(chord.keypress(start), ChordOutcome::Armed(_)));
        assert_eq!(
            chord.keypress(start + window - Duration::from_millis(1)),
            ChordOutcome::Completed
        );
    }

    #[test]
    fn chord_at_or_past_the_boundary_rearms() {
        let window = Duration::from_millis(300);
        let mut chord = ChordState::new(window);
        let start = Instant::now();

        chord.keypress(start);
        // Exactly at the boundary is too late: the key becomes a fresh first key.
        assert!(matches!(chord.keypress(start + window), ChordOutcome::Armed(_)));
        assert!(chord.is_pending());
    }

    #[test]
    fn stale_timeout_cannot_disarm_a_rearmed_chord() {
        let mut chord = ChordState::new(Duration::from_millis(300));
        let start = Instant::now();

        let ChordOutcome::Armed(first_epoch) = chord.keypress(start) else {
            panic!("first key must arm");
        };
        // Window lapsed; the user starts a new chord before the timeout runs.
        let ChordOutcome::Armed(_) = chord.keypress(start + Duration::from_millis(400)) else {
            panic!("late second key must rearm");
        };

        chord.expire(first_epoch);
        assert!(chord.is_pending(), "old epoch must not clear the new chord");
        assert_eq!(
            chord.keypress(start + Duration::from_millis(500)),
            ChordOutcome::Completed
        );
    }

    #[test]
    fn completed_chord_cannot_complete_twice() {
        let mut chord = ChordState::new(Duration::from_millis(300));
        let start = Instant::now();

        chord.keypress(start);
        assert_eq!(chord.keypress(start + Duration::from_millis(10)), ChordOutcome::Completed);
        assert!(matches!(
            chord.keypress(start + Duration::from_millis(20)),
            ChordOutcome::Armed(_)
        ));
    }
}
