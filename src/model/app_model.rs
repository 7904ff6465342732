//! Main application model with state management.
//!
//! Every store is an explicit instance owned here and reached through async
//! accessors; nothing is module-level mutable state, so tests construct
//! isolated instances.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::config::FeedSource;
use crate::errors::AppResult;

use super::catalog::Catalog;
use super::queue::QueueMirror;
use super::status::PlayerProjection;
use super::types::{
    ChordOutcome, ChordState, ListSource, Notification, NotificationKind, NotificationState,
    SourceSelector, UiState,
};

/// Window for completing the two-key `gg` chord.
pub const CHORD_WINDOW: Duration = Duration::from_millis(300);

/// Everything the view needs for one frame.
#[derive(Clone, Debug)]
pub struct RenderState {
    pub titles: Vec<String>,
    pub selected: usize,
    pub source_label: String,
    /// Selected entry's title plus its summary (catalog) or locator (queue).
    pub description: Option<(String, String)>,
    pub projection: PlayerProjection,
    /// Row of the currently playing queue entry, only in the live-queue view.
    pub playing_row: Option<usize>,
    pub notification: Option<Notification>,
    /// Picker rows and picker selection while the source picker is open.
    pub picker: Option<(Vec<String>, usize)>,
    pub show_help: bool,
    pub search: Option<String>,
}

pub struct AppModel {
    sources: Vec<FeedSource>,
    catalog: Arc<Mutex<Catalog>>,
    queue: Arc<Mutex<QueueMirror>>,
    projection: Arc<Mutex<PlayerProjection>>,
    selector: Arc<Mutex<SourceSelector>>,
    ui_state: Arc<Mutex<UiState>>,
    notifications: Arc<Mutex<NotificationState>>,
    chord: Arc<Mutex<ChordState>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(sources: Vec<FeedSource>) -> Self {
        Self {
            sources,
            catalog: Arc::new(Mutex::new(Catalog::default())),
            queue: Arc::new(Mutex::new(QueueMirror::default())),
            projection: Arc::new(Mutex::new(PlayerProjection::default())),
            selector: Arc::new(Mutex::new(SourceSelector::Browsing(0))),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            notifications: Arc::new(Mutex::new(NotificationState::default())),
            chord: Arc::new(Mutex::new(ChordState::new(CHORD_WINDOW))),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    // ========================================================================
    // Catalog store & queue mirror
    // ========================================================================

    /// Swaps in a freshly built catalog atomically and resets the selection;
    /// the previous catalog is discarded whole.
    pub async fn replace_catalog(&self, catalog: Catalog) {
        *self.catalog.lock().await = catalog;
        self.ui_state.lock().await.selected = 0;
    }

    /// Locators from the highlighted catalog row through the end, in source
    /// order. `NotFound` when the selection went stale after a reload.
    pub async fn locators_from_selection(&self) -> AppResult<Vec<String>> {
        let selected = self.ui_state.lock().await.selected;
        self.catalog.lock().await.locators_from(selected)
    }

    /// Swaps in a freshly derived queue mirror. While the live queue is the
    /// active list the selection is kept but clamped, since positions shift
    /// under deletion; a background refresh while browsing a catalog must
    /// not touch the catalog selection.
    pub async fn replace_queue(&self, mirror: QueueMirror) {
        let len = mirror.len();
        *self.queue.lock().await = mirror;
        let active = self.selector.lock().await.active_list();
        if active == ListSource::LiveQueue {
            let mut ui = self.ui_state.lock().await;
            ui.selected = ui.selected.min(len.saturating_sub(1));
        }
    }

    pub async fn queue_is_empty(&self) -> bool {
        self.queue.lock().await.is_empty()
    }

    async fn active_titles(&self) -> Vec<String> {
        match self.selector.lock().await.active_list() {
            ListSource::Catalog(_) => self.catalog.lock().await.titles(),
            ListSource::LiveQueue => self.queue.lock().await.titles(),
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub async fn selected(&self) -> usize {
        self.ui_state.lock().await.selected
    }

    pub async fn move_selection_up(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.selected = ui.selected.saturating_sub(1);
    }

    pub async fn move_selection_down(&self) {
        let len = self.active_titles().await.len();
        let mut ui = self.ui_state.lock().await;
        if ui.selected + 1 < len {
            ui.selected += 1;
        }
    }

    pub async fn select_top(&self) {
        self.ui_state.lock().await.selected = 0;
    }

    pub async fn select_bottom(&self) {
        let len = self.active_titles().await.len();
        self.ui_state.lock().await.selected = len.saturating_sub(1);
    }

    // ========================================================================
    // Source selector
    // ========================================================================

    pub async fn active_list(&self) -> ListSource {
        self.selector.lock().await.active_list()
    }

    pub async fn is_picking_source(&self) -> bool {
        self.selector.lock().await.is_picking()
    }

    pub async fn open_source_picker(&self) {
        let mut selector = self.selector.lock().await;
        *selector = selector.open_picker();
        self.ui_state.lock().await.picker_selected = 0;
    }

    pub async fn cancel_source_picker(&self) {
        let mut selector = self.selector.lock().await;
        *selector = selector.cancel_picker();
    }

    /// Picker rows: each configured feed, then the live queue.
    pub fn picker_rows(&self) -> Vec<String> {
        let mut rows: Vec<String> = self.sources.iter().map(|s| s.name.clone()).collect();
        rows.push("Live queue".to_string());
        rows
    }

    pub async fn picker_move_up(&self) {
        let mut ui = self.ui_state.lock().await;
        ui.picker_selected = ui.picker_selected.saturating_sub(1);
    }

    pub async fn picker_move_down(&self) {
        let rows = self.picker_rows().len();
        let mut ui = self.ui_state.lock().await;
        if ui.picker_selected + 1 < rows {
            ui.picker_selected += 1;
        }
    }

    /// Commits the picker selection and returns the chosen list so the
    /// controller can trigger the matching (re)load.
    pub async fn choose_picked_source(&self) -> ListSource {
        let picked = {
            let ui = self.ui_state.lock().await;
            if ui.picker_selected < self.sources.len() {
                ListSource::Catalog(ui.picker_selected)
            } else {
                ListSource::LiveQueue
            }
        };
        let mut selector = self.selector.lock().await;
        *selector = selector.choose(picked);
        drop(selector);
        self.ui_state.lock().await.selected = 0;
        picked
    }

    // ========================================================================
    // Notifications & chords
    // ========================================================================

    pub async fn show_notification(&self, kind: NotificationKind, message: String) -> u64 {
        self.notifications.lock().await.show(message, kind)
    }

    pub async fn hide_notification_if(&self, token: u64) -> bool {
        self.notifications.lock().await.hide_if(token)
    }

    pub async fn chord_keypress(&self) -> ChordOutcome {
        self.chord.lock().await.keypress(Instant::now())
    }

    pub async fn chord_window(&self) -> Duration {
        self.chord.lock().await.window()
    }

    pub async fn expire_chord(&self, epoch: u64) {
        self.chord.lock().await.expire(epoch);
    }

    // ========================================================================
    // Search prompt
    // ========================================================================

    pub async fn open_search(&self) {
        self.ui_state.lock().await.search_input = Some(String::new());
    }

    pub async fn cancel_search(&self) {
        self.ui_state.lock().await.search_input = None;
    }

    pub async fn search_push(&self, c: char) {
        if let Some(query) = self.ui_state.lock().await.search_input.as_mut() {
            query.push(c);
        }
    }

    pub async fn search_pop(&self) {
        if let Some(query) = self.ui_state.lock().await.search_input.as_mut() {
            query.pop();
        }
    }

    /// Closes the prompt and moves the selection to the best match, or to
    /// the top when nothing matches. In the live queue an exact title match
    /// wins; otherwise the first case-insensitive substring match does.
    pub async fn commit_search(&self) {
        let query = self.ui_state.lock().await.search_input.take().unwrap_or_default();

        if let ListSource::LiveQueue = self.selector.lock().await.active_list() {
            if let Some(position) = self.queue.lock().await.resolve_by_title(&query) {
                self.ui_state.lock().await.selected = position;
                return;
            }
        }

        let needle = query.to_lowercase();
        let titles = self.active_titles().await;
        let hit = titles
            .iter()
            .position(|t| t.to_lowercase().contains(&needle))
            .unwrap_or(0);
        self.ui_state.lock().await.selected = hit;
    }

    pub async fn is_search_open(&self) -> bool {
        self.ui_state.lock().await.search_input.is_some()
    }

    // ========================================================================
    // Help overlay, quit, projection
    // ========================================================================

    pub async fn show_help(&self) {
        self.ui_state.lock().await.show_help = true;
    }

    pub async fn hide_help(&self) {
        self.ui_state.lock().await.show_help = false;
    }

    pub async fn is_help_open(&self) -> bool {
        self.ui_state.lock().await.show_help
    }

    /// Whether a higher-priority interaction is suppressing the
    /// reconciliation projection.
    pub async fn is_overlay_open(&self) -> bool {
        self.is_picking_source().await
            || self.is_help_open().await
            || self.is_search_open().await
    }

    pub async fn set_projection(&self, projection: PlayerProjection) {
        *self.projection.lock().await = projection;
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self) {
        *self.should_quit.lock().await = true;
    }

    // ========================================================================
    // Render snapshot
    // ========================================================================

    pub async fn snapshot(&self) -> RenderState {
        let selector = *self.selector.lock().await;
        let active = selector.active_list();
        let ui = self.ui_state.lock().await.clone();
        let projection = self.projection.lock().await.clone();

        let (titles, source_label, description, playing_row) = match active {
            ListSource::Catalog(index) => {
                let catalog = self.catalog.lock().await;
                let description = catalog.get(ui.selected).map(|e| {
                    let body = match e.published_at {
                        Some(date) => format!("[{}] {}", date.format("%d %b %Y"), e.summary),
                        None => e.summary.clone(),
                    };
                    (e.title.clone(), body)
                });
                let label = self
                    .sources
                    .get(index)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "Feed".to_string());
                (catalog.titles(), label, description, None)
            }
            ListSource::LiveQueue => {
                let queue = self.queue.lock().await;
                let playing_row = projection.status.current_position;
                // The listing carries no summaries; show the locator instead.
                let description = queue
                    .get(ui.selected)
                    .map(|e| (e.title.clone(), e.locator.clone()));
                (queue.titles(), "Live queue".to_string(), description, playing_row)
            }
        };

        let picker = if selector.is_picking() {
            Some((self.picker_rows(), ui.picker_selected))
        } else {
            None
        };

        RenderState {
            titles,
            selected: ui.selected,
            source_label,
            description,
            projection,
            playing_row,
            notification: self.notifications.lock().await.current().cloned(),
            picker,
            show_help: ui.show_help,
            search: ui.search_input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedItem;

    fn sources() -> Vec<FeedSource> {
        vec![
            FeedSource { name: "First".to_string(), url: "https://a/rss.xml".to_string() },
            FeedSource { name: "Second".to_string(), url: "https://b/rss.xml".to_string() },
        ]
    }

    fn catalog(titles: &[&str]) -> Catalog {
        Catalog::from_feed(
            titles
                .iter()
                .map(|t| FeedItem {
                    title: t.to_string(),
                    content: String::new(),
                    locator: format!("{t}.mp3"),
                    published_at: None,
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn loading_a_new_source_fully_replaces_the_catalog() {
        let model = AppModel::new(sources());
        model.replace_catalog(catalog(&["A", "B", "C"])).await;
        model.replace_catalog(catalog(&["X"])).await;

        let snapshot = model.snapshot().await;
        assert_eq!(snapshot.titles, vec!["X"]);
        assert_eq!(snapshot.selected, 0, "selection resets with the new list");
        assert!(model.locators_from_selection().await.is_ok());
    }

    #[tokio::test]
    async fn stale_selection_is_not_found_after_shrink() {
        let model = AppModel::new(sources());
        model.replace_catalog(catalog(&["A", "B", "C"])).await;
        model.move_selection_down().await;
        model.move_selection_down().await;
        assert_eq!(model.selected().await, 2);

        // A reload that shrinks the list resets the selection; forcing a
        // stale index through an empty catalog surfaces NotFound instead.
        model.replace_catalog(Catalog::default()).await;
        assert!(model.locators_from_selection().await.is_err());
    }

    #[tokio::test]
    async fn selection_clamps_at_both_ends() {
        let model = AppModel::new(sources());
        model.replace_catalog(catalog(&["A", "B"])).await;

        model.move_selection_up().await;
        assert_eq!(model.selected().await, 0);

        model.move_selection_down().await;
        model.move_selection_down().await;
        assert_eq!(model.selected().await, 1);

        model.select_top().await;
        assert_eq!(model.selected().await, 0);
        model.select_bottom().await;
        assert_eq!(model.selected().await, 1);
    }

    #[tokio::test]
    async fn picker_choice_maps_rows_to_sources() {
        let model = AppModel::new(sources());
        model.open_source_picker().await;
        assert!(model.is_picking_source().await);
        assert_eq!(model.picker_rows(), vec!["First", "Second", "Live queue"]);

        model.picker_move_down().await;
        model.picker_move_down().await;
        model.picker_move_down().await; // clamped at the last row
        assert_eq!(model.choose_picked_source().await, ListSource::LiveQueue);
        assert!(!model.is_picking_source().await);
        assert_eq!(model.active_list().await, ListSource::LiveQueue);
    }

    #[tokio::test]
    async fn cancelling_the_picker_restores_the_previous_list() {
        let model = AppModel::new(sources());
        model.open_source_picker().await;
        model.cancel_source_picker().await;
        assert_eq!(model.active_list().await, ListSource::Catalog(0));
    }

    #[tokio::test]
    async fn search_selects_first_match_or_top() {
        let model = AppModel::new(sources());
        model.replace_catalog(catalog(&["Episode 1", "Deep Focus", "Episode 2"])).await;

        model.open_search().await;
        for c in "focus".chars() {
            model.search_push(c).await;
        }
        model.commit_search().await;
        assert_eq!(model.selected().await, 1);
        assert!(!model.is_search_open().await);

        model.open_search().await;
        for c in "no such thing".chars() {
            model.search_push(c).await;
        }
        model.commit_search().await;
        assert_eq!(model.selected().await, 0);
    }

    #[tokio::test]
    async fn queue_refresh_while_browsing_keeps_catalog_selection() {
        let model = AppModel::new(sources());
        model.replace_catalog(catalog(&["A", "B", "C"])).await;
        model.move_selection_down().await;
        model.move_selection_down().await;
        assert_eq!(model.selected().await, 2);

        // Activating entry C seeds a one-entry remote queue; the follow-up
        // mirror refresh runs in the background while the catalog still has
        // the focus and must leave its highlight alone.
        model.replace_queue(QueueMirror::from_listing(&["0:c.mp3"])).await;
        assert_eq!(model.selected().await, 2);
    }

    #[tokio::test]
    async fn queue_replacement_clamps_selection() {
        let model = AppModel::new(sources());
        model.open_source_picker().await;
        model.picker_move_down().await;
        model.picker_move_down().await;
        model.choose_picked_source().await;

        model
            .replace_queue(QueueMirror::from_listing(&["0:a.mp3", "1:b.mp3", "2:c.mp3"]))
            .await;
        model.select_bottom().await;
        assert_eq!(model.selected().await, 2);

        model.replace_queue(QueueMirror::from_listing(&["0:a.mp3", "1:c.mp3"])).await;
        assert_eq!(model.selected().await, 1);
    }
}
