//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Source selector state machine, UI state, timing primitives
//! - `catalog`: Catalog Store (feed-sourced playable entries)
//! - `queue`: Queue Mirror (local reconstruction of the remote queue)
//! - `status`: Transport status / now-playing parsing and projection
//! - `transport`: Transport Session (remote command client)
//! - `app_model`: Main application model with state management methods

mod app_model;
mod catalog;
mod queue;
mod status;
mod transport;
mod types;

pub use types::{
    ChordOutcome, ListSource, Notification, NotificationKind, SourceSelector,
};

pub use catalog::{Catalog, CatalogEntry};
pub use queue::{QueueEntry, QueueMirror};
pub use status::{NowPlaying, PlayState, PlayerProjection, TransportStatus};
pub use transport::TransportSession;

pub use app_model::{AppModel, RenderState};
