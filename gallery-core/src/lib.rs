//! Navigation engine for the Cheno sculpture gallery.
//!
//! Everything here is free of browser APIs: the host supplies a [`Transport`]
//! for the CMS, a [`HistoryBackend`] for the location and the current time for
//! autoplay. `gallery-wasm` is the browser host.

pub mod autoplay;
pub mod capabilities;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod focus;
pub mod gallery;
pub mod history;
pub mod models;
pub mod pagination;
pub mod route;
pub mod slug;

pub use autoplay::{Autoplay, AutoplayState, TickOutcome};
pub use capabilities::{StaticEnvironment, Theme, ThemeProvider, ViewportQuery};
pub use config::GalleryConfig;
pub use content::{ContentFetcher, Transport};
pub use error::{GalleryError, Result};
pub use focus::{FocusToggle, View, ViewTransition};
pub use gallery::{Gallery, KeyCommand, LoadState};
pub use history::{HistoryBackend, HistorySync, MemoryHistory, Restored};
pub use models::{Category, Sculpture};
pub use pagination::{NavEvent, PaginationEngine, Position};
pub use route::Route;
pub use slug::{GalleryPath, decode_entities, parse_path, slugify};
