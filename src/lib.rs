//! Shared core for the item viewer screen.
//!
//! The core is a pure state machine in the Crux style: the shell (Android,
//! iOS) forwards lifecycle and user events in, the core answers with effects
//! (fetch an item, load an image, persist screen state, re-render) and a
//! serializable view model. All screen policy lives here; the shell only
//! binds views and fulfils effects.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app;
pub mod capabilities;
pub mod event;
pub mod model;

pub use app::{visible_panel, App, Panel, UserFacingError, ViewModel};
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::{
    Category, ImagePhase, Item, ItemId, Model, NavigationCursor, RequestToken, ResourcePhase,
    ResourceState, SavedScreenState, ScreenLifecycle,
};

/// Prefix for the keys under which per-category screen state is persisted.
pub const SAVED_STATE_KEY_PREFIX: &str = "screen_state";

/// Item id value meaning "no current item" in persisted screen state. Real
/// ids start at 1.
pub const UNSET_ITEM_ID: u64 = 0;

/// The two ways this screen can fail from the user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenError {
    /// The item fetch failed; the data may simply not have arrived.
    #[error("could not load the item")]
    DataFetch,
    /// The item arrived but its media could not be displayed.
    #[error("could not display the image")]
    ImageLoad,
}

impl ScreenError {
    #[must_use]
    pub const fn user_facing_message(self) -> &'static str {
        match self {
            Self::DataFetch => "Something went wrong loading this item.",
            Self::ImageLoad => "This image could not be displayed.",
        }
    }

    /// Only fetch failures are worth retrying in place; a broken image stays
    /// broken until a different item loads.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::DataFetch)
    }
}
