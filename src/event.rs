use serde::{Deserialize, Serialize};

use crate::capabilities::ImageOutcome;
use crate::model::{Category, RequestToken, ResourceState, SavedScreenState};

/// Everything that can drive the item screen: lifecycle signals and user
/// intents from the shell, plus capability results flowing back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// The screen came on stage, bound to a category. Triggers a saved-state
    /// read; the initial fetch is issued once `StateRestored` arrives.
    ScreenStarted { category: Category },

    /// Saved-state read resolved. `None` means a fresh screen.
    StateRestored { saved: Option<SavedScreenState> },

    /// The screen is about to be re-created; persist the cursor.
    ScreenSuspended,

    /// The screen was torn down; stop reacting to in-flight results.
    ScreenStopped,

    RetryPressed,
    PreviousPressed,
    NextPressed,

    /// A resource update from the shared fetch channel. Results of this
    /// screen's own dispatches carry the token they were issued with;
    /// broadcast updates pushed by the shell carry none.
    ResourceUpdated {
        token: Option<RequestToken>,
        resource: ResourceState,
    },

    /// The image pipeline resolved the load issued with `token`.
    ImageResolved {
        token: RequestToken,
        outcome: ImageOutcome,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ScreenStarted { .. } => "screen_started",
            Self::StateRestored { .. } => "state_restored",
            Self::ScreenSuspended => "screen_suspended",
            Self::ScreenStopped => "screen_stopped",
            Self::RetryPressed => "retry_pressed",
            Self::PreviousPressed => "previous_pressed",
            Self::NextPressed => "next_pressed",
            Self::ResourceUpdated { .. } => "resource_updated",
            Self::ImageResolved { .. } => "image_resolved",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::RetryPressed | Self::PreviousPressed | Self::NextPressed
        )
    }
}
