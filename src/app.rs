use serde::{Deserialize, Serialize};

use crate::capabilities::{Capabilities, ImageOutcome, MediaUrl};
use crate::event::Event;
use crate::model::{
    Category, ImagePhase, ItemId, Model, ResourcePhase, ResourceState, SavedScreenState,
    ScreenLifecycle,
};
use crate::ScreenError;

/// Which of the three mutually exclusive screen regions is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Progress,
    Error,
    Content,
}

/// Panel visibility is governed jointly by the fetch result and the image
/// outcome. A successful fetch keeps the progress indicator up until its
/// image resolves, and a failed image overrides the fetch-level success.
#[must_use]
pub fn visible_panel(resource: &ResourcePhase, image: ImagePhase) -> Panel {
    match (resource, image) {
        (ResourcePhase::Loading, _) => Panel::Progress,
        (ResourcePhase::Error, _) => Panel::Error,
        (ResourcePhase::Success(_), ImagePhase::Pending) => Panel::Progress,
        (ResourcePhase::Success(_), ImagePhase::Ready) => Panel::Content,
        (ResourcePhase::Success(_), ImagePhase::Failed) => Panel::Error,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFacingError {
    pub message: String,
    pub is_retryable: bool,
}

impl From<ScreenError> for UserFacingError {
    fn from(e: ScreenError) -> Self {
        Self {
            message: e.user_facing_message().to_string(),
            is_retryable: e.is_retryable(),
        }
    }
}

/// Everything the shell's view binder needs to render the screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub panel: Panel,
    pub image_url: Option<String>,
    pub description: Option<String>,
    /// Reflects the adjacency flag of the last loaded item; deliberately not
    /// reset while a later fetch is in flight.
    pub previous_visible: bool,
    /// Navigation is enabled once any item has loaded on this screen.
    pub next_enabled: bool,
    /// Only data-fetch errors get a retry control; image failures wait for
    /// the next item.
    pub retry_visible: bool,
    pub error: Option<UserFacingError>,
}

#[derive(Default)]
pub struct App;

enum Direction {
    Previous,
    Next,
}

impl App {
    /// The initialize/retry dispatch rule: a screen with no current item asks
    /// for the most recent one, a resuming screen re-requests its item by id.
    fn issue_current_fetch(model: &mut Model, caps: &Capabilities) {
        let token = model.issue_fetch_token();
        model.resource = ResourcePhase::Loading;
        model.last_error = None;

        let category = model.category;
        match model.cursor.current_id() {
            None => caps.feed.latest(category, move |resource| Event::ResourceUpdated {
                token: Some(token),
                resource,
            }),
            Some(id) => caps
                .feed
                .by_id(category, id, move |resource| Event::ResourceUpdated {
                    token: Some(token),
                    resource,
                }),
        }

        caps.render.render();
    }

    fn issue_adjacent_fetch(model: &mut Model, caps: &Capabilities, id: ItemId, dir: Direction) {
        let token = model.issue_fetch_token();
        model.resource = ResourcePhase::Loading;
        model.last_error = None;

        let category = model.category;
        let make_event = move |resource| Event::ResourceUpdated {
            token: Some(token),
            resource,
        };
        match dir {
            Direction::Previous => caps.feed.previous(category, id, make_event),
            Direction::Next => caps.feed.next(category, id, make_event),
        }

        caps.render.render();
    }

    fn apply_resource(model: &mut Model, caps: &Capabilities, resource: ResourceState) {
        match resource {
            ResourceState::Loading { .. } => {
                model.resource = ResourcePhase::Loading;
                model.last_error = None;
            }

            ResourceState::Error { .. } => {
                model.resource = ResourcePhase::Error;
                model.last_error = Some(ScreenError::DataFetch);
            }

            ResourceState::Success { item, .. } => {
                model.cursor.advance_to(&item);
                model.last_error = None;

                match MediaUrl::parse(&item.media_url) {
                    Ok(url) => {
                        let token = model.issue_image_token();
                        model.image = ImagePhase::Pending;
                        caps.image.load(url, move |outcome| Event::ImageResolved {
                            token,
                            outcome,
                        });
                    }
                    Err(e) => {
                        tracing::warn!(item = %item.id, error = %e, "media url rejected");
                        model.image = ImagePhase::Failed;
                        model.last_error = Some(ScreenError::ImageLoad);
                    }
                }

                model.resource = ResourcePhase::Success(item);
            }
        }

        caps.render.render();
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        tracing::debug!(
            event = event.name(),
            user = event.is_user_initiated(),
            "handling event"
        );

        match event {
            Event::ScreenStarted { category } => {
                *model = Model {
                    category,
                    lifecycle: ScreenLifecycle::Active,
                    ..Model::default()
                };
                caps.store
                    .read(category, |saved| Event::StateRestored { saved });
                caps.render.render();
            }

            Event::StateRestored { saved } => {
                if !model.lifecycle.is_active() {
                    tracing::debug!("restore result after teardown, dropping");
                    return;
                }

                match saved {
                    Some(state) if state.matches(model.category) => {
                        model.cursor = state.cursor();
                    }
                    Some(state) => {
                        // Persisted state from another category; a fresh
                        // most-recent fetch is the safe degradation.
                        tracing::warn!(
                            saved = state.category().as_str(),
                            bound = model.category.as_str(),
                            "saved state category mismatch, starting fresh"
                        );
                    }
                    None => {}
                }

                Self::issue_current_fetch(model, caps);
            }

            Event::ScreenSuspended => {
                caps.store.write(
                    model.category,
                    SavedScreenState::capture(model.category, &model.cursor),
                );
            }

            Event::ScreenStopped => {
                model.lifecycle = ScreenLifecycle::TornDown;
            }

            Event::RetryPressed => {
                if model.lifecycle.is_active() {
                    Self::issue_current_fetch(model, caps);
                }
            }

            Event::PreviousPressed => {
                if !model.lifecycle.is_active() {
                    return;
                }
                match model.cursor.current_id() {
                    Some(id) => Self::issue_adjacent_fetch(model, caps, id, Direction::Previous),
                    None => tracing::debug!("previous pressed before any item loaded"),
                }
            }

            Event::NextPressed => {
                if !model.lifecycle.is_active() {
                    return;
                }
                match model.cursor.current_id() {
                    Some(id) => Self::issue_adjacent_fetch(model, caps, id, Direction::Next),
                    None => tracing::debug!("next pressed before any item loaded"),
                }
            }

            Event::ResourceUpdated { token, resource } => {
                if !model.lifecycle.is_active() {
                    tracing::debug!("resource update while not observing, dropping");
                    return;
                }
                if resource.category() != model.category {
                    tracing::debug!(
                        update = resource.category().as_str(),
                        bound = model.category.as_str(),
                        "resource update for another screen, dropping"
                    );
                    return;
                }
                if token.map_or(false, |t| !model.is_current_fetch(t)) {
                    tracing::debug!(
                        status = resource.status_name(),
                        "stale fetch result, dropping"
                    );
                    return;
                }

                Self::apply_resource(model, caps, resource);
            }

            Event::ImageResolved { token, outcome } => {
                if !model.lifecycle.is_active() {
                    tracing::debug!("image outcome while not observing, dropping");
                    return;
                }
                if !model.is_current_image(token) {
                    tracing::debug!("stale image outcome, dropping");
                    return;
                }

                match outcome {
                    ImageOutcome::Ready => {
                        model.image = ImagePhase::Ready;
                    }
                    ImageOutcome::Failed => {
                        model.image = ImagePhase::Failed;
                        model.last_error = Some(ScreenError::ImageLoad);
                    }
                }
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        let panel = visible_panel(&model.resource, model.image);
        let item = model.resource.item();

        ViewModel {
            panel,
            image_url: item.map(|i| i.media_url.clone()),
            description: item.map(|i| i.description.clone()),
            previous_visible: model.cursor.has_previous(),
            next_enabled: model.cursor.current_id().is_some(),
            retry_visible: model.resource.is_error(),
            error: model.last_error.map(UserFacingError::from),
        }
    }
}
