mod feed;
mod image;
mod store;

pub use self::feed::{Feed, FeedOperation};
pub use self::image::{ImageLoader, ImageOperation, ImageOutcome, MediaUrl, MediaUrlError};
pub use self::store::{state_key, ScreenStore, StoreOperation, StoreOutput};

// Crux's built-in Render capability is used as-is for view invalidation.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

// The Effect derive names each variant after the field's type name, so spell
// the image and store capabilities through aliases to get `Effect::Image` and
// `Effect::Store`.
type Image<Ev> = ImageLoader<Ev>;
type Store<Ev> = ScreenStore<Ev>;

#[derive(crux_core::macros::Effect)]
#[effect(app = "App")]
pub struct Capabilities {
    pub feed: Feed<Event>,
    pub image: Image<Event>,
    pub store: Store<Event>,
    pub render: Render<Event>,
}
