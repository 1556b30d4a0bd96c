use serde::{Deserialize, Serialize};
use std::fmt;

use crate::UNSET_ITEM_ID;

/// A content section the viewer browses. The shell addresses sections by
/// ordinal when it persists screen state, so the ordinal mapping is part of
/// the wire format and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Latest,
    Hot,
    Top,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Latest, Self::Hot, Self::Top];

    #[must_use]
    pub const fn ordinal(self) -> u32 {
        match self {
            Self::Latest => 0,
            Self::Hot => 1,
            Self::Top => 2,
        }
    }

    #[must_use]
    pub const fn from_ordinal(ordinal: u32) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Latest),
            1 => Some(Self::Hot),
            2 => Some(Self::Top),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Hot => "hot",
            Self::Top => "top",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of an item within its category. Ids are assigned by the data
/// source and are monotonically orderable; id 0 is reserved as the "unset"
/// sentinel in the persisted screen state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ItemId(pub u64);

impl ItemId {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One browsable item as delivered by the data source.
///
/// `has_previous` is computed by the data source at fetch time and is trusted
/// as-is; the core never derives adjacency itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub media_url: String,
    pub description: String,
    pub has_previous: bool,
}

/// Tagged outcome of an asynchronous item fetch, as delivered on the shared
/// resource channel. Every update carries the category it belongs to; a
/// screen must ignore updates tagged with a category other than its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceState {
    Loading { category: Category },
    Error { category: Category },
    Success { category: Category, item: Item },
}

impl ResourceState {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Loading { category }
            | Self::Error { category }
            | Self::Success { category, .. } => *category,
        }
    }

    #[must_use]
    pub const fn status_name(&self) -> &'static str {
        match self {
            Self::Loading { .. } => "loading",
            Self::Error { .. } => "error",
            Self::Success { .. } => "success",
        }
    }
}

/// Correlates an asynchronous result with the dispatch that requested it.
/// Tokens increase monotonically per channel; a result carrying anything but
/// the latest issued token is stale and must be discarded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Position of the screen within its category: the id of the last item that
/// loaded successfully, plus the adjacency flag the data source reported for
/// it. Updated only on `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NavigationCursor {
    current_id: Option<ItemId>,
    has_previous: bool,
}

impl NavigationCursor {
    /// A cursor resuming at a known id, before the item has re-loaded. The
    /// adjacency flag is unknown until the next `Success` delivers it.
    #[must_use]
    pub const fn resume_at(id: ItemId) -> Self {
        Self {
            current_id: Some(id),
            has_previous: false,
        }
    }

    pub fn advance_to(&mut self, item: &Item) {
        self.current_id = Some(item.id);
        self.has_previous = item.has_previous;
    }

    #[must_use]
    pub const fn current_id(&self) -> Option<ItemId> {
        self.current_id
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.has_previous
    }
}

/// Screen state that survives re-creation, in the shell's bundle format:
/// the category ordinal plus the current item id, with 0 meaning "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedScreenState {
    pub category_ordinal: u32,
    pub current_id: u64,
}

impl SavedScreenState {
    #[must_use]
    pub fn capture(category: Category, cursor: &NavigationCursor) -> Self {
        Self {
            category_ordinal: category.ordinal(),
            current_id: cursor.current_id().map_or(UNSET_ITEM_ID, ItemId::value),
        }
    }

    /// Unknown ordinals fall back to the default category, matching the
    /// shell's historical restore behavior.
    #[must_use]
    pub fn category(&self) -> Category {
        Category::from_ordinal(self.category_ordinal).unwrap_or_default()
    }

    #[must_use]
    pub fn cursor(&self) -> NavigationCursor {
        if self.current_id == UNSET_ITEM_ID {
            NavigationCursor::default()
        } else {
            NavigationCursor::resume_at(ItemId(self.current_id))
        }
    }

    #[must_use]
    pub fn matches(&self, category: Category) -> bool {
        self.category() == category
    }
}

/// What the data fetch last reported for this screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResourcePhase {
    #[default]
    Loading,
    Error,
    Success(Item),
}

impl ResourcePhase {
    #[must_use]
    pub const fn item(&self) -> Option<&Item> {
        match self {
            Self::Success(item) => Some(item),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// What the image pipeline last reported for the current item's media.
/// Independent of `ResourcePhase`; the two are combined only when deriving
/// panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImagePhase {
    #[default]
    Pending,
    Ready,
    Failed,
}

/// Observation scope of the screen. Resource and image results are applied
/// only while `Active`; `ScreenStopped` releases the subscription and any
/// result arriving afterwards is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenLifecycle {
    #[default]
    Idle,
    Active,
    TornDown,
}

impl ScreenLifecycle {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

pub struct Model {
    pub category: Category,
    pub lifecycle: ScreenLifecycle,
    pub cursor: NavigationCursor,
    pub resource: ResourcePhase,
    pub image: ImagePhase,
    pub last_error: Option<crate::ScreenError>,
    /// Latest token issued on the fetch channel; 0 means none issued yet.
    pub(crate) fetch_token: RequestToken,
    /// Latest token issued on the image channel.
    pub(crate) image_token: RequestToken,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            category: Category::default(),
            lifecycle: ScreenLifecycle::default(),
            cursor: NavigationCursor::default(),
            resource: ResourcePhase::default(),
            image: ImagePhase::default(),
            last_error: None,
            fetch_token: RequestToken::default(),
            image_token: RequestToken::default(),
        }
    }
}

impl Model {
    pub fn issue_fetch_token(&mut self) -> RequestToken {
        self.fetch_token = self.fetch_token.next();
        self.fetch_token
    }

    pub fn issue_image_token(&mut self) -> RequestToken {
        self.image_token = self.image_token.next();
        self.image_token
    }

    #[must_use]
    pub fn is_current_fetch(&self, token: RequestToken) -> bool {
        token == self.fetch_token
    }

    #[must_use]
    pub fn is_current_image(&self, token: RequestToken) -> bool {
        token == self.image_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, has_previous: bool) -> Item {
        Item {
            id: ItemId(id),
            media_url: "https://cdn.example.com/42.gif".into(),
            description: "desc".into(),
            has_previous,
        }
    }

    #[test]
    fn category_ordinals_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_ordinal(category.ordinal()), Some(category));
        }
        assert_eq!(Category::from_ordinal(3), None);
    }

    #[test]
    fn cursor_tracks_last_success() {
        let mut cursor = NavigationCursor::default();
        assert_eq!(cursor.current_id(), None);
        assert!(!cursor.has_previous());

        cursor.advance_to(&item(7, true));
        assert_eq!(cursor.current_id(), Some(ItemId(7)));
        assert!(cursor.has_previous());

        cursor.advance_to(&item(6, false));
        assert_eq!(cursor.current_id(), Some(ItemId(6)));
        assert!(!cursor.has_previous());
    }

    #[test]
    fn saved_state_uses_zero_sentinel() {
        let saved = SavedScreenState::capture(Category::Hot, &NavigationCursor::default());
        assert_eq!(saved.current_id, UNSET_ITEM_ID);
        assert_eq!(saved.cursor().current_id(), None);

        let mut cursor = NavigationCursor::default();
        cursor.advance_to(&item(9, true));
        let saved = SavedScreenState::capture(Category::Hot, &cursor);
        assert_eq!(saved.current_id, 9);
        assert_eq!(saved.cursor().current_id(), Some(ItemId(9)));
        // Adjacency is not persisted; it comes back with the next Success.
        assert!(!saved.cursor().has_previous());
    }

    #[test]
    fn saved_state_unknown_ordinal_falls_back_to_default() {
        let saved = SavedScreenState {
            category_ordinal: 99,
            current_id: 3,
        };
        assert_eq!(saved.category(), Category::Latest);
        assert!(saved.matches(Category::Latest));
        assert!(!saved.matches(Category::Hot));
    }

    #[test]
    fn resource_state_reports_its_category() {
        let state = ResourceState::Success {
            category: Category::Top,
            item: item(1, false),
        };
        assert_eq!(state.category(), Category::Top);
        assert_eq!(state.status_name(), "success");
    }

    #[test]
    fn tokens_are_monotonic_and_current() {
        let mut model = Model::default();
        let first = model.issue_fetch_token();
        let second = model.issue_fetch_token();
        assert!(second > first);
        assert!(!model.is_current_fetch(first));
        assert!(model.is_current_fetch(second));
    }
}
