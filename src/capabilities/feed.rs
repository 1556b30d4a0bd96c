use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::{Category, ItemId, ResourceState};

/// Requests the core can make of the shell's item repository. All four are
/// fire-and-forget from the core's perspective; the repository answers with a
/// `ResourceState` tagged with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOperation {
    /// The most recent item in a category.
    Latest { category: Category },
    /// A specific item, typically when resuming a restored screen.
    ById { category: Category, id: ItemId },
    /// The item immediately before `id` in its category.
    Previous { category: Category, id: ItemId },
    /// The item immediately after `id` in its category.
    Next { category: Category, id: ItemId },
}

impl Operation for FeedOperation {
    type Output = ResourceState;
}

pub struct Feed<Ev> {
    context: CapabilityContext<FeedOperation, Ev>,
}

impl<Ev> Capability<Ev> for Feed<Ev> {
    type Operation = FeedOperation;
    type MappedSelf<MappedEv> = Feed<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        Feed::new(self.context.map_event(f))
    }
}

impl<Ev> Feed<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<FeedOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn latest<F>(&self, category: Category, make_event: F)
    where
        F: Fn(ResourceState) -> Ev + Send + Sync + 'static,
    {
        self.request(FeedOperation::Latest { category }, make_event);
    }

    pub fn by_id<F>(&self, category: Category, id: ItemId, make_event: F)
    where
        F: Fn(ResourceState) -> Ev + Send + Sync + 'static,
    {
        self.request(FeedOperation::ById { category, id }, make_event);
    }

    pub fn previous<F>(&self, category: Category, id: ItemId, make_event: F)
    where
        F: Fn(ResourceState) -> Ev + Send + Sync + 'static,
    {
        self.request(FeedOperation::Previous { category, id }, make_event);
    }

    pub fn next<F>(&self, category: Category, id: ItemId, make_event: F)
    where
        F: Fn(ResourceState) -> Ev + Send + Sync + 'static,
    {
        self.request(FeedOperation::Next { category, id }, make_event);
    }

    fn request<F>(&self, operation: FeedOperation, make_event: F)
    where
        F: Fn(ResourceState) -> Ev + Send + Sync + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let resource = context.request_from_shell(operation).await;
            context.update_app(make_event(resource));
        });
    }
}
