use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::{Category, SavedScreenState};
use crate::SAVED_STATE_KEY_PREFIX;

/// Key under which a category's screen state is persisted. One key per
/// category, so concurrently hosted screens never clobber each other.
#[must_use]
pub fn state_key(category: Category) -> String {
    format!("{SAVED_STATE_KEY_PREFIX}:{}", category.as_str())
}

/// Saved-screen-state operations fulfilled by the shell's instance-state
/// storage (a saved-state bundle on Android, user defaults on iOS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOperation {
    Read { key: String },
    Write { key: String, state: SavedScreenState },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOutput {
    Read(Option<SavedScreenState>),
    Written,
}

impl Operation for StoreOperation {
    type Output = StoreOutput;
}

pub struct ScreenStore<Ev> {
    context: CapabilityContext<StoreOperation, Ev>,
}

impl<Ev> Capability<Ev> for ScreenStore<Ev> {
    type Operation = StoreOperation;
    type MappedSelf<MappedEv> = ScreenStore<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static,
    {
        ScreenStore::new(self.context.map_event(f))
    }
}

impl<Ev> ScreenStore<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<StoreOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn read<F>(&self, category: Category, make_event: F)
    where
        F: Fn(Option<SavedScreenState>) -> Ev + Send + Sync + 'static,
    {
        let context = self.context.clone();
        let key = state_key(category);
        self.context.spawn(async move {
            let output = context
                .request_from_shell(StoreOperation::Read { key })
                .await;
            let saved = match output {
                StoreOutput::Read(saved) => saved,
                StoreOutput::Written => {
                    tracing::warn!("unexpected store output for read, treating as empty");
                    None
                }
            };
            context.update_app(make_event(saved));
        });
    }

    /// Fire-and-forget: the screen does not wait on persistence.
    pub fn write(&self, category: Category, state: SavedScreenState) {
        let context = self.context.clone();
        let key = state_key(category);
        self.context.spawn(async move {
            context
                .notify_shell(StoreOperation::Write { key, state })
                .await;
        });
    }
}
