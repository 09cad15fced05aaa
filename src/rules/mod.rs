//! Rules, output handles and the rule store they synchronize with

mod entities;
mod handles;
mod registry;
mod store;

pub use entities::{DEFAULT_TAG, Handle, HandleId, RemoteRule, Rule, RuleId};
pub use handles::HandleRegistry;
pub use registry::{RuleRegistry, SyncReport};
pub use store::{MemoryStore, RuleStore, StoreError};
