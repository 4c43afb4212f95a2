//! Core editing library for PlayFab-shaped user-data collections:
//! inventory location and normalization, currency and faction records,
//! and lossless backup/restore.

pub mod backup;
pub mod catalog;
pub mod document;
pub mod editor;
pub mod error;
pub mod item;
pub mod stacks;
pub mod store;

pub use backup::Backup;
pub use catalog::{
    ItemCatalog, ItemConfig, ResolvedItemEntry, effective_stack_limit, fallback_config,
    resolve_items,
};
pub use document::{
    DEFAULT_INVENTORY_KEY, InventoryLocation, LAST_UPDATED_FIELD, LocatedPayload, decode_payload,
    locate, write_back_fields,
};
pub use editor::{BALANCE_KEY, Balance, Editor, FACTION_KEY, FactionLevels, SaveOutcome};
pub use error::CoreError;
pub use item::{Attachment, DURABILITY_FULL, ItemRecord, ModData, Origin};
pub use stacks::{add_items, split_stacks};
pub use store::{DocumentStore, MemoryStore, Query, UpdateOutcome};
