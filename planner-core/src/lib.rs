//! Planner core: the in-memory Kanban board document, its mutations,
//! drag-and-drop reordering, templates, tags and JSON exchange.

pub mod config;
pub mod controller;
pub mod duplicate;
pub mod exchange;
pub mod identity;
pub mod migrate;
pub mod reorder;
pub mod store;
pub mod types;

pub use config::StoreConfig;
pub use controller::{BoardController, Decisions};
pub use exchange::ExchangeError;
pub use reorder::{CardDragPayload, InsertionAnchor};
pub use store::{BoardStore, StoreError, StoreResult};
pub use types::{Board, Card, Checklist, ChecklistItem, ChecklistProgress, List, Tag, Template};
