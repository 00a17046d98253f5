//! # Textworld Text
//!
//! A virtual filesystem world. Actors walk a tree of directories and
//! files with item commands and edit file content one keystroke at a time.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     TextWorld                         │
//! │  actors: id -> ActorPos     cycles: id -> CycleFn     │
//! └───────┬──────────────────┬─────────────────┬─────────┘
//!         │ ready/step       │ look            │ emit
//! ┌───────┴──────┐   ┌───────┴──────┐   ┌──────┴───────┐
//! │    action    │   │    render    │   │   EventBus   │
//! │ (state mach.)│   │  (records)   │   │ (broadcast)  │
//! └───────┬──────┘   └───────┬──────┘   └──────────────┘
//!         └────────┬─────────┘
//!            ┌─────┴─────┐
//!            │   Tree    │  Item ─► Line ─► Character
//!            └───────────┘
//! ```
//!
//! ## Learning: Arena Instead of Back-Pointers
//!
//! Every item lives in one id-keyed map owned by [`Tree`]. A child stores
//! its parent's [`UnitId`], never a reference, so the tree has a single
//! owner and no reference cycles.

pub mod action;
pub mod config;
pub mod cursor;
pub mod event;
pub mod key;
pub mod render;
pub mod tree;
pub mod world;

pub use config::{Config, ConfigError, EntryConfig, EntryKind, WorldConfig};
pub use cursor::{ActorPos, Caret};
pub use event::{EventBus, EventHandler, WorldEvent};
pub use key::{Command, Glyph, ItemCommand, SpecialKey, GLYPHS};
pub use tree::{Character, Item, ItemKind, Line, Tree};
pub use world::{TextWorld, WORLD_NAME};

use textworld_api::{UnitId, WorldError};

/// Result type for text world operations
pub type TextResult<T> = Result<T, TextError>;

/// Errors raised while building or driving a text world
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Item not found: {0}")]
    ItemNotFound(UnitId),

    #[error("Not a directory: {0}")]
    NotADirectory(UnitId),

    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    World(#[from] WorldError),
}
