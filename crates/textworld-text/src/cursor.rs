//! Per-actor cursor state.
//!
//! ## Learning: Newtype Pattern
//!
//! `Caret` wraps the line/column pair instead of passing `(usize, usize)`
//! around, so a line index can't be swapped with a column by accident.

use serde::{Deserialize, Serialize};
use textworld_api::UnitId;

/// Caret position inside a file (both 0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Caret {
    /// Line index
    pub line: usize,
    /// Column; equal to the line length when the caret sits after the last character
    pub column: usize,
}

impl Caret {
    /// Caret at the start of a file.
    pub const ZERO: Caret = Caret { line: 0, column: 0 };

    /// Creates a caret.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Caret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 1-indexed for humans
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Where an actor is and what it has selected.
///
/// While on a directory, `item_cursor` picks a slot: slot 0 is the parent
/// (when there is one), the following slots are the children in order.
/// While on a file, `caret` is the editing position and `item_cursor` is
/// expected to stay 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorPos {
    /// Item the actor is on
    pub item: UnitId,
    /// Selected slot in the current directory
    pub item_cursor: usize,
    /// Editing position in the current file
    pub caret: Caret,
}

impl ActorPos {
    /// Places an actor on `item` with every cursor at 0.
    pub fn at(item: UnitId) -> Self {
        Self {
            item,
            item_cursor: 0,
            caret: Caret::ZERO,
        }
    }

    /// Moves onto another item, resetting all cursors.
    pub fn enter(&mut self, item: UnitId) {
        *self = Self::at(item);
    }
}
