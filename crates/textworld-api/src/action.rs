//! Catalog entries.
//!
//! ## Learning: Values Instead of Closures
//!
//! An action could be a pair of boxed closures capturing the world, but
//! then every action would hold a borrow of (or a shared pointer to) the
//! whole world for as long as the actor keeps its menu. Instead an
//! [`Action`] is plain data: *who* acts and *what* they do. The world
//! interprets it in [`World::ready`](crate::World::ready) and
//! [`World::step`](crate::World::step).

use serde::{Deserialize, Serialize};

use crate::UnitId;

/// One entry of an actor's action menu, bound to that actor for life.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action<C> {
    name: String,
    actor: UnitId,
    command: C,
}

impl<C> Action<C> {
    /// Binds `command` to `actor`.
    pub fn new(name: impl Into<String>, actor: UnitId, command: C) -> Self {
        Self {
            name: name.into(),
            actor,
            command,
        }
    }

    /// Returns the action name (for debugging and scripted drivers).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the actor this action belongs to.
    pub fn actor(&self) -> UnitId {
        self.actor
    }

    /// Returns the bound command.
    pub fn command(&self) -> &C {
        &self.command
    }
}
