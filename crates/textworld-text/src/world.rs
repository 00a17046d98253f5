//! The text world.
//!
//! ## Learning: The Facade Pattern
//!
//! `TextWorld` is the only type orchestration needs. It owns the tree,
//! every actor's position and every cycle function, and routes
//! [`World`] calls to the tree, the state machine and the renderer.

use std::collections::HashMap;

use serde_json::Value;
use textworld_api::{Action, CycleFn, Image, Touch, UnitId, UnitIds, World, WorldError, WorldResult};
use tokio::sync::broadcast;

use crate::action::{self, Effect};
use crate::config::{Config, EntryConfig, EntryKind};
use crate::cursor::ActorPos;
use crate::event::{EventBus, WorldEvent};
use crate::key::Command;
use crate::render;
use crate::tree::{Item, Tree};
use crate::{TextError, TextResult};

/// Name reported by [`TextWorld::name`].
pub const WORLD_NAME: &str = "text";

/// A virtual filesystem that actors navigate and edit.
///
/// ## Thread Safety
///
/// Everything runs to completion on the caller's thread. Only the id
/// generator may be shared with other worlds.
pub struct TextWorld {
    /// Items, lines and characters
    tree: Tree,

    /// Actor id -> position
    actors: HashMap<UnitId, ActorPos>,

    /// Actor id -> cycle function
    cycles: HashMap<UnitId, CycleFn<TextWorld>>,

    /// Bumped on every reset so a tick can tell its cycle functions are stale
    generation: u64,

    /// Event bus for notifications
    events: EventBus,
}

impl TextWorld {
    /// Creates an empty world with its own id generator.
    pub fn new() -> Self {
        Self::with_ids(UnitIds::new(), &Config::default())
    }

    /// Creates an empty world with custom configuration.
    pub fn with_config(config: &Config) -> Self {
        Self::with_ids(UnitIds::new(), config)
    }

    /// Creates an empty world drawing ids from `ids`.
    pub fn with_ids(ids: UnitIds, config: &Config) -> Self {
        Self {
            tree: Tree::new(ids),
            actors: HashMap::new(),
            cycles: HashMap::new(),
            generation: 0,
            events: EventBus::new(config.world.event_capacity),
        }
    }

    // ==================== Tree ====================

    /// Returns the item tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Returns the root directory id.
    pub fn root(&self) -> UnitId {
        self.tree.root()
    }

    /// Creates a directory under `parent`.
    pub fn new_directory(&mut self, parent: UnitId, name: impl Into<String>) -> TextResult<UnitId> {
        let id = self.tree.new_directory(parent, name)?;
        self.emit(WorldEvent::ItemCreated { id, parent });
        Ok(id)
    }

    /// Creates an empty file under `parent`.
    pub fn new_file(&mut self, parent: UnitId, name: impl Into<String>) -> TextResult<UnitId> {
        self.write_file(parent, name, "")
    }

    /// Creates a file with content under `parent`.
    pub fn write_file(
        &mut self,
        parent: UnitId,
        name: impl Into<String>,
        text: &str,
    ) -> TextResult<UnitId> {
        let id = self.tree.write_file(parent, name, text)?;
        self.emit(WorldEvent::ItemCreated { id, parent });
        Ok(id)
    }

    /// Walks `path` from the root, creating missing directories.
    /// Returns the last directory.
    pub fn create_directories(&mut self, path: &str) -> TextResult<UnitId> {
        let mut dir = self.root();
        for part in path.split('/').filter(|part| !part.is_empty()) {
            dir = match self.tree.child_named(dir, part) {
                Some(existing) if self.tree.item(existing).is_some_and(Item::is_directory) => {
                    existing
                }
                Some(existing) => return Err(TextError::NotADirectory(existing)),
                None => self.new_directory(dir, part)?,
            };
        }
        Ok(dir)
    }

    /// Creates the configured entries under the root.
    pub fn bootstrap(&mut self, entries: &[EntryConfig]) -> TextResult<()> {
        for entry in entries {
            let path = entry.path.trim_matches('/');
            let (dir_path, name) = path.rsplit_once('/').unwrap_or(("", path));
            if name.is_empty() {
                return Err(TextError::InvalidPath(entry.path.clone()));
            }

            let before = self.tree.len();
            match entry.kind {
                EntryKind::Directory => {
                    self.create_directories(path)?;
                }
                EntryKind::File => {
                    let parent = self.create_directories(dir_path)?;
                    let content = entry.content.as_deref().unwrap_or_default();
                    self.write_file(parent, name, content)?;
                }
            }
            tracing::debug!(
                "Bootstrapped {} ({} new items)",
                entry.path,
                self.tree.len() - before
            );
        }
        Ok(())
    }

    // ==================== Actors ====================

    /// Returns an actor's position.
    pub fn position(&self, actor: UnitId) -> Option<&ActorPos> {
        self.actors.get(&actor)
    }

    /// Returns an actor's position for direct manipulation by harnesses.
    pub fn position_mut(&mut self, actor: UnitId) -> Option<&mut ActorPos> {
        self.actors.get_mut(&actor)
    }

    /// Returns the ids of all actors.
    pub fn actors(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.actors.keys().copied()
    }

    // ==================== Events ====================

    /// Subscribes to world events.
    pub fn subscribe(&self) -> broadcast::Receiver<WorldEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: WorldEvent) {
        self.events.emit(event);
    }
}

impl Default for TextWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl World for TextWorld {
    type Command = Command;

    fn name(&self) -> &str {
        WORLD_NAME
    }

    fn reset(&mut self) {
        // Ids keep counting so nothing from before the reset is ever reused.
        self.tree = Tree::new(self.tree.ids().clone());
        self.actors.clear();
        self.cycles.clear();
        self.generation += 1;
        tracing::debug!("Text world reset, root is {}", self.tree.root());
        self.emit(WorldEvent::Reset);
    }

    fn tick(&mut self) {
        let generation = self.generation;
        let mut cycles = std::mem::take(&mut self.cycles);
        for cycle in cycles.values_mut() {
            cycle(self);
            if self.generation != generation {
                break;
            }
        }

        if self.generation != generation {
            return;
        }
        // Registrations made during the tick replace the ones that ran.
        for (actor, cycle) in cycles {
            self.cycles.entry(actor).or_insert(cycle);
        }
    }

    fn new_actor(&mut self, _args: &[Value]) -> (UnitId, Vec<Action<Command>>) {
        let id = self.tree.ids().next();
        self.actors.insert(id, ActorPos::at(self.tree.root()));
        tracing::debug!("Created actor {}", id);
        self.emit(WorldEvent::ActorCreated(id));
        (id, action::catalog(id))
    }

    fn register(&mut self, actor: UnitId, cycle: CycleFn<Self>) -> WorldResult<()> {
        if !self.actors.contains_key(&actor) {
            return Err(WorldError::ActorNotFound(actor));
        }
        self.cycles.insert(actor, cycle);
        Ok(())
    }

    fn look(&self, actor: UnitId) -> Vec<Image> {
        self.actors
            .get(&actor)
            .map(|pos| render::look(&self.tree, pos))
            .unwrap_or_default()
    }

    fn feel(&self, _actor: UnitId) -> Vec<Touch> {
        Vec::new()
    }

    fn cmd(&mut self, args: &[Value]) -> WorldResult<()> {
        tracing::trace!("Ignoring cmd with {} args", args.len());
        Ok(())
    }

    fn ready(&self, action: &Action<Command>) -> bool {
        self.actors
            .get(&action.actor())
            .is_some_and(|pos| action::ready(&self.tree, pos, action.command()))
    }

    fn step(&mut self, action: &Action<Command>) {
        let actor = action.actor();
        let Some(pos) = self.actors.get_mut(&actor) else {
            tracing::trace!("Step {} for unknown actor {}", action.name(), actor);
            return;
        };

        let event = match action::step(&mut self.tree, pos, action.command()) {
            Some(Effect::Entered(item)) => WorldEvent::ItemEntered { actor, item },
            Some(Effect::Moved) => WorldEvent::CursorMoved { actor },
            Some(Effect::Edited(file)) => WorldEvent::ContentChanged { actor, file },
            None => {
                tracing::trace!("Step {} not ready for actor {}", action.name(), actor);
                return;
            }
        };
        tracing::debug!("Actor {} stepped {}", actor, action.name());
        self.emit(event);
    }
}
