//! The world contract.

use serde_json::Value;

use crate::{Action, Image, Touch, UnitId, WorldResult};

/// Per-actor function run once per tick.
///
/// It receives the world mutably so it can look around and act.
pub type CycleFn<W> = Box<dyn FnMut(&mut W)>;

/// Skeletal design shared by all training environments.
///
/// ## Lifecycle
///
/// - `reset` returns the world to its factory state and drops every actor.
/// - `new_actor` creates an actor and hands back its fixed action menu.
/// - `register` attaches a cycle function to an actor; `tick` runs all of
///   them once. Ordering across actors within a tick is unspecified.
///
/// ## Ready/Step
///
/// Orchestration is expected to poll `ready` for every action every tick,
/// so `ready` must be cheap and free of side effects. `step` on an action
/// that is not ready is a no-op, never a fault.
pub trait World: Sized {
    /// Command payload carried by this world's actions.
    type Command: Clone + std::fmt::Debug;

    /// Returns the world name.
    fn name(&self) -> &str;

    /// Resets the world to its default state.
    fn reset(&mut self);

    /// Runs every registered cycle function once.
    fn tick(&mut self);

    /// Creates an actor and returns its id and action catalog.
    fn new_actor(&mut self, args: &[Value]) -> (UnitId, Vec<Action<Self::Command>>);

    /// Registers the cycle function of an existing actor.
    fn register(&mut self, actor: UnitId, cycle: CycleFn<Self>) -> WorldResult<()>;

    /// Returns what the actor currently sees.
    fn look(&self, actor: UnitId) -> Vec<Image>;

    /// Returns what the actor currently feels.
    fn feel(&self, actor: UnitId) -> Vec<Touch>;

    /// Implementation-specific commands.
    fn cmd(&mut self, args: &[Value]) -> WorldResult<()>;

    /// Returns true if the action is currently legal.
    fn ready(&self, action: &Action<Self::Command>) -> bool;

    /// Performs the action if it is legal, otherwise does nothing.
    fn step(&mut self, action: &Action<Self::Command>);

    /// Steps the action when ready. Returns whether it was performed.
    fn act(&mut self, action: &Action<Self::Command>) -> bool {
        if !self.ready(action) {
            return false;
        }
        self.step(action);
        true
    }
}
