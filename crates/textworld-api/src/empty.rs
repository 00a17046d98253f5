//! A world with nothing in it.
//!
//! Used where a [`World`] is required but no environment interaction is
//! needed, e.g. when exercising orchestration code on its own.

use serde_json::Value;

use crate::{Action, CycleFn, Image, Touch, UnitId, World, WorldResult};

/// No-op implementation of [`World`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWorld;

impl World for EmptyWorld {
    type Command = ();

    fn name(&self) -> &str {
        "empty"
    }

    fn reset(&mut self) {}

    fn tick(&mut self) {}

    fn new_actor(&mut self, _args: &[Value]) -> (UnitId, Vec<Action<()>>) {
        (UnitId::default(), Vec::new())
    }

    fn register(&mut self, _actor: UnitId, _cycle: CycleFn<Self>) -> WorldResult<()> {
        Ok(())
    }

    fn look(&self, _actor: UnitId) -> Vec<Image> {
        Vec::new()
    }

    fn feel(&self, _actor: UnitId) -> Vec<Touch> {
        Vec::new()
    }

    fn cmd(&mut self, args: &[Value]) -> WorldResult<()> {
        tracing::trace!("Empty world ignoring cmd with {} args", args.len());
        Ok(())
    }

    fn ready(&self, _action: &Action<()>) -> bool {
        false
    }

    fn step(&mut self, _action: &Action<()>) {}
}
