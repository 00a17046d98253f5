//! # Textworld API
//!
//! The capability contract every simulated space implements, and the
//! records it uses to talk to the actors living in it.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Orchestration                   │
//! │   new_actor ─► catalog: Vec<Action<C>>        │
//! │   tick ─► cycle fns ─► look / ready / step    │
//! └──────────────────────┬───────────────────────┘
//!                        │ World trait
//!        ┌───────────────┼────────────────┐
//!   ┌────┴─────┐   ┌─────┴──────┐   ┌─────┴─────┐
//!   │EmptyWorld│   │ TextWorld  │   │   ...     │
//!   └──────────┘   └────────────┘   └───────────┘
//! ```
//!
//! ## Learning: Two Tiers of Failure
//!
//! Structural misuse of the API (registering a cycle function for an
//! actor that was never created) comes back as a [`WorldError`]. Asking
//! for an action that is illegal right now is not an error at all:
//! [`World::ready`] answers `false` and [`World::step`] does nothing.

mod action;
mod empty;
mod id;
mod record;
mod world;

pub use action::Action;
pub use empty::EmptyWorld;
pub use id::{UnitId, UnitIds};
pub use record::{Direction, Image, Info, Scalar, Touch, LABEL_OBSERVABLE};
pub use world::{CycleFn, World};

/// Result type for contract-level operations
pub type WorldResult<T> = Result<T, WorldError>;

/// Contract violations raised by worlds and the layers composing them
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("Actor not found: {0}")]
    ActorNotFound(UnitId),

    #[error("Invalid args: {0}")]
    InvalidArgs(String),

    #[error("World not found: {0}")]
    WorldNotFound(String),
}
