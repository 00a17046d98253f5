//! World event notifications.
//!
//! ## Learning: Observer Pattern in Rust
//!
//! The world never holds references to whoever watches it (a visualizer,
//! a recorder, a test). Instead it broadcasts owned [`WorldEvent`] values
//! on a `tokio::sync::broadcast` channel:
//! - Sending is synchronous and never blocks, so the world stays a plain
//!   single-threaded state machine
//! - Having no subscribers is fine
//! - A slow subscriber lags and skips events; it never stalls the world

use textworld_api::UnitId;
use tokio::sync::broadcast;

/// Things that happen in a text world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldEvent {
    /// The world was reset to an empty tree
    Reset,
    /// An actor was created
    ActorCreated(UnitId),
    /// A directory or file was created
    ItemCreated { id: UnitId, parent: UnitId },
    /// An actor moved onto another item
    ItemEntered { actor: UnitId, item: UnitId },
    /// An actor moved a cursor without changing items
    CursorMoved { actor: UnitId },
    /// An actor edited a file
    ContentChanged { actor: UnitId, file: UnitId },
}

/// Event bus for broadcasting world events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<WorldEvent>,
}

impl EventBus {
    /// Creates an event bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Emits an event to all subscribers.
    pub fn emit(&self, event: WorldEvent) {
        // No receivers is not an error
        let _ = self.sender.send(event);
    }

    /// Subscribes to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<WorldEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Helper for consuming events asynchronously.
///
/// ## Example
///
/// ```ignore
/// let mut handler = EventHandler::new(world.subscribe());
///
/// tokio::spawn(async move {
///     while let Some(event) = handler.next().await {
///         if let WorldEvent::ContentChanged { file, .. } = event {
///             // redraw the file
///         }
///     }
/// });
/// ```
pub struct EventHandler {
    receiver: broadcast::Receiver<WorldEvent>,
}

impl EventHandler {
    /// Creates a new event handler.
    pub fn new(receiver: broadcast::Receiver<WorldEvent>) -> Self {
        Self { receiver }
    }

    /// Waits for the next event. Returns `None` once the world is dropped.
    pub async fn next(&mut self) -> Option<WorldEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next buffered event without waiting.
    pub fn try_next(&mut self) -> Option<WorldEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!("Event handler lagged, missed {} events", n);
                    continue;
                }
                Err(_) => return None,
            }
        }
    }
}
