//! Pending command queue.
//!
//! Commands are produced by the transport (WebSocket / HTTP handlers, the
//! serial console) and consumed by the main control loop, which drains
//! the queue once per iteration in arrival order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ WebSocket   │────▶│              │     │              │
//! │ HTTP        │────▶│ CommandQueue │────▶│  Main Loop   │
//! │ Console     │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The queue is an owned value living in the control loop; producers on
//! other tasks hand commands over through a
//! [`CommandSource`](crate::app::ports::CommandSource) that is polled from
//! the same loop.

use heapless::Deque;
use log::warn;

use crate::app::commands::Command;

/// Maximum number of pending commands per loop iteration.
pub const COMMAND_QUEUE_CAP: usize = 16;

#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Deque<Command, COMMAND_QUEUE_CAP>,
    dropped: u32,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            pending: Deque::new(),
            dropped: 0,
        }
    }

    /// Enqueue a command.
    /// Returns `false` if the queue is full (command dropped).
    pub fn push(&mut self, command: Command) -> bool {
        match self.pending.push_back(command) {
            Ok(()) => true,
            Err(command) => {
                self.dropped = self.dropped.wrapping_add(1);
                warn!("queue: full, dropped '{}' command", command.kind());
                false
            }
        }
    }

    /// Pop the oldest command.
    pub fn pop(&mut self) -> Option<Command> {
        self.pending.pop_front()
    }

    /// Drain all pending commands into a callback, oldest first.
    pub fn drain(&mut self, mut handler: impl FnMut(Command)) {
        while let Some(command) = self.pop() {
            handler(command);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Commands dropped on a full queue since boot.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
