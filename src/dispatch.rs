//! Synchronous hand-off of engine notifications to the window thread.
//!
//! The engine's IPC reader thread must never mutate the window itself; it
//! enqueues each notification here, wakes the event loop, and blocks until
//! the window thread has drained and applied it. The blocking hand-off keeps
//! the engine's event ordering consistent with the next rendered frame.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::engine::EngineNotification;

struct Completion {
    done: Mutex<bool>,
    cond: Condvar,
}

struct Envelope {
    note: EngineNotification,
    completion: Arc<Completion>,
}

/// Cloneable handle shared between the engine reader thread (producer) and
/// the window thread (consumer).
pub struct Dispatch {
    queue: Arc<Mutex<VecDeque<Envelope>>>,
    waker: Arc<dyn Fn() + Send + Sync>,
}

impl Clone for Dispatch {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            waker: Arc::clone(&self.waker),
        }
    }
}

impl Dispatch {
    /// Create a dispatch whose `waker` nudges the consumer thread (for the
    /// app this posts a user event to the winit loop).
    pub fn new(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            waker: Arc::new(waker),
        }
    }

    /// Enqueue a notification and block until the consumer has applied it.
    pub fn sync(&self, note: EngineNotification) {
        let completion = Arc::new(Completion {
            done: Mutex::new(false),
            cond: Condvar::new(),
        });
        self.queue.lock().push_back(Envelope {
            note,
            completion: Arc::clone(&completion),
        });
        (self.waker)();

        let mut done = completion.done.lock();
        while !*done {
            completion.cond.wait(&mut done);
        }
    }

    /// Drain pending notifications on the consumer thread, signalling each
    /// producer once its notification has been applied.
    pub fn drain(&self, mut apply: impl FnMut(EngineNotification)) {
        loop {
            let envelope = self.queue.lock().pop_front();
            let Some(envelope) = envelope else { break };
            apply(envelope.note);
            *envelope.completion.done.lock() = true;
            envelope.completion.cond.notify_one();
        }
    }
}
