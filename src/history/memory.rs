use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::{EntryId, NavigationHistory};

#[derive(Debug, Default)]
struct Inner {
    stack: Vec<EntryId>,
    /// Index of the current position; `None` until the first push/replace.
    cursor: Option<usize>,
}

/// In-process stand-in for the browser history stack.
///
/// Clones share one stack, so the session runtime can push new positions while
/// the embedding host (or a test) drives [`back`](Self::back) and
/// [`forward`](Self::forward). Navigation targets are emitted on the channel
/// returned from [`new`](Self::new); the runtime turns them into fresh
/// generation triggers.
#[derive(Clone)]
pub struct InMemoryHistory {
    inner: Arc<Mutex<Inner>>,
    events: mpsc::UnboundedSender<EntryId>,
}

impl InMemoryHistory {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EntryId>) {
        let (events, rx) = mpsc::unbounded_channel();
        let history = Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            events,
        };
        (history, rx)
    }

    /// Current position id, if any position exists yet.
    pub fn current(&self) -> Option<EntryId> {
        let inner = self.inner.lock();
        inner.cursor.map(|cursor| inner.stack[cursor])
    }

    /// Navigate one position back. Returns the new current id and emits it as
    /// a navigation event. No-op at the oldest position.
    pub fn back(&self) -> Option<EntryId> {
        let target = {
            let mut inner = self.inner.lock();
            let cursor = inner.cursor?;
            if cursor == 0 {
                return None;
            }
            inner.cursor = Some(cursor - 1);
            inner.stack[cursor - 1]
        };
        let _ = self.events.send(target);
        Some(target)
    }

    /// Navigate one position forward. Mirror of [`back`](Self::back).
    pub fn forward(&self) -> Option<EntryId> {
        let target = {
            let mut inner = self.inner.lock();
            let cursor = inner.cursor?;
            if cursor + 1 >= inner.stack.len() {
                return None;
            }
            inner.cursor = Some(cursor + 1);
            inner.stack[cursor + 1]
        };
        let _ = self.events.send(target);
        Some(target)
    }
}

impl NavigationHistory for InMemoryHistory {
    fn push(&mut self, id: EntryId) {
        let mut inner = self.inner.lock();
        // Pushing from a rewound position drops the forward tail, like the
        // browser stack does.
        let insert_at = inner.cursor.map(|cursor| cursor + 1).unwrap_or(0);
        inner.stack.truncate(insert_at);
        inner.stack.push(id);
        inner.cursor = Some(insert_at);
    }

    fn replace(&mut self, id: EntryId) {
        let mut inner = self.inner.lock();
        match inner.cursor {
            Some(cursor) => inner.stack[cursor] = id,
            None => {
                inner.stack.push(id);
                inner.cursor = Some(0);
            }
        }
    }

    fn address(&self) -> String {
        match self.current() {
            Some(id) => format!("/{id}"),
            None => "/".to_string(),
        }
    }
}
