use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Participant chosen by the user, read each time a turn is sent
///
/// Clones share the same selection, so a selector UI can hold one handle
/// while the session reads another.
#[derive(Debug, Clone)]
pub struct ParticipantSelection {
    id: Arc<AtomicI64>,
}

impl ParticipantSelection {
    pub fn new(id: i64) -> Self {
        Self {
            id: Arc::new(AtomicI64::new(id)),
        }
    }

    pub fn select(&self, id: i64) {
        self.id.store(id, Ordering::SeqCst);
    }

    pub fn current(&self) -> i64 {
        self.id.load(Ordering::SeqCst)
    }
}
