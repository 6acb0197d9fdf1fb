use super::projection::{project, View};
use std::sync::RwLock;

/// Where rendered views end up
pub trait DisplaySurface: Send + Sync {
    /// Replace whatever is displayed with `view`
    fn render(&self, view: &View<'_>);
}

/// Prints the full view between two rules
pub struct ConsoleSurface;

impl DisplaySurface for ConsoleSurface {
    fn render(&self, view: &View<'_>) {
        let frame = project(view);
        if !frame.is_empty() {
            println!("\n──────────────\n{frame}\n──────────────");
        }
    }
}

/// Keeps the latest rendered frame for later retrieval (HTTP view endpoint)
#[derive(Default)]
pub struct SnapshotSurface {
    frame: RwLock<String>,
}

impl SnapshotSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> String {
        match self.frame.read() {
            Ok(frame) => frame.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DisplaySurface for SnapshotSurface {
    fn render(&self, view: &View<'_>) {
        let rendered = project(view);
        match self.frame.write() {
            Ok(mut frame) => *frame = rendered,
            Err(poisoned) => *poisoned.into_inner() = rendered,
        }
    }
}
