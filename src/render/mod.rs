//! Render projection and user-facing surfaces

mod notify;
mod projection;
mod surface;

pub use notify::{ConsoleNotifier, LogNotifier, Notifier};
pub use projection::{format_analysis, project, View};
pub use surface::{ConsoleSurface, DisplaySurface, SnapshotSurface};
