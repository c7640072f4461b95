//! Contracts for the external collaborators the engine drives.
//!
//! The engine never talks to a concrete browser API. Hosts implement these
//! traits over whatever environment they embed the engine in:
//!
//! | Trait | Role |
//! |-------|------|
//! | [`SettingsStore`] | Persistent key-value configuration store |
//! | [`BrowserSession`] | Window/tab lookup and tab removal |
//! | [`DownloadService`] | Download requests + filename-determination hook |
//! | [`BadgeSurface`] | The visual indicator (text, title, color) |
//!
//! All calls may suspend; none may block. Trait objects are shared as
//! `Arc<dyn Trait>` across the engine's spawned tasks.

// ============================================================================
// Submodules
// ============================================================================

/// Visual indicator surface.
pub mod badge;

/// Download service and filename hook types.
pub mod downloads;

/// Browsing session service.
pub mod session;

/// Persistent configuration store.
pub mod store;

// ============================================================================
// Re-exports
// ============================================================================

pub use badge::BadgeSurface;
pub use downloads::{
    DownloadRequest, DownloadService, FilenameItem, FilenameListener, FilenameSuggestion,
};
pub use session::{BrowserSession, TabInfo, TabStatus};
pub use store::SettingsStore;
