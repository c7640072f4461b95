//! Download intents and dispatch.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DownloadIntent`] | A decided download: URL + close-afterward flag |
//! | [`DownloadDispatcher`] | Fire-and-forget per-intent dispatch |

// ============================================================================
// Submodules
// ============================================================================

/// Per-intent dispatch with recount feedback.
pub mod dispatcher;

/// Download intent construction.
pub mod intent;

// ============================================================================
// Re-exports
// ============================================================================

pub use dispatcher::{DownloadDispatcher, RecountHandle, RecountRequest};
pub use intent::{DownloadIntent, IntentMap, build_intents};
