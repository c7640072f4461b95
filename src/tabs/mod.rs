//! Tab filtering: URL match patterns and the window-scoped tab query.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PatternSet`] | Compiled URL match patterns for a file-type set |
//! | [`TabQueryService`] | Focused-window query with status/audio/URL filters |

// ============================================================================
// Submodules
// ============================================================================

/// File-type → URL pattern compilation and matching.
pub mod patterns;

/// Focused-window tab query.
pub mod query;

// ============================================================================
// Re-exports
// ============================================================================

pub use patterns::{PatternSet, compile};
pub use query::TabQueryService;
