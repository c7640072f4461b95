//! Built-in default settings.
//!
//! Used whenever the store is missing a key, holds a mistyped value, or
//! fails outright. Constructed once and shared by reference; no global
//! mutable state.

use super::ConflictAction;

// ============================================================================
// Constants
// ============================================================================

/// Default badge tooltip when no count is showing.
pub const DEFAULT_TITLE: &str = "Download content from open tabs";

/// Close tabs after a successful download by default.
pub const CLOSE_AFTER_SAVE: bool = true;

/// Rename colliding filenames by default.
pub const CONFLICT_ACTION: ConflictAction = ConflictAction::Uniquify;

/// No save dialog by default.
pub const SAVE_AS: bool = false;

/// File extensions eligible for download by default.
pub const FILE_TYPES: &[&str] = &[
    "apng", "avi", "bmp", "csv", "flac", "gif", "htm", "html", "jpeg", "jpg", "md", "mkv", "mp3",
    "mp4", "mpeg", "mpg", "oga", "ogg", "ogm", "ogv", "pdf", "png", "svg", "txt", "wav", "wbp",
    "webm", "webp", "xml",
];

// ============================================================================
// Helpers
// ============================================================================

/// Returns the default file-type list as owned strings.
#[must_use]
pub fn file_types() -> Vec<String> {
    FILE_TYPES.iter().map(|s| (*s).to_string()).collect()
}

// ============================================================================
// Tests
// ============================================================================
