//! Error types for the tab download engine.
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use tab_downloader::{Result, Error};
//!
//! async fn example(service: &TabQueryService) -> Result<()> {
//!     let tabs = service.query(&patterns).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::Store`], [`Error::InvalidColorRanges`] |
//! | Patterns | [`Error::Pattern`] |
//! | Session | [`Error::Session`], [`Error::TabNotFound`] |
//! | Downloads | [`Error::Download`], [`Error::NoDownloadableTabs`] |
//!
//! Errors never cross a workflow boundary: the coordinator terminates every
//! failure in a default-value substitution, a `warn` log, or a badge error
//! transition (see `BadgeController::set_error`).

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::TabId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Engine configuration error.
    ///
    /// Returned when coordinator construction is incomplete.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Settings store lookup failed.
    ///
    /// Recovered by the config resolver, which substitutes built-in
    /// defaults; hosts only surface this through trait implementations.
    #[error("Settings store error: {message}")]
    Store {
        /// Description of the store failure.
        message: String,
    },

    /// A range-color table failed validation.
    ///
    /// Ranges must be ascending, inclusive, and gap-free.
    #[error("Invalid color ranges: {message}")]
    InvalidColorRanges {
        /// Description of the validation failure.
        message: String,
    },

    // ========================================================================
    // Pattern Errors
    // ========================================================================
    /// A URL match pattern failed to compile.
    #[error("Pattern error: {message}")]
    Pattern {
        /// Description of the pattern failure.
        message: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// Browsing session call failed (window lookup, tab listing).
    #[error("Session error: {message}")]
    Session {
        /// Description of the session failure.
        message: String,
    },

    /// Tab not found.
    ///
    /// Returned when a tab disappears between query and removal.
    #[error("Tab not found: {tab_id}")]
    TabNotFound {
        /// The missing tab ID.
        tab_id: TabId,
    },

    // ========================================================================
    // Download Errors
    // ========================================================================
    /// An individual download request failed.
    ///
    /// Handled per-intent; never aborts sibling intents.
    #[error("Download failed for {url}: {message}")]
    Download {
        /// URL of the failed download.
        url: String,
        /// Description of the download failure.
        message: String,
    },

    /// The collect-and-download workflow found zero qualifying tabs.
    ///
    /// Surfaced to the user through the badge error state, non-fatal.
    #[error("There are no downloadable tabs in this window.")]
    NoDownloadableTabs,
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a settings store error.
    #[inline]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Creates an invalid color ranges error.
    #[inline]
    pub fn invalid_color_ranges(message: impl Into<String>) -> Self {
        Self::InvalidColorRanges {
            message: message.into(),
        }
    }

    /// Creates a pattern error.
    #[inline]
    pub fn pattern(message: impl Into<String>) -> Self {
        Self::Pattern {
            message: message.into(),
        }
    }

    /// Creates a session error.
    #[inline]
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// Creates a tab not found error.
    #[inline]
    pub fn tab_not_found(tab_id: TabId) -> Self {
        Self::TabNotFound { tab_id }
    }

    /// Creates a download error.
    #[inline]
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
