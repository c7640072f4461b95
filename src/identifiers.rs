//! Type-safe identifiers for browser entities.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time:
//! a [`TabId`] can never be passed where a [`WindowId`] is expected.
//!
//! Tab and window IDs come from the host environment and are never zero;
//! they wrap [`NonZeroU32`] so `Option<TabId>` stays pointer-sized.
//! [`DownloadId`] identifies an issued download request and is generated
//! host-side per request.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// TabId
// ============================================================================

/// Identifier for a browser tab.
///
/// Stable for the tab's lifetime; used as the key for download intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(NonZeroU32);

impl TabId {
    /// Creates a tab ID from a raw value.
    ///
    /// Returns `None` if `id` is zero.
    #[inline]
    #[must_use]
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the raw ID value.
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// WindowId
// ============================================================================

/// Identifier for a browser window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(NonZeroU32);

impl WindowId {
    /// Creates a window ID from a raw value.
    ///
    /// Returns `None` if `id` is zero.
    #[inline]
    #[must_use]
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the raw ID value.
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// DownloadId
// ============================================================================

/// Identifier for an issued download request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadId(Uuid);

impl DownloadId {
    /// Generates a fresh download ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DownloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for DownloadId {
    fn default() -> Self {
        Self::generate()
    }
}

// ============================================================================
// Tests
// ============================================================================
