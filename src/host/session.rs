//! Browsing session contract: window lookup, tab listing, tab removal.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identifiers::{TabId, WindowId};

// ============================================================================
// TabStatus
// ============================================================================

/// Load status of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    /// The tab is still loading.
    Loading,
    /// The tab has finished loading.
    Complete,
}

// ============================================================================
// TabInfo
// ============================================================================

/// Snapshot of a tab's state at query time.
///
/// Transient: built for a single workflow run and discarded. The `id` is
/// stable for the tab's lifetime and keys download intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    /// Tab ID.
    pub id: TabId,
    /// Current URL.
    pub url: String,
    /// Whether this is the tab the user is currently viewing.
    pub active: bool,
    /// Whether the tab is selected (multi-select in the tab strip).
    pub selected: bool,
    /// Whether the tab is currently playing audio.
    pub audible: bool,
    /// Load status.
    pub status: TabStatus,
}

impl TabInfo {
    /// Creates a completed, silent, unfocused tab snapshot.
    ///
    /// Handy baseline for hosts and tests; flip flags with the `with_*`
    /// methods.
    #[must_use]
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            active: false,
            selected: false,
            audible: false,
            status: TabStatus::Complete,
        }
    }

    /// Marks the tab as the one currently being viewed.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Marks the tab as selected in the tab strip.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Marks the tab as playing audio.
    #[must_use]
    pub fn with_audible(mut self, audible: bool) -> Self {
        self.audible = audible;
        self
    }

    /// Sets the load status.
    #[must_use]
    pub fn with_status(mut self, status: TabStatus) -> Self {
        self.status = status;
        self
    }
}

// ============================================================================
// BrowserSession
// ============================================================================

/// Asynchronous access to the host's windows and tabs.
///
/// The focused window can change between events, so the engine re-resolves
/// it on every query and never caches the result.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Resolves the currently focused browsing window.
    ///
    /// # Errors
    ///
    /// Returns an error if no window is focused or the session is gone.
    async fn current_window(&self) -> Result<WindowId>;

    /// Lists all tabs in the given window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window no longer exists.
    async fn tabs_in_window(&self, window: WindowId) -> Result<Vec<TabInfo>>;

    /// Closes a tab.
    ///
    /// # Errors
    ///
    /// Returns an error if the tab no longer exists.
    async fn remove_tab(&self, tab: TabId) -> Result<()>;
}

// ============================================================================
// Tests
// ============================================================================
