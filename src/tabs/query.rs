//! Focused-window tab query.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::host::{BrowserSession, TabInfo, TabStatus};

use super::PatternSet;

// ============================================================================
// TabQueryService
// ============================================================================

/// Retrieves the subset of open tabs eligible for download.
///
/// A tab qualifies when it lives in the currently focused window, is not
/// playing audio, has finished loading, and its URL matches the supplied
/// pattern set.
pub struct TabQueryService {
    /// The browsing session service.
    session: Arc<dyn BrowserSession>,
}

impl TabQueryService {
    /// Creates a query service over the given session.
    #[must_use]
    pub fn new(session: Arc<dyn BrowserSession>) -> Self {
        Self { session }
    }

    /// Queries qualifying tabs in the focused window.
    ///
    /// The focused window is re-resolved on every call — it can change
    /// between events, so the result is never cached. An empty pattern set
    /// short-circuits to an empty result without touching the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the window lookup or tab listing fails.
    pub async fn query(&self, patterns: &PatternSet) -> Result<Vec<TabInfo>> {
        if patterns.is_empty() {
            return Ok(Vec::new());
        }

        let window = self.session.current_window().await?;
        let tabs = self.session.tabs_in_window(window).await?;
        let total = tabs.len();

        let matched: Vec<TabInfo> = tabs
            .into_iter()
            .filter(|tab| {
                !tab.audible && tab.status == TabStatus::Complete && patterns.matches(&tab.url)
            })
            .collect();

        debug!(
            %window,
            total,
            matched = matched.len(),
            "Tab query completed"
        );

        Ok(matched)
    }
}

// ============================================================================
// Tests
// ============================================================================
