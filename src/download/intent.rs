//! Download intent construction.
//!
//! An intent is the computed decision to download one tab's URL and whether
//! to close that tab afterward. Intents are transient: built from a fresh
//! query, consumed by the dispatcher, discarded.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use tracing::warn;
use url::Url;

use crate::config::Config;
use crate::host::TabInfo;
use crate::identifiers::TabId;

// ============================================================================
// Types
// ============================================================================

/// A decided download for one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadIntent {
    /// The source tab.
    pub tab_id: TabId,
    /// URL to download.
    pub url: String,
    /// Close the source tab once its download succeeds.
    pub close_after_download: bool,
}

/// Intents keyed by source tab.
pub type IntentMap = FxHashMap<TabId, DownloadIntent>;

// ============================================================================
// Construction
// ============================================================================

/// Builds the intent map for a set of queried tabs.
///
/// The tab the user is looking at is never auto-closed:
/// `close_after_download` is true only when `close_after_save` is enabled
/// **and** the tab is neither active nor selected. Tabs whose URL does not
/// parse are skipped — the host could not download them anyway.
#[must_use]
pub fn build_intents(tabs: &[TabInfo], config: &Config) -> IntentMap {
    let mut intents = IntentMap::default();

    for tab in tabs {
        if Url::parse(&tab.url).is_err() {
            warn!(tab_id = %tab.id, url = %tab.url, "Skipping tab with unparsable URL");
            continue;
        }

        let viewing = tab.active || tab.selected;
        intents.insert(
            tab.id,
            DownloadIntent {
                tab_id: tab.id,
                url: tab.url.clone(),
                close_after_download: config.close_after_save && !viewing,
            },
        );
    }

    intents
}

// ============================================================================
// Tests
// ============================================================================
