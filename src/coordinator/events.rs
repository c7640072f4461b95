//! Environment events and their debounce bindings.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

// ============================================================================
// EnvironmentEvent
// ============================================================================

/// Something changed in the host environment.
///
/// Events carry no payload beyond their kind; every workflow re-derives
/// state from a fresh query, so the payload would be stale by the time the
/// debounce window closes anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentEvent {
    /// The user clicked the action control.
    ActionClicked,
    /// A tab was created.
    TabCreated,
    /// A tab finished a navigation or state change.
    TabUpdated,
    /// A tab was detached from a window.
    TabDetached,
    /// A tab was attached to a window.
    TabAttached,
    /// A tab was removed.
    TabRemoved,
    /// The host started up.
    Startup,
}

impl EnvironmentEvent {
    /// Returns the event name for logging.
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ActionClicked => "action-clicked",
            Self::TabCreated => "tab-created",
            Self::TabUpdated => "tab-updated",
            Self::TabDetached => "tab-detached",
            Self::TabAttached => "tab-attached",
            Self::TabRemoved => "tab-removed",
            Self::Startup => "startup",
        }
    }
}

impl fmt::Display for EnvironmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// DebounceWaits
// ============================================================================

/// Quiet periods per event binding.
///
/// Each binding owns its own timer; these only set the durations. Startup
/// has no entry because it recounts immediately, undebounced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceWaits {
    /// Action-click → collect-and-download.
    pub action_clicked: Duration,
    /// Tab-created → recount.
    pub tab_created: Duration,
    /// Tab-updated → recount.
    pub tab_updated: Duration,
    /// Tab-detached → recount.
    pub tab_detached: Duration,
    /// Tab-attached → recount.
    pub tab_attached: Duration,
    /// Tab-removed → recount.
    pub tab_removed: Duration,
    /// Download-completion → recount (after closing a tab).
    pub completion: Duration,
}

impl Default for DebounceWaits {
    fn default() -> Self {
        Self {
            action_clicked: Duration::from_millis(1000),
            tab_created: Duration::from_millis(600),
            tab_updated: Duration::from_millis(1000),
            tab_detached: Duration::from_millis(1000),
            tab_attached: Duration::from_millis(1000),
            tab_removed: Duration::from_millis(1000),
            completion: Duration::from_millis(800),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
