//! Badge state machine.
//!
//! The badge is the only entity with continuity between workflow runs.
//! [`BadgeController`] owns the authoritative [`BadgeState`] and pushes
//! every transition to the host's [`BadgeSurface`]. Transitions are total:
//! any count and any error message maps to exactly one next state.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use rand::Rng;
use tracing::{debug, info};

use crate::badge::RangeColorTable;
use crate::config::defaults::DEFAULT_TITLE;
use crate::host::BadgeSurface;

// ============================================================================
// Constants
// ============================================================================

/// Error background color; distinct from every range-table entry so the
/// error state is visually unambiguous.
const ERROR_COLOR: &str = "#f44336";

/// Interjections prefixed to error tooltips.
const INTERJECTIONS: &[&str] = &[
    "Woops!",
    "Oh no!",
    "Ah crud.",
    "Yikes!",
    "Aw shucks!",
    "Bad news...",
];

// ============================================================================
// BadgeState
// ============================================================================

/// The badge's current state; exactly one variant at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeState {
    /// No qualifying tabs: text cleared, default tooltip.
    Idle,
    /// Showing a positive tab count.
    Counting {
        /// Number of qualifying tabs.
        count: usize,
        /// Background color for the count.
        color: String,
    },
    /// Showing an error.
    Error {
        /// Full tooltip text, interjection included.
        title: String,
    },
}

// ============================================================================
// PhrasePicker
// ============================================================================

/// Randomness source for interjection selection.
///
/// Injectable so tests can pin the choice.
pub trait PhrasePicker: Send + Sync {
    /// Picks an index in `0..len`. `len` is always positive.
    fn pick(&self, len: usize) -> usize;
}

/// Default picker using the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl PhrasePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

// ============================================================================
// BadgeController
// ============================================================================

/// Owns the badge state and drives the host surface.
pub struct BadgeController {
    /// The host's indicator surface.
    surface: Arc<dyn BadgeSurface>,
    /// Count → color mapping.
    ranges: RangeColorTable,
    /// Interjection randomness source.
    picker: Box<dyn PhrasePicker>,
    /// Current state.
    state: Mutex<BadgeState>,
}

impl BadgeController {
    /// Creates a controller in the [`BadgeState::Idle`] state.
    ///
    /// The initial state is not pushed to the surface; the first workflow
    /// run establishes the visible state.
    #[must_use]
    pub fn new(
        surface: Arc<dyn BadgeSurface>,
        ranges: RangeColorTable,
        picker: Box<dyn PhrasePicker>,
    ) -> Self {
        Self {
            surface,
            ranges,
            picker,
            state: Mutex::new(BadgeState::Idle),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> BadgeState {
        self.state.lock().clone()
    }
}

// ============================================================================
// BadgeController - Transitions
// ============================================================================

impl BadgeController {
    /// Publishes a tab count.
    ///
    /// Zero transitions to `Idle`; anything positive transitions to
    /// `Counting` with the matching range color. Counts beyond the top
    /// range fall back to the lightest-load color.
    pub fn update(&self, count: usize) {
        if count == 0 {
            self.reset();
            return;
        }

        let color = u32::try_from(count)
            .ok()
            .and_then(|n| self.ranges.color_for(n))
            .unwrap_or_else(|| self.ranges.fallback_color())
            .to_string();

        let title = format!(
            "Download {count} item{} from open tabs",
            if count == 1 { "" } else { "s" }
        );

        self.surface.set_text(&count.to_string());
        self.surface.set_title(&title);
        self.surface.set_background_color(&color);

        debug!(count, %color, "Badge counting");
        *self.state.lock() = BadgeState::Counting { count, color };
    }

    /// Transitions to `Idle`: clears the text and restores the default
    /// title. The background color is left untouched — it only carries
    /// meaning while counting. Idempotent.
    pub fn reset(&self) {
        self.surface.set_text("");
        self.surface.set_title(DEFAULT_TITLE);

        debug!("Badge idle");
        *self.state.lock() = BadgeState::Idle;
    }

    /// Transitions to `Error` regardless of the current state.
    ///
    /// The text becomes a single exclamation mark and the tooltip a random
    /// interjection followed by `message`.
    pub fn set_error(&self, message: &str) {
        let index = self.picker.pick(INTERJECTIONS.len());
        let interjection = INTERJECTIONS.get(index).copied().unwrap_or(INTERJECTIONS[0]);
        let title = format!("{interjection} {message}");

        self.surface.set_text("!");
        self.surface.set_title(&title);
        self.surface.set_background_color(ERROR_COLOR);

        info!(%title, "Badge error");
        *self.state.lock() = BadgeState::Error { title };
    }
}

// ============================================================================
// Tests
// ============================================================================
