//! Badge state machine and count→color mapping.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RangeColorTable`] | Ordered count ranges → display colors |
//! | [`BadgeController`] | Owns [`BadgeState`] and pushes it to the surface |

// ============================================================================
// Submodules
// ============================================================================

/// Badge state machine and surface updates.
pub mod controller;

/// Count range → color lookup table.
pub mod ranges;

// ============================================================================
// Re-exports
// ============================================================================

pub use controller::{BadgeController, BadgeState, PhrasePicker, RandomPicker};
pub use ranges::{ColorRange, RangeColorTable};
