//! Count range → color lookup table.
//!
//! The badge background color reflects how heavy the pending download load
//! is. Ranges are inclusive on both ends, ordered ascending, and gap-free:
//! each range starts exactly one past the previous range's end. The first
//! range containing the count wins; a count below every range means the
//! badge is idle, not an error.

// ============================================================================
// Imports
// ============================================================================

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default table, light loads to heavy: blue, indigo, purple, pink, orange.
const DEFAULT_RANGES: &[(u32, u32, &str)] = &[
    (1, 12, "#2196f3"),
    (13, 25, "#3f51b5"),
    (26, 40, "#5e35b1"),
    (41, 59, "#e91e63"),
    (60, 9999, "#ef6c00"),
];

// ============================================================================
// ColorRange
// ============================================================================

/// One inclusive count interval mapped to a display color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRange {
    /// Least count in the range.
    pub min: u32,
    /// Greatest count in the range.
    pub max: u32,
    /// CSS hex color shown for counts in the range.
    pub color: String,
}

impl ColorRange {
    /// Creates a range.
    #[must_use]
    pub fn new(min: u32, max: u32, color: impl Into<String>) -> Self {
        Self {
            min,
            max,
            color: color.into(),
        }
    }

    /// Checks whether `count` falls inside the range, bounds included.
    #[inline]
    #[must_use]
    pub fn contains(&self, count: u32) -> bool {
        count >= self.min && count <= self.max
    }
}

// ============================================================================
// RangeColorTable
// ============================================================================

/// Ordered, validated list of count ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeColorTable {
    /// Ranges, ascending and gap-free.
    ranges: Vec<ColorRange>,
}

impl RangeColorTable {
    /// Creates a table from authored ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColorRanges`] if the list is empty, a range
    /// is inverted, or consecutive ranges overlap or leave a gap
    /// (`min(i+1)` must equal `max(i) + 1`).
    pub fn new(ranges: Vec<ColorRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::invalid_color_ranges("table must not be empty"));
        }

        for range in &ranges {
            if range.min > range.max {
                return Err(Error::invalid_color_ranges(format!(
                    "inverted range [{}, {}]",
                    range.min, range.max
                )));
            }
        }

        for pair in ranges.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.min != prev.max + 1 {
                return Err(Error::invalid_color_ranges(format!(
                    "range [{}, {}] must start at {}",
                    next.min,
                    next.max,
                    prev.max + 1
                )));
            }
        }

        Ok(Self { ranges })
    }

    /// Looks up the color for a tab count; first inclusive match wins.
    ///
    /// Returns `None` when no range contains the count (idle territory
    /// below the table, or beyond its top end).
    #[must_use]
    pub fn color_for(&self, count: u32) -> Option<&str> {
        self.ranges
            .iter()
            .find(|range| range.contains(count))
            .map(|range| range.color.as_str())
    }

    /// Returns the lightest-load color, used as the fallback when a count
    /// exceeds every authored range.
    #[must_use]
    pub fn fallback_color(&self) -> &str {
        // Validation guarantees at least one range.
        self.ranges.first().map_or("#2196f3", |r| r.color.as_str())
    }

    /// Returns the authored ranges.
    #[inline]
    #[must_use]
    pub fn ranges(&self) -> &[ColorRange] {
        &self.ranges
    }
}

impl Default for RangeColorTable {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_RANGES
                .iter()
                .map(|&(min, max, color)| ColorRange::new(min, max, color))
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_default_table_is_valid() {
        let table = RangeColorTable::default();
        assert!(RangeColorTable::new(table.ranges().to_vec()).is_ok());
    }

    #[test]
    fn test_first_range_lookup() {
        let table = RangeColorTable::default();
        assert_eq!(table.color_for(5), Some("#2196f3"));
    }

    #[test]
    fn test_inclusive_boundaries() {
        let table = RangeColorTable::default();
        assert_eq!(table.color_for(12), Some("#2196f3"));
        assert_eq!(table.color_for(13), Some("#3f51b5"));
        assert_eq!(table.color_for(60), Some("#ef6c00"));
        assert_eq!(table.color_for(9999), Some("#ef6c00"));
    }

    #[test]
    fn test_out_of_table_counts() {
        let table = RangeColorTable::default();
        assert_eq!(table.color_for(0), None);
        assert_eq!(table.color_for(10_000), None);
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(RangeColorTable::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_gap() {
        let ranges = vec![
            ColorRange::new(1, 10, "#111111"),
            ColorRange::new(12, 20, "#222222"),
        ];
        assert!(RangeColorTable::new(ranges).is_err());
    }

    #[test]
    fn test_rejects_overlap() {
        let ranges = vec![
            ColorRange::new(1, 10, "#111111"),
            ColorRange::new(10, 20, "#222222"),
        ];
        assert!(RangeColorTable::new(ranges).is_err());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let ranges = vec![ColorRange::new(10, 1, "#111111")];
        assert!(RangeColorTable::new(ranges).is_err());
    }

    proptest! {
        #[test]
        fn prop_every_in_table_count_has_exactly_one_range(count in 1u32..=9999) {
            let table = RangeColorTable::default();
            let matching = table
                .ranges()
                .iter()
                .filter(|r| r.contains(count))
                .count();
            prop_assert_eq!(matching, 1);
        }
    }
}
