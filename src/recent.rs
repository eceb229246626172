//! Bounded history of recently committed colors

use crate::convert::is_valid;
use std::collections::VecDeque;

/// Default number of remembered colors
pub const DEFAULT_CAPACITY: usize = 20;

/// Most-recent-first list of distinct adjacent colors.
///
/// Only an entry equal to the current front is suppressed; a color may
/// appear more than once further back.
#[derive(Debug, Clone)]
pub struct RecentColors {
    entries: VecDeque<String>,
    capacity: usize,
}

impl RecentColors {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    /// Push `color` to the front if it is valid and differs from the front.
    ///
    /// Returns whether the color was recorded.
    pub fn record(&mut self, color: &str) -> bool {
        if !is_valid(color) || self.entries.front().is_some_and(|front| front == color) {
            return false;
        }
        self.entries.push_front(color.to_string());
        self.entries.truncate(self.capacity);
        true
    }

    /// Snapshot, most recent first
    pub fn history(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RecentColors {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_most_recent_first() {
        let mut recent = RecentColors::new();
        assert!(recent.record("#ff0000"));
        assert!(recent.record("#00ff00"));
        assert_eq!(recent.history(), vec!["#00ff00", "#ff0000"]);
    }

    #[test]
    fn test_adjacent_duplicate_suppressed() {
        let mut recent = RecentColors::new();
        recent.record("#ff0000");
        assert!(!recent.record("#ff0000"));
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn test_non_adjacent_duplicate_kept() {
        let mut recent = RecentColors::new();
        recent.record("#ff0000");
        recent.record("#00ff00");
        assert!(recent.record("#ff0000"));
        assert_eq!(recent.history(), vec!["#ff0000", "#00ff00", "#ff0000"]);
    }

    #[test]
    fn test_invalid_color_ignored() {
        let mut recent = RecentColors::new();
        assert!(!recent.record("rgb(999, 0, 0)"));
        assert!(!recent.record(""));
        assert!(recent.is_empty());
    }

    #[test]
    fn test_capped_at_capacity() {
        let mut recent = RecentColors::new();
        for i in 0..30u8 {
            recent.record(&format!("rgb({}, 0, 0)", i));
        }
        assert_eq!(recent.len(), DEFAULT_CAPACITY);
        assert_eq!(recent.history()[0], "rgb(29, 0, 0)");
        assert_eq!(recent.history()[19], "rgb(10, 0, 0)");
    }

    #[test]
    fn test_custom_capacity() {
        let mut recent = RecentColors::with_capacity(2);
        recent.record("#000001");
        recent.record("#000002");
        recent.record("#000003");
        assert_eq!(recent.history(), vec!["#000003", "#000002"]);
        assert_eq!(RecentColors::with_capacity(0).capacity(), 1);
    }
}
