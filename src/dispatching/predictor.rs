//! Frequency-based hotspot prediction.
//!
//! Counts incidents per location. The predicted hotspot is the location
//! with the strictly highest count. Locations are scanned in the order they
//! were first recorded, so on a tie the location recorded first wins.

use std::collections::HashMap;

/// Incident counter per location.
#[derive(Debug, Clone, Default)]
pub struct HotspotPredictor {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl HotspotPredictor {
    /// Creates an empty predictor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one incident at `location`. Empty locations are ignored.
    pub fn record(&mut self, location: &str) {
        if location.is_empty() {
            return;
        }
        match self.index.get(location) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(location.to_string(), self.counts.len());
                self.counts.push((location.to_string(), 1));
            }
        }
    }

    /// Location with the most recorded incidents, or `None` if nothing has
    /// been recorded yet.
    pub fn predict(&self) -> Option<&str> {
        let mut best: Option<(&str, u64)> = None;
        for (location, count) in &self.counts {
            if best.map_or(true, |(_, max)| *count > max) {
                best = Some((location.as_str(), *count));
            }
        }
        best.map(|(location, _)| location)
    }

    /// Incidents recorded at `location`.
    pub fn count(&self, location: &str) -> u64 {
        self.index.get(location).map_or(0, |&i| self.counts[i].1)
    }

    /// Total incidents recorded.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_predicts_none() {
        let p = HotspotPredictor::new();
        assert_eq!(p.predict(), None);
        assert_eq!(p.total(), 0);
    }

    #[test]
    fn test_highest_count_wins() {
        let mut p = HotspotPredictor::new();
        for loc in ["A", "B", "B", "C", "B", "A"] {
            p.record(loc);
        }
        assert_eq!(p.predict(), Some("B"));
        assert_eq!(p.count("B"), 3);
        assert_eq!(p.count("Z"), 0);
        assert_eq!(p.total(), 6);
    }

    #[test]
    fn test_tie_keeps_first_recorded() {
        let mut p = HotspotPredictor::new();
        for loc in ["C", "A", "A", "C"] {
            p.record(loc);
        }
        assert_eq!(p.predict(), Some("C"));

        p.record("A");
        assert_eq!(p.predict(), Some("A"));
    }

    #[test]
    fn test_empty_location_ignored() {
        let mut p = HotspotPredictor::new();
        p.record("");
        assert_eq!(p.predict(), None);
        assert_eq!(p.total(), 0);
    }
}
