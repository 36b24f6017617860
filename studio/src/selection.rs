//! Mirror of the drawing surface's multi-selection.
//!
//! Every selection-changed event replaces the tracked selection wholesale;
//! nothing is merged across events. Non-polygonal features are dropped on the
//! way in.

use crate::algorithms::merge::MIN_MERGE_SELECTION;
use crate::geometry::area::{feature_area, AreaMetric};
use crate::model::Feature;
use crate::surface::{ButtonColor, ButtonState};
use std::fmt;

#[derive(Clone, Debug, Default)]
pub struct SelectionTracker {
    selection: Vec<Feature>,
    metric: AreaMetric,
}

impl SelectionTracker {
    pub fn new(metric: AreaMetric) -> Self {
        SelectionTracker { selection: Vec::new(), metric }
    }

    /// Replace the selection. Returns how many of `features` were kept.
    pub fn replace(&mut self, features: Vec<Feature>) -> usize {
        let offered = features.len();
        self.selection = features.into_iter().filter(Feature::is_polygonal).collect();
        if self.selection.len() != offered {
            tracing::debug!(offered, kept = self.selection.len(), "non-polygon selection dropped");
        }
        self.selection.len()
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn features(&self) -> &[Feature] {
        &self.selection
    }

    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    pub fn can_merge(&self) -> bool {
        self.selection.len() >= MIN_MERGE_SELECTION
    }

    /// Enablement and color for the merge controls.
    pub fn affordance(&self) -> ButtonState {
        if self.can_merge() {
            ButtonState { enabled: true, color: ButtonColor::Black }
        } else {
            ButtonState { enabled: false, color: ButtonColor::Grey }
        }
    }

    pub fn stats(&self) -> SelectionStats {
        SelectionStats {
            count: self.selection.len(),
            area: self.selection.iter().map(|f| feature_area(f, self.metric)).sum(),
        }
    }
}

/// Summary shown next to the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionStats {
    pub count: usize,
    pub area: f64,
}

impl fmt::Display for SelectionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            f.write_str("There is no area selected at the moment.")
        } else {
            write!(f, "The selected area is {} sqm.", self.area)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Geometry;

    fn unit_square(x: f64) -> Feature {
        Feature::polygon(vec![vec![[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0], [x, 0.0]]])
    }

    #[test]
    fn empty_selection_has_distinct_message() {
        let t = SelectionTracker::new(AreaMetric::Planar);
        assert_eq!(t.stats().to_string(), "There is no area selected at the moment.");
        assert!(!t.affordance().enabled);
        assert_eq!(t.affordance().color, ButtonColor::Grey);
    }

    #[test]
    fn replace_filters_and_sums_area() {
        let mut t = SelectionTracker::new(AreaMetric::Planar);
        let point = Feature::new(Geometry::Point { coordinates: [0.0, 0.0] });
        assert_eq!(t.replace(vec![unit_square(0.0), point, unit_square(5.0)]), 2);
        let stats = t.stats();
        assert_eq!(stats.count, 2);
        assert!((stats.area - 2.0).abs() < 1e-12);
        assert_eq!(stats.to_string(), "The selected area is 2 sqm.");
        assert!(t.affordance().enabled);
        assert_eq!(t.affordance().color, ButtonColor::Black);
    }

    #[test]
    fn replace_is_wholesale() {
        let mut t = SelectionTracker::new(AreaMetric::Planar);
        t.replace(vec![unit_square(0.0), unit_square(2.0)]);
        t.replace(vec![unit_square(4.0)]);
        assert_eq!(t.len(), 1);
        assert!(!t.can_merge());
    }
}
