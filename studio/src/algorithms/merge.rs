//! Merging a multi-selection into a single polygon (union, intersect).
//!
//! The selection is folded pairwise through geo's boolean operations. Only a
//! result that is exactly one polygon counts; disjoint unions (several parts),
//! empty intersections and malformed rings all yield `None`, which callers
//! treat as a no-op rather than an error.

use crate::geometry::convert::{polygon_to_rings, to_multi_polygon};
use crate::model::{Feature, Geometry};
use geo::BooleanOps;
use serde::{Deserialize, Serialize};

/// Boolean operation applied across a selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeOp {
    /// Area covered by any selected polygon
    Union,
    /// Area covered by every selected polygon
    Intersect,
}

/// Minimum selection size a merge acts on.
pub const MIN_MERGE_SELECTION: usize = 2;

pub fn merge_features(features: &[Feature], op: MergeOp) -> Option<Geometry> {
    if features.len() < MIN_MERGE_SELECTION {
        tracing::debug!(count = features.len(), ?op, "merge needs at least two features");
        return None;
    }
    let mut parts = features.iter().map(|f| to_multi_polygon(&f.geometry));
    let Some(mut acc) = parts.next().flatten() else {
        tracing::debug!(?op, "first selected feature has no usable rings");
        return None;
    };
    for part in parts {
        let Some(part) = part else {
            tracing::debug!(?op, "selected feature has no usable rings");
            return None;
        };
        acc = match op {
            MergeOp::Union => acc.union(&part),
            MergeOp::Intersect => acc.intersection(&part),
        };
    }
    let mut polygons = acc.0;
    if polygons.len() != 1 {
        tracing::debug!(parts = polygons.len(), ?op, "merge did not produce a single polygon");
        return None;
    }
    let polygon = polygons.pop()?;
    Some(Geometry::Polygon { coordinates: polygon_to_rings(&polygon) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::area::{feature_area, AreaMetric};

    fn square(x: f64, y: f64, size: f64) -> Feature {
        Feature::polygon(vec![vec![
            [x, y],
            [x + size, y],
            [x + size, y + size],
            [x, y + size],
            [x, y],
        ]])
    }

    #[test]
    fn union_of_overlapping_squares_is_one_polygon() {
        let selection = [square(0.0, 0.0, 2.0), square(1.0, 0.0, 2.0)];
        let merged = merge_features(&selection, MergeOp::Union).unwrap();
        let area = feature_area(&Feature::new(merged), AreaMetric::Planar);
        assert!((area - 6.0).abs() < 1e-9, "area {area}");
    }

    #[test]
    fn union_of_disjoint_squares_is_no_result() {
        let disjoint = [square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)];
        assert!(merge_features(&disjoint, MergeOp::Union).is_none());
    }

    #[test]
    fn union_of_three_chains_through_the_middle() {
        let sel = [square(0.0, 0.0, 2.0), square(1.5, 0.0, 2.0), square(3.0, 0.0, 2.0)];
        let merged = merge_features(&sel, MergeOp::Union).unwrap();
        let area = feature_area(&Feature::new(merged), AreaMetric::Planar);
        assert!((area - 10.0).abs() < 1e-9, "area {area}");
    }

    #[test]
    fn intersect_keeps_the_overlap() {
        let selection = [square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)];
        let merged = merge_features(&selection, MergeOp::Intersect).unwrap();
        let area = feature_area(&Feature::new(merged), AreaMetric::Planar);
        assert!((area - 1.0).abs() < 1e-9, "area {area}");
    }

    #[test]
    fn intersect_of_disjoint_is_no_result() {
        let disjoint = [square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0)];
        assert!(merge_features(&disjoint, MergeOp::Intersect).is_none());
    }

    #[test]
    fn fewer_than_two_is_no_result() {
        assert!(merge_features(&[], MergeOp::Union).is_none());
        assert!(merge_features(&[square(0.0, 0.0, 1.0)], MergeOp::Union).is_none());
    }

    #[test]
    fn broken_ring_is_no_result() {
        let broken = Feature::polygon(vec![vec![[0.0, 0.0], [1.0, 1.0]]]);
        assert!(merge_features(&[square(0.0, 0.0, 1.0), broken], MergeOp::Union).is_none());
    }
}
