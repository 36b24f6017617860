use crate::geometry::convert::to_multi_polygon;
use crate::model::Feature;
use geo::{Area, ChamberlainDuquetteArea};
use serde::{Deserialize, Serialize};

/// How selection area is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaMetric {
    /// Spherical area of lon/lat data, in square metres.
    #[default]
    Geodesic,
    /// Shoelace area in raw coordinate units.
    Planar,
}

/// Area of a polygonal feature; zero for anything that is not a valid polygon.
pub fn feature_area(feature: &Feature, metric: AreaMetric) -> f64 {
    let Some(mp) = to_multi_polygon(&feature.geometry) else {
        return 0.0;
    };
    match metric {
        AreaMetric::Geodesic => mp.iter().map(|p| p.chamberlain_duquette_unsigned_area()).sum(),
        AreaMetric::Planar => mp.iter().map(|p| p.unsigned_area()).sum(),
    }
}
