// GeoJSON rings <-> geo polygons

use crate::model::{Geometry, Position, Ring};
use geo::{Coord, LineString, MultiPolygon, Polygon};

// A closed ring needs at least three distinct vertices plus the closing one.
pub const MIN_RING_LEN: usize = 4;

fn ring_to_line_string(ring: &[Position]) -> Option<LineString<f64>> {
    if ring.len() < MIN_RING_LEN {
        return None;
    }
    if ring.iter().any(|p| !p[0].is_finite() || !p[1].is_finite()) {
        return None;
    }
    let coords: Vec<Coord<f64>> = ring.iter().map(|p| Coord { x: p[0], y: p[1] }).collect();
    Some(LineString::from(coords))
}

fn rings_to_polygon(rings: &[Ring]) -> Option<Polygon<f64>> {
    let (exterior, interiors) = rings.split_first()?;
    let exterior = ring_to_line_string(exterior)?;
    let interiors = interiors
        .iter()
        .map(|r| ring_to_line_string(r))
        .collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, interiors))
}

/// Polygonal geometry as a geo multipolygon; `None` for other types or bad rings.
pub fn to_multi_polygon(geometry: &Geometry) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon { coordinates } => {
            Some(MultiPolygon::new(vec![rings_to_polygon(coordinates)?]))
        }
        Geometry::MultiPolygon { coordinates } => {
            let polygons = coordinates
                .iter()
                .map(|rings| rings_to_polygon(rings))
                .collect::<Option<Vec<_>>>()?;
            Some(MultiPolygon::new(polygons))
        }
        _ => None,
    }
}

pub fn polygon_to_rings(polygon: &Polygon<f64>) -> Vec<Ring> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ls| ls.coords().map(|c| [c.x, c.y]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_or_non_finite_rings_are_rejected() {
        let short =
            Geometry::Polygon { coordinates: vec![vec![[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]] };
        assert!(to_multi_polygon(&short).is_none());
        let nan = Geometry::Polygon {
            coordinates: vec![vec![[0.0, 0.0], [f64::NAN, 0.0], [1.0, 1.0], [0.0, 0.0]]],
        };
        assert!(to_multi_polygon(&nan).is_none());
        let point = Geometry::Point { coordinates: [0.0, 0.0] };
        assert!(to_multi_polygon(&point).is_none());
    }

    #[test]
    fn polygon_with_hole_keeps_both_rings() {
        let g = Geometry::Polygon {
            coordinates: vec![
                vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                vec![[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 2.0]],
            ],
        };
        let mp = to_multi_polygon(&g).unwrap();
        assert_eq!(mp.0.len(), 1);
        let rings = polygon_to_rings(&mp.0[0]);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].first(), rings[0].last());
    }
}
