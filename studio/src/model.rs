use crate::error::{Result, StudioError};
use crate::session::feature_id::FeatureId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A 2D GeoJSON position, `[lon, lat]`.
pub type Position = [f64; 2];

/// A closed ring of positions (first == last on the wire).
pub type Ring = Vec<Position>;

/// Geometries as GeoJSON. Positions may carry an altitude on the wire; it is
/// dropped on read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(deserialize_with = "lenient::position")]
        coordinates: Position,
    },
    MultiPoint {
        #[serde(deserialize_with = "lenient::positions")]
        coordinates: Vec<Position>,
    },
    LineString {
        #[serde(deserialize_with = "lenient::positions")]
        coordinates: Vec<Position>,
    },
    MultiLineString {
        #[serde(deserialize_with = "lenient::rings")]
        coordinates: Vec<Vec<Position>>,
    },
    Polygon {
        #[serde(deserialize_with = "lenient::rings")]
        coordinates: Vec<Ring>,
    },
    MultiPolygon {
        #[serde(deserialize_with = "lenient::polygons")]
        coordinates: Vec<Vec<Ring>>,
    },
}

mod lenient {
    use super::{Position, Ring};
    use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
    use serde::Deserialize;
    use std::fmt;

    struct Lenient(Position);

    impl<'de> Deserialize<'de> for Lenient {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct PositionVisitor;

            impl<'de> Visitor<'de> for PositionVisitor {
                type Value = Lenient;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a position of two or more numbers")
                }

                fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Lenient, A::Error> {
                    let missing = |n| <A::Error as de::Error>::invalid_length(n, &PositionVisitor);
                    let x = seq.next_element()?.ok_or_else(|| missing(0))?;
                    let y = seq.next_element()?.ok_or_else(|| missing(1))?;
                    while seq.next_element::<IgnoredAny>()?.is_some() {}
                    Ok(Lenient([x, y]))
                }
            }

            deserializer.deserialize_seq(PositionVisitor)
        }
    }

    fn unwrap_all(raw: Vec<Lenient>) -> Vec<Position> {
        raw.into_iter().map(|p| p.0).collect()
    }

    pub fn position<'de, D: Deserializer<'de>>(d: D) -> Result<Position, D::Error> {
        Lenient::deserialize(d).map(|p| p.0)
    }

    pub fn positions<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Position>, D::Error> {
        Vec::<Lenient>::deserialize(d).map(unwrap_all)
    }

    pub fn rings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Ring>, D::Error> {
        let raw = Vec::<Vec<Lenient>>::deserialize(d)?;
        Ok(raw.into_iter().map(unwrap_all).collect())
    }

    pub fn polygons<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Vec<Ring>>, D::Error> {
        let raw = Vec::<Vec<Vec<Lenient>>>::deserialize(d)?;
        Ok(raw.into_iter().map(|p| p.into_iter().map(unwrap_all).collect()).collect())
    }
}

impl Geometry {
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Geometry::Polygon { .. } | Geometry::MultiPolygon { .. })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::LineString { .. } => "LineString",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// A GeoJSON feature as exchanged with the drawing surface.
///
/// `id` is absent for freshly drawn features the session has not stamped yet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FeatureId>,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Feature { tag: FeatureTag::Feature, id: None, geometry, properties: None }
    }

    pub fn polygon(rings: Vec<Ring>) -> Self {
        Feature::new(Geometry::Polygon { coordinates: rings })
    }

    /// Copy of this feature carrying `id` instead of whatever it had.
    pub fn with_id(&self, id: FeatureId) -> Self {
        Feature { id: Some(id), ..self.clone() }
    }

    pub fn is_polygonal(&self) -> bool {
        self.geometry.is_polygonal()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub tag: CollectionTag,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection { tag: CollectionTag::FeatureCollection, features }
    }
}

/// One candidate solution as delivered by the backend. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Solution {
    collection: FeatureCollection,
}

impl Solution {
    /// Wraps `collection`, rejecting any feature that is not a Polygon or MultiPolygon.
    pub fn from_collection(index: usize, collection: FeatureCollection) -> Result<Self> {
        if let Some(position) = collection.features.iter().position(|f| !f.is_polygonal()) {
            return Err(StudioError::NonPolygonal { solution: index, position });
        }
        Ok(Solution { collection })
    }

    pub fn from_features(index: usize, features: Vec<Feature>) -> Result<Self> {
        Solution::from_collection(index, FeatureCollection::new(features))
    }

    pub fn features(&self) -> &[Feature] {
        &self.collection.features
    }

    pub fn len(&self) -> usize {
        self.collection.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.features.is_empty()
    }
}
