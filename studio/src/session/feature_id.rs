//! Positional feature identifiers.
//!
//! A `FeatureId` is the string `solution-<s>-feature-<p>` stamped on every
//! polygon handed to the drawing surface. It is not a persistent identity:
//! `p` is the feature's current index in the solution's working list, and the
//! reconciler re-stamps every feature on each redraw. Anything that reorders
//! the working list outside the session invalidates the ids on the surface.

use crate::error::{Result, StudioError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

const SOLUTION_PREFIX: &str = "solution-";
const FEATURE_INFIX: &str = "-feature-";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FeatureId(String);

impl FeatureId {
    pub fn encode(solution: usize, position: usize) -> Self {
        FeatureId(format!("{SOLUTION_PREFIX}{solution}{FEATURE_INFIX}{position}"))
    }

    /// Position encoded in the trailing component.
    ///
    /// Only the position is recovered; callers already know which solution is
    /// active when they decode.
    pub fn decode(&self) -> Result<usize> {
        self.0
            .rsplit('-')
            .next()
            .and_then(|tail| tail.parse::<usize>().ok())
            .ok_or_else(|| StudioError::MalformedFeatureId { id: self.0.clone() })
    }

    /// Solution index from the leading component, when the id has the full shape.
    pub fn solution_index(&self) -> Option<usize> {
        let rest = self.0.strip_prefix(SOLUTION_PREFIX)?;
        let (solution, _) = rest.split_once(FEATURE_INFIX)?;
        solution.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FeatureId {
    fn from(s: String) -> Self {
        FeatureId(s)
    }
}

impl From<&str> for FeatureId {
    fn from(s: &str) -> Self {
        FeatureId(s.to_string())
    }
}

// GeoJSON allows numeric ids; keep them as their decimal text.
impl<'de> Deserialize<'de> for FeatureId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(u64),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => FeatureId(s),
            RawId::Int(n) => FeatureId(n.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_human_readable() {
        assert_eq!(FeatureId::encode(2, 14).as_str(), "solution-2-feature-14");
    }

    #[test]
    fn decode_reads_trailing_position() {
        assert_eq!(FeatureId::encode(3, 0).decode().unwrap(), 0);
        assert_eq!(FeatureId::from("solution-0-feature-41").decode().unwrap(), 41);
    }

    #[test]
    fn decode_rejects_surface_minted_ids() {
        let id = FeatureId::from("6c0f3a8e9d1b");
        assert!(matches!(id.decode(), Err(StudioError::MalformedFeatureId { .. })));
        let tail = FeatureId::from("solution-0-feature-x");
        assert!(tail.decode().is_err());
    }

    #[test]
    fn solution_index_needs_full_shape() {
        assert_eq!(FeatureId::encode(5, 1).solution_index(), Some(5));
        assert_eq!(FeatureId::from("12").solution_index(), None);
        // Bare numeric ids still decode as a position.
        assert_eq!(FeatureId::from("12").decode().unwrap(), 12);
    }
}
