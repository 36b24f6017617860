use crate::error::Result;
use crate::geometry::area::AreaMetric;
use crate::model::Position;
use crate::surface::ControlButton;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    /// `[lon, lat]` the map opens on.
    pub center: Position,
    pub zoom: f64,
    pub style: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            center: [2.297, 48.857],
            zoom: 15.0,
            style: "mapbox://styles/mapbox/light-v11".to_string(),
        }
    }
}

/// Studio settings. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudioConfig {
    /// Map access credential; nothing is drawn until it is known.
    pub access_token: Option<String>,
    pub map: MapOptions,
    pub area_metric: AreaMetric,
    pub initial_solution: usize,
    pub controls: Vec<ControlButton>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            access_token: None,
            map: MapOptions::default(),
            area_metric: AreaMetric::default(),
            initial_solution: 0,
            controls: ControlButton::defaults(),
        }
    }
}

impl StudioConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        StudioConfig::from_json_str(&text)
    }

    pub fn has_credential(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ControlAction;

    #[test]
    fn empty_object_is_default() {
        let c = StudioConfig::from_json_str("{}").unwrap();
        assert_eq!(c, StudioConfig::default());
        assert!(!c.has_credential());
        assert_eq!(c.controls.len(), 2);
    }

    #[test]
    fn camel_case_fields_and_blank_token() {
        let c = StudioConfig::from_json_str(
            r#"{"accessToken": "  ", "areaMetric": "planar", "initialSolution": 1,
                "map": {"zoom": 12},
                "controls": [{"id": "u", "title": "U", "iconClass": "x", "action": "union"}]}"#,
        )
        .unwrap();
        assert!(!c.has_credential());
        assert_eq!(c.area_metric, AreaMetric::Planar);
        assert_eq!(c.initial_solution, 1);
        assert_eq!(c.map.zoom, 12.0);
        assert_eq!(c.map.center, [2.297, 48.857]);
        assert_eq!(c.controls[0].action, ControlAction::Union);
        assert!(!c.controls[0].enabled);
    }
}
