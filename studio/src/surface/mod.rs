//! Contract with the external drawing surface.
//!
//! The surface renders features, owns the drawing UI, and reports user edits
//! as [`SurfaceEvent`]s. Only the [`reconcile::SurfaceReconciler`] writes to
//! it; handlers never call the surface directly.

pub mod pump;
pub mod reconcile;
pub mod recording;

use crate::algorithms::merge::MergeOp;
use crate::model::Feature;
use crate::session::FeatureId;
use serde::{Deserialize, Serialize};

pub use pump::EventPump;
pub use reconcile::{ReconcileOutcome, SurfaceReconciler};
pub use recording::RecordingSurface;

pub trait DrawSurface {
    /// False until the surface has finished loading its style.
    fn is_style_loaded(&self) -> bool;
    fn add_control(&mut self, button: &ControlButton);
    fn remove_control(&mut self, id: &str);
    fn add_feature(&mut self, feature: &Feature);
    fn remove_feature(&mut self, id: &FeatureId);
    fn clear_all_features(&mut self);
}

/// Discrete events emitted by the surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum SurfaceEvent {
    Load,
    #[serde(rename = "selectionchange")]
    SelectionChange { features: Vec<Feature> },
    Create { features: Vec<Feature> },
    Update { features: Vec<Feature> },
    Delete { features: Vec<Feature> },
    #[serde(rename = "click")]
    ControlClick { id: String },
}

impl SurfaceEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SurfaceEvent::Load => "load",
            SurfaceEvent::SelectionChange { .. } => "selectionchange",
            SurfaceEvent::Create { .. } => "create",
            SurfaceEvent::Update { .. } => "update",
            SurfaceEvent::Delete { .. } => "delete",
            SurfaceEvent::ControlClick { .. } => "click",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    #[default]
    Grey,
    Black,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Union,
    Intersect,
}

impl From<ControlAction> for MergeOp {
    fn from(action: ControlAction) -> Self {
        match action {
            ControlAction::Union => MergeOp::Union,
            ControlAction::Intersect => MergeOp::Intersect,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub enabled: bool,
    pub color: ButtonColor,
}

/// Custom button placed in the surface's control container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlButton {
    pub id: String,
    pub title: String,
    pub icon_class: String,
    #[serde(default)]
    pub color: ButtonColor,
    #[serde(default)]
    pub enabled: bool,
    pub action: ControlAction,
}

impl ControlButton {
    pub fn new(id: &str, title: &str, icon_class: &str, action: ControlAction) -> Self {
        ControlButton {
            id: id.to_string(),
            title: title.to_string(),
            icon_class: icon_class.to_string(),
            color: ButtonColor::Grey,
            enabled: false,
            action,
        }
    }

    pub fn state(&self) -> ButtonState {
        ButtonState { enabled: self.enabled, color: self.color }
    }

    pub fn apply(&mut self, state: ButtonState) {
        self.enabled = state.enabled;
        self.color = state.color;
    }

    /// The union and intersect buttons.
    pub fn defaults() -> Vec<ControlButton> {
        vec![
            ControlButton::new("union", "Union", "fa fa-lg fa-link", ControlAction::Union),
            ControlButton::new(
                "intersect",
                "Intersect",
                "fa fa-lg fa-cut",
                ControlAction::Intersect,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_parse_from_tagged_json() {
        let raw = r#"[
            {"event": "load"},
            {"event": "create", "features": []},
            {"event": "selectionchange", "features": []},
            {"event": "click", "id": "union"}
        ]"#;
        let events: Vec<SurfaceEvent> = serde_json::from_str(raw).unwrap();
        let names: Vec<_> = events.iter().map(SurfaceEvent::name).collect();
        assert_eq!(names, vec!["load", "create", "selectionchange", "click"]);
    }

    #[test]
    fn default_buttons_start_disabled() {
        let buttons = ControlButton::defaults();
        assert_eq!(buttons.len(), 2);
        assert!(buttons.iter().all(|b| !b.enabled && b.color == ButtonColor::Grey));
        let v = serde_json::to_value(&buttons[0]).unwrap();
        assert_eq!(v["iconClass"], "fa fa-lg fa-link");
        assert_eq!(v["color"], "grey");
    }
}
