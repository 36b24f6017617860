use super::{ControlButton, DrawSurface};
use crate::model::Feature;
use crate::session::FeatureId;

/// In-memory surface: keeps what would be drawn and counts the calls made.
///
/// Used by the replay harness and by tests standing in for the browser map.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub style_loaded: bool,
    pub features: Vec<Feature>,
    pub controls: Vec<ControlButton>,
    pub clear_calls: usize,
    pub add_calls: usize,
    pub control_renders: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loaded() -> Self {
        RecordingSurface { style_loaded: true, ..Self::default() }
    }

    pub fn feature_ids(&self) -> Vec<FeatureId> {
        self.features.iter().filter_map(|f| f.id.clone()).collect()
    }

    pub fn control(&self, id: &str) -> Option<&ControlButton> {
        self.controls.iter().find(|b| b.id == id)
    }
}

impl DrawSurface for RecordingSurface {
    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn add_control(&mut self, button: &ControlButton) {
        self.controls.push(button.clone());
        self.control_renders += 1;
    }

    fn remove_control(&mut self, id: &str) {
        self.controls.retain(|b| b.id != id);
    }

    fn add_feature(&mut self, feature: &Feature) {
        // Adding an id that is already drawn replaces it, as draw surfaces do.
        if let Some(id) = &feature.id {
            self.features.retain(|f| f.id.as_ref() != Some(id));
        }
        self.features.push(feature.clone());
        self.add_calls += 1;
    }

    fn remove_feature(&mut self, id: &FeatureId) {
        self.features.retain(|f| f.id.as_ref() != Some(id));
    }

    fn clear_all_features(&mut self) {
        self.features.clear();
        self.clear_calls += 1;
    }
}
