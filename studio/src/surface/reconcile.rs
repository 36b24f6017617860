//! Keeps the drawing surface equal to the session's active polygons.
//!
//! Reconciliation is a full wipe and redraw: the surface has no reliable way
//! to hide features, and diffing against it drifts. Every redrawn feature is
//! re-stamped with the id of its current position, so ids on the surface are
//! always positions in the list that was last drawn.
//!
//! A redraw happens only when `(active solution, session revision)` differs
//! from what was last drawn, which mirrors the version check the session
//! bumps on every write.

use super::{ButtonState, ControlButton, DrawSurface};
use crate::session::{FeatureId, SolutionEditSession};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DrawnState {
    solution: usize,
    revision: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileOutcome {
    Redrawn { features: usize },
    Unchanged,
    /// Surface not ready; retried on the next state change.
    Deferred,
}

#[derive(Clone, Debug, Default)]
pub struct SurfaceReconciler {
    drawn: Option<DrawnState>,
    deferred: bool,
}

impl SurfaceReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what was drawn so the next reconcile redraws unconditionally.
    pub fn invalidate(&mut self) {
        self.drawn = None;
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred
    }

    pub fn reconcile<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        session: &SolutionEditSession,
    ) -> ReconcileOutcome {
        if !surface.is_style_loaded() {
            if !self.deferred {
                tracing::debug!("surface style not loaded, reconciliation deferred");
            }
            self.deferred = true;
            return ReconcileOutcome::Deferred;
        }
        let state = DrawnState { solution: session.active(), revision: session.revision() };
        if self.drawn == Some(state) {
            return ReconcileOutcome::Unchanged;
        }

        surface.clear_all_features();
        let polygons = session.active_polygons();
        for (position, feature) in polygons.iter().enumerate() {
            surface.add_feature(&feature.with_id(FeatureId::encode(state.solution, position)));
        }

        self.drawn = Some(state);
        self.deferred = false;
        tracing::debug!(
            solution = state.solution,
            revision = state.revision,
            features = polygons.len(),
            "surface redrawn"
        );
        ReconcileOutcome::Redrawn { features: polygons.len() }
    }

    pub fn mount_controls<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        buttons: &[ControlButton],
    ) {
        for button in buttons {
            surface.add_control(button);
        }
    }

    /// Re-render (remove, then add) every control whose state differs from
    /// `state`. Returns how many were re-rendered.
    pub fn sync_controls<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        buttons: &mut [ControlButton],
        state: ButtonState,
    ) -> usize {
        let mut rendered = 0;
        for button in buttons.iter_mut().filter(|b| b.state() != state) {
            button.apply(state);
            surface.remove_control(&button.id);
            surface.add_control(button);
            rendered += 1;
        }
        rendered
    }
}
