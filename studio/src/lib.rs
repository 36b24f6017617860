//! Polygon editing studio for candidate geographic solutions.
//!
//! [`Studio`] ties together the editing session, the selection mirror and the
//! reconciler that keeps an external drawing surface in sync. All surface
//! events go through [`Studio::dispatch`]; that single persistent handler
//! reads the session as it is at dispatch time.

pub mod config;
pub mod error;
pub mod model;
pub mod selection;
pub mod session;
pub mod source;
pub mod surface;
pub mod geometry {
    pub mod area;
    pub mod convert;
}
pub mod algorithms {
    pub mod merge;
}
pub mod json;

use algorithms::merge::MergeOp;
use config::StudioConfig;
use error::{Result, StudioError};
use model::{Feature, Solution};
use serde::Serialize;
use selection::{SelectionStats, SelectionTracker};
use session::{FeatureId, MergeOutcome, SolutionEditSession};
use source::SolutionSource;
use surface::{ControlButton, DrawSurface, ReconcileOutcome, SurfaceEvent, SurfaceReconciler};

/// What handling one surface event did.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum EventOutcome {
    Loaded(ReconcileOutcome),
    Selected { kept: usize },
    Created { ids: Vec<FeatureId> },
    Updated { applied: usize },
    Deleted { removed: usize },
    Merged(MergeOutcome),
    /// Click on a disabled control.
    Ignored,
}

pub struct Studio<S: DrawSurface> {
    config: StudioConfig,
    session: SolutionEditSession,
    selection: SelectionTracker,
    reconciler: SurfaceReconciler,
    controls: Vec<ControlButton>,
    surface: Option<S>,
}

impl<S: DrawSurface> Studio<S> {
    pub fn new(config: StudioConfig) -> Self {
        Studio {
            selection: SelectionTracker::new(config.area_metric),
            controls: config.controls.clone(),
            session: SolutionEditSession::default(),
            reconciler: SurfaceReconciler::new(),
            surface: None,
            config,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn session(&self) -> &SolutionEditSession {
        &self.session
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn controls(&self) -> &[ControlButton] {
        &self.controls
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn active_polygons(&self) -> &[Feature] {
        self.session.active_polygons()
    }

    pub fn stats(&self) -> SelectionStats {
        self.selection.stats()
    }

    /// Credential known, solutions loaded and a surface attached.
    pub fn is_drawable(&self) -> bool {
        self.config.has_credential() && self.session.solution_count() > 0 && self.surface.is_some()
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) -> ReconcileOutcome {
        self.config.access_token = Some(token.into());
        self.refresh()
    }

    /// Replace every solution and start a fresh session over them.
    pub fn load_solutions(&mut self, solutions: Vec<Solution>) -> Result<ReconcileOutcome> {
        let count = solutions.len();
        self.session = SolutionEditSession::with_active(solutions, self.config.initial_solution)?;
        self.selection.clear();
        self.reconciler.invalidate();
        tracing::info!(count, active = self.session.active(), "solutions loaded");
        Ok(self.refresh())
    }

    pub fn load_from(&mut self, source: &dyn SolutionSource) -> Result<ReconcileOutcome> {
        let solutions = source.fetch_solutions()?;
        self.load_solutions(solutions)
    }

    /// Attach the drawing surface, replacing any previous one.
    pub fn attach_surface(&mut self, surface: S) -> ReconcileOutcome {
        let surface = self.surface.insert(surface);
        self.reconciler.mount_controls(surface, &self.controls);
        self.reconciler.invalidate();
        self.refresh()
    }

    pub fn detach_surface(&mut self) -> Option<S> {
        self.reconciler.invalidate();
        self.surface.take()
    }

    pub fn select_solution(&mut self, solution: usize) -> Result<ReconcileOutcome> {
        self.session.activate(solution)?;
        Ok(self.refresh())
    }

    /// Handle one surface event against the current session state.
    pub fn dispatch(&mut self, event: SurfaceEvent) -> Result<EventOutcome> {
        tracing::trace!(event = event.name(), "surface event");
        let outcome = match event {
            SurfaceEvent::Load => {
                self.reconciler.invalidate();
                return Ok(EventOutcome::Loaded(self.refresh()));
            }
            SurfaceEvent::SelectionChange { features } => {
                EventOutcome::Selected { kept: self.selection.replace(features) }
            }
            SurfaceEvent::Create { features } => {
                EventOutcome::Created { ids: self.session.on_create(features)? }
            }
            SurfaceEvent::Update { features } => {
                EventOutcome::Updated { applied: self.session.on_update(features)? }
            }
            SurfaceEvent::Delete { features } => {
                EventOutcome::Deleted { removed: self.session.on_delete(&features)? }
            }
            SurfaceEvent::ControlClick { id } => return self.click_control(&id),
        };
        self.refresh();
        Ok(outcome)
    }

    pub fn click_control(&mut self, id: &str) -> Result<EventOutcome> {
        let button = self
            .controls
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| StudioError::UnknownControl { id: id.to_string() })?;
        if !button.enabled {
            return Ok(EventOutcome::Ignored);
        }
        let op = MergeOp::from(button.action);
        Ok(EventOutcome::Merged(self.merge_selected(op)?))
    }

    /// Merge the tracked selection in the active solution.
    pub fn merge_selected(&mut self, op: MergeOp) -> Result<MergeOutcome> {
        let outcome = self.session.on_merge(self.selection.features(), op)?;
        if let MergeOutcome::Merged { .. } = outcome {
            self.selection.clear();
            self.refresh();
        }
        Ok(outcome)
    }

    // Redraw when drawable and push the current control affordance.
    fn refresh(&mut self) -> ReconcileOutcome {
        let Some(surface) = self.surface.as_mut() else {
            return ReconcileOutcome::Deferred;
        };
        let outcome = if self.config.has_credential() && self.session.solution_count() > 0 {
            self.reconciler.reconcile(surface, &self.session)
        } else {
            ReconcileOutcome::Deferred
        };
        // The wipe invalidated every id the selection referred to.
        if let ReconcileOutcome::Redrawn { .. } = outcome {
            self.selection.clear();
        }
        self.reconciler.sync_controls(surface, &mut self.controls, self.selection.affordance());
        outcome
    }
}
