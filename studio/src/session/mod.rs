//! Polygon editing session for a set of candidate solutions.
//!
//! The session owns the pristine solutions and an [`EditOverlayStore`]. A
//! solution is *pristine* until it is opened or edited; from then on it is
//! *overlayed* for the rest of the session and every read and write goes
//! through its working list. There is no way back to pristine.
//!
//! Every write is read-modify-write of the whole working list of the active
//! solution. Feature ids handed in by the surface are decoded to positions in
//! that list ([`FeatureId::decode`]), and all ids of an operation are validated
//! before anything is mutated, so a rejected operation leaves the session
//! untouched.

pub mod feature_id;
pub mod overlay;

pub use feature_id::FeatureId;
pub use overlay::EditOverlayStore;

use crate::algorithms::merge::{merge_features, MergeOp, MIN_MERGE_SELECTION};
use crate::error::{Result, StudioError};
use crate::model::{Feature, Solution};
use serde::Serialize;

/// Result of a union/intersect request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeOutcome {
    /// The selection was replaced by one feature carrying `id`.
    Merged { id: FeatureId, removed: usize },
    /// No single polygon came out of the merge; nothing changed.
    NoResult,
}

#[derive(Clone, Debug, Default)]
pub struct SolutionEditSession {
    solutions: Vec<Solution>,
    store: EditOverlayStore,
    active: usize,
    revision: u64,
}

impl SolutionEditSession {
    /// Session over `solutions` with the first one opened.
    pub fn new(solutions: Vec<Solution>) -> Self {
        let mut session = SolutionEditSession { solutions, ..Default::default() };
        if !session.solutions.is_empty() {
            session.open(0);
        }
        session
    }

    pub fn with_active(solutions: Vec<Solution>, active: usize) -> Result<Self> {
        if active != 0 && active >= solutions.len() {
            return Err(StudioError::SolutionOutOfRange { index: active, count: solutions.len() });
        }
        let mut session = SolutionEditSession { solutions, active, ..Default::default() };
        if !session.solutions.is_empty() {
            session.open(active);
        }
        Ok(session)
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn solution_count(&self) -> usize {
        self.solutions.len()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Bumped on every state change that affects what should be drawn.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self, solution: usize) -> bool {
        self.store.is_dirty(solution)
    }

    pub fn overlay(&self) -> &EditOverlayStore {
        &self.store
    }

    /// Current view of any solution: overlay when dirty, pristine otherwise.
    pub fn polygons(&self, solution: usize) -> &[Feature] {
        self.store.resolve(solution, self.pristine(solution))
    }

    pub fn active_polygons(&self) -> &[Feature] {
        self.polygons(self.active)
    }

    /// Switch the active solution. Overlays of every other solution are kept.
    pub fn activate(&mut self, solution: usize) -> Result<()> {
        if solution >= self.solutions.len() {
            let count = self.solutions.len();
            return Err(StudioError::SolutionOutOfRange { index: solution, count });
        }
        if solution != self.active {
            self.revision += 1;
        }
        self.active = solution;
        self.open(solution);
        tracing::info!(solution, dirty = self.store.is_dirty(solution), "active solution");
        Ok(())
    }

    // Marks `solution` dirty, seeding its overlay from the pristine data the
    // first time so that opening a solution does not blank it.
    fn open(&mut self, solution: usize) {
        if self.store.mark_dirty(solution) {
            if self.store.get(solution).is_none() {
                let seed = self.pristine(solution).to_vec();
                self.store.set(solution, seed);
            }
            self.revision += 1;
        }
    }

    fn pristine(&self, solution: usize) -> &[Feature] {
        self.solutions.get(solution).map(Solution::features).unwrap_or(&[])
    }

    fn working_copy(&self) -> Result<Vec<Feature>> {
        if self.solutions.is_empty() {
            return Err(StudioError::NoActiveSolution);
        }
        Ok(self.active_polygons().to_vec())
    }

    fn commit(&mut self, features: Vec<Feature>) {
        self.store.set(self.active, features);
        self.store.mark_dirty(self.active);
        self.revision += 1;
    }

    // Decodes every id up front; fails on the first missing or malformed one.
    fn positions_of(&self, features: &[Feature]) -> Result<Vec<usize>> {
        features
            .iter()
            .enumerate()
            .map(|(slot, feature)| {
                let id = feature.id.as_ref().ok_or(StudioError::MissingFeatureId { slot })?;
                if let Some(owner) = id.solution_index().filter(|&s| s != self.active) {
                    tracing::warn!(
                        %id,
                        owner,
                        active = self.active,
                        "feature id belongs to another solution"
                    );
                }
                id.decode()
            })
            .collect()
    }

    /// Append drawn features, stamping each with the next free position.
    pub fn on_create(&mut self, features: Vec<Feature>) -> Result<Vec<FeatureId>> {
        let mut working = self.working_copy()?;
        let mut ids = Vec::with_capacity(features.len());
        for feature in features {
            let id = FeatureId::encode(self.active, working.len());
            working.push(feature.with_id(id.clone()));
            ids.push(id);
        }
        self.commit(working);
        Ok(ids)
    }

    /// Overwrite features in place at their decoded positions. Returns how many were applied.
    pub fn on_update(&mut self, features: Vec<Feature>) -> Result<usize> {
        let positions = self.positions_of(&features)?;
        let mut working = self.working_copy()?;
        let mut applied = 0;
        for (position, feature) in positions.into_iter().zip(features) {
            match working.get_mut(position) {
                Some(slot) => {
                    *slot = feature;
                    applied += 1;
                }
                None => tracing::warn!(
                    position,
                    len = working.len(),
                    solution = self.active,
                    "update for position outside working list ignored"
                ),
            }
        }
        self.commit(working);
        Ok(applied)
    }

    /// Remove features at their decoded positions. Returns how many were removed.
    pub fn on_delete(&mut self, features: &[Feature]) -> Result<usize> {
        let positions = self.positions_of(features)?;
        let mut working = self.working_copy()?;
        let removed = remove_positions(&mut working, positions, self.active);
        self.commit(working);
        Ok(removed)
    }

    pub fn on_union(&mut self, selection: &[Feature]) -> Result<MergeOutcome> {
        self.on_merge(selection, MergeOp::Union)
    }

    /// Replace the selection by its merged geometry, or do nothing when the
    /// merge has no single-polygon result.
    pub fn on_merge(&mut self, selection: &[Feature], op: MergeOp) -> Result<MergeOutcome> {
        if selection.len() < MIN_MERGE_SELECTION {
            return Ok(MergeOutcome::NoResult);
        }
        let positions = self.positions_of(selection)?;
        let mut working = self.working_copy()?;
        // A stale id would merge area the working list does not hold.
        if let Some(&stale) = positions.iter().find(|&&p| p >= working.len()) {
            tracing::warn!(
                position = stale,
                len = working.len(),
                solution = self.active,
                "merge selection references position outside working list, ignored"
            );
            return Ok(MergeOutcome::NoResult);
        }
        let Some(geometry) = merge_features(selection, op) else {
            tracing::debug!(?op, selected = selection.len(), "merge produced no single polygon");
            return Ok(MergeOutcome::NoResult);
        };
        let removed = remove_positions(&mut working, positions, self.active);
        let id = FeatureId::encode(self.active, working.len());
        let mut merged = Feature::new(geometry);
        merged.id = Some(id.clone());
        working.push(merged);
        self.commit(working);
        tracing::debug!(%id, removed, ?op, "selection merged");
        Ok(MergeOutcome::Merged { id, removed })
    }
}

// Highest position first: removing from the end keeps lower indices valid.
fn remove_positions(
    working: &mut Vec<Feature>,
    mut positions: Vec<usize>,
    solution: usize,
) -> usize {
    positions.sort_unstable_by(|a, b| b.cmp(a));
    positions.dedup();
    let mut removed = 0;
    for position in positions {
        if position < working.len() {
            working.remove(position);
            removed += 1;
        } else {
            tracing::warn!(
                position,
                len = working.len(),
                solution,
                "removal of position outside working list ignored"
            );
        }
    }
    removed
}
