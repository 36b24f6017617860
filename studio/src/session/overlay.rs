use crate::model::Feature;
use std::collections::{BTreeSet, HashMap};

/// Per-solution working copies plus the set of solutions they are authoritative for.
///
/// Writes are whole-list replacements. A dirty solution resolves to its
/// overlay, or to an empty list when it has none; it never falls back to the
/// pristine data again.
#[derive(Clone, Debug, Default)]
pub struct EditOverlayStore {
    overlays: HashMap<usize, Vec<Feature>>,
    dirty: BTreeSet<usize>,
}

impl EditOverlayStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, solution: usize) -> Option<&[Feature]> {
        self.overlays.get(&solution).map(Vec::as_slice)
    }

    pub fn set(&mut self, solution: usize, features: Vec<Feature>) {
        self.overlays.insert(solution, features);
    }

    /// Returns true when `solution` was not dirty before.
    pub fn mark_dirty(&mut self, solution: usize) -> bool {
        self.dirty.insert(solution)
    }

    pub fn is_dirty(&self, solution: usize) -> bool {
        self.dirty.contains(&solution)
    }

    pub fn dirty_solutions(&self) -> impl Iterator<Item = usize> + '_ {
        self.dirty.iter().copied()
    }

    pub fn resolve<'a>(&'a self, solution: usize, pristine: &'a [Feature]) -> &'a [Feature] {
        if self.is_dirty(solution) {
            self.get(solution).unwrap_or(&[])
        } else {
            pristine
        }
    }
}
