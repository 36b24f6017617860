use crate::error::Result;
use crate::model::{FeatureCollection, Solution};
use crate::session::SolutionEditSession;

/// Parse a JSON array of FeatureCollections, one per solution.
pub fn parse_solutions(text: &str) -> Result<Vec<Solution>> {
    let collections: Vec<FeatureCollection> = serde_json::from_str(text)?;
    solutions_from_collections(collections)
}

pub fn solutions_from_collections(collections: Vec<FeatureCollection>) -> Result<Vec<Solution>> {
    collections
        .into_iter()
        .enumerate()
        .map(|(index, collection)| Solution::from_collection(index, collection))
        .collect()
}

/// Active solution as the session currently sees it.
pub fn active_collection(session: &SolutionEditSession) -> FeatureCollection {
    FeatureCollection::new(session.active_polygons().to_vec())
}

/// Every solution resolved through the session (overlay when dirty).
pub fn snapshot(session: &SolutionEditSession) -> Vec<FeatureCollection> {
    (0..session.solution_count())
        .map(|i| FeatureCollection::new(session.polygons(i).to_vec()))
        .collect()
}

pub fn snapshot_json(session: &SolutionEditSession) -> Result<String> {
    Ok(serde_json::to_string_pretty(&snapshot(session))?)
}
