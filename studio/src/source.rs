use crate::error::Result;
use crate::json::parse_solutions;
use crate::model::Solution;
use std::path::Path;

/// Backend collaborator supplying the candidate solutions.
pub trait SolutionSource {
    fn fetch_solutions(&self) -> Result<Vec<Solution>>;
}

/// Solutions held as a JSON array of FeatureCollections.
#[derive(Clone, Debug)]
pub struct JsonSource {
    text: String,
}

impl JsonSource {
    pub fn new(text: impl Into<String>) -> Self {
        JsonSource { text: text.into() }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(JsonSource::new(std::fs::read_to_string(path)?))
    }
}

impl SolutionSource for JsonSource {
    fn fetch_solutions(&self) -> Result<Vec<Solution>> {
        parse_solutions(&self.text)
    }
}
