use thiserror::Error;

/// Errors surfaced by the editing session and its collaborators.
///
/// Every variant aborts only the operation that raised it; session state is
/// left exactly as it was before the call.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("feature #{slot} has no id; tracked features must carry one")]
    MissingFeatureId { slot: usize },
    #[error("feature id {id:?} does not end in a position")]
    MalformedFeatureId { id: String },
    #[error("solution index {index} out of range ({count} solutions loaded)")]
    SolutionOutOfRange { index: usize, count: usize },
    #[error("no solution is active")]
    NoActiveSolution,
    #[error("solution {solution} feature {position} is not a polygon")]
    NonPolygonal { solution: usize, position: usize },
    #[error("unknown control {id:?}")]
    UnknownControl { id: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StudioError {
    /// Stable machine-readable code, used by the browser envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            StudioError::MissingFeatureId { .. } => "missing_feature_id",
            StudioError::MalformedFeatureId { .. } => "malformed_feature_id",
            StudioError::SolutionOutOfRange { .. } => "solution_out_of_range",
            StudioError::NoActiveSolution => "no_active_solution",
            StudioError::NonPolygonal { .. } => "non_polygonal",
            StudioError::UnknownControl { .. } => "unknown_control",
            StudioError::Json(_) => "invalid_json",
            StudioError::Io(_) => "io",
        }
    }
}

pub type Result<T, E = StudioError> = std::result::Result<T, E>;
