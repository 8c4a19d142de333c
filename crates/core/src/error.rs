//! Error types for mode ingestion, queries and derived quantities.

use crate::polarization::Polarization;
use crate::solver::SolverError;

#[derive(Debug, thiserror::Error)]
pub enum ModeError {
    #[error("modes are not calculated; run a simulation first")]
    EmptyStore,

    #[error("field shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch { expected: [usize; 3], found: [usize; 3] },

    #[error("field grid {0:?} has no sample points")]
    EmptyGrid([usize; 3]),

    #[error("field data length {len} does not match grid {grid:?} with 3 components")]
    FieldLength { len: usize, grid: [usize; 3] },

    #[error("at least one field is required")]
    NoFields,

    #[error("wavevector has zero norm")]
    ZeroWavevector,

    #[error("wavevector {0:?} does not align with a primary axis")]
    OffAxisWavevector([f64; 3]),

    #[error("wavevector {0:?} has non-finite components")]
    NonFiniteWavevector([f64; 3]),

    #[error("mode frequency must be positive and finite, found {0}")]
    InvalidFrequency(f64),

    #[error("invalid {kind} '{value}'; choose one of: {expected}")]
    InvalidChoice {
        kind: &'static str,
        value: String,
        expected: String,
    },

    #[error("distance must be less than 0.5, found {0}")]
    InvalidDistance(f64),

    #[error("component index {0} out of range; expected 0, 1 or 2")]
    InvalidComponent(usize),

    #[error("plane index {index} out of range for nz = {nz}")]
    InvalidPlane { index: usize, nz: usize },

    #[error("no band data for polarization '{0}'")]
    NoBandData(Polarization),

    #[error("failed to create thread pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModeError {
    pub(crate) fn invalid_choice(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        ModeError::InvalidChoice {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}
