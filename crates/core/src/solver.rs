//! Boundary to the external band solver.
//!
//! The solver is driven through [`BandSolver::run`]: one blocking call that
//! fires the band callback once per (band, wavevector) pair. Each callback
//! receives a [`BandView`] with read-only accessors for the band currently in
//! the solver's workspace. Nothing is sent back to the solver.

use serde::{Deserialize, Serialize};

use crate::bands::{format_frequency_summary, BandGap};
use crate::error::ModeError;
use crate::field::VectorField3D;
use crate::mode::ModeRecord;
use crate::polarization::{Polarization, Runner};
use crate::quiet::OutputSilencer;

/// Accessors for one computed band, valid for the duration of a callback.
pub trait BandView {
    /// 1-based band index.
    fn band(&self) -> usize;
    /// The wavevector the solver is evaluating right now. For interpolated
    /// paths this can differ from any wavevector the caller listed.
    fn current_k(&self) -> [f64; 3];
    fn frequency(&self) -> f64;
    fn h_field(&self) -> VectorField3D;
    fn e_field(&self) -> VectorField3D;
}

pub trait BandSolver {
    /// Number of bands computed per wavevector.
    fn num_bands(&self) -> usize;

    /// Solve with `runner`, calling `on_band` for every band at every
    /// wavevector in order.
    fn run(
        &mut self,
        runner: Runner,
        on_band: &mut dyn FnMut(&dyn BandView),
    ) -> Result<BandSummary, SolverError>;
}

/// Per-run aggregates the solver reports once it finishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandSummary {
    /// `all_freqs[k][band]`.
    pub all_freqs: Vec<Vec<f64>>,
    pub gaps: Vec<BandGap>,
}

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("solver does not support runner {0}")]
    UnsupportedRunner(Runner),

    #[error("solver failed: {0}")]
    Failed(String),
}

/// Records and summary produced by one solver invocation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub modes: Vec<ModeRecord>,
    pub summary: BandSummary,
}

/// Drive `solver` once and turn every band callback into a [`ModeRecord`]
/// tagged with `polarization`.
///
/// Records are staged locally and returned only if every callback produced a
/// valid record; the first invalid band aborts ingestion for the run. Solver
/// diagnostics are silenced for the duration of the call.
pub fn collect_run<S>(
    solver: &mut S,
    runner: Runner,
    polarization: &Polarization,
) -> Result<RunOutput, ModeError>
where
    S: BandSolver + ?Sized,
{
    let mut modes = Vec::with_capacity(solver.num_bands());
    let mut failure: Option<ModeError> = None;
    let summary = {
        let _quiet = OutputSilencer::engage();
        solver.run(runner, &mut |view: &dyn BandView| {
            if failure.is_some() {
                return;
            }
            match record_from_view(view, polarization) {
                Ok(record) => modes.push(record),
                Err(err) => failure = Some(err),
            }
        })
    }?;
    if let Some(err) = failure {
        return Err(err);
    }
    for row in &summary.all_freqs {
        log::debug!("[solve] runner={runner} pol={polarization} {}", format_frequency_summary(row));
    }
    log::info!(
        "[solve] runner={runner} pol={polarization} collected {} modes over {} k-points",
        modes.len(),
        summary.all_freqs.len()
    );
    Ok(RunOutput { modes, summary })
}

fn record_from_view(view: &dyn BandView, polarization: &Polarization) -> Result<ModeRecord, ModeError> {
    ModeRecord::new(
        view.band(),
        view.current_k(),
        view.frequency(),
        polarization.clone(),
        view.h_field(),
        view.e_field(),
    )
}
