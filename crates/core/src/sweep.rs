//! Parallel wavevector sweeps.
//!
//! Each wavevector gets its own solver instance, built by a caller-supplied
//! factory, and runs on a rayon pool. Workers append their records to one
//! mutex-guarded [`ModeStore`]; the per-wavevector frequency rows come back
//! in path order.

use std::time::Instant;

use parking_lot::Mutex;
use rayon::prelude::*;

use crate::bands::compute_gaps;
use crate::error::ModeError;
use crate::polarization::{Polarization, Runner};
use crate::solver::{collect_run, BandSolver, BandSummary};
use crate::store::ModeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadMode {
    /// One worker per available core.
    #[default]
    Auto,
    Fixed(usize),
}

#[derive(Debug, Clone)]
pub struct SweepOutput {
    /// Records from every worker; order across wavevectors is unspecified.
    pub modes: ModeStore,
    /// `all_freqs[k]` in the order of the requested wavevectors, with gaps
    /// computed over the whole sweep.
    pub summary: BandSummary,
}

/// Solve every wavevector in `k_points` with a fresh solver from
/// `make_solver`. Fails with the first error any worker reports.
pub fn sweep_k_points<S, F>(
    k_points: &[[f64; 3]],
    runner: Runner,
    polarization: &Polarization,
    threads: ThreadMode,
    make_solver: F,
) -> Result<SweepOutput, ModeError>
where
    S: BandSolver,
    F: Fn([f64; 3]) -> S + Sync,
{
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let ThreadMode::Fixed(n) = threads {
        builder = builder.num_threads(n.max(1));
    }
    let pool = builder
        .build()
        .map_err(|e| ModeError::ThreadPool(e.to_string()))?;

    let start = Instant::now();
    let shared = Mutex::new(ModeStore::new());
    let rows: Vec<Vec<f64>> = pool.install(|| {
        k_points
            .par_iter()
            .map(|&k| -> Result<Vec<f64>, ModeError> {
                let mut solver = make_solver(k);
                let output = collect_run(&mut solver, runner, polarization)?;
                shared.lock().extend(output.modes);
                Ok(output.summary.all_freqs.into_iter().flatten().collect())
            })
            .collect::<Result<Vec<_>, ModeError>>()
    })?;

    let modes = shared.into_inner();
    log::info!(
        "[sweep] runner={runner} pol={polarization} k_points={} modes={} threads={} elapsed={:.2?}",
        k_points.len(),
        modes.len(),
        pool.current_num_threads(),
        start.elapsed()
    );
    let gaps = compute_gaps(&rows);
    Ok(SweepOutput {
        modes,
        summary: BandSummary {
            all_freqs: rows,
            gaps,
        },
    })
}
