//! Fixtures shared by the unit tests: constant fields, quick records and a
//! scripted band solver.

use num_complex::Complex64;

use crate::bands::compute_gaps;
use crate::field::VectorField3D;
use crate::grid::Grid3D;
use crate::mode::ModeRecord;
use crate::polarization::{Polarization, Runner};
use crate::solver::{BandSolver, BandSummary, BandView, SolverError};

pub fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

/// Field with the same real vector at every point.
pub fn uniform_field(grid: Grid3D, v: [f64; 3]) -> VectorField3D {
    VectorField3D::from_fn(grid, |_, _, _| [c(v[0]), c(v[1]), c(v[2])])
}

pub fn record(band: usize, k: [f64; 3], freq: f64, pol: &str) -> ModeRecord {
    let grid = Grid3D::planar(2, 2);
    ModeRecord::new(
        band,
        k,
        freq,
        Polarization::from(pol),
        uniform_field(grid, [0.0, 0.0, 1.0]),
        uniform_field(grid, [1.0, 0.0, 0.0]),
    )
    .unwrap()
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {actual} to be within {tol} of {expected}"
    );
}

pub struct ScriptedView {
    pub band: usize,
    pub k: [f64; 3],
    pub freq: f64,
    pub grid: Grid3D,
}

impl BandView for ScriptedView {
    fn band(&self) -> usize {
        self.band
    }

    fn current_k(&self) -> [f64; 3] {
        self.k
    }

    fn frequency(&self) -> f64 {
        self.freq
    }

    fn h_field(&self) -> VectorField3D {
        uniform_field(self.grid, [0.0, 0.0, self.freq])
    }

    fn e_field(&self) -> VectorField3D {
        uniform_field(self.grid, [self.freq, 0.0, 0.0])
    }
}

/// Reports `freqs[k][band]` at each of `k_points`, one callback per band.
pub struct ScriptedSolver {
    pub k_points: Vec<[f64; 3]>,
    pub freqs: Vec<Vec<f64>>,
    pub grid: Grid3D,
    pub fail_with: Option<String>,
    pub runs: usize,
}

impl ScriptedSolver {
    pub fn new(k_points: Vec<[f64; 3]>, freqs: Vec<Vec<f64>>) -> Self {
        Self {
            k_points,
            freqs,
            grid: Grid3D::planar(2, 2),
            fail_with: None,
            runs: 0,
        }
    }

    /// Linear bands `f = (band + 1) * (0.1 + |k|)` along `k_points`.
    pub fn linear(k_points: Vec<[f64; 3]>, num_bands: usize) -> Self {
        let freqs = k_points
            .iter()
            .map(|k| {
                let norm = (k[0] * k[0] + k[1] * k[1] + k[2] * k[2]).sqrt();
                (0..num_bands).map(|b| (b + 1) as f64 * (0.1 + norm)).collect()
            })
            .collect();
        Self::new(k_points, freqs)
    }
}

impl BandSolver for ScriptedSolver {
    fn num_bands(&self) -> usize {
        self.freqs.first().map(Vec::len).unwrap_or(0)
    }

    fn run(
        &mut self,
        _runner: Runner,
        on_band: &mut dyn FnMut(&dyn BandView),
    ) -> Result<BandSummary, SolverError> {
        self.runs += 1;
        for (k, row) in self.k_points.iter().zip(&self.freqs) {
            for (b, &freq) in row.iter().enumerate() {
                on_band(&ScriptedView {
                    band: b + 1,
                    k: *k,
                    freq,
                    grid: self.grid,
                });
            }
        }
        if let Some(message) = &self.fail_with {
            return Err(SolverError::Failed(message.clone()));
        }
        Ok(BandSummary {
            gaps: compute_gaps(&self.freqs),
            all_freqs: self.freqs.clone(),
        })
    }
}
