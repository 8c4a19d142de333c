//! Mode retrieval by polarization, wavevector and frequency.
//!
//! Wavevectors compare by exact value unless a distance threshold is given.
//! Wavevectors that went through floating-point interpolation may miss an
//! exact match; pass `k_max_distance` in that case.

use crate::mode::ModeRecord;
use crate::polarization::Polarization;

pub const DEFAULT_FREQ_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct ModeQuery {
    pub polarization: Polarization,
    pub k_point: [f64; 3],
    pub frequency: f64,
    /// Inclusive bound on `|mode.freq - frequency|`.
    pub freq_tolerance: f64,
    /// When set, wavevectors within this Euclidean distance match.
    pub k_max_distance: Option<f64>,
}

impl ModeQuery {
    pub fn new(polarization: impl Into<Polarization>, k_point: [f64; 3], frequency: f64) -> Self {
        Self {
            polarization: polarization.into(),
            k_point,
            frequency,
            freq_tolerance: DEFAULT_FREQ_TOLERANCE,
            k_max_distance: None,
        }
    }

    pub fn with_freq_tolerance(mut self, tolerance: f64) -> Self {
        self.freq_tolerance = tolerance;
        self
    }

    pub fn with_k_max_distance(mut self, distance: f64) -> Self {
        self.k_max_distance = Some(distance);
        self
    }

    pub fn matches(&self, mode: &ModeRecord) -> bool {
        if mode.polarization() != &self.polarization {
            return false;
        }
        let k_matches = match self.k_max_distance {
            None => mode.k_point() == self.k_point,
            Some(max) => k_distance(mode.k_point(), self.k_point) <= max,
        };
        k_matches && (mode.freq() - self.frequency).abs() <= self.freq_tolerance
    }
}

/// All modes matching `query`, in store order. An empty result is not an
/// error.
pub fn find<'a>(modes: &'a [ModeRecord], query: &ModeQuery) -> Vec<&'a ModeRecord> {
    modes.iter().filter(|mode| query.matches(mode)).collect()
}

pub fn k_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}
