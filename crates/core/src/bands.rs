//! Band-diagram data: per-band frequency series and band gaps.

use serde::{Deserialize, Serialize};

use crate::lattice::accumulate_distances;

/// A complete gap between two adjacent bands over the whole path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandGap {
    /// Gap width relative to its midgap frequency, in percent.
    pub percent: f64,
    pub lower: f64,
    pub upper: f64,
}

impl BandGap {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            percent: 200.0 * (upper - lower) / (upper + lower),
            lower,
            upper,
        }
    }
}

/// Gaps between consecutive bands of `all_freqs` (indexed `[k][band]`): a gap
/// exists where the minimum of band `b + 1` lies above the maximum of band
/// `b` across every wavevector.
pub fn compute_gaps(all_freqs: &[Vec<f64>]) -> Vec<BandGap> {
    let n_bands = all_freqs.iter().map(Vec::len).min().unwrap_or(0);
    let mut gaps = Vec::new();
    for band in 1..n_bands {
        let lower = all_freqs
            .iter()
            .map(|row| row[band - 1])
            .fold(f64::NEG_INFINITY, f64::max);
        let upper = all_freqs
            .iter()
            .map(|row| row[band])
            .fold(f64::INFINITY, f64::min);
        if upper > lower {
            gaps.push(BandGap::new(lower, upper));
        }
    }
    gaps
}

/// Plot-ready band data for one polarization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSeries {
    pub k_path: Vec<[f64; 3]>,
    pub distances: Vec<f64>,
    /// `bands[b][k]`: frequency of band `b` at path point `k`.
    pub bands: Vec<Vec<f64>>,
    pub gaps: Vec<BandGap>,
}

impl BandSeries {
    /// Transpose `all_freqs` (indexed `[k][band]`) into per-band series.
    /// Rows shorter than the longest one leave `NaN` holes.
    pub fn new(k_path: Vec<[f64; 3]>, all_freqs: &[Vec<f64>], gaps: Vec<BandGap>) -> Self {
        let n_bands = all_freqs.iter().map(Vec::len).max().unwrap_or(0);
        let bands = (0..n_bands)
            .map(|band| {
                all_freqs
                    .iter()
                    .map(|row| row.get(band).copied().unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();
        Self {
            distances: accumulate_distances(&k_path),
            k_path,
            bands,
            gaps,
        }
    }

    /// Gaps wider than `min_percent`, the ones worth shading.
    pub fn significant_gaps(&self, min_percent: f64) -> impl Iterator<Item = &BandGap> {
        self.gaps.iter().filter(move |gap| gap.percent > min_percent)
    }
}

pub(crate) fn format_frequency_summary(values: &[f64]) -> String {
    if values.is_empty() {
        return "frequencies=[]".to_string();
    }
    let mut summary = String::with_capacity("frequencies=[".len() + values.len() * 12 + 1);
    summary.push_str("frequencies=[");
    for (idx, &value) in values.iter().enumerate() {
        if idx > 0 {
            summary.push(' ');
        }
        summary.push_str(&format_frequency_value(value));
    }
    summary.push(']');
    summary
}

fn format_frequency_value(value: f64) -> String {
    let abs = value.abs();
    if (1e-3..=1e2).contains(&abs) {
        format!("{value:+10.3}")
    } else {
        format!("{value:+10.2e}")
    }
}
