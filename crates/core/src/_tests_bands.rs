#![cfg(test)]

use super::bands::{compute_gaps, format_frequency_summary, BandGap, BandSeries};
use super::test_support::assert_close;

#[test]
fn gap_percent_is_relative_to_midgap() {
    let gap = BandGap::new(0.3, 0.5);
    assert_close(gap.percent, 50.0, 1e-12);
}

#[test]
fn gaps_require_separation_at_every_wavevector() {
    let freqs = vec![
        vec![0.10, 0.30, 0.35],
        vec![0.20, 0.40, 0.45],
        vec![0.25, 0.42, 0.50],
    ];
    let gaps = compute_gaps(&freqs);
    // Band 1 max 0.25 < band 2 min 0.30; bands 2 and 3 overlap (0.42 > 0.35).
    assert_eq!(gaps.len(), 1);
    assert_close(gaps[0].lower, 0.25, 1e-12);
    assert_close(gaps[0].upper, 0.30, 1e-12);
}

#[test]
fn no_data_means_no_gaps() {
    assert!(compute_gaps(&[]).is_empty());
    assert!(compute_gaps(&[vec![0.2]]).is_empty());
}

#[test]
fn band_series_transposes_rows() {
    let k_path = vec![[0.0, 0.0, 0.0], [0.5, 0.0, 0.0]];
    let freqs = vec![vec![0.1, 0.3], vec![0.2]];
    let series = BandSeries::new(k_path, &freqs, Vec::new());

    assert_eq!(series.bands.len(), 2);
    assert_eq!(series.bands[0], vec![0.1, 0.2]);
    assert_eq!(series.bands[1][0], 0.3);
    assert!(series.bands[1][1].is_nan(), "missing entries become NaN");
    assert_eq!(series.distances, vec![0.0, 0.5]);
}

#[test]
fn significant_gaps_filter_by_width() {
    let series = BandSeries::new(
        Vec::new(),
        &[],
        vec![BandGap::new(0.30, 0.301), BandGap::new(0.3, 0.4)],
    );
    let wide: Vec<_> = series.significant_gaps(1.0).collect();
    assert_eq!(wide.len(), 1);
    assert_close(wide[0].upper, 0.4, 1e-12);
}

#[test]
fn frequency_summary_formats_each_value() {
    assert_eq!(format_frequency_summary(&[]), "frequencies=[]");
    let summary = format_frequency_summary(&[0.25, 1e-5]);
    assert!(summary.starts_with("frequencies=["));
    assert!(summary.contains("+0.250"));
    assert!(summary.contains("e-5"));
}
