//! The photonic-crystal aggregate: settings, accumulated modes and the
//! per-polarization band data of the latest run.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bands::{BandGap, BandSeries};
use crate::config::{AnalysisConfig, CrystalConfig, CrystalSettings};
use crate::error::ModeError;
use crate::estimator::{estimate_all, EffectiveParameters};
use crate::grouping::ModeGroups;
use crate::lattice::Lattice;
use crate::lookup::ModeQuery;
use crate::mode::ModeRecord;
use crate::polarization::{Polarization, Runner};
use crate::solver::{collect_run, BandSolver};
use crate::store::ModeStore;
use crate::sweep::{sweep_k_points, ThreadMode};
use crate::symmetry::SymmetryClassifier;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotonicCrystal {
    settings: CrystalSettings,
    #[serde(default)]
    analysis: AnalysisConfig,
    #[serde(default)]
    modes: ModeStore,
    /// `freqs[pol][k][band]` from the most recent run per polarization.
    #[serde(default)]
    freqs: BTreeMap<Polarization, Vec<Vec<f64>>>,
    #[serde(default)]
    gaps: BTreeMap<Polarization, Vec<BandGap>>,
    /// Wavevectors the rows of `freqs[pol]` were solved at.
    #[serde(default)]
    paths: BTreeMap<Polarization, Vec<[f64; 3]>>,
}

impl PhotonicCrystal {
    pub fn new(settings: CrystalSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn from_config(config: &CrystalConfig) -> Self {
        Self {
            settings: config.crystal.clone(),
            analysis: config.analysis,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &CrystalSettings {
        &self.settings
    }

    pub fn analysis(&self) -> &AnalysisConfig {
        &self.analysis
    }

    pub fn lattice(&self) -> Lattice {
        self.settings.lattice.lattice()
    }

    pub fn k_points(&self) -> Vec<[f64; 3]> {
        self.settings.k_points()
    }

    pub fn k_points_interpolated(&self) -> Vec<[f64; 3]> {
        self.settings.k_points_interpolated()
    }

    pub fn modes(&self) -> &ModeStore {
        &self.modes
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Drive `solver` once and append one record per band callback, tagged
    /// with `polarization` or the runner's default tag. The band data stored
    /// for that tag is replaced by this run's. Returns the number of records
    /// appended.
    ///
    /// A failed run leaves the crystal untouched.
    pub fn run_simulation<S>(
        &mut self,
        solver: &mut S,
        runner: Runner,
        polarization: Option<Polarization>,
    ) -> Result<usize, ModeError>
    where
        S: BandSolver + ?Sized,
    {
        let polarization = polarization.unwrap_or_else(|| runner.into());
        let output = collect_run(solver, runner, &polarization)?;
        let appended = output.modes.len();
        let path = reported_path(&output.modes);
        self.modes.extend(output.modes);
        self.paths.insert(polarization.clone(), path);
        self.freqs
            .insert(polarization.clone(), output.summary.all_freqs);
        self.gaps.insert(polarization, output.summary.gaps);
        Ok(appended)
    }

    /// Solve each wavevector with its own solver in parallel. Same ingestion
    /// and band-data rules as [`PhotonicCrystal::run_simulation`].
    pub fn run_sweep<S, F>(
        &mut self,
        k_points: &[[f64; 3]],
        runner: Runner,
        polarization: Option<Polarization>,
        threads: ThreadMode,
        make_solver: F,
    ) -> Result<usize, ModeError>
    where
        S: BandSolver,
        F: Fn([f64; 3]) -> S + Sync,
    {
        let polarization = polarization.unwrap_or_else(|| runner.into());
        let output = sweep_k_points(k_points, runner, &polarization, threads, make_solver)?;
        let appended = output.modes.len();
        self.modes.merge(output.modes);
        self.paths.insert(polarization.clone(), k_points.to_vec());
        self.freqs
            .insert(polarization.clone(), output.summary.all_freqs);
        self.gaps.insert(polarization, output.summary.gaps);
        Ok(appended)
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    pub fn find_modes(&self, query: &ModeQuery) -> Vec<&ModeRecord> {
        self.modes.find(query)
    }

    pub fn group_modes(&self, frequency_tolerance: f64) -> Result<ModeGroups<'_>, ModeError> {
        self.modes.group(frequency_tolerance)
    }

    /// Attach a symmetry annotation to every stored mode.
    pub fn classify_symmetries<C>(&mut self, classifier: &C) -> Result<(), ModeError>
    where
        C: SymmetryClassifier + ?Sized,
    {
        if self.modes.is_empty() {
            return Err(ModeError::EmptyStore);
        }
        for record in self.modes.records_mut() {
            let symmetries = classifier.classify(record);
            record.set_symmetries(symmetries);
        }
        log::debug!("[symmetry] classified {} modes", self.modes.len());
        Ok(())
    }

    pub fn effective_parameters(&self, modes: &[&ModeRecord]) -> Vec<EffectiveParameters> {
        estimate_all(modes)
    }

    // ========================================================================
    // Band Data
    // ========================================================================

    pub fn polarizations(&self) -> impl Iterator<Item = &Polarization> {
        self.freqs.keys()
    }

    pub fn freqs(&self, polarization: &Polarization) -> Option<&[Vec<f64>]> {
        self.freqs.get(polarization).map(Vec::as_slice)
    }

    pub fn gaps(&self, polarization: &Polarization) -> Option<&[BandGap]> {
        self.gaps.get(polarization).map(Vec::as_slice)
    }

    /// Per-band frequency series along the solved path for `polarization`.
    pub fn band_series(&self, polarization: &Polarization) -> Result<BandSeries, ModeError> {
        let freqs = self
            .freqs
            .get(polarization)
            .ok_or_else(|| ModeError::NoBandData(polarization.clone()))?;
        let mut k_path = self.paths.get(polarization).cloned().unwrap_or_default();
        if k_path.len() != freqs.len() {
            log::warn!(
                "[bands] pol={polarization}: {} path points for {} frequency rows; using row indices",
                k_path.len(),
                freqs.len()
            );
            k_path = (0..freqs.len()).map(|i| [i as f64, 0.0, 0.0]).collect();
        }
        let gaps = self.gaps.get(polarization).cloned().unwrap_or_default();
        Ok(BandSeries::new(k_path, freqs, gaps))
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub fn save(&self, path: &Path) -> Result<(), ModeError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        log::info!(
            "[io] saved {} modes to {}",
            self.modes.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ModeError> {
        let reader = BufReader::new(File::open(path)?);
        let crystal: PhotonicCrystal = serde_json::from_reader(reader)?;
        crystal.modes.validate()?;
        log::info!(
            "[io] loaded {} modes from {}",
            crystal.modes.len(),
            path.display()
        );
        Ok(crystal)
    }
}

/// Wavevectors in the order the solver reported them, one per run of
/// consecutive records.
fn reported_path(modes: &[ModeRecord]) -> Vec<[f64; 3]> {
    let mut path: Vec<[f64; 3]> = Vec::new();
    for mode in modes {
        if path.last() != Some(&mode.k_point()) {
            path.push(mode.k_point());
        }
    }
    path
}
