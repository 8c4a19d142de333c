//! Hierarchical grouping of modes: polarization → wavevector → frequency.
//!
//! # Algorithm
//!
//! 1. Partition by polarization tag, keeping first-appearance order.
//! 2. Within each polarization, partition by exact wavevector value.
//! 3. Within each (polarization, wavevector) partition, sort by frequency and
//!    walk the list once. A mode joins the open cluster when its frequency is
//!    within `frequency_tolerance` of the *last* mode appended to it;
//!    otherwise the cluster is sealed and a new one starts.
//!
//! The tolerance is chained, not a fixed radius: a cluster can drift
//! arbitrarily far from its first member as long as each step stays within
//! tolerance. Every cluster is keyed by its last member's frequency rounded to
//! four decimals.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::ModeError;
use crate::mode::ModeRecord;
use crate::polarization::Polarization;

pub const DEFAULT_FREQUENCY_TOLERANCE: f64 = 0.01;

/// Decimal digits kept in a cluster key.
const KEY_DECIMALS: i32 = 4;

// ============================================================================
// Result types
// ============================================================================

#[derive(Debug, Clone)]
pub struct ModeGroups<'a> {
    polarizations: Vec<PolarizationGroup<'a>>,
}

#[derive(Debug, Clone)]
pub struct PolarizationGroup<'a> {
    pub polarization: Polarization,
    pub k_points: Vec<KPointGroup<'a>>,
}

#[derive(Debug, Clone)]
pub struct KPointGroup<'a> {
    pub k_point: [f64; 3],
    /// Clusters in ascending frequency order.
    pub clusters: Vec<FrequencyCluster<'a>>,
}

#[derive(Debug, Clone)]
pub struct FrequencyCluster<'a> {
    /// Last member's frequency rounded to four decimals.
    pub key: f64,
    /// Members in ascending frequency order.
    pub modes: Vec<&'a ModeRecord>,
}

impl<'a> ModeGroups<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, PolarizationGroup<'a>> {
        self.polarizations.iter()
    }

    pub fn len(&self) -> usize {
        self.polarizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polarizations.is_empty()
    }

    pub fn get(&self, polarization: &Polarization) -> Option<&PolarizationGroup<'a>> {
        self.polarizations
            .iter()
            .find(|group| &group.polarization == polarization)
    }

    /// Direct access to one leaf. `key` is rounded the same way cluster keys
    /// are before comparison.
    pub fn cluster(
        &self,
        polarization: &Polarization,
        k_point: [f64; 3],
        key: f64,
    ) -> Option<&FrequencyCluster<'a>> {
        self.get(polarization)?.get(k_point)?.get(key)
    }

    /// Every `(polarization, k_point, cluster)` leaf in order.
    pub fn leaves<'s>(
        &'s self,
    ) -> impl Iterator<Item = (&'s Polarization, [f64; 3], &'s FrequencyCluster<'a>)> + 's {
        self.polarizations.iter().flat_map(|pol| {
            pol.k_points.iter().flat_map(move |kg| {
                kg.clusters
                    .iter()
                    .map(move |cluster| (&pol.polarization, kg.k_point, cluster))
            })
        })
    }

    pub fn total_modes(&self) -> usize {
        self.leaves().map(|(_, _, cluster)| cluster.modes.len()).sum()
    }

    pub fn summary(&self) -> Vec<ClusterSummary> {
        self.leaves()
            .map(|(polarization, k_point, cluster)| ClusterSummary {
                polarization: polarization.clone(),
                k_point,
                key: cluster.key,
                bands: cluster.modes.iter().map(|m| m.band()).collect(),
                freqs: cluster.modes.iter().map(|m| m.freq()).collect(),
            })
            .collect()
    }
}

impl<'a> PolarizationGroup<'a> {
    pub fn get(&self, k_point: [f64; 3]) -> Option<&KPointGroup<'a>> {
        let key = KPointKey::new(k_point);
        self.k_points
            .iter()
            .find(|group| KPointKey::new(group.k_point) == key)
    }
}

impl<'a> KPointGroup<'a> {
    pub fn get(&self, key: f64) -> Option<&FrequencyCluster<'a>> {
        let key = round_key(key);
        self.clusters.iter().find(|cluster| cluster.key == key)
    }
}

/// Owned, serializable view of one grouping leaf.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub polarization: Polarization,
    pub k_point: [f64; 3],
    pub key: f64,
    pub bands: Vec<usize>,
    pub freqs: Vec<f64>,
}

// ============================================================================
// Grouping passes
// ============================================================================

/// Group `modes` by polarization, then wavevector, then chained frequency
/// clusters. Fails on an empty input.
pub fn group_modes(
    modes: &[ModeRecord],
    frequency_tolerance: f64,
) -> Result<ModeGroups<'_>, ModeError> {
    if modes.is_empty() {
        return Err(ModeError::EmptyStore);
    }
    let polarizations = group_by_polarization(modes)
        .into_iter()
        .map(|(polarization, modes_p)| PolarizationGroup {
            polarization,
            k_points: group_by_k_point(modes_p)
                .into_iter()
                .map(|(k_point, modes_pk)| KPointGroup {
                    k_point,
                    clusters: cluster_by_frequency(modes_pk, frequency_tolerance),
                })
                .collect(),
        })
        .collect();
    let groups = ModeGroups { polarizations };
    log::debug!(
        "grouped {} modes into {} polarization(s), {} cluster(s)",
        modes.len(),
        groups.len(),
        groups.leaves().count()
    );
    Ok(groups)
}

pub fn group_by_polarization<'a, I>(modes: I) -> Vec<(Polarization, Vec<&'a ModeRecord>)>
where
    I: IntoIterator<Item = &'a ModeRecord>,
{
    let mut index: HashMap<&'a Polarization, usize> = HashMap::new();
    let mut groups: Vec<(Polarization, Vec<&'a ModeRecord>)> = Vec::new();
    for mode in modes {
        let slot = *index.entry(mode.polarization()).or_insert_with(|| {
            groups.push((mode.polarization().clone(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(mode);
    }
    groups
}

pub fn group_by_k_point<'a, I>(modes: I) -> Vec<([f64; 3], Vec<&'a ModeRecord>)>
where
    I: IntoIterator<Item = &'a ModeRecord>,
{
    let mut index: HashMap<KPointKey, usize> = HashMap::new();
    let mut groups: Vec<([f64; 3], Vec<&'a ModeRecord>)> = Vec::new();
    for mode in modes {
        let k_point = mode.k_point();
        let slot = *index.entry(KPointKey::new(k_point)).or_insert_with(|| {
            groups.push((k_point, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(mode);
    }
    groups
}

/// Chained-tolerance clustering of one (polarization, wavevector) partition.
pub fn cluster_by_frequency<'a>(
    mut modes: Vec<&'a ModeRecord>,
    frequency_tolerance: f64,
) -> Vec<FrequencyCluster<'a>> {
    // Stable sort keeps append order among equal frequencies.
    modes.sort_by(|a, b| a.freq().total_cmp(&b.freq()));

    let mut clusters = Vec::new();
    let mut current: Vec<&'a ModeRecord> = Vec::new();
    for mode in modes {
        let joins = current
            .last()
            .map_or(true, |last| (mode.freq() - last.freq()).abs() <= frequency_tolerance);
        if !joins {
            clusters.push(seal(std::mem::take(&mut current)));
        }
        current.push(mode);
    }
    if !current.is_empty() {
        clusters.push(seal(current));
    }
    clusters
}

fn seal(modes: Vec<&ModeRecord>) -> FrequencyCluster<'_> {
    let last = modes.last().map_or(0.0, |mode| mode.freq());
    FrequencyCluster {
        key: round_key(last),
        modes,
    }
}

fn round_key(freq: f64) -> f64 {
    let scale = 10f64.powi(KEY_DECIMALS);
    (freq * scale).round() / scale
}

/// Hashable exact-value wavevector key. `-0.0` and `0.0` compare equal, as
/// they do under `==`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KPointKey([u64; 3]);

impl KPointKey {
    fn new(k: [f64; 3]) -> Self {
        Self(k.map(|c| (c + 0.0).to_bits()))
    }
}
