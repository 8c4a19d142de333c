//! Append-only collection of computed modes.

use serde::{Deserialize, Serialize};

use crate::error::ModeError;
use crate::grouping::{self, ModeGroups};
use crate::lookup::{self, ModeQuery};
use crate::mode::ModeRecord;

/// Modes accumulated across one or more solver runs, in append order.
///
/// There is no removal API: records are only borrowed into derived views
/// (lookup results, groupings, estimator inputs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModeStore {
    modes: Vec<ModeRecord>,
}

impl ModeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ModeRecord) {
        self.modes.push(record);
    }

    /// Move every record of `other` to the end of this store, keeping the
    /// order they had in `other`.
    pub fn merge(&mut self, other: ModeStore) {
        self.modes.extend(other.modes);
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ModeRecord> {
        self.modes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModeRecord> {
        self.modes.iter()
    }

    pub fn as_slice(&self) -> &[ModeRecord] {
        &self.modes
    }

    /// Mutable access for attaching annotations; records themselves only
    /// expose annotation setters.
    pub(crate) fn records_mut(&mut self) -> std::slice::IterMut<'_, ModeRecord> {
        self.modes.iter_mut()
    }

    pub fn find(&self, query: &ModeQuery) -> Vec<&ModeRecord> {
        lookup::find(&self.modes, query)
    }

    pub fn group(&self, frequency_tolerance: f64) -> Result<ModeGroups<'_>, ModeError> {
        grouping::group_modes(&self.modes, frequency_tolerance)
    }

    pub(crate) fn validate(&self) -> Result<(), ModeError> {
        self.modes.iter().try_for_each(ModeRecord::validate)
    }
}

impl Extend<ModeRecord> for ModeStore {
    fn extend<T: IntoIterator<Item = ModeRecord>>(&mut self, iter: T) {
        self.modes.extend(iter);
    }
}

impl FromIterator<ModeRecord> for ModeStore {
    fn from_iter<T: IntoIterator<Item = ModeRecord>>(iter: T) -> Self {
        Self {
            modes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ModeStore {
    type Item = &'a ModeRecord;
    type IntoIter = std::slice::Iter<'a, ModeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.modes.iter()
    }
}
