//! Post-processing of photonic band-solver output: mode storage, lookup,
//! frequency grouping, field algebra and effective-medium estimates.

pub mod bands;
pub mod config;
pub mod crystal;
pub mod error;
pub mod estimator;
pub mod field;
pub mod field_algebra;
pub mod grid;
pub mod grouping;
pub mod lattice;
pub mod lookup;
pub mod mode;
pub mod polarization;
pub mod quiet;
pub mod solver;
pub mod store;
pub mod sweep;
pub mod symmetry;
pub mod units;
pub mod view;

pub use crystal::PhotonicCrystal;
pub use error::ModeError;
pub use mode::ModeRecord;
pub use polarization::{Polarization, Runner};
pub use store::ModeStore;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod _tests_bands;
#[cfg(test)]
mod _tests_field_algebra;
#[cfg(test)]
mod _tests_lattice;
#[cfg(test)]
mod _tests_lookup;
#[cfg(test)]
mod _tests_polarization;
#[cfg(test)]
mod _tests_view;
