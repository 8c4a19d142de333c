//! The atomic unit of solver output: one computed eigenmode.

use serde::{Deserialize, Serialize};

use crate::error::ModeError;
use crate::field::VectorField3D;
use crate::polarization::Polarization;
use crate::symmetry::ModeSymmetries;

/// One eigenmode at a fixed wavevector and band.
///
/// Records are validated on construction and never change afterwards, except
/// for the symmetry annotation which is attached once a classifier has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRecord {
    band: usize,
    k_point: [f64; 3],
    freq: f64,
    polarization: Polarization,
    h_field: VectorField3D,
    e_field: VectorField3D,
    #[serde(default)]
    symmetries: Option<ModeSymmetries>,
}

impl ModeRecord {
    pub fn new(
        band: usize,
        k_point: [f64; 3],
        freq: f64,
        polarization: Polarization,
        h_field: VectorField3D,
        e_field: VectorField3D,
    ) -> Result<Self, ModeError> {
        let record = Self {
            band,
            k_point,
            freq,
            polarization,
            h_field,
            e_field,
            symmetries: None,
        };
        record.validate()?;
        Ok(record)
    }

    /// Check the record invariants. Called on construction and again for
    /// records read back from disk.
    pub fn validate(&self) -> Result<(), ModeError> {
        if !(self.freq.is_finite() && self.freq > 0.0) {
            return Err(ModeError::InvalidFrequency(self.freq));
        }
        if self.k_point.iter().any(|c| !c.is_finite()) {
            return Err(ModeError::NonFiniteWavevector(self.k_point));
        }
        if self.h_field.grid().is_empty() {
            return Err(ModeError::EmptyGrid(self.h_field.grid().shape()));
        }
        self.h_field.check_len()?;
        self.e_field.check_len()?;
        let (h, e) = (self.h_field.grid().shape(), self.e_field.grid().shape());
        if h != e {
            return Err(ModeError::ShapeMismatch {
                expected: h,
                found: e,
            });
        }
        Ok(())
    }

    /// 1-based band index reported by the solver.
    pub fn band(&self) -> usize {
        self.band
    }

    pub fn k_point(&self) -> [f64; 3] {
        self.k_point
    }

    pub fn freq(&self) -> f64 {
        self.freq
    }

    pub fn polarization(&self) -> &Polarization {
        &self.polarization
    }

    pub fn h_field(&self) -> &VectorField3D {
        &self.h_field
    }

    pub fn e_field(&self) -> &VectorField3D {
        &self.e_field
    }

    pub fn symmetries(&self) -> Option<&ModeSymmetries> {
        self.symmetries.as_ref()
    }

    pub fn set_symmetries(&mut self, symmetries: ModeSymmetries) {
        self.symmetries = Some(symmetries);
    }
}
