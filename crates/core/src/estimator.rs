//! Effective-medium parameters from a mode's boundary fields.
//!
//! A mode propagating along a primary axis is reduced to transverse field
//! ratios on the cell face normal to that axis. Their spatial mean is an
//! effective wave impedance, from which homogenized permittivity and
//! permeability follow:
//!
//! ```text
//! Z_x = ⟨Ex / Hz⟩                 Z_z = ⟨Ez / Hx⟩
//! ε_x = -k_y / (Z_x ε₀ f c₀)      ε_z =  k_y / (Z_z ε₀ f c₀)
//! μ_x = -k_y Z_x / (μ₀ f c₀)      μ_z =  k_y Z_z / (μ₀ f c₀)
//! ```
//!
//! Coverage differs per axis:
//!
//! - **y**: impedances and the four transverse ε/μ entries.
//! - **x**: impedances only (`Z_y`, `Z_z`); ε/μ are not derived.
//! - **z**: nothing is derived.
//!
//! Off-axis or zero wavevectors yield an all-`None` record and a warning.
//! Frequencies stay in the solver's reduced units and are combined with the
//! SI constants exactly as written above.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ModeError;
use crate::field::VectorField3D;
use crate::field_algebra::decompose_normal_to_k;
use crate::mode::ModeRecord;
use crate::units::{C_0, EPSILON_0, MU_0};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagationAxis {
    X,
    Y,
    Z,
}

impl PropagationAxis {
    /// Axis along which `k` points. Exactly one component must be nonzero and
    /// the other two exactly zero.
    pub fn classify(k: [f64; 3]) -> Result<Self, ModeError> {
        match (k[0] != 0.0, k[1] != 0.0, k[2] != 0.0) {
            (true, false, false) => Ok(PropagationAxis::X),
            (false, true, false) => Ok(PropagationAxis::Y),
            (false, false, true) => Ok(PropagationAxis::Z),
            _ => Err(ModeError::OffAxisWavevector(k)),
        }
    }

    pub fn index(self) -> usize {
        match self {
            PropagationAxis::X => 0,
            PropagationAxis::Y => 1,
            PropagationAxis::Z => 2,
        }
    }
}

/// Homogenized parameters of one mode. Entries the mode's propagation axis
/// does not determine stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectiveParameters {
    pub eps_eff_x: Option<f64>,
    pub eps_eff_y: Option<f64>,
    pub eps_eff_z: Option<f64>,
    pub mu_eff_x: Option<f64>,
    pub mu_eff_y: Option<f64>,
    pub mu_eff_z: Option<f64>,
    pub z_eff_x: Option<f64>,
    pub z_eff_y: Option<f64>,
    pub z_eff_z: Option<f64>,
    pub freq: f64,
}

impl EffectiveParameters {
    pub fn undetermined(freq: f64) -> Self {
        Self {
            freq,
            ..Self::default()
        }
    }

    pub fn has_material_parameters(&self) -> bool {
        [
            self.eps_eff_x,
            self.eps_eff_y,
            self.eps_eff_z,
            self.mu_eff_x,
            self.mu_eff_y,
            self.mu_eff_z,
        ]
        .iter()
        .any(Option::is_some)
    }
}

pub fn estimate(mode: &ModeRecord) -> EffectiveParameters {
    let k = mode.k_point();
    let freq = mode.freq();
    let axis = match PropagationAxis::classify(k) {
        Ok(axis) => axis,
        Err(err) => {
            log::warn!("effective parameters undetermined for band {}: {err}", mode.band());
            return EffectiveParameters::undetermined(freq);
        }
    };
    if axis == PropagationAxis::Z {
        log::debug!("no effective-parameter derivation for z-propagating modes");
        return EffectiveParameters::undetermined(freq);
    }

    let perpendicular = match decompose_normal_to_k([mode.e_field(), mode.h_field()], k) {
        Ok(fields) => fields,
        Err(err) => {
            log::warn!("effective parameters undetermined for band {}: {err}", mode.band());
            return EffectiveParameters::undetermined(freq);
        }
    };
    let Ok([e_perp, h_perp]) = <[VectorField3D; 2]>::try_from(perpendicular) else {
        return EffectiveParameters::undetermined(freq);
    };

    match axis {
        PropagationAxis::X => along_x(&e_perp, &h_perp, freq),
        PropagationAxis::Y => along_y(&e_perp, &h_perp, k[1], freq),
        PropagationAxis::Z => EffectiveParameters::undetermined(freq),
    }
}

/// [`estimate`] over many modes, in input order.
pub fn estimate_all(modes: &[&ModeRecord]) -> Vec<EffectiveParameters> {
    modes.par_iter().map(|mode| estimate(mode)).collect()
}

fn along_x(e: &VectorField3D, h: &VectorField3D, freq: f64) -> EffectiveParameters {
    let z_eff_y = boundary_impedance(e, h, PropagationAxis::X, 1, 2);
    let z_eff_z = boundary_impedance(e, h, PropagationAxis::X, 2, 1);
    EffectiveParameters {
        z_eff_y: Some(z_eff_y),
        z_eff_z: Some(z_eff_z),
        ..EffectiveParameters::undetermined(freq)
    }
}

fn along_y(e: &VectorField3D, h: &VectorField3D, k_y: f64, freq: f64) -> EffectiveParameters {
    let z_x = boundary_impedance(e, h, PropagationAxis::Y, 0, 2);
    let z_z = boundary_impedance(e, h, PropagationAxis::Y, 2, 0);
    EffectiveParameters {
        eps_eff_x: Some(-k_y / z_x / EPSILON_0 / freq / C_0),
        eps_eff_z: Some(k_y / z_z / EPSILON_0 / freq / C_0),
        mu_eff_x: Some(-k_y * z_x / MU_0 / freq / C_0),
        mu_eff_z: Some(k_y * z_z / MU_0 / freq / C_0),
        z_eff_x: Some(z_x),
        z_eff_z: Some(z_z),
        ..EffectiveParameters::undetermined(freq)
    }
}

/// Mean of `Re E[e_comp] / Re H[h_comp]` over the cell face at index 0
/// along `axis`.
fn boundary_impedance(
    e: &VectorField3D,
    h: &VectorField3D,
    axis: PropagationAxis,
    e_comp: usize,
    h_comp: usize,
) -> f64 {
    let grid = e.grid();
    let mut sum = 0.0;
    let mut count = 0usize;
    for (ix, iy, iz) in grid.points() {
        let on_face = match axis {
            PropagationAxis::X => ix == 0,
            PropagationAxis::Y => iy == 0,
            PropagationAxis::Z => iz == 0,
        };
        if on_face {
            sum += e.get(ix, iy, iz, e_comp).re / h.get(ix, iy, iz, h_comp).re;
            count += 1;
        }
    }
    sum / count as f64
}
