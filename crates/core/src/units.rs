//! SI constants used by the effective-parameter estimator.

use std::f64::consts::PI;

/// Vacuum permittivity ε₀ in F/m.
pub const EPSILON_0: f64 = 8.854187817e-12;

/// Vacuum permeability μ₀ in H/m.
pub const MU_0: f64 = 4.0 * PI * 1e-7;

/// Speed of light in vacuum c₀ in m/s.
pub const C_0: f64 = 299_792_458.0;
