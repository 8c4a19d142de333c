//! Vector-field operations over solver output.
//!
//! Norms here use only the **real part** of each component; the imaginary
//! part is discarded. Callers that derive colorscale or arrow-size references
//! from [`max_norm`] therefore see the amplitude of the real field snapshot,
//! not of the complex phasor.

use num_complex::Complex64;

use crate::error::ModeError;
use crate::field::{ScalarField3D, VectorField3D};

/// Elementwise complex sum of one or more fields of identical shape.
pub fn sum_fields<'a, I>(fields: I) -> Result<VectorField3D, ModeError>
where
    I: IntoIterator<Item = &'a VectorField3D>,
{
    let mut iter = fields.into_iter();
    let mut total = iter.next().ok_or(ModeError::NoFields)?.clone();
    for field in iter {
        ensure_same_shape(&total, field)?;
        for (acc, value) in total.as_mut_slice().iter_mut().zip(field.as_slice()) {
            *acc += value;
        }
    }
    Ok(total)
}

/// Per-point Euclidean norm of the real parts of the three components.
pub fn norm(field: &VectorField3D) -> ScalarField3D {
    let data = field
        .vectors()
        .map(|v| (v[0].re * v[0].re + v[1].re * v[1].re + v[2].re * v[2].re).sqrt())
        .collect();
    ScalarField3D::from_vec(field.grid(), data)
}

/// Largest [`norm`] over every point of every field; `0.0` for no input.
pub fn max_norm<'a, I>(fields: I) -> f64
where
    I: IntoIterator<Item = &'a VectorField3D>,
{
    fields
        .into_iter()
        .filter_map(|field| norm(field).max())
        .fold(0.0, f64::max)
}

/// Remove the component parallel to `k` from every field: at each point
/// `F⊥ = F - (F·k̂) k̂`.
pub fn decompose_normal_to_k<'a, I>(fields: I, k: [f64; 3]) -> Result<Vec<VectorField3D>, ModeError>
where
    I: IntoIterator<Item = &'a VectorField3D>,
{
    let k_hat = unit_vector(k)?;
    Ok(fields
        .into_iter()
        .map(|field| project_normal(field, k_hat))
        .collect())
}

/// Single-field form of [`decompose_normal_to_k`].
pub fn normal_to_k(field: &VectorField3D, k: [f64; 3]) -> Result<VectorField3D, ModeError> {
    Ok(project_normal(field, unit_vector(k)?))
}

fn project_normal(field: &VectorField3D, k_hat: [f64; 3]) -> VectorField3D {
    let mut out = field.clone();
    for v in out.vectors_mut() {
        let parallel: Complex64 = v[0] * k_hat[0] + v[1] * k_hat[1] + v[2] * k_hat[2];
        for (component, k_c) in v.iter_mut().zip(k_hat) {
            *component -= parallel * k_c;
        }
    }
    out
}

fn unit_vector(k: [f64; 3]) -> Result<[f64; 3], ModeError> {
    let length = (k[0] * k[0] + k[1] * k[1] + k[2] * k[2]).sqrt();
    if length == 0.0 {
        return Err(ModeError::ZeroWavevector);
    }
    if !length.is_finite() {
        return Err(ModeError::NonFiniteWavevector(k));
    }
    Ok(k.map(|c| c / length))
}

pub(crate) fn ensure_same_shape(a: &VectorField3D, b: &VectorField3D) -> Result<(), ModeError> {
    let (expected, found) = (a.grid().shape(), b.grid().shape());
    if expected != found {
        return Err(ModeError::ShapeMismatch { expected, found });
    }
    Ok(())
}
