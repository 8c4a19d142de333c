//! Plot-ready extracts of mode fields. Nothing here renders; consumers get
//! plain grids and vectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeError;
use crate::field::VectorField3D;
use crate::field_algebra::max_norm;

/// Real-valued quantity taken from a complex field sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldQuantity {
    #[default]
    Real,
    Imag,
    Abs,
}

impl FieldQuantity {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldQuantity::Real => "real",
            FieldQuantity::Imag => "imag",
            FieldQuantity::Abs => "abs",
        }
    }
}

impl fmt::Display for FieldQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldQuantity {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "real" => Ok(FieldQuantity::Real),
            "imag" => Ok(FieldQuantity::Imag),
            "abs" => Ok(FieldQuantity::Abs),
            other => Err(ModeError::invalid_choice(
                "quantity",
                other,
                &["real", "imag", "abs"],
            )),
        }
    }
}

/// One z-plane of one component, reduced to a real quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPlane {
    pub nx: usize,
    pub ny: usize,
    pub component: usize,
    pub quantity: FieldQuantity,
    /// Row-major `[ix][iy]`.
    pub values: Vec<f64>,
}

impl FieldPlane {
    pub fn get(&self, ix: usize, iy: usize) -> f64 {
        self.values[ix * self.ny + iy]
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        let min = self.values.iter().copied().reduce(f64::min)?;
        let max = self.values.iter().copied().reduce(f64::max)?;
        Some((min, max))
    }
}

pub fn field_plane(
    field: &VectorField3D,
    component: usize,
    iz: usize,
    quantity: FieldQuantity,
) -> Result<FieldPlane, ModeError> {
    if component > 2 {
        return Err(ModeError::InvalidComponent(component));
    }
    let grid = field.grid();
    if iz >= grid.nz {
        return Err(ModeError::InvalidPlane {
            index: iz,
            nz: grid.nz,
        });
    }
    let mut values = Vec::with_capacity(grid.nx * grid.ny);
    for ix in 0..grid.nx {
        for iy in 0..grid.ny {
            let sample = field.get(ix, iy, iz, component);
            values.push(match quantity {
                FieldQuantity::Real => sample.re,
                FieldQuantity::Imag => sample.im,
                FieldQuantity::Abs => sample.norm(),
            });
        }
    }
    Ok(FieldPlane {
        nx: grid.nx,
        ny: grid.ny,
        component,
        quantity,
        values,
    })
}

/// Arrow-plot data for a set of fields drawn on a shared scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConeSet {
    /// Grid index of each arrow tail.
    pub positions: Vec<[usize; 3]>,
    /// Real-part vectors, one list per input field.
    pub vectors: Vec<Vec<[f64; 3]>>,
    /// Largest real-part norm across all inputs; the size and color reference.
    pub size_ref: f64,
}

pub fn cone_set<'a, I>(fields: I) -> Result<ConeSet, ModeError>
where
    I: IntoIterator<Item = &'a VectorField3D>,
{
    let fields: Vec<&VectorField3D> = fields.into_iter().collect();
    let first = fields.first().ok_or(ModeError::NoFields)?;
    for field in &fields[1..] {
        crate::field_algebra::ensure_same_shape(first, field)?;
    }
    let grid = first.grid();
    let positions = grid.points().map(|(ix, iy, iz)| [ix, iy, iz]).collect();
    let vectors = fields
        .iter()
        .map(|field| field.vectors().map(|v| [v[0].re, v[1].re, v[2].re]).collect())
        .collect();
    Ok(ConeSet {
        positions,
        vectors,
        size_ref: max_norm(fields.iter().copied()),
    })
}
