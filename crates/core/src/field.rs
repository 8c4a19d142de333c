//! Contiguous complex-valued vector field storage on a uniform 3D grid.
//!
//! A [`VectorField3D`] is the Rust counterpart of the solver's
//! `(nx, ny, nz, 3)` field arrays: every grid point carries three complex
//! Cartesian components stored next to each other, so
//! `data[grid.idx(ix, iy, iz) * 3 + c]` is component `c` at `(ix, iy, iz)`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::ModeError;
use crate::grid::Grid3D;

/// Number of Cartesian components per grid point.
pub const COMPONENTS: usize = 3;

pub type FieldScalar = Complex64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorField3D {
    grid: Grid3D,
    data: Vec<FieldScalar>,
}

impl VectorField3D {
    pub fn zeros(grid: Grid3D) -> Self {
        Self {
            data: vec![FieldScalar::default(); grid.len() * COMPONENTS],
            grid,
        }
    }

    pub fn from_vec(grid: Grid3D, data: Vec<FieldScalar>) -> Self {
        assert_eq!(
            data.len(),
            grid.len() * COMPONENTS,
            "data length must match grid size"
        );
        Self { grid, data }
    }

    /// Fallible variant of [`VectorField3D::from_vec`] for data coming from
    /// outside the crate (solver callbacks, files).
    pub fn try_from_vec(grid: Grid3D, data: Vec<FieldScalar>) -> Result<Self, ModeError> {
        let field = Self { grid, data };
        field.check_len()?;
        Ok(field)
    }

    /// Build a field by evaluating `f` at every grid point.
    pub fn from_fn<F>(grid: Grid3D, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> [FieldScalar; COMPONENTS],
    {
        let mut data = Vec::with_capacity(grid.len() * COMPONENTS);
        for (ix, iy, iz) in grid.points() {
            data.extend_from_slice(&f(ix, iy, iz));
        }
        Self { grid, data }
    }

    pub(crate) fn check_len(&self) -> Result<(), ModeError> {
        if self.data.len() != self.grid.len() * COMPONENTS {
            return Err(ModeError::FieldLength {
                len: self.data.len(),
                grid: self.grid.shape(),
            });
        }
        Ok(())
    }

    /// Number of scalar entries (grid points × 3).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn grid(&self) -> Grid3D {
        self.grid
    }

    /// Shape in the solver's `(nx, ny, nz, 3)` convention.
    pub fn shape(&self) -> [usize; 4] {
        [self.grid.nx, self.grid.ny, self.grid.nz, COMPONENTS]
    }

    #[inline]
    pub fn idx(&self, ix: usize, iy: usize, iz: usize, component: usize) -> usize {
        self.grid.idx(ix, iy, iz) * COMPONENTS + component
    }

    pub fn as_slice(&self) -> &[FieldScalar] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [FieldScalar] {
        &mut self.data
    }

    pub fn get(&self, ix: usize, iy: usize, iz: usize, component: usize) -> &FieldScalar {
        let idx = self.idx(ix, iy, iz, component);
        &self.data[idx]
    }

    pub fn get_mut(&mut self, ix: usize, iy: usize, iz: usize, component: usize) -> &mut FieldScalar {
        let idx = self.idx(ix, iy, iz, component);
        &mut self.data[idx]
    }

    /// The three components at one grid point.
    pub fn vector(&self, ix: usize, iy: usize, iz: usize) -> [FieldScalar; COMPONENTS] {
        let start = self.idx(ix, iy, iz, 0);
        [self.data[start], self.data[start + 1], self.data[start + 2]]
    }

    pub fn set_vector(&mut self, ix: usize, iy: usize, iz: usize, value: [FieldScalar; COMPONENTS]) {
        let start = self.idx(ix, iy, iz, 0);
        self.data[start..start + COMPONENTS].copy_from_slice(&value);
    }

    /// Per-point component triples in storage order.
    pub fn vectors(&self) -> std::slice::ChunksExact<'_, FieldScalar> {
        self.data.chunks_exact(COMPONENTS)
    }

    pub fn vectors_mut(&mut self) -> std::slice::ChunksExactMut<'_, FieldScalar> {
        self.data.chunks_exact_mut(COMPONENTS)
    }

    pub fn fill(&mut self, value: FieldScalar) {
        self.data.fill(value);
    }
}

impl From<VectorField3D> for Vec<FieldScalar> {
    fn from(field: VectorField3D) -> Self {
        field.data
    }
}

/// Real-valued scalar quantity sampled on the same grid as a field
/// (norms, extracted components).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField3D {
    grid: Grid3D,
    data: Vec<f64>,
}

impl ScalarField3D {
    pub fn from_vec(grid: Grid3D, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), grid.len(), "data length must match grid size");
        Self { grid, data }
    }

    pub fn grid(&self) -> Grid3D {
        self.grid
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, ix: usize, iy: usize, iz: usize) -> f64 {
        self.data[self.grid.idx(ix, iy, iz)]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Largest sample, or `None` for an empty grid.
    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }
}
