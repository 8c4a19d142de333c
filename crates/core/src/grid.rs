//! Uniform 3D sampling grid shared by solver field output.

use serde::{Deserialize, Serialize};

/// Spatial sampling of one unit cell (or supercell) as exported by the solver.
///
/// Storage is row-major with `x` slowest and `z` fastest, matching the
/// `(x, y, z)` index order of the solver's field arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid3D {
    pub nx: usize,
    pub ny: usize,
    #[serde(default = "default_depth")]
    pub nz: usize,
}

impl Grid3D {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Grid for a 2D crystal, which the solver reports with a single z plane.
    pub fn planar(nx: usize, ny: usize) -> Self {
        Self::new(nx, ny, 1)
    }

    #[inline]
    pub fn idx(&self, ix: usize, iy: usize, iz: usize) -> usize {
        (ix * self.ny + iy) * self.nz + iz
    }

    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Iterate `(ix, iy, iz)` in storage order.
    pub fn points(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (ny, nz) = (self.ny, self.nz);
        (0..self.nx).flat_map(move |ix| (0..ny).flat_map(move |iy| (0..nz).map(move |iz| (ix, iy, iz))))
    }
}

fn default_depth() -> usize {
    1
}
