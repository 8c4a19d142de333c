//! Lattice presets and wavevector paths.
//!
//! Wavevectors are in reciprocal-lattice (fractional) coordinates, the
//! convention the band solver uses for `k_point`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    Square,
    Triangular,
}

impl LatticeKind {
    pub const ALL: [LatticeKind; 2] = [LatticeKind::Square, LatticeKind::Triangular];

    pub fn as_str(self) -> &'static str {
        match self {
            LatticeKind::Square => "square",
            LatticeKind::Triangular => "triangular",
        }
    }

    /// Unit cell of a 2D crystal.
    pub fn lattice(self) -> Lattice {
        self.slab_lattice(0.0)
    }

    /// Unit cell of a slab supercell of the given height along z. A height
    /// of zero means no extent along z.
    pub fn slab_lattice(self, height_supercell: f64) -> Lattice {
        let basis2 = match self {
            LatticeKind::Square => [0.0, 1.0, 0.0],
            LatticeKind::Triangular => [0.5, 3f64.sqrt() / 2.0, 0.0],
        };
        Lattice {
            size: [1.0, 1.0, height_supercell],
            basis1: [1.0, 0.0, 0.0],
            basis2,
        }
    }

    /// Named high-symmetry points of the first Brillouin zone.
    pub fn high_symmetry_points(self) -> Vec<(&'static str, [f64; 3])> {
        match self {
            LatticeKind::Square => vec![
                ("Γ", [0.0, 0.0, 0.0]),
                ("X", [0.5, 0.0, 0.0]),
                ("M", [0.5, 0.5, 0.0]),
            ],
            LatticeKind::Triangular => vec![
                ("Γ", [0.0, 0.0, 0.0]),
                ("K", [1.0 / 3.0, 1.0 / 3.0, 0.0]),
                ("M", [0.5, 0.0, 0.0]),
            ],
        }
    }

    /// Closed corner path used when no explicit path is configured.
    pub fn default_k_path(self) -> Vec<[f64; 3]> {
        match self {
            LatticeKind::Square => vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.5, 0.0],
                [0.5, 0.5, 0.0],
                [0.0, 0.0, 0.0],
            ],
            LatticeKind::Triangular => vec![
                [0.0, 0.0, 0.0],
                [0.0, 0.5, 0.0],
                [-1.0 / 3.0, 1.0 / 3.0, 0.0],
                [0.0, 0.0, 0.0],
            ],
        }
    }
}

impl fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatticeKind {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LatticeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ModeError::invalid_choice("lattice type", s, &["square", "triangular"]))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    pub size: [f64; 3],
    pub basis1: [f64; 3],
    pub basis2: [f64; 3],
}

/// The X → Γ → Y path used for effective-parameter studies, where modes
/// propagate along a single axis.
pub fn xy_path(k_point_max: f64) -> Vec<[f64; 3]> {
    vec![
        [k_point_max, 0.0, 0.0],
        [0.0, 0.0, 0.0],
        [0.0, k_point_max, 0.0],
    ]
}

/// Band-diagram tick labels for the XY path.
pub fn xy_points_near_gamma(distance: f64) -> Result<Vec<(&'static str, [f64; 3])>, ModeError> {
    if distance >= 0.5 {
        return Err(ModeError::InvalidDistance(distance));
    }
    Ok(vec![
        ("X", [0.5, 0.0, 0.0]),
        ("Γ", [0.0, 0.0, 0.0]),
        ("Y", [0.0, 0.5, 0.0]),
    ])
}

/// Insert `n` evenly spaced points between each consecutive pair of
/// `nodes`. The result has `nodes.len() + n * (nodes.len() - 1)` points and
/// contains every node.
pub fn interpolate(n: usize, nodes: &[[f64; 3]]) -> Vec<[f64; 3]> {
    if nodes.len() <= 1 {
        return nodes.to_vec();
    }
    let segments = n + 1;
    let mut path = Vec::with_capacity(nodes.len() + n * (nodes.len() - 1));
    path.push(nodes[0]);
    for window in nodes.windows(2) {
        let (start, end) = (window[0], window[1]);
        for step in 1..=segments {
            let t = step as f64 / segments as f64;
            let point = if step == segments {
                end
            } else {
                [0, 1, 2].map(|c| (1.0 - t) * start[c] + t * end[c])
            };
            path.push(point);
        }
    }
    path
}

/// Cumulative Euclidean path length at each point, starting at zero.
pub fn accumulate_distances(k_path: &[[f64; 3]]) -> Vec<f64> {
    if k_path.is_empty() {
        return Vec::new();
    }
    let mut distances = Vec::with_capacity(k_path.len());
    let mut total = 0.0;
    distances.push(0.0);
    for pair in k_path.windows(2) {
        total += crate::lookup::k_distance(pair[0], pair[1]);
        distances.push(total);
    }
    distances
}
