//! Symmetry annotations attached to modes after a run.
//!
//! Classification is pluggable through [`SymmetryClassifier`]; the built-in
//! [`MirrorClassifier`] scores the overlap of a field with its mirror image
//! across the x and y axes of the cell.

use serde::{Deserialize, Serialize};

use crate::field::VectorField3D;
use crate::mode::ModeRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReflectionAxis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    #[default]
    Even,
    Odd,
}

/// One symmetry test result: normalized overlap in `[-1, 1]` and the parity
/// it implies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymmetryScore {
    pub label: String,
    pub overlap: f64,
    pub parity: Parity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModeSymmetries {
    pub scores: Vec<SymmetryScore>,
}

impl ModeSymmetries {
    pub fn get(&self, label: &str) -> Option<&SymmetryScore> {
        self.scores.iter().find(|score| score.label == label)
    }
}

pub trait SymmetryClassifier {
    fn classify(&self, mode: &ModeRecord) -> ModeSymmetries;
}

impl<F> SymmetryClassifier for F
where
    F: Fn(&ModeRecord) -> ModeSymmetries,
{
    fn classify(&self, mode: &ModeRecord) -> ModeSymmetries {
        self(mode)
    }
}

/// Which of a mode's fields a classifier inspects.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Electric,
    Magnetic,
}

/// Mirror-parity classifier over the periodic cell.
///
/// E is a polar vector: the component normal to the mirror plane flips sign.
/// H is axial: the two in-plane components flip instead.
#[derive(Debug, Clone, Default)]
pub struct MirrorClassifier {
    pub field: FieldKind,
}

impl MirrorClassifier {
    pub fn new(field: FieldKind) -> Self {
        Self { field }
    }
}

impl SymmetryClassifier for MirrorClassifier {
    fn classify(&self, mode: &ModeRecord) -> ModeSymmetries {
        let field = match self.field {
            FieldKind::Electric => mode.e_field(),
            FieldKind::Magnetic => mode.h_field(),
        };
        let scores = [ReflectionAxis::X, ReflectionAxis::Y]
            .into_iter()
            .map(|axis| {
                let overlap = mirror_overlap(field, axis, self.field);
                SymmetryScore {
                    label: match axis {
                        ReflectionAxis::X => "mirror_x".to_string(),
                        ReflectionAxis::Y => "mirror_y".to_string(),
                    },
                    overlap,
                    parity: if overlap >= 0.0 { Parity::Even } else { Parity::Odd },
                }
            })
            .collect();
        ModeSymmetries { scores }
    }
}

/// `Re⟨F, σF⟩ / ⟨F, F⟩`, or `0.0` for a vanishing field.
pub fn mirror_overlap(field: &VectorField3D, axis: ReflectionAxis, kind: FieldKind) -> f64 {
    let grid = field.grid();
    let signs = component_signs(axis, kind);
    let mut overlap = 0.0;
    let mut weight = 0.0;
    for (ix, iy, iz) in grid.points() {
        let (mx, my) = match axis {
            ReflectionAxis::X => (mirror_index(grid.nx, ix), iy),
            ReflectionAxis::Y => (ix, mirror_index(grid.ny, iy)),
        };
        let value = field.vector(ix, iy, iz);
        let mirrored = field.vector(mx, my, iz);
        for c in 0..3 {
            overlap += (value[c].conj() * mirrored[c] * signs[c]).re;
            weight += value[c].norm_sqr();
        }
    }
    if weight == 0.0 { 0.0 } else { overlap / weight }
}

fn component_signs(axis: ReflectionAxis, kind: FieldKind) -> [f64; 3] {
    let polar = match axis {
        ReflectionAxis::X => [-1.0, 1.0, 1.0],
        ReflectionAxis::Y => [1.0, -1.0, 1.0],
    };
    match kind {
        FieldKind::Electric => polar,
        FieldKind::Magnetic => polar.map(|s| -s),
    }
}

fn mirror_index(len: usize, idx: usize) -> usize {
    if len == 0 { 0 } else { (len - idx) % len }
}
