#![cfg(test)]

use num_complex::Complex64;

use super::error::ModeError;
use super::field::VectorField3D;
use super::field_algebra::{decompose_normal_to_k, max_norm, norm, normal_to_k, sum_fields};
use super::grid::Grid3D;
use super::test_support::{assert_close, c, uniform_field};

fn ramp(grid: Grid3D) -> VectorField3D {
    VectorField3D::from_fn(grid, |ix, iy, iz| {
        [
            Complex64::new(ix as f64 + 0.5, -(iy as f64)),
            Complex64::new(0.25 * iy as f64, 1.0),
            Complex64::new(-(iz as f64), 0.5 * ix as f64),
        ]
    })
}

#[test]
fn sum_of_one_field_is_identity() {
    let field = ramp(Grid3D::new(2, 3, 2));
    assert_eq!(sum_fields([&field]).unwrap(), field);
}

#[test]
fn sum_adds_complex_components() {
    let grid = Grid3D::planar(2, 2);
    let a = ramp(grid);
    let b = uniform_field(grid, [1.0, 2.0, 3.0]);
    let total = sum_fields([&a, &b, &b]).unwrap();
    for (ix, iy, iz) in grid.points() {
        for comp in 0..3 {
            let expected = *a.get(ix, iy, iz, comp) + *b.get(ix, iy, iz, comp) * 2.0;
            assert_eq!(*total.get(ix, iy, iz, comp), expected);
        }
    }
}

#[test]
fn sum_rejects_empty_and_mismatched_input() {
    assert!(matches!(sum_fields(std::iter::empty::<&VectorField3D>()), Err(ModeError::NoFields)));

    let a = ramp(Grid3D::planar(2, 2));
    let b = ramp(Grid3D::planar(2, 3));
    assert!(matches!(
        sum_fields([&a, &b]),
        Err(ModeError::ShapeMismatch { expected: [2, 2, 1], found: [2, 3, 1] })
    ));
}

#[test]
fn norm_uses_real_parts_only() {
    let grid = Grid3D::planar(1, 1);
    let field = VectorField3D::from_fn(grid, |_, _, _| {
        [Complex64::new(3.0, 100.0), Complex64::new(4.0, -50.0), Complex64::new(0.0, 7.0)]
    });
    let n = norm(&field);
    assert_close(n.get(0, 0, 0), 5.0, 1e-12);
}

#[test]
fn norm_vanishes_where_real_parts_vanish() {
    let grid = Grid3D::planar(2, 2);
    let mut field = VectorField3D::from_fn(grid, |ix, iy, _| {
        let im = 1.0 + ix as f64 + 2.0 * iy as f64;
        [Complex64::new(0.0, im), Complex64::new(0.0, -im), Complex64::new(0.0, 0.5)]
    });
    field.set_vector(1, 1, 0, [c(0.0), c(0.0), c(3.0)]);
    let n = norm(&field);
    assert_eq!(n.as_slice(), &[0.0, 0.0, 0.0, 3.0]);
}

#[test]
fn norm_is_non_negative_everywhere() {
    let field = ramp(Grid3D::new(3, 3, 2));
    assert!(norm(&field).as_slice().iter().all(|&v| v >= 0.0));
}

#[test]
fn max_norm_picks_largest_point_across_fields() {
    let grid = Grid3D::planar(2, 2);
    let mut a = VectorField3D::zeros(grid);
    a.set_vector(1, 0, 0, [c(1.0), c(2.0), c(2.0)]);
    let b = uniform_field(grid, [1.0, 1.0, 0.0]);
    assert_close(max_norm([&a, &b]), 3.0, 1e-12);
    assert_eq!(max_norm(std::iter::empty::<&VectorField3D>()), 0.0);
}

#[test]
fn max_norm_of_single_real_entry() {
    let grid = Grid3D::planar(2, 2);
    let mut a = VectorField3D::zeros(grid);
    a.set_vector(0, 1, 0, [c(0.0), c(0.0), c(3.0)]);
    let b = VectorField3D::zeros(grid);
    assert_eq!(max_norm([&a, &b]), 3.0);
}

#[test]
fn normal_component_is_orthogonal_to_k() {
    let field = ramp(Grid3D::new(2, 2, 2));
    let ks: [[f64; 3]; 3] = [[0.3, 0.0, 0.0], [0.1, 0.2, 0.0], [0.2, -0.1, 0.4]];
    for k in ks {
        let length = (k[0] * k[0] + k[1] * k[1] + k[2] * k[2]).sqrt();
        let perp = normal_to_k(&field, k).unwrap();
        for v in perp.vectors() {
            let dot = (v[0] * k[0] + v[1] * k[1] + v[2] * k[2]) / length;
            assert!(dot.norm() < 1e-12, "k={k:?} dot={dot}");
        }
    }
}

#[test]
fn decompose_along_axis_zeroes_that_component() {
    let grid = Grid3D::planar(2, 2);
    let e = uniform_field(grid, [1.0, 2.0, 3.0]);
    let h = uniform_field(grid, [4.0, 5.0, 6.0]);
    let perp = decompose_normal_to_k([&e, &h], [0.0, 0.25, 0.0]).unwrap();
    assert_eq!(perp.len(), 2);
    assert_eq!(perp[0].vector(0, 0, 0), [c(1.0), c(0.0), c(3.0)]);
    assert_eq!(perp[1].vector(1, 1, 0), [c(4.0), c(0.0), c(6.0)]);
}

#[test]
fn projection_is_idempotent() {
    let field = ramp(Grid3D::new(2, 3, 1));
    let k = [0.1, 0.3, 0.0];
    let once = normal_to_k(&field, k).unwrap();
    let twice = normal_to_k(&once, k).unwrap();
    for (a, b) in once.as_slice().iter().zip(twice.as_slice()) {
        assert!((a - b).norm() < 1e-12);
    }
}

#[test]
fn zero_wavevector_is_rejected() {
    let field = ramp(Grid3D::planar(2, 2));
    assert!(matches!(
        decompose_normal_to_k([&field], [0.0; 3]),
        Err(ModeError::ZeroWavevector)
    ));
    assert!(matches!(
        normal_to_k(&field, [f64::INFINITY, 0.0, 0.0]),
        Err(ModeError::NonFiniteWavevector(_))
    ));
}
