#![cfg(test)]

use num_complex::Complex64;

use super::error::ModeError;
use super::field::VectorField3D;
use super::grid::Grid3D;
use super::test_support::{assert_close, c, uniform_field};
use super::view::{cone_set, field_plane, FieldQuantity};

fn layered() -> VectorField3D {
    VectorField3D::from_fn(Grid3D::new(2, 3, 2), |ix, iy, iz| {
        let re = (10 * ix + iy) as f64 + 100.0 * iz as f64;
        [c(0.0), Complex64::new(3.0, -4.0), Complex64::new(re, -re)]
    })
}

#[test]
fn quantity_parses_known_names() {
    assert_eq!("real".parse::<FieldQuantity>().unwrap(), FieldQuantity::Real);
    assert_eq!("abs".parse::<FieldQuantity>().unwrap(), FieldQuantity::Abs);
    let err = "phase".parse::<FieldQuantity>().unwrap_err();
    assert!(err.to_string().contains("real, imag, abs"));
}

#[test]
fn plane_extracts_one_layer_row_major() {
    let plane = field_plane(&layered(), 2, 1, FieldQuantity::Real).unwrap();
    assert_eq!((plane.nx, plane.ny), (2, 3));
    assert_eq!(plane.values.len(), 6);
    assert_eq!(plane.get(0, 0), 100.0);
    assert_eq!(plane.get(1, 2), 112.0);
    assert_eq!(plane.values[1 * 3 + 2], 112.0);
}

#[test]
fn plane_quantity_selects_part() {
    let field = layered();
    let imag = field_plane(&field, 2, 0, FieldQuantity::Imag).unwrap();
    assert_eq!(imag.get(1, 1), -11.0);
    let abs = field_plane(&field, 1, 0, FieldQuantity::Abs).unwrap();
    assert!(abs.values.iter().all(|&v| (v - 5.0).abs() < 1e-12));
    assert_eq!(abs.range(), Some((5.0, 5.0)));
}

#[test]
fn plane_rejects_out_of_range_indices() {
    let field = layered();
    assert!(matches!(
        field_plane(&field, 3, 0, FieldQuantity::Real),
        Err(ModeError::InvalidComponent(3))
    ));
    assert!(matches!(
        field_plane(&field, 0, 2, FieldQuantity::Real),
        Err(ModeError::InvalidPlane { index: 2, nz: 2 })
    ));
}

#[test]
fn cone_set_shares_size_reference() {
    let grid = Grid3D::planar(2, 2);
    let e = uniform_field(grid, [3.0, 4.0, 0.0]);
    let h = uniform_field(grid, [0.0, 0.0, 1.0]);
    let cones = cone_set([&e, &h]).unwrap();

    assert_eq!(cones.positions.len(), 4);
    assert_eq!(cones.positions[3], [1, 1, 0]);
    assert_eq!(cones.vectors.len(), 2);
    assert_eq!(cones.vectors[0][0], [3.0, 4.0, 0.0]);
    assert_close(cones.size_ref, 5.0, 1e-12);
}

#[test]
fn cone_set_needs_matching_fields() {
    assert!(matches!(
        cone_set(std::iter::empty::<&VectorField3D>()),
        Err(ModeError::NoFields)
    ));
    let a = uniform_field(Grid3D::planar(2, 2), [1.0, 0.0, 0.0]);
    let b = uniform_field(Grid3D::planar(3, 2), [1.0, 0.0, 0.0]);
    assert!(matches!(cone_set([&a, &b]), Err(ModeError::ShapeMismatch { .. })));
}
