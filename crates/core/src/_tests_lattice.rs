#![cfg(test)]

use super::error::ModeError;
use super::lattice::{accumulate_distances, interpolate, xy_path, xy_points_near_gamma, LatticeKind};

fn assert_point_close(actual: [f64; 3], expected: [f64; 3]) {
    let tol = 1e-9;
    assert!(
        (0..3).all(|c| (actual[c] - expected[c]).abs() < tol),
        "expected {:?} to be close to {:?}",
        actual,
        expected
    );
}

#[test]
fn lattice_kind_parses_known_names() {
    assert_eq!("square".parse::<LatticeKind>().unwrap(), LatticeKind::Square);
    assert_eq!("triangular".parse::<LatticeKind>().unwrap(), LatticeKind::Triangular);
    let err = "hexagonal".parse::<LatticeKind>().unwrap_err();
    assert!(matches!(err, ModeError::InvalidChoice { .. }));
    assert!(err.to_string().contains("square, triangular"));
}

#[test]
fn triangular_basis_is_sixty_degrees() {
    let lattice = LatticeKind::Triangular.lattice();
    let dot: f64 = (0..3).map(|c| lattice.basis1[c] * lattice.basis2[c]).sum();
    assert!((dot - 0.5).abs() < 1e-12);
    assert_eq!(lattice.size, [1.0, 1.0, 0.0]);
}

#[test]
fn slab_lattice_carries_height() {
    let lattice = LatticeKind::Square.slab_lattice(4.0);
    assert_eq!(lattice.size, [1.0, 1.0, 4.0]);
}

#[test]
fn default_paths_are_closed_loops() {
    for kind in LatticeKind::ALL {
        let path = kind.default_k_path();
        assert_eq!(path.len(), 4);
        assert_point_close(path[0], [0.0; 3]);
        assert_point_close(*path.last().unwrap(), [0.0; 3]);
    }
}

#[test]
fn high_symmetry_points_start_at_gamma() {
    let points = LatticeKind::Triangular.high_symmetry_points();
    assert_eq!(points[0].0, "Γ");
    assert_eq!(points[1].0, "K");
    assert_point_close(points[1].1, [1.0 / 3.0, 1.0 / 3.0, 0.0]);
}

#[test]
fn interpolate_inserts_points_between_nodes() {
    let nodes = LatticeKind::Square.default_k_path();
    let path = interpolate(3, &nodes);

    assert_eq!(path.len(), nodes.len() + 3 * (nodes.len() - 1));
    assert_point_close(path[0], nodes[0]);
    assert_point_close(path[4], nodes[1]);
    assert_point_close(path[2], [0.0, 0.25, 0.0]);
    assert_eq!(path[8], nodes[2], "nodes are kept exactly");
}

#[test]
fn interpolate_with_zero_points_is_passthrough() {
    let nodes = xy_path(0.2);
    assert_eq!(interpolate(0, &nodes), nodes);
    assert_eq!(interpolate(5, &nodes[..1]), nodes[..1].to_vec());
    assert!(interpolate(5, &[]).is_empty());
}

#[test]
fn xy_path_passes_through_gamma() {
    let path = xy_path(0.3);
    assert_eq!(path, vec![[0.3, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.3, 0.0]]);
}

#[test]
fn points_near_gamma_requires_short_distance() {
    let points = xy_points_near_gamma(0.2).unwrap();
    let labels: Vec<&str> = points.iter().map(|(label, _)| *label).collect();
    assert_eq!(labels, vec!["X", "Γ", "Y"]);
    assert!(matches!(xy_points_near_gamma(0.5), Err(ModeError::InvalidDistance(_))));
}

#[test]
fn distances_accumulate_along_path() {
    let distances = accumulate_distances(&xy_path(0.3));
    assert_eq!(distances.len(), 3);
    assert!((distances[1] - 0.3).abs() < 1e-12);
    assert!((distances[2] - 0.6).abs() < 1e-12);
    assert!(accumulate_distances(&[]).is_empty());
}
