#![cfg(test)]

use super::error::ModeError;
use super::polarization::{Polarization, Runner};

#[test]
fn default_polarization_strips_run_prefix() {
    assert_eq!(Runner::Te.default_polarization().as_str(), "te");
    assert_eq!(Runner::TmYOdd.default_polarization().as_str(), "tm_yodd");
    assert_eq!(Runner::ZEven.default_polarization().as_str(), "zeven");
    assert_eq!(Runner::All.default_polarization().as_str(), "run");
}

#[test]
fn runner_names_round_trip_through_from_str() {
    for runner in Runner::ALL {
        let parsed: Runner = runner.as_str().parse().unwrap();
        assert_eq!(parsed, runner);
        assert_eq!(runner.to_string(), runner.as_str());
    }
}

#[test]
fn unknown_runner_names_the_valid_set() {
    let err = "run_xy".parse::<Runner>().unwrap_err();
    let ModeError::InvalidChoice { kind, value, expected } = &err else {
        panic!("unexpected error {err:?}");
    };
    assert_eq!(*kind, "runner");
    assert_eq!(value, "run_xy");
    assert!(expected.contains("run_te_yeven"));
    assert!(err.to_string().contains("choose one of"));
}

#[test]
fn runner_serde_uses_solver_names() {
    let json = serde_json::to_string(&Runner::TeYEven).unwrap();
    assert_eq!(json, "\"run_te_yeven\"");
    let back: Runner = serde_json::from_str("\"run_zodd\"").unwrap();
    assert_eq!(back, Runner::ZOdd);
}

#[test]
fn polarization_is_an_open_tag() {
    let custom = Polarization::from("my-custom-tag");
    assert_eq!(custom.to_string(), "my-custom-tag");
    assert_ne!(custom, Polarization::from("My-Custom-Tag"));
    assert_eq!(Polarization::from(Runner::Tm), Polarization::new("tm"));
    assert_eq!(serde_json::to_string(&custom).unwrap(), "\"my-custom-tag\"");
}
