use std::path::PathBuf;

use approx::assert_relative_eq;
use crossprob::boundaries::{BoundaryPair, read_boundaries_file};
use crossprob::core::{CrossingError, CrossingOptions};
use crossprob::engines::{PropagationWorkspace, TwoSidedPropagator};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("crossprob-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).expect("write temp boundary file");
    path
}

#[test]
fn file_round_trip_through_the_propagator() {
    let path = write_temp("scenario.txt", "0, 0.15, 0.5\n0.3, 0.7, 0.9, 1\n");
    let pair = read_boundaries_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(
        pair,
        BoundaryPair::new(vec![0.0, 0.15, 0.5], vec![0.3, 0.7, 0.9, 1.0])
    );

    let mut workspace = PropagationWorkspace::new(4, &CrossingOptions::default());
    let p = TwoSidedPropagator::new(&mut workspace)
        .ecdf_noncrossing_probability(3, &pair.lower, &pair.upper)
        .unwrap();
    assert_relative_eq!(p, 0.333, max_relative = 1e-12);
}

#[test]
fn invalid_values_are_reported_as_boundary_errors() {
    let path = write_temp("decreasing.txt", "0.5, 0.4\n\n");
    let err = read_boundaries_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, CrossingError::InvalidBoundary(_)), "{err}");

    let path = write_temp("range.txt", "\n0.5, 1.2\n");
    let err = read_boundaries_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, CrossingError::InvalidBoundary(_)), "{err}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = read_boundaries_file("/nonexistent/crossprob/bounds.txt").unwrap_err();
    match err {
        CrossingError::Io(msg) => assert!(msg.contains("bounds.txt"), "{msg}"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn options_load_from_json_file() {
    let path = write_temp(
        "options.json",
        r#"{ "convolution": "direct", "fft_threshold": 40, "block_size": 7 }"#,
    );
    let options = CrossingOptions::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(options.fft_threshold, 40);
    assert_eq!(options.block_size, Some(7));
    assert_eq!(options.fft_rounding, CrossingOptions::default().fft_rounding);

    let path = write_temp("bad-options.json", r#"{ "block_size": 0 }"#);
    let err = CrossingOptions::from_json_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, CrossingError::InvalidInput(_)));
}
