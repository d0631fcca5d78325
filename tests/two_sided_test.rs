mod common;

use approx::assert_relative_eq;
use common::{ks_lower, ks_upper};
use crossprob::core::{ConvolutionMethod, CrossingOptions};
use crossprob::engines::{
    PropagationWorkspace, TwoSidedPropagator, compute_two_sided_noncrossing_probability,
    poisson_process_noncrossing_probability,
};

#[test]
fn three_sample_scenario_matches_reference_for_both_backends() {
    let lower = [0.0, 0.15, 0.5];
    let upper = [0.3, 0.7, 0.9, 1.0];

    let fft = compute_two_sided_noncrossing_probability(3, &lower, &upper, true).unwrap();
    let direct = compute_two_sided_noncrossing_probability(3, &lower, &upper, false).unwrap();

    assert!(fft > 0.0 && fft < 1.0);
    assert_relative_eq!(fft, 0.333, max_relative = 1e-12);
    assert_relative_eq!(fft, direct, max_relative = 1e-9);

    let looser = compute_two_sided_noncrossing_probability(3, &lower, &[0.7, 0.9, 1.0], true)
        .unwrap();
    assert_relative_eq!(looser, 0.79325, max_relative = 1e-12);
}

#[test]
fn coincident_steps_are_handled() {
    let p = compute_two_sided_noncrossing_probability(
        4,
        &[0.1, 0.1, 0.4, 0.4],
        &[0.4, 0.4, 0.9, 0.9],
        false,
    )
    .unwrap();
    assert_relative_eq!(p, 0.135, max_relative = 1e-12);
}

#[test]
fn two_sided_ks_reference_values() {
    let cases = [
        (10, 0.2, 0.251_280_96),
        (10, 0.3, 0.729_464_425_2),
        (40, 0.15, 0.701_586_009_317_860_1),
    ];
    for (n, d, expected) in cases {
        let lower = ks_lower(n, d);
        let upper = ks_upper(n, d);
        let p = compute_two_sided_noncrossing_probability(n, &lower, &upper, true).unwrap();
        assert_relative_eq!(p, expected, max_relative = 1e-9);
    }
}

#[test]
fn fft_and_direct_agree_on_wide_corridors() {
    // One lower band and no upper band: the corridor grows to all n + 1 levels.
    let n = 300;
    let lower = ks_lower(n, 0.05);
    let fft = compute_two_sided_noncrossing_probability(n, &lower, &[], true).unwrap();
    let direct = compute_two_sided_noncrossing_probability(n, &lower, &[], false).unwrap();
    assert_relative_eq!(fft, direct, max_relative = 1e-9);
    assert_relative_eq!(fft, 0.784_127_599_207_214_1, max_relative = 1e-9);

    let n = 200;
    let lower = ks_lower(n, 0.08);
    let upper = ks_upper(n, 0.25);
    let fft = compute_two_sided_noncrossing_probability(n, &lower, &upper, true).unwrap();
    let direct = compute_two_sided_noncrossing_probability(n, &lower, &upper, false).unwrap();
    assert!(fft > 0.0 && fft < 1.0);
    assert_relative_eq!(fft, direct, max_relative = 1e-9);
}

#[test]
fn unconstrained_boundaries_give_one() {
    for n in [1_usize, 2, 7, 50, 300] {
        let lower = vec![0.0; n];
        let upper = vec![1.0; n];
        for use_fft in [true, false] {
            let p = compute_two_sided_noncrossing_probability(n, &lower, &upper, use_fft).unwrap();
            assert_relative_eq!(p, 1.0, max_relative = 1e-9);
        }
        let empty = compute_two_sided_noncrossing_probability(n, &[], &[], true).unwrap();
        assert_relative_eq!(empty, 1.0, max_relative = 1e-9);
    }
}

#[test]
fn zero_samples_never_cross() {
    assert_eq!(compute_two_sided_noncrossing_probability(0, &[], &[], true).unwrap(), 1.0);
    assert_eq!(compute_two_sided_noncrossing_probability(0, &[], &[], false).unwrap(), 1.0);
}

#[test]
fn crossing_boundaries_give_exact_zero() {
    let p =
        compute_two_sided_noncrossing_probability(3, &[0.1, 0.6, 0.7], &[0.5, 0.55, 0.9], true)
            .unwrap();
    assert_eq!(p, 0.0);

    let poisson = poisson_process_noncrossing_probability(
        5.0,
        &[0.2],
        &[0.3, 0.4],
        ConvolutionMethod::Fft,
        None,
    )
    .unwrap();
    assert_eq!(poisson, 0.0);
}

#[test]
fn entries_beyond_n_are_ignored() {
    let short = compute_two_sided_noncrossing_probability(2, &[0.1, 0.2], &[0.5, 0.8], false)
        .unwrap();
    let long = compute_two_sided_noncrossing_probability(
        2,
        &[0.1, 0.2, 0.9, 0.95],
        &[0.5, 0.8, 0.85, 1.0],
        false,
    )
    .unwrap();
    assert_eq!(short, long);
}

#[test]
fn workspace_is_reusable_across_sizes() {
    let mut workspace = PropagationWorkspace::new(8, &CrossingOptions::default());
    let mut propagator = TwoSidedPropagator::new(&mut workspace);

    let small = propagator
        .ecdf_noncrossing_probability(10, &ks_lower(10, 0.3), &ks_upper(10, 0.3))
        .unwrap();
    let large = propagator
        .ecdf_noncrossing_probability(40, &ks_lower(40, 0.15), &ks_upper(40, 0.15))
        .unwrap();
    let small_again = propagator
        .ecdf_noncrossing_probability(10, &ks_lower(10, 0.3), &ks_upper(10, 0.3))
        .unwrap();

    assert_relative_eq!(small, 0.729_464_425_2, max_relative = 1e-9);
    assert_relative_eq!(large, 0.701_586_009_317_860_1, max_relative = 1e-9);
    assert_eq!(small, small_again);
}

#[test]
fn poisson_endpoint_masses_sum_to_total() {
    let lower = [0.05, 0.2, 0.3, 0.6, 0.8];
    let upper = [0.4, 0.7, 0.95];
    let total =
        poisson_process_noncrossing_probability(4.0, &lower, &upper, ConvolutionMethod::Fft, None)
            .unwrap();
    let by_endpoint: f64 = (0..=lower.len())
        .map(|k| {
            poisson_process_noncrossing_probability(
                4.0,
                &lower,
                &upper,
                ConvolutionMethod::Fft,
                Some(k),
            )
            .unwrap()
        })
        .sum();
    assert!(total > 0.0 && total < 1.0);
    assert_relative_eq!(total, by_endpoint, max_relative = 1e-12);
}

#[test]
fn poisson_with_zero_intensity_stays_at_level_zero() {
    let p = poisson_process_noncrossing_probability(
        0.0,
        &[0.3, 0.6],
        &[],
        ConvolutionMethod::Direct,
        Some(0),
    )
    .unwrap();
    assert_eq!(p, 1.0);
}
