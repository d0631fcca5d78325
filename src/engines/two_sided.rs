//! Module `engines::two_sided`.
//!
//! Implements the event-driven propagation of a Poisson counting process through a corridor
//! bounded by two step boundaries, and the empirical-CDF probability derived from it.
//!
//! References: Moscovich and Nadler (2017), Sec. 2 (Poisson recursion) and Sec. 2.2
//! (Poissonization: a rate-`n` process conditioned on `N(1) = n` has the law of `n` uniform
//! order statistics).
//!
//! Key types and purpose: `TwoSidedPropagator` drives the recurrence over a
//! `PropagationWorkspace`; `CorridorState` is the surviving mass after the last event.
//!
//! Numerical considerations: one convolution per boundary step, each over the live corridor
//! only, so tight boundaries are cheap; the ECDF normalisation divides by
//! `Pr[Poisson(n) = n] ~ 1/sqrt(2 pi n)`, which is harmless for any practical `n`.
//!
//! When to use: for any pair of boundaries; for a single boundary the block-jump propagator
//! gives the same value with fewer transforms.

use crate::boundaries::{boundaries_cross, normalize_to_sample_size, validate_boundary};
use crate::core::{ConvolutionMethod, CrossingError, CrossingOptions, CrossingResult};
use crate::engines::events::{Event, EventKind, join_all_bounds};
use crate::engines::workspace::PropagationWorkspace;
use crate::math::arena::DoubleBuffer;

/// Process-level distribution after the last event.
///
/// `state[k]` is the probability that the process sits at level `k` and never left the
/// corridor. Levels outside `[upper_count, lower_count]` carry no mass.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorState {
    pub state: Vec<f64>,
    pub lower_count: usize,
    pub upper_count: usize,
}

impl CorridorState {
    /// Whether the final corridor is non-empty.
    pub fn live(&self) -> bool {
        self.upper_count <= self.lower_count
    }

    /// Total surviving mass.
    pub fn total_mass(&self) -> f64 {
        if !self.live() {
            return 0.0;
        }
        self.state[self.upper_count..=self.lower_count].iter().sum()
    }

    /// Surviving mass at level `k`; zero outside the corridor.
    pub fn mass_at(&self, k: usize) -> f64 {
        if self.live() && (self.upper_count..=self.lower_count).contains(&k) {
            self.state[k]
        } else {
            0.0
        }
    }
}

/// Two-sided propagator borrowing a reusable workspace.
#[derive(Debug)]
pub struct TwoSidedPropagator<'w> {
    workspace: &'w mut PropagationWorkspace,
}

impl<'w> TwoSidedPropagator<'w> {
    pub fn new(workspace: &'w mut PropagationWorkspace) -> Self {
        Self { workspace }
    }

    /// Runs the recurrence over `events` for a Poisson process of the given intensity.
    ///
    /// The state holds one level per `LowerStep` plus level zero. Any event order is
    /// accepted; once the floor passes the ceiling all mass is gone for good.
    pub fn propagate(
        &mut self,
        intensity: f64,
        events: &[Event],
    ) -> CrossingResult<CorridorState> {
        let len = 1 + events
            .iter()
            .filter(|e| e.kind == EventKind::LowerStep)
            .count();
        self.workspace.ensure_capacity(len);

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!(
            "two_sided_propagate",
            intensity,
            levels = len,
            events = events.len()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut buffers = DoubleBuffer::new(len, 0.0);
        buffers.src_mut()[0] = 1.0;

        let mut lower_count = 0_usize;
        let mut upper_count = 0_usize;
        let mut prev_location = 0.0;

        for event in events {
            let (src, dest) = buffers.split();

            if upper_count <= lower_count {
                let size = lower_count - upper_count + 1;
                let live = upper_count..=lower_count;
                let lambda = intensity * (event.location - prev_location);
                if lambda == 0.0 {
                    dest[live.clone()].copy_from_slice(&src[live]);
                } else {
                    let pmf = self.workspace.pmf.compute_array(size - 1, lambda);
                    self.workspace.convolver.convolve_same_size(
                        size,
                        pmf,
                        &src[live.clone()],
                        &mut dest[live],
                    )?;
                }
            } else {
                dest.fill(0.0);
            }

            match event.kind {
                EventKind::LowerStep => {
                    lower_count += 1;
                    dest[lower_count] = 0.0;
                }
                EventKind::UpperStep => {
                    if let Some(level) = dest.get_mut(upper_count) {
                        *level = 0.0;
                    }
                    upper_count += 1;
                }
                EventKind::End => {}
            }

            prev_location = event.location;
            buffers.flip();
        }

        let mut state = buffers.into_src();
        // Levels below the floor may hold stale values from the other buffer.
        let floor = upper_count.min(len);
        state[..floor].fill(0.0);
        if upper_count > lower_count {
            state.fill(0.0);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(lower_count, upper_count, "propagation finished");

        Ok(CorridorState {
            state,
            lower_count,
            upper_count,
        })
    }

    /// Probability that `n` iid uniforms satisfy `lower[i] <= X_(i+1) <= upper[i]` for all `i`.
    ///
    /// Boundaries are truncated to `n` entries and padded with `0` / `1`.
    pub fn ecdf_noncrossing_probability(
        &mut self,
        n: usize,
        lower: &[f64],
        upper: &[f64],
    ) -> CrossingResult<f64> {
        validate_boundary("lower boundary", lower)?;
        validate_boundary("upper boundary", upper)?;
        if n == 0 {
            return Ok(1.0);
        }

        let bounds = normalize_to_sample_size(n, lower, upper);
        if boundaries_cross(&bounds.lower, &bounds.upper) {
            return Ok(0.0);
        }

        let events = join_all_bounds(&bounds.lower, &bounds.upper);
        let intensity = n as f64;
        let corridor = self.propagate(intensity, &events)?;
        let normalizer = self.workspace.pmf.evaluate_pmf(intensity, n);
        Ok(corridor.mass_at(n) / normalizer)
    }

    /// Probability that a Poisson process of the given intensity on `[0, 1]` stays in the
    /// corridor, optionally jointly with `N(1) = endpoint`.
    ///
    /// The process is capped at level `lower.len()`; `upper[i]` is the time by which level
    /// `i + 1` must be reached.
    pub fn poisson_noncrossing_probability(
        &mut self,
        intensity: f64,
        lower: &[f64],
        upper: &[f64],
        endpoint: Option<usize>,
    ) -> CrossingResult<f64> {
        if !intensity.is_finite() || intensity < 0.0 {
            return Err(CrossingError::InvalidInput(format!(
                "intensity must be finite and non-negative, got {intensity}"
            )));
        }
        validate_boundary("lower boundary", lower)?;
        validate_boundary("upper boundary", upper)?;
        if boundaries_cross(lower, upper) {
            return Ok(0.0);
        }

        let events = join_all_bounds(lower, upper);
        let corridor = self.propagate(intensity, &events)?;
        Ok(match endpoint {
            Some(k) => corridor.mass_at(k),
            None => corridor.total_mass(),
        })
    }
}

/// Two-sided empirical-CDF noncrossing probability for `n` samples.
///
/// `use_fft = false` forces direct convolutions everywhere, which wins when the corridor is
/// narrow.
pub fn compute_two_sided_noncrossing_probability(
    n: usize,
    lower: &[f64],
    upper: &[f64],
    use_fft: bool,
) -> CrossingResult<f64> {
    let options = CrossingOptions::with_method(ConvolutionMethod::from_use_fft(use_fft));
    let mut workspace = PropagationWorkspace::new(n + 1, &options);
    TwoSidedPropagator::new(&mut workspace).ecdf_noncrossing_probability(n, lower, upper)
}

/// Poisson-process noncrossing probability; see
/// [`TwoSidedPropagator::poisson_noncrossing_probability`].
pub fn poisson_process_noncrossing_probability(
    intensity: f64,
    lower: &[f64],
    upper: &[f64],
    method: ConvolutionMethod,
    endpoint: Option<usize>,
) -> CrossingResult<f64> {
    let options = CrossingOptions::with_method(method);
    let mut workspace = PropagationWorkspace::new(lower.len() + 1, &options);
    TwoSidedPropagator::new(&mut workspace).poisson_noncrossing_probability(
        intensity, lower, upper, endpoint,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn workspace(method: ConvolutionMethod) -> PropagationWorkspace {
        PropagationWorkspace::new(1, &CrossingOptions::with_method(method))
    }

    #[test]
    fn single_sample_is_interval_length() {
        let p = compute_two_sided_noncrossing_probability(1, &[0.2], &[0.7], false).unwrap();
        assert_relative_eq!(p, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn two_samples_closed_forms() {
        // Pr[X_(1) <= 0.5, X_(2) <= 0.7] = 0.7^2 - 0.2^2
        let upper_only =
            compute_two_sided_noncrossing_probability(2, &[], &[0.5, 0.7], false).unwrap();
        assert_relative_eq!(upper_only, 0.45, epsilon = 1e-12);

        // Pr[X_(1) >= 0.5, X_(2) >= 0.7] = 0.5^2 - 0.2^2
        let lower_only =
            compute_two_sided_noncrossing_probability(2, &[0.5, 0.7], &[], false).unwrap();
        assert_relative_eq!(lower_only, 0.21, epsilon = 1e-12);
    }

    #[test]
    fn poisson_single_lower_step() {
        let p = poisson_process_noncrossing_probability(
            2.0,
            &[0.5],
            &[],
            ConvolutionMethod::Direct,
            None,
        )
        .unwrap();
        // N(0.5) = 0 and N(1) <= 1: e^-1 * e^-1 * (1 + 1)
        assert_relative_eq!(p, 2.0 * (-2.0_f64).exp(), epsilon = 1e-14);
    }

    #[test]
    fn endpoint_outside_final_corridor_has_no_mass() {
        let mut ws = workspace(ConvolutionMethod::Direct);
        let mut propagator = TwoSidedPropagator::new(&mut ws);
        let lower = [0.1, 0.2, 0.3];
        let upper = [0.6];
        let total = propagator
            .poisson_noncrossing_probability(3.0, &lower, &upper, None)
            .unwrap();
        let by_level: f64 = (0..=5)
            .map(|k| {
                propagator
                    .poisson_noncrossing_probability(3.0, &lower, &upper, Some(k))
                    .unwrap()
            })
            .sum();
        assert_relative_eq!(total, by_level, epsilon = 1e-14);
        assert_eq!(
            propagator
                .poisson_noncrossing_probability(3.0, &lower, &upper, Some(0))
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn upper_first_ties_match_lower_first_ties() {
        let lower = [0.1, 0.1, 0.4, 0.4];
        let upper = [0.4, 0.4, 0.9, 0.9];
        let sorted = join_all_bounds(&lower, &upper);

        let mut reordered: Vec<Event> = upper
            .iter()
            .map(|&x| Event::new(x, EventKind::UpperStep))
            .chain(lower.iter().map(|&x| Event::new(x, EventKind::LowerStep)))
            .collect();
        reordered.sort_by(|a, b| a.location.total_cmp(&b.location));
        reordered.push(Event::new(1.0, EventKind::End));

        let mut ws = workspace(ConvolutionMethod::Direct);
        let mut propagator = TwoSidedPropagator::new(&mut ws);
        let a = propagator.propagate(4.0, &sorted).unwrap();
        let b = propagator.propagate(4.0, &reordered).unwrap();
        assert_relative_eq!(a.mass_at(4), b.mass_at(4), epsilon = 1e-15);
        assert_relative_eq!(a.total_mass(), b.total_mass(), epsilon = 1e-15);
    }

    #[test]
    fn empty_corridor_kills_all_mass() {
        let events = [
            Event::new(0.5, EventKind::UpperStep),
            Event::new(0.6, EventKind::LowerStep),
            Event::new(1.0, EventKind::End),
        ];
        let mut ws = workspace(ConvolutionMethod::Direct);
        let corridor = TwoSidedPropagator::new(&mut ws)
            .propagate(1.0, &events)
            .unwrap();
        assert_eq!(corridor.total_mass(), 0.0);
        assert!(corridor.state.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert!(matches!(
            compute_two_sided_noncrossing_probability(2, &[0.5, 0.2], &[], true),
            Err(CrossingError::InvalidBoundary(_))
        ));
        assert!(matches!(
            poisson_process_noncrossing_probability(
                -1.0,
                &[],
                &[],
                ConvolutionMethod::Fft,
                None
            ),
            Err(CrossingError::InvalidInput(_))
        ));
    }
}
