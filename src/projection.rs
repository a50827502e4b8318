use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::SimulationParameters;
use crate::error::Error;
use crate::growth::simulate_trajectory;
use crate::paths::ReturnModel;
use crate::stats::{percentile_of_sorted, sort_samples};

/// Percentile-banded forecast. `time_axis[i]` is the elapsed-period count
/// (1-based); the three series are the configured percentile cut points
/// across all trials at that period — by default p5 / p50 / p95.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthProjection {
    pub time_axis: Vec<u32>,
    pub conservative: Vec<f64>,
    pub moderate: Vec<f64>,
    pub aggressive: Vec<f64>,
}

/// One period of the projection, flattened for NDJSON output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BandPoint {
    pub period: u32,
    pub conservative: f64,
    pub moderate: f64,
    pub aggressive: f64,
}

impl GrowthProjection {
    pub fn points(&self) -> impl Iterator<Item = BandPoint> + '_ {
        self.time_axis.iter().enumerate().map(|(i, &period)| BandPoint {
            period,
            conservative: self.conservative[i],
            moderate: self.moderate[i],
            aggressive: self.aggressive[i],
        })
    }
}

/// Monte Carlo growth projection.
///
/// Validates `params`, scales the annual assumptions to per-period values
/// (mean divides by periods-per-year, volatility by its square root — the
/// standard additive-mean / multiplicative-variance convention), then runs
/// `trial_count` independent trials and reduces them to percentile bands at
/// every period index.
///
/// Trials fan out across the rayon pool. Each trial seeds its own ChaCha
/// stream from (base seed, trial index), so output is bit-identical for
/// identical parameters no matter how the scheduler interleaves workers.
pub fn project_growth(params: &SimulationParameters) -> Result<GrowthProjection, Error> {
    params.validate()?;

    let periods_per_year = params.periods_per_year as f64;
    let mean = params.annual_return_pct / periods_per_year / 100.0;
    let std_dev = params.annual_volatility_pct / periods_per_year.sqrt() / 100.0;
    let model = ReturnModel::new(mean, std_dev)?;

    let periods = params.horizon_periods as usize;

    let trajectories: Vec<Vec<f64>> = (0..params.trial_count)
        .into_par_iter()
        .map(|trial| {
            let mut rng = ChaCha20Rng::seed_from_u64(trial_seed(params.seed, trial));
            let returns = model.sample_path(periods, &mut rng);
            simulate_trajectory(
                params.initial_amount,
                params.periodic_contribution,
                &returns,
                params.value_floor,
            )
        })
        .collect();

    // Fan-in: exact percentiles per period, computed only after every trial
    // has completed. Columns are independent, so the reduction fans out too;
    // indexed collect keeps period order.
    let [p_lo, p_mid, p_hi] = params.band_percentiles;
    let bands: Vec<[f64; 3]> = (0..periods)
        .into_par_iter()
        .map(|period| {
            let mut column: Vec<f64> =
                trajectories.iter().map(|t| t[period]).collect();
            sort_samples(&mut column);
            [
                percentile_of_sorted(&column, p_lo),
                percentile_of_sorted(&column, p_mid),
                percentile_of_sorted(&column, p_hi),
            ]
        })
        .collect();

    Ok(GrowthProjection {
        time_axis: (1..=params.horizon_periods).collect(),
        conservative: bands.iter().map(|b| b[0]).collect(),
        moderate: bands.iter().map(|b| b[1]).collect(),
        aggressive: bands.iter().map(|b| b[2]).collect(),
    })
}

/// Mix the base seed with the trial index so every trial gets an independent
/// stream and no trial's draws depend on scheduling order.
fn trial_seed(base_seed: u64, trial: u32) -> u64 {
    splitmix64(base_seed ^ ((trial as u64) << 32) ^ trial as u64)
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::SimulationParameters;
    use crate::error::Error;
    use crate::growth::deterministic_trajectory;

    fn small_params() -> SimulationParameters {
        let mut p = SimulationParameters::canonical();
        p.horizon_periods = 24;
        p.trial_count = 200;
        p
    }

    // ── Determinism ───────────────────────────────────────────────────────────

    #[test]
    fn same_parameters_produce_bit_identical_output() {
        let params = small_params();
        let a = project_growth(&params).unwrap();
        let b = project_growth(&params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_produce_different_bands() {
        let mut params = small_params();
        let a = project_growth(&params).unwrap();
        params.seed = 43;
        let b = project_growth(&params).unwrap();
        assert_ne!(a.moderate, b.moderate);
    }

    #[test]
    fn trial_seeds_are_distinct() {
        use std::collections::HashSet;
        let seeds: HashSet<u64> = (0..10_000).map(|t| trial_seed(42, t)).collect();
        assert_eq!(seeds.len(), 10_000);
    }

    // ── Band shape ────────────────────────────────────────────────────────────

    #[test]
    fn time_axis_counts_periods_from_one() {
        let proj = project_growth(&small_params()).unwrap();
        assert_eq!(proj.time_axis.first(), Some(&1));
        assert_eq!(proj.time_axis.last(), Some(&24));
        assert_eq!(proj.conservative.len(), 24);
        assert_eq!(proj.moderate.len(), 24);
        assert_eq!(proj.aggressive.len(), 24);
    }

    #[test]
    fn percentile_bands_are_ordered_at_every_period() {
        let proj = project_growth(&small_params()).unwrap();
        for i in 0..proj.time_axis.len() {
            assert!(
                proj.conservative[i] <= proj.moderate[i]
                    && proj.moderate[i] <= proj.aggressive[i],
                "band inversion at period {}: {} / {} / {}",
                i + 1,
                proj.conservative[i],
                proj.moderate[i],
                proj.aggressive[i]
            );
        }
    }

    #[test]
    fn zero_volatility_collapses_to_the_deterministic_path() {
        let mut params = small_params();
        params.annual_volatility_pct = 0.0;
        let proj = project_growth(&params).unwrap();

        let rate = params.annual_return_pct / 12.0 / 100.0;
        let expected = deterministic_trajectory(
            params.initial_amount,
            params.periodic_contribution,
            rate,
            params.horizon_periods,
        );

        for i in 0..expected.len() {
            let tol = expected[i].abs() * 1e-12;
            assert!((proj.conservative[i] - expected[i]).abs() <= tol);
            assert!((proj.moderate[i] - expected[i]).abs() <= tol);
            assert!((proj.aggressive[i] - expected[i]).abs() <= tol);
        }
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn negative_volatility_is_rejected_before_any_work() {
        let mut params = small_params();
        params.annual_volatility_pct = -1.0;
        assert!(matches!(
            project_growth(&params),
            Err(Error::InvalidParameter { name: "annual_volatility_pct", .. })
        ));
    }

    #[test]
    fn zero_trials_are_rejected() {
        let mut params = small_params();
        params.trial_count = 0;
        assert!(project_growth(&params).is_err());
    }

    // ── End-to-end band ───────────────────────────────────────────────────────

    /// Canonical 10-year monthly projection: the median outcome is stochastic
    /// but must stay within a factor of two of the zero-volatility compound
    /// value at the final period.
    #[test]
    fn canonical_median_lands_near_the_deterministic_value() {
        let params = SimulationParameters::canonical();
        let proj = project_growth(&params).unwrap();

        let rate = params.annual_return_pct / 12.0 / 100.0;
        let deterministic = deterministic_trajectory(
            params.initial_amount,
            params.periodic_contribution,
            rate,
            params.horizon_periods,
        );
        let anchor = deterministic[119];
        let median = proj.moderate[119];

        assert!(
            median > anchor / 2.0 && median < anchor * 2.0,
            "moderate[119] = {median:.0} outside ({:.0}, {:.0})",
            anchor / 2.0,
            anchor * 2.0
        );
        assert!(
            proj.conservative[119] < anchor && proj.aggressive[119] > anchor,
            "p5/p95 should straddle the deterministic value"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        /// Band ordering holds for arbitrary non-degenerate inputs.
        #[test]
        fn ordering_holds_for_arbitrary_inputs(
            initial in 0.0..500_000.0f64,
            contribution in 0.0..50_000.0f64,
            annual_return in -10.0..25.0f64,
            volatility in 0.1..35.0f64,
            horizon in 1u32..36,
            seed in any::<u64>(),
        ) {
            let params = SimulationParameters {
                initial_amount: initial,
                periodic_contribution: contribution,
                annual_return_pct: annual_return,
                annual_volatility_pct: volatility,
                horizon_periods: horizon,
                trial_count: 64,
                seed,
                ..SimulationParameters::canonical()
            };
            let proj = project_growth(&params).unwrap();
            for i in 0..horizon as usize {
                prop_assert!(proj.conservative[i] <= proj.moderate[i]);
                prop_assert!(proj.moderate[i] <= proj.aggressive[i]);
            }
        }

        /// Repeated runs are reproducible for any seed.
        #[test]
        fn determinism_holds_for_any_seed(seed in any::<u64>()) {
            let mut params = small_params();
            params.seed = seed;
            params.trial_count = 32;
            params.horizon_periods = 12;
            prop_assert_eq!(
                project_growth(&params).unwrap(),
                project_growth(&params).unwrap()
            );
        }
    }
}
