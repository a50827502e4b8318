use serde::Serialize;

/// Clamping policy for simulated account values. The monetary domain decides:
/// the core defaults to `None` and lets trajectories go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueFloor {
    None,
    AtZero,
}

/// Step one account forward through a return sequence.
///
/// Each period applies growth first, then lands the contribution:
///   `value[0] = initial * (1 + returns[0]) + contribution`
///   `value[t] = value[t-1] * (1 + returns[t]) + contribution`
/// Reversing that order compounds the contribution one period early and
/// changes results materially; the tests pin it down.
///
/// Output length equals `returns.len()` — one value per elapsed period.
pub fn simulate_trajectory(
    initial: f64,
    contribution: f64,
    returns: &[f64],
    floor: ValueFloor,
) -> Vec<f64> {
    let mut value = initial;
    let mut trajectory = Vec::with_capacity(returns.len());
    for &r in returns {
        value = value * (1.0 + r) + contribution;
        if floor == ValueFloor::AtZero && value < 0.0 {
            value = 0.0;
        }
        trajectory.push(value);
    }
    trajectory
}

/// Closed-form counterpart of `simulate_trajectory` with a constant return.
/// This is the zero-volatility collapse path the percentile bands must agree
/// on when no randomness is injected.
pub fn deterministic_trajectory(
    initial: f64,
    contribution: f64,
    rate_per_period: f64,
    periods: u32,
) -> Vec<f64> {
    let constant = vec![rate_per_period; periods as usize];
    simulate_trajectory(initial, contribution, &constant, ValueFloor::None)
}
