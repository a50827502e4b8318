use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Error;
use crate::growth::ValueFloor;

/// Asset-category breakdown of a portfolio. Categories are caller-defined
/// strings; monetary values in the dashboard's single currency unit.
/// BTreeMap so every dump and stress report iterates in a stable order.
pub type Portfolio = BTreeMap<String, f64>;

/// Everything a projection run needs. Constructed per invocation from caller
/// input; `validate()` is the single gate — the projector refuses to run on
/// an unvalidated range violation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationParameters {
    /// Lump sum already invested at period 0.
    pub initial_amount: f64,
    /// Fixed contribution added at the end of every period (SIP instalment).
    pub periodic_contribution: f64,
    /// Expected annual return, percent (12.0 = 12 %). May be negative.
    pub annual_return_pct: f64,
    /// Annual volatility, percent. Zero collapses all trials to one
    /// deterministic path.
    pub annual_volatility_pct: f64,
    /// Projection length in periods.
    pub horizon_periods: u32,
    /// Periods per year for annual → per-period scaling.
    pub periods_per_year: u32,
    /// Independent Monte Carlo trials.
    pub trial_count: u32,
    /// Percentile cut points for the conservative / moderate / aggressive
    /// bands, ascending.
    pub band_percentiles: [f64; 3],
    /// Whether trajectories are clamped at zero. The core defaults to no
    /// floor; clamping is the caller's call.
    pub value_floor: ValueFloor,
    pub seed: u64,
}

impl SimulationParameters {
    /// Defaults of the reference dashboard: 100k lump sum, 10k monthly SIP,
    /// Indian-market return/volatility assumptions, 10-year monthly horizon.
    pub fn canonical() -> Self {
        SimulationParameters {
            initial_amount: 100_000.0,
            periodic_contribution: 10_000.0,
            annual_return_pct: 12.0,
            annual_volatility_pct: 15.0,
            horizon_periods: 120,
            periods_per_year: 12,
            trial_count: 1000,
            band_percentiles: [5.0, 50.0, 95.0],
            value_floor: ValueFloor::None,
            seed: 42,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.initial_amount.is_finite() || self.initial_amount < 0.0 {
            return Err(Error::InvalidParameter {
                name: "initial_amount",
                value: self.initial_amount,
                detail: "must be finite and >= 0",
            });
        }
        if !self.periodic_contribution.is_finite() || self.periodic_contribution < 0.0 {
            return Err(Error::InvalidParameter {
                name: "periodic_contribution",
                value: self.periodic_contribution,
                detail: "must be finite and >= 0",
            });
        }
        if !self.annual_return_pct.is_finite() {
            return Err(Error::InvalidParameter {
                name: "annual_return_pct",
                value: self.annual_return_pct,
                detail: "must be finite",
            });
        }
        if !self.annual_volatility_pct.is_finite() || self.annual_volatility_pct < 0.0 {
            return Err(Error::InvalidParameter {
                name: "annual_volatility_pct",
                value: self.annual_volatility_pct,
                detail: "must be >= 0",
            });
        }
        if self.horizon_periods == 0 {
            return Err(Error::InvalidParameter {
                name: "horizon_periods",
                value: 0.0,
                detail: "must be > 0",
            });
        }
        if self.periods_per_year == 0 {
            return Err(Error::InvalidParameter {
                name: "periods_per_year",
                value: 0.0,
                detail: "must be > 0",
            });
        }
        if self.trial_count == 0 {
            return Err(Error::InvalidParameter {
                name: "trial_count",
                value: 0.0,
                detail: "must be > 0",
            });
        }
        let mut prev = 0.0;
        for &p in &self.band_percentiles {
            if !(0.0..=100.0).contains(&p) || p < prev {
                return Err(Error::InvalidParameter {
                    name: "band_percentiles",
                    value: p,
                    detail: "must be ascending within [0, 100]",
                });
            }
            prev = p;
        }
        Ok(())
    }
}

/// The reference dashboard's sample allocation: 60/30/5/5 across
/// Equity / Debt / Gold / Real Estate of the canonical lump sum.
pub fn canonical_portfolio() -> Portfolio {
    let initial = SimulationParameters::canonical().initial_amount;
    BTreeMap::from([
        ("Equity".to_string(), initial * 0.60),
        ("Debt".to_string(), initial * 0.30),
        ("Gold".to_string(), initial * 0.05),
        ("Real Estate".to_string(), initial * 0.05),
    ])
}
