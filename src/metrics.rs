use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::Error;

/// Risk-free rate assumed for Sharpe when the caller has no better number
/// (reference dashboard's Indian-market default).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.04;

/// One asset bucket with its forward-looking assumptions.
/// `expected_return` and `risk` are annual fractions (0.12 = 12 %).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AssetProfile {
    pub value: f64,
    pub expected_return: f64,
    pub risk: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioMetrics {
    pub expected_return: f64,
    /// Simplified independent-asset risk: √(Σ wᵢ²·σᵢ²).
    pub risk: f64,
    /// `None` when portfolio risk is zero (Sharpe is undefined, not infinite).
    pub sharpe_ratio: Option<f64>,
    /// 1 − Σ wᵢ²; 0 = fully concentrated, → 1 as holdings spread out.
    pub diversification_score: f64,
}

/// Value-weighted portfolio metrics over caller-supplied assumptions.
pub fn portfolio_metrics(
    assets: &BTreeMap<String, AssetProfile>,
    risk_free_rate: f64,
) -> Result<PortfolioMetrics, Error> {
    if !risk_free_rate.is_finite() {
        return Err(Error::InvalidParameter {
            name: "risk_free_rate",
            value: risk_free_rate,
            detail: "must be finite",
        });
    }
    let total: f64 = assets.values().map(|a| a.value).sum();
    if assets.is_empty() || total <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "portfolio_total",
            value: total,
            detail: "portfolio must hold positive total value",
        });
    }
    for profile in assets.values() {
        if profile.value < 0.0 {
            return Err(Error::InvalidParameter {
                name: "asset_value",
                value: profile.value,
                detail: "must be >= 0",
            });
        }
        if profile.risk < 0.0 {
            return Err(Error::InvalidParameter {
                name: "asset_risk",
                value: profile.risk,
                detail: "must be >= 0",
            });
        }
    }

    let mut expected_return = 0.0;
    let mut variance = 0.0;
    let mut weight_sq_sum = 0.0;
    for profile in assets.values() {
        let w = profile.value / total;
        expected_return += w * profile.expected_return;
        variance += w * w * profile.risk * profile.risk;
        weight_sq_sum += w * w;
    }
    let risk = variance.sqrt();

    let sharpe_ratio =
        if risk == 0.0 { None } else { Some((expected_return - risk_free_rate) / risk) };

    Ok(PortfolioMetrics {
        expected_return,
        risk,
        sharpe_ratio,
        diversification_score: 1.0 - weight_sq_sum,
    })
}
