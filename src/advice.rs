use serde::Serialize;

/// Investor risk appetite, as selected in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// Recommended allocation in whole percentage points, summing to 100.
    pub fn allocation(self) -> &'static [(&'static str, u32)] {
        match self {
            RiskProfile::Conservative => &[
                ("Large Cap", 20),
                ("Debt Funds", 50),
                ("Gold", 20),
                ("Liquid Funds", 10),
            ],
            RiskProfile::Moderate => &[
                ("Large Cap", 30),
                ("Mid Cap", 20),
                ("Debt Funds", 30),
                ("Gold", 15),
                ("International", 5),
            ],
            RiskProfile::Aggressive => &[
                ("Large Cap", 35),
                ("Mid Cap", 25),
                ("Small Cap", 15),
                ("Debt Funds", 15),
                ("International", 10),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    /// Target split for the selected risk profile, percent per asset class.
    Allocation { split: Vec<(String, u32)> },
    Warning { message: String },
    Caution { message: String },
    Suggestion { message: String },
    Opportunity { message: String },
}

/// Rule-based recommendations for a risk profile, horizon, and monthly SIP.
/// Thresholds follow the reference dashboard.
pub fn recommendations(
    profile: RiskProfile,
    horizon_years: u32,
    monthly_sip: f64,
) -> Vec<Recommendation> {
    let mut out = vec![Recommendation::Allocation {
        split: profile
            .allocation()
            .iter()
            .map(|&(asset, pct)| (asset.to_string(), pct))
            .collect(),
    }];

    if monthly_sip < 5_000.0 {
        out.push(Recommendation::Warning {
            message: "Consider increasing your SIP to at least 5,000 per month for \
                      better diversification"
                .to_string(),
        });
    } else if monthly_sip > 50_000.0 {
        out.push(Recommendation::Suggestion {
            message: "Consider spreading investments across multiple dates to benefit \
                      from cost averaging"
                .to_string(),
        });
    }

    if horizon_years < 3 {
        out.push(Recommendation::Caution {
            message: "For short-term goals, prefer debt and liquid funds to minimize \
                      volatility"
                .to_string(),
        });
    } else if horizon_years > 10 {
        out.push(Recommendation::Opportunity {
            message: "A long horizon allows higher equity exposure; consider \
                      tax-advantaged equity funds"
                .to_string(),
        });
    }

    out
}
