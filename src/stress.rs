use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::config::Portfolio;
use crate::error::Error;

/// Signed fractional multipliers per (scenario, asset category).
/// -0.30 means a 30 % loss; categories absent from a scenario take 0.0.
#[derive(Debug, Clone)]
pub struct ShockTable {
    scenarios: BTreeMap<String, BTreeMap<String, f64>>,
}

/// The built-in registry, initialized once and shared read-only across
/// threads. Never mutated after startup.
pub fn builtin_shock_table() -> &'static ShockTable {
    static TABLE: OnceLock<ShockTable> = OnceLock::new();
    TABLE.get_or_init(ShockTable::builtin)
}

impl ShockTable {
    /// Reference-dashboard calibration for the three canonical crises.
    pub fn builtin() -> Self {
        ShockTable { scenarios: BTreeMap::new() }
            .with_scenario("market_crash", [
                ("Equity", -0.30),
                ("Debt", -0.10),
                ("Gold", 0.15),
                ("Real Estate", -0.20),
            ])
            .with_scenario("interest_rate_hike", [
                ("Equity", -0.15),
                ("Debt", -0.20),
                ("Gold", -0.05),
                ("Real Estate", -0.10),
            ])
            .with_scenario("currency_crisis", [
                ("Equity", -0.20),
                ("Debt", -0.15),
                ("Gold", 0.25),
                ("Real Estate", -0.05),
            ])
    }

    /// Register (or replace) a scenario. Builder-style so custom tables can
    /// extend the built-in set.
    pub fn with_scenario<const N: usize>(
        mut self,
        name: &str,
        factors: [(&str, f64); N],
    ) -> Self {
        let entry = factors
            .into_iter()
            .map(|(category, factor)| (category.to_string(), factor))
            .collect();
        self.scenarios.insert(name.to_string(), entry);
        self
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    pub fn contains(&self, scenario: &str) -> bool {
        self.scenarios.contains_key(scenario)
    }

    /// Shock factor for one category, 0.0 when the scenario does not list it.
    /// Errors only on an unregistered scenario.
    pub fn factor(&self, scenario: &str, category: &str) -> Result<f64, Error> {
        let entry = self
            .scenarios
            .get(scenario)
            .ok_or_else(|| Error::UnknownScenario { name: scenario.to_string() })?;
        Ok(entry.get(category).copied().unwrap_or(0.0))
    }

    /// Apply a scenario: every category's value scales by `(1 + factor)`.
    /// Pure what-if transform — the input portfolio is untouched.
    pub fn apply(&self, portfolio: &Portfolio, scenario: &str) -> Result<Portfolio, Error> {
        let entry = self
            .scenarios
            .get(scenario)
            .ok_or_else(|| Error::UnknownScenario { name: scenario.to_string() })?;
        Ok(portfolio
            .iter()
            .map(|(category, &value)| {
                let factor = entry.get(category).copied().unwrap_or(0.0);
                (category.clone(), value * (1.0 + factor))
            })
            .collect())
    }
}

/// Stress-test a portfolio against a scenario from the built-in registry.
pub fn stress_test(portfolio: &Portfolio, scenario: &str) -> Result<Portfolio, Error> {
    builtin_shock_table().apply(portfolio, scenario)
}

/// Percentage change for display. A zero original value has no defined
/// change — that is `None` ("N/A"), never a crash or an infinity.
pub fn percent_change(original: f64, shocked: f64) -> Option<f64> {
    if original == 0.0 {
        None
    } else {
        Some((shocked - original) / original * 100.0)
    }
}

/// Per-asset stress outcome, flattened for NDJSON and table output.
#[derive(Debug, Clone, Serialize)]
pub struct StressRow {
    pub scenario: String,
    pub asset: String,
    pub original: f64,
    pub shocked: f64,
    /// `None` when the original value is 0.
    pub change_pct: Option<f64>,
}

pub fn stress_report(portfolio: &Portfolio, scenario: &str) -> Result<Vec<StressRow>, Error> {
    let shocked = stress_test(portfolio, scenario)?;
    Ok(portfolio
        .iter()
        .map(|(asset, &original)| {
            let after = shocked[asset];
            StressRow {
                scenario: scenario.to_string(),
                asset: asset.clone(),
                original,
                shocked: after,
                change_pct: percent_change(original, after),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::config::canonical_portfolio;
    use crate::error::Error;

    #[test]
    fn market_crash_cuts_equity_by_thirty_percent() {
        let portfolio = BTreeMap::from([("Equity".to_string(), 100_000.0)]);
        let shocked = stress_test(&portfolio, "market_crash").unwrap();
        assert_eq!(shocked["Equity"], 70_000.0);
    }

    #[test]
    fn unknown_category_passes_through_unchanged() {
        let portfolio = BTreeMap::from([("Crypto".to_string(), 5_000.0)]);
        let shocked = stress_test(&portfolio, "market_crash").unwrap();
        assert_eq!(shocked["Crypto"], 5_000.0);
    }

    #[test]
    fn unknown_scenario_is_a_typed_error() {
        let portfolio = canonical_portfolio();
        assert_eq!(
            stress_test(&portfolio, "hurricane"),
            Err(Error::UnknownScenario { name: "hurricane".to_string() })
        );
    }

    #[test]
    fn input_portfolio_is_never_mutated() {
        let portfolio = canonical_portfolio();
        let before = portfolio.clone();
        let _ = stress_test(&portfolio, "currency_crisis").unwrap();
        assert_eq!(portfolio, before);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let portfolio = canonical_portfolio();
        let a = stress_test(&portfolio, "interest_rate_hike").unwrap();
        let b = stress_test(&portfolio, "interest_rate_hike").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn gold_gains_in_a_market_crash() {
        let portfolio = canonical_portfolio();
        let shocked = stress_test(&portfolio, "market_crash").unwrap();
        assert!(shocked["Gold"] > portfolio["Gold"]);
        assert!(shocked["Equity"] < portfolio["Equity"]);
    }

    #[test]
    fn builtin_registry_has_the_three_canonical_scenarios() {
        let names: Vec<&str> = builtin_shock_table().scenario_names().collect();
        assert!(names.contains(&"market_crash"));
        assert!(names.contains(&"interest_rate_hike"));
        assert!(names.contains(&"currency_crisis"));
    }

    #[test]
    fn custom_scenario_extends_the_table() {
        let table = ShockTable::builtin().with_scenario("tech_winter", [("Equity", -0.40)]);
        assert!(table.contains("tech_winter"));
        assert_eq!(table.factor("tech_winter", "Equity").unwrap(), -0.40);
        assert_eq!(table.factor("tech_winter", "Gold").unwrap(), 0.0);
    }

    #[test]
    fn percent_change_is_undefined_for_zero_original() {
        assert_eq!(percent_change(0.0, 100.0), None);
        assert_eq!(percent_change(200.0, 150.0), Some(-25.0));
    }

    #[test]
    fn stress_report_flags_zero_positions_as_undefined() {
        let portfolio = BTreeMap::from([
            ("Equity".to_string(), 1_000.0),
            ("Gold".to_string(), 0.0),
        ]);
        let rows = stress_report(&portfolio, "market_crash").unwrap();
        let gold = rows.iter().find(|r| r.asset == "Gold").unwrap();
        assert_eq!(gold.change_pct, None);
        let equity = rows.iter().find(|r| r.asset == "Equity").unwrap();
        assert_eq!(equity.change_pct, Some(-30.0));
    }

    #[test]
    fn factor_lookup_rejects_unknown_scenario() {
        assert!(matches!(
            builtin_shock_table().factor("hurricane", "Equity"),
            Err(Error::UnknownScenario { .. })
        ));
    }
}
