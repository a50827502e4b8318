use std::collections::BTreeMap;
use std::env;

use fincast::config::canonical_portfolio;
use fincast::stress::{builtin_shock_table, stress_report};

/// Dump per-asset stress results for every registered scenario as NDJSON.
/// An optional argument scales the canonical portfolio (e.g. `2.5` for a
/// 250k book instead of the default 100k).
fn main() {
    let scale: f64 = env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(1.0);

    let portfolio: BTreeMap<String, f64> = canonical_portfolio()
        .into_iter()
        .map(|(asset, value)| (asset, value * scale))
        .collect();

    let mut rows = Vec::new();
    for scenario in builtin_shock_table().scenario_names() {
        let report = stress_report(&portfolio, scenario)
            .expect("registered scenario must stress-test cleanly");
        rows.extend(report);
    }

    // Write NDJSON to stdout.
    for row in &rows {
        println!("{}", serde_json::to_string(row).expect("serialisation failed"));
    }

    // Per-scenario summary to stderr.
    let mut scenario_before: BTreeMap<&str, f64> = BTreeMap::new();
    let mut scenario_after: BTreeMap<&str, f64> = BTreeMap::new();
    for row in &rows {
        *scenario_before.entry(row.scenario.as_str()).or_insert(0.0) += row.original;
        *scenario_after.entry(row.scenario.as_str()).or_insert(0.0) += row.shocked;
    }

    eprintln!("{:<20} {:>14} {:>14} {:>9}", "scenario", "before", "after", "impact");
    for (scenario, before) in &scenario_before {
        let after = scenario_after[scenario];
        let impact = if *before == 0.0 {
            "N/A".to_string()
        } else {
            format!("{:+.1}%", (after - before) / before * 100.0)
        };
        eprintln!("{scenario:<20} {before:>14.0} {after:>14.0} {impact:>9}");
    }
}
