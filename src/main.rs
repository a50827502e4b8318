use std::fs::File;
use std::io::{BufWriter, Write};

use fincast::config::{SimulationParameters, canonical_portfolio};
use fincast::projection::{GrowthProjection, project_growth};
use fincast::stress::{builtin_shock_table, stress_report};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut params = SimulationParameters::canonical();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                params.seed = args[i].parse().expect("--seed requires a u64");
            }
            "--trials" => {
                i += 1;
                params.trial_count = args[i].parse().expect("--trials requires a positive integer");
            }
            "--months" => {
                i += 1;
                params.horizon_periods =
                    args[i].parse().expect("--months requires a positive integer");
            }
            "--initial" => {
                i += 1;
                params.initial_amount = args[i].parse().expect("--initial requires a number");
            }
            "--sip" => {
                i += 1;
                params.periodic_contribution =
                    args[i].parse().expect("--sip requires a number");
            }
            "--return" => {
                i += 1;
                params.annual_return_pct =
                    args[i].parse().expect("--return requires a percentage");
            }
            "--vol" => {
                i += 1;
                params.annual_volatility_pct =
                    args[i].parse().expect("--vol requires a percentage");
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => quiet = true,
            _ => {}
        }
        i += 1;
    }

    let projection = match project_growth(&params) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(path) = &output_path {
        let file = File::create(path).expect("failed to create output file");
        let mut writer = BufWriter::new(file);
        for point in projection.points() {
            serde_json::to_writer(&mut writer, &point).expect("failed to serialize band point");
            writeln!(writer).expect("failed to write newline");
        }
        if !quiet {
            println!("{} band points → {path}", projection.time_axis.len());
        }
    }

    if !quiet {
        print_projection_summary(&params, &projection);
        print_stress_summary();
    }
}

fn print_projection_summary(params: &SimulationParameters, projection: &GrowthProjection) {
    println!(
        "\n=== Growth projection: {} months, {} trials, seed {} ===",
        params.horizon_periods, params.trial_count, params.seed
    );
    println!(
        "initial {:.0}, contribution {:.0}/period, return {:.1}%, volatility {:.1}%",
        params.initial_amount,
        params.periodic_contribution,
        params.annual_return_pct,
        params.annual_volatility_pct
    );
    println!("{:>8} {:>16} {:>16} {:>16}", "month", "p5", "p50", "p95");

    let step = params.periods_per_year.max(1);
    for point in projection.points() {
        if point.period % step == 0 || point.period == params.horizon_periods {
            println!(
                "{:>8} {:>16.0} {:>16.0} {:>16.0}",
                point.period, point.conservative, point.moderate, point.aggressive
            );
        }
    }
}

fn print_stress_summary() {
    let portfolio = canonical_portfolio();
    println!("\n=== Stress test (canonical portfolio) ===");
    println!("{:<20} {:<14} {:>12} {:>12} {:>9}", "scenario", "asset", "before", "after", "change");

    for scenario in builtin_shock_table().scenario_names() {
        let rows = stress_report(&portfolio, scenario)
            .expect("registered scenario must stress-test cleanly");
        for row in rows {
            let change = match row.change_pct {
                Some(pct) => format!("{pct:+.1}%"),
                None => "N/A".to_string(),
            };
            println!(
                "{:<20} {:<14} {:>12.0} {:>12.0} {:>9}",
                row.scenario, row.asset, row.original, row.shocked, change
            );
        }
    }
}
