/// Sort samples for percentile extraction. NaNs compare equal to everything,
/// matching the tolerance of the run-analysis code this grew out of; the
/// projector never feeds NaN (validated inputs, finite arithmetic).
pub fn sort_samples(values: &mut [f64]) {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
}

/// Linear-interpolation percentile over a sorted, non-empty slice.
/// `pct` in [0, 100]. For rank h = pct/100 · (n−1) the result blends
/// `values[floor(h)]` and `values[ceil(h)]` — the same convention the
/// reference dashboard's numpy reduction uses.
pub fn percentile_of_sorted(values: &[f64], pct: f64) -> f64 {
    let n = values.len();
    let h = pct / 100.0 * (n - 1) as f64;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    values[lo] * (1.0 - frac) + values[hi] * frac
}
