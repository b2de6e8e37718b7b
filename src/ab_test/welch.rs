//! Welch's Two-Sample t-Test
//!
//! Difference of means without assuming equal variances. Degrees of freedom
//! follow the Welch–Satterthwaite approximation; the p-value is two-sided.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};
use statrs::statistics::Statistics;
use tracing::debug;

/// Outcome of a Welch t-test between group `a` and group `b`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WelchTTestResult {
    /// `(mean_a - mean_b) / sqrt(var_a / n_a + var_b / n_b)`
    pub statistic: f64,
    pub p_value: f64,
    /// Welch–Satterthwaite degrees of freedom
    pub df: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    pub n_a: usize,
    pub n_b: usize,
}

/// Run the test. Groups with fewer than two samples give NaN results.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> WelchTTestResult {
    let n_a = a.len() as f64;
    let n_b = b.len() as f64;
    let mean_a = a.iter().mean();
    let mean_b = b.iter().mean();
    // Sample variances (n - 1 denominator); NaN below two samples
    let se2_a = a.iter().variance() / n_a;
    let se2_b = b.iter().variance() / n_b;

    let se2 = se2_a + se2_b;
    let statistic = (mean_a - mean_b) / se2.sqrt();
    let df = se2.powi(2) / (se2_a.powi(2) / (n_a - 1.0) + se2_b.powi(2) / (n_b - 1.0));
    let p_value = t_two_sided_p_value(statistic, df);

    debug!(statistic, p_value, df, n_a, n_b, "Welch t-test complete");

    WelchTTestResult {
        statistic,
        p_value,
        df,
        mean_a,
        mean_b,
        n_a: a.len(),
        n_b: b.len(),
    }
}

/// Two-sided tail probability of Student's t with `df` degrees of freedom.
pub fn t_two_sided_p_value(statistic: f64, df: f64) -> f64 {
    if statistic.is_nan() {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => (2.0 * dist.cdf(-statistic.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}
