//! Chi-Squared Test of Independence
//!
//! Pearson's chi-squared over a [`ContingencyTable`], with Yates' continuity
//! correction for tables with one degree of freedom.

use crate::ab_test::contingency::ContingencyTable;
use serde::Serialize;
use statrs::function::gamma::gamma_ur;
use tracing::{debug, warn};

/// Expected cell count below which the chi-squared approximation is unreliable.
pub const MIN_EXPECTED_COUNT: f64 = 5.0;

/// Outcome of a chi-squared test of independence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChiSquaredResult {
    pub statistic: f64,
    pub p_value: f64,
    /// `(rows - 1) * (cols - 1)`
    pub dof: usize,
    /// Expected counts under independence, same shape as the observed table.
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' correction was applied.
    pub yates_corrected: bool,
}

/// Run the test on `table`.
///
/// Degenerate tables (empty, or with a zero marginal) produce NaN rather than
/// an error. A table with zero degrees of freedom yields statistic 0, p-value 1.
pub fn chi2_contingency(table: &ContingencyTable, correction: bool) -> ChiSquaredResult {
    let expected = table.expected_frequencies();
    let dof = table.n_rows().saturating_sub(1) * table.n_cols().saturating_sub(1);

    if table.grand_total() == 0 {
        return ChiSquaredResult {
            statistic: f64::NAN,
            p_value: f64::NAN,
            dof,
            expected,
            yates_corrected: false,
        };
    }

    if dof == 0 {
        return ChiSquaredResult {
            statistic: 0.0,
            p_value: 1.0,
            dof,
            expected,
            yates_corrected: false,
        };
    }

    let small_cells = small_expected_cells(&expected);
    if small_cells > 0 {
        warn!(
            small_cells,
            threshold = MIN_EXPECTED_COUNT,
            "Expected counts below threshold; chi-squared approximation may be poor"
        );
    }

    let yates_corrected = correction && dof == 1;
    let mut statistic = 0.0;
    for (observed_row, expected_row) in table.counts().iter().zip(&expected) {
        for (&observed, &e) in observed_row.iter().zip(expected_row) {
            let mut o = observed as f64;
            if yates_corrected {
                let diff = e - o;
                o += diff.signum() * diff.abs().min(0.5);
            }
            statistic += (o - e).powi(2) / e;
        }
    }

    let p_value = chi_squared_sf(statistic, dof);
    debug!(statistic, p_value, dof, yates_corrected, "Chi-squared test complete");

    ChiSquaredResult {
        statistic,
        p_value,
        dof,
        expected,
        yates_corrected,
    }
}

/// Number of cells whose expected count is below [`MIN_EXPECTED_COUNT`].
pub fn small_expected_cells(expected: &[Vec<f64>]) -> usize {
    expected
        .iter()
        .flatten()
        .filter(|&&e| e < MIN_EXPECTED_COUNT)
        .count()
}

/// Upper-tail probability of the chi-squared distribution with `dof` degrees of freedom.
pub fn chi_squared_sf(statistic: f64, dof: usize) -> f64 {
    if statistic.is_nan() || dof == 0 {
        return f64::NAN;
    }
    if statistic <= 0.0 {
        return 1.0;
    }
    if statistic.is_infinite() {
        return 0.0;
    }
    gamma_ur(dof as f64 / 2.0, statistic / 2.0)
}
