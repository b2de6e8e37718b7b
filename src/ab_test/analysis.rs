//! A/B Analysis
//!
//! Binds the contingency builder and the two hypothesis tests to claim-table
//! columns: province association (chi-squared) and gender difference in claim
//! rate (Welch).

use crate::ab_test::chi_squared::{chi2_contingency, ChiSquaredResult};
use crate::ab_test::contingency::ContingencyTable;
use crate::ab_test::welch::{welch_t_test, WelchTTestResult};
use crate::models::{ClaimTable, Field, Gender};
use serde::Serialize;
use tracing::info;

/// Chi-squared result together with the table it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationTest {
    pub result: ChiSquaredResult,
    pub contingency: ContingencyTable,
}

/// Test whether `category` and `outcome` are independent.
pub fn association_test(table: &ClaimTable, category: Field, outcome: Field) -> AssociationTest {
    let contingency = ContingencyTable::from_table(table, category, outcome);
    let result = chi2_contingency(&contingency, true);
    info!(
        category = category.column_name(),
        outcome = outcome.column_name(),
        statistic = result.statistic,
        p_value = result.p_value,
        dof = result.dof,
        "Association test complete"
    );
    AssociationTest {
        result,
        contingency,
    }
}

/// Province vs claimed.
pub fn province_association(table: &ClaimTable) -> AssociationTest {
    association_test(table, Field::Province, Field::Claimed)
}

/// Claimed outcome (0.0 / 1.0) of every record whose `category` label is `level`.
pub fn partition_outcome(table: &ClaimTable, category: Field, level: &str) -> Vec<f64> {
    table
        .iter()
        .filter(|record| category.label(record) == level)
        .map(|record| if record.claimed { 1.0 } else { 0.0 })
        .collect()
}

/// Welch test of claim rate between two levels of `category`.
pub fn difference_of_means(
    table: &ClaimTable,
    category: Field,
    group_a: &str,
    group_b: &str,
) -> WelchTTestResult {
    let a = partition_outcome(table, category, group_a);
    let b = partition_outcome(table, category, group_b);
    let result = welch_t_test(&a, &b);
    info!(
        category = category.column_name(),
        group_a,
        group_b,
        statistic = result.statistic,
        p_value = result.p_value,
        "Difference-of-means test complete"
    );
    result
}

/// Male vs female claim rate.
pub fn gender_analysis(table: &ClaimTable) -> WelchTTestResult {
    difference_of_means(
        table,
        Field::Gender,
        Gender::Male.as_str(),
        Gender::Female.as_str(),
    )
}

/// Everything printed at the end of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub records: usize,
    pub claim_rate: f64,
    pub province: AssociationTest,
    pub gender: WelchTTestResult,
}

pub fn analyze(table: &ClaimTable) -> AnalysisReport {
    AnalysisReport {
        records: table.len(),
        claim_rate: table.claim_rate(),
        province: province_association(table),
        gender: gender_analysis(table),
    }
}
