//! Contingency Tables
//!
//! Cross-tabulation of two categorical columns of a [`ClaimTable`].
//! Row and column labels are the distinct observed values in sorted order.

use crate::models::{ClaimTable, Field};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Observed counts for every (row label, column label) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContingencyTable {
    row_field: Field,
    col_field: Field,
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    /// `counts[row][col]`
    counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Cross-tabulate `row_field` against `col_field`.
    pub fn from_table(table: &ClaimTable, row_field: Field, col_field: Field) -> Self {
        let mut rows = BTreeSet::new();
        let mut cols = BTreeSet::new();
        let mut cells: BTreeMap<(&'static str, &'static str), u64> = BTreeMap::new();

        for record in table {
            let row = row_field.label(record);
            let col = col_field.label(record);
            rows.insert(row);
            cols.insert(col);
            *cells.entry((row, col)).or_insert(0) += 1;
        }

        let counts = rows
            .iter()
            .map(|row| {
                cols.iter()
                    .map(|col| cells.get(&(*row, *col)).copied().unwrap_or(0))
                    .collect()
            })
            .collect();

        Self {
            row_field,
            col_field,
            row_labels: rows.into_iter().map(String::from).collect(),
            col_labels: cols.into_iter().map(String::from).collect(),
            counts,
        }
    }

    pub fn row_field(&self) -> Field {
        self.row_field
    }

    pub fn col_field(&self) -> Field {
        self.col_field
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn counts(&self) -> &[Vec<u64>] {
        &self.counts
    }

    pub fn n_rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_labels.len()
    }

    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    pub fn col_totals(&self) -> Vec<u64> {
        (0..self.n_cols())
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .collect()
    }

    pub fn grand_total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Expected counts under independence: `row_total * col_total / grand_total`.
    pub fn expected_frequencies(&self) -> Vec<Vec<f64>> {
        let rows = self.row_totals();
        let cols = self.col_totals();
        let total = self.grand_total() as f64;
        rows.iter()
            .map(|&r| cols.iter().map(|&c| r as f64 * c as f64 / total).collect())
            .collect()
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_name = self.row_field.column_name();
        let col_name = self.col_field.column_name();
        let label_width = self
            .row_labels
            .iter()
            .map(String::len)
            .chain([row_name.len(), col_name.len()])
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .col_labels
            .iter()
            .enumerate()
            .map(|(c, label)| {
                self.counts
                    .iter()
                    .map(|row| row[c].to_string().len())
                    .chain([label.len()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:<label_width$}", col_name)?;
        for (label, &width) in self.col_labels.iter().zip(&widths) {
            write!(f, "  {:>width$}", label)?;
        }
        writeln!(f)?;
        write!(f, "{}", row_name)?;
        for (label, row) in self.row_labels.iter().zip(&self.counts) {
            writeln!(f)?;
            write!(f, "{:<label_width$}", label)?;
            for (count, &width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", count)?;
            }
        }
        Ok(())
    }
}
