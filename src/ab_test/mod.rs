//! Claim A/B Testing
//!
//! Synthetic insurance-claim data and the two hypothesis tests run against it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  SyntheticClaimGenerator                        │
//! │  (owns seeded ChaCha8Rng, province → gender → claimed draws)     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │ ClaimTable (immutable)
//!        ┌───────────────────────┴───────────────────────┐
//!        ▼                                               ▼
//! ┌─────────────────┐                           ┌─────────────────┐
//! │ Contingency     │                           │ partition by    │
//! │ (Province ×     │                           │ Gender          │
//! │  Claimed)       │                           │                 │
//! └────────┬────────┘                           └────────┬────────┘
//!          ▼                                             ▼
//! ┌─────────────────┐                           ┌─────────────────┐
//! │ chi2_contingency│                           │ welch_t_test    │
//! └────────┬────────┘                           └────────┬────────┘
//!          └──────────────────────┬──────────────────────┘
//!                                 ▼
//!                          AnalysisReport
//! ```
//!
//! # Determinism Guarantees
//!
//! - **RNG**: Seeded `ChaCha8Rng` only, owned by the generator
//! - **Draw order**: provinces, then genders, then claims in record order
//! - **Crosstab order**: labels sorted, so table layout does not depend on input order

pub mod analysis;
pub mod chi_squared;
pub mod contingency;
pub mod generator;
pub mod report;
pub mod welch;

#[cfg(test)]
mod generator_tests;

pub use analysis::{
    analyze, association_test, difference_of_means, gender_analysis, partition_outcome,
    province_association, AnalysisReport, AssociationTest,
};
pub use chi_squared::{chi2_contingency, chi_squared_sf, small_expected_cells, ChiSquaredResult};
pub use contingency::ContingencyTable;
pub use generator::{
    generate_claims, GenderClaimRates, GeneratorConfig, ProvinceClaimRates,
    SyntheticClaimGenerator, DEFAULT_NUM_RECORDS, DEFAULT_SEED,
};
pub use report::{format_value, render_json, render_text};
pub use welch::{t_two_sided_p_value, welch_t_test, WelchTTestResult};
