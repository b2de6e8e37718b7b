//! Insurance Claim A/B Testing Library
//!
//! Synthetic claim generation, CSV persistence, and the chi-squared / Welch
//! tests run over the generated table. The `insurance_ab` binary wires these
//! together.

pub mod ab_test;
pub mod config;
pub mod models;
pub mod persistence;
pub mod pipeline;

pub use models::{ClaimRecord, ClaimTable, Field, Gender, Province};
