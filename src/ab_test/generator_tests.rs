//! Generator Tests
//!
//! 1. Determinism: same seed + record count → identical table
//! 2. Shape: exactly N records, every label within its fixed set
//! 3. Outcome model: claims depend on gender, not province

use crate::ab_test::analysis::{gender_analysis, province_association};
use crate::ab_test::generator::{generate_claims, GeneratorConfig, ProvinceClaimRates};
use crate::models::{Gender, Province};

#[test]
fn test_same_seed_same_table() {
    let config = GeneratorConfig::default();
    assert_eq!(generate_claims(&config), generate_claims(&config));
}

#[test]
fn test_different_seed_different_table() {
    let a = generate_claims(&GeneratorConfig::default().with_seed(1));
    let b = generate_claims(&GeneratorConfig::default().with_seed(2));
    assert_ne!(a, b);
}

#[test]
fn test_record_count_matches() {
    for n in [0usize, 1, 7, 1000] {
        let table = generate_claims(&GeneratorConfig::default().with_records(n));
        assert_eq!(table.len(), n);
    }
}

#[test]
fn test_labels_within_fixed_sets() {
    let table = generate_claims(&GeneratorConfig::default().with_records(500));
    for record in &table {
        assert!(Province::ALL.contains(&record.province));
        assert!(Gender::ALL.contains(&record.gender));
    }
    // Every label shows up at this size
    for province in Province::ALL {
        assert!(table.iter().any(|r| r.province == province));
    }
    for gender in Gender::ALL {
        assert!(table.iter().any(|r| r.gender == gender));
    }
}

#[test]
fn test_first_province_independent_of_record_count() {
    // Provinces are drawn first, so the first draw is shared for any N >= 1
    let short = generate_claims(&GeneratorConfig::default().with_records(1));
    let long = generate_claims(&GeneratorConfig::default().with_records(100));
    assert_eq!(short.records()[0].province, long.records()[0].province);
}

#[test]
fn test_default_scenario_claim_rate() {
    let table = generate_claims(&GeneratorConfig::default());
    let rate = table.claim_rate();
    assert!((rate - 0.4).abs() <= 0.05, "claim rate {rate}");
}

#[test]
fn test_default_scenario_province_not_significant() {
    let table = generate_claims(&GeneratorConfig::default());
    let test = province_association(&table);
    assert_eq!(test.result.dof, 2);
    assert!(test.result.p_value >= 0.05, "p = {}", test.result.p_value);
}

#[test]
fn test_default_scenario_gender_significant() {
    let table = generate_claims(&GeneratorConfig::default());
    let result = gender_analysis(&table);
    assert!(result.statistic > 0.0);
    assert!(result.p_value < 0.001, "p = {}", result.p_value);
    assert!(result.mean_a > result.mean_b);
}

#[test]
fn test_province_rates_do_not_affect_outcome() {
    let base = GeneratorConfig::default();
    let mut skewed = base.clone();
    skewed.province_rates = ProvinceClaimRates {
        province_a: 0.0,
        province_b: 1.0,
        province_c: 0.5,
    };
    assert_eq!(generate_claims(&base), generate_claims(&skewed));
}

#[test]
fn test_gender_rates_drive_outcome() {
    let mut config = GeneratorConfig::default().with_records(300);
    config.gender_rates.male = 1.0;
    config.gender_rates.female = 0.0;
    let table = generate_claims(&config);
    for record in &table {
        assert_eq!(record.claimed, record.gender == Gender::Male);
    }
}
