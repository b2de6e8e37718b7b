//! Console rendering of an [`AnalysisReport`].

use crate::ab_test::analysis::AnalysisReport;

/// Human-readable report, one statistic per line.
pub fn render_text(report: &AnalysisReport) -> String {
    let province = &report.province;
    format!(
        "Chi-squared Statistic: {}\n\
         P-value (Provinces): {}\n\
         Contingency Table (Provinces):\n{}\n\
         T-statistic (Gender): {}\n\
         P-value (Gender): {}\n",
        format_value(province.result.statistic),
        format_value(province.result.p_value),
        province.contingency,
        format_value(report.gender.statistic),
        format_value(report.gender.p_value),
    )
}

/// Plain decimal for ordinary magnitudes, scientific notation for very small
/// or very large ones.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}

/// Pretty JSON. Non-finite statistics serialize as `null`.
pub fn render_json(report: &AnalysisReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ab_test::analysis::analyze;
    use crate::ab_test::generator::{generate_claims, GeneratorConfig};

    #[test]
    fn test_text_report_sections() {
        let table = generate_claims(&GeneratorConfig::default().with_records(200));
        let text = render_text(&analyze(&table));
        assert!(text.starts_with("Chi-squared Statistic: "));
        assert!(text.contains("P-value (Provinces): "));
        assert!(text.contains("Contingency Table (Provinces):\nClaimed"));
        assert!(text.contains("T-statistic (Gender): "));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(5.67e-48), "5.67e-48");
        assert_eq!(format_value(-2.5e20), "-2.5e20");
        assert_eq!(format_value(0.5038), "0.5038");
        assert_eq!(format_value(15.25), "15.25");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn test_tiny_gender_p_value_uses_exponent() {
        let table = generate_claims(&GeneratorConfig::default());
        let text = render_text(&analyze(&table));
        let line = text
            .lines()
            .find(|l| l.starts_with("P-value (Gender): "))
            .unwrap();
        assert!(line.contains("e-"), "{line}");
        assert!(line.len() < 50, "{line}");
    }

    #[test]
    fn test_json_report_fields() {
        let table = generate_claims(&GeneratorConfig::default().with_records(200));
        let json = render_json(&analyze(&table)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["records"], 200);
        assert_eq!(value["province"]["result"]["dof"], 2);
        assert_eq!(value["province"]["contingency"]["row_field"], "province");
        assert!(value["gender"]["statistic"].is_number());
    }
}
