use crate::models::Finding;

/// Normalized evasiveness score on a 0-10 scale
///
/// `round(sum(weights) / (total_statements * 2) * 10, 2)`, and 0 when there
/// were no statements. Not clamped: more findings than statements can push
/// the score above 10.
pub fn evasiveness_score(findings: &[Finding], total_statements: usize) -> f64 {
    if total_statements == 0 {
        return 0.0;
    }

    let raw_sum: u32 = findings.iter().map(|f| f.category.weight()).sum();
    let score = raw_sum as f64 / (total_statements as f64 * 2.0) * 10.0;
    round2(score)
}

/// Round to two decimals, ties to even
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn finding(category: Category) -> Finding {
        Finding::new("excerpt", category, "reason")
    }

    #[test]
    fn test_score_formula() {
        let findings = vec![
            finding(Category::Somewhat),
            finding(Category::Somewhat),
            finding(Category::Clearly),
        ];
        assert_eq!(evasiveness_score(&findings, 10), 2.0);
    }

    #[test]
    fn test_score_zero_without_statements() {
        assert_eq!(evasiveness_score(&[], 0), 0.0);
        assert_eq!(evasiveness_score(&[finding(Category::Clearly)], 0), 0.0);
    }

    #[test]
    fn test_score_zero_without_findings() {
        assert_eq!(evasiveness_score(&[], 37), 0.0);
    }

    #[test]
    fn test_score_rounds_to_two_decimals() {
        // 1 / 6 * 10 = 1.666..
        assert_eq!(evasiveness_score(&[finding(Category::Somewhat)], 3), 1.67);
    }

    #[test]
    fn test_score_ties_round_to_even() {
        // 1 / 16 * 10 = 0.625
        assert_eq!(evasiveness_score(&[finding(Category::Somewhat)], 8), 0.62);
        // 5 / 16 * 10 = 3.125
        let findings = vec![finding(Category::Somewhat); 5];
        assert_eq!(evasiveness_score(&findings, 8), 3.12);
        // 3 / 16 * 10 = 1.875
        let findings = vec![finding(Category::Somewhat); 3];
        assert_eq!(evasiveness_score(&findings, 8), 1.88);
    }

    #[test]
    fn test_score_monotonic_in_category() {
        let mut findings = vec![
            finding(Category::Somewhat),
            finding(Category::Somewhat),
            finding(Category::Somewhat),
        ];
        let mut previous = evasiveness_score(&findings, 7);
        for i in 0..findings.len() {
            findings[i].category = Category::Clearly;
            let current = evasiveness_score(&findings, 7);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_score_is_not_clamped() {
        let findings = vec![finding(Category::Clearly); 3];
        assert_eq!(evasiveness_score(&findings, 2), 15.0);
    }
}
