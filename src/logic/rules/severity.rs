use super::{Rule, RuleTable};
use crate::models::PestSeverity;

/// Keyed on the lowercased pest name.
const RULES: &[Rule<str, PestSeverity>] = &[
    Rule {
        id: "rot_or_blight",
        applies: |name| name.contains("blight") || name.contains("rot"),
        outcome: PestSeverity::High,
    },
    Rule {
        id: "sap_sucker",
        applies: |name| name.contains("aphid") || name.contains("whitefly"),
        outcome: PestSeverity::Medium,
    },
];

pub const PEST_SEVERITY_TABLE: RuleTable<str, PestSeverity> =
    RuleTable::new(RULES, "other", PestSeverity::Low);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expects_lowercase_input() {
        assert_eq!(PEST_SEVERITY_TABLE.evaluate("leaf blight"), PestSeverity::High);
        assert_eq!(PEST_SEVERITY_TABLE.evaluate("Leaf Blight"), PestSeverity::Low);
    }

    #[test]
    fn rot_substring_matches_inside_words() {
        assert_eq!(PEST_SEVERITY_TABLE.evaluate("carrot fly"), PestSeverity::High);
    }
}
