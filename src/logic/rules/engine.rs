/// One row of a priority-ordered decision table.
pub struct Rule<I: ?Sized + 'static, O: 'static> {
    pub id: &'static str,
    pub applies: fn(&I) -> bool,
    pub outcome: O,
}

/// An ordered list of rules evaluated first-match-wins, with an outcome for
/// inputs no rule claims. Evaluation is total and side-effect free.
pub struct RuleTable<I: ?Sized + 'static, O: 'static> {
    rules: &'static [Rule<I, O>],
    default_id: &'static str,
    default: O,
}

impl<I: ?Sized + 'static, O: Copy + 'static> RuleTable<I, O> {
    pub const fn new(rules: &'static [Rule<I, O>], default_id: &'static str, default: O) -> Self {
        Self {
            rules,
            default_id,
            default,
        }
    }

    pub fn evaluate(&self, input: &I) -> O {
        self.matching_rule(input)
            .map(|rule| rule.outcome)
            .unwrap_or(self.default)
    }

    /// The first rule whose predicate holds, if any.
    pub fn matching_rule(&self, input: &I) -> Option<&'static Rule<I, O>> {
        self.rules.iter().find(|rule| (rule.applies)(input))
    }

    /// Id of the rule that decides `input`, including the default row.
    pub fn decided_by(&self, input: &I) -> &'static str {
        self.matching_rule(input)
            .map(|rule| rule.id)
            .unwrap_or(self.default_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGN_RULES: &[Rule<i32, &str>] = &[
        Rule {
            id: "negative",
            applies: |n| *n < 0,
            outcome: "neg",
        },
        Rule {
            id: "small",
            applies: |n| *n < 10,
            outcome: "small",
        },
        Rule {
            id: "also_negative",
            applies: |n| *n < 0,
            outcome: "unreachable",
        },
    ];

    const SIGN: RuleTable<i32, &str> = RuleTable::new(SIGN_RULES, "large", "large");

    #[test]
    fn first_match_wins() {
        assert_eq!(SIGN.evaluate(&-4), "neg");
        assert_eq!(SIGN.decided_by(&-4), "negative");
        assert_eq!(SIGN.evaluate(&3), "small");
    }

    #[test]
    fn default_when_nothing_matches() {
        assert_eq!(SIGN.evaluate(&42), "large");
        assert!(SIGN.matching_rule(&42).is_none());
        assert_eq!(SIGN.decided_by(&42), "large");
    }

    #[test]
    fn shadowed_rule_never_decides() {
        assert_eq!(SIGN.decided_by(&-100), "negative");
        assert_eq!(SIGN.decided_by(&9), "small");
    }
}
