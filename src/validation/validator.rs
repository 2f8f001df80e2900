//! Orchestration of multiple validation rules over one input.

use super::rules::ValidationRule;

/// Aggregated outcome of a validator run. Every error string carries a
/// `[RuleName]` prefix identifying the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn merge(mut self, other: ValidationReport) -> ValidationReport {
        self.valid = self.valid && other.valid;
        self.errors.extend(other.errors);
        self
    }
}

/// Runs an ordered list of rules against one input and aggregates the errors.
pub struct Validator<D> {
    rules: Vec<Box<dyn ValidationRule<D>>>,
}

impl<D> Validator<D> {
    pub fn new(rules: Vec<Box<dyn ValidationRule<D>>>) -> Self {
        Self { rules }
    }

    /// Execute all rules in order.
    ///
    /// With `fail_fast`, execution stops after the first failing rule, so the
    /// report holds only that rule's errors; later rules never run.
    pub fn validate(&self, data: &D, fail_fast: bool) -> ValidationReport {
        let mut all_errors = Vec::new();

        for rule in &self.rules {
            let result = rule.validate(data);

            if !result.passed {
                let rule_name = rule.name();
                all_errors.extend(
                    result
                        .errors
                        .into_iter()
                        .map(|error| format!("[{rule_name}] {error}")),
                );

                if fail_fast {
                    break;
                }
            }
        }

        ValidationReport {
            valid: all_errors.is_empty(),
            errors: all_errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::ValidationResult;

    struct AlwaysFails(&'static str);

    impl ValidationRule<u32> for AlwaysFails {
        fn name(&self) -> &'static str {
            self.0
        }

        fn validate(&self, _data: &u32) -> ValidationResult {
            ValidationResult::fail(vec!["boom".to_string()])
        }
    }

    struct AlwaysPasses;

    impl ValidationRule<u32> for AlwaysPasses {
        fn name(&self) -> &'static str {
            "AlwaysPasses"
        }

        fn validate(&self, _data: &u32) -> ValidationResult {
            ValidationResult::pass()
        }
    }

    #[test]
    fn test_errors_prefixed_with_rule_name() {
        let validator = Validator::new(vec![
            Box::new(AlwaysPasses) as Box<dyn ValidationRule<u32>>,
            Box::new(AlwaysFails("FirstRule")),
            Box::new(AlwaysFails("SecondRule")),
        ]);

        let report = validator.validate(&0, false);
        assert!(!report.valid);
        assert_eq!(report.errors, vec!["[FirstRule] boom", "[SecondRule] boom"]);
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let validator = Validator::new(vec![
            Box::new(AlwaysFails("FirstRule")) as Box<dyn ValidationRule<u32>>,
            Box::new(AlwaysFails("SecondRule")),
        ]);

        let report = validator.validate(&0, true);
        assert_eq!(report.errors, vec!["[FirstRule] boom"]);
    }

    #[test]
    fn test_all_passing_is_valid() {
        let validator =
            Validator::new(vec![Box::new(AlwaysPasses) as Box<dyn ValidationRule<u32>>]);
        let report = validator.validate(&0, false);
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_merge_combines_reports() {
        let ok = ValidationReport {
            valid: true,
            errors: vec![],
        };
        let bad = ValidationReport {
            valid: false,
            errors: vec!["[X] nope".to_string()],
        };
        let merged = ok.merge(bad);
        assert!(!merged.valid);
        assert_eq!(merged.errors.len(), 1);
    }
}
