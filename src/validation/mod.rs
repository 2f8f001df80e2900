//! Composable rule-based validation for parsed statements and parameters.

pub mod balance_sheet;
pub mod parameters;
pub mod profit_loss;
pub mod rules;
pub mod validator;

pub use balance_sheet::{HierarchyConsistencyRule, NumericAmountRule, RequiredSectionsRule};
pub use parameters::{
    ParameterKind, ParameterSet, ParameterValue, RangeValidationRule, RequiredParametersRule,
    TypeValidationRule,
};
pub use profit_loss::{PlPeriodConsistencyRule, PlRequiredSectionsRule};
pub use rules::{
    ColumnKind, DataTypeRule, NonEmptyRule, RequiredColumnsRule, StructuralConsistencyRule,
    ValidationResult, ValidationRule,
};
pub use validator::{ValidationReport, Validator};

use crate::table::{columns, StatementTable};

/// Stock rule stack for a parsed Balance Sheet table.
pub fn balance_sheet_validator() -> Validator<StatementTable> {
    Validator::new(vec![
        Box::new(RequiredColumnsRule::new([
            columns::ACCOUNT_NAME,
            columns::ROW_TYPE,
            columns::NUMERIC_VALUE,
        ])),
        Box::new(NonEmptyRule),
        Box::new(RequiredSectionsRule::default()),
        Box::new(HierarchyConsistencyRule::default()),
    ])
}

/// Stock rule stack for a parsed Profit & Loss table.
pub fn profit_loss_validator() -> Validator<StatementTable> {
    Validator::new(vec![
        Box::new(RequiredColumnsRule::new([
            columns::ACCOUNT_NAME,
            columns::ROW_TYPE,
            columns::VALUES,
        ])),
        Box::new(NonEmptyRule),
        Box::new(PlRequiredSectionsRule::default()),
        Box::new(PlPeriodConsistencyRule),
    ])
}
