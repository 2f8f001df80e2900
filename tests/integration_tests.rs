use financial_statement_analyzer::*;
use std::collections::BTreeMap;

use financial_statement_analyzer::model::{COGS_SECTION, INCOME_SECTION, NET_INCOME_ROW};
use financial_statement_analyzer::table::columns;

fn periods_cell(entries: &[(&str, f64)]) -> CellValue {
    CellValue::Periods(
        entries
            .iter()
            .map(|(period, value)| ((*period).to_string(), *value))
            .collect(),
    )
}

/// A small retail P&L: two income accounts, one COGS account, a prior-year
/// comparison column, and a Net Income summary row.
fn retail_profit_loss() -> ProfitLossModel {
    let table = StatementTable::new([columns::ACCOUNT_NAME, columns::ROW_TYPE, columns::VALUES])
        .with_row(StatementRow::new("Income").with_row_type(RowType::Section))
        .with_row(
            StatementRow::new("Sales").with_row_type(RowType::Child).with_cell(
                columns::VALUES,
                periods_cell(&[
                    ("Nov 2025", 1000.0),
                    ("Oct 2025", 900.0),
                    ("Nov 2024 (PY)", 800.0),
                ]),
            ),
        )
        .with_row(
            StatementRow::new("Services")
                .with_row_type(RowType::Child)
                .with_cell(
                    columns::VALUES,
                    periods_cell(&[
                        ("Nov 2025", 500.0),
                        ("Oct 2025", 450.0),
                        ("Nov 2024 (PY)", 400.0),
                    ]),
                ),
        )
        .with_row(StatementRow::new("Cost of Goods Sold").with_row_type(RowType::Section))
        .with_row(
            StatementRow::new("Materials")
                .with_row_type(RowType::Child)
                .with_cell(
                    columns::VALUES,
                    periods_cell(&[
                        ("Nov 2025", 600.0),
                        ("Oct 2025", 500.0),
                        ("Nov 2024 (PY)", 480.0),
                    ]),
                ),
        )
        .with_row(StatementRow::new("Expenses").with_row_type(RowType::Section))
        .with_row(
            StatementRow::new("Rent").with_row_type(RowType::Child).with_cell(
                columns::VALUES,
                periods_cell(&[
                    ("Nov 2025", 200.0),
                    ("Oct 2025", 200.0),
                    ("Nov 2024 (PY)", 180.0),
                ]),
            ),
        )
        .with_row(
            StatementRow::new(NET_INCOME_ROW)
                .with_row_type(RowType::Calculated)
                .with_cell(
                    columns::VALUES,
                    periods_cell(&[
                        ("Nov 2025", 700.0),
                        ("Oct 2025", 650.0),
                        ("Nov 2024 (PY)", 540.0),
                    ]),
                ),
        );

    let mut hierarchy = BTreeMap::new();
    hierarchy.insert(
        INCOME_SECTION.to_string(),
        AccountNode::branch(
            INCOME_SECTION,
            vec![
                AccountNode::leaf(
                    "Sales",
                    [
                        ("Nov 2025", 1000.0),
                        ("Oct 2025", 900.0),
                        ("Nov 2024 (PY)", 800.0),
                    ],
                ),
                AccountNode::leaf(
                    "Services",
                    [
                        ("Nov 2025", 500.0),
                        ("Oct 2025", 450.0),
                        ("Nov 2024 (PY)", 400.0),
                    ],
                ),
            ],
        ),
    );
    hierarchy.insert(
        COGS_SECTION.to_string(),
        AccountNode::branch(
            COGS_SECTION,
            vec![AccountNode::leaf(
                "Materials",
                [
                    ("Nov 2025", 600.0),
                    ("Oct 2025", 500.0),
                    ("Nov 2024 (PY)", 480.0),
                ],
            )],
        ),
    );

    ProfitLossModel::new(
        table,
        hierarchy,
        vec![CalculatedRow {
            account_name: NET_INCOME_ROW.to_string(),
            values: BTreeMap::from([
                ("Nov 2025".to_string(), 700.0),
                ("Oct 2025".to_string(), 650.0),
                ("Nov 2024 (PY)".to_string(), 540.0),
            ]),
        }],
    )
}

fn retail_balance_sheet() -> BalanceSheetModel {
    let table = StatementTable::new([
        columns::ACCOUNT_NAME,
        columns::ROW_TYPE,
        columns::NUMERIC_VALUE,
    ])
    .with_row(StatementRow::new("Assets").with_row_type(RowType::Section))
    .with_row(StatementRow::new("Current Assets").with_row_type(RowType::Parent))
    .with_row(
        StatementRow::new("Checking")
            .with_row_type(RowType::Child)
            .with_number(columns::NUMERIC_VALUE, 1201.0),
    )
    .with_row(
        StatementRow::new("Savings")
            .with_row_type(RowType::Child)
            .with_number(columns::NUMERIC_VALUE, 800.0),
    )
    .with_row(
        StatementRow::new("Total for Current Assets")
            .with_row_type(RowType::Total)
            .with_number(columns::NUMERIC_VALUE, 2001.0),
    )
    .with_row(StatementRow::new("Liabilities and Equity").with_row_type(RowType::Section))
    .with_row(StatementRow::new("Current Liabilities").with_row_type(RowType::Parent))
    .with_row(
        StatementRow::new("Accounts Payable")
            .with_row_type(RowType::Child)
            .with_number(columns::NUMERIC_VALUE, 667.0),
    )
    .with_row(
        StatementRow::new("Total for Current Liabilities")
            .with_row_type(RowType::Total)
            .with_number(columns::NUMERIC_VALUE, 667.0),
    );

    let mut hierarchy = BTreeMap::new();
    hierarchy.insert(
        "Assets".to_string(),
        AccountNode::branch(
            "Assets",
            vec![AccountNode::branch(
                "Current Assets",
                vec![
                    AccountNode::leaf("Checking", [("Nov 2025", 1201.0)]),
                    AccountNode::leaf("Savings", [("Nov 2025", 800.0)]),
                ],
            )],
        ),
    );
    hierarchy.insert(
        "Liabilities and Equity".to_string(),
        AccountNode::branch(
            "Liabilities and Equity",
            vec![AccountNode::branch(
                "Liabilities",
                vec![AccountNode::branch(
                    "Current Liabilities",
                    vec![AccountNode::leaf("Accounts Payable", [("Nov 2025", 667.0)])],
                )],
            )],
        ),
    );

    BalanceSheetModel::new(table, hierarchy)
}

#[test]
fn test_full_pipeline_validates_and_computes_metrics() {
    let pl = retail_profit_loss();
    let bs = retail_balance_sheet();
    let analyzer = StatementAnalyzer::new(&pl).with_balance_sheet(&bs);

    let report = analyzer.validate();
    assert!(report.valid, "unexpected errors: {:?}", report.errors);

    let summary = analyzer.analyze();
    assert_eq!(summary.total_revenue.get("Nov 2025"), Some(&1500.0));
    assert_eq!(summary.total_revenue.get("Oct 2025"), Some(&1350.0));
    assert!(summary.diagnostics.is_empty(), "{:?}", summary.diagnostics);

    // (1500 - 600) / 1500 = 60%
    let gross = summary.gross_margin.unwrap();
    assert_eq!(gross.get("Nov 2025"), Some(&60.0));

    let net = summary.net_margin.unwrap();
    assert!((net.get("Nov 2025").unwrap() - 46.666_666).abs() < 1e-4);

    // 2001 current assets vs 667 current liabilities.
    let wc = summary.working_capital.unwrap();
    assert_eq!(wc.get("Nov 2025"), Some(&1334.0));
    let ratio = summary.current_ratio.unwrap();
    assert!((ratio.get("Nov 2025").unwrap() - 3.0).abs() < 1e-9);
}

#[test]
fn test_growth_rates_end_to_end() {
    let pl = retail_profit_loss();
    let revenue = RevenueCalculator::new(&pl);

    let mom = revenue.mom_growth("Nov 2025", "Oct 2025").unwrap();
    assert!((mom.growth_rate - 11.111_111).abs() < 1e-4);
    assert_eq!(mom.current, 1500.0);
    assert_eq!(mom.previous, 1350.0);

    let yoy = revenue.yoy_growth("Nov 2025").unwrap();
    assert_eq!(yoy.previous_period.as_deref(), Some("Nov 2024 (PY)"));
    assert_eq!(yoy.previous, 1200.0);
    assert!((yoy.growth_rate - 25.0).abs() < 1e-9);
}

#[test]
fn test_validation_reports_collect_across_rules() {
    // A P&L missing its Expenses section and with ragged period keys.
    let table = StatementTable::new([columns::ACCOUNT_NAME, columns::ROW_TYPE, columns::VALUES])
        .with_row(StatementRow::new("Income").with_row_type(RowType::Section))
        .with_row(
            StatementRow::new("Sales")
                .with_row_type(RowType::Child)
                .with_cell(columns::VALUES, periods_cell(&[("Nov 2025", 1.0), ("Oct 2025", 2.0)])),
        )
        .with_row(
            StatementRow::new("Services")
                .with_row_type(RowType::Child)
                .with_cell(columns::VALUES, periods_cell(&[("Nov 2025", 3.0)])),
        );

    let report = profit_loss_validator().validate(&table, false);
    assert!(!report.valid);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("[PlRequiredSectionsRule] Missing required section: Expenses")));
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("[PlPeriodConsistencyRule]") && e.contains("'Services'")));

    // fail_fast output is a strict prefix-subset of the full run.
    let fast = profit_loss_validator().validate(&table, true);
    assert!(!fast.valid);
    assert!(fast.errors.len() < report.errors.len());
    assert_eq!(fast.errors[..], report.errors[..fast.errors.len()]);
}

#[test]
fn test_hierarchy_model_round_trips_through_parser_json() {
    // The parser hands hierarchies over in the legacy children/values/parent
    // encoding; a flagged parent with its own rollup must stay out of sums.
    let json = r#"{
        "name": "Income",
        "children": [
            {"name": "Product Income", "values": {"Nov 2025": 1500.0}, "parent": true},
            {"name": "Sales", "values": {"Nov 2025": 1000.0}},
            {"name": "Services", "values": {"Nov 2025": 500.0}}
        ]
    }"#;
    let income: AccountNode = serde_json::from_str(json).unwrap();

    let mut hierarchy = BTreeMap::new();
    hierarchy.insert(INCOME_SECTION.to_string(), income);
    let pl = ProfitLossModel::new(
        StatementTable::new([columns::ACCOUNT_NAME, columns::ROW_TYPE, columns::VALUES]),
        hierarchy,
        vec![],
    );

    let totals = RevenueCalculator::new(&pl).total_revenue();
    assert_eq!(totals.get("Nov 2025"), Some(&1500.0));
}

#[test]
fn test_repeated_runs_are_identical() {
    let pl = retail_profit_loss();
    let analyzer = StatementAnalyzer::new(&pl);

    let first_report = analyzer.validate();
    let second_report = analyzer.validate();
    assert_eq!(first_report, second_report);

    let revenue = RevenueCalculator::new(&pl);
    assert_eq!(
        revenue.mom_growth("Nov 2025", "Oct 2025").unwrap(),
        revenue.mom_growth("Nov 2025", "Oct 2025").unwrap()
    );
}
