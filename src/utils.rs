/// Suffix convention marking a prior-year comparison column (e.g. "Nov 2024 (PY)").
pub const PRIOR_YEAR_SUFFIX: &str = "(PY)";

/// Parse a QuickBooks currency cell into a float.
///
/// Strips surrounding whitespace plus `$` and `,` characters, then parses the
/// remainder as f64. Returns `None` for anything that is not a plain number
/// after cleaning. No locale handling beyond that.
pub fn parse_currency(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    cleaned.parse::<f64>().ok()
}

pub fn is_prior_year_label(label: &str) -> bool {
    label.ends_with(PRIOR_YEAR_SUFFIX)
}

/// Synthesize the prior-year label a current period *would* have, used in
/// error reporting when no (PY) column exists.
pub fn prior_year_label_for(current_period: &str) -> String {
    format!("{current_period} {PRIOR_YEAR_SUFFIX}")
}
