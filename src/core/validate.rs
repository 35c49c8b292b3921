//! Keystroke validation and numeric coercion.
//!
//! Numeric-constrained form fields filter input per keystroke: a candidate
//! value either replaces the field wholesale or is silently dropped and the
//! field keeps its previous value. Rejection is a no-op, not an error. The
//! two filters match the source forms exactly: the payment screen accepts
//! "empty or all digits", the invoice screen additionally allows a single
//! decimal point.

/// The shape a numeric-constrained field accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericKind {
    /// Empty, or ASCII digits only.
    Digits,
    /// Empty, or digits with at most one decimal point.
    Decimal,
}

/// Returns true when `candidate` may replace the field's current value.
pub fn accepts(kind: NumericKind, candidate: &str) -> bool {
    match kind {
        NumericKind::Digits => candidate.chars().all(|c| c.is_ascii_digit()),
        NumericKind::Decimal => {
            candidate.chars().filter(|&c| c == '.').count() <= 1
                && candidate.chars().all(|c| c.is_ascii_digit() || c == '.')
        }
    }
}

/// Applies the filter: returns the candidate when it conforms, otherwise the
/// previous value unchanged.
pub fn filtered(kind: NumericKind, previous: &str, candidate: &str) -> String {
    if accepts(kind, candidate) {
        candidate.to_string()
    } else {
        previous.to_string()
    }
}

/// Coerces a string-encoded amount the way the forms do: empty or unparsable
/// input counts as zero.
pub fn num(value: &str) -> f64 {
    value.parse::<f64>().unwrap_or(0.0)
}

/// Derived net for an invoice line: `sub_total - commission`, fixed two
/// decimals.
pub fn net_of(sub_total: &str, commission: &str) -> String {
    format!("{:.2}", num(sub_total) - num(commission))
}
