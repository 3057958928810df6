//! Australian dollar formatting for rendered estimates.

/// Format `amount` as AUD, e.g. `$1,234.56` or `-$12.00`.
///
/// Amounts are rounded to the cent. Non-finite amounts render as `N/A`.
pub fn format_aud(amount: f64) -> String {
    if !amount.is_finite() {
        return "N/A".to_owned();
    }

    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = group_thousands(cents / 100);
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}${dollars}.{:02}", cents % 100)
}

/// Optional amounts render as `N/A` when absent.
pub fn format_aud_opt(amount: Option<f64>) -> String {
    amount.map(format_aud).unwrap_or_else(|| "N/A".to_owned())
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
