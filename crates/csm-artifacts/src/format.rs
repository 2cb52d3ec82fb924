//! Number formatting shared by reports, exports and the console views.

/// Whole-unit amount with thousands separators (`150000` -> `150,000`).
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Churn risk as a one-decimal percentage (`0.05` -> `5.0%`).
pub fn format_risk_pct(churn_risk: f64) -> String {
    format!("{:.1}%", churn_risk * 100.0)
}
