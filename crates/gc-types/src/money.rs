use thiserror::Error;

/// Formats a cent amount as euros, e.g. `1230` -> `€12.30`, `-150` -> `-€1.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}€{}.{:02}", abs / 100, abs % 100)
}

/// Like [`format_cents`] but always carries a sign, for ledger entries.
pub fn format_signed_cents(cents: i64) -> String {
    if cents > 0 {
        format!("+{}", format_cents(cents))
    } else {
        format_cents(cents)
    }
}

/// Parses a user-entered euro amount (`"2"`, `"2.5"`, `"2.50"`, `"€2,50"`)
/// into cents. Returns `None` for anything that is not a positive amount
/// with at most two decimals.
pub fn parse_euros(input: &str) -> Option<i64> {
    let cleaned = input.trim().trim_start_matches('€').trim().replace(',', ".");
    if cleaned.is_empty() {
        return None;
    }

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (cleaned.as_str(), ""),
    };
    if fraction.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let wholeCents = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?.checked_mul(100)?
    };
    let fractionCents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse::<i64>().ok()?,
    };

    let total = wholeCents.checked_add(fractionCents)?;
    (total > 0).then_some(total)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Enter a positive amount, e.g. 2.50.")]
    Invalid,
    #[error("That is more than your balance of {0}.")]
    AboveBalance(String),
}

/// Parses an amount to donate or redeem and checks it against the balance.
pub fn validate_spend(input: &str, balanceCents: i64) -> Result<i64, AmountError> {
    let cents = parse_euros(input).ok_or(AmountError::Invalid)?;
    if cents > balanceCents {
        return Err(AmountError::AboveBalance(format_cents(balanceCents)));
    }
    Ok(cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_balance_with_two_decimals() {
        assert_eq!(format_cents(1230), "€12.30");
        assert_eq!(format_cents(5), "€0.05");
        assert_eq!(format_cents(0), "€0.00");
        assert_eq!(format_cents(-150), "-€1.50");
    }

    #[test]
    fn signed_format_marks_credits() {
        assert_eq!(format_signed_cents(15), "+€0.15");
        assert_eq!(format_signed_cents(-200), "-€2.00");
        assert_eq!(format_signed_cents(0), "€0.00");
    }

    #[test]
    fn parses_euro_input() {
        assert_eq!(parse_euros("2"), Some(200));
        assert_eq!(parse_euros("2.5"), Some(250));
        assert_eq!(parse_euros("€2,05"), Some(205));
        assert_eq!(parse_euros(".75"), Some(75));
        assert_eq!(parse_euros("0"), None);
        assert_eq!(parse_euros("1.234"), None);
        assert_eq!(parse_euros("-3"), None);
        assert_eq!(parse_euros("abc"), None);
    }

    #[test]
    fn spend_is_capped_by_balance() {
        assert_eq!(validate_spend("1.50", 500), Ok(150));
        assert_eq!(validate_spend("5", 500), Ok(500));
        assert_eq!(validate_spend("5.01", 500), Err(AmountError::AboveBalance("€5.00".into())));
        assert_eq!(validate_spend("0", 500), Err(AmountError::Invalid));
        assert_eq!(
            validate_spend("4", 320).unwrap_err().to_string(),
            "That is more than your balance of €3.20."
        );
    }
}
