//! Raw text -> numbers
//!
//! Every function here tolerates missing or malformed input and returns
//! `None` (or zero) instead of failing.

use std::sync::LazyLock;

use regex::Regex;

static DOLLAR_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*([0-9]+(?:\.[0-9]+)?)").unwrap());

static PERCENT_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*%").unwrap());

static PROMO_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)promo code:\s*(\S+)").unwrap());

/// Round to whole cents
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a number after stripping everything but digits and `.`
///
/// `"$1,299.99"` -> `1299.99`, `"-25%"` -> `25`.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let cleaned: String = raw?
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let cleaned = cleaned.trim_end_matches('.');

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Currency string -> two-decimal price
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    parse_number(raw).map(round2)
}

/// Price split across a whole node (`"19."`) and a fraction node (`"99"`)
pub fn combine_split_price(whole: Option<&str>, fraction: Option<&str>) -> Option<f64> {
    let whole = parse_number(whole)?;
    let cents: String = fraction?.chars().filter(char::is_ascii_digit).collect();
    let cents = cents.parse::<f64>().ok()?;

    Some(round2(whole + cents / 100.0))
}

/// Percent string such as `"-25%"` -> `25`
pub fn parse_percent(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim().trim_start_matches('-').trim_end_matches('%');
    parse_number(Some(raw))
}

/// First `N%` figure in free text
pub fn find_percent(text: Option<&str>) -> Option<f64> {
    let caps = PERCENT_AMOUNT.captures(text?)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// First `$N` figure in free text
pub fn find_dollar_amount(text: Option<&str>) -> Option<f64> {
    let caps = DOLLAR_AMOUNT.captures(text?)?;
    caps.get(1)?.as_str().parse::<f64>().ok()
}

/// Clip coupon value; at most one of the two is non-zero
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coupon {
    pub amount: f64,
    pub percent: f64,
}

impl Coupon {
    pub fn is_empty(&self) -> bool {
        self.amount <= 0.0 && self.percent <= 0.0
    }
}

/// Parse `"$X off"` or `"X% off"` coupon text
///
/// A dollar figure wins over a percent figure in the same text.
pub fn parse_coupon(text: Option<&str>) -> Coupon {
    if let Some(amount) = find_dollar_amount(text).filter(|a| *a > 0.0) {
        return Coupon {
            amount,
            percent: 0.0,
        };
    }

    Coupon {
        amount: 0.0,
        percent: find_percent(text).unwrap_or(0.0),
    }
}

/// Coupon whose dollar figure is the price after clipping, not the amount off
///
/// The amount off becomes `current_price - coupon_price`, floored at zero.
pub fn parse_coupon_price(text: Option<&str>, current_price: Option<f64>) -> Coupon {
    match (find_dollar_amount(text), current_price) {
        (Some(coupon_price), Some(current)) => Coupon {
            amount: round2((current - coupon_price).max(0.0)),
            percent: 0.0,
        },
        _ => Coupon::default(),
    }
}

/// `"... promo code: SAVE10 at checkout"` -> `"SAVE10"`
pub fn extract_promo_code(text: Option<&str>) -> Option<String> {
    let caps = PROMO_CODE.captures(text?)?;
    let code = caps.get(1)?.as_str().trim_end_matches(['.', ',', ';']);
    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

/// `"4.5 out of 5"` -> `4.5`
pub fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let first = raw?.split_whitespace().next()?;
    first.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("$1,299.99")), Some(1299.99));
        assert_eq!(parse_number(Some("CDN$ 24.50")), Some(24.5));
        assert_eq!(parse_number(Some("19.")), Some(19.0));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("Currently unavailable")), None);
        assert_eq!(parse_number(Some("1.2.3")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_parse_price_rounds() {
        assert_eq!(parse_price(Some("$10.999")), Some(11.0));
        assert_eq!(parse_price(Some("$7.5")), Some(7.5));
    }

    #[test]
    fn test_combine_split_price() {
        assert_eq!(combine_split_price(Some("19."), Some("99")), Some(19.99));
        assert_eq!(combine_split_price(Some("1,024"), Some("05")), Some(1024.05));
        assert_eq!(combine_split_price(Some("19"), None), None);
        assert_eq!(combine_split_price(None, Some("99")), None);
        assert_eq!(combine_split_price(Some("19"), Some("xx")), None);
    }

    #[test]
    fn test_parse_percent() {
        assert_eq!(parse_percent(Some("-25%")), Some(25.0));
        assert_eq!(parse_percent(Some("  -7% ")), Some(7.0));
        assert_eq!(parse_percent(Some("%")), None);
    }

    #[test]
    fn test_parse_coupon() {
        assert_eq!(
            parse_coupon(Some("Apply $5.00 coupon")),
            Coupon { amount: 5.0, percent: 0.0 }
        );
        assert_eq!(
            parse_coupon(Some("Apply 15% coupon")),
            Coupon { amount: 0.0, percent: 15.0 }
        );
        // never both
        assert_eq!(
            parse_coupon(Some("Save $3 (10%)")),
            Coupon { amount: 3.0, percent: 0.0 }
        );
        assert!(parse_coupon(Some("Coupon available")).is_empty());
        assert!(parse_coupon(None).is_empty());
    }

    #[test]
    fn test_parse_coupon_price() {
        let coupon = parse_coupon_price(Some("$18.50"), Some(24.99));
        assert_eq!(coupon, Coupon { amount: 6.49, percent: 0.0 });

        // coupon price above the current price never yields a negative amount
        let coupon = parse_coupon_price(Some("$30.00"), Some(24.99));
        assert_eq!(coupon.amount, 0.0);

        assert!(parse_coupon_price(Some("$18.50"), None).is_empty());
    }

    #[test]
    fn test_extract_promo_code() {
        assert_eq!(
            extract_promo_code(Some("Save 20% with promo code: HJY10OPF Terms")),
            Some("HJY10OPF".to_string())
        );
        assert_eq!(
            extract_promo_code(Some("Enter Promo Code: SPRING.")),
            Some("SPRING".to_string())
        );
        assert_eq!(extract_promo_code(Some("Save 5% on any 5")), None);
        assert_eq!(extract_promo_code(None), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(Some("4.5 out of 5")), Some(4.5));
        assert_eq!(parse_rating(Some("out of 5")), None);
        assert_eq!(parse_rating(Some("")), None);
    }

    #[test]
    fn test_find_figures() {
        assert_eq!(find_percent(Some("Save 12% at checkout")), Some(12.0));
        assert_eq!(find_dollar_amount(Some("Save $4.25 at checkout")), Some(4.25));
        assert_eq!(find_percent(Some("Save $4.25")), None);
    }
}
