//! Dynamic placeholders: one token, whichever discount form the page exposes.
//!
//! Both resolvers check the dollar amount first, then the percent.

use crate::placeholders::{format_amount, format_number};

/// `"$5"`, `"20%"`, or `None` when neither is positive
pub fn resolve_dynamic_coupon(amount: f64, percent: f64) -> Option<String> {
    if amount > 0.0 {
        Some(format!("${}", format_amount(amount)))
    } else if percent > 0.0 {
        Some(format!("{}%", format_number(percent)))
    } else {
        None
    }
}

/// `"$5 off"`, `"10% off"`, or `None` when neither is positive
pub fn resolve_dynamic_checkout_discount(percent: Option<f64>, amount: Option<f64>) -> Option<String> {
    match (amount.filter(|a| *a > 0.0), percent.filter(|p| *p > 0.0)) {
        (Some(amount), _) => Some(format!("${} off", format_amount(amount))),
        (None, Some(percent)) => Some(format!("{}% off", format_number(percent))),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_coupon() {
        assert_eq!(resolve_dynamic_coupon(5.0, 20.0).as_deref(), Some("$5"));
        assert_eq!(resolve_dynamic_coupon(2.5, 0.0).as_deref(), Some("$2.50"));
        assert_eq!(resolve_dynamic_coupon(0.0, 20.0).as_deref(), Some("20%"));
        assert_eq!(resolve_dynamic_coupon(0.0, 0.0), None);
    }

    #[test]
    fn test_dynamic_checkout_discount() {
        assert_eq!(
            resolve_dynamic_checkout_discount(Some(10.0), None).as_deref(),
            Some("10% off")
        );
        assert_eq!(
            resolve_dynamic_checkout_discount(None, Some(4.0)).as_deref(),
            Some("$4 off")
        );
        assert_eq!(
            resolve_dynamic_checkout_discount(Some(10.0), Some(4.0)).as_deref(),
            Some("$4 off")
        );
        assert_eq!(resolve_dynamic_checkout_discount(Some(0.0), None), None);
        assert_eq!(resolve_dynamic_checkout_discount(None, None), None);
    }
}
