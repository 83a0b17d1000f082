//! Final price and list-price discount arithmetic.

use tracing::debug;

use crate::normalize::round2;

/// Discount signals found on a product page
///
/// Zero and `None` both mean "not present".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Discounts {
    pub coupon_amount: f64,
    pub coupon_percent: f64,
    pub promo_code_percent_off: Option<f64>,
    /// A promo code string was found; a percent alone is not applied
    pub promo_code_present: bool,
    pub checkout_discount_percent: Option<f64>,
    pub checkout_discount_amount: Option<f64>,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Price after every applicable discount, floored at zero and rounded to cents
///
/// Order: clip coupon (amount, else percent), promo code (percent of the
/// original price), checkout percent (of the running price), checkout amount.
pub fn compute_final_price(current_price: Option<f64>, discounts: &Discounts) -> Option<f64> {
    let current = current_price?;
    let mut discounted = current;

    if discounts.coupon_amount > 0.0 {
        discounted -= discounts.coupon_amount;
    } else if discounts.coupon_percent > 0.0 {
        discounted -= discounts.coupon_percent / 100.0 * discounted;
    }
    debug!(discounted, "after clip coupon");

    let promo_discount = positive(discounts.promo_code_percent_off)
        .map(|pct| pct / 100.0 * current)
        .unwrap_or(0.0);
    if discounts.promo_code_present {
        discounted -= promo_discount;
        debug!(promo_discount, discounted, "after promo code");
    }

    if let Some(pct) = positive(discounts.checkout_discount_percent) {
        discounted -= pct / 100.0 * discounted;
    }

    if let Some(amount) = positive(discounts.checkout_discount_amount) {
        discounted -= amount;
    }

    let final_price = round2(discounted.max(0.0));
    debug!(current, final_price, "final price computed");
    Some(final_price)
}

/// Whole-number percent saved against the list price
///
/// `None` when either price is missing, when the prices are equal, or when
/// the result is zero.
pub fn percent_off_list_price(list_price: Option<f64>, current_price: Option<f64>) -> Option<f64> {
    let list = positive(list_price)?;
    let current = current_price?;

    if list == current {
        return None;
    }

    let percent = (list - current) / list * 100.0;
    if percent == 0.0 {
        return None;
    }

    Some(percent.round())
}
