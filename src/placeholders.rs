//! Placeholder vocabulary and value formatting

use std::borrow::Cow;

/// Link token; its value comes from the link collaborator, not from facts
pub const LINK_PLACEHOLDER: &str = "amz_link";

/// Recognized placeholder -> fact field it reads
pub const PLACEHOLDERS: [(&str, &str); 15] = [
    ("product_name", "product_name"),
    ("current_price", "current_price"),
    ("list_price", "list_price"),
    ("discount_percentage", "percent_off_list_price"),
    ("coupon_$", "coupon_amount"),
    ("coupon_%", "coupon_percent"),
    ("dynamic_coupon", "dynamic_coupon"),
    ("promo_code", "promo_code"),
    ("promo_code_%", "promo_code_percent_off"),
    ("checkout_discount_$", "checkout_discount_amount"),
    ("checkout_discount_%", "checkout_discount_percent"),
    ("dynamic_checkout_discount", "dynamic_checkout_discount"),
    ("final_price", "final_price"),
    ("rating", "rating"),
    (LINK_PLACEHOLDER, LINK_PLACEHOLDER),
];

/// Fact field behind a placeholder name
pub fn fact_key(placeholder: &str) -> Option<&'static str> {
    PLACEHOLDERS
        .iter()
        .find(|(name, _)| *name == placeholder)
        .map(|(_, key)| *key)
}

pub fn is_placeholder(name: &str) -> bool {
    fact_key(name).is_some()
}

/// A fact value, typed by how it prints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FactValue<'a> {
    Text(&'a str),
    /// Two decimals, always
    Money(f64),
    /// Dollar amount: whole dollars or two decimals
    Amount(f64),
    /// Percent or rating
    Number(f64),
}

impl FactValue<'_> {
    /// Non-empty text or a non-zero number
    pub fn is_truthy(&self) -> bool {
        match self {
            FactValue::Text(s) => !s.is_empty(),
            FactValue::Money(v) | FactValue::Amount(v) | FactValue::Number(v) => *v != 0.0,
        }
    }

    pub fn render(&self) -> Cow<'_, str> {
        match self {
            FactValue::Text(s) => Cow::Borrowed(s),
            FactValue::Money(v) => Cow::Owned(format_money(*v)),
            FactValue::Amount(v) => Cow::Owned(format_amount(*v)),
            FactValue::Number(v) => Cow::Owned(format_number(*v)),
        }
    }
}

pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}

/// `5.0` -> `"5"`, `5.5` -> `"5.50"`
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// `20.0` -> `"20"`, `4.5` -> `"4.5"`, `12.346` -> `"12.35"`
pub fn format_number(value: f64) -> String {
    let fixed = format!("{value:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
