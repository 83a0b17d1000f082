//! AI training prompts, one per deal type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const MAX_PROMPT_CHARS: usize = 750;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    #[serde(rename = "Promo Code")]
    PromoCode,
    #[serde(rename = "Price Drop")]
    PriceDrop,
    #[serde(rename = "Clip Coupon")]
    ClipCoupon,
    #[serde(rename = "Checkout Discount")]
    CheckoutDiscount,
    #[serde(rename = "Custom Instructions")]
    CustomInstructions,
}

impl PromptKind {
    pub const ALL: [PromptKind; 5] = [
        PromptKind::PromoCode,
        PromptKind::PriceDrop,
        PromptKind::ClipCoupon,
        PromptKind::CheckoutDiscount,
        PromptKind::CustomInstructions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::PromoCode => "Promo Code",
            Self::PriceDrop => "Price Drop",
            Self::ClipCoupon => "Clip Coupon",
            Self::CheckoutDiscount => "Checkout Discount",
            Self::CustomInstructions => "Custom Instructions",
        }
    }

    pub fn default_prompt(&self) -> &'static str {
        match self {
            Self::PromoCode => {
                "Write a short, upbeat post for {product_title}. Lead with the promo code \
                 {promo_code} and the {discount_percent}% it takes off, then the final price \
                 {final_price}. End with {affiliate_link}."
            }
            Self::PriceDrop => {
                "Write a short post announcing a price drop on {product_title}: now \
                 {current_price}, down from {list_price} ({discount_percentage}% off). \
                 End with {affiliate_link}."
            }
            Self::ClipCoupon => {
                "Write a short post for {product_title} telling readers to clip the \
                 {coupon} coupon on the product page to pay {final_price}. \
                 End with {affiliate_link}."
            }
            Self::CheckoutDiscount => {
                "Write a short post for {product_title} noting the {checkout_discount} \
                 applied automatically at checkout, for a final price of {final_price}. \
                 End with {affiliate_link}."
            }
            Self::CustomInstructions => {
                "Keep posts under 280 characters, use at most two emoji, and never invent \
                 discounts that are not listed."
            }
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Prompt text keyed by kind; JSON keys are the kind labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptSet(BTreeMap<PromptKind, String>);

impl PromptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.load_defaults();
        set
    }

    /// Overwrite every entry with its default text
    pub fn load_defaults(&mut self) {
        for kind in PromptKind::ALL {
            self.0.insert(kind, kind.default_prompt().to_string());
        }
    }

    /// Store trimmed text for `kind`
    pub fn set(&mut self, kind: PromptKind, text: &str) -> Result<()> {
        let text = text.trim();
        let len = text.chars().count();
        if len > MAX_PROMPT_CHARS {
            return Err(Error::PromptTooLong {
                kind,
                len,
                max: MAX_PROMPT_CHARS,
            });
        }
        self.0.insert(kind, text.to_string());
        Ok(())
    }

    /// Stored text; empty when never set
    pub fn get(&self, kind: PromptKind) -> &str {
        self.0.get(&kind).map(String::as_str).unwrap_or("")
    }

    /// Post generation needs every entry filled in
    pub fn ensure_complete(&self) -> Result<()> {
        match PromptKind::ALL.into_iter().find(|k| self.get(*k).is_empty()) {
            Some(kind) => Err(Error::EmptyPrompt(kind)),
            None => Ok(()),
        }
    }
}
