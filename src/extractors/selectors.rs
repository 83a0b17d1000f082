//! Default locators for product pages.
//!
//! Update this table when the target markup changes. Candidates are
//! listed most specific first.

use super::{FieldTable, Locator};

/// Field names used in the default table and read by the facts pipeline
///
/// `percent_off_list_price` holds the page's savings badge as raw text only;
/// the fact of the same name is always computed from the two prices.
pub mod field {
    pub const PRODUCT_NAME: &str = "product_name";
    pub const PRICE_WHOLE: &str = "price_whole";
    pub const PRICE_FRACTION: &str = "price_fraction";
    pub const CURRENT_PRICE: &str = "current_price";
    pub const LIST_PRICE: &str = "list_price";
    pub const PERCENT_OFF_LIST_PRICE: &str = "percent_off_list_price";
    pub const CLIP_COUPON: &str = "clip_coupon";
    pub const COUPON_LABEL: &str = "coupon_label";
    pub const PROMO_CODE: &str = "promo_code";
    pub const PROMO_CODE_PERCENT_OFF: &str = "promo_code_percent_off";
    pub const CHECKOUT_DISCOUNT: &str = "checkout_discount";
    pub const RATING: &str = "rating";
    pub const IMAGE_URL: &str = "image_url";
}

pub fn default_field_table() -> FieldTable {
    FieldTable::new()
        .with_field(field::PRODUCT_NAME, ["span#productTitle", "h1#title"])
        .with_field(field::PRICE_WHOLE, ["span.a-price-whole"])
        .with_field(field::PRICE_FRACTION, ["span.a-price-fraction"])
        .with_field(
            field::CURRENT_PRICE,
            [
                "#apex_offerDisplay_desktop .a-price .a-offscreen",
                "#corePriceDisplay_desktop_feature_div .a-price .a-offscreen",
            ],
        )
        .with_field(
            field::LIST_PRICE,
            [
                r#"span.a-price.a-text-price[data-a-size="s"][data-a-strike="true"][data-a-color="secondary"] > span.a-offscreen"#,
                r#"span.a-price.a-text-price[data-a-strike="true"] > span.a-offscreen"#,
            ],
        )
        .with_field(
            field::PERCENT_OFF_LIST_PRICE,
            ["span.savingPriceOverride.reinventPriceSavingsPercentageMargin.savingsPercentage"],
        )
        .with_field(
            field::CLIP_COUPON,
            [
                "label.ct-coupon-checkbox-label .ct-coupon-tile-price-content .a-offscreen",
                "span.couponLabelText",
                "label[for*='checkboxpct'][id*='couponTextpctch']",
            ],
        )
        .with_field(
            field::COUPON_LABEL,
            ["label.ct-coupon-checkbox-label .ct-coupon-tile-text-content .a-text-normal span"],
        )
        .with_field(field::PROMO_CODE, ["span[id^='promoMessageCXCW']"])
        .with_field(field::PROMO_CODE_PERCENT_OFF, ["label[id^='greenBadgepctch']"])
        .with_field(
            field::CHECKOUT_DISCOUNT,
            [".a-box.a-alert-inline.a-alert-inline-success.a-text-bold .a-alert-content"],
        )
        .with_field(field::RATING, [r#"span[data-hook="rating-out-of-text"]"#])
        .with_field(
            field::IMAGE_URL,
            [
                Locator::attr("div.imgTagWrapper img", "src"),
                Locator::attr("#landingImage", "src"),
            ],
        )
}
