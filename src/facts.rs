//! Normalized product facts
//!
//! Turns a [`RawFieldMap`] into [`ProductFacts`]: numeric parsing, discount
//! arithmetic and dynamic placeholder resolution in one pass.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ParserConfig;
use crate::dynamic::{resolve_dynamic_checkout_discount, resolve_dynamic_coupon};
use crate::extractors::{extract_fields, field, HtmlPage, PageSnapshot, RawFieldMap};
use crate::normalize::{
    combine_split_price, extract_promo_code, find_dollar_amount, find_percent, parse_coupon,
    parse_coupon_price, parse_price, parse_rating,
};
use crate::placeholders::FactValue;
use crate::pricing::{compute_final_price, percent_off_list_price, Discounts};
use crate::Result;

/// Keys the AI post generator does not accept
const AI_STRIPPED_KEYS: [&str; 2] = ["dynamic_coupon", "dynamic_checkout_discount"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFacts {
    pub product_name: Option<String>,
    pub current_price: Option<f64>,
    pub list_price: Option<f64>,
    pub percent_off_list_price: Option<f64>,
    pub coupon_amount: f64,
    pub coupon_percent: f64,
    pub dynamic_coupon: Option<String>,
    pub promo_code: Option<String>,
    pub promo_code_percent_off: Option<f64>,
    pub checkout_discount_percent: Option<f64>,
    pub checkout_discount_amount: Option<f64>,
    pub dynamic_checkout_discount: Option<String>,
    pub final_price: Option<f64>,
    pub rating: Option<f64>,
    pub image_url: Option<String>,
}

impl ProductFacts {
    pub fn from_raw(raw: &RawFieldMap, config: &ParserConfig) -> Self {
        let current_price = parse_price(raw.get(field::CURRENT_PRICE)).or_else(|| {
            combine_split_price(raw.get(field::PRICE_WHOLE), raw.get(field::PRICE_FRACTION))
        });

        let list_price = parse_price(raw.get(field::LIST_PRICE));
        let percent_off_list_price = percent_off_list_price(list_price, current_price);

        let is_coupon_price = raw
            .get(field::COUPON_LABEL)
            .is_some_and(|label| label.to_lowercase().contains("coupon price"));
        let coupon = if is_coupon_price {
            parse_coupon_price(raw.get(field::CLIP_COUPON), current_price)
        } else {
            parse_coupon(raw.get(field::CLIP_COUPON))
        };

        let promo_code = extract_promo_code(raw.get(field::PROMO_CODE));
        let promo_code_percent_off = find_percent(raw.get(field::PROMO_CODE_PERCENT_OFF));

        let checkout_text = raw.get(field::CHECKOUT_DISCOUNT);
        let checkout_discount_percent = find_percent(checkout_text);
        let checkout_discount_amount = find_dollar_amount(checkout_text);

        let final_price = compute_final_price(
            current_price,
            &Discounts {
                coupon_amount: coupon.amount,
                coupon_percent: coupon.percent,
                promo_code_percent_off,
                promo_code_present: promo_code.is_some(),
                checkout_discount_percent,
                checkout_discount_amount,
            },
        );

        let image_url = raw
            .get(field::IMAGE_URL)
            .map(|link| enlarge_image_url(link, &config.image_variant));

        let facts = ProductFacts {
            product_name: raw.get(field::PRODUCT_NAME).map(String::from),
            current_price,
            list_price,
            percent_off_list_price,
            coupon_amount: coupon.amount,
            coupon_percent: coupon.percent,
            dynamic_coupon: resolve_dynamic_coupon(coupon.amount, coupon.percent),
            promo_code,
            promo_code_percent_off,
            checkout_discount_percent,
            checkout_discount_amount,
            dynamic_checkout_discount: resolve_dynamic_checkout_discount(
                checkout_discount_percent,
                checkout_discount_amount,
            ),
            final_price,
            rating: parse_rating(raw.get(field::RATING)),
            image_url,
        };

        debug!(
            product = facts.product_name.as_deref().unwrap_or("<none>"),
            current_price = ?facts.current_price,
            final_price = ?facts.final_price,
            "product facts assembled"
        );
        facts
    }

    /// A product title was found; anything else on the page is secondary
    pub fn is_product_page(&self) -> bool {
        self.product_name.is_some()
    }

    /// Value for a fact field by its serialized name
    ///
    /// A zero coupon reads as absent.
    pub fn value(&self, key: &str) -> Option<FactValue<'_>> {
        let value = match key {
            "product_name" => FactValue::Text(self.product_name.as_deref()?),
            "current_price" => FactValue::Money(self.current_price?),
            "list_price" => FactValue::Money(self.list_price?),
            "percent_off_list_price" => FactValue::Number(self.percent_off_list_price?),
            "coupon_amount" => FactValue::Amount(self.coupon_amount),
            "coupon_percent" => FactValue::Number(self.coupon_percent),
            "dynamic_coupon" => FactValue::Text(self.dynamic_coupon.as_deref()?),
            "promo_code" => FactValue::Text(self.promo_code.as_deref()?),
            "promo_code_percent_off" => FactValue::Number(self.promo_code_percent_off?),
            "checkout_discount_percent" => FactValue::Number(self.checkout_discount_percent?),
            "checkout_discount_amount" => FactValue::Amount(self.checkout_discount_amount?),
            "dynamic_checkout_discount" => {
                FactValue::Text(self.dynamic_checkout_discount.as_deref()?)
            }
            "final_price" => FactValue::Money(self.final_price?),
            "rating" => FactValue::Number(self.rating?),
            "image_url" => FactValue::Text(self.image_url.as_deref()?),
            _ => return None,
        };

        if value.is_truthy() {
            Some(value)
        } else {
            None
        }
    }

    /// JSON body for the AI post generator: raw components only
    pub fn ai_payload(&self) -> Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            for key in AI_STRIPPED_KEYS {
                map.remove(key);
            }
        }
        Ok(value)
    }
}

/// Extract facts from any page snapshot
pub fn extract_facts<P: PageSnapshot + ?Sized>(page: &P, config: &ParserConfig) -> ProductFacts {
    let raw = extract_fields(page, &config.fields);
    ProductFacts::from_raw(&raw, config)
}

/// Parse HTML and extract facts in one call
pub fn extract_product_facts(html: &str, config: &ParserConfig) -> ProductFacts {
    extract_facts(&HtmlPage::parse(html), config)
}

/// Ask the image CDN for a larger variant of a product image
///
/// `.../41oV5VxVpFL._AC_SY1000_.jpg` -> `.../41oV5VxVpFL._AC_SL1500_.jpg`.
/// A file name without a size variant gets one inserted before the
/// extension. Unparseable links are returned unchanged.
pub fn enlarge_image_url(link: &str, variant: &str) -> String {
    let mut url = match Url::parse(link) {
        Ok(u) => u,
        Err(_) => return link.to_string(),
    };

    let file_name = match url.path_segments().and_then(|mut s| s.next_back()) {
        Some(name) => name.to_string(),
        None => return link.to_string(),
    };

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => return link.to_string(),
    };
    let base = stem.rsplit_once('.').map(|(base, _)| base).unwrap_or(stem);
    let enlarged = format!("{base}.{variant}.{extension}");

    // Both halves are still percent-encoded, so set_path keeps escapes intact
    let path = url.path();
    let prefix = &path[..path.len() - file_name.len()];
    let path = format!("{prefix}{enlarged}");
    url.set_path(&path);
    url.to_string()
}
