//! Product deal extraction and post templating
//!
//! Pipeline:
//! - Field extraction: ordered fallback CSS locators over a page snapshot
//! - Normalization: prices, percents, coupon and promo text
//! - Pricing: final price after coupons, promo codes and checkout discounts
//! - Templates: `{placeholder}` substitution with `{if:key}...{/if}` blocks
//!
//! Template and prompt collections, JSON configuration and a C FFI surface
//! sit around the pipeline.

pub mod config;
pub mod dynamic;
pub mod error;
pub mod extractors;
pub mod facts;
pub mod ffi;
pub mod logging;
pub mod normalize;
pub mod placeholders;
pub mod pricing;
pub mod prompts;
pub mod store;
pub mod template;

pub use config::ParserConfig;
pub use error::{Error, Result};
pub use extractors::{extract_fields, FieldTable, HtmlPage, Locator, PageSnapshot, RawFieldMap};
pub use facts::{extract_facts, extract_product_facts, ProductFacts};
pub use pricing::{compute_final_price, Discounts};
pub use prompts::{PromptKind, PromptSet};
pub use store::{LinkType, Template, TemplateDraft, TemplateStore};
pub use template::{render, render_with, RenderOptions};
