//! Template rendering
//!
//! Two passes over the template text:
//!
//! 1. `{if:KEY}...{/if}` blocks, line by line. A block whose KEY is truthy
//!    keeps its body; otherwise the whole block is removed. A line left
//!    blank by removed blocks is dropped.
//! 2. `{placeholder}` tokens from the fixed vocabulary. Unknown tokens are
//!    left alone.
//!
//! Runs of three or more newlines are then collapsed to two.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::facts::ProductFacts;
use crate::placeholders::{fact_key, LINK_PLACEHOLDER, PLACEHOLDERS};
use crate::store::Template;

static CONDITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{if:([^{}]+)\}(.*?)\{/if\}").unwrap());

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<String> = PLACEHOLDERS
        .iter()
        .map(|(name, _)| regex::escape(name))
        .collect();
    Regex::new(&format!(r"\{{({})\}}", names.join("|"))).unwrap()
});

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Inputs that come from outside the product facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Keep only the first N words of the product name
    pub title_word_limit: Option<usize>,
    /// Resolved affiliate / short link for `{amz_link}`
    pub link: Option<String>,
}

impl RenderOptions {
    pub fn for_template(template: &Template, link: Option<String>) -> Self {
        RenderOptions {
            title_word_limit: Some(template.title_word_limit),
            link,
        }
    }
}

/// Render with default options: full product name, no link
pub fn render(template: &str, facts: &ProductFacts) -> String {
    render_with(template, facts, &RenderOptions::default())
}

pub fn render_with(template: &str, facts: &ProductFacts, options: &RenderOptions) -> String {
    let ctx = RenderContext { facts, options };

    let text = ctx.resolve_conditionals(template);
    let text = PLACEHOLDER.replace_all(&text, |caps: &Captures| {
        ctx.lookup(&caps[1]).unwrap_or_default()
    });

    BLANK_RUN.replace_all(&text, "\n\n").into_owned()
}

/// Recognized placeholder tokens still present in `text`
pub fn find_unresolved(text: &str) -> Vec<&str> {
    PLACEHOLDER.find_iter(text).map(|m| m.as_str()).collect()
}

/// First `limit` whitespace-separated words; `None` keeps the whole name
pub fn shorten_product_name(name: &str, limit: Option<usize>) -> String {
    match limit {
        Some(limit) => name.split_whitespace().take(limit).collect::<Vec<_>>().join(" "),
        None => name.to_string(),
    }
}

struct RenderContext<'a> {
    facts: &'a ProductFacts,
    options: &'a RenderOptions,
}

impl RenderContext<'_> {
    /// Display text for a placeholder or fact field name; `None` if absent
    fn lookup(&self, key: &str) -> Option<String> {
        let key = key.trim();
        if key == LINK_PLACEHOLDER {
            return self.options.link.clone().filter(|l| !l.is_empty());
        }

        let field = fact_key(key).unwrap_or(key);
        if field == "product_name" {
            let name = self.facts.product_name.as_deref()?;
            return Some(shorten_product_name(name, self.options.title_word_limit))
                .filter(|n| !n.is_empty());
        }

        self.facts.value(field).map(|v| v.render().into_owned())
    }

    fn resolve_conditionals(&self, template: &str) -> String {
        let mut lines = Vec::new();

        for line in template.split('\n') {
            if !CONDITIONAL.is_match(line) {
                lines.push(line.to_string());
                continue;
            }

            let resolved = CONDITIONAL.replace_all(line, |caps: &Captures| {
                if self.lookup(&caps[1]).is_some() {
                    caps[2].to_string()
                } else {
                    String::new()
                }
            });

            if resolved.trim().is_empty() {
                trace!(line, "dropped line with unmet conditionals");
                continue;
            }
            lines.push(resolved.into_owned());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_facts() -> ProductFacts {
        ProductFacts {
            product_name: Some("Acme Cordless Drill Kit 20V".into()),
            current_price: Some(79.99),
            list_price: Some(99.99),
            percent_off_list_price: Some(20.0),
            coupon_amount: 10.0,
            coupon_percent: 5.0,
            dynamic_coupon: Some("$10".into()),
            promo_code: Some("DRILL10".into()),
            promo_code_percent_off: Some(10.0),
            checkout_discount_percent: Some(5.0),
            checkout_discount_amount: Some(2.5),
            dynamic_checkout_discount: Some("$2.50 off".into()),
            final_price: Some(55.5),
            rating: Some(4.5),
            image_url: Some("https://example.com/a.jpg".into()),
        }
    }

    #[test]
    fn test_basic_substitution() {
        let facts = full_facts();
        let out = render("{product_name} now ${final_price} (was ${list_price})", &facts);
        assert_eq!(out, "Acme Cordless Drill Kit 20V now $55.50 (was $99.99)");
    }

    #[test]
    fn test_dollar_in_placeholder_name() {
        let facts = full_facts();
        let out = render("Clip {coupon_$} coupon, extra {checkout_discount_$} at checkout", &facts);
        assert_eq!(out, "Clip 10 coupon, extra 2.50 at checkout");

        let out = render("{coupon_%}% / {checkout_discount_%}% / {promo_code_%}%", &facts);
        assert_eq!(out, "5% / 5% / 10%");
    }

    #[test]
    fn test_dollar_in_value_not_expanded() {
        let facts = full_facts();
        assert_eq!(render("{dynamic_coupon} off", &facts), "$10 off");
        assert_eq!(render("{dynamic_checkout_discount}", &facts), "$2.50 off");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let facts = full_facts();
        let out = render("{affiliate_link} {product_title} {rating}", &facts);
        assert_eq!(out, "{affiliate_link} {product_title} 4.5");
    }

    #[test]
    fn test_missing_values_render_empty() {
        let facts = ProductFacts::default();
        assert_eq!(render("[{promo_code}] [{coupon_$}] [{final_price}]", &facts), "[] [] []");
    }

    #[test]
    fn test_unmet_conditional_keeps_surrounding_text() {
        let facts = ProductFacts::default();
        let out = render("Save {if:coupon_amount}${coupon_amount} now{/if}!", &facts);
        assert_eq!(out, "Save !");
    }

    #[test]
    fn test_unmet_conditional_line_dropped() {
        let facts = ProductFacts {
            product_name: Some("Lamp".into()),
            ..Default::default()
        };
        let template = "{product_name}\n{if:promo_code}Use code {promo_code}{/if}\nEnjoy";
        assert_eq!(render(template, &facts), "Lamp\nEnjoy");
    }

    #[test]
    fn test_met_conditional_body_substituted() {
        let facts = full_facts();
        let template = "{if:promo_code}Use code {promo_code} for {promo_code_%}% off{/if}";
        assert_eq!(render(template, &facts), "Use code DRILL10 for 10% off");
    }

    #[test]
    fn test_conditional_on_placeholder_name() {
        let facts = full_facts();
        assert_eq!(render("{if:coupon_$}Coupon: {coupon_$}{/if}", &facts), "Coupon: 10");

        let no_coupon = ProductFacts::default();
        assert_eq!(render("A\n{if:coupon_$}Coupon: {coupon_$}{/if}\nB", &no_coupon), "A\nB");
    }

    #[test]
    fn test_multiple_conditionals_per_line() {
        let facts = ProductFacts {
            promo_code: Some("SAVE".into()),
            ..Default::default()
        };
        let template = "{if:promo_code}code {promo_code}{/if} | {if:coupon_amount}coupon{/if} | end";
        assert_eq!(render(template, &facts), "code SAVE |  | end");

        let only_conditionals = "{if:rating}rated{/if} {if:coupon_amount}coupon{/if}";
        assert_eq!(render(&format!("x\n{only_conditionals}\ny"), &facts), "x\ny");
    }

    #[test]
    fn test_unmatched_conditional_is_literal() {
        let facts = full_facts();
        let template = "{if:promo_code}Use {promo_code}\nnext{/if}";
        assert_eq!(render(template, &facts), "{if:promo_code}Use DRILL10\nnext{/if}");
    }

    #[test]
    fn test_blank_runs_collapsed() {
        let facts = ProductFacts::default();
        let template = "Title\n\n{if:promo_code}code{/if}\n\nLink";
        assert_eq!(render(template, &facts), "Title\n\nLink");

        assert_eq!(render("a\n\n\n\n\nb", &facts), "a\n\nb");
    }

    #[test]
    fn test_title_limit_and_link() {
        let facts = full_facts();
        let options = RenderOptions {
            title_word_limit: Some(3),
            link: Some("https://amzn.to/abc".into()),
        };
        let out = render_with("{product_name} {amz_link}", &facts, &options);
        assert_eq!(out, "Acme Cordless Drill https://amzn.to/abc");

        let out = render_with("{if:amz_link}Buy: {amz_link}{/if}", &facts, &RenderOptions::default());
        assert_eq!(out, "");
    }

    #[test]
    fn test_options_from_stored_template() {
        let mut store = crate::store::TemplateStore::new();
        let id = store.add("Short", "{product_name} -> {amz_link}").id.clone();
        let mut draft = store.edit(&id).unwrap();
        draft.title_word_limit = 2;
        store.save(draft).unwrap();

        let template = store.get(&id).unwrap();
        let options = RenderOptions::for_template(template, Some("https://amzn.to/q".into()));
        let out = render_with(&template.content, &full_facts(), &options);
        assert_eq!(out, "Acme Cordless -> https://amzn.to/q");
    }

    #[test]
    fn test_emoji_template() {
        let facts = full_facts();
        let out = render("🔥 {product_name} ⭐ {rating}", &facts);
        assert_eq!(out, "🔥 Acme Cordless Drill Kit 20V ⭐ 4.5");
    }

    #[test]
    fn test_full_vocabulary_resolved() {
        let facts = full_facts();
        let options = RenderOptions {
            title_word_limit: Some(2),
            link: Some("https://amzn.to/x".into()),
        };
        let template: String = PLACEHOLDERS
            .iter()
            .map(|(name, _)| format!("{{{name}}}"))
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(find_unresolved(&template).len(), PLACEHOLDERS.len());

        let out = render_with(&template, &facts, &options);
        assert!(find_unresolved(&out).is_empty(), "unresolved in {out}");
    }

    #[test]
    fn test_shorten_product_name() {
        assert_eq!(shorten_product_name("a b  c d", Some(2)), "a b");
        assert_eq!(shorten_product_name("a b", Some(10)), "a b");
        assert_eq!(shorten_product_name("a b", Some(0)), "");
        assert_eq!(shorten_product_name("a  b", None), "a  b");
    }
}
