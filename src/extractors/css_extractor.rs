//! CSS selector-based page snapshot
//!
//! Uses the scraper crate to answer first-match queries against parsed HTML.

use scraper::{Html, Selector};
use tracing::warn;

use super::PageSnapshot;

/// HTML document parsed once and queried many times
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    pub fn parse(html: &str) -> Self {
        HtmlPage {
            document: Html::parse_document(html),
        }
    }

    fn first_match(&self, selector_str: &str) -> Option<scraper::ElementRef<'_>> {
        let selector = match Selector::parse(selector_str) {
            Ok(s) => s,
            Err(_) => {
                warn!(selector = selector_str, "invalid CSS selector");
                return None;
            }
        };

        self.document.select(&selector).next()
    }
}

impl PageSnapshot for HtmlPage {
    fn select_text(&self, selector: &str) -> Option<String> {
        self.first_match(selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    fn select_attr(&self, selector: &str, attr: &str) -> Option<String> {
        self.first_match(selector)
            .and_then(|el| el.value().attr(attr).map(String::from))
    }
}
