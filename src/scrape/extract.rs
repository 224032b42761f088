//! Listing card extraction.
//!
//! Turns one page's HTML into raw observations, one per product card.
//! The selectors are the contract with the scraped site; class-substring
//! matches absorb the modifier classes its templates tack on.

use scraper::{ElementRef, Html, Selector};

/// One game as it appeared on a listing page, not yet merged into any
/// history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObservation {
    pub title: String,
    pub price: Option<u32>,
    pub in_stock: bool,
}

/// Marker text the shop renders on in-stock cards.
const IN_STOCK_MARKER: &str = "Készleten";

pub struct CardExtractor {
    card: Selector,
    title: Selector,
    price: Selector,
    stock: Selector,
}

impl CardExtractor {
    pub fn new() -> Self {
        CardExtractor {
            card: selector("div[class*='content'] article[class*='card']"),
            title: selector("h3.product-title a"),
            price: selector("div.price div[class*='now']"),
            stock: selector("li[class*='stock-info']"),
        }
    }

    /// Extract every card on the page, in page order. An empty result is
    /// not an error: it is how the last page past the catalog looks, and
    /// the pagination driver treats it as its stop signal.
    pub fn extract(&self, html: &str) -> Vec<RawObservation> {
        let document = Html::parse_document(html);
        let mut observations = Vec::new();

        for card in document.select(&self.card) {
            // a card without a title link is not a product listing
            let Some(title) = card.select(&self.title).next().map(element_text) else {
                continue;
            };
            if title.is_empty() {
                continue;
            }

            let price = card
                .select(&self.price)
                .next()
                .map(element_text)
                .and_then(|text| parse_price(&text));

            let in_stock = card
                .select(&self.stock)
                .any(|li| element_text(li).contains(IN_STOCK_MARKER));

            observations.push(RawObservation {
                title,
                price,
                in_stock,
            });
        }

        observations
    }
}

impl Default for CardExtractor {
    fn default() -> Self {
        CardExtractor::new()
    }
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static css selector")
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parse a displayed price like "12 990" into forints. Group separators are
/// plain or non-breaking spaces; anything else left over (currency suffix,
/// "coming soon" text) makes the price unknown, never an error.
fn parse_price(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    digits.parse().ok()
}
