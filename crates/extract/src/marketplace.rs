//! Site-specific page parsing.

use crate::consts::PRICE_REGEX;
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use scraper::ElementRef;
use serde_json::{Value, json};
use url::Url;

/// One fetched page of a marketplace listing.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub url: Url,
    /// Raw `{name, price, link}` objects, in page order.
    pub listings: Vec<Value>,
    /// Where the listing continues, if it does.
    pub next: Option<Url>,
}

/// Knows where a marketplace's listing starts and how to read one of its
/// pages.
///
/// Parsing is synchronous: the parsed document never outlives the call, so it
/// never has to cross an `.await`.
pub trait Marketplace: Send + Sync {
    fn name(&self) -> &str;

    fn start_url(&self) -> &Url;

    fn parse_page(&self, url: &Url, html: &str) -> Result<Page>;
}

/// Whitespace-normalized text content of an element.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ")
}

/// Resolve a (possibly relative) `href` against the page it was found on.
pub(crate) fn resolve(base: &Url, href: &str) -> Result<Url> {
    base.join(href.trim()).or_raise(|| ErrorKind::InvalidUrl(href.to_string()))
}

/// Parse a price label such as `"1 234,50 Kč"` or `"450\u{a0}Kč"`.
///
/// Thousand separators (any whitespace, NBSP included) are dropped and a
/// decimal comma becomes a point. The currency suffix is ignored.
pub fn parse_price(label: &str) -> Result<f64> {
    let parse_error = || ErrorKind::ParseError {
        field: "price",
        value: label.to_string(),
    };
    let amount = PRICE_REGEX.find(label).ok_or_raise(parse_error)?;
    let normalized: String = amount
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse::<f64>().or_raise(parse_error)
}

/// Extract one listing from a product element.
pub(crate) fn listing(
    page: &Url,
    anchor: Option<ElementRef<'_>>,
    price: Option<ElementRef<'_>>,
) -> Result<Value> {
    let anchor = anchor.ok_or_raise(|| ErrorKind::MissingField("name"))?;
    let name = text_of(anchor);
    if name.is_empty() {
        exn::bail!(ErrorKind::MissingField("name"));
    }
    let href = anchor.value().attr("href").ok_or_raise(|| ErrorKind::MissingField("link"))?;
    let link = resolve(page, href)?;
    let price = price.ok_or_raise(|| ErrorKind::MissingField("price"))?;
    let price = parse_price(&text_of(price))?;
    Ok(json!({
        "name": name,
        "price": price,
        "link": link.as_str(),
    }))
}
