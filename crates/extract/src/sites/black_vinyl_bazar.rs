//! blackvinylbazar.cz second-hand section.
//!
//! The shop has no "next" link worth following: the page number is the last
//! `-N` segment of the listing URL, and the listing is over once a page comes
//! back without products.

use crate::consts;
use crate::error::{ErrorKind, Result};
use crate::marketplace::{Marketplace, Page, listing};
use exn::{OptionExt, ResultExt};
use scraper::Html;
use tracing::instrument;
use url::Url;

#[derive(Clone, Debug)]
pub struct BlackVinylBazar {
    start_url: Url,
}
impl BlackVinylBazar {
    pub fn new(start_url: Url) -> Self {
        Self { start_url }
    }

    /// The URL of the page after `url`: `...-80-1` becomes `...-80-2`.
    pub fn next_page_url(url: &Url) -> Result<Url> {
        let parse_error = || ErrorKind::ParseError {
            field: "page",
            value: url.to_string(),
        };
        let (prefix, page) = url.as_str().rsplit_once('-').ok_or_raise(parse_error)?;
        let page: u32 = page.parse::<u32>().or_raise(parse_error)?;
        let page = page.checked_add(1).ok_or_raise(parse_error)?;
        let next = format!("{prefix}-{page}");
        Url::parse(&next).or_raise(|| ErrorKind::InvalidUrl(next))
    }
}
impl Default for BlackVinylBazar {
    fn default() -> Self {
        Self::new(consts::BLACK_VINYL_BAZAR_START_URL.clone())
    }
}

impl Marketplace for BlackVinylBazar {
    fn name(&self) -> &str {
        "Black Vinyl Bazar"
    }

    fn start_url(&self) -> &Url {
        &self.start_url
    }

    #[instrument(skip_all, fields(url = %url))]
    fn parse_page(&self, url: &Url, html: &str) -> Result<Page> {
        let document = Html::parse_document(html);
        let listings = document
            .select(&consts::BLACK_VINYL_BAZAR_PRODUCT_SELECTOR)
            .map(|product| {
                listing(
                    url,
                    product.select(&consts::BLACK_VINYL_BAZAR_NAME_SELECTOR).next(),
                    product.select(&consts::BLACK_VINYL_BAZAR_PRICE_SELECTOR).next(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let next = if listings.is_empty() {
            None
        } else {
            Some(Self::next_page_url(url)?)
        };
        Ok(Page {
            url: url.clone(),
            listings,
            next,
        })
    }
}
