//! vinylempire.cz second-hand section.
//!
//! Products sit in `div.product-container`; the listing links to the next
//! page through the pagination widget until the last page.

use crate::consts;
use crate::error::Result;
use crate::marketplace::{Marketplace, Page, listing, resolve};
use scraper::Html;
use tracing::instrument;
use url::Url;

#[derive(Clone, Debug)]
pub struct VinylEmpire {
    start_url: Url,
}
impl VinylEmpire {
    pub fn new(start_url: Url) -> Self {
        Self { start_url }
    }
}
impl Default for VinylEmpire {
    fn default() -> Self {
        Self::new(consts::VINYL_EMPIRE_START_URL.clone())
    }
}

impl Marketplace for VinylEmpire {
    fn name(&self) -> &str {
        "Vinyl Empire"
    }

    fn start_url(&self) -> &Url {
        &self.start_url
    }

    #[instrument(skip_all, fields(url = %url))]
    fn parse_page(&self, url: &Url, html: &str) -> Result<Page> {
        let document = Html::parse_document(html);
        let listings = document
            .select(&consts::VINYL_EMPIRE_PRODUCT_SELECTOR)
            .map(|product| {
                listing(
                    url,
                    product.select(&consts::VINYL_EMPIRE_NAME_SELECTOR).next(),
                    product.select(&consts::VINYL_EMPIRE_PRICE_SELECTOR).next(),
                )
            })
            .collect::<Result<Vec<_>>>()?;
        let next = document
            .select(&consts::VINYL_EMPIRE_NEXT_SELECTOR)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(|href| resolve(url, href))
            .transpose()?;
        Ok(Page {
            url: url.clone(),
            listings,
            next,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fetch::FixtureFetcher;
    use crate::source::{MarketplaceSource, RecordsSource};
    use rolba_record::{Listing, ListingFactory};
    use serde_json::json;
    use std::sync::Arc;

    const FIRST_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<ul class="product_list">
  <li><div class="product-container">
    <h5><a class="product-name" href="/bazar/1201-pink-floyd-animals.html" title="Pink Floyd">
      Pink Floyd - Animals
    </a></h5>
    <div class="content_price"><span class="product-price">1 234,50 Kč</span></div>
  </div></li>
  <li><div class="product-container">
    <h5><a class="product-name" href="https://vinylempire.cz/bazar/88-kraftwerk.html">Kraftwerk - Radio-Activity</a></h5>
    <div class="content_price"><span class="product-price">
      450,00 Kč
    </span></div>
  </div></li>
</ul>
<ul class="pagination">
  <li class="pagination_previous disabled"><span>Previous</span></li>
  <li class="pagination_next"><a href="/13-bazarove-vinyly?id_category=13&amp;n=60&amp;p=2">Next</a></li>
</ul>
</body></html>"#;

    const LAST_PAGE: &str = r#"<html><body>
<div class="product-container">
  <a class="product-name" href="/bazar/7-can-tago-mago.html">Can - Tago Mago</a>
  <span class="product-price">899,00 Kč</span>
</div>
<ul class="pagination">
  <li class="pagination_next disabled"><span>Next</span></li>
</ul>
</body></html>"#;

    fn page_url(query: &str) -> Url {
        Url::parse(&format!("https://vinylempire.cz/13-bazarove-vinyly?{query}")).unwrap()
    }

    #[test]
    fn test_default_start_url() {
        assert_eq!(
            VinylEmpire::default().start_url().as_str(),
            "https://vinylempire.cz/13-bazarove-vinyly?id_category=13&n=60"
        );
    }

    #[test]
    fn test_parse_first_page() {
        let url = page_url("id_category=13&n=60");
        let page = VinylEmpire::default().parse_page(&url, FIRST_PAGE).unwrap();
        assert_eq!(
            page.listings,
            [
                json!({
                    "name": "Pink Floyd - Animals",
                    "price": 1234.5,
                    "link": "https://vinylempire.cz/bazar/1201-pink-floyd-animals.html",
                }),
                json!({
                    "name": "Kraftwerk - Radio-Activity",
                    "price": 450.0,
                    "link": "https://vinylempire.cz/bazar/88-kraftwerk.html",
                }),
            ]
        );
        assert_eq!(page.next, Some(page_url("id_category=13&n=60&p=2")));
    }

    #[test]
    fn test_parse_last_page() {
        let url = page_url("id_category=13&n=60&p=2");
        let page = VinylEmpire::default().parse_page(&url, LAST_PAGE).unwrap();
        assert_eq!(page.listings.len(), 1);
        assert_eq!(page.next, None);
    }

    #[test]
    fn test_parse_product_without_price() {
        let html = r#"<div class="product-container"><a class="product-name" href="/x">X</a></div>"#;
        let err = VinylEmpire::default().parse_page(&page_url("n=60"), html).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MissingField("price")));
    }

    #[tokio::test]
    async fn test_crawl() {
        let fetcher = FixtureFetcher::default()
            .with_page(VinylEmpire::default().start_url().as_str(), FIRST_PAGE)
            .with_page(page_url("id_category=13&n=60&p=2").as_str(), LAST_PAGE);
        let source = MarketplaceSource::new(VinylEmpire::default(), Arc::new(fetcher), ListingFactory);
        let records = source.extract().await.unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.contains(&Listing::new(
            "Can - Tago Mago",
            899.0,
            "https://vinylempire.cz/bazar/7-can-tago-mago.html"
        )));
        let names: Vec<String> = records.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "Pink Floyd - Animals | 1234 Kč",
                "Kraftwerk - Radio-Activity | 450 Kč",
                "Can - Tago Mago | 899 Kč"
            ]
        );
    }
}
