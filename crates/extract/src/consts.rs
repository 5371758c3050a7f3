use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;
use url::Url;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

macro_rules! url {
    ($name:ident, $url:expr) => {
        pub(crate) static $name: LazyLock<Url> = LazyLock::new(|| Url::parse($url).unwrap());
    };
}

pub(crate) const USER_AGENT: &str = concat!("rolba/", env!("CARGO_PKG_VERSION"));
pub(crate) const DEFAULT_MAX_PAGES: usize = 200;

// Leading amount of a price label: digits with optional (NBSP) thousand
// separators and an optional decimal part, e.g. "1 234,50 Kč".
regex!(PRICE_REGEX, r"\d[\d\s]*(?:[.,]\d+)?");

url!(VINYL_EMPIRE_START_URL, "https://vinylempire.cz/13-bazarove-vinyly?id_category=13&n=60");
selector!(VINYL_EMPIRE_PRODUCT_SELECTOR, "div.product-container");
selector!(VINYL_EMPIRE_NAME_SELECTOR, "a.product-name");
selector!(VINYL_EMPIRE_PRICE_SELECTOR, "span.product-price");
selector!(VINYL_EMPIRE_NEXT_SELECTOR, "li.pagination_next a[href]");

url!(BLACK_VINYL_BAZAR_START_URL, "https://www.blackvinylbazar.cz/bazar?ids=2&krit=raz8-80-1");
selector!(BLACK_VINYL_BAZAR_PRODUCT_SELECTOR, "div.ramecekshop");
selector!(BLACK_VINYL_BAZAR_NAME_SELECTOR, "a.nadpisramecek");
selector!(BLACK_VINYL_BAZAR_PRICE_SELECTOR, "a.objednejkosobr");
