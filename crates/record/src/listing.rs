use crate::error::{ErrorKind, Result};
use crate::record::{Record, RecordFactory, RecordMapper};
use serde_json::{Map, Value, json};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Currency suffix used when rendering prices. Every supported marketplace
/// lists prices in Czech crowns.
pub const CURRENCY: &str = "Kč";

/// One marketplace listing.
///
/// Fields are private so a `Listing` can only come out of
/// [`ListingFactory`] (validated) or [`Listing::new`] (trusted callers such as
/// tests), and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    name: String,
    price: f64,
    link: String,
}
impl Listing {
    pub fn new(name: impl Into<String>, price: f64, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            link: link.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Price rounded to whole crowns, ties to even.
    pub fn rounded_price(&self) -> f64 {
        self.price.round_ties_even()
    }
}

impl Display for Listing {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} | {} {}", self.name, self.rounded_price(), CURRENCY)
    }
}

impl Record for Listing {}

/// Validates raw `{name, price, link}` payloads into [`Listing`]s.
///
/// Rules: `name` and `link` must be non-empty strings, `price` must be a
/// finite, non-negative number. Additional fields are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingFactory;

impl ListingFactory {
    fn reject(reason: &'static str, raw: &Value) -> exn::Exn<ErrorKind> {
        tracing::debug!(reason, "Rejected raw record");
        exn::Exn::from(ErrorKind::Schema {
            reason,
            payload: raw.to_string(),
        })
    }

    fn non_empty_str<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
        object.get(field).and_then(Value::as_str).filter(|s| !s.is_empty())
    }
}

impl RecordFactory for ListingFactory {
    type Record = Listing;

    fn create_from_raw(&self, raw: &Value) -> Result<Listing> {
        let Some(object) = raw.as_object() else {
            return Err(Self::reject("payload must be an object", raw));
        };
        let name = Self::non_empty_str(object, "name")
            .ok_or_else(|| Self::reject("name must be a non-empty string", raw))?;
        let price = object
            .get("price")
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| Self::reject("price must be a non-negative number", raw))?;
        let link = Self::non_empty_str(object, "link")
            .ok_or_else(|| Self::reject("link must be a non-empty string", raw))?;
        Ok(Listing::new(name, price, link))
    }
}

/// Projects [`Listing`]s back to `{name, price, link}` payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingMapper;

impl RecordMapper for ListingMapper {
    type Record = Listing;

    fn to_raw(&self, record: &Listing) -> Value {
        // Whole prices go out as integers, so `{"price": 100}` survives a
        // round trip unchanged and `{"price": 100.0}` comes back as `100`.
        let price = if record.price.fract() == 0.0 && record.price <= u64::MAX as f64 {
            json!(record.price as u64)
        } else {
            json!(record.price)
        };
        json!({
            "name": record.name,
            "price": price,
            "link": record.link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[test]
    fn test_equality_is_structural() {
        assert_eq!(Listing::new("a", 1.0, "l"), Listing::new("a", 1.0, "l"));
        assert_ne!(Listing::new("a", 1.0, "l"), Listing::new("b", 2.0, "l"));
        assert_ne!(Listing::new("a", 1.0, "l"), Listing::new("a", 1.0, "other"));
    }

    #[rstest]
    #[case(100.0, "LP | 100 Kč")]
    #[case(99.4, "LP | 99 Kč")]
    #[case(99.6, "LP | 100 Kč")]
    #[case(2.5, "LP | 2 Kč")]
    #[case(3.5, "LP | 4 Kč")]
    #[case(0.0, "LP | 0 Kč")]
    fn test_display(#[case] price: f64, #[case] expected: &str) {
        assert_eq!(Listing::new("LP", price, "u").to_string(), expected);
    }

    #[test]
    fn test_display_key_ignores_link() {
        let a = Listing::new("LP", 100.2, "u1");
        let b = Listing::new("LP", 99.8, "u2");
        assert_ne!(a, b);
        assert_eq!(a.display_key(), b.display_key());
    }

    #[test]
    fn test_create_from_raw_success() {
        let listing = ListingFactory.create_from_raw(&json!({"name": "a", "price": 1, "link": "l"})).unwrap();
        assert_eq!(listing, Listing::new("a", 1.0, "l"));
    }

    #[test]
    fn test_create_from_raw_ignores_extra_fields() {
        let raw = json!({"name": "a", "price": 1.5, "link": "l", "seen": true});
        assert_eq!(ListingFactory.create_from_raw(&raw).unwrap(), Listing::new("a", 1.5, "l"));
    }

    #[rstest]
    #[case::empty_object(json!({}))]
    #[case::not_an_object(json!(["a", 1, "l"]))]
    #[case::empty_name(json!({"name": "", "price": 1, "link": "l"}))]
    #[case::missing_name(json!({"price": 1, "link": "l"}))]
    #[case::name_not_string(json!({"name": 5, "price": 1, "link": "l"}))]
    #[case::negative_price(json!({"name": "a", "price": -1, "link": "l"}))]
    #[case::string_price(json!({"name": "a", "price": "1", "link": "l"}))]
    #[case::missing_price(json!({"name": "a", "link": "l"}))]
    #[case::empty_link(json!({"name": "a", "price": 1, "link": ""}))]
    #[case::missing_link(json!({"name": "a", "price": 1}))]
    fn test_create_from_raw_rejects(#[case] raw: Value) {
        let err = ListingFactory.create_from_raw(&raw).unwrap_err();
        match &*err {
            ErrorKind::Schema { payload, .. } => assert_eq!(payload, &raw.to_string()),
        }
    }

    #[rstest]
    #[case(json!({"name": "a", "price": 1, "link": "l"}))]
    #[case(json!({"name": "LP2", "price": 200, "link": "https://example.com/lp2"}))]
    #[case(json!({"name": "Kind of Blue", "price": 349.9, "link": "https://example.com/kob"}))]
    #[case(json!({"name": "free", "price": 0, "link": "l"}))]
    fn test_round_trip(#[case] raw: Value) {
        let listing = ListingFactory.create_from_raw(&raw).unwrap();
        assert_eq!(ListingMapper.to_raw(&listing), raw);
    }

    #[test]
    fn test_whole_float_price_comes_back_as_integer() {
        let raw = json!({"name": "LP1", "price": 450.0, "link": "l"});
        let listing = ListingFactory.create_from_raw(&raw).unwrap();
        let mapped = ListingMapper.to_raw(&listing);
        assert_eq!(mapped["price"], json!(450));
        assert_eq!(mapped["price"].as_f64(), raw["price"].as_f64());
        assert_eq!(ListingFactory.create_from_raw(&mapped).unwrap(), listing);
    }
}
