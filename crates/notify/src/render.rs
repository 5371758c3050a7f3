//! HTML rendering of a digest.
//!
//! The layout is an [upon] template; the built-in one lives in
//! `templates/digest.html` and receives:
//!
//! | Name                        | Type     |
//! |-----------------------------|----------|
//! | `date`                      | string   |
//! | `sections[].title`          | string   |
//! | `sections[].has_records`    | bool     |
//! | `sections[].records[]`      | string   |
//!
//! Records are passed in their display form. Use the `html` formatter
//! (`{{ record | html }}`) for anything that may contain markup characters.

use crate::Section;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use rolba_record::Record;
use std::str::FromStr;
use time::Date;
use tracing::instrument;
use upon::{Engine, Template};

const DIGEST_TEMPLATE: &str = include_str!("../templates/digest.html");

/// Compiled digest template.
pub struct DigestRenderer {
    engine: Engine<'static>,
    template: Template<'static>,
}
impl FromStr for DigestRenderer {
    type Err = crate::error::Error;

    /// Compile a custom digest template.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut engine = Engine::new();
        addons::configure(&mut engine);
        let template = engine.compile(s.to_string()).or_raise(|| ErrorKind::Template)?;
        Ok(Self { engine, template })
    }
}
impl DigestRenderer {
    /// The built-in digest layout.
    pub fn builtin() -> Result<Self> {
        DIGEST_TEMPLATE.parse()
    }

    #[instrument(skip_all, fields(sections = sections.len()))]
    pub fn render<R: Record>(&self, sections: &[Section<R>], date: Date) -> Result<String> {
        self.template
            .render(&self.engine, Self::parameters(sections, date))
            .to_string()
            .or_raise(|| ErrorKind::Render)
    }

    fn parameters<R: Record>(sections: &[Section<R>], date: Date) -> upon::Value {
        let sections: Vec<upon::Value> = sections
            .iter()
            .map(|section| {
                let records: Vec<String> = section.records.iter().map(ToString::to_string).collect();
                let has_records = !records.is_empty();
                upon::value! {
                    title: section.title.as_str(),
                    has_records: has_records,
                    records: records,
                }
            })
            .collect();
        upon::value! {
            date: date.to_string(),
            sections: sections,
        }
    }
}

mod addons {
    use std::fmt::Write;
    use upon::{Engine, Value, fmt as upon_fmt};

    fn escape_html(f: &mut upon_fmt::Formatter<'_>, value: &Value) -> upon_fmt::Result {
        match value {
            Value::String(s) => {
                for c in s.chars() {
                    match c {
                        '&' => f.write_str("&amp;")?,
                        '<' => f.write_str("&lt;")?,
                        '>' => f.write_str("&gt;")?,
                        '"' => f.write_str("&quot;")?,
                        '\'' => f.write_str("&#39;")?,
                        c => f.write_char(c)?,
                    }
                }
            },
            v => upon_fmt::default(f, v)?,
        };
        Ok(())
    }

    pub(crate) fn configure(engine: &mut Engine<'_>) {
        engine.add_formatter("html", escape_html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolba_record::{Listing, RecordsCollection};
    use time::Month;

    fn date() -> Date {
        Date::from_calendar_date(2024, Month::March, 9).unwrap()
    }

    fn position(haystack: &str, needle: &str) -> usize {
        haystack.find(needle).unwrap_or_else(|| panic!("{needle:?} not found in {haystack}"))
    }

    #[test]
    fn test_builtin_layout() {
        let sections = [
            Section::new(
                "Vinyl Empire",
                RecordsCollection::new()
                    .with(Listing::new("LP2", 200.0, "u2"))
                    .with(Listing::new("LP3", 299.5, "u3")),
            ),
            Section::new("Black Vinyl Bazar", RecordsCollection::new()),
        ];
        let html = DigestRenderer::builtin().unwrap().render(&sections, date()).unwrap();

        let heading = position(&html, "<h1>Records Notification</h1>");
        let date = position(&html, "2024-03-09");
        let first = position(&html, "<h2>Vinyl Empire</h2>");
        let lp2 = position(&html, "<li>LP2 | 200 Kč</li>");
        let lp3 = position(&html, "<li>LP3 | 300 Kč</li>");
        let second = position(&html, "<h2>Black Vinyl Bazar</h2>");
        let empty = position(&html, "<p>No new records</p>");
        assert!(heading < date && date < first && first < lp2 && lp2 < lp3 && lp3 < second && second < empty);
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("No new records").count(), 1);
    }

    #[test]
    fn test_no_sections() {
        let sections: [Section<Listing>; 0] = [];
        let html = DigestRenderer::builtin().unwrap().render(&sections, date()).unwrap();
        assert!(html.contains("<h1>Records Notification</h1>"));
        assert!(!html.contains("<h2>"));
    }

    #[test]
    fn test_values_are_escaped() {
        let sections = [Section::new(
            "Rock & <Roll>",
            RecordsCollection::new().with(Listing::new("<b>\"Loud\"</b>", 1.0, "u")),
        )];
        let html = DigestRenderer::builtin().unwrap().render(&sections, date()).unwrap();
        assert!(html.contains("<h2>Rock &amp; &lt;Roll&gt;</h2>"));
        assert!(html.contains("<li>&lt;b&gt;&quot;Loud&quot;&lt;/b&gt; | 1 Kč</li>"));
    }

    #[test]
    fn test_custom_template() {
        let renderer: DigestRenderer = "{{ date }}:{% for s in sections %} {{ s.title }}={{ s.has_records }}{% endfor %}"
            .parse()
            .unwrap();
        let sections = [
            Section::new("A", RecordsCollection::new().with(Listing::new("LP", 1.0, "u"))),
            Section::new("B", RecordsCollection::new()),
        ];
        assert_eq!(renderer.render(&sections, date()).unwrap(), "2024-03-09: A=true B=false");
    }

    #[test]
    fn test_invalid_template() {
        let err = "{% for %}".parse::<DigestRenderer>().err().unwrap();
        assert!(matches!(&*err, ErrorKind::Template));
    }

    #[test]
    fn test_render_error() {
        let renderer: DigestRenderer = "{{ missing.value }}".parse().unwrap();
        let err = renderer.render::<Listing>(&[], date()).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Render));
    }
}
