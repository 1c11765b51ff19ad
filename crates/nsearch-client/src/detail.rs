//! Extraction of release date, price and publisher from a title's `Detail`
//! fragment.
//!
//! The fragment is rendered HTML, e.g.
//!
//! ```text
//! <span class="release">2015.11.19</span> <span class="price">4,700円(税別)</span>
//! <span class="maker">任天堂</span>
//! ```
//!
//! Spans are matched by class name, not position; unknown classes are
//! ignored and missing ones leave the field empty.

use std::sync::LazyLock;

use regex::Regex;

static CLASSED_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span\b[^>]*?\bclass\s*=\s*["']([^"']*)["'][^>]*>"#)
        .expect("valid classed span regex")
});

static SPAN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/)?span\b[^>]*>").expect("valid span tag regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tags regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DetailFields {
    pub release_date: Option<String>,
    pub price: Option<String>,
    pub publisher: Option<String>,
}

/// Pulls the classed spans out of a detail fragment.
///
/// When a class appears more than once the first non-empty span wins.
pub(crate) fn parse_detail_fragment(html: &str) -> DetailFields {
    let mut fields = DetailFields::default();

    for cap in CLASSED_SPAN_RE.captures_iter(html) {
        let Some(open) = cap.get(0) else { continue };
        let text = clean_text(span_body(html, open.end()));
        if text.is_empty() {
            continue;
        }

        for class in cap[1].split_whitespace() {
            let slot = match class {
                "release" => &mut fields.release_date,
                "price" => &mut fields.price,
                "maker" => &mut fields.publisher,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(text);
            }
            break;
        }
    }

    fields
}

/// Inner HTML of a span whose opening tag ends at `start`, up to its
/// balanced `</span>`. An unclosed span runs to the end of the fragment.
fn span_body(html: &str, start: usize) -> &str {
    let rest = &html[start..];
    let mut depth = 1usize;
    for tag in SPAN_TAG_RE.captures_iter(rest) {
        if tag.get(1).is_some() {
            depth -= 1;
            if depth == 0 {
                return tag.get(0).map_or(rest, |m| &rest[..m.start()]);
            }
        } else if !tag[0].ends_with("/>") {
            depth += 1;
        }
    }
    rest
}

/// Strips tags, decodes the handful of entities the vendor emits and
/// collapses whitespace.
fn clean_text(input: &str) -> String {
    let no_tags = TAG_RE.replace_all(input, " ");
    let decoded = no_tags
        .replace("&nbsp;", " ")
        .replace("&yen;", "¥")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}
