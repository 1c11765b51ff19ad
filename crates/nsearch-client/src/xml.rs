//! Minimal XML element tree built on the `quick-xml` event reader.
//!
//! The search response is addressed positionally (first child, second child),
//! which is awkward with a streaming reader, so the document is first folded
//! into a small owned tree. Attributes are not kept; the service does not use
//! them.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::SearchError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    pub name: String,
    /// Concatenated text and CDATA content, entity-unescaped.
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }
}

/// Parses `xml` into its root element.
///
/// # Errors
///
/// - [`SearchError::Xml`] if the reader rejects the document (mismatched end
///   tags, bad entities, ...).
/// - [`SearchError::Decode`] if the document has no root, more than one root,
///   or ends with unclosed elements.
pub(crate) fn parse_document(xml: &str) -> Result<Element, SearchError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                stack.push(Element::named(name));
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                attach(&mut stack, &mut root, Element::named(name))?;
            }
            Ok(Event::End(_)) => {
                let Some(done) = stack.pop() else {
                    return Err(SearchError::decode("search response", "unexpected end tag"));
                };
                attach(&mut stack, &mut root, done)?;
            }
            Ok(Event::Text(e)) => {
                if let Some(current) = stack.last_mut() {
                    let text = e.unescape().map_err(|source| SearchError::Xml {
                        context: format!("text of <{}>", current.name),
                        source,
                    })?;
                    current.text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(SearchError::Xml {
                    context: format!("search response at byte {}", reader.buffer_position()),
                    source,
                })
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SearchError::decode(
            "search response",
            format!("document ended inside <{}>", open.name),
        ));
    }

    root.ok_or_else(|| SearchError::decode("search response", "document has no root element"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), SearchError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(SearchError::decode(
            "search response",
            format!("second root element <{}>", element.name),
        ));
    }
    *root = Some(element);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree() {
        let root = parse_document(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<a><b>one</b><c><d>two</d><e/></c></a>"#,
        )
        .expect("should parse");

        assert_eq!(root.name, "a");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].text, "one");
        assert_eq!(root.children[1].children[0].text, "two");
        assert_eq!(root.children[1].children[1].name, "e");
    }

    #[test]
    fn unescapes_text_and_keeps_cdata_verbatim() {
        let root = parse_document(
            "<a><b>&lt;span&gt;x&amp;y&lt;/span&gt;</b><c><![CDATA[<span>z</span>]]></c></a>",
        )
        .unwrap();
        assert_eq!(root.children[0].text, "<span>x&y</span>");
        assert_eq!(root.children[1].text, "<span>z</span>");
    }

    #[test]
    fn mismatched_end_tag_is_xml_error() {
        let result = parse_document("<a><b>text</c></a>");
        assert!(
            matches!(result, Err(SearchError::Xml { .. })),
            "expected Xml error, got: {result:?}"
        );
    }

    #[test]
    fn truncated_document_is_an_error() {
        let result = parse_document("<a><b>text</b>");
        assert!(result.is_err(), "expected error, got: {result:?}");
    }

    #[test]
    fn empty_document_is_decode_error() {
        let result = parse_document("   ");
        assert!(
            matches!(result, Err(SearchError::Decode { .. })),
            "expected Decode error, got: {result:?}"
        );
    }

    #[test]
    fn second_root_is_decode_error() {
        let result = parse_document("<a/><b/>");
        assert!(
            matches!(result, Err(SearchError::Decode { .. })),
            "expected Decode error, got: {result:?}"
        );
    }
}
