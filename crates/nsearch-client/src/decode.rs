//! Decoding of one search response page.
//!
//! The root element's children are positional: the first holds the total
//! match count, the second the list of title elements. Their tag names are
//! not checked.

use crate::detail::parse_detail_fragment;
use crate::error::SearchError;
use crate::types::{SearchPage, TitleRecord, DETAIL_TAG, ROW_NUMBER_TAG};
use crate::xml::{parse_document, Element};

/// Decodes a response body into its total count and title records.
///
/// A zero total yields an empty page without requiring the title list.
///
/// # Errors
///
/// - [`SearchError::Xml`] if the body is not well-formed XML.
/// - [`SearchError::Decode`] if the count or title list is missing, the count
///   is not an integer, or a title has no `Detail` child.
pub fn decode_search_page(xml: &str) -> Result<SearchPage, SearchError> {
    let root = parse_document(xml)?;

    let count = root.children.first().ok_or_else(|| {
        SearchError::decode(
            format!("<{}>", root.name),
            "missing total count element",
        )
    })?;
    let total_count = count.text.trim().parse::<u64>().map_err(|e| {
        SearchError::decode(
            format!("<{}>", count.name),
            format!("total count {:?} is not an integer: {e}", count.text),
        )
    })?;

    if total_count == 0 {
        return Ok(SearchPage {
            total_count,
            titles: Vec::new(),
        });
    }

    let list = root.children.get(1).ok_or_else(|| {
        SearchError::decode(format!("<{}>", root.name), "missing title list element")
    })?;

    let titles = list
        .children
        .iter()
        .enumerate()
        .map(|(i, title)| decode_title(i, title))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchPage {
        total_count,
        titles,
    })
}

fn decode_title(position: usize, title: &Element) -> Result<TitleRecord, SearchError> {
    let mut record = TitleRecord::default();
    let mut detail = None;

    for child in &title.children {
        if child.name == DETAIL_TAG {
            detail = Some(parse_detail_fragment(&child.text));
        } else {
            record.fields.insert(child.name.clone(), child.text.clone());
        }
    }

    let detail = detail.ok_or_else(|| {
        let row = record.field(ROW_NUMBER_TAG).unwrap_or("?");
        SearchError::decode(
            format!("title {} (row {row})", position + 1),
            format!("missing <{DETAIL_TAG}> fragment"),
        )
    })?;

    record.release_date = detail.release_date;
    record.price = detail.price;
    record.publisher = detail.publisher;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<SearchResult>
  <AllCount>2</AllCount>
  <TitleInfoList>
    <TitleInfo>
      <No>1</No>
      <InitialCode>CTRPAREJ</InitialCode>
      <TitleName>スーパーマリオ 3Dランド</TitleName>
      <HardCode>3</HardCode>
      <Detail><![CDATA[<span class="release">2011.11.3</span><span class="price">4,800円</span><span class="maker">任天堂</span>]]></Detail>
    </TitleInfo>
    <TitleInfo>
      <No>2</No>
      <TitleName>Price &amp; Co.</TitleName>
      <Detail>&lt;span class="maker"&gt;Example&lt;/span&gt;&lt;span class="TitleName"&gt;hijack&lt;/span&gt;</Detail>
    </TitleInfo>
  </TitleInfoList>
</SearchResult>"#;

    #[test]
    fn decodes_count_and_titles() {
        let page = decode_search_page(PAGE).expect("should decode");
        assert_eq!(page.total_count, 2);
        assert_eq!(page.titles.len(), 2);

        let first = &page.titles[0];
        assert_eq!(first.row_number(), Some(1));
        assert_eq!(first.field("InitialCode"), Some("CTRPAREJ"));
        assert_eq!(first.title_name(), Some("スーパーマリオ 3Dランド"));
        assert_eq!(first.release_date.as_deref(), Some("2011.11.3"));
        assert_eq!(first.price.as_deref(), Some("4,800円"));
        assert_eq!(first.publisher.as_deref(), Some("任天堂"));
        assert_eq!(first.field(DETAIL_TAG), None, "detail is not copied verbatim");
    }

    #[test]
    fn misnamed_span_does_not_overwrite_vendor_field() {
        let page = decode_search_page(PAGE).unwrap();
        let second = &page.titles[1];
        assert_eq!(second.title_name(), Some("Price & Co."));
        assert_eq!(second.publisher.as_deref(), Some("Example"));
        assert_eq!(second.release_date, None);
        assert_eq!(second.price, None);
    }

    #[test]
    fn zero_total_needs_no_list() {
        let page = decode_search_page("<SearchResult><AllCount>0</AllCount></SearchResult>").unwrap();
        assert_eq!(page, SearchPage::default());
    }

    #[test]
    fn missing_count_is_decode_error() {
        let result = decode_search_page("<SearchResult/>");
        assert!(
            matches!(result, Err(SearchError::Decode { .. })),
            "expected Decode error, got: {result:?}"
        );
    }

    #[test]
    fn non_numeric_count_is_decode_error() {
        let result = decode_search_page(
            "<SearchResult><AllCount>many</AllCount><TitleInfoList/></SearchResult>",
        );
        assert!(
            matches!(result, Err(SearchError::Decode { ref reason, .. }) if reason.contains("many")),
            "expected Decode error, got: {result:?}"
        );
    }

    #[test]
    fn missing_list_with_nonzero_total_is_decode_error() {
        let result = decode_search_page("<SearchResult><AllCount>4</AllCount></SearchResult>");
        assert!(
            matches!(result, Err(SearchError::Decode { .. })),
            "expected Decode error, got: {result:?}"
        );
    }

    #[test]
    fn title_without_detail_is_decode_error() {
        let xml = "<SearchResult><AllCount>1</AllCount><TitleInfoList>\
                   <TitleInfo><No>1</No><TitleName>x</TitleName></TitleInfo>\
                   </TitleInfoList></SearchResult>";
        let result = decode_search_page(xml);
        assert!(
            matches!(result, Err(SearchError::Decode { ref context, .. }) if context.contains("row 1")),
            "expected Decode error, got: {result:?}"
        );
    }

    #[test]
    fn malformed_xml_is_xml_error() {
        let result = decode_search_page("<SearchResult><AllCount>1</Count></SearchResult>");
        assert!(
            matches!(result, Err(SearchError::Xml { .. })),
            "expected Xml error, got: {result:?}"
        );
    }
}
