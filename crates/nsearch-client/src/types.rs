//! Records decoded from the search response.
//!
//! ## Observed shape of a title element
//!
//! Each `<TitleInfo>` holds flat, text-only children such as `<No>` (absolute
//! row number across all pages), `<InitialCode>`, `<TitleName>`, `<LinkURL>`,
//! `<ScreenshotImgURL>`, `<HardCode>` and `<MediaCode>`, plus one `<Detail>`
//! child whose text is an HTML fragment. The set of plain children varies
//! between titles and over time, so they are kept as an open map rather than
//! struct fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::codes;

/// Tag of the absolute row number within the full result set.
pub const ROW_NUMBER_TAG: &str = "No";
/// Tag whose text is the embedded HTML detail fragment.
pub const DETAIL_TAG: &str = "Detail";

/// One listed title.
///
/// `fields` are copied verbatim from the title's children; the three parsed
/// fields come from the `Detail` fragment and are left as display text.
/// Serialises as one flat object; vendor tags are `CamelCase` while the
/// parsed keys are `snake_case`, so they never collide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TitleRecord {
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl TitleRecord {
    /// Text of a vendor field by tag name.
    #[must_use]
    pub fn field(&self, tag: &str) -> Option<&str> {
        self.fields.get(tag).map(String::as_str)
    }

    /// Absolute row number of this title across all pages.
    #[must_use]
    pub fn row_number(&self) -> Option<u64> {
        self.field(ROW_NUMBER_TAG)?.trim().parse().ok()
    }

    #[must_use]
    pub fn title_name(&self) -> Option<&str> {
        self.field("TitleName")
    }

    /// Display label for the title's `HardCode`.
    #[must_use]
    pub fn hardware_label(&self) -> Option<&'static str> {
        codes::hardware_label(self.field("HardCode")?.trim().parse().ok()?)
    }

    /// Display label for the title's `MediaCode`.
    #[must_use]
    pub fn medium_label(&self) -> Option<&'static str> {
        codes::medium_label(self.field("MediaCode")?.trim().parse().ok()?)
    }
}

/// One decoded page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Total matches for the criteria, across all pages.
    pub total_count: u64,
    pub titles: Vec<TitleRecord>,
}
