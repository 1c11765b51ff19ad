//! Search criteria for a session.

use crate::codes::{parse_tags, Genre, Medium, Platform};
use crate::encode::parse_price_ceiling;
use crate::error::ValidationError;

/// What to search for. Fixed once handed to a session.
///
/// Enumerated filters are stored typed, so a built `SearchCriteria` can never
/// carry an unknown tag; the string-taking builders validate up front.
/// `None` on an optional filter means the filter is not applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub query: String,
    pub platforms: Option<Vec<Platform>>,
    pub media: Option<Vec<Medium>>,
    pub genres: Option<Vec<Genre>>,
    pub price_ceiling: Option<i64>,
    pub trial_available: bool,
    pub in_campaign: bool,
    pub publisher_is_vendor: bool,
    /// `YYYYMM` or `YYYY-MM`; encoded lazily and dropped if unrecognised.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl SearchCriteria {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Restricts the search to the given platform tags (`wiiu`, `wii`, `3ds`, `ds`).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for field `platform` listing unknown tags.
    pub fn with_platforms<I, S>(mut self, tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.platforms = non_empty(parse_tags(tags)?);
        Ok(self)
    }

    /// Restricts the search to the given medium tags (`pkg`, `download`, `vc`).
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for field `medium` listing unknown tags.
    pub fn with_media<I, S>(mut self, tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.media = non_empty(parse_tags(tags)?);
        Ok(self)
    }

    /// Restricts the search to the given genre tags.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for field `genre` listing unknown tags.
    pub fn with_genres<I, S>(mut self, tags: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.genres = non_empty(parse_tags(tags)?);
        Ok(self)
    }

    #[must_use]
    pub fn with_price_ceiling(mut self, ceiling: i64) -> Self {
        self.price_ceiling = Some(ceiling);
        self
    }

    /// Sets the price ceiling from text; non-numeric text clears the filter.
    #[must_use]
    pub fn with_price_ceiling_text(mut self, text: &str) -> Self {
        self.price_ceiling = parse_price_ceiling(text);
        if self.price_ceiling.is_none() {
            tracing::debug!(price = text, "ignoring unparseable price ceiling");
        }
        self
    }

    #[must_use]
    pub fn with_trial_available(mut self, enabled: bool) -> Self {
        self.trial_available = enabled;
        self
    }

    #[must_use]
    pub fn with_in_campaign(mut self, enabled: bool) -> Self {
        self.in_campaign = enabled;
        self
    }

    #[must_use]
    pub fn with_publisher_is_vendor(mut self, enabled: bool) -> Self {
        self.publisher_is_vendor = enabled;
        self
    }

    #[must_use]
    pub fn with_release_range(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start_date = start.map(str::to_owned);
        self.end_date = end.map(str::to_owned);
        self
    }
}

fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_filters() {
        let criteria = SearchCriteria::new("mario");
        assert_eq!(criteria.query, "mario");
        assert!(criteria.platforms.is_none());
        assert!(criteria.media.is_none());
        assert!(criteria.genres.is_none());
        assert!(criteria.price_ceiling.is_none());
        assert!(!criteria.trial_available);
    }

    #[test]
    fn with_genres_rejects_misspelled_genre() {
        let err = SearchCriteria::new("kart")
            .with_genres(["racing"])
            .expect_err("racing is not a genre tag");
        assert_eq!(err.field, "genre");
        assert_eq!(err.values, vec!["racing".to_string()]);
    }

    #[test]
    fn with_platforms_parses_and_dedupes() {
        let criteria = SearchCriteria::new("zelda")
            .with_platforms(["3ds", "wiiu", "3ds"])
            .unwrap();
        assert_eq!(criteria.platforms, Some(vec![Platform::N3ds, Platform::WiiU]));
    }

    #[test]
    fn with_media_empty_list_means_no_filter() {
        let criteria = SearchCriteria::new("zelda")
            .with_media(Vec::<String>::new())
            .unwrap();
        assert!(criteria.media.is_none());
    }

    #[test]
    fn with_price_ceiling_text_drops_garbage() {
        let criteria = SearchCriteria::new("x")
            .with_price_ceiling(800)
            .with_price_ceiling_text("cheap");
        assert_eq!(criteria.price_ceiling, None);

        let criteria = SearchCriteria::new("x").with_price_ceiling_text(" 450 ");
        assert_eq!(criteria.price_ceiling, Some(450));
    }
}
