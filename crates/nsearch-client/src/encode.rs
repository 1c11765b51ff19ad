//! Filter encoding: user-facing filter values to the vendor's query codes.
//!
//! All functions here are pure. Enumerated tags (platform, medium, genre) are
//! strict and reject unknown values; dates and prices are permissive and fall
//! back to "no filter" when they cannot be interpreted, matching how the
//! service itself treats unknown values.

use std::sync::LazyLock;

use nsearch_core::ReleaseWindowScheme;
use regex::Regex;

use crate::codes::{self, parse_tags, Genre, Medium, Platform, Tag};
use crate::criteria::SearchCriteria;
use crate::error::ValidationError;

/// Price tier token for ceilings up to 500 yen.
pub const PRICE_TIER_LOW: &str = "*_500";
/// Price tier token for ceilings above 500 and up to 1000 yen.
pub const PRICE_TIER_MID: &str = "*_1000";

static YEAR_MONTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})-?([0-9]{2})$").expect("valid year-month regex"));

/// Encodes a hardware selection from raw platform and medium tags.
///
/// Returns `Ok(None)` when both sides are absent (no hardware parameter is
/// sent at all). See [`hardware_slots`] for the cross-product rules.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any tag is not a known platform or medium.
pub fn encode_hardware_selection<P, M>(
    platforms: Option<&[P]>,
    media: Option<&[M]>,
) -> Result<Option<Vec<usize>>, ValidationError>
where
    P: AsRef<str>,
    M: AsRef<str>,
{
    let platforms = platforms.map(parse_tags::<Platform, _, _>).transpose()?;
    let media = media.map(parse_tags::<Medium, _, _>).transpose()?;
    Ok(hardware_slots(platforms.as_deref(), media.as_deref()))
}

/// Computes the slot indices for a platform/medium selection.
///
/// When only one side is given (or a side is empty) the other defaults to all
/// of its values. Pairs are visited media-major, platform-minor; the pair with
/// no vendor slot (virtual console on DS) is skipped and repeated slots are
/// emitted once.
#[must_use]
pub fn hardware_slots(platforms: Option<&[Platform]>, media: Option<&[Medium]>) -> Option<Vec<usize>> {
    if platforms.is_none() && media.is_none() {
        return None;
    }

    let platforms = platforms.filter(|p| !p.is_empty()).unwrap_or(Platform::ALL);
    let media = media.filter(|m| !m.is_empty()).unwrap_or(Medium::ALL);

    let mut slots = Vec::with_capacity(platforms.len() * media.len());
    for &medium in media {
        for &platform in platforms {
            if let Some(slot) = codes::hardware_slot(platform, medium) {
                if !slots.contains(&slot) {
                    slots.push(slot);
                }
            }
        }
    }
    Some(slots)
}

/// Encodes raw genre tags as genre table indices.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any tag is not a known genre.
pub fn encode_genre_selection<S: AsRef<str>>(
    genres: Option<&[S]>,
) -> Result<Option<Vec<usize>>, ValidationError> {
    let Some(genres) = genres else {
        return Ok(None);
    };
    let parsed = parse_tags::<Genre, _, _>(genres)?;
    Ok(Some(parsed.into_iter().map(Genre::index).collect()))
}

/// Collapses a price ceiling to the vendor's price tier token.
///
/// There is no tier above 1000, so larger ceilings mean "no price filter".
#[must_use]
pub fn encode_price_tier(ceiling: Option<i64>) -> Option<&'static str> {
    match ceiling? {
        ..=500 => Some(PRICE_TIER_LOW),
        501..=1000 => Some(PRICE_TIER_MID),
        _ => None,
    }
}

/// Parses a user-supplied price ceiling; anything that is not an integer is `None`.
#[must_use]
pub fn parse_price_ceiling(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Encodes a `YYYYMM` / `YYYY-MM` string as a release-window index using the
/// default [`ReleaseWindowScheme`].
#[must_use]
pub fn encode_date_to_index(year_month: Option<&str>) -> Option<u32> {
    encode_date_to_index_with(ReleaseWindowScheme::default(), year_month)
}

/// Encodes a `YYYYMM` / `YYYY-MM` string as a release-window index.
///
/// Malformed strings and months that are not window boundaries give `None`.
#[must_use]
pub fn encode_date_to_index_with(
    scheme: ReleaseWindowScheme,
    year_month: Option<&str>,
) -> Option<u32> {
    let (year, month) = parse_year_month(year_month?)?;
    release_window_index(scheme, year, month)
}

fn parse_year_month(text: &str) -> Option<(u32, u32)> {
    let caps = YEAR_MONTH.captures(text.trim())?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    Some((year, month))
}

/// Maps a window-boundary month to its index under `scheme`.
///
/// Only months 1, 6, 7 and 12 are boundaries. 2004 is the first year the
/// service knows about and has two windows under both schemes.
#[must_use]
pub fn release_window_index(scheme: ReleaseWindowScheme, year: u32, month: u32) -> Option<u32> {
    match year {
        ..=2003 => None,
        2004 => match month {
            1 => Some(0),
            12 => Some(1),
            _ => None,
        },
        _ => {
            let offset = year - 2005;
            match scheme {
                ReleaseWindowScheme::Biannual => match month {
                    1 => Some(1 + 2 * offset),
                    6 | 7 => Some(2 + 2 * offset),
                    12 => Some(3 + 2 * offset),
                    _ => None,
                },
                ReleaseWindowScheme::Quarterly => match month {
                    1 => Some(2 + 4 * offset),
                    6 => Some(3 + 4 * offset),
                    7 => Some(4 + 4 * offset),
                    12 => Some(5 + 4 * offset),
                    _ => None,
                },
            }
        }
    }
}

/// Builds the ordered query parameters for one page of a search.
///
/// Optional filters that encode to nothing are omitted; boolean flags are
/// only sent when set.
#[must_use]
pub fn build_query_params(
    criteria: &SearchCriteria,
    scheme: ReleaseWindowScheme,
    page: u32,
) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(slots) = hardware_slots(criteria.platforms.as_deref(), criteria.media.as_deref()) {
        for slot in slots {
            if let Some(id) = codes::hardware_slot_id(slot) {
                params.push((format!("hard[{slot}]"), id.to_string()));
            }
        }
    }

    params.push(("keyword".to_string(), criteria.query.clone()));

    if let Some(genres) = &criteria.genres {
        for genre in genres {
            params.push(("genre".to_string(), genre.index().to_string()));
        }
    }

    if let Some(tier) = encode_price_tier(criteria.price_ceiling) {
        params.push(("price".to_string(), tier.to_string()));
    }

    let start = encode_date_to_index_with(scheme, criteria.start_date.as_deref());
    if let Some(index) = start {
        params.push(("release[start]".to_string(), index.to_string()));
    }
    let end = encode_date_to_index_with(scheme, criteria.end_date.as_deref());
    if let Some(index) = end {
        params.push(("release[end]".to_string(), index.to_string()));
    }

    params.push(("page".to_string(), page.to_string()));

    let flags = [
        ("trial", criteria.trial_available),
        ("incampaign", criteria.in_campaign),
        ("maker", criteria.publisher_is_vendor),
    ];
    for (name, enabled) in flags {
        if enabled {
            params.push((name.to_string(), "1".to_string()));
        }
    }

    params
}

#[cfg(test)]
#[path = "encode_test.rs"]
mod tests;
