//! Vendor code tables.
//!
//! Everything the search service encodes positionally lives here: hardware
//! slots, platform and medium tags, genres, and the response-side numeric
//! codes. The tables mirror the vendor site's own navigation and are an
//! unversioned external contract, so a vendor change should only touch this
//! module.
//!
//! Note that the request side (slot indices, 0-based, shared across all
//! platforms) and the response side (`HardCode` / `MediaCode`, 1-based) use
//! unrelated numbering.

use crate::error::ValidationError;

/// Hardware slot identifiers, indexed by slot number.
///
/// A selected slot `n` is sent as `hard[n]=<HARDWARE_SLOTS[n]>`.
pub const HARDWARE_SLOTS: [&str; 15] = [
    "wiiU_all", "wiiU", "wiiU_dl", "wii_all", "wii", "wiiWare", "wiiVc", "3ds_all", "3ds",
    "3dsDl", "3dsVc", "ds_all", "ds", "dsiWare", "wiiU_Vc",
];

/// A closed set of filter tags with a canonical string spelling.
pub trait Tag: Copy + PartialEq + 'static {
    /// Criteria field name used in validation errors.
    const FIELD: &'static str;

    /// Every member, in the order used when a filter side defaults to "all".
    const ALL: &'static [Self];

    fn tag(self) -> &'static str;

    #[must_use]
    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.tag() == tag)
    }
}

/// Parses a list of tags, collapsing duplicates (first occurrence wins).
///
/// # Errors
///
/// Returns a [`ValidationError`] naming `T::FIELD` and every unrecognised tag.
pub fn parse_tags<T, I, S>(tags: I) -> Result<Vec<T>, ValidationError>
where
    T: Tag,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();
    let mut invalid = Vec::new();
    for raw in tags {
        let raw = raw.as_ref().trim();
        match T::from_tag(raw) {
            Some(value) if !parsed.contains(&value) => parsed.push(value),
            Some(_) => {}
            None => invalid.push(raw.to_string()),
        }
    }

    if invalid.is_empty() {
        Ok(parsed)
    } else {
        Err(ValidationError {
            field: T::FIELD,
            values: invalid,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    WiiU,
    Wii,
    N3ds,
    Ds,
}

impl Platform {
    /// Slot numbers for this platform, indexed by [`Medium::position`];
    /// position 0 is the platform's "all media" slot.
    fn slot_row(self) -> &'static [usize] {
        match self {
            Platform::WiiU => &[0, 1, 2, 14],
            Platform::Wii => &[3, 4, 5, 6],
            Platform::N3ds => &[7, 8, 9, 10],
            // DS has no virtual-console slot.
            Platform::Ds => &[11, 12, 13],
        }
    }
}

impl Tag for Platform {
    const FIELD: &'static str = "platform";
    const ALL: &'static [Self] = &[Platform::WiiU, Platform::Wii, Platform::N3ds, Platform::Ds];

    fn tag(self) -> &'static str {
        match self {
            Platform::WiiU => "wiiu",
            Platform::Wii => "wii",
            Platform::N3ds => "3ds",
            Platform::Ds => "ds",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    Package,
    Download,
    VirtualConsole,
}

impl Medium {
    /// Column of this medium in a platform's slot row.
    #[must_use]
    pub fn position(self) -> usize {
        match self {
            Medium::Package => 1,
            Medium::Download => 2,
            Medium::VirtualConsole => 3,
        }
    }
}

impl Tag for Medium {
    const FIELD: &'static str = "medium";
    const ALL: &'static [Self] = &[Medium::Package, Medium::Download, Medium::VirtualConsole];

    fn tag(self) -> &'static str {
        match self {
            Medium::Package => "pkg",
            Medium::Download => "download",
            Medium::VirtualConsole => "vc",
        }
    }
}

/// Looks up the slot for a (platform, medium) pair.
///
/// Returns `None` for the one combination the vendor has no slot for
/// (virtual console on DS).
#[must_use]
pub fn hardware_slot(platform: Platform, medium: Medium) -> Option<usize> {
    platform.slot_row().get(medium.position()).copied()
}

/// Identifier sent as the value of `hard[slot]`.
#[must_use]
pub fn hardware_slot_id(slot: usize) -> Option<&'static str> {
    HARDWARE_SLOTS.get(slot).copied()
}

/// Genre filter values. The discriminant is the index sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Adventure,
    Sports,
    Simulation,
    Shooting,
    Rpg,
    Study,
    Training,
    Puzzle,
    Table,
    Music,
    Race,
    Fight,
    Communication,
    Practical,
    Other,
}

impl Genre {
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Tag for Genre {
    const FIELD: &'static str = "genre";
    const ALL: &'static [Self] = &[
        Genre::Action,
        Genre::Adventure,
        Genre::Sports,
        Genre::Simulation,
        Genre::Shooting,
        Genre::Rpg,
        Genre::Study,
        Genre::Training,
        Genre::Puzzle,
        Genre::Table,
        Genre::Music,
        Genre::Race,
        Genre::Fight,
        Genre::Communication,
        Genre::Practical,
        Genre::Other,
    ];

    fn tag(self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Adventure => "adventure",
            Genre::Sports => "sports",
            Genre::Simulation => "simulation",
            Genre::Shooting => "shooting",
            Genre::Rpg => "rpg",
            Genre::Study => "study",
            Genre::Training => "training",
            Genre::Puzzle => "puzzle",
            Genre::Table => "table",
            Genre::Music => "music",
            Genre::Race => "race",
            Genre::Fight => "fight",
            Genre::Communication => "communication",
            Genre::Practical => "practical",
            Genre::Other => "other",
        }
    }
}

/// Display label for a response-side hardware family code (`HardCode`).
#[must_use]
pub fn hardware_label(code: u32) -> Option<&'static str> {
    match code {
        1 => Some("Wii U"),
        2 => Some("Wii"),
        3 => Some("Nintendo 3DS"),
        4 => Some("Nintendo DS"),
        _ => None,
    }
}

/// Display label for a response-side medium code (`MediaCode`).
#[must_use]
pub fn medium_label(code: u32) -> Option<&'static str> {
    match code {
        1 => Some("Package"),
        2 => Some("Download"),
        3 => Some("Virtual Console"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_id_is_referenced_exactly_once() {
        let mut seen = [0u8; HARDWARE_SLOTS.len()];
        for platform in Platform::ALL {
            for &slot in platform.slot_row() {
                seen[slot] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1), "slot usage: {seen:?}");
    }

    #[test]
    fn slot_ids_follow_platform_families() {
        let id = |p, m| hardware_slot(p, m).and_then(hardware_slot_id);
        assert_eq!(id(Platform::WiiU, Medium::VirtualConsole), Some("wiiU_Vc"));
        assert_eq!(id(Platform::N3ds, Medium::Download), Some("3dsDl"));
        assert_eq!(id(Platform::Ds, Medium::Download), Some("dsiWare"));
        assert_eq!(id(Platform::Wii, Medium::Package), Some("wii"));
    }

    #[test]
    fn ds_has_no_virtual_console_slot() {
        assert_eq!(hardware_slot(Platform::Ds, Medium::VirtualConsole), None);
    }

    #[test]
    fn slot_id_out_of_range_is_none() {
        assert_eq!(hardware_slot_id(15), None);
    }

    #[test]
    fn genre_index_matches_table_position() {
        for (i, genre) in Genre::ALL.iter().enumerate() {
            assert_eq!(genre.index(), i, "{genre:?}");
        }
        assert_eq!(Genre::ALL.len(), 16);
        assert_eq!(Genre::Race.index(), 11);
    }

    #[test]
    fn parse_tags_dedupes_and_keeps_order() {
        let parsed: Vec<Platform> = parse_tags(["ds", "wiiu", "ds"]).unwrap();
        assert_eq!(parsed, vec![Platform::Ds, Platform::WiiU]);
    }

    #[test]
    fn parse_tags_reports_every_invalid_value() {
        let err = parse_tags::<Medium, _, _>(["pkg", "cartridge", "cloud"]).unwrap_err();
        assert_eq!(err.field, "medium");
        assert_eq!(err.values, vec!["cartridge".to_string(), "cloud".to_string()]);
    }

    #[test]
    fn tags_are_case_sensitive() {
        assert_eq!(Platform::from_tag("3DS"), None);
        assert_eq!(Platform::from_tag("3ds"), Some(Platform::N3ds));
    }

    #[test]
    fn response_labels() {
        assert_eq!(hardware_label(3), Some("Nintendo 3DS"));
        assert_eq!(hardware_label(0), None);
        assert_eq!(medium_label(3), Some("Virtual Console"));
        assert_eq!(medium_label(4), None);
    }
}
