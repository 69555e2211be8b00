//! Artwork records: the raw wire shape and the normalized row.

use serde::Deserialize;

/// Default text for missing title, place of origin, or artist.
pub const UNKNOWN: &str = "Unknown";

/// Default text for missing inscriptions.
pub const NOT_AVAILABLE: &str = "N/A";

/// A single artwork item as it appears in the API's `data` array.
///
/// Only the consumed fields are listed; everything else in the payload is
/// ignored. Every field is optional on the wire and may also be `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtwork {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub place_of_origin: Option<String>,
    pub artist_display: Option<String>,
    pub inscriptions: Option<String>,
    pub date_start: Option<i64>,
    pub date_end: Option<i64>,
}

/// A normalized artwork row.
///
/// Every field is always present: missing, null, empty-string, or zero source
/// values are replaced by the field's default during normalization. The `id`
/// is the source record's own identifier (0 when the source omits it) and is
/// the stable key for selection identity.
///
/// # Example
///
/// ```
/// use artworks_lib::model::{ArtworkRow, RawArtwork};
///
/// let row = ArtworkRow::from(RawArtwork {
///     title: Some("Starry Night".to_string()),
///     ..Default::default()
/// });
///
/// assert_eq!(row.title, "Starry Night");
/// assert_eq!(row.artist_display, "Unknown");
/// assert_eq!(row.inscriptions, "N/A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkRow {
    /// Stable source identifier, used as the selection key.
    pub id: u64,
    pub title: String,
    pub place_of_origin: String,
    pub artist_display: String,
    pub inscriptions: String,
    pub date_start: i64,
    pub date_end: i64,
}

/// Substitutes `default` for a missing, null, or empty-string text field.
fn text_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}

impl From<RawArtwork> for ArtworkRow {
    fn from(raw: RawArtwork) -> Self {
        Self {
            id: raw.id.unwrap_or(0),
            title: text_or(raw.title, UNKNOWN),
            place_of_origin: text_or(raw.place_of_origin, UNKNOWN),
            artist_display: text_or(raw.artist_display, UNKNOWN),
            inscriptions: text_or(raw.inscriptions, NOT_AVAILABLE),
            // A zero date and an absent date both normalize to 0.
            date_start: raw.date_start.unwrap_or(0),
            date_end: raw.date_end.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_fields_get_defaults() {
        let row = ArtworkRow::from(RawArtwork::default());

        assert_eq!(row.id, 0);
        assert_eq!(row.title, "Unknown");
        assert_eq!(row.place_of_origin, "Unknown");
        assert_eq!(row.artist_display, "Unknown");
        assert_eq!(row.inscriptions, "N/A");
        assert_eq!(row.date_start, 0);
        assert_eq!(row.date_end, 0);
    }

    #[test]
    fn test_empty_string_is_treated_as_missing() {
        let row = ArtworkRow::from(RawArtwork {
            title: Some(String::new()),
            artist_display: Some(String::new()),
            inscriptions: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(row.title, "Unknown");
        assert_eq!(row.artist_display, "Unknown");
        assert_eq!(row.inscriptions, "N/A");
    }

    #[test]
    fn test_null_fields_parse_and_get_defaults() {
        let raw: RawArtwork = serde_json::from_str(
            r#"{"id": null, "title": null, "inscriptions": null, "date_start": null}"#,
        )
        .unwrap();
        let row = ArtworkRow::from(raw);

        assert_eq!(row.title, "Unknown");
        assert_eq!(row.inscriptions, "N/A");
        assert_eq!(row.date_start, 0);
    }

    #[test]
    fn test_present_values_pass_through_unchanged() {
        let row = ArtworkRow::from(RawArtwork {
            id: Some(27992),
            title: Some("A Sunday on La Grande Jatte".to_string()),
            place_of_origin: Some("France".to_string()),
            artist_display: Some("Georges Seurat".to_string()),
            inscriptions: Some("signed".to_string()),
            date_start: Some(1884),
            date_end: Some(1886),
        });

        assert_eq!(row.id, 27992);
        assert_eq!(row.title, "A Sunday on La Grande Jatte");
        assert_eq!(row.place_of_origin, "France");
        assert_eq!(row.artist_display, "Georges Seurat");
        assert_eq!(row.inscriptions, "signed");
        assert_eq!(row.date_start, 1884);
        assert_eq!(row.date_end, 1886);
    }

    #[test]
    fn test_zero_dates_are_indistinguishable_from_absent() {
        let row = ArtworkRow::from(RawArtwork {
            date_start: Some(0),
            date_end: Some(0),
            ..Default::default()
        });

        assert_eq!(row.date_start, 0);
        assert_eq!(row.date_end, 0);
    }
}
