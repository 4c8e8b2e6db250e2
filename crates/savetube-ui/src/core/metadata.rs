//! Video details shown in the preview dialog before a download is chosen.
//!
//! # Design
//! - The backend answers `GET {api}/metadata?url=...` with `{ title, thumbnail, duration }`.
//! - Every field is optional on the wire; blanks are normalised to `None` here.

use serde::Deserialize;

/// Title, thumbnail and length of the linked video.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaMetadata {
    /// Video title; empty when the backend did not know it.
    pub title: String,
    /// Thumbnail image URL; empty when absent.
    pub thumbnail: String,
    /// Length in seconds; `0` when unknown.
    pub duration: f64,
}

impl MediaMetadata {
    /// Decode a `/metadata` success body.
    ///
    /// # Errors
    /// Returns the JSON error when the body is not a JSON object.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Trimmed title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        Some(self.title.trim()).filter(|title| !title.is_empty())
    }

    /// Thumbnail URL, if any.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        Some(self.thumbnail.trim()).filter(|url| !url.is_empty())
    }

    /// `m:ss` or `h:mm:ss`, when the length is known.
    #[must_use]
    pub fn duration_label(&self) -> Option<String> {
        format_duration(self.duration)
    }
}

/// Format a length in seconds as `m:ss` or `h:mm:ss`; `None` for zero or invalid input.
#[must_use]
pub fn format_duration(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds < 1.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds.round() as u64;
    let (hours, minutes, secs) = (total / 3600, (total / 60) % 60, total % 60);
    Some(if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_fields_are_optional() {
        let meta = MediaMetadata::from_body(br#"{"title": "Clip"}"#).ok();
        assert_eq!(meta.as_ref().and_then(MediaMetadata::title), Some("Clip"));
        assert_eq!(meta.as_ref().and_then(MediaMetadata::thumbnail), None);
        assert_eq!(meta.and_then(|m| m.duration_label()), None);
    }

    #[test]
    fn blank_title_reads_as_missing() {
        let meta = MediaMetadata {
            title: "   ".into(),
            thumbnail: "https://i.ytimg.com/vi/x/hq.jpg".into(),
            duration: 0.0,
        };
        assert_eq!(meta.title(), None);
        assert_eq!(meta.thumbnail(), Some("https://i.ytimg.com/vi/x/hq.jpg"));
    }

    #[test]
    fn durations_switch_to_hours_past_sixty_minutes() {
        assert_eq!(format_duration(0.0), None);
        assert_eq!(format_duration(f64::NAN), None);
        assert_eq!(format_duration(7.0).as_deref(), Some("0:07"));
        assert_eq!(format_duration(187.4).as_deref(), Some("3:07"));
        assert_eq!(format_duration(3723.0).as_deref(), Some("1:02:03"));
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(MediaMetadata::from_body(b"<html>").is_err());
    }
}
