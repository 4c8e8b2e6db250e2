//! `Content-Disposition` filename extraction.

/// Extract the suggested filename from a `Content-Disposition` header value.
///
/// The RFC 5987 form (`filename*=UTF-8''clip%20one.mp4`) wins over the plain
/// (`filename="clip.mp4"` or `filename=clip.mp4`) form. Values are
/// percent-decoded; an undecodable value is returned as sent.
#[must_use]
pub fn suggested_filename(header: Option<&str>) -> Option<String> {
    let header = header?;
    let mut plain = None;
    let mut extended = None;
    for param in header.split(';') {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => extended = extended.or_else(|| extended_value(value)),
            "filename" => plain = plain.or_else(|| non_empty(unquote(value))),
            _ => {}
        }
    }
    extended.or(plain).map(percent_decode)
}

fn extended_value(value: &str) -> Option<&str> {
    let value = unquote(value);
    let mut parts = value.splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if charset.is_empty() {
        return None;
    }
    non_empty(encoded)
}

fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn percent_decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_filename() {
        assert_eq!(
            suggested_filename(Some(r#"attachment; filename="clip.mp4""#)).as_deref(),
            Some("clip.mp4")
        );
    }

    #[test]
    fn unquoted_filename() {
        assert_eq!(
            suggested_filename(Some("attachment; filename=clip.mp3")).as_deref(),
            Some("clip.mp3")
        );
    }

    #[test]
    fn extended_form_is_preferred_and_decoded() {
        let header = r#"attachment; filename="fallback.mp4"; filename*=UTF-8''v%C3%ADdeo%20novo.mp4"#;
        assert_eq!(
            suggested_filename(Some(header)).as_deref(),
            Some("vídeo novo.mp4")
        );
    }

    #[test]
    fn key_match_is_case_insensitive() {
        assert_eq!(
            suggested_filename(Some("attachment; FILENAME*=utf-8''a%2Bb.mp3")).as_deref(),
            Some("a+b.mp3")
        );
    }

    #[test]
    fn undecodable_value_is_kept_raw() {
        assert_eq!(
            suggested_filename(Some("attachment; filename*=UTF-8''bad%FF.mp4")).as_deref(),
            Some("bad%FF.mp4")
        );
    }

    #[test]
    fn missing_or_empty_header_yields_none() {
        assert_eq!(suggested_filename(None), None);
        assert_eq!(suggested_filename(Some("")), None);
        assert_eq!(suggested_filename(Some("attachment")), None);
        assert_eq!(suggested_filename(Some(r#"attachment; filename="""#)), None);
    }
}
