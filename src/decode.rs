use crate::{ContentType, DateTimeBody, DateTimeError};

/// Extracts the datetime value from a response body.
///
/// JSON bodies must be an object (or `null`); a missing `datetime` key yields
/// an empty string, a non-string value is a decode error. Plain text bodies
/// are returned unchanged.
pub fn decode_datetime(content_type: ContentType, body: String) -> Result<String, DateTimeError> {
    match content_type {
        ContentType::Json => serde_json::from_str::<Option<DateTimeBody>>(&body)
            .map(|decoded| decoded.unwrap_or_default().datetime)
            .map_err(|err| {
                DateTimeError::Decode(format!(
                    "invalid datetime JSON: {err}; body: {}",
                    body_excerpt(&body)
                ))
            }),
        ContentType::PlainText => Ok(body),
    }
}

const BODY_EXCERPT_CHARS: usize = 256;

/// Caps a response body quoted in error messages.
pub(crate) fn body_excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_owned(),
    }
}
