use std::fmt;
use std::str::FromStr;

use crate::DateTimeError;

/// Response representation negotiated through the `Accept` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/json`, body shaped as `{"datetime": "<value>"}`.
    Json,
    /// `text/plain`, body is the datetime value itself.
    PlainText,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [ContentType::Json, ContentType::PlainText];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = DateTimeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "application/json" => Ok(Self::Json),
            "text/plain" => Ok(Self::PlainText),
            other => Err(DateTimeError::UnsupportedContentType(other.to_owned())),
        }
    }
}
