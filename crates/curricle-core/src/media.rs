use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CurricleError, Result};

/// Broad media category used for upload validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaClass {
    Video,
    Image,
    Document,
}

impl MediaClass {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Document => "document",
        }
    }

    /// Classify a MIME type, or `None` when the type is not accepted
    /// for upload at all. Video and image types classify by their
    /// top-level family; documents are a fixed set.
    pub fn from_mime(mime: &str) -> Option<Self> {
        if mime.starts_with("video/") {
            return Some(Self::Video);
        }
        if mime.starts_with("image/") {
            return Some(Self::Image);
        }
        match mime {
            "application/pdf"
            | "application/zip"
            | "text/plain"
            | "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Document)
            }
            _ => None,
        }
    }
}

impl fmt::Display for MediaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A local file staged for upload.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// File name sent to the platform (e.g. `intro.mp4`).
    pub file_name: String,

    /// MIME type declared for the file.
    pub mime_type: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,

    /// Playback length, when known ahead of upload. Only meaningful
    /// for video files.
    pub duration: Option<MediaDuration>,
}

impl MediaFile {
    /// Stage a file from in-memory bytes.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
            duration: None,
        }
    }

    /// Stage a file from disk. The MIME type is declared by the
    /// caller; it is not sniffed from the contents.
    pub fn from_path(path: impl AsRef<Path>, mime_type: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| CurricleError::UploadRejected(format!("Failed to read file: {}", e)))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        Ok(Self {
            file_name,
            mime_type: mime_type.into(),
            bytes,
            duration: None,
        })
    }

    /// Attach a known playback length.
    pub fn with_duration(mut self, duration: MediaDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Size of the file in bytes.
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Media class, or `None` for MIME types that are never accepted.
    pub fn class(&self) -> Option<MediaClass> {
        MediaClass::from_mime(&self.mime_type)
    }
}

/// Result of a successful media upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// URL where the platform serves the file.
    pub url: String,

    /// File name as uploaded.
    pub file_name: String,

    /// Playback length carried over from the staged file.
    pub duration: Option<MediaDuration>,
}

/// Playback length, formatted as `m:ss` or `h:mm:ss` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaDuration {
    total_seconds: u32,
}

impl MediaDuration {
    /// Build from a total length in seconds.
    pub fn from_seconds(total_seconds: u32) -> Self {
        Self { total_seconds }
    }

    /// Build from minutes and seconds. Seconds over 59 carry into
    /// minutes.
    pub fn from_minutes_seconds(minutes: u32, seconds: u32) -> Self {
        Self {
            total_seconds: minutes * 60 + seconds,
        }
    }

    /// Total length in seconds.
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }
}

impl fmt::Display for MediaDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.total_seconds / 3600;
        let minutes = (self.total_seconds % 3600) / 60;
        let seconds = self.total_seconds % 60;

        if hours > 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            write!(f, "{}:{:02}", minutes, seconds)
        }
    }
}

impl FromStr for MediaDuration {
    type Err = CurricleError;

    fn from_str(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(':').collect();

        let invalid = || CurricleError::Serialization(format!("Invalid duration: {}", input));
        let parse_part = |p: &str| -> Result<u32> {
            p.parse::<u32>().map_err(|_| {
                CurricleError::Serialization(format!("Invalid duration segment: {}", p))
            })
        };

        match parts.as_slice() {
            [m, s] => {
                let seconds = parse_part(s)?;
                if seconds > 59 {
                    return Err(invalid());
                }
                let total = parse_part(m)?
                    .checked_mul(60)
                    .and_then(|t| t.checked_add(seconds))
                    .ok_or_else(invalid)?;
                Ok(Self::from_seconds(total))
            }
            [h, m, s] => {
                let (minutes, seconds) = (parse_part(m)?, parse_part(s)?);
                if minutes > 59 || seconds > 59 {
                    return Err(invalid());
                }
                // minutes and seconds are bounded here; only the hour
                // term can overflow.
                let total = parse_part(h)?
                    .checked_mul(3600)
                    .and_then(|t| t.checked_add(minutes * 60 + seconds))
                    .ok_or_else(invalid)?;
                Ok(Self::from_seconds(total))
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for MediaDuration {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MediaDuration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
