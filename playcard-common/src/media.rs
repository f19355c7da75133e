//! Media domain types shared across the workspace.

use serde::{Deserialize, Serialize};

/// Kind of media a card presents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
    Livestream,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Image => write!(f, "image"),
            MediaKind::Livestream => write!(f, "livestream"),
        }
    }
}

/// Discrete quality tier used to pick among sources.
///
/// Tiers carry no internal ordering semantics; source lists are ranked
/// only by caller-supplied order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "240p")]
    Q240,
    #[serde(rename = "360p")]
    Q360,
    #[serde(rename = "480p")]
    Q480,
    #[serde(rename = "720p")]
    Q720,
    #[serde(rename = "1080p")]
    Q1080,
    #[serde(rename = "4K")]
    Q4K,
}

impl Quality {
    /// Label as shown in quality selectors ("240p".."1080p", "4K")
    pub fn label(&self) -> &'static str {
        match self {
            Quality::Q240 => "240p",
            Quality::Q360 => "360p",
            Quality::Q480 => "480p",
            Quality::Q720 => "720p",
            Quality::Q1080 => "1080p",
            Quality::Q4K => "4K",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Quality {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "240p" => Ok(Quality::Q240),
            "360p" => Ok(Quality::Q360),
            "480p" => Ok(Quality::Q480),
            "720p" => Ok(Quality::Q720),
            "1080p" => Ok(Quality::Q1080),
            "4K" | "4k" => Ok(Quality::Q4K),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown quality tier: {other}"
            ))),
        }
    }
}

/// One candidate media file/URL at a given quality tier.
///
/// Immutable caller data; the card never reorders or rewrites sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl MediaSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            quality: None,
            mime_type: None,
        }
    }

    pub fn with_quality(url: impl Into<String>, quality: Quality) -> Self {
        Self {
            url: url.into(),
            quality: Some(quality),
            mime_type: None,
        }
    }
}

/// Read-only display metadata for a card.
///
/// Every field except `title` is independently optional; absence omits
/// the corresponding display line and is never an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// File size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Bitrate in kbps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl MediaMetadata {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
