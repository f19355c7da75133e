//! Demo card configuration
//!
//! The demo binary takes an optional TOML file describing the card to
//! host: media kind, sources, metadata, visual options, and the
//! simulated element's behavior. Missing sections fall back to defaults.

use playcard_common::media::{MediaKind, MediaMetadata, MediaSource, Quality};
use playcard_common::options::CardOptions;
use playcard_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulated element behavior for the demo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulateConfig {
    /// Duration the element reports, in seconds (0 = live stream)
    pub duration: f64,
    /// Refuse play requests, like an autoplay policy
    pub reject_play: bool,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            duration: 120.0,
            reject_play: false,
        }
    }
}

/// One card as described by a demo config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default = "default_kind")]
    pub kind: MediaKind,
    #[serde(default)]
    pub sources: Vec<MediaSource>,
    #[serde(default = "default_metadata")]
    pub metadata: MediaMetadata,
    #[serde(default)]
    pub options: CardOptions,
    #[serde(default)]
    pub simulate: SimulateConfig,
}

fn default_kind() -> MediaKind {
    MediaKind::Video
}

fn default_metadata() -> MediaMetadata {
    MediaMetadata::titled("Untitled")
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            kind: MediaKind::Video,
            sources: vec![
                MediaSource::with_quality("https://example.com/demo.mp4", Quality::Q720),
                MediaSource::with_quality("https://example.com/demo-hd.mp4", Quality::Q1080),
            ],
            metadata: MediaMetadata {
                title: "Demo clip".to_string(),
                description: Some("Simulated playback".to_string()),
                duration: Some(120.0),
                file_size: Some(50_000_000),
                resolution: Some("1920x1080".to_string()),
                bitrate: Some(5000),
                codec: Some("H.264".to_string()),
                ..MediaMetadata::default()
            },
            options: CardOptions::default(),
            simulate: SimulateConfig::default(),
        }
    }
}

impl CardConfig {
    /// Load a card config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}
