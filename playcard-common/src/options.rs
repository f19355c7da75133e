//! Card configuration options
//!
//! Visual and playback configuration supplied by the embedding
//! application. All fields have defaults so TOML card configs only need
//! to name what they change.

use serde::{Deserialize, Serialize};

/// Color palette selection (palette only, no layout effect)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Viewport container shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "auto")]
    Auto,
}

/// Where inline controls are placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlsPosition {
    /// Fixed control panel below the viewport
    #[default]
    Bottom,
    /// Controls shown over the media while hovered or paused
    Overlay,
    /// The embedding application renders its own controls; none inline
    External,
}

/// Visual and playback configuration for one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardOptions {
    pub theme: Theme,
    pub aspect_ratio: AspectRatio,
    pub controls_position: ControlsPosition,

    /// Gates every inline control regardless of other options
    pub show_controls: bool,
    pub show_metadata: bool,
    pub show_progress: bool,

    /// Native playback flags, passed straight through to the element
    pub autoplay: bool,
    pub muted: bool,
    pub looping: bool,

    /// Poster/thumbnail shown in the viewport before playback
    pub poster: Option<String>,

    /// Render the download action button
    pub allow_download: bool,
    /// Render the share action button
    pub allow_share: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            aspect_ratio: AspectRatio::Widescreen,
            controls_position: ControlsPosition::Bottom,
            show_controls: true,
            show_metadata: true,
            show_progress: true,
            autoplay: false,
            muted: false,
            looping: false,
            poster: None,
            allow_download: false,
            allow_share: false,
        }
    }
}
