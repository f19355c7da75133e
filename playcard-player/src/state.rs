//! Playback state management
//!
//! `PlaybackState` is owned exclusively by the `PlayerCard` that created
//! it and mutated only in response to media element events or explicit
//! control operations, on the thread driving the card. It is never
//! shared between instances and never persisted.

use playcard_common::media::Quality;
use serde::{Deserialize, Serialize};

/// Playback lifecycle phase
///
/// `NoSource` is the terminal display state entered when a card is
/// created with an empty source list. `Loading` is entered on attach and
/// again on every quality switch. `Ended` is terminal; with the native
/// loop flag set, the element itself cycles and never reports an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    NoSource,
    Loading,
    Ready,
    Playing,
    Paused,
    Ended,
}

impl std::fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackPhase::NoSource => write!(f, "no-source"),
            PlaybackPhase::Loading => write!(f, "loading"),
            PlaybackPhase::Ready => write!(f, "ready"),
            PlaybackPhase::Playing => write!(f, "playing"),
            PlaybackPhase::Paused => write!(f, "paused"),
            PlaybackPhase::Ended => write!(f, "ended"),
        }
    }
}

/// Per-card playback state
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub phase: PlaybackPhase,
    /// Current position in seconds, clamped to [0, duration] once the
    /// duration is known
    pub position: f64,
    /// Total duration in seconds; 0.0 until metadata arrives
    pub duration: f64,
    /// Volume in [0.0, 1.0]
    pub volume: f64,
    pub muted: bool,
    /// Quality tier of the active source; `None` only in `NoSource`
    pub quality: Option<Quality>,
    /// Pointer currently over the card (drives overlay controls)
    pub hover_controls: bool,
}

impl PlaybackState {
    /// Initial state for a card with at least one source
    pub fn loading(initial_quality: Quality, muted: bool) -> Self {
        Self {
            phase: PlaybackPhase::Loading,
            position: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted,
            quality: Some(initial_quality),
            hover_controls: false,
        }
    }

    /// Terminal display state for a card with no sources
    pub fn no_source() -> Self {
        Self {
            phase: PlaybackPhase::NoSource,
            position: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            quality: None,
            hover_controls: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    /// Metadata not yet reported for the active source
    pub fn is_loading(&self) -> bool {
        self.phase == PlaybackPhase::Loading
    }

    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Clamp a seek target against the known duration. Before metadata
    /// arrives only the lower bound applies.
    pub fn clamp_position(&self, position: f64) -> f64 {
        if self.has_duration() {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        }
    }
}
