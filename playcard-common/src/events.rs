//! Observer event types for the playcard event system
//!
//! `CardEvent` is the external vocabulary a card broadcasts to its
//! observers. Internal media element lifecycle notifications live in
//! `playcard-player` and are converted to these before broadcasting.

use crate::media::Quality;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events a card emits to subscribed observers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CardEvent {
    /// Playback started (element-confirmed)
    Play { timestamp: DateTime<Utc> },

    /// Playback paused (element-confirmed)
    Pause { timestamp: DateTime<Utc> },

    /// Playback reached the end of the media
    Ended { timestamp: DateTime<Utc> },

    /// Playback position update
    TimeUpdate {
        /// Current position in seconds
        position: f64,
        /// Total duration in seconds (0.0 until metadata is known)
        duration: f64,
        timestamp: DateTime<Utc>,
    },

    /// Volume or mute state changed on the element
    VolumeChanged {
        /// Volume in [0.0, 1.0]
        volume: f64,
        timestamp: DateTime<Utc>,
    },

    /// Active quality tier changed via the quality selector
    QualityChanged {
        quality: Quality,
        timestamp: DateTime<Utc>,
    },

    /// Fullscreen was toggled (fires regardless of platform support)
    Fullscreen { timestamp: DateTime<Utc> },

    /// Download action requested
    Download { timestamp: DateTime<Utc> },

    /// Share action requested
    Share { timestamp: DateTime<Utc> },
}

impl CardEvent {
    /// Event type name, used as the event field in logs and journals
    pub fn event_type(&self) -> &'static str {
        match self {
            CardEvent::Play { .. } => "Play",
            CardEvent::Pause { .. } => "Pause",
            CardEvent::Ended { .. } => "Ended",
            CardEvent::TimeUpdate { .. } => "TimeUpdate",
            CardEvent::VolumeChanged { .. } => "VolumeChanged",
            CardEvent::QualityChanged { .. } => "QualityChanged",
            CardEvent::Fullscreen { .. } => "Fullscreen",
            CardEvent::Download { .. } => "Download",
            CardEvent::Share { .. } => "Share",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = CardEvent::QualityChanged {
            quality: Quality::Q1080,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"QualityChanged\""));
        assert!(json.contains("\"quality\":\"1080p\""));
    }

    #[test]
    fn event_type_matches_variant() {
        let event = CardEvent::TimeUpdate {
            position: 5.0,
            duration: 120.0,
            timestamp: Utc::now(),
        };
        assert_eq!(event.event_type(), "TimeUpdate");
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = CardEvent::VolumeChanged {
            volume: 0.5,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: CardEvent = serde_json::from_str(&json).unwrap();
        match back {
            CardEvent::VolumeChanged { volume, .. } => assert_eq!(volume, 0.5),
            other => panic!("expected VolumeChanged, got {other:?}"),
        }
    }
}
