//! Media element abstraction
//!
//! `MediaHandle` is the narrow seam between the playback controller and
//! whatever actually plays media (a toolkit's native element, a pipeline,
//! or the simulated element in `sim`). The controller only ever drives an
//! element through this trait and only ever learns about it through
//! pushed `MediaEvent` notifications.

use playcard_common::media::MediaSource;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

/// A play request the platform refused (e.g. an autoplay policy).
///
/// Swallowed by the controller: state stays paused, no retry.
#[derive(Debug, Clone, Error)]
#[error("play request rejected by platform: {reason}")]
pub struct PlayRejected {
    pub reason: String,
}

/// Native playback flags mirrored onto the element at load time
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadFlags {
    pub autoplay: bool,
    pub muted: bool,
    pub looping: bool,
}

/// Lifecycle notifications pushed by a media element.
///
/// These are internal to the player; the controller converts them to
/// `CardEvent`s before anything reaches an observer.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Duration metadata became available for the current source
    MetadataLoaded { duration: f64 },

    /// Playback position advanced or was set
    TimeUpdate { position: f64 },

    /// The element confirmed playback started
    PlayStarted,

    /// The element confirmed playback paused
    Paused,

    /// Playback reached the end of the media
    Ended,

    /// Volume or mute state changed on the element
    VolumeChanged { volume: f64, muted: bool },
}

/// Point-in-time view of an element's playback fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaSnapshot {
    pub position: f64,
    pub duration: f64,
    pub paused: bool,
    pub volume: f64,
    pub muted: bool,
}

/// Narrow interface over a platform media element.
///
/// Implementations must deliver lifecycle notifications through the
/// sender installed by `subscribe` and must tolerate the receiving side
/// disappearing (a closed channel is not an error; the card detached).
pub trait MediaHandle {
    /// Install the notification channel. Called once, when a card
    /// attaches to this element.
    fn subscribe(&mut self, notify: UnboundedSender<MediaEvent>);

    /// Point the element at a source, resetting position and readiness.
    fn load(&mut self, source: &MediaSource, flags: LoadFlags);

    /// Request playback start. The platform may refuse.
    fn play(&mut self) -> Result<(), PlayRejected>;

    /// Pause playback. Synchronous, no failure path.
    fn pause(&mut self);

    /// Set the playback position in seconds.
    fn seek(&mut self, position: f64);

    /// Set the volume in [0.0, 1.0].
    fn set_volume(&mut self, volume: f64);

    /// Set the mute flag.
    fn set_muted(&mut self, muted: bool);

    /// Current playback fields as the element reports them.
    fn snapshot(&self) -> MediaSnapshot;
}
