//! # Playcard Player Library (playcard-player)
//!
//! Playback controller for the media card: the `MediaHandle` platform
//! abstraction, the playback state machine, the source selector, and the
//! `PlayerCard` controller that composes them.
//!
//! **Architecture:** event-driven single-owner state. The platform media
//! element pushes lifecycle notifications over a channel created when the
//! card attaches to it; the card mirrors them into its `PlaybackState`
//! and broadcasts `CardEvent`s to observers. The card never polls.

pub mod card;
pub mod fullscreen;
pub mod handle;
pub mod sim;
pub mod source;
pub mod state;

pub use card::PlayerCard;
pub use fullscreen::{FullscreenDriver, UnsupportedFullscreen};
pub use handle::{LoadFlags, MediaEvent, MediaHandle, MediaSnapshot, PlayRejected};
pub use sim::SimulatedMedia;
pub use state::{PlaybackPhase, PlaybackState};
