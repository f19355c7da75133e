//! # Playcard TUI (playcard-tui)
//!
//! Terminal control surface for the media playback card.
//!
//! **Purpose:** render a card (viewport, controls, metadata) from the
//! controller's state, map pointer positions back to control actions,
//! and host the demo binary that drives a `PlayerCard` over a simulated
//! media element.
//!
//! The surface is pure rendering: it reads `PlaybackState` +
//! `MediaMetadata` + sources + options and draws; every interactive
//! region dispatches exactly one controller operation through the
//! returned `SurfaceLayout`.

pub mod config;
pub mod surface;
pub mod theme;

pub use config::CardConfig;
pub use surface::{CardView, ControlAction, SurfaceLayout};
pub use theme::Palette;
