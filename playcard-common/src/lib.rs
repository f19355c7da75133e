//! # Playcard Common Library
//!
//! Shared code for the playcard workspace including:
//! - Media domain types (kind, quality, sources, metadata)
//! - Card observer event types (CardEvent enum)
//! - Card configuration options
//! - Display formatting helpers

pub mod error;
pub mod events;
pub mod format;
pub mod media;
pub mod options;

pub use error::{Error, Result};
pub use events::CardEvent;
pub use media::{MediaKind, MediaMetadata, MediaSource, Quality};
pub use options::{AspectRatio, CardOptions, ControlsPosition, Theme};
