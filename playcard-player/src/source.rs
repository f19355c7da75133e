//! Media source selection
//!
//! Resolves the active source from the caller-supplied source list.
//! Source order is the caller's ranking; there is no internal quality
//! comparator.

use playcard_common::media::{MediaSource, Quality};

/// Quality assumed when the first source carries no tier label
pub const DEFAULT_QUALITY: Quality = Quality::Q720;

/// Resolve the active source for a quality tier: the first source whose
/// quality matches, else the first source. `None` only for an empty list.
pub fn resolve_source(sources: &[MediaSource], quality: Option<Quality>) -> Option<&MediaSource> {
    quality
        .and_then(|q| sources.iter().find(|s| s.quality == Some(q)))
        .or_else(|| sources.first())
}

/// Find the source carrying exactly this tier, if any. Quality switching
/// is a no-op when the requested tier has no source.
pub fn source_for_quality(sources: &[MediaSource], quality: Quality) -> Option<&MediaSource> {
    sources.iter().find(|s| s.quality == Some(quality))
}

/// Initial quality for a card: the first source's tier, or
/// `DEFAULT_QUALITY` when the first source is unlabeled. `None` only for
/// an empty list.
pub fn initial_quality(sources: &[MediaSource]) -> Option<Quality> {
    sources
        .first()
        .map(|s| s.quality.unwrap_or(DEFAULT_QUALITY))
}
