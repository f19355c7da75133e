//! Fullscreen capability
//!
//! Ambient platform fullscreen state (the document-level fullscreen API
//! on the web, a window manager elsewhere) is reached through this
//! capability trait so the controller stays testable without a real
//! rendering surface. Platforms without fullscreen support inject
//! `UnsupportedFullscreen`, which no-ops.

/// Platform fullscreen control
pub trait FullscreenDriver {
    /// Ask the platform to enter fullscreen for the card's element.
    fn request(&mut self);

    /// Ask the platform to leave fullscreen.
    fn exit(&mut self);

    /// Whether the platform currently reports fullscreen as active.
    fn is_active(&self) -> bool;
}

/// Driver for platforms with no fullscreen API: requests are silently
/// ignored and fullscreen is never active.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedFullscreen;

impl FullscreenDriver for UnsupportedFullscreen {
    fn request(&mut self) {}

    fn exit(&mut self) {}

    fn is_active(&self) -> bool {
        false
    }
}
