//! Simulated media element
//!
//! A deterministic, clock-driven `MediaHandle` implementation used by
//! the test suites and the demo binary. It models the observable
//! behavior of a native element: metadata arrives on the first tick
//! after a load, time advances only while playing, the native loop flag
//! wraps playback without ever reporting an end, and a rejected play
//! request leaves the element paused.

use playcard_common::media::MediaSource;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::handle::{LoadFlags, MediaEvent, MediaHandle, MediaSnapshot, PlayRejected};

/// Clock-driven stand-in for a platform media element
#[derive(Debug)]
pub struct SimulatedMedia {
    src: Option<String>,
    /// Duration reported for every loaded source; 0.0 models a live
    /// stream that never reports an end
    duration: f64,
    position: f64,
    paused: bool,
    ended: bool,
    volume: f64,
    muted: bool,
    looping: bool,
    autoplay: bool,
    loaded: bool,
    reject_play: bool,
    notify: Option<UnboundedSender<MediaEvent>>,
}

impl SimulatedMedia {
    pub fn new(duration: f64) -> Self {
        Self {
            src: None,
            duration,
            position: 0.0,
            paused: true,
            ended: false,
            volume: 1.0,
            muted: false,
            looping: false,
            autoplay: false,
            loaded: false,
            reject_play: false,
            notify: None,
        }
    }

    /// Refuse every play request, like an autoplay policy would.
    pub fn with_rejected_play(mut self) -> Self {
        self.reject_play = true;
        self
    }

    pub fn current_src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    /// Advance the element clock by `dt` seconds.
    ///
    /// The first tick after a load delivers metadata (and starts
    /// playback when the load asked for autoplay). Subsequent ticks
    /// advance the position while playing, wrapping on the loop flag or
    /// stopping at the end otherwise.
    pub fn tick(&mut self, dt: f64) {
        if self.src.is_none() {
            return;
        }
        if !self.loaded {
            self.loaded = true;
            self.emit(MediaEvent::MetadataLoaded {
                duration: self.duration,
            });
            if self.autoplay && !self.reject_play {
                self.paused = false;
                self.emit(MediaEvent::PlayStarted);
            }
            return;
        }
        if self.paused || dt <= 0.0 {
            return;
        }

        self.position += dt;
        if self.duration > 0.0 && self.position >= self.duration {
            if self.looping {
                self.position %= self.duration;
                self.emit(MediaEvent::TimeUpdate {
                    position: self.position,
                });
            } else {
                self.position = self.duration;
                self.paused = true;
                self.ended = true;
                self.emit(MediaEvent::TimeUpdate {
                    position: self.position,
                });
                self.emit(MediaEvent::Ended);
            }
        } else {
            self.emit(MediaEvent::TimeUpdate {
                position: self.position,
            });
        }
    }

    fn emit(&self, event: MediaEvent) {
        // A closed channel means the card detached; nothing to notify.
        if let Some(notify) = &self.notify {
            let _ = notify.send(event);
        }
    }
}

impl MediaHandle for SimulatedMedia {
    fn subscribe(&mut self, notify: UnboundedSender<MediaEvent>) {
        self.notify = Some(notify);
    }

    fn load(&mut self, source: &MediaSource, flags: LoadFlags) {
        debug!(url = %source.url, "simulated element loading source");
        self.src = Some(source.url.clone());
        self.position = 0.0;
        self.paused = true;
        self.ended = false;
        self.loaded = false;
        self.muted = flags.muted;
        self.looping = flags.looping;
        self.autoplay = flags.autoplay;
    }

    fn play(&mut self) -> Result<(), PlayRejected> {
        if self.reject_play {
            return Err(PlayRejected {
                reason: "autoplay policy".to_string(),
            });
        }
        if self.ended {
            // Elements restart from the top when played after the end
            self.position = 0.0;
            self.ended = false;
        }
        if self.paused {
            self.paused = false;
            self.emit(MediaEvent::PlayStarted);
        }
        Ok(())
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.emit(MediaEvent::Paused);
        }
    }

    fn seek(&mut self, position: f64) {
        self.position = if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        };
        if self.position < self.duration {
            self.ended = false;
        }
        self.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
        self.emit(MediaEvent::VolumeChanged {
            volume: self.volume,
            muted: self.muted,
        });
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.emit(MediaEvent::VolumeChanged {
            volume: self.volume,
            muted: self.muted,
        });
    }

    fn snapshot(&self) -> MediaSnapshot {
        MediaSnapshot {
            position: self.position,
            duration: self.duration,
            paused: self.paused,
            volume: self.volume,
            muted: self.muted,
        }
    }
}
