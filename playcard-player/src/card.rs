//! Media playback card controller
//!
//! `PlayerCard` composes the source selector, the playback state machine
//! and a `MediaHandle` into the public component. It owns its
//! `PlaybackState` exclusively: every mutation happens on the thread
//! driving the card, in response to a pushed media element event or an
//! explicit control operation.

use chrono::Utc;
use playcard_common::events::CardEvent;
use playcard_common::media::{MediaKind, MediaMetadata, MediaSource, Quality};
use playcard_common::options::CardOptions;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::fullscreen::{FullscreenDriver, UnsupportedFullscreen};
use crate::handle::{LoadFlags, MediaEvent, MediaHandle};
use crate::source;
use crate::state::{PlaybackPhase, PlaybackState};

/// Position and play state captured before a quality switch, restored
/// once the new source reports metadata.
#[derive(Debug, Clone, Copy)]
struct PendingSwitch {
    position: f64,
    resume: bool,
}

/// The media playback card controller
pub struct PlayerCard<H: MediaHandle> {
    kind: MediaKind,
    sources: Vec<MediaSource>,
    metadata: MediaMetadata,
    options: CardOptions,
    state: PlaybackState,
    handle: H,
    media_rx: Option<mpsc::UnboundedReceiver<MediaEvent>>,
    event_tx: broadcast::Sender<CardEvent>,
    fullscreen: Box<dyn FullscreenDriver>,
    pending_switch: Option<PendingSwitch>,
}

impl<H: MediaHandle> PlayerCard<H> {
    /// Create a card and attach it to a media element.
    ///
    /// With at least one source, the element is subscribed and pointed at
    /// the initial source (first source's quality tier, 720p when the
    /// first source is unlabeled) and the card enters `Loading`. With an
    /// empty source list the card enters the `NoSource` terminal display
    /// state: nothing is loaded and every control operation is ignored.
    pub fn new(
        kind: MediaKind,
        sources: Vec<MediaSource>,
        metadata: MediaMetadata,
        options: CardOptions,
        mut handle: H,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(64);

        let (state, media_rx) = match source::initial_quality(&sources) {
            Some(quality) => {
                let (tx, rx) = mpsc::unbounded_channel();
                handle.subscribe(tx);
                if let Some(active) = source::resolve_source(&sources, Some(quality)) {
                    let flags = LoadFlags {
                        autoplay: options.autoplay,
                        muted: options.muted,
                        looping: options.looping,
                    };
                    info!(url = %active.url, %quality, "loading initial source");
                    handle.load(active, flags);
                }
                (PlaybackState::loading(quality, options.muted), Some(rx))
            }
            None => {
                warn!(title = %metadata.title, "card created with no media sources");
                (PlaybackState::no_source(), None)
            }
        };

        Self {
            kind,
            sources,
            metadata,
            options,
            state,
            handle,
            media_rx,
            event_tx,
            fullscreen: Box::new(UnsupportedFullscreen),
            pending_switch: None,
        }
    }

    /// Inject a platform fullscreen capability (defaults to unsupported).
    pub fn with_fullscreen(mut self, driver: impl FullscreenDriver + 'static) -> Self {
        self.fullscreen = Box::new(driver);
        self
    }

    /// Subscribe to the card's observer event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CardEvent> {
        self.event_tx.subscribe()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn sources(&self) -> &[MediaSource] {
        &self.sources
    }

    pub fn metadata(&self) -> &MediaMetadata {
        &self.metadata
    }

    pub fn options(&self) -> &CardOptions {
        &self.options
    }

    /// Access the underlying element, e.g. for the host loop driving a
    /// simulated element's clock.
    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    /// Drain and apply all pending media element notifications.
    ///
    /// Call after the element may have produced events (each host tick).
    pub fn pump(&mut self) {
        loop {
            let event = match self.media_rx.as_mut() {
                Some(rx) => match rx.try_recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
                None => break,
            };
            self.apply(event);
        }
    }

    /// Toggle between play and pause.
    ///
    /// A play request the platform rejects is swallowed: the state stays
    /// paused and no event fires. `Play`/`Pause` observer events are
    /// emitted only once the element confirms the transition.
    pub fn toggle_play(&mut self) {
        if self.inert() {
            return;
        }
        if self.state.is_playing() {
            self.handle.pause();
        } else if let Err(rejected) = self.handle.play() {
            debug!(error = %rejected, "play request rejected");
        }
    }

    /// Seek to a position in seconds, clamped to [0, duration].
    ///
    /// The state's position updates synchronously so the progress bar
    /// reflects the intent immediately; the element's echoing time
    /// notification is idempotent.
    pub fn seek(&mut self, position: f64) {
        if self.inert() {
            return;
        }
        let target = self.state.clamp_position(position);
        self.handle.seek(target);
        self.state.position = target;
    }

    /// Set the element volume, clamped to [0.0, 1.0].
    ///
    /// The state mirrors the element's volume-changed notification, not
    /// the request; unmuting is implicit only through that notification.
    pub fn set_volume(&mut self, volume: f64) {
        if self.inert() {
            return;
        }
        self.handle.set_volume(volume.clamp(0.0, 1.0));
    }

    /// Flip the element's mute flag. The state mirrors whatever the
    /// element subsequently reports.
    pub fn toggle_mute(&mut self) {
        if self.inert() {
            return;
        }
        let muted = self.state.muted;
        self.handle.set_muted(!muted);
    }

    /// Switch to the source carrying exactly `quality`, preserving
    /// playback position and play/pause state across the swap.
    ///
    /// No-op when no source carries the requested tier or when it is
    /// already active.
    pub fn select_quality(&mut self, quality: Quality) {
        if self.inert() {
            return;
        }
        if self.state.quality == Some(quality) {
            return;
        }
        let Some(next) = source::source_for_quality(&self.sources, quality).cloned() else {
            debug!(%quality, "no source for requested quality");
            return;
        };

        self.pending_switch = Some(PendingSwitch {
            position: self.state.position,
            resume: self.state.is_playing(),
        });
        self.state.quality = Some(quality);
        self.state.phase = PlaybackPhase::Loading;
        info!(%quality, url = %next.url, "switching quality");
        self.emit(CardEvent::QualityChanged {
            quality,
            timestamp: Utc::now(),
        });

        // Resume is driven by the captured state, not the autoplay flag
        let flags = LoadFlags {
            autoplay: false,
            muted: self.state.muted,
            looping: self.options.looping,
        };
        self.handle.load(&next, flags);
    }

    /// Toggle platform fullscreen. A no-op on platforms without support,
    /// but the `Fullscreen` observer event fires regardless.
    pub fn toggle_fullscreen(&mut self) {
        if self.inert() {
            return;
        }
        if self.fullscreen.is_active() {
            self.fullscreen.exit();
        } else {
            self.fullscreen.request();
        }
        self.emit(CardEvent::Fullscreen {
            timestamp: Utc::now(),
        });
    }

    /// Enter platform fullscreen (no-op without support; the observer
    /// event fires regardless).
    pub fn request_fullscreen(&mut self) {
        if self.inert() {
            return;
        }
        self.fullscreen.request();
        self.emit(CardEvent::Fullscreen {
            timestamp: Utc::now(),
        });
    }

    /// Leave platform fullscreen (no-op without support; the observer
    /// event fires regardless).
    pub fn exit_fullscreen(&mut self) {
        if self.inert() {
            return;
        }
        self.fullscreen.exit();
        self.emit(CardEvent::Fullscreen {
            timestamp: Utc::now(),
        });
    }

    /// Notify observers that a download was requested.
    pub fn download(&mut self) {
        if self.inert() {
            return;
        }
        self.emit(CardEvent::Download {
            timestamp: Utc::now(),
        });
    }

    /// Notify observers that a share was requested.
    pub fn share(&mut self) {
        if self.inert() {
            return;
        }
        self.emit(CardEvent::Share {
            timestamp: Utc::now(),
        });
    }

    /// Track pointer presence over the card (drives overlay controls).
    pub fn set_hover(&mut self, hovering: bool) {
        self.state.hover_controls = hovering;
    }

    /// Controls are disabled for the lifetime of a no-source card.
    fn inert(&self) -> bool {
        if self.state.phase == PlaybackPhase::NoSource {
            debug!("ignoring control operation: no media source");
            true
        } else {
            false
        }
    }

    /// Mirror one element notification into state and notify observers.
    fn apply(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::MetadataLoaded { duration } => {
                self.state.duration = duration;
                self.state.position = self.state.clamp_position(self.state.position);
                if self.state.phase == PlaybackPhase::Loading {
                    self.state.phase = PlaybackPhase::Ready;
                }
                debug!(duration, "media metadata loaded");
                if let Some(switch) = self.pending_switch.take() {
                    let target = self.state.clamp_position(switch.position);
                    self.handle.seek(target);
                    self.state.position = target;
                    if switch.resume {
                        if let Err(rejected) = self.handle.play() {
                            debug!(error = %rejected, "resume after quality switch rejected");
                        }
                    }
                }
            }
            MediaEvent::TimeUpdate { position } => {
                self.state.position = self.state.clamp_position(position);
                self.emit(CardEvent::TimeUpdate {
                    position: self.state.position,
                    duration: self.state.duration,
                    timestamp: Utc::now(),
                });
            }
            MediaEvent::PlayStarted => {
                self.state.phase = PlaybackPhase::Playing;
                info!("playback started");
                self.emit(CardEvent::Play {
                    timestamp: Utc::now(),
                });
            }
            MediaEvent::Paused => {
                // A pause reported after the end does not leave Ended
                if self.state.phase != PlaybackPhase::Ended {
                    self.state.phase = PlaybackPhase::Paused;
                    info!("playback paused");
                    self.emit(CardEvent::Pause {
                        timestamp: Utc::now(),
                    });
                }
            }
            MediaEvent::Ended => {
                self.state.phase = PlaybackPhase::Ended;
                if self.state.has_duration() {
                    self.state.position = self.state.duration;
                }
                info!("playback ended");
                self.emit(CardEvent::Ended {
                    timestamp: Utc::now(),
                });
            }
            MediaEvent::VolumeChanged { volume, muted } => {
                self.state.volume = volume.clamp(0.0, 1.0);
                self.state.muted = muted;
                self.emit(CardEvent::VolumeChanged {
                    volume: self.state.volume,
                    timestamp: Utc::now(),
                });
            }
        }
    }

    /// Broadcast an observer event. Send errors are ignored (no
    /// subscribers is fine).
    fn emit(&self, event: CardEvent) {
        let _ = self.event_tx.send(event);
    }
}

impl<H: MediaHandle> Drop for PlayerCard<H> {
    fn drop(&mut self) {
        // Leave the element quiet; the notification channel closes with
        // the card, so nothing fires against a disposed state container.
        if self.state.is_playing() {
            self.handle.pause();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fullscreen::testing::RecordingFullscreen;
    use crate::sim::SimulatedMedia;

    fn sources() -> Vec<MediaSource> {
        vec![
            MediaSource::with_quality("a.mp4", Quality::Q720),
            MediaSource::with_quality("b.mp4", Quality::Q1080),
        ]
    }

    fn video_card(options: CardOptions) -> PlayerCard<SimulatedMedia> {
        PlayerCard::new(
            MediaKind::Video,
            sources(),
            MediaMetadata::titled("T"),
            options,
            SimulatedMedia::new(120.0),
        )
    }

    fn drain(rx: &mut broadcast::Receiver<CardEvent>) -> Vec<&'static str> {
        let mut names = Vec::new();
        while let Ok(event) = rx.try_recv() {
            names.push(event.event_type());
        }
        names
    }

    #[test]
    fn attaches_in_loading_with_first_source_quality() {
        let card = video_card(CardOptions::default());
        assert_eq!(card.state().phase, PlaybackPhase::Loading);
        assert_eq!(card.state().quality, Some(Quality::Q720));
        assert_eq!(card.state().volume, 1.0);
        assert!(!card.state().muted);
    }

    #[test]
    fn empty_sources_is_terminal_and_inert() {
        let mut card = PlayerCard::new(
            MediaKind::Video,
            Vec::new(),
            MediaMetadata::titled("T"),
            CardOptions::default(),
            SimulatedMedia::new(120.0),
        );
        let mut rx = card.subscribe();

        assert_eq!(card.state().phase, PlaybackPhase::NoSource);
        card.toggle_play();
        card.seek(10.0);
        card.set_volume(0.5);
        card.select_quality(Quality::Q1080);
        card.pump();

        assert_eq!(card.state().phase, PlaybackPhase::NoSource);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn metadata_moves_loading_to_ready() {
        let mut card = video_card(CardOptions::default());
        card.handle_mut().tick(0.0);
        card.pump();
        assert_eq!(card.state().phase, PlaybackPhase::Ready);
        assert_eq!(card.state().duration, 120.0);
        assert!(!card.state().is_loading());
    }

    #[test]
    fn play_events_fire_only_on_confirmation() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        card.toggle_play();
        // Not yet pumped: the element confirmed but the card hasn't
        // mirrored it, so observers have heard nothing.
        assert!(drain(&mut rx).is_empty());
        card.pump();
        assert_eq!(drain(&mut rx), vec!["Play"]);
        assert!(card.state().is_playing());
    }

    #[test]
    fn double_toggle_returns_to_paused() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        card.toggle_play();
        card.pump();
        card.toggle_play();
        card.pump();

        assert_eq!(card.state().phase, PlaybackPhase::Paused);
        assert_eq!(drain(&mut rx), vec!["Play", "Pause"]);
    }

    #[test]
    fn rejected_play_is_swallowed() {
        let mut card = PlayerCard::new(
            MediaKind::Video,
            sources(),
            MediaMetadata::titled("T"),
            CardOptions::default(),
            SimulatedMedia::new(120.0).with_rejected_play(),
        );
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        card.toggle_play();
        card.pump();

        assert!(!card.state().is_playing());
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn seek_updates_position_synchronously_and_clamps() {
        let mut card = video_card(CardOptions::default());
        card.handle_mut().tick(0.0);
        card.pump();

        card.seek(60.0);
        assert_eq!(card.state().position, 60.0);

        card.seek(500.0);
        assert_eq!(card.state().position, 120.0);

        card.seek(-3.0);
        assert_eq!(card.state().position, 0.0);
    }

    #[test]
    fn volume_mirrors_element_notification() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        card.set_volume(1.5);
        // State unchanged until the element reports back
        assert_eq!(card.state().volume, 1.0);
        card.pump();
        assert_eq!(card.state().volume, 1.0); // clamped request
        card.set_volume(0.3);
        card.pump();
        assert_eq!(card.state().volume, 0.3);
        assert!(drain(&mut rx).contains(&"VolumeChanged"));
    }

    #[test]
    fn mute_mirrors_element_state() {
        let mut card = video_card(CardOptions::default());
        card.handle_mut().tick(0.0);
        card.pump();

        card.toggle_mute();
        card.pump();
        assert!(card.state().muted);
        card.toggle_mute();
        card.pump();
        assert!(!card.state().muted);
    }

    #[test]
    fn initial_mute_option_is_applied() {
        let card = video_card(CardOptions {
            muted: true,
            ..CardOptions::default()
        });
        assert!(card.state().muted);
    }

    #[test]
    fn quality_switch_preserves_position_and_resumes() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();
        card.toggle_play();
        card.pump();
        card.handle_mut().tick(5.0);
        card.pump();
        assert_eq!(card.state().position, 5.0);

        card.select_quality(Quality::Q1080);
        assert_eq!(card.state().phase, PlaybackPhase::Loading);
        assert_eq!(card.state().quality, Some(Quality::Q1080));

        // New source reports metadata on the next element tick
        card.handle_mut().tick(0.0);
        card.pump();

        assert_eq!(card.state().position, 5.0);
        assert!(card.state().is_playing());
        let names = drain(&mut rx);
        assert!(names.contains(&"QualityChanged"));

        let snapshot = card.handle_mut().snapshot();
        assert_eq!(snapshot.position, 5.0);
        assert!(!snapshot.paused);
    }

    #[test]
    fn quality_switch_stays_paused_when_it_was_paused() {
        let mut card = video_card(CardOptions::default());
        card.handle_mut().tick(0.0);
        card.pump();
        card.seek(30.0);

        card.select_quality(Quality::Q1080);
        card.handle_mut().tick(0.0);
        card.pump();

        assert_eq!(card.state().position, 30.0);
        assert!(!card.state().is_playing());
    }

    #[test]
    fn quality_switch_without_matching_source_is_noop() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        card.select_quality(Quality::Q240);
        card.pump();

        assert_eq!(card.state().quality, Some(Quality::Q720));
        assert_eq!(card.state().phase, PlaybackPhase::Ready);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn reselecting_active_quality_is_noop() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        card.select_quality(Quality::Q720);
        card.pump();

        assert_eq!(card.state().phase, PlaybackPhase::Ready);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn playback_runs_to_ended() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();
        card.toggle_play();
        card.pump();

        card.handle_mut().tick(125.0);
        card.pump();

        assert_eq!(card.state().phase, PlaybackPhase::Ended);
        assert_eq!(card.state().position, 120.0);
        assert!(drain(&mut rx).contains(&"Ended"));
    }

    #[test]
    fn looping_playback_never_ends() {
        let mut card = video_card(CardOptions {
            looping: true,
            ..CardOptions::default()
        });
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();
        card.toggle_play();
        card.pump();

        card.handle_mut().tick(125.0);
        card.pump();

        assert!(card.state().is_playing());
        assert!(card.state().position < 120.0);
        assert!(!drain(&mut rx).contains(&"Ended"));
    }

    #[test]
    fn autoplay_starts_once_metadata_arrives() {
        let mut card = video_card(CardOptions {
            autoplay: true,
            ..CardOptions::default()
        });
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        assert!(card.state().is_playing());
        assert_eq!(drain(&mut rx), vec!["Play"]);
    }

    #[test]
    fn fullscreen_event_fires_even_without_platform_support() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();

        card.toggle_fullscreen();
        assert_eq!(drain(&mut rx), vec!["Fullscreen"]);
    }

    #[test]
    fn fullscreen_driver_toggles_through_capability() {
        let driver = RecordingFullscreen::default();
        let probe = driver.probe();
        let mut card = video_card(CardOptions::default()).with_fullscreen(driver);
        card.handle_mut().tick(0.0);
        card.pump();

        card.toggle_fullscreen();
        assert!(probe.lock().unwrap().active);
        card.toggle_fullscreen();
        let log = probe.lock().unwrap();
        assert!(!log.active);
        assert_eq!(log.requests, 1);
        assert_eq!(log.exits, 1);
    }

    #[test]
    fn download_and_share_notify_observers() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();

        card.download();
        card.share();
        assert_eq!(drain(&mut rx), vec!["Download", "Share"]);
    }

    #[test]
    fn hover_tracks_pointer() {
        let mut card = video_card(CardOptions::default());
        assert!(!card.state().hover_controls);
        card.set_hover(true);
        assert!(card.state().hover_controls);
        card.set_hover(false);
        assert!(!card.state().hover_controls);
    }

    #[test]
    fn time_updates_reach_observers_with_duration() {
        let mut card = video_card(CardOptions::default());
        let mut rx = card.subscribe();
        card.handle_mut().tick(0.0);
        card.pump();
        card.toggle_play();
        card.pump();
        card.handle_mut().tick(2.0);
        card.pump();

        let mut saw_time_update = false;
        while let Ok(event) = rx.try_recv() {
            if let CardEvent::TimeUpdate { position, duration, .. } = event {
                saw_time_update = true;
                assert!(position > 0.0);
                assert_eq!(duration, 120.0);
            }
        }
        assert!(saw_time_update);
    }
}
