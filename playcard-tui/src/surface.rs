//! Card control surface
//!
//! Pure rendering over `PlaybackState` + `MediaMetadata` + sources +
//! `CardOptions`. Rendering returns a `SurfaceLayout` mapping every
//! interactive region to exactly one `ControlAction`; a hit on a control
//! consumes the pointer event, so a click only reaches the enclosing
//! card body when no control claimed it.

use playcard_common::format::{format_size, format_time};
use playcard_common::media::{MediaKind, MediaMetadata, MediaSource, Quality};
use playcard_common::options::{AspectRatio, CardOptions, ControlsPosition};
use playcard_player::handle::MediaHandle;
use playcard_player::state::{PlaybackPhase, PlaybackState};
use playcard_player::PlayerCard;
use ratatui::layout::{Alignment, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, LineGauge, Paragraph};
use ratatui::Frame;

use crate::theme::Palette;

/// Width of the inline volume bar in cells
const VOLUME_BAR_WIDTH: u16 = 8;

/// One control operation resolved from a pointer position
#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    TogglePlay,
    ToggleMute,
    /// Volume fraction in [0.0, 1.0] from the volume bar
    SetVolume(f64),
    /// Seek target in seconds from the progress bar
    Seek(f64),
    SelectQuality(Quality),
    ToggleFullscreen,
    Download,
    Share,
    /// The click landed on the card but on no control
    CardBody,
}

#[derive(Debug, Clone, PartialEq)]
enum Hotspot {
    Action(ControlAction),
    Progress,
    Volume,
}

/// Interactive regions produced by one render pass
#[derive(Debug, Clone, Default)]
pub struct SurfaceLayout {
    card: Option<Rect>,
    duration: f64,
    hotspots: Vec<(Rect, Hotspot)>,
}

impl SurfaceLayout {
    /// Resolve a pointer position to a control action. Controls are
    /// checked first; only an unclaimed position inside the card maps to
    /// `CardBody`.
    pub fn hit(&self, column: u16, row: u16) -> Option<ControlAction> {
        let position = Position::new(column, row);
        for (rect, hotspot) in &self.hotspots {
            if rect.contains(position) {
                return Some(match hotspot {
                    Hotspot::Action(action) => action.clone(),
                    Hotspot::Progress => {
                        ControlAction::Seek(fraction_of(rect, column) * self.duration)
                    }
                    Hotspot::Volume => ControlAction::SetVolume(fraction_of(rect, column)),
                });
            }
        }
        self.card
            .filter(|card| card.contains(position))
            .map(|_| ControlAction::CardBody)
    }

    /// Number of interactive control regions (excludes the card body)
    pub fn control_count(&self) -> usize {
        self.hotspots.len()
    }

    fn push(&mut self, rect: Rect, hotspot: Hotspot) {
        if rect.width > 0 && rect.height > 0 {
            self.hotspots.push((rect, hotspot));
        }
    }
}

/// Horizontal fraction of a pointer position within a rect
fn fraction_of(rect: &Rect, column: u16) -> f64 {
    let span = rect.width.saturating_sub(1).max(1) as f64;
    (column.saturating_sub(rect.x) as f64 / span).clamp(0.0, 1.0)
}

/// Render one button and register its hotspot; returns the x just past
/// the button plus a single-cell gap.
fn place_button(
    frame: &mut Frame,
    layout: &mut SurfaceLayout,
    rect: Rect,
    label: &str,
    style: Style,
    action: ControlAction,
) -> u16 {
    frame.render_widget(Paragraph::new(label.to_string()).style(style), rect);
    layout.push(rect, Hotspot::Action(action));
    rect.right() + 1
}

/// Everything the surface needs to draw one card
#[derive(Debug, Clone, Copy)]
pub struct CardView<'a> {
    pub kind: MediaKind,
    pub state: &'a PlaybackState,
    pub metadata: &'a MediaMetadata,
    pub sources: &'a [MediaSource],
    pub options: &'a CardOptions,
}

impl<'a> CardView<'a> {
    /// Borrow a view over a live card controller.
    pub fn of<H: MediaHandle>(card: &'a PlayerCard<H>) -> Self {
        Self {
            kind: card.kind(),
            state: card.state(),
            metadata: card.metadata(),
            sources: card.sources(),
            options: card.options(),
        }
    }

    /// Render the card into `area`, returning its interactive regions.
    pub fn render(&self, frame: &mut Frame, area: Rect) -> SurfaceLayout {
        let palette = Palette::for_theme(self.options.theme);
        let mut layout = SurfaceLayout {
            card: Some(area),
            duration: self.state.duration,
            hotspots: Vec::new(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(palette.border).bg(palette.bg))
            .style(palette.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return layout;
        }

        if self.state.phase == PlaybackPhase::NoSource {
            let row = inner.y + inner.height / 2;
            frame.render_widget(
                Paragraph::new("No media source available")
                    .alignment(Alignment::Center)
                    .style(palette.danger_text()),
                Rect::new(inner.x, row, inner.width, 1),
            );
            return layout;
        }

        let controls_height = self.controls_height();
        let metadata_height = self.metadata_height();
        let viewport_height =
            self.viewport_height(inner, controls_height.saturating_add(metadata_height));

        let viewport = Rect::new(inner.x, inner.y, inner.width, viewport_height);
        self.render_viewport(frame, viewport, &palette, &mut layout);

        let mut row = viewport.bottom();
        if controls_height > 0 && row < inner.bottom() {
            let controls = Rect::new(
                inner.x,
                row,
                inner.width,
                controls_height.min(inner.bottom() - row),
            );
            self.render_bottom_controls(frame, controls, &palette, &mut layout);
            row += controls.height;
        }
        if metadata_height > 0 && row < inner.bottom() {
            let metadata = Rect::new(
                inner.x,
                row,
                inner.width,
                metadata_height.min(inner.bottom() - row),
            );
            self.render_metadata(frame, metadata, &palette);
        }

        layout
    }

    /// Rows taken by the fixed bottom control panel
    fn controls_height(&self) -> u16 {
        if !self.options.show_controls
            || self.options.controls_position != ControlsPosition::Bottom
            || self.kind == MediaKind::Image
        {
            return 0;
        }
        let mut rows = 1; // button row
        if self.options.show_progress && self.state.has_duration() {
            rows += 2; // progress bar + time labels
        }
        rows
    }

    /// Rows taken by the metadata panel
    fn metadata_height(&self) -> u16 {
        if !self.options.show_metadata {
            return 0;
        }
        let mut rows = 1; // title
        if self.metadata.description.is_some() {
            rows += 1;
        }
        if !self.detail_fields().is_empty() {
            rows += 1;
        }
        rows
    }

    fn viewport_height(&self, inner: Rect, reserved: u16) -> u16 {
        let available = inner.height.saturating_sub(reserved).max(1);
        let width = inner.width as u32;
        // Terminal cells are roughly twice as tall as wide
        let shaped = match self.options.aspect_ratio {
            AspectRatio::Widescreen => width * 9 / 32,
            AspectRatio::Standard => width * 3 / 8,
            AspectRatio::Square => width / 2,
            AspectRatio::Auto => available as u32,
        };
        (shaped.max(3) as u16).min(available)
    }

    fn render_viewport(
        &self,
        frame: &mut Frame,
        viewport: Rect,
        palette: &Palette,
        layout: &mut SurfaceLayout,
    ) {
        frame.render_widget(
            Block::default().style(palette.viewport()),
            viewport,
        );

        if self.kind == MediaKind::Livestream {
            frame.render_widget(
                Paragraph::new("● LIVE").style(
                    Style::new()
                        .fg(palette.danger)
                        .bg(palette.viewport_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Rect::new(viewport.x, viewport.y, viewport.width.min(7), 1),
            );
        }

        let center = viewport.y + viewport.height / 2;
        if self.state.is_loading() {
            frame.render_widget(
                Paragraph::new("Loading...")
                    .alignment(Alignment::Center)
                    .style(Style::new().fg(palette.dim).bg(palette.viewport_bg)),
                Rect::new(viewport.x, center, viewport.width, 1),
            );
            return;
        }

        // Poster/thumbnail line (or the title as a stand-in backdrop)
        let backdrop = self
            .options
            .poster
            .as_deref()
            .or(self.metadata.thumbnail.as_deref())
            .unwrap_or(self.metadata.title.as_str());
        frame.render_widget(
            Paragraph::new(backdrop)
                .alignment(Alignment::Center)
                .style(Style::new().fg(palette.dim).bg(palette.viewport_bg)),
            Rect::new(viewport.x, center, viewport.width, 1),
        );

        match self.kind {
            MediaKind::Image => self.render_image_actions(frame, viewport, palette, layout),
            _ => {
                self.render_play_badge(frame, viewport, palette, layout, center);
                self.render_overlay_controls(frame, viewport, palette, layout);
            }
        }
    }

    /// Centered play badge, shown while paused (or always for audio)
    fn render_play_badge(
        &self,
        frame: &mut Frame,
        viewport: Rect,
        palette: &Palette,
        layout: &mut SurfaceLayout,
        center: u16,
    ) {
        if !self.options.show_controls
            || self.options.controls_position != ControlsPosition::Bottom
        {
            return;
        }
        if self.state.is_playing() && self.kind != MediaKind::Audio {
            return;
        }
        let label = if self.state.is_playing() {
            "[ Pause ]"
        } else {
            "[ Play ]"
        };
        let width = label.len() as u16;
        if viewport.width < width || center == 0 {
            return;
        }
        let badge = Rect::new(
            viewport.x + (viewport.width - width) / 2,
            center.saturating_sub(1).max(viewport.y),
            width,
            1,
        );
        frame.render_widget(
            Paragraph::new(label).style(
                Style::new()
                    .fg(palette.viewport_fg)
                    .bg(palette.viewport_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            badge,
        );
        layout.push(badge, Hotspot::Action(ControlAction::TogglePlay));
    }

    /// Overlay play/pause + fullscreen, shown while hovered or paused
    fn render_overlay_controls(
        &self,
        frame: &mut Frame,
        viewport: Rect,
        palette: &Palette,
        layout: &mut SurfaceLayout,
    ) {
        if !self.options.show_controls
            || self.options.controls_position != ControlsPosition::Overlay
        {
            return;
        }
        if self.state.is_playing() && !self.state.hover_controls {
            return;
        }
        let play_label = if self.state.is_playing() {
            "[ Pause ]"
        } else {
            "[ Play ]"
        };
        let mut segments: Vec<(&str, ControlAction)> =
            vec![(play_label, ControlAction::TogglePlay)];
        if self.kind == MediaKind::Video {
            segments.push(("[Full]", ControlAction::ToggleFullscreen));
        }

        let total: u16 = segments
            .iter()
            .map(|(label, _)| label.len() as u16 + 1)
            .sum::<u16>()
            .saturating_sub(1);
        if viewport.width < total || viewport.height == 0 {
            return;
        }
        let row = viewport.bottom().saturating_sub(1);
        let mut x = viewport.x + (viewport.width - total) / 2;
        for (label, action) in segments {
            let rect = Rect::new(x, row, label.len() as u16, 1);
            frame.render_widget(
                Paragraph::new(label).style(
                    Style::new()
                        .fg(palette.viewport_fg)
                        .bg(palette.viewport_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                rect,
            );
            layout.push(rect, Hotspot::Action(action));
            x += label.len() as u16 + 1;
        }
    }

    /// Download/share actions in an image card's top-right corner
    fn render_image_actions(
        &self,
        frame: &mut Frame,
        viewport: Rect,
        palette: &Palette,
        layout: &mut SurfaceLayout,
    ) {
        if !self.options.show_controls {
            return;
        }
        let mut segments: Vec<(&str, ControlAction)> = Vec::new();
        if self.options.allow_download {
            segments.push(("[DL]", ControlAction::Download));
        }
        if self.options.allow_share {
            segments.push(("[Share]", ControlAction::Share));
        }
        if segments.is_empty() {
            return;
        }
        let total: u16 = segments
            .iter()
            .map(|(label, _)| label.len() as u16 + 1)
            .sum::<u16>()
            .saturating_sub(1);
        if viewport.width <= total {
            return;
        }
        let mut x = viewport.right() - total;
        for (label, action) in segments {
            let rect = Rect::new(x, viewport.y, label.len() as u16, 1);
            frame.render_widget(
                Paragraph::new(label)
                    .style(Style::new().fg(palette.viewport_fg).bg(palette.viewport_bg)),
                rect,
            );
            layout.push(rect, Hotspot::Action(action));
            x += label.len() as u16 + 1;
        }
    }

    fn render_bottom_controls(
        &self,
        frame: &mut Frame,
        area: Rect,
        palette: &Palette,
        layout: &mut SurfaceLayout,
    ) {
        let mut row = area.y;

        if self.options.show_progress && self.state.has_duration() && row < area.bottom() {
            let gauge_rect = Rect::new(area.x, row, area.width, 1);
            let ratio = (self.state.position / self.state.duration).clamp(0.0, 1.0);
            frame.render_widget(
                LineGauge::default()
                    .label("")
                    .ratio(ratio)
                    .filled_style(Style::new().fg(palette.accent).bg(palette.bg))
                    .unfilled_style(Style::new().fg(palette.dim).bg(palette.bg)),
                gauge_rect,
            );
            layout.push(gauge_rect, Hotspot::Progress);
            row += 1;

            if row < area.bottom() {
                let times = Rect::new(area.x, row, area.width, 1);
                frame.render_widget(
                    Paragraph::new(format_time(self.state.position))
                        .style(palette.dim_text()),
                    times,
                );
                frame.render_widget(
                    Paragraph::new(format_time(self.state.duration))
                        .alignment(Alignment::Right)
                        .style(palette.dim_text()),
                    times,
                );
                row += 1;
            }
        }

        if row >= area.bottom() {
            return;
        }
        let buttons = Rect::new(area.x, row, area.width, 1);
        self.render_button_row(frame, buttons, palette, layout);
    }

    fn render_button_row(
        &self,
        frame: &mut Frame,
        area: Rect,
        palette: &Palette,
        layout: &mut SurfaceLayout,
    ) {
        // Left group: playback and volume
        let mut x = area.x;
        let play_label = if self.state.is_playing() {
            "[Pause]"
        } else {
            "[Play]"
        };
        x = place_button(
            frame,
            layout,
            Rect::new(x, area.y, play_label.len() as u16, 1),
            play_label,
            palette.button(),
            ControlAction::TogglePlay,
        );

        let mute_label = if self.state.muted { "[Muted]" } else { "[Mute]" };
        let mute_style = if self.state.muted {
            palette.button_active()
        } else {
            palette.button()
        };
        x = place_button(
            frame,
            layout,
            Rect::new(x, area.y, mute_label.len() as u16, 1),
            mute_label,
            mute_style,
            ControlAction::ToggleMute,
        );

        if self.options.show_progress && x + VOLUME_BAR_WIDTH < area.right() {
            let shown = if self.state.muted { 0.0 } else { self.state.volume };
            let filled = (shown * VOLUME_BAR_WIDTH as f64).round() as usize;
            let bar: String = "█".repeat(filled) + &"·".repeat(VOLUME_BAR_WIDTH as usize - filled);
            let bar_rect = Rect::new(x, area.y, VOLUME_BAR_WIDTH, 1);
            frame.render_widget(
                Paragraph::new(bar).style(Style::new().fg(palette.accent).bg(palette.bg)),
                bar_rect,
            );
            layout.push(bar_rect, Hotspot::Volume);
        }

        // Right group: quality selector and actions, right-aligned
        let mut segments: Vec<(String, Style, ControlAction)> = Vec::new();
        if self.sources.len() > 1 {
            for source in self.sources {
                if let Some(quality) = source.quality {
                    let style = if self.state.quality == Some(quality) {
                        palette.button_active()
                    } else {
                        palette.button()
                    };
                    segments.push((
                        quality.label().to_string(),
                        style,
                        ControlAction::SelectQuality(quality),
                    ));
                }
            }
        }
        if self.options.allow_download {
            segments.push((
                "[DL]".to_string(),
                palette.button(),
                ControlAction::Download,
            ));
        }
        if self.options.allow_share {
            segments.push((
                "[Share]".to_string(),
                palette.button(),
                ControlAction::Share,
            ));
        }
        if self.kind == MediaKind::Video {
            segments.push((
                "[Full]".to_string(),
                palette.button(),
                ControlAction::ToggleFullscreen,
            ));
        }

        let total: u16 = segments
            .iter()
            .map(|(label, _, _)| label.len() as u16 + 1)
            .sum::<u16>()
            .saturating_sub(1);
        if total == 0 || area.width < total {
            return;
        }
        let mut rx = area.right() - total;
        for (label, style, action) in segments {
            let width = label.len() as u16;
            rx = place_button(
                frame,
                layout,
                Rect::new(rx, area.y, width, 1),
                &label,
                style,
                action,
            );
        }
    }

    fn render_metadata(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let mut row = area.y;
        frame.render_widget(
            Paragraph::new(self.metadata.title.clone()).style(palette.title()),
            Rect::new(area.x, row, area.width, 1),
        );
        row += 1;

        if let Some(description) = &self.metadata.description {
            if row < area.bottom() {
                frame.render_widget(
                    Paragraph::new(description.clone()).style(palette.base()),
                    Rect::new(area.x, row, area.width, 1),
                );
                row += 1;
            }
        }

        let details = self.detail_fields();
        if !details.is_empty() && row < area.bottom() {
            frame.render_widget(
                Paragraph::new(details.join("  ")).style(palette.dim_text()),
                Rect::new(area.x, row, area.width, 1),
            );
        }
    }

    /// Present metadata fields, in display order. Image cards show only
    /// resolution and size.
    fn detail_fields(&self) -> Vec<String> {
        let meta = self.metadata;
        let mut fields = Vec::new();
        if self.kind == MediaKind::Image {
            if let Some(resolution) = &meta.resolution {
                fields.push(format!("Resolution: {resolution}"));
            }
            if let Some(size) = meta.file_size {
                fields.push(format!("Size: {}", format_size(size)));
            }
            return fields;
        }
        if let Some(duration) = meta.duration {
            fields.push(format!("Duration: {}", format_time(duration)));
        }
        if let Some(size) = meta.file_size {
            fields.push(format!("Size: {}", format_size(size)));
        }
        if let Some(resolution) = &meta.resolution {
            fields.push(format!("Resolution: {resolution}"));
        }
        if let Some(bitrate) = meta.bitrate {
            fields.push(format!("Bitrate: {bitrate} kbps"));
        }
        if let Some(codec) = &meta.codec {
            fields.push(format!("Codec: {codec}"));
        }
        fields
    }
}
