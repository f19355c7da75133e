//! Playcard demo - Main entry point
//!
//! Hosts a single media playback card in the terminal, driving the
//! controller over a simulated media element. Keyboard and mouse input
//! dispatch controller operations; observer events can be journaled as
//! JSON lines.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use tokio::sync::broadcast;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playcard_common::events::CardEvent;
use playcard_common::media::Quality;
use playcard_player::{PlayerCard, SimulatedMedia};
use playcard_tui::config::CardConfig;
use playcard_tui::surface::{CardView, ControlAction, SurfaceLayout};

/// Element clock granularity
const TICK: Duration = Duration::from_millis(250);

/// Relative seek step for arrow keys, in seconds
const SEEK_STEP: f64 = 15.0;

/// Volume step for arrow keys
const VOLUME_STEP: f64 = 0.1;

/// Command-line arguments for the playcard demo
#[derive(Parser, Debug)]
#[command(name = "playcard-tui")]
#[command(about = "Terminal demo for the playcard media card")]
#[command(version)]
struct Args {
    /// Card description file (TOML)
    #[arg(short, long, env = "PLAYCARD_CONFIG")]
    config: Option<PathBuf>,

    /// Append observer events to this file as JSON lines
    #[arg(long, env = "PLAYCARD_EVENT_LOG")]
    event_log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr; stdout belongs to the terminal UI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playcard_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CardConfig::load(path)
            .with_context(|| format!("failed to load card config {}", path.display()))?,
        None => CardConfig::default(),
    };
    info!(kind = %config.kind, title = %config.metadata.title, "hosting card");

    let mut element = SimulatedMedia::new(config.simulate.duration);
    if config.simulate.reject_play {
        element = element.with_rejected_play();
    }
    let card = PlayerCard::new(
        config.kind,
        config.sources,
        config.metadata,
        config.options,
        element,
    );

    if let Some(path) = &args.event_log {
        let journal = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log {}", path.display()))?;
        tokio::spawn(journal_events(card.subscribe(), journal));
    }

    // Terminal session
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run(&mut terminal, card).await;

    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to restore cursor")?;

    result
}

/// Append observer events to the journal as JSON lines.
async fn journal_events(mut events: broadcast::Receiver<CardEvent>, mut journal: std::fs::File) {
    while let Ok(event) = events.recv().await {
        debug!(event = event.event_type(), "observer event");
        match serde_json::to_string(&event) {
            Ok(line) => {
                if writeln!(journal, "{line}").is_err() {
                    break;
                }
            }
            Err(e) => debug!(error = %e, "failed to serialize event"),
        }
    }
}

/// Main UI loop: advance the element clock, mirror events, draw, and
/// dispatch input.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut card: PlayerCard<SimulatedMedia>,
) -> Result<()> {
    let mut input = EventStream::new();
    let mut clock = tokio::time::interval(TICK);
    let mut layout;

    loop {
        layout = draw(terminal, &card)?;

        tokio::select! {
            _ = clock.tick() => {
                card.handle_mut().tick(TICK.as_secs_f64());
                card.pump();
            }
            event = input.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if !handle_key(key.code, &mut card) {
                            return Ok(());
                        }
                        card.pump();
                    }
                    Some(Ok(Event::Mouse(mouse))) => {
                        handle_mouse(mouse, &mut card, &layout);
                        card.pump();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("terminal input failed"),
                    None => return Ok(()),
                }
            }
        }
    }
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    card: &PlayerCard<SimulatedMedia>,
) -> Result<SurfaceLayout> {
    let mut layout = SurfaceLayout::default();
    terminal.draw(|frame| {
        let area = frame.area();
        layout = CardView::of(card).render(frame, card_rect(area));
        if area.height > 0 {
            let hints = Paragraph::new(
                "space=play  m=mute  arrows=seek/vol  c=quality  f=fullscreen  d=download  s=share  q=quit",
            )
            .alignment(Alignment::Center);
            frame.render_widget(hints, Rect::new(area.x, area.bottom() - 1, area.width, 1));
        }
    })?;
    Ok(layout)
}

/// Centered card area within the terminal
fn card_rect(area: Rect) -> Rect {
    let width = area.width.min(76);
    let height = area.height.saturating_sub(1).min(28).max(1);
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + area.height.saturating_sub(1).saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Keyboard dispatch; returns false to quit.
fn handle_key(code: KeyCode, card: &mut PlayerCard<SimulatedMedia>) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char(' ') => card.toggle_play(),
        KeyCode::Char('m') => card.toggle_mute(),
        KeyCode::Char('f') => card.toggle_fullscreen(),
        KeyCode::Char('d') => card.download(),
        KeyCode::Char('s') => card.share(),
        KeyCode::Char('c') => cycle_quality(card),
        KeyCode::Left => {
            let target = card.state().position - SEEK_STEP;
            card.seek(target);
        }
        KeyCode::Right => {
            let target = card.state().position + SEEK_STEP;
            card.seek(target);
        }
        KeyCode::Up => {
            let volume = card.state().volume + VOLUME_STEP;
            card.set_volume(volume);
        }
        KeyCode::Down => {
            let volume = card.state().volume - VOLUME_STEP;
            card.set_volume(volume);
        }
        _ => {}
    }
    true
}

/// Mouse dispatch through the surface hit map.
fn handle_mouse(mouse: MouseEvent, card: &mut PlayerCard<SimulatedMedia>, layout: &SurfaceLayout) {
    match mouse.kind {
        MouseEventKind::Moved => {
            card.set_hover(layout.hit(mouse.column, mouse.row).is_some());
        }
        MouseEventKind::Down(MouseButton::Left) => {
            match layout.hit(mouse.column, mouse.row) {
                Some(ControlAction::TogglePlay) | Some(ControlAction::CardBody) => {
                    card.toggle_play()
                }
                Some(ControlAction::ToggleMute) => card.toggle_mute(),
                Some(ControlAction::SetVolume(volume)) => card.set_volume(volume),
                Some(ControlAction::Seek(position)) => card.seek(position),
                Some(ControlAction::SelectQuality(quality)) => card.select_quality(quality),
                Some(ControlAction::ToggleFullscreen) => card.toggle_fullscreen(),
                Some(ControlAction::Download) => card.download(),
                Some(ControlAction::Share) => card.share(),
                None => {}
            }
        }
        _ => {}
    }
}

/// Advance to the next quality tier in source order.
fn cycle_quality(card: &mut PlayerCard<SimulatedMedia>) {
    let tiers: Vec<Quality> = card.sources().iter().filter_map(|s| s.quality).collect();
    if tiers.len() < 2 {
        return;
    }
    let next = match card.state().quality.and_then(|q| tiers.iter().position(|t| *t == q)) {
        Some(index) => tiers[(index + 1) % tiers.len()],
        None => tiers[0],
    };
    card.select_quality(next);
}
