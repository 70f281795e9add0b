//! Terminal snake runner (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. The loop sleeps in
//! `event::poll` until the next tick is due, feeds the elapsed wall time to the
//! session, then handles whatever event woke it up.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake_chain::engine::{ItemKind, RunConfig, Session};
use snake_chain::input::{is_restart, map_key_event, should_quit, SwipeTracker};
use snake_chain::term::{
    FrameBuffer, GameView, HudView, ItemGlyph, ItemView, Scene, SpriteLayer, TerminalRenderer,
    Viewport,
};

/// Upper bound on a single poll so resizes and restarts stay responsive.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let config = RunConfig::from_env().context("reading SNAKE_* environment")?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// File logging only; stdout belongs to the alternate screen.
fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: RunConfig) -> Result<()> {
    let view = GameView::default().with_field(config.snake.tile_size, config.snake.playfield);
    let mut session = Session::new(config, SpriteLayer::new());
    let mut swipes = SwipeTracker::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut items: Vec<ItemView> = Vec::with_capacity(2);

    info!(seed = session.config().seed, "session started");

    let mut last = Instant::now();
    let mut dirty = true;
    loop {
        if dirty {
            draw(term, &view, &mut fb, &session, &mut items)?;
            dirty = false;
        }

        let timeout = session
            .time_until_next_tick_ms()
            .map(|ms| Duration::from_millis(ms as u64))
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        let ready = event::poll(timeout)?;

        // Whole milliseconds only; the remainder stays in `last`.
        let elapsed_ms = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(elapsed_ms as u64);
        if session.advance(elapsed_ms) > 0 {
            dirty = true;
        }

        if !ready {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                if is_restart(key) && !session.run().is_alive() {
                    session.restart(SpriteLayer::new());
                    dirty = true;
                } else if let Some(input) = map_key_event(key) {
                    dirty |= session.handle_input(input).is_some();
                }
            }
            Event::Mouse(mouse) => {
                if let Some(input) = swipes.handle_mouse(mouse) {
                    dirty |= session.handle_input(input).is_some();
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
            }
            _ => {}
        }
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
    session: &Session<SpriteLayer>,
    items: &mut Vec<ItemView>,
) -> Result<()> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));

    items.clear();
    items.extend(session.items().items().map(|item| ItemView {
        position: item.position,
        glyph: match item.kind {
            ItemKind::Ball(color) => ItemGlyph::Ball(color),
            ItemKind::Bomb => ItemGlyph::Bomb,
        },
    }));

    let score = session.score();
    let chain = session.run().chain();
    let scene = Scene {
        sprites: session.renderer(),
        status: session.status(),
        items,
        hud: HudView {
            points: score.points(),
            multiplier: score.multiplier_value(),
            length: chain.len(),
            matches: chain.match_count(),
        },
    };
    view.render_into(&scene, Viewport::new(w, h), fb);
    term.draw_swap(fb)
}
