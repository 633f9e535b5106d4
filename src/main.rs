//! Blockfall runner (default binary).
//!
//! `blockfall` plays in the terminal; `blockfall headless [--seed N] [--frames N]`
//! runs a scripted simulation and prints the final snapshot as JSON.

use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{self, Event};
use log::info;

use blockfall::config::AppConfig;
use blockfall::core::{GameSession, GameSnapshot};
use blockfall::headless::{self, HeadlessArgs};
use blockfall::input::{map_key, should_quit};
use blockfall::logging::{self, LogSink};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        None => run_interactive(&config),
        Some("headless") => {
            logging::init(&config, LogSink::Headless)?;
            let args = HeadlessArgs::parse(args)?;
            println!("{}", headless::run(&config, &args)?);
            Ok(())
        }
        Some(other) => bail!("unknown command: {other} (expected `headless` or nothing)"),
    }
}

fn run_interactive(config: &AppConfig) -> Result<()> {
    logging::init(config, LogSink::Interactive)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut session = GameSession::new(config.session_config());
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(config.frame_ms as u64);
    let mut last_frame = Instant::now();

    info!(
        "interactive session on {}x{} board, frame {}ms",
        config.cols, config.rows, config.frame_ms
    );

    // Repaint only when the session or the terminal changed.
    let mut dirty = true;
    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            session.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!("quit at score {}", session.score());
                        return Ok(());
                    }
                    if let Some(command) = map_key(key, session.status()) {
                        dirty |= session.apply(command).changed_state();
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        // Clock.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            let dt_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            if let Some(outcome) = session.advance_time(dt_ms) {
                dirty |= outcome.changed_state();
            }
        }
    }
}
