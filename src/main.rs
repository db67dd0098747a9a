//! Terminal runner (default binary).
//!
//! Polls crossterm for keys until the next fixed tick, feeds the collected actions into
//! the session, and redraws through the diffing framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use flexi_logger::{detailed_format, FileSpec, Logger, LoggerHandle, WriteMode};
use log::info;

use blockfall::config::AppConfig;
use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{handle_key_event, should_quit, should_restart, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{EndReason, GameAction, GameStatus, TICK_MS};

fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let _logger = init_logging(&config)?;
    info!(
        "starting: seed={} fall_ms={} queue_len={}",
        config.seed, config.session.fall_interval_ms, config.session.queue_len
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(e) = &result {
        log::error!("fatal error: {:#}", e);
    }
    result
}

/// Stderr belongs to the raw-mode terminal, so logs only go to a file when asked.
fn init_logging(config: &AppConfig) -> Result<Option<LoggerHandle>> {
    let Some(dir) = &config.log_dir else {
        return Ok(None);
    };
    let handle = Logger::with(config.log_spec()?)
        .log_to_file(FileSpec::default().directory(dir).basename("blockfall"))
        .write_mode(WriteMode::BufferAndFlush)
        .format(detailed_format)
        .start()?;
    Ok(Some(handle))
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut game = GameState::with_config(config.session, config.seed);
    let view = GameView::default();
    // With release events, a held key stays held until the terminal says otherwise.
    let mut input = if term.reports_key_releases() {
        InputHandler::new().with_key_release_timeout_ms(u32::MAX)
    } else {
        InputHandler::new()
    };

    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut actions: Vec<GameAction> = Vec::with_capacity(32);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if game.is_terminated() && should_quit(key) {
                            return Ok(());
                        }
                        if should_restart(key) {
                            game.restart();
                            input.reset();
                            actions.clear();
                            continue;
                        }
                        match handle_key_event(key) {
                            Some(
                                GameAction::MoveLeft | GameAction::MoveRight | GameAction::MoveDown,
                            ) => actions.extend(input.handle_key_press(key.code)),
                            Some(action) => actions.push(action),
                            None => {}
                        }
                    }
                    // Terminal auto-repeat only refreshes the held key.
                    KeyEventKind::Repeat => {
                        input.handle_key_press(key.code);
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let dt = elapsed_ms(last_tick);
            last_tick = Instant::now();
            if game.status() == GameStatus::Running && !game.paused() {
                actions.extend(input.update(dt));
            }

            game.tick(dt, &actions);
            actions.clear();

            match game.status() {
                GameStatus::Terminated(EndReason::Quit) => return Ok(()),
                GameStatus::Terminated(EndReason::ToppedOut) => input.reset(),
                _ => {}
            }
        }
    }
}

/// Wall time since `since`, so a slow frame still advances timers by what really passed.
fn elapsed_ms(since: Instant) -> u32 {
    u32::try_from(since.elapsed().as_millis()).unwrap_or(u32::MAX)
}
