//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `blockfall::term`. The engine is advanced with the real time elapsed
//! between frames.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use blockfall::config::AppConfig;
use blockfall::core::{GameOverReport, GameSnapshot, GameState};
use blockfall::input::{handle_key_event, is_press, should_quit};
use blockfall::records::RecordStore;
use blockfall::term::{FrameBuffer, GameView, RecordsView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only; the terminal belongs to the game.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(LevelFilter::from_level(config.log_level))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let store = config.record_store();
    let mut records = load_records(store.as_ref());

    let mut game_state = GameState::new(config.engine);
    info!(
        seed = config.engine.seed,
        width = game_state.board().width(),
        height = game_state.board().height(),
        "blockfall starting"
    );

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        view.render_into_with_records(&snap, Some(&records), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if action == GameAction::Restart {
                            records.unlocked = None;
                        }
                        game_state.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            game_state.tick(elapsed_ms);
        }

        if let Some(report) = game_state.take_game_over() {
            record_game(store.as_ref(), &report, &mut records);
        }
    }
}

fn load_records(store: Option<&RecordStore>) -> RecordsView {
    let Some(store) = store else {
        return RecordsView::default();
    };
    match store.load() {
        Ok(record) => RecordsView {
            best_score: record.best.score,
            games_played: record.games_played,
            unlocked: None,
        },
        Err(e) => {
            warn!("stats record unavailable: {e:#}");
            RecordsView::default()
        }
    }
}

fn record_game(store: Option<&RecordStore>, report: &GameOverReport, records: &mut RecordsView) {
    let Some(store) = store else {
        records.best_score = records.best_score.max(report.score);
        records.games_played = records.games_played.saturating_add(1);
        return;
    };

    match store.record_game(report) {
        Ok(outcome) => {
            records.best_score = outcome.record.best.score;
            records.games_played = outcome.record.games_played;
            records.unlocked = outcome.unlocked.map(|a| a.name);
            if outcome.best_updated {
                info!(score = report.score, "new personal best");
            }
        }
        Err(e) => warn!("failed to save stats record: {e:#}"),
    }
}
