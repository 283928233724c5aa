//! Terminal Blockfall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from
//! `blockfall-term`. Logs go to a file because stdout belongs to the game.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, LevelFilter};

use blockfall::config::GameConfig;
use blockfall::core::GameState;
use blockfall::input::{handle_key_event, is_restart, should_quit};
use blockfall::term::TermFrontend;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;
    info!("starting blockfall (seed {}, tick {}ms)", config.seed, config.tick_ms);

    let mut frontend = TermFrontend::new()?;
    frontend.enter()?;

    let result = run(&mut frontend, &config);

    // Always try to restore terminal state.
    let _ = frontend.exit();
    if let Err(err) = &result {
        log::error!("exiting on error: {:#}", err);
    }
    result
}

/// Send `log` records to the configured file, or nowhere.
///
/// `RUST_LOG` overrides the default `info` filter.
fn init_logging(config: &GameConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("failed to initialise logging")?;
    Ok(())
}

fn run(frontend: &mut TermFrontend, config: &GameConfig) -> Result<()> {
    let mut game = GameState::new(config.seed);
    game.start();

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let clock = Instant::now();
    let mut last_tick = clock;

    loop {
        // Render whatever changed since the last iteration.
        game.flush_into(frontend);
        frontend.present()?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!("quit with score {}", game.score());
                        return Ok(());
                    }
                    if game.game_over() && is_restart(key) {
                        game.restart();
                    } else if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(width, height) => frontend.resize(width, height),
                _ => {}
            }
        }

        // Tick: catch the engine clock up with the wall clock.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let wall_ms = u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX);
            let behind = wall_ms.saturating_sub(game.now_ms());
            game.advance(u32::try_from(behind).unwrap_or(u32::MAX));
        }
    }
}
