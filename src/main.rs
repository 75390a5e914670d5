//! Terminal Emerji runner (default binary).
//!
//! This is the gameplay entrypoint. It uses crossterm for keyboard and mouse
//! input and the framebuffer renderer from `emerji::term`.
//!
//! Logging uses `env_logger` (default level `warn`). While the game owns the
//! terminal, records only go somewhere with `--log-file PATH` or a redirected
//! stderr; `RUST_LOG=debug --log-file emerji.log` traces a game.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use emerji::config::{parse_args, AppConfig, Command, USAGE};
use emerji::core::{apply_move_and_save, BestScoreStore, GameConfig, GameSnapshot, GameState};
use emerji::input::{handle_key_event, should_quit, SwipeTracker};
use emerji::logging;
use emerji::share::share_message;
use emerji::store::JsonFileStore;
use emerji::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use emerji::types::{GameAction, MoveEvent};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match parse_args(&args)? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Play(config) => config,
    };
    logging::init(config.log_file.as_deref())?;

    let store = JsonFileStore::new(config.best_score_file.clone());
    let mut game = GameState::new(GameConfig {
        size: config.size,
        seed: config.seed.unwrap_or_else(clock_seed),
        best_score: store.load_best_score(),
    })?;
    info!("starting {}x{} game with seed {}", config.size, config.size, game.seed());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &store, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    if game.is_finished() {
        println!("{}", share_message(game.score(), &game.board_text()).to_plain_text());
    }
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    store: &impl BestScoreStore,
    config: &AppConfig,
) -> Result<()> {
    let view = GameView::default();
    let mut swipes = SwipeTracker::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_events: Vec<MoveEvent> = game.start().into_iter().collect();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into_with_events(&snap, &last_events, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;

        // Moves only happen on input, so block until the next event.
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                handle_key_event(key)
            }
            Event::Mouse(mouse) => swipes.handle_mouse_event(mouse).map(GameAction::Move),
            Event::Resize(_, _) => {
                term.invalidate();
                None
            }
            _ => None,
        };

        match action {
            Some(GameAction::Move(direction)) => {
                let result = apply_move_and_save(game, store, direction)?;
                if result.moved {
                    last_events = result.events;
                }
            }
            Some(GameAction::Restart) => {
                info!("restart requested ({}x{})", config.size, config.size);
                swipes.reset();
                last_events = game.restart().into_iter().collect();
            }
            None => {}
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
