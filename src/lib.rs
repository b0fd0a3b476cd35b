pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod scene;
pub mod ui;

use std::io::{self, Stdout};

use anyhow::{Context, Result};
use app::events::{AppEvent, spawn_input_task};
use app::settings::{RuntimeSettings, load_runtime_settings, save_runtime_settings};
use app::state::{AppMode, AppState};
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use scene::glyphs::GlyphAtlas;
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    init_logging(&cli);

    let (settings, settings_path) = load_runtime_settings(&cli, true);
    if cli.save_settings
        && let Some(path) = &settings_path
    {
        save_runtime_settings(path, &settings)?;
        tracing::info!(path = %path.display(), "settings saved");
    }
    let glyphs = load_glyphs(&settings)?;

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, settings, glyphs, cli.conditions_url.clone()).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: RuntimeSettings,
    glyphs: GlyphAtlas,
    conditions_url: Option<String>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(settings, glyphs).with_conditions_url(conditions_url);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx).await?;
                }
            }
        }

        if app.mode == AppMode::Quit {
            app.running = false;
        } else {
            terminal.draw(|frame| ui::render(frame, &app))?;
        }
    }

    app.engine.shutdown();
    Ok(())
}

fn init_logging(cli: &Cli) {
    let Some(path) = cli.log_file.clone().or_else(logging::default_log_path) else {
        return;
    };
    if let Err(err) = logging::init(&path) {
        eprintln!("skyclock: logging disabled: {err:#}");
    }
}

/// A glyph file that cannot be read at all is fatal; individual missing
/// glyphs are not.
fn load_glyphs(settings: &RuntimeSettings) -> Result<GlyphAtlas> {
    match &settings.glyph_file {
        Some(path) => GlyphAtlas::from_file(path)
            .with_context(|| format!("loading glyphs from {}", path.display())),
        None => Ok(GlyphAtlas::builtin()),
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
        existing(panic);
    }));
}
