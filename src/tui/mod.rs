pub mod app;
pub mod debounce;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::config::Config;

use self::app::{Command, Mode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);

pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, config: Arc<Config>) -> Result<()> {
    let mut tui_app = TuiApp::new(Duration::from_millis(config.display.search_debounce_ms));
    let event_handler = EventHandler::new(TICK_RATE);

    terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;
    match ctx.load_catalog(&config.display).await {
        Ok(catalog) => {
            let count = catalog.items().len();
            tui_app.loaded(catalog);
            tui_app.set_status(format!("Loaded {} entries", count));
        }
        Err(e) => {
            tracing::error!("Catalog load failed: {}", e);
            tui_app.load_failed(e.to_string());
        }
    }

    loop {
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let is_interrupt =
                    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);

                if tui_app.mode == Mode::Search && !is_interrupt {
                    tui_app.handle_search_key(key, Instant::now());
                    continue;
                }

                let action = config.keybindings.get_action(&key);
                if action != Action::None && action != Action::Close {
                    tui_app.clear_status();
                }
                if let Some(command) = tui_app.handle_action(action) {
                    execute_command(&mut tui_app, command);
                }
            }
            AppEvent::Tick => tui_app.tick(Instant::now()),
        }

        if tui_app.should_quit {
            break;
        }
    }

    Ok(())
}

fn execute_command(tui_app: &mut TuiApp, command: Command) {
    match command {
        Command::OpenUrl(url) => {
            if let Err(e) = open::that(&url) {
                tui_app.set_status(format!("Failed to open image: {}", e));
            }
        }
    }
}
