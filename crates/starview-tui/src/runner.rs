// Terminal lifecycle and the input/outcome event loop
use crate::{ui, App};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use starview_core::{Config, FetchPool, Language, PopularState, RepoFetcher};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// How long one loop iteration waits for input before draining fetch
/// resolutions and redrawing.
const TICK: Duration = Duration::from_millis(100);

pub async fn run_tui(config: &Config, fetcher: Arc<dyn RepoFetcher>) -> anyhow::Result<()> {
    let (mut pool, mut outcomes) = FetchPool::new(fetcher);

    // Mounting selects the default filter, which kicks off the first fetch.
    let (state, command) = PopularState::mount(config.ui.default_language);
    let mut app = App::new(state);
    pool.run(command);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if config.ui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Fetches resolve out of order; each outcome only fills its own
        // language's slot.
        while let Ok(outcome) = outcomes.try_recv() {
            pool.settle(outcome.language);
            app.apply(outcome);
        }

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key.code, &mut app, &mut pool);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    if config.ui.mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    Ok(())
}

fn handle_key(code: KeyCode, app: &mut App, pool: &mut FetchPool) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            let command = app.next_language();
            pool.run(command);
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            let command = app.previous_language();
            pool.run(command);
        }
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            let command = app.select_language(Language::ALL[index]);
            pool.run(command);
        }
        KeyCode::Down | KeyCode::Char('j') => app.next_row(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_row(),
        KeyCode::Char('n') => app.next_card(),
        KeyCode::Char('p') => app.previous_card(),
        KeyCode::Char('r') => {
            let command = app.retry();
            pool.run(command);
        }
        KeyCode::Char('o') => {
            if let Some(repo) = app.selected_repo() {
                if let Err(e) = open::that(repo.owner.profile_url()) {
                    warn!("failed to open owner profile: {}", e);
                }
            }
        }
        KeyCode::Enter => {
            if let Some(repo) = app.selected_repo() {
                if let Err(e) = open::that(&repo.url) {
                    warn!("failed to open browser: {}", e);
                }
            }
        }
        _ => {}
    }
}
