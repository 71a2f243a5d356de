//! Terminal User Interface module for askdocs.
//!
//! Provides the question/answer form using ratatui for rendering and
//! crossterm for terminal management. Queries run on a worker thread so the
//! interface keeps accepting input while a request is in flight.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, ThreadId};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::client::{QueryClientTrait, QueryError};

mod app;
pub mod event;
mod ui;

pub use app::{App, PendingQuery};
use event::KeyAction;

/// How long the loop waits for input before redrawing.
const TICK: Duration = Duration::from_millis(100);

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Must run before exiting the TUI, including on error paths.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for the panic hook.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Installs a panic hook that restores the terminal before the original hook runs.
///
/// Only panics on `ui_thread` restore the terminal. Worker panics are caught
/// in `dispatch_query` and the UI keeps running.
fn init_panic_hook(ui_thread: ThreadId) {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if is_ui_thread(ui_thread) {
            restore_terminal_panic();
        }
        original_hook(panic_info);
    }));
}

fn is_ui_thread(ui_thread: ThreadId) -> bool {
    thread::current().id() == ui_thread
}

/// Runs one query on a worker thread.
///
/// The returned receiver yields exactly one result. A panicking client is
/// reported as `QueryError::Interrupted` (release builds abort on panic
/// instead). If the TUI exits first the worker is left to finish on its own.
pub fn dispatch_query(client: Arc<dyn QueryClientTrait>, query: String) -> PendingQuery {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = panic::catch_unwind(AssertUnwindSafe(|| client.query(&query)))
            .unwrap_or_else(|_| {
                error!("query worker panicked");
                Err(QueryError::Interrupted)
            });
        // The receiver is gone if the UI has already quit.
        let _ = tx.send(result);
    });
    rx
}

/// Runs the main event loop for the TUI.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App, client: Arc<dyn QueryClientTrait>) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, client, &mut terminal);

    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

fn run_event_loop_internal(
    app: &mut App,
    client: Arc<dyn QueryClientTrait>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        app.poll_pending();

        terminal.draw(|frame| {
            app.clamp_answer_scroll(ui::max_answer_scroll(app, frame.area()));
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(TICK)?
            && let Event::Key(key) = crossterm_event::read()?
            && key.kind == KeyEventKind::Press
        {
            match event::handle_key_event(app, key) {
                KeyAction::Quit => break,
                KeyAction::Submit(query) => {
                    app.track_request(dispatch_query(Arc::clone(&client), query));
                }
                KeyAction::Continue => {}
            }
        }
    }

    Ok(())
}

/// Entry point for the TUI application.
///
/// # Errors
///
/// Returns an error if terminal initialization or the event loop fails.
pub fn run(client: Arc<dyn QueryClientTrait>) -> Result<()> {
    init_panic_hook(thread::current().id());
    info!("starting terminal UI");

    let mut app = App::new();
    run_event_loop(&mut app, client).context("TUI event loop failed")?;

    Ok(())
}
