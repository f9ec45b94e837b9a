//! Live terminal dashboard.
//!
//! Feature-gated behind `tui` (on by default). Runs unless `--headless`
//! is given on the CLI.

mod controls;
mod layout;
/// Application state: tabs, camera, and the live dashboard.
pub mod runtime;
mod style;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::config::DashboardConfig;
use runtime::App;

/// How often the dashboard clock advances and the screen redraws.
const FRAME_MS: u64 = 250;

/// Runs the dashboard until the user quits.
///
/// Sets up the terminal (raw mode, alternate screen), runs the event loop,
/// and restores the terminal on every exit path.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub fn run(config: DashboardConfig, start_epoch_ms: u64) -> io::Result<()> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(e);
        }
    };

    let mut app = App::new(config, start_epoch_ms);
    let result = event_loop(&mut terminal, &mut app);

    // Teardown: always restore terminal state
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    info!(
        refreshes = app.dashboard.current().seq,
        "dashboard closed"
    );
    result
}

/// Core event loop: poll input, advance the dashboard clock, draw.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let frame = Duration::from_millis(FRAME_MS);
    loop {
        terminal.draw(|f| layout::render(f, app))?;

        if app.quit {
            return Ok(());
        }

        let poll_timeout = (app.last_tick + frame).saturating_duration_since(Instant::now());
        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(app, key);
            }
        }

        if app.last_tick.elapsed() >= frame {
            app.tick();
        }
    }
}
