//! Terminal dashboard for a running [`Session`].
//!
//! Every frame renders a fresh [`agenthub_session::SessionView`]; keys are
//! turned into session triggers and never wait on the network.

mod app;
mod ui;

use std::io::Stdout;
use std::time::Duration;

use agenthub_session::{Session, SessionView};
use agenthub_types::{AgentClassifier, Locale};
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use thiserror::Error;
use tracing::info;

pub use app::{App, Command, Tab};

const FRAME_POLL: Duration = Duration::from_millis(150);

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the dashboard until the user quits.
///
/// Blocks the calling thread on terminal input, so call it from the
/// runtime's main task with a multi-threaded runtime driving the session.
pub fn run_dashboard(session: &Session) -> Result<(), TuiError> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, session);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &Session,
) -> Result<(), TuiError> {
    let mut app = App::default();

    loop {
        let view = session.view();
        app.clamp_selection(ui::row_count(&view, app.tab));
        terminal.draw(|frame| ui::draw(frame, &view, &app))?;

        if !event::poll(FRAME_POLL)? {
            continue;
        }
        let CEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key) {
            Some(Command::Quit) => {
                info!("dashboard closed");
                return Ok(());
            }
            Some(Command::RunCycle) => {
                app.hint = view.is_busy().then(|| busy_hint(&view));
                drop(session.spawn_cycle());
            }
            Some(Command::RunPhase(phase)) => {
                app.hint = Some(if view.is_busy() {
                    busy_hint(&view)
                } else {
                    format!(
                        "→ {}",
                        AgentClassifier::label(&phase.agent_type(), view.locale)
                    )
                });
                drop(session.spawn_phase(phase));
            }
            Some(Command::RefreshMarkets) => {
                app.hint = None;
                session.spawn_market_refresh();
            }
            None => {}
        }
    }
}

fn busy_hint(view: &SessionView) -> String {
    match view.locale {
        Locale::Zh => "⏳ 已有周期在运行".to_string(),
        Locale::En => "⏳ a cycle is already running".to_string(),
    }
}
