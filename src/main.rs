use std::{
    error::Error,
    fs::File,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::LevelFilter;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use simplelog::WriteLogger;

use proctor::{
    app::{Screen, SessionState},
    countdown::{Clock, SystemClock},
    display::DisplaySession,
    platform::{InhibitorWakeLock, WakeLock},
    runtime::{CrosstermEventSource, Event, EventSource, FixedTicker, Runner, Ticker},
    setup::{FormEvent, SetupForm},
    ui,
};

const TICK_RATE_MS: u64 = 1000;

/// exam-room countdown board for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Projects a large exam countdown with the current wall-clock time and two notice panels. Timer configuration is interactive; the CLI only carries diagnostics."
)]
pub struct Cli {
    /// write diagnostic logs to this file (the alternate screen hides stderr)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub struct App {
    pub session: SessionState,
    pub setup: SetupForm,
    pub display: Option<DisplaySession>,
    clock: Box<dyn Clock>,
    wake_locks: fn() -> Box<dyn WakeLock>,
}

impl App {
    pub fn new(clock: Box<dyn Clock>, wake_locks: fn() -> Box<dyn WakeLock>) -> Self {
        let session = SessionState::new();
        let setup = SetupForm::from_config(&session.config);
        Self {
            session,
            setup,
            display: None,
            clock,
            wake_locks,
        }
    }

    fn start_display(&mut self) {
        let value = self.setup.confirm();
        self.session.apply_config(
            value,
            self.setup.precautions_text(),
            self.setup.reminders_text(),
        );
        self.display = Some(DisplaySession::mount(
            &self.session.config,
            self.clock.now(),
            (self.wake_locks)(),
        ));
    }

    fn back_to_setup(&mut self) {
        // Dropping the session stops tick mutation and releases the wake lock.
        self.display = None;
        self.session.return_to_setup();
        self.setup = SetupForm::from_config(&self.session.config);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_ref() {
        WriteLogger::init(
            LevelFilter::Info,
            simplelog::Config::default(),
            File::create(path)?,
        )?;
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Box::new(SystemClock), || Box::new(InhibitorWakeLock::new()));
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let result = run(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            Event::Tick => {
                if let Some(display) = app.display.as_mut() {
                    display.on_tick(app.clock.now());
                }
            }
            Event::Resize => {}
            Event::FocusGained => {
                if let Some(display) = app.display.as_mut() {
                    display.on_focus_gained();
                }
            }
            Event::FocusLost => {}
            Event::Key(key) => {
                if handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    match app.session.screen {
        Screen::Setup => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
                app.start_display();
                return Flow::Continue;
            }
            if key.code == KeyCode::Esc {
                return Flow::Quit;
            }
            match app.setup.on_key(key) {
                FormEvent::Submit => app.start_display(),
                FormEvent::Handled => {
                    // Notice edits propagate to the holder on every keystroke.
                    let precautions = app.setup.precautions_text();
                    let reminders = app.setup.reminders_text();
                    app.session.set_notices(precautions, reminders);
                }
            }
        }
        Screen::Display => match key.code {
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if let Some(display) = app.display.as_mut() {
                    display.toggle_fullscreen();
                }
            }
            KeyCode::Esc => match app.display.as_mut() {
                Some(display) if display.is_fullscreen() => display.exit_fullscreen(),
                _ => app.back_to_setup(),
            },
            KeyCode::Char('b') | KeyCode::Backspace => app.back_to_setup(),
            KeyCode::Char('q') => return Flow::Quit,
            _ => {}
        },
    }

    Flow::Continue
}

fn ui(app: &mut App, f: &mut Frame) {
    match app.session.screen {
        Screen::Setup => ui::setup::render(&mut app.setup, f),
        Screen::Display => {
            if let Some(display) = app.display.as_ref() {
                ui::display::render(display, &app.session.config, f);
            }
        }
    }
}
