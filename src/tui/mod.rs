//! Terminal front end: screen rendering, key handling, and the event loop.

pub mod intro;
pub mod radar;
pub mod result;
pub mod survey;
pub mod theme;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, backend::TestBackend};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::catalog::Catalog;
use crate::clients::traits::{GenerationParams, ReportModel};
use crate::config::Config;
use crate::export;
use crate::report::{ReportOutcome, ReportTicket, request_report};
use crate::session::{Phase, Session};
use result::ResultView;

const SCROLL_PAGE: u16 = 10;

/// Side effect requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    RequestReport(ReportTicket),
}

#[derive(Debug)]
pub struct App<'c> {
    session: Session<'c>,
    view: ResultView,
    export_dir: PathBuf,
    should_quit: bool,
}

impl<'c> App<'c> {
    pub fn new(catalog: &'c Catalog, report_enabled: bool, export_dir: PathBuf) -> Self {
        Self {
            session: Session::new(catalog, report_enabled),
            view: ResultView::default(),
            export_dir,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &Session<'c> {
        &self.session
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance the loading spinner.
    pub fn tick(&mut self) {
        self.view.tick = self.view.tick.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        // raw mode delivers Ctrl-C as a key event
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Action::Quit;
        }
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
            return Action::Quit;
        }

        match self.session.phase() {
            Phase::Intro => {
                if key.code == KeyCode::Enter {
                    self.session.start();
                }
                Action::None
            }
            Phase::Survey { .. } => self.handle_survey_key(key),
            Phase::Result => self.handle_result_key(key),
        }
    }

    /// Store a finished report. Stale responses are ignored.
    pub fn apply_report(&mut self, ticket: ReportTicket, outcome: ReportOutcome) -> bool {
        self.session.complete_report(ticket, outcome)
    }

    fn handle_survey_key(&mut self, key: KeyEvent) -> Action {
        let edit = match key.code {
            KeyCode::Left => Some(self.session.nudge_current_toward_a()),
            KeyCode::Right => Some(self.session.nudge_current_toward_b()),
            KeyCode::Char('a') => Some(self.session.choose_current_a()),
            KeyCode::Char('b') => Some(self.session.choose_current_b()),
            KeyCode::Up | KeyCode::Char('k') => {
                self.session.prev_question();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.session.next_question();
                None
            }
            KeyCode::Enter if !self.session.is_last_question() => {
                self.session.next_question();
                None
            }
            KeyCode::Enter | KeyCode::Char('r') => return self.finish(),
            _ => None,
        };
        if let Some(Err(e)) = edit {
            tracing::debug!("answer change ignored: {}", e);
        }
        Action::None
    }

    fn handle_result_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('g') => match self.session.regenerate() {
                Some(ticket) => {
                    self.view.status = None;
                    Action::RequestReport(ticket)
                }
                None => Action::None,
            },
            KeyCode::Char('p') => {
                self.export();
                Action::None
            }
            KeyCode::Char('n') => {
                self.session.restart();
                self.view = ResultView::default();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.view.scroll = self.view.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.view.scroll = self.view.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::PageUp => {
                self.view.scroll = self.view.scroll.saturating_sub(SCROLL_PAGE);
                Action::None
            }
            KeyCode::PageDown => {
                self.view.scroll = self.view.scroll.saturating_add(SCROLL_PAGE);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn finish(&mut self) -> Action {
        self.view = ResultView::default();
        match self.session.finish() {
            Some(ticket) => Action::RequestReport(ticket),
            None => Action::None,
        }
    }

    fn export(&mut self) {
        let written = export::render_result_document(&self.session, export::DEFAULT_WIDTH)
            .and_then(|doc| {
                export::write_document(&self.export_dir, &doc, chrono::Local::now())
            });
        self.view.status = Some(match written {
            Ok(path) => format!("저장됨: {}", path.display()),
            Err(e) => {
                tracing::error!("export failed: {}", e);
                format!("저장 실패: {}", e)
            }
        });
    }
}

pub fn render(frame: &mut Frame, app: &App<'_>) {
    let area = frame.area();
    match app.session.phase() {
        Phase::Intro => intro::render_intro(frame, area, app.session.catalog()),
        Phase::Survey { .. } => survey::render_survey(frame, area, &app.session),
        Phase::Result => result::render_result(frame, area, &app.session, &app.view),
    }
}

/// Render the current screen off-screen and return it as text.
pub fn render_to_text(app: &App<'_>, width: u16, height: u16) -> io::Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|frame| render(frame, app))?;
    Ok(export::buffer_text(terminal.backend().buffer()))
}

type ReportMessage = (ReportTicket, ReportOutcome);

fn spawn_report(
    runtime: &Handle,
    model: Arc<dyn ReportModel>,
    prompt: String,
    params: GenerationParams,
    ticket: ReportTicket,
    tx: mpsc::UnboundedSender<ReportMessage>,
) {
    tracing::debug!("requesting report {}", ticket.generation());
    runtime.spawn(async move {
        let outcome = request_report(model.as_ref(), &prompt, &params).await;
        if tx.send((ticket, outcome)).is_err() {
            tracing::debug!("report {} finished after shutdown", ticket.generation());
        }
    });
}

/// Run the interactive assessment until the user quits.
pub fn run(config: &Config, model: Arc<dyn ReportModel>, runtime: Handle) -> io::Result<()> {
    // restore the terminal before the default hook prints
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let params = config.report.generation_params();
    let mut app = App::new(
        Catalog::builtin(),
        config.report.enabled,
        config.export.dir.clone(),
    );
    let (tx, mut rx) = mpsc::unbounded_channel::<ReportMessage>();

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| render(frame, &app)) {
            break Err(e);
        }

        while let Ok((ticket, outcome)) = rx.try_recv() {
            app.apply_report(ticket, outcome);
        }

        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Action::RequestReport(ticket) = app.handle_key(key) {
                        spawn_report(
                            &runtime,
                            Arc::clone(&model),
                            app.session().prompt(),
                            params.clone(),
                            ticket,
                            tx.clone(),
                        );
                    }
                }
                Ok(_) => {}
                Err(e) => break Err(e),
            },
            Ok(false) => app.tick(),
            Err(e) => break Err(e),
        }

        if app.should_quit() {
            break Ok(());
        }
    };

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    outcome
}
