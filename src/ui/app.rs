//! Main TUI application state and logic

use crate::analysis::Stage;
use crate::pipeline::Session;
use crate::report::{self, ReportLine};
use crate::ui::panes::{self, LineMark};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
    Frame, Terminal,
};
use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::time::Duration;
use tracing::{info, warn};

/// Which tab is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Source,
    Lexical,
    Syntax,
    Semantic,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Source, Tab::Lexical, Tab::Syntax, Tab::Semantic];

    pub fn index(self) -> usize {
        match self {
            Tab::Source => 0,
            Tab::Lexical => 1,
            Tab::Syntax => 2,
            Tab::Semantic => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Source => "Source",
            Tab::Lexical => "Lexical Analysis",
            Tab::Syntax => "Syntax Analysis",
            Tab::Semantic => "Semantic Analysis",
        }
    }

    /// Move to the next tab, wrapping around
    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    /// Move to the previous tab, wrapping around
    pub fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    fn for_stage(stage: Stage) -> Self {
        match stage {
            Stage::Lexical => Tab::Lexical,
            Stage::Syntax => Tab::Syntax,
            Stage::Semantic => Tab::Semantic,
        }
    }
}

/// Keyboard input mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a path to open
    OpenPath(String),
}

/// The main application state
pub struct App {
    /// The analysis session
    pub session: Session,

    /// Display name of the loaded file
    pub source_name: Option<String>,

    pub active_tab: Tab,
    pub input_mode: InputMode,

    /// Rendered output of each stage
    pub lexical_output: Vec<ReportLine>,
    pub syntax_output: Vec<ReportLine>,
    pub semantic_output: Vec<ReportLine>,

    /// Per-tab scroll offsets, indexed by [`Tab::index`]
    pub scroll: [usize; 4],

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app around a session
    pub fn new(session: Session, source_name: Option<String>) -> Self {
        App {
            session,
            source_name,
            active_tab: Tab::Source,
            input_mode: InputMode::Normal,
            lexical_output: Vec::new(),
            syntax_output: Vec::new(),
            semantic_output: Vec::new(),
            scroll: [0; 4],
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Tabs on top, active pane in the middle, status bar at bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.active_tab.index())
            .block(Block::default().borders(Borders::ALL).title(" tricheck "))
            .style(Style::default().fg(DEFAULT_THEME.comment))
            .highlight_style(
                Style::default()
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        let scroll = &mut self.scroll[self.active_tab.index()];
        match self.active_tab {
            Tab::Source => {
                let marks = line_marks(&self.session);
                panes::render_source_pane(
                    frame,
                    chunks[1],
                    self.session.source(),
                    self.source_name.as_deref(),
                    &marks,
                    scroll,
                );
            }
            Tab::Lexical => panes::render_results_pane(
                frame,
                chunks[1],
                Tab::Lexical.title(),
                &self.lexical_output,
                "(press 'l' to run lexical analysis)",
                scroll,
            ),
            Tab::Syntax => panes::render_results_pane(
                frame,
                chunks[1],
                Tab::Syntax.title(),
                &self.syntax_output,
                "(press 's' to run syntax analysis)",
                scroll,
            ),
            Tab::Semantic => panes::render_results_pane(
                frame,
                chunks[1],
                Tab::Semantic.title(),
                &self.semantic_output,
                "(press 'm' to run semantic analysis)",
                scroll,
            ),
        }

        match &self.input_mode {
            InputMode::OpenPath(input) => panes::render_path_prompt(frame, chunks[2], input),
            InputMode::Normal => panes::render_status_bar(
                frame,
                chunks[2],
                &self.status_message,
                self.session.state(),
            ),
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if let InputMode::OpenPath(input) = &mut self.input_mode {
            match key.code {
                KeyCode::Enter => {
                    let path = input.trim().to_string();
                    self.input_mode = InputMode::Normal;
                    if !path.is_empty() {
                        self.open_file(&path);
                    }
                }
                KeyCode::Esc => {
                    self.input_mode = InputMode::Normal;
                    self.status_message = "Open cancelled".to_string();
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('o') => {
                self.input_mode = InputMode::OpenPath(String::new());
            }
            KeyCode::Char('l') => self.run_stage(Stage::Lexical),
            KeyCode::Char('s') => self.run_stage(Stage::Syntax),
            KeyCode::Char('m') => self.run_stage(Stage::Semantic),
            KeyCode::Char('r') => {
                self.session.reset();
                self.clear_outputs();
                self.status_message = "Session reset".to_string();
            }
            KeyCode::Char('c') => {
                self.session.clear();
                self.source_name = None;
                self.clear_outputs();
                self.active_tab = Tab::Source;
                self.status_message = "Cleared".to_string();
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.active_tab = Tab::ALL[idx];
            }
            KeyCode::Tab | KeyCode::Right => {
                self.active_tab = self.active_tab.next();
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.active_tab = self.active_tab.prev();
            }
            KeyCode::Up => {
                let scroll = &mut self.scroll[self.active_tab.index()];
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = &mut self.scroll[self.active_tab.index()];
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    /// Load a file into the session
    fn open_file(&mut self, path: &str) {
        match fs::read_to_string(path) {
            Ok(source) => {
                info!(path, "opened source file");
                self.session.load_source(source);
                self.source_name = Some(path.to_string());
                self.clear_outputs();
                self.active_tab = Tab::Source;
                self.status_message = format!("Loaded {}", path);
            }
            Err(err) => {
                warn!(path, %err, "failed to open source file");
                self.status_message = format!("Cannot open {}: {}", path, err);
            }
        }
    }

    /// Run one stage and store its rendered output
    fn run_stage(&mut self, stage: Stage) {
        let (output, message) = match stage {
            Stage::Lexical => match self.session.analyze_lexical() {
                Ok(result) => (report::lexical_report(result), stage_message(stage, result.success)),
                Err(err) => (report::refusal_report(stage, &err), err.to_string()),
            },
            Stage::Syntax => match self.session.analyze_syntax() {
                Ok(result) => (report::syntax_report(result), stage_message(stage, result.success)),
                Err(err) => (report::refusal_report(stage, &err), err.to_string()),
            },
            Stage::Semantic => match self.session.analyze_semantic() {
                Ok(result) => {
                    let message = format!(
                        "{}; interface locked, press 'r' to reset",
                        stage_message(stage, result.success)
                    );
                    (report::semantic_report(result), message)
                }
                Err(err) => (report::refusal_report(stage, &err), err.to_string()),
            },
        };

        // A re-run upstream invalidates everything below it
        match stage {
            Stage::Lexical => {
                self.syntax_output.clear();
                self.semantic_output.clear();
                self.lexical_output = output;
            }
            Stage::Syntax => {
                self.semantic_output.clear();
                self.syntax_output = output;
            }
            Stage::Semantic => self.semantic_output = output,
        }

        let tab = Tab::for_stage(stage);
        self.scroll[tab.index()] = 0;
        self.active_tab = tab;
        self.status_message = message;
    }

    fn clear_outputs(&mut self) {
        self.lexical_output.clear();
        self.syntax_output.clear();
        self.semantic_output.clear();
        self.scroll = [0; 4];
    }
}

fn stage_message(stage: Stage, success: bool) -> String {
    if success {
        format!("{} Successful", stage)
    } else {
        format!("{} Failed", stage)
    }
}

/// Collect gutter markers from the session's latest results.
fn line_marks(session: &Session) -> FxHashMap<usize, LineMark> {
    let mut marks = FxHashMap::default();

    if let Some(token) = session.lexical_result().and_then(|r| r.unexpected()) {
        marks.insert(token.location.line, LineMark::Unexpected);
    }
    if let Some(verdict) = session.syntax_result().and_then(|r| r.failed_line()) {
        marks.insert(verdict.line_number, LineMark::InvalidSyntax);
    }
    if let Some(result) = session.semantic_result() {
        for verdict in result.verdicts.iter().filter(|v| !v.is_correct()) {
            marks.insert(verdict.line_number(), LineMark::TypeMismatch);
        }
    }
    marks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::pipeline::PipelineState;

    fn app_with(source: &str) -> App {
        App::new(Session::with_source(AnalyzerConfig::default(), source), None)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::from(code));
    }

    #[test]
    fn test_stage_keys_run_in_order() {
        let mut app = app_with("int x = 5;");
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.active_tab, Tab::Lexical);
        assert!(!app.lexical_output.is_empty());

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.active_tab, Tab::Syntax);

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.active_tab, Tab::Semantic);
        assert_eq!(app.session.state(), PipelineState::SemanticDone);
        assert!(app.status_message.contains("locked"));
    }

    #[test]
    fn test_semantic_key_refused_before_lexical() {
        let mut app = app_with("int x = 5;");
        press(&mut app, KeyCode::Char('m'));

        assert_eq!(app.semantic_output.len(), 1);
        assert!(app.semantic_output[0].text.contains("cannot proceed"));
        assert_eq!(app.session.state(), PipelineState::NotStarted);
    }

    #[test]
    fn test_relexing_clears_downstream_output() {
        let mut app = app_with("int x = 5;");
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('l'));
        assert!(app.syntax_output.is_empty());
    }

    #[test]
    fn test_clear_key() {
        let mut app = app_with("int x = 5;");
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('c'));

        assert_eq!(app.session.source(), "");
        assert!(app.lexical_output.is_empty());
        assert_eq!(app.active_tab, Tab::Source);
    }

    #[test]
    fn test_open_prompt_and_missing_file() {
        let mut app = app_with("");
        press(&mut app, KeyCode::Char('o'));
        for c in "no/such/file.txt".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // typing 'q' inside the prompt does not quit
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.status_message.starts_with("Cannot open no/such/file.txt"));
    }

    #[test]
    fn test_tab_navigation_wraps() {
        assert_eq!(Tab::Semantic.next(), Tab::Source);
        assert_eq!(Tab::Source.prev(), Tab::Semantic);

        let mut app = app_with("");
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Syntax);
    }

    #[test]
    fn test_line_marks() {
        let mut session = Session::with_source(AnalyzerConfig::default(), "int x = 5;\nint y 6;");
        session.analyze_lexical().unwrap();
        session.analyze_syntax().unwrap();

        let marks = line_marks(&session);
        assert_eq!(marks.get(&2), Some(&LineMark::InvalidSyntax));
        assert_eq!(marks.get(&1), None);
    }
}
