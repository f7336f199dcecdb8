use anyhow::Result;
use chrono::Duration as ChronoDuration;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;
use std::time::Duration;

use crate::clock::{format_date, Clock};
use crate::config::AppConfig;
use crate::db::repository::{SubjectRepo, SummaryRepo};
use crate::models::{NewPlan, PlanEntry, Summary};
use crate::performance::PerformanceReport;
use crate::planner::board::{self, Progress};
use crate::planner::Tab;
use crate::study;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{header, journal, performance, plans, statusbar};
use crate::utils::format::format_long_date;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormField {
    Subject,
    Date,
    Time,
    Duration,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Subject,
        FormField::Date,
        FormField::Time,
        FormField::Duration,
    ];

    fn label(&self) -> &'static str {
        match self {
            FormField::Subject => "Subject",
            FormField::Date => "Date",
            FormField::Time => "Time",
            FormField::Duration => "Duration",
        }
    }

    fn next(&self) -> FormField {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(&self) -> FormField {
        let i = Self::ORDER.iter().position(|f| f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// The "add plan" popup. Fields hold raw text until submitted.
#[derive(Debug, Clone)]
pub struct PlanForm {
    pub field: FormField,
    pub plan: NewPlan,
    pub time: String,
}

impl PlanForm {
    fn new(today: String) -> Self {
        PlanForm {
            field: FormField::Subject,
            plan: NewPlan {
                date: today,
                duration: "1 hour".to_string(),
                ..NewPlan::default()
            },
            time: String::new(),
        }
    }

    fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Subject => &self.plan.subject,
            FormField::Date => &self.plan.date,
            FormField::Time => &self.time,
            FormField::Duration => &self.plan.duration,
        }
    }

    fn current_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Subject => &mut self.plan.subject,
            FormField::Date => &mut self.plan.date,
            FormField::Time => &mut self.time,
            FormField::Duration => &mut self.plan.duration,
        }
    }

    fn to_new_plan(&self) -> NewPlan {
        NewPlan {
            time: Some(self.time.clone()),
            ..self.plan.clone()
        }
    }
}

#[derive(Debug, Clone)]
pub enum InputMode {
    Normal,
    AddPlan(PlanForm),
    Summary,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub clock: Box<dyn Clock>,
    pub tab: Tab,
    pub focus_idx: usize,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>,
    pub status: Option<String>,

    // Cached state, refreshed after every action
    pub plans: Vec<PlanEntry>,
    pub report: PerformanceReport,
    pub yesterday: Option<Summary>,
    pub written_today: bool,
}

impl App {
    pub fn new(config: AppConfig, clock: Box<dyn Clock>) -> Self {
        App {
            view: View::Dashboard,
            config,
            clock,
            tab: Tab::Today,
            focus_idx: 0,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            status: None,
            plans: Vec::new(),
            report: PerformanceReport::default(),
            yesterday: None,
            written_today: false,
        }
    }

    /// Reloads everything from storage; plans are reconciled on the way.
    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        let plans = study::load_reconciled(conn, self.clock.as_ref())?;
        self.refresh(conn, plans)
    }

    fn refresh(&mut self, conn: &Connection, plans: Vec<PlanEntry>) -> Result<()> {
        self.plans = plans;

        let records = SubjectRepo::get_all(conn)?;
        self.report = PerformanceReport::from_records(&records, self.config.planner.weak_threshold);

        let today = self.clock.today();
        let yesterday = format_date(today - ChronoDuration::days(1));
        self.yesterday = SummaryRepo::get(conn, &yesterday)?;
        self.written_today = SummaryRepo::get(conn, &format_date(today))?.is_some();

        self.clamp_focus();
        Ok(())
    }

    pub fn visible(&self) -> Vec<&PlanEntry> {
        board::entries_for_tab(&self.plans, self.tab, self.clock.today())
    }

    pub fn tab_progress(&self) -> Progress {
        board::progress(self.visible())
    }

    fn clamp_focus(&mut self) {
        let len = self.visible().len();
        if self.focus_idx >= len {
            self.focus_idx = len.saturating_sub(1);
        }
    }

    /// Runs a storage action; failures end up in the status bar.
    fn apply<F>(&mut self, conn: &Connection, action: F)
    where
        F: FnOnce(&mut App, &Connection) -> Result<()>,
    {
        if let Err(e) = action(self, conn) {
            log::error!("{:#}", e);
            self.status = Some(format!("Error: {}", e));
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Some terminals report releases too
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::AddPlan(_) => self.handle_form_key(key, conn),
            InputMode::Summary => self.handle_summary_key(key, conn),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key, conn),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        self.status = None;
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.view = View::Help,
            KeyCode::Right | KeyCode::Tab => self.switch_tab(self.tab.next()),
            KeyCode::Left | KeyCode::BackTab => self.switch_tab(self.tab.prev()),
            KeyCode::Up => {
                self.focus_idx = self.focus_idx.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.focus_idx + 1 < self.visible().len() {
                    self.focus_idx += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_focused(conn),
            KeyCode::Char('a') => {
                self.input_mode = InputMode::AddPlan(PlanForm::new(self.clock.today_str()));
                self.input_error = None;
            }
            KeyCode::Char('g') => self.apply(conn, |app, conn| {
                let (plans, added) =
                    study::generate_week(conn, &app.config, app.clock.as_ref())?;
                app.status = Some(match added {
                    0 => "This week's plan is already in place".to_string(),
                    n => format!("Added {} sessions for your weak subjects", n),
                });
                app.refresh(conn, plans)
            }),
            KeyCode::Char('w') if self.config.journal.enabled => {
                self.input_mode = InputMode::Summary;
                self.input_buffer.clear();
                self.input_error = None;
            }
            _ => {}
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.focus_idx = 0;
    }

    fn toggle_focused(&mut self, conn: &Connection) {
        let Some(id) = self.visible().get(self.focus_idx).map(|p| p.id.clone()) else {
            return;
        };
        self.apply(conn, |app, conn| {
            if let Some(entry) = study::toggle_plan(conn, &id, app.clock.as_ref())? {
                if entry.completed {
                    app.status = Some(format!("✓ {} done", entry.subject));
                }
            }
            app.load(conn)
        });
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.view = View::Dashboard;
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent, conn: &Connection) {
        let InputMode::AddPlan(form) = &mut self.input_mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_error = None;
            }
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Backspace => {
                form.current_mut().pop();
                self.input_error = None;
            }
            KeyCode::Char(c) => {
                form.current_mut().push(c);
                self.input_error = None;
            }
            KeyCode::Enter => {
                let new_plan = match board::validate_new_plan(form.to_new_plan()) {
                    Ok(plan) => plan,
                    Err(e) => {
                        self.input_error = Some(e.to_string());
                        return;
                    }
                };
                let subject = new_plan.subject.clone();
                self.input_mode = InputMode::Normal;
                self.input_error = None;
                self.apply(conn, |app, conn| {
                    let plans = study::add_plan(conn, new_plan, app.clock.as_ref())?;
                    app.status = Some(format!("Added {}", subject));
                    app.refresh(conn, plans)
                });
            }
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.input_error = None;
            }
            KeyCode::Enter => {
                let content = self.input_buffer.trim().to_string();
                if content.is_empty() {
                    self.input_error = Some("Write a line about what you studied".to_string());
                    return;
                }
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.input_error = None;
                self.apply(conn, |app, conn| {
                    SummaryRepo::save(conn, &app.clock.today_str(), &content)?;
                    app.status = Some("Today's summary saved".to_string());
                    app.load(conn)
                });
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_dashboard(frame);
        if self.view == View::Help {
            self.draw_help_overlay(frame);
        }
        match &self.input_mode {
            InputMode::AddPlan(form) => self.draw_plan_form(frame, form),
            InputMode::Summary => self.draw_summary_input(frame),
            InputMode::Normal => {}
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let outer_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // header
                Constraint::Min(0),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            outer_chunks[0],
            &self.config.student,
            &format_long_date(self.clock.today()),
        );
        statusbar::render(frame, outer_chunks[2], self.status.as_deref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(outer_chunks[1]);

        plans::render(
            frame,
            columns[0],
            self.tab,
            &self.visible(),
            self.focus_idx,
            self.tab_progress(),
        );

        if self.config.journal.enabled {
            let right = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(8)])
                .split(columns[1]);
            performance::render(frame, right[0], &self.report);
            journal::render(frame, right[1], self.yesterday.as_ref(), self.written_today);
        } else {
            performance::render(frame, columns[1], &self.report);
        }
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 50, 14);
        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[← →]", "Switch tab"),
            ("[↑ ↓]", "Move between sessions"),
            ("[Space]", "Mark session done / undone"),
            ("[a]", "Add a session"),
            ("[g]", "Generate this week's plan"),
            ("[w]", "Write today's summary"),
            ("[?]", "Toggle help"),
            ("[Esc]", "Quit"),
        ];
        let mut lines = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::pink().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, what) in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), theme::pink()),
                Span::styled(what, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::pink()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::pink())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    fn draw_plan_form(&self, frame: &mut Frame, form: &PlanForm) {
        let height = if self.input_error.is_some() { 11 } else { 9 };
        let popup_area = centered(frame.area(), 50, height);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for field in FormField::ORDER {
            let active = field == form.field;
            let mut spans = vec![
                Span::styled(
                    format!("  {:<10}", field.label()),
                    if active { theme::pink() } else { theme::dim() },
                ),
                Span::styled(form.value(field).to_string(), theme::bold()),
            ];
            if active {
                spans.push(Span::styled("█", theme::pink()));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  [Tab] next field  ·  [Enter] add  ·  [Esc] cancel",
            theme::dim(),
        )));
        if let Some(err) = &self.input_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let block = Block::default()
            .title(Span::styled(" Add Study Session ", theme::pink()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.input_error.is_some() { theme::red() } else { theme::pink() })
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    fn draw_summary_input(&self, frame: &mut Frame) {
        let height = if self.input_error.is_some() { 7 } else { 5 };
        let popup_area = centered(frame.area(), 60, height);
        frame.render_widget(Clear, popup_area);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  ", theme::dim()),
                Span::styled(self.input_buffer.as_str(), theme::bold()),
                Span::styled("█", theme::pink()),
            ]),
            Line::from(""),
            Line::from(Span::styled("  [Enter] save  ·  [Esc] cancel", theme::dim())),
        ];
        if let Some(err) = &self.input_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let block = Block::default()
            .title(Span::styled(" Review: what did you study today? ", theme::pink()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::pink())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (area.width as u32 * percent_x as u32 / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig, clock: Box<dyn Clock>) -> Result<()> {
    let mut app = App::new(config, clock);
    let plans = study::ensure_week_generated(&conn, &app.config, app.clock.as_ref())?;
    app.refresh(&conn, plans)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(Duration::from_millis(500));

    let result = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }

        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key, &conn);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Resize) | Ok(Event::Tick) => {}
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}
