use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::error;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use rusqlite::Connection;

use crate::config::AppConfig;
use crate::db::repository::{MetaRepo, SnapshotRepo};
use crate::models::{PrayerType, TimeRange, TimeUnit};
use crate::reports;
use crate::state::{Command, Outcome, Store};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{breakdown, header, history, ledger, plan, statusbar};
use crate::utils::hijri::hijri_string;

const RANGE_KEY: &str = "last_range";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Dashboard,
    History,
    Help,
}

/// What the amount popup will do with the number typed into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountAction {
    AddMissed(TimeUnit),
    MakeUp,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Amount(AmountAction),
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub store: Store,
    pub selected: usize,
    pub range: TimeRange,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>,
    /// Result of the last command, `true` when it was refused.
    pub message: Option<(String, bool)>,

    pub today: NaiveDate,
    pub hijri_str: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, store: Store) -> Self {
        let today = Local::now().date_naive();
        let hijri_str = hijri_string(today, config.display.hijri_offset);
        let range = config.display.default_range;

        App {
            view: View::Dashboard,
            config,
            store,
            selected: 0,
            range,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            message: None,
            today,
            hijri_str,
        }
    }

    /// Restore the range the dashboard was last left on.
    pub fn load(&mut self, conn: &Connection) -> Result<()> {
        if let Some(saved) = MetaRepo::get(conn, RANGE_KEY)? {
            if let Ok(range) = saved.parse::<TimeRange>() {
                self.range = range;
            }
        }
        Ok(())
    }

    /// Picks up a change of day while the dashboard is left open.
    pub fn tick(&mut self) {
        let today = Local::now().date_naive();
        if today != self.today {
            self.today = today;
            self.hijri_str = hijri_string(today, self.config.display.hijri_offset);
        }
    }

    pub fn selected_prayer(&self) -> PrayerType {
        PrayerType::ALL[self.selected.min(PrayerType::ALL.len() - 1)]
    }

    pub fn handle_key(&mut self, key: KeyEvent, conn: &Connection) {
        // Some terminals also report key release and repeat.
        if key.kind != KeyEventKind::Press {
            return;
        }
        match self.input_mode {
            InputMode::Amount(action) => self.handle_amount_input(key, action, conn),
            InputMode::Normal => match self.view {
                View::Dashboard => self.handle_dashboard_key(key, conn),
                View::History => self.handle_history_key(key, conn),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent, conn: &Connection) {
        self.message = None;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.view = View::Help;
            }
            KeyCode::Char('h') => {
                self.view = View::History;
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected + 1 < PrayerType::ALL.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('a') => {
                self.open_amount(AmountAction::AddMissed(self.config.tracker.default_time_unit));
            }
            KeyCode::Char('c') => {
                self.open_amount(AmountAction::MakeUp);
            }
            KeyCode::Char('p') => self.complete_in_active_plan(conn),
            KeyCode::Char('n') => self.cycle_active_plan(conn),
            KeyCode::Char('r') => self.cycle_range(conn),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent, conn: &Connection) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('h') => {
                self.view = View::Dashboard;
            }
            KeyCode::Char('r') => self.cycle_range(conn),
            _ => {}
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.view = View::Dashboard;
        }
    }

    fn open_amount(&mut self, action: AmountAction) {
        self.input_mode = InputMode::Amount(action);
        self.input_buffer.clear();
        self.input_error = None;
    }

    fn close_amount(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.input_error = None;
    }

    fn handle_amount_input(&mut self, key: KeyEvent, action: AmountAction, conn: &Connection) {
        match key.code {
            KeyCode::Esc => self.close_amount(),
            KeyCode::Tab => {
                // Only the add popup has a unit to change.
                if let AmountAction::AddMissed(unit) = action {
                    self.input_mode = InputMode::Amount(AmountAction::AddMissed(next_unit(unit)));
                }
            }
            KeyCode::Enter => {
                let trimmed = self.input_buffer.trim().to_string();
                if trimmed.is_empty() {
                    self.input_error = Some("Enter a number first".to_string());
                    return;
                }
                let amount = match trimmed.parse::<u32>() {
                    Ok(n) => n,
                    Err(_) => {
                        self.input_error = Some(format!("'{}' is not a valid amount", trimmed));
                        return;
                    }
                };
                let prayer = self.selected_prayer();
                let command = match action {
                    AmountAction::AddMissed(unit) => Command::AddMissed {
                        prayer,
                        amount,
                        unit,
                    },
                    AmountAction::MakeUp => Command::MakeUp {
                        prayer,
                        count: amount,
                    },
                };
                // Refusals stay in the popup so the number can be corrected.
                match self.store.dispatch(command) {
                    Ok(outcome) => {
                        self.close_amount();
                        self.persist(conn, &outcome);
                    }
                    Err(advisory) => {
                        self.input_error = Some(advisory.to_string());
                    }
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    fn complete_in_active_plan(&mut self, conn: &Connection) {
        let prayer = self.selected_prayer();
        let result = self
            .store
            .resolve_plan_or_active(None)
            .and_then(|plan_id| {
                self.store.dispatch(Command::MarkCompletedInPlan {
                    plan_id,
                    prayer,
                    count: 1,
                })
            });
        self.settle(conn, result);
    }

    fn cycle_active_plan(&mut self, conn: &Connection) {
        let plans = self.store.state().plans.plans();
        if plans.is_empty() {
            self.message = Some(("No plans yet".to_string(), true));
            return;
        }
        let current = self.store.state().plans.active_plan_id();
        let next = match plans.iter().position(|p| Some(p.id) == current) {
            Some(i) => plans[(i + 1) % plans.len()].id,
            None => plans[0].id,
        };
        let result = self.store.dispatch(Command::SetActivePlan { plan_id: next });
        self.settle(conn, result);
    }

    fn cycle_range(&mut self, conn: &Connection) {
        self.range = self.range.next();
        if let Err(e) = MetaRepo::set(conn, RANGE_KEY, &self.range.as_key()) {
            error!("saving range: {:#}", e);
        }
    }

    fn settle(&mut self, conn: &Connection, result: crate::error::Result<Outcome>) {
        match result {
            Ok(outcome) => self.persist(conn, &outcome),
            Err(advisory) => self.message = Some((advisory.to_string(), true)),
        }
    }

    fn persist(&mut self, conn: &Connection, outcome: &Outcome) {
        match SnapshotRepo::save(conn, self.store.state()) {
            Ok(()) => self.message = Some((self.describe(outcome), false)),
            Err(e) => {
                error!("saving state: {:#}", e);
                self.message = Some((format!("Could not save: {}", e), true));
            }
        }
    }

    fn describe(&self, outcome: &Outcome) -> String {
        let plan_name = |id| {
            self.store
                .state()
                .plans
                .get(id)
                .map(|p| p.name.clone())
                .unwrap_or_default()
        };
        match outcome {
            Outcome::MissedAdded { prayer, added, owed } => {
                format!("Added {} missed {}, {} owed", added, prayer, owed)
            }
            Outcome::Completed { prayer, applied, owed }
            | Outcome::MadeUp { prayer, applied, owed } => {
                format!("Made up {} {}, {} owed", applied, prayer, owed)
            }
            Outcome::ProgressRecorded { prayer, day_total } => {
                format!("{} {} made up today", day_total, prayer)
            }
            Outcome::PlanCreated { plan_id, total, .. } => {
                format!("Created '{}' with {} prayers", plan_name(*plan_id), total)
            }
            Outcome::PlanActivated { plan_id } => {
                format!("'{}' is now active", plan_name(*plan_id))
            }
            Outcome::PlanProgress {
                plan_id,
                prayer,
                remaining,
                satisfied,
                ..
            } => {
                if *satisfied {
                    format!("'{}' is complete", plan_name(*plan_id))
                } else {
                    format!("{} done, {} left in '{}'", prayer, remaining, plan_name(*plan_id))
                }
            }
            Outcome::PlanDeleted { .. } => "Plan deleted".to_string(),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        match self.view {
            View::Dashboard => self.draw_dashboard(frame),
            View::History => self.draw_history(frame),
            View::Help => {
                self.draw_dashboard(frame);
                self.draw_help_overlay(frame);
            }
        }

        if let InputMode::Amount(action) = self.input_mode {
            self.draw_amount_input(frame, action);
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

        let state = self.store.state();
        header::render(
            frame,
            outer_chunks[0],
            self.today,
            self.hijri_str.as_deref(),
            state.missed.total(),
        );
        statusbar::render(frame, outer_chunks[2], self.message.as_ref());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(outer_chunks[1]);

        let left_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(columns[0]);

        ledger::render(frame, left_chunks[0], &state.missed, self.selected_prayer());

        let active = state.plans.active_plan();
        let position = active
            .and_then(|a| state.plans.plans().iter().position(|p| p.id == a.id))
            .map(|i| i + 1)
            .unwrap_or(0);
        plan::render(frame, left_chunks[1], active, position, state.plans.len());

        let summary = reports::summary(state);
        let (entries, _) = reports::window(state, self.range, self.today);
        let shares = reports::distribution(&entries);
        breakdown::render(
            frame,
            columns[1],
            self.range,
            &summary,
            &shares,
            reports::total_completed(&entries),
        );
    }

    fn draw_history(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled("  History  ", theme::gold().add_modifier(Modifier::BOLD)),
            Span::styled(self.range.label(), theme::amber()),
            Span::styled("  [r] range  [Esc] back", theme::dim()),
        ]));
        frame.render_widget(title, chunks[0]);

        let (_, rows) = reports::window(self.store.state(), self.range, self.today);
        history::render(frame, chunks[1], &rows);
        statusbar::render(frame, chunks[2], self.message.as_ref());
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).max(14).min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let bindings = [
            ("[↑ ↓]", "Select prayer"),
            ("[a]", "Add missed prayers"),
            ("[c]", "Make up prayers"),
            ("[p]", "Complete one in the active plan"),
            ("[n]", "Switch active plan"),
            ("[r]", "Cycle report range"),
            ("[h]", "History table"),
            ("[?]", "Toggle help"),
            ("[q] [Esc]", "Quit"),
        ];

        let mut help_text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in bindings {
            help_text.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), theme::gold()),
                Span::styled(label, theme::dim()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());

        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_amount_input(&self, frame: &mut Frame, action: AmountAction) {
        let area = frame.area();
        let height = if self.input_error.is_some() { 7 } else { 5 };

        let popup_area = Rect {
            x: area.width / 4,
            y: (area.height / 2).saturating_sub(3),
            width: area.width / 2,
            height: height.min(area.height),
        };

        frame.render_widget(Clear, popup_area);

        let prayer = self.selected_prayer();
        let (title, prompt, hint) = match action {
            AmountAction::AddMissed(unit) => (
                format!(" Add Missed {} ", prayer),
                format!("  Missed ({}): ", unit.as_str()),
                "  [Enter] save  ·  [Tab] unit  ·  [Esc] cancel",
            ),
            AmountAction::MakeUp => (
                format!(" Make Up {} ", prayer),
                format!("  Prayed ({} owed): ", self.store.state().missed.count(prayer)),
                "  [Enter] save  ·  [Esc] cancel",
            ),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(prompt, theme::dim()),
                Span::styled(
                    self.input_buffer.as_str(),
                    theme::gold().add_modifier(Modifier::BOLD),
                ),
                Span::styled("█", theme::amber()),
            ]),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim())),
        ];

        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::red())));
        }

        let border_style = if self.input_error.is_some() {
            theme::red()
        } else {
            theme::prayer(prayer)
        };

        let block = Block::default()
            .title(Span::styled(title, theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(theme::surface());

        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

fn next_unit(unit: TimeUnit) -> TimeUnit {
    match unit {
        TimeUnit::Days => TimeUnit::Weeks,
        TimeUnit::Weeks => TimeUnit::Months,
        TimeUnit::Months => TimeUnit::Years,
        TimeUnit::Years => TimeUnit::Days,
    }
}

/// Run the TUI event loop.
pub fn run(conn: Connection, config: AppConfig) -> Result<()> {
    let store = Store::new(SnapshotRepo::load_or_default(&conn)?);
    let tick_rate_ms = config.display.tick_rate_ms;
    let mut app = App::new(config, store);
    app.load(&conn)?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate_ms);

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
            Ok(Event::Resize) => {}
            Ok(Event::Tick) => app.tick(),
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}
