//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application. `update` applies input events,
//! `handle_api_message` applies results from background requests, and
//! `view` renders the active screen. Requests are never sent from here
//! directly; they are queued and drained by the main loop.

use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, error, info, trace, warn};

use crate::api::StudentId;
use crate::config::Settings;
use crate::events::{Event, KeyContext};
use crate::tasks::{ApiMessage, ApiRequest};
use crate::ui::{
    render_context_help, theme, AlertDialog, CreateStudentView, EditStudentView, FormAction,
    ListAction, Notification, NotificationManager, StudentListView,
};

/// Shown when a create request fails.
pub const CREATE_FAILED: &str = "There was an error submitting the student data.";
/// Shown when a create request succeeds.
pub const CREATE_SUCCEEDED: &str = "Successfully added student! Redirecting...";
/// Shown when an update request fails.
pub const UPDATE_FAILED: &str = "There was an error updating the student data.";
/// Shown when an update request succeeds.
pub const UPDATE_SUCCEEDED: &str = "Student data updated successfully!";
/// Shown when a delete request succeeds.
pub const DELETE_SUCCEEDED: &str = "Student deleted successfully!";

/// Client-side location of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Listing,
    /// `/addStudent`
    Create,
    /// `/editStudent/:id`
    Edit(StudentId),
}

impl Route {
    /// Parse a route path. Returns `None` for unknown paths.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);

        match path {
            "" | "/" => Some(Route::Listing),
            "/addStudent" => Some(Route::Create),
            _ => {
                let id = path.strip_prefix("/editStudent/")?;
                if id.is_empty() || id.contains('/') {
                    None
                } else {
                    Some(Route::Edit(StudentId::new(id)))
                }
            }
        }
    }

    /// The path form of this route.
    pub fn path(&self) -> String {
        match self {
            Route::Listing => "/".to_string(),
            Route::Create => "/addStudent".to_string(),
            Route::Edit(id) => format!("/editStudent/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The screen currently shown, owning its own state.
#[derive(Debug)]
pub enum Screen {
    Listing(StudentListView),
    Create(CreateStudentView),
    Edit(EditStudentView),
}

/// A navigation scheduled for later.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Redirect {
    at: Instant,
    to: Route,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit.
    should_quit: bool,
    /// Where the active screen lives.
    route: Route,
    /// The active screen.
    screen: Screen,
    /// Toast messages.
    notifications: NotificationManager,
    /// Blocking alert shown on top of every screen.
    alert: AlertDialog,
    /// Requests waiting for the main loop to send them.
    pending: Vec<ApiRequest>,
    /// Navigation that fires on a later tick.
    redirect: Option<Redirect>,
    /// Timing settings.
    settings: Settings,
}

impl App {
    /// Create the application on the given route and queue its first fetch.
    pub fn new(settings: Settings, route: Route) -> Self {
        debug!(route = %route, "Creating application instance");
        let mut app = Self {
            should_quit: false,
            route: Route::Listing,
            screen: Screen::Listing(StudentListView::new()),
            notifications: NotificationManager::new(),
            alert: AlertDialog::new(),
            pending: Vec::new(),
            redirect: None,
            settings,
        };
        app.navigate(route);
        app
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The active route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The active screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The active screen, mutably.
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Toast messages.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// The blocking alert.
    pub fn alert(&self) -> &AlertDialog {
        &self.alert
    }

    /// Whether a redirect is waiting to fire.
    pub fn has_pending_redirect(&self) -> bool {
        self.redirect.is_some()
    }

    /// Time left before the scheduled redirect fires.
    pub fn redirect_remaining(&self, now: Instant) -> Option<Duration> {
        self.redirect
            .as_ref()
            .map(|r| r.at.saturating_duration_since(now))
    }

    /// Switch to a route, replacing the active screen.
    ///
    /// Each screen starts from scratch and queues its own fetch.
    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.route, to = %route, "Navigating");
        self.redirect = None;

        self.screen = match &route {
            Route::Listing => {
                let mut view = StudentListView::new();
                view.set_loading();
                self.pending.push(ApiRequest::FetchStudents);
                Screen::Listing(view)
            }
            Route::Create => Screen::Create(CreateStudentView::new()),
            Route::Edit(id) => {
                let mut view = EditStudentView::new(id.clone());
                view.set_loading();
                self.pending.push(ApiRequest::FetchStudent(id.clone()));
                Screen::Edit(view)
            }
        };
        self.route = route;
    }

    /// Drain the requests queued since the last call.
    pub fn take_requests(&mut self) -> Vec<ApiRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.should_quit = true;
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Paste(text) => {
                if !self.alert.is_visible() {
                    self.handle_paste(&text);
                }
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.tick_at(Instant::now()),
        }
    }

    /// Advance timers as of `now`: toasts, spinners and a due redirect.
    pub fn tick_at(&mut self, now: Instant) {
        self.notifications.expire(now);

        match &mut self.screen {
            Screen::Listing(view) => view.tick(),
            Screen::Edit(view) => view.tick(),
            Screen::Create(_) => {}
        }

        if let Some(redirect) = self.redirect.as_ref().filter(|r| now >= r.at) {
            let to = redirect.to.clone();
            debug!(to = %to, "Redirect due");
            self.navigate(to);
        }
    }

    fn handle_paste(&mut self, text: &str) {
        match &mut self.screen {
            Screen::Listing(view) => view.paste(text),
            Screen::Create(view) => view.form_mut().paste(text),
            Screen::Edit(view) => {
                if !view.state().is_loading() {
                    view.form_mut().paste(text);
                }
            }
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        // The alert blocks all other input
        if self.alert.is_visible() {
            self.alert.handle_input(key_event);
            return;
        }

        match &mut self.screen {
            Screen::Listing(view) => {
                if let Some(action) = view.handle_input(key_event) {
                    self.handle_list_action(action);
                }
            }
            Screen::Create(view) => {
                if let Some(action) = view.handle_input(key_event) {
                    self.handle_create_action(action);
                }
            }
            Screen::Edit(view) => {
                if let Some(action) = view.handle_input(key_event) {
                    self.handle_edit_action(action);
                }
            }
        }
    }

    fn handle_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::AddStudent => self.navigate(Route::Create),
            ListAction::EditStudent(id) => self.navigate(Route::Edit(id)),
            ListAction::ConfirmDelete(id) => {
                info!(student_id = %id, "Deleting student");
                self.pending.push(ApiRequest::DeleteStudent(id));
            }
            ListAction::Refresh => {
                info!("Refreshing student list");
                if let Screen::Listing(view) = &mut self.screen {
                    view.set_loading();
                }
                self.pending.push(ApiRequest::FetchStudents);
            }
            ListAction::Quit => {
                info!("Quit requested from student list");
                self.should_quit = true;
            }
        }
    }

    fn handle_create_action(&mut self, action: FormAction) {
        match action {
            FormAction::Cancel => self.navigate(Route::Listing),
            FormAction::Submit => {
                if let Screen::Create(view) = &mut self.screen {
                    let payload = view.build_payload();
                    debug!(?payload, "Submitting new student");
                    view.form_mut().set_submitting(true);
                    self.pending.push(ApiRequest::CreateStudent(payload));
                }
            }
        }
    }

    fn handle_edit_action(&mut self, action: FormAction) {
        match action {
            FormAction::Cancel => self.navigate(Route::Listing),
            FormAction::Submit => {
                let Screen::Edit(view) = &mut self.screen else {
                    return;
                };
                match view.build_payload() {
                    Ok(payload) => {
                        let id = view.id().clone();
                        debug!(student_id = %id, ?payload, "Submitting student update");
                        view.form_mut().set_submitting(true);
                        self.pending.push(ApiRequest::UpdateStudent { id, payload });
                    }
                    Err(e) => {
                        warn!(error = %e, "Rejected student update");
                        self.alert.error(e.to_string());
                    }
                }
            }
        }
    }

    /// Apply the result of a background request.
    ///
    /// Results for a screen that is no longer shown are logged and dropped.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::StudentsFetched(result) => {
                let Screen::Listing(view) = &mut self.screen else {
                    debug!("Dropping student list for inactive screen");
                    return;
                };
                match result {
                    Ok(students) => view.set_students(students),
                    Err(e) => {
                        error!(error = %e, "Failed to fetch students");
                        view.set_failed(e);
                    }
                }
            }
            ApiMessage::StudentFetched { id, result } => {
                let view = match &mut self.screen {
                    Screen::Edit(view) if view.id() == &id => view,
                    _ => {
                        debug!(student_id = %id, "Dropping student for inactive screen");
                        return;
                    }
                };
                match result {
                    Ok(student) => view.adopt(&student),
                    Err(e) => {
                        error!(student_id = %id, error = %e, "Failed to fetch student");
                        view.set_failed(e);
                    }
                }
            }
            ApiMessage::StudentCreated(result) => match result {
                Ok(student) => {
                    match &student {
                        Some(student) => info!(student_id = %student.id, "Student created"),
                        None => info!("Student created"),
                    }
                    self.notifications.success(CREATE_SUCCEEDED);
                    if let Screen::Create(view) = &mut self.screen {
                        view.clear();
                        self.redirect = Some(Redirect {
                            at: Instant::now() + self.settings.redirect_delay(),
                            to: Route::Listing,
                        });
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to create student");
                    if let Screen::Create(view) = &mut self.screen {
                        view.form_mut().set_submitting(false);
                    }
                    self.alert.error(CREATE_FAILED);
                }
            },
            ApiMessage::StudentUpdated { id, result } => match result {
                Ok(_) => {
                    info!(student_id = %id, "Student updated");
                    self.alert.success(UPDATE_SUCCEEDED);
                    if matches!(&self.screen, Screen::Edit(view) if view.id() == &id) {
                        self.navigate(Route::Listing);
                    }
                }
                Err(e) => {
                    error!(student_id = %id, error = %e, "Failed to update student");
                    if let Screen::Edit(view) = &mut self.screen {
                        view.form_mut().set_submitting(false);
                    }
                    self.alert.error(UPDATE_FAILED);
                }
            },
            ApiMessage::StudentDeleted { id, result } => {
                match &result {
                    Ok(()) => {
                        info!(student_id = %id, "Student deleted");
                        self.notifications.push(
                            Notification::success(DELETE_SUCCEEDED)
                                .with_duration(self.settings.delete_notice()),
                        );
                    }
                    Err(e) => error!(student_id = %id, error = %e, "Failed to delete student"),
                }
                if let Screen::Listing(view) = &mut self.screen {
                    match result {
                        Ok(()) => view.delete_succeeded(&id),
                        Err(_) => view.delete_failed(),
                    }
                }
            }
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        match &mut self.screen {
            Screen::Listing(view) => view.render(frame, chunks[1]),
            Screen::Create(view) => view.render(frame, chunks[1]),
            Screen::Edit(view) => view.render(frame, chunks[1]),
        }

        render_context_help(frame, chunks[2], self.key_context(), self.status());

        self.notifications.render(frame, area);
        self.alert.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let line = Line::from(vec![
            Span::styled(
                "Student Management",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", self.route), Style::default().fg(t.muted)),
        ]);
        let header = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(t.border)),
        );
        frame.render_widget(header, area);
    }

    /// The key hints that apply right now.
    pub fn key_context(&self) -> KeyContext {
        if self.alert.is_visible() {
            return KeyContext::Alert;
        }
        match &self.screen {
            Screen::Listing(view) if view.is_confirming() => KeyContext::ConfirmDelete,
            Screen::Listing(view) if view.is_searching() => KeyContext::SearchInput,
            Screen::Listing(_) => KeyContext::StudentList,
            Screen::Create(_) | Screen::Edit(_) => KeyContext::StudentForm,
        }
    }

    fn status(&self) -> Option<&'static str> {
        match &self.screen {
            Screen::Listing(view) if view.state().is_loading() => Some("Loading"),
            Screen::Edit(view) if view.state().is_loading() => Some("Loading"),
            Screen::Create(view) if view.form().is_submitting() => Some("Saving"),
            Screen::Edit(view) if view.form().is_submitting() => Some("Saving"),
            _ => None,
        }
    }
}
