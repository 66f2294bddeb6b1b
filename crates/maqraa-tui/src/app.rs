//! Application state and logic

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use color_eyre::Result;

use maqraa_api::dto::circle::{Circle, CircleMember};
use maqraa_api::dto::user::{LookupUser, UserRole};
use maqraa_client::{
    ClientConfig, FileSessionStore, HttpClient, ListPager, LoadPlan, MemorySessionStore,
};

use crate::action::Action;

/// Rows still hidden below the selection that trigger the next page load.
const SCROLL_AHEAD: usize = 5;

/// UI focus state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Focus {
    #[default]
    Roster,
    Details,
    Log,
}

/// Roster tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Students,
    Teachers,
    Managers,
    Circles,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Students, Tab::Teachers, Tab::Managers, Tab::Circles];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Students => "Students",
            Tab::Teachers => "Teachers",
            Tab::Managers => "Managers",
            Tab::Circles => "Circles",
        }
    }

    fn next(self) -> Tab {
        match self {
            Tab::Students => Tab::Teachers,
            Tab::Teachers => Tab::Managers,
            Tab::Managers => Tab::Circles,
            Tab::Circles => Tab::Students,
        }
    }

    fn prev(self) -> Tab {
        match self {
            Tab::Students => Tab::Circles,
            Tab::Teachers => Tab::Students,
            Tab::Managers => Tab::Teachers,
            Tab::Circles => Tab::Managers,
        }
    }
}

/// Log entry level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Activity log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub level: LogLevel,
}

/// Detail panel content
#[derive(Debug, Clone)]
pub enum Details {
    User(LookupUser),
    Circle {
        circle: Circle,
        members: Vec<CircleMember>,
    },
}

/// One roster list view: its pager plus the cursor position.
#[derive(Debug)]
pub struct ListView<T> {
    pub pager: ListPager<T>,
    pub selected: usize,
}

impl<T> ListView<T> {
    fn new(page_size: u64, base: maqraa_api::ListRequest) -> Self {
        Self {
            pager: ListPager::new(page_size).with_request(base),
            selected: 0,
        }
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.pager.items().len().saturating_sub(1));
    }
}

/// Application state
pub struct App {
    config: ClientConfig,
    client: Option<HttpClient>,
    should_quit: bool,
    /// Current focus
    pub focus: Focus,
    /// Current roster tab
    pub tab: Tab,
    pub students: ListView<LookupUser>,
    pub teachers: ListView<LookupUser>,
    pub managers: ListView<LookupUser>,
    pub circles: ListView<Circle>,
    /// Detail panel content
    pub details: Option<Details>,
    /// Activity log
    pub log: VecDeque<LogEntry>,
    /// Show help popup
    pub show_help: bool,
    /// Search mode active
    pub search_active: bool,
    /// Search query being typed
    pub search_query: String,
    /// Last error, shown in the status bar until the next action
    pub error_message: Option<String>,
    /// Tick counter for animations
    pub tick: u64,
}

impl App {
    /// Create a new application
    pub fn new(config: ClientConfig) -> Self {
        let page_size = config.page_size.max(1);
        // every list speaks the configured language
        let base = maqraa_api::ListRequest {
            lang: Some(config.lang.clone()),
            ..maqraa_api::ListRequest::default()
        };
        Self {
            config,
            client: None,
            should_quit: false,
            focus: Focus::Roster,
            tab: Tab::Students,
            students: ListView::new(page_size, base.clone()),
            teachers: ListView::new(page_size, base.clone()),
            managers: ListView::new(page_size, base.clone()),
            circles: ListView::new(page_size, base),
            details: None,
            log: VecDeque::with_capacity(100),
            show_help: false,
            search_active: false,
            search_query: String::new(),
            error_message: None,
            tick: 0,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Connect to the backend and load the first roster page.
    pub async fn connect(&mut self) -> Result<()> {
        let client = match FileSessionStore::at_default_location() {
            Ok(store) => HttpClient::with_store(&self.config.api_url, Arc::new(store))?,
            Err(e) => {
                self.log_event(
                    &format!("Session persistence unavailable: {e}"),
                    LogLevel::Warning,
                );
                HttpClient::with_store(
                    &self.config.api_url,
                    Arc::new(MemorySessionStore::default()),
                )?
            }
        };

        match client.session() {
            Some(session) => {
                let who = session.user.full_name.unwrap_or_else(|| "unknown".to_string());
                self.log_event(&format!("Signed in as {who}"), LogLevel::Success);
            }
            None => {
                self.log_event("No stored session; run `maqraa-cli login` first", LogLevel::Warning);
            }
        }

        self.client = Some(client);
        self.reload_current().await;
        Ok(())
    }

    fn log_event(&mut self, message: &str, level: LogLevel) {
        if level == LogLevel::Error {
            self.error_message = Some(message.to_string());
        }
        self.log.push_front(LogEntry {
            timestamp: Utc::now(),
            message: message.to_string(),
            level,
        });
        if self.log.len() > 100 {
            self.log.pop_back();
        }
    }

    /// Number of loaded rows in the current tab.
    pub fn current_len(&self) -> usize {
        match self.tab {
            Tab::Students => self.students.pager.items().len(),
            Tab::Teachers => self.teachers.pager.items().len(),
            Tab::Managers => self.managers.pager.items().len(),
            Tab::Circles => self.circles.pager.items().len(),
        }
    }

    /// Total rows the backend reports for the current tab.
    pub fn current_total(&self) -> u64 {
        match self.tab {
            Tab::Students => self.students.pager.total_count(),
            Tab::Teachers => self.teachers.pager.total_count(),
            Tab::Managers => self.managers.pager.total_count(),
            Tab::Circles => self.circles.pager.total_count(),
        }
    }

    pub fn current_selected(&self) -> usize {
        match self.tab {
            Tab::Students => self.students.selected,
            Tab::Teachers => self.teachers.selected,
            Tab::Managers => self.managers.selected,
            Tab::Circles => self.circles.selected,
        }
    }

    pub fn current_loading(&self) -> bool {
        match self.tab {
            Tab::Students => self.students.pager.is_loading(),
            Tab::Teachers => self.teachers.pager.is_loading(),
            Tab::Managers => self.managers.pager.is_loading(),
            Tab::Circles => self.circles.pager.is_loading(),
        }
    }

    pub fn current_search(&self) -> Option<&str> {
        match self.tab {
            Tab::Students => self.students.pager.search_term(),
            Tab::Teachers => self.teachers.pager.search_term(),
            Tab::Managers => self.managers.pager.search_term(),
            Tab::Circles => self.circles.pager.search_term(),
        }
    }

    fn set_selected(&mut self, selected: usize) {
        match self.tab {
            Tab::Students => self.students.selected = selected,
            Tab::Teachers => self.teachers.selected = selected,
            Tab::Managers => self.managers.selected = selected,
            Tab::Circles => self.circles.selected = selected,
        }
    }

    async fn load_users(&mut self, role: UserRole, plan: LoadPlan) {
        let Some(client) = self.client.clone() else {
            return;
        };
        let result = client
            .list_users()
            .request(plan.request.clone())
            .role(role)
            .send()
            .await;
        let view = match role {
            UserRole::Student => &mut self.students,
            UserRole::Teacher => &mut self.teachers,
            UserRole::Manager => &mut self.managers,
        };
        match result {
            Ok(page) => {
                view.pager.apply_page(plan.generation, page);
                view.clamp_selection();
            }
            Err(e) => {
                view.pager.fail(plan.generation);
                self.log_event(&format!("Failed to load roster: {e}"), LogLevel::Error);
            }
        }
    }

    async fn load_circles(&mut self, plan: LoadPlan) {
        let Some(client) = self.client.clone() else {
            return;
        };
        match client.list_circles().request(plan.request.clone()).send().await {
            Ok(page) => {
                self.circles.pager.apply_page(plan.generation, page);
                self.circles.clamp_selection();
            }
            Err(e) => {
                self.circles.pager.fail(plan.generation);
                self.log_event(&format!("Failed to load circles: {e}"), LogLevel::Error);
            }
        }
    }

    async fn dispatch(&mut self, plan: LoadPlan) {
        match self.tab {
            Tab::Students => self.load_users(UserRole::Student, plan).await,
            Tab::Teachers => self.load_users(UserRole::Teacher, plan).await,
            Tab::Managers => self.load_users(UserRole::Manager, plan).await,
            Tab::Circles => self.load_circles(plan).await,
        }
    }

    async fn reload_current(&mut self) {
        let plan = match self.tab {
            Tab::Students => self.students.pager.reload(),
            Tab::Teachers => self.teachers.pager.reload(),
            Tab::Managers => self.managers.pager.reload(),
            Tab::Circles => self.circles.pager.reload(),
        };
        self.dispatch(plan).await;
    }

    /// Lazily load a tab the first time it is shown.
    async fn ensure_loaded(&mut self) {
        let needs_load = self.current_len() == 0 && !self.current_loading();
        if needs_load {
            self.reload_current().await;
        }
    }

    async fn apply_search(&mut self) {
        let query = std::mem::take(&mut self.search_query);
        self.search_active = false;
        self.set_selected(0);
        let plan = match self.tab {
            Tab::Students => self.students.pager.apply_search(query),
            Tab::Teachers => self.teachers.pager.apply_search(query),
            Tab::Managers => self.managers.pager.apply_search(query),
            Tab::Circles => self.circles.pager.apply_search(query),
        };
        self.dispatch(plan).await;
    }

    /// Load the next page when the cursor runs near the end of the window.
    async fn maybe_load_more(&mut self) {
        let len = self.current_len();
        if len == 0 || self.current_selected() + SCROLL_AHEAD < len {
            return;
        }
        let plan = match self.tab {
            Tab::Students => self.students.pager.next_page(),
            Tab::Teachers => self.teachers.pager.next_page(),
            Tab::Managers => self.managers.pager.next_page(),
            Tab::Circles => self.circles.pager.next_page(),
        };
        if let Some(plan) = plan {
            self.dispatch(plan).await;
        }
    }

    async fn load_details(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };
        match self.tab {
            Tab::Students | Tab::Teachers | Tab::Managers => {
                let view = match self.tab {
                    Tab::Students => &self.students,
                    Tab::Teachers => &self.teachers,
                    _ => &self.managers,
                };
                if let Some(user) = view.pager.items().get(view.selected).cloned() {
                    self.details = Some(Details::User(user));
                    self.focus = Focus::Details;
                }
            }
            Tab::Circles => {
                let Some(circle) = self
                    .circles
                    .pager
                    .items()
                    .get(self.circles.selected)
                    .cloned()
                else {
                    return;
                };
                match client.list_circle_members(circle.id).await {
                    Ok(members) => {
                        self.details = Some(Details::Circle { circle, members });
                        self.focus = Focus::Details;
                    }
                    Err(e) => {
                        self.log_event(&format!("Failed to load members: {e}"), LogLevel::Error);
                    }
                }
            }
        }
    }

    /// Handle an action
    pub async fn handle_action(&mut self, action: Action) -> Result<()> {
        if action != Action::Tick && action != Action::None {
            self.error_message = None;
        }
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            Action::Up => {
                let selected = self.current_selected();
                if selected > 0 {
                    self.set_selected(selected - 1);
                }
            }
            Action::Down => {
                let selected = self.current_selected();
                if selected + 1 < self.current_len() {
                    self.set_selected(selected + 1);
                }
                self.maybe_load_more().await;
            }
            Action::First => {
                self.set_selected(0);
            }
            Action::Last => {
                self.set_selected(self.current_len().saturating_sub(1));
                self.maybe_load_more().await;
            }
            Action::Select => {
                self.load_details().await;
            }
            Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else if self.search_active {
                    self.search_active = false;
                    self.search_query.clear();
                } else if self.details.is_some() {
                    self.details = None;
                    self.focus = Focus::Roster;
                }
            }
            Action::Help => {
                self.show_help = !self.show_help;
            }
            Action::NextTab => {
                self.tab = self.tab.next();
                self.details = None;
                self.focus = Focus::Roster;
                self.ensure_loaded().await;
            }
            Action::PrevTab => {
                self.tab = self.tab.prev();
                self.details = None;
                self.focus = Focus::Roster;
                self.ensure_loaded().await;
            }
            Action::ToggleFocus => {
                self.focus = match self.focus {
                    Focus::Roster => Focus::Details,
                    Focus::Details => Focus::Log,
                    Focus::Log => Focus::Roster,
                };
            }
            Action::Refresh => {
                self.reload_current().await;
            }
            Action::StartSearch => {
                self.search_active = true;
                self.search_query.clear();
            }
            Action::SearchInput(c) => {
                if self.search_active {
                    self.search_query.push(c);
                }
            }
            Action::SearchBackspace => {
                if self.search_active {
                    self.search_query.pop();
                }
            }
            Action::ApplySearch => {
                self.apply_search().await;
            }
            Action::Render | Action::None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maqraa_api::page::PagedResult;

    fn users(n: usize) -> Vec<LookupUser> {
        (0..n)
            .map(|i| LookupUser {
                id: i as i64 + 1,
                ..LookupUser::default()
            })
            .collect()
    }

    #[tokio::test]
    async fn search_resets_selection() {
        let mut app = App::new(ClientConfig::default());
        let plan = app.students.pager.reload();
        app.students.pager.apply_page(
            plan.generation,
            PagedResult {
                total_count: 30,
                items: users(10),
            },
        );
        app.students.selected = 7;

        app.handle_action(Action::StartSearch).await.unwrap();
        for c in "omar".chars() {
            app.handle_action(Action::SearchInput(c)).await.unwrap();
        }
        // no client connected, the load is a no-op, but the state resets
        app.handle_action(Action::ApplySearch).await.unwrap();

        assert_eq!(app.students.selected, 0);
        assert!(!app.search_active);
        assert_eq!(app.students.pager.search_term(), Some("omar"));
    }

    #[tokio::test]
    async fn selection_stays_in_bounds() {
        let mut app = App::new(ClientConfig::default());
        let plan = app.students.pager.reload();
        app.students.pager.apply_page(
            plan.generation,
            PagedResult {
                total_count: 2,
                items: users(2),
            },
        );

        app.handle_action(Action::Down).await.unwrap();
        app.handle_action(Action::Down).await.unwrap();
        app.handle_action(Action::Down).await.unwrap();
        assert_eq!(app.students.selected, 1);

        app.handle_action(Action::Up).await.unwrap();
        assert_eq!(app.students.selected, 0);
    }

    #[tokio::test]
    async fn help_toggles_and_esc_closes() {
        let mut app = App::new(ClientConfig::default());
        app.handle_action(Action::Help).await.unwrap();
        assert!(app.show_help);
        app.handle_action(Action::Back).await.unwrap();
        assert!(!app.show_help);
    }

    #[tokio::test]
    async fn tab_cycle_wraps() {
        let mut app = App::new(ClientConfig::default());
        for _ in 0..4 {
            app.handle_action(Action::NextTab).await.unwrap();
        }
        assert_eq!(app.tab, Tab::Students);
        app.handle_action(Action::PrevTab).await.unwrap();
        assert_eq!(app.tab, Tab::Circles);
    }
}
