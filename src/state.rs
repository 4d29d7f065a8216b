use crate::error::AppError;
use crate::progress::ProgressRun;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    CleanupTools,
    Analytics,
    Settings,
}

impl View {
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::CleanupTools,
        View::Analytics,
        View::Settings,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::CleanupTools => "Cleanup Tools",
            View::Analytics => "Analytics",
            View::Settings => "Settings",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::CleanupTools => "cleanup_tools",
            View::Analytics => "analytics",
            View::Settings => "settings",
        }
    }

    /// Resolves a navigation key. Accepts the snake_case key or any selector
    /// label containing the view title (e.g. "📊 Dashboard").
    pub fn from_key(key: &str) -> Result<Self, AppError> {
        let trimmed = key.trim();
        View::ALL
            .into_iter()
            .find(|view| {
                trimmed.eq_ignore_ascii_case(view.key()) || trimmed.contains(view.title())
            })
            .ok_or_else(|| AppError::InvalidView(trimmed.to_string()))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

pub type RunId = u64;

/// The two simulated long-running cleanup operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
    SpamCleanup,
    OrganizeInbox,
}

impl RunKind {
    pub const TOTAL_STEPS: u32 = 100;

    pub fn tick_interval(self) -> Duration {
        match self {
            RunKind::SpamCleanup => Duration::from_millis(20),
            RunKind::OrganizeInbox => Duration::from_millis(30),
        }
    }

    /// Fixed outcome count. Not derived from any mailbox data.
    pub fn result_count(self) -> u32 {
        match self {
            RunKind::SpamCleanup => 127,
            RunKind::OrganizeInbox => 234,
        }
    }

    pub fn running_label(self) -> &'static str {
        match self {
            RunKind::SpamCleanup => "Cleaning spam emails...",
            RunKind::OrganizeInbox => "Organizing emails...",
        }
    }

    pub fn completion_message(self) -> String {
        match self {
            RunKind::SpamCleanup => format!("Removed {} spam emails!", self.result_count()),
            RunKind::OrganizeInbox => {
                format!("Organized {} emails into folders!", self.result_count())
            }
        }
    }
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunKind::SpamCleanup => f.write_str("Spam cleanup"),
            RunKind::OrganizeInbox => f.write_str("Inbox organization"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActiveRun {
    pub id: RunId,
    pub run: ProgressRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKey {
    TotalEmails,
    CleanedEmails,
    SpaceSaved,
    TimeSaved,
    EmailsProcessed,
}

impl MetricKey {
    pub fn default_value(self) -> MetricValue {
        match self {
            MetricKey::TotalEmails | MetricKey::EmailsProcessed => MetricValue::Count(1247),
            MetricKey::CleanedEmails => MetricValue::Count(342),
            MetricKey::SpaceSaved => MetricValue::Label("2.4 GB".to_string()),
            MetricKey::TimeSaved => MetricValue::Label("5.2 hrs".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricValue {
    Count(u64),
    Label(String),
}

impl MetricValue {
    pub fn as_count(&self) -> Option<u64> {
        match self {
            MetricValue::Count(n) => Some(*n),
            MetricValue::Label(_) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{n}"),
            MetricValue::Label(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    Gmail,
    Outlook,
    Yahoo,
    Other,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Gmail,
        Provider::Outlook,
        Provider::Yahoo,
        Provider::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Provider::Gmail => "Gmail",
            Provider::Outlook => "Outlook",
            Provider::Yahoo => "Yahoo",
            Provider::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub provider: Provider,
    pub keep_important: bool,
    pub backup_before_cleanup: bool,
    pub auto_organize: bool,
    pub smart_filters: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            provider: Provider::Gmail,
            keep_important: true,
            backup_before_cleanup: true,
            auto_organize: true,
            smart_filters: true,
        }
    }
}

/// Control panel checkboxes. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarToggles {
    pub auto_cleanup: bool,
    pub safe_mode: bool,
    pub notifications: bool,
}

impl Default for SidebarToggles {
    fn default() -> Self {
        Self {
            auto_cleanup: true,
            safe_mode: true,
            notifications: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }
}

const MAX_NOTICES: usize = 8;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) connected: bool,
    pub(crate) current_view: View,
    pub(crate) metrics: HashMap<MetricKey, MetricValue>,
    pub(crate) saved_preferences: Option<Preferences>,
    pub(crate) runs: HashMap<RunKind, ActiveRun>,
    pub(crate) notices: Vec<Notice>,
    pub(crate) next_run_id: RunId,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            connected: false,
            current_view: View::Dashboard,
            metrics: HashMap::new(),
            saved_preferences: None,
            runs: HashMap::new(),
            notices: Vec::new(),
            next_run_id: 1,
        }
    }
}

impl SessionState {
    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Session value for `key`, or its default when never set.
    pub fn get(&self, key: MetricKey) -> MetricValue {
        self.metrics
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.default_value())
    }

    // Only handlers write here; none of the current ones touch metrics.
    #[allow(dead_code)]
    pub fn set(&mut self, key: MetricKey, value: MetricValue) {
        self.metrics.insert(key, value);
    }

    pub fn saved_preferences(&self) -> Option<&Preferences> {
        self.saved_preferences.as_ref()
    }

    pub fn active_run(&self, kind: RunKind) -> Option<&ActiveRun> {
        self.runs.get(&kind)
    }

    pub fn is_running(&self, kind: RunKind) -> bool {
        self.runs.contains_key(&kind)
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn latest_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub(crate) fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() == MAX_NOTICES {
            self.notices.remove(0);
        }
        self.notices.push(notice);
    }

    pub(crate) fn allocate_run_id(&mut self) -> RunId {
        let id = self.next_run_id;
        self.next_run_id += 1;
        id
    }
}

/// Owns the one `SessionState` of a session. Reads before `init_if_absent`
/// see nothing rather than a partial state.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: Option<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn init_if_absent(&mut self) -> &mut SessionState {
        self.state.get_or_insert_with(|| {
            info!("Session state initialized");
            SessionState::default()
        })
    }

    pub fn get(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// Ends the session, handing back whatever state it held.
    pub fn end(&mut self) -> Option<SessionState> {
        let state = self.state.take();
        if state.is_some() {
            info!("Session ended");
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_is_empty_until_initialized() {
        let store = SessionStore::new();
        assert!(store.get().is_none());
    }

    #[test]
    fn init_if_absent_is_idempotent() {
        let mut store = SessionStore::new();
        store.init_if_absent().connected = true;
        let state = store.init_if_absent();
        assert!(state.connected());
        assert_eq!(state.current_view(), View::Dashboard);
    }

    #[test]
    fn fresh_state_defaults() {
        let mut store = SessionStore::new();
        let state = store.init_if_absent();
        assert!(!state.connected());
        assert_eq!(state.current_view(), View::Dashboard);
        assert!(state.notices().is_empty());
    }

    #[test]
    fn end_drops_state() {
        let mut store = SessionStore::new();
        store.init_if_absent();
        assert!(store.end().is_some());
        assert!(store.get().is_none());
        assert!(store.end().is_none());
    }

    #[test]
    fn metric_get_falls_back_to_default() {
        let mut state = SessionState::default();
        assert_eq!(state.get(MetricKey::TotalEmails), MetricValue::Count(1247));
        assert_eq!(
            state.get(MetricKey::SpaceSaved),
            MetricValue::Label("2.4 GB".to_string())
        );

        state.set(MetricKey::TotalEmails, MetricValue::Count(10));
        assert_eq!(state.get(MetricKey::TotalEmails), MetricValue::Count(10));
        assert_eq!(state.get(MetricKey::CleanedEmails), MetricValue::Count(342));
    }

    #[test]
    fn view_from_key_accepts_keys_and_labels() {
        for view in View::ALL {
            assert_eq!(View::from_key(view.key()).unwrap(), view);
            assert_eq!(View::from_key(view.title()).unwrap(), view);
        }
        assert_eq!(View::from_key("📈 Analytics").unwrap(), View::Analytics);
        assert_eq!(View::from_key(" SETTINGS ").unwrap(), View::Settings);
    }

    #[test]
    fn view_from_unknown_key_is_invalid() {
        assert_eq!(
            View::from_key("inbox"),
            Err(AppError::InvalidView("inbox".to_string()))
        );
    }

    #[test]
    fn notices_are_capped() {
        let mut state = SessionState::default();
        for i in 0..20 {
            state.push_notice(Notice::info(format!("n{i}")));
        }
        assert_eq!(state.notices().len(), MAX_NOTICES);
        assert_eq!(state.latest_notice().unwrap().text, "n19");
    }

    #[test]
    fn run_kinds_report_fixed_counts() {
        assert_eq!(RunKind::SpamCleanup.result_count(), 127);
        assert_eq!(RunKind::OrganizeInbox.result_count(), 234);
        assert_eq!(
            RunKind::SpamCleanup.completion_message(),
            "Removed 127 spam emails!"
        );
        assert_ne!(
            RunKind::SpamCleanup.tick_interval(),
            RunKind::OrganizeInbox.tick_interval()
        );
    }
}
