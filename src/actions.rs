use crate::error::AppError;
use crate::progress::ProgressRun;
use crate::state::{
    ActiveRun, Notice, Preferences, RunId, RunKind, SessionState, View,
};
use tracing::{debug, info, warn};

/// A user gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Connect,
    Navigate(View),
    ScanInbox,
    RefreshData,
    BackupImportant,
    StartSpamCleanup,
    OrganizeInbox,
    BulkUnsubscribe,
    ViewAnalytics,
    SaveSettings(Preferences),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Connected,
    ViewChanged(View),
    RunStarted(RunKind),
    RunProgress { kind: RunKind, step: u32 },
    RunFinished(RunKind),
    RunCancelled(RunKind),
    SettingsSaved,
    NoticePosted,
}

/// Notified after every session mutation so the view can re-render.
pub trait StateObserver {
    fn state_changed(&self, change: &StateChange);
}

/// Starts and stops simulated runs off the UI thread.
pub trait RunLauncher {
    fn start(&self, id: RunId, kind: RunKind);
    fn cancel(&self, id: RunId);
}

#[derive(Debug)]
pub struct ActionHandlers<L, O> {
    launcher: L,
    observer: O,
}

impl<L: RunLauncher, O: StateObserver> ActionHandlers<L, O> {
    pub fn new(launcher: L, observer: O) -> Self {
        Self { launcher, observer }
    }

    /// Runs the handler for `action` and posts its notice, if any. Rejections
    /// are logged and never reach the user.
    pub fn dispatch(&self, state: &mut SessionState, action: Action) {
        debug!(?action, "Dispatching action");
        let notice = match action {
            Action::Connect => {
                self.connect(state);
                None
            }
            Action::Navigate(view) => {
                self.navigate(state, view);
                None
            }
            Action::ScanInbox => Some(Self::scan_inbox()),
            Action::RefreshData => Some(Self::refresh_data()),
            Action::BackupImportant => Some(Self::backup_important()),
            Action::StartSpamCleanup => {
                log_rejection(self.start_spam_cleanup(state));
                None
            }
            Action::OrganizeInbox => {
                log_rejection(self.organize_inbox(state));
                None
            }
            Action::BulkUnsubscribe => Some(Self::bulk_unsubscribe()),
            Action::ViewAnalytics => Some(Self::view_analytics()),
            Action::SaveSettings(preferences) => Some(self.save_settings(state, preferences)),
        };

        if let Some(notice) = notice {
            self.post(state, notice);
        }
    }

    fn post(&self, state: &mut SessionState, notice: Notice) {
        state.push_notice(notice);
        self.observer.state_changed(&StateChange::NoticePosted);
    }

    fn emit(&self, change: StateChange) {
        self.observer.state_changed(&change);
    }

    /// Returns whether the session changed.
    pub fn connect(&self, state: &mut SessionState) -> bool {
        if state.connected {
            return false;
        }
        state.connected = true;
        info!("Connected to email account");
        self.emit(StateChange::Connected);
        true
    }

    /// Switches panels. Leaving Cleanup Tools tears down its runs.
    pub fn navigate(&self, state: &mut SessionState, view: View) {
        if state.current_view == view {
            return;
        }
        if state.current_view == View::CleanupTools {
            self.cancel_runs(state);
        }
        state.current_view = view;
        self.emit(StateChange::ViewChanged(view));
    }

    fn cancel_runs(&self, state: &mut SessionState) {
        for (kind, active) in state.runs.drain() {
            info!("Cancelling {} (run {})", kind, active.id);
            self.launcher.cancel(active.id);
            self.observer.state_changed(&StateChange::RunCancelled(kind));
        }
    }

    pub fn scan_inbox() -> Notice {
        Notice::success("Inbox scanned successfully!")
    }

    pub fn refresh_data() -> Notice {
        Notice::success("Data refreshed!")
    }

    pub fn backup_important() -> Notice {
        Notice::success("Important emails backed up!")
    }

    pub fn start_spam_cleanup(&self, state: &mut SessionState) -> Result<RunId, AppError> {
        self.start_run(state, RunKind::SpamCleanup)
    }

    pub fn organize_inbox(&self, state: &mut SessionState) -> Result<RunId, AppError> {
        self.start_run(state, RunKind::OrganizeInbox)
    }

    fn start_run(&self, state: &mut SessionState, kind: RunKind) -> Result<RunId, AppError> {
        if state.is_running(kind) {
            return Err(AppError::ConcurrentRunRejected(kind));
        }
        let id = state.allocate_run_id();
        state.runs.insert(
            kind,
            ActiveRun {
                id,
                run: ProgressRun::new(RunKind::TOTAL_STEPS),
            },
        );
        info!("{} started (run {})", kind, id);
        self.launcher.start(id, kind);
        self.emit(StateChange::RunStarted(kind));
        Ok(id)
    }

    pub fn bulk_unsubscribe() -> Notice {
        Notice::info("Found 23 newsletters to unsubscribe from")
    }

    pub fn view_analytics() -> Notice {
        Notice::info("Analytics dashboard coming up!")
    }

    /// Accepts any combination and echoes it into the session.
    pub fn save_settings(&self, state: &mut SessionState, preferences: Preferences) -> Notice {
        info!(?preferences, "Settings saved");
        state.saved_preferences = Some(preferences);
        self.emit(StateChange::SettingsSaved);
        Notice::success("Settings saved successfully!")
    }

    /// Applies a background tick. Ticks for unknown or stale runs are dropped.
    pub fn apply_tick(&self, state: &mut SessionState, id: RunId, kind: RunKind, step: u32) {
        let Some(active) = state.runs.get_mut(&kind) else {
            return;
        };
        if active.id == id && active.run.advance_to(step) {
            self.emit(StateChange::RunProgress { kind, step });
        }
    }

    /// Finishes a run and posts its fixed outcome. Returns the notice when the
    /// run was the one in flight.
    pub fn complete_run(
        &self,
        state: &mut SessionState,
        id: RunId,
        kind: RunKind,
    ) -> Option<Notice> {
        if state.active_run(kind).map(|active| active.id) != Some(id) {
            debug!("Ignoring completion of stale run {}", id);
            return None;
        }
        if let Some(active) = state.runs.remove(&kind) {
            info!("{} finished in {:?}", kind, active.run.elapsed());
        }
        self.emit(StateChange::RunFinished(kind));

        let notice = Notice::success(kind.completion_message());
        self.post(state, notice.clone());
        Some(notice)
    }

    /// The background side refused to start `id`; forget it.
    pub fn reject_run(&self, state: &mut SessionState, id: RunId, kind: RunKind) {
        if state.active_run(kind).map(|active| active.id) == Some(id) {
            state.runs.remove(&kind);
            warn!("{}", AppError::ConcurrentRunRejected(kind));
            self.emit(StateChange::RunCancelled(kind));
        }
    }
}

fn log_rejection(result: Result<RunId, AppError>) {
    if let Err(e) = result {
        warn!("{}", e);
    }
}
