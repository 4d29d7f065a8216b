use crate::actions::{ActionHandlers, RunLauncher, StateObserver};
use crate::error::AppError;
use crate::progress::{self, RunHandle};
use crate::state::{RunId, RunKind, SessionState};
use std::collections::HashMap;
use std::sync::mpsc as std_mpsc;
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub enum UiCommand {
    StartRun { id: RunId, kind: RunKind },
    CancelRun { id: RunId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundEvent {
    RunTick { id: RunId, kind: RunKind, step: u32 },
    RunComplete { id: RunId, kind: RunKind },
    RunRejected { id: RunId, kind: RunKind },
}

#[derive(Debug)]
pub struct BridgeChannels {
    pub cmd_tx: tokio_mpsc::UnboundedSender<UiCommand>,
    pub event_rx: std_mpsc::Receiver<BackgroundEvent>,
}

impl RunLauncher for tokio_mpsc::UnboundedSender<UiCommand> {
    fn start(&self, id: RunId, kind: RunKind) {
        if let Err(e) = self.send(UiCommand::StartRun { id, kind }) {
            warn!("Failed to send start command to background: {}", e);
        }
    }

    fn cancel(&self, id: RunId) {
        if let Err(e) = self.send(UiCommand::CancelRun { id }) {
            warn!("Failed to send cancel command to background: {}", e);
        }
    }
}

/// Feeds every pending background event to the handlers.
pub fn drain_events<L: RunLauncher, O: StateObserver>(
    event_rx: &std_mpsc::Receiver<BackgroundEvent>,
    handlers: &ActionHandlers<L, O>,
    state: &mut SessionState,
) {
    while let Ok(event) = event_rx.try_recv() {
        match event {
            BackgroundEvent::RunTick { id, kind, step } => {
                handlers.apply_tick(state, id, kind, step);
            }
            BackgroundEvent::RunComplete { id, kind } => {
                handlers.complete_run(state, id, kind);
            }
            BackgroundEvent::RunRejected { id, kind } => {
                handlers.reject_run(state, id, kind);
            }
        }
    }
}

pub fn setup_bridge(ctx: egui::Context) -> BridgeChannels {
    let (cmd_tx, cmd_rx) = tokio_mpsc::unbounded_channel::<UiCommand>();
    let (event_tx, event_rx) = std_mpsc::channel::<BackgroundEvent>();

    std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!("Failed to create tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(background_loop(cmd_rx, event_tx, move || {
            ctx.request_repaint();
        }));
        info!("Background loop stopped");
    });

    BridgeChannels { cmd_tx, event_rx }
}

/// Serves commands until the UI drops its sender. Runs still in flight at
/// that point are aborted along with their handles.
async fn background_loop<N>(
    mut cmd_rx: tokio_mpsc::UnboundedReceiver<UiCommand>,
    event_tx: std_mpsc::Sender<BackgroundEvent>,
    notify: N,
) where
    N: Fn() + Clone + Send + 'static,
{
    let mut runs: HashMap<RunId, (RunKind, RunHandle)> = HashMap::new();

    while let Some(cmd) = cmd_rx.recv().await {
        runs.retain(|_, (_, handle)| !handle.is_finished());

        match cmd {
            UiCommand::StartRun { id, kind } => {
                if runs.values().any(|(running, _)| *running == kind) {
                    warn!("{}", AppError::ConcurrentRunRejected(kind));
                    send_event(&event_tx, &notify, BackgroundEvent::RunRejected { id, kind });
                    continue;
                }
                let handle = start_run(id, kind, event_tx.clone(), notify.clone());
                runs.insert(id, (kind, handle));
            }
            UiCommand::CancelRun { id } => {
                if let Some((kind, handle)) = runs.remove(&id) {
                    info!("Stopping {} timer (run {}, {:?})", kind, id, handle.phase());
                    handle.cancel();
                }
            }
        }
    }
}

fn start_run<N>(
    id: RunId,
    kind: RunKind,
    tx: std_mpsc::Sender<BackgroundEvent>,
    notify: N,
) -> RunHandle
where
    N: Fn() + Clone + Send + 'static,
{
    let handle = {
        let tx = tx.clone();
        let notify = notify.clone();
        progress::run(RunKind::TOTAL_STEPS, kind.tick_interval(), move |step| {
            send_event(&tx, &notify, BackgroundEvent::RunTick { id, kind, step });
        })
    };

    let mut watcher = handle.watcher();
    tokio::spawn(async move {
        match watcher.completed().await {
            Ok(signal) => {
                debug!("{} run {} finished after {} steps", kind, id, signal.total_steps);
                send_event(&tx, &notify, BackgroundEvent::RunComplete { id, kind });
            }
            Err(e) => debug!("{} run {}: {}", kind, id, e),
        }
    });

    handle
}

fn send_event<N: Fn()>(
    tx: &std_mpsc::Sender<BackgroundEvent>,
    notify: &N,
    evt: BackgroundEvent,
) {
    if let Err(e) = tx.send(evt) {
        warn!("Failed to send run event to UI: {}", e);
    }
    notify();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::tests::Recorder;
    use crate::actions::{Action, StateChange};
    use crate::state::Notice;
    use std::time::Duration;

    fn spawn_loop() -> (
        tokio_mpsc::UnboundedSender<UiCommand>,
        std_mpsc::Receiver<BackgroundEvent>,
        tokio::task::JoinHandle<()>,
    ) {
        let (cmd_tx, cmd_rx) = tokio_mpsc::unbounded_channel();
        let (event_tx, event_rx) = std_mpsc::channel();
        let task = tokio::spawn(background_loop(cmd_rx, event_tx, || {}));
        (cmd_tx, event_rx, task)
    }

    #[tokio::test(start_paused = true)]
    async fn run_emits_every_tick_then_completes() {
        let (cmd_tx, event_rx, task) = spawn_loop();
        cmd_tx.start(1, RunKind::SpamCleanup);

        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(cmd_tx);
        task.await.unwrap();

        let events: Vec<_> = event_rx.try_iter().collect();
        let steps: Vec<u32> = events
            .iter()
            .filter_map(|e| match e {
                BackgroundEvent::RunTick { step, .. } => Some(*step),
                _ => None,
            })
            .collect();
        assert_eq!(steps, (0..=100).collect::<Vec<_>>());
        assert_eq!(
            events.last(),
            Some(&BackgroundEvent::RunComplete {
                id: 1,
                kind: RunKind::SpamCleanup
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn duplicate_start_is_rejected() {
        let (cmd_tx, event_rx, task) = spawn_loop();
        cmd_tx.start(1, RunKind::OrganizeInbox);
        cmd_tx.start(2, RunKind::OrganizeInbox);

        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(cmd_tx);
        task.await.unwrap();

        let events: Vec<_> = event_rx.try_iter().collect();
        assert!(events.contains(&BackgroundEvent::RunRejected {
            id: 2,
            kind: RunKind::OrganizeInbox
        }));
        let completions = events
            .iter()
            .filter(|e| matches!(e, BackgroundEvent::RunComplete { .. }))
            .count();
        assert_eq!(completions, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_the_timer() {
        let (cmd_tx, event_rx, task) = spawn_loop();
        cmd_tx.start(1, RunKind::SpamCleanup);
        tokio::time::sleep(Duration::from_millis(100)).await;
        cmd_tx.cancel(1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(cmd_tx);
        task.await.unwrap();

        let events: Vec<_> = event_rx.try_iter().collect();
        assert!(!events.is_empty());
        assert!(events.len() < 101);
        assert!(!events
            .iter()
            .any(|e| matches!(e, BackgroundEvent::RunComplete { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn finished_run_can_start_again() {
        let (cmd_tx, event_rx, task) = spawn_loop();
        cmd_tx.start(1, RunKind::SpamCleanup);
        tokio::time::sleep(Duration::from_secs(5)).await;
        cmd_tx.start(2, RunKind::SpamCleanup);
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(cmd_tx);
        task.await.unwrap();

        let completed: Vec<RunId> = event_rx
            .try_iter()
            .filter_map(|e| match e {
                BackgroundEvent::RunComplete { id, .. } => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(completed, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn spam_cleanup_completes_with_fixed_count() {
        let (cmd_tx, event_rx, task) = spawn_loop();
        let recorder = Recorder::default();
        let h = ActionHandlers::new(cmd_tx, &recorder);
        let mut state = SessionState::default();

        h.dispatch(&mut state, Action::StartSpamCleanup);
        assert!(state.is_running(RunKind::SpamCleanup));

        tokio::time::sleep(Duration::from_secs(5)).await;
        drain_events(&event_rx, &h, &mut state);

        assert!(!state.is_running(RunKind::SpamCleanup));
        assert_eq!(
            state.latest_notice(),
            Some(&Notice::success("Removed 127 spam emails!"))
        );
        let changes = recorder.changes.borrow();
        let last_step = changes.iter().rev().find_map(|c| match c {
            StateChange::RunProgress { step, .. } => Some(*step),
            _ => None,
        });
        assert_eq!(last_step, Some(RunKind::TOTAL_STEPS));
        assert!(changes.contains(&StateChange::RunFinished(RunKind::SpamCleanup)));
        drop(changes);

        drop(h);
        task.await.unwrap();
    }
}
