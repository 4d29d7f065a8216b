use crate::error::AppError;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Session-side record of a simulated operation in flight.
#[derive(Debug, Clone)]
pub struct ProgressRun {
    started_at: Instant,
    total_steps: u32,
    current_step: u32,
}

impl ProgressRun {
    pub fn new(total_steps: u32) -> Self {
        Self {
            started_at: Instant::now(),
            total_steps,
            current_step: 0,
        }
    }

    /// Moves to `step` if it is ahead of the current step and within bounds.
    /// Returns whether the run advanced.
    pub fn advance_to(&mut self, step: u32) -> bool {
        if step <= self.current_step || step > self.total_steps {
            return false;
        }
        self.current_step = step;
        true
    }

    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn fraction(&self) -> f32 {
        if self.total_steps == 0 {
            return 1.0;
        }
        self.current_step as f32 / self.total_steps as f32
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Completed,
}

/// Terminal signal of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSignal {
    pub total_steps: u32,
}

/// Observes a run's phase without owning its timer.
#[derive(Debug, Clone)]
pub struct RunWatcher {
    phase: watch::Receiver<RunPhase>,
    total_steps: u32,
}

impl RunWatcher {
    pub fn phase(&self) -> RunPhase {
        *self.phase.borrow()
    }

    /// Waits for the terminal tick. Fails if the timer went away first.
    pub async fn completed(&mut self) -> Result<RunSignal, AppError> {
        let total_steps = self.total_steps;
        self.phase
            .wait_for(|phase| *phase == RunPhase::Completed)
            .await
            .map(|_| RunSignal { total_steps })
            .map_err(|_| AppError::RunCancelled)
    }
}

/// Owns the timer task of a run. Dropping the handle aborts the timer.
#[derive(Debug)]
pub struct RunHandle {
    task: JoinHandle<()>,
    watcher: RunWatcher,
}

impl RunHandle {
    pub fn phase(&self) -> RunPhase {
        self.watcher.phase()
    }

    pub fn watcher(&self) -> RunWatcher {
        self.watcher.clone()
    }

    /// True once the terminal tick went out, even if the task has not
    /// returned yet.
    pub fn is_finished(&self) -> bool {
        self.phase() == RunPhase::Completed || self.task.is_finished()
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Calls `on_tick` with 0, 1, ..., `total_steps`, one step per `tick_interval`
/// (step 0 immediately). Must be called from within a tokio runtime.
pub fn run<F>(total_steps: u32, tick_interval: Duration, mut on_tick: F) -> RunHandle
where
    F: FnMut(u32) + Send + 'static,
{
    let (phase_tx, phase_rx) = watch::channel(RunPhase::Idle);
    let period = tick_interval.max(Duration::from_millis(1));

    let task = tokio::spawn(async move {
        phase_tx.send_replace(RunPhase::Running);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        for step in 0..=total_steps {
            interval.tick().await;
            on_tick(step);
        }

        phase_tx.send_replace(RunPhase::Completed);
    });

    RunHandle {
        task,
        watcher: RunWatcher {
            phase: phase_rx,
            total_steps,
        },
    }
}
