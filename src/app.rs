use crate::actions::{ActionHandlers, StateChange, StateObserver};
use crate::bridge::{self, BackgroundEvent, UiCommand};
use crate::config::BotConfig;
use crate::metrics;
use crate::router;
use crate::state::SessionStore;
use crate::ui::{self, sidebar, FormState};
use std::fmt;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, trace};

/// Repaints whenever the session changes.
#[derive(Clone)]
pub struct RepaintObserver(egui::Context);

impl fmt::Debug for RepaintObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RepaintObserver")
    }
}

impl StateObserver for RepaintObserver {
    fn state_changed(&self, change: &StateChange) {
        match change {
            StateChange::ViewChanged(view) => debug!("Showing {}", view),
            StateChange::RunStarted(kind)
            | StateChange::RunFinished(kind)
            | StateChange::RunCancelled(kind) => debug!("{}: {:?}", kind, change),
            StateChange::RunProgress { kind, step } => trace!("{} at step {}", kind, step),
            _ => {}
        }
        self.0.request_repaint();
    }
}

type Handlers = ActionHandlers<UnboundedSender<UiCommand>, RepaintObserver>;

#[derive(Debug)]
pub struct SmartEmailCleanerApp {
    session: SessionStore,
    config: BotConfig,
    form: FormState,
    handlers: Handlers,
    event_rx: std::sync::mpsc::Receiver<BackgroundEvent>,
}

impl SmartEmailCleanerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let channels = bridge::setup_bridge(cc.egui_ctx.clone());
        let mut session = SessionStore::new();
        let view = session.init_if_absent().current_view();
        Self {
            session,
            config: BotConfig::from_env(),
            form: FormState::new(view),
            handlers: ActionHandlers::new(channels.cmd_tx, RepaintObserver(cc.egui_ctx.clone())),
            event_rx: channels.event_rx,
        }
    }
}

impl eframe::App for SmartEmailCleanerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.session.init_if_absent();
        bridge::drain_events(&self.event_rx, &self.handlers, state);

        let mut actions = Vec::new();
        let snapshot = metrics::snapshot(state);

        egui::SidePanel::left("sidebar")
            .resizable(true)
            .default_width(250.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    sidebar::draw_sidebar(ui, state, &snapshot, &mut self.form, &mut actions);
                });
            });

        let panel = router::render(state.current_view(), state, &self.config);
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(notice) = state.latest_notice() {
                ui::draw_notice(ui, notice);
                ui.add_space(4.0);
            }
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui::draw_panel(ui, &panel, &mut self.form, &mut actions);
            });
        });

        for action in actions {
            self.handlers.dispatch(state, action);
        }
    }
}

impl Drop for SmartEmailCleanerApp {
    fn drop(&mut self) {
        if let Some(state) = self.session.get() {
            info!(
                "Closing session on {} view ({} notices)",
                state.current_view(),
                state.notices().len()
            );
        }
        self.session.end();
    }
}
