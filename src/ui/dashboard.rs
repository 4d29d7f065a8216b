use crate::actions::Action;
use crate::config::AiStatus;
use crate::metrics::CategoryProgress;
use crate::router::{ConnectionBlock, DashboardPanel, MetricCard};
use crate::ui::{card_frame, INFO, SUCCESS, WARNING};
use egui::{Color32, Ui};

const GAUGE_COLORS: [Color32; 3] = [
    Color32::from_rgb(231, 76, 60),
    Color32::from_rgb(39, 174, 96),
    Color32::from_rgb(243, 156, 18),
];

pub fn draw_dashboard(ui: &mut Ui, panel: &DashboardPanel, actions: &mut Vec<Action>) {
    ui.vertical_centered(|ui| {
        ui.heading("Smart Email Cleaner");
        ui.label("Transform your chaotic inbox into an organized paradise");
    });
    ui.add_space(8.0);

    match &panel.ai_status {
        AiStatus::Enabled => {
            ui.colored_label(SUCCESS, "AI features are enabled!");
        }
        AiStatus::Degraded { missing } => {
            ui.colored_label(WARNING, format!("Missing API keys: {}", missing.join(", ")));
            ui.colored_label(INFO, "Set them in the environment to enable AI features");
        }
    }
    ui.add_space(4.0);

    match &panel.connection {
        ConnectionBlock::NotConnected { connect } => {
            ui.colored_label(WARNING, "Not connected to email account");
            if ui.button("Connect Email Account").clicked() {
                actions.push(connect.clone());
            }
        }
        ConnectionBlock::Connected { cards, gauges } => {
            ui.colored_label(SUCCESS, "Connected to your email account");
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);
            draw_cards(ui, cards);
            ui.add_space(8.0);
            ui.heading("Cleanup Progress");
            ui.add_space(4.0);
            draw_gauges(ui, gauges);
        }
    }
}

fn draw_cards(ui: &mut Ui, cards: &[MetricCard]) {
    ui.horizontal(|ui| {
        let frame = card_frame(ui);
        for card in cards {
            frame.show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(card.title);
                    ui.heading(&card.value);
                });
            });
        }
    });
}

fn draw_gauges(ui: &mut Ui, gauges: &[CategoryProgress]) {
    ui.columns(gauges.len().max(1), |columns| {
        for (i, (column, gauge)) in columns.iter_mut().zip(gauges).enumerate() {
            column.label(gauge.name);
            column.add(
                egui::ProgressBar::new(f32::from(gauge.percent) / 100.0)
                    .fill(GAUGE_COLORS[i % GAUGE_COLORS.len()])
                    .text(format!("{}%", gauge.percent)),
            );
        }
    });
}
