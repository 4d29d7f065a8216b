use crate::actions::Action;
use crate::router::{CleanupPanel, FeatureCard};
use crate::ui::card_frame;
use egui::Ui;

pub fn draw_cleanup(ui: &mut Ui, panel: &CleanupPanel, actions: &mut Vec<Action>) {
    ui.heading("Cleanup Features");
    ui.add_space(8.0);

    for row in panel.features.chunks(2) {
        ui.columns(2, |columns| {
            for (column, feature) in columns.iter_mut().zip(row) {
                draw_feature(column, feature, actions);
            }
        });
        ui.add_space(8.0);
    }
}

fn draw_feature(ui: &mut Ui, feature: &FeatureCard, actions: &mut Vec<Action>) {
    card_frame(ui).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(feature.title);
        ui.label(feature.description);
        for item in feature.highlights {
            ui.label(format!("• {item}"));
        }
        ui.add_space(4.0);

        let trigger = &feature.trigger;
        if ui
            .add_enabled(trigger.enabled, egui::Button::new(trigger.label))
            .clicked()
        {
            actions.push(trigger.action.clone());
        }

        if let Some(progress) = &trigger.progress {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(progress.label);
            });
            ui.add(egui::ProgressBar::new(progress.fraction).text(format!(
                "{}/{} ({:.1}s)",
                progress.step,
                progress.total,
                progress.elapsed.as_secs_f32()
            )));
        }
    });
}
