use crate::actions::Action;
use crate::router::SettingsPanel;
use crate::state::{Preferences, Provider};
use egui::Ui;

pub fn draw_settings(
    ui: &mut Ui,
    panel: &SettingsPanel,
    draft: &mut Preferences,
    actions: &mut Vec<Action>,
) {
    ui.heading("Settings");
    ui.label("Email cleanup preferences and configuration options");
    ui.add_space(8.0);

    egui::ComboBox::from_label("Email Provider")
        .selected_text(draft.provider.label())
        .show_ui(ui, |ui| {
            for provider in Provider::ALL {
                ui.selectable_value(&mut draft.provider, provider, provider.label());
            }
        });

    ui.add_space(8.0);
    ui.strong("Cleanup Preferences");
    ui.columns(2, |columns| {
        columns[0].checkbox(&mut draft.keep_important, "Keep flagged emails");
        columns[0].checkbox(&mut draft.backup_before_cleanup, "Backup before cleanup");
        columns[1].checkbox(&mut draft.auto_organize, "Auto-organize");
        columns[1].checkbox(&mut draft.smart_filters, "Smart filters");
    });

    ui.add_space(8.0);
    if ui.button("Save Settings").clicked() {
        actions.push(Action::SaveSettings(draft.clone()));
    }

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    match &panel.saved {
        Some(saved) if saved == draft => {
            ui.weak("All changes saved for this session.");
        }
        Some(_) => {
            ui.weak("Unsaved changes.");
        }
        None => {
            ui.weak("Nothing saved yet this session.");
        }
    }
    ui.weak(format!(
        "AI model: {} (temperature {:.1})",
        panel.model.model, panel.model.temperature
    ));
}
