use crate::actions::Action;
use crate::metrics::MetricsSnapshot;
use crate::state::{SessionState, View};
use crate::ui::{nav_label, FormState, INFO, SUCCESS};
use egui::Ui;
use tracing::warn;

pub fn draw_sidebar(
    ui: &mut Ui,
    state: &SessionState,
    snapshot: &MetricsSnapshot,
    form: &mut FormState,
    actions: &mut Vec<Action>,
) {
    ui.heading("Control Panel");
    ui.add_space(4.0);

    egui::ComboBox::from_label("Choose View")
        .selected_text(form.nav_label.as_str())
        .show_ui(ui, |ui| {
            for view in View::ALL {
                let label = nav_label(view);
                ui.selectable_value(&mut form.nav_label, label.clone(), label);
            }
        });

    match View::from_key(&form.nav_label) {
        Ok(view) if view != state.current_view() => actions.push(Action::Navigate(view)),
        Ok(_) => {}
        Err(e) => {
            warn!("{}", e);
            form.nav_label = nav_label(state.current_view());
        }
    }

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    ui.heading("Quick Actions");
    ui.add_space(4.0);
    if ui.button("Scan Inbox").clicked() {
        actions.push(Action::ScanInbox);
    }
    if ui.button("Refresh Data").clicked() {
        actions.push(Action::RefreshData);
    }
    if ui.button("Backup Important").clicked() {
        actions.push(Action::BackupImportant);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    ui.heading("Settings");
    ui.add_space(4.0);
    ui.checkbox(&mut form.toggles.auto_cleanup, "Auto Cleanup");
    ui.checkbox(&mut form.toggles.safe_mode, "Safe Mode");
    ui.checkbox(&mut form.toggles.notifications, "Notifications");

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    ui.heading("Status");
    ui.add_space(4.0);
    ui.colored_label(SUCCESS, "System Online");
    ui.colored_label(INFO, "Secure Connection");
    ui.colored_label(
        INFO,
        format!("{} Emails Processed", snapshot.emails_processed),
    );
}
