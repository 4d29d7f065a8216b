pub mod analytics;
pub mod cleanup;
pub mod dashboard;
pub mod donut;
pub mod settings;
pub mod sidebar;

use crate::actions::Action;
use crate::router::Panel;
use crate::state::{Notice, NoticeLevel, Preferences, SidebarToggles, View};
use egui::{Color32, Ui};

/// Widget-bound values. These belong to the widgets, not the session; the
/// session only learns about them through dispatched actions.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub nav_label: String,
    pub preferences: Preferences,
    pub toggles: SidebarToggles,
}

impl FormState {
    pub fn new(view: View) -> Self {
        Self {
            nav_label: nav_label(view),
            ..Self::default()
        }
    }
}

pub fn nav_label(view: View) -> String {
    let icon = match view {
        View::Dashboard => "📊",
        View::CleanupTools => "🛠",
        View::Analytics => "📈",
        View::Settings => "⚙",
    };
    format!("{icon} {}", view.title())
}

pub const SUCCESS: Color32 = Color32::from_rgb(39, 174, 96);
pub const INFO: Color32 = Color32::from_rgb(52, 152, 219);
pub const WARNING: Color32 = Color32::from_rgb(243, 156, 18);

pub fn draw_notice(ui: &mut Ui, notice: &Notice) {
    let color = match notice.level {
        NoticeLevel::Success => SUCCESS,
        NoticeLevel::Info => INFO,
    };
    ui.colored_label(color, &notice.text);
}

pub fn draw_panel(ui: &mut Ui, panel: &Panel, form: &mut FormState, actions: &mut Vec<Action>) {
    ui.push_id(panel.view().key(), |ui| match panel {
        Panel::Dashboard(p) => dashboard::draw_dashboard(ui, p, actions),
        Panel::CleanupTools(p) => cleanup::draw_cleanup(ui, p, actions),
        Panel::Analytics(p) => analytics::draw_analytics(ui, p),
        Panel::Settings(p) => settings::draw_settings(ui, p, &mut form.preferences, actions),
    });
}

pub(crate) fn card_frame(ui: &Ui) -> egui::Frame {
    egui::Frame::default()
        .inner_margin(8.0)
        .corner_radius(4.0)
        .fill(ui.visuals().faint_bg_color)
}
