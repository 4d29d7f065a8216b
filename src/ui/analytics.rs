use crate::metrics::{CategoryShare, VolumePoint};
use crate::router::AnalyticsPanel;
use crate::ui::donut::{self, PALETTE};
use egui::{Color32, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};

const RECEIVED: Color32 = Color32::from_rgb(102, 126, 234);
const SENT: Color32 = Color32::from_rgb(118, 75, 162);

pub fn draw_analytics(ui: &mut Ui, panel: &AnalyticsPanel) {
    ui.heading("Email Analytics");
    ui.add_space(8.0);

    ui.strong("Email Volume Over Time");
    ui.horizontal(|ui| {
        ui.colored_label(RECEIVED, "■ Received");
        ui.colored_label(SENT, "■ Sent");
    });
    draw_volume(ui, &panel.volume);

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    ui.columns(2, |columns| {
        columns[0].strong("Top Email Senders");
        columns[0].add_space(4.0);
        donut::draw_donut(&mut columns[0], &panel.top_senders);

        columns[1].strong("Email Categories");
        columns[1].add_space(4.0);
        draw_categories(&mut columns[1], &panel.categories);
    });

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    draw_sender_table(ui, panel);
}

fn draw_volume(ui: &mut Ui, volume: &[VolumePoint]) {
    let size = Vec2::new(ui.available_width(), 220.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect.shrink(8.0);

    painter.rect_stroke(
        rect,
        2.0,
        Stroke::new(1.0, ui.visuals().weak_text_color()),
        egui::StrokeKind::Inside,
    );

    let Some(max) = volume.iter().map(|p| p.received.max(p.sent)).max() else {
        return;
    };
    let span = (volume.len().max(2) - 1) as f32;
    let to_screen = |i: usize, value: u32| {
        Pos2::new(
            rect.left() + rect.width() * (i as f32 / span),
            rect.bottom() - rect.height() * (value as f32 / max as f32),
        )
    };

    let received: Vec<Pos2> = volume
        .iter()
        .enumerate()
        .map(|(i, p)| to_screen(i, p.received))
        .collect();
    let sent: Vec<Pos2> = volume
        .iter()
        .enumerate()
        .map(|(i, p)| to_screen(i, p.sent))
        .collect();
    painter.add(Shape::line(received, Stroke::new(1.5, RECEIVED)));
    painter.add(Shape::line(sent, Stroke::new(1.5, SENT)));

    if let Some(pos) = response.hover_pos() {
        let t = ((pos.x - rect.left()) / rect.width()).clamp(0.0, 1.0);
        let idx = (t * span).round() as usize;
        if let Some(point) = volume.get(idx) {
            painter.text(
                rect.left_top() + Vec2::new(6.0, 4.0),
                egui::Align2::LEFT_TOP,
                format!(
                    "{}: {} received, {} sent",
                    point.date.format("%Y-%m-%d"),
                    point.received,
                    point.sent
                ),
                egui::FontId::proportional(12.0),
                ui.visuals().text_color(),
            );
        }
    }
}

fn draw_categories(ui: &mut Ui, categories: &[CategoryShare]) {
    let size = Vec2::new(ui.available_width(), 220.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect.shrink(8.0);
    let label_h = 16.0;

    let Some(max) = categories.iter().map(|c| c.percent).max().filter(|m| *m > 0) else {
        return;
    };
    let slot = rect.width() / categories.len() as f32;

    for (i, category) in categories.iter().enumerate() {
        let bar_h = (rect.height() - label_h) * (f32::from(category.percent) / f32::from(max));
        let left = rect.left() + slot * i as f32 + slot * 0.15;
        let bar = Rect::from_min_max(
            Pos2::new(left, rect.bottom() - label_h - bar_h),
            Pos2::new(left + slot * 0.7, rect.bottom() - label_h),
        );
        painter.rect_filled(bar, 2.0, PALETTE[i % PALETTE.len()]);
        painter.text(
            Pos2::new(bar.center().x, bar.top() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            format!("{}%", category.percent),
            egui::FontId::proportional(11.0),
            ui.visuals().text_color(),
        );
        painter.text(
            Pos2::new(bar.center().x, rect.bottom()),
            egui::Align2::CENTER_BOTTOM,
            category.name,
            egui::FontId::proportional(11.0),
            ui.visuals().weak_text_color(),
        );
    }
}

fn draw_sender_table(ui: &mut Ui, panel: &AnalyticsPanel) {
    ui.collapsing("Raw Data", |ui| {
        egui_extras::TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(egui_extras::Column::remainder().at_least(200.0))
            .column(egui_extras::Column::initial(80.0))
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Sender");
                });
                header.col(|ui| {
                    ui.strong("Count");
                });
            })
            .body(|body| {
                body.rows(18.0, panel.top_senders.len(), |mut row| {
                    let idx = row.index();
                    if let Some(sender) = panel.top_senders.get(idx) {
                        row.col(|ui| {
                            ui.label(sender.name);
                        });
                        row.col(|ui| {
                            ui.label(sender.count.to_string());
                        });
                    }
                });
            });
    });
}
