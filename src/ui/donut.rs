use crate::metrics::SenderCount;
use egui::{Color32, Pos2, Sense, Shape, Stroke, Vec2};
use std::f32::consts::TAU;

pub const PALETTE: &[Color32] = &[
    Color32::from_rgb(102, 126, 234),
    Color32::from_rgb(118, 75, 162),
    Color32::from_rgb(239, 71, 111),
    Color32::from_rgb(255, 209, 102),
    Color32::from_rgb(6, 214, 160),
    Color32::from_rgb(17, 138, 178),
    Color32::from_rgb(247, 127, 0),
    Color32::from_rgb(131, 56, 236),
];

pub fn draw_donut(ui: &mut egui::Ui, senders: &[SenderCount]) {
    let available = ui.available_size();
    let size = available.x.min(available.y).min(260.0).max(120.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer_r = size * 0.45;
    let inner_r = size * 0.25;

    let total: usize = senders.iter().map(|s| s.count).sum();
    if total == 0 {
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "No data",
            egui::FontId::proportional(14.0),
            Color32::GRAY,
        );
        return;
    }

    let mouse_pos = response.hover_pos();
    let mut start_angle: f32 = -TAU / 4.0; // Start from top
    let mut hovered: Option<&SenderCount> = None;

    for (i, sender) in senders.iter().enumerate() {
        let sweep = sender.count as f32 / total as f32 * TAU;
        let color = PALETTE[i % PALETTE.len()];

        let segments = (sweep / 0.05).max(2.0) as usize;
        let mut points = Vec::with_capacity(segments * 2 + 2);
        for j in 0..=segments {
            let angle = start_angle + sweep * (j as f32 / segments as f32);
            points.push(Pos2::new(
                center.x + outer_r * angle.cos(),
                center.y + outer_r * angle.sin(),
            ));
        }
        for j in (0..=segments).rev() {
            let angle = start_angle + sweep * (j as f32 / segments as f32);
            points.push(Pos2::new(
                center.x + inner_r * angle.cos(),
                center.y + inner_r * angle.sin(),
            ));
        }

        let is_hovered = mouse_pos.is_some_and(|mp| {
            let offset = mp - center;
            let dist = offset.length();
            if dist < inner_r || dist > outer_r {
                return false;
            }
            let mut angle = offset.y.atan2(offset.x);
            if angle < start_angle {
                angle += TAU;
            }
            angle <= start_angle + sweep
        });
        if is_hovered {
            hovered = Some(sender);
        }

        let fill = if is_hovered {
            Color32::from_rgb(
                color.r().saturating_add(40),
                color.g().saturating_add(40),
                color.b().saturating_add(40),
            )
        } else {
            color
        };

        painter.add(Shape::convex_polygon(
            points,
            fill,
            Stroke::new(1.0, Color32::from_gray(30)),
        ));

        start_angle += sweep;
    }

    if let Some(sender) = hovered {
        painter.text(
            center + Vec2::new(0.0, -8.0),
            egui::Align2::CENTER_CENTER,
            sender.name,
            egui::FontId::proportional(12.0),
            Color32::WHITE,
        );
        painter.text(
            center + Vec2::new(0.0, 8.0),
            egui::Align2::CENTER_CENTER,
            format!("{} emails", sender.count),
            egui::FontId::proportional(11.0),
            Color32::LIGHT_GRAY,
        );
    }
}
