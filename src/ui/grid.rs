use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui};

use crate::color::{hex, lighten, to_color32, AGENT_COLOR, GOAL_COLOR, OBSTACLE_COLOR, START_COLOR};
use crate::sim::reinforcement::Cell;
use crate::state::GridView;

const MAX_SIDE: f32 = 420.0;
const GAP: f32 = 2.0;

// ---------------------------------------------------------------------------
// Grid world painter
// ---------------------------------------------------------------------------

/// Paint the grid with start, goal, obstacles, trail and agent.
pub fn grid_view(ui: &mut Ui, view: &GridView) {
    let n = view.grid.size();
    if n == 0 {
        return;
    }

    let side = ui.available_width().min(MAX_SIDE);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(side, side), Sense::hover());
    let painter = ui.painter_at(rect);
    let cell = side / n as f32;

    let empty = ui.visuals().faint_bg_color;
    let agent = hex(AGENT_COLOR);
    let trail = to_color32(lighten(agent, 0.15));
    let font = FontId::proportional((cell * 0.4).clamp(8.0, 20.0));

    for row in 0..n {
        for col in 0..n {
            let pos = (row, col);
            let min = rect.min + egui::vec2(col as f32 * cell, row as f32 * cell);
            let cell_rect =
                egui::Rect::from_min_size(min, egui::vec2(cell, cell)).shrink(GAP / 2.0);

            let (fill, text) = if view.agent == Some(pos) {
                (to_color32(agent), Some("A"))
            } else if pos == view.grid.start() {
                (to_color32(hex(START_COLOR)), Some("S"))
            } else {
                match view.grid.cell(pos) {
                    Some(Cell::Goal) => (to_color32(hex(GOAL_COLOR)), Some("G")),
                    Some(Cell::Obstacle) => (to_color32(hex(OBSTACLE_COLOR)), Some("X")),
                    _ if view.trail.contains(&pos) => (trail, None),
                    _ => (empty, None),
                }
            };

            painter.rect_filled(cell_rect, 3.0, fill);
            painter.rect_stroke(
                cell_rect,
                3.0,
                Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
                egui::StrokeKind::Inside,
            );
            if let Some(text) = text {
                painter.text(
                    cell_rect.center(),
                    Align2::CENTER_CENTER,
                    text,
                    font.clone(),
                    Color32::BLACK,
                );
            }
        }
    }
}
