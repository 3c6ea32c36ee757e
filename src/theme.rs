//! Dark theme palette and small styled widgets

use eframe::egui;

// Background layers
pub const BG_BASE: egui::Color32 = egui::Color32::from_rgb(0x0e, 0x0e, 0x11);
pub const BG_ELEVATED: egui::Color32 = egui::Color32::from_rgb(0x17, 0x17, 0x1b);
pub const BG_SURFACE: egui::Color32 = egui::Color32::from_rgb(0x20, 0x20, 0x26);
pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(0x14, 0x14, 0x18);

// Borders
pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(0x26, 0x26, 0x2d);
pub const BORDER_DEFAULT: egui::Color32 = egui::Color32::from_rgb(0x3a, 0x3a, 0x44);

// Text
pub const TEXT_DIM: egui::Color32 = egui::Color32::from_rgb(0x6b, 0x6b, 0x76);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(0x9a, 0x9a, 0xa6);
pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(0xc6, 0xc6, 0xd0);

// Accent (warm amber, tonearm gold)
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xe8, 0xa8, 0x3c);
pub const TABLE_ROW_SELECTED: egui::Color32 = egui::Color32::from_rgb(0x33, 0x28, 0x14);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(0xe5, 0x54, 0x54);

pub const SPACING_SM: f32 = 6.0;
pub const SPACING_MD: f32 = 12.0;

/// Apply the dark palette to the whole context
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    visuals.window_fill = BG_ELEVATED;
    visuals.extreme_bg_color = BG_INPUT;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.bg_fill = BG_SURFACE;
    visuals.widgets.hovered.bg_fill = BG_SURFACE;
    visuals.selection.bg_fill = TABLE_ROW_SELECTED;
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.override_text_color = None;
    ctx.set_visuals(visuals);
}

/// Framed section used for sidebar/popup groupings
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(10))
}

/// Press/hover feedback for painter-drawn buttons
pub fn button_visual(
    response: &egui::Response,
    fill: egui::Color32,
    rect: egui::Rect,
) -> (egui::Color32, egui::Rect) {
    if response.is_pointer_button_down_on() {
        (fill.gamma_multiply(0.85), rect.shrink(1.0))
    } else if response.hovered() {
        (fill.gamma_multiply(1.15), rect)
    } else {
        (fill, rect)
    }
}

/// Size a context menu to fit its widest label
pub fn set_menu_width(ui: &mut egui::Ui, labels: &[&str]) {
    let font = egui::FontId::proportional(13.0);
    let widest = labels
        .iter()
        .map(|label| {
            ui.painter()
                .layout_no_wrap(label.to_string(), font.clone(), egui::Color32::WHITE)
                .size()
                .x
        })
        .fold(0.0_f32, f32::max);
    ui.set_min_width(widest + 24.0);
}

/// One row of a context menu. Returns true when clicked.
pub fn menu_item(ui: &mut egui::Ui, icon: &str, label: &str) -> bool {
    let text = format!("{}  {}", icon, label);
    let height = 24.0;
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width().max(120.0), height),
        egui::Sense::click(),
    );
    if response.hovered() {
        ui.painter().rect_filled(rect, 4.0, BG_SURFACE);
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    ui.painter().text(
        egui::pos2(rect.left() + 8.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        text,
        egui::FontId::proportional(13.0),
        TEXT_SECONDARY,
    );
    response.clicked()
}

/// Small pill-style toggle button. Returns true when toggled.
pub fn toggle_pill(ui: &mut egui::Ui, selected: bool, label: &str) -> bool {
    let font = egui::FontId::proportional(12.0);
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_string(), font.clone(), egui::Color32::WHITE);
    let size = egui::vec2(galley.size().x + 18.0, 24.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    let fill = if selected { TABLE_ROW_SELECTED } else { BG_SURFACE };
    let (fill, draw_rect) = button_visual(&response, fill, rect);
    ui.painter().rect_filled(draw_rect, 12.0, fill);
    if selected {
        ui.painter().rect_stroke(
            draw_rect,
            12.0,
            egui::Stroke::new(1.0, ACCENT),
            egui::StrokeKind::Inside,
        );
    }
    ui.painter().text(
        draw_rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        font,
        if selected { ACCENT } else { TEXT_SECONDARY },
    );
    response.clicked()
}
