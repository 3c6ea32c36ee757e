//! Minimal detail pages reached from row activation

use crate::router::{Navigator, Route};
use crate::theme;
use eframe::egui;

/// Header-only detail screen; the route carries everything it shows
pub fn detail_ui(ui: &mut egui::Ui, nav: &mut Navigator) {
    let route = nav.current().clone();
    let (label, id) = match &route {
        Route::Album { id } => ("Album", id.clone()),
        Route::Artist { id } => ("Artist", id.clone()),
        Route::Playlist { id } => ("Playlist", id.clone()),
        Route::Browse(_) => return,
    };

    ui.add_space(theme::SPACING_MD);
    ui.horizontal(|ui| {
        ui.add_space(theme::SPACING_SM);
        let back = format!("{} Back", egui_phosphor::regular::ARROW_LEFT);
        if ui.button(back).clicked() {
            nav.back();
        }
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new(label)
                .size(12.0)
                .color(theme::TEXT_DIM),
        );
    });

    ui.add_space(theme::SPACING_MD);
    ui.horizontal(|ui| {
        ui.add_space(theme::SPACING_SM);
        ui.label(egui::RichText::new(&id).size(20.0).strong());
    });
    ui.add_space(theme::SPACING_SM);
    ui.horizontal(|ui| {
        ui.add_space(theme::SPACING_SM);
        ui.label(
            egui::RichText::new(route.path())
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
}
