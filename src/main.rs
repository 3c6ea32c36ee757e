#![windows_subsystem = "windows"]
//! Tonearm - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod api;
mod app;
mod cache;
mod constants;
mod grid;
mod router;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::{APP_NAME, APP_VERSION};
use eframe::egui;
use router::Route;
use tracing::info;
use types::ItemKind;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "tonearm.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tonearm=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = utils::data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Tonearm starting");

    // Load saved window position/size
    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1180.0, 760.0)))
        .with_min_inner_size([860.0, 560.0])
        .with_title(APP_NAME);

    // Window/taskbar icon rasterized from the inline logo
    {
        let (rgba, w, h) = utils::rasterize_icon(128);
        let icon = egui::IconData {
            rgba,
            width: w,
            height: h,
        };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, settings, data_dir)))),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Top bar: kind tabs
        egui::TopBottomPanel::top("nav_bar")
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(APP_NAME)
                            .size(15.0)
                            .strong()
                            .color(theme::ACCENT),
                    );
                    ui.add_space(theme::SPACING_MD);

                    let current = self.navigator.current().clone();
                    for kind in ItemKind::BROWSABLE {
                        let selected = current == Route::Browse(kind);
                        if theme::toggle_pill(ui, selected, kind.label()) && !selected {
                            self.navigator.navigate(Route::Browse(kind));
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("v{}", APP_VERSION))
                                .size(10.0)
                                .color(theme::TEXT_DIM),
                        );
                    });
                });
            });

        let route = self.navigator.current().clone();
        let showing = match route {
            Route::Browse(kind) => Some(kind),
            _ => None,
        };
        self.sync_shown_page(showing);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE))
            .show(ctx, |ui| match showing {
                Some(kind) => {
                    self.page(kind);
                    // Split borrows: navigator and the page live in
                    // different fields
                    let App {
                        pages, navigator, ..
                    } = self;
                    if let Some(page) = pages.get_mut(&kind) {
                        page.ui(ui, navigator);
                    }
                }
                None => {
                    app::detail::detail_ui(ui, &mut self.navigator);
                }
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        for page in self.pages.values_mut() {
            page.shutdown();
        }
        self.save_settings();
        info!("Tonearm exiting");
    }
}
