//! App module - main application state and page wiring

pub mod browse;
pub mod context_menu;
pub mod detail;

use crate::api::ApiClient;
use crate::cache::QueryCache;
use crate::router::{Navigator, Route};
use crate::settings::{PrefStore, Settings};
use crate::theme;
use crate::types::ItemKind;
use browse::BrowsePage;
use eframe::egui;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

pub struct App {
    pub(crate) store: PrefStore,
    pub(crate) api: Arc<ApiClient>,
    pub(crate) cache: Arc<QueryCache>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) navigator: Navigator,
    pub(crate) pages: HashMap<ItemKind, BrowsePage>,
    pub(crate) shown_kind: Option<ItemKind>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) data_dir: PathBuf,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let store = PrefStore::new(settings, data_dir.clone());
        let api = Arc::new(ApiClient::new(store.server()));
        let cache = Arc::new(QueryCache::new());
        let runtime = tokio::runtime::Runtime::new().unwrap();

        Self {
            store,
            api,
            cache,
            runtime,
            navigator: Navigator::new(Route::Browse(ItemKind::Album)),
            pages: HashMap::new(),
            shown_kind: None,
            window_pos: None,
            window_size: None,
            data_dir,
        }
    }

    /// The browse page for `kind`, created on first use
    pub(crate) fn page(&mut self, kind: ItemKind) -> &mut BrowsePage {
        let store = self.store.clone();
        let api = self.api.clone();
        let cache = self.cache.clone();
        let handle = self.runtime.handle().clone();
        self.pages
            .entry(kind)
            .or_insert_with(|| BrowsePage::new(kind, store, api, cache, handle))
    }

    /// Flush pending per-page work when the visible page changes
    pub(crate) fn sync_shown_page(&mut self, showing: Option<ItemKind>) {
        if self.shown_kind == showing {
            return;
        }
        if let Some(previous) = self.shown_kind.take() {
            if let Some(page) = self.pages.get_mut(&previous) {
                page.suspend();
            }
        }
        self.shown_kind = showing;
    }

    pub fn save_settings(&self) {
        let window_pos = self.window_pos;
        let window_size = self.window_size;
        self.store.update(|settings| {
            settings.window_x = window_pos.map(|p| p.x);
            settings.window_y = window_pos.map(|p| p.y);
            settings.window_w = window_size.map(|s| s.x);
            settings.window_h = window_size.map(|s| s.y);
        });
    }
}
