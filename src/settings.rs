//! User settings stored as settings.json in the app data directory.
//!
//! Holds window geometry, the server profile, and per-page display
//! preferences keyed by page key. The store is the single source of
//! truth for table layout and pagination state; views read from it and
//! write partial updates back, never the other way around.

use crate::constants::DEFAULT_ROW_HEIGHT;
use crate::types::QueryFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Stored layout entry for one table column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnPref {
    pub column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    pub visible: bool,
}

impl Default for ColumnPref {
    fn default() -> Self {
        Self {
            column: String::new(),
            width: None,
            visible: true,
        }
    }
}

impl ColumnPref {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PaginationPrefs {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: u64,
    pub total_pages: usize,
}

/// Display preferences for one browse page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayPrefs {
    pub columns: Vec<ColumnPref>,
    pub autosize_columns: bool,
    pub row_height: f32,
    pub scroll_offset: usize,
    pub paginated: bool,
    pub pagination: PaginationPrefs,
    pub filter: QueryFilter,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            autosize_columns: true,
            row_height: DEFAULT_ROW_HEIGHT,
            scroll_offset: 0,
            paginated: false,
            pagination: PaginationPrefs::default(),
            filter: QueryFilter::default(),
        }
    }
}

/// Partial update to the table-layout half of a page's preferences.
/// `None` fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct TablePatch {
    pub columns: Option<Vec<ColumnPref>>,
    pub autosize_columns: Option<bool>,
    pub row_height: Option<f32>,
    pub scroll_offset: Option<usize>,
    pub paginated: Option<bool>,
    pub filter: Option<QueryFilter>,
}

/// Partial update to a page's pagination state
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationPatch {
    pub current_page: Option<usize>,
    pub items_per_page: Option<usize>,
    pub total_items: Option<u64>,
    pub total_pages: Option<usize>,
}

/// Connection details for the music server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerProfile {
    pub base_url: String,
    pub access_token: String,
    pub user_id: String,
    pub server_id: String,
    pub device_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    pub server: ServerProfile,

    // Per-page display preferences, keyed by page key
    pub pages: BTreeMap<String, DisplayPrefs>,
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }
}

/// Shared handle to the settings file. Reads always reflect the latest
/// written state; writes merge over prior state and persist to disk.
#[derive(Clone)]
pub struct PrefStore {
    inner: Arc<Mutex<Settings>>,
    data_dir: PathBuf,
}

impl PrefStore {
    pub fn new(settings: Settings, data_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(Mutex::new(settings)),
            data_dir,
        }
    }

    /// Current display preferences for `page_key` (defaults if unset)
    pub fn read(&self, page_key: &str) -> DisplayPrefs {
        let settings = self.inner.lock().unwrap();
        settings.pages.get(page_key).cloned().unwrap_or_default()
    }

    pub fn server(&self) -> ServerProfile {
        self.inner.lock().unwrap().server.clone()
    }

    /// Merge a table-layout patch into the stored page preferences
    pub fn write_table(&self, page_key: &str, patch: TablePatch) {
        let mut settings = self.inner.lock().unwrap();
        let prefs = settings.pages.entry(page_key.to_string()).or_default();
        if let Some(columns) = patch.columns {
            prefs.columns = columns;
        }
        if let Some(autosize) = patch.autosize_columns {
            prefs.autosize_columns = autosize;
        }
        if let Some(height) = patch.row_height {
            prefs.row_height = height;
        }
        if let Some(offset) = patch.scroll_offset {
            prefs.scroll_offset = offset;
        }
        if let Some(paginated) = patch.paginated {
            prefs.paginated = paginated;
        }
        if let Some(filter) = patch.filter {
            prefs.filter = filter;
        }
        settings.save(&self.data_dir);
    }

    /// Merge a pagination patch into the stored page preferences
    pub fn write_pagination(&self, page_key: &str, patch: PaginationPatch) {
        let mut settings = self.inner.lock().unwrap();
        let prefs = settings.pages.entry(page_key.to_string()).or_default();
        if let Some(page) = patch.current_page {
            prefs.pagination.current_page = page;
        }
        if let Some(per_page) = patch.items_per_page {
            prefs.pagination.items_per_page = per_page;
        }
        if let Some(total) = patch.total_items {
            prefs.pagination.total_items = total;
        }
        if let Some(pages) = patch.total_pages {
            prefs.pagination.total_pages = pages;
        }
        settings.save(&self.data_dir);
    }

    /// Mutate global settings (window geometry, server profile) and persist
    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        let mut settings = self.inner.lock().unwrap();
        f(&mut settings);
        settings.save(&self.data_dir);
    }

    pub fn snapshot(&self) -> Settings {
        self.inner.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (PrefStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::new(Settings::default(), dir.path().to_path_buf());
        (store, dir)
    }

    #[test]
    fn table_patch_merges_over_prior_state() {
        let (store, _dir) = store();
        store.write_table(
            "albums",
            TablePatch {
                columns: Some(vec![ColumnPref::new("title")]),
                scroll_offset: Some(12),
                ..Default::default()
            },
        );
        store.write_table(
            "albums",
            TablePatch {
                row_height: Some(48.0),
                ..Default::default()
            },
        );

        let prefs = store.read("albums");
        assert_eq!(prefs.columns, vec![ColumnPref::new("title")]);
        assert_eq!(prefs.scroll_offset, 12);
        assert_eq!(prefs.row_height, 48.0);
    }

    #[test]
    fn pagination_patch_leaves_unset_fields_alone() {
        let (store, _dir) = store();
        store.write_pagination(
            "songs",
            PaginationPatch {
                items_per_page: Some(100),
                total_items: Some(2500),
                ..Default::default()
            },
        );
        store.write_pagination(
            "songs",
            PaginationPatch {
                current_page: Some(3),
                ..Default::default()
            },
        );

        let p = store.read("songs").pagination;
        assert_eq!(p.current_page, 3);
        assert_eq!(p.items_per_page, 100);
        assert_eq!(p.total_items, 2500);
    }

    #[test]
    fn page_keys_are_independent() {
        let (store, _dir) = store();
        store.write_table(
            "albums",
            TablePatch {
                scroll_offset: Some(7),
                ..Default::default()
            },
        );
        assert_eq!(store.read("artists").scroll_offset, 0);
        assert_eq!(store.read("albums").scroll_offset, 7);
    }

    #[test]
    fn writes_survive_a_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = PrefStore::new(Settings::default(), dir.path().to_path_buf());
            store.write_table(
                "playlists",
                TablePatch {
                    paginated: Some(true),
                    ..Default::default()
                },
            );
        }
        let reloaded = Settings::load(dir.path());
        assert!(reloaded.pages["playlists"].paginated);
    }
}
