//! Glue between table events, the preference store, and navigation.
//!
//! Every handler reads the store fresh, writes whole fields back under
//! the page key, and returns commands for the table to execute. The
//! store stays the single source of truth; the table is a projection.

use crate::constants::{DEFAULT_ROW_HEIGHT, RESIZE_PERSIST_DEBOUNCE_MS};
use crate::grid::debounce::Debounce;
use crate::grid::events::{ColumnState, GridCommand, GridEvent};
use crate::grid::resolver;
use crate::settings::{ColumnPref, PaginationPatch, PrefStore, TablePatch};
use crate::types::ItemKind;
use std::time::{Duration, Instant};
use tracing::debug;

pub struct GridBinding {
    page_key: String,
    kind: ItemKind,
    store: PrefStore,
    resize_debounce: Debounce<Vec<ColumnState>>,
}

impl GridBinding {
    pub fn new(kind: ItemKind, store: PrefStore) -> Self {
        Self {
            page_key: kind.page_key().to_string(),
            kind,
            store,
            resize_debounce: Debounce::new(Duration::from_millis(RESIZE_PERSIST_DEBOUNCE_MS)),
        }
    }

    pub fn page_key(&self) -> &str {
        &self.page_key
    }

    pub fn handle_event(&mut self, event: GridEvent, now: Instant) -> Vec<GridCommand> {
        match event {
            GridEvent::Ready => {
                // Restore the stored scroll position, anchored to the
                // top of the target row
                let offset = self.store.read(&self.page_key).scroll_offset;
                vec![GridCommand::ScrollToRow { row: offset }]
            }

            GridEvent::Resized => {
                if self.store.read(&self.page_key).autosize_columns {
                    vec![GridCommand::SizeColumnsToFit]
                } else {
                    Vec::new()
                }
            }

            GridEvent::PaginationChanged {
                page,
                page_size,
                total_items,
                total_pages,
            } => {
                let prefs = self.store.read(&self.page_key);
                if !prefs.paginated {
                    return Vec::new();
                }
                self.store.write_pagination(
                    &self.page_key,
                    PaginationPatch {
                        current_page: Some(page),
                        items_per_page: Some(page_size),
                        total_items: Some(total_items),
                        total_pages: Some(total_pages),
                    },
                );
                // Scroll failures downstream are logged and ignored;
                // the pagination write above has already happened.
                vec![GridCommand::ScrollToRow {
                    row: page * page_size,
                }]
            }

            GridEvent::ColumnsMoved { columns } => {
                // A move supersedes any resize still waiting to persist
                self.resize_debounce.cancel();
                self.persist_columns(&columns);
                Vec::new()
            }

            GridEvent::ColumnResized { columns } => {
                self.resize_debounce.schedule(columns, now);
                Vec::new()
            }

            GridEvent::ScrollEnded { scroll_top } => {
                let prefs = self.store.read(&self.page_key);
                let row_height = if prefs.row_height > 0.0 {
                    prefs.row_height
                } else {
                    DEFAULT_ROW_HEIGHT
                };
                let offset = (scroll_top / row_height).round() as usize;
                self.store.write_table(
                    &self.page_key,
                    TablePatch {
                        scroll_offset: Some(offset),
                        ..Default::default()
                    },
                );
                Vec::new()
            }

            GridEvent::RowActivated { item } => {
                let route = resolver::capability(self.kind)
                    .and_then(|cap| cap.detail_route)
                    .map(|route_fn| route_fn(&item));
                match route {
                    Some(route) => vec![GridCommand::Navigate(route)],
                    None => {
                        debug!(kind = ?self.kind, "No detail route for activated row");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Release a due resize persist; call once per frame
    pub fn poll(&mut self, now: Instant) {
        if let Some(columns) = self.resize_debounce.poll(now) {
            self.persist_columns(&columns);
        }
    }

    /// Flush pending work before the owning view goes away
    pub fn unmount(&mut self) {
        if let Some(columns) = self.resize_debounce.flush() {
            self.persist_columns(&columns);
        }
    }

    fn persist_columns(&self, columns: &[ColumnState]) {
        let prefs = self.store.read(&self.page_key);
        let merged = merge_column_snapshot(&prefs.columns, columns, prefs.autosize_columns);
        self.store.write_table(
            &self.page_key,
            TablePatch {
                columns: Some(merged),
                ..Default::default()
            },
        );
    }
}

/// Merge a table column snapshot into stored column prefs. Snapshot
/// order wins; entries the store has never seen are skipped; widths
/// are dropped while autosize is active.
pub fn merge_column_snapshot(
    stored: &[ColumnPref],
    snapshot: &[ColumnState],
    autosize: bool,
) -> Vec<ColumnPref> {
    snapshot
        .iter()
        .filter_map(|state| {
            stored.iter().find(|p| p.column == state.column).map(|pref| ColumnPref {
                column: pref.column.clone(),
                width: if autosize { None } else { state.width.or(pref.width) },
                visible: pref.visible,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::types::LibraryItem;

    fn binding(kind: ItemKind) -> (GridBinding, PrefStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::new(Settings::default(), dir.path().to_path_buf());
        (GridBinding::new(kind, store.clone()), store, dir)
    }

    fn item(id: &str) -> LibraryItem {
        LibraryItem {
            id: id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn ready_restores_the_stored_scroll_offset() {
        let (mut binding, store, _dir) = binding(ItemKind::Album);
        store.write_table(
            "albums",
            TablePatch {
                scroll_offset: Some(42),
                ..Default::default()
            },
        );
        let commands = binding.handle_event(GridEvent::Ready, Instant::now());
        assert_eq!(commands, vec![GridCommand::ScrollToRow { row: 42 }]);
    }

    #[test]
    fn resize_fits_columns_only_when_autosize_is_on() {
        let (mut binding, store, _dir) = binding(ItemKind::Album);
        let fit = binding.handle_event(GridEvent::Resized, Instant::now());
        assert_eq!(fit, vec![GridCommand::SizeColumnsToFit]);

        store.write_table(
            "albums",
            TablePatch {
                autosize_columns: Some(false),
                ..Default::default()
            },
        );
        let none = binding.handle_event(GridEvent::Resized, Instant::now());
        assert!(none.is_empty());
    }

    #[test]
    fn pagination_change_is_a_noop_when_pagination_is_off() {
        let (mut binding, store, _dir) = binding(ItemKind::Song);
        let commands = binding.handle_event(
            GridEvent::PaginationChanged {
                page: 9,
                page_size: 250,
                total_items: 10_000,
                total_pages: 40,
            },
            Instant::now(),
        );
        assert!(commands.is_empty());
        // Nothing persisted either
        assert_eq!(store.read("songs").pagination.items_per_page, 0);
    }

    #[test]
    fn pagination_change_persists_and_scrolls_to_the_page_start() {
        let (mut binding, store, _dir) = binding(ItemKind::Song);
        store.write_table(
            "songs",
            TablePatch {
                paginated: Some(true),
                ..Default::default()
            },
        );

        let commands = binding.handle_event(
            GridEvent::PaginationChanged {
                page: 3,
                page_size: 100,
                total_items: 450,
                total_pages: 5,
            },
            Instant::now(),
        );
        assert_eq!(commands, vec![GridCommand::ScrollToRow { row: 300 }]);

        let p = store.read("songs").pagination;
        assert_eq!(p.current_page, 3);
        assert_eq!(p.items_per_page, 100);
        assert_eq!(p.total_items, 450);
        assert_eq!(p.total_pages, 5);
    }

    #[test]
    fn column_move_merges_widths_into_stored_prefs() {
        let (mut binding, store, _dir) = binding(ItemKind::Album);
        store.write_table(
            "albums",
            TablePatch {
                autosize_columns: Some(false),
                columns: Some(vec![ColumnPref::new("title")]),
                ..Default::default()
            },
        );

        binding.handle_event(
            GridEvent::ColumnsMoved {
                columns: vec![ColumnState::new("title", Some(120.0))],
            },
            Instant::now(),
        );

        let columns = store.read("albums").columns;
        assert_eq!(
            columns,
            vec![ColumnPref {
                column: "title".into(),
                width: Some(120.0),
                visible: true,
            }]
        );
    }

    #[test]
    fn column_move_omits_widths_while_autosize_is_active() {
        let (mut binding, store, _dir) = binding(ItemKind::Album);
        store.write_table(
            "albums",
            TablePatch {
                autosize_columns: Some(true),
                columns: Some(vec![ColumnPref::new("title")]),
                ..Default::default()
            },
        );

        binding.handle_event(
            GridEvent::ColumnsMoved {
                columns: vec![ColumnState::new("title", Some(120.0))],
            },
            Instant::now(),
        );

        assert_eq!(store.read("albums").columns[0].width, None);
    }

    #[test]
    fn snapshot_columns_unknown_to_the_store_are_skipped() {
        let stored = vec![ColumnPref::new("title")];
        let snapshot = vec![
            ColumnState::new("bitrate", Some(60.0)),
            ColumnState::new("title", Some(90.0)),
        ];
        let merged = merge_column_snapshot(&stored, &snapshot, false);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].column, "title");
        assert_eq!(merged[0].width, Some(90.0));
    }

    #[test]
    fn snapshot_order_replaces_stored_order() {
        let stored = vec![ColumnPref::new("title"), ColumnPref::new("artist")];
        let snapshot = vec![
            ColumnState::new("artist", Some(200.0)),
            ColumnState::new("title", Some(100.0)),
        ];
        let merged = merge_column_snapshot(&stored, &snapshot, false);
        let order: Vec<&str> = merged.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(order, ["artist", "title"]);
    }

    #[test]
    fn resize_burst_persists_once_with_the_final_layout() {
        let (mut binding, store, _dir) = binding(ItemKind::Album);
        store.write_table(
            "albums",
            TablePatch {
                autosize_columns: Some(false),
                columns: Some(vec![ColumnPref::new("title")]),
                ..Default::default()
            },
        );

        let t0 = Instant::now();
        for (i, width) in [100.0_f32, 110.0, 125.0].iter().enumerate() {
            binding.handle_event(
                GridEvent::ColumnResized {
                    columns: vec![ColumnState::new("title", Some(*width))],
                },
                t0 + Duration::from_millis(i as u64 * 50),
            );
            binding.poll(t0 + Duration::from_millis(i as u64 * 50));
        }
        // Not yet persisted: window still open
        assert_eq!(store.read("albums").columns[0].width, None);

        binding.poll(t0 + Duration::from_millis(100 + RESIZE_PERSIST_DEBOUNCE_MS));
        assert_eq!(store.read("albums").columns[0].width, Some(125.0));
    }

    #[test]
    fn unmount_flushes_a_pending_resize() {
        let (mut binding, store, _dir) = binding(ItemKind::Album);
        store.write_table(
            "albums",
            TablePatch {
                autosize_columns: Some(false),
                columns: Some(vec![ColumnPref::new("title")]),
                ..Default::default()
            },
        );

        binding.handle_event(
            GridEvent::ColumnResized {
                columns: vec![ColumnState::new("title", Some(77.0))],
            },
            Instant::now(),
        );
        binding.unmount();
        assert_eq!(store.read("albums").columns[0].width, Some(77.0));
    }

    #[test]
    fn scroll_end_persists_the_rounded_row_offset() {
        let (mut binding, store, _dir) = binding(ItemKind::Album);
        // Default row height is 40: 1010 / 40 = 25.25 -> 25
        binding.handle_event(
            GridEvent::ScrollEnded { scroll_top: 1010.0 },
            Instant::now(),
        );
        assert_eq!(store.read("albums").scroll_offset, 25);

        store.write_table(
            "albums",
            TablePatch {
                row_height: Some(50.0),
                ..Default::default()
            },
        );
        binding.handle_event(
            GridEvent::ScrollEnded { scroll_top: 1010.0 },
            Instant::now(),
        );
        // 1010 / 50 = 20.2 -> 20
        assert_eq!(store.read("albums").scroll_offset, 20);
    }

    #[test]
    fn double_clicking_an_album_navigates_to_its_detail_route() {
        let (mut binding, _store, _dir) = binding(ItemKind::Album);
        let commands = binding.handle_event(
            GridEvent::RowActivated { item: item("abc") },
            Instant::now(),
        );
        assert_eq!(
            commands,
            vec![GridCommand::Navigate(crate::router::Route::Album {
                id: "abc".into()
            })]
        );
    }

    #[test]
    fn kinds_without_a_route_ignore_activation() {
        let (mut binding, _store, _dir) = binding(ItemKind::Song);
        let commands = binding.handle_event(
            GridEvent::RowActivated { item: item("s1") },
            Instant::now(),
        );
        assert!(commands.is_empty());
    }

    #[test]
    fn unsupported_kind_writes_nothing_on_activation() {
        let (mut binding, store, _dir) = binding(ItemKind::Genre);
        let before = store.snapshot();
        let commands = binding.handle_event(
            GridEvent::RowActivated { item: item("g1") },
            Instant::now(),
        );
        assert!(commands.is_empty());
        assert_eq!(store.snapshot(), before);
    }
}
