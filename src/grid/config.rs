//! Grid configuration composed from stored display preferences.
//!
//! The composer is a pure derivation memoized on its inputs: the same
//! preferences, default column set, and viewport produce the same
//! option bag without recomputation.

use crate::constants::{
    DEFAULT_PAGE_SIZE, DEFAULT_ROW_HEIGHT, FETCH_DEBOUNCE_MS, INITIAL_ROW_COUNT, ROW_BUFFER,
};
use crate::settings::DisplayPrefs;
use crate::types::LibraryItem;
use std::time::Duration;

/// Column definition handed to the table
#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn {
    pub id: String,
    pub title: String,
    pub width: Option<f32>,
    pub visible: bool,
}

impl GridColumn {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            width: None,
            visible: true,
        }
    }
}

/// Behavior applied to every column unless overridden
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultColumnBehavior {
    pub lock_visible: bool,
    pub lock_pinned: bool,
    pub resizable: bool,
}

/// The full option bag the browse table consumes
#[derive(Debug, Clone, PartialEq)]
pub struct GridOptions {
    pub columns: Vec<GridColumn>,
    pub default_column: DefaultColumnBehavior,
    pub always_show_horizontal_scroll: bool,
    pub autosize_columns: bool,
    pub fetch_debounce: Duration,
    pub row_id: fn(&LibraryItem) -> &str,
    pub initial_row_count: usize,
    pub paginated: bool,
    pub page_size: Option<usize>,
    pub row_buffer: usize,
    pub row_height: f32,
    pub infinite_rows: bool,
    pub row_drag: bool,
}

fn row_id(item: &LibraryItem) -> &str {
    &item.id
}

#[derive(Clone, PartialEq)]
struct ComposeInputs {
    prefs: DisplayPrefs,
    defaults: Vec<GridColumn>,
    viewport_rows: usize,
}

#[derive(Default)]
pub struct GridConfigComposer {
    memo: Option<(ComposeInputs, GridOptions)>,
}

impl GridConfigComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive grid options; recomputes only when an input changed
    pub fn compose(
        &mut self,
        prefs: &DisplayPrefs,
        defaults: &[GridColumn],
        viewport_rows: usize,
    ) -> &GridOptions {
        let inputs = ComposeInputs {
            prefs: prefs.clone(),
            defaults: defaults.to_vec(),
            viewport_rows,
        };
        let stale = match &self.memo {
            Some((cached, _)) => *cached != inputs,
            None => true,
        };
        if stale {
            let options = compose_options(&inputs);
            self.memo = Some((inputs, options));
        }
        &self.memo.as_ref().unwrap().1
    }
}

fn compose_options(inputs: &ComposeInputs) -> GridOptions {
    let prefs = &inputs.prefs;

    // Stored order first, titles from the default set; defaults the
    // store has never seen go at the end so they always appear.
    let mut columns: Vec<GridColumn> = Vec::with_capacity(inputs.defaults.len());
    for pref in &prefs.columns {
        if let Some(default) = inputs.defaults.iter().find(|d| d.id == pref.column) {
            columns.push(GridColumn {
                id: pref.column.clone(),
                title: default.title.clone(),
                width: if prefs.autosize_columns { None } else { pref.width },
                visible: pref.visible,
            });
        }
    }
    for default in &inputs.defaults {
        if !columns.iter().any(|c| c.id == default.id) {
            columns.push(default.clone());
        }
    }

    let row_height = if prefs.row_height > 0.0 {
        prefs.row_height
    } else {
        DEFAULT_ROW_HEIGHT
    };

    let page_size = prefs.paginated.then(|| {
        if inputs.viewport_rows > 0 {
            inputs.viewport_rows
        } else if prefs.pagination.items_per_page > 0 {
            prefs.pagination.items_per_page
        } else {
            DEFAULT_PAGE_SIZE
        }
    });

    let initial_row_count = if prefs.pagination.total_items > 0 {
        prefs.pagination.total_items as usize
    } else {
        INITIAL_ROW_COUNT
    };

    GridOptions {
        columns,
        default_column: DefaultColumnBehavior {
            lock_visible: true,
            lock_pinned: true,
            resizable: true,
        },
        always_show_horizontal_scroll: true,
        autosize_columns: prefs.autosize_columns,
        fetch_debounce: Duration::from_millis(FETCH_DEBOUNCE_MS),
        row_id,
        initial_row_count,
        paginated: prefs.paginated,
        page_size,
        row_buffer: ROW_BUFFER,
        row_height,
        infinite_rows: true,
        row_drag: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ColumnPref;

    fn defaults() -> Vec<GridColumn> {
        vec![
            GridColumn::new("title", "Title"),
            GridColumn::new("artist", "Artist"),
            GridColumn::new("year", "Year"),
        ]
    }

    #[test]
    fn stored_order_wins_and_missing_defaults_are_appended() {
        let prefs = DisplayPrefs {
            autosize_columns: false,
            columns: vec![
                ColumnPref {
                    column: "year".into(),
                    width: Some(80.0),
                    visible: true,
                },
                ColumnPref::new("title"),
            ],
            ..Default::default()
        };
        let mut composer = GridConfigComposer::new();
        let options = composer.compose(&prefs, &defaults(), 0);

        let ids: Vec<&str> = options.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["year", "title", "artist"]);
        assert_eq!(options.columns[0].width, Some(80.0));
    }

    #[test]
    fn autosize_strips_stored_widths() {
        let prefs = DisplayPrefs {
            autosize_columns: true,
            columns: vec![ColumnPref {
                column: "title".into(),
                width: Some(120.0),
                visible: true,
            }],
            ..Default::default()
        };
        let mut composer = GridConfigComposer::new();
        let options = composer.compose(&prefs, &defaults(), 0);
        assert_eq!(options.columns[0].width, None);
        assert!(options.autosize_columns);
    }

    #[test]
    fn stored_columns_unknown_to_the_default_set_are_dropped() {
        let prefs = DisplayPrefs {
            columns: vec![ColumnPref::new("bitrate"), ColumnPref::new("title")],
            ..Default::default()
        };
        let mut composer = GridConfigComposer::new();
        let options = composer.compose(&prefs, &defaults(), 0);
        assert!(!options.columns.iter().any(|c| c.id == "bitrate"));
    }

    #[test]
    fn page_size_follows_the_viewport_when_paginated() {
        let prefs = DisplayPrefs {
            paginated: true,
            ..Default::default()
        };
        let mut composer = GridConfigComposer::new();
        assert_eq!(composer.compose(&prefs, &defaults(), 23).page_size, Some(23));

        let off = DisplayPrefs::default();
        assert_eq!(composer.compose(&off, &defaults(), 23).page_size, None);
    }

    #[test]
    fn fixed_option_values_match_the_row_model_contract() {
        let mut composer = GridConfigComposer::new();
        let prefs = DisplayPrefs::default();
        let options = composer.compose(&prefs, &defaults(), 0);

        assert!(options.infinite_rows);
        assert!(!options.row_drag);
        assert!(options.always_show_horizontal_scroll);
        assert_eq!(options.row_buffer, 20);
        assert_eq!(options.row_height, 40.0);
        assert_eq!(options.fetch_debounce, Duration::from_millis(200));
        assert_eq!(options.initial_row_count, 50);

        let item = LibraryItem {
            id: "x9".into(),
            ..Default::default()
        };
        assert_eq!((options.row_id)(&item), "x9");
    }

    #[test]
    fn memo_returns_identical_output_for_identical_inputs() {
        let mut composer = GridConfigComposer::new();
        let prefs = DisplayPrefs::default();
        let first = composer.compose(&prefs, &defaults(), 10).clone();
        let second = composer.compose(&prefs, &defaults(), 10).clone();
        assert_eq!(first, second);

        let other = composer
            .compose(
                &DisplayPrefs {
                    paginated: true,
                    ..Default::default()
                },
                &defaults(),
                10,
            )
            .clone();
        assert_ne!(first, other);
    }
}
