//! Browse page: virtualized item table wired through the grid layer.
//!
//! The table is a projection of the preference store: configuration
//! comes out of the config composer, rows come out of the datasource,
//! and every interaction goes back through the binding as an event.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use egui_extras::{Column, TableBuilder};
use tracing::debug;

use crate::api::ApiClient;
use crate::cache::QueryCache;
use crate::constants::{MIN_COLUMN_WIDTH, SCROLL_SETTLE_MS};
use crate::grid::binding::GridBinding;
use crate::grid::config::{GridColumn, GridConfigComposer, GridOptions};
use crate::grid::datasource::{ItemGridSource, RowRange, RowsState};
use crate::grid::events::{ColumnState, GridCommand, GridEvent};
use crate::router::Navigator;
use crate::settings::{ColumnPref, PrefStore, TablePatch};
use crate::theme;
use crate::types::{ItemKind, LibraryItem, SortField, SortOrder};
use crate::ui::components::{format_duration, format_premiere_year};
use crate::utils::format_count;

use super::context_menu::{ContextMenuProvider, MenuEntry};

const HEADER_HEIGHT: f32 = 36.0;

/// Default column set per kind; stored prefs reorder and resize these
fn default_columns(kind: ItemKind) -> Vec<GridColumn> {
    match kind {
        ItemKind::Album => vec![
            GridColumn::new("title", "Title"),
            GridColumn::new("artist", "Album Artist"),
            GridColumn::new("year", "Year"),
            GridColumn::new("tracks", "Tracks"),
            GridColumn::new("duration", "Runtime"),
        ],
        ItemKind::AlbumArtist | ItemKind::Artist => vec![
            GridColumn::new("title", "Name"),
            GridColumn::new("tracks", "Albums"),
        ],
        ItemKind::Playlist => vec![
            GridColumn::new("title", "Name"),
            GridColumn::new("tracks", "Tracks"),
            GridColumn::new("duration", "Runtime"),
        ],
        ItemKind::Song => vec![
            GridColumn::new("title", "Title"),
            GridColumn::new("artist", "Artist"),
            GridColumn::new("duration", "Runtime"),
            GridColumn::new("year", "Year"),
        ],
        ItemKind::Genre => vec![GridColumn::new("title", "Name")],
    }
}

/// Sort field a column header click maps to
fn sort_field_for(column_id: &str) -> Option<SortField> {
    match column_id {
        "title" => Some(SortField::Name),
        "artist" => Some(SortField::Artist),
        "year" => Some(SortField::PremiereDate),
        "duration" => Some(SortField::Runtime),
        _ => None,
    }
}

/// Absolute row span `[start, end)` shown for one page of a listing
fn page_row_span(page: usize, page_size: usize, total: u64) -> (usize, usize) {
    let start = page * page_size;
    let end = (start + page_size).min(total as usize).max(start);
    (start, end)
}

pub struct BrowsePage {
    kind: ItemKind,
    binding: GridBinding,
    source: ItemGridSource,
    composer: GridConfigComposer,
    defaults: Vec<GridColumn>,
    store: PrefStore,
    cache: Arc<QueryCache>,
    menu: ContextMenuProvider,

    // Live view state, rebuilt from the store when options change
    options: Option<GridOptions>,
    live_columns: Vec<ColumnState>,
    search_text: String,

    scroll_offset: f32,
    pending_scroll_row: Option<usize>,
    scroll_moved_at: Option<Instant>,
    last_viewport: Option<egui::Vec2>,

    wanted_range: Option<RowRange>,
    range_changed_at: Option<Instant>,
    inflight_range: Option<RowRange>,

    drag_from: Option<usize>,
    fit_pending: bool,
    ready_sent: bool,
    show_columns_popup: bool,
}

impl BrowsePage {
    pub fn new(
        kind: ItemKind,
        store: PrefStore,
        api: Arc<ApiClient>,
        cache: Arc<QueryCache>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let prefs = store.read(kind.page_key());
        let source = ItemGridSource::new(api, cache.clone(), kind, prefs.filter.clone(), runtime);
        Self {
            kind,
            binding: GridBinding::new(kind, store.clone()),
            source,
            composer: GridConfigComposer::new(),
            defaults: default_columns(kind),
            store,
            cache,
            menu: ContextMenuProvider::bind(
                kind,
                vec![MenuEntry::GoToDetail, MenuEntry::CopyName, MenuEntry::Refresh],
            ),
            options: None,
            live_columns: Vec::new(),
            search_text: prefs.filter.search.clone().unwrap_or_default(),
            scroll_offset: 0.0,
            pending_scroll_row: None,
            scroll_moved_at: None,
            last_viewport: None,
            wanted_range: None,
            range_changed_at: None,
            inflight_range: None,
            drag_from: None,
            fit_pending: false,
            ready_sent: false,
            show_columns_popup: false,
        }
    }

    /// Called when the page leaves the screen: pending persists must
    /// not fire against a hidden view, and in-flight fetches go stale.
    pub fn suspend(&mut self) {
        self.binding.unmount();
        self.source.suspend();
        self.wanted_range = None;
        self.inflight_range = None;
        self.range_changed_at = None;
    }

    /// Flush everything on app shutdown
    pub fn shutdown(&mut self) {
        self.binding.unmount();
        self.source.teardown();
    }

    fn emit(&mut self, event: GridEvent, now: Instant, nav: &mut Navigator) {
        let commands = self.binding.handle_event(event, now);
        self.execute(commands, nav);
    }

    fn execute(&mut self, commands: Vec<GridCommand>, nav: &mut Navigator) {
        for command in commands {
            match command {
                GridCommand::ScrollToRow { row } => {
                    self.pending_scroll_row = Some(row);
                }
                GridCommand::SizeColumnsToFit => {
                    self.fit_pending = true;
                }
                GridCommand::Navigate(route) => {
                    debug!(path = %route.path(), "Navigating");
                    nav.navigate(route);
                }
            }
        }
    }

    fn apply_filter_change(&mut self, f: impl FnOnce(&mut crate::types::QueryFilter)) {
        let mut filter = self.source.filter().clone();
        f(&mut filter);
        self.store.write_table(
            self.kind.page_key(),
            TablePatch {
                filter: Some(filter.clone()),
                ..Default::default()
            },
        );
        self.source.set_filter(filter);
        self.wanted_range = None;
        self.inflight_range = None;
        self.scroll_offset = 0.0;
        self.pending_scroll_row = Some(0);
    }

    fn refresh(&mut self) {
        self.cache
            .invalidate_prefix(&format!("{}:", self.kind.page_key()));
        let filter = self.source.filter().clone();
        self.source.set_filter(filter);
        self.wanted_range = None;
        self.inflight_range = None;
    }

    /// Rebuild the live column layout from freshly composed options
    fn rebuild_live_columns(&mut self, options: &GridOptions) {
        self.live_columns = options
            .columns
            .iter()
            .filter(|c| c.visible)
            .map(|c| ColumnState::new(c.id.clone(), c.width))
            .collect();
        self.fit_pending = true;
    }

    /// Distribute the available width across columns with no stored
    /// width; the title column gets a double share.
    fn fit_columns(&mut self, available: f32) {
        let fixed: f32 = self.live_columns.iter().filter_map(|c| c.width).sum();
        let weight = |c: &ColumnState| if c.column == "title" { 2.0 } else { 1.0 };
        let total_weight: f32 = self
            .live_columns
            .iter()
            .filter(|c| c.width.is_none())
            .map(weight)
            .sum();
        if total_weight > 0.0 {
            let per_weight = (available - fixed).max(0.0) / total_weight;
            for col in &mut self.live_columns {
                if col.width.is_none() {
                    col.width = Some((per_weight * weight(col)).max(MIN_COLUMN_WIDTH));
                }
            }
        }
    }

    fn column_snapshot(&self) -> Vec<ColumnState> {
        self.live_columns.clone()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, nav: &mut Navigator) {
        let now = Instant::now();
        self.binding.poll(now);

        let prefs = self.store.read(self.binding.page_key());
        let avail = ui.available_size();
        let viewport_rows = ((avail.y - HEADER_HEIGHT).max(0.0)
            / prefs.row_height.max(1.0)) as usize;

        let options = self
            .composer
            .compose(&prefs, &self.defaults, viewport_rows)
            .clone();

        if self.options.as_ref() != Some(&options) {
            self.rebuild_live_columns(&options);
            self.options = Some(options.clone());
        }

        // Viewport change -> resized event (may request a column fit)
        match self.last_viewport {
            Some(last) if (last.x - avail.x).abs() < 1.0 && (last.y - avail.y).abs() < 1.0 => {}
            _ => {
                self.last_viewport = Some(avail);
                self.emit(GridEvent::Resized, now, nav);
            }
        }

        if !self.ready_sent {
            self.ready_sent = true;
            self.emit(GridEvent::Ready, now, nav);
        }

        self.toolbar(ui, &options);

        let window = self.source.window();
        let total = if window.total > 0 {
            window.total
        } else {
            options.initial_row_count as u64
        };

        if options.paginated {
            let page_size = options.page_size.unwrap_or(viewport_rows.max(1));
            self.paginated_table(ui, nav, &options, page_size, total, now);
            self.pagination_bar(ui, nav, page_size, total, now);
        } else {
            self.infinite_table(ui, nav, &options, total, now);
        }

        self.status_line(ui, &window.state, window.total);
        self.schedule_fetch(ui.ctx(), &options, now);
    }

    fn toolbar(&mut self, ui: &mut egui::Ui, options: &GridOptions) {
        let filter = self.source.filter().clone();
        ui.horizontal(|ui| {
            ui.add_space(theme::SPACING_SM);

            // Search box
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_text)
                    .hint_text(format!("Search {}...", self.kind.label().to_lowercase()))
                    .desired_width(220.0),
            );
            if response.changed() {
                let text = self.search_text.clone();
                self.apply_filter_change(|f| {
                    f.search = if text.is_empty() { None } else { Some(text) };
                });
            }

            if theme::toggle_pill(ui, filter.favorites_only, "Favorites") {
                self.apply_filter_change(|f| f.favorites_only = !f.favorites_only);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_space(theme::SPACING_SM);
                let columns_label =
                    format!("{} Columns", egui_phosphor::regular::COLUMNS);
                if ui.button(columns_label).clicked() {
                    self.show_columns_popup = !self.show_columns_popup;
                }
                let paginated = options.paginated;
                if theme::toggle_pill(ui, paginated, "Pages") {
                    self.store.write_table(
                        self.kind.page_key(),
                        TablePatch {
                            paginated: Some(!paginated),
                            ..Default::default()
                        },
                    );
                    self.pending_scroll_row = Some(0);
                }
            });
        });

        if self.show_columns_popup {
            self.columns_popup(ui, options);
        }
        ui.add_space(theme::SPACING_SM);
    }

    /// Per-page layout settings: column visibility and autosize
    fn columns_popup(&mut self, ui: &mut egui::Ui, options: &GridOptions) {
        let mut autosize = options.autosize_columns;
        let mut columns: Vec<ColumnPref> = options
            .columns
            .iter()
            .map(|c| ColumnPref {
                column: c.id.clone(),
                width: c.width,
                visible: c.visible,
            })
            .collect();
        let mut changed = false;

        theme::section_frame().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for column in columns.iter_mut() {
                    let title = self
                        .defaults
                        .iter()
                        .find(|d| d.id == column.column)
                        .map(|d| d.title.clone())
                        .unwrap_or_else(|| column.column.clone());
                    let mut visible = column.visible;
                    if ui.checkbox(&mut visible, title).changed() {
                        column.visible = visible;
                        changed = true;
                    }
                }
                ui.separator();
                if ui.checkbox(&mut autosize, "Fit columns").changed() {
                    changed = true;
                }
            });
        });

        if changed {
            self.store.write_table(
                self.kind.page_key(),
                TablePatch {
                    columns: Some(columns),
                    autosize_columns: Some(autosize),
                    ..Default::default()
                },
            );
        }
    }

    fn infinite_table(
        &mut self,
        ui: &mut egui::Ui,
        nav: &mut Navigator,
        options: &GridOptions,
        total: u64,
        now: Instant,
    ) {
        self.table(ui, nav, options, 0, total as usize, total, now);
    }

    fn paginated_table(
        &mut self,
        ui: &mut egui::Ui,
        nav: &mut Navigator,
        options: &GridOptions,
        page_size: usize,
        total: u64,
        now: Instant,
    ) {
        let page = self.store.read(self.binding.page_key()).pagination.current_page;
        let (start, end) = page_row_span(page, page_size, total);
        self.table(ui, nav, options, start, end, total, now);
    }

    #[allow(clippy::too_many_arguments)]
    fn table(
        &mut self,
        ui: &mut egui::Ui,
        nav: &mut Navigator,
        options: &GridOptions,
        row_start: usize,
        row_end: usize,
        total: u64,
        now: Instant,
    ) {
        if self.fit_pending {
            self.fit_pending = false;
            let fit_width = ui.available_width() - 16.0;
            if options.autosize_columns {
                for col in &mut self.live_columns {
                    col.width = None;
                }
            }
            self.fit_columns(fit_width.max(MIN_COLUMN_WIDTH));
        }

        let row_height = options.row_height;
        let window = self.source.window();
        let table_height = ui.available_height() - 48.0;

        let mut builder = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .sense(egui::Sense::click())
            .min_scrolled_height(0.0)
            .max_scroll_height(table_height.max(0.0))
            .auto_shrink([false, false])
            .vertical_scroll_offset(self.scroll_offset);

        // Horizontal scrollbar stays visible per the grid options
        if options.always_show_horizontal_scroll {
            builder = builder.scroll_bar_visibility(
                egui::scroll_area::ScrollBarVisibility::AlwaysVisible,
            );
        }

        if let Some(target) = self.pending_scroll_row.take() {
            let relative = target.saturating_sub(row_start);
            let row_count = row_end.saturating_sub(row_start);
            if row_count == 0 || relative < row_count {
                builder = builder
                    .scroll_to_row(relative, Some(egui::Align::TOP))
                    .animate_scrolling(false);
            } else {
                // Out-of-range target is non-fatal
                debug!(target, row_count, "Scroll target out of range");
            }
        }

        for col in &self.live_columns {
            builder = builder.column(
                Column::exact(col.width.unwrap_or(MIN_COLUMN_WIDTH)).clip(true),
            );
        }

        let visible: Vec<ColumnState> = self.live_columns.clone();
        let filter = self.source.filter().clone();
        let mut header_rects: Vec<egui::Rect> = Vec::with_capacity(visible.len());
        let mut sort_clicked: Option<SortField> = None;
        let mut resized_to: Option<(usize, f32)> = None;
        let mut moved_to: Option<(usize, f32)> = None;
        let mut activated: Option<LibraryItem> = None;
        let mut menu_pick = None;

        let scroll_output = builder
            .header(HEADER_HEIGHT, |mut header| {
                for (idx, col) in visible.iter().enumerate() {
                    header.col(|ui| {
                        let rect = ui.max_rect();
                        header_rects.push(rect);
                        let title = self
                            .defaults
                            .iter()
                            .find(|d| d.id == col.column)
                            .map(|d| d.title.as_str())
                            .unwrap_or(col.column.as_str());

                        let sort_field = sort_field_for(&col.column);
                        let is_sorted = sort_field == Some(filter.sort_by);
                        let icon = if is_sorted {
                            match filter.sort_order {
                                SortOrder::Ascending => egui_phosphor::regular::CARET_UP,
                                SortOrder::Descending => egui_phosphor::regular::CARET_DOWN,
                            }
                        } else {
                            ""
                        };
                        let text = if icon.is_empty() {
                            title.to_string()
                        } else {
                            format!("{} {}", title, icon)
                        };
                        let label = ui.add(
                            egui::Label::new(
                                egui::RichText::new(text)
                                    .size(12.0)
                                    .strong()
                                    .color(if is_sorted {
                                        egui::Color32::WHITE
                                    } else {
                                        theme::TEXT_MUTED
                                    }),
                            )
                            .selectable(false)
                            .sense(egui::Sense::click_and_drag()),
                        );

                        if label.clicked() {
                            sort_clicked = sort_field;
                        }
                        if label.drag_started() {
                            self.drag_from = Some(idx);
                        }
                        if label.drag_stopped() {
                            if let (Some(from), Some(pos)) =
                                (self.drag_from.take(), label.interact_pointer_pos())
                            {
                                moved_to = Some((from, pos.x));
                            }
                        }

                        // Resize handle on the column's right edge
                        let handle = egui::Rect::from_min_max(
                            egui::pos2(rect.right() - 4.0, rect.top()),
                            egui::pos2(rect.right() + 4.0, rect.bottom()),
                        );
                        let resize = ui.interact(
                            handle,
                            ui.id().with(("col-resize", idx)),
                            egui::Sense::drag(),
                        );
                        if resize.hovered() || resize.dragged() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                        }
                        if resize.dragged() {
                            let width = (rect.width() + resize.drag_delta().x)
                                .max(MIN_COLUMN_WIDTH);
                            resized_to = Some((idx, width));
                        }
                    });
                }
            })
            .body(|body| {
                let row_count = row_end.saturating_sub(row_start);
                body.rows(row_height, row_count, |mut row| {
                    let absolute = row_start + row.index();
                    let item = window.item_at(absolute).cloned();

                    for col in &visible {
                        row.col(|ui| match &item {
                            Some(item) => render_cell(ui, &col.column, item),
                            None => {
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new("···")
                                            .size(12.0)
                                            .color(theme::TEXT_DIM),
                                    )
                                    .selectable(false),
                                );
                            }
                        });
                    }

                    let response = row.response();
                    if let Some(item) = &item {
                        if response.hovered() {
                            response
                                .ctx
                                .set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if response.double_clicked() {
                            activated = Some(item.clone());
                        }
                        response.context_menu(|ui| {
                            if let Some(pick) = self.menu.show(ui, item) {
                                menu_pick = Some(pick);
                            }
                        });
                    }
                });
            });

        // Column move: translate the drop x position into a target index
        if let Some((from, drop_x)) = moved_to {
            let target = header_rects
                .iter()
                .position(|r| drop_x < r.right())
                .unwrap_or(header_rects.len().saturating_sub(1));
            if target != from && from < self.live_columns.len() {
                let col = self.live_columns.remove(from);
                self.live_columns.insert(target.min(self.live_columns.len()), col);
                let snapshot = self.column_snapshot();
                self.emit(GridEvent::ColumnsMoved { columns: snapshot }, now, nav);
            }
        }

        if let Some((idx, width)) = resized_to {
            if let Some(col) = self.live_columns.get_mut(idx) {
                col.width = Some(width);
            }
            let snapshot = self.column_snapshot();
            self.emit(GridEvent::ColumnResized { columns: snapshot }, now, nav);
        }

        if let Some(field) = sort_clicked {
            self.apply_filter_change(|f| {
                if f.sort_by == field {
                    f.sort_order = match f.sort_order {
                        SortOrder::Ascending => SortOrder::Descending,
                        SortOrder::Descending => SortOrder::Ascending,
                    };
                } else {
                    f.sort_by = field;
                    f.sort_order = SortOrder::Ascending;
                }
            });
        }

        if let Some(item) = activated {
            self.emit(GridEvent::RowActivated { item }, now, nav);
        }

        if let Some(pick) = menu_pick {
            match pick.entry {
                MenuEntry::GoToDetail => {
                    self.emit(GridEvent::RowActivated { item: pick.item }, now, nav);
                }
                MenuEntry::CopyName => {
                    ui.ctx().copy_text(pick.item.name.clone());
                }
                MenuEntry::Refresh => self.refresh(),
            }
        }

        // Scroll-end detection: offset stable for a settle window
        let new_offset = scroll_output.state.offset.y;
        if (new_offset - self.scroll_offset).abs() > 0.5 {
            self.scroll_offset = new_offset;
            self.scroll_moved_at = Some(now);
        } else if let Some(moved_at) = self.scroll_moved_at {
            if now.duration_since(moved_at) >= Duration::from_millis(SCROLL_SETTLE_MS) {
                self.scroll_moved_at = None;
                self.emit(
                    GridEvent::ScrollEnded {
                        scroll_top: new_offset,
                    },
                    now,
                    nav,
                );
            }
        }

        // Remember the visible span for fetch scheduling
        let viewport_h = scroll_output.inner_rect.height().max(0.0);
        let first_visible = row_start + (new_offset / row_height).floor() as usize;
        let visible_rows = (viewport_h / row_height).ceil() as usize + 1;
        let wanted = if options.paginated {
            RowRange::new(row_start, row_end)
        } else {
            let start = first_visible.saturating_sub(options.row_buffer);
            let end = (first_visible + visible_rows + options.row_buffer)
                .min(total as usize)
                .max(start);
            RowRange::new(start, end)
        };
        if Some(wanted) != self.wanted_range {
            self.wanted_range = Some(wanted);
            self.range_changed_at = Some(now);
        }
    }

    /// Fire the pending range fetch once its debounce window passed
    fn schedule_fetch(&mut self, ctx: &egui::Context, options: &GridOptions, now: Instant) {
        let Some(wanted) = self.wanted_range else {
            return;
        };
        if wanted.limit() == 0 {
            return;
        }
        let window = self.source.window();
        if window.state != RowsState::Idle && window.covers(wanted) {
            self.inflight_range = None;
            return;
        }
        if self.inflight_range == Some(wanted) || window.state == RowsState::Loading {
            ctx.request_repaint_after(options.fetch_debounce);
            return;
        }
        let debounce_over = self
            .range_changed_at
            .map(|at| now.duration_since(at) >= options.fetch_debounce)
            .unwrap_or(true);
        if !debounce_over {
            ctx.request_repaint_after(options.fetch_debounce);
            return;
        }

        self.inflight_range = Some(wanted);
        let repaint = ctx.clone();
        self.source.get_rows(wanted, move || repaint.request_repaint());
    }

    fn pagination_bar(
        &mut self,
        ui: &mut egui::Ui,
        nav: &mut Navigator,
        page_size: usize,
        total: u64,
        now: Instant,
    ) {
        let total_pages = if page_size > 0 {
            ((total as usize) + page_size - 1) / page_size
        } else {
            0
        };
        let current = self
            .store
            .read(self.binding.page_key())
            .pagination
            .current_page
            .min(total_pages.saturating_sub(1));

        let mut go_to: Option<usize> = None;
        ui.horizontal(|ui| {
            ui.add_space(theme::SPACING_SM);
            if ui
                .add_enabled(current > 0, egui::Button::new(egui_phosphor::regular::CARET_LEFT))
                .clicked()
            {
                go_to = Some(current - 1);
            }
            ui.label(
                egui::RichText::new(format!(
                    "Page {} of {}",
                    current + 1,
                    total_pages.max(1)
                ))
                .size(12.0)
                .color(theme::TEXT_MUTED),
            );
            if ui
                .add_enabled(
                    current + 1 < total_pages,
                    egui::Button::new(egui_phosphor::regular::CARET_RIGHT),
                )
                .clicked()
            {
                go_to = Some(current + 1);
            }
        });

        if let Some(page) = go_to {
            self.emit(
                GridEvent::PaginationChanged {
                    page,
                    page_size,
                    total_items: total,
                    total_pages,
                },
                now,
                nav,
            );
            self.wanted_range = None;
            self.inflight_range = None;
        }
    }

    fn status_line(&mut self, ui: &mut egui::Ui, state: &RowsState, total: u64) {
        ui.horizontal(|ui| {
            ui.add_space(theme::SPACING_SM);
            match state {
                RowsState::Failed(message) => {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} {}",
                            egui_phosphor::regular::WARNING_CIRCLE,
                            message
                        ))
                        .size(12.0)
                        .color(theme::STATUS_ERROR),
                    );
                    if ui.small_button("Retry").clicked() {
                        self.refresh();
                    }
                }
                RowsState::Loading => {
                    ui.spinner();
                    ui.label(
                        egui::RichText::new("Loading...")
                            .size(12.0)
                            .color(theme::TEXT_DIM),
                    );
                }
                _ => {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} {}",
                            format_count(total),
                            self.kind.label().to_lowercase()
                        ))
                        .size(12.0)
                        .color(theme::TEXT_DIM),
                    );
                }
            }
        });
    }
}

fn render_cell(ui: &mut egui::Ui, column_id: &str, item: &LibraryItem) {
    match column_id {
        "title" => {
            ui.add(
                egui::Label::new(egui::RichText::new(&item.name).size(13.0).strong())
                    .truncate()
                    .selectable(false),
            );
        }
        "artist" => {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(item.artist.as_deref().unwrap_or(""))
                        .size(12.0)
                        .color(theme::TEXT_MUTED),
                )
                .truncate()
                .selectable(false),
            );
        }
        "year" => {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format_premiere_year(item.premiere_date.as_deref()))
                        .size(12.0)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        }
        "tracks" => {
            let text = item
                .track_count
                .map(|n| n.to_string())
                .unwrap_or_default();
            ui.add(
                egui::Label::new(
                    egui::RichText::new(text).size(12.0).color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        }
        "duration" => {
            let text = item
                .duration_ticks
                .map(format_duration)
                .unwrap_or_default();
            ui.add(
                egui::Label::new(
                    egui::RichText::new(text).size(12.0).color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        }
        _ => {}
    }
}
