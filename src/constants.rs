//! Application constants and configuration

pub const APP_NAME: &str = "Tonearm";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Trailing debounce for persisting column widths during a resize drag
pub const RESIZE_PERSIST_DEBOUNCE_MS: u64 = 200;

/// Quiet period between scroll movement and the row fetch it triggers
pub const FETCH_DEBOUNCE_MS: u64 = 200;

/// Rows fetched beyond the visible viewport on each side
pub const ROW_BUFFER: usize = 20;

/// Row height used when a page has no stored preference
pub const DEFAULT_ROW_HEIGHT: f32 = 40.0;

/// Scroll counts as ended after this much inactivity
pub const SCROLL_SETTLE_MS: u64 = 250;

/// Page size used in paginated mode before the viewport is measured
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Row count shown before the first fetch reports a real total
pub const INITIAL_ROW_COUNT: usize = 50;

/// Narrowest a column can be dragged
pub const MIN_COLUMN_WIDTH: f32 = 40.0;
