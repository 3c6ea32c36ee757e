//! Events the browse table emits and commands the binding issues back

use crate::router::Route;
use crate::types::LibraryItem;

/// Column layout as currently rendered by the table, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnState {
    pub column: String,
    pub width: Option<f32>,
}

impl ColumnState {
    pub fn new(column: impl Into<String>, width: Option<f32>) -> Self {
        Self {
            column: column.into(),
            width,
        }
    }
}

#[derive(Debug, Clone)]
pub enum GridEvent {
    /// Table mounted and laid out for the first time
    Ready,
    /// Viewport dimensions changed
    Resized,
    /// User moved to another page (paginated mode)
    PaginationChanged {
        page: usize,
        page_size: usize,
        total_items: u64,
        total_pages: usize,
    },
    /// Columns were reordered; snapshot is the full new layout
    ColumnsMoved { columns: Vec<ColumnState> },
    /// A column edge was dragged; snapshot is the full current layout
    ColumnResized { columns: Vec<ColumnState> },
    /// Scrolling came to rest
    ScrollEnded { scroll_top: f32 },
    /// Row double-clicked
    RowActivated { item: LibraryItem },
}

/// Instructions the table executes on the binding's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum GridCommand {
    SizeColumnsToFit,
    ScrollToRow { row: usize },
    Navigate(Route),
}
