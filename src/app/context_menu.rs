//! Context menu bound to an item kind and a fixed menu-item set

use crate::theme;
use crate::types::{ItemKind, LibraryItem};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    GoToDetail,
    CopyName,
    Refresh,
}

impl MenuEntry {
    fn icon(self) -> &'static str {
        match self {
            MenuEntry::GoToDetail => egui_phosphor::regular::ARROW_SQUARE_OUT,
            MenuEntry::CopyName => egui_phosphor::regular::COPY,
            MenuEntry::Refresh => egui_phosphor::regular::ARROWS_CLOCKWISE,
        }
    }

    fn label(self, kind: ItemKind) -> String {
        match self {
            MenuEntry::GoToDetail => match kind {
                ItemKind::Album => "Go to album".to_string(),
                ItemKind::AlbumArtist | ItemKind::Artist => "Go to artist".to_string(),
                ItemKind::Playlist => "Go to playlist".to_string(),
                _ => "Open".to_string(),
            },
            MenuEntry::CopyName => "Copy name".to_string(),
            MenuEntry::Refresh => "Refresh".to_string(),
        }
    }
}

/// The entry the user picked, with the row it was picked on
#[derive(Debug, Clone)]
pub struct MenuSelection {
    pub entry: MenuEntry,
    pub item: LibraryItem,
}

/// Renders the same menu-item set for every row of one browse page
pub struct ContextMenuProvider {
    kind: ItemKind,
    entries: Vec<MenuEntry>,
}

impl ContextMenuProvider {
    /// Bind a menu-item set to an item kind
    pub fn bind(kind: ItemKind, entries: Vec<MenuEntry>) -> Self {
        Self { kind, entries }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Draw the menu; returns the picked entry, if any
    pub fn show(&self, ui: &mut egui::Ui, item: &LibraryItem) -> Option<MenuSelection> {
        ui.spacing_mut().item_spacing.y = 2.0;
        let labels: Vec<String> = self.entries.iter().map(|e| e.label(self.kind)).collect();
        let label_refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        theme::set_menu_width(ui, &label_refs);

        let mut picked = None;
        for (entry, label) in self.entries.iter().zip(&labels) {
            if theme::menu_item(ui, entry.icon(), label) {
                picked = Some(MenuSelection {
                    entry: *entry,
                    item: item.clone(),
                });
                ui.close_menu();
            }
        }
        picked
    }
}
