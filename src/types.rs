//! Common types and data structures

use serde::{Deserialize, Serialize};

/// Logical item category a browse page displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Album,
    AlbumArtist,
    Artist,
    Playlist,
    Song,
    Genre,
}

impl ItemKind {
    /// Kinds that get a browse tab
    pub const BROWSABLE: [ItemKind; 5] = [
        ItemKind::Album,
        ItemKind::AlbumArtist,
        ItemKind::Artist,
        ItemKind::Playlist,
        ItemKind::Song,
    ];

    /// Key scoping stored display preferences to this kind's browse page
    pub fn page_key(self) -> &'static str {
        match self {
            ItemKind::Album => "albums",
            ItemKind::AlbumArtist => "album-artists",
            ItemKind::Artist => "artists",
            ItemKind::Playlist => "playlists",
            ItemKind::Song => "songs",
            ItemKind::Genre => "genres",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Album => "Albums",
            ItemKind::AlbumArtist => "Album Artists",
            ItemKind::Artist => "Artists",
            ItemKind::Playlist => "Playlists",
            ItemKind::Song => "Songs",
            ItemKind::Genre => "Genres",
        }
    }
}

/// Field the server sorts a listing by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortField {
    #[default]
    Name,
    Artist,
    PremiereDate,
    Runtime,
    DateAdded,
}

impl SortField {
    /// Name the server API expects in the `sort_by` query parameter
    pub fn api_name(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Artist => "artist",
            SortField::PremiereDate => "premiere_date",
            SortField::Runtime => "runtime",
            SortField::DateAdded => "date_added",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn api_name(self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// Filter state a browse page applies to its listing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueryFilter {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub favorites_only: bool,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl QueryFilter {
    /// Deterministic fragment used when building cache keys; identical
    /// filters must yield identical fragments.
    pub fn cache_fragment(&self) -> String {
        format!(
            "q={}&genre={}&fav={}&sort={}.{}",
            self.search.as_deref().unwrap_or(""),
            self.genre.as_deref().unwrap_or(""),
            self.favorites_only,
            self.sort_by.api_name(),
            self.sort_order.api_name(),
        )
    }
}

/// One record in a listing, as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryItem {
    pub id: String,
    pub name: String,
    pub artist: Option<String>,
    pub premiere_date: Option<String>,
    pub duration_ticks: Option<i64>,
    pub track_count: Option<u32>,
    pub favorite: bool,
}

impl Default for LibraryItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            artist: None,
            premiere_date: None,
            duration_ticks: None,
            track_count: None,
            favorite: false,
        }
    }
}

/// One page of a listing plus the size of the whole result set
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ItemPage {
    pub items: Vec<LibraryItem>,
    pub total_record_count: u64,
}

/// Parameters of one list fetch: the page filter merged with a row window
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub limit: usize,
    pub start_index: usize,
    pub filter: QueryFilter,
}

impl ListQuery {
    /// Query-string pairs for the request URL
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("start_index", self.start_index.to_string()),
            ("sort_by", self.filter.sort_by.api_name().to_string()),
            ("sort_order", self.filter.sort_order.api_name().to_string()),
        ];
        if let Some(q) = &self.filter.search {
            if !q.is_empty() {
                pairs.push(("search", q.clone()));
            }
        }
        if let Some(g) = &self.filter.genre {
            if !g.is_empty() {
                pairs.push(("genre", g.clone()));
            }
        }
        if self.filter.favorites_only {
            pairs.push(("favorites", "true".to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_fragment_is_stable_for_equal_filters() {
        let a = QueryFilter {
            search: Some("miles".into()),
            ..Default::default()
        };
        let b = a.clone();
        assert_eq!(a.cache_fragment(), b.cache_fragment());
    }

    #[test]
    fn cache_fragment_differs_when_filter_differs() {
        let a = QueryFilter::default();
        let b = QueryFilter {
            favorites_only: true,
            ..Default::default()
        };
        assert_ne!(a.cache_fragment(), b.cache_fragment());
    }

    #[test]
    fn list_query_pairs_skip_empty_search() {
        let q = ListQuery {
            limit: 50,
            start_index: 100,
            filter: QueryFilter {
                search: Some(String::new()),
                ..Default::default()
            },
        };
        let pairs = q.to_pairs();
        assert!(pairs.iter().any(|(k, v)| *k == "limit" && v == "50"));
        assert!(pairs.iter().any(|(k, v)| *k == "start_index" && v == "100"));
        assert!(!pairs.iter().any(|(k, _)| *k == "search"));
    }
}
