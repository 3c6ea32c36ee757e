//! Static capability table mapping item kinds to their list-fetch,
//! cache-key, and detail-route functions.
//!
//! A kind missing from the table offers no listing capability; callers
//! check for `None` and degrade instead of erroring.

use crate::api::{ApiClient, ApiError};
use crate::cache::QueryKey;
use crate::router::Route;
use crate::types::{ItemKind, ItemPage, LibraryItem, ListQuery, QueryFilter};
use futures::future::BoxFuture;
use std::sync::Arc;

type KeyFn = fn(&str, &QueryFilter, usize, usize) -> QueryKey;
type FetchFn = fn(Arc<ApiClient>, ListQuery) -> BoxFuture<'static, Result<Option<ItemPage>, ApiError>>;
type RouteFn = fn(&LibraryItem) -> Route;

pub struct ListCapability {
    pub kind: ItemKind,
    /// Cache key from (server id, filter, limit, start index)
    pub query_key: KeyFn,
    pub fetch: FetchFn,
    /// Detail route for an activated row; `None` means activation is a no-op
    pub detail_route: Option<RouteFn>,
}

/// Listing capability for `kind`, or `None` when the kind offers none
pub fn capability(kind: ItemKind) -> Option<&'static ListCapability> {
    CAPABILITIES.iter().find(|c| c.kind == kind)
}

static CAPABILITIES: &[ListCapability] = &[
    ListCapability {
        kind: ItemKind::Album,
        query_key: album_key,
        fetch: fetch_albums,
        detail_route: Some(album_route),
    },
    ListCapability {
        kind: ItemKind::AlbumArtist,
        query_key: album_artist_key,
        fetch: fetch_album_artists,
        detail_route: Some(artist_route),
    },
    ListCapability {
        kind: ItemKind::Artist,
        query_key: artist_key,
        fetch: fetch_artists,
        detail_route: Some(artist_route),
    },
    ListCapability {
        kind: ItemKind::Playlist,
        query_key: playlist_key,
        fetch: fetch_playlists,
        detail_route: Some(playlist_route),
    },
    ListCapability {
        kind: ItemKind::Song,
        query_key: song_key,
        fetch: fetch_songs,
        detail_route: None,
    },
];

fn list_key(
    scope: &str,
    server_id: &str,
    filter: &QueryFilter,
    limit: usize,
    start_index: usize,
) -> QueryKey {
    QueryKey(format!(
        "{}:{}:{}:{}:{}",
        scope,
        server_id,
        filter.cache_fragment(),
        limit,
        start_index
    ))
}

fn album_key(server_id: &str, filter: &QueryFilter, limit: usize, start_index: usize) -> QueryKey {
    list_key("albums", server_id, filter, limit, start_index)
}

fn album_artist_key(
    server_id: &str,
    filter: &QueryFilter,
    limit: usize,
    start_index: usize,
) -> QueryKey {
    list_key("album-artists", server_id, filter, limit, start_index)
}

fn artist_key(server_id: &str, filter: &QueryFilter, limit: usize, start_index: usize) -> QueryKey {
    list_key("artists", server_id, filter, limit, start_index)
}

fn playlist_key(
    server_id: &str,
    filter: &QueryFilter,
    limit: usize,
    start_index: usize,
) -> QueryKey {
    list_key("playlists", server_id, filter, limit, start_index)
}

fn song_key(server_id: &str, filter: &QueryFilter, limit: usize, start_index: usize) -> QueryKey {
    list_key("songs", server_id, filter, limit, start_index)
}

fn fetch_albums(
    api: Arc<ApiClient>,
    query: ListQuery,
) -> BoxFuture<'static, Result<Option<ItemPage>, ApiError>> {
    Box::pin(async move { api.list_albums(query).await })
}

fn fetch_album_artists(
    api: Arc<ApiClient>,
    query: ListQuery,
) -> BoxFuture<'static, Result<Option<ItemPage>, ApiError>> {
    Box::pin(async move { api.list_album_artists(query).await })
}

fn fetch_artists(
    api: Arc<ApiClient>,
    query: ListQuery,
) -> BoxFuture<'static, Result<Option<ItemPage>, ApiError>> {
    Box::pin(async move { api.list_artists(query).await })
}

fn fetch_playlists(
    api: Arc<ApiClient>,
    query: ListQuery,
) -> BoxFuture<'static, Result<Option<ItemPage>, ApiError>> {
    Box::pin(async move { api.list_playlists(query).await })
}

fn fetch_songs(
    api: Arc<ApiClient>,
    query: ListQuery,
) -> BoxFuture<'static, Result<Option<ItemPage>, ApiError>> {
    Box::pin(async move { api.list_songs(query).await })
}

fn album_route(item: &LibraryItem) -> Route {
    Route::Album {
        id: item.id.clone(),
    }
}

fn artist_route(item: &LibraryItem) -> Route {
    Route::Artist {
        id: item.id.clone(),
    }
}

fn playlist_route(item: &LibraryItem) -> Route {
    Route::Playlist {
        id: item.id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_kinds_resolve() {
        for kind in ItemKind::BROWSABLE {
            assert!(capability(kind).is_some(), "{kind:?} should resolve");
        }
    }

    #[test]
    fn unsupported_kind_is_absent() {
        assert!(capability(ItemKind::Genre).is_none());
    }

    #[test]
    fn songs_have_no_detail_route() {
        assert!(capability(ItemKind::Song).unwrap().detail_route.is_none());
        assert!(capability(ItemKind::Album).unwrap().detail_route.is_some());
    }

    #[test]
    fn query_key_depends_only_on_its_inputs() {
        let cap = capability(ItemKind::Album).unwrap();
        let filter = QueryFilter::default();
        let a = (cap.query_key)("srv", &filter, 50, 0);
        let b = (cap.query_key)("srv", &filter, 50, 0);
        assert_eq!(a, b);

        let c = (cap.query_key)("srv", &filter, 50, 50);
        assert_ne!(a, c);

        let d = (cap.query_key)("other", &filter, 50, 0);
        assert_ne!(a, d);
    }

    #[test]
    fn kinds_key_into_distinct_scopes() {
        let filter = QueryFilter::default();
        let album = (capability(ItemKind::Album).unwrap().query_key)("s", &filter, 10, 0);
        let song = (capability(ItemKind::Song).unwrap().query_key)("s", &filter, 10, 0);
        assert_ne!(album, song);
    }

    #[test]
    fn album_artist_routes_to_artist_detail() {
        let item = LibraryItem {
            id: "a7".into(),
            ..Default::default()
        };
        let cap = capability(ItemKind::AlbumArtist).unwrap();
        let route = (cap.detail_route.unwrap())(&item);
        assert_eq!(route.path(), "/artist/a7");
    }
}
