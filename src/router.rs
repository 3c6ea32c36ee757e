//! Route definitions and in-app navigation

use crate::types::ItemKind;

pub const ALBUM_DETAIL: &str = "/album/{albumId}";
pub const ARTIST_DETAIL: &str = "/artist/{artistId}";
pub const PLAYLIST_DETAIL: &str = "/playlist/{playlistId}";

/// One screen of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Browse(ItemKind),
    Album { id: String },
    Artist { id: String },
    Playlist { id: String },
}

impl Route {
    /// Canonical path for this route
    pub fn path(&self) -> String {
        match self {
            Route::Browse(kind) => format!("/library/{}", kind.page_key()),
            Route::Album { id } => build_path(ALBUM_DETAIL, &[("albumId", id)]),
            Route::Artist { id } => build_path(ARTIST_DETAIL, &[("artistId", id)]),
            Route::Playlist { id } => build_path(PLAYLIST_DETAIL, &[("playlistId", id)]),
        }
    }
}

/// Substitute `{name}` placeholders in a route template
pub fn build_path(template: &str, params: &[(&str, &str)]) -> String {
    let mut path = template.to_string();
    for (name, value) in params {
        path = path.replace(&format!("{{{}}}", name), value);
    }
    path
}

/// Current screen plus a back stack
pub struct Navigator {
    current: Route,
    back_stack: Vec<Route>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            back_stack: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, route);
        self.back_stack.push(previous);
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn back(&mut self) -> bool {
        match self.back_stack.pop() {
            Some(route) => {
                self.current = route;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_path_substitutes_params() {
        assert_eq!(
            build_path(ALBUM_DETAIL, &[("albumId", "abc")]),
            "/album/abc"
        );
        assert_eq!(
            build_path("/x/{a}/{b}", &[("a", "1"), ("b", "2")]),
            "/x/1/2"
        );
    }

    #[test]
    fn navigator_keeps_history() {
        let mut nav = Navigator::new(Route::Browse(ItemKind::Album));
        nav.navigate(Route::Album { id: "abc".into() });
        assert_eq!(nav.current().path(), "/album/abc");
        assert!(nav.back());
        assert_eq!(nav.current(), &Route::Browse(ItemKind::Album));
        assert!(!nav.back());
    }

    #[test]
    fn navigating_to_the_current_route_is_a_noop() {
        let mut nav = Navigator::new(Route::Browse(ItemKind::Song));
        nav.navigate(Route::Browse(ItemKind::Song));
        assert!(!nav.can_go_back());
    }
}
