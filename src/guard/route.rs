//! Dashboard locations.

use std::fmt;

/// A navigable dashboard location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Login,
    Users,
    Instructors,
    Shop,
    Orders,
    Content,
}

impl Route {
    /// Every known route.
    pub const ALL: [Self; 7] = [
        Self::Dashboard,
        Self::Login,
        Self::Users,
        Self::Instructors,
        Self::Shop,
        Self::Orders,
        Self::Content,
    ];

    /// Location path of this route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Login => "/login",
            Self::Users => "/users",
            Self::Instructors => "/admin/instructors",
            Self::Shop => "/admin/shop",
            Self::Orders => "/admin/orders",
            Self::Content => "/content",
        }
    }

    /// Parse a location path; unknown paths have no route.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };

        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Whether a credential is required before this route renders.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Dashboard | Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::from_path("/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/admin/instructors/"), Some(Route::Instructors));
        assert_eq!(Route::from_path("/admin/orders?status=shipped"), Some(Route::Orders));
        assert_eq!(Route::from_path("/analytics"), None);
        assert_eq!(Route::from_path("/products"), None);
    }

    #[test]
    fn every_route_round_trips_through_its_path() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route), "route {route:?}");
        }
    }

    #[test]
    fn only_dashboard_and_login_are_public() {
        let public: Vec<_> = Route::ALL.into_iter().filter(|r| !r.is_protected()).collect();

        assert_eq!(public, vec![Route::Dashboard, Route::Login]);
    }
}
