//! Route guard: decides whether an admin view may render.
//!
//! The decision is recomputed from the token store on every evaluation and
//! never cached, so clearing the credential locks the very next navigation.

mod route;

pub use route::Route;

use tracing::debug;

use crate::session::TokenStore;

/// Whether protected content is currently reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No live credential; protected routes redirect to login.
    Locked,
    /// A live credential is present.
    Unlocked,
}

/// Outcome of a single guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Mount the requested route.
    Render(Route),
    /// Send the admin to `to`, remembering `from`.
    Redirect { to: Route, from: Route },
}

/// Either the rendered view or the redirect taken instead. Never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The mounted view.
    Content(T),
    /// The redirect taken instead of mounting.
    Redirect { to: Route, from: Route },
}

impl<T> Guarded<T> {
    /// The view, unless a redirect was taken.
    pub fn content(self) -> Option<T> {
        match self {
            Self::Content(content) => Some(content),
            Self::Redirect { .. } => None,
        }
    }

    /// Whether the view was withheld.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// Consulted before every admin view renders.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    tokens: TokenStore,
}

impl RouteGuard {
    /// Guard over the shared token store.
    #[must_use]
    pub fn new(tokens: TokenStore) -> Self {
        Self { tokens }
    }

    /// Current lock state, read fresh from the token store.
    #[must_use]
    pub fn state(&self) -> GuardState {
        if self.tokens.is_authenticated() {
            GuardState::Unlocked
        } else {
            GuardState::Locked
        }
    }

    /// Decide whether `route` may render right now.
    #[must_use]
    pub fn evaluate(&self, route: Route) -> GuardDecision {
        if !route.is_protected() || self.state() == GuardState::Unlocked {
            return GuardDecision::Render(route);
        }

        debug!(route = route.path(), "guard locked, redirecting to login");

        GuardDecision::Redirect {
            to: Route::Login,
            from: route,
        }
    }

    /// Mount `view` only if `route` may render right now.
    pub fn render<T, F>(&self, route: Route, view: F) -> Guarded<T>
    where
        F: FnOnce() -> T,
    {
        match self.evaluate(route) {
            GuardDecision::Render(_) => Guarded::Content(view()),
            GuardDecision::Redirect { to, from } => Guarded::Redirect { to, from },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, sync::Arc};

    use jiff::Timestamp;

    use crate::session::{ManualClock, MemoryStorage, TOKEN_TTL};

    use super::*;

    fn guard() -> (RouteGuard, TokenStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
        let tokens = TokenStore::new(Arc::new(MemoryStorage::new(clock.clone())), clock.clone());

        (RouteGuard::new(tokens.clone()), tokens, clock)
    }

    #[test]
    fn locked_guard_redirects_and_never_mounts() {
        let (guard, _tokens, _clock) = guard();
        let mounted = Cell::new(false);

        let outcome = guard.render(Route::Instructors, || mounted.set(true));

        assert_eq!(guard.state(), GuardState::Locked);
        assert_eq!(
            outcome,
            Guarded::Redirect {
                to: Route::Login,
                from: Route::Instructors
            }
        );
        assert!(!mounted.get(), "protected view must not mount while locked");
    }

    #[test]
    fn login_unlocks_protected_view() {
        let (guard, tokens, _clock) = guard();

        tokens.set_token("abc123");

        assert_eq!(guard.state(), GuardState::Unlocked);
        assert_eq!(
            guard.render(Route::Instructors, || "instructors"),
            Guarded::Content("instructors")
        );
    }

    #[test]
    fn clearing_token_relocks_next_navigation() {
        let (guard, tokens, _clock) = guard();

        tokens.set_token("abc123");
        assert_eq!(guard.evaluate(Route::Orders), GuardDecision::Render(Route::Orders));

        tokens.clear_token();

        assert_eq!(
            guard.evaluate(Route::Orders),
            GuardDecision::Redirect {
                to: Route::Login,
                from: Route::Orders
            }
        );
    }

    #[test]
    fn expiry_relocks_next_navigation() {
        let (guard, tokens, clock) = guard();

        tokens.set_token("abc123");
        clock.advance(TOKEN_TTL);

        assert_eq!(guard.state(), GuardState::Locked);
    }

    #[test]
    fn public_routes_always_render() {
        let (guard, _tokens, _clock) = guard();

        assert_eq!(guard.evaluate(Route::Login), GuardDecision::Render(Route::Login));
        assert_eq!(
            guard.evaluate(Route::Dashboard),
            GuardDecision::Render(Route::Dashboard)
        );
    }
}
