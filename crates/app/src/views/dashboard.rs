//! Dashboard page: welcome line and live counts.

use std::sync::Arc;

use lotus::{
    api::ApiError,
    guard::{GuardState, RouteGuard},
    resources::{instructors::InstructorsService, store::StoreService, users::UsersService},
};

use super::render_table;
use crate::notifications::Notification;

/// Record counts; `None` when that fetch failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub instructors: Option<usize>,
    pub items: Option<usize>,
    pub orders: Option<usize>,
    pub users: Option<usize>,
}

pub struct DashboardView {
    guard: RouteGuard,
    users: Arc<dyn UsersService>,
    instructors: Arc<dyn InstructorsService>,
    store: Arc<dyn StoreService>,
    counts: Option<DashboardCounts>,
}

impl DashboardView {
    #[must_use]
    pub fn new(
        guard: RouteGuard,
        users: Arc<dyn UsersService>,
        instructors: Arc<dyn InstructorsService>,
        store: Arc<dyn StoreService>,
    ) -> Self {
        Self {
            guard,
            users,
            instructors,
            store,
            counts: None,
        }
    }

    /// Fetch the counts concurrently. Does nothing while signed out.
    pub async fn load(&mut self) -> Vec<Notification> {
        if self.guard.state() == GuardState::Locked {
            self.counts = None;

            return Vec::new();
        }

        let (instructors, items, orders, users) = tokio::join!(
            self.instructors.list_instructors(),
            self.store.list_items(),
            self.store.list_orders(),
            self.users.list_users(),
        );

        let mut failures = Vec::new();

        let counts = DashboardCounts {
            instructors: count(instructors, "Failed to fetch instructors", &mut failures),
            items: count(items, "Failed to load store items", &mut failures),
            orders: count(orders, "Order Fetch Failed", &mut failures),
            users: count(users, "Failed to fetch users", &mut failures),
        };

        self.counts = Some(counts);

        failures
    }

    #[must_use]
    pub fn counts(&self) -> Option<DashboardCounts> {
        self.counts
    }

    #[must_use]
    pub fn render(&self) -> String {
        let Some(counts) = self.counts else {
            return "Welcome to the Lotus studio dashboard. Sign in to see studio activity.".to_string();
        };

        let cell = |value: Option<usize>| value.map_or_else(|| "-".to_string(), |n| n.to_string());

        let table = render_table(
            ["Instructors", "Store Items", "Orders", "Users"],
            [[
                cell(counts.instructors),
                cell(counts.items),
                cell(counts.orders),
                cell(counts.users),
            ]],
            &[0, 1, 2, 3],
            "",
        );

        format!("Welcome back, Admin!\n{table}")
    }
}

fn count<T>(
    result: Result<Vec<T>, ApiError>,
    title: &str,
    failures: &mut Vec<Notification>,
) -> Option<usize> {
    match result {
        Ok(records) => Some(records.len()),
        Err(error) => {
            failures.push(Notification::from_error(title, &error));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use lotus::{
        api::ApiErrorKind,
        resources::{
            instructors::MockInstructorsService, store::MockStoreService,
            users::MockUsersService,
        },
        session::{ManualClock, MemoryStorage, TokenStore},
    };

    use super::*;

    fn guard(token: Option<&str>) -> RouteGuard {
        let clock = Arc::new(ManualClock::new(Timestamp::UNIX_EPOCH));
        let tokens = TokenStore::new(Arc::new(MemoryStorage::new(clock.clone())), clock);

        if let Some(token) = token {
            tokens.set_token(token);
        }

        RouteGuard::new(tokens)
    }

    #[tokio::test]
    async fn locked_dashboard_fetches_nothing() {
        let mut users = MockUsersService::new();
        users.expect_list_users().never();

        let mut view = DashboardView::new(
            guard(None),
            Arc::new(users),
            Arc::new(MockInstructorsService::new()),
            Arc::new(MockStoreService::new()),
        );

        assert!(view.load().await.is_empty(), "no requests while locked");
        assert!(view.render().starts_with("Welcome to"), "welcome line only");
    }

    #[tokio::test]
    async fn failed_count_is_reported_and_others_shown() {
        let mut users = MockUsersService::new();
        users.expect_list_users().once().return_once(|| Ok(vec![]));

        let mut instructors = MockInstructorsService::new();
        instructors
            .expect_list_instructors()
            .once()
            .return_once(|| Err(ApiError::new(ApiErrorKind::Server, Some(500), "server error")));

        let mut store = MockStoreService::new();
        store.expect_list_items().once().return_once(|| Ok(vec![]));
        store.expect_list_orders().once().return_once(|| Ok(vec![]));

        let mut view = DashboardView::new(
            guard(Some("t1")),
            Arc::new(users),
            Arc::new(instructors),
            Arc::new(store),
        );

        let failures = view.load().await;

        assert_eq!(failures.len(), 1);
        assert_eq!(
            view.counts(),
            Some(DashboardCounts {
                instructors: None,
                items: Some(0),
                orders: Some(0),
                users: Some(0),
            })
        );
    }
}
