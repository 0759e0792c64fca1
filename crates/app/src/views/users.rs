//! Users page.

use std::sync::Arc;

use lotus::resources::{
    matches_search,
    users::{UsersService, models::User},
};

use super::{Applied, ListView, ViewScope, render_table};

pub struct UsersView {
    service: Arc<dyn UsersService>,
    users: ListView<User>,
    search: String,
}

impl UsersView {
    #[must_use]
    pub fn new(service: Arc<dyn UsersService>, scope: &ViewScope) -> Self {
        Self {
            service,
            users: ListView::new(scope.child(), "Failed to fetch users"),
            search: String::new(),
        }
    }

    pub async fn load(&mut self) -> Applied {
        let ticket = self.users.ticket();
        let result = self.service.list_users().await;

        self.users.apply(ticket, result)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Users matching the search box by name or email.
    #[must_use]
    pub fn visible(&self) -> Vec<&User> {
        self.users
            .items()
            .iter()
            .filter(|user| matches_search(&self.search, &[user.name.as_str(), user.email.as_str()]))
            .collect()
    }

    #[must_use]
    pub fn render(&self) -> String {
        render_table(
            ["Id", "Name", "Email", "Role"],
            self.visible().into_iter().map(|user| {
                [
                    user.id.to_string(),
                    user.name.clone(),
                    user.email.clone(),
                    user.role.clone(),
                ]
            }),
            &[],
            "No users found",
        )
    }
}
