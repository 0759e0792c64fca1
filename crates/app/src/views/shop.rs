//! Shop page.

use std::sync::Arc;

use lotus::resources::{
    matches_search,
    store::{
        StoreService,
        models::{StoreItem, StoreItemId, StoreItemInput},
    },
};
use tracing::warn;

use super::{Applied, ListView, ViewScope, render_table};
use crate::notifications::Notification;

pub struct ShopView {
    service: Arc<dyn StoreService>,
    items: ListView<StoreItem>,
    search: String,
}

impl ShopView {
    #[must_use]
    pub fn new(service: Arc<dyn StoreService>, scope: &ViewScope) -> Self {
        Self {
            service,
            items: ListView::new(scope.child(), "Failed to load store items"),
            search: String::new(),
        }
    }

    pub async fn load(&mut self) -> Applied {
        let ticket = self.items.ticket();
        let result = self.service.list_items().await;

        self.items.apply(ticket, result)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Items whose name matches the search box.
    #[must_use]
    pub fn visible(&self) -> Vec<&StoreItem> {
        self.items
            .items()
            .iter()
            .filter(|item| matches_search(&self.search, &[item.name.as_str()]))
            .collect()
    }

    /// Look up an item by id among the loaded ones.
    #[must_use]
    pub fn find(&self, id: &StoreItemId) -> Option<&StoreItem> {
        self.items.items().iter().find(|item| &item.id == id)
    }

    pub async fn add(&mut self, input: &StoreItemInput) -> Notification {
        match self.service.add_item(input).await {
            Ok(item) => {
                self.refresh("added").await;

                Notification::success("Added successfully").with_description(item.name)
            }
            Err(error) => Notification::from_error("Error", &error),
        }
    }

    pub async fn update(&mut self, id: &StoreItemId, input: &StoreItemInput) -> Notification {
        if let Err(error) = self.service.update_item(id, input).await {
            return Notification::from_error("Error", &error);
        }

        self.refresh("updated").await;

        Notification::success("Updated")
    }

    pub async fn delete(&mut self, id: &StoreItemId) -> Notification {
        if let Err(error) = self.service.delete_item(id).await {
            return Notification::from_error("Error", &error);
        }

        self.refresh("deleted").await;

        Notification::success("Deleted")
    }

    async fn refresh(&mut self, action: &str) {
        if let Applied::Failed(refresh) = self.load().await {
            warn!("item {action} but the catalogue could not be refreshed: {refresh}");
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        render_table(
            ["Id", "Name", "Category", "Price", "Description"],
            self.visible().into_iter().map(|item| {
                [
                    item.id.to_string(),
                    item.name.clone(),
                    item.category.clone(),
                    item.price.to_string(),
                    item.description.clone(),
                ]
            }),
            &[3],
            "No items in the store",
        )
    }
}
