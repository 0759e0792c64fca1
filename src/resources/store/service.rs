//! Store service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    api::{ApiClient, ApiError, SubService},
    resources::{
        Acknowledged,
        store::models::{
            ItemEnvelope, ItemsEnvelope, Order, OrderId, OrderStatus, OrderStatusUpdate,
            OrdersEnvelope, StoreItem, StoreItemId, StoreItemInput,
        },
    },
};

/// Store service over the store sub-service.
#[derive(Debug, Clone)]
pub struct HttpStoreService {
    client: ApiClient,
}

impl HttpStoreService {
    /// Service issuing calls through `client`.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StoreService for HttpStoreService {
    async fn list_items(&self) -> Result<Vec<StoreItem>, ApiError> {
        let envelope: ItemsEnvelope = self.client.get(SubService::Store, &["items"]).await?;

        Ok(envelope.items)
    }

    async fn add_item(&self, item: &StoreItemInput) -> Result<StoreItem, ApiError> {
        item.validate()?;

        let envelope: ItemEnvelope = self.client.post(SubService::Store, &["add"], item).await?;

        Ok(envelope.item)
    }

    async fn update_item(
        &self,
        id: &StoreItemId,
        item: &StoreItemInput,
    ) -> Result<Acknowledged, ApiError> {
        item.validate()?;

        self.client
            .put(SubService::Store, &["update", id.as_str()], item)
            .await
    }

    async fn delete_item(&self, id: &StoreItemId) -> Result<Acknowledged, ApiError> {
        self.client
            .delete(SubService::Store, &["delete", id.as_str()])
            .await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let envelope: OrdersEnvelope = self.client.get(SubService::Store, &["allOrder"]).await?;

        Ok(envelope.orders)
    }

    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Acknowledged, ApiError> {
        self.client
            .put(
                SubService::Store,
                &["updateOrderStatus", id.as_str()],
                &OrderStatusUpdate { status },
            )
            .await
    }
}

/// Shop catalogue and customer orders.
#[automock]
#[async_trait]
pub trait StoreService: Send + Sync {
    /// Retrieves the shop catalogue.
    async fn list_items(&self) -> Result<Vec<StoreItem>, ApiError>;

    /// Validates and creates an item, returning it as stored.
    async fn add_item(&self, item: &StoreItemInput) -> Result<StoreItem, ApiError>;

    /// Validates and replaces an item.
    async fn update_item(
        &self,
        id: &StoreItemId,
        item: &StoreItemInput,
    ) -> Result<Acknowledged, ApiError>;

    /// Deletes an item.
    async fn delete_item(&self, id: &StoreItemId) -> Result<Acknowledged, ApiError>;

    /// Retrieves every order with its customer and products.
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Moves an order to `status`.
    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Acknowledged, ApiError>;
}
