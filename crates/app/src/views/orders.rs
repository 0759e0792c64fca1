//! Orders page.

use std::sync::Arc;

use lotus::resources::{
    matches_search,
    store::{
        StoreService,
        models::{Order, OrderId, OrderStatus},
    },
};
use tracing::warn;

use super::{Applied, ListView, ViewScope, render_table};
use crate::notifications::Notification;

pub struct OrdersView {
    service: Arc<dyn StoreService>,
    orders: ListView<Order>,
    status_filter: Option<OrderStatus>,
    search: String,
}

impl OrdersView {
    #[must_use]
    pub fn new(service: Arc<dyn StoreService>, scope: &ViewScope) -> Self {
        Self {
            service,
            orders: ListView::new(scope.child(), "Order Fetch Failed"),
            status_filter: None,
            search: String::new(),
        }
    }

    pub async fn load(&mut self) -> Applied {
        let ticket = self.orders.ticket();
        let result = self.service.list_orders().await;

        self.orders.apply(ticket, result)
    }

    /// `None` shows every status.
    pub fn set_status_filter(&mut self, status: Option<OrderStatus>) {
        self.status_filter = status;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Orders to list: never pending ones, then the status filter and the
    /// customer search.
    #[must_use]
    pub fn visible(&self) -> Vec<&Order> {
        self.orders
            .items()
            .iter()
            .filter(|order| order.status != OrderStatus::Pending)
            .filter(|order| self.status_filter.is_none_or(|status| order.status == status))
            .filter(|order| {
                matches_search(&self.search, &[order.customer_name(), order.customer_email()])
            })
            .collect()
    }

    pub async fn set_status(&mut self, id: &OrderId, status: OrderStatus) -> Notification {
        if let Err(error) = self.service.update_order_status(id, status).await {
            return Notification::from_error("Status Update Failed", &error);
        }

        if let Applied::Failed(refresh) = self.load().await {
            warn!("order updated but the list could not be refreshed: {refresh}");
        }

        Notification::success("Order status updated")
    }

    #[must_use]
    pub fn render(&self) -> String {
        render_table(
            ["Id", "Customer", "Email", "Items", "Total", "Address", "Status"],
            self.visible().into_iter().map(|order| {
                let items = order
                    .products
                    .iter()
                    .map(|line| match &line.product {
                        Some(product) => format!("{} x{}", product.name, line.quantity),
                        None => format!("(removed) x{}", line.quantity),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");

                [
                    order.id.to_string(),
                    order.customer_name().to_string(),
                    order.customer_email().to_string(),
                    items,
                    order.total().map_or_else(|| "-".to_string(), |total| total.to_string()),
                    order.address.first().map(ToString::to_string).unwrap_or_default(),
                    order.status.to_string(),
                ]
            }),
            &[4],
            "No orders found",
        )
    }
}

#[cfg(test)]
mod tests {
    use lotus::resources::{
        Acknowledged,
        store::{
            MockStoreService,
            models::{Customer, OrderLine, ProductRef},
        },
    };
    use rust_decimal::Decimal;

    use super::*;

    fn order(id: &str, name: &str, status: OrderStatus) -> Order {
        Order {
            id: id.into(),
            customer: Some(Customer {
                name: name.into(),
                email: format!("{}@example.com", name.to_lowercase()),
            }),
            status,
            address: Vec::new(),
            products: vec![OrderLine {
                product: Some(ProductRef {
                    name: "Mat".into(),
                    price: Decimal::from(50),
                }),
                quantity: 2,
            }],
        }
    }

    fn service_with_orders() -> MockStoreService {
        let mut service = MockStoreService::new();

        service.expect_list_orders().once().return_once(|| {
            Ok(vec![
                order("o1", "Asha", OrderStatus::Pending),
                order("o2", "Ravi", OrderStatus::Processing),
                order("o3", "Mira", OrderStatus::Completed),
            ])
        });

        service
    }

    #[tokio::test]
    async fn pending_orders_are_hidden() {
        let mut view = OrdersView::new(Arc::new(service_with_orders()), &ViewScope::new());
        view.load().await;

        let ids: Vec<_> = view.visible().iter().map(|order| order.id.as_str()).collect();

        assert_eq!(ids, ["o2", "o3"]);
    }

    #[tokio::test]
    async fn filter_and_search_combine() {
        let mut view = OrdersView::new(Arc::new(service_with_orders()), &ViewScope::new());
        view.load().await;

        view.set_status_filter(Some(OrderStatus::Completed));
        assert_eq!(view.visible().len(), 1);

        view.set_search("ravi@");
        assert!(view.visible().is_empty(), "ravi's order is processing");

        view.set_status_filter(None);
        assert_eq!(view.visible().len(), 1);
        assert!(view.render().contains("100"), "total column");
    }

    #[tokio::test]
    async fn overflowing_total_renders_placeholder() {
        let mut huge = order("o4", "Zara", OrderStatus::Processing);
        huge.products = vec![OrderLine {
            product: Some(ProductRef {
                name: "Gold Mat".into(),
                price: Decimal::MAX,
            }),
            quantity: 100,
        }];

        let mut service = MockStoreService::new();
        service.expect_list_orders().once().return_once(|| Ok(vec![huge]));

        let mut view = OrdersView::new(Arc::new(service), &ViewScope::new());
        view.load().await;

        let table = view.render();

        assert!(table.contains("Gold Mat x100"), "got {table}");
        assert!(table.contains(" - "), "total should render as a placeholder: {table}");
    }

    #[tokio::test]
    async fn status_update_reloads() {
        let mut service = service_with_orders();

        service
            .expect_update_order_status()
            .once()
            .withf(|id, status| id.as_str() == "o2" && *status == OrderStatus::Completed)
            .return_once(|_, _| Ok(Acknowledged::default()));

        let mut view = OrdersView::new(Arc::new(service), &ViewScope::new());

        let notification = view.set_status(&OrderId::new("o2"), OrderStatus::Completed).await;

        assert_eq!(notification, Notification::success("Order status updated"));
        assert_eq!(view.visible().len(), 2);
    }
}
