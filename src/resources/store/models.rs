//! Store Models

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{api::ApiError, ids::ResourceId, resources::fields};

/// Store Item Id
pub type StoreItemId = ResourceId<StoreItem>;

/// Order Id
pub type OrderId = ResourceId<Order>;

/// Item listed in the studio shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreItem {
    #[serde(rename = "_id")]
    pub id: StoreItemId,

    pub name: String,

    #[serde(with = "fields::amount", default)]
    pub price: Decimal,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub image: String,
}

impl StoreItem {
    /// Form prefilled from this item, for editing.
    #[must_use]
    pub fn to_input(&self) -> StoreItemInput {
        StoreItemInput {
            name: self.name.clone(),
            price: self.price,
            category: self.category.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }
}

/// Add or update form for a shop item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreItemInput {
    pub name: String,

    #[serde(with = "fields::amount")]
    pub price: Decimal,

    pub category: String,
    pub description: String,
    pub image: String,
}

impl StoreItemInput {
    /// # Errors
    ///
    /// Returns a validation error when the name or category is blank, or the
    /// price is negative.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(ApiError::validation("Please enter item name and category"));
        }

        if self.price.is_sign_negative() {
            return Err(ApiError::validation("Price cannot be negative"));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsEnvelope {
    #[serde(default)]
    pub(crate) items: Vec<StoreItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemEnvelope {
    pub(crate) item: StoreItem,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrdersEnvelope {
    #[serde(default)]
    pub(crate) orders: Vec<Order>,
}

/// Order fulfilment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ApiError::validation(format!("unknown order status `{value}`")))
    }
}

/// Customer populated onto an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,
}

/// Delivery address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub street: String,

    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub city: String,

    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub state: String,

    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub pincode: String,

    #[serde(default, deserialize_with = "fields::lenient_string")]
    pub phone: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = [&self.street, &self.city, &self.state, &self.pincode];

        let mut first = true;
        for part in parts.into_iter().filter(|part| !part.is_empty()) {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(part)?;
            first = false;
        }

        Ok(())
    }
}

/// Product populated onto an order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default)]
    pub name: String,

    #[serde(with = "fields::amount", default)]
    pub price: Decimal,
}

/// One product and its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Absent when the product has since been deleted.
    #[serde(rename = "productId", default)]
    pub product: Option<ProductRef>,

    #[serde(default)]
    pub quantity: u32,
}

impl OrderLine {
    /// Price times quantity; `None` when the product amount overflows.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        match &self.product {
            Some(product) => product.price.checked_mul(Decimal::from(self.quantity)),
            None => Some(Decimal::ZERO),
        }
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,

    #[serde(rename = "userId", default)]
    pub customer: Option<Customer>,

    pub status: OrderStatus,

    #[serde(default)]
    pub address: Vec<Address>,

    #[serde(default)]
    pub products: Vec<OrderLine>,
}

impl Order {
    /// Sum of line subtotals; `None` when any amount overflows.
    #[must_use]
    pub fn total(&self) -> Option<Decimal> {
        self.products
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.subtotal()?))
    }

    /// Customer name, blank when the user was deleted.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        self.customer.as_ref().map_or("", |customer| customer.name.as_str())
    }

    /// Customer email, blank when the user was deleted.
    #[must_use]
    pub fn customer_email(&self) -> &str {
        self.customer.as_ref().map_or("", |customer| customer.email.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct OrderStatusUpdate {
    pub(crate) status: OrderStatus,
}
