//! Commerce records: cart items, orders, bookings, stock.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Driver, Extra, Product, Related, User};
use crate::types::{
    AddressId, BookingId, BookingStatus, CartItemId, DriverId, OrderId, OrderStatus, ProductId,
    StockId, UserId, VariantId,
};

/// One line in the shopper's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(alias = "_id")]
    pub id: CartItemId,
    pub product: Related<ProductId, Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantId>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(flatten)]
    pub extra: Extra,
}

impl CartItem {
    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product: Related<ProductId, Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantId>,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Related<UserId, User>>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    /// Address snapshot taken at checkout; its shape varies by backend version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<Related<DriverId, Driver>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Order {
    /// Human-facing reference: the order number when present, else the id.
    #[must_use]
    pub fn reference(&self) -> &str {
        self.order_number.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// A service booking made by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: BookingId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Related<UserId, User>>,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Inventory level for a product or one of its variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    #[serde(alias = "_id")]
    pub id: StockId,
    pub product: Related<ProductId, Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<VariantId>,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl StockItem {
    /// Whether the quantity is at or under the item's own threshold, or
    /// `default_threshold` when the backend sent none.
    #[must_use]
    pub fn is_low(&self, default_threshold: u32) -> bool {
        self.quantity <= self.low_stock_threshold.unwrap_or(default_threshold)
    }
}

/// Body for adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartAddition {
    pub product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
}

/// Body for placing an order from selected cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacement {
    pub cart_item_ids: Vec<CartItemId>,
    pub address_id: AddressId,
    pub payment_method: String,
}

/// Body for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
