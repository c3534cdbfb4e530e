//! Cafe records as the dashboard stores them.

use crate::loyalty::MonthDay;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A cafe customer. Tier and cashback are derived from `loyalty_points` on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub loyalty_points: u32,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    /// Preferred menu items, by id.
    #[serde(default)]
    pub preferences: BTreeSet<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Saved payment methods, shown on the loyalty tab.
    #[serde(default)]
    pub payment_methods: Vec<CustomerPaymentMethod>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn birthday_month_day(&self) -> Option<MonthDay> {
        self.birthday.map(MonthDay::from)
    }

    pub fn default_payment_method(&self) -> Option<&CustomerPaymentMethod> {
        self.payment_methods.iter().find(|m| m.is_default)
    }
}

/// A payment method a customer keeps on file ("Visa", "Cash", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPaymentMethod {
    #[serde(rename = "type")]
    pub kind: String,
    /// Last four card digits, when the method is a card.
    #[serde(default)]
    pub last4: Option<String>,
    /// Card expiry as printed, `MM/YY`.
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    /// Contact person at the supplier.
    #[serde(default)]
    pub contact: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierProduct {
    pub id: i64,
    pub supplier_id: i64,
    pub name: String,
    pub price: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: MenuCategory,
    #[serde(default)]
    pub popular: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Drinks,
    Desserts,
    Snacks,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Drinks => "drinks",
            MenuCategory::Desserts => "desserts",
            MenuCategory::Snacks => "snacks",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Purchase order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub supplier_id: i64,
    /// Free-text description of what was ordered.
    pub items: String,
    pub amount: f64,
    pub delivery_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Credit,
    Cash,
    BankTransfer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
