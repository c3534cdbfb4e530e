//! Management API types: create/update payloads, listing views, activity feed.

use brew_core::error::{BrewError, BrewResult};
use brew_core::loyalty::{BirthdayInfo, LoyaltySummary};
use brew_core::types::{
    Customer, CustomerPaymentMethod, MenuCategory, MenuItem, Order, OrderItem, OrderStatus,
    PaymentMethod,
};
use brew_search::{OrderField, Searchable};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

// ─── Validation helpers ────────────────────────────────────────────────────

fn require_min_len(field: &str, value: &str, min: usize) -> BrewResult<()> {
    if value.chars().count() < min {
        return Err(BrewError::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}

fn require_email(value: &str) -> BrewResult<()> {
    let valid = value.split_once('@').map_or(false, |(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if !valid {
        return Err(BrewError::Validation(format!(
            "'{}' is not a valid email address",
            value
        )));
    }
    Ok(())
}

fn require_points(points: i64) -> BrewResult<u32> {
    u32::try_from(points).map_err(|_| {
        BrewError::Validation(format!(
            "loyalty points must be between 0 and {}, got {}",
            u32::MAX,
            points
        ))
    })
}

fn require_price(field: &str, value: f64) -> BrewResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(BrewError::Validation(format!("{} must be a non-negative amount", field)));
    }
    Ok(())
}

fn require_positive_amount(value: f64) -> BrewResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BrewError::Validation("amount must be a positive number".to_string()));
    }
    Ok(())
}

fn require_payment_methods(methods: &[CustomerPaymentMethod]) -> BrewResult<()> {
    for method in methods {
        require_min_len("payment method type", method.kind.trim(), 1)?;
        if let Some(last4) = &method.last4 {
            if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
                return Err(BrewError::Validation(format!(
                    "last4 must be exactly 4 digits, got '{}'",
                    last4
                )));
            }
        }
    }
    if methods.iter().filter(|m| m.is_default).count() > 1 {
        return Err(BrewError::Validation(
            "at most one payment method can be the default".to_string(),
        ));
    }
    Ok(())
}

// ─── Customers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Defaults to the creation date.
    #[serde(default)]
    pub join_date: Option<NaiveDate>,
    #[serde(default)]
    pub loyalty_points: i64,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub preferences: BTreeSet<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub payment_methods: Vec<CustomerPaymentMethod>,
}

impl CreateCustomerRequest {
    /// Check the payload and return the validated points balance.
    pub fn validate(&self) -> BrewResult<u32> {
        require_min_len("name", self.name.trim(), 1)?;
        require_email(&self.email)?;
        require_payment_methods(&self.payment_methods)?;
        require_points(self.loyalty_points)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub loyalty_points: Option<i64>,
    pub birthday: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Replaces the whole list when present.
    pub payment_methods: Option<Vec<CustomerPaymentMethod>>,
}

impl UpdateCustomerRequest {
    pub fn validate(&self) -> BrewResult<Option<u32>> {
        if let Some(name) = &self.name {
            require_min_len("name", name.trim(), 1)?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        if let Some(methods) = &self.payment_methods {
            require_payment_methods(methods)?;
        }
        self.loyalty_points.map(require_points).transpose()
    }
}

/// The customer detail page: profile, loyalty tab, birthday tab and preferred products.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub loyalty: LoyaltySummary,
    pub preferred_items: Vec<MenuItem>,
}

/// Birthday discount sent from the customer's birthday tab.
#[derive(Debug, Clone, Deserialize)]
pub struct SendBirthdayGiftRequest {
    pub amount: f64,
    pub message: String,
}

impl SendBirthdayGiftRequest {
    pub fn validate(&self) -> BrewResult<()> {
        require_positive_amount(self.amount)?;
        require_min_len("message", &self.message, 5)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BirthdayGift {
    pub id: Uuid,
    pub customer_id: i64,
    pub amount: f64,
    pub message: String,
    pub sent_to: String,
    pub birthday: BirthdayInfo,
    pub sent_at: DateTime<Utc>,
}

// ─── Suppliers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub category: String,
}

impl CreateSupplierRequest {
    pub fn validate(&self) -> BrewResult<()> {
        require_min_len("name", &self.name, 3)?;
        require_email(&self.email)?;
        require_min_len("phone", &self.phone, 10)?;
        require_min_len("address", &self.address, 5)?;
        require_min_len("category", &self.category, 2)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub category: Option<String>,
}

impl UpdateSupplierRequest {
    pub fn validate(&self) -> BrewResult<()> {
        if let Some(name) = &self.name {
            require_min_len("name", name, 3)?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        if let Some(phone) = &self.phone {
            require_min_len("phone", phone, 10)?;
        }
        if let Some(address) = &self.address {
            require_min_len("address", address, 5)?;
        }
        if let Some(category) = &self.category {
            require_min_len("category", category, 2)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSupplierProductRequest {
    pub name: String,
    pub price: f64,
    pub unit: String,
}

impl CreateSupplierProductRequest {
    pub fn validate(&self) -> BrewResult<()> {
        require_min_len("name", self.name.trim(), 1)?;
        require_min_len("unit", self.unit.trim(), 1)?;
        require_price("price", self.price)
    }
}

// ─── Menu ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: MenuCategory,
    #[serde(default)]
    pub popular: bool,
}

impl CreateMenuItemRequest {
    pub fn validate(&self) -> BrewResult<()> {
        require_min_len("name", self.name.trim(), 1)?;
        require_price("price", self.price)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub category: Option<MenuCategory>,
    pub popular: Option<bool>,
}

impl UpdateMenuItemRequest {
    pub fn validate(&self) -> BrewResult<()> {
        if let Some(name) = &self.name {
            require_min_len("name", name.trim(), 1)?;
        }
        if let Some(price) = self.price {
            require_price("price", price)?;
        }
        Ok(())
    }
}

// ─── Orders ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub supplier_id: i64,
    pub items: String,
    pub amount: f64,
    pub delivery_date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl CreateOrderRequest {
    pub fn validate(&self) -> BrewResult<()> {
        require_min_len("items", &self.items, 3)?;
        require_positive_amount(self.amount)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateOrderRequest {
    pub items: Option<String>,
    pub amount: Option<f64>,
    pub delivery_date: Option<NaiveDate>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub status: Option<OrderStatus>,
}

impl UpdateOrderRequest {
    pub fn validate(&self) -> BrewResult<()> {
        if let Some(items) = &self.items {
            require_min_len("items", items, 3)?;
        }
        if let Some(amount) = self.amount {
            require_positive_amount(amount)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderItemRequest {
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
}

impl CreateOrderItemRequest {
    pub fn validate(&self) -> BrewResult<()> {
        if self.quantity == 0 {
            return Err(BrewError::Validation("quantity must be at least 1".to_string()));
        }
        require_price("price", self.price)
    }
}

/// An order as listed, with its supplier's name joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub supplier_name: Option<String>,
}

impl Searchable for OrderView {
    type Field = OrderField;

    fn field_text(&self, field: OrderField) -> Option<&str> {
        match field {
            OrderField::Items => Some(&self.order.items),
            OrderField::Notes => self.order.notes.as_deref(),
            OrderField::Status => Some(self.order.status.as_str()),
            OrderField::SupplierName => self.supplier_name.as_deref(),
        }
    }

    fn default_fields() -> &'static [OrderField] {
        &[OrderField::Items, OrderField::SupplierName, OrderField::Notes]
    }
}

/// An order line with its product's name and unit joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemView {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product_name: Option<String>,
    pub unit: Option<String>,
}

// ─── Dashboard ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub total_customers: u64,
    pub total_suppliers: u64,
    pub total_menu_items: u64,
    pub pending_orders: u64,
    /// Sum of all non-cancelled order amounts.
    pub total_order_spend: f64,
    pub upcoming_birthdays: Vec<UpcomingBirthday>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpcomingBirthday {
    pub customer_id: i64,
    pub name: String,
    #[serde(flatten)]
    pub info: BirthdayInfo,
}

/// Row counts per table, reported by the readiness check.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StoreCounts {
    pub customers: usize,
    pub suppliers: usize,
    pub supplier_products: usize,
    pub menu_items: usize,
    pub orders: usize,
}

// ─── Activity feed ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub action: ActivityAction,
    pub resource_type: String,
    pub resource_id: i64,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    Gift,
}

// ─── Query parameters ──────────────────────────────────────────────────────

/// Optional `?today=YYYY-MM-DD` override for date-dependent views.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AsOfParams {
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

impl AsOfParams {
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Utc::now().date_naive())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityParams {
    #[serde(default = "default_activity_limit")]
    pub limit: usize,
}

fn default_activity_limit() -> usize {
    20
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier_request() -> CreateSupplierRequest {
        CreateSupplierRequest {
            name: "Bean Suppliers Ltd.".to_string(),
            contact: Some("John Smith".to_string()),
            email: "john@beansuppliers.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            address: "12 Roastery Lane".to_string(),
            category: "Coffee Beans".to_string(),
        }
    }

    #[test]
    fn test_supplier_form_rules() {
        assert!(supplier_request().validate().is_ok());

        let mut req = supplier_request();
        req.name = "AB".to_string();
        assert!(matches!(req.validate(), Err(BrewError::Validation(_))));

        let mut req = supplier_request();
        req.phone = "555-1234".to_string();
        assert!(req.validate().is_err());

        let mut req = supplier_request();
        req.email = "john.beansuppliers.com".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_customer_points_must_be_non_negative() {
        let req = CreateCustomerRequest {
            name: "Sarah Johnson".to_string(),
            email: "sarah.j@example.com".to_string(),
            phone: None,
            address: None,
            join_date: None,
            loyalty_points: -5,
            birthday: None,
            preferences: BTreeSet::new(),
            notes: None,
            payment_methods: Vec::new(),
        };
        assert!(matches!(req.validate(), Err(BrewError::Validation(_))));

        let update = UpdateCustomerRequest {
            loyalty_points: Some(120),
            ..Default::default()
        };
        assert_eq!(update.validate().unwrap(), Some(120));
    }

    #[test]
    fn test_email_rules() {
        assert!(require_email("a@b.co").is_ok());
        assert!(require_email("@b.co").is_err());
        assert!(require_email("a@localhost").is_err());
        assert!(require_email("a@b.").is_err());
    }

    #[test]
    fn test_order_amount_must_be_positive() {
        let update = UpdateOrderRequest {
            amount: Some(0.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_payment_method_rules() {
        let card = |last4: Option<&str>, is_default: bool| CustomerPaymentMethod {
            kind: "Visa".to_string(),
            last4: last4.map(str::to_string),
            expiry_date: Some("09/27".to_string()),
            is_default,
        };
        assert!(require_payment_methods(&[card(Some("4242"), true), card(None, false)]).is_ok());
        assert!(require_payment_methods(&[card(Some("42a2"), false)]).is_err());
        assert!(require_payment_methods(&[card(Some("424"), false)]).is_err());
        assert!(matches!(
            require_payment_methods(&[card(None, true), card(None, true)]),
            Err(BrewError::Validation(_))
        ));

        let update = UpdateCustomerRequest {
            payment_methods: Some(vec![card(Some("12345"), false)]),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_birthday_gift_form_rules() {
        let gift = |amount: f64, message: &str| SendBirthdayGiftRequest {
            amount,
            message: message.to_string(),
        };
        assert!(gift(10.0, "Happy Birthday!").validate().is_ok());
        assert!(gift(0.0, "Happy Birthday!").validate().is_err());
        assert!(gift(-5.0, "Happy Birthday!").validate().is_err());
        assert!(gift(f64::NAN, "Happy Birthday!").validate().is_err());
        assert!(matches!(gift(10.0, "Hey").validate(), Err(BrewError::Validation(_))));
    }
}
