//! In-memory cafe store backed by DashMap.
//!
//! Stands in for the hosted database: integer ids handed out per table,
//! same create/read/update/delete surface the dashboard calls.

use crate::models::*;
use crate::seed;
use brew_core::config::StoreConfig;
use brew_core::error::{BrewError, BrewResult};
use brew_core::loyalty::{BirthdayStatus, GIFT_WINDOW_DAYS};
use brew_core::types::*;
use brew_loyalty::{birthday_status, LoyaltyEngine};
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{info, warn};
use uuid::Uuid;

/// Serial id generator for one table.
struct Sequence(AtomicI64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Thread-safe in-memory store for customers, suppliers, menu items, orders and the activity feed.
pub struct CafeStore {
    customers: DashMap<i64, Customer>,
    suppliers: DashMap<i64, Supplier>,
    supplier_products: DashMap<i64, SupplierProduct>,
    menu_items: DashMap<i64, MenuItem>,
    orders: DashMap<i64, Order>,
    order_items: DashMap<i64, OrderItem>,
    customer_seq: Sequence,
    supplier_seq: Sequence,
    product_seq: Sequence,
    menu_seq: Sequence,
    order_seq: Sequence,
    order_item_seq: Sequence,
    activity: Mutex<VecDeque<ActivityEntry>>,
    activity_capacity: usize,
}

impl CafeStore {
    pub fn new(config: &StoreConfig) -> Self {
        let store = Self {
            customers: DashMap::new(),
            suppliers: DashMap::new(),
            supplier_products: DashMap::new(),
            menu_items: DashMap::new(),
            orders: DashMap::new(),
            order_items: DashMap::new(),
            customer_seq: Sequence::new(),
            supplier_seq: Sequence::new(),
            product_seq: Sequence::new(),
            menu_seq: Sequence::new(),
            order_seq: Sequence::new(),
            order_item_seq: Sequence::new(),
            activity: Mutex::new(VecDeque::new()),
            activity_capacity: config.activity_capacity.max(1),
        };
        if config.seed_demo_data {
            match seed::seed_demo_data(&store) {
                Ok(()) => store.activity.lock().clear(),
                Err(e) => warn!(error = %e, "Demo data seeding failed"),
            }
        }
        info!(
            customers = store.customers.len(),
            suppliers = store.suppliers.len(),
            menu_items = store.menu_items.len(),
            "Cafe store initialized (in-memory)"
        );
        store
    }

    // ─── Customers ─────────────────────────────────────────────────────────

    pub fn list_customers(&self) -> Vec<Customer> {
        let mut customers: Vec<Customer> =
            self.customers.iter().map(|r| r.value().clone()).collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        customers
    }

    pub fn get_customer(&self, id: i64) -> BrewResult<Customer> {
        self.customers
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| BrewError::not_found("customer", id))
    }

    pub fn create_customer(&self, req: CreateCustomerRequest) -> BrewResult<Customer> {
        let loyalty_points = req.validate()?;
        for item_id in &req.preferences {
            self.require_menu_item(*item_id)?;
        }
        let now = Utc::now();
        let customer = Customer {
            id: self.customer_seq.next(),
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            join_date: req.join_date.unwrap_or_else(|| now.date_naive()),
            loyalty_points,
            birthday: req.birthday,
            preferences: req.preferences,
            notes: req.notes,
            payment_methods: req.payment_methods,
            created_at: now,
        };
        self.customers.insert(customer.id, customer.clone());
        self.log_activity(
            ActivityAction::Create,
            "customer",
            customer.id,
            format!("New customer {}", customer.name),
        );
        Ok(customer)
    }

    pub fn update_customer(&self, id: i64, req: UpdateCustomerRequest) -> BrewResult<Customer> {
        let points = req.validate()?;
        let mut entry = self
            .customers
            .get_mut(&id)
            .ok_or_else(|| BrewError::not_found("customer", id))?;
        let c = entry.value_mut();
        if let Some(name) = req.name {
            c.name = name;
        }
        if let Some(email) = req.email {
            c.email = email;
        }
        if let Some(phone) = req.phone {
            c.phone = Some(phone);
        }
        if let Some(address) = req.address {
            c.address = Some(address);
        }
        if let Some(join_date) = req.join_date {
            c.join_date = join_date;
        }
        if let Some(points) = points {
            c.loyalty_points = points;
        }
        if let Some(birthday) = req.birthday {
            c.birthday = Some(birthday);
        }
        if let Some(notes) = req.notes {
            c.notes = Some(notes);
        }
        if let Some(methods) = req.payment_methods {
            c.payment_methods = methods;
        }
        let updated = c.clone();
        drop(entry);
        self.log_activity(
            ActivityAction::Update,
            "customer",
            id,
            format!("Updated customer {}", updated.name),
        );
        Ok(updated)
    }

    pub fn delete_customer(&self, id: i64) -> BrewResult<()> {
        let (_, removed) = self
            .customers
            .remove(&id)
            .ok_or_else(|| BrewError::not_found("customer", id))?;
        self.log_activity(
            ActivityAction::Delete,
            "customer",
            id,
            format!("Removed customer {}", removed.name),
        );
        Ok(())
    }

    pub fn add_preference(&self, customer_id: i64, item_id: i64) -> BrewResult<Customer> {
        // Held until the preference is stored so delete_menu_item cannot interleave.
        let item = self
            .menu_items
            .get(&item_id)
            .ok_or_else(|| BrewError::not_found("menu item", item_id))?;
        let mut entry = self
            .customers
            .get_mut(&customer_id)
            .ok_or_else(|| BrewError::not_found("customer", customer_id))?;
        let inserted = entry.preferences.insert(item_id);
        let updated = entry.value().clone();
        let item_name = item.name.clone();
        drop(entry);
        drop(item);
        if inserted {
            self.log_activity(
                ActivityAction::Update,
                "customer",
                customer_id,
                format!("{} now prefers {}", updated.name, item_name),
            );
        }
        Ok(updated)
    }

    pub fn remove_preference(&self, customer_id: i64, item_id: i64) -> BrewResult<Customer> {
        let mut entry = self
            .customers
            .get_mut(&customer_id)
            .ok_or_else(|| BrewError::not_found("customer", customer_id))?;
        let removed = entry.preferences.remove(&item_id);
        let updated = entry.value().clone();
        drop(entry);
        if removed {
            self.log_activity(
                ActivityAction::Update,
                "customer",
                customer_id,
                format!("Removed preference {} from {}", item_id, updated.name),
            );
        }
        Ok(updated)
    }

    /// Send a birthday discount to a customer whose birthday is inside the gift window.
    pub fn send_birthday_gift(
        &self,
        customer_id: i64,
        req: SendBirthdayGiftRequest,
        today: NaiveDate,
    ) -> BrewResult<BirthdayGift> {
        req.validate()?;
        let customer = self.get_customer(customer_id)?;
        let info = match birthday_status(customer.birthday_month_day(), today) {
            BirthdayStatus::Upcoming(info) if info.is_eligible_for_gift => info,
            BirthdayStatus::Upcoming(info) => {
                return Err(BrewError::Validation(format!(
                    "{}'s birthday is {} days away, gifts can be sent from {} days before",
                    customer.name, info.days_until, GIFT_WINDOW_DAYS
                )))
            }
            BirthdayStatus::NoData => {
                return Err(BrewError::Validation(format!(
                    "customer {} has no birthday on file",
                    customer_id
                )))
            }
        };
        let gift = BirthdayGift {
            id: Uuid::new_v4(),
            customer_id,
            amount: req.amount,
            message: req.message,
            sent_to: customer.email.clone(),
            birthday: info,
            sent_at: Utc::now(),
        };
        info!(
            customer_id,
            amount = gift.amount,
            days_until = gift.birthday.days_until,
            "Birthday gift sent"
        );
        self.log_activity(
            ActivityAction::Gift,
            "customer",
            customer_id,
            format!("Sent a ${:.2} birthday gift to {}", gift.amount, customer.name),
        );
        Ok(gift)
    }

    /// Customer detail with loyalty, birthday and preferred products as of `today`.
    pub fn customer_profile(
        &self,
        id: i64,
        engine: &LoyaltyEngine,
        today: NaiveDate,
    ) -> BrewResult<CustomerProfile> {
        let customer = self.get_customer(id)?;
        let loyalty = engine.customer_loyalty(&customer, today);
        let preferred_items = customer
            .preferences
            .iter()
            .filter_map(|item_id| self.menu_items.get(item_id).map(|r| r.value().clone()))
            .collect();
        Ok(CustomerProfile {
            customer,
            loyalty,
            preferred_items,
        })
    }

    // ─── Suppliers ─────────────────────────────────────────────────────────

    pub fn list_suppliers(&self) -> Vec<Supplier> {
        let mut suppliers: Vec<Supplier> =
            self.suppliers.iter().map(|r| r.value().clone()).collect();
        suppliers.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        suppliers
    }

    pub fn get_supplier(&self, id: i64) -> BrewResult<Supplier> {
        self.suppliers
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| BrewError::not_found("supplier", id))
    }

    pub fn create_supplier(&self, req: CreateSupplierRequest) -> BrewResult<Supplier> {
        req.validate()?;
        let supplier = Supplier {
            id: self.supplier_seq.next(),
            name: req.name,
            contact: req.contact,
            email: req.email,
            phone: req.phone,
            address: req.address,
            category: req.category,
            created_at: Utc::now(),
        };
        self.suppliers.insert(supplier.id, supplier.clone());
        self.log_activity(
            ActivityAction::Create,
            "supplier",
            supplier.id,
            format!("New supplier {}", supplier.name),
        );
        Ok(supplier)
    }

    pub fn update_supplier(&self, id: i64, req: UpdateSupplierRequest) -> BrewResult<Supplier> {
        req.validate()?;
        let mut entry = self
            .suppliers
            .get_mut(&id)
            .ok_or_else(|| BrewError::not_found("supplier", id))?;
        let s = entry.value_mut();
        if let Some(name) = req.name {
            s.name = name;
        }
        if let Some(contact) = req.contact {
            s.contact = Some(contact);
        }
        if let Some(email) = req.email {
            s.email = email;
        }
        if let Some(phone) = req.phone {
            s.phone = phone;
        }
        if let Some(address) = req.address {
            s.address = address;
        }
        if let Some(category) = req.category {
            s.category = category;
        }
        let updated = s.clone();
        drop(entry);
        self.log_activity(
            ActivityAction::Update,
            "supplier",
            id,
            format!("Updated supplier {}", updated.name),
        );
        Ok(updated)
    }

    /// Delete a supplier and its product catalog. Suppliers with orders on
    /// record cannot be deleted.
    pub fn delete_supplier(&self, id: i64) -> BrewResult<()> {
        // The supplier's shard stays write-locked while orders are scanned.
        // create_order and add_supplier_product hold a read guard on the
        // supplier while inserting, so neither can slip in between.
        let mut has_orders = false;
        let removed = self.suppliers.remove_if(&id, |_, _| {
            has_orders = self.orders.iter().any(|r| r.value().supplier_id == id);
            !has_orders
        });
        let (_, removed) = match removed {
            Some(entry) => entry,
            None if has_orders => {
                return Err(BrewError::Validation(format!(
                    "supplier {} has orders on record and cannot be deleted",
                    id
                )))
            }
            None => return Err(BrewError::not_found("supplier", id)),
        };
        self.supplier_products.retain(|_, p| p.supplier_id != id);
        self.log_activity(
            ActivityAction::Delete,
            "supplier",
            id,
            format!("Removed supplier {}", removed.name),
        );
        Ok(())
    }

    pub fn list_supplier_products(&self, supplier_id: i64) -> BrewResult<Vec<SupplierProduct>> {
        self.get_supplier(supplier_id)?;
        let mut products: Vec<SupplierProduct> = self
            .supplier_products
            .iter()
            .filter(|r| r.value().supplier_id == supplier_id)
            .map(|r| r.value().clone())
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(products)
    }

    pub fn add_supplier_product(
        &self,
        supplier_id: i64,
        req: CreateSupplierProductRequest,
    ) -> BrewResult<SupplierProduct> {
        req.validate()?;
        let supplier = self
            .suppliers
            .get(&supplier_id)
            .ok_or_else(|| BrewError::not_found("supplier", supplier_id))?;
        let product = SupplierProduct {
            id: self.product_seq.next(),
            supplier_id,
            name: req.name,
            price: req.price,
            unit: req.unit,
            created_at: Utc::now(),
        };
        self.supplier_products.insert(product.id, product.clone());
        let supplier_name = supplier.name.clone();
        drop(supplier);
        self.log_activity(
            ActivityAction::Create,
            "supplier_product",
            product.id,
            format!("{} now supplies {}", supplier_name, product.name),
        );
        Ok(product)
    }

    // ─── Menu ──────────────────────────────────────────────────────────────

    pub fn list_menu_items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.menu_items.iter().map(|r| r.value().clone()).collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        items
    }

    pub fn list_menu_items_by_category(&self, category: MenuCategory) -> Vec<MenuItem> {
        let mut items = self.list_menu_items();
        items.retain(|item| item.category == category);
        items
    }

    pub fn get_menu_item(&self, id: i64) -> BrewResult<MenuItem> {
        self.require_menu_item(id)
    }

    pub fn create_menu_item(&self, req: CreateMenuItemRequest) -> BrewResult<MenuItem> {
        req.validate()?;
        let item = MenuItem {
            id: self.menu_seq.next(),
            name: req.name,
            price: req.price,
            description: req.description,
            category: req.category,
            popular: req.popular,
            created_at: Utc::now(),
        };
        self.menu_items.insert(item.id, item.clone());
        self.log_activity(
            ActivityAction::Create,
            "menu_item",
            item.id,
            format!("Added {} to the menu", item.name),
        );
        Ok(item)
    }

    pub fn update_menu_item(&self, id: i64, req: UpdateMenuItemRequest) -> BrewResult<MenuItem> {
        req.validate()?;
        let mut entry = self
            .menu_items
            .get_mut(&id)
            .ok_or_else(|| BrewError::not_found("menu item", id))?;
        let m = entry.value_mut();
        if let Some(name) = req.name {
            m.name = name;
        }
        if let Some(price) = req.price {
            m.price = price;
        }
        if let Some(description) = req.description {
            m.description = description;
        }
        if let Some(category) = req.category {
            m.category = category;
        }
        if let Some(popular) = req.popular {
            m.popular = popular;
        }
        let updated = m.clone();
        drop(entry);
        self.log_activity(
            ActivityAction::Update,
            "menu_item",
            id,
            format!("Updated {}", updated.name),
        );
        Ok(updated)
    }

    /// Delete a menu item and drop it from every customer's preferences.
    pub fn delete_menu_item(&self, id: i64) -> BrewResult<()> {
        let (_, removed) = self
            .menu_items
            .remove(&id)
            .ok_or_else(|| BrewError::not_found("menu item", id))?;
        for mut customer in self.customers.iter_mut() {
            customer.preferences.remove(&id);
        }
        self.log_activity(
            ActivityAction::Delete,
            "menu_item",
            id,
            format!("Removed {} from the menu", removed.name),
        );
        Ok(())
    }

    // ─── Orders ────────────────────────────────────────────────────────────

    /// All orders, newest first, with supplier names joined in.
    pub fn list_orders(&self) -> Vec<OrderView> {
        let mut orders: Vec<Order> = self.orders.iter().map(|r| r.value().clone()).collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        orders.into_iter().map(|o| self.order_view(o)).collect()
    }

    pub fn get_order(&self, id: i64) -> BrewResult<OrderView> {
        let order = self
            .orders
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| BrewError::not_found("order", id))?;
        Ok(self.order_view(order))
    }

    pub fn create_order(&self, req: CreateOrderRequest) -> BrewResult<OrderView> {
        req.validate()?;
        // Held until the order is stored; see delete_supplier.
        let supplier = self
            .suppliers
            .get(&req.supplier_id)
            .ok_or_else(|| BrewError::not_found("supplier", req.supplier_id))?;
        let order = Order {
            id: self.order_seq.next(),
            supplier_id: req.supplier_id,
            items: req.items,
            amount: req.amount,
            delivery_date: req.delivery_date,
            payment_method: req.payment_method,
            notes: req.notes,
            status: req.status,
            created_at: Utc::now(),
        };
        self.orders.insert(order.id, order.clone());
        let supplier_name = supplier.name.clone();
        drop(supplier);
        self.log_activity(
            ActivityAction::Create,
            "order",
            order.id,
            format!("Order placed with {} for ${:.2}", supplier_name, order.amount),
        );
        Ok(OrderView {
            order,
            supplier_name: Some(supplier_name),
        })
    }

    pub fn update_order(&self, id: i64, req: UpdateOrderRequest) -> BrewResult<OrderView> {
        req.validate()?;
        let mut entry = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| BrewError::not_found("order", id))?;
        let o = entry.value_mut();
        if let Some(items) = req.items {
            o.items = items;
        }
        if let Some(amount) = req.amount {
            o.amount = amount;
        }
        if let Some(date) = req.delivery_date {
            o.delivery_date = date;
        }
        if let Some(method) = req.payment_method {
            o.payment_method = method;
        }
        if let Some(notes) = req.notes {
            o.notes = Some(notes);
        }
        if let Some(status) = req.status {
            o.status = status;
        }
        let updated = o.clone();
        drop(entry);
        self.log_activity(
            ActivityAction::Update,
            "order",
            id,
            format!("Order {} is {}", id, updated.status.as_str()),
        );
        Ok(self.order_view(updated))
    }

    /// Delete an order together with its line items.
    pub fn delete_order(&self, id: i64) -> BrewResult<()> {
        self.orders
            .remove(&id)
            .ok_or_else(|| BrewError::not_found("order", id))?;
        self.order_items.retain(|_, item| item.order_id != id);
        self.log_activity(ActivityAction::Delete, "order", id, format!("Removed order {}", id));
        Ok(())
    }

    /// Add line items to an order. Either every item is added or none is.
    pub fn add_order_items(
        &self,
        order_id: i64,
        items: Vec<CreateOrderItemRequest>,
    ) -> BrewResult<Vec<OrderItemView>> {
        // The order stays read-locked until every item is stored, so a
        // concurrent delete_order removes either all of them or none.
        let order = self
            .orders
            .get(&order_id)
            .ok_or_else(|| BrewError::not_found("order", order_id))?;
        for req in &items {
            req.validate()?;
            if !self.supplier_products.contains_key(&req.product_id) {
                return Err(BrewError::not_found("supplier product", req.product_id));
            }
        }
        let now = Utc::now();
        let created: Vec<OrderItem> = items
            .into_iter()
            .map(|req| OrderItem {
                id: self.order_item_seq.next(),
                order_id,
                product_id: req.product_id,
                quantity: req.quantity,
                price: req.price,
                created_at: now,
            })
            .collect();
        for item in &created {
            self.order_items.insert(item.id, item.clone());
        }
        drop(order);
        self.log_activity(
            ActivityAction::Update,
            "order",
            order_id,
            format!("{} item(s) added to order {}", created.len(), order_id),
        );
        Ok(created.into_iter().map(|i| self.order_item_view(i)).collect())
    }

    pub fn list_order_items(&self, order_id: i64) -> BrewResult<Vec<OrderItemView>> {
        if !self.orders.contains_key(&order_id) {
            return Err(BrewError::not_found("order", order_id));
        }
        let mut items: Vec<OrderItem> = self
            .order_items
            .iter()
            .filter(|r| r.value().order_id == order_id)
            .map(|r| r.value().clone())
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(items.into_iter().map(|i| self.order_item_view(i)).collect())
    }

    // ─── Dashboard ─────────────────────────────────────────────────────────

    pub fn dashboard_overview(
        &self,
        engine: &LoyaltyEngine,
        today: NaiveDate,
    ) -> DashboardOverview {
        let pending_orders = self
            .orders
            .iter()
            .filter(|r| r.value().status == OrderStatus::Pending)
            .count() as u64;
        let total_order_spend: f64 = self
            .orders
            .iter()
            .filter(|r| r.value().status != OrderStatus::Cancelled)
            .map(|r| r.value().amount)
            .sum();

        let customers = self.list_customers();
        let upcoming_birthdays = engine
            .upcoming_birthdays(&customers, today)
            .into_iter()
            .filter_map(|(customer_id, info)| {
                customers
                    .iter()
                    .find(|c| c.id == customer_id)
                    .map(|c| UpcomingBirthday {
                        customer_id,
                        name: c.name.clone(),
                        info,
                    })
            })
            .collect();

        DashboardOverview {
            total_customers: customers.len() as u64,
            total_suppliers: self.suppliers.len() as u64,
            total_menu_items: self.menu_items.len() as u64,
            pending_orders,
            total_order_spend,
            upcoming_birthdays,
        }
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            customers: self.customers.len(),
            suppliers: self.suppliers.len(),
            supplier_products: self.supplier_products.len(),
            menu_items: self.menu_items.len(),
            orders: self.orders.len(),
        }
    }

    // ─── Activity feed ─────────────────────────────────────────────────────

    /// Most recent activity first.
    pub fn recent_activity(&self, limit: usize) -> Vec<ActivityEntry> {
        self.activity.lock().iter().take(limit).cloned().collect()
    }

    fn log_activity(
        &self,
        action: ActivityAction,
        resource_type: &str,
        resource_id: i64,
        summary: String,
    ) {
        let entry = ActivityEntry {
            id: Uuid::new_v4(),
            action,
            resource_type: resource_type.to_string(),
            resource_id,
            summary,
            timestamp: Utc::now(),
        };
        let mut feed = self.activity.lock();
        feed.push_front(entry);
        feed.truncate(self.activity_capacity);
    }

    // ─── Helpers ───────────────────────────────────────────────────────────

    fn require_menu_item(&self, id: i64) -> BrewResult<MenuItem> {
        self.menu_items
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| BrewError::not_found("menu item", id))
    }

    fn order_view(&self, order: Order) -> OrderView {
        let supplier_name = self.suppliers.get(&order.supplier_id).map(|s| s.name.clone());
        OrderView { order, supplier_name }
    }

    fn order_item_view(&self, item: OrderItem) -> OrderItemView {
        let product = self.supplier_products.get(&item.product_id);
        let product_name = product.as_ref().map(|p| p.name.clone());
        let unit = product.as_ref().map(|p| p.unit.clone());
        drop(product);
        OrderItemView {
            item,
            product_name,
            unit,
        }
    }
}
