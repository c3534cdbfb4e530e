//! Searchable fields of each cafe record type.

use crate::filter::Searchable;
use brew_core::error::BrewError;
use brew_core::types::{Customer, MenuItem, Supplier};
use std::str::FromStr;

fn unknown_field(kind: &str, name: &str) -> BrewError {
    BrewError::InvalidArgument(format!("unknown {} search field '{}'", kind, name))
}

// ─── Customers ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    Address,
    Notes,
}

impl FromStr for CustomerField {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(CustomerField::Name),
            "email" => Ok(CustomerField::Email),
            "phone" => Ok(CustomerField::Phone),
            "address" => Ok(CustomerField::Address),
            "notes" => Ok(CustomerField::Notes),
            other => Err(unknown_field("customer", other)),
        }
    }
}

impl Searchable for Customer {
    type Field = CustomerField;

    fn field_text(&self, field: CustomerField) -> Option<&str> {
        match field {
            CustomerField::Name => Some(&self.name),
            CustomerField::Email => Some(&self.email),
            CustomerField::Phone => self.phone.as_deref(),
            CustomerField::Address => self.address.as_deref(),
            CustomerField::Notes => self.notes.as_deref(),
        }
    }

    fn default_fields() -> &'static [CustomerField] {
        &[CustomerField::Name, CustomerField::Email, CustomerField::Phone]
    }
}

// ─── Suppliers ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupplierField {
    Name,
    Contact,
    Email,
    Phone,
    Address,
    Category,
}

impl FromStr for SupplierField {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SupplierField::Name),
            "contact" => Ok(SupplierField::Contact),
            "email" => Ok(SupplierField::Email),
            "phone" => Ok(SupplierField::Phone),
            "address" => Ok(SupplierField::Address),
            "category" => Ok(SupplierField::Category),
            other => Err(unknown_field("supplier", other)),
        }
    }
}

impl Searchable for Supplier {
    type Field = SupplierField;

    fn field_text(&self, field: SupplierField) -> Option<&str> {
        match field {
            SupplierField::Name => Some(&self.name),
            SupplierField::Contact => self.contact.as_deref(),
            SupplierField::Email => Some(&self.email),
            SupplierField::Phone => Some(&self.phone),
            SupplierField::Address => Some(&self.address),
            SupplierField::Category => Some(&self.category),
        }
    }

    fn default_fields() -> &'static [SupplierField] {
        &[
            SupplierField::Name,
            SupplierField::Contact,
            SupplierField::Email,
            SupplierField::Category,
        ]
    }
}

// ─── Menu items ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItemField {
    Name,
    Description,
    Category,
}

impl FromStr for MenuItemField {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(MenuItemField::Name),
            "description" => Ok(MenuItemField::Description),
            "category" => Ok(MenuItemField::Category),
            other => Err(unknown_field("menu item", other)),
        }
    }
}

impl Searchable for MenuItem {
    type Field = MenuItemField;

    fn field_text(&self, field: MenuItemField) -> Option<&str> {
        match field {
            MenuItemField::Name => Some(&self.name),
            MenuItemField::Description => Some(&self.description),
            MenuItemField::Category => Some(self.category.as_str()),
        }
    }

    fn default_fields() -> &'static [MenuItemField] {
        &[MenuItemField::Name, MenuItemField::Description, MenuItemField::Category]
    }
}

// ─── Orders ─────────────────────────────────────────────────────────────────

/// Order fields. Orders are searched together with their supplier's name, so
/// the `Searchable` impl lives with the order listing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Items,
    Notes,
    Status,
    SupplierName,
}

impl FromStr for OrderField {
    type Err = BrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "items" => Ok(OrderField::Items),
            "notes" => Ok(OrderField::Notes),
            "status" => Ok(OrderField::Status),
            "supplier_name" | "supplier" => Ok(OrderField::SupplierName),
            other => Err(unknown_field("order", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_records;
    use brew_core::types::MenuCategory;
    use chrono::{NaiveDate, Utc};
    use std::collections::BTreeSet;

    fn customer(id: i64, name: &str, email: &str, phone: Option<&str>) -> Customer {
        Customer {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            address: None,
            join_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            loyalty_points: 0,
            birthday: None,
            preferences: BTreeSet::new(),
            notes: None,
            payment_methods: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_customer_search_by_name() {
        let customers = vec![
            customer(1, "Sarah Johnson", "sarah.j@example.com", None),
            customer(2, "Michael Chen", "michael.c@example.com", None),
        ];
        let kept = filter_records(&customers, "sarah", &[CustomerField::Name]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Sarah Johnson");
    }

    #[test]
    fn test_customer_default_fields_include_phone() {
        let customers = vec![
            customer(1, "Sarah Johnson", "sarah.j@example.com", Some("(555) 123-4567")),
            customer(2, "Michael Chen", "michael.c@example.com", None),
        ];
        let kept = filter_records(&customers, "123-45", Customer::default_fields());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_menu_item_category_searchable() {
        let items = vec![
            MenuItem {
                id: 1,
                name: "Cappuccino".to_string(),
                price: 4.5,
                description: "Espresso with steamed milk foam".to_string(),
                category: MenuCategory::Drinks,
                popular: true,
                created_at: Utc::now(),
            },
            MenuItem {
                id: 2,
                name: "Blueberry Muffin".to_string(),
                price: 3.25,
                description: "Fresh baked daily".to_string(),
                category: MenuCategory::Snacks,
                popular: false,
                created_at: Utc::now(),
            },
        ];
        let kept = filter_records(&items, "SNACK", MenuItem::default_fields());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    #[test]
    fn test_unknown_field_name() {
        let err = "colour".parse::<SupplierField>().unwrap_err();
        assert!(matches!(err, BrewError::InvalidArgument(_)));
        assert_eq!("supplier".parse::<OrderField>().unwrap(), OrderField::SupplierName);
    }
}
