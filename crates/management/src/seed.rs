//! Demo cafe used when the store starts with `seed_demo_data`.

use crate::models::*;
use crate::store::CafeStore;
use brew_core::error::BrewResult;
use brew_core::types::{CustomerPaymentMethod, MenuCategory, OrderStatus, PaymentMethod};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;

fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

pub(crate) fn seed_demo_data(store: &CafeStore) -> BrewResult<()> {
    let menu = [
        ("Espresso", 3.50, "Strong black coffee", MenuCategory::Drinks, true),
        ("Cappuccino", 4.75, "Espresso with steamed milk and foam", MenuCategory::Drinks, true),
        ("Latte", 4.50, "Espresso with steamed milk", MenuCategory::Drinks, false),
        ("Americano", 3.75, "Espresso with hot water", MenuCategory::Drinks, false),
        ("Chocolate Cake", 5.50, "Rich chocolate cake with ganache", MenuCategory::Desserts, true),
        ("Cheesecake", 5.75, "New York style cheesecake", MenuCategory::Desserts, true),
        ("Croissant", 3.25, "Buttery, flaky pastry", MenuCategory::Snacks, false),
        ("Avocado Toast", 6.50, "Sourdough bread with avocado spread", MenuCategory::Snacks, false),
        ("Granola Bar", 2.75, "Oats, honey, and mixed nuts", MenuCategory::Snacks, true),
        ("Fruit Cup", 4.25, "Selection of fresh seasonal fruits", MenuCategory::Snacks, false),
    ];
    let mut menu_ids = Vec::with_capacity(menu.len());
    for (name, price, description, category, popular) in menu {
        let item = store.create_menu_item(CreateMenuItemRequest {
            name: name.to_string(),
            price,
            description: description.to_string(),
            category,
            popular,
        })?;
        menu_ids.push(item.id);
    }
    let prefer = |indices: &[usize]| -> BTreeSet<i64> {
        indices.iter().filter_map(|&i| menu_ids.get(i).copied()).collect()
    };

    #[rustfmt::skip]
    let customers = [
        ("Sarah Johnson", "sarah.j@example.com", "(555) 123-4567", 320, ymd(1990, 10, 22), prefer(&[1, 5]),
            Some("Prefers almond milk. Sensitive to caffeine in the afternoon."), Some(("Visa", "4242", "09/27"))),
        ("Michael Chen", "michael.c@example.com", "(555) 987-6543", 85, ymd(1985, 3, 14), prefer(&[3]),
            Some("Always brings a laptop. Often stays for 3+ hours."), None),
        ("Emily Rodriguez", "emily.r@example.com", "(555) 234-5678", 540, ymd(1992, 7, 8), prefer(&[2, 4, 8]),
            None, Some(("Mastercard", "5511", "03/26"))),
        ("David Kim", "david.k@example.com", "(555) 876-5432", 150, None, prefer(&[0]), None, None),
        ("Jessica Lee", "jessica.l@example.com", "(555) 345-6789", 210, ymd(1995, 12, 1), prefer(&[6, 9]),
            None, None),
    ];
    for (name, email, phone, points, birthday, preferences, notes, card) in customers {
        let mut payment_methods: Vec<CustomerPaymentMethod> = card
            .map(|(kind, last4, expiry)| CustomerPaymentMethod {
                kind: kind.to_string(),
                last4: Some(last4.to_string()),
                expiry_date: Some(expiry.to_string()),
                is_default: true,
            })
            .into_iter()
            .collect();
        let cash_is_default = payment_methods.is_empty();
        payment_methods.push(CustomerPaymentMethod {
            kind: "Cash".to_string(),
            last4: None,
            expiry_date: None,
            is_default: cash_is_default,
        });
        store.create_customer(CreateCustomerRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: Some(phone.to_string()),
            address: None,
            join_date: ymd(2023, 1, 15),
            loyalty_points: points,
            birthday,
            preferences,
            notes: notes.map(str::to_string),
            payment_methods,
        })?;
    }

    #[rustfmt::skip]
    let suppliers = [
        ("Bean Suppliers Ltd.", "John Smith", "john@beansuppliers.com", "(555) 123-4567", "12 Roastery Lane", "Coffee Beans"),
        ("Dairy Delights", "Emma Johnson", "emma@dairydelights.com", "(555) 234-5678", "48 Meadow Road", "Dairy Products"),
        ("Sweet Treats Inc.", "Michael Brown", "michael@sweettreats.com", "(555) 345-6789", "7 Baker Street", "Pastries"),
        ("Cup & Lid Co.", "Sarah Wilson", "sarah@cupandlid.com", "(555) 456-7890", "300 Industrial Park", "Packaging"),
        ("Flavor Essence", "David Lee", "david@flavoressence.com", "(555) 567-8901", "22 Vanilla Court", "Syrups"),
    ];
    let mut supplier_ids = Vec::with_capacity(suppliers.len());
    for (name, contact, email, phone, address, category) in suppliers {
        let supplier = store.create_supplier(CreateSupplierRequest {
            name: name.to_string(),
            contact: Some(contact.to_string()),
            email: email.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
            category: category.to_string(),
        })?;
        supplier_ids.push(supplier.id);
    }

    let products = [
        (0, "House blend beans", 18.0, "kg"),
        (0, "Single origin Ethiopia", 26.5, "kg"),
        (1, "Whole milk", 1.2, "litre"),
        (1, "Oat milk", 2.1, "litre"),
        (2, "Butter croissants", 0.9, "piece"),
        (3, "12oz paper cups", 0.08, "piece"),
        (4, "Vanilla syrup", 7.5, "bottle"),
    ];
    for (supplier, name, price, unit) in products {
        store.add_supplier_product(
            supplier_ids[supplier],
            CreateSupplierProductRequest {
                name: name.to_string(),
                price,
                unit: unit.to_string(),
            },
        )?;
    }

    #[rustfmt::skip]
    let orders = [
        (0, "40kg house blend beans", 720.0, ymd(2024, 9, 2), PaymentMethod::BankTransfer, OrderStatus::Delivered),
        (1, "120 litres whole milk, 60 litres oat milk", 270.0, ymd(2024, 9, 5), PaymentMethod::Credit, OrderStatus::Pending),
        (3, "5000 12oz paper cups", 400.0, ymd(2024, 9, 9), PaymentMethod::Cash, OrderStatus::Pending),
    ];
    for (supplier, items, amount, delivery_date, payment_method, status) in orders {
        let Some(delivery_date) = delivery_date else { continue };
        store.create_order(CreateOrderRequest {
            supplier_id: supplier_ids[supplier],
            items: items.to_string(),
            amount,
            delivery_date,
            payment_method,
            notes: None,
            status,
        })?;
    }

    debug!("Demo data seeded");
    Ok(())
}
