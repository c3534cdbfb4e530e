//! Management API router — mounts all cafe endpoints under /api/v1.

use crate::handlers::{self, ManagementState};
use axum::routing::{get, post};
use axum::Router;

/// Build the management router with all endpoints.
/// Returns a Router that should be merged into the main app.
pub fn management_router(state: ManagementState) -> Router {
    Router::new()
        // Customers
        .route(
            "/api/v1/customers",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/api/v1/customers/:id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        .route("/api/v1/customers/:id/profile", get(handlers::customer_profile))
        .route(
            "/api/v1/customers/:id/birthday-gift",
            post(handlers::send_birthday_gift),
        )
        .route(
            "/api/v1/customers/:id/preferences/:item_id",
            post(handlers::add_preference).delete(handlers::remove_preference),
        )
        // Suppliers
        .route(
            "/api/v1/suppliers",
            get(handlers::list_suppliers).post(handlers::create_supplier),
        )
        .route(
            "/api/v1/suppliers/:id",
            get(handlers::get_supplier)
                .put(handlers::update_supplier)
                .delete(handlers::delete_supplier),
        )
        .route(
            "/api/v1/suppliers/:id/products",
            get(handlers::list_supplier_products).post(handlers::add_supplier_product),
        )
        // Menu
        .route(
            "/api/v1/menu-items",
            get(handlers::list_menu_items).post(handlers::create_menu_item),
        )
        .route(
            "/api/v1/menu-items/:id",
            get(handlers::get_menu_item)
                .put(handlers::update_menu_item)
                .delete(handlers::delete_menu_item),
        )
        // Orders
        .route(
            "/api/v1/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/api/v1/orders/:id",
            get(handlers::get_order)
                .put(handlers::update_order)
                .delete(handlers::delete_order),
        )
        .route(
            "/api/v1/orders/:id/items",
            get(handlers::list_order_items).post(handlers::add_order_items),
        )
        // Dashboard
        .route("/api/v1/dashboard/overview", get(handlers::dashboard_overview))
        .route("/api/v1/dashboard/activity", get(handlers::recent_activity))
        .with_state(state)
}
