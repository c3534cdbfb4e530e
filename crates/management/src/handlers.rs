//! Axum REST handlers for the cafe management API.

use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::models::*;
use crate::store::CafeStore;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brew_core::error::BrewError;
use brew_core::types::{Customer, MenuCategory, MenuItem, Supplier, SupplierProduct};
use brew_loyalty::LoyaltyEngine;
use brew_search::SearchParams;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

/// Shared management state.
#[derive(Clone)]
pub struct ManagementState {
    pub store: Arc<CafeStore>,
    pub loyalty: Arc<LoyaltyEngine>,
}

/// Error returned by every fallible handler; renders as `{error, message}`.
#[derive(Debug)]
pub struct ApiError(pub BrewError);

impl From<BrewError> for ApiError {
    fn from(err: BrewError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            BrewError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "invalid_argument"),
            BrewError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            BrewError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        let message = if self.0.is_client_error() {
            warn!(error = %self.0, "Request rejected");
            self.0.to_string()
        } else {
            error!(error = %self.0, "Request failed");
            metrics::counter!("management.errors").increment(1);
            "Internal processing error".to_string()
        };
        (
            status,
            Json(ErrorResponse {
                error: code.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ─── Customers ─────────────────────────────────────────────────────────────

pub async fn list_customers(
    State(state): State<ManagementState>,
    ApiQuery(search): ApiQuery<SearchParams>,
) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(search.apply(state.store.list_customers())?))
}

pub async fn get_customer(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.store.get_customer(id)?))
}

pub async fn create_customer(
    State(state): State<ManagementState>,
    ApiJson(req): ApiJson<CreateCustomerRequest>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let customer = state.store.create_customer(req)?;
    metrics::counter!("management.customers.created").increment(1);
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn update_customer(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateCustomerRequest>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.store.update_customer(id, req)?))
}

pub async fn delete_customer(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.store.delete_customer(id)?;
    metrics::counter!("management.customers.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /customers/:id/profile — detail page with loyalty and birthday tabs.
pub async fn customer_profile(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(as_of): ApiQuery<AsOfParams>,
) -> ApiResult<Json<CustomerProfile>> {
    let profile = state.store.customer_profile(id, &state.loyalty, as_of.today())?;
    Ok(Json(profile))
}

pub async fn add_preference(
    State(state): State<ManagementState>,
    ApiPath((id, item_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.store.add_preference(id, item_id)?))
}

pub async fn remove_preference(
    State(state): State<ManagementState>,
    ApiPath((id, item_id)): ApiPath<(i64, i64)>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.store.remove_preference(id, item_id)?))
}

/// POST /customers/:id/birthday-gift — only inside the gift window.
pub async fn send_birthday_gift(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(as_of): ApiQuery<AsOfParams>,
    ApiJson(req): ApiJson<SendBirthdayGiftRequest>,
) -> ApiResult<(StatusCode, Json<BirthdayGift>)> {
    let gift = state.store.send_birthday_gift(id, req, as_of.today())?;
    metrics::counter!("management.birthday_gifts.sent").increment(1);
    Ok((StatusCode::CREATED, Json(gift)))
}

// ─── Suppliers ─────────────────────────────────────────────────────────────

pub async fn list_suppliers(
    State(state): State<ManagementState>,
    ApiQuery(search): ApiQuery<SearchParams>,
) -> ApiResult<Json<Vec<Supplier>>> {
    Ok(Json(search.apply(state.store.list_suppliers())?))
}

pub async fn get_supplier(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(state.store.get_supplier(id)?))
}

pub async fn create_supplier(
    State(state): State<ManagementState>,
    ApiJson(req): ApiJson<CreateSupplierRequest>,
) -> ApiResult<(StatusCode, Json<Supplier>)> {
    let supplier = state.store.create_supplier(req)?;
    metrics::counter!("management.suppliers.created").increment(1);
    Ok((StatusCode::CREATED, Json(supplier)))
}

pub async fn update_supplier(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateSupplierRequest>,
) -> ApiResult<Json<Supplier>> {
    Ok(Json(state.store.update_supplier(id, req)?))
}

pub async fn delete_supplier(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.store.delete_supplier(id)?;
    metrics::counter!("management.suppliers.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_supplier_products(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<SupplierProduct>>> {
    Ok(Json(state.store.list_supplier_products(id)?))
}

pub async fn add_supplier_product(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<CreateSupplierProductRequest>,
) -> ApiResult<(StatusCode, Json<SupplierProduct>)> {
    let product = state.store.add_supplier_product(id, req)?;
    Ok((StatusCode::CREATED, Json(product)))
}

// ─── Menu ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub category: Option<MenuCategory>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub fields: Option<String>,
}

pub async fn list_menu_items(
    State(state): State<ManagementState>,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    let items = match query.category {
        Some(category) => state.store.list_menu_items_by_category(category),
        None => state.store.list_menu_items(),
    };
    let search = SearchParams {
        q: query.q,
        fields: query.fields,
    };
    Ok(Json(search.apply(items)?))
}

pub async fn get_menu_item(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.store.get_menu_item(id)?))
}

pub async fn create_menu_item(
    State(state): State<ManagementState>,
    ApiJson(req): ApiJson<CreateMenuItemRequest>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    let item = state.store.create_menu_item(req)?;
    metrics::counter!("management.menu_items.created").increment(1);
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_menu_item(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateMenuItemRequest>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.store.update_menu_item(id, req)?))
}

pub async fn delete_menu_item(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.store.delete_menu_item(id)?;
    metrics::counter!("management.menu_items.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

// ─── Orders ────────────────────────────────────────────────────────────────

pub async fn list_orders(
    State(state): State<ManagementState>,
    ApiQuery(search): ApiQuery<SearchParams>,
) -> ApiResult<Json<Vec<OrderView>>> {
    Ok(Json(search.apply(state.store.list_orders())?))
}

pub async fn get_order(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<OrderView>> {
    Ok(Json(state.store.get_order(id)?))
}

pub async fn create_order(
    State(state): State<ManagementState>,
    ApiJson(req): ApiJson<CreateOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderView>)> {
    let order = state.store.create_order(req)?;
    metrics::counter!("management.orders.created").increment(1);
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_order(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(req): ApiJson<UpdateOrderRequest>,
) -> ApiResult<Json<OrderView>> {
    Ok(Json(state.store.update_order(id, req)?))
}

pub async fn delete_order(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    state.store.delete_order(id)?;
    metrics::counter!("management.orders.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_order_items(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Vec<OrderItemView>>> {
    Ok(Json(state.store.list_order_items(id)?))
}

pub async fn add_order_items(
    State(state): State<ManagementState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(items): ApiJson<Vec<CreateOrderItemRequest>>,
) -> ApiResult<(StatusCode, Json<Vec<OrderItemView>>)> {
    let created = state.store.add_order_items(id, items)?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ─── Dashboard ─────────────────────────────────────────────────────────────

pub async fn dashboard_overview(
    State(state): State<ManagementState>,
    ApiQuery(as_of): ApiQuery<AsOfParams>,
) -> Json<DashboardOverview> {
    Json(state.store.dashboard_overview(&state.loyalty, as_of.today()))
}

pub async fn recent_activity(
    State(state): State<ManagementState>,
    ApiQuery(params): ApiQuery<ActivityParams>,
) -> Json<Vec<ActivityEntry>> {
    Json(state.store.recent_activity(params.limit))
}
