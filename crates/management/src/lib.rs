//! Cafe management backend — customers, suppliers, menu, orders, dashboard.
//!
//! Provides REST API endpoints for the cafe dashboard UI.
//! Data stored in DashMap; the store is the only place that touches it.

pub mod extract;
pub mod handlers;
pub mod models;
pub mod router;
mod seed;
pub mod store;

pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use handlers::{ApiError, ManagementState};
pub use router::management_router;
pub use store::CafeStore;
