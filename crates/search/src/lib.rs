//! Case-insensitive substring search over in-memory record lists.

pub mod fields;
pub mod filter;

pub use fields::{CustomerField, MenuItemField, OrderField, SupplierField};
pub use filter::{filter_records, matches_query, parse_fields, SearchParams, Searchable};
