pub mod config;
pub mod error;
pub mod loyalty;
pub mod types;

pub use config::AppConfig;
pub use error::{BrewError, BrewResult};
