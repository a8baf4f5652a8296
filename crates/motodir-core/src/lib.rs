pub mod app_config;
pub mod brands;
pub mod config;
pub mod countries;
pub mod error;
pub mod shops;

pub use app_config::{AppConfig, Environment};
pub use brands::{DEALER_NAME_MARKERS, MOTORCYCLE_BRANDS};
pub use config::{load_app_config, load_app_config_from_env};
pub use countries::Country;
pub use error::ConfigError;
pub use shops::RepairShop;
