pub mod app_config;
pub mod client;
pub mod error;
pub mod types;

pub use app_config::AppConfig;
pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
