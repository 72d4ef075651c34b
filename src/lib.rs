// Library root - exports for the server binary and tests

pub mod app_state;
pub mod config;
pub mod database;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;

pub use app_state::AppState;
pub use config::Config;
pub use error::{ApiError, ApiResult};
