pub mod analyze;
pub mod app;
pub mod models;
pub mod thumbnail;
