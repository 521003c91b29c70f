pub mod config;
pub mod database;
pub mod entity;
pub mod links;
pub mod seed;

pub use config::DatabaseConfig;
pub use links::{contest_url, problem_url};
