//! `PostgreSQL` adapters for monitored site persistence.

mod models;
mod repository;
mod schema;

pub use repository::{CREATE_SITES_SQL, PostgresSiteRepository, SitePgPool};
