//! In-memory adapters for monitored site persistence.

mod repository;

pub use repository::InMemorySiteRepository;
