//! SQLite storage layer.
//!
//! Two tables, `categories` and `ingredients`, with ingredients holding a
//! foreign key to their category (`ON DELETE CASCADE`). The schema is applied
//! idempotently every time a connection is opened.
//!
//! ## Components
//!
//! - [`PantryRepository`]: get/filter/all/save/delete per entity
//! - [`migrate`]: create the tables on a fresh database

mod repository;
mod schema;

pub use repository::PantryRepository;
pub use schema::migrate;
