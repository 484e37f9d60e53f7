//! GraphQL schema, resolvers and HTTP transport for the pantry.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! pantry serve --port 4000
//!
//! # Execute a query from CLI
//! pantry query '{ category(name: "Dairy") { id ingredients { name notes } } }'
//!
//! # Execute a mutation from CLI
//! pantry mutate 'createCategory(name: "Dairy") { category { id } }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `category`, `ingredient`
//! - **Mutations**: `createCategory`, `updateCategory`, `deleteCategory`,
//!   `createIngredients`, `updateIngredients`, `deleteIngredients`

mod schema;
mod server;
mod types;

pub use schema::{MutationRoot, PantryApi, PantrySchema, QueryRoot, build_schema, sdl};
pub use server::{router, run_server};
pub use types::*;
