//! # Pantry - a GraphQL API over categories and ingredients
//!
//! Pantry stores two related entities in SQLite, categories and the
//! ingredients that belong to them, and exposes them through a GraphQL
//! query/mutation surface. Every resolver maps to a single lookup or write.
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize a project (writes .pantry.toml and creates pantry.db)
//! pantry init
//!
//! # Create a category and an ingredient in it
//! pantry mutate 'createCategory(name: "Dairy") { category { id } }'
//! pantry mutate 'createIngredients(name: "Milk", notes: "2%", categoryId: 1) { ingredients { id } }'
//!
//! # Query
//! pantry query '{ ingredient { name category { name } } }'
//!
//! # Serve over HTTP
//! pantry serve --port 4000
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP server
//! - [`model`]: Data models (Category, Ingredient)
//! - [`storage`]: SQLite persistence
//! - [`validation`]: Argument coercion ahead of resolvers

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.pantry.toml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `PantryError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides async-graphql schema for querying and mutating the pantry.
pub mod graphql;

pub mod logging;

/// Data models for the pantry.
pub mod model;

/// SQLite storage layer.
pub mod storage;

/// Input validation utilities.
///
/// Parses identifiers and picks the lookup a list query performs.
pub mod validation;
