//! Data models for the pantry.
//!
//! - [`Category`]: a grouping entity owning zero or more ingredients
//! - [`Ingredient`]: a leaf entity referencing exactly one category

mod category;
mod ingredient;

pub use category::Category;
pub use ingredient::Ingredient;
