use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PantryError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Project not initialized. Run 'pantry init' first.")]
    NotInitialized,

    #[error("Project already initialized at {0}")]
    AlreadyInitialized(String),
}

impl PantryError {
    /// Machine-readable code attached to GraphQL errors under `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            PantryError::CategoryNotFound(_) | PantryError::IngredientNotFound(_) => "NOT_FOUND",
            PantryError::Validation(_) => "BAD_USER_INPUT",
            _ => "INTERNAL",
        }
    }
}

impl ErrorExtensions for PantryError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T> = std::result::Result<T, PantryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_codes() {
        assert_eq!(PantryError::CategoryNotFound(1).code(), "NOT_FOUND");
        assert_eq!(PantryError::IngredientNotFound(1).code(), "NOT_FOUND");
    }

    #[test]
    fn test_validation_code() {
        assert_eq!(
            PantryError::Validation("bad id".to_string()).code(),
            "BAD_USER_INPUT"
        );
        assert_eq!(PantryError::NotInitialized.code(), "INTERNAL");
    }

    #[test]
    fn test_extend_carries_message_and_code() {
        let err = PantryError::CategoryNotFound(42).extend();
        assert_eq!(err.message, "Category not found: 42");
        let ext = err.extensions.expect("extensions set");
        assert_eq!(
            ext.get("code"),
            Some(&async_graphql::Value::from("NOT_FOUND"))
        );
    }
}
