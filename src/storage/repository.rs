use super::schema;
use crate::{
    config::PantryConfig,
    error::{PantryError, Result},
    model::{Category, Ingredient},
    validation::Lookup,
};
use rusqlite::{Connection, OptionalExtension, Params, Row, params};
use std::path::Path;
use std::time::Duration;

const SELECT_CATEGORY: &str = "SELECT id, name FROM categories";
const SELECT_INGREDIENT: &str = "SELECT id, name, notes, category_id FROM ingredients";

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn ingredient_from_row(row: &Row<'_>) -> rusqlite::Result<Ingredient> {
    Ok(Ingredient {
        id: row.get(0)?,
        name: row.get(1)?,
        notes: row.get(2)?,
        category_id: row.get(3)?,
    })
}

/// Get/filter/all/save/delete primitives for categories and ingredients.
///
/// Each repository owns a single SQLite connection; open one per request.
pub struct PantryRepository {
    conn: Connection,
}

impl PantryRepository {
    /// Open the configured database and bring its schema up to date.
    pub fn new(config: &PantryConfig, project_root: &Path) -> Result<Self> {
        let repo = Self::open(
            &config.database_path(project_root),
            config.database.busy_timeout(),
        )?;
        repo.migrate()?;
        Ok(repo)
    }

    /// Open a connection without touching the schema.
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        tracing::debug!(path = %path.display(), "Opened database");
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        schema::migrate(&self.conn)?;
        tracing::debug!("Migrated database schema");
        Ok(())
    }

    // --- categories -------------------------------------------------------

    pub fn get_category(&self, id: i64) -> Result<Category> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_CATEGORY),
                params![id],
                category_from_row,
            )
            .optional()?
            .ok_or(PantryError::CategoryNotFound(id))
    }

    /// Categories matching `lookup`. Never fails on absence; an unmatched
    /// lookup yields an empty list.
    pub fn filter_categories(&self, lookup: &Lookup) -> Result<Vec<Category>> {
        tracing::debug!(?lookup, "Filtering categories");
        match lookup {
            Lookup::ById(id) => self.query_categories(
                &format!("{} WHERE id = ?1 ORDER BY id", SELECT_CATEGORY),
                params![id],
            ),
            Lookup::ByName(name) => self.query_categories(
                &format!("{} WHERE name = ?1 ORDER BY id", SELECT_CATEGORY),
                params![name],
            ),
            Lookup::All => self.all_categories(),
        }
    }

    pub fn all_categories(&self) -> Result<Vec<Category>> {
        self.query_categories(&format!("{} ORDER BY id", SELECT_CATEGORY), params![])
    }

    fn query_categories(&self, sql: &str, params: impl Params) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(sql)?;
        let categories = stmt
            .query_map(params, category_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn insert_category(&self, name: &str) -> Result<Category> {
        self.conn
            .execute("INSERT INTO categories (name) VALUES (?1)", params![name])?;
        let category = Category::new(self.conn.last_insert_rowid(), name);
        tracing::info!(id = category.id, name = %category.name, "Created category");
        Ok(category)
    }

    pub fn save_category(&self, category: &Category) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2",
            params![category.name, category.id],
        )?;
        if updated == 0 {
            return Err(PantryError::CategoryNotFound(category.id));
        }
        tracing::info!(id = category.id, name = %category.name, "Updated category");
        Ok(())
    }

    /// Delete a category. Its ingredients go with it (`ON DELETE CASCADE`).
    pub fn delete_category(&self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(PantryError::CategoryNotFound(id));
        }
        tracing::info!(id, "Deleted category");
        Ok(())
    }

    // --- ingredients ------------------------------------------------------

    pub fn get_ingredient(&self, id: i64) -> Result<Ingredient> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_INGREDIENT),
                params![id],
                ingredient_from_row,
            )
            .optional()?
            .ok_or(PantryError::IngredientNotFound(id))
    }

    pub fn filter_ingredients(&self, lookup: &Lookup) -> Result<Vec<Ingredient>> {
        tracing::debug!(?lookup, "Filtering ingredients");
        match lookup {
            Lookup::ById(id) => self.query_ingredients(
                &format!("{} WHERE id = ?1 ORDER BY id", SELECT_INGREDIENT),
                params![id],
            ),
            Lookup::ByName(name) => self.query_ingredients(
                &format!("{} WHERE name = ?1 ORDER BY id", SELECT_INGREDIENT),
                params![name],
            ),
            Lookup::All => {
                self.query_ingredients(&format!("{} ORDER BY id", SELECT_INGREDIENT), params![])
            }
        }
    }

    /// Every ingredient joined with its category in one query.
    pub fn all_ingredients_with_category(&self) -> Result<Vec<(Ingredient, Category)>> {
        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.name, i.notes, i.category_id, c.name \
             FROM ingredients i \
             JOIN categories c ON c.id = i.category_id \
             ORDER BY i.id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let ingredient = ingredient_from_row(row)?;
                let category = Category::new(ingredient.category_id, row.get::<_, String>(4)?);
                Ok((ingredient, category))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn ingredients_for_category(&self, category_id: i64) -> Result<Vec<Ingredient>> {
        self.query_ingredients(
            &format!("{} WHERE category_id = ?1 ORDER BY id", SELECT_INGREDIENT),
            params![category_id],
        )
    }

    fn query_ingredients(&self, sql: &str, params: impl Params) -> Result<Vec<Ingredient>> {
        let mut stmt = self.conn.prepare(sql)?;
        let ingredients = stmt
            .query_map(params, ingredient_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ingredients)
    }

    pub fn insert_ingredient(
        &self,
        name: &str,
        notes: Option<&str>,
        category: &Category,
    ) -> Result<Ingredient> {
        self.conn.execute(
            "INSERT INTO ingredients (name, notes, category_id) VALUES (?1, ?2, ?3)",
            params![name, notes, category.id],
        )?;
        let ingredient = Ingredient::new(self.conn.last_insert_rowid(), name, category.id)
            .with_notes(notes.map(str::to_string));
        tracing::info!(
            id = ingredient.id,
            name = %ingredient.name,
            category_id = category.id,
            "Created ingredient"
        );
        Ok(ingredient)
    }

    pub fn save_ingredient(&self, ingredient: &Ingredient) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE ingredients SET name = ?1, notes = ?2, category_id = ?3 WHERE id = ?4",
            params![
                ingredient.name,
                ingredient.notes,
                ingredient.category_id,
                ingredient.id
            ],
        )?;
        if updated == 0 {
            return Err(PantryError::IngredientNotFound(ingredient.id));
        }
        tracing::info!(id = ingredient.id, name = %ingredient.name, "Updated ingredient");
        Ok(())
    }

    pub fn delete_ingredient(&self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM ingredients WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(PantryError::IngredientNotFound(id));
        }
        tracing::info!(id, "Deleted ingredient");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (PantryRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = PantryRepository::new(&PantryConfig::default(), temp_dir.path()).unwrap();
        (repo, temp_dir)
    }

    #[test]
    fn test_open_creates_database_file_in_nested_dir() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("pantry.db");
        PantryRepository::open(&path, Duration::from_millis(100)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_does_not_create_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bare.db");
        let repo = PantryRepository::open(&path, Duration::from_millis(100)).unwrap();
        assert!(matches!(
            repo.all_categories(),
            Err(PantryError::Database(_))
        ));

        repo.migrate().unwrap();
        assert!(repo.all_categories().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let (repo, temp_dir) = setup_test_repo();
        repo.insert_category("Dairy").unwrap();
        drop(repo);

        let repo = PantryRepository::new(&PantryConfig::default(), temp_dir.path()).unwrap();
        assert_eq!(repo.all_categories().unwrap().len(), 1);
    }

    #[test]
    fn test_category_ids_start_at_one() {
        let (repo, _temp_dir) = setup_test_repo();
        let dairy = repo.insert_category("Dairy").unwrap();
        let produce = repo.insert_category("Produce").unwrap();
        assert_eq!(dairy.id, 1);
        assert_eq!(produce.id, 2);
        assert_eq!(repo.get_category(1).unwrap(), dairy);
    }

    #[test]
    fn test_filter_categories() {
        let (repo, _temp_dir) = setup_test_repo();
        let dairy = repo.insert_category("Dairy").unwrap();
        repo.insert_category("Produce").unwrap();
        repo.insert_category("Dairy").unwrap();

        let by_id = repo.filter_categories(&Lookup::ById(dairy.id)).unwrap();
        assert_eq!(by_id, vec![dairy]);

        let by_name = repo
            .filter_categories(&Lookup::ByName("Dairy".to_string()))
            .unwrap();
        assert_eq!(by_name.len(), 2);

        assert_eq!(repo.filter_categories(&Lookup::All).unwrap().len(), 3);
    }

    #[test]
    fn test_filter_missing_is_empty() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.filter_categories(&Lookup::ById(99)).unwrap().is_empty());
        assert!(
            repo.filter_ingredients(&Lookup::ByName("Saffron".to_string()))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(matches!(
            repo.get_category(5),
            Err(PantryError::CategoryNotFound(5))
        ));
        assert!(matches!(
            repo.get_ingredient(5),
            Err(PantryError::IngredientNotFound(5))
        ));
    }

    #[test]
    fn test_save_category_overwrites_name() {
        let (repo, _temp_dir) = setup_test_repo();
        let mut category = repo.insert_category("Diary").unwrap();
        category.rename("Dairy");
        repo.save_category(&category).unwrap();
        assert_eq!(repo.get_category(category.id).unwrap().name, "Dairy");
    }

    #[test]
    fn test_save_missing_category_fails() {
        let (repo, _temp_dir) = setup_test_repo();
        let ghost = Category::new(42, "Ghost");
        assert!(matches!(
            repo.save_category(&ghost),
            Err(PantryError::CategoryNotFound(42))
        ));
    }

    #[test]
    fn test_insert_ingredient_requires_existing_category() {
        let (repo, _temp_dir) = setup_test_repo();
        let ghost = Category::new(42, "Ghost");
        let result = repo.insert_ingredient("Milk", None, &ghost);
        assert!(matches!(result, Err(PantryError::Database(_))));
    }

    #[test]
    fn test_ingredient_lifecycle() {
        let (repo, _temp_dir) = setup_test_repo();
        let dairy = repo.insert_category("Dairy").unwrap();
        let mut milk = repo.insert_ingredient("Milk", Some("2%"), &dairy).unwrap();
        assert_eq!(milk.notes.as_deref(), Some("2%"));
        assert_eq!(repo.get_ingredient(milk.id).unwrap(), milk);

        milk.overwrite("Milk", None);
        repo.save_ingredient(&milk).unwrap();
        assert_eq!(repo.get_ingredient(milk.id).unwrap().notes, None);

        repo.delete_ingredient(milk.id).unwrap();
        assert!(
            repo.filter_ingredients(&Lookup::ById(milk.id))
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            repo.delete_ingredient(milk.id),
            Err(PantryError::IngredientNotFound(_))
        ));
    }

    #[test]
    fn test_all_ingredients_with_category() {
        let (repo, _temp_dir) = setup_test_repo();
        let dairy = repo.insert_category("Dairy").unwrap();
        let produce = repo.insert_category("Produce").unwrap();
        repo.insert_ingredient("Milk", Some("2%"), &dairy).unwrap();
        repo.insert_ingredient("Kale", Some("curly"), &produce)
            .unwrap();

        let rows = repo.all_ingredients_with_category().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0.name, "Milk");
        assert_eq!(rows[0].1, dairy);
        assert_eq!(rows[1].1, produce);
    }

    #[test]
    fn test_ingredients_for_category() {
        let (repo, _temp_dir) = setup_test_repo();
        let dairy = repo.insert_category("Dairy").unwrap();
        let produce = repo.insert_category("Produce").unwrap();
        repo.insert_ingredient("Milk", None, &dairy).unwrap();
        repo.insert_ingredient("Butter", None, &dairy).unwrap();
        repo.insert_ingredient("Kale", None, &produce).unwrap();

        let names: Vec<String> = repo
            .ingredients_for_category(dairy.id)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Milk", "Butter"]);
    }

    #[test]
    fn test_delete_category_cascades_to_ingredients() {
        let (repo, _temp_dir) = setup_test_repo();
        let dairy = repo.insert_category("Dairy").unwrap();
        let milk = repo.insert_ingredient("Milk", None, &dairy).unwrap();

        repo.delete_category(dairy.id).unwrap();

        assert!(repo.all_categories().unwrap().is_empty());
        assert!(matches!(
            repo.get_ingredient(milk.id),
            Err(PantryError::IngredientNotFound(_))
        ));
    }
}
