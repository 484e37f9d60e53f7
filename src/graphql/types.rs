use super::schema::get_repo;
use crate::model::{Category, Ingredient};
use async_graphql::{Context, ID, Object, ResultExt, SimpleObject};

fn to_id(id: i64) -> ID {
    ID(id.to_string())
}

pub struct CategoryType(Category);

impl From<Category> for CategoryType {
    fn from(c: Category) -> Self {
        Self(c)
    }
}

#[Object]
impl CategoryType {
    async fn id(&self) -> ID {
        to_id(self.0.id)
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// Ingredients belonging to this category
    async fn ingredients(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<IngredientType>> {
        let repo = get_repo(ctx)?;
        let ingredients = repo.ingredients_for_category(self.0.id).extend()?;
        Ok(ingredients
            .into_iter()
            .map(|i| IngredientType::with_category(i, self.0.clone()))
            .collect())
    }
}

pub struct IngredientType {
    ingredient: Ingredient,
    /// Owning category when it was loaded alongside the ingredient.
    category: Option<Category>,
}

impl IngredientType {
    pub fn with_category(ingredient: Ingredient, category: Category) -> Self {
        Self {
            ingredient,
            category: Some(category),
        }
    }
}

impl From<Ingredient> for IngredientType {
    fn from(i: Ingredient) -> Self {
        Self {
            ingredient: i,
            category: None,
        }
    }
}

#[Object]
impl IngredientType {
    async fn id(&self) -> ID {
        to_id(self.ingredient.id)
    }

    async fn name(&self) -> &str {
        &self.ingredient.name
    }

    async fn notes(&self) -> Option<&str> {
        self.ingredient.notes.as_deref()
    }

    /// The category this ingredient belongs to
    async fn category(&self, ctx: &Context<'_>) -> async_graphql::Result<CategoryType> {
        if let Some(ref category) = self.category {
            return Ok(category.clone().into());
        }
        let repo = get_repo(ctx)?;
        let category = repo.get_category(self.ingredient.category_id).extend()?;
        Ok(category.into())
    }
}

#[derive(SimpleObject)]
#[graphql(name = "CreateCategoryMutation")]
pub struct CreateCategoryPayload {
    pub category: Option<CategoryType>,
}

#[derive(SimpleObject)]
#[graphql(name = "UpdateCategoryMutation")]
pub struct UpdateCategoryPayload {
    pub category: Option<CategoryType>,
}

/// `category` is always null once the row is gone.
#[derive(SimpleObject)]
#[graphql(name = "DeleteCategoryMutation")]
pub struct DeleteCategoryPayload {
    pub category: Option<CategoryType>,
}

#[derive(SimpleObject)]
#[graphql(name = "CreateIngredientsMutation")]
pub struct CreateIngredientsPayload {
    pub ingredients: Option<IngredientType>,
}

#[derive(SimpleObject)]
#[graphql(name = "UpdateIngredientsMutation")]
pub struct UpdateIngredientsPayload {
    #[graphql(name = "Ingredient")]
    pub ingredient: Option<IngredientType>,
}

#[derive(SimpleObject)]
#[graphql(name = "DeleteIngredientsMutation")]
pub struct DeleteIngredientsPayload {
    #[graphql(name = "Ingredient")]
    pub ingredient: Option<IngredientType>,
}
