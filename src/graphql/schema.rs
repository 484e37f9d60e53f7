use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_graphql::extensions::Tracing;
use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, ID, Object, Pos, Request, Response, ResultExt,
    Schema,
};

use crate::config::PantryConfig;
use crate::error::Result;
use crate::storage::PantryRepository;
use crate::validation::{self, Lookup};

use super::types::*;

pub type PantrySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema() -> PantrySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .extension(Tracing)
        .finish()
}

/// Schema definition language for the API. Needs no database.
pub fn sdl() -> String {
    build_schema().sdl()
}

/// The connection shared by every resolver of one request.
struct RequestRepository(Mutex<PantryRepository>);

/// The schema bound to a database.
///
/// Each [`PantryApi::execute`] opens exactly one connection and hands it to
/// all resolvers of that request through request data.
#[derive(Clone)]
pub struct PantryApi {
    schema: PantrySchema,
    database_path: PathBuf,
    busy_timeout: Duration,
}

impl PantryApi {
    /// Bind the schema to the configured database, migrating it once.
    pub fn new(config: &PantryConfig, project_root: &Path) -> Result<Self> {
        PantryRepository::new(config, project_root)?;
        Ok(Self {
            schema: build_schema(),
            database_path: config.database_path(project_root),
            busy_timeout: config.database.busy_timeout(),
        })
    }

    pub async fn execute(&self, request: impl Into<Request>) -> Response {
        let repo = match PantryRepository::open(&self.database_path, self.busy_timeout) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open database for request");
                return Response::from_errors(vec![e.extend().into_server_error(Pos::default())]);
            }
        };
        let request = request
            .into()
            .data(RequestRepository(Mutex::new(repo)));
        self.schema.execute(request).await
    }
}

/// The current request's repository.
pub(super) fn get_repo<'c>(
    ctx: &'c Context<'_>,
) -> async_graphql::Result<MutexGuard<'c, PantryRepository>> {
    let repo = ctx.data::<RequestRepository>()?;
    repo.0
        .lock()
        .map_err(|_| async_graphql::Error::new("Repository lock poisoned"))
}

fn parse_lookup(id: Option<ID>, name: Option<String>) -> async_graphql::Result<Lookup> {
    validation::lookup(id.as_deref().map(String::as_str), name.as_deref()).extend()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Categories by id, by name, or all of them
    async fn category(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        name: Option<String>,
    ) -> async_graphql::Result<Vec<CategoryType>> {
        let lookup = parse_lookup(id, name)?;
        let repo = get_repo(ctx)?;
        let categories = repo.filter_categories(&lookup).extend()?;
        Ok(categories.into_iter().map(Into::into).collect())
    }

    /// Ingredients by id, by name, or all of them
    async fn ingredient(
        &self,
        ctx: &Context<'_>,
        id: Option<ID>,
        name: Option<String>,
    ) -> async_graphql::Result<Vec<IngredientType>> {
        let lookup = parse_lookup(id, name)?;
        let repo = get_repo(ctx)?;

        if lookup == Lookup::All {
            let rows = repo.all_ingredients_with_category().extend()?;
            return Ok(rows
                .into_iter()
                .map(|(ingredient, category)| IngredientType::with_category(ingredient, category))
                .collect());
        }

        let ingredients = repo.filter_ingredients(&lookup).extend()?;
        Ok(ingredients.into_iter().map(Into::into).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a new category
    async fn create_category(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<CreateCategoryPayload> {
        let repo = get_repo(ctx)?;
        let category = repo.insert_category(&name).extend()?;
        Ok(CreateCategoryPayload {
            category: Some(category.into()),
        })
    }

    /// Rename an existing category
    async fn update_category(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
    ) -> async_graphql::Result<UpdateCategoryPayload> {
        let id = validation::parse_id(&id).extend()?;
        let repo = get_repo(ctx)?;
        let mut category = repo.get_category(id).extend()?;
        category.rename(name);
        repo.save_category(&category).extend()?;
        Ok(UpdateCategoryPayload {
            category: Some(category.into()),
        })
    }

    /// Delete a category together with its ingredients
    async fn delete_category(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<DeleteCategoryPayload> {
        let id = validation::parse_id(&id).extend()?;
        get_repo(ctx)?.delete_category(id).extend()?;
        Ok(DeleteCategoryPayload { category: None })
    }

    /// Create an ingredient inside an existing category
    async fn create_ingredients(
        &self,
        ctx: &Context<'_>,
        name: String,
        notes: String,
        category_id: i64,
    ) -> async_graphql::Result<CreateIngredientsPayload> {
        let repo = get_repo(ctx)?;
        let category = repo.get_category(category_id).extend()?;
        let ingredient = repo
            .insert_ingredient(&name, Some(&notes), &category)
            .extend()?;
        Ok(CreateIngredientsPayload {
            ingredients: Some(IngredientType::with_category(ingredient, category)),
        })
    }

    /// Overwrite an ingredient's name and notes
    async fn update_ingredients(
        &self,
        ctx: &Context<'_>,
        id: ID,
        name: String,
        notes: Option<String>,
    ) -> async_graphql::Result<UpdateIngredientsPayload> {
        let id = validation::parse_id(&id).extend()?;
        let repo = get_repo(ctx)?;
        let mut ingredient = repo.get_ingredient(id).extend()?;
        ingredient.overwrite(name, notes);
        repo.save_ingredient(&ingredient).extend()?;
        Ok(UpdateIngredientsPayload {
            ingredient: Some(ingredient.into()),
        })
    }

    /// Delete an ingredient
    async fn delete_ingredients(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<DeleteIngredientsPayload> {
        let id = validation::parse_id(&id).extend()?;
        get_repo(ctx)?.delete_ingredient(id).extend()?;
        Ok(DeleteIngredientsPayload { ingredient: None })
    }
}
