//! Recipe store: the `recipe` collection.

use cookshare_db::table::Recipe as RecipeTable;
use sea_query::{Expr, ExprTrait, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Json};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ingredients: Json<Vec<String>>,
    pub method: Json<Vec<String>>,
    pub source_url: String,
    /// Username of the author. Not enforced against the user collection.
    pub added_by: String,
    pub created_at: i64,
}

pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub method: Vec<String>,
    pub source_url: String,
    pub added_by: String,
}

fn select() -> SelectStatement {
    Query::select()
        .columns([
            RecipeTable::Id,
            RecipeTable::Name,
            RecipeTable::Description,
            RecipeTable::Ingredients,
            RecipeTable::Method,
            RecipeTable::SourceUrl,
            RecipeTable::AddedBy,
            RecipeTable::CreatedAt,
        ])
        .from(RecipeTable::Table)
        .to_owned()
}

pub async fn insert_recipe(
    pool: &SqlitePool,
    recipe: NewRecipe,
) -> cookshare_shared::Result<String> {
    let id = ulid::Ulid::new().to_string();
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let ingredients = serde_json::to_string(&recipe.ingredients)?;
    let method = serde_json::to_string(&recipe.method)?;

    let statement = Query::insert()
        .into_table(RecipeTable::Table)
        .columns([
            RecipeTable::Id,
            RecipeTable::Name,
            RecipeTable::Description,
            RecipeTable::Ingredients,
            RecipeTable::Method,
            RecipeTable::SourceUrl,
            RecipeTable::AddedBy,
            RecipeTable::CreatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            recipe.name.into(),
            recipe.description.into(),
            ingredients.into(),
            method.into(),
            recipe.source_url.into(),
            recipe.added_by.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(id)
}

pub async fn find_recipe(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> Result<Option<Recipe>, sqlx::Error> {
    let statement = select()
        .and_where(Expr::col(RecipeTable::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, Recipe, _>(&sql, values)
        .fetch_optional(pool)
        .await
}

/// Every recipe in insertion order.
pub async fn list_recipes(pool: &SqlitePool) -> Result<Vec<Recipe>, sqlx::Error> {
    let statement = select()
        .order_by_expr(Expr::cust("rowid"), Order::Asc)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, Recipe, _>(&sql, values)
        .fetch_all(pool)
        .await
}
