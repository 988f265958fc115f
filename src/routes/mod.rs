use axum::{Router, middleware, response::IntoResponse, routing::get};
use sqlx::SqlitePool;

use crate::template::Template;

mod awareness;
mod gallery;
mod health;
mod index;
mod login;
mod recipes;
mod register;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub user_command: cookshare_user::Command,
    pub recipe_command: cookshare_recipe::Command,
    pub recipe_query: cookshare_recipe::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: cookshare_shared::State) -> Self {
        Self {
            config,
            user_command: cookshare_user::Command::new(state.clone()),
            recipe_command: cookshare_recipe::Command::new(state.clone()),
            recipe_query: cookshare_recipe::Query(state.clone()),
            pool: state.read_db,
        }
    }
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.not_found("Page not found")
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/", get(index::page))
        .route("/index", get(index::page))
        .route("/awareness", get(awareness::page))
        .route("/gallery", get(gallery::page))
        .route("/register", get(register::page).post(register::action))
        .route("/login", get(login::page).post(login::action))
        .route("/logout", get(login::logout))
        .route("/recipes", get(recipes::index::page))
        .route("/recipe_detail/{id}", get(recipes::detail::page))
        .route(
            "/add_recipe",
            get(recipes::create::page).post(recipes::create::action),
        )
        .fallback(fallback)
        .layer(middleware::from_fn(crate::flash::flash_middleware))
        .nest_service("/static", crate::assets::AssetsService::new())
        .with_state(app_state)
}
