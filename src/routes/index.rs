use axum::{extract::State, response::IntoResponse};
use cookshare_recipe::Recipe;

use crate::{routes::AppState, template::Layout, template::Template};

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub layout: Layout,
    pub recipes: Vec<Recipe>,
}

pub async fn page(template: Template, State(app): State<AppState>) -> impl IntoResponse {
    let recipes = crate::try_page_response!(app.recipe_query.all(), template);

    template.render(IndexTemplate {
        layout: template.layout(),
        recipes,
    })
}
