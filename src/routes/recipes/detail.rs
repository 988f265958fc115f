use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use cookshare_recipe::Recipe;

use crate::{
    routes::AppState,
    template::{Layout, Template},
};

#[derive(askama::Template)]
#[template(path = "recipe_detail.html")]
pub struct RecipeDetailTemplate {
    pub layout: Layout,
    pub recipe: Recipe,
}

pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let recipe = crate::try_page_response!(
        opt: app.recipe_query.find(id),
        template,
        "Recipe not found"
    );

    template.render(RecipeDetailTemplate {
        layout: template.layout(),
        recipe,
    })
}
