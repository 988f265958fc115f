use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{CookieJar, Form};
use cookshare_recipe::CreateInput;
use serde::Deserialize;

use crate::{
    flash,
    routes::AppState,
    session::AuthUser,
    template::{Layout, Template},
};

#[derive(askama::Template)]
#[template(path = "add_recipe.html")]
pub struct AddRecipeTemplate {
    pub layout: Layout,
    pub error_message: Option<String>,
    pub form: ActionInput,
}

pub async fn page(template: Template, AuthUser(_): AuthUser) -> impl IntoResponse {
    template.render(AddRecipeTemplate {
        layout: template.layout(),
        error_message: None,
        form: ActionInput::default(),
    })
}

/// Form fields of the add recipe page. `ingredients` and `method` are
/// repeated fields, one per line of the recipe.
#[derive(Deserialize, Default, Clone)]
pub struct ActionInput {
    #[serde(default)]
    pub recipe_name: String,
    #[serde(default)]
    pub recipe_description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub method: Vec<String>,
    #[serde(default)]
    pub recipe_url: String,
}

pub async fn action(
    template: Template,
    AuthUser(username): AuthUser,
    jar: CookieJar,
    State(app): State<AppState>,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let result = app
        .recipe_command
        .create(
            CreateInput {
                name: input.recipe_name.to_owned(),
                description: input.recipe_description.to_owned(),
                ingredients: input.ingredients.to_owned(),
                method: input.method.to_owned(),
                source_url: input.recipe_url.to_owned(),
            },
            username,
        )
        .await;

    match result {
        Ok(_) => {
            let jar = flash::push(jar, "Recipe Successfully Added");

            (jar, Redirect::to("/")).into_response()
        }
        Err(err) if err.is_user_error() => template.render_with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            AddRecipeTemplate {
                layout: template.layout(),
                error_message: Some(err.to_string()),
                form: input,
            },
        ),
        Err(err) => {
            tracing::error!(err = %err, "failed to add recipe");

            template.server_error()
        }
    }
}
