use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use cookshare_user::RegisterInput;
use serde::Deserialize;

use crate::{
    flash,
    routes::AppState,
    session::Session,
    template::{Layout, Template},
};

#[derive(askama::Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub layout: Layout,
    pub error_message: Option<String>,
    pub username: String,
    pub email: String,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(RegisterTemplate {
        layout: template.layout(),
        error_message: None,
        username: String::new(),
        email: String::new(),
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn action(
    template: Template,
    session: Session,
    jar: CookieJar,
    State(app): State<AppState>,
    Form(input): Form<ActionInput>,
) -> impl IntoResponse {
    let result = app
        .user_command
        .register(RegisterInput {
            username: input.username.to_owned(),
            email: input.email.to_owned(),
            password: input.password,
        })
        .await;

    match result {
        Ok(username) => {
            let session = match session.set(username) {
                Ok(session) => session,
                Err(err) => {
                    tracing::error!(err = %err, "failed to open session");

                    return template.server_error();
                }
            };

            let jar = flash::push(jar, "Registration Successful!");

            (session, jar, Redirect::to("/")).into_response()
        }
        Err(err) if err.is_user_error() => {
            tracing::info!(username = input.username, err = %err, "registration rejected");

            template.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                RegisterTemplate {
                    layout: template.layout(),
                    error_message: Some(err.to_string()),
                    username: input.username,
                    email: input.email,
                },
            )
        }
        Err(err) => {
            tracing::error!(err = %err, "registration failed");

            template.server_error()
        }
    }
}
