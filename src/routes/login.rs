use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::CookieJar;
use cookshare_shared::Error;
use cookshare_user::LoginInput;
use serde::Deserialize;

use crate::{
    flash,
    routes::AppState,
    session::Session,
    template::{Layout, Template},
};

#[derive(askama::Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub error_message: Option<String>,
    pub username: String,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(LoginTemplate {
        layout: template.layout(),
        error_message: None,
        username: String::new(),
    })
}

#[derive(Deserialize)]
pub struct ActionInput {
    pub username: String,
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
        .login(LoginInput {
            username: input.username.to_owned(),
            password: input.password,
        })
        .await;

    let username = match result {
        Ok(username) => username,
        Err(Error::Credentials) => {
            tracing::warn!(username = input.username, "login failed");

            return template.render_with_status(
                StatusCode::UNAUTHORIZED,
                LoginTemplate {
                    layout: template.layout(),
                    error_message: Some(Error::Credentials.to_string()),
                    username: input.username,
                },
            );
        }
        Err(err) => {
            tracing::error!(err = %err, "login failed");

            return template.server_error();
        }
    };

    let session = match session.set(username.to_owned()) {
        Ok(session) => session,
        Err(err) => {
            tracing::error!(err = %err, "failed to open session");

            return template.server_error();
        }
    };

    tracing::info!(username, "user logged in");

    let jar = flash::push(jar, format!("Welcome, {}", input.username));

    (session, jar, Redirect::to("/")).into_response()
}

/// Always ends anonymous, whatever the session held.
pub async fn logout(session: Session, jar: CookieJar) -> impl IntoResponse {
    if let Some(username) = session.get() {
        tracing::info!(username, "user logged out");
    }

    let jar = flash::push(jar, "You are now logged out");

    (session.clear(), jar, Redirect::to("/login"))
}
