use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;

use crate::{flash::FlashMessages, routes::AppState, session::Session};

/// Values every page shares through `base.html`.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub current_user: Option<String>,
    pub messages: Vec<String>,
}

pub struct Template {
    layout: Layout,
}

impl Template {
    pub fn layout(&self) -> Layout {
        self.layout.clone()
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match template.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!(err = %err, "failed to render template");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template. Error: {err}"),
                )
                    .into_response()
            }
        }
    }

    pub fn render_with_status<T: askama::Template>(
        &self,
        status: StatusCode,
        template: T,
    ) -> Response {
        let mut response = self.render(template);
        if response.status().is_success() {
            *response.status_mut() = status;
        }

        response
    }

    pub fn not_found(&self, message: impl Into<String>) -> Response {
        self.render_with_status(
            StatusCode::NOT_FOUND,
            NotFoundTemplate {
                layout: self.layout(),
                message: message.into(),
            },
        )
    }

    pub fn server_error(&self) -> Response {
        self.render_with_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            ServerTemplate {
                layout: self.layout(),
            },
        )
    }
}

impl FromRequestParts<AppState> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await;
        let messages = parts
            .extensions
            .get::<FlashMessages>()
            .map(|flash| flash.0.clone())
            .unwrap_or_default();

        Ok(Template {
            layout: Layout {
                current_user: session.get().map(str::to_owned),
                messages,
            },
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
    pub message: String,
}

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate {
    pub layout: Layout,
}

#[macro_export]
macro_rules! try_page_response {
    ($result:expr, $template:expr) => {
        match $result.await {
            Ok(r) => r,
            Err(err) => {
                tracing::error!("{err}");

                return $template.server_error();
            }
        }
    };

    (opt: $result:expr, $template:expr, $not_found:expr) => {
        match $result.await {
            Ok(Some(r)) => r,
            Ok(_) => return $template.not_found($not_found),
            Err(err) => {
                tracing::error!("{err}");

                return $template.server_error();
            }
        }
    };
}
