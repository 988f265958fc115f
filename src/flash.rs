//! One-shot messages shown on the next rendered page.
//!
//! Messages travel in the `flash` cookie as base64 encoded JSON. They survive
//! redirects and are dropped once a page has displayed them.

use axum::{
    extract::Request,
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

pub const FLASH_COOKIE_NAME: &str = "flash";

/// Messages received with the current request.
#[derive(Debug, Clone, Default)]
pub struct FlashMessages(pub Vec<String>);

fn encode(messages: &[String]) -> Option<String> {
    serde_json::to_vec(messages)
        .ok()
        .map(|json| URL_SAFE_NO_PAD.encode(json))
}

fn decode(value: &str) -> Vec<String> {
    URL_SAFE_NO_PAD
        .decode(value)
        .ok()
        .and_then(|json| serde_json::from_slice(&json).ok())
        .unwrap_or_default()
}

pub fn messages(jar: &CookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE_NAME)
        .map(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Queues `message` after the ones already pending in `jar`.
pub fn push(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let mut pending = messages(&jar);
    pending.push(message.into());

    let Some(value) = encode(&pending) else {
        return jar;
    };

    jar.add(
        Cookie::build((FLASH_COOKIE_NAME, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .build(),
    )
}

fn sets_flash(response: &Response) -> bool {
    let prefix = format!("{FLASH_COOKIE_NAME}=");

    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .any(|value| value.as_bytes().starts_with(prefix.as_bytes()))
}

pub async fn flash_middleware(mut req: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(req.headers());
    let received = messages(&jar);
    let had_cookie = jar.get(FLASH_COOKIE_NAME).is_some();

    req.extensions_mut().insert(FlashMessages(received));

    let response = next.run(req).await;

    if !had_cookie || response.status().is_redirection() || sets_flash(&response) {
        return response;
    }

    let jar = jar.remove(Cookie::build(FLASH_COOKIE_NAME).path("/").build());

    (jar, response).into_response()
}
