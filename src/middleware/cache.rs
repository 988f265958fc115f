use axum::{
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

const STATIC_CACHE: &str = "public, max-age=31536000, immutable";
const PAGE_CACHE: &str = "no-store, no-cache, must-revalidate";

/// Embedded assets are cached for a year, pages never are since they depend
/// on the session.
pub async fn cache_control_middleware(req: Request, next: Next) -> Response {
    let is_static = req.uri().path().starts_with("/static/");
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    if is_static {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(STATIC_CACHE));
    } else {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(PAGE_CACHE));
        headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    }

    response
}
