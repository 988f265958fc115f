use axum::response::Response;

cfg_if::cfg_if! {
    if #[cfg(not(debug_assertions))] {
        use axum::{body::{Body, to_bytes}, http::header};
        use std::sync::LazyLock;

        static MINIFY_CFG: LazyLock<minify_html::Cfg> = LazyLock::new(|| minify_html::Cfg {
            keep_closing_tags: true,
            keep_html_and_head_opening_tags: true,
            minify_css: true,
            ..Default::default()
        });

        fn is_html(response: &Response) -> bool {
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.starts_with("text/html"))
        }
    }
}

/// Minifies rendered pages in release builds.
pub async fn minify_html_middleware(response: Response) -> Response {
    cfg_if::cfg_if! {
        if #[cfg(not(debug_assertions))] {
            if is_html(&response) {
                let (parts, body) = response.into_parts();
                let Ok(bytes) = to_bytes(body, usize::MAX).await else {
                    return Response::from_parts(parts, Body::empty());
                };
                let minified = minify_html::minify(&bytes, &MINIFY_CFG);

                return Response::from_parts(parts, Body::from(minified));
            }
        }
    }

    response
}
