use axum::response::IntoResponse;

use crate::template::{Layout, Template};

#[derive(askama::Template)]
#[template(path = "awareness.html")]
pub struct AwarenessTemplate {
    pub layout: Layout,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(AwarenessTemplate {
        layout: template.layout(),
    })
}
