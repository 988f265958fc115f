use axum::response::IntoResponse;

use crate::template::{Layout, Template};

#[derive(askama::Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub layout: Layout,
}

pub async fn page(template: Template) -> impl IntoResponse {
    template.render(GalleryTemplate {
        layout: template.layout(),
    })
}
