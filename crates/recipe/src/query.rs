use std::ops::Deref;

use crate::repository::{self, Recipe};

#[derive(Clone)]
pub struct Query(pub cookshare_shared::State);

impl Deref for Query {
    type Target = cookshare_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Query {
    /// `id` is opaque: anything that is not a stored id resolves to `None`.
    pub async fn find(&self, id: impl Into<String>) -> cookshare_shared::Result<Option<Recipe>> {
        Ok(repository::find_recipe(&self.read_db, id).await?)
    }

    pub async fn all(&self) -> cookshare_shared::Result<Vec<Recipe>> {
        Ok(repository::list_recipes(&self.read_db).await?)
    }
}
