use validator::Validate;

use crate::repository::{self, NewRecipe};

#[derive(Validate)]
pub struct CreateInput {
    #[validate(length(min = 1, max = 100, message = "Recipe name must be 1 to 100 characters"))]
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub method: Vec<String>,
    pub source_url: String,
}

fn without_blanks(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

impl super::Command {
    /// Stores a recipe authored by `added_by` and returns its id.
    pub async fn create(
        &self,
        mut input: CreateInput,
        added_by: impl Into<String>,
    ) -> cookshare_shared::Result<String> {
        input.name = input.name.trim().to_owned();
        input.validate()?;

        let added_by = added_by.into();
        let id = repository::insert_recipe(
            &self.write_db,
            NewRecipe {
                name: input.name,
                description: input.description,
                ingredients: without_blanks(input.ingredients),
                method: without_blanks(input.method),
                source_url: input.source_url.trim().to_owned(),
                added_by: added_by.to_owned(),
            },
        )
        .await?;

        tracing::info!(recipe = id, added_by, "recipe created");

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::without_blanks;

    #[test]
    fn blank_lines_are_dropped_and_order_kept() {
        let lines = vec![
            "2 eggs".to_owned(),
            "  ".to_owned(),
            " salt ".to_owned(),
            "".to_owned(),
        ];

        assert_eq!(without_blanks(lines), vec!["2 eggs", "salt"]);
    }
}
