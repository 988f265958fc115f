use cookshare_recipe::CreateInput;
use temp_dir::TempDir;

mod helpers;

fn input(name: &str) -> CreateInput {
    CreateInput {
        name: name.to_owned(),
        description: "".to_owned(),
        ingredients: vec![],
        method: vec![],
        source_url: "".to_owned(),
    }
}

#[tokio::test]
async fn created_recipe_keeps_ordered_lists() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = cookshare_recipe::Command::new(state.clone());
    let query = cookshare_recipe::Query(state);

    let id = command
        .create(
            CreateInput {
                name: "Pancakes".to_owned(),
                description: "Sunday breakfast".to_owned(),
                ingredients: vec!["a".to_owned(), "b".to_owned()],
                method: vec!["step1".to_owned()],
                source_url: "https://example.com/pancakes".to_owned(),
            },
            "chef1",
        )
        .await?;

    let recipe = query.find(&id).await?.expect("recipe stored");

    assert_eq!(recipe.id, id);
    assert_eq!(recipe.name, "Pancakes");
    assert_eq!(recipe.description, "Sunday breakfast");
    assert_eq!(recipe.ingredients.0, vec!["a", "b"]);
    assert_eq!(recipe.method.0, vec!["step1"]);
    assert_eq!(recipe.source_url, "https://example.com/pancakes");
    assert_eq!(recipe.added_by, "chef1");

    Ok(())
}

#[tokio::test]
async fn unknown_ids_resolve_to_none() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let query = cookshare_recipe::Query(state);

    assert!(query.find("01JAAAAAAAAAAAAAAAAAAAAAAA").await?.is_none());
    assert!(query.find("not even an id").await?.is_none());

    Ok(())
}

#[tokio::test]
async fn all_lists_in_insertion_order() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = cookshare_recipe::Command::new(state.clone());
    let query = cookshare_recipe::Query(state);

    assert!(query.all().await?.is_empty());

    let soup = command.create(input("Soup"), "chef1").await?;
    let stew = command.create(input("Stew"), "chef2").await?;

    let ids = query
        .all()
        .await?
        .into_iter()
        .map(|r| r.id)
        .collect::<Vec<_>>();

    assert_eq!(ids, vec![soup, stew]);

    Ok(())
}

#[tokio::test]
async fn blank_name_is_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let command = cookshare_recipe::Command::new(state.clone());
    let query = cookshare_recipe::Query(state);

    let resp = command.create(input("   "), "chef1").await;

    assert!(matches!(
        resp.unwrap_err(),
        cookshare_shared::Error::Validate(_)
    ));
    assert!(query.all().await?.is_empty());

    Ok(())
}
