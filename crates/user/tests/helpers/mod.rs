use std::{path::PathBuf, str::FromStr};

use cookshare_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<cookshare_shared::State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_string_lossy()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    cookshare_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(cookshare_shared::State::single(pool))
}

#[allow(dead_code)]
pub async fn create_user(
    cmd: &cookshare_user::Command,
    name: impl Into<String>,
) -> anyhow::Result<String> {
    let name = name.into();
    let username = cmd
        .register(RegisterInput {
            email: format!("{}@cookshare.localhost", name.to_lowercase()),
            username: name,
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(username)
}
