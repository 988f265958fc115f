//! Credential store: the `user` collection.
//!
//! No uniqueness checks happen here, callers look up before inserting. The
//! unique indexes created by the migration are the last line and surface as
//! `sqlx::Error::Database` on insert.

use cookshare_db::table::User as UserTable;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

pub struct NewUser {
    username: String,
    email: String,
    password_hash: String,
}

impl NewUser {
    /// Username is case-normalized to lowercase, email is kept as submitted.
    pub fn new(
        username: impl AsRef<str>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.as_ref().to_lowercase(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

enum FindType {
    Username(String),
    Email(String),
}

async fn find(pool: &SqlitePool, find_type: FindType) -> Result<Option<User>, sqlx::Error> {
    let mut statement = Query::select()
        .columns([
            UserTable::Id,
            UserTable::Username,
            UserTable::Email,
            UserTable::PasswordHash,
        ])
        .from(UserTable::Table)
        .limit(1)
        .to_owned();

    match find_type {
        FindType::Username(username) => {
            statement.and_where(Expr::col(UserTable::Username).eq(username))
        }
        FindType::Email(email) => statement.and_where(Expr::col(UserTable::Email).eq(email)),
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_as_with::<_, User, _>(&sql, values)
        .fetch_optional(pool)
        .await
}

/// Expects an already lowercased username.
pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: impl Into<String>,
) -> Result<Option<User>, sqlx::Error> {
    find(pool, FindType::Username(username.into())).await
}

pub async fn find_user_by_email(
    pool: &SqlitePool,
    email: impl Into<String>,
) -> Result<Option<User>, sqlx::Error> {
    find(pool, FindType::Email(email.into())).await
}

pub async fn insert_user(pool: &SqlitePool, user: NewUser) -> Result<String, sqlx::Error> {
    let id = ulid::Ulid::new().to_string();
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(UserTable::Table)
        .columns([
            UserTable::Id,
            UserTable::Username,
            UserTable::Email,
            UserTable::PasswordHash,
            UserTable::CreatedAt,
        ])
        .values_panic([
            id.to_owned().into(),
            user.username.into(),
            user.email.into(),
            user.password_hash.into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(id)
}

/// Unique index of the `user` table an insert ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Username,
    Email,
}

/// SQLite reports the indexed column, e.g. `UNIQUE constraint failed: user.email`.
const USERNAME_COLUMN: &str = "user.username";
const EMAIL_COLUMN: &str = "user.email";

/// Which unique index rejected the write, `None` for any other error.
pub fn unique_violation(err: &sqlx::Error) -> Option<UniqueField> {
    if !cookshare_shared::is_unique_violation(err) {
        return None;
    }

    let message = err.as_database_error()?.message();

    if message.contains(EMAIL_COLUMN) {
        Some(UniqueField::Email)
    } else if message.contains(USERNAME_COLUMN) {
        Some(UniqueField::Username)
    } else {
        None
    }
}
