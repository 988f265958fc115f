#![allow(dead_code)]

use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use cookshare::config::{
    Config, DatabaseConfig, ObservabilityConfig, ServerConfig, SessionConfig,
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _dir: Option<TempDir>,
}

pub fn test_config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 5000,
        },
        database: DatabaseConfig {
            name: "cookshare".to_owned(),
            url,
            max_connections: 1,
        },
        session: SessionConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            lifetime_seconds: 3600,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub async fn create_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let config = test_config(dir.path().to_string_lossy().into_owned());

    let pool = cookshare::db::create_pool(&config.database.connection_url(), 1).await?;
    cookshare::db::migrate(&pool).await?;

    let state = cookshare::AppState::new(config, cookshare_shared::State::single(pool.clone()));

    Ok(TestApp {
        router: cookshare::routes::router(state),
        pool,
        _dir: Some(dir),
    })
}

/// Same wiring as `serve` on a `sqlite::memory:` database.
pub async fn create_memory_app() -> anyhow::Result<TestApp> {
    let config = test_config("sqlite::memory:".to_owned());
    let state = cookshare::db::open_state(&config.database.connection_url(), 5).await?;
    let pool = state.read_db.clone();

    Ok(TestApp {
        router: cookshare::routes::router(cookshare::AppState::new(config, state)),
        pool,
        _dir: None,
    })
}

impl TestApp {
    pub fn browser(&self) -> Browser {
        Browser {
            router: self.router.clone(),
            cookies: HashMap::new(),
        }
    }

    pub async fn count(&self, table: &str) -> anyhow::Result<i64> {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookies: Vec<String>,
    pub body: String,
}

/// Sends requests through the router and keeps cookies between them, the
/// way a browser would.
pub struct Browser {
    router: Router,
    cookies: HashMap<String, String>,
}

impl Browser {
    pub fn has_cookie(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub async fn get(&mut self, uri: &str) -> anyhow::Result<TestResponse> {
        let request = self
            .request("GET", uri)
            .body(Body::empty())?;

        self.send(request).await
    }

    pub async fn post_form(
        &mut self,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> anyhow::Result<TestResponse> {
        let request = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields)?))?;

        self.send(request).await
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<TestResponse> {
        self.post_form(
            "/register",
            &[("username", username), ("email", email), ("password", password)],
        )
        .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> anyhow::Result<TestResponse> {
        self.post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);

        if self.cookies.is_empty() {
            return builder;
        }

        let cookie = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");

        builder.header(header::COOKIE, cookie)
    }

    async fn send(&mut self, request: Request<Body>) -> anyhow::Result<TestResponse> {
        let response = self.router.clone().oneshot(request).await?;

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let set_cookies = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_owned)
            .collect::<Vec<_>>();

        for set_cookie in &set_cookies {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };

            if value.is_empty() || set_cookie.contains("Max-Age=0") {
                self.cookies.remove(name.trim());
            } else {
                self.cookies.insert(name.trim().to_owned(), value.to_owned());
            }
        }

        let bytes = response.into_body().collect().await?.to_bytes();

        Ok(TestResponse {
            status,
            location,
            set_cookies,
            body: String::from_utf8(bytes.to_vec())?,
        })
    }
}
