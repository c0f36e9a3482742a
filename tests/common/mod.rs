//! Shared fixtures: throwaway databases, a scoped clock override and an
//! in-process HTTP client.
#![allow(dead_code)]

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fast_zero::{
    app::build_app,
    config::AppConfig,
    db::{self, IN_MEMORY_URL},
    state::AppState,
    Clock, Schema, Session,
};
use sqlx::SqlitePool;
use time::{macros::datetime, OffsetDateTime, PrimitiveDateTime};
use tower::util::ServiceExt;

pub const MOCK_TIME: PrimitiveDateTime = datetime!(2024-01-01 0:00);

/// In-memory database with the application schema created.
///
/// The database lives exactly as long as `pool`; nothing survives the test.
pub struct TestDb {
    pub pool: SqlitePool,
    pub schema: Schema,
}

impl TestDb {
    pub async fn new() -> Self {
        let pool = db::connect(IN_MEMORY_URL)
            .await
            .expect("Failed to open in-memory database");
        let schema = fast_zero::schema();
        schema
            .create_all(&pool)
            .await
            .expect("Failed to create schema");
        Self { pool, schema }
    }

    pub fn session(&self) -> Session {
        Session::new(self.pool.clone())
    }

    pub async fn table_names(&self) -> Vec<String> {
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .expect("Failed to list tables")
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count users")
    }

    pub async fn teardown(self) {
        self.schema
            .drop_all(&self.pool)
            .await
            .expect("Failed to drop schema");
        self.pool.close().await;
    }
}

/// Session whose inserts are stamped with a fixed time until dropped.
pub struct MockedTime<'s> {
    session: &'s mut Session,
    previous: Clock,
    time: PrimitiveDateTime,
}

impl MockedTime<'_> {
    pub fn time(&self) -> PrimitiveDateTime {
        self.time
    }
}

impl Deref for MockedTime<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for MockedTime<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for MockedTime<'_> {
    fn drop(&mut self) {
        self.session.replace_clock(self.previous);
    }
}

pub fn mock_db_time(session: &mut Session, time: PrimitiveDateTime) -> MockedTime<'_> {
    let previous = session.replace_clock(Clock::Fixed(time));
    MockedTime {
        session,
        previous,
        time,
    }
}

pub fn utc_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Router over its own in-memory database, driven without a socket.
pub struct TestApp {
    pub router: Router,
    pub db: TestDb,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_clock(Clock::Database).await
    }

    pub async fn with_clock(clock: Clock) -> Self {
        let db = TestDb::new().await;
        let state = AppState::from_parts(db.pool.clone(), Arc::new(AppConfig::in_memory()), clock);
        Self {
            router: build_app(state),
            db,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        (status, body.to_vec())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request");
        self.send(request).await
    }
}
