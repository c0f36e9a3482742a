//! User persistence over SQLite with an explicit schema registry, a
//! unit-of-work session and an injectable clock, served over axum.

pub mod app;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod schema;
pub mod session;
pub mod state;
pub mod users;

pub use clock::Clock;
pub use error::{StoreError, StoreResult};
pub use schema::Schema;
pub use session::Session;
pub use users::{NewUser, User};

/// Every table the application maps.
pub fn schema() -> Schema {
    Schema::new().register(User::table())
}
