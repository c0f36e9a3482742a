use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::schema::{Column, ColumnType, Table};

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                       // assigned on insert
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,              // stored as given
    pub email: String,
    pub created_at: PrimitiveDateTime, // set once, at insert
}

/// A user that has not been persisted yet.
///
/// `id` and `created_at` belong to the database and cannot be supplied here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }
}

impl User {
    pub const TABLE: &'static str = "users";

    /// Mapping of `User` onto the `users` table.
    pub fn table() -> Table {
        Table::new(
            Self::TABLE,
            vec![
                Column::new("id", ColumnType::Integer).primary_key(),
                Column::new("username", ColumnType::Text).unique(),
                Column::new("password", ColumnType::Text),
                Column::new("email", ColumnType::Text).unique(),
                Column::new("created_at", ColumnType::Timestamp)
                    .server_default("CURRENT_TIMESTAMP"),
            ],
        )
    }
}
