use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
mod repo;
mod repo_types;

pub use repo_types::{NewUser, User};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::user_routes())
}
