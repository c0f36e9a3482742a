//! Unit of work over a pool: buffer new rows, then commit them atomically.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::StoreResult;
use crate::users::{NewUser, User};

pub struct Session {
    db: SqlitePool,
    clock: Clock,
    pending: Vec<NewUser>,
}

impl Session {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            clock: Clock::Database,
            pending: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Swap the time source, returning the previous one.
    pub fn replace_clock(&mut self, clock: Clock) -> Clock {
        std::mem::replace(&mut self.clock, clock)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db
    }

    pub fn add(&mut self, user: NewUser) {
        self.pending.push(user);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn rollback(&mut self) {
        if !self.pending.is_empty() {
            debug!(discarded = self.pending.len(), "session rolled back");
        }
        self.pending.clear();
    }

    /// Insert everything added since the last commit in one transaction.
    ///
    /// Pending work is consumed either way. On error nothing is written and
    /// the driver error is returned as is.
    pub async fn commit(&mut self) -> StoreResult<Vec<User>> {
        let pending = std::mem::take(&mut self.pending);
        let created_at = self.clock.fixed_now();

        let mut tx = self.db.begin().await?;
        let mut persisted = Vec::with_capacity(pending.len());
        for new in &pending {
            match User::insert(&mut *tx, new, created_at).await {
                Ok(user) => persisted.push(user),
                Err(e) => {
                    warn!(error = %e, username = %new.username, "insert failed; rolling back");
                    // dropping `tx` rolls back
                    return Err(e);
                }
            }
        }
        tx.commit().await?;

        debug!(count = persisted.len(), "session committed");
        Ok(persisted)
    }

    pub async fn user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        User::find_by_username(&self.db, username).await
    }

    pub async fn user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        User::find_by_id(&self.db, id).await
    }

    pub async fn users(&self, limit: i64, offset: i64) -> StoreResult<Vec<User>> {
        User::list(&self.db, limit, offset).await
    }
}
