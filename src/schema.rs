//! Table metadata and schema lifecycle.
//!
//! A [`Schema`] is an ordinary value: build it, register the tables that
//! should exist, then create or drop them against a pool.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    Timestamp,
}

impl ColumnType {
    fn sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "VARCHAR",
            ColumnType::Timestamp => "DATETIME",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub unique: bool,
    pub nullable: bool,
    /// SQL expression evaluated by the database when no value is given.
    pub server_default: Option<&'static str>,
}

impl Column {
    pub fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            primary_key: false,
            unique: false,
            nullable: false,
            server_default: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn server_default(mut self, expr: &'static str) -> Self {
        self.server_default = Some(expr);
        self
    }

    fn ddl(&self) -> String {
        let mut out = format!("{} {}", self.name, self.ty.sql());
        if !self.nullable {
            out.push_str(" NOT NULL");
        }
        // INTEGER PRIMARY KEY aliases the rowid, so ids are assigned on insert
        if self.primary_key {
            out.push_str(" PRIMARY KEY");
        }
        if self.unique {
            out.push_str(" UNIQUE");
        }
        if let Some(expr) = self.server_default {
            out.push_str(&format!(" DEFAULT ({expr})"));
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: &'static str, columns: Vec<Column>) -> Self {
        Self { name, columns }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn create_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(Column::ddl)
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({})", self.name, columns)
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {}", self.name)
    }
}

/// Registry of table definitions.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Creates every registered table that does not exist yet.
    pub async fn create_all(&self, db: &SqlitePool) -> StoreResult<()> {
        for table in &self.tables {
            sqlx::query(&table.create_sql()).execute(db).await?;
            debug!(table = table.name, "table created");
        }
        Ok(())
    }

    /// Drops every registered table, last registered first.
    pub async fn drop_all(&self, db: &SqlitePool) -> StoreResult<()> {
        for table in self.tables.iter().rev() {
            sqlx::query(&table.drop_sql()).execute(db).await?;
            debug!(table = table.name, "table dropped");
        }
        Ok(())
    }
}
