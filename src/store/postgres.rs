//! PostgreSQL-backed resource store and its startup DDL.

use super::ResourceStore;
use crate::error::StoreError;
use crate::model::{NewResource, Resource, ResourceFilter, ResourcePatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use uuid::Uuid;

pub const RESOURCES_TABLE: &str = "resources";

const COLUMNS: &str = r#"id, owner, "type", details, amount, created_at, updated_at"#;

#[derive(sqlx::FromRow)]
struct ResourceRow {
    id: Uuid,
    owner: String,
    #[sqlx(rename = "type")]
    kind: String,
    details: String,
    amount: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Resource {
            id: row.id,
            owner: row.owner,
            kind: row.kind,
            details: row.details,
            amount: row.amount,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgResourceStore {
    pool: PgPool,
}

impl PgResourceStore {
    pub fn new(pool: PgPool) -> Self {
        PgResourceStore { pool }
    }
}

#[async_trait]
impl ResourceStore for PgResourceStore {
    async fn insert(&self, new: NewResource) -> Result<Resource, StoreError> {
        new.check()?;
        let sql = format!(
            r#"INSERT INTO {} (owner, "type", details, amount) VALUES ($1, $2, $3, $4) RETURNING {}"#,
            RESOURCES_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, "insert resource");
        let row: ResourceRow = sqlx::query_as(&sql)
            .bind(&new.owner)
            .bind(&new.kind)
            .bind(&new.details)
            .bind(new.amount)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find(&self, filter: &ResourceFilter) -> Result<Vec<Resource>, StoreError> {
        let sql = format!(
            r#"SELECT {} FROM {} WHERE ($1::text IS NULL OR owner = $1) AND ($2::text IS NULL OR "type" = $2) ORDER BY created_at, id"#,
            COLUMNS, RESOURCES_TABLE
        );
        tracing::debug!(sql = %sql, filter = ?filter, "find resources");
        let rows: Vec<ResourceRow> = sqlx::query_as(&sql)
            .bind(filter.owner.as_deref())
            .bind(filter.kind.as_deref())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Resource::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, StoreError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", COLUMNS, RESOURCES_TABLE);
        tracing::debug!(sql = %sql, %id, "find resource");
        let row: Option<ResourceRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Resource::from))
    }

    async fn update_by_id(&self, id: Uuid, patch: ResourcePatch) -> Result<Option<Resource>, StoreError> {
        patch.check()?;
        let sql = format!(
            r#"UPDATE {} SET owner = COALESCE($2, owner), "type" = COALESCE($3, "type"), details = COALESCE($4, details), amount = COALESCE($5, amount), updated_at = NOW() WHERE id = $1 RETURNING {}"#,
            RESOURCES_TABLE, COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "update resource");
        let row: Option<ResourceRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(patch.owner)
            .bind(patch.kind)
            .bind(patch.details)
            .bind(patch.amount)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Resource::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Resource>, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING {}", RESOURCES_TABLE, COLUMNS);
        tracing::debug!(sql = %sql, %id, "delete resource");
        let row: Option<ResourceRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Resource::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the resources table and its filter index if they do not exist.
pub async fn ensure_resources_table(pool: &PgPool) -> Result<(), StoreError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            owner TEXT NOT NULL CHECK (owner <> ''),
            "type" TEXT NOT NULL CHECK ("type" <> ''),
            details TEXT NOT NULL CHECK (details <> ''),
            amount BIGINT NOT NULL CHECK (amount >= 1),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        RESOURCES_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    let index = format!(
        r#"CREATE INDEX IF NOT EXISTS {0}_owner_type_idx ON {0} (owner, "type")"#,
        RESOURCES_TABLE
    );
    sqlx::query(&index).execute(pool).await?;
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` admin database plus the target database name.
/// `None` when the URL names no database or names `postgres` itself.
/// Host, credentials and TLS settings carry over from the URL.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
