use anyhow::{anyhow, Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::domain::{NcoId, SignoutRecord, SignoutStatus};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

/// Row tallies per sign-out status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub out: i64,
    pub signed_in: i64,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        let storage = Self { pool };
        storage.ensure_signouts_table().await?;
        Ok(storage)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_signouts_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS signouts (
                id                 INTEGER PRIMARY KEY AUTOINCREMENT,
                signout_id         TEXT NOT NULL,
                soldier_rank       TEXT NOT NULL,
                soldier_first_name TEXT NOT NULL,
                soldier_last_name  TEXT NOT NULL,
                soldier_dod_id     TEXT NOT NULL,
                location           TEXT NOT NULL,
                sign_out_time      TEXT NOT NULL,
                sign_in_time       TEXT,
                signed_out_by_id   INTEGER NOT NULL,
                signed_out_by_name TEXT NOT NULL,
                signed_in_by_id    INTEGER,
                signed_in_by_name  TEXT,
                status             TEXT NOT NULL,
                notes              TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure signouts table exists")?;
        Ok(())
    }

    pub async fn insert_signout(&self, record: &SignoutRecord) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO signouts (signout_id, soldier_rank, soldier_first_name, soldier_last_name, soldier_dod_id, location, sign_out_time, sign_in_time, signed_out_by_id, signed_out_by_name, signed_in_by_id, signed_in_by_name, status, notes) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&record.signout_id)
        .bind(&record.soldier_rank)
        .bind(&record.soldier_first_name)
        .bind(&record.soldier_last_name)
        .bind(&record.soldier_dod_id)
        .bind(&record.location)
        .bind(record.sign_out_time)
        .bind(record.sign_in_time)
        .bind(record.signed_out_by_id.0)
        .bind(&record.signed_out_by_name)
        .bind(record.signed_in_by_id.map(|id| id.0))
        .bind(record.signed_in_by_name.as_deref())
        .bind(record.status.as_str())
        .bind(&record.notes)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert signout row")?;
        Ok(row.get::<i64, _>(0))
    }

    /// Newest sign-outs first; row id breaks ties within a group.
    pub async fn list_signouts(&self) -> Result<Vec<SignoutRecord>> {
        let rows = sqlx::query(
            "SELECT signout_id, soldier_rank, soldier_first_name, soldier_last_name, soldier_dod_id, location, sign_out_time, sign_in_time, signed_out_by_id, signed_out_by_name, signed_in_by_id, signed_in_by_name, status, notes
             FROM signouts ORDER BY sign_out_time DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(signout_from_row).collect()
    }

    pub async fn list_group(&self, signout_id: &str) -> Result<Vec<SignoutRecord>> {
        let rows = sqlx::query(
            "SELECT signout_id, soldier_rank, soldier_first_name, soldier_last_name, soldier_dod_id, location, sign_out_time, sign_in_time, signed_out_by_id, signed_out_by_name, signed_in_by_id, signed_in_by_name, status, notes
             FROM signouts WHERE signout_id = ? ORDER BY id ASC",
        )
        .bind(signout_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(signout_from_row).collect()
    }

    /// Everyone still checked out, oldest departure first.
    pub async fn open_signouts(&self) -> Result<Vec<SignoutRecord>> {
        let rows = sqlx::query(
            "SELECT signout_id, soldier_rank, soldier_first_name, soldier_last_name, soldier_dod_id, location, sign_out_time, sign_in_time, signed_out_by_id, signed_out_by_name, signed_in_by_id, signed_in_by_name, status, notes
             FROM signouts WHERE status = 'OUT' ORDER BY sign_out_time ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(signout_from_row).collect()
    }

    pub async fn status_counts(&self) -> Result<StatusCounts> {
        let rows = sqlx::query("SELECT status, COUNT(*) FROM signouts GROUP BY status")
            .fetch_all(&self.pool)
            .await?;
        let mut counts = StatusCounts::default();
        for row in rows {
            let status = row.get::<String, _>(0);
            let count = row.get::<i64, _>(1);
            match SignoutStatus::parse(&status) {
                Some(SignoutStatus::Out) => counts.out = count,
                Some(SignoutStatus::In) => counts.signed_in = count,
                None => return Err(anyhow!("unknown signout status '{status}' in table")),
            }
        }
        Ok(counts)
    }
}

fn signout_from_row(row: SqliteRow) -> Result<SignoutRecord> {
    let status = row.get::<String, _>(12);
    let status = SignoutStatus::parse(&status)
        .ok_or_else(|| anyhow!("unknown signout status '{status}'"))?;
    Ok(SignoutRecord {
        signout_id: row.get::<String, _>(0),
        soldier_rank: row.get::<String, _>(1),
        soldier_first_name: row.get::<String, _>(2),
        soldier_last_name: row.get::<String, _>(3),
        soldier_dod_id: row.get::<String, _>(4),
        location: row.get::<String, _>(5),
        sign_out_time: row.get(6),
        sign_in_time: row.get(7),
        signed_out_by_id: NcoId(row.get::<i64, _>(8)),
        signed_out_by_name: row.get::<String, _>(9),
        signed_in_by_id: row.get::<Option<i64>, _>(10).map(NcoId),
        signed_in_by_name: row.get::<Option<String>, _>(11),
        status,
        notes: row.get::<String, _>(13),
    })
}

/// Accepts either a sqlite URL or a bare filesystem path.
pub fn normalize_database_url(raw: &str) -> String {
    if raw.starts_with("sqlite:") {
        raw.to_string()
    } else {
        format!("sqlite://{raw}")
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
