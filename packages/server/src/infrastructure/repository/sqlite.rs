//! SQLite Todo Repository.
//!
//! rusqlite is synchronous: the connection lives behind a mutex and every
//! statement runs on `spawn_blocking`.

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::domain::{
    DueDate, NewTodo, RepositoryError, Todo, TodoId, TodoRepository, TodoStatus, TodoTitle,
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    status      TEXT NOT NULL DEFAULT 'pending',
    due_date    TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_todos_status ON todos (status);
";

const SELECT_COLUMNS: &str =
    "SELECT id, title, description, status, due_date, created_at, updated_at FROM todos";

fn storage_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Storage(err.to_string())
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(storage_error)
}

/// Column values as stored, before domain validation.
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    status: String,
    due_date: String,
    created_at: String,
    updated_at: String,
}

impl TodoRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            status: row.get(3)?,
            due_date: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }

    fn into_todo(self) -> Result<Todo, RepositoryError> {
        Ok(Todo {
            id: TodoId::new(self.id),
            title: TodoTitle::new(self.title).map_err(storage_error)?,
            description: self.description,
            status: TodoStatus::new(self.status).map_err(storage_error)?,
            due_date: DueDate::parse(&self.due_date).map_err(storage_error)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

fn select_by_id(conn: &Connection, id: TodoId) -> Result<Todo, RepositoryError> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE id = ?1"),
        params![id.value()],
        TodoRow::from_row,
    )
    .optional()
    .map_err(storage_error)?
    .ok_or(RepositoryError::NotFound(id))?
    .into_todo()
}

/// SQLite implementation of `TodoRepository`.
pub struct SqliteTodoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTodoRepository {
    /// Open (or create) the database file, enable WAL and create the table.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(storage_error)?;
        }
        let conn = Connection::open(path).map_err(storage_error)?;
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(storage_error)?;
        tracing::info!(path = %path.display(), journal_mode = %mode, "SQLite database opened");
        Self::init(conn)
    }

    /// Private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self, RepositoryError> {
        Self::init(Connection::open_in_memory().map_err(storage_error)?)
    }

    fn init(conn: Connection) -> Result<Self, RepositoryError> {
        conn.execute_batch(SCHEMA).map_err(storage_error)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, RepositoryError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, RepositoryError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await
        .map_err(storage_error)?
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn create(&self, new_todo: NewTodo) -> Result<Todo, RepositoryError> {
        self.with_conn(move |conn| {
            let now = Utc::now().trunc_subsecs(6);
            conn.execute(
                "INSERT INTO todos (title, description, status, due_date, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    new_todo.title.as_str(),
                    new_todo.description,
                    new_todo.status.as_str(),
                    new_todo.due_date.to_string(),
                    format_timestamp(&now),
                ],
            )
            .map_err(storage_error)?;
            let id = TodoId::new(conn.last_insert_rowid());
            Ok(new_todo.into_todo(id, now))
        })
        .await
    }

    async fn list(&self, status: Option<&TodoStatus>) -> Result<Vec<Todo>, RepositoryError> {
        let status = status.map(|s| s.as_str().to_string());
        self.with_conn(move |conn| {
            let rows = match status {
                Some(status) => {
                    let mut stmt = conn
                        .prepare(&format!(
                            "{SELECT_COLUMNS} WHERE status = ?1 ORDER BY created_at DESC, id DESC"
                        ))
                        .map_err(storage_error)?;
                    stmt.query_map(params![status], TodoRow::from_row)
                        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
                        .map_err(storage_error)?
                }
                None => {
                    let mut stmt = conn
                        .prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"))
                        .map_err(storage_error)?;
                    stmt.query_map([], TodoRow::from_row)
                        .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
                        .map_err(storage_error)?
                }
            };
            rows.into_iter().map(TodoRow::into_todo).collect()
        })
        .await
    }

    async fn get(&self, id: TodoId) -> Result<Todo, RepositoryError> {
        self.with_conn(move |conn| select_by_id(conn, id)).await
    }

    async fn update_status(
        &self,
        id: TodoId,
        status: TodoStatus,
    ) -> Result<Todo, RepositoryError> {
        self.with_conn(move |conn| {
            let now = Utc::now().trunc_subsecs(6);
            let changed = conn
                .execute(
                    "UPDATE todos SET status = ?1, updated_at = ?2 WHERE id = ?3",
                    params![status.as_str(), format_timestamp(&now), id.value()],
                )
                .map_err(storage_error)?;
            if changed == 0 {
                return Err(RepositoryError::NotFound(id));
            }
            select_by_id(conn, id)
        })
        .await
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        self.with_conn(move |conn| {
            let changed = conn
                .execute("DELETE FROM todos WHERE id = ?1", params![id.value()])
                .map_err(storage_error)?;
            if changed == 0 {
                return Err(RepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}
