use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::{Backend, DatabaseConfig};
use crate::repository::{PostgresTodoRepository, SqliteTodoRepository, TodoRepository};

/// Opens the configured store, brings its schema up to date and hands back
/// the repository the service layer runs on.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn TodoRepository>> {
    match config.backend()? {
        Backend::Sqlite(db_file) => {
            if let Some(parent) = db_file.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            tracing::info!(path = %db_file.display(), "using sqlite store");

            let options = SqliteConnectOptions::new()
                .filename(&db_file)
                .create_if_missing(true)
                .foreign_keys(true);
            let pool = SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?;

            sqlx::migrate!("./migrations/sqlite").run(&pool).await?;

            Ok(Arc::new(SqliteTodoRepository::new(pool)))
        }
        Backend::Postgres(options) => {
            tracing::info!(
                host = options.get_host(),
                port = options.get_port(),
                database = options.get_database().unwrap_or_default(),
                "using postgres store"
            );

            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?;

            sqlx::migrate!("./migrations/postgres").run(&pool).await?;

            Ok(Arc::new(PostgresTodoRepository::new(pool)))
        }
    }
}

/// A migrated SQLite database that lives as long as the returned pool.
#[cfg(test)]
pub async fn in_memory_sqlite() -> anyhow::Result<sqlx::sqlite::SqlitePool> {
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations/sqlite").run(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_creates_sqlite_file_and_schema() {
        let dir = std::env::temp_dir().join(format!("todo-api-db-{}", std::process::id()));
        let db_file = dir.join("nested").join("todo.db");
        let config = DatabaseConfig {
            user: None,
            password: None,
            host: None,
            port: None,
            name: Some(db_file.display().to_string()),
            max_connections: 1,
        };

        let repo = connect(&config).await.unwrap();
        let list = repo.create_todo_list("Groceries", "Weekly shop").await.unwrap();

        assert!(db_file.exists());
        assert_eq!(repo.get_todo_list(list.id).await.unwrap(), Some(list));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
