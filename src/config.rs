use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::{Args, Parser};
use sqlx::postgres::PgConnectOptions;

#[derive(Debug, Clone, Parser)]
#[command(name = "todo-api")]
#[command(about = "HTTP service for todo lists and their items")]
pub struct Config {
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl Config {
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    #[arg(id = "db_user", long = "db-user", env = "DB_USER")]
    pub user: Option<String>,
    #[arg(id = "db_password", long = "db-pass", env = "DB_PASS", hide_env_values = true)]
    pub password: Option<String>,
    /// Connects to PostgreSQL when set; otherwise a local SQLite file is used.
    #[arg(id = "db_host", long = "db-host", env = "DB_HOST")]
    pub host: Option<String>,
    #[arg(id = "db_port", long = "db-port", env = "DB_PORT")]
    pub port: Option<u16>,
    /// Database name for PostgreSQL, file path for SQLite.
    #[arg(id = "db_name", long = "db-name", env = "DB_NAME")]
    pub name: Option<String>,
    #[arg(
        id = "db_max_connections",
        long = "db-max-connections",
        env = "DB_MAX_CONNECTIONS",
        default_value_t = 5
    )]
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub enum Backend {
    Sqlite(PathBuf),
    Postgres(PgConnectOptions),
}

impl DatabaseConfig {
    pub fn backend(&self) -> anyhow::Result<Backend> {
        let Some(host) = self.host.as_deref().filter(|host| !host.is_empty()) else {
            let path = match self.name.as_deref().filter(|name| !name.is_empty()) {
                Some(name) => PathBuf::from(name),
                None => default_sqlite_path()?,
            };
            return Ok(Backend::Sqlite(path));
        };

        let mut options = PgConnectOptions::new()
            .host(host)
            .port(self.port.unwrap_or(5432))
            .database(self.name.as_deref().unwrap_or("todo"));
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }

        Ok(Backend::Postgres(options))
    }
}

fn default_sqlite_path() -> anyhow::Result<PathBuf> {
    let state_dir = dirs::state_dir()
        .or_else(dirs::config_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local/state")))
        .ok_or_else(|| anyhow::anyhow!("Could not find state directory"))?;

    Ok(state_dir.join("todo").join("data").join("todo.db"))
}
