use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_event_repo::PostgresEventRepo,
    postgres_event_type_repo::PostgresEventTypeRepo, postgres_venue_repo::PostgresVenueRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_event_repo::SqliteEventRepo,
    sqlite_event_type_repo::SqliteEventTypeRepo, sqlite_venue_repo::SqliteVenueRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if config.is_postgres() {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections.unwrap_or(10))
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;
        postgres_state(config, pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections.unwrap_or(5))
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;
        sqlite_state(config, pool)
    }
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    AppState::new(
        config.clone(),
        Arc::new(PostgresVenueRepo::new(pool.clone())),
        Arc::new(PostgresEventRepo::new(pool.clone())),
        Arc::new(PostgresEventTypeRepo::new(pool.clone())),
        Arc::new(PostgresBookingRepo::new(pool)),
    )
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    AppState::new(
        config.clone(),
        Arc::new(SqliteVenueRepo::new(pool.clone())),
        Arc::new(SqliteEventRepo::new(pool.clone())),
        Arc::new(SqliteEventTypeRepo::new(pool.clone())),
        Arc::new(SqliteBookingRepo::new(pool)),
    )
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
