//! Per-test `PostgreSQL` databases inside one shared container.
//!
//! The container is started by the first test that asks for a database and
//! lives until the test binary exits. Every [`TestDb`] gets a freshly created,
//! fully migrated database of its own, so tests never observe each other's
//! rows and need no cleanup between runs.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::OnceCell;
use uuid::Uuid;

const USER: &str = "marketplace_test";
const PASSWORD: &str = "marketplace_test_password";

struct SharedPostgres {
    _container: ContainerAsync<PostgresImage>,
    host: String,
    port: u16,
}

impl SharedPostgres {
    async fn start() -> Self {
        let container = PostgresImage::default()
            .with_user(USER)
            .with_password(PASSWORD)
            .with_db_name(USER)
            .start()
            .await
            .expect("Failed to start PostgreSQL container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get container port");

        let host = std::env::var("TESTCONTAINERS_HOST_OVERRIDE")
            .unwrap_or_else(|_| "localhost".to_string());

        Self {
            _container: container,
            host,
            port,
        }
    }

    fn url(&self, database: &str) -> String {
        format!(
            "postgresql://{USER}:{PASSWORD}@{}:{}/{database}",
            self.host, self.port
        )
    }
}

static POSTGRES: Lazy<OnceCell<SharedPostgres>> = Lazy::new(OnceCell::new);

/// An isolated, migrated database.
#[derive(Debug, Clone)]
pub struct TestDb {
    pool: PgPool,
    name: String,
}

impl TestDb {
    pub async fn new() -> Self {
        let postgres = POSTGRES.get_or_init(SharedPostgres::start).await;

        // uuid simple form keeps the name a valid unquoted identifier
        let name = format!("marketplace_{}", Uuid::now_v7().simple());

        let mut admin = PgConnection::connect(&postgres.url("postgres"))
            .await
            .expect("Failed to connect to the maintenance database");

        sqlx::query(&format!("CREATE DATABASE {name}"))
            .execute(&mut admin)
            .await
            .expect("Failed to create test database");

        admin
            .close()
            .await
            .expect("Failed to close maintenance connection");

        let pool = PgPool::connect(&postgres.url(&name))
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("../../migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self { pool, name }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn migrations_create_marketplace_tables() -> TestResult {
        let db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_schema = 'public' \
               AND table_name IN ('users', 'api_tokens', 'offers', 'offer_details', 'orders', 'reviews')",
        )
        .fetch_one(db.pool())
        .await?;

        assert_eq!(tables, 6, "every marketplace table should exist");

        Ok(())
    }

    #[tokio::test]
    async fn databases_do_not_share_rows() -> TestResult {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        assert_ne!(first.name(), second.name(), "names should be unique");

        sqlx::query("INSERT INTO users (username, kind) VALUES ('isolated', 'customer')")
            .execute(first.pool())
            .await?;

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(second.pool())
            .await?;

        assert_eq!(users, 0, "rows should stay in their own database");

        Ok(())
    }

    #[tokio::test]
    async fn dropped_transaction_leaves_no_rows() -> TestResult {
        let db = TestDb::new().await;

        {
            let mut tx = db.pool().begin().await?;

            sqlx::query("INSERT INTO users (username, kind) VALUES ('rollback', 'customer')")
                .execute(&mut *tx)
                .await?;
        }

        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(db.pool())
            .await?;

        assert_eq!(users, 0, "dropped transaction should not persist rows");

        Ok(())
    }
}
