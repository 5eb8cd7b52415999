use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::entity::{submission, test_case};

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // Set connection pool options
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Ensure secondary indexes exist.
///
/// SeaORM's schema-sync doesn't create non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Aggregation loads every test case of a submission after each callback:
    // SELECT * FROM test_case WHERE submission_id = ?
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_test_case_submission")
        .table(test_case::Entity)
        .col(test_case::Column::SubmissionId)
        .to_string(PostgresQueryBuilder);
    create_index(db, "idx_test_case_submission", &stmt).await;

    // Stuck-submission sweep:
    // SELECT id FROM submission WHERE status = 'PENDING' AND created_at < ?
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_submission_status_created")
        .table(submission::Entity)
        .col(submission::Column::Status)
        .col(submission::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);
    create_index(db, "idx_submission_status_created", &stmt).await;

    Ok(())
}

async fn create_index(db: &DatabaseConnection, name: &str, stmt: &str) {
    match db.execute_unprepared(stmt).await {
        Ok(_) => info!("Ensured index {} exists", name),
        Err(e) => warn!("Failed to create index {}: {}", name, e),
    }
}
