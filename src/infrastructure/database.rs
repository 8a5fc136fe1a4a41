use crate::config::AppConfig;
use crate::entities::{media, students};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::time::Duration;
use tracing::info;

pub async fn setup_database(config: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    info!("📂 Database: {}", config.database_url);

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    Ok(db)
}

pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    info!("🔄 Running auto-migrations...");

    let stmts = vec![
        (
            "students",
            schema
                .create_table_from_entity(students::Entity)
                .if_not_exists()
                .to_owned(),
        ),
        (
            "media",
            schema
                .create_table_from_entity(media::Entity)
                .if_not_exists()
                .to_owned(),
        ),
    ];

    for (name, stmt) in stmts {
        let stmt = builder.build(&stmt);
        match db.execute(stmt).await {
            Ok(_) => info!("   - Table '{}' checked/created", name),
            Err(e) => tracing::warn!("   - Failed to create table '{}': {}", name, e),
        }
    }

    // Indexes for the declared sort keys and the owner filter
    let index_stmts = vec![
        "CREATE INDEX IF NOT EXISTS idx_students_name ON students(name)",
        "CREATE INDEX IF NOT EXISTS idx_students_student_id ON students(student_id)",
        "CREATE INDEX IF NOT EXISTS idx_media_uploaded_at ON media(uploaded_at)",
        "CREATE INDEX IF NOT EXISTS idx_media_student_id ON media(student_id)",
    ];

    for query in index_stmts {
        match db
            .execute(sea_orm::Statement::from_string(builder, query.to_owned()))
            .await
        {
            Ok(_) => info!("   - Executed: {}", query),
            Err(e) => tracing::warn!("   - Index statement warning: {} -> {}", query, e),
        }
    }

    Ok(())
}
