use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config, data::role::RoleRepository, error::AppError, model::role::CreateRoleParams,
};
use entity::enums::RoleKind;

/// Names of the account roles that always exist and cannot be edited.
pub const SYSTEM_ROLES: &[&str] = &["admin", "warehouse", "engineer", "contractor"];

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, runs all
/// pending SeaORM migrations and seeds the system roles. This function must complete
/// successfully before the application can access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect, migrate or seed
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    seed_system_roles(&db).await?;

    Ok(db)
}

/// Creates any missing system role.
///
/// # Returns
/// - `Ok(usize)` - Number of roles created
/// - `Err(AppError)` - Database error
pub async fn seed_system_roles(db: &DatabaseConnection) -> Result<usize, AppError> {
    let repo = RoleRepository::new(db);
    let mut created = 0;

    for name in SYSTEM_ROLES {
        if repo.find_by_name(name, RoleKind::User).await?.is_some() {
            continue;
        }

        repo.create(CreateRoleParams {
            name: name.to_string(),
            kind: RoleKind::User,
            is_system: true,
        })
        .await?;
        created += 1;
    }

    if created > 0 {
        tracing::info!("Seeded {} system roles", created);
    }

    Ok(created)
}
