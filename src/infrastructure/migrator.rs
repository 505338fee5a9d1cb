// Schema migrator
// Applies module-contributed descriptors in caller order, refusing any plan
// that would create a dangling foreign reference

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use super::schema::SchemaDescriptor;

/// Errors that abort a migration run
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("entity {entity} references {missing}, which is neither listed before it nor present in the database")]
    DanglingReference {
        entity: &'static str,
        missing: &'static str,
    },

    #[error("entity {0} is listed more than once")]
    DuplicateEntity(&'static str),

    #[error("failed to migrate {entity}: {source}")]
    Store {
        entity: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

/// Physical store the migrator brings up to date
#[async_trait]
pub trait SchemaStore: Send + Sync {
    /// Whether a table with this name already exists
    async fn table_exists(&self, table: &str) -> Result<bool, sqlx::Error>;

    /// Executes the descriptor's DDL
    async fn apply(&self, descriptor: &SchemaDescriptor) -> Result<(), sqlx::Error>;
}

#[async_trait]
impl SchemaStore for PgPool {
    async fn table_exists(&self, table: &str) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar("SELECT to_regclass($1) IS NOT NULL")
            .bind(table)
            .fetch_one(self)
            .await?;

        Ok(exists)
    }

    async fn apply(&self, descriptor: &SchemaDescriptor) -> Result<(), sqlx::Error> {
        let mut tx = self.begin().await?;
        for statement in descriptor.statements() {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await
    }
}

/// Brings the store in line with `descriptors`
///
/// The list order is the migration order; it is never rearranged. Every
/// reference must point at the entity itself, an entity listed earlier or a
/// table that already exists, otherwise nothing is applied.
///
/// # Errors
/// * `MigrationError::DuplicateEntity` - an entity appears twice
/// * `MigrationError::DanglingReference` - a reference is not yet satisfiable
/// * `MigrationError::Store` - the store is unreachable or rejects the DDL
pub async fn migrate(
    store: &dyn SchemaStore,
    descriptors: &[SchemaDescriptor],
) -> Result<(), MigrationError> {
    check_order(store, descriptors).await?;

    for descriptor in descriptors {
        tracing::debug!(entity = descriptor.entity(), "Migrating entity");
        store
            .apply(descriptor)
            .await
            .map_err(|source| MigrationError::Store {
                entity: descriptor.entity(),
                source,
            })?;
    }

    tracing::info!(entities = descriptors.len(), "Schema migrated");
    Ok(())
}

async fn check_order(
    store: &dyn SchemaStore,
    descriptors: &[SchemaDescriptor],
) -> Result<(), MigrationError> {
    let mut listed: HashSet<&str> = HashSet::new();

    for descriptor in descriptors {
        for &missing in descriptor.references() {
            // a table may reference itself from within its own DDL
            if missing == descriptor.entity() || listed.contains(missing) {
                continue;
            }

            let exists = store
                .table_exists(missing)
                .await
                .map_err(|source| MigrationError::Store {
                    entity: descriptor.entity(),
                    source,
                })?;

            if !exists {
                return Err(MigrationError::DanglingReference {
                    entity: descriptor.entity(),
                    missing,
                });
            }
        }

        if !listed.insert(descriptor.entity()) {
            return Err(MigrationError::DuplicateEntity(descriptor.entity()));
        }
    }

    Ok(())
}
