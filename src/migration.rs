//! Table DDL for the resource model. Idempotent: every statement is IF NOT EXISTS.

use crate::config::{validate, ResourceDef, CREATED_AT_COLUMN, ID_COLUMN, NAME_COLUMN, RESOURCES, UPDATED_AT_COLUMN};
use crate::error::AppError;
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// CREATE TABLE for one resource: BIGSERIAL id, nullable TEXT attributes
/// except `name`, insert timestamp, and a nullable update timestamp.
pub fn create_table_sql(resource: &ResourceDef) -> String {
    let mut col_defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quote(ID_COLUMN))];
    for field in resource.fields {
        let not_null = if *field == NAME_COLUMN { " NOT NULL" } else { "" };
        col_defs.push(format!("{} TEXT{}", quote(field), not_null));
    }
    col_defs.push(format!("{} TIMESTAMPTZ NOT NULL DEFAULT NOW()", quote(CREATED_AT_COLUMN)));
    col_defs.push(format!("{} TIMESTAMPTZ", quote(UPDATED_AT_COLUMN)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(resource.table_name),
        col_defs.join(", ")
    )
}

/// Index backing name lookups and the default name sort.
pub fn create_name_index_sql(resource: &ResourceDef) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        quote(&format!("ix_{}_name", resource.table_name)),
        quote(resource.table_name),
        quote(NAME_COLUMN)
    )
}

/// Validate the resource model, then create any missing tables and indexes.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    validate(&RESOURCES)?;
    for resource in RESOURCES {
        sqlx::query(&create_table_sql(resource)).execute(pool).await?;
        sqlx::query(&create_name_index_sql(resource)).execute(pool).await?;
        tracing::info!(table = resource.table_name, "table ready");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PEOPLE, PLANETS};

    #[test]
    fn people_table_ddl() {
        let sql = create_table_sql(&PEOPLE);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS \"people\" (\"id\" BIGSERIAL PRIMARY KEY, \"name\" TEXT NOT NULL, \"height\" TEXT,"));
        assert!(sql.ends_with("\"created_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW(), \"updated_at\" TIMESTAMPTZ)"));
    }

    #[test]
    fn only_name_is_required() {
        let sql = create_table_sql(&PLANETS);
        assert_eq!(sql.matches("TEXT NOT NULL").count(), 1);
        assert!(sql.contains("\"surface_water\" TEXT"));
    }

    #[test]
    fn name_index() {
        assert_eq!(
            create_name_index_sql(&PLANETS),
            "CREATE INDEX IF NOT EXISTS \"ix_planets_name\" ON \"planets\" (\"name\")"
        );
    }
}
