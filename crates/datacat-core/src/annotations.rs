//! Supplemental table annotations stored in `public.datacat`.
//!
//! Annotation rows are optional supplements to the native catalog: a table
//! with no row still appears in every introspection listing, and reads as the
//! default annotation. Rows are created by [`reconcile_missing`] or by direct
//! external edits through [`update`]; nothing here ever deletes them.

use std::collections::BTreeSet;

use sqlx::{PgPool, Row};

use crate::error::Result;
use crate::introspect::{RESERVED_SCHEMAS, VISIBLE_TABLES_CTE};
use crate::month::Month;
use crate::types::{Annotation, TableId};

/// Create the annotation storage if absent.
///
/// Declares the `datacat_month` enum type (labels in calendar order, matching
/// [`Month`]) and the annotation table. The primary key on
/// `(table_schema, table_name)` is the uniqueness constraint that makes
/// reconciliation safe under concurrent invocation.
pub async fn install(db: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        DO $$
        BEGIN
            CREATE TYPE datacat_month AS ENUM (
                'january', 'february', 'march', 'april', 'may', 'june',
                'july', 'august', 'september', 'october', 'november', 'december');
        EXCEPTION
            WHEN duplicate_object THEN NULL;
        END
        $$;

        CREATE TABLE IF NOT EXISTS public.datacat (
            table_schema     text NOT NULL,
            table_name       text NOT NULL,
            description_long text,
            update_months    datacat_month[],
            PRIMARY KEY (table_schema, table_name)
        );
        "#,
    )
    .execute(db)
    .await?;

    tracing::info!("annotation storage ready");
    Ok(())
}

/// Read the annotation for a table.
///
/// A missing row reads as [`Annotation::default`]. The stored month set is
/// order-insensitive; it comes back deduplicated and calendar-ordered.
pub async fn get(db: &PgPool, schema: &str, table: &str) -> Result<Annotation> {
    let row = sqlx::query(
        "SELECT description_long, update_months
         FROM public.datacat
         WHERE table_schema = $1
           AND table_name = $2",
    )
    .bind(schema)
    .bind(table)
    .fetch_optional(db)
    .await?;

    Ok(match row {
        Some(row) => Annotation {
            description_long: row.get("description_long"),
            update_months: normalize_months(
                row.get::<Option<Vec<Month>>, _>("update_months")
                    .unwrap_or_default(),
            ),
        },
        None => Annotation::default(),
    })
}

/// Create default annotation rows for every visible table lacking one.
///
/// Returns exactly the set inserted by this call, ordered by
/// `(schema, table)`. Safe under concurrent invocation: the primary key plus
/// `ON CONFLICT DO NOTHING` makes a racing insert read as already handled
/// rather than a failure. Runs as one store transaction, committed before
/// returning.
pub async fn reconcile_missing(db: &PgPool) -> Result<Vec<TableId>> {
    let sql = format!(
        "WITH tables AS ({VISIBLE_TABLES_CTE}),
              inserted AS (
                  INSERT INTO public.datacat (table_schema, table_name)
                      SELECT table_schema, table_name
                      FROM tables
                      WHERE table_schema <> ALL($1)
                      ON CONFLICT (table_schema, table_name) DO NOTHING
                      RETURNING table_schema, table_name)
         SELECT table_schema, table_name
         FROM inserted
         ORDER BY table_schema, table_name"
    );
    let rows = sqlx::query(&sql)
        .bind(&RESERVED_SCHEMAS[..])
        .fetch_all(db)
        .await?;

    let inserted: Vec<TableId> = rows.iter().map(TableId::from_row).collect();
    tracing::info!(inserted = inserted.len(), "annotation reconciliation complete");
    Ok(inserted)
}

/// Upsert an annotation row: the direct-edit capability consumed by external
/// tooling.
///
/// An omitted field keeps its stored value; a supplied field replaces it. A
/// row is created if none exists yet.
pub async fn update(
    db: &PgPool,
    schema: &str,
    table: &str,
    description_long: Option<&str>,
    update_months: Option<&[Month]>,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO public.datacat (table_schema, table_name, description_long, update_months)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (table_schema, table_name) DO UPDATE
             SET description_long = COALESCE(excluded.description_long, datacat.description_long),
                 update_months    = COALESCE(excluded.update_months, datacat.update_months)",
    )
    .bind(schema)
    .bind(table)
    .bind(description_long)
    .bind(update_months)
    .execute(db)
    .await?;

    Ok(())
}

/// Deduplicate and calendar-order a stored month set.
fn normalize_months(months: Vec<Month>) -> Vec<Month> {
    months
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
