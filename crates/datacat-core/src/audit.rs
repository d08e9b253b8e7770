//! Documentation completeness audits.
//!
//! Three independent read-only checks over the merged catalog and annotation
//! data, each returning `(schema, table)` identities in ascending order. Zero
//! findings is a valid outcome, not an error; nothing here mutates state.

use sqlx::PgPool;

use crate::error::Result;
use crate::introspect::{RESERVED_SCHEMAS, TABLE_COLUMNS_CTE, VISIBLE_TABLES_CTE};
use crate::types::TableId;

/// Visible tables with no native comment.
pub async fn missing_table_comments(db: &PgPool) -> Result<Vec<TableId>> {
    let sql = format!(
        "WITH tables AS ({VISIBLE_TABLES_CTE})
         SELECT table_schema, table_name
         FROM tables
         WHERE table_schema <> ALL($1)
           AND obj_description(to_regclass(quote_ident(table_schema) || '.' ||
                                           quote_ident(table_name)),
                               'pg_class') IS NULL
         ORDER BY table_schema, table_name"
    );
    let rows = sqlx::query(&sql)
        .bind(&RESERVED_SCHEMAS[..])
        .fetch_all(db)
        .await?;
    Ok(rows.iter().map(TableId::from_row).collect())
}

/// Visible tables having at least one column with no native comment,
/// deduplicated per table.
pub async fn tables_with_uncommented_columns(db: &PgPool) -> Result<Vec<TableId>> {
    let sql = format!(
        "WITH tables AS ({VISIBLE_TABLES_CTE}),
              columns AS ({TABLE_COLUMNS_CTE})
         SELECT columns.table_schema, columns.table_name
         FROM columns
                  INNER JOIN tables
                             ON tables.table_schema = columns.table_schema
                                 AND tables.table_name = columns.table_name
         WHERE columns.table_schema <> ALL($1)
           AND col_description(to_regclass(quote_ident(columns.table_schema) || '.' ||
                                           quote_ident(columns.table_name)),
                               ordinal_position) IS NULL
         GROUP BY columns.table_schema, columns.table_name
         ORDER BY columns.table_schema, columns.table_name"
    );
    let rows = sqlx::query(&sql)
        .bind(&RESERVED_SCHEMAS[..])
        .fetch_all(db)
        .await?;
    Ok(rows.iter().map(TableId::from_row).collect())
}

/// Visible tables whose annotation row is absent, or present with an empty
/// long description or an empty month set.
pub async fn missing_annotation_details(db: &PgPool) -> Result<Vec<TableId>> {
    let sql = format!(
        "WITH tables AS ({VISIBLE_TABLES_CTE})
         SELECT tables.table_schema, tables.table_name
         FROM tables
                  LEFT JOIN public.datacat cat
                            ON tables.table_schema = cat.table_schema
                                AND tables.table_name = cat.table_name
         WHERE tables.table_schema <> ALL($1)
           AND (cat.table_schema IS NULL
                OR cat.description_long IS NULL OR cat.description_long = ''
                OR cat.update_months IS NULL OR cardinality(cat.update_months) = 0)
         ORDER BY table_schema, table_name"
    );
    let rows = sqlx::query(&sql)
        .bind(&RESERVED_SCHEMAS[..])
        .fetch_all(db)
        .await?;
    Ok(rows.iter().map(TableId::from_row).collect())
}
